// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Window events are turned into shell messages here; everything the player
//! surface subscribes to comes from `video_view::State::subscription`.

use super::Message;
use iced::{event, window, Subscription};

/// Tracks the main window: its id and size on open and on resize.
pub fn create_window_subscription() -> Subscription<Message> {
    event::listen_with(route_window_event)
}

fn route_window_event(
    event: event::Event,
    _status: event::Status,
    window_id: window::Id,
) -> Option<Message> {
    match event {
        event::Event::Window(
            window::Event::Opened { size, .. } | window::Event::Resized(size),
        ) => Some(Message::WindowResized {
            window: window_id,
            size,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::{mouse, Size};

    #[test]
    fn resize_reports_size() {
        let id = window::Id::unique();
        let message = route_window_event(
            event::Event::Window(window::Event::Resized(Size::new(1024.0, 700.0))),
            event::Status::Ignored,
            id,
        );
        assert!(matches!(
            message,
            Some(Message::WindowResized { window, size })
                if window == id && size == Size::new(1024.0, 700.0)
        ));
    }

    #[test]
    fn pointer_events_are_left_to_widgets() {
        let message = route_window_event(
            event::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)),
            event::Status::Ignored,
            window::Id::unique(),
        );
        assert!(message.is_none());
    }
}
