// SPDX-License-Identifier: MPL-2.0
//! Application root: one window hosting the video player surface.
//!
//! The shell owns what the surface cannot: the window (title, size,
//! fullscreen mode) and the process lifetime. Surface effects are translated
//! into window tasks here.

mod message;
pub mod paths;
mod subscription;

pub use message::{Flags, Message, USAGE};

use crate::config::{self, Config};
use crate::ui::styles;
use crate::ui::video_view::{self, player_size, Effect, Props};
use crate::video_player;
use iced::widget::container;
use iced::{window, Element, Length, Subscription, Task, Theme};
use std::fmt;

/// Root Iced application state.
pub struct App {
    viewer: video_view::State,
    title: Option<String>,
    fullscreen: bool,
    window_id: Option<window::Id>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("viewer", &self.viewer)
            .field("title", &self.title)
            .field("fullscreen", &self.fullscreen)
            .field("window_id", &self.window_id)
            .finish()
    }
}

/// Builds the window settings for the configured player width.
pub fn window_settings(config: &Config) -> window::Settings {
    let (width, height) = player_size(config.player_width());
    let (min_width, min_height) = player_size(config::MIN_PLAYER_WIDTH);

    window::Settings {
        size: iced::Size::new(width, height),
        min_size: Some(iced::Size::new(min_width, min_height)),
        ..window::Settings::default()
    }
}

/// Widest 16:9 box that fits in `size`.
fn fitted_width(size: iced::Size) -> f32 {
    size.width.min(size.height * 16.0 / 9.0)
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    paths::init_cli_overrides(flags.config_dir.clone());
    let (config, config_warning) = config::load();
    if let Some(warning) = config_warning {
        tracing::warn!("{warning}");
    }
    if let Err(error) = video_player::init_ffmpeg() {
        tracing::warn!(%error, "FFmpeg initialization failed");
    }

    let settings = window_settings(&config);

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming them once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some((flags, config)));
    let boot = move || {
        let (flags, config) = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        (App::new(flags, &config), Task::none())
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(settings)
        .subscription(App::subscription)
        .run()
}

impl App {
    fn new(flags: Flags, config: &Config) -> Self {
        tracing::info!(path = %flags.source.display(), paused = flags.paused, "opening video");

        let viewer = video_view::State::new(
            Props {
                source: flags.source,
                paused: flags.paused,
                title: flags.title.clone(),
            },
            config,
        );

        Self {
            viewer,
            title: flags.title,
            fullscreen: false,
            window_id: None,
        }
    }

    fn title(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }

        match self.viewer.source().file_name().and_then(|n| n.to_str()) {
            Some(name) => format!("{name} - {}", paths::APP_NAME),
            None => paths::APP_NAME.to_string(),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_window_subscription(),
            self.viewer.subscription().map(Message::Viewer),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Viewer(message) => {
                let effect = self.viewer.update(message);
                self.handle_effect(effect)
            }
            Message::WindowResized { window, size } => {
                self.window_id = Some(window);
                self.viewer.update(video_view::Message::Resized(fitted_width(size)));
                Task::none()
            }
        }
    }

    fn handle_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::None => Task::none(),
            Effect::ToggleFullscreen => self.toggle_fullscreen(),
            Effect::Back => {
                tracing::info!("back requested, closing");
                iced::exit()
            }
            Effect::OpenOptions => {
                tracing::info!("options requested");
                Task::none()
            }
        }
    }

    fn toggle_fullscreen(&mut self) -> Task<Message> {
        let Some(window_id) = self.window_id else {
            return Task::none();
        };

        self.fullscreen = !self.fullscreen;
        let mode = if self.fullscreen {
            window::Mode::Fullscreen
        } else {
            window::Mode::Windowed
        };
        window::set_mode(window_id, mode)
    }

    fn view(&self) -> Element<'_, Message> {
        container(self.viewer.view().map(Message::Viewer))
            .center(Length::Fill)
            .style(styles::overlay::surface)
            .into()
    }
}
