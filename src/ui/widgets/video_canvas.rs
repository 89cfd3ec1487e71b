// SPDX-License-Identifier: MPL-2.0
//! Widget for rendering video frames.
//!
//! Holds the latest decoded frame as an `image::Handle` and draws it
//! letterboxed inside whatever box the parent gives it.

use iced::widget::{image, Space};
use iced::{ContentFit, Element, Length};
use std::sync::Arc;

/// Video frame widget.
pub struct VideoCanvas<Message> {
    frame_handle: Option<image::Handle>,
    width: u32,
    height: u32,

    _phantom: std::marker::PhantomData<Message>,
}

impl<Message> VideoCanvas<Message> {
    pub fn new() -> Self {
        Self {
            frame_handle: None,
            width: 0,
            height: 0,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Replaces the displayed frame.
    pub fn set_frame(&mut self, rgba_data: Arc<Vec<u8>>, width: u32, height: u32) {
        // Take ownership when the decoder dropped its reference, copy otherwise
        let data = Arc::try_unwrap(rgba_data).unwrap_or_else(|arc| (*arc).clone());
        self.frame_handle = Some(image::Handle::from_rgba(width, height, data));
        self.width = width;
        self.height = height;
    }

    pub fn has_frame(&self) -> bool {
        self.frame_handle.is_some()
    }

    /// Renders the frame fitted into the parent's box.
    ///
    /// Without a frame nothing is drawn, so the parent's background shows.
    pub fn view(&self) -> Element<'_, Message>
    where
        Message: 'static,
    {
        match &self.frame_handle {
            Some(handle) => image::Image::new(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => Space::new().width(Length::Fill).height(Length::Fill).into(),
        }
    }
}

impl<Message> Default for VideoCanvas<Message> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Message> std::fmt::Debug for VideoCanvas<Message> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoCanvas")
            .field("has_frame", &self.has_frame())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
