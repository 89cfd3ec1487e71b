// SPDX-License-Identifier: MPL-2.0
//! Imperative handle on a running video element.

use super::decoder::DecoderCommand;
use crate::error::{Result, VideoError};
use std::fmt;
use tokio::sync::mpsc;

/// Commands the player surface can issue to its video element.
///
/// The surface owns at most one handle; until the element reports that it
/// started, there is none and commands wait in the surface state.
pub trait VideoHandle: Send {
    /// Moves playback to `target_secs`.
    fn seek(&self, target_secs: f64) -> Result<()>;

    /// Updates the element's `paused` input.
    fn set_paused(&self, paused: bool) -> Result<()>;

    /// Updates the element's `muted` input.
    fn set_muted(&self, muted: bool) -> Result<()>;
}

/// Cloneable sender for the FFmpeg-backed element.
#[derive(Clone)]
pub struct DecoderCommandSender {
    tx: mpsc::UnboundedSender<DecoderCommand>,
}

impl DecoderCommandSender {
    pub fn new(tx: mpsc::UnboundedSender<DecoderCommand>) -> Self {
        Self { tx }
    }

    pub fn send(&self, command: DecoderCommand) -> Result<()> {
        self.tx
            .send(command)
            .map_err(|_| VideoError::Disconnected.into())
    }
}

impl VideoHandle for DecoderCommandSender {
    fn seek(&self, target_secs: f64) -> Result<()> {
        self.send(DecoderCommand::Seek { target_secs })
    }

    fn set_paused(&self, paused: bool) -> Result<()> {
        self.send(if paused {
            DecoderCommand::Pause
        } else {
            DecoderCommand::Play
        })
    }

    fn set_muted(&self, muted: bool) -> Result<()> {
        self.send(DecoderCommand::SetMuted(muted))
    }
}

impl fmt::Debug for DecoderCommandSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderCommandSender")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}
