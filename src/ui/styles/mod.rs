// SPDX-License-Identifier: MPL-2.0
//! Centralized styles for the player overlays.

pub mod button;
pub mod overlay;
pub mod slider;
