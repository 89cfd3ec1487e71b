// SPDX-License-Identifier: MPL-2.0
//! Loading and saving of the player's `settings.toml`.
//!
//! # Configuration Sections
//!
//! - `[player]` - Initial mute state and surface width
//! - `[overlay]` - Overlay spring/slide animation parameters
//! - `[video]` - Video element progress cadence
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` CLI argument or `VIDEO_VIEW_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use video_view::config;
//!
//! let (mut config, _warning) = config::load();
//! config.player.muted = Some(false);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Player surface settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerConfig {
    /// Whether playback starts muted.
    #[serde(default = "default_muted", skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,

    /// Player width before the first window resize event.
    #[serde(default = "default_width", skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            muted: default_muted(),
            width: default_width(),
        }
    }
}

/// Overlay animation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlayConfig {
    #[serde(
        default = "default_spring_stiffness",
        skip_serializing_if = "Option::is_none"
    )]
    pub spring_stiffness: Option<f32>,

    #[serde(
        default = "default_spring_damping",
        skip_serializing_if = "Option::is_none"
    )]
    pub spring_damping: Option<f32>,

    #[serde(default = "default_spring_mass", skip_serializing_if = "Option::is_none")]
    pub spring_mass: Option<f32>,

    /// Slide duration in milliseconds.
    #[serde(
        default = "default_slide_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub slide_duration_ms: Option<u32>,

    /// Slide distance in logical pixels.
    #[serde(
        default = "default_slide_offset",
        skip_serializing_if = "Option::is_none"
    )]
    pub slide_offset: Option<f32>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            spring_stiffness: default_spring_stiffness(),
            spring_damping: default_spring_damping(),
            spring_mass: default_spring_mass(),
            slide_duration_ms: default_slide_duration_ms(),
            slide_offset: default_slide_offset(),
        }
    }
}

/// Video element settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoConfig {
    /// Interval between progress events in milliseconds.
    #[serde(
        default = "default_progress_interval_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub progress_interval_ms: Option<u32>,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            progress_interval_ms: default_progress_interval_ms(),
        }
    }
}

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub overlay: OverlayConfig,

    #[serde(default)]
    pub video: VideoConfig,
}

impl Config {
    /// Initial mute flag.
    pub fn muted(&self) -> bool {
        self.player.muted.unwrap_or(DEFAULT_MUTED)
    }

    /// Initial player width, clamped.
    pub fn player_width(&self) -> f32 {
        finite_or(self.player.width, DEFAULT_PLAYER_WIDTH)
            .clamp(MIN_PLAYER_WIDTH, MAX_PLAYER_WIDTH)
    }

    /// Resolved overlay animation parameters, clamped.
    pub fn overlay_params(&self) -> OverlayParams {
        let overlay = &self.overlay;
        OverlayParams {
            stiffness: finite_or(overlay.spring_stiffness, DEFAULT_SPRING_STIFFNESS)
                .clamp(MIN_SPRING_STIFFNESS, MAX_SPRING_STIFFNESS),
            damping: finite_or(overlay.spring_damping, DEFAULT_SPRING_DAMPING)
                .clamp(MIN_SPRING_DAMPING, MAX_SPRING_DAMPING),
            mass: finite_or(overlay.spring_mass, DEFAULT_SPRING_MASS)
                .clamp(MIN_SPRING_MASS, MAX_SPRING_MASS),
            slide_duration: Duration::from_millis(u64::from(
                overlay
                    .slide_duration_ms
                    .unwrap_or(DEFAULT_SLIDE_DURATION_MS)
                    .clamp(MIN_SLIDE_DURATION_MS, MAX_SLIDE_DURATION_MS),
            )),
            slide_offset: finite_or(overlay.slide_offset, DEFAULT_SLIDE_OFFSET)
                .clamp(0.0, MAX_SLIDE_OFFSET),
        }
    }

    /// Interval between progress events, clamped.
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(u64::from(
            self.video
                .progress_interval_ms
                .unwrap_or(DEFAULT_PROGRESS_INTERVAL_MS)
                .clamp(MIN_PROGRESS_INTERVAL_MS, MAX_PROGRESS_INTERVAL_MS),
        ))
    }
}

/// Overlay curve parameters after defaults and clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayParams {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    pub slide_duration: Duration,
    pub slide_offset: f32,
}

impl Default for OverlayParams {
    fn default() -> Self {
        Config::default().overlay_params()
    }
}

/// TOML accepts `nan` and `inf` for floats; those fall back to `default`.
fn finite_or(value: Option<f32>, default: f32) -> f32 {
    value.filter(|v| v.is_finite()).unwrap_or(default)
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_muted() -> Option<bool> {
    Some(DEFAULT_MUTED)
}

fn default_width() -> Option<f32> {
    Some(DEFAULT_PLAYER_WIDTH)
}

fn default_spring_stiffness() -> Option<f32> {
    Some(DEFAULT_SPRING_STIFFNESS)
}

fn default_spring_damping() -> Option<f32> {
    Some(DEFAULT_SPRING_DAMPING)
}

fn default_spring_mass() -> Option<f32> {
    Some(DEFAULT_SPRING_MASS)
}

fn default_slide_duration_ms() -> Option<u32> {
    Some(DEFAULT_SLIDE_DURATION_MS)
}

fn default_slide_offset() -> Option<f32> {
    Some(DEFAULT_SLIDE_OFFSET)
}

fn default_progress_interval_ms() -> Option<u32> {
    Some(DEFAULT_PROGRESS_INTERVAL_MS)
}

// =============================================================================
// Load / Save
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("failed to load {}: {}", path.display(), err)),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
