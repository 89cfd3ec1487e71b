// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::video_view;
use iced::window;
use std::ffi::OsString;
use std::path::PathBuf;

/// Command line help.
pub const USAGE: &str =
    "Usage: video_view <SOURCE> [--paused] [--title <TITLE>] [--config-dir <DIR>]";

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Viewer(video_view::Message),
    /// The main window appeared or changed size.
    WindowResized { window: window::Id, size: iced::Size },
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Flags {
    /// Media file to play.
    pub source: PathBuf,
    /// Start paused instead of playing.
    pub paused: bool,
    /// Window title, defaults to the file name.
    pub title: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `VIDEO_VIEW_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}

impl Flags {
    /// Parses flags from the process arguments, without the program name.
    pub fn from_args(mut args: pico_args::Arguments) -> Result<Self, pico_args::Error> {
        let paused = args.contains("--paused");
        let title = args.opt_value_from_str("--title")?;
        let config_dir = args.opt_value_from_str("--config-dir")?;
        let source: PathBuf = args.free_from_os_str(|s| Ok::<_, &str>(PathBuf::from(s)))?;

        let rest = args.finish();
        if !rest.is_empty() {
            return Err(pico_args::Error::UnusedArgsLeft(
                rest.into_iter()
                    .map(|arg: OsString| arg.to_string_lossy().into_owned())
                    .collect(),
            ));
        }

        Ok(Self {
            source,
            paused,
            title,
            config_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Flags, pico_args::Error> {
        Flags::from_args(pico_args::Arguments::from_vec(
            args.iter().map(OsString::from).collect(),
        ))
    }

    #[test]
    fn source_only() {
        let flags = parse(&["clip.mp4"]).expect("valid args");
        assert_eq!(flags.source, PathBuf::from("clip.mp4"));
        assert!(!flags.paused);
        assert_eq!(flags.title, None);
        assert_eq!(flags.config_dir, None);
    }

    #[test]
    fn all_options_in_any_order() {
        let flags = parse(&[
            "--title",
            "Holiday",
            "clip.mp4",
            "--paused",
            "--config-dir",
            "/tmp/cfg",
        ])
        .expect("valid args");

        assert_eq!(
            flags,
            Flags {
                source: PathBuf::from("clip.mp4"),
                paused: true,
                title: Some("Holiday".to_string()),
                config_dir: Some("/tmp/cfg".to_string()),
            }
        );
    }

    #[test]
    fn missing_source_is_an_error() {
        assert!(matches!(
            parse(&["--paused"]),
            Err(pico_args::Error::MissingArgument)
        ));
    }

    #[test]
    fn extra_arguments_are_rejected() {
        assert!(matches!(
            parse(&["a.mp4", "b.mp4"]),
            Err(pico_args::Error::UnusedArgsLeft(_))
        ));
    }

    #[test]
    fn title_without_value_is_an_error() {
        assert!(parse(&["clip.mp4", "--title"]).is_err());
    }
}
