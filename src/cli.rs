//! Command-line argument parsing
//!
//! Replays key symbols against an empty formula:
//!
//! ```text
//! formula 1 / 3                  # \frac{1}{3}
//! formula --degrees \\sin 3 0    # sin(30) in degree mode
//! formula 2 left backspace       # navigation keys by name
//! formula --degrees --save         # make degree mode the default
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::config::EditorConfig;
use crate::translate::AngleMode;

/// A structural formula editor
#[derive(Parser, Debug)]
#[command(name = "formula", version, about = "A structural formula editor")]
pub struct CliArgs {
    /// Key symbols to press, in order (e.g. `\frac`, `7`, `left`, `backspace`)
    #[arg(value_name = "SYMBOL", allow_hyphen_values = true)]
    pub symbols: Vec<String>,

    /// Evaluate trig functions in degrees
    #[arg(long)]
    pub degrees: bool,

    /// Palette to render with (e.g. default-dark)
    #[arg(long, value_name = "ID")]
    pub theme: Option<String>,

    /// Key layout file replacing the configured one
    #[arg(long, value_name = "PATH")]
    pub layout: Option<PathBuf>,

    /// Skip the colorized render; print source markup and translation only
    #[arg(long)]
    pub plain: bool,

    /// Write --degrees, --theme and --layout to config.yaml as the new defaults
    #[arg(long)]
    pub save: bool,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub config: EditorConfig,
    pub symbols: Vec<String>,
    pub plain: bool,
    /// Configuration to persist, when --save was given
    pub persist: Option<EditorConfig>,
}

impl CliArgs {
    /// Apply the flags on top of the persisted configuration
    pub fn into_config(self, mut config: EditorConfig) -> StartupConfig {
        if self.degrees {
            config.angle_mode = AngleMode::Degree;
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(layout) = self.layout {
            config.key_layout = Some(layout);
        }
        let persist = self.save.then(|| config.clone());
        // One-shot replay: evaluation is requested explicitly
        config.realtime_evaluation = false;

        StartupConfig {
            config,
            symbols: self.symbols,
            plain: self.plain,
            persist,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::parse_from(std::iter::once("formula").chain(args.iter().copied()))
    }

    #[test]
    fn test_symbols() {
        let args = parse(&["1", "/", "3"]);
        assert_eq!(args.symbols, vec!["1", "/", "3"]);
        assert!(!args.degrees);
    }

    #[test]
    fn test_minus_is_a_symbol() {
        let args = parse(&["5", "-", "2"]);
        assert_eq!(args.symbols, vec!["5", "-", "2"]);
    }

    #[test]
    fn test_flags_override_config() {
        let args = parse(&["--degrees", "--theme", "default-dark", "--plain", "x"]);
        let startup = args.into_config(EditorConfig::default());
        assert_eq!(startup.config.angle_mode, AngleMode::Degree);
        assert_eq!(startup.config.theme, "default-dark");
        assert!(startup.plain);
        assert_eq!(startup.symbols, vec!["x"]);
        assert!(startup.persist.is_none());
    }

    #[test]
    fn test_save_keeps_realtime_setting() {
        let args = parse(&["--degrees", "--save"]);
        let startup = args.into_config(EditorConfig::default());
        let persist = startup.persist.unwrap();
        assert_eq!(persist.angle_mode, AngleMode::Degree);
        assert!(persist.realtime_evaluation);
        assert!(!startup.config.realtime_evaluation);
    }

    #[test]
    fn test_layout_path() {
        let args = parse(&["--layout", "/tmp/keys.yaml"]);
        let startup = args.into_config(EditorConfig::default());
        assert_eq!(
            startup.config.key_layout,
            Some(PathBuf::from("/tmp/keys.yaml"))
        );
    }
}
