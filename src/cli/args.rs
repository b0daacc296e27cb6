//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::config::TrackerConfig;
use crate::domain::selection::SelectionTarget;

/// clip-tracker - follow clipboard selections
#[derive(Parser, Debug)]
#[command(name = "clip-tracker")]
#[command(version)]
#[command(about = "Track clipboard selections and put history items back on them")]
#[command(long_about = None)]
pub struct Cli {
    /// Log tracker decisions (same as RUST_LOG=debug)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch selections and print every accepted change
    Watch(WatchArgs),
    /// Put text on a selection and serve it until another application copies
    Select {
        /// Text to select
        text: String,
        /// Selection to write
        #[arg(short = 's', long, value_name = "SELECTION", default_value = "clipboard")]
        selection: SelectionArg,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options of the watch command; unset values come from the config file
#[derive(clap::Args, Debug, Default)]
pub struct WatchArgs {
    /// Also track the primary (mouse) selection
    #[arg(short = 'p', long)]
    pub primary: bool,

    /// Strip surrounding whitespace from text
    #[arg(short = 't', long)]
    pub trim: bool,

    /// Shortest accepted text, in bytes
    #[arg(long, value_name = "BYTES")]
    pub min_size: Option<u32>,

    /// Longest accepted text, in bytes
    #[arg(long, value_name = "BYTES")]
    pub max_size: Option<u32>,
}

impl WatchArgs {
    /// Config overrides given on the command line
    pub fn to_config(&self) -> TrackerConfig {
        TrackerConfig {
            trim_items: if self.trim { Some(true) } else { None },
            min_text_item_size: self.min_size,
            max_text_item_size: self.max_size,
            track_primary: if self.primary { Some(true) } else { None },
        }
    }
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Selection argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SelectionArg {
    Clipboard,
    Primary,
}

impl From<SelectionArg> for SelectionTarget {
    fn from(arg: SelectionArg) -> Self {
        match arg {
            SelectionArg::Clipboard => SelectionTarget::Clipboard,
            SelectionArg::Primary => SelectionTarget::Primary,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "trim_items",
    "min_text_item_size",
    "max_text_item_size",
    "track_primary",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_watch_defaults() {
        let cli = Cli::parse_from(["clip-tracker", "watch"]);
        assert!(!cli.verbose);
        match cli.command {
            Commands::Watch(args) => {
                assert!(!args.primary);
                assert!(!args.trim);
                assert_eq!(args.to_config(), TrackerConfig::empty());
            }
            other => panic!("Expected Watch command, got {:?}", other),
        }
    }

    #[test]
    fn cli_parses_watch_overrides() {
        let cli = Cli::parse_from([
            "clip-tracker", "-v", "watch", "-p", "-t", "--min-size", "2", "--max-size", "10",
        ]);
        assert!(cli.verbose);
        let Commands::Watch(args) = cli.command else {
            panic!("Expected Watch command");
        };
        let config = args.to_config();
        assert_eq!(config.track_primary, Some(true));
        assert_eq!(config.trim_items, Some(true));
        assert_eq!(config.min_text_item_size, Some(2));
        assert_eq!(config.max_text_item_size, Some(10));
    }

    #[test]
    fn cli_parses_select() {
        let cli = Cli::parse_from(["clip-tracker", "select", "hello", "-s", "primary"]);
        match cli.command {
            Commands::Select { text, selection } => {
                assert_eq!(text, "hello");
                assert_eq!(SelectionTarget::from(selection), SelectionTarget::Primary);
            }
            other => panic!("Expected Select command, got {:?}", other),
        }
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["clip-tracker", "config", "set", "trim_items", "true"]);
        if let Commands::Config {
            action: ConfigAction::Set { key, value },
        } = cli.command
        {
            assert_eq!(key, "trim_items");
            assert_eq!(value, "true");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("trim_items"));
        assert!(is_valid_config_key("max_text_item_size"));
        assert!(!is_valid_config_key("invalid_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
