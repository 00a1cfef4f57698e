// Command line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Samsung Galaxy Book control panel
#[derive(Parser, Debug)]
#[command(name = "samsung-control", version, about)]
pub struct Cli {
    /// Config file (default: ~/.config/samsung-control/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Prefix for all hardware paths, overriding the config file
    #[arg(long, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Log at debug level (may be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Open the control panel (default)
    Gui,
    /// Print every attribute and sensor reading
    Status,
    /// Print one attribute value
    Get {
        /// Attribute name, e.g. usb_charge or platform_profile
        attribute: String,
    },
    /// Write one attribute value
    Set { attribute: String, value: String },
    /// List platform profile choices
    Choices,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_gui() {
        let cli = Cli::try_parse_from(["samsung-control"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn verbose_flag_repeats() {
        let cli = Cli::try_parse_from(["samsung-control", "-vv", "status"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.command, Some(Command::Status));
    }

    #[test]
    fn parses_set_with_root() {
        let cli = Cli::try_parse_from([
            "samsung-control",
            "--root",
            "/tmp/fake",
            "set",
            "charge_control_end_threshold",
            "80",
        ])
        .unwrap();

        assert_eq!(cli.root, Some(PathBuf::from("/tmp/fake")));
        assert_eq!(
            cli.command,
            Some(Command::Set {
                attribute: "charge_control_end_threshold".into(),
                value: "80".into()
            })
        );
    }

    #[test]
    fn set_requires_value() {
        assert!(Cli::try_parse_from(["samsung-control", "set", "usb_charge"]).is_err());
    }
}
