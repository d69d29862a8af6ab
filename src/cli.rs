use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;
use crate::error::ErrorPolicy;
use crate::logging::LoggingConfig;

/// Status bar driven by flexbox markup read line by line from stdin.
#[derive(Parser, Debug)]
#[command(name = "flexbar", version, about, disable_help_flag = true)]
pub struct Cli {
    /// Bar width in cells (default: terminal width, or 80 with --output).
    #[arg(short, long)]
    pub width: Option<u16>,

    /// Bar height in cells.
    #[arg(short, long, default_value_t = 1)]
    pub height: u16,

    /// Render into FILE (PNG for .png, plain text otherwise) and exit at end
    /// of input.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Append click reports ("name button modifiers") to FILE.
    #[arg(long, value_name = "FILE")]
    pub clicks: Option<PathBuf>,

    /// Skip lines with errors instead of exiting.
    #[arg(long)]
    pub keep_going: bool,

    /// Write logs to FILE. Without it the terminal bar logs nothing unless
    /// --log is given.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter in env_logger syntax (overrides RUST_LOG).
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,

    /// Print help.
    #[arg(long, action = clap::ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,
}

impl Cli {
    /// Convert parsed arguments into an [`AppConfig`].
    pub fn into_config(self) -> AppConfig {
        let mut config = AppConfig::new().with_height(self.height).with_logging(LoggingConfig {
            env_filter: self.log,
            file: self.log_file,
            ..LoggingConfig::default()
        });
        if let Some(width) = self.width {
            config = config.with_width(width);
        }
        if let Some(output) = self.output {
            config = config.with_output(output);
        }
        if let Some(clicks) = self.clicks {
            config = config.with_clicks(clicks);
        }
        if self.keep_going {
            config = config.with_policy(ErrorPolicy::SkipLine);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> AppConfig {
        Cli::try_parse_from(std::iter::once("flexbar").chain(args.iter().copied()))
            .unwrap()
            .into_config()
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn short_flags() {
        let config = parse(&["-w", "100", "-h", "2", "-o", "out.txt"]);
        assert_eq!(config.width, Some(100));
        assert_eq!(config.height, 2);
        assert_eq!(config.output, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn defaults_without_arguments() {
        let config = parse(&[]);
        assert_eq!(config.width, None);
        assert_eq!(config.height, 1);
        assert_eq!(config.policy, ErrorPolicy::Abort);
        assert!(config.logging.env_filter.is_none());
    }

    #[test]
    fn long_flags() {
        let config = parse(&[
            "--clicks", "c.log", "--keep-going", "--log-file", "f.log", "--log", "debug",
        ]);
        assert_eq!(config.clicks, Some(PathBuf::from("c.log")));
        assert_eq!(config.policy, ErrorPolicy::SkipLine);
        assert_eq!(config.logging.file, Some(PathBuf::from("f.log")));
        assert_eq!(config.logging.env_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn bad_width_is_rejected() {
        assert!(Cli::try_parse_from(["flexbar", "-w", "wide"]).is_err());
    }
}
