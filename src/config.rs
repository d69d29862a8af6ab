//! Application configuration.

use std::path::PathBuf;

use crate::error::ErrorPolicy;
use crate::logging::LoggingConfig;

/// Bar width used when writing to a file and no width was given.
pub const HEADLESS_WIDTH: u16 = 80;

/// Configuration for one run of the bar.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bar width in cells. `None` takes the terminal width.
    pub width: Option<u16>,
    /// Bar height in cells.
    pub height: u16,
    /// Write the final render here instead of drawing in the terminal.
    pub output: Option<PathBuf>,
    /// Append click reports here.
    pub clicks: Option<PathBuf>,
    pub policy: ErrorPolicy,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: 1,
            output: None,
            clicks: None,
            policy: ErrorPolicy::Abort,
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the width (builder).
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the height (builder).
    pub fn with_height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    /// Render into `path` and exit at end of input (builder).
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Append click reports to `path` (builder).
    pub fn with_clicks(mut self, path: impl Into<PathBuf>) -> Self {
        self.clicks = Some(path.into());
        self
    }

    /// Set the error policy (builder).
    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the logging configuration (builder).
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    /// Whether the bar runs without a terminal.
    pub fn is_headless(&self) -> bool {
        self.output.is_some()
    }

    /// The logging configuration to install for this run.
    ///
    /// A terminal bar logging to stderr would draw over itself, so with no
    /// log file and no explicit filter it logs nothing. `RUST_LOG` is
    /// ignored in that case.
    pub fn effective_logging(&self) -> LoggingConfig {
        let mut logging = self.logging.clone();
        if !self.is_headless() && logging.file.is_none() && logging.env_filter.is_none() {
            logging.env_filter = Some(SILENT_FILTER.to_owned());
        }
        logging
    }
}

/// Filter that turns every record off.
pub const SILENT_FILTER: &str = "off";
