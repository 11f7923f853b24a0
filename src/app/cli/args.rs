//! Command-line arguments

use super::config::OutputFormat;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(name = "pixel-priority")]
#[command(about = "Report every pixel of an image under three priority orderings at once")]
#[command(version, long_version = crate::core::version::long_version())]
pub struct Args {
    /// Image file to classify (read from stdin when omitted)
    #[arg(value_name = "IMAGE")]
    pub image: Option<PathBuf>,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Pixels inserted into every queue before the consumers start
    #[arg(short = 'w', long = "warmup", value_name = "N", value_parser = parse_warmup)]
    pub warmup: Option<usize>,

    /// Where reports go
    #[arg(short = 'o', long = "output", value_name = "FORMAT", value_enum)]
    pub output: Option<OutputFormat>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log record format
    #[arg(long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Write log records to this file instead of stderr
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Force colored log output
    #[arg(long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// More verbose logging (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Less verbose logging (repeatable)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,
}

impl Args {
    /// Net verbosity: each `-v` adds one, each `-q` subtracts one
    pub fn verbosity(&self) -> i8 {
        let net = i16::from(self.verbose) - i16::from(self.quiet);
        net.clamp(i16::from(i8::MIN), i16::from(i8::MAX)) as i8
    }

    /// `Some(true)` for `--color`, `Some(false)` for `--no-color`, `None` otherwise
    pub fn color_override(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

fn parse_warmup(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("warm-up must be at least 1".to_string()),
        Ok(count) => Ok(count),
        Err(e) => Err(format!("'{}' is not a pixel count: {}", value, e)),
    }
}
