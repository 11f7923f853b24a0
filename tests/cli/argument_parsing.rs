//! CLI argument parsing tests

use clap::Parser;
use pixel_priority::app::cli::args::Args;
use pixel_priority::app::cli::config::{OutputFormat, RunSettings};
use std::path::PathBuf;

static COMMAND_NAME: &str = "pixel-priority";

#[test]
fn test_full_command_line_resolves() {
    let args = Args::try_parse_from([
        COMMAND_NAME,
        "--warmup",
        "7",
        "--output",
        "log",
        "--log-level",
        "warn",
        "-v",
        "--log-file",
        "run.log",
        "image.bmp",
    ])
    .unwrap();

    let settings = RunSettings::resolve(&args, None).unwrap();

    assert_eq!(settings.image, Some(PathBuf::from("image.bmp")));
    assert_eq!(settings.warmup, 7);
    assert_eq!(settings.output, OutputFormat::Log);
    assert_eq!(settings.log_level, "info");
    assert_eq!(settings.log_file, Some(PathBuf::from("run.log")));
}

#[test]
fn test_quiet_flags_can_silence_logging() {
    let args = Args::try_parse_from([COMMAND_NAME, "-qqqqq"]).unwrap();

    let settings = RunSettings::resolve(&args, None).unwrap();

    assert_eq!(settings.log_level, "off");
}

#[test]
fn test_more_than_one_image_is_rejected() {
    assert!(Args::try_parse_from([COMMAND_NAME, "a.png", "b.png"]).is_err());
}

#[test]
fn test_help_lists_output_formats() {
    let error = Args::try_parse_from([COMMAND_NAME, "--help"]).unwrap_err();
    let help = error.to_string();

    assert!(help.contains("--output"));
    assert!(help.contains("--warmup"));
    assert!(help.contains("--config-file"));
}
