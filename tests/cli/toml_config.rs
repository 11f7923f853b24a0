//! TOML configuration tests

use pixel_priority::app::cli::args::Args;
use pixel_priority::app::cli::config::{
    default_config_path, ConfigError, FileConfig, OutputFormat, RunSettings, CONFIG_FILE_NAME,
};
use pixel_priority::core::error_handling::ContextualError;
use tempfile::TempDir;

#[test]
fn test_config_file_round_trip_through_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "warmup = 40\noutput = \"json\"\ncolor = true\n").unwrap();

    let config = FileConfig::load(Some(path.as_path())).unwrap();
    let settings = RunSettings::resolve(&Args::default(), config).unwrap();

    assert_eq!(settings.warmup, 40);
    assert_eq!(settings.output, OutputFormat::Json);
    assert_eq!(settings.color, Some(true));
}

#[test]
fn test_empty_config_file_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.toml");
    std::fs::write(&path, "").unwrap();

    let config = FileConfig::load(Some(path.as_path())).unwrap();

    assert_eq!(config, Some(FileConfig::default()));
}

#[test]
fn test_config_errors_are_user_actionable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "output = [\n").unwrap();

    let error = FileConfig::load(Some(path.as_path())).unwrap_err();

    assert!(matches!(error, ConfigError::Parse { .. }));
    assert!(error.is_user_actionable());
    assert!(error.user_message().unwrap().contains("broken.toml"));
}

#[test]
fn test_default_config_path_layout() {
    if let Some(path) = default_config_path() {
        assert!(path.ends_with("PixelPriority/pixel-priority.toml"));
    }
}
