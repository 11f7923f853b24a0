//! Complete invocations of the application entry point

use crate::common::{write_png, write_primaries_png};
use pixel_priority::app::cli::args::Args;
use pixel_priority::app::cli::config::OutputFormat;
use pixel_priority::app::startup::run;
use pixel_priority::pixel::Pixel;
use serial_test::serial;
use tempfile::TempDir;

fn log_only(image: std::path::PathBuf) -> Args {
    Args {
        image: Some(image),
        output: Some(OutputFormat::Log),
        log_level: Some("off".to_string()),
        ..Args::default()
    }
}

#[tokio::test]
#[serial]
async fn test_run_succeeds_on_primaries() {
    let dir = TempDir::new().unwrap();

    assert_eq!(run(log_only(write_primaries_png(dir.path()))).await, 0);
}

#[tokio::test]
#[serial]
async fn test_run_with_small_warmup() {
    let dir = TempDir::new().unwrap();
    let image = write_png(dir.path(), "checker.png", 16, 16, |x, y| {
        if (x + y) % 2 == 0 {
            Pixel::new(255, 255, 255)
        } else {
            Pixel::new(0, 0, 0)
        }
    });
    let args = Args {
        warmup: Some(1),
        ..log_only(image)
    };

    assert_eq!(run(args).await, 0);
}

#[tokio::test]
#[serial]
async fn test_run_rejects_text_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.png");
    std::fs::write(&path, "definitely not a png").unwrap();

    assert_eq!(run(log_only(path)).await, 1);
}

#[tokio::test]
#[serial]
async fn test_run_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "warmup = 0\n").unwrap();
    let args = Args {
        config_file: Some(config),
        ..log_only(write_primaries_png(dir.path()))
    };

    assert_eq!(run(args).await, 1);
}
