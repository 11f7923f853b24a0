//! Application startup: configuration, logging, and one coordinated run

use super::cli::args::Args;
use super::cli::config::{FileConfig, OutputFormat, RunSettings};
use crate::coordinator::{Coordinator, LineFormat, LogSink, PixelSink, RunReport, WriterSink};
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::{flush_logging, init_logging};
use crate::core::shutdown::{ShutdownCoordinator, INTERRUPTED_EXIT_CODE};
use crate::pixel::ImageSource;
use clap::Parser;
use std::io::{BufRead, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;

/// Parse the process arguments and run; returns the process exit code
pub async fn startup() -> i32 {
    run(Args::parse()).await
}

pub async fn run(args: Args) -> i32 {
    let settings = match FileConfig::load(args.config_file.as_deref())
        .and_then(|file| RunSettings::resolve(&args, file))
    {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    if let Some(color) = settings.color {
        colored::control::set_override(color);
    }
    let use_color = settings.use_color(std::io::stderr().is_terminal());
    if let Err(e) = init_logging(
        &settings.log_level,
        &settings.log_format,
        settings.log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Warning: logging is unavailable: {}", e);
    }

    log::info!(
        "pixel-priority {} starting",
        crate::core::version::long_version()
    );
    log::debug!("Settings: {:?}", settings);

    let code = classify(&settings).await;
    flush_logging();
    code
}

async fn classify(settings: &RunSettings) -> i32 {
    let image = match settings.image.clone().or_else(prompt_for_image) {
        Some(image) => image,
        None => {
            log::error!("FATAL: No image file given");
            return 1;
        }
    };

    let source = match ImageSource::open(&image) {
        Ok(source) => source,
        Err(e) => {
            log_error_with_context(&e, "Loading image");
            return 1;
        }
    };

    let coordinator = Coordinator::new(source, build_sink(settings.output)).with_warmup(settings.warmup);

    let (shutdown, _shutdown_rx) = ShutdownCoordinator::new();
    shutdown.install_signal_handlers();
    let watcher = shutdown.cancel_on_shutdown(coordinator.cancel_handle());

    let result = tokio::task::spawn_blocking(move || coordinator.run()).await;
    watcher.abort();

    match result {
        Ok(Ok(report)) => {
            log_summary(&report);
            0
        }
        Ok(Err(e)) if e.is_cancelled() => {
            log_summary(e.report());
            log::warn!("{}", e);
            INTERRUPTED_EXIT_CODE
        }
        Ok(Err(e)) => {
            log_summary(e.report());
            log_error_with_context(&e, "Pixel classification failed");
            1
        }
        Err(join_error) => {
            log::error!("FATAL: Coordinator task failed: {}", join_error);
            1
        }
    }
}

/// Sink for the selected output format
pub fn build_sink(output: OutputFormat) -> Arc<dyn PixelSink> {
    match output {
        OutputFormat::Log => Arc::new(LogSink),
        OutputFormat::Text => Arc::new(WriterSink::stdout(LineFormat::Text)),
        OutputFormat::Json => Arc::new(WriterSink::stdout(LineFormat::Json)),
    }
}

fn log_summary(report: &RunReport) {
    log::info!("Summary: {}", report);
}

fn prompt_for_image() -> Option<PathBuf> {
    eprint!("Image file: ");
    read_image_path(std::io::stdin().lock())
}

/// First line of `reader`, trimmed; `None` when it is empty or unreadable
pub fn read_image_path(mut reader: impl BufRead) -> Option<PathBuf> {
    let mut line = String::new();
    reader.read_line(&mut line).ok()?;
    let trimmed = line.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}
