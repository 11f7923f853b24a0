//! Logging setup on top of flexi_logger
//!
//! Three record layouts are available: `text` (timestamp, level, message),
//! `ext` (text plus the source location) and `json` (one object per line).
//! Records go to stderr unless a log file is configured, so report lines
//! written to stdout stay clean.

use std::sync::{Mutex, OnceLock};

static LOGGER_HANDLE: OnceLock<Mutex<flexi_logger::LoggerHandle>> = OnceLock::new();

/// Levels in increasing verbosity; `-v`/`-q` step through this list
const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Start the global logger
///
/// Can only succeed once per process; later calls return the flexi_logger
/// initialisation error.
pub fn init_logging(
    log_level: &str,
    log_format: &str,
    log_file: Option<&std::path::Path>,
    color_enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    use flexi_logger::{FileSpec, Logger};

    let mut logger = Logger::try_with_str(log_level)?;

    logger = match log_format {
        "json" => logger.format(json_format),
        "ext" if color_enabled => logger.format(extended_color_format),
        "ext" => logger.format(extended_format),
        _ if color_enabled => logger.format(simple_color_format),
        _ => logger.format(simple_format),
    };

    if let Some(path) = log_file {
        let file_spec = FileSpec::try_from(path)?;
        logger = logger.log_to_file(file_spec);
    }

    let handle = logger.start()?;
    let _ = LOGGER_HANDLE.set(Mutex::new(handle));

    Ok(())
}

/// Flush buffered records, typically right before the process exits
pub fn flush_logging() {
    if let Some(handle) = LOGGER_HANDLE.get() {
        if let Ok(handle) = handle.lock() {
            handle.flush();
        }
    }
}

/// Shift a level name by a verbosity delta, clamping at `off` and `trace`
///
/// Unknown level names are returned unchanged so flexi_logger can report
/// them (it also accepts full specs such as `info,pixel_priority=debug`).
pub fn level_with_verbosity(level: &str, verbosity: i8) -> String {
    let normalized = level.to_ascii_lowercase();
    match LEVELS.iter().position(|candidate| *candidate == normalized) {
        Some(index) => {
            let shifted = (index as i64 + verbosity as i64).clamp(0, LEVELS.len() as i64 - 1);
            LEVELS[shifted as usize].to_string()
        }
        None => level.to_string(),
    }
}

fn level_abbr(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    }
}

fn level_colored(level: log::Level) -> colored::ColoredString {
    use colored::Colorize;

    match level {
        log::Level::Error => "ERR".red().bold(),
        log::Level::Warn => "WRN".yellow(),
        log::Level::Info => "INF".green(),
        log::Level::Debug => "DBG".blue(),
        log::Level::Trace => "TRC".magenta(),
    }
}

// Format: "YYYY-MM-DD HH:mm:ss.fff INF message"
fn simple_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args()
    )
}

fn simple_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored(record.level()),
        record.args()
    )
}

// Format: "YYYY-MM-DD HH:mm:ss.fff INF message (coordinator/runner.rs:42)"
fn extended_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line())
    )
}

fn extended_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line()).dimmed()
    )
}

fn json_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    let json_obj = serde_json::json!({
        "timestamp": now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        "level": level_abbr(record.level()),
        "message": record.args().to_string(),
        "target": format_target_as_path(record.target(), record.line()),
        "thread": std::thread::current().name().unwrap_or("unnamed"),
    });

    match serde_json::to_string(&json_obj) {
        Ok(json_string) => w.write_all(json_string.as_bytes()),
        Err(_) => w.write_all(b"{\"error\":\"Failed to serialize log message\"}"),
    }
}

// pixel_priority::coordinator::runner -> coordinator/runner.rs
fn format_target_as_path(target: &str, line: Option<u32>) -> String {
    let path_like = match target.strip_prefix("pixel_priority::") {
        Some(without_prefix) => without_prefix.replace("::", "/") + ".rs",
        None => target.replace("::", "/"),
    };

    match line {
        Some(line_num) => format!("{}:{}", path_like, line_num),
        None => path_like,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexi_logger::DeferredNow;

    fn render(
        format: fn(
            &mut dyn std::io::Write,
            &mut DeferredNow,
            &log::Record,
        ) -> Result<(), std::io::Error>,
        target: &str,
        line: Option<u32>,
    ) -> String {
        let mut buffer = Vec::new();
        let mut now = DeferredNow::new();
        let record = log::Record::builder()
            .level(log::Level::Info)
            .target(target)
            .line(line)
            .args(format_args!("Run complete"))
            .build();

        format(&mut buffer, &mut now, &record).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_simple_format_has_no_location() {
        let output = render(simple_format, "pixel_priority::coordinator::runner", Some(7));

        assert!(output.contains("INF Run complete"), "got: {}", output);
        assert!(!output.contains("runner.rs"));
    }

    #[test]
    fn test_extended_format_shows_module_path() {
        let output = render(extended_format, "pixel_priority::coordinator::runner", Some(42));

        assert!(
            output.ends_with("INF Run complete (coordinator/runner.rs:42)"),
            "got: {}",
            output
        );
    }

    #[test]
    fn test_json_format_is_one_object() {
        let output = render(json_format, "pixel_priority::app::startup", None);

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["level"], "INF");
        assert_eq!(value["message"], "Run complete");
        assert_eq!(value["target"], "app/startup.rs");
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_foreign_targets_keep_their_crate_name() {
        assert_eq!(format_target_as_path("image::codecs::png", None), "image/codecs/png");
        assert_eq!(
            format_target_as_path("pixel_priority::heap", Some(3)),
            "heap.rs:3"
        );
    }

    #[test]
    fn test_level_with_verbosity() {
        assert_eq!(level_with_verbosity("info", 0), "info");
        assert_eq!(level_with_verbosity("info", 1), "debug");
        assert_eq!(level_with_verbosity("INFO", 2), "trace");
        assert_eq!(level_with_verbosity("info", 5), "trace");
        assert_eq!(level_with_verbosity("warn", -1), "error");
        assert_eq!(level_with_verbosity("warn", -9), "off");
        assert_eq!(
            level_with_verbosity("info,pixel_priority=trace", 1),
            "info,pixel_priority=trace"
        );
    }

    #[test]
    fn test_logger_spec_accepts_every_level() {
        for level in LEVELS {
            assert!(flexi_logger::Logger::try_with_str(level).is_ok(), "{}", level);
        }
    }
}
