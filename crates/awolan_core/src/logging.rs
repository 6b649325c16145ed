//! File logging bootstrap shared by every embedding of the core.
//!
//! # Responsibility
//! - Start rolling file logs once per process and keep the handle alive.
//! - Capture panics as structured log events with clipped payloads.
//!
//! # Invariants
//! - Log lines carry metadata only; user-entered text never reaches them.
//! - A second init with the same level and directory is a no-op; any other
//!   combination is rejected without touching the active logger.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Once;

const LOG_BASENAME: &str = "awolan";
const LOG_ROTATE_BYTES: u64 = 5 * 1024 * 1024;
const LOG_KEEP_FILES: usize = 3;
const PANIC_CLIP_CHARS: usize = 120;

static ACTIVE: OnceCell<ActiveLogging> = OnceCell::new();
static PANIC_HOOK: Once = Once::new();

struct ActiveLogging {
    level: &'static str,
    dir: PathBuf,
    _handle: LoggerHandle,
}

/// Starts file logging for the process.
///
/// The first successful call wins; later calls succeed only when they repeat
/// the active level and directory.
///
/// # Errors
/// - `level` is not one of trace|debug|info|warn|error.
/// - `log_dir` is empty, relative, or cannot be created.
/// - The logger backend fails to start.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let level = parse_level(level)?;
    let dir = parse_log_dir(log_dir)?;

    let active = ACTIVE.get_or_try_init(|| start_file_logger(level, dir.clone()))?;

    if active.level != level {
        return Err(format!(
            "logging already active at level `{}`; cannot change to `{level}`",
            active.level
        ));
    }
    if active.dir != dir {
        return Err(format!(
            "logging already active under `{}`; cannot move to `{}`",
            active.dir.display(),
            dir.display()
        ));
    }
    Ok(())
}

/// Reports the active level and directory, or `None` before init.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE.get().map(|active| (active.level, active.dir.clone()))
}

/// Default level when the embedder does not pick one.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_file_logger(level: &'static str, dir: PathBuf) -> Result<ActiveLogging, String> {
    std::fs::create_dir_all(&dir)
        .map_err(|err| format!("cannot create log directory `{}`: {err}", dir.display()))?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| format!("bad log level `{level}`: {err}"))?
        .log_to_file(FileSpec::default().directory(&dir).basename(LOG_BASENAME))
        .rotate(
            Criterion::Size(LOG_ROTATE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(LOG_KEEP_FILES),
        )
        .append()
        .write_mode(WriteMode::BufferAndFlush)
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("logger failed to start: {err}"))?;

    install_panic_hook();

    info!(
        "event=log_init module=core status=ok level={} dir={} version={} platform={} build={}",
        level,
        dir.display(),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        build_profile()
    );

    Ok(ActiveLogging {
        level,
        dir,
        _handle: handle,
    })
}

fn parse_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!("unknown log level `{other}`")),
    }
}

fn parse_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log directory is required".to_owned());
    }
    let dir = Path::new(trimmed);
    if dir.is_relative() {
        return Err(format!("log directory must be absolute, got `{trimmed}`"));
    }
    Ok(dir.to_path_buf())
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            // Payloads can quote user text; clip before they hit the file.
            let location = match info.location() {
                Some(loc) => format!("{}:{}", loc.file(), loc.line()),
                None => "unknown".to_owned(),
            };
            error!(
                "event=panic_captured module=core status=error location={location} payload={}",
                clip_for_log(&payload_text(info))
            );
            previous(info);
        }));
    });
}

fn payload_text(info: &std::panic::PanicHookInfo<'_>) -> String {
    info.payload()
        .downcast_ref::<&str>()
        .map(|text| (*text).to_owned())
        .or_else(|| info.payload().downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "opaque panic payload".to_owned())
}

fn clip_for_log(text: &str) -> String {
    let mut clipped = String::with_capacity(text.len().min(PANIC_CLIP_CHARS));
    for (count, ch) in text.chars().enumerate() {
        if count == PANIC_CLIP_CHARS {
            clipped.push_str("...");
            return clipped;
        }
        clipped.push(if ch == '\n' || ch == '\r' { ' ' } else { ch });
    }
    clipped
}

#[cfg(test)]
mod tests {
    use super::{clip_for_log, init_logging, logging_status, parse_level, parse_log_dir};
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn parse_level_trims_and_ignores_case() {
        assert_eq!(parse_level("INFO").expect("INFO should parse"), "info");
        assert_eq!(
            parse_level(" Warning ").expect("warning should alias to warn"),
            "warn"
        );
        assert!(parse_level("verbose").is_err());
    }

    #[test]
    fn relative_or_empty_log_dir_is_rejected() {
        let relative = parse_log_dir("logs/dev").expect_err("relative dirs must be rejected");
        assert!(relative.contains("absolute"));

        let empty = parse_log_dir("   ").expect_err("blank dirs must be rejected");
        assert!(empty.contains("required"));
    }

    #[test]
    fn clip_for_log_flattens_line_breaks() {
        assert_eq!(clip_for_log("a\nb\rc"), "a b c");
    }

    #[test]
    fn clip_for_log_caps_overlong_payloads() {
        let clipped = clip_for_log(&"x".repeat(500));
        assert!(clipped.ends_with("..."));
        assert_eq!(clipped.chars().count(), super::PANIC_CLIP_CHARS + 3);
    }

    #[test]
    fn second_init_with_matching_config_is_a_no_op() {
        let dir = unique_log_dir("reinit");
        let dir_text = dir.to_str().expect("temp dir should be UTF-8").to_string();
        let other = unique_log_dir("other");
        let other_text = other
            .to_str()
            .expect("temp dir should be UTF-8")
            .to_string();

        init_logging("info", &dir_text).expect("first init should succeed");
        init_logging("info", &dir_text).expect("matching re-init should be a no-op");

        let level_conflict =
            init_logging("debug", &dir_text).expect_err("level change must be rejected");
        assert!(level_conflict.contains("cannot change"));

        let dir_conflict =
            init_logging("info", &other_text).expect_err("directory change must be rejected");
        assert!(dir_conflict.contains("cannot move"));

        let (level, active_dir) = logging_status().expect("logging should be active");
        assert_eq!(level, "info");
        assert_eq!(active_dir, dir);
    }

    fn unique_log_dir(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("awolan-logs-{tag}-{}-{nanos}", std::process::id()))
    }
}
