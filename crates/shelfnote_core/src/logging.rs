//! Rolling file logger bootstrap.
//!
//! # Responsibility
//! - Initialize the `log` backend exactly once per process.
//! - Capture panics as metadata-only log events.
//!
//! # Invariants
//! - Re-initialization with identical settings is a no-op.
//! - Re-initialization with a different level or directory is rejected.
//! - Initialization never panics.
//! - Core log lines carry ids and counts, never item text.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::path::PathBuf;

const LOG_FILE_BASENAME: &str = "shelfnote";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;
const MAX_PANIC_PAYLOAD_CHARS: usize = 120;
const LEVEL_NAMES: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Validated logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: &'static str,
    pub log_dir: PathBuf,
}

impl LogSettings {
    /// Normalizes a level name and an absolute directory.
    ///
    /// # Errors
    /// - Unsupported level names.
    /// - Empty or relative directories.
    pub fn parse(level: &str, log_dir: &str) -> Result<Self, String> {
        Ok(Self {
            level: normalize_level(level)?,
            log_dir: normalize_log_dir(log_dir)?,
        })
    }
}

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Initializes logging with a level name and an absolute log directory.
///
/// Returns a human-readable error when settings are invalid, conflict with
/// an earlier initialization, or the backend cannot start.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let settings = LogSettings::parse(level, log_dir)?;
    let active = ACTIVE_LOGGER.get_or_try_init(|| start_logger(settings.clone()))?;
    ensure_same_settings(&active.settings, &settings)
}

/// Returns `(level, log_dir)` of the active logger, if any.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE_LOGGER
        .get()
        .map(|active| (active.settings.level, active.settings.log_dir.clone()))
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(settings: LogSettings) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(&settings.log_dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            settings.log_dir.display()
        )
    })?;

    let handle = Logger::try_with_str(settings.level)
        .map_err(|err| format!("invalid log level `{}`: {err}", settings.level))?
        .log_to_file(
            FileSpec::default()
                .directory(settings.log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook_once();

    info!(
        "event=logging_init module=core status=ok level={} log_dir={} version={}",
        settings.level,
        settings.log_dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        settings,
        _handle: handle,
    })
}

fn ensure_same_settings(active: &LogSettings, requested: &LogSettings) -> Result<(), String> {
    let conflict = if active.log_dir != requested.log_dir {
        Some(format!(
            "directory `{}` (active: `{}`)",
            requested.log_dir.display(),
            active.log_dir.display()
        ))
    } else if active.level != requested.level {
        Some(format!("level `{}` (active: `{}`)", requested.level, active.level))
    } else {
        None
    };

    match conflict {
        Some(detail) => Err(format!("logging is already running; refusing to switch to {detail}")),
        None => Ok(()),
    }
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    let requested = level.trim().to_ascii_lowercase();
    let requested = if requested == "warning" { "warn" } else { requested.as_str() };
    LEVEL_NAMES
        .iter()
        .copied()
        .find(|name| *name == requested)
        .ok_or_else(|| {
            format!(
                "unsupported log level `{}`; use one of {}",
                level.trim(),
                LEVEL_NAMES.join("|")
            )
        })
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(log_dir.trim());
    if path.as_os_str().is_empty() {
        Err("log directory is empty".to_string())
    } else if path.is_relative() {
        Err(format!("log directory `{}` is not absolute", path.display()))
    } else {
        Ok(path)
    }
}

fn install_panic_hook_once() {
    PANIC_HOOK.get_or_init(|| {
        let previous_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let at = panic_info
                .location()
                .map_or_else(|| "unknown".to_string(), |loc| format!("{}:{}", loc.file(), loc.line()));
            error!(
                "event=panic module=core status=error at={} payload={}",
                at,
                one_line(panic_payload(panic_info.payload()), MAX_PANIC_PAYLOAD_CHARS)
            );
            previous_hook(panic_info);
        }));
    });
}

fn panic_payload(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string payload>")
}

/// Folds line breaks into spaces and caps the length at `max_chars`.
fn one_line(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars().map(|ch| if matches!(ch, '\n' | '\r') { ' ' } else { ch });
    let mut out = chars.by_ref().take(max_chars).collect::<String>();
    if chars.next().is_some() {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, one_line, LogSettings};

    #[test]
    fn settings_normalize_level_aliases() {
        let settings = LogSettings::parse(" WARNING ", "/tmp/shelfnote-logs").unwrap();
        assert_eq!(settings.level, "warn");
    }

    #[test]
    fn settings_reject_relative_and_empty_dirs() {
        let relative = LogSettings::parse("info", "logs/dev").unwrap_err();
        assert!(relative.contains("absolute"));
        let empty = LogSettings::parse("info", "  ").unwrap_err();
        assert!(empty.contains("empty"));
        let level = LogSettings::parse("loud", "/tmp").unwrap_err();
        assert!(level.contains("unsupported"));
    }

    #[test]
    fn panic_payload_is_flattened_and_capped() {
        assert_eq!(one_line("a\nb\rc-long-tail", 5), "a b c...");
        assert_eq!(one_line("short", 5), "short");
    }

    #[test]
    fn init_is_idempotent_and_rejects_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap().to_string();
        let other_str = other.path().to_str().unwrap().to_string();

        init_logging("info", &dir_str).unwrap();
        init_logging("INFO", &dir_str).unwrap();

        let level_err = init_logging("debug", &dir_str).unwrap_err();
        assert!(level_err.contains("level `debug`"));
        let dir_err = init_logging("info", &other_str).unwrap_err();
        assert!(dir_err.contains("directory"));

        let (level, active_dir) = logging_status().unwrap();
        assert_eq!(level, "info");
        assert_eq!(active_dir, dir.path());
    }
}
