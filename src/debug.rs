use parking_lot::Mutex;
/// Logging infrastructure for par-term-typeset
///
/// Routes the `log` facade (`log::info!`, `log::debug!`, ...) used across the
/// workspace into a debug log file:
/// - /tmp/par_term_typeset_debug.log on Unix/macOS
/// - %TEMP%\par_term_typeset_debug.log on Windows
///
/// When `RUST_LOG` is set, lines are mirrored to stderr as well.
///
/// Level precedence: `--log-level` on the command line, then `RUST_LOG`, then
/// the config file's `log_level` (applied once the config is loaded).
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};
use par_term_config::LogLevel;

/// Global debug log sink
struct DebugLogger {
    file: Option<std::fs::File>,
    mirror_stderr: bool,
}

impl DebugLogger {
    fn new(mirror_stderr: bool) -> Self {
        let file = match OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
        {
            Ok(f) => Some(f),
            // Logging must never break layout output on stdout
            Err(_e) => None,
        };

        let mut logger = DebugLogger {
            file,
            mirror_stderr,
        };
        logger.write_raw(&format!(
            "\n{}\npar-term-typeset debug session started at {}\n{}\n",
            "=".repeat(80),
            get_timestamp(),
            "=".repeat(80)
        ));
        logger
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn log(&mut self, record: &Record) {
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        self.write_raw(&line);
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

/// Whether the level came from the CLI or `RUST_LOG` (config must not override)
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

fn get_logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| Mutex::new(DebugLogger::new(rust_log_level().is_some())))
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    let log_path = PathBuf::from("/tmp/par_term_typeset_debug.log");
    #[cfg(not(unix))]
    let log_path = std::env::temp_dir().join("par_term_typeset_debug.log");
    log_path
}

/// Level requested through `RUST_LOG`.
///
/// Accepts a bare level (`debug`) or directives (`par_term_fonts=trace`); for
/// directives the most verbose level mentioned wins.
fn rust_log_level() -> Option<LevelFilter> {
    let value = std::env::var("RUST_LOG").ok()?;
    parse_rust_log(&value)
}

fn parse_rust_log(value: &str) -> Option<LevelFilter> {
    value
        .split(',')
        .filter_map(|directive| {
            let level = directive.rsplit('=').next()?.trim();
            LevelFilter::from_str(level).ok()
        })
        .max()
}

struct LogBridge;

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            get_logger().lock().log(record);
        }
    }

    fn flush(&self) {
        if let Some(file) = get_logger().lock().file.as_mut() {
            let _ = file.flush();
        }
    }
}

static BRIDGE: LogBridge = LogBridge;

/// Install the log bridge.
///
/// `cli_level` takes precedence over `RUST_LOG`; with neither, logging stays
/// off until [`apply_config_level`] is called. Installing twice is a no-op.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let pinned = cli_level.or_else(rust_log_level);
    LEVEL_PINNED.store(pinned.is_some(), Ordering::Relaxed);

    if log::set_logger(&BRIDGE).is_ok() {
        log::set_max_level(pinned.unwrap_or(LevelFilter::Off));
    }
}

/// Apply the config file's log level unless the CLI or `RUST_LOG` set one.
pub fn apply_config_level(level: LogLevel) {
    if !LEVEL_PINNED.load(Ordering::Relaxed) {
        log::set_max_level(level.to_level_filter());
    }
}
