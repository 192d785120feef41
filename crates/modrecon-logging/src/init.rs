//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use chrono::Local;
use modrecon_errors::{ExError, ExErrorKind};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};
use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl std::str::FromStr for Profile {
    type Err = ExError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "production" | "prod" | "json" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(ExError::new(ExErrorKind::Config)
                .with_op("parse_log_profile")
                .with_message(format!("unknown log profile `{}`", other))
                .with_hint("Use `development` or `production`.")),
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// This function should be called once at application startup.
/// It sets up the tracing subscriber based on the selected profile.
///
/// # Profiles
///
/// Console output goes to stderr so stdout stays free for command output.
///
/// - **Development**: Human-readable logs with debug level
/// - **Production**: JSON structured logs with info level
/// - **Test**: Capture mode for test assertions
///
/// # Example
///
/// ```
/// use modrecon_logging::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| install(profile, None));
}

/// Initialize the logging facility with an additional file sink
///
/// The file is `modrecon_<YYYY-MM-DD>.log` inside `log_dir`. It is appended
/// to, and every run starts with a `RUN DATE` header line. Returns the path
/// of the log file when one was opened. Once logging is initialized, later
/// calls return `Ok(None)` without touching the log folder.
///
/// # Errors
///
/// Returns `Io` if the directory cannot be created or the file cannot be
/// opened.
pub fn init_with_log_dir(
    profile: Profile,
    log_dir: Option<&Path>,
) -> Result<Option<PathBuf>, ExError> {
    let mut opened = Ok(None);
    INIT_ONCE.call_once(|| {
        opened = match log_dir.map(open_log_file).transpose() {
            Ok(sink) => {
                let path = sink.as_ref().map(|(path, _)| path.clone());
                install(profile, sink.map(|(_, file)| file));
                Ok(path)
            }
            Err(e) => {
                install(profile, None);
                Err(e)
            }
        };
    });
    opened
}

fn install(profile: Profile, file: Option<File>) {
    // try_init: a test harness may already own the global subscriber
    match profile {
        Profile::Development => {
            let _ = tracing_subscriber::registry()
                .with(env_filter("modrecon=debug"))
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(file.map(file_layer))
                .try_init();
        }
        Profile::Production => {
            let _ = tracing_subscriber::registry()
                .with(env_filter("modrecon=info"))
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .with(file.map(file_layer))
                .try_init();
        }
        Profile::Test => {
            // Test capture is initialized separately via init_test_capture()
            let _ = tracing_subscriber::registry().try_init();
        }
    }
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

type FileLayer<S> = fmt::Layer<S, fmt::format::DefaultFields, fmt::format::Format, Mutex<File>>;

fn file_layer<S>(file: File) -> FileLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(file))
}

/// Open (or create) today's log file and write the run header
fn open_log_file(dir: &Path) -> Result<(PathBuf, File), ExError> {
    let io_err = |e: std::io::Error| {
        ExError::new(ExErrorKind::Io)
            .with_op("open_log_file")
            .with_path(dir.display().to_string())
            .with_message(e.to_string())
    };

    std::fs::create_dir_all(dir).map_err(io_err)?;

    let now = Local::now();
    let path = dir.join(log_file_name(&now.format("%Y-%m-%d").to_string()));
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(io_err)?;

    let is_empty = file.metadata().map(|m| m.len() == 0).unwrap_or(true);
    let separator = if is_empty { "" } else { "\n\n" };
    writeln!(
        file,
        "{}======= RUN DATE: {} =======",
        separator,
        now.format("%Y-%m-%d %H:%M:%S")
    )
    .map_err(io_err)?;

    Ok((path, file))
}

fn log_file_name(date: &str) -> String {
    format!("modrecon_{}.log", date)
}
