use std::fs::File;
use std::io::stderr;
use std::path::PathBuf;
use std::sync::{LazyLock, Mutex};

use crate::board::zobrist::ZOBRIST;
use chrono::Local;
use miette::{Context, IntoDiagnostic};
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking;
use tracing_subscriber::reload;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, reload::Handle, util::SubscriberInitExt,
};

const LOG_DIR: &str = "/tmp/dammen_logs";

pub trait LogHandle: Send + Sync {
    fn set_filter(&self, new_filter: EnvFilter) -> miette::Result<()>;
}

impl<S> LogHandle for Handle<EnvFilter, S>
where
    S: tracing::Subscriber + Send + Sync + 'static,
{
    fn set_filter(&self, new_filter: EnvFilter) -> miette::Result<()> {
        self.modify(|current| *current = new_filter)
            .into_diagnostic()
    }
}

pub struct LogHandles {
    console_handle: Mutex<Box<dyn LogHandle>>,
    file_handle: Mutex<Box<dyn LogHandle>>,
}

fn open_log_file() -> File {
    std::fs::create_dir_all(LOG_DIR).expect("Failed to create log directory");
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let path: PathBuf = [LOG_DIR, &format!("dammen_{timestamp}.log")].iter().collect();
    File::create(&path).unwrap_or_else(|_| panic!("Failed to create log file: {}", path.display()))
}

static LOG_HANDLES: LazyLock<LogHandles> = LazyLock::new(|| {
    #[cfg(feature = "dev-tools")]
    color_backtrace::install();

    // Console layer, reloadable filter, INFO by default
    let console_filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    let (console_filter, console_handle) = reload::Layer::new(console_filter);
    let console_layer = fmt::layer()
        .without_time()
        .with_writer(stderr)
        .with_filter(console_filter);

    // File layer, reloadable filter, off until toggled on
    let file_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .from_env_lossy();
    let (file_filter, file_handle) = reload::Layer::new(file_filter);

    let (writer, guard) = non_blocking(open_log_file());
    std::mem::forget(guard); // writer must outlive main
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(file_filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    LogHandles {
        console_handle: Mutex::new(Box::new(console_handle)),
        file_handle: Mutex::new(Box::new(file_handle)),
    }
});

pub fn set_log_level(level: Level) -> miette::Result<()> {
    LOG_HANDLES
        .console_handle
        .lock()
        .unwrap()
        .set_filter(EnvFilter::new(level.to_string()))
        .with_context(|| format!("Failed to modify log filter to level: {level}"))
}

pub fn toggle_file_logging(enable: bool) -> miette::Result<()> {
    let new_filter = if enable {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("off")
    };

    LOG_HANDLES
        .file_handle
        .lock()
        .unwrap()
        .set_filter(new_filter)
        .context("Failed to modify log filter")
}

/// Initialize tracing, backtraces, and the hash keys.
pub fn init() {
    LazyLock::force(&LOG_HANDLES);
    LazyLock::force(&ZOBRIST);
}
