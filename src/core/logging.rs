//! Terminal Logging Module
//!
//! File-only structured logging for the TUI plus console output for the
//! moments before and after the terminal is in raw mode:
//! - JSON log lines through a daily rolling appender (tracing-appender)
//! - Diagnostic reports for fatal startup errors (miette)
//! - Styled one-line messages (console)
//! - Automatic terminal capability detection

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use console::style;
use flate2::write::GzEncoder;
use flate2::Compression;
use miette::Diagnostic;
use supports_color::Stream;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

/// Base name of the rolling log file.
pub const LOG_FILE_PREFIX: &str = "kasparro.log";

static TERMINAL_CAPS: OnceLock<TerminalCapabilities> = OnceLock::new();

fn get_terminal_caps() -> &'static TerminalCapabilities {
    TERMINAL_CAPS.get_or_init(TerminalCapabilities::detect)
}

// ============================================================================
// Terminal Capability Detection
// ============================================================================

/// Terminal color support levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorLevel {
    TrueColor,
    Ansi256,
    Ansi16,
    NoColor,
}

/// Detected terminal capabilities
#[derive(Debug, Clone)]
pub struct TerminalCapabilities {
    pub color_level: ColorLevel,
    pub supports_unicode: bool,
    pub is_interactive: bool,
}

impl TerminalCapabilities {
    /// Detect terminal capabilities from the environment.
    ///
    /// Checks stderr, which is where startup diagnostics are written.
    pub fn detect() -> Self {
        use is_terminal::IsTerminal;

        let color_level = match supports_color::on(Stream::Stderr) {
            Some(support) if support.has_16m => ColorLevel::TrueColor,
            Some(support) if support.has_256 => ColorLevel::Ansi256,
            Some(support) if support.has_basic => ColorLevel::Ansi16,
            _ => ColorLevel::NoColor,
        };

        let is_interactive = io::stderr().is_terminal();

        let supports_unicode = std::env::var("TERM")
            .map(|t| !t.contains("dumb"))
            .unwrap_or(true)
            && std::env::var("LANG")
                .map(|l| l.contains("UTF-8") || l.contains("utf8"))
                .unwrap_or(true);

        Self {
            color_level,
            supports_unicode,
            is_interactive,
        }
    }

    pub fn should_colorize(&self) -> bool {
        self.is_interactive && self.color_level != ColorLevel::NoColor
    }
}

// ============================================================================
// Logging Initialization
// ============================================================================

/// Initialize logging for TUI mode.
///
/// Everything goes to `<log_dir>/kasparro.log.<date>` as JSON; there is no
/// stdout layer because ratatui owns the terminal. `log` macros are bridged
/// into tracing and the miette report hook is installed.
///
/// The returned guard must live until shutdown so buffered lines are flushed.
pub fn init_tui(log_dir: &Path) -> WorkerGuard {
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(log_dir) {
            print_warning(&format!("Failed to create logs directory: {}", e));
        }
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(env_filter);

    let subscriber = tracing_subscriber::registry().with(file_layer);
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        print_warning(&format!("Failed to install tracing subscriber: {}", e));
    }

    if let Err(e) = tracing_log::LogTracer::init() {
        print_warning(&format!("Failed to initialize LogTracer: {}", e));
    }

    init_miette();

    let log_dir = log_dir.to_path_buf();
    std::thread::spawn(move || compress_old_logs(log_dir));

    guard
}

/// Whether a file in the log directory is a finished rolling log.
fn should_compress(name: &str, today_suffix: &str) -> bool {
    name.strip_prefix(LOG_FILE_PREFIX)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|date| date != today_suffix && !date.ends_with(".gz"))
}

/// Gzip every rolled log except today's.
fn compress_old_logs(log_dir: PathBuf) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(&log_dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !should_compress(name, &today_suffix) {
            continue;
        }
        match compress_file(&path) {
            Ok(()) => log::info!("Compressed old log: {:?}", path),
            Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }
}

fn compress_file(path: &Path) -> io::Result<()> {
    let mut reader = io::BufReader::new(fs::File::open(path)?);

    let mut gz_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let gz_path = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?
        .join(gz_name);

    if gz_path.exists() {
        return Ok(());
    }

    let mut encoder = GzEncoder::new(fs::File::create(&gz_path)?, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)
}

fn init_miette() {
    let caps = get_terminal_caps();

    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(caps.color_level == ColorLevel::TrueColor)
                .unicode(caps.supports_unicode)
                .context_lines(3)
                .break_words(true)
                .color(caps.should_colorize())
                .build(),
        )
    }))
    .ok(); // already set
}

// ============================================================================
// Console Output Utilities
// ============================================================================

/// Print a fatal diagnostic to stderr. Only valid outside raw mode.
pub fn report_fatal<E>(err: E)
where
    E: Diagnostic + Send + Sync + 'static,
{
    tracing::error!("{err}");
    print_error("Kasparro could not start");
    eprintln!("{:?}", miette::Report::new(err));
}

pub fn print_error(message: &str) {
    let prefix = if get_terminal_caps().supports_unicode { "✗" } else { "x" };
    eprintln!("{} {}", style(prefix).red(), style(message).red().bold());
}

pub fn print_warning(message: &str) {
    let prefix = if get_terminal_caps().supports_unicode { "⚠" } else { "!" };
    eprintln!("{} {}", style(prefix).yellow(), style(message).yellow().bold());
}

// ============================================================================
// Tests
// ============================================================================
