use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// How a binary wants its diagnostics
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Prefix of the rolling log file, e.g. `cli` gives `cli.log.2024-01-21`
    pub component: String,
    /// Extra verbosity from the command line (`-v`, `-vv`)
    pub verbosity: u8,
    pub to_stderr: bool,
    /// Defaults to `~/.jlayout/logs`
    pub log_dir: Option<PathBuf>,
}

impl LogOptions {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            verbosity: 0,
            to_stderr: true,
            log_dir: None,
        }
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    fn default_level(&self) -> &'static str {
        match self.verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    fn resolve_log_dir(&self) -> Option<PathBuf> {
        self.log_dir
            .clone()
            .or_else(|| dirs::home_dir().map(|h| h.join(".jlayout/logs")))
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the verbosity level.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process. Without a usable log directory only stderr is
/// written and `None` is returned.
pub fn init_logging(options: &LogOptions) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.default_level()));

    let log_dir = options
        .resolve_log_dir()
        .filter(|dir| std::fs::create_dir_all(dir).is_ok());

    // Each branch builds its own stderr layer: a fmt layer is typed by the
    // subscriber stack beneath it.
    let Some(log_dir) = log_dir else {
        let stderr_layer = options.to_stderr.then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(false)
        });
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
        return None;
    };

    let file_appender = tracing_appender::rolling::daily(&log_dir, &options.component);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if options.to_stderr {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);
        registry.with(stderr_layer).init();
    } else {
        registry.init();
    }

    Some(guard)
}
