use std::{
    io::Write,
    path::Path,
    sync::{Arc, OnceLock},
};

use log::SetLoggerError;
use lvlog_core::{
    ColorMode, Format, Formatter, LVLOG_CONFIG, Level, LogFile, LogStderr, LogStdout, LogStream,
    LogWriter, LvLogConfig,
};

use crate::logger::{ExitHook, Logger};

/// A single configuration toggle for [`Logger::new`].
pub enum LoggerOption {
    Writer(Box<dyn LogWriter>),
    Name(String),
    /// Minimum level by name, see [`Level::from_name`].
    Level(String),
    Caller(bool),
    Stacktrace(bool),
    Format(Format),
    Color(ColorMode),
    Exit(ExitHook),
}

impl LoggerOption {
    pub fn writer<W: Write + Send + 'static>(writer: W) -> Self {
        LoggerOption::Writer(Box::new(LogStream::new(writer)))
    }

    pub fn name(name: &str) -> Self {
        LoggerOption::Name(name.into())
    }

    pub fn level(level: &str) -> Self {
        LoggerOption::Level(level.into())
    }

    pub fn caller(include_caller: bool) -> Self {
        LoggerOption::Caller(include_caller)
    }

    pub fn stacktrace(stacktrace: bool) -> Self {
        LoggerOption::Stacktrace(stacktrace)
    }

    pub fn format(format: Format) -> Self {
        LoggerOption::Format(format)
    }

    pub fn color(color: ColorMode) -> Self {
        LoggerOption::Color(color)
    }

    pub fn exit<F: Fn(i32) + Send + Sync + 'static>(exit: F) -> Self {
        LoggerOption::Exit(Arc::new(exit))
    }
}

impl Logger {
    /// Applies `options` in order to a default configuration. Later options
    /// override earlier ones.
    pub fn new<I: IntoIterator<Item = LoggerOption>>(options: I) -> Self {
        options
            .into_iter()
            .fold(ConfigBuilder::default(), ConfigBuilder::option)
            .build()
    }
}

/// Backing storage of [`ConfigBuilder::init_global`].
static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

fn exit_process(code: i32) {
    std::process::exit(code)
}

/// Builder for configuring and initializing the logger.
pub struct ConfigBuilder {
    sink: Option<Box<dyn LogWriter>>,
    name: String,
    level: Level,
    include_caller: bool,
    stacktrace: bool,
    format: Format,
    color: ColorMode,
    exit: ExitHook,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            sink: None,
            name: String::new(),
            level: Level::Debug,
            include_caller: false,
            stacktrace: false,
            format: Format::default(),
            color: ColorMode::default(),
            exit: Arc::new(exit_process),
        }
    }
}

impl ConfigBuilder {
    /// Finalizes the configuration.
    pub fn build(self) -> Logger {
        let Self {
            sink,
            name,
            level,
            include_caller,
            stacktrace,
            format,
            color,
            exit,
        } = self;
        let terminal = sink.as_ref().is_some_and(|sink| sink.is_terminal());
        let formatter = Formatter::new(format, name, color.enabled(terminal), stacktrace);
        Logger::from_parts(sink, formatter, level, include_caller, exit)
    }

    /// Applies one [`LoggerOption`].
    pub fn option(self, option: LoggerOption) -> Self {
        match option {
            LoggerOption::Writer(sink) => Self {
                sink: Some(sink),
                ..self
            },
            LoggerOption::Name(name) => self.with_name(&name),
            LoggerOption::Level(level) => self.with_level(&level),
            LoggerOption::Caller(yes) => self.with_caller(yes),
            LoggerOption::Stacktrace(yes) => self.with_stacktrace(yes),
            LoggerOption::Format(format) => self.with_format(format),
            LoggerOption::Color(color) => self.with_color(color),
            LoggerOption::Exit(exit) => Self { exit, ..self },
        }
    }

    /// Sets any writer as the sink. `Stdout` and `Stderr` get colors under
    /// [`ColorMode::Auto`] when they are terminals.
    pub fn with_writer<W: Write + Send + 'static>(self, writer: W) -> Self {
        self.option(LoggerOption::writer(writer))
    }
    /// Writes to stdout.
    pub fn with_stdout(self) -> Self {
        Self {
            sink: Some(Box::new(LogStdout)),
            ..self
        }
    }
    /// Writes to stderr.
    pub fn with_stderr(self) -> Self {
        Self {
            sink: Some(Box::new(LogStderr)),
            ..self
        }
    }
    /// Sets a log file. The file is created if missing and appended to.
    pub fn with_log_file<P: AsRef<Path>>(self, path: P) -> Result<Self, std::io::Error> {
        Ok(Self {
            sink: Some(Box::new(LogFile::new(path)?)),
            ..self
        })
    }
    /// Maybe sets a log file.
    pub fn maybe_with_log_file<P: AsRef<Path>>(
        self,
        path: Option<P>,
    ) -> Result<Self, std::io::Error> {
        match path {
            Some(path) => self.with_log_file(path),
            None => Ok(self),
        }
    }
    /// Sets a log name
    pub fn with_name(self, name: &str) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }
    /// Maybe sets a log name
    pub fn maybe_with_name(self, name: Option<&str>) -> Self {
        Self {
            name: name.map(String::from).unwrap_or_default(),
            ..self
        }
    }
    /// Sets the minimum level by name. Unknown names mean `DEBUG`.
    pub fn with_level(self, level: &str) -> Self {
        self.with_min_level(Level::from_name(level))
    }
    pub fn with_min_level(self, level: Level) -> Self {
        Self { level, ..self }
    }
    /// Adds the `file:line` of the call site to every record.
    pub fn with_caller(self, include_caller: bool) -> Self {
        Self {
            include_caller,
            ..self
        }
    }
    /// Attaches a stack trace to ERROR and FATAL records.
    pub fn with_stacktrace(self, stacktrace: bool) -> Self {
        Self { stacktrace, ..self }
    }
    pub fn with_format(self, format: Format) -> Self {
        Self { format, ..self }
    }
    pub fn with_color(self, color: ColorMode) -> Self {
        Self { color, ..self }
    }
    /// Replaces the process exit invoked after FATAL records.
    pub fn with_exit<F: Fn(i32) + Send + Sync + 'static>(self, exit: F) -> Self {
        self.option(LoggerOption::exit(exit))
    }
    /// Applies the `LVLOG_*` environment variables. Call it first so that
    /// explicit settings take precedence.
    pub fn with_env(self) -> Self {
        match LVLOG_CONFIG.as_ref() {
            Some(config) => self.with_env_config(config),
            None => self,
        }
    }

    pub(crate) fn with_env_config(self, config: &LvLogConfig) -> Self {
        self.with_level(&config.LEVEL)
            .with_format(Format::from_name(&config.FORMAT))
            .with_color(ColorMode::from_name(&config.COLOR))
            .with_stacktrace(config.stacktrace())
            .with_caller(config.caller())
    }

    /// Installs the logger as the `log` facade backend and returns it.
    ///
    /// The process keeps at most one global logger: once one is stored, later
    /// calls drop their configuration and fail.
    pub fn init_global(self) -> Result<&'static Logger, SetLoggerError> {
        let logger = GLOBAL_LOGGER.get_or_init(|| self.build());
        log::set_logger(logger)?;
        log::set_max_level(logger.min_level().to_level_filter());
        Ok(logger)
    }
}
