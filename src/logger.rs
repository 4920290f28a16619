use std::{
    panic::Location,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use log::{Log, Metadata};
use lvlog_core::{Arg, Formatter, Level, LogError, LogWriter, Message};

/// Terminates the process with the given status. Invoked after a fatal record.
pub type ExitHook = Arc<dyn Fn(i32) + Send + Sync>;

/// Exit status used after a fatal record.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Leveled logger writing one record per call to its sink.
///
/// Built with [`Logger::new`] or [`crate::logger_config`]; the configuration is
/// fixed afterwards. Share it across threads behind an `Arc` or install it with
/// [`crate::ConfigBuilder::init_global`].
pub struct Logger {
    sink: Mutex<Option<Box<dyn LogWriter>>>,
    formatter: Formatter,
    min_level: Level,
    include_caller: bool,
    exit: ExitHook,
}

impl Logger {
    pub(crate) fn from_parts(
        sink: Option<Box<dyn LogWriter>>,
        formatter: Formatter,
        min_level: Level,
        include_caller: bool,
        exit: ExitHook,
    ) -> Self {
        Self {
            sink: Mutex::new(sink),
            formatter,
            min_level,
            include_caller,
            exit,
        }
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    pub fn name(&self) -> &str {
        self.formatter.name()
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Whether a record at `level` passes the threshold.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    #[track_caller]
    pub fn debug(&self, msg: &str) {
        self.log_msg(Level::Debug, Message::Literal(msg), Location::caller());
    }

    #[track_caller]
    pub fn debugf(&self, template: &str, args: &[&dyn Arg]) {
        self.log_msg(Level::Debug, Message::Template(template, args), Location::caller());
    }

    #[track_caller]
    pub fn info(&self, msg: &str) {
        self.log_msg(Level::Info, Message::Literal(msg), Location::caller());
    }

    #[track_caller]
    pub fn infof(&self, template: &str, args: &[&dyn Arg]) {
        self.log_msg(Level::Info, Message::Template(template, args), Location::caller());
    }

    #[track_caller]
    pub fn warn(&self, msg: &str) {
        self.log_msg(Level::Warn, Message::Literal(msg), Location::caller());
    }

    #[track_caller]
    pub fn warnf(&self, template: &str, args: &[&dyn Arg]) {
        self.log_msg(Level::Warn, Message::Template(template, args), Location::caller());
    }

    #[track_caller]
    pub fn error(&self, msg: &str) {
        self.log_msg(Level::Error, Message::Literal(msg), Location::caller());
    }

    #[track_caller]
    pub fn errorf(&self, template: &str, args: &[&dyn Arg]) {
        self.log_msg(Level::Error, Message::Template(template, args), Location::caller());
    }

    /// Logs and then terminates the process with status 1.
    #[track_caller]
    pub fn fatal(&self, msg: &str) {
        self.log_msg(Level::Fatal, Message::Literal(msg), Location::caller());
    }

    /// Logs and then terminates the process with status 1.
    #[track_caller]
    pub fn fatalf(&self, template: &str, args: &[&dyn Arg]) {
        self.log_msg(Level::Fatal, Message::Template(template, args), Location::caller());
    }

    fn log_msg(&self, level: Level, message: Message<'_>, location: &Location<'_>) {
        if !self.enabled(level) {
            return;
        }
        let caller = self
            .include_caller
            .then(|| format!("{}:{}", location.file(), location.line()));
        self.write_record(level, &message, caller);
        if level == Level::Fatal {
            (self.exit)(FATAL_EXIT_CODE);
        }
    }

    /// Formats and writes one record while holding the sink lock.
    fn write_record(&self, level: Level, message: &Message<'_>, caller: Option<String>) {
        let mut sink = self.lock_sink();
        let Some(sink) = sink.as_mut() else {
            return;
        };
        let result = self
            .formatter
            .render(level, message, caller)
            .and_then(|bytes| sink.write_record(&bytes).map_err(LogError::from));
        if let Err(err) = result {
            sink.write_record(err.diagnostic().as_bytes()).ok();
        }
    }

    fn lock_sink(&self) -> MutexGuard<'_, Option<Box<dyn LogWriter>>> {
        // a panicking writer leaves at most a partial line behind
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        Logger::enabled(self, metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        let level = Level::from(record.level());
        if !Logger::enabled(self, level) {
            return;
        }
        let caller = if self.include_caller {
            record
                .file()
                .zip(record.line())
                .map(|(file, line)| format!("{file}:{line}"))
        } else {
            None
        };
        let message = record.args().to_string();
        self.write_record(level, &Message::Literal(&message), caller);
    }

    fn flush(&self) {
        if let Some(sink) = self.lock_sink().as_mut() {
            sink.flush().ok();
        }
    }
}
