//! # lvlog
//! Leveled logger writing colorized text lines or JSON records to any writer.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! lvlog = "0.1.0"
//! ```
//!
//! ```rust
//! use lvlog::{Logger, LoggerOption};
//!
//! let logger = Logger::new([
//!     LoggerOption::writer(std::io::stdout()),
//!     LoggerOption::name("main"),
//!     LoggerOption::level("info"),
//! ]);
//! logger.debug("filtered out");
//! logger.info("Hello, world!");
//! logger.infof("{} widgets from {}", &[&3, &"shop"]);
//! ```
//!
//! Plain methods (`info`, `warn`, ...) write their message as is. The `f`
//! methods substitute each `{}` of the template with the next argument in text
//! output, and keep the template and arguments apart in JSON output:
//! `{"name":"main","level":"INFO","msg":"{} widgets from {}","fields":[3,"shop"],"timestamp":"..."}`.
//!
//! ## Text output
//! ```rust
//! use lvlog::{Format, logger_config};
//!
//! let logger = logger_config()
//!     .with_stdout()
//!     .with_name("main")
//!     .with_format(Format::Text)
//!     .with_stacktrace(true)
//!     .build();
//! logger.warn("disk almost full");
//! // 2024-05-01 12:00:00 [WARN] main disk almost full
//! ```
//!
//! ## Multi-threaded logging
//! A logger serializes writes behind its own lock, so a single instance can be
//! shared by any number of threads without interleaving records.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use lvlog::logger_config;
//!
//! let logger = Arc::new(logger_config().with_stdout().with_name("pool").build());
//! let handles: Vec<_> = (0..5).map(|i| {
//!     let logger = Arc::clone(&logger);
//!     std::thread::spawn(move || logger.infof("Hello, world from thread {}!", &[&i]))
//! }).collect();
//! for h in handles { h.join().unwrap(); }
//! ```
//!
//! ## Logging to files
//! The log file is created if it does not exist and appended to if it does.
//!
//! ```rust
//! use lvlog::{Format, logger_config};
//!
//! std::fs::remove_file("/tmp/lvlog_app.log").ok();
//! let logger = logger_config()
//!     .with_log_file("/tmp/lvlog_app.log")
//!     .expect("Unable to create log file")
//!     .with_format(Format::Text)
//!     .build();
//! logger.info("Hello, world!");
//! assert!(std::fs::read_to_string("/tmp/lvlog_app.log").unwrap().ends_with("Hello, world!\n"));
//! ```
//!
//! ## `log` facade
//! ```rust
//! let logger = lvlog::logger_config()
//!     .with_env()
//!     .with_stderr()
//!     .init_global()
//!     .expect("Logger already installed");
//! log::info!("through the facade");
//! logger.errorf("{} failures", &[&0]);
//! ```
//!
//! ## Fatal records
//! `fatal` and `fatalf` write their record and then exit the process with
//! status 1, whether or not the write succeeded. Tests can swap the exit for a
//! hook with [`ConfigBuilder::with_exit`].

mod logger;
mod options;

pub use logger::{ExitHook, FATAL_EXIT_CODE, Logger};
pub use lvlog_core::{Arg, ColorMode, Format, Level, LogError, LogWriter};
pub use options::{ConfigBuilder, LoggerOption};

/// Returns a default ConfigBuilder for configuring the logger.
pub fn logger_config() -> ConfigBuilder {
    ConfigBuilder::default()
}
