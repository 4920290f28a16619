//! # lvlog-core
//! Core utilities for lvlog - levels, record formatting and log writers.

mod config;
mod error;
mod level;
mod log_writer;
mod record;

pub use config::{LVLOG_CONFIG, LvLogConfig, parse_flag};
pub use error::LogError;
pub use level::Level;
pub use log_writer::{LogFile, LogStderr, LogStdout, LogStream, LogWriter};
pub use record::{Arg, ColorMode, Format, Formatter, Message, Record, render_template};
