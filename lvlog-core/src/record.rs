use std::{backtrace::Backtrace, borrow::Cow, fmt, fmt::Write};

use chrono::Local;
use colored::Color;
use serde::Serialize;
use serde_json::Value;

use crate::{Level, LogError};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Argument of a formatted emission: rendered through `Display` in text
/// output, captured as its JSON value in structured output.
pub trait Arg: fmt::Display {
    fn to_field(&self) -> serde_json::Result<Value>;
}

impl<T: fmt::Display + Serialize + ?Sized> Arg for T {
    fn to_field(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Substitutes each `{}` with the next argument. `{{` and `}}` escape braces,
/// placeholders left without an argument stay as `{}`.
pub fn render_template(template: &str, args: &[&dyn Arg]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('{', Some('{')) => {
                chars.next();
                out.push('{');
            }
            ('}', Some('}')) => {
                chars.next();
                out.push('}');
            }
            ('{', Some('}')) => {
                chars.next();
                match args.next() {
                    Some(arg) => {
                        let _ = write!(out, "{arg}");
                    }
                    None => out.push_str("{}"),
                }
            }
            (c, _) => out.push(c),
        }
    }
    out
}

/// Payload of one emission call.
#[derive(Clone, Copy)]
pub enum Message<'a> {
    /// Written as is, never treated as a template.
    Literal(&'a str),
    Template(&'a str, &'a [&'a dyn Arg]),
}

impl Message<'_> {
    pub fn template(&self) -> &str {
        match self {
            Message::Literal(message) => message,
            Message::Template(template, _) => template,
        }
    }

    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Message::Literal(message) => Cow::Borrowed(*message),
            Message::Template(template, args) => Cow::Owned(render_template(template, args)),
        }
    }

    fn fields(&self) -> serde_json::Result<Vec<Value>> {
        match self {
            Message::Literal(_) => Ok(Vec::new()),
            Message::Template(_, args) => args.iter().map(|arg| arg.to_field()).collect(),
        }
    }
}

/// Output shape of a logger, fixed at construction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `<timestamp> [<LEVEL>] <name> <message>` lines.
    Text,
    /// One JSON object per line.
    #[default]
    Json,
}

impl Format {
    /// `text` (any case) selects text output, anything else JSON.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("text") {
            Format::Text
        } else {
            Format::Json
        }
    }
}

/// When text output carries ANSI colors.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Only on stdout or stderr when they are interactive terminals.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("always") {
            ColorMode::Always
        } else if name.eq_ignore_ascii_case("never") {
            ColorMode::Never
        } else {
            ColorMode::Auto
        }
    }

    pub fn enabled(self, terminal: bool) -> bool {
        match self {
            ColorMode::Auto => terminal,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

fn paint(text: &str, color: Color, enabled: bool) -> Cow<'_, str> {
    if enabled {
        Cow::Owned(format!("\x1b[{}m{text}\x1b[0m", color.to_fg_str()))
    } else {
        Cow::Borrowed(text)
    }
}

/// One log entry, built fresh for every emission.
#[derive(Debug, Serialize)]
pub struct Record {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub level: Level,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller: Option<String>,
    #[serde(rename = "msg", skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacktrace: Option<String>,
    pub timestamp: String,
}

impl Record {
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec(self)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    pub fn to_text(&self, color: bool) -> String {
        let level_color = self.level.color();
        let mut line = format!(
            "{} [{}]",
            self.timestamp,
            paint(self.level.as_str(), level_color, color)
        );
        if !self.name.is_empty() {
            line.push(' ');
            line.push_str(&self.name);
        }
        if let Some(caller) = &self.caller {
            line.push(' ');
            line.push_str(caller);
        }
        line.push(' ');
        line.push_str(&self.message);
        if let Some(stacktrace) = &self.stacktrace {
            line.push(' ');
            line.push_str(&paint("stacktrace", level_color, color));
            line.push('\n');
            line.push_str(stacktrace.trim_end());
        }
        line.push('\n');
        line
    }
}

/// Turns emission calls into the bytes of one record.
#[derive(Debug, Clone)]
pub struct Formatter {
    format: Format,
    name: String,
    color: bool,
    stacktrace: bool,
}

impl Formatter {
    pub fn new(format: Format, name: String, color: bool, stacktrace: bool) -> Self {
        Self {
            format,
            name,
            color,
            stacktrace,
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colored(&self) -> bool {
        self.color
    }

    /// Builds the record. In JSON output the message keeps its raw template
    /// and the arguments become `fields`; in text output they are substituted.
    pub fn record(
        &self,
        level: Level,
        message: &Message<'_>,
        caller: Option<String>,
    ) -> Result<Record, LogError> {
        let (message, fields) = match self.format {
            Format::Text => (message.render().into_owned(), Vec::new()),
            Format::Json => {
                let fields = message.fields().map_err(|source| LogError::Serialize {
                    source,
                    template: message.template().to_string(),
                })?;
                (message.template().to_string(), fields)
            }
        };
        let stacktrace = (self.stacktrace && level.wants_stacktrace())
            .then(|| Backtrace::force_capture().to_string());
        Ok(Record {
            name: self.name.clone(),
            level,
            caller,
            message,
            fields,
            stacktrace,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        })
    }

    pub fn render(
        &self,
        level: Level,
        message: &Message<'_>,
        caller: Option<String>,
    ) -> Result<Vec<u8>, LogError> {
        let record = self.record(level, message, caller)?;
        match self.format {
            Format::Text => Ok(record.to_text(self.color).into_bytes()),
            Format::Json => record.to_json().map_err(|source| LogError::Serialize {
                source,
                template: message.template().to_string(),
            }),
        }
    }
}
