use std::{
    any::Any,
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
};

/// Destination a logger writes serialized records to.
pub trait LogWriter: Send {
    /// Writes one complete record.
    fn write_record(&mut self, record: &[u8]) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
    /// Whether the destination is an interactive terminal.
    fn is_terminal(&self) -> bool {
        false
    }
}

/// Log file opened in append mode, created if missing.
pub struct LogFile {
    file: File,
}

impl LogFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let file = File::options().create(true).append(true).open(&path)?;
        Ok(Self { file })
    }
}

impl LogWriter for LogFile {
    fn write_record(&mut self, record: &[u8]) -> io::Result<()> {
        self.file.write_all(record)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

#[derive(Default, Debug)]
pub struct LogStdout;

impl LogWriter for LogStdout {
    fn write_record(&mut self, record: &[u8]) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(record)?;
        stdout.flush()
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }

    fn is_terminal(&self) -> bool {
        io::stdout().is_terminal()
    }
}

#[derive(Default, Debug)]
pub struct LogStderr;

impl LogWriter for LogStderr {
    fn write_record(&mut self, record: &[u8]) -> io::Result<()> {
        io::stderr().lock().write_all(record)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }

    fn is_terminal(&self) -> bool {
        io::stderr().is_terminal()
    }
}

/// Adapts any `Write` implementor. Only `Stdout` and `Stderr` can be
/// recognized as terminals.
pub struct LogStream<W> {
    inner: W,
    terminal: bool,
}

impl<W: Write + Send + 'static> LogStream<W> {
    pub fn new(inner: W) -> Self {
        let any = &inner as &dyn Any;
        let terminal = if let Some(stdout) = any.downcast_ref::<io::Stdout>() {
            stdout.is_terminal()
        } else if let Some(stderr) = any.downcast_ref::<io::Stderr>() {
            stderr.is_terminal()
        } else {
            false
        };
        Self { inner, terminal }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write + Send> LogWriter for LogStream<W> {
    fn write_record(&mut self, record: &[u8]) -> io::Result<()> {
        self.inner.write_all(record)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_appends() {
        let path = "/tmp/lvlog_test_log_file.log";
        std::fs::remove_file(path).ok();
        let mut log_file = LogFile::new(path).unwrap();
        log_file.write_record(b"Hello, world!\n").unwrap();
        drop(log_file);
        let mut log_file = LogFile::new(path).unwrap();
        log_file.write_record(b"rust is awesome !\n").unwrap();
        log_file.flush().unwrap();
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "Hello, world!\nrust is awesome !\n"
        );
    }

    #[test]
    fn test_log_stream() {
        let mut stream = LogStream::new(Vec::new());
        stream.write_record(b"one\n").unwrap();
        stream.write_record(b"two\n").unwrap();
        assert!(!stream.is_terminal());
        assert_eq!(stream.into_inner(), b"one\ntwo\n");
    }

    #[test]
    fn test_log_stream_detects_standard_streams() {
        assert_eq!(
            LogStream::new(io::stdout()).is_terminal(),
            io::stdout().is_terminal()
        );
        assert_eq!(
            LogStream::new(io::stderr()).is_terminal(),
            io::stderr().is_terminal()
        );
        assert!(!LogStream::new(io::sink()).is_terminal());
    }

    #[test]
    fn test_log_file_missing_directory() {
        assert!(LogFile::new("/tmp/lvlog_missing_dir/nested/app.log").is_err());
    }
}
