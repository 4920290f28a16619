#![allow(dead_code)]

use std::{
    io::{self, Write},
    sync::{
        Arc, Mutex,
        atomic::{AtomicI32, AtomicUsize, Ordering},
    },
};

/// In-memory sink counting write calls.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
    writes: Arc<AtomicUsize>,
}

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.bytes.lock().unwrap().clone()).unwrap()
    }

    pub fn len(&self) -> usize {
        self.bytes.lock().unwrap().len()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink whose first `failures` writes fail.
#[derive(Clone, Default)]
pub struct FailingWriter {
    pub inner: SharedBuffer,
    failures: Arc<AtomicUsize>,
}

impl FailingWriter {
    pub fn failing(failures: usize) -> Self {
        Self {
            inner: SharedBuffer::default(),
            failures: Arc::new(AtomicUsize::new(failures)),
        }
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Exit hook recording the status instead of ending the process.
#[derive(Clone)]
pub struct ExitRecorder(Arc<AtomicI32>);

impl Default for ExitRecorder {
    fn default() -> Self {
        Self(Arc::new(AtomicI32::new(-1)))
    }
}

impl ExitRecorder {
    pub fn hook(&self) -> impl Fn(i32) + Send + Sync + 'static {
        let code = Arc::clone(&self.0);
        move |status| code.store(status, Ordering::SeqCst)
    }

    /// Recorded status, `None` if the hook never ran.
    pub fn code(&self) -> Option<i32> {
        match self.0.load(Ordering::SeqCst) {
            -1 => None,
            code => Some(code),
        }
    }
}
