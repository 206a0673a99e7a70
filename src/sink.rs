use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// Boxed output destination owned by a [`Logger`](crate::Logger).
pub type Sink = Box<dyn Write + Send>;

/// The conventional default sink: the process standard output.
pub fn stdout() -> Sink {
    Box::new(io::stdout())
}

/// Clonable in-memory sink.
///
/// Every clone appends to the same buffer, so one handle can be given to a
/// logger while another is kept to read what was written.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Written output split into lines, terminators removed.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        // A panic while holding the lock cannot leave the Vec invalid.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
