//! Shared writers.
//!
//! [`SharedBuffer`] is an in-memory sink that the caller and a reaction can
//! hold at the same time. [`SharedReactLog`] puts a dispatcher behind a lock
//! so registration and dispatch can come from several threads, and so it
//! can be installed as a `tracing_subscriber` writer.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;
use tracing_subscriber::fmt::MakeWriter;

use crate::dispatcher::ReactLog;
use crate::error::{ReactError, ReactResult};
use crate::reaction::Reactor;
use crate::trigger::{MatchDiscipline, Trigger};

fn poisoned(context: &'static str) -> ReactError {
    ReactError::Poisoned { context }
}

/// Cloneable in-memory byte sink.
///
/// Clones share one buffer. A poisoned lock is recovered: the buffer holds
/// plain bytes and has no invariant a panicking writer could break.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Copy of the bytes written so far.
    #[must_use]
    pub fn contents(&self) -> Vec<u8> {
        self.lock().clone()
    }

    /// Contents decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops everything written so far.
    pub fn clear(&self) {
        self.lock().clear();
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

/// Thread-safe, cloneable handle to a [`ReactLog`].
///
/// Registration and dispatch take the same lock, so triggers can be added
/// while other threads are logging. Each `write` is one record.
///
/// ```rust,ignore
/// let shared = SharedReactLog::new(std::io::stderr());
/// shared.register("TRACE", reactlog::Discard)?;
/// tracing_subscriber::fmt().with_writer(shared.clone()).init();
/// ```
#[derive(Debug)]
pub struct SharedReactLog<W> {
    inner: Arc<Mutex<ReactLog<W>>>,
}

impl<W> Clone for SharedReactLog<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W: Write> SharedReactLog<W> {
    /// Shares a dispatcher using [`MatchDiscipline::Word`].
    #[must_use]
    pub fn new(out: W) -> Self {
        Self::from(ReactLog::new(out))
    }

    /// Shares a dispatcher using `discipline` for every record.
    #[must_use]
    pub fn with_discipline(out: W, discipline: MatchDiscipline) -> Self {
        Self::from(ReactLog::with_discipline(out, discipline))
    }

    fn lock(&self) -> ReactResult<MutexGuard<'_, ReactLog<W>>> {
        self.inner.lock().map_err(|_| poisoned("shared reactlog"))
    }

    /// Registers `reactor` for `trigger` under the dispatch lock.
    ///
    /// The registration is logged once the lock is released, so this is safe
    /// to call while `self` is the installed tracing writer.
    pub fn register<R>(&self, trigger: impl Into<String>, reactor: R) -> ReactResult<()>
    where
        R: Reactor + Send + 'static,
    {
        let trigger = Trigger::new(trigger)?;
        let (previous, discipline) = {
            let mut log = self.lock()?;
            let previous = log.register_boxed(trigger.clone(), Box::new(reactor));
            (previous, log.discipline())
        };
        // The replaced reaction may own a writer; drop it outside the lock too.
        let replaced = previous.is_some();
        drop(previous);

        debug!(trigger = %trigger, replaced, %discipline, "registered trigger");
        if discipline == MatchDiscipline::Word && trigger.is_multi_word() {
            debug!(trigger = %trigger, "multi-word trigger can never match whole words");
        }
        Ok(())
    }

    /// Dispatches one record under the lock.
    pub fn submit(&self, record: &[u8]) -> ReactResult<usize> {
        self.lock()?.submit(record)
    }

    /// The trigger `record` would fire.
    pub fn matching_trigger(&self, record: &[u8]) -> ReactResult<Option<Trigger>> {
        Ok(self.lock()?.matching_trigger(record).cloned())
    }

    /// Runs `f` with exclusive access to the dispatcher.
    ///
    /// `f` runs under the lock: emitting tracing events from it deadlocks if
    /// `self` is the installed writer.
    pub fn with<T>(&self, f: impl FnOnce(&mut ReactLog<W>) -> T) -> ReactResult<T> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }
}

impl<W> From<ReactLog<W>> for SharedReactLog<W> {
    fn from(log: ReactLog<W>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(log)),
        }
    }
}

impl<W: Write> Write for SharedReactLog<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.submit(buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().map_err(io::Error::from)?.flush()
    }
}

impl<'a, W> MakeWriter<'a> for SharedReactLog<W>
where
    W: Write + 'static,
{
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
