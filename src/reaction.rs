//! Reactions fired when a trigger matches.
//!
//! A [`Reactor`] sees the whole matched record and decides whether it is
//! still forwarded to the primary sink. It may write the record elsewhere
//! first. Any error it returns aborts dispatch: the record is not forwarded
//! and the error reaches the caller.

use std::fmt;
use std::io::{self, Write};

/// Pass-through decision produced by a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Write the record to the primary sink.
    Forward,
    /// Drop the record from the primary stream.
    Suppress,
}

impl Verdict {
    /// Returns true if the record still reaches the primary sink.
    #[must_use]
    pub const fn is_forward(self) -> bool {
        matches!(self, Self::Forward)
    }
}

impl From<bool> for Verdict {
    fn from(forward: bool) -> Self {
        if forward {
            Self::Forward
        } else {
            Self::Suppress
        }
    }
}

/// Logic invoked on a record whose trigger matched.
pub trait Reactor {
    /// React to `record`, the full original record.
    fn react(&mut self, record: &[u8]) -> io::Result<Verdict>;
}

impl<F> Reactor for F
where
    F: FnMut(&[u8]) -> io::Result<Verdict>,
{
    fn react(&mut self, record: &[u8]) -> io::Result<Verdict> {
        self(record)
    }
}

impl fmt::Debug for dyn Reactor + Send {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Reactor")
    }
}

/// Suppresses the record without writing it anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Discard;

impl Reactor for Discard {
    fn react(&mut self, _record: &[u8]) -> io::Result<Verdict> {
        Ok(Verdict::Suppress)
    }
}

/// Moves the record to another writer instead of the primary sink.
///
/// The record is suppressed from the primary stream whether or not the
/// secondary write succeeds; a failed write is reported as the error.
#[derive(Debug, Clone, Default)]
pub struct Redirect<W> {
    out: W,
}

impl<W: Write> Redirect<W> {
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the reaction, returning its target.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reactor for Redirect<W> {
    fn react(&mut self, record: &[u8]) -> io::Result<Verdict> {
        self.out.write_all(record)?;
        Ok(Verdict::Suppress)
    }
}

/// Writes the record to another writer and still forwards it.
#[derive(Debug, Clone, Default)]
pub struct Copy<W> {
    out: W,
}

impl<W: Write> Copy<W> {
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the reaction, returning its target.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reactor for Copy<W> {
    fn react(&mut self, record: &[u8]) -> io::Result<Verdict> {
        self.out.write_all(record)?;
        Ok(Verdict::Forward)
    }
}
