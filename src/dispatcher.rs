//! Record dispatcher.
//!
//! [`ReactLog`] wraps a primary sink. Every record written to it is checked
//! for a registered trigger. On a match the trigger's reaction runs once on
//! the whole record and decides whether the record still reaches the sink.
//! Records with no trigger are forwarded unchanged.
//!
//! Exactly zero or one write reaches the primary sink per record. Nothing in
//! this module emits tracing events: the dispatcher may be the log output.

use std::fmt;
use std::io::{self, Write};

use crate::error::{ReactError, ReactResult};
use crate::reaction::{Reactor, Verdict};
use crate::record::words;
use crate::registry::{BoxedReactor, TriggerRegistry};
use crate::trigger::{MatchDiscipline, Trigger};

/// Trigger-reaction interceptor in front of a primary sink.
///
/// The sink is injected at construction. To keep ownership of it, pass a
/// mutable reference (`&mut W` is itself a writer).
///
/// `ReactLog` is not synchronized. Use [`crate::SharedReactLog`] when
/// records and registrations come from several threads.
pub struct ReactLog<W> {
    out: W,
    registry: TriggerRegistry,
    discipline: MatchDiscipline,
}

impl<W: Write> ReactLog<W> {
    /// Creates a dispatcher using [`MatchDiscipline::Word`].
    #[must_use]
    pub fn new(out: W) -> Self {
        Self::with_discipline(out, MatchDiscipline::default())
    }

    /// Creates a dispatcher using `discipline` for every record.
    #[must_use]
    pub fn with_discipline(out: W, discipline: MatchDiscipline) -> Self {
        Self {
            out,
            registry: TriggerRegistry::new(),
            discipline,
        }
    }

    /// The matching discipline fixed at construction.
    #[must_use]
    pub const fn discipline(&self) -> MatchDiscipline {
        self.discipline
    }

    /// Read access to the registered triggers.
    #[must_use]
    pub const fn registry(&self) -> &TriggerRegistry {
        &self.registry
    }

    /// Registers `reactor` for `trigger`, replacing any earlier reaction.
    ///
    /// Fails only if `trigger` is empty.
    pub fn register<R>(&mut self, trigger: impl Into<String>, reactor: R) -> ReactResult<()>
    where
        R: Reactor + Send + 'static,
    {
        let trigger = Trigger::new(trigger)?;
        self.register_boxed(trigger, Box::new(reactor));
        Ok(())
    }

    /// Registers an already boxed reaction, returning the one it replaced.
    ///
    /// Under [`MatchDiscipline::Word`] a multi-word trigger is stored but can
    /// never fire.
    pub fn register_boxed(&mut self, trigger: Trigger, reactor: BoxedReactor) -> Option<BoxedReactor> {
        self.registry.register(trigger, reactor)
    }

    /// The trigger that `record` would fire, without running its reaction.
    #[must_use]
    pub fn matching_trigger(&self, record: &[u8]) -> Option<&Trigger> {
        match self.discipline {
            MatchDiscipline::Word => first_registered_word(&self.registry, record)
                .and_then(|word| self.registry.get_trigger(word)),
            MatchDiscipline::Substring => self.registry.find_substring(record),
        }
    }

    /// Dispatches one record.
    ///
    /// Returns the number of bytes accepted. A suppressed record counts as
    /// fully accepted. When the reaction fails, nothing is written to the
    /// primary sink and [`ReactError::Reaction`] is returned.
    pub fn submit(&mut self, record: &[u8]) -> ReactResult<usize> {
        let matched = match self.discipline {
            MatchDiscipline::Word => match first_registered_word(&self.registry, record) {
                Some(word) => self.registry.entry_mut(word),
                None => None,
            },
            MatchDiscipline::Substring => self.registry.find_substring_mut(record),
        };

        let verdict = match matched {
            Some((trigger, reactor)) => reactor.react(record).map_err(|source| ReactError::Reaction {
                trigger: trigger.to_string(),
                source,
            })?,
            None => Verdict::Forward,
        };

        match verdict {
            Verdict::Forward => self.out.write(record).map_err(ReactError::Sink),
            Verdict::Suppress => Ok(record.len()),
        }
    }

    /// Access to the primary sink.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Mutable access to the primary sink.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Consumes the dispatcher, returning the primary sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// First word of `record`, left to right, that is a registered trigger.
fn first_registered_word<'r>(registry: &TriggerRegistry, record: &'r [u8]) -> Option<&'r str> {
    if registry.is_empty() {
        return None;
    }
    words(record)
        .filter_map(|w| std::str::from_utf8(w).ok())
        .find(|w| registry.contains(w))
}

impl<W: Write> Write for ReactLog<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.submit(buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W> fmt::Debug for ReactLog<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactLog")
            .field("discipline", &self.discipline)
            .field("triggers", &self.registry.len())
            .finish_non_exhaustive()
    }
}
