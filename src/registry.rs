//! Trigger registry.
//!
//! Maps each [`Trigger`] to the reaction it fires. Registration overwrites;
//! there is no removal. Iteration order is unspecified.

use std::collections::HashMap;

use crate::reaction::Reactor;
use crate::record::SubstringMatcher;
use crate::trigger::Trigger;

/// Boxed reaction stored in the registry.
pub type BoxedReactor = Box<dyn Reactor + Send>;

#[derive(Debug)]
struct RegistryEntry {
    trigger: Trigger,
    matcher: SubstringMatcher,
    reactor: BoxedReactor,
}

/// In-memory trigger → reaction map.
///
/// Not synchronized: registering concurrently with dispatch requires an
/// external lock (see [`crate::SharedReactLog`]). Nothing here emits
/// tracing events, since it runs under that lock.
#[derive(Debug, Default)]
pub struct TriggerRegistry {
    entries: HashMap<Trigger, RegistryEntry>,
}

impl TriggerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `reactor` for `trigger`, returning the reaction it replaced.
    pub fn register(&mut self, trigger: Trigger, reactor: BoxedReactor) -> Option<BoxedReactor> {
        let entry = RegistryEntry {
            matcher: SubstringMatcher::new(&trigger),
            trigger: trigger.clone(),
            reactor,
        };
        self.entries.insert(trigger, entry).map(|old| old.reactor)
    }

    /// Exact-key lookup of the reaction to run.
    ///
    /// Takes `&mut self` because [`Reactor::react`] does; use [`Self::get`]
    /// for a read-only view.
    pub fn lookup(&mut self, trigger: &str) -> Option<&mut (dyn Reactor + Send + 'static)> {
        self.entries.get_mut(trigger).map(|e| e.reactor.as_mut())
    }

    /// Read-only exact-key lookup.
    #[must_use]
    pub fn get(&self, trigger: &str) -> Option<&(dyn Reactor + Send + 'static)> {
        self.entries.get(trigger).map(|e| e.reactor.as_ref())
    }

    /// Exact-key lookup yielding the stored trigger and its reaction.
    pub(crate) fn entry_mut(&mut self, trigger: &str) -> Option<(&Trigger, &mut BoxedReactor)> {
        self.entries
            .get_mut(trigger)
            .map(|e| (&e.trigger, &mut e.reactor))
    }

    /// Returns the stored trigger equal to `trigger`, if registered.
    #[must_use]
    pub fn get_trigger(&self, trigger: &str) -> Option<&Trigger> {
        self.entries.get_key_value(trigger).map(|(k, _)| k)
    }

    /// Returns true if `trigger` is registered.
    #[must_use]
    pub fn contains(&self, trigger: &str) -> bool {
        self.entries.contains_key(trigger)
    }

    /// All registered triggers and their reactions, in unspecified order.
    pub fn entries(&self) -> impl Iterator<Item = (&Trigger, &(dyn Reactor + Send + 'static))> {
        self.entries.iter().map(|(k, e)| (k, e.reactor.as_ref()))
    }

    /// First trigger, in iteration order, whose bytes occur in `record`.
    #[must_use]
    pub fn find_substring(&self, record: &[u8]) -> Option<&Trigger> {
        self.entries
            .iter()
            .find(|(_, e)| e.matcher.is_match(record))
            .map(|(k, _)| k)
    }

    /// Mutable counterpart of [`Self::find_substring`], yielding the reaction.
    pub(crate) fn find_substring_mut(&mut self, record: &[u8]) -> Option<(&Trigger, &mut BoxedReactor)> {
        self.entries
            .values_mut()
            .find(|e| e.matcher.is_match(record))
            .map(|e| (&e.trigger, &mut e.reactor))
    }

    /// Number of registered triggers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no trigger is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reaction::{Discard, Verdict};

    fn trigger(s: &str) -> Trigger {
        Trigger::new(s).unwrap()
    }

    #[test]
    fn register_then_lookup() {
        let mut reg = TriggerRegistry::new();
        assert!(reg.is_empty());

        let prev = reg.register(trigger("INFO"), Box::new(Discard));
        assert!(prev.is_none());
        assert_eq!(reg.len(), 1);
        assert!(reg.contains("INFO"));
        assert!(!reg.contains("info"));

        let reactor = reg.lookup("INFO").unwrap();
        assert_eq!(reactor.react(b"INFO x").unwrap(), Verdict::Suppress);
        assert!(reg.lookup("ERROR").is_none());
        assert!(reg.get("INFO").is_some());
        assert!(reg.get("ERROR").is_none());
    }

    #[test]
    fn very_long_trigger_registers() {
        let mut reg = TriggerRegistry::new();
        let long = "a".repeat(2_000_000);
        assert!(reg.register(trigger(&long), Box::new(Discard)).is_none());
        assert!(reg.contains(&long));
        assert!(reg.find_substring(long.as_bytes()).is_some());
    }

    #[test]
    fn reregistration_overwrites_and_returns_previous() {
        let mut reg = TriggerRegistry::new();
        reg.register(trigger("INFO"), Box::new(Discard));

        let forward = |_: &[u8]| -> std::io::Result<Verdict> { Ok(Verdict::Forward) };
        let mut prev = reg
            .register(trigger("INFO"), Box::new(forward))
            .expect("previous reaction");

        assert_eq!(prev.react(b"").unwrap(), Verdict::Suppress);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.lookup("INFO").unwrap().react(b"").unwrap(), Verdict::Forward);
    }

    #[test]
    fn entries_lists_every_trigger() {
        let mut reg = TriggerRegistry::new();
        for t in ["a", "b", "c d"] {
            reg.register(trigger(t), Box::new(Discard));
        }

        let mut keys: Vec<&str> = reg.entries().map(|(k, _)| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["a", "b", "c d"]);
    }

    #[test]
    fn find_substring_reports_occurring_trigger() {
        let mut reg = TriggerRegistry::new();
        reg.register(trigger("user ID 107"), Box::new(Discard));
        reg.register(trigger("PANIC"), Box::new(Discard));

        assert_eq!(
            reg.find_substring(b"Log concerning user ID 107 here").map(Trigger::as_str),
            Some("user ID 107")
        );
        assert!(reg.find_substring(b"nothing to see").is_none());
        assert_eq!(reg.get_trigger("PANIC").map(Trigger::as_str), Some("PANIC"));
    }
}
