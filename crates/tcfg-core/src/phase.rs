//! Translation phases and per-accessor phase memory
//!
//! Phases run in declaration order. Once a phase succeeds for an accessor,
//! later calls start from that phase; `None` marks an accessor for which
//! nothing ever succeeded and short-circuits argument-less calls for good.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tcfg_contract::AccessorId;

/// Stage of the translation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TranslationPhase {
    /// Text results, with optional `{n}` formatting
    ParseText,
    /// Enumeration results
    ParseEnum,
    /// Boolean, integer and floating-point results
    ParseScalar,
    /// Ranked plugin translators
    ApplyPlugin,
    /// Registered constructors
    ConstructInstance,
    /// Terminal marker: no phase ever succeeded
    None,
}

impl TranslationPhase {
    /// All phases in pipeline order
    pub const ALL: [TranslationPhase; 6] = [
        TranslationPhase::ParseText,
        TranslationPhase::ParseEnum,
        TranslationPhase::ParseScalar,
        TranslationPhase::ApplyPlugin,
        TranslationPhase::ConstructInstance,
        TranslationPhase::None,
    ];

    /// This phase and every later one, `None` included
    #[inline]
    #[must_use]
    pub fn remaining(self) -> &'static [TranslationPhase] {
        &Self::ALL[self as usize..]
    }

    /// Check for the terminal marker
    #[inline]
    #[must_use]
    pub fn is_none(self) -> bool {
        self == Self::None
    }
}

/// Last successful phase per accessor
///
/// Entries only ever move forward and are never removed.
#[derive(Debug, Default)]
pub struct PhaseMemory {
    phases: DashMap<AccessorId, TranslationPhase>,
}

impl PhaseMemory {
    /// Create empty memory
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembered phase of an accessor
    #[inline]
    #[must_use]
    pub fn get(&self, id: AccessorId) -> Option<TranslationPhase> {
        self.phases.get(&id).map(|p| *p)
    }

    /// Check for the sticky `None` marker
    #[inline]
    #[must_use]
    pub fn is_none(&self, id: AccessorId) -> bool {
        self.get(id).is_some_and(TranslationPhase::is_none)
    }

    /// Record a successful phase; earlier phases never replace later ones
    pub fn record(&self, id: AccessorId, phase: TranslationPhase) {
        match self.phases.entry(id) {
            Entry::Occupied(mut entry) => {
                if phase > *entry.get() {
                    entry.insert(phase);
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(phase);
            }
        }
    }

    /// Record `None` unless a phase is already remembered
    ///
    /// Returns whether the marker was written.
    pub fn mark_none_if_absent(&self, id: AccessorId) -> bool {
        match self.phases.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(TranslationPhase::None);
                true
            }
        }
    }

    /// Number of accessors with a remembered phase
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Check if nothing is remembered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_includes_terminal_marker() {
        assert_eq!(TranslationPhase::ParseText.remaining().len(), 6);
        assert_eq!(
            TranslationPhase::ApplyPlugin.remaining(),
            &[
                TranslationPhase::ApplyPlugin,
                TranslationPhase::ConstructInstance,
                TranslationPhase::None
            ]
        );
        assert_eq!(TranslationPhase::None.remaining(), &[TranslationPhase::None]);
    }

    #[test]
    fn record_never_downgrades() {
        let memory = PhaseMemory::new();
        let id = AccessorId::new();
        memory.record(id, TranslationPhase::ApplyPlugin);
        memory.record(id, TranslationPhase::ParseText);
        assert_eq!(memory.get(id), Some(TranslationPhase::ApplyPlugin));
        memory.record(id, TranslationPhase::ConstructInstance);
        assert_eq!(memory.get(id), Some(TranslationPhase::ConstructInstance));
    }

    #[test]
    fn none_marker_only_when_absent() {
        let memory = PhaseMemory::new();
        let seen = AccessorId::new();
        let unseen = AccessorId::new();
        memory.record(seen, TranslationPhase::ParseScalar);

        assert!(!memory.mark_none_if_absent(seen));
        assert!(memory.mark_none_if_absent(unseen));
        assert!(!memory.mark_none_if_absent(unseen));
        assert!(memory.is_none(unseen));
        assert!(!memory.is_none(seen));
        assert_eq!(memory.len(), 2);
    }
}
