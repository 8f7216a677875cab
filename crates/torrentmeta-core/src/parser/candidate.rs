use std::collections::HashMap;
use std::fmt::Display;

use tracing::trace;

/// One reading of a season or episode span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<V> {
    pub value: V,
    /// Registry row that produced it.
    pub label: &'static str,
    pub priority: u8,
    /// Byte offset of the match in the normalized title.
    pub start: usize,
}

/// Candidates merged by canonical rendering.
///
/// A later candidate replaces an existing key only with a strictly higher
/// priority, so the first row to claim a key keeps it on ties.
#[derive(Debug)]
pub(crate) struct CandidateMap<V> {
    ranked: Vec<Candidate<V>>,
    keys: HashMap<String, usize>,
}

impl<V> Default for CandidateMap<V> {
    fn default() -> Self {
        Self {
            ranked: Vec::new(),
            keys: HashMap::new(),
        }
    }
}

impl<V: Display> CandidateMap<V> {
    pub(crate) fn offer(&mut self, candidate: Candidate<V>) {
        let key = candidate.value.to_string();
        match self.keys.get(&key) {
            Some(&slot) if candidate.priority > self.ranked[slot].priority => {
                trace!(%key, label = candidate.label, "candidate upgraded");
                self.ranked[slot] = candidate;
            }
            Some(_) => {}
            None => {
                self.keys.insert(key, self.ranked.len());
                self.ranked.push(candidate);
            }
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Survivors ordered by priority (highest first), then position.
    pub(crate) fn into_ranked(mut self) -> Vec<Candidate<V>> {
        self.ranked
            .sort_by(|a, b| b.priority.cmp(&a.priority).then(a.start.cmp(&b.start)));
        self.ranked
    }
}

/// Comma-joins candidate renderings.
pub fn join_values<V: Display>(candidates: &[Candidate<V>]) -> Option<String> {
    if candidates.is_empty() {
        return None;
    }
    let joined = candidates
        .iter()
        .map(|c| c.value.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Some(joined)
}
