//! Season disambiguation.
//!
//! Complex aggregates (lists and `S1 S2 S3` runs) are read first and their
//! spans recorded; simple rows starting inside one of those spans are
//! dropped. Everything else is merged by canonical rendering with the
//! priorities of [`SeasonForm`].

use std::ops::Range;

use regex::Captures;
use tracing::trace;

use super::candidate::{Candidate, CandidateMap};
use super::exclusion::ExclusionSet;
use crate::registry::season::{MAX_SPAN_SEASON, roman_to_int};
use crate::registry::{Entry, PatternRegistry, SeasonForm};
use crate::types::SeasonValue;

/// Ranked season readings of a normalized title.
pub fn scan_seasons(
    registry: &PatternRegistry,
    normalized: &str,
    exclusions: &ExclusionSet,
) -> Vec<Candidate<SeasonValue>> {
    let mut map = CandidateMap::default();
    let mut complex: Vec<Range<usize>> = Vec::new();

    for entry in registry.season.iter().filter(|e| e.form.is_complex()) {
        for caps in entry.matcher.captures_iter(normalized) {
            let Some(whole) = caps.get(0) else { continue };
            let Some(value) = read_aggregate(registry, entry, &caps, exclusions) else {
                continue;
            };
            complex.push(whole.range());
            map.offer(Candidate {
                value,
                label: entry.label,
                priority: entry.form.priority(),
                start: whole.start(),
            });
        }
    }

    for entry in registry.season.iter().filter(|e| !e.form.is_complex()) {
        for caps in entry.matcher.captures_iter(normalized) {
            let Some(whole) = caps.get(0) else { continue };
            if complex.iter().any(|span| span.contains(&whole.start())) {
                trace!(label = entry.label, text = whole.as_str(), "inside complex season span");
                continue;
            }
            if let Some(value) = read_simple(entry, &caps, exclusions) {
                map.offer(Candidate {
                    value,
                    label: entry.label,
                    priority: entry.form.priority(),
                    start: whole.start(),
                });
            }
        }
    }

    map.into_ranked()
}

/// Every season number claimed by the candidates.
pub fn season_numbers(candidates: &[Candidate<SeasonValue>]) -> Vec<u32> {
    let mut numbers: Vec<u32> = candidates.iter().flat_map(|c| c.value.numbers()).collect();
    numbers.sort_unstable();
    numbers.dedup();
    numbers
}

/// Lists and runs collapse to the span of their numbers.
fn read_aggregate(
    registry: &PatternRegistry,
    entry: &Entry<SeasonForm>,
    caps: &Captures<'_>,
    exclusions: &ExclusionSet,
) -> Option<SeasonValue> {
    let inner = caps.get(1)?.as_str();
    let literals: Vec<&str> = match entry.form {
        SeasonForm::Run => registry
            .run_number
            .captures_iter(inner)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect(),
        _ => registry
            .numeric_part
            .find_iter(inner)
            .map(|m| m.as_str())
            .collect(),
    };

    let mut numbers = Vec::with_capacity(literals.len());
    for literal in literals {
        numbers.push(span_number(literal, exclusions, entry.label)?);
    }
    let low = *numbers.iter().min()?;
    let high = *numbers.iter().max()?;
    Some(SeasonValue::span(low, high))
}

fn read_simple(
    entry: &Entry<SeasonForm>,
    caps: &Captures<'_>,
    exclusions: &ExclusionSet,
) -> Option<SeasonValue> {
    let first = caps.get(1).map(|m| m.as_str());

    match entry.form {
        SeasonForm::Numbered
        | SeasonForm::CompleteNumbered
        | SeasonForm::Localized
        | SeasonForm::Qualified => {
            let literal = first?;
            if exclusions.contains(literal) {
                trace!(label = entry.label, literal, "excluded season number");
                return None;
            }
            literal.parse().ok().map(SeasonValue::Single)
        }
        SeasonForm::Range | SeasonForm::CompleteRange | SeasonForm::LocalizedRange => {
            let a = span_number(first?, exclusions, entry.label)?;
            let b = span_number(caps.get(2)?.as_str(), exclusions, entry.label)?;
            if a > b {
                trace!(label = entry.label, a, b, "descending season range");
                return None;
            }
            Some(SeasonValue::span(a, b))
        }
        SeasonForm::Phrase => Some(SeasonValue::Phrase(entry.label)),
        SeasonForm::Roman => {
            let n = roman_to_int(first?)?;
            (n <= MAX_SPAN_SEASON).then_some(SeasonValue::Single(n))
        }
        SeasonForm::List | SeasonForm::Run => None,
    }
}

/// A season inside a range or list: not excluded, within 1..=50.
fn span_number(literal: &str, exclusions: &ExclusionSet, label: &str) -> Option<u32> {
    if exclusions.contains(literal) {
        trace!(label, literal, "excluded season number");
        return None;
    }
    let n: u32 = literal.parse().ok()?;
    if !(1..=MAX_SPAN_SEASON).contains(&n) {
        trace!(label, n, "season out of range");
        return None;
    }
    Some(n)
}
