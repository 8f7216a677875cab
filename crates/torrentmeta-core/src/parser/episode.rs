//! Episode disambiguation.
//!
//! Order of play for one normalized title:
//!
//! 1. special-episode markers short-circuit to `Special`;
//! 2. generic phrases ("All Episodes", "Season Finale") short-circuit to
//!    their labels;
//! 3. daily-show dates are lifted out into `air_date` and their spans
//!    blocked;
//! 4. numeric rows are merged by canonical rendering with the priorities
//!    of [`EpisodeForm`];
//! 5. only if nothing survived, the first anime absolute number is used.

use std::cmp::Ordering;
use std::ops::Range;

use regex::Captures;
use tracing::trace;

use super::candidate::{Candidate, CandidateMap};
use super::exclusion::ExclusionSet;
use crate::registry::episode::{DateOrder, part_word};
use crate::registry::{Entry, EpisodeForm, PatternRegistry};
use crate::types::EpisodeValue;

/// Words after which a bare number is a season, not an episode.
const SEASON_WORDS: &[&str] = &["season", "seasons", "saison", "temporada", "stagione", "s"];

/// Characters inspected on each side of a range for year words.
const YEAR_WORD_WINDOW: usize = 20;

/// Result of one episode scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeScan {
    /// Ranked readings; empty when nothing matched.
    pub candidates: Vec<Candidate<EpisodeValue>>,
    /// Daily-show date, `YYYY-MM-DD`.
    pub air_date: Option<String>,
    /// Byte spans of every accepted date match.
    pub date_spans: Vec<Range<usize>>,
    /// Byte spans of range matches that were rejected; their numbers are
    /// never read back as absolute episodes.
    pub rejected_ranges: Vec<Range<usize>>,
}

impl EpisodeScan {
    /// Spans closed to absolute-number reads: air dates and rejected ranges.
    pub fn blocked_spans(&self) -> Vec<Range<usize>> {
        self.date_spans
            .iter()
            .chain(&self.rejected_ranges)
            .cloned()
            .collect()
    }
}

/// Per-title inputs shared by the episode rules.
pub struct EpisodeContext<'a> {
    pub registry: &'a PatternRegistry,
    pub raw: &'a str,
    pub normalized: &'a str,
    pub exclusions: &'a ExclusionSet,
    pub season_numbers: &'a [u32],
    pub latest_year: u32,
}

impl EpisodeContext<'_> {
    pub fn scan(&self) -> EpisodeScan {
        let (air_date, dates) = self.dates();

        if let Some(special) = self.special() {
            return EpisodeScan {
                candidates: vec![special],
                air_date,
                date_spans: dates,
                rejected_ranges: Vec::new(),
            };
        }

        let phrases = self.phrases();
        if !phrases.is_empty() {
            return EpisodeScan {
                candidates: phrases,
                air_date,
                date_spans: dates,
                rejected_ranges: Vec::new(),
            };
        }

        let mut map = CandidateMap::default();
        let mut rejected_ranges = Vec::new();

        let numeric = self.registry.episode.iter().filter(|e| e.form != EpisodeForm::Phrase);
        for entry in numeric {
            for caps in entry.matcher.captures_iter(self.normalized) {
                let Some(whole) = caps.get(0) else { continue };
                if dates.iter().any(|d| d.contains(&whole.start())) {
                    trace!(label = entry.label, text = whole.as_str(), "inside air date");
                    continue;
                }
                match self.read(entry, &caps) {
                    Some(value) => map.offer(Candidate {
                        value,
                        label: entry.label,
                        priority: entry.form.priority(),
                        start: whole.start(),
                    }),
                    None if entry.form.is_range() => rejected_ranges.push(whole.range()),
                    None => {}
                }
            }
        }

        if map.is_empty() {
            let blocked: Vec<_> = dates.iter().chain(&rejected_ranges).cloned().collect();
            if let Some(&(n, start)) = self.absolute_numbers(&blocked).first() {
                map.offer(Candidate {
                    value: EpisodeValue::Single(n),
                    label: "Absolute",
                    priority: EpisodeForm::Absolute.priority(),
                    start,
                });
            }
        }

        EpisodeScan {
            candidates: map.into_ranked(),
            air_date,
            date_spans: dates,
            rejected_ranges,
        }
    }

    fn special(&self) -> Option<Candidate<EpisodeValue>> {
        self.registry.special.iter().find_map(|entry| {
            let haystack = if entry.form.on_raw_title() {
                self.raw
            } else {
                self.normalized
            };
            let whole = entry.matcher.first(haystack)?.get(0)?;
            let start = if entry.form.on_raw_title() {
                relocate(self.normalized, whole.as_str())
            } else {
                whole.start()
            };
            Some(Candidate {
                value: EpisodeValue::Special,
                label: entry.label,
                priority: 0,
                start,
            })
        })
    }

    fn phrases(&self) -> Vec<Candidate<EpisodeValue>> {
        self.registry
            .episode
            .iter()
            .filter(|e| e.form == EpisodeForm::Phrase)
            .filter_map(|entry| {
                let caps = entry.matcher.first(self.normalized)?;
                Some(Candidate {
                    value: EpisodeValue::Phrase(entry.label),
                    label: entry.label,
                    priority: 0,
                    start: caps.get(0)?.start(),
                })
            })
            .collect()
    }

    /// First valid air date, plus the spans of every date match.
    fn dates(&self) -> (Option<String>, Vec<Range<usize>>) {
        let mut first = None;
        let mut spans = Vec::new();

        for entry in &self.registry.air_date {
            for caps in entry.matcher.captures_iter(self.normalized) {
                let Some(whole) = caps.get(0) else { continue };
                let (year, month, day) = match entry.form {
                    DateOrder::YearMonthDay => (&caps[1], &caps[2], &caps[3]),
                    DateOrder::DayMonthYear => (&caps[3], &caps[2], &caps[1]),
                    DateOrder::MonthDayYear => (&caps[3], &caps[1], &caps[2]),
                };
                if year.parse::<u32>().is_ok_and(|y| y > self.latest_year) {
                    continue;
                }
                spans.push(whole.range());
                if first.is_none() {
                    first = Some(format!("{year}-{month}-{day}"));
                }
            }
        }
        (first, spans)
    }

    fn read(&self, entry: &Entry<EpisodeForm>, caps: &Captures<'_>) -> Option<EpisodeValue> {
        let form = entry.form;
        let first = caps.get(1)?;

        match form {
            EpisodeForm::EpisodesRange
            | EpisodeForm::EpisodeRange
            | EpisodeForm::ShortRange
            | EpisodeForm::CrossRange
            | EpisodeForm::ChapterRange
            | EpisodeForm::Batch
            | EpisodeForm::ToRange
            | EpisodeForm::PartPair => {
                let second = caps.get(2)?;
                if form.is_unprefixed() && self.bare_context_rejects(first.start()) {
                    trace!(label = entry.label, "bare range in season or audio context");
                    return None;
                }
                let end = caps.get(0)?.end();
                if self.looks_like_year_range(first.as_str(), second.as_str(), first.start(), end)
                {
                    trace!(label = entry.label, "year-like range");
                    return None;
                }
                let a = self.number(first.as_str(), form)?;
                let b = self.number(second.as_str(), form)?;
                match a.cmp(&b) {
                    Ordering::Less => Some(EpisodeValue::Span(a, b)),
                    Ordering::Equal => Some(EpisodeValue::Single(a)),
                    Ordering::Greater => {
                        trace!(label = entry.label, a, b, "descending episode range");
                        None
                    }
                }
            }
            EpisodeForm::Count => {
                let n = self.number(first.as_str(), form)?;
                if self.season_numbers.contains(&n) {
                    trace!(n, "episode count equals a season number");
                    return None;
                }
                Some(EpisodeValue::Count(n))
            }
            EpisodeForm::Single
            | EpisodeForm::CrossSingle
            | EpisodeForm::Part
            | EpisodeForm::OfTotal => self.number(first.as_str(), form).map(EpisodeValue::Single),
            EpisodeForm::PartWord => part_word(first.as_str()).map(EpisodeValue::Part),
            EpisodeForm::Phrase | EpisodeForm::Absolute => None,
        }
    }

    /// Parses an episode literal: not excluded, within 1..=form limit.
    fn number(&self, literal: &str, form: EpisodeForm) -> Option<u32> {
        if self.exclusions.contains(literal) {
            trace!(literal, "excluded episode number");
            return None;
        }
        let n: u32 = literal.parse().ok()?;
        if n == 0 || n > form.max_number() {
            trace!(n, ?form, "episode out of range");
            return None;
        }
        Some(n)
    }

    /// A bare number right after a season word or an audio codec.
    fn bare_context_rejects(&self, start: usize) -> bool {
        let before = &self.normalized[..start];
        let word = before
            .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '.' | '_'))
            .rsplit(|c: char| !c.is_alphanumeric())
            .next()
            .unwrap_or_default()
            .to_lowercase();
        SEASON_WORDS.contains(&word.as_str()) || self.registry.audio_prefix.is_match(before)
    }

    /// Both numbers read as calendar years, or year words sit nearby.
    fn looks_like_year_range(&self, a: &str, b: &str, start: usize, end: usize) -> bool {
        let calendar = |s: &str| {
            s.len() == 4
                && s.parse::<u32>()
                    .is_ok_and(|y| (1900..=self.latest_year).contains(&y))
        };
        if calendar(a) && calendar(b) {
            return true;
        }
        let century = |s: &str| {
            s.len() == 4
                && (s.starts_with("19") || s.starts_with("20"))
                && s.chars().all(|c| c.is_ascii_digit())
        };
        if century(a) && century(b) {
            return true;
        }
        if a.len() < 3 || b.len() < 3 {
            return false;
        }
        let window = char_window(self.normalized, start, end, YEAR_WORD_WINDOW);
        self.registry.year_words.is_match(window)
    }

    /// Anime absolute numbers in order of appearance, deduplicated.
    ///
    /// Excluded literals, season numbers, numbers after a season word or
    /// audio codec, and numbers inside `blocked` spans are dropped.
    pub fn absolute_numbers(&self, blocked: &[Range<usize>]) -> Vec<(u32, usize)> {
        let mut found: Vec<(u32, usize)> = Vec::new();

        for entry in &self.registry.anime {
            for caps in entry.matcher.captures_iter(self.normalized) {
                let Some(m) = caps.get(1) else { continue };
                if blocked.iter().any(|span| span.contains(&m.start()))
                    || self.exclusions.contains(m.as_str())
                    || self.bare_context_rejects(m.start())
                {
                    continue;
                }
                let Ok(n) = m.as_str().parse::<u32>() else {
                    continue;
                };
                if !(1..=2000).contains(&n) || self.season_numbers.contains(&n) {
                    continue;
                }
                if !found.iter().any(|&(seen, _)| seen == n) {
                    found.push((n, m.start()));
                }
            }
        }

        found.sort_by_key(|&(_, start)| start);
        found
    }

    /// `NN-NN` or `NN~NN` that is not a year range and not excluded.
    pub fn has_batch(&self) -> bool {
        self.registry
            .anime_batch
            .captures_iter(self.normalized)
            .any(|caps| {
                let (Some(a), Some(b), Some(whole)) = (caps.get(1), caps.get(2), caps.get(0)) else {
                    return false;
                };
                !self.exclusions.claims_any(&[a.as_str(), b.as_str()])
                    && !self.bare_context_rejects(a.start())
                    && !self.looks_like_year_range(a.as_str(), b.as_str(), a.start(), whole.end())
            })
    }
}

/// Offset in the normalized title of a token matched on the raw title.
///
/// The first dotted piece (`S01E00`, `S01`) survives normalization intact;
/// when it cannot be found the end of the title is returned.
fn relocate(normalized: &str, raw_match: &str) -> usize {
    raw_match
        .split('.')
        .find(|piece| !piece.is_empty())
        .and_then(|piece| {
            normalized
                .to_ascii_lowercase()
                .find(&piece.to_ascii_lowercase())
        })
        .unwrap_or(normalized.len())
}

/// `text[start..end]` widened by up to `pad` characters on each side.
fn char_window(text: &str, start: usize, end: usize, pad: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .take(pad)
        .last()
        .map_or(start, |(i, _)| i);
    let to = text[end..]
        .char_indices()
        .nth(pad)
        .map_or(text.len(), |(i, _)| end + i);
    &text[from..to]
}
