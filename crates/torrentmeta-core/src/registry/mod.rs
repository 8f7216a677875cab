//! # Pattern Registries
//!
//! Ordered per-category `(label, form, matcher)` tables, compiled once and
//! shared read-only. Each table lives in its own module as plain rows; this
//! module turns rows into [`Entry`] values and bundles every category into a
//! [`PatternRegistry`].
//!
//! The `regex` crate has no lookaround, so the handful of context assertions
//! the tables need are written as [`Guard`] functions that inspect the text
//! around a candidate match.

use std::sync::{Arc, OnceLock};

use regex::{Captures, Regex, RegexBuilder};

use crate::error::Result;

pub mod anime;
pub mod episode;
pub mod language;
pub mod media;
pub mod release;
pub mod season;

pub use anime::{AnimeForm, SpecialForm};
pub use episode::EpisodeForm;
pub use language::LanguageForm;
pub use media::{AudioCodecForm, FileSizeUnit, QualityForm, ResolutionForm, VideoCodecForm};
pub use release::{ContentForm, EncoderForm, GroupForm, WebsiteForm, YearForm};
pub use season::SeasonForm;

/// Context check run against `(haystack, match_start, match_end)`.
pub type Guard = fn(&str, usize, usize) -> bool;

/// One table row: label, form, pattern source, optional guard.
pub type Row<F> = (&'static str, F, &'static str, Option<Guard>);

/// A compiled regex plus an optional context guard.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
    guard: Option<Guard>,
}

impl Matcher {
    /// Compiles `pattern` case-insensitively. Rows that need exact case opt
    /// out inline with `(?-i:...)`.
    ///
    /// # Errors
    ///
    /// Returns `TorrentMetaError::Regex` if the pattern fails to compile.
    pub fn new(pattern: &str, guard: Option<Guard>) -> Result<Self> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { regex, guard })
    }

    /// Iterates accepted, non-overlapping matches left to right.
    pub fn captures_iter<'r, 'h>(&'r self, haystack: &'h str) -> GuardedCaptures<'r, 'h> {
        GuardedCaptures {
            matcher: self,
            haystack,
            pos: 0,
        }
    }

    /// First accepted match.
    pub fn first<'h>(&self, haystack: &'h str) -> Option<Captures<'h>> {
        self.captures_iter(haystack).next()
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        match self.guard {
            None => self.regex.is_match(haystack),
            Some(_) => self.first(haystack).is_some(),
        }
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    fn accepts(&self, haystack: &str, start: usize, end: usize) -> bool {
        self.guard.is_none_or(|guard| guard(haystack, start, end))
    }
}

/// Iterator over matches that pass a [`Matcher`]'s guard.
///
/// A rejected match does not consume its text: scanning resumes one
/// character after the rejected start, so a shorter or later match
/// inside the same span can still be found.
pub struct GuardedCaptures<'r, 'h> {
    matcher: &'r Matcher,
    haystack: &'h str,
    pos: usize,
}

impl<'h> Iterator for GuardedCaptures<'_, 'h> {
    type Item = Captures<'h>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos <= self.haystack.len() {
            let caps = self.matcher.regex.captures_at(self.haystack, self.pos)?;
            let whole = caps.get(0)?;
            let (start, end) = (whole.start(), whole.end());

            if self.matcher.accepts(self.haystack, start, end) {
                self.pos = if end > start {
                    end
                } else {
                    next_boundary(self.haystack, end)
                };
                return Some(caps);
            }
            self.pos = next_boundary(self.haystack, start);
        }
        None
    }
}

fn next_boundary(haystack: &str, at: usize) -> usize {
    at + haystack[at..].chars().next().map_or(1, char::len_utf8)
}

/// A compiled registry row.
#[derive(Debug, Clone)]
pub struct Entry<F> {
    pub label: &'static str,
    pub form: F,
    pub matcher: Matcher,
}

/// Compiles a table of rows, preserving row order.
///
/// # Errors
///
/// Returns `TorrentMetaError::Regex` on the first pattern that fails to compile.
pub fn compile<F: Copy>(rows: &[Row<F>]) -> Result<Vec<Entry<F>>> {
    rows.iter()
        .map(|&(label, form, pattern, guard)| {
            Ok(Entry {
                label,
                form,
                matcher: Matcher::new(pattern, guard)?,
            })
        })
        .collect()
}

/// Context guards shared by the tables.
pub mod guards {
    fn is_word(c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }

    fn before(haystack: &str, at: usize) -> Option<char> {
        haystack[..at].chars().next_back()
    }

    fn after(haystack: &str, at: usize) -> Option<char> {
        haystack[at..].chars().next()
    }

    /// Not preceded by a word character.
    pub fn not_after_word(haystack: &str, start: usize, _end: usize) -> bool {
        before(haystack, start).is_none_or(|c| !is_word(c))
    }

    /// Not followed by a digit.
    pub fn not_before_digit(haystack: &str, _start: usize, end: usize) -> bool {
        after(haystack, end).is_none_or(|c| !c.is_ascii_digit())
    }

    /// Not preceded by a word character and not followed by a digit.
    pub fn standalone_number(haystack: &str, start: usize, end: usize) -> bool {
        not_after_word(haystack, start, end) && not_before_digit(haystack, start, end)
    }

    /// Bare `S<n>` token: no word before, no letter, digit or dash after.
    pub fn bare_season(haystack: &str, start: usize, end: usize) -> bool {
        not_after_word(haystack, start, end)
            && after(haystack, end).is_none_or(|c| !(c.is_alphanumeric() || c == '-'))
    }

    /// Anime absolute number: no letter or digit before; no letter, digit
    /// or `.<digit>` after.
    pub fn absolute_number(haystack: &str, start: usize, end: usize) -> bool {
        if before(haystack, start).is_some_and(char::is_alphanumeric) {
            return false;
        }
        let mut rest = haystack[end..].chars();
        match rest.next() {
            None => true,
            Some(c) if c.is_alphanumeric() => false,
            Some('.') => !rest.next().is_some_and(|c| c.is_ascii_digit()),
            Some(_) => true,
        }
    }
}

/// Every category table, compiled.
///
/// Built once per process through [`PatternRegistry::shared`] or injected
/// explicitly through [`PatternRegistry::new`]; never mutated afterwards.
#[derive(Debug)]
pub struct PatternRegistry {
    pub season: Vec<Entry<SeasonForm>>,
    pub episode: Vec<Entry<EpisodeForm>>,
    pub special: Vec<Entry<SpecialForm>>,
    pub resolution: Vec<Entry<ResolutionForm>>,
    pub video_codec: Vec<Entry<VideoCodecForm>>,
    pub audio_codec: Vec<Entry<AudioCodecForm>>,
    pub language: Vec<Entry<LanguageForm>>,
    pub filesize: Vec<Entry<FileSizeUnit>>,
    pub filetype: Vec<Entry<()>>,
    pub quality: Vec<Entry<QualityForm>>,
    pub year: Vec<Entry<YearForm>>,
    pub website: Vec<Entry<WebsiteForm>>,
    pub encoder: Vec<Entry<EncoderForm>>,
    pub group: Vec<Entry<GroupForm>>,
    pub content: Vec<Entry<ContentForm>>,
    pub anime: Vec<Entry<AnimeForm>>,
    /// Season numbers inside an `S1 S2 S3` run.
    pub(crate) run_number: Regex,
    /// Numeric part of a codec token: whole literal plus the minor of `N.M`.
    pub(crate) numeric_part: Regex,
    /// `10bit`, `8-bit`.
    pub(crate) bit_depth: Regex,
    /// Daily-show dates.
    pub(crate) air_date: Vec<Entry<episode::DateOrder>>,
    /// Words that mark a nearby number range as years.
    pub(crate) year_words: Regex,
    /// Audio codec token sitting just before a number.
    pub(crate) audio_prefix: Regex,
    /// Batch markers and special keywords for anime info.
    pub(crate) anime_special: Regex,
    pub(crate) anime_batch: Regex,
    /// Known media extension, stripped before group/encoder scans.
    pub(crate) media_extension: Regex,
}

static SHARED: OnceLock<Arc<PatternRegistry>> = OnceLock::new();

impl PatternRegistry {
    /// Compiles every table.
    ///
    /// # Errors
    ///
    /// Returns `TorrentMetaError::Regex` if any pattern fails to compile
    /// (should never happen with the static tables defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            season: compile(season::SEASON_ROWS)?,
            episode: compile(episode::EPISODE_ROWS)?,
            special: compile(anime::SPECIAL_ROWS)?,
            resolution: compile(media::RESOLUTION_ROWS)?,
            video_codec: compile(media::VIDEO_CODEC_ROWS)?,
            audio_codec: compile(media::AUDIO_CODEC_ROWS)?,
            language: compile(language::LANGUAGE_ROWS)?,
            filesize: compile(media::FILESIZE_ROWS)?,
            filetype: compile(media::FILETYPE_ROWS)?,
            quality: compile(media::QUALITY_ROWS)?,
            year: compile(release::YEAR_ROWS)?,
            website: compile(release::WEBSITE_ROWS)?,
            encoder: compile(release::ENCODER_ROWS)?,
            group: compile(release::GROUP_ROWS)?,
            content: compile(release::CONTENT_ROWS)?,
            anime: compile(anime::ANIME_ROWS)?,
            run_number: Regex::new(r"(?i)s(?:eason)?\s*(\d+)")?,
            numeric_part: Regex::new(r"\d+(?:\.(\d+))?")?,
            bit_depth: Regex::new(r"(?i)\b(\d{1,2})[-_. ]?bits?\b")?,
            air_date: compile(episode::DATE_ROWS)?,
            year_words: Regex::new(r"(?i)year|aired|released|broadcast|©|\(c\)")?,
            audio_prefix: Regex::new(
                r"(?i)\b(?:aac|ac|ddp?|eac|dts|truehd|atmos|opus|flac|mp|pcm)[\s.]?$",
            )?,
            anime_special: Regex::new(r"(?i)\b(?:ova|ovd|oav|oad|special|bonus|extra)\b")?,
            anime_batch: Regex::new(r"\b(\d{2,4})\s*[-~]\s*(\d{2,4})\b")?,
            media_extension: Regex::new(&format!(
                r"(?i)[.\s](?:{})$",
                media::FILETYPE_EXTENSIONS.join("|")
            ))?,
        })
    }

    /// Process-wide registry, compiled on first use.
    ///
    /// # Errors
    ///
    /// Returns `TorrentMetaError::Regex` if compilation fails; nothing is
    /// cached in that case.
    pub fn shared() -> Result<Arc<Self>> {
        if let Some(registry) = SHARED.get() {
            return Ok(Arc::clone(registry));
        }
        let built = Arc::new(Self::new()?);
        Ok(Arc::clone(SHARED.get_or_init(|| built)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_compiles() {
        let registry = PatternRegistry::new().unwrap();
        assert!(!registry.season.is_empty());
        assert!(!registry.episode.is_empty());
        assert!(!registry.website.is_empty());
    }

    #[test]
    fn shared_registry_is_reused() {
        let a = PatternRegistry::shared().unwrap();
        let b = PatternRegistry::shared().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn matcher_is_case_insensitive_by_default() {
        let m = Matcher::new(r"season\s+(\d+)", None).unwrap();
        assert_eq!(&m.first("The SEASON 3 pack").unwrap()[1], "3");
        let exact = Matcher::new(r"(?-i:EN)", None).unwrap();
        assert!(!exact.is_match("en"));
    }

    #[test]
    fn guard_rejection_resumes_inside_match() {
        // "12" in "112" is rejected (digit before); scanning resumes and
        // finds the later standalone "34".
        let m = Matcher::new(r"\d{2}", Some(guards::absolute_number)).unwrap();
        let found: Vec<_> = m
            .captures_iter("x112 34")
            .map(|c| c[0].to_string())
            .collect();
        assert_eq!(found, vec!["34"]);
    }

    #[test]
    fn guards_check_context() {
        assert!(guards::not_after_word("S01", 0, 3));
        assert!(!guards::not_after_word("xS01", 1, 4));
        assert!(guards::bare_season("Show S01 720p", 5, 8));
        assert!(!guards::bare_season("Show S01-S02", 5, 8));
        assert!(guards::standalone_number("Show 24 Final", 5, 7));
        assert!(!guards::standalone_number("Show 240", 5, 7));
        assert!(!guards::absolute_number("12.5", 0, 2));
        assert!(guards::absolute_number("Show 12.mkv", 5, 7));
    }

    #[test]
    fn compile_preserves_row_order() {
        let rows: &[Row<u8>] = &[("a", 1, r"a", None), ("b", 2, r"b", None)];
        let entries = compile(rows).unwrap();
        assert_eq!(entries[0].label, "a");
        assert_eq!(entries[1].form, 2);
    }

    #[test]
    fn bad_pattern_surfaces_as_error() {
        let rows: &[Row<()>] = &[("bad", (), r"(", None)];
        assert!(compile(rows).is_err());
    }
}
