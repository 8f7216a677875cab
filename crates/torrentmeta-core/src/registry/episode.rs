use super::Row;
use super::guards::{not_before_digit, standalone_number};

/// How an episode row reads its captures, and how much it is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EpisodeForm {
    /// Generic phrase ("All Episodes"); short-circuits numeric scanning.
    Phrase,
    /// `Episodes 1-12`, `Episodes 1 to 12`
    EpisodesRange,
    /// `Episode 1-12`
    EpisodeRange,
    /// `EP 09-13`, `E01-E05`, `E01E02`
    ShortRange,
    /// `S01E01-E03`, `1x01-03`
    CrossRange,
    /// `Chapters 1-10`
    ChapterRange,
    /// Bare `01-12` or `01~12`
    Batch,
    /// `Ep 1 to 5`, `E1 to E5`
    ToRange,
    /// `11 episodes`
    Count,
    /// `E05`, `EP 7`, `Episode 5`
    Single,
    /// `1x05`, `S01xE05`
    CrossSingle,
    /// `Part 2`
    Part,
    /// `Part Two`
    PartWord,
    /// `Part 1 & 2`
    PartPair,
    /// `3 of 10`
    OfTotal,
    /// Bare absolute number, used only when nothing else survives.
    Absolute,
}

impl EpisodeForm {
    pub const fn priority(self) -> u8 {
        match self {
            Self::Phrase => 0,
            Self::EpisodesRange => 15,
            Self::EpisodeRange => 10,
            Self::ShortRange | Self::CrossRange => 8,
            Self::ChapterRange | Self::Batch => 7,
            Self::ToRange => 6,
            Self::Count => 5,
            Self::Single | Self::CrossSingle => 4,
            Self::Part | Self::PartWord | Self::PartPair | Self::OfTotal => 3,
            Self::Absolute => 1,
        }
    }

    /// Largest episode number the form may carry. Forms with an explicit
    /// episode marker allow long-running shows.
    pub const fn max_number(self) -> u32 {
        match self {
            Self::Count
            | Self::Batch
            | Self::Part
            | Self::PartWord
            | Self::PartPair
            | Self::OfTotal => 200,
            _ => 2000,
        }
    }

    /// Bare-number forms that must not sit right after a season word or an
    /// audio codec, and must not look like a year range.
    pub const fn is_unprefixed(self) -> bool {
        matches!(self, Self::Batch | Self::Absolute)
    }

    /// Forms that read two numbers.
    pub const fn is_range(self) -> bool {
        matches!(
            self,
            Self::EpisodesRange
                | Self::EpisodeRange
                | Self::ShortRange
                | Self::CrossRange
                | Self::ChapterRange
                | Self::Batch
                | Self::ToRange
                | Self::PartPair
        )
    }
}

/// Letter before an `E<n>` marker must not be part of a word, though a digit
/// (as in `S01E05`) is fine.
fn episode_marker(haystack: &str, start: usize, end: usize) -> bool {
    haystack[..start]
        .chars()
        .next_back()
        .is_none_or(|c| !c.is_alphabetic() && c != '_')
        && not_before_digit(haystack, start, end)
}

pub(crate) const EPISODE_ROWS: &[Row<EpisodeForm>] = &[
    // Phrases
    ("Complete Episodes", EpisodeForm::Phrase, r"\bcomplete[-_. ]+episodes\b", None),
    ("All Episodes", EpisodeForm::Phrase, r"\ball[-_. ]+episodes\b", None),
    ("All Episode", EpisodeForm::Phrase, r"\ball[-_. ]+episode\b", None),
    ("Full Episode", EpisodeForm::Phrase, r"\bfull[-_. ]+episode\b", None),
    ("Pilot Episode", EpisodeForm::Phrase, r"\bpilot[-_. ]+episode\b", None),
    ("Final Episode", EpisodeForm::Phrase, r"\bfinal[-_. ]+episode\b", None),
    ("Premiere Episode", EpisodeForm::Phrase, r"\bpremiere[-_. ]+episode\b", None),
    ("Season Finale", EpisodeForm::Phrase, r"\bseason[-_. ]+finale\b", None),
    ("Series Finale", EpisodeForm::Phrase, r"\bseries[-_. ]+finale\b", None),
    // Ranges
    (
        "Episodes #-#",
        EpisodeForm::EpisodesRange,
        r"\bepisodes[-_. ]+(\d{1,4})\s*-\s*(\d{1,4})\b",
        None,
    ),
    (
        "Episodes # to #",
        EpisodeForm::EpisodesRange,
        r"\bepisodes[-_. ]+(\d{1,4})\s+to\s+(\d{1,4})\b",
        None,
    ),
    (
        "Episode #-#",
        EpisodeForm::EpisodeRange,
        r"\bepisode[-_. ]+(\d{1,4})\s*-\s*(\d{1,4})\b",
        None,
    ),
    ("EP #-#", EpisodeForm::ShortRange, r"\beps?[-_. ]*(\d{1,4})\s*-\s*(\d{1,4})\b", None),
    ("E#-E#", EpisodeForm::ShortRange, r"\be(\d{1,4})\s*-\s*e?(\d{1,4})\b", None),
    ("E#E#", EpisodeForm::ShortRange, r"e(\d{2})e(\d{2})\b", Some(episode_marker)),
    (
        "S#E#-E#",
        EpisodeForm::CrossRange,
        r"\bS\d{1,4}[-_. ]?e(\d{1,4})\s*-\s*e?(\d{1,4})\b",
        None,
    ),
    (
        "#x#-#",
        EpisodeForm::CrossRange,
        r"\bS?\d{1,2}xe?(\d{1,4})\s*-\s*(\d{1,4})\b",
        None,
    ),
    (
        "Chapters #-#",
        EpisodeForm::ChapterRange,
        r"\bchapters?[-_. ]+(\d{1,4})\s*-\s*(\d{1,4})\b",
        None,
    ),
    ("##-##", EpisodeForm::Batch, r"\b(\d{1,3})\s*[-~]\s*(\d{1,3})\b", None),
    ("Ep # to #", EpisodeForm::ToRange, r"\bep[-_. ]*(\d{1,4})\s+to\s+(\d{1,4})\b", None),
    ("E# to E#", EpisodeForm::ToRange, r"\be(\d{1,4})\s+to\s+e(\d{1,4})\b", None),
    // Counts
    ("## episodes", EpisodeForm::Count, r"\b(\d{1,3})[-_. ]+episodes\b", None),
    // Singles
    ("Episode #", EpisodeForm::Single, r"\bepisode[-_. ]*(\d{1,4})", Some(not_before_digit)),
    ("EP #", EpisodeForm::Single, r"\bep[-_. ]*(\d{1,4})", Some(not_before_digit)),
    ("E#", EpisodeForm::Single, r"e(\d{1,4})", Some(episode_marker)),
    ("Bolum #", EpisodeForm::Single, r"\b(?:bolum|blm)[-_. ]+(\d{1,4})\b", None),
    ("#x#", EpisodeForm::CrossSingle, r"\bS?\d{1,2}xe?(\d{1,4})\b", None),
    // Parts
    (
        "Part # & #",
        EpisodeForm::PartPair,
        r"\bpart[-_. ]*(\d{1,2})\s*&\s*(\d{1,2})\b",
        None,
    ),
    ("Part #", EpisodeForm::Part, r"\b(?:part|pt)[-_. ]*(\d{1,2})\b", None),
    (
        "Part One",
        EpisodeForm::PartWord,
        r"\bpart[-_. ]+(one|two|three|four|five|six|seven|eight|nine)\b",
        None,
    ),
    ("# of #", EpisodeForm::OfTotal, r"\b(\d{1,3})\s*of\s*\d{1,3}", Some(standalone_number)),
];

/// Field order of a daily-show date row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    YearMonthDay,
    DayMonthYear,
    MonthDayYear,
}

pub(crate) const DATE_ROWS: &[Row<DateOrder>] = &[
    (
        "YYYY-MM-DD",
        DateOrder::YearMonthDay,
        r"\b((?:19|20)\d{2})[-_. ](0[1-9]|1[0-2])[-_. ](0[1-9]|[12]\d|3[01])\b",
        None,
    ),
    (
        "DD-MM-YYYY",
        DateOrder::DayMonthYear,
        r"\b(0[1-9]|[12]\d|3[01])[-_. ](0[1-9]|1[0-2])[-_. ]((?:19|20)\d{2})\b",
        None,
    ),
    (
        "MM-DD-YYYY",
        DateOrder::MonthDayYear,
        r"\b(0[1-9]|1[0-2])[-_. ](0[1-9]|[12]\d|3[01])[-_. ]((?:19|20)\d{2})\b",
        None,
    ),
];

/// Spelled-out part numbers.
pub fn part_word(word: &str) -> Option<u32> {
    let n = match word.to_ascii_lowercase().as_str() {
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        _ => return None,
    };
    Some(n)
}
