use super::Row;
use super::guards::{bare_season, not_before_digit};

/// How a season row reads its captures, and how much it is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonForm {
    /// `S07`, `Season 7`: one number.
    Numbered,
    /// `S01-S06`, `Season 1-6`: two numbers.
    Range,
    /// `Season 1, 2 & 3`, `S1,2,3`: a list capture.
    List,
    /// `S1 S2 S3`, `S01 Season 1`: a run capture.
    Run,
    /// `Complete S01`, `Season 2 Complete`.
    CompleteNumbered,
    /// `Complete S01-S03`.
    CompleteRange,
    /// `Stagione 2`, `Temporada 3`, `Saison 1`.
    Localized,
    /// `Stagioni 1-3`, `Temporadas 1-2`.
    LocalizedRange,
    /// Unnumbered phrase; the row label is the rendering.
    Phrase,
    /// `Season 2 Part 1`, `S1xE05`: the first capture is the season.
    Qualified,
    /// `Season IV`, `S II`.
    Roman,
}

impl SeasonForm {
    pub const fn priority(self) -> u8 {
        match self {
            Self::Numbered => 30,
            Self::Range => 25,
            Self::List | Self::Run => 20,
            Self::CompleteNumbered | Self::CompleteRange => 15,
            Self::Localized | Self::LocalizedRange => 12,
            Self::Phrase => 10,
            Self::Qualified => 5,
            Self::Roman => 3,
        }
    }

    /// Complex aggregates are matched first and suppress simple rows
    /// starting inside their span.
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::List | Self::Run)
    }
}

/// Highest season accepted inside ranges, lists and Roman numerals.
pub const MAX_SPAN_SEASON: u32 = 50;

pub(crate) const SEASON_ROWS: &[Row<SeasonForm>] = &[
    // Complex aggregates
    (
        "Season list",
        SeasonForm::List,
        r"\bseasons?[-_. ]+((?:\d{1,2}\s*[,&+]\s*)+\d{1,2})\b",
        None,
    ),
    ("S list", SeasonForm::List, r"\bS((?:\d{1,2}\s*[,&+]\s*)+\d{1,2})\b", None),
    (
        "S+S+S run",
        SeasonForm::Run,
        r"\b((?:S(?:eason)?\s*\d{1,2}\s*[-._,+ ]?\s*){2,})\b",
        None,
    ),
    // Explicit numbers
    ("Season #", SeasonForm::Numbered, r"\bseason[-_. ]+(\d{1,4})\b", None),
    ("S#", SeasonForm::Numbered, r"\bS(\d{1,2})", Some(not_before_digit)),
    ("S###", SeasonForm::Numbered, r"\bS(\d{3,4})", Some(not_before_digit)),
    ("S# bare", SeasonForm::Numbered, r"\bS(\d+)", Some(bare_season)),
    // Ranges
    (
        "Season #-Season #",
        SeasonForm::Range,
        r"\bseason[-_. ]+(\d{1,2})\s*-\s*season[-_. ]+(\d{1,2})\b",
        None,
    ),
    (
        "Season #-#",
        SeasonForm::Range,
        r"\bseasons?[-_. ]+(\d{1,2})\s*-\s*(\d{1,2})\b",
        None,
    ),
    ("S#-S#", SeasonForm::Range, r"\bS(\d{1,2})\s*-\s*S(\d{1,2})\b", None),
    ("S#-#", SeasonForm::Range, r"\bS(\d{1,2})-(\d{1,2})\b", None),
    (
        "Season # to #",
        SeasonForm::Range,
        r"\bseasons?[-_. ]+(\d{1,2})\s+to\s+(\d{1,2})\b",
        None,
    ),
    ("S# to #", SeasonForm::Range, r"\bS(\d{1,2})\s+to\s+S?(\d{1,2})\b", None),
    // Complete with numbers
    (
        "Complete S#-S#",
        SeasonForm::CompleteRange,
        r"\bcomplete[-_. ]+S(\d{1,2})\s*-\s*S(\d{1,2})\b",
        None,
    ),
    ("Complete S#", SeasonForm::CompleteNumbered, r"\bcomplete[-_. ]+S(\d{1,2})\b", None),
    ("S# Complete", SeasonForm::CompleteNumbered, r"\bS(\d{1,2})[-_. ]+complete\b", None),
    (
        "Season # Complete",
        SeasonForm::CompleteNumbered,
        r"\bseason[-_. ]+(\d{1,2})[-_. ]+complete\b",
        None,
    ),
    ("Full S#", SeasonForm::CompleteNumbered, r"\bfull[-_. ]+S(\d{1,2})\b", None),
    // Other languages
    (
        "Stagioni #-#",
        SeasonForm::LocalizedRange,
        r"\b(?:stagioni|temporadas|saisons)[-_. ]+(\d{1,2})\s*-\s*(\d{1,2})\b",
        None,
    ),
    (
        "Stagione #",
        SeasonForm::Localized,
        r"\b(?:stagione|temporada|saison)[-_. ]+(\d{1,2})\b",
        None,
    ),
    // Unnumbered phrases
    ("Complete Seasons", SeasonForm::Phrase, r"\bcomplete[-_. ]+seasons\b", None),
    ("Complete Season", SeasonForm::Phrase, r"\bcomplete[-_. ]+season\b", None),
    ("Full Season", SeasonForm::Phrase, r"\bfull[-_. ]+season\b", None),
    ("Season Pack", SeasonForm::Phrase, r"\bseason[-_. ]+pack\b", None),
    ("All Seasons", SeasonForm::Phrase, r"\ball[-_. ]+seasons\b", None),
    ("All Season", SeasonForm::Phrase, r"\ball[-_. ]+season\b", None),
    // Qualified
    (
        "Season # Part #",
        SeasonForm::Qualified,
        r"\bseason[-_. ]+(\d{1,2})[-_. ]+part[-_. ]*\d+",
        None,
    ),
    ("S# Part #", SeasonForm::Qualified, r"\bS(\d{1,2})[-_. ]+part[-_. ]*\d+", None),
    (
        "Season # Vol #",
        SeasonForm::Qualified,
        r"\bseason[-_. ]+(\d{1,2})[-_. ]+vol(?:ume)?[-_. ]*\d+",
        None,
    ),
    (
        "Season # (####)",
        SeasonForm::Qualified,
        r"\bseason[-_. ]+(\d{1,2})\s+\(\s*\d{4}\s*\)",
        None,
    ),
    ("S#xE#", SeasonForm::Qualified, r"\bS(\d{1,2})xe?\d+", None),
    // Roman numerals
    ("Season Roman", SeasonForm::Roman, r"\bseason[-_. ]+([IVXL]+)\b", None),
    ("S Roman", SeasonForm::Roman, r"\bS[-_. ]+((?-i:[IVXL]+))\b", None),
];

/// Parses a canonical upper-case Roman numeral up to `L`.
pub fn roman_to_int(numeral: &str) -> Option<u32> {
    fn value(c: char) -> Option<u32> {
        match c {
            'I' => Some(1),
            'V' => Some(5),
            'X' => Some(10),
            'L' => Some(50),
            _ => None,
        }
    }

    let upper = numeral.to_ascii_uppercase();
    let digits: Vec<u32> = upper.chars().map(value).collect::<Option<_>>()?;
    let mut total = 0;
    for (i, &d) in digits.iter().enumerate() {
        match digits.get(i + 1) {
            Some(&next) if next > d => total -= d as i64,
            _ => total += d as i64,
        }
    }
    let total = u32::try_from(total).ok()?;

    // Reject non-canonical spellings such as "IIII" or "VX".
    (total > 0 && int_to_roman(total) == upper).then_some(total)
}

fn int_to_roman(mut n: u32) -> String {
    const TABLE: &[(u32, &str)] = &[
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for &(value, glyph) in TABLE {
        while n >= value {
            out.push_str(glyph);
            n -= value;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities_are_ordered() {
        assert!(SeasonForm::Numbered.priority() > SeasonForm::Range.priority());
        assert!(SeasonForm::Range.priority() > SeasonForm::List.priority());
        assert!(SeasonForm::Run.priority() > SeasonForm::CompleteNumbered.priority());
        assert!(SeasonForm::Localized.priority() > SeasonForm::Phrase.priority());
        assert!(SeasonForm::Qualified.priority() > SeasonForm::Roman.priority());
        assert!(SeasonForm::Run.is_complex());
        assert!(!SeasonForm::Range.is_complex());
    }

    #[test]
    fn roman_numerals() {
        for (input, expected) in [
            ("I", Some(1)),
            ("iv", Some(4)),
            ("IX", Some(9)),
            ("XIV", Some(14)),
            ("XL", Some(40)),
            ("L", Some(50)),
            ("IIII", None),
            ("VX", None),
            ("", None),
            ("C", None),
        ] {
            assert_eq!(roman_to_int(input), expected, "failed for input: {input}");
        }
    }
}
