use super::Row;
use super::guards::absolute_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimeForm {
    /// Standalone `137`.
    Bare,
    /// `[137]`, `(137)`
    Bracketed,
    /// `Episode 137`, `abs 137`
    Prefixed,
    /// `137v2`
    Versioned,
}

pub(crate) const ANIME_ROWS: &[Row<AnimeForm>] = &[
    ("###", AnimeForm::Bare, r"(\d{2,4})", Some(absolute_number)),
    ("[###]", AnimeForm::Bracketed, r"[\[(](\d{2,4})[\])]", None),
    (
        "abs ###",
        AnimeForm::Prefixed,
        r"\b(?:episode|ep|abs|absolute)[-_. ]+?(\d{2,4})\b",
        None,
    ),
    ("###v#", AnimeForm::Versioned, r"\b(\d{2,3})v\d\b", None),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialForm {
    /// Scene `.S01E00.`, matched on the raw title.
    SceneZero,
    /// Scene `.S01.Special.`, matched on the raw title.
    SceneSpecial,
    /// `Special`, `OVA`, `Bonus`: matched on the normalized title.
    Keyword,
}

impl SpecialForm {
    /// Scene forms rely on the dots that normalization removes.
    pub const fn on_raw_title(self) -> bool {
        matches!(self, Self::SceneZero | Self::SceneSpecial)
    }
}

/// `special` that is part of `Special Edition` names a cut, not an episode.
fn not_special_edition(haystack: &str, _start: usize, end: usize) -> bool {
    let rest = haystack[end..].trim_start_matches([' ', '-', '_', '.']);
    !rest
        .get(..7)
        .is_some_and(|word| word.eq_ignore_ascii_case("edition"))
}

pub(crate) const SPECIAL_ROWS: &[Row<SpecialForm>] = &[
    ("S##E00", SpecialForm::SceneZero, r"\.S\d+E00\.", None),
    ("S##.Special", SpecialForm::SceneSpecial, r"\.S\d+\.Special\.", None),
    (
        "Special",
        SpecialForm::Keyword,
        r"\b(?:special|ova|ovd|oav|bonus|extra|speciale)\b",
        Some(not_special_edition),
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::compile;

    #[test]
    fn special_edition_is_not_a_special() {
        let entries = compile(SPECIAL_ROWS).unwrap();
        let keyword = &entries[2].matcher;
        assert!(keyword.is_match("Show OVA 1080p"));
        assert!(keyword.is_match("Show Special 720p"));
        assert!(!keyword.is_match("Movie 2001 Special Edition 1080p"));
    }

    #[test]
    fn scene_forms_need_raw_dots() {
        let entries = compile(SPECIAL_ROWS).unwrap();
        assert!(entries[0].matcher.is_match("Show.S02E00.720p"));
        assert!(!entries[0].matcher.is_match("Show S02E00 720p"));
        assert!(SpecialForm::SceneSpecial.on_raw_title());
        assert!(!SpecialForm::Keyword.on_raw_title());
    }

    #[test]
    fn absolute_numbers_skip_resolutions() {
        let entries = compile(ANIME_ROWS).unwrap();
        let found: Vec<_> = entries[0]
            .matcher
            .captures_iter("Show 137 1080p")
            .map(|c| c[1].to_string())
            .collect();
        assert_eq!(found, vec!["137"]);
    }
}
