use super::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageForm {
    /// ISO 639-1/639-2 code, only counted when written in upper case.
    Code,
    /// Full language name, any case.
    Name,
    /// Regional variant ("Latino", "Portuguese-BR").
    Variant,
    /// Subtitle or dub tag ("VOSTFR", "ESub", "DUBBED").
    Tag,
    /// Multi-audio marker; renders as `Multi`.
    Multi,
}

/// `DL` that belongs to `WEB-DL` is a source, not a dual-language marker.
fn not_web_dl(haystack: &str, start: usize, _end: usize) -> bool {
    let before = haystack[..start].to_ascii_lowercase();
    let before = before.trim_end_matches(['-', '.', '_', ' ']);
    !before.ends_with("web")
}

pub(crate) const LANGUAGE_ROWS: &[Row<LanguageForm>] = &[
    ("DL/ML", LanguageForm::Multi, r"\b(?:dl|ml)\b", Some(not_web_dl)),
    ("Dual Audio", LanguageForm::Multi, r"\bdual(?:[-_. ]?audio)?\b", None),
    ("Multi Audio", LanguageForm::Multi, r"\bmulti(?:[-_. ]?audio)?\b", None),
    (
        "ISO639-1",
        LanguageForm::Code,
        r"\b(?-i:EN|FR|ES|DE|IT|DA|NL|JA|IS|ZH|RU|PL|VI|SV|NO|NB|FI|TR|PT|EL|KO|HU|HE|LT|CS|AR|HI|BG|ML|UK|SK|TH|RO|LV|FA|CA|HR|SR|BS|ET|TA|ID|MK|SL|AZ|UZ|MS|UR|RM)\b",
        None,
    ),
    (
        "ISO639-2",
        LanguageForm::Code,
        r"\b(?-i:ENG|FRA|SPA|DEU|ITA|DAN|NLD|JPN|ISL|ZHO|RUS|POL|VIE|SWE|NOR|NOB|FIN|TUR|POR|ELL|KOR|HUN|HEB|LIT|CES|ARA|HIN|BUL|MAL|UKR|SLK|THA|RON|LAV|FAS|CAT|HRV|SRP|BOS|EST|TAM|TEL|KAN|IND|MKD|SLV|AZE|UZB|MSA|URD|ROH)\b",
        None,
    ),
    (
        "LanguageNames",
        LanguageForm::Name,
        r"\b(?:english|french|spanish|german|italian|danish|dutch|japanese|icelandic|chinese|russian|polish|vietnamese|swedish|norwegian|finnish|turkish|portuguese|greek|korean|hungarian|hebrew|lithuanian|czech|arabic|hindi|bulgarian|malayalam|ukrainian|slovak|thai|romanian|latvian|persian|catalan|croatian|serbian|bosnian|estonian|tamil|telugu|kannada|indonesian|macedonian|slovenian|azerbaijani|uzbek|malay|urdu|romansh|bengali|marathi)\b",
        None,
    ),
    (
        "LanguageVariants",
        LanguageForm::Variant,
        r"\b(?:flemish|brazilian|latino|portuguese[-_. ]br|spanish[-_. ]la(?:tino)?)\b",
        None,
    ),
    (
        "LanguageTags",
        LanguageForm::Tag,
        r"\b(?:vostfr|sub|esub|msubs|dubbed|dub|truefrench|vff|vfi|vfq|vf|vost|vo|ov|omu|softsubs|hardsubs|subtitled)\b",
        None,
    ),
];

/// Source, codec and edition words a language row must never report.
pub const JUNK_TERMS: &[&str] = &[
    "webrip", "web-dl", "webdl", "hdtv", "bluray", "blu-ray", "remux", "5.1", "7.1", "2.0", "dts",
    "atmos", "ddp", "aac", "ac3", "x264", "x265", "hevc", "avc", "1080p", "720p", "2160p", "4k",
    "repack", "proper", "final", "extended", "director", "cut", "theatrical", "unrated", "uncut",
    "limited",
];

/// Release groups and trackers whose names collide with language tokens.
pub const RELEASE_GROUPS: &[&str] = &[
    "tgx", "yts", "rarbg", "evo", "tigole", "qxr", "ddr", "cm", "tbs", "ntb", "tla", "fgt", "fqm",
    "trollhd", "ctrlhd", "ebp", "d-z0n3", "decibel", "hdchina", "chd", "wiki", "ngb", "hdwing",
    "hds", "hdarea", "hdbits", "beyondhd", "blutonium", "framestor", "tayto", "galaxyrg",
];

/// Rejects junk terms, release groups, digits and single characters.
pub fn is_language_token(text: &str) -> bool {
    let lower = text.to_lowercase();
    text.chars().count() >= 2
        && !text.chars().all(|c| c.is_ascii_digit())
        && !JUNK_TERMS.contains(&lower.as_str())
        && !RELEASE_GROUPS.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Matcher;

    #[test]
    fn web_dl_is_not_a_language_marker() {
        let m = Matcher::new(r"\b(?:dl|ml)\b", Some(not_web_dl)).unwrap();
        assert!(!m.is_match("Show 1080p WEB-DL"));
        assert!(m.is_match("Show German DL 1080p"));
    }

    #[test]
    fn language_token_filter() {
        for (input, expected) in [
            ("ENG", true),
            ("Latino", true),
            ("NTb", false),
            ("tgx", false),
            ("hevc", false),
            ("42", false),
            ("E", false),
        ] {
            assert_eq!(is_language_token(input), expected, "failed for input: {input}");
        }
    }
}
