//! Year, website, encoder, group and content-type tables.

use super::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearForm {
    /// `2010-2011`
    Range,
    /// `(2019)`
    Parenthesized,
    /// `2019`
    Bare,
    /// `'99`
    Short,
}

pub(crate) const YEAR_ROWS: &[Row<YearForm>] = &[
    (
        "YYYY-YYYY",
        YearForm::Range,
        r"\b((?:19|20)\d{2})\s*-\s*((?:19|20)\d{2})\b",
        None,
    ),
    ("(YYYY)", YearForm::Parenthesized, r"\(\s*((?:19|20)\d{2})\s*\)", None),
    ("YYYY", YearForm::Bare, r"\b((?:19|20)\d{2})\b", None),
    ("'YY", YearForm::Short, r"['’](\d{2})\b", None),
];

/// Expands a two-digit year: below 50 is this century.
pub fn expand_short_year(yy: u32) -> u32 {
    if yy < 50 { 2000 + yy } else { 1900 + yy }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebsiteForm {
    /// Domain opening the title.
    Prefix,
    /// `(www.example.com)`
    Parenthesized,
    /// `[www.example.com]`
    Bracketed,
    /// Domain anywhere in the title.
    Anywhere,
}

/// A domain must not run on into another dotted label.
fn domain_end(haystack: &str, _start: usize, end: usize) -> bool {
    haystack[end..]
        .chars()
        .next()
        .is_none_or(|c| c != '.' && !c.is_alphanumeric())
}

pub(crate) const WEBSITE_ROWS: &[Row<WebsiteForm>] = &[
    (
        "Prefix",
        WebsiteForm::Prefix,
        r"^[\s\[(]*(?:www\.)?([a-z0-9][a-z0-9-]+\.(?:online|store|info|site|tech|club|shop|blog|com|org|net|biz|pro|xyz|fun|app|dev|edu|gov|mil|tax|ws|tv|cc|io|me|us|uk|de|fr|fi|es|it|ru|ca|au|nz|jp|cn|in|br|mx|lv|to|mu|by))\b",
        Some(domain_end),
    ),
    (
        "(domain)",
        WebsiteForm::Parenthesized,
        r"\(\s*(?:www\.)?([a-z0-9][a-z0-9-]+\.(?:online|store|info|site|tech|club|shop|blog|com|org|net|biz|pro|xyz|fun|app|dev|edu|gov|mil|tax|ws|tv|cc|io|me|us|uk|de|fr|fi|es|it|ru|ca|au|nz|jp|cn|in|br|mx|lv|to|mu|by))\s*\)",
        None,
    ),
    (
        "[domain]",
        WebsiteForm::Bracketed,
        r"\[\s*(?:www\.)?([a-z0-9][a-z0-9-]+\.(?:online|store|info|site|tech|club|shop|blog|com|org|net|biz|pro|xyz|fun|app|dev|edu|gov|mil|tax|ws|tv|cc|io|me|us|uk|de|fr|fi|es|it|ru|ca|au|nz|jp|cn|in|br|mx|lv|to|mu|by))\s*\]",
        None,
    ),
    (
        "Anywhere",
        WebsiteForm::Anywhere,
        r"\b(?:www\.)?([a-z0-9][a-z0-9-]+\.(?:online|store|info|site|tech|club|shop|blog|com|org|net|biz|pro|xyz|fun|app|dev|edu|gov|mil|tax|ws|tv|cc|io|me|us|uk|de|fr|fi|es|it|ru|ca|au|nz|jp|cn|in|br|mx|lv|to|mu|by))\b",
        Some(domain_end),
    ),
];

/// Season, episode and quality words that are never a domain label.
pub const WEBSITE_FALSE_POSITIVES: &[&str] = &[
    "season", "episode", "episodes", "complete", "full", "part", "webrip", "web-dl", "hdtv",
    "bluray", "blu-ray", "remux", "720p", "1080p", "2160p", "4k", "repack", "proper", "final",
    "extended", "director", "cut", "theatrical", "unrated", "uncut", "combined", "surround",
    "stereo", "dolby", "multi", "dual",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderForm {
    /// `...-NAME` at the end.
    TrailingDash,
    /// `[NAME]`
    Bracketed,
    /// `(NAME)`
    Parenthesized,
}

pub(crate) const ENCODER_ROWS: &[Row<EncoderForm>] = &[
    ("-NAME", EncoderForm::TrailingDash, r"-([a-z]{2,})\s*$", None),
    ("[NAME]", EncoderForm::Bracketed, r"\[([a-z0-9]{2,})\]", None),
    ("(NAME)", EncoderForm::Parenthesized, r"\(([a-z0-9]{2,})\)", None),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupForm {
    /// Leading `[Group]` of anime releases.
    AnimeSubgroup,
    /// `...-GROUP`
    TrailingDash,
    /// `...[GROUP]`
    TrailingBracket,
    /// `...(GROUP)`
    TrailingParen,
    /// Known group that breaks the trailing-dash convention.
    Exception,
}

pub(crate) const GROUP_ROWS: &[Row<GroupForm>] = &[
    ("[Subgroup]", GroupForm::AnimeSubgroup, r"^\[([^\]]+?)\][-_. ]", None),
    ("-GROUP", GroupForm::TrailingDash, r"-([a-z0-9]{2,})\s*$", None),
    ("[GROUP]", GroupForm::TrailingBracket, r"\[([a-z0-9]{2,})\]\s*$", None),
    ("(GROUP)", GroupForm::TrailingParen, r"\(([a-z0-9]{2,})\)\s*$", None),
    (
        "Exception",
        GroupForm::Exception,
        r"(?-i:\b(D-Z0N3|Fight-BB|VARYG|E\.N\.D|KRaLiMaRKo|BluDragon|DarQ|KCRT|BEN[_. ]THE[_. ]MEN|TAoE|QxR|Joy|ImE|UTR|t3nzin|Anime Time|Project Angel|Hakata Ramen|HONE|Vyndros|SEV|Garshasp|Kappa|Natty|RCVR|SAMPA|YOGI|r00t|EDGE2020)\b)",
        None,
    ),
];

/// Trailing tokens that are release metadata rather than a group or encoder.
pub const NOT_A_NAME: &[&str] = &[
    "dl", "rip", "hd", "sd", "web", "webrip", "webdl", "hdtv", "bluray", "bdrip", "dvdrip",
    "hdrip", "remux", "audio", "sub", "subs", "dub", "dubbed", "multi", "dual", "hevc", "avc",
    "x264", "x265", "h264", "h265", "aac", "ac3", "dts", "flac", "batch", "complete", "bit",
    "bits",
];

/// Rejects resolutions, years, checksums, pure numbers and metadata words.
pub fn is_release_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    let digits = lower.chars().filter(char::is_ascii_digit).count();
    let is_resolution = lower
        .strip_suffix(['p', 'i'])
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()));
    let is_year = lower.len() == 4 && digits == 4;
    let is_crc = lower.len() == 8 && lower.chars().all(|c| c.is_ascii_hexdigit()) && digits > 0;

    !name.is_empty()
        && digits < lower.len()
        && !is_resolution
        && !is_year
        && !is_crc
        && !NOT_A_NAME.contains(&lower.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentForm {
    Movie,
    Series,
}

pub(crate) const CONTENT_ROWS: &[Row<ContentForm>] = &[
    ("movie", ContentForm::Movie, r"\bmovies?\b", None),
    ("film", ContentForm::Movie, r"\bfilm\b", None),
    ("feature", ContentForm::Movie, r"\bfeature\b", None),
    ("collection", ContentForm::Movie, r"\bcollections?\b", None),
    ("complete collection", ContentForm::Movie, r"\bcomplete[-_. ]+collections?\b", None),
    ("N movies", ContentForm::Movie, r"\b\d+[-_. ]+movies?\b", None),
    ("all movies", ContentForm::Movie, r"\ball[-_. ]+movies?\b", None),
    ("season", ContentForm::Series, r"\bseasons?\b", None),
    ("episode", ContentForm::Series, r"\bepisodes?\b", None),
    ("ep", ContentForm::Series, r"\bep\b", None),
    ("S#", ContentForm::Series, r"\bs\d+\b", None),
    ("E#", ContentForm::Series, r"\be\d+\b", None),
    ("S#E#", ContentForm::Series, r"\bs\d+e\d+\b", None),
    ("series", ContentForm::Series, r"\bseries\b", None),
    ("show", ContentForm::Series, r"\bshow\b", None),
    ("tv", ContentForm::Series, r"\btv\b", None),
    ("complete series", ContentForm::Series, r"\bcomplete[-_. ]+series\b", None),
    ("all episodes", ContentForm::Series, r"\ball[-_. ]+episodes\b", None),
];
