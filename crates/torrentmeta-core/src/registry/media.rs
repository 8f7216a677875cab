//! Resolution, codec, file and quality tables.

use super::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionForm {
    /// `1080p`
    Progressive,
    /// `1080i`
    Interlaced,
    /// `1920x1080`
    Dimensions,
    /// `4K`, `FHD`, `RawHD`: the label is the rendering.
    Named,
}

pub(crate) const RESOLUTION_ROWS: &[Row<ResolutionForm>] = &[
    ("###p", ResolutionForm::Progressive, r"\b(\d{3,4})p\b", None),
    ("###i", ResolutionForm::Interlaced, r"\b(\d{3,4})i\b", None),
    ("####x###", ResolutionForm::Dimensions, r"\b(\d{3,4})x(\d{3,4})\b", None),
    ("4K", ResolutionForm::Named, r"\b4k\b", None),
    ("SD", ResolutionForm::Named, r"\bSD\b", None),
    ("HD", ResolutionForm::Named, r"\bHD\b", None),
    ("FHD", ResolutionForm::Named, r"\bFHD\b", None),
    ("UHD", ResolutionForm::Named, r"\bUHD\b", None),
    ("QHD", ResolutionForm::Named, r"\bQHD\b", None),
    ("WQHD", ResolutionForm::Named, r"\bWQHD\b", None),
    ("RawHD", ResolutionForm::Named, r"\braw[-_. ]?hd\b", None),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCodecForm {
    /// `x264`, `x265`: renders as `x<n>`.
    Encoder,
    /// `H264`, `H.265`: renders as `H<n>`.
    Standard,
    /// Named codec; the label is the rendering.
    Named,
}

impl VideoCodecForm {
    /// Only the H.263 to H.266 family carries a numeric form.
    pub fn accepts_number(n: u32) -> bool {
        (263..=266).contains(&n)
    }
}

pub(crate) const VIDEO_CODEC_ROWS: &[Row<VideoCodecForm>] = &[
    ("x###", VideoCodecForm::Encoder, r"\bx\.?(\d{3})\b", None),
    ("H###", VideoCodecForm::Standard, r"\bh\.?(\d{3})\b", None),
    ("HEVC", VideoCodecForm::Named, r"\bhevc\b", None),
    ("AVC", VideoCodecForm::Named, r"\bavc\b", None),
    ("AV1", VideoCodecForm::Named, r"\bav1\b", None),
    ("XviD", VideoCodecForm::Named, r"\bxvid\b", None),
    ("DivX", VideoCodecForm::Named, r"\bdivx\b", None),
    ("VP9", VideoCodecForm::Named, r"\bvp9\b", None),
    ("MPEG2", VideoCodecForm::Named, r"\bmpeg[-_. ]?2\b", None),
    ("VC-1", VideoCodecForm::Named, r"\bvc[-_. ]?1\b", None),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCodecForm {
    /// Token with a numeric part; renders as the upper-cased match.
    Token,
    /// Named codec; the label is the rendering.
    Named,
    /// Bare channel layout, accepted only as a last resort.
    Channels,
}

pub(crate) const AUDIO_CODEC_ROWS: &[Row<AudioCodecForm>] = &[
    ("AAC", AudioCodecForm::Token, r"\baac(?:\d(?:\.\d)?)?\b", None),
    ("DDP", AudioCodecForm::Token, r"\bddp(?:\d(?:\.\d)?)?\b", None),
    ("AC#", AudioCodecForm::Token, r"\bac\d\b", None),
    ("DD#.#", AudioCodecForm::Token, r"\bdd\d(?:\.\d)?\b", None),
    ("EAC#", AudioCodecForm::Token, r"\beac\d(?:\.\d)?\b", None),
    ("DTS-HD", AudioCodecForm::Named, r"\bdts[-. ]?hd(?:[-. ]?ma)?\b", None),
    ("DTS-X", AudioCodecForm::Named, r"\bdts[-. ]?x\b", None),
    ("DTS", AudioCodecForm::Named, r"\bdts\b", None),
    ("TrueHD", AudioCodecForm::Named, r"\btrue[-. ]?hd\b", None),
    ("Atmos", AudioCodecForm::Named, r"\batmos\b", None),
    ("MP#", AudioCodecForm::Token, r"\bmp[23]\b", None),
    ("FLAC", AudioCodecForm::Named, r"\bflac\b", None),
    ("Opus", AudioCodecForm::Named, r"\bopus\b", None),
    ("PCM", AudioCodecForm::Named, r"\b(?:l?pcm)\b", None),
    ("Vorbis", AudioCodecForm::Named, r"\bvorbis\b", None),
    ("#.#", AudioCodecForm::Channels, r"\b[257]\.[01]\b", None),
];

/// Canonical unit of a file size row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSizeUnit {
    Kilobytes,
    Megabytes,
    Gigabytes,
    Terabytes,
}

impl FileSizeUnit {
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Kilobytes => "KB",
            Self::Megabytes => "MB",
            Self::Gigabytes => "GB",
            Self::Terabytes => "TB",
        }
    }
}

pub(crate) const FILESIZE_ROWS: &[Row<FileSizeUnit>] = &[
    ("MB", FileSizeUnit::Megabytes, r"\b(\d+(?:\.\d+)?)\s*mi?b\b", None),
    ("GB", FileSizeUnit::Gigabytes, r"\b(\d+(?:\.\d+)?)\s*gi?b\b", None),
    ("KB", FileSizeUnit::Kilobytes, r"\b(\d+(?:\.\d+)?)\s*ki?b\b", None),
    ("TB", FileSizeUnit::Terabytes, r"\b(\d+(?:\.\d+)?)\s*ti?b\b", None),
];

/// Media, subtitle and archive extensions recognised at the end of a title.
pub const FILETYPE_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "m4v", "mpg", "mpeg", "ass", "ssa", "srt", "sub", "idx", "iso", "ts",
    "m2ts", "vob", "rar", "zip", "7z",
];

pub(crate) const FILETYPE_ROWS: &[Row<()>] = &[(
    "extension",
    (),
    r"\.(mkv|mp4|avi|m4v|mpg|mpeg|ass|ssa|srt|sub|idx|iso|ts|m2ts|vob|rar|zip|7z)$",
    None,
)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityForm {
    /// Release source (`WEB-DL`, `BluRay`, ...).
    Source,
    /// Edition or fix-up marker (`Repack`, `Extended`, ...).
    Modifier,
    /// Release version `vN`.
    Version,
}

fn version_tag(haystack: &str, start: usize, _end: usize) -> bool {
    haystack[..start]
        .chars()
        .next_back()
        .is_none_or(|c| !c.is_alphabetic())
}

pub(crate) const QUALITY_ROWS: &[Row<QualityForm>] = &[
    // Sources
    ("WEB-DL", QualityForm::Source, r"\bweb[-_. ]?dl(?:rip)?\b", None),
    ("WEBRip", QualityForm::Source, r"\bweb[-_. ]?rip\b", None),
    ("HDTV", QualityForm::Source, r"\bhdtv\b", None),
    ("BluRay", QualityForm::Source, r"\bblu[-_. ]?ray\b", None),
    ("BD-Rip", QualityForm::Source, r"\bbd[-_. ]?rip\b", None),
    ("DVD-Rip", QualityForm::Source, r"\bdvd[-_. ]?rip\b", None),
    ("HD-Rip", QualityForm::Source, r"\bhd[-_. ]?rip\b", None),
    ("Telecine", QualityForm::Source, r"\btelecine\b", None),
    ("HDTS", QualityForm::Source, r"\bhd[-_. ]?ts\b", None),
    ("TS", QualityForm::Source, r"\b(?-i:TS)\b", None),
    ("TC", QualityForm::Source, r"\b(?-i:TC)\b", None),
    ("CAM", QualityForm::Source, r"\bcam(?:[-_. ]?rip)?\b", None),
    ("R5", QualityForm::Source, r"\br5\b", None),
    ("SCR", QualityForm::Source, r"\b(?:dvd)?scr(?:eener)?\b", None),
    ("DVD", QualityForm::Source, r"\bdvd\b", None),
    ("VHS", QualityForm::Source, r"\bvhs\b", None),
    ("PDTV", QualityForm::Source, r"\bpdtv\b", None),
    ("DSR", QualityForm::Source, r"\bdsr(?:ip)?\b", None),
    ("TVRip", QualityForm::Source, r"\btv[-_. ]?rip\b", None),
    ("SATRip", QualityForm::Source, r"\bsat[-_. ]?rip\b", None),
    ("DVDR", QualityForm::Source, r"\bdvd[-_. ]?r\b", None),
    ("MD", QualityForm::Source, r"\b(?-i:MD)\b", None),
    ("Remux", QualityForm::Source, r"\bremux\b", None),
    ("RawHD", QualityForm::Source, r"\braw[-_. ]?hd\b", None),
    ("DLMux", QualityForm::Source, r"\bdl[-_. ]?mux\b", None),
    // Modifiers
    ("Proper", QualityForm::Modifier, r"\bproper\b", None),
    ("Repack", QualityForm::Modifier, r"\brepack\b", None),
    ("Real", QualityForm::Modifier, r"\b(?-i:REAL)\b", None),
    ("Final", QualityForm::Modifier, r"\b(?-i:FINAL)\b", None),
    ("Director's Cut", QualityForm::Modifier, r"\bdirector[-_. '’]?s[-_. ]+cut\b", None),
    ("Extended", QualityForm::Modifier, r"\bextended\b", None),
    ("Uncut", QualityForm::Modifier, r"\buncut\b", None),
    ("Unrated", QualityForm::Modifier, r"\bunrated\b", None),
    ("Theatrical", QualityForm::Modifier, r"\btheatrical\b", None),
    ("Ultimate", QualityForm::Modifier, r"\bultimate\b", None),
    (
        "Collector's Edition",
        QualityForm::Modifier,
        r"\bcollector[-_. '’]?s[-_. ]+edition\b",
        None,
    ),
    ("Special Edition", QualityForm::Modifier, r"\bspecial[-_. ]+edition\b", None),
    ("Limited", QualityForm::Modifier, r"\blimited\b", None),
    ("IMAX", QualityForm::Modifier, r"\bimax\b", None),
    ("3D", QualityForm::Modifier, r"\b3d\b", None),
    ("4K Remaster", QualityForm::Modifier, r"\b4k[-_. ]+remaster(?:ed)?\b", None),
    ("Remastered", QualityForm::Modifier, r"\bremastered\b", None),
    ("Restored", QualityForm::Modifier, r"\brestored\b", None),
    ("Criterion Collection", QualityForm::Modifier, r"\bcriterion[-_. ]+collection\b", None),
    ("Criterion", QualityForm::Modifier, r"\bcriterion\b", None),
    ("Anniversary Edition", QualityForm::Modifier, r"\banniversary[-_. ]+edition\b", None),
    // Version
    ("vN", QualityForm::Version, r"v(\d{1,2})\b", Some(version_tag)),
];
