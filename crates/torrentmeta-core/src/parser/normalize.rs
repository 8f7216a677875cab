//! # Title Normalizer
//!
//! Turns a raw release name into a single-spaced string in which every
//! separator has become a space, except inside tokens whose punctuation
//! carries meaning (`WEB-DL`, `5.1`, `H.265`, `[Group]`, `(2019)`, ...).
//!
//! Those tokens are swapped for one-character placeholders before the
//! punctuation sweep and put back afterwards.

use std::sync::{Arc, OnceLock};

use regex::{Regex, RegexBuilder};

use crate::error::{InvalidReason, Result};

/// Hash-named and placeholder release signatures, checked after a short
/// trailing extension has been removed.
const REJECT_PATTERNS: &[&str] = &[
    r"^[0-9a-z]{32}",
    r"^[a-z0-9]{24}$",
    r"^[a-z]{11}\d{3}$",
    r"^[a-z]{12}\d{3}$",
    r"^Backup_\d{5,}S\d{2}-\d{2}$",
    r"^123$",
    r"^abc$",
    r"^abc[-_. ]xyz",
    r"^b00bs$",
    r"^\d{6}_\d{2}$",
    r"^[0-9a-z]{30}",
    r"^[0-9a-z]{26}",
    r"^[0-9a-z]{39}",
    r"^[0-9a-z]{24}",
    r"^Season[ ._-]*\d+$",
    r"^Specials$",
];

/// Structural rewrites for layouts the registries cannot read directly.
/// Each is applied at most once, in order.
const REWRITES: &[(&str, &str)] = &[
    // Korean broadcast: ".E12.230401.Title-NEXT"
    (r"\.E(\d{2,4})\.\d{6}\.(.*-NEXT)$", ".S01E${1}.${2}"),
    // Chinese dual-title header: "[Group][English Title 中文][12]"
    (
        r"^\[(?P<subgroup>[^\]]+?)(?:[\x{4E00}-\x{9FCC}]+)?\]\[(?P<title>[^\]]+?)\s[\x{4E00}-\x{9FCC}][^\]]*?\]\[(?:[\x{4E00}-\x{9FCC}]+?)?(?P<episode>\d{1,4})(?:[\x{4E00}-\x{9FCC}]+?)?\]",
        "[${subgroup}] ${title} - ${episode} - ",
    ),
    // LoliHouse-style header: "[LoliHouse] Title - 05 [" or "[...][第05话]["
    (
        r"^\[(?P<subgroup>[^\]]*?(?:LoliHouse|ZERO|Lilith-Raws|Skymoon-Raws|orion origin)[^\]]*?)\]\s*(?P<title>[^\[\]]+?)(?: - (?P<dashed>[0-9-]+)\s*|\[第?(?P<episode>[0-9]+(?:-[0-9]+)?)话?(?:END|完)?\])\[",
        "[${subgroup}][${title}][${episode}${dashed}][",
    ),
    // Chinese subgroup chain: "[Group][中文组][Title][junk][05]"
    (
        r"^\[(?P<subgroup>[^\]]+)\](?:\[[^\]]*?[\x{4E00}-\x{9FCC}][^\]]*\])+\[(?P<title>[^\]]+?)\](?:\[[^\]]+\])*\[(?P<episode>[0-9]+(?:-[0-9]+)?)(?: END| Fin)?\]",
        "[${subgroup}] ${title} - ${episode} ",
    ),
    // Spanish: "Title [HDTV](2019/S01E05...)"
    (
        r"^(?P<title>.+?)[ ._-]\((?:[^(]*\()?(?P<year>\d{4})/(?P<info>S[^/]+)",
        "${title} (${year}) - ${info} ",
    ),
];

/// Tokens whose internal punctuation survives normalization, in scan order.
const PRESERVE_PATTERNS: &[&str] = &[
    // File sizes
    r"\b\d+(?:\.\d+)?[GMKT]i?B\b",
    // Channel layouts and other decimals
    r"\b\d+\.\d+\b",
    // Sources
    r"\bweb[-.]dl\b",
    r"\bweb[-.]rip\b",
    r"\bhd[-.]rip\b",
    r"\bbd[-.]rip\b",
    r"\bdvd[-.]rip\b",
    r"\bsat[-.]rip\b",
    r"\bblu[-.]ray\b",
    r"\bhdtv\b",
    r"\btelecine\b",
    // Codecs
    r"\bddp\d+(?:\.\d+)?\b",
    r"\baac\d*(?:\.\d+)?\b",
    r"\beac\d+(?:\.\d+)?\b",
    r"\bac\d+(?:\.\d+)?\b",
    r"\bdd\d+(?:\.\d+)?\b",
    r"\bdts[-.]hd(?:[-.]ma)?\b",
    r"\btrue[-.]hd\b",
    r"\b[xh]\.?\d{3}\b",
    r"\b(?:hevc|avc|av1|xvid|divx)\b",
    // Resolutions
    r"\b\d{3,4}[pi]\b",
    r"\b\d{3,4}x\d{3,4}\b",
    // Brackets and parenthesized years
    r"\[[^\]]+\]",
    r"\(\s*(?:19|20)\d{2}\s*\)",
    // Season lists, season and episode markers
    r"\bseasons?[-_. ]+\d{1,2}(?:\s*[,&+]\s*\d{1,2})+\b",
    r"\bS\d{1,2}(?:\s*[,&+]\s*\d{1,2})+\b",
    r"\bS\d+E\d+\b",
    r"\bS\d+\b",
    r"\bseason\s+\d+\b",
    // Year ranges, then bare years
    r"\b(?:19|20)\d{2}-(?:19|20)\d{2}\b",
    r"\b(?:19|20)\d{2}\b",
    // Special, part and multi-language markers
    r"\b(?:special|ova|ovd|oav|bonus|extra)\b",
    r"\b(?:part|pt)\s*\d+(?:\s*&\s*\d+)?\b",
    r"\b(?:multi|dual)\b",
];

/// First code point of supplementary private use area A (plane 15).
const PLACEHOLDER_BASE: u32 = 0xF_0000;
const PLACEHOLDER_LAST: u32 = 0xF_FFFD;

fn placeholder(index: usize) -> Option<char> {
    let code = PLACEHOLDER_BASE.checked_add(u32::try_from(index).ok()?)?;
    if code > PLACEHOLDER_LAST {
        return None;
    }
    char::from_u32(code)
}

fn placeholder_index(c: char) -> Option<usize> {
    let code = u32::from(c);
    (PLACEHOLDER_BASE..=PLACEHOLDER_LAST)
        .contains(&code)
        .then(|| (code - PLACEHOLDER_BASE) as usize)
}

/// Compiled normalization tables.
#[derive(Debug)]
pub struct TitleNormalizer {
    rejects: Vec<Regex>,
    rewrites: Vec<(Regex, &'static str)>,
    preserve: Vec<Regex>,
    extension: Regex,
}

static SHARED: OnceLock<Arc<TitleNormalizer>> = OnceLock::new();

impl TitleNormalizer {
    /// Compiles the reject, rewrite and preserve tables.
    ///
    /// # Errors
    ///
    /// Returns `TorrentMetaError::Regex` if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        let build = |pattern: &str| RegexBuilder::new(pattern).case_insensitive(true).build();

        Ok(Self {
            rejects: REJECT_PATTERNS
                .iter()
                .map(|&p| build(p))
                .collect::<std::result::Result<_, _>>()?,
            rewrites: REWRITES
                .iter()
                .map(|&(p, replacement)| Ok((build(p)?, replacement)))
                .collect::<std::result::Result<_, regex::Error>>()?,
            preserve: PRESERVE_PATTERNS
                .iter()
                .map(|&p| build(p))
                .collect::<std::result::Result<_, _>>()?,
            extension: build(r"\.[a-z0-9]{2,4}$")?,
        })
    }

    /// Process-wide normalizer, compiled on first use.
    ///
    /// # Errors
    ///
    /// Returns `TorrentMetaError::Regex` if compilation fails.
    pub fn shared() -> Result<Arc<Self>> {
        if let Some(normalizer) = SHARED.get() {
            return Ok(Arc::clone(normalizer));
        }
        let built = Arc::new(Self::new()?);
        Ok(Arc::clone(SHARED.get_or_init(|| built)))
    }

    /// Checks a raw title against the degenerate-input signatures.
    ///
    /// # Errors
    ///
    /// Returns the [`InvalidReason`] of the first signature that matched.
    pub fn validate(&self, raw: &str) -> std::result::Result<(), InvalidReason> {
        let lower = raw.to_lowercase();
        if lower.contains("password") && lower.contains("yenc") {
            return Err(InvalidReason::PasswordSpam);
        }
        if !raw.chars().any(char::is_alphanumeric) {
            return Err(InvalidReason::NoAlphanumeric);
        }

        let stem = self.extension.replace(raw, "");
        if self.rejects.iter().any(|re| re.is_match(&stem)) {
            return Err(InvalidReason::HashSignature);
        }
        Ok(())
    }

    /// Normalizes a title. Titles that fail [`validate`](Self::validate)
    /// come back unchanged.
    pub fn normalize(&self, raw: &str) -> String {
        if self.validate(raw).is_err() {
            return raw.to_owned();
        }

        let rewritten = self.rewrite(raw);
        let unified = unify_glyphs(&rewritten);
        let (masked, spans) = self.mask(&unified);

        let swept: String = masked
            .chars()
            .map(|c| {
                if c.is_alphanumeric()
                    || c.is_whitespace()
                    || c == '-'
                    || placeholder_index(c).is_some()
                {
                    c
                } else {
                    ' '
                }
            })
            .collect();
        let collapsed = swept.split_whitespace().collect::<Vec<_>>().join(" ");

        let mut out = String::with_capacity(raw.len());
        restore(&collapsed, &spans, &mut out);
        out
    }

    /// Applies the structural rewrites, each at most once.
    pub fn rewrite(&self, raw: &str) -> String {
        self.rewrites
            .iter()
            .fold(raw.to_owned(), |title, (re, replacement)| {
                re.replace(&title, *replacement).into_owned()
            })
    }

    /// Replaces every preserved token with a placeholder, returning the
    /// masked text and the original token per placeholder index.
    fn mask(&self, text: &str) -> (String, Vec<String>) {
        let mut text = text.to_owned();
        let mut spans = Vec::new();

        for pattern in &self.preserve {
            let mut out = String::with_capacity(text.len());
            let mut last = 0;
            for m in pattern.find_iter(&text) {
                let Some(mark) = placeholder(spans.len()) else {
                    break;
                };
                out.push_str(&text[last..m.start()]);
                out.push(mark);
                spans.push(m.as_str().to_owned());
                last = m.end();
            }
            out.push_str(&text[last..]);
            text = out;
        }
        (text, spans)
    }
}

/// Maps dash and bracket variants to ASCII. Code points in the placeholder
/// range are blanked so they cannot be mistaken for a placeholder.
fn unify_glyphs(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '–' | '—' | '‐' | '‑' | '−' => '-',
            '【' => '[',
            '】' => ']',
            '（' => '(',
            '）' => ')',
            c if placeholder_index(c).is_some() => ' ',
            c => c,
        })
        .collect()
}

/// Expands placeholders; a preserved span may itself hold placeholders.
fn restore(text: &str, spans: &[String], out: &mut String) {
    for c in text.chars() {
        match placeholder_index(c).and_then(|i| spans.get(i)) {
            Some(span) => restore(span, spans, out),
            None => out.push(c),
        }
    }
}

/// Normalizes with the process-wide tables.
///
/// # Errors
///
/// Returns `TorrentMetaError::Regex` if the tables fail to compile.
pub fn normalize(raw: &str) -> Result<String> {
    Ok(TitleNormalizer::shared()?.normalize(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> TitleNormalizer {
        TitleNormalizer::new().unwrap()
    }

    #[test]
    fn test_normalize_scene_release() {
        let n = normalizer();
        assert_eq!(
            n.normalize("The.Boys.S01.COMPLETE.REPACK.2160p.AMZN.WEB-DL.DDP5.1.HEVC-NTb"),
            "The Boys S01 COMPLETE REPACK 2160p AMZN WEB-DL DDP5.1 HEVC-NTb"
        );
    }

    #[test]
    fn test_normalize_keeps_parenthesized_year_only() {
        let n = normalizer();
        assert_eq!(
            n.normalize(
                "Longmire (2012) Season 1-6 S01-S06 (1080p BluRay x265 HEVC 10bit AAC 5.1 Silence)"
            ),
            "Longmire (2012) Season 1-6 S01-S06 1080p BluRay x265 HEVC 10bit AAC 5.1 Silence"
        );
        assert_eq!(
            n.normalize("Trashopolis (11 episodes) (2010-2011) SATRip [Hurtom]"),
            "Trashopolis 11 episodes 2010-2011 SATRip [Hurtom]"
        );
    }

    #[test]
    fn test_normalize_preserved_tokens() {
        let n = normalizer();
        for (input, token) in [
            ("Show.S02.1080p.WEB.H.264-GRP", "H.264"),
            ("Show_[SubsPlease]_01.mkv", "[SubsPlease]"),
            ("Movie.2019.1.4GB.mkv", "1.4GB"),
            ("Movie.2019.DTS-HD.MA.5.1", "DTS-HD.MA"),
            ("Movie 2019 AAC2.0 x264", "AAC2.0"),
            ("Show.Season 1, 2 & 3.720p", "Season 1, 2 & 3"),
            ("Show.S1,2,3.720p", "S1,2,3"),
            ("Show Part 1 & 2", "Part 1 & 2"),
        ] {
            let out = n.normalize(input);
            assert!(out.contains(token), "failed for input: {input} -> {out}");
        }
    }

    #[test]
    fn test_normalize_collapses_separators() {
        let n = normalizer();
        assert_eq!(n.normalize("A__B...C  -  D"), "A B C - D");
        assert_eq!(n.normalize("Show – 05 【1080p】"), "Show - 05 [1080p]");
    }

    #[test]
    fn test_nested_placeholders_restore() {
        let n = normalizer();
        // "1080p" is masked before the bracket span that contains it.
        assert_eq!(
            n.normalize("[Group] Show - 01 [1080p.WEB-DL]"),
            "[Group] Show - 01 [1080p.WEB-DL]"
        );
    }

    #[test]
    fn test_private_use_input_is_blanked() {
        let n = normalizer();
        let input = format!("Show{}S01", char::from_u32(0xF_0000).unwrap());
        assert_eq!(n.normalize(&input), "Show S01");
    }

    #[test]
    fn test_validate_rejects_hashes() {
        let n = normalizer();
        for (input, expected) in [
            ("123", Some(InvalidReason::HashSignature)),
            ("a1b2c3d4e5f6a7b8c9d0e1f2", Some(InvalidReason::HashSignature)),
            ("0123456789abcdef0123456789abcdef.mkv", Some(InvalidReason::HashSignature)),
            ("Season 3", Some(InvalidReason::HashSignature)),
            ("", Some(InvalidReason::NoAlphanumeric)),
            ("--- ...", Some(InvalidReason::NoAlphanumeric)),
            ("Show password inside yEnc", Some(InvalidReason::PasswordSpam)),
            ("The.Boys.S01.1080p", None),
        ] {
            assert_eq!(n.validate(input).err(), expected, "failed for input: {input}");
        }
    }

    #[test]
    fn test_invalid_title_is_identity() {
        let n = normalizer();
        assert_eq!(n.normalize("123"), "123");
    }

    #[test]
    fn test_rewrite_korean_broadcast() {
        let n = normalizer();
        assert_eq!(
            n.rewrite("Show.E12.230401.720p-NEXT"),
            "Show.S01E12.720p-NEXT"
        );
    }

    #[test]
    fn test_rewrite_anime_headers() {
        let n = normalizer();
        assert_eq!(
            n.rewrite("[Sakura][Kimetsu no Yaiba 鬼灭之刃][05][1080p]"),
            "[Sakura] Kimetsu no Yaiba - 05 - [1080p]"
        );
        assert_eq!(
            n.rewrite("[LoliHouse] Oshi no Ko - 05 [WebRip 1080p]"),
            "[LoliHouse][Oshi no Ko][05][WebRip 1080p]"
        );
    }

    #[test]
    fn test_shared_normalizer() {
        let a = TitleNormalizer::shared().unwrap();
        let b = TitleNormalizer::shared().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(normalize("A.B").unwrap(), "A B");
    }
}
