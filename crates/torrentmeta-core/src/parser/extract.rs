//! Single-best-match extractors for the non-numeric fields.
//!
//! Most extractors read the normalized title. Website, file type and the
//! `'YY` year form need the dots and apostrophes of the raw title; group
//! and encoder read the raw stem so trailing `-GROUP` and `(NAME)` survive.

use std::ops::Range;

use tracing::trace;

use super::episode::EpisodeContext;
use crate::registry::language::is_language_token;
use crate::registry::media::FILETYPE_EXTENSIONS;
use crate::registry::release::{WEBSITE_FALSE_POSITIVES, expand_short_year, is_release_name};
use crate::registry::{
    AudioCodecForm, ContentForm, FileSizeUnit, LanguageForm, PatternRegistry, QualityForm,
    ResolutionForm, VideoCodecForm, YearForm,
};
use crate::types::{AnimeInfo, ContentType, ParsedRelease};

pub fn extract_resolution(registry: &PatternRegistry, normalized: &str) -> Option<String> {
    registry.resolution.iter().find_map(|entry| {
        let caps = entry.matcher.first(normalized)?;
        Some(match entry.form {
            ResolutionForm::Progressive => format!("{}p", &caps[1]),
            ResolutionForm::Interlaced => format!("{}i", &caps[1]),
            ResolutionForm::Dimensions => format!("{}x{}", &caps[1], &caps[2]),
            ResolutionForm::Named => entry.label.to_owned(),
        })
    })
}

pub fn extract_video_codec(registry: &PatternRegistry, normalized: &str) -> Option<String> {
    registry.video_codec.iter().find_map(|entry| {
        entry.matcher.captures_iter(normalized).find_map(|caps| {
            let numbered = |prefix: char| {
                let n: u32 = caps[1].parse().ok()?;
                VideoCodecForm::accepts_number(n).then(|| format!("{prefix}{n}"))
            };
            match entry.form {
                VideoCodecForm::Encoder => numbered('x'),
                VideoCodecForm::Standard => numbered('H'),
                VideoCodecForm::Named => Some(entry.label.to_owned()),
            }
        })
    })
}

pub fn extract_audio_codec(registry: &PatternRegistry, normalized: &str) -> Option<String> {
    registry.audio_codec.iter().find_map(|entry| {
        let caps = entry.matcher.first(normalized)?;
        Some(match entry.form {
            AudioCodecForm::Token => caps[0].to_uppercase(),
            AudioCodecForm::Named => entry.label.to_owned(),
            AudioCodecForm::Channels => caps[0].to_owned(),
        })
    })
}

/// Union of every language row, filtered, deduplicated case-insensitively
/// and sorted.
pub fn extract_language(registry: &PatternRegistry, normalized: &str) -> Option<String> {
    let mut found: Vec<String> = Vec::new();

    for entry in &registry.language {
        for caps in entry.matcher.captures_iter(normalized) {
            let token = match entry.form {
                LanguageForm::Multi => "Multi",
                _ => caps.get(0).map_or("", |m| m.as_str()),
            };
            if !is_language_token(token) {
                trace!(token, "rejected language token");
                continue;
            }
            if !found.iter().any(|seen| seen.eq_ignore_ascii_case(token)) {
                found.push(token.to_owned());
            }
        }
    }

    if found.is_empty() {
        return None;
    }
    found.sort_by_key(|token| token.to_lowercase());
    Some(found.join(", "))
}

/// First size hit; megabytes from 1000 up are shown in gigabytes.
pub fn extract_filesize(registry: &PatternRegistry, normalized: &str) -> Option<String> {
    registry.filesize.iter().find_map(|entry| {
        let caps = entry.matcher.first(normalized)?;
        let literal = &caps[1];
        let value: f64 = literal.parse().ok()?;
        if entry.form == FileSizeUnit::Megabytes && value >= 1000.0 {
            return Some(format!("{:.2}GB", value / 1024.0));
        }
        Some(format!("{literal}{}", entry.form.symbol()))
    })
}

pub fn extract_filetype(registry: &PatternRegistry, raw: &str) -> Option<String> {
    registry
        .filetype
        .iter()
        .find_map(|entry| entry.matcher.first(raw.trim_end()))
        .map(|caps| caps[1].to_lowercase())
}

/// Every source and modifier in registry order, plus a `vN` tag.
///
/// A hit lying inside an earlier accepted hit (`DVD` in `DVD-Rip`) is
/// skipped.
pub fn extract_quality(registry: &PatternRegistry, normalized: &str) -> Option<String> {
    let mut labels: Vec<String> = Vec::new();
    let mut claimed: Vec<Range<usize>> = Vec::new();

    for entry in &registry.quality {
        for caps in entry.matcher.captures_iter(normalized) {
            let Some(whole) = caps.get(0) else { continue };
            if claimed
                .iter()
                .any(|span| span.start <= whole.start() && whole.end() <= span.end)
            {
                continue;
            }
            let label = match entry.form {
                QualityForm::Version => match caps[1].parse::<u32>() {
                    Ok(n) => format!("v{n}"),
                    Err(_) => {
                        trace!(text = whole.as_str(), "unreadable version");
                        continue;
                    }
                },
                QualityForm::Source | QualityForm::Modifier => entry.label.to_owned(),
            };
            claimed.push(whole.range());
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
    }

    (!labels.is_empty()).then(|| labels.join(", "))
}

/// Year or year range within `1900..=latest_year`.
///
/// The `'YY` form is read from the raw title, where the apostrophe
/// survives; the other forms from the normalized title.
pub fn extract_year(
    registry: &PatternRegistry,
    raw: &str,
    normalized: &str,
    latest_year: u32,
) -> Option<String> {
    let valid = |year: u32| (1900..=latest_year).contains(&year);

    registry.year.iter().find_map(|entry| {
        let haystack = if entry.form == YearForm::Short {
            raw
        } else {
            normalized
        };
        entry.matcher.captures_iter(haystack).find_map(|caps| {
            let first: u32 = caps[1].parse().ok()?;
            match entry.form {
                YearForm::Range => {
                    let second: u32 = caps[2].parse().ok()?;
                    (valid(first) && valid(second) && first <= second)
                        .then(|| format!("{first}-{second}"))
                }
                YearForm::Parenthesized | YearForm::Bare => {
                    valid(first).then(|| first.to_string())
                }
                YearForm::Short => {
                    let year = expand_short_year(first);
                    valid(year).then(|| year.to_string())
                }
            }
        })
    })
}

/// First domain that survives the false-positive filter.
pub fn extract_website(registry: &PatternRegistry, raw: &str) -> Option<String> {
    registry.website.iter().find_map(|entry| {
        entry.matcher.captures_iter(raw).find_map(|caps| {
            let domain = caps.get(1)?.as_str();
            let prefixed = caps[0].to_ascii_lowercase().contains("www.");
            if plausible_domain(domain, prefixed) {
                Some(domain.to_lowercase())
            } else {
                trace!(domain, form = ?entry.form, "rejected website");
                None
            }
        })
    })
}

fn plausible_domain(domain: &str, prefixed: bool) -> bool {
    if domain.chars().count() < 6 {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, rest)) = labels.split_last() else {
        return false;
    };
    if rest.iter().any(|label| label.chars().count() < 3) {
        return false;
    }
    let is_word = |label: &&str| {
        let lower = label.to_ascii_lowercase();
        WEBSITE_FALSE_POSITIVES.contains(&lower.as_str())
            || FILETYPE_EXTENSIONS.contains(&lower.as_str())
    };
    if labels.iter().any(is_word) {
        return false;
    }
    prefixed || !tld.chars().all(|c| c.is_ascii_uppercase())
}

/// Raw title with surrounding whitespace and a media extension removed.
pub fn release_stem<'a>(registry: &PatternRegistry, raw: &'a str) -> &'a str {
    let trimmed = raw.trim();
    match registry.media_extension.find(trimmed) {
        Some(ext) => trimmed[..ext.start()].trim_end(),
        None => trimmed,
    }
}

pub fn extract_encoder(registry: &PatternRegistry, stem: &str) -> Option<String> {
    registry.encoder.iter().find_map(|entry| {
        entry
            .matcher
            .captures_iter(stem)
            .map(|caps| caps[1].to_owned())
            .find(|name| is_release_name(name))
    })
}

pub fn extract_group(registry: &PatternRegistry, stem: &str) -> Option<String> {
    registry.group.iter().find_map(|entry| {
        let caps = entry.matcher.first(stem)?;
        let name = caps[1].trim();
        if is_release_name(name) {
            Some(name.to_owned())
        } else {
            trace!(name, label = entry.label, "rejected group");
            None
        }
    })
}

/// Keyword vote between movie and series indicators; ties go to series.
pub fn classify_content(registry: &PatternRegistry, normalized: &str) -> ContentType {
    let (mut movie, mut series) = (0u32, 0u32);
    for entry in &registry.content {
        if entry.matcher.is_match(normalized) {
            match entry.form {
                ContentForm::Movie => movie += 1,
                ContentForm::Series => series += 1,
            }
        }
    }
    if movie > series {
        ContentType::Movie
    } else {
        ContentType::Series
    }
}

/// Absolute numbers, OVA/special keyword and batch run.
pub fn extract_anime(ctx: &EpisodeContext<'_>, date_spans: &[Range<usize>]) -> AnimeInfo {
    AnimeInfo {
        absolute_episodes: ctx
            .absolute_numbers(date_spans)
            .into_iter()
            .map(|(n, _)| n)
            .collect(),
        special: ctx.registry.anime_special.is_match(ctx.normalized),
        batch: ctx.has_batch(),
    }
}

/// Leading text of the normalized title, up to the first tagged token.
///
/// `tagged` carries extra start offsets already known to the caller
/// (season and episode candidates, air dates). A leading `[group]` and a
/// leading website are dropped.
pub fn extract_title(
    registry: &PatternRegistry,
    normalized: &str,
    tagged: impl IntoIterator<Item = usize>,
    website: Option<&str>,
) -> Option<String> {
    let mut cut = tagged
        .into_iter()
        .chain(first_tag(registry, normalized))
        .min()
        .unwrap_or(normalized.len())
        .min(normalized.len());
    while !normalized.is_char_boundary(cut) {
        cut -= 1;
    }

    let mut work = normalized[..cut].trim_start();
    if work.starts_with('[') {
        if let Some(end) = work.find(']') {
            work = work[end + 1..].trim_start();
        }
    }
    if let Some(domain) = website {
        work = strip_leading_domain(work, domain);
    }

    let cleaned = work
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| matches!(c, '-' | ' ' | '(' | ')' | '[' | ']'))
        .to_string();

    if cleaned.is_empty() { None } else { Some(cleaned) }
}

/// Earliest offset claimed by a metadata category.
fn first_tag(registry: &PatternRegistry, normalized: &str) -> Option<usize> {
    let start = |m: Option<regex::Captures<'_>>| m.and_then(|c| c.get(0)).map(|w| w.start());

    let years = registry
        .year
        .iter()
        .filter(|e| e.form != YearForm::Short)
        .map(|e| start(e.matcher.first(normalized)));
    let quality = registry
        .quality
        .iter()
        .filter(|e| e.form != QualityForm::Version)
        .map(|e| start(e.matcher.first(normalized)));
    let special = registry
        .special
        .iter()
        .filter(|e| !e.form.on_raw_title())
        .map(|e| start(e.matcher.first(normalized)));

    registry
        .resolution
        .iter()
        .map(|e| start(e.matcher.first(normalized)))
        .chain(registry.video_codec.iter().map(|e| start(e.matcher.first(normalized))))
        .chain(registry.audio_codec.iter().map(|e| start(e.matcher.first(normalized))))
        .chain(registry.filesize.iter().map(|e| start(e.matcher.first(normalized))))
        .chain(years)
        .chain(quality)
        .chain(special)
        .flatten()
        .min()
}

/// Drops `www example com` (the normalized form of a domain) from the front.
fn strip_leading_domain<'a>(text: &'a str, domain: &str) -> &'a str {
    let lower = text.to_lowercase();
    let spaced = domain.replace('.', " ");
    let skip_www = if lower.starts_with("www ") { 4 } else { 0 };
    if lower[skip_www..].starts_with(&spaced) && lower.len() == text.len() {
        text[skip_www + spaced.len()..].trim_start()
    } else {
        text
    }
}

/// Field coverage with the title counting double, capped at 1.0.
pub fn compute_confidence(release: &ParsedRelease) -> f32 {
    let mut fields_present = 0u32;
    let mut fields_total = 8u32; // season, episode, resolution, vcodec, acodec, quality, year, group

    if release.title.is_some() {
        fields_present += 2;
        fields_total += 1;
    }
    for field in [
        &release.season,
        &release.episode,
        &release.resolution,
        &release.video_codec,
        &release.audio_codec,
        &release.quality,
        &release.year,
        &release.group,
    ] {
        if field.is_some() {
            fields_present += 1;
        }
    }

    (fields_present as f32 / fields_total as f32).min(1.0)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn registry() -> Arc<PatternRegistry> {
        PatternRegistry::shared().unwrap()
    }

    #[test]
    fn test_resolution() {
        let r = registry();
        for (input, expected) in [
            ("Show 2160p AMZN", Some("2160p")),
            ("Show 1080i HDTV", Some("1080i")),
            ("Show 1920x1080 BluRay", Some("1920x1080")),
            ("Show 4K HDR", Some("4K")),
            ("Show FHD", Some("FHD")),
            ("Plain Title", None),
        ] {
            assert_eq!(extract_resolution(&r, input).as_deref(), expected, "failed for input: {input}");
        }
    }

    #[test]
    fn test_video_codec() {
        let r = registry();
        for (input, expected) in [
            ("Show x265 HEVC", Some("x265")),
            ("Show H.264 AAC", Some("H264")),
            ("Show HEVC-NTb", Some("HEVC")),
            ("Show x720 XviD", Some("XviD")),
            ("Show mpeg2", Some("MPEG2")),
            ("Plain Title", None),
        ] {
            assert_eq!(extract_video_codec(&r, input).as_deref(), expected, "failed for input: {input}");
        }
    }

    #[test]
    fn test_audio_codec() {
        let r = registry();
        for (input, expected) in [
            ("Show WEB-DL DDP5.1 HEVC", Some("DDP5.1")),
            ("Show aac2.0", Some("AAC2.0")),
            ("Show DTS-HD MA", Some("DTS-HD")),
            ("Show DTS 5.1", Some("DTS")),
            ("Show 7.1 Remux", Some("7.1")),
            ("Plain Title", None),
        ] {
            assert_eq!(extract_audio_codec(&r, input).as_deref(), expected, "failed for input: {input}");
        }
    }

    #[test]
    fn test_language_union() {
        let r = registry();
        assert_eq!(
            extract_language(&r, "Show 1080p ENG RUS french VOSTFR").as_deref(),
            Some("ENG, french, RUS, VOSTFR")
        );
        assert_eq!(extract_language(&r, "Film German DL 1080p").as_deref(), Some("German, Multi"));
        // Lower-case codes and WEB-DL do not count.
        assert_eq!(extract_language(&r, "show eng 1080p WEB-DL"), None);
        // Case-insensitive deduplication.
        assert_eq!(extract_language(&r, "Show English ENGLISH").as_deref(), Some("English"));
    }

    #[test]
    fn test_filesize() {
        let r = registry();
        for (input, expected) in [
            ("Show 700 MB", Some("700MB")),
            ("Show 1500MB", Some("1.46GB")),
            ("Show 1.4GB", Some("1.4GB")),
            ("Show 2 GiB", Some("2GB")),
            ("Show 500 KB", Some("500KB")),
            ("Show", None),
        ] {
            assert_eq!(extract_filesize(&r, input).as_deref(), expected, "failed for input: {input}");
        }
    }

    #[test]
    fn test_filetype() {
        let r = registry();
        assert_eq!(extract_filetype(&r, "Show.S01E01.720p.MKV").as_deref(), Some("mkv"));
        assert_eq!(extract_filetype(&r, "Show.S01E01.720p"), None);
    }

    #[test]
    fn test_quality() {
        let r = registry();
        for (input, expected) in [
            ("The Boys S01 COMPLETE REPACK 2160p AMZN WEB-DL DDP5.1 HEVC-NTb", "WEB-DL, Repack"),
            ("Trashopolis 11 episodes 2010-2011 SATRip [Hurtom]", "SATRip"),
            ("Show DVD-Rip", "DVD-Rip"),
            ("Show 01v2 BluRay", "BluRay, v2"),
            ("Show 05v03 WEBRip", "WEBRip, v3"),
        ] {
            assert_eq!(extract_quality(&r, input).as_deref(), Some(expected), "failed for input: {input}");
        }
        assert_eq!(extract_quality(&r, "Plain Title"), None);
    }

    #[test]
    fn test_year() {
        let r = registry();
        for (input, expected) in [
            ("Trashopolis 11 episodes 2010-2011 SATRip", Some("2010-2011")),
            ("Longmire (2012) Season 1-6", Some("2012")),
            ("Movie 1999 1080p", Some("1999")),
            ("Movie 2099 1080p", None),
            ("Range 2011-2010", Some("2011")),
        ] {
            assert_eq!(extract_year(&r, input, input, 2030).as_deref(), expected, "failed for input: {input}");
        }
        assert_eq!(
            extract_year(&r, "Summer of '69", "Summer of 69", 2030).as_deref(),
            Some("1969")
        );
    }

    #[test]
    fn test_website() {
        let r = registry();
        for (input, expected) in [
            ("Suits (Season 07 Episode 05)(www.kinokopilka.pro)", Some("kinokopilka.pro")),
            ("www.Torrenting.com - Show S01E01", Some("torrenting.com")),
            ("[rutracker.org] Show", Some("rutracker.org")),
            ("Suits.in.Love.720p", None),
            ("Show.Season.1.COM", None),
            ("Show.S01.mkv.com", None),
        ] {
            assert_eq!(extract_website(&r, input).as_deref(), expected, "failed for input: {input}");
        }
    }

    #[test]
    fn test_group_and_encoder() {
        let r = registry();
        for (raw, group, encoder) in [
            ("The.Boys.S01.COMPLETE.REPACK.2160p.AMZN.WEB-DL.DDP5.1.HEVC-NTb", Some("NTb"), Some("NTb")),
            ("Trashopolis (11 episodes) (2010-2011) SATRip [Hurtom]", Some("Hurtom"), Some("Hurtom")),
            ("[SubsPlease] One Piece - 1084 (1080p) [A1B2C3D4].mkv", Some("SubsPlease"), Some("SubsPlease")),
            ("Movie.2019.1080p.BluRay.x264-SPARKS.mkv", Some("SPARKS"), Some("SPARKS")),
            ("Movie 2019 1080p BluRay VARYG", Some("VARYG"), None),
            ("Show 720p-2019", None, None),
            ("Show 10bit 8-bit", None, None),
        ] {
            let stem = release_stem(&r, raw);
            assert_eq!(extract_group(&r, stem).as_deref(), group, "failed for input: {raw}");
            assert_eq!(extract_encoder(&r, stem).as_deref(), encoder, "failed for input: {raw}");
        }
    }

    #[test]
    fn test_release_stem() {
        let r = registry();
        assert_eq!(release_stem(&r, "  Show-GRP.mkv "), "Show-GRP");
        assert_eq!(release_stem(&r, "Show-GRP"), "Show-GRP");
    }

    #[test]
    fn test_content_vote() {
        let r = registry();
        for (input, expected) in [
            ("Marvel Movie Collection 1080p", ContentType::Movie),
            ("Show Season 1 Episode 2", ContentType::Series),
            ("Plain Title", ContentType::Series),
            ("Film Series", ContentType::Series),
        ] {
            assert_eq!(classify_content(&r, input), expected, "failed for input: {input}");
        }
    }

    #[test]
    fn test_title() {
        let r = registry();
        for (input, expected) in [
            ("Longmire (2012) Season 1-6 S01-S06 1080p", Some("Longmire")),
            ("[SubsPlease] One Piece - 1084 [1080p]", Some("One Piece - 1084")),
            ("2160p", None),
        ] {
            assert_eq!(extract_title(&r, input, [], None).as_deref(), expected, "failed for input: {input}");
        }
        assert_eq!(
            extract_title(&r, "The Boys S01 COMPLETE REPACK 2160p WEB-DL", [9], None).as_deref(),
            Some("The Boys")
        );
        assert_eq!(
            extract_title(&r, "[SubsPlease] One Piece - 1084 [1080p]", [25], None).as_deref(),
            Some("One Piece")
        );
        assert_eq!(
            extract_title(&r, "www Torrenting com Show 720p", [], Some("torrenting.com")).as_deref(),
            Some("Show")
        );
        // Offsets past the end or inside a character are floored.
        assert_eq!(extract_title(&r, "中中 Show", [1], None), None);
        assert_eq!(extract_title(&r, "中中 Show", [4], None).as_deref(), Some("中"));
        assert_eq!(extract_title(&r, "Show", [99], None).as_deref(), Some("Show"));
    }

    #[test]
    fn test_confidence() {
        let mut release = ParsedRelease::new("x", "x");
        assert_eq!(compute_confidence(&release), 0.0);
        release.title = Some("Show".into());
        release.season = Some("S01".into());
        release.episode = Some("E01".into());
        release.resolution = Some("1080p".into());
        release.video_codec = Some("x265".into());
        release.audio_codec = Some("AAC".into());
        release.quality = Some("WEB-DL".into());
        release.year = Some("2020".into());
        release.group = Some("GRP".into());
        assert_eq!(compute_confidence(&release), 1.0);
    }
}
