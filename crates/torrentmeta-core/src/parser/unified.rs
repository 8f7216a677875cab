//! # Unified Parser Interface
//!
//! Runs the whole pipeline for one title: validation, normalization,
//! exclusion harvest, season/episode disambiguation, the auxiliary
//! extractors and final resolution.

use std::sync::Arc;

use tracing::debug;

use super::candidate::join_values;
use super::episode::EpisodeContext;
use super::exclusion::ExclusionSet;
use super::extract;
use super::normalize::TitleNormalizer;
use super::resolve::resolve;
use super::season::{scan_seasons, season_numbers};
use crate::error::{Result, TorrentMetaError};
use crate::registry::PatternRegistry;
use crate::types::{ContentType, EpisodeValue, ParseOutcome, ParsedRelease};

/// Configuration for the parser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParserConfig {
    /// Latest plausible release year; later years are ignored.
    pub latest_year: u32,
    /// Keep season and episode on releases classified as movies.
    pub movie_episodes: bool,
    /// Populate [`ParsedRelease::anime`].
    pub anime_info: bool,
    /// Below this confidence a record is flagged for downstream cleanup.
    pub confidence_threshold: f32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            latest_year: Self::DEFAULT_LATEST_YEAR,
            movie_episodes: false,
            anime_info: true,
            confidence_threshold: 0.6,
        }
    }
}

impl ParserConfig {
    pub const DEFAULT_LATEST_YEAR: u32 = 2030;

    /// Create a new parser configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the latest accepted year (clamped to 1900..=9999).
    pub fn with_latest_year(mut self, year: u32) -> Self {
        self.latest_year = year.clamp(1900, 9999);
        self
    }

    /// Keep or suppress season/episode on movies.
    pub fn with_movie_episodes(mut self, keep: bool) -> Self {
        self.movie_episodes = keep;
        self
    }

    /// Enable or disable anime info.
    pub fn with_anime_info(mut self, enabled: bool) -> Self {
        self.anime_info = enabled;
        self
    }

    /// Set the low-confidence threshold.
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold.clamp(0.0, 1.0);
        self
    }
}

/// Release-title parser over shared, read-only pattern tables.
#[derive(Debug, Clone)]
pub struct TorrentParser {
    config: ParserConfig,
    registry: Arc<PatternRegistry>,
    normalizer: Arc<TitleNormalizer>,
}

impl TorrentParser {
    /// Create a new parser with the given configuration and the
    /// process-wide tables.
    ///
    /// # Errors
    ///
    /// Returns `TorrentMetaError::Regex` if the tables fail to compile.
    pub fn new(config: ParserConfig) -> Result<Self> {
        Ok(Self::with_parts(
            config,
            PatternRegistry::shared()?,
            TitleNormalizer::shared()?,
        ))
    }

    /// Create a parser over explicitly provided tables.
    pub fn with_parts(
        config: ParserConfig,
        registry: Arc<PatternRegistry>,
        normalizer: Arc<TitleNormalizer>,
    ) -> Self {
        Self {
            config,
            registry,
            normalizer,
        }
    }

    /// Create a new parser with default configuration.
    ///
    /// # Errors
    ///
    /// Returns `TorrentMetaError::Regex` if the tables fail to compile.
    #[allow(clippy::should_implement_trait)]
    pub fn default() -> Result<Self> {
        Self::new(ParserConfig::default())
    }

    /// Parse a release title.
    ///
    /// # Errors
    ///
    /// Returns `TorrentMetaError::InvalidTitle` for hash-named, spam or
    /// empty titles.
    ///
    /// # Examples
    /// ```
    /// use torrentmeta_core::TorrentParser;
    ///
    /// let parser = TorrentParser::default().unwrap();
    /// let release = parser
    ///     .parse("The.Boys.S01.COMPLETE.REPACK.2160p.AMZN.WEB-DL.DDP5.1.HEVC-NTb")
    ///     .unwrap();
    ///
    /// assert_eq!(release.season.as_deref(), Some("S01"));
    /// assert_eq!(release.resolution.as_deref(), Some("2160p"));
    /// assert_eq!(release.group.as_deref(), Some("NTb"));
    /// ```
    pub fn parse(&self, raw: &str) -> Result<ParsedRelease> {
        if let Err(reason) = self.normalizer.validate(raw) {
            debug!(input = raw, %reason, "rejected title");
            return Err(TorrentMetaError::InvalidTitle {
                input: raw.to_owned(),
                reason,
            });
        }

        let registry = self.registry.as_ref();
        let normalized = self.normalizer.normalize(raw);
        let exclusions = ExclusionSet::harvest(registry, &normalized);

        let seasons = scan_seasons(registry, &normalized, &exclusions);
        let claimed = season_numbers(&seasons);
        let ctx = EpisodeContext {
            registry,
            raw,
            normalized: &normalized,
            exclusions: &exclusions,
            season_numbers: &claimed,
            latest_year: self.config.latest_year,
        };
        let episodes = ctx.scan();

        let mut release = ParsedRelease::new(raw, normalized.as_str());
        release.season = join_values(&seasons).and_then(|joined| resolve(&joined));
        release.episode = match episodes.candidates.first().map(|c| c.value) {
            Some(EpisodeValue::Special | EpisodeValue::Phrase(_)) => {
                join_values(&episodes.candidates)
            }
            _ => join_values(&episodes.candidates).and_then(|joined| resolve(&joined)),
        };
        release.air_date = episodes.air_date.clone();

        release.resolution = extract::extract_resolution(registry, &normalized);
        release.video_codec = extract::extract_video_codec(registry, &normalized);
        release.audio_codec = extract::extract_audio_codec(registry, &normalized);
        release.language = extract::extract_language(registry, &normalized);
        release.filesize = extract::extract_filesize(registry, &normalized);
        release.filetype = extract::extract_filetype(registry, raw);
        release.quality = extract::extract_quality(registry, &normalized);
        release.year = extract::extract_year(registry, raw, &normalized, self.config.latest_year);
        release.website = extract::extract_website(registry, raw);

        let stem = extract::release_stem(registry, raw);
        release.encoder = extract::extract_encoder(registry, stem);
        release.group = extract::extract_group(registry, stem);

        release.content_type = extract::classify_content(registry, &normalized);
        if release.content_type == ContentType::Movie && !self.config.movie_episodes {
            release.season = None;
            release.episode = None;
        }

        if self.config.anime_info {
            let info = extract::extract_anime(&ctx, &episodes.blocked_spans());
            release.anime = (!info.is_empty()).then_some(info);
        }

        let tagged = seasons
            .iter()
            .map(|c| c.start)
            .chain(episodes.candidates.iter().map(|c| c.start))
            .chain(episodes.date_spans.iter().map(|span| span.start));
        release.title =
            extract::extract_title(registry, &normalized, tagged, release.website.as_deref());
        release.confidence = extract::compute_confidence(&release);

        debug!(
            title = ?release.title,
            season = ?release.season,
            episode = ?release.episode,
            resolution = ?release.resolution,
            group = ?release.group,
            confidence = release.confidence,
            "parsed release"
        );
        Ok(release)
    }

    /// Parse every title independently, keeping input order.
    pub fn parse_many<I, S>(&self, titles: I) -> Vec<ParseOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        titles
            .into_iter()
            .map(|title| ParseOutcome::from(self.parse(title.as_ref())))
            .collect()
    }

    /// Normalized form of a title, as the parser sees it.
    pub fn normalize(&self, raw: &str) -> String {
        self.normalizer.normalize(raw)
    }

    /// Whether a record falls below the configured confidence threshold.
    pub fn is_low_confidence(&self, release: &ParsedRelease) -> bool {
        release.confidence < self.config.confidence_threshold
    }

    /// Get the parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }
}

/// Convenience function to parse a title with default settings.
///
/// # Errors
///
/// See [`TorrentParser::parse`].
pub fn parse(raw: &str) -> Result<ParsedRelease> {
    TorrentParser::default()?.parse(raw)
}

/// Parse a batch of titles with default settings.
///
/// # Errors
///
/// Returns `TorrentMetaError::Regex` if the tables fail to compile.
pub fn parse_many<I, S>(titles: I) -> Result<Vec<ParseOutcome>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(TorrentParser::default()?.parse_many(titles))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> TorrentParser {
        TorrentParser::default().unwrap()
    }

    #[test]
    fn test_parser_creation() {
        assert!(TorrentParser::default().is_ok());
    }

    #[test]
    fn test_parser_config() {
        let config = ParserConfig::new()
            .with_latest_year(2025)
            .with_movie_episodes(true)
            .with_anime_info(false)
            .with_confidence_threshold(0.7);

        assert_eq!(config.latest_year, 2025);
        assert!(config.movie_episodes);
        assert!(!config.anime_info);
        assert_eq!(config.confidence_threshold, 0.7);
    }

    #[test]
    fn test_config_clamping() {
        let config = ParserConfig::new().with_confidence_threshold(1.5);
        assert_eq!(config.confidence_threshold, 1.0);

        let config = ParserConfig::new().with_confidence_threshold(-0.5);
        assert_eq!(config.confidence_threshold, 0.0);

        assert_eq!(ParserConfig::new().with_latest_year(42).latest_year, 1900);
        assert_eq!(ParserConfig::new().with_latest_year(123_456).latest_year, 9999);
    }

    #[test]
    fn test_parse_scene_release() {
        let release = parser()
            .parse("The.Boys.S01.COMPLETE.REPACK.2160p.AMZN.WEB-DL.DDP5.1.HEVC-NTb")
            .unwrap();

        assert_eq!(release.title.as_deref(), Some("The Boys"));
        assert_eq!(release.season.as_deref(), Some("S01"));
        assert_eq!(release.episode, None);
        assert_eq!(release.resolution.as_deref(), Some("2160p"));
        assert_eq!(release.video_codec.as_deref(), Some("HEVC"));
        assert_eq!(release.audio_codec.as_deref(), Some("DDP5.1"));
        assert_eq!(release.quality.as_deref(), Some("WEB-DL, Repack"));
        assert_eq!(release.group.as_deref(), Some("NTb"));
        assert_eq!(release.content_type, ContentType::Series);
    }

    #[test]
    fn test_parse_anime_release() {
        let release = parser()
            .parse("[SubsPlease] One Piece - 1084 (1080p) [A1B2C3D4].mkv")
            .unwrap();

        assert_eq!(release.title.as_deref(), Some("One Piece"));
        assert_eq!(release.group.as_deref(), Some("SubsPlease"));
        assert_eq!(release.episode.as_deref(), Some("E1084"));
        assert_eq!(release.resolution.as_deref(), Some("1080p"));
        assert_eq!(release.filetype.as_deref(), Some("mkv"));

        let anime = release.anime.expect("anime info");
        assert_eq!(anime.absolute_episodes, vec![1084]);
        assert!(!anime.batch);
    }

    #[test]
    fn test_anime_info_can_be_disabled() {
        let parser = TorrentParser::new(ParserConfig::new().with_anime_info(false)).unwrap();
        let release = parser.parse("[SubsPlease] One Piece - 1084 (1080p).mkv").unwrap();
        assert_eq!(release.anime, None);
        assert_eq!(release.episode.as_deref(), Some("E1084"));
    }

    #[test]
    fn test_movies_drop_season_and_episode() {
        let title = "Marvel Movie Collection S01 1080p";
        let release = parser().parse(title).unwrap();
        assert_eq!(release.content_type, ContentType::Movie);
        assert_eq!(release.season, None);

        let keep = TorrentParser::new(ParserConfig::new().with_movie_episodes(true)).unwrap();
        assert_eq!(keep.parse(title).unwrap().season.as_deref(), Some("S01"));
    }

    #[test]
    fn test_special_and_phrase_episodes() {
        for (input, expected) in [
            ("Show.S02.OVA.1080p", "Special"),
            ("Show.S01E00.Pilot.720p", "Special"),
            ("Show.Season.Finale.720p", "Season Finale"),
        ] {
            let release = parser().parse(input).unwrap();
            assert_eq!(release.episode.as_deref(), Some(expected), "failed for input: {input}");
        }
    }

    #[test]
    fn test_air_date() {
        let release = parser().parse("The.Daily.Show.2024.03.15.720p.WEB").unwrap();
        assert_eq!(release.air_date.as_deref(), Some("2024-03-15"));
        assert_eq!(release.episode, None);
        assert_eq!(release.title.as_deref(), Some("The Daily Show"));
    }

    #[test]
    fn test_non_ascii_titles_cut_on_char_boundaries() {
        for (input, title, episode) in [
            ("【【【【.S01E00.中中.01MB", None, Some("Special")),
            ("【【【【.S05E00.中中.05MB", None, Some("Special")),
            ("..........S05E00.05MB", None, Some("Special")),
            ("東京喰種.S01E00.720p", Some("東京喰種"), Some("Special")),
            ("ＳＨＯＷ.S01E00.720p", Some("ＳＨＯＷ"), Some("Special")),
            ("進撃の巨人.S02.Special.1080p", Some("進撃の巨人"), Some("Special")),
            ("进击的巨人 S03E05 1080p WEB-DL", Some("进击的巨人"), Some("E05")),
        ] {
            let release = parser().parse(input).unwrap();
            assert_eq!(release.title.as_deref(), title, "failed for input: {input}");
            assert_eq!(release.episode.as_deref(), episode, "failed for input: {input}");
        }
    }

    #[test]
    fn test_non_ascii_air_date_title() {
        let release = parser().parse("ニュース.2023.05.14.720p").unwrap();
        assert_eq!(release.air_date.as_deref(), Some("2023-05-14"));
        assert_eq!(release.title.as_deref(), Some("ニュース"));
    }

    #[test]
    fn test_part_pair_episode() {
        let release = parser().parse("Show Part 1 & 2").unwrap();
        assert_eq!(release.episode.as_deref(), Some("E01-E02"));
        assert_eq!(release.title.as_deref(), Some("Show"));
    }

    #[test]
    fn test_oversized_batch_has_no_episode() {
        let release = parser().parse("Naruto Shippuden 001-500 [720p]").unwrap();
        assert_eq!(release.episode, None);
        assert!(release
            .anime
            .as_ref()
            .is_none_or(|anime| anime.absolute_episodes.is_empty()));
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "   ", "---", "123", "a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4"] {
            let err = parser().parse(input).unwrap_err();
            assert!(err.is_invalid_title(), "failed for input: {input}");
        }
    }

    #[test]
    fn test_parse_many_keeps_order() {
        let outcomes = parser().parse_many(["Show.S01E02.720p", "123", "Movie.2019.1080p"]);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(
            outcomes[0].parsed().and_then(|r| r.episode.as_deref()),
            Some("E02")
        );
        assert!(outcomes[1].is_invalid());
        assert_eq!(
            outcomes[2].parsed().and_then(|r| r.year.as_deref()),
            Some("2019")
        );
    }

    #[test]
    fn test_low_confidence() {
        let parser = parser();
        let sparse = parser.parse("Some Home Video").unwrap();
        assert!(parser.is_low_confidence(&sparse));

        let rich = parser
            .parse("Show.Name.2019.S01E05.1080p.WEB-DL.x264.AAC-GROUP")
            .unwrap();
        assert!(!parser.is_low_confidence(&rich), "confidence {}", rich.confidence);
    }

    #[test]
    fn test_parse_convenience_functions() {
        let release = parse("Show.S03E07.720p.HDTV.x264-GRP").unwrap();
        assert_eq!(release.season.as_deref(), Some("S03"));
        assert_eq!(release.episode.as_deref(), Some("E07"));

        let outcomes = parse_many(vec![String::from("Show.S03E07")]).unwrap();
        assert_eq!(outcomes.len(), 1);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let parser = parser();
        let title = "Longmire (2012) Season 1-6 S01-S06 (1080p BluRay x265 HEVC 10bit AAC 5.1 Silence)";
        assert_eq!(parser.parse(title).unwrap(), parser.parse(title).unwrap());
    }

    #[test]
    fn test_parser_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TorrentParser>();
    }
}
