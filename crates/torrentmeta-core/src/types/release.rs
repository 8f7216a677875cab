use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TorrentMetaError;

/// Coarse classification of a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// A feature film or collection of films.
    Movie,
    /// A television or web series (the default).
    #[default]
    Series,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => f.write_str("movie"),
            Self::Series => f.write_str("series"),
        }
    }
}

/// Anime-specific numbering signals.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnimeInfo {
    /// Absolute episode numbers, in order of appearance.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub absolute_episodes: Vec<u32>,

    /// OVA / special / bonus marker present.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub special: bool,

    /// Batch release ("01-12", "01~12").
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub batch: bool,
}

impl AnimeInfo {
    /// Returns `true` when no anime signal was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.absolute_episodes.is_empty() && !self.special && !self.batch
    }
}

/// The primary output of the torrentmeta engine.
///
/// Every field except the titles and content type is optional and left out
/// of the serialized record when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRelease {
    /// Input exactly as received.
    pub original_title: String,

    /// Separator-normalized title with metadata tokens kept intact.
    pub normalized_title: String,

    /// Movie or series.
    #[serde(default)]
    pub content_type: ContentType,

    /// Leading text before the first recognized metadata token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Season: "S07", "S01-S06" or a complete-season phrase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,

    /// Episode: "E05", "E01-E12", "E1-E11", "Special" or a phrase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<String>,

    /// Daily-show air date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_codec: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_codec: Option<String>,

    /// Comma-joined, sorted language and subtitle tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesize: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filetype: Option<String>,

    /// Comma-joined source and edition tags in registry order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,

    /// A single year or a `YYYY-YYYY` range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoder: Option<String>,

    /// Release group (e.g., "NTb", "SubsPlease").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anime: Option<AnimeInfo>,

    /// Field coverage score in `[0.0, 1.0]`.
    #[serde(default)]
    pub confidence: f32,
}

impl ParsedRelease {
    /// Creates an empty record for the given input.
    #[must_use]
    pub fn new(original_title: impl Into<String>, normalized_title: impl Into<String>) -> Self {
        Self {
            original_title: original_title.into(),
            normalized_title: normalized_title.into(),
            content_type: ContentType::Series,
            title: None,
            season: None,
            episode: None,
            air_date: None,
            resolution: None,
            video_codec: None,
            audio_codec: None,
            language: None,
            filesize: None,
            filetype: None,
            quality: None,
            year: None,
            website: None,
            encoder: None,
            group: None,
            anime: None,
            confidence: 0.0,
        }
    }

    /// Returns `true` if any metadata beyond the titles was extracted.
    #[must_use]
    pub fn has_metadata(&self) -> bool {
        self.season.is_some()
            || self.episode.is_some()
            || self.resolution.is_some()
            || self.video_codec.is_some()
            || self.audio_codec.is_some()
            || self.quality.is_some()
            || self.year.is_some()
            || self.group.is_some()
    }
}

impl fmt::Display for ParsedRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParsedRelease({}", self.content_type)?;
        if let Some(ref title) = self.title {
            write!(f, ", title={title:?}")?;
        }
        if let Some(ref season) = self.season {
            write!(f, ", season={season}")?;
        }
        if let Some(ref episode) = self.episode {
            write!(f, ", episode={episode}")?;
        }
        if let Some(ref res) = self.resolution {
            write!(f, ", res={res}")?;
        }
        write!(f, ", conf={:.2})", self.confidence)
    }
}

/// Boundary shape of a parse: a record, or the invalid-title marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParseOutcome {
    Parsed(ParsedRelease),
    Invalid { error: String },
}

impl ParseOutcome {
    /// Returns the record, if the title was parsed.
    pub fn parsed(&self) -> Option<&ParsedRelease> {
        match self {
            Self::Parsed(release) => Some(release),
            Self::Invalid { .. } => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }
}

impl From<Result<ParsedRelease, TorrentMetaError>> for ParseOutcome {
    fn from(result: Result<ParsedRelease, TorrentMetaError>) -> Self {
        match result {
            Ok(release) => Self::Parsed(release),
            Err(err) => Self::Invalid {
                error: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidReason;

    #[test]
    fn new_release_is_empty() {
        let release = ParsedRelease::new("Show.S01", "Show S01");
        assert_eq!(release.original_title, "Show.S01");
        assert_eq!(release.content_type, ContentType::Series);
        assert!(!release.has_metadata());
        assert_eq!(release.confidence, 0.0);
    }

    #[test]
    fn empty_fields_are_skipped_in_json() {
        let mut release = ParsedRelease::new("Show.S01.720p", "Show S01 720p");
        release.season = Some("S01".into());
        release.resolution = Some("720p".into());

        let value = serde_json::to_value(&release).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["content_type"], "series");
        assert_eq!(obj["season"], "S01");
        assert!(!obj.contains_key("episode"));
        assert!(!obj.contains_key("anime"));
        assert!(release.has_metadata());
    }

    #[test]
    fn anime_info_skips_false_flags() {
        let info = AnimeInfo {
            absolute_episodes: vec![1084],
            special: false,
            batch: false,
        };
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(json, r#"{"absolute_episodes":[1084]}"#);
        assert!(AnimeInfo::default().is_empty());
    }

    #[test]
    fn invalid_outcome_shape() {
        let outcome = ParseOutcome::from(Err(TorrentMetaError::InvalidTitle {
            input: "123".into(),
            reason: InvalidReason::HashSignature,
        }));
        assert!(outcome.is_invalid());
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"error":"Invalid title (likely hashed release)"}"#
        );
    }

    #[test]
    fn outcome_deserializes_both_shapes() {
        let parsed: ParseOutcome = serde_json::from_str(
            r#"{"original_title":"A.S01","normalized_title":"A S01","content_type":"series","season":"S01","confidence":0.5}"#,
        )
        .unwrap();
        assert_eq!(parsed.parsed().and_then(|r| r.season.as_deref()), Some("S01"));

        let invalid: ParseOutcome = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
        assert!(invalid.is_invalid());
    }

    #[test]
    fn release_display() {
        let mut release = ParsedRelease::new("x", "x");
        release.title = Some("Suits".into());
        release.season = Some("S07".into());
        release.confidence = 0.5;
        let display = release.to_string();
        assert!(display.contains("Suits"));
        assert!(display.contains("S07"));
        assert!(display.contains("0.50"));
    }
}
