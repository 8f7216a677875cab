//! # torrentmeta Core
//!
//! The heart of the torrentmeta engine. Extracts season, episode, codecs,
//! language, group and the other release fields from free-form torrent
//! titles with rule tables and priority-based disambiguation.
//!
//! ## Quick Start
//!
//! ```rust
//! use torrentmeta_core::TorrentParser;
//!
//! let parser = TorrentParser::default().unwrap();
//! let release = parser
//!     .parse("Suits (Season 07 Episode 05)(www.kinokopilka.pro)")
//!     .unwrap();
//!
//! assert_eq!(release.season.as_deref(), Some("S07"));
//! assert_eq!(release.episode.as_deref(), Some("E05"));
//! assert_eq!(release.website.as_deref(), Some("kinokopilka.pro"));
//! ```
pub mod error;
pub mod parser;
pub mod registry;
pub mod types;

// Re-export primary API
pub use error::{InvalidReason, Result, TorrentMetaError};
pub use parser::{
    ExclusionSet, ParserConfig, TitleNormalizer, TorrentParser, normalize, parse, parse_many,
    resolve,
};
pub use registry::PatternRegistry;
pub use types::{AnimeInfo, ContentType, EpisodeValue, ParseOutcome, ParsedRelease, SeasonValue};
