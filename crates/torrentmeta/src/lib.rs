//! # torrentmeta
//!
//! Metadata extraction from torrent release titles: season, episode, year,
//! codecs, languages, release group and more.
//!
//! This crate re-exports [`torrentmeta_core`].
//!
//! ```rust
//! let release = torrentmeta::parse("Trashopolis (11 episodes) (2010-2011) SATRip [Hurtom]").unwrap();
//!
//! assert_eq!(release.episode.as_deref(), Some("E1-E11"));
//! assert_eq!(release.year.as_deref(), Some("2010-2011"));
//! ```

pub use torrentmeta_core::*;
