pub mod release;
pub mod value;

pub use release::{AnimeInfo, ContentType, ParseOutcome, ParsedRelease};
pub use value::{EpisodeValue, SeasonValue};
