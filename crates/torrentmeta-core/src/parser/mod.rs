pub mod candidate;
pub mod episode;
pub mod exclusion;
pub mod extract;
pub mod normalize;
pub mod resolve;
pub mod season;
pub mod unified;

pub use candidate::{Candidate, join_values};
pub use episode::{EpisodeContext, EpisodeScan};
pub use exclusion::ExclusionSet;
pub use normalize::{TitleNormalizer, normalize};
pub use resolve::resolve;
pub use season::{scan_seasons, season_numbers};
pub use unified::{ParserConfig, TorrentParser, parse, parse_many};
