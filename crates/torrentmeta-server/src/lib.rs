//! torrentmeta-server: a thin HTTP boundary around the release title parser.
//!
//! Every route shares one [`TorrentParser`] through axum state. Parsing never
//! touches the network or disk, so handlers run it inline.

pub mod config;
pub mod cors;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;

use std::sync::Arc;

use torrentmeta_core::TorrentParser;

pub use config::ServerArgs;
pub use cors::CorsPolicy;
pub use error::ApiError;
pub use router::build_router;

/// Default upper bound on titles accepted by one batch request.
pub const DEFAULT_MAX_BATCH: usize = 1000;

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub parser: Arc<TorrentParser>,
    /// Expected `x-api-key` value. `None` leaves the API open.
    pub api_key: Option<Arc<str>>,
    pub max_batch: usize,
    pub cors: CorsPolicy,
}

impl AppState {
    pub fn new(parser: TorrentParser) -> Self {
        Self {
            parser: Arc::new(parser),
            api_key: None,
            max_batch: DEFAULT_MAX_BATCH,
            cors: CorsPolicy::Disabled,
        }
    }

    /// Requires callers to present `key`. Blank keys leave the API open.
    pub fn with_api_key(mut self, key: Option<&str>) -> Self {
        self.api_key = key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(Arc::from);
        self
    }

    pub fn with_max_batch(mut self, max_batch: usize) -> Self {
        self.max_batch = max_batch.max(1);
        self
    }

    pub fn with_cors(mut self, cors: CorsPolicy) -> Self {
        self.cors = cors;
        self
    }
}
