//! Command-line and environment configuration for the server binary.

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use torrentmeta_core::{ParserConfig, TorrentParser};

use crate::{AppState, CorsPolicy, DEFAULT_MAX_BATCH};

/// Server arguments. Every flag falls back to a `TORRENTMETA_*` variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "torrentmeta-server")]
#[command(about = "Serve release title parsing over HTTP")]
#[command(version)]
pub struct ServerArgs {
    /// Address to listen on
    #[arg(short, long, env = "TORRENTMETA_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Value the `x-api-key` header must carry
    #[arg(long, env = "TORRENTMETA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Maximum number of titles per batch request
    #[arg(long, env = "TORRENTMETA_MAX_BATCH", default_value_t = DEFAULT_MAX_BATCH)]
    pub max_batch: usize,

    /// Origins allowed to call the API from a browser; `*` allows any,
    /// an empty value disables CORS
    #[arg(long, env = "TORRENTMETA_CORS_ORIGINS", value_delimiter = ',', default_value = "*")]
    pub cors_origins: Vec<String>,

    /// Latest year accepted as a release year
    #[arg(long, env = "TORRENTMETA_LATEST_YEAR", default_value_t = ParserConfig::DEFAULT_LATEST_YEAR)]
    pub latest_year: u32,
}

impl ServerArgs {
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::new().with_latest_year(self.latest_year)
    }

    /// Builds the shared handler state from these arguments.
    pub fn state(&self) -> anyhow::Result<AppState> {
        let parser =
            TorrentParser::new(self.parser_config()).context("failed to build pattern registries")?;
        let cors = CorsPolicy::from_origins(&self.cors_origins[..]).context("invalid CORS origin")?;
        Ok(AppState::new(parser)
            .with_api_key(self.api_key.as_deref())
            .with_max_batch(self.max_batch)
            .with_cors(cors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = ServerArgs::try_parse_from(["torrentmeta-server"]).unwrap();
        assert_eq!(args.bind, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(args.max_batch, DEFAULT_MAX_BATCH);
        assert_eq!(args.cors_origins, vec!["*".to_string()]);
        assert_eq!(args.state().unwrap().cors, CorsPolicy::AnyOrigin);
    }

    #[test]
    fn flags_map_onto_state() {
        let args = ServerArgs::try_parse_from([
            "torrentmeta-server",
            "--bind",
            "0.0.0.0:9000",
            "--api-key",
            "secret",
            "--max-batch",
            "0",
            "--latest-year",
            "2040",
        ])
        .unwrap();

        assert_eq!(args.parser_config().latest_year, 2040);
        let state = args.state().unwrap();
        assert_eq!(state.api_key.as_deref(), Some("secret"));
        assert_eq!(state.max_batch, 1);
    }

    #[test]
    fn cors_origins_are_comma_separated() {
        let args = ServerArgs::try_parse_from([
            "torrentmeta-server",
            "--cors-origins",
            "http://a.test,http://b.test",
        ])
        .unwrap();
        assert!(matches!(args.state().unwrap().cors, CorsPolicy::Origins(ref o) if o.len() == 2));
    }

    #[test]
    fn blank_api_key_is_ignored() {
        let args =
            ServerArgs::try_parse_from(["torrentmeta-server", "--api-key", "  "]).unwrap();
        assert!(args.state().unwrap().api_key.is_none());
    }
}
