//! Cross-origin policy for browser clients.

use axum::http::HeaderValue;
use axum::http::header::InvalidHeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};

/// Which origins may call the API from a browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsPolicy {
    /// No CORS headers are sent.
    #[default]
    Disabled,
    /// `*`: any origin, method and header.
    AnyOrigin,
    /// Listed origins only, with credentials allowed.
    Origins(Vec<HeaderValue>),
}

impl CorsPolicy {
    /// Builds a policy from configured origins. `*` anywhere in the list
    /// opens every origin; an empty list disables CORS.
    pub fn from_origins<S: AsRef<str>>(origins: &[S]) -> Result<Self, InvalidHeaderValue> {
        let origins: Vec<&str> = origins
            .iter()
            .map(|o| o.as_ref().trim())
            .filter(|o| !o.is_empty())
            .collect();

        if origins.is_empty() {
            return Ok(Self::Disabled);
        }
        if origins.contains(&"*") {
            return Ok(Self::AnyOrigin);
        }
        origins
            .into_iter()
            .map(HeaderValue::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::Origins)
    }

    pub fn layer(&self) -> Option<CorsLayer> {
        match self {
            Self::Disabled => None,
            Self::AnyOrigin => Some(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
            Self::Origins(origins) => Some(
                CorsLayer::new()
                    .allow_origin(origins.clone())
                    .allow_methods(AllowMethods::mirror_request())
                    .allow_headers(AllowHeaders::mirror_request())
                    .allow_credentials(true),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_map_onto_policies() {
        assert_eq!(CorsPolicy::from_origins::<&str>(&[]).unwrap(), CorsPolicy::Disabled);
        assert_eq!(CorsPolicy::from_origins(&[" "]).unwrap(), CorsPolicy::Disabled);
        assert_eq!(
            CorsPolicy::from_origins(&["http://a.test", "*"]).unwrap(),
            CorsPolicy::AnyOrigin
        );
        assert_eq!(
            CorsPolicy::from_origins(&["http://a.test"]).unwrap(),
            CorsPolicy::Origins(vec![HeaderValue::from_static("http://a.test")])
        );
        assert!(CorsPolicy::from_origins(&["bad\norigin"]).is_err());
    }

    #[test]
    fn disabled_policy_has_no_layer() {
        assert!(CorsPolicy::Disabled.layer().is_none());
        assert!(CorsPolicy::AnyOrigin.layer().is_some());
    }
}
