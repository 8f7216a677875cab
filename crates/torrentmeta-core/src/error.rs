use std::fmt;

use thiserror::Error;

/// Why a title was refused before any field extraction ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Empty, or no alphanumeric character at all.
    NoAlphanumeric,
    /// Contains both "password" and "yenc" (usenet spam posts).
    PasswordSpam,
    /// Matches a known hash-named or placeholder release signature.
    HashSignature,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::NoAlphanumeric => "no alphanumeric content",
            Self::PasswordSpam => "password/yenc spam",
            Self::HashSignature => "hash-like release name",
        };
        f.write_str(reason)
    }
}

/// Errors that can occur during torrentmeta core operations.
#[derive(Debug, Error)]
pub enum TorrentMetaError {
    /// The title looks like a hashed or garbage release and was not parsed.
    #[error("Invalid title (likely hashed release)")]
    InvalidTitle {
        /// The rejected input.
        input: String,
        /// Which signature rejected it.
        reason: InvalidReason,
    },

    /// A registry pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    Regex(#[from] regex::Error),
}

impl TorrentMetaError {
    /// Returns `true` for the invalid-title marker.
    pub fn is_invalid_title(&self) -> bool {
        matches!(self, Self::InvalidTitle { .. })
    }
}

/// Result type alias for torrentmeta operations.
pub type Result<T> = std::result::Result<T, TorrentMetaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = TorrentMetaError::InvalidTitle {
            input: "123".into(),
            reason: InvalidReason::HashSignature,
        };
        assert_eq!(err.to_string(), "Invalid title (likely hashed release)");
        assert!(err.is_invalid_title());

        assert_eq!(InvalidReason::PasswordSpam.to_string(), "password/yenc spam");
    }

    #[test]
    fn regex_errors_convert() {
        let err: TorrentMetaError = regex::Regex::new("(").unwrap_err().into();
        assert!(err.to_string().starts_with("regex compilation error"));
        assert!(!err.is_invalid_title());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TorrentMetaError>();
    }
}
