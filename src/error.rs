//! Error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum ConsoleError {
    // ─────────────────────────────────────────────────────────────
    // Mission lifecycle
    // ─────────────────────────────────────────────────────────────
    #[error("SDR-010: A mission is already running")]
    MissionRunning,

    #[error("SDR-011: Draft #{index} is not in the inbox ({len} drafts)")]
    UnknownLead { index: usize, len: usize },

    // ─────────────────────────────────────────────────────────────
    // Mission channel
    // ─────────────────────────────────────────────────────────────
    #[error("SDR-020: Malformed frame: {reason}")]
    ProtocolDecode { raw: String, reason: String },

    #[error("SDR-021: Mission channel error: {0}")]
    Channel(String),

    // ─────────────────────────────────────────────────────────────
    // History + configuration
    // ─────────────────────────────────────────────────────────────
    #[error("SDR-030: History fetch failed: {0}")]
    HistoryFetch(#[from] reqwest::Error),

    #[error("SDR-040: Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("SDR-041: Unsupported server URL scheme '{scheme}'")]
    UnsupportedScheme { scheme: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FixSuggestion for ConsoleError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            ConsoleError::MissionRunning => {
                Some("Wait for the current mission to complete before launching again")
            }
            ConsoleError::UnknownLead { .. } => None,
            ConsoleError::ProtocolDecode { .. } => {
                Some("Check that the backend speaks the log/node_active/node_done/result/error protocol")
            }
            ConsoleError::Channel(_) => Some("Check the backend is running and reachable (--server)"),
            ConsoleError::HistoryFetch(_) => Some("Check the backend exposes GET /api/history"),
            ConsoleError::InvalidUrl(_) => Some("Use a full URL such as http://localhost:8000"),
            ConsoleError::UnsupportedScheme { .. } => Some("Use an http:// or https:// server URL"),
            ConsoleError::Json(_) => None,
            ConsoleError::Io(_) => Some("Check file path and permissions"),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_in_messages() {
        assert!(ConsoleError::MissionRunning.to_string().starts_with("SDR-010"));
        let err = ConsoleError::UnknownLead { index: 4, len: 2 };
        assert_eq!(err.to_string(), "SDR-011: Draft #4 is not in the inbox (2 drafts)");
    }

    #[test]
    fn test_fix_suggestions() {
        assert!(ConsoleError::MissionRunning.fix_suggestion().is_some());
        assert!(ConsoleError::Channel("refused".into())
            .fix_suggestion()
            .unwrap()
            .contains("--server"));
        assert!(ConsoleError::UnknownLead { index: 0, len: 0 }
            .fix_suggestion()
            .is_none());
    }
}
