//! Mission channel wire format
//!
//! One outbound request per mission, then a stream of `type`-tagged JSON
//! frames. Every inbound frame passes through [`decode_frame`] before it may
//! touch console state.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConsoleError;
use crate::lead::LeadRecord;

/// Failure reason used when an `error` frame carries no message
pub const DEFAULT_ERROR_REASON: &str = "Pipeline reported an error";

/// Log message that doubles as the normal end-of-mission signal
pub const MISSION_COMPLETE: &str = "🏁 Mission Complete.";

/// Log prefix announcing the next lead within the current mission
pub const PROCESSING_PREFIX: &str = "Processing:";

/// Sent once, right after the channel opens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionRequest {
    pub niche: String,
    pub count: u32,
}

/// Inbound frame from the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundFrame {
    Log {
        message: String,
    },
    NodeActive {
        node: String,
    },
    NodeDone {
        node: String,
    },
    /// Gatekeeper rejection; carries no visual effect
    NodeError {
        node: String,
    },
    Result {
        data: LeadRecord,
    },
    /// Any `error` frame ends the mission, whatever its payload
    Error {
        #[serde(default)]
        message: Option<Value>,
    },
}

impl InboundFrame {
    /// True for the `log` frame that marks normal completion
    pub fn is_completion(&self) -> bool {
        matches!(self, Self::Log { message } if message == MISSION_COMPLETE)
    }

    /// True for a `log` frame that starts the next lead
    pub fn starts_next_lead(&self) -> bool {
        matches!(self, Self::Log { message } if message.starts_with(PROCESSING_PREFIX))
    }
}

/// Operator-facing reason for an `error` frame: strings verbatim, other
/// JSON as its compact text
pub fn error_reason(message: Option<Value>) -> String {
    match message {
        Some(Value::String(text)) => text,
        Some(Value::Null) | None => DEFAULT_ERROR_REASON.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Decode one text frame. Failures carry the raw payload for diagnostics.
pub fn decode_frame(raw: &str) -> Result<InboundFrame, ConsoleError> {
    serde_json::from_str(raw).map_err(|err| ConsoleError::ProtocolDecode {
        raw: raw.to_string(),
        reason: err.to_string(),
    })
}
