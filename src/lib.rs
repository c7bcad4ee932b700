//! SDR Console - operator console for a multi-agent lead-generation pipeline

pub mod config;
pub mod error;
pub mod history;
pub mod lead;
pub mod log_stream;
pub mod logging;
pub mod mission;
pub mod pipeline;
pub mod protocol;
pub mod tui;

pub use config::ConsoleConfig;
pub use error::{ConsoleError, FixSuggestion};
pub use history::{HistorySource, HttpHistory};
pub use lead::{LeadRecord, LeadStore};
pub use log_stream::{LogEntry, LogKind, LogStream};
pub use mission::{
    ChannelEvent, ConsoleState, Mission, MissionController, MissionOutcome, MissionStatus,
    MissionTransport, ScriptedTransport, WebSocketTransport,
};
pub use pipeline::{PipelineGraph, StageId, StageStatus};
pub use protocol::{decode_frame, InboundFrame, MissionRequest};
