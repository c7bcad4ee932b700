//! Consolidated console state and the frame dispatch rules
//!
//! Every store mutation caused by the mission channel goes through
//! [`ConsoleState::apply_event`], in receipt order.

use std::fmt;

use tracing::{debug, info, warn};

use super::connection::ChannelEvent;
use crate::error::ConsoleError;
use crate::lead::LeadStore;
use crate::log_stream::LogStream;
use crate::pipeline::{PipelineGraph, StageId};
use crate::protocol::{decode_frame, error_reason, InboundFrame, MissionRequest};

pub const INIT_LINE: &str = "🚀 Initializing connection...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissionStatus {
    #[default]
    Idle,
    Running,
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Running => write!(f, "RUNNING"),
        }
    }
}

/// How the last mission ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissionOutcome {
    Completed,
    Failed(String),
}

/// Mission parameters and run status
#[derive(Debug, Clone)]
pub struct Mission {
    pub niche: String,
    pub count: u32,
    pub status: MissionStatus,
    pub last_outcome: Option<MissionOutcome>,
}

impl Mission {
    pub fn new(niche: impl Into<String>, count: u32) -> Self {
        Self {
            niche: niche.into(),
            count,
            status: MissionStatus::Idle,
            last_outcome: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == MissionStatus::Running
    }

    pub fn request(&self) -> MissionRequest {
        MissionRequest {
            niche: self.niche.clone(),
            count: self.count,
        }
    }

    fn finish(&mut self, outcome: MissionOutcome) {
        self.status = MissionStatus::Idle;
        self.last_outcome = Some(outcome);
    }
}

/// Mission + pipeline graph + log + drafts, as rendered by the console
#[derive(Debug, Clone)]
pub struct ConsoleState {
    pub mission: Mission,
    pub graph: PipelineGraph,
    pub log: LogStream,
    pub leads: LeadStore,
}

impl ConsoleState {
    pub fn new(niche: impl Into<String>, count: u32) -> Self {
        Self {
            mission: Mission::new(niche, count),
            graph: PipelineGraph::new(),
            log: LogStream::new(),
            leads: LeadStore::new(),
        }
    }

    /// Enter Running with a fully reset graph; returns the request to send.
    ///
    /// The log carries forward unless `clear_log` is set.
    pub fn begin_mission(&mut self, clear_log: bool) -> MissionRequest {
        if clear_log {
            self.log.clear();
        }
        self.mission.status = MissionStatus::Running;
        self.log.console(INIT_LINE);
        self.graph.reset_all();
        info!(niche = %self.mission.niche, count = self.mission.count, "mission launched");
        self.mission.request()
    }

    pub fn apply_event(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::Opened => debug!("mission channel open"),
            ChannelEvent::Frame(raw) => match decode_frame(&raw) {
                Ok(frame) => self.apply_frame(frame),
                Err(err) => self.reject_frame(err),
            },
            ChannelEvent::Failed(reason) => {
                warn!(%reason, "mission channel failed");
                self.log.console(format!("⚠️ Connection error: {}", reason));
                if self.mission.is_running() {
                    self.mission.finish(MissionOutcome::Failed(reason));
                }
            }
            ChannelEvent::Closed => {
                if self.mission.is_running() {
                    warn!("mission channel closed before completion");
                    let reason = "Connection closed before mission completed".to_string();
                    self.log.console(format!("⚠️ {}", reason));
                    self.mission.finish(MissionOutcome::Failed(reason));
                } else {
                    debug!("mission channel closed");
                }
            }
        }
    }

    pub fn apply_frame(&mut self, frame: InboundFrame) {
        let completes = frame.is_completion();
        let next_lead = frame.starts_next_lead();

        match frame {
            InboundFrame::Log { message } => {
                self.log.remote(message);
                if next_lead {
                    self.graph.reset_keep_first();
                }
                if completes {
                    info!("mission complete");
                    self.mission.finish(MissionOutcome::Completed);
                }
            }
            InboundFrame::NodeActive { node } => match StageId::from_wire(&node) {
                Some(id) => self.graph.set_active(id),
                None => debug!(%node, "node_active for unknown stage"),
            },
            InboundFrame::NodeDone { node } => match StageId::from_wire(&node) {
                Some(id) => self.graph.set_done(id),
                None => debug!(%node, "node_done for unknown stage"),
            },
            InboundFrame::NodeError { node } => {
                debug!(%node, "stage rejected current lead");
            }
            InboundFrame::Result { data } => {
                info!(company = data.company_or_default(), "draft received");
                self.leads.append(data);
            }
            InboundFrame::Error { message } => {
                let reason = error_reason(message);
                warn!(%reason, "mission failed");
                self.mission.finish(MissionOutcome::Failed(reason));
            }
        }
    }

    fn reject_frame(&mut self, err: ConsoleError) {
        if let ConsoleError::ProtocolDecode { raw, reason } = &err {
            warn!(%raw, %reason, "ignoring malformed frame");
            self.log.console(format!("⚠️ Ignored malformed frame: {}", reason));
        }
    }
}
