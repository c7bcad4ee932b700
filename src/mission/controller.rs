//! Mission controller - owns the console state and the active channel

use tracing::debug;

use super::connection::{ChannelEvent, MissionConnection, MissionTransport};
use super::state::ConsoleState;
use crate::error::{ConsoleError, Result};
use crate::lead::LeadRecord;

pub struct MissionController {
    state: ConsoleState,
    transport: Box<dyn MissionTransport>,
    connection: Option<MissionConnection>,
    clear_log_on_launch: bool,
}

impl MissionController {
    pub fn new(state: ConsoleState, transport: Box<dyn MissionTransport>) -> Self {
        Self {
            state,
            transport,
            connection: None,
            clear_log_on_launch: false,
        }
    }

    pub fn clear_log_on_launch(mut self, clear: bool) -> Self {
        self.clear_log_on_launch = clear;
        self
    }

    /// Read-only view for the presentation layer
    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.mission.is_running()
    }

    /// Pending niche for the next launch
    pub fn set_niche(&mut self, niche: impl Into<String>) {
        self.state.mission.niche = niche.into();
    }

    /// Pending count for the next launch (bounds are the caller's concern)
    pub fn set_count(&mut self, count: u32) {
        self.state.mission.count = count;
    }

    pub fn load_history(&mut self, records: Vec<LeadRecord>) {
        debug!(count = records.len(), "history loaded");
        self.state.leads.load_history(records);
    }

    pub fn select_lead(&mut self, index: usize) -> Result<()> {
        self.state.leads.select(index)
    }

    pub fn select_relative(&mut self, delta: isize) {
        self.state.leads.select_relative(delta);
    }

    /// Start a mission on a fresh channel. Rejected without side effects while running.
    pub fn launch(&mut self) -> Result<()> {
        if self.is_running() {
            return Err(ConsoleError::MissionRunning);
        }
        let request = self.state.begin_mission(self.clear_log_on_launch);
        self.connection = Some(self.transport.open(request));
        Ok(())
    }

    /// Wait for the next channel event. Pends forever without a connection.
    pub async fn next_event(&mut self) -> ChannelEvent {
        match self.connection.as_mut() {
            Some(connection) => connection
                .next_event()
                .await
                .unwrap_or(ChannelEvent::Closed),
            None => std::future::pending().await,
        }
    }

    pub fn handle_event(&mut self, event: ChannelEvent) {
        let ended = matches!(event, ChannelEvent::Closed | ChannelEvent::Failed(_));
        self.state.apply_event(event);
        if ended {
            self.connection = None;
        }
    }

    pub fn has_connection(&self) -> bool {
        self.connection.is_some()
    }

    /// Drive the current mission until its channel ends
    pub async fn run_to_end(&mut self) {
        while self.has_connection() {
            let event = self.next_event().await;
            self.handle_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::connection::ScriptedTransport;
    use crate::mission::state::{MissionOutcome, MissionStatus};
    use crate::pipeline::{StageId, StageStatus};
    use crate::protocol::{MissionRequest, MISSION_COMPLETE};

    fn controller(transport: ScriptedTransport) -> MissionController {
        MissionController::new(
            ConsoleState::new("Marketing Agencies in Austin", 1),
            Box::new(transport),
        )
    }

    #[tokio::test]
    async fn test_launch_sends_current_parameters() {
        let transport = ScriptedTransport::from_frames(Vec::<String>::new());
        let mut controller = controller(transport.clone());
        controller.set_niche("Roofers in Denver");
        controller.set_count(4);

        controller.launch().unwrap();

        assert!(controller.is_running());
        assert_eq!(
            transport.requests(),
            vec![MissionRequest {
                niche: "Roofers in Denver".into(),
                count: 4
            }]
        );
    }

    #[tokio::test]
    async fn test_launch_rejected_while_running() {
        let transport = ScriptedTransport::from_frames(Vec::<String>::new());
        let mut controller = controller(transport.clone());
        controller.launch().unwrap();
        controller.state.graph.set_active(StageId::Scout);
        let log_len = controller.state().log.len();
        let graph = controller.state().graph.clone();

        let err = controller.launch().unwrap_err();

        assert!(matches!(err, ConsoleError::MissionRunning));
        assert_eq!(controller.state().mission.status, MissionStatus::Running);
        assert_eq!(controller.state().log.len(), log_len);
        assert_eq!(controller.state().graph, graph);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_run_to_end_completes_mission() {
        let complete = serde_json::json!({"type": "log", "message": MISSION_COMPLETE}).to_string();
        let transport = ScriptedTransport::from_frames([
            r#"{"type":"node_active","node":"1"}"#.to_string(),
            r#"{"type":"node_done","node":"1"}"#.to_string(),
            r#"{"type":"result","data":{"company":"Acme"}}"#.to_string(),
            complete,
        ]);
        let mut controller = controller(transport);
        controller.launch().unwrap();
        controller.run_to_end().await;

        let state = controller.state();
        assert_eq!(state.mission.last_outcome, Some(MissionOutcome::Completed));
        assert_eq!(state.graph.status(StageId::Discovery), StageStatus::Done);
        assert_eq!(state.leads.len(), 1);
        assert!(!controller.has_connection());
    }

    #[tokio::test]
    async fn test_relaunch_after_error_resets_graph_only() {
        let transport = ScriptedTransport::from_frames([
            r#"{"type":"node_active","node":"1"}"#,
            r#"{"type":"error","message":"No leads found."}"#,
        ]);
        let mut controller = controller(transport.clone());
        controller.launch().unwrap();
        controller.run_to_end().await;
        assert!(!controller.is_running());
        assert_eq!(
            controller.state().graph.status(StageId::Discovery),
            StageStatus::Active
        );
        let log_len = controller.state().log.len();

        controller.launch().unwrap();
        assert_eq!(
            controller.state().graph.status(StageId::Discovery),
            StageStatus::Idle
        );
        assert_eq!(controller.state().log.len(), log_len + 1);
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_clear_log_on_launch() {
        let transport = ScriptedTransport::from_frames(Vec::<String>::new());
        let mut controller = controller(transport).clear_log_on_launch(true);
        controller.state.log.remote("stale");
        controller.launch().unwrap();
        assert_eq!(controller.state().log.len(), 1);
    }

    #[test]
    fn test_select_lead_guards_membership() {
        let mut controller = controller(ScriptedTransport::default());
        controller.load_history(vec![LeadRecord::new("A", "x"), LeadRecord::new("B", "y")]);
        assert_eq!(controller.state().leads.selected_index(), Some(1));

        controller.select_lead(0).unwrap();
        assert!(controller.select_lead(2).is_err());
        assert_eq!(controller.state().leads.selected_index(), Some(0));
    }
}
