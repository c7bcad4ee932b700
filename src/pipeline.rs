//! Pipeline graph - the fixed five-stage chain shown at the top of the console
//!
//! Topology is built once and never changes: Discovery → Scout → Gatekeeper →
//! Hunter → Writer. Only stage status and transition highlight mutate.

use std::fmt;

/// Stable identity of a pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    Discovery,
    Scout,
    Gatekeeper,
    Hunter,
    Writer,
}

impl StageId {
    /// All stages in pipeline order
    pub const ALL: [StageId; 5] = [
        StageId::Discovery,
        StageId::Scout,
        StageId::Gatekeeper,
        StageId::Hunter,
        StageId::Writer,
    ];

    /// Parse the id used on the mission channel ("1".."5")
    pub fn from_wire(id: &str) -> Option<Self> {
        match id {
            "1" => Some(Self::Discovery),
            "2" => Some(Self::Scout),
            "3" => Some(Self::Gatekeeper),
            "4" => Some(Self::Hunter),
            "5" => Some(Self::Writer),
            _ => None,
        }
    }

    pub fn wire_id(&self) -> &'static str {
        match self {
            Self::Discovery => "1",
            Self::Scout => "2",
            Self::Gatekeeper => "3",
            Self::Hunter => "4",
            Self::Writer => "5",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Discovery => "🔎 Discovery",
            Self::Scout => "🕸️ Scout",
            Self::Gatekeeper => "🧠 Gatekeeper",
            Self::Hunter => "🕵️ Hunter",
            Self::Writer => "✍️ Writer",
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Discovery => 0,
            Self::Scout => 1,
            Self::Gatekeeper => 2,
            Self::Hunter => 3,
            Self::Writer => 4,
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Visual status of a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageStatus {
    #[default]
    Idle,
    /// Highlighted border
    Active,
    /// Filled
    Done,
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Active => write!(f, "ACTIVE"),
            Self::Done => write!(f, "DONE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub id: StageId,
    pub status: StageStatus,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        self.id.label()
    }
}

/// Directed edge between two consecutive stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub source: StageId,
    pub target: StageId,
    pub highlighted: bool,
}

/// Fixed linear chain of stages and the transitions between them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineGraph {
    stages: Vec<Stage>,
    transitions: Vec<Transition>,
}

impl PipelineGraph {
    pub fn new() -> Self {
        let stages = StageId::ALL
            .iter()
            .map(|&id| Stage {
                id,
                status: StageStatus::Idle,
            })
            .collect();
        let transitions = StageId::ALL
            .windows(2)
            .map(|pair| Transition {
                source: pair[0],
                target: pair[1],
                highlighted: false,
            })
            .collect();

        Self {
            stages,
            transitions,
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn status(&self, id: StageId) -> StageStatus {
        self.stages[id.index()].status
    }

    /// Edge whose target is `id` (None for the first stage)
    pub fn inbound(&self, id: StageId) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.target == id)
    }

    /// Edge whose source is `id` (None for the last stage)
    pub fn outbound(&self, id: StageId) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.source == id)
    }

    /// Full reset: every stage Idle, every transition plain
    pub fn reset_all(&mut self) {
        for stage in &mut self.stages {
            stage.status = StageStatus::Idle;
        }
        for transition in &mut self.transitions {
            transition.highlighted = false;
        }
    }

    /// Partial reset between leads of one mission.
    ///
    /// The first stage and its outbound transition keep their visual state.
    pub fn reset_keep_first(&mut self) {
        let first = StageId::ALL[0];
        for stage in self.stages.iter_mut().filter(|s| s.id != first) {
            stage.status = StageStatus::Idle;
        }
        for transition in self.transitions.iter_mut().filter(|t| t.source != first) {
            transition.highlighted = false;
        }
    }

    /// Mark a stage Active and highlight its inbound transition
    pub fn set_active(&mut self, id: StageId) {
        self.stages[id.index()].status = StageStatus::Active;
        if let Some(edge) = self.transitions.iter_mut().find(|t| t.target == id) {
            edge.highlighted = true;
        }
    }

    /// Mark a stage Done. Transition highlight is left as is until the next reset.
    pub fn set_done(&mut self, id: StageId) {
        self.stages[id.index()].status = StageStatus::Done;
    }

    pub fn active_stage(&self) -> Option<StageId> {
        self.stages
            .iter()
            .find(|s| s.status == StageStatus::Active)
            .map(|s| s.id)
    }
}

impl Default for PipelineGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn busy_graph() -> PipelineGraph {
        let mut graph = PipelineGraph::new();
        graph.set_active(StageId::Discovery);
        graph.set_done(StageId::Discovery);
        graph.set_active(StageId::Scout);
        graph.set_done(StageId::Scout);
        graph.set_active(StageId::Gatekeeper);
        graph
    }

    #[test]
    fn test_fixed_topology() {
        let graph = PipelineGraph::new();
        let ids: Vec<_> = graph.stages().iter().map(|s| s.id).collect();
        assert_eq!(ids, StageId::ALL.to_vec());
        assert_eq!(graph.transitions().len(), 4);
        assert!(graph.inbound(StageId::Discovery).is_none());
        assert!(graph.outbound(StageId::Writer).is_none());
        assert_eq!(
            graph.outbound(StageId::Hunter).map(|t| t.target),
            Some(StageId::Writer)
        );
    }

    #[test]
    fn test_wire_ids_roundtrip() {
        for id in StageId::ALL {
            assert_eq!(StageId::from_wire(id.wire_id()), Some(id));
        }
        assert_eq!(StageId::from_wire("6"), None);
        assert_eq!(StageId::from_wire("scout"), None);
    }

    #[test]
    fn test_set_active_highlights_inbound_edge() {
        let mut graph = PipelineGraph::new();
        graph.set_active(StageId::Hunter);

        assert_eq!(graph.status(StageId::Hunter), StageStatus::Active);
        assert!(graph.inbound(StageId::Hunter).unwrap().highlighted);
        assert!(!graph.outbound(StageId::Hunter).unwrap().highlighted);
        assert_eq!(graph.active_stage(), Some(StageId::Hunter));
    }

    #[test]
    fn test_set_done_keeps_edge_highlight() {
        let mut graph = PipelineGraph::new();
        graph.set_active(StageId::Scout);
        graph.set_done(StageId::Scout);

        assert_eq!(graph.status(StageId::Scout), StageStatus::Done);
        assert!(graph.inbound(StageId::Scout).unwrap().highlighted);
    }

    #[test]
    fn test_reset_all_is_idempotent() {
        let mut graph = busy_graph();
        graph.reset_all();
        let once = graph.clone();
        graph.reset_all();

        assert_eq!(graph, once);
        assert_eq!(graph, PipelineGraph::new());
        assert!(graph.transitions().iter().all(|t| !t.highlighted));
    }

    #[test]
    fn test_reset_keep_first_preserves_entry_stage() {
        let mut graph = busy_graph();
        let first_before = graph.stages()[0].clone();
        let edge_before = graph.outbound(StageId::Discovery).cloned();

        graph.reset_keep_first();

        assert_eq!(graph.stages()[0], first_before);
        assert_eq!(graph.outbound(StageId::Discovery).cloned(), edge_before);
        for stage in &graph.stages()[1..] {
            assert_eq!(stage.status, StageStatus::Idle);
        }
        assert!(!graph.outbound(StageId::Scout).unwrap().highlighted);
    }

    #[test]
    fn test_reset_keep_first_preserves_active_entry() {
        let mut graph = PipelineGraph::new();
        graph.set_active(StageId::Discovery);
        graph.reset_keep_first();
        assert_eq!(graph.status(StageId::Discovery), StageStatus::Active);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(StageStatus::Active.to_string(), "ACTIVE");
        assert_eq!(StageId::Writer.to_string(), "✍️ Writer");
    }
}
