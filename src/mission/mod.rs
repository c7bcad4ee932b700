//! Mission engine
//!
//! ```text
//! MissionController ── launch() ──► MissionTransport::open ──► MissionConnection
//!        ▲                                                          │
//!        │ ChannelEvent (receipt order)                             │
//!        └──────────── ConsoleState::apply_event ◄──────────────────┘
//!                      (graph, log, leads, mission status)
//! ```

pub mod connection;
pub mod controller;
pub mod state;

pub use connection::{
    ChannelEvent, MissionConnection, MissionTransport, ScriptedTransport, WebSocketTransport,
};
pub use controller::MissionController;
pub use state::{ConsoleState, Mission, MissionOutcome, MissionStatus, INIT_LINE};
