//! TUI Module - SDR Console
//!
//! Full-screen operator console for the lead-generation pipeline.
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        UI LAYER (widgets/)                          │
//! │  Pure rendering. No business logic. Borrows ConsoleState.           │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ &ConsoleState + TuiState (focus, scroll)
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      MISSION ENGINE (crate::mission)                │
//! │  MissionController applies ChannelEvents to ConsoleState.           │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ ChannelEvent stream
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    TRANSPORT (MissionTransport)                     │
//! │  WebSocketTransport for the backend, ScriptedTransport for --demo.  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod events;
mod state;
mod theme;

pub mod widgets;

pub use app::TuiApp;
pub use events::Action;
pub use state::{Focus, TuiState};
pub use theme::ConsoleTheme;

use crate::config::ConsoleConfig;

/// Run the console until the operator quits
pub async fn run(config: &ConsoleConfig, demo: bool) -> anyhow::Result<()> {
    let app = TuiApp::new(config, demo)?;
    app.run().await
}
