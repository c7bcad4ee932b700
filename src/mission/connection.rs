//! Mission channel - Connector Layer
//!
//! One [`MissionConnection`] per mission run. A transport opens it, sends the
//! mission request once the channel is up, then forwards raw frames in
//! receipt order. Decoding happens in the state layer.

use std::sync::{Arc, Mutex};

use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration};
use tokio_stream::wrappers::ReceiverStream;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, warn};
use url::Url;

use crate::pipeline::StageId;
use crate::protocol::{MissionRequest, MISSION_COMPLETE};

const CHANNEL_CAPACITY: usize = 256;

/// What the channel delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// Channel is up and the mission request was sent
    Opened,
    /// Raw text frame, not yet decoded
    Frame(String),
    /// Connect, send or read failure
    Failed(String),
    /// Peer closed the channel
    Closed,
}

/// Live channel for one mission. Dropping it tears the channel down.
pub struct MissionConnection {
    events: ReceiverStream<ChannelEvent>,
    task: JoinHandle<()>,
}

impl MissionConnection {
    pub fn new(events: mpsc::Receiver<ChannelEvent>, task: JoinHandle<()>) -> Self {
        Self {
            events: ReceiverStream::new(events),
            task,
        }
    }

    /// Next event in receipt order; None once the transport task is gone
    pub async fn next_event(&mut self) -> Option<ChannelEvent> {
        self.events.next().await
    }
}

impl Drop for MissionConnection {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transport Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Opens mission channels. Must be called inside a tokio runtime.
pub trait MissionTransport: Send + Sync {
    fn open(&self, request: MissionRequest) -> MissionConnection;
}

// ─────────────────────────────────────────────────────────────────────────────
// WebSocket Transport
// ─────────────────────────────────────────────────────────────────────────────

pub struct WebSocketTransport {
    url: Url,
}

impl WebSocketTransport {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl MissionTransport for WebSocketTransport {
    fn open(&self, request: MissionRequest) -> MissionConnection {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let url = self.url.clone();
        let task = tokio::spawn(async move {
            run_socket(url, request, tx).await;
        });
        MissionConnection::new(rx, task)
    }
}

async fn run_socket(url: Url, request: MissionRequest, tx: mpsc::Sender<ChannelEvent>) {
    let (mut ws, _) = match connect_async(url.as_str()).await {
        Ok(value) => value,
        Err(err) => {
            warn!(%url, "mission_connect_error: {err}");
            let _ = tx.send(ChannelEvent::Failed(err.to_string())).await;
            return;
        }
    };

    let payload = match serde_json::to_string(&request) {
        Ok(payload) => payload,
        Err(err) => {
            let _ = tx.send(ChannelEvent::Failed(err.to_string())).await;
            return;
        }
    };
    if let Err(err) = ws.send(Message::Text(payload)).await {
        warn!("mission_send_error: {err}");
        let _ = tx.send(ChannelEvent::Failed(err.to_string())).await;
        let _ = ws.close(None).await;
        return;
    }
    debug!(%url, "mission request sent");
    if tx.send(ChannelEvent::Opened).await.is_err() {
        return;
    }

    loop {
        let event = match ws.next().await {
            Some(Ok(Message::Text(text))) => ChannelEvent::Frame(text),
            Some(Ok(Message::Binary(bytes))) => {
                ChannelEvent::Frame(String::from_utf8_lossy(&bytes).into_owned())
            }
            Some(Ok(Message::Close(_))) | None => break,
            Some(Ok(_)) => continue,
            Some(Err(err)) => {
                warn!("mission_read_error: {err}");
                let _ = tx.send(ChannelEvent::Failed(err.to_string())).await;
                return;
            }
        };
        if tx.send(event).await.is_err() {
            // Console dropped the connection
            let _ = ws.close(None).await;
            return;
        }
    }

    let _ = tx.send(ChannelEvent::Closed).await;
}

// ─────────────────────────────────────────────────────────────────────────────
// Scripted Transport
// ─────────────────────────────────────────────────────────────────────────────

/// Replays a fixed event script; used by demo mode and tests
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Vec<(Duration, ChannelEvent)>,
    requests: Arc<Mutex<Vec<MissionRequest>>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<(Duration, ChannelEvent)>) -> Self {
        Self {
            script,
            requests: Arc::default(),
        }
    }

    /// Script of raw frames, delivered back to back, then a close
    pub fn from_frames<I, S>(frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut script: Vec<_> = std::iter::once((Duration::ZERO, ChannelEvent::Opened))
            .chain(
                frames
                    .into_iter()
                    .map(|f| (Duration::ZERO, ChannelEvent::Frame(f.into()))),
            )
            .collect();
        script.push((Duration::ZERO, ChannelEvent::Closed));
        Self::new(script)
    }

    /// A two-lead mission with one Gatekeeper rejection
    pub fn demo() -> Self {
        let step = Duration::from_millis(350);
        let mut script = vec![(Duration::from_millis(200), ChannelEvent::Opened)];
        let mut push = |value: serde_json::Value| {
            script.push((step, ChannelEvent::Frame(value.to_string())));
        };

        push(serde_json::json!({"type": "node_active", "node": "1"}));
        push(serde_json::json!({"type": "log", "message": "Scanning for 2 targets in: Marketing Agencies in Austin..."}));
        push(serde_json::json!({"type": "node_done", "node": "1"}));

        push(serde_json::json!({"type": "log", "message": "Processing: https://brightpixel.example"}));
        push(serde_json::json!({"type": "node_active", "node": "2"}));
        push(serde_json::json!({"type": "node_done", "node": "2"}));
        push(serde_json::json!({"type": "node_active", "node": "3"}));
        push(serde_json::json!({"type": "log", "message": "❌ Rejected: Bright Pixel Media"}));
        push(serde_json::json!({"type": "node_error", "node": "3"}));

        for (site, company, person) in [
            ("https://northloop.example", "Northloop Creative", "Avery Chen"),
            ("https://hillcountry.example", "Hill Country Growth", "Jordan Reyes"),
        ] {
            push(serde_json::json!({"type": "log", "message": format!("Processing: {site}")}));
            for stage in &StageId::ALL[1..] {
                push(serde_json::json!({"type": "node_active", "node": stage.wire_id()}));
                push(serde_json::json!({"type": "node_done", "node": stage.wire_id()}));
            }
            let first_name = person.split(' ').next().unwrap_or(person);
            push(serde_json::json!({
                "type": "result",
                "data": {
                    "company": company,
                    "person": person,
                    "website": site,
                    "email_subject": format!("{company}: client intake on autopilot"),
                    "email_body": format!(
                        "Hi {first_name},\n\nNoticed {company} still routes new client briefs by hand.\nWe automate that hand-off end to end.\n\nWorth a 15 minute call?"
                    ),
                    "linkedin_url": "https://www.linkedin.com/in/example",
                    "pain_points": ["manual client intake", "slow proposal turnaround"],
                    "hypothesis": "Automate brief intake and proposal drafting"
                }
            }));
        }

        push(serde_json::json!({"type": "log", "message": MISSION_COMPLETE}));
        script.push((step, ChannelEvent::Closed));
        Self::new(script)
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<MissionRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl MissionTransport for ScriptedTransport {
    fn open(&self, request: MissionRequest) -> MissionConnection {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let script = self.script.clone();
        let task = tokio::spawn(async move {
            for (delay, event) in script {
                if !delay.is_zero() {
                    time::sleep(delay).await;
                }
                if tx.send(event).await.is_err() {
                    return;
                }
            }
        });
        MissionConnection::new(rx, task)
    }
}
