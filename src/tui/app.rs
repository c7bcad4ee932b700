//! TUI Application - Main entry point and run loop

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::oneshot;
use tracing::{debug, info};

use super::events::{handle_key_event, Action};
use super::state::{Focus, TuiState};
use super::theme::ConsoleTheme;
use super::widgets::{DraftPreview, Header, Inbox, LogPanel, PipelineStrip};
use crate::config::ConsoleConfig;
use crate::history::{HistorySource, HttpHistory};
use crate::lead::LeadRecord;
use crate::mission::{
    ChannelEvent, ConsoleState, MissionController, MissionTransport, ScriptedTransport,
    WebSocketTransport,
};

const TICK_RATE: Duration = Duration::from_millis(250);

/// One wake-up of the main loop
enum Step {
    Channel(ChannelEvent),
    Input(Option<io::Result<Event>>),
    History(Vec<LeadRecord>),
    Tick,
}

/// TUI Application
pub struct TuiApp {
    controller: MissionController,
    ui: TuiState,
    theme: ConsoleTheme,
    history: Option<Arc<dyn HistorySource>>,
}

impl TuiApp {
    /// Wire the console to the backend, or to the scripted demo mission
    pub fn new(config: &ConsoleConfig, demo: bool) -> anyhow::Result<Self> {
        let state = ConsoleState::new(config.niche.clone(), config.count);

        let (transport, history): (Box<dyn MissionTransport>, Option<Arc<dyn HistorySource>>) =
            if demo {
                (Box::new(ScriptedTransport::demo()), None)
            } else {
                (
                    Box::new(WebSocketTransport::new(config.mission_url()?)),
                    Some(Arc::new(HttpHistory::new(config.history_url()?))),
                )
            };

        let controller = MissionController::new(state, transport)
            .clear_log_on_launch(config.clear_log_on_launch);
        Ok(Self::from_parts(controller, history))
    }

    pub fn from_parts(
        controller: MissionController,
        history: Option<Arc<dyn HistorySource>>,
    ) -> Self {
        Self {
            controller,
            ui: TuiState::default(),
            theme: ConsoleTheme::new(),
            history,
        }
    }

    /// Run the TUI application
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut terminal = self.setup_terminal()?;
        info!("console started");

        let result = self.main_loop(&mut terminal).await;

        self.restore_terminal(&mut terminal)?;
        info!("console stopped");
        result
    }

    /// Setup terminal for TUI
    fn setup_terminal(&self) -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore terminal to normal state
    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Main event loop
    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        let mut input = EventStream::new();
        let mut ticker = tokio::time::interval(TICK_RATE);

        // History arrives once, whenever the backend answers
        let (history_tx, mut history_rx) = oneshot::channel();
        let mut history_pending = false;
        if let Some(source) = self.history.clone() {
            history_pending = true;
            tokio::spawn(async move {
                let _ = history_tx.send(source.fetch_or_empty().await);
            });
        }

        loop {
            terminal.draw(|frame| self.render(frame))?;

            let step = tokio::select! {
                event = self.controller.next_event() => Step::Channel(event),
                maybe = input.next() => Step::Input(maybe),
                records = &mut history_rx, if history_pending => {
                    Step::History(records.unwrap_or_default())
                }
                _ = ticker.tick() => Step::Tick,
            };

            match step {
                Step::Channel(event) => self.controller.handle_event(event),
                Step::Input(Some(Ok(Event::Key(key)))) => {
                    let action = handle_key_event(key, &mut self.ui, &mut self.controller);
                    self.dispatch(action);
                }
                Step::Input(Some(Ok(_))) => {}
                Step::Input(Some(Err(err))) => return Err(err.into()),
                Step::Input(None) => self.ui.should_quit = true,
                Step::History(records) => {
                    history_pending = false;
                    self.controller.load_history(records);
                }
                Step::Tick => {}
            }

            if self.ui.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.ui.should_quit = true,
            Action::Launch => match self.controller.launch() {
                Ok(()) => self.ui.follow_log(),
                Err(err) => debug!("launch ignored: {err}"),
            },
            _ => {}
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let state = self.controller.state();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(5), // Pipeline
                Constraint::Min(8),    // Workspace
                Constraint::Length(1), // Footer
            ])
            .split(area);

        frame.render_widget(
            Header::new(&state.mission, &self.theme).focus(self.ui.focus),
            main_chunks[0],
        );

        let pipeline_title = match state.graph.active_stage() {
            Some(stage) => format!(" PIPELINE · {} ", stage.label()),
            None => " PIPELINE ".to_string(),
        };
        let pipeline_block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.panel_border(false))
            .title(Span::styled(pipeline_title, self.theme.dimmed()));
        let pipeline_area = pipeline_block.inner(main_chunks[1]);
        frame.render_widget(pipeline_block, main_chunks[1]);
        frame.render_widget(PipelineStrip::new(&state.graph, &self.theme), pipeline_area);

        // Workspace: Log | Drafts | Preview
        let workspace = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(25),
                Constraint::Percentage(45),
            ])
            .split(main_chunks[2]);

        frame.render_widget(
            LogPanel::new(&state.log, &self.theme)
                .offset(self.ui.log_offset)
                .focused(self.ui.focus == Focus::Log),
            workspace[0],
        );
        frame.render_widget(
            Inbox::new(&state.leads, &self.theme).focused(self.ui.focus == Focus::Drafts),
            workspace[1],
        );
        frame.render_widget(
            DraftPreview::new(state.leads.selected(), &self.theme),
            workspace[2],
        );

        self.render_footer(frame, main_chunks[3]);

        if self.ui.show_help {
            self.render_help(frame, area);
        }
    }

    /// Render footer
    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hints: &[(&str, &str)] = match self.ui.focus {
            Focus::Niche => &[("[type]", " niche  "), ("[Enter]", " launch  "), ("[Esc]", " done  ")],
            Focus::Count => &[("[↑↓ 1-9 0]", " limit  "), ("[Enter]", " launch  ")],
            Focus::Drafts | Focus::Log => &[
                ("[q]", "uit  "),
                ("[l]", "aunch  "),
                ("[↑↓]", " select/scroll  "),
                ("[?]", " help  "),
            ],
        };

        let mut spans = vec![Span::raw(" ")];
        for (key, label) in hints {
            spans.push(Span::styled(*key, self.theme.accent()));
            spans.push(Span::styled(*label, self.theme.dimmed()));
        }
        if !self.ui.is_following_log() {
            spans.push(Span::styled("[End]", self.theme.accent()));
            spans.push(Span::styled(" follow log  ", self.theme.dimmed()));
        }
        spans.push(Span::styled("[Tab]", self.theme.accent()));
        spans.push(Span::styled(" focus", self.theme.dimmed()));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Render help overlay
    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let rows = [
            ("Tab / Shift+Tab", "Move focus: niche, limit, drafts, terminal"),
            ("Enter", "Launch from the niche or limit field"),
            ("l", "Launch agent"),
            ("↑ ↓  j k", "Select draft / scroll terminal / change limit"),
            ("1-9, 0", "Set limit (0 = 10)"),
            ("End  G", "Follow terminal tail"),
            ("? / F1", "Toggle this help"),
            ("q  Ctrl+C", "Quit"),
        ];
        let lines: Vec<Line> = rows
            .iter()
            .map(|(key, what)| {
                Line::from(vec![
                    Span::styled(format!(" {:<16}", key), self.theme.accent()),
                    Span::styled(*what, self.theme.text()),
                ])
            })
            .collect();

        let popup = centered(area, 64, lines.len() as u16 + 2);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.panel_border(true))
                    .title(Span::styled(" Keys ", self.theme.title())),
            ),
            popup,
        );
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;

    use crate::lead::LeadRecord;
    use crate::tui::widgets::test_support::contains;

    fn app(transport: ScriptedTransport) -> TuiApp {
        let controller = MissionController::new(
            ConsoleState::new("Marketing Agencies in Austin", 2),
            Box::new(transport),
        );
        TuiApp::from_parts(controller, None)
    }

    fn draw(app: &TuiApp) -> ratatui::buffer::Buffer {
        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn test_initial_screen() {
        let app = app(ScriptedTransport::default());
        let buf = draw(&app);

        assert!(contains(&buf, "SDR CONSOLE"));
        assert!(contains(&buf, "Discovery"));
        assert!(contains(&buf, "Writer"));
        assert!(contains(&buf, "TERMINAL"));
        assert!(contains(&buf, "Drafts (0)"));
        assert!(contains(&buf, "Select a lead to review strategy & draft"));
    }

    #[test]
    fn test_active_stage_and_scroll_hint() {
        let mut app = app(ScriptedTransport::default());
        let buf = draw(&app);
        assert!(contains(&buf, " PIPELINE "));
        assert!(!contains(&buf, "PIPELINE ·"));
        assert!(!contains(&buf, "follow log"));

        app.controller.handle_event(ChannelEvent::Frame(
            r#"{"type":"node_active","node":"3"}"#.to_string(),
        ));
        app.ui.log_offset = 1;
        let buf = draw(&app);
        assert!(contains(&buf, "PIPELINE ·"));
        assert!(contains(&buf, "follow log"));
    }

    #[test]
    fn test_help_overlay() {
        let mut app = app(ScriptedTransport::default());
        app.ui.show_help = true;
        let buf = draw(&app);
        assert!(contains(&buf, "Toggle this help"));
    }

    #[tokio::test]
    async fn test_launch_and_render_result() {
        let mut app = app(ScriptedTransport::from_frames([
            r#"{"type":"node_active","node":"1"}"#,
            r#"{"type":"log","message":"Scanning..."}"#,
            r#"{"type":"result","data":{"company":"Acme","person":"Dana","email_subject":"Hello Acme"}}"#,
        ]));

        let key = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE);
        let action = handle_key_event(key, &mut app.ui, &mut app.controller);
        app.dispatch(action);
        assert!(app.controller.is_running());

        // A second launch while running is ignored
        app.dispatch(Action::Launch);

        app.controller.run_to_end().await;
        let buf = draw(&app);

        assert!(contains(&buf, "> Scanning..."));
        assert!(contains(&buf, "Drafts (1)"));
        assert!(contains(&buf, "Hello Acme"));
        assert!(contains(&buf, "To: Dana"));
    }

    #[test]
    fn test_history_selects_latest() {
        let mut app = app(ScriptedTransport::default());
        app.controller.load_history(vec![
            LeadRecord::new("Older Co", "A"),
            LeadRecord::new("Newer Co", "B"),
        ]);
        let buf = draw(&app);
        assert!(contains(&buf, "To: B"));
    }
}
