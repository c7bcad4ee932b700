//! Header Widget
//!
//! Mission inputs (niche, limit), the launch control and the last outcome.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::utils::truncate;
use crate::mission::{Mission, MissionOutcome};
use crate::tui::state::Focus;
use crate::tui::theme::{icons, ConsoleTheme};

const NICHE_WIDTH: usize = 36;

pub struct Header<'a> {
    mission: &'a Mission,
    theme: &'a ConsoleTheme,
    focus: Option<Focus>,
}

impl<'a> Header<'a> {
    pub fn new(mission: &'a Mission, theme: &'a ConsoleTheme) -> Self {
        Self {
            mission,
            theme,
            focus: None,
        }
    }

    pub fn focus(mut self, focus: Focus) -> Self {
        self.focus = Some(focus);
        self
    }

    fn field_style(&self, field: Focus) -> Style {
        if self.focus == Some(field) {
            self.theme.accent().add_modifier(Modifier::BOLD)
        } else {
            self.theme.text()
        }
    }

    fn launch_span(&self) -> Span<'a> {
        if self.mission.is_running() {
            Span::styled(format!(" {} Running... ", icons::PLAY), self.theme.dimmed())
        } else {
            Span::styled(
                format!(" {} Launch Agent ", icons::PLAY),
                Style::default()
                    .fg(self.theme.background)
                    .bg(self.theme.neon)
                    .add_modifier(Modifier::BOLD),
            )
        }
    }

    fn outcome_span(&self) -> Option<Span<'a>> {
        if self.mission.is_running() {
            return None;
        }
        match &self.mission.last_outcome {
            Some(MissionOutcome::Completed) => Some(Span::styled(
                format!("{} Mission complete", icons::CHECK),
                self.theme.accent(),
            )),
            Some(MissionOutcome::Failed(reason)) => Some(Span::styled(
                format!("✖ {}", truncate(reason, 48)),
                self.theme.error(),
            )),
            None => None,
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let niche_focused = self.focus == Some(Focus::Niche);
        let mut niche = truncate(&self.mission.niche, NICHE_WIDTH);
        if niche_focused {
            niche.push('▏');
        }

        let mut spans = vec![
            Span::styled("Niche: ", self.theme.faint()),
            Span::styled(format!("[{:<width$}]", niche, width = NICHE_WIDTH), self.field_style(Focus::Niche)),
            Span::raw("  "),
            Span::styled("Limit: ", self.theme.faint()),
            Span::styled(format!("[{:>2}]", self.mission.count), self.field_style(Focus::Count)),
            Span::raw("  "),
            self.launch_span(),
        ];
        if let Some(outcome) = self.outcome_span() {
            spans.push(Span::raw("  "));
            spans.push(outcome);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(Span::styled(format!(" {} SDR CONSOLE ", icons::ANTENNA), self.theme.title()));

        Paragraph::new(Line::from(spans)).block(block).render(area, buf);
    }
}
