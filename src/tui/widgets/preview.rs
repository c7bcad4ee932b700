//! Draft Preview Widget
//!
//! Subject, recipient, body paragraphs, research notes and outbound links
//! for the selected draft.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Widget, Wrap},
};

use crate::lead::LeadRecord;
use crate::tui::theme::{icons, ConsoleTheme};

pub const EMPTY_HINT: &str = "Select a lead to review strategy & draft";
pub const NO_DRAFT: &str = "No draft available.";

pub struct DraftPreview<'a> {
    lead: Option<&'a LeadRecord>,
    theme: &'a ConsoleTheme,
}

impl<'a> DraftPreview<'a> {
    pub fn new(lead: Option<&'a LeadRecord>, theme: &'a ConsoleTheme) -> Self {
        Self { lead, theme }
    }

    fn lines(&self, lead: &'a LeadRecord) -> Vec<Line<'a>> {
        let theme = self.theme;
        let mut lines = vec![
            Line::styled(
                lead.email_subject.as_deref().unwrap_or_default(),
                theme.text().add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::from(vec![
                Span::styled(format!(" {} ", lead.initial()), theme.avatar()),
                Span::raw("  "),
                Span::styled(
                    format!("To: {}", lead.person_or_default()),
                    theme.text().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::styled(format!("     {}", lead.company_or_default()), theme.faint()),
            Line::raw(""),
        ];

        match lead.body_lines() {
            Some(body) => lines.extend(body.into_iter().map(|l| Line::styled(l, theme.text()))),
            None => lines.push(Line::styled(NO_DRAFT, theme.dimmed())),
        }

        if lead.hypothesis.is_some() || !lead.pain_points.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::styled("── Research ──", theme.faint()));
            if let Some(hypothesis) = lead.hypothesis.as_deref() {
                lines.push(Line::from(vec![
                    Span::styled("Hypothesis: ", theme.dimmed()),
                    Span::styled(hypothesis, theme.text()),
                ]));
            }
            for pain in &lead.pain_points {
                lines.push(Line::styled(format!("• {}", pain), theme.dimmed()));
            }
        }

        let links = lead.links();
        if !links.is_empty() {
            lines.push(Line::raw(""));
            for (kind, url) in links {
                lines.push(Line::from(vec![
                    Span::styled(kind.label(), theme.link(kind)),
                    Span::raw("  "),
                    Span::styled(url, theme.faint()),
                ]));
            }
        }

        lines
    }
}

impl Widget for DraftPreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.panel_border(false))
            .padding(Padding::horizontal(2));

        match self.lead {
            Some(lead) => {
                let lines = self.lines(lead);
                Paragraph::new(lines)
                    .block(block)
                    .wrap(Wrap { trim: false })
                    .render(area, buf);
            }
            None => {
                let top = area.height.saturating_sub(2) / 2;
                let mut lines = vec![Line::raw(""); top.saturating_sub(1) as usize];
                lines.push(Line::styled(icons::CHECK, self.theme.faint()));
                lines.push(Line::styled(EMPTY_HINT, self.theme.faint()));
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .block(block)
                    .render(area, buf);
            }
        }
    }
}
