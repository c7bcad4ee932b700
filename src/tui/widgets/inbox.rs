//! Drafts Inbox Widget
//!
//! Two rows per draft (company, person) plus a spacer row. The selected draft gets an accent
//! bar and a raised background; the view scrolls to keep it visible.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use super::utils::truncate;
use crate::lead::LeadStore;
use crate::tui::theme::{icons, ConsoleTheme};

const ROWS_PER_DRAFT: u16 = 3;

pub struct Inbox<'a> {
    leads: &'a LeadStore,
    theme: &'a ConsoleTheme,
    focused: bool,
}

impl<'a> Inbox<'a> {
    pub fn new(leads: &'a LeadStore, theme: &'a ConsoleTheme) -> Self {
        Self {
            leads,
            theme,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for Inbox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.panel_border(self.focused))
            .title(Span::styled(
                format!(" {} Drafts ({}) ", icons::MAIL, self.leads.len()),
                self.theme.text().add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < ROWS_PER_DRAFT || inner.width < 4 {
            return;
        }

        let capacity = (inner.height / ROWS_PER_DRAFT) as usize;
        let selected = self.leads.selected_index();
        let first = match selected {
            Some(i) if i >= capacity => i + 1 - capacity,
            _ => 0,
        };
        let text_width = inner.width.saturating_sub(2) as usize;

        for (row, (index, lead)) in self
            .leads
            .records()
            .iter()
            .enumerate()
            .skip(first)
            .take(capacity)
            .enumerate()
        {
            let y = inner.y + row as u16 * ROWS_PER_DRAFT;
            let is_selected = selected == Some(index);

            if is_selected {
                let highlight = Style::default().bg(self.theme.selected_row);
                buf.set_style(Rect::new(inner.x, y, inner.width, 2), highlight);
                for dy in 0..2 {
                    buf.set_string(inner.x, y + dy, icons::SELECTED_BAR, self.theme.accent());
                }
            }

            buf.set_string(
                inner.x + 2,
                y,
                truncate(lead.company_or_default(), text_width),
                self.theme.text().add_modifier(Modifier::BOLD),
            );
            buf.set_string(
                inner.x + 2,
                y + 1,
                truncate(lead.person_or_default(), text_width),
                self.theme.faint(),
            );
        }
    }
}
