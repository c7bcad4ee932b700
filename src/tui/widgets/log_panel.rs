//! Log Panel Widget
//!
//! Terminal-style view of the mission log. Follows the tail unless the
//! operator has scrolled up.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::log_stream::{LogKind, LogStream};
use crate::tui::theme::{icons, ConsoleTheme};

pub struct LogPanel<'a> {
    log: &'a LogStream,
    theme: &'a ConsoleTheme,
    /// Lines scrolled up from the tail
    offset: usize,
    focused: bool,
}

impl<'a> LogPanel<'a> {
    pub fn new(log: &'a LogStream, theme: &'a ConsoleTheme) -> Self {
        Self {
            log,
            theme,
            offset: 0,
            focused: false,
        }
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for LogPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.offset > 0 {
            format!(" {} TERMINAL (↑{}) ", icons::TERMINAL, self.offset)
        } else {
            format!(" {} TERMINAL ", icons::TERMINAL)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.panel_border(self.focused))
            .title(Span::styled(title, self.theme.text()));

        let visible = area.height.saturating_sub(2) as usize;
        let entries = self.log.entries();
        let end = entries.len().saturating_sub(self.offset);
        let start = end.saturating_sub(visible);

        let lines: Vec<Line> = entries[start..end]
            .iter()
            .map(|entry| {
                let style = match entry.kind {
                    LogKind::Remote => self.theme.dimmed(),
                    LogKind::Console => self.theme.text(),
                };
                Line::styled(entry.to_string(), style)
            })
            .collect();

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::test_support::{contains, rows};

    fn log_with(lines: usize) -> LogStream {
        let mut log = LogStream::new();
        for i in 0..lines {
            log.remote(format!("line {i:02}"));
        }
        log
    }

    fn render(log: &LogStream, offset: usize) -> Buffer {
        let theme = ConsoleTheme::new();
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);
        LogPanel::new(log, &theme).offset(offset).render(area, &mut buf);
        buf
    }

    #[test]
    fn test_follows_tail() {
        let buf = render(&log_with(10), 0);
        assert!(contains(&buf, "> line 09"));
        assert!(contains(&buf, "> line 06"));
        assert!(!contains(&buf, "> line 05"), "{:?}", rows(&buf));
    }

    #[test]
    fn test_scrolled_view() {
        let buf = render(&log_with(10), 3);
        assert!(contains(&buf, "> line 06"));
        assert!(!contains(&buf, "> line 07"));
        assert!(contains(&buf, "(↑3)"));
    }

    #[test]
    fn test_console_lines_unprefixed() {
        let mut log = LogStream::new();
        log.console("Initializing");
        let buf = render(&log, 0);
        assert!(contains(&buf, "│Initializing"));
    }
}
