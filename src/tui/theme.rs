//! Console Theme - Visual Design System
//!
//! Black workspace with a single neon-green accent for live pipeline progress.

use ratatui::style::{Color, Modifier, Style};

use crate::lead::LinkKind;
use crate::pipeline::StageStatus;

/// Console color palette
pub struct ConsoleTheme {
    // Surfaces
    pub background: Color,
    pub panel: Color,
    pub selected_row: Color,
    pub avatar: Color,

    // Text
    pub text_white: Color,
    pub text_muted: Color,
    pub text_faint: Color,

    // Accent + borders
    pub neon: Color,
    pub border: Color,
    pub border_idle: Color,

    // Status + links
    pub error_red: Color,
    pub warning_orange: Color,
    pub x_blue: Color,
    pub linkedin_blue: Color,
}

impl Default for ConsoleTheme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(0, 0, 0),
            panel: Color::Rgb(8, 8, 8),            // #080808
            selected_row: Color::Rgb(26, 26, 26),  // #1A1A1A

            text_white: Color::Rgb(255, 255, 255),
            text_muted: Color::Rgb(136, 136, 136), // #888
            text_faint: Color::Rgb(102, 102, 102), // #666

            avatar: Color::Rgb(68, 68, 68),        // #444

            neon: Color::Rgb(0, 255, 148),         // #00FF94
            border: Color::Rgb(51, 51, 51),        // #333
            border_idle: Color::Rgb(85, 85, 85),   // #555

            error_red: Color::Rgb(248, 81, 73),
            warning_orange: Color::Rgb(210, 153, 34),
            x_blue: Color::Rgb(29, 161, 242),       // #1DA1F2
            linkedin_blue: Color::Rgb(0, 119, 181), // #0077B5
        }
    }
}

impl ConsoleTheme {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Styles
    // ─────────────────────────────────────────────────────────────────────

    pub fn text(&self) -> Style {
        Style::default().fg(self.text_white)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn faint(&self) -> Style {
        Style::default().fg(self.text_faint)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.neon).add_modifier(Modifier::BOLD)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.neon)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.error_red)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning_orange)
    }

    /// Recipient initial badge
    pub fn avatar(&self) -> Style {
        Style::default()
            .fg(self.text_white)
            .bg(self.avatar)
            .add_modifier(Modifier::BOLD)
    }

    /// Panel border, brighter when the panel has focus
    pub fn panel_border(&self, focused: bool) -> Style {
        if focused {
            self.accent()
        } else {
            Style::default().fg(self.border)
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Pipeline
    // ─────────────────────────────────────────────────────────────────────

    /// Border style of a stage box
    pub fn stage_border(&self, status: StageStatus) -> Style {
        match status {
            StageStatus::Idle => Style::default().fg(self.border_idle),
            StageStatus::Active => Style::default().fg(self.neon).add_modifier(Modifier::BOLD),
            StageStatus::Done => Style::default().fg(self.neon),
        }
    }

    /// Label style inside a stage box (Done is filled)
    pub fn stage_label(&self, status: StageStatus) -> Style {
        match status {
            StageStatus::Idle => self.text(),
            StageStatus::Active => self.text().add_modifier(Modifier::BOLD),
            StageStatus::Done => Style::default()
                .fg(self.background)
                .bg(self.neon)
                .add_modifier(Modifier::BOLD),
        }
    }

    pub fn transition(&self, highlighted: bool) -> Style {
        if highlighted {
            self.accent()
        } else {
            Style::default().fg(self.border_idle)
        }
    }

    pub fn link(&self, kind: LinkKind) -> Style {
        let color = match kind {
            LinkKind::Website => self.text_white,
            LinkKind::X => self.x_blue,
            LinkKind::LinkedIn => self.linkedin_blue,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Icons and Symbols
// ─────────────────────────────────────────────────────────────────────────────

pub mod icons {
    pub const ANTENNA: &str = "📡";
    pub const TERMINAL: &str = ">_";
    pub const MAIL: &str = "✉";
    pub const PLAY: &str = "▶";
    pub const CHECK: &str = "✔";

    pub const ARROW: &str = "──►";
    pub const SELECTED_BAR: &str = "▌";
}
