//! UI-only state: focus, scrolling, overlays
//!
//! Everything the pipeline can change lives in `ConsoleState`; this holds
//! only what the operator's keyboard changes.

/// Focusable areas, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Niche,
    Count,
    Drafts,
    Log,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Self::Niche => Self::Count,
            Self::Count => Self::Drafts,
            Self::Drafts => Self::Log,
            Self::Log => Self::Niche,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Niche => Self::Log,
            Self::Count => Self::Niche,
            Self::Drafts => Self::Count,
            Self::Log => Self::Drafts,
        }
    }
}

#[derive(Debug)]
pub struct TuiState {
    pub focus: Focus,
    /// Lines scrolled up from the log tail (0 = follow)
    pub log_offset: usize,
    pub show_help: bool,
    pub should_quit: bool,
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            focus: Focus::Drafts,
            log_offset: 0,
            show_help: false,
            should_quit: false,
        }
    }
}

impl TuiState {
    pub fn scroll_log_up(&mut self, log_len: usize) {
        self.log_offset = (self.log_offset + 1).min(log_len.saturating_sub(1));
    }

    pub fn scroll_log_down(&mut self) {
        self.log_offset = self.log_offset.saturating_sub(1);
    }

    pub fn follow_log(&mut self) {
        self.log_offset = 0;
    }

    pub fn is_following_log(&self) -> bool {
        self.log_offset == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycle() {
        let mut focus = Focus::Niche;
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Niche);
        assert_eq!(Focus::Niche.prev(), Focus::Log);
    }

    #[test]
    fn test_log_scroll_bounds() {
        let mut state = TuiState::default();
        state.scroll_log_up(3);
        state.scroll_log_up(3);
        state.scroll_log_up(3);
        assert_eq!(state.log_offset, 2);

        state.scroll_log_down();
        assert_eq!(state.log_offset, 1);
        state.follow_log();
        assert!(state.is_following_log());

        state.scroll_log_up(0);
        assert_eq!(state.log_offset, 0);
    }
}
