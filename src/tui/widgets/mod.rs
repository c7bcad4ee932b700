//! TUI Widgets - UI Components
//!
//! Each widget is a stateless renderer over borrowed console state.
//! Business logic stays in the mission engine.

mod header;
mod inbox;
mod log_panel;
mod pipeline;
mod preview;

pub use header::Header;
pub use inbox::Inbox;
pub use log_panel::LogPanel;
pub use pipeline::PipelineStrip;
pub use preview::DraftPreview;

/// Common widget utilities
pub mod utils {
    /// Truncate to `max_chars` characters with an ellipsis
    pub fn truncate(s: &str, max_chars: usize) -> String {
        if s.chars().count() <= max_chars {
            s.to_string()
        } else if max_chars <= 1 {
            s.chars().take(max_chars).collect()
        } else {
            let head: String = s.chars().take(max_chars - 1).collect();
            format!("{}…", head)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::utils::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello w…");
        assert_eq!(truncate("hi", 2), "hi");
        assert_eq!(truncate("Café Société", 5), "Café…");
    }
}
