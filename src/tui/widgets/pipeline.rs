//! Pipeline Strip Widget
//!
//! Five stage boxes left to right with arrows between them.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::utils::truncate;
use crate::pipeline::{PipelineGraph, StageStatus};
use crate::tui::theme::{icons, ConsoleTheme};

const ARROW_WIDTH: u16 = 5;

pub struct PipelineStrip<'a> {
    graph: &'a PipelineGraph,
    theme: &'a ConsoleTheme,
}

impl<'a> PipelineStrip<'a> {
    pub fn new(graph: &'a PipelineGraph, theme: &'a ConsoleTheme) -> Self {
        Self { graph, theme }
    }
}

impl Widget for PipelineStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let stages = self.graph.stages();
        let count = stages.len() as u16;
        if area.height < 3 || count == 0 {
            return;
        }

        let arrows = ARROW_WIDTH * (count - 1);
        let box_width = area.width.saturating_sub(arrows) / count;
        if box_width < 5 {
            return;
        }
        let y = area.y + (area.height - 3) / 2;

        for (i, stage) in stages.iter().enumerate() {
            let x = area.x + i as u16 * (box_width + ARROW_WIDTH);
            let rect = Rect::new(x, y, box_width, 3);

            let border_type = match stage.status {
                StageStatus::Active => BorderType::Thick,
                _ => BorderType::Rounded,
            };
            let mut block = Block::default()
                .borders(Borders::ALL)
                .border_type(border_type)
                .border_style(self.theme.stage_border(stage.status));
            if stage.status == StageStatus::Done {
                block = block.style(self.theme.stage_label(StageStatus::Done));
            }

            let label = truncate(stage.label(), box_width.saturating_sub(2) as usize);
            Paragraph::new(Line::styled(label, self.theme.stage_label(stage.status)))
                .alignment(Alignment::Center)
                .block(block)
                .render(rect, buf);

            if let Some(edge) = self.graph.outbound(stage.id) {
                buf.set_string(
                    x + box_width + 1,
                    y + 1,
                    icons::ARROW,
                    self.theme.transition(edge.highlighted),
                );
            }
        }
    }
}
