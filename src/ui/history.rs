use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::{formula::to_unicode, session::AnswerRecord};

/// Sidebar log of every answer, newest first.
pub struct HistoryPanel<'a> {
    pub history: &'a [AnswerRecord],
}

impl HistoryPanel<'_> {
    pub fn lines(&self) -> Vec<Line<'static>> {
        if self.history.is_empty() {
            return vec![Line::from(Span::styled(
                "No answers yet",
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            ))];
        }

        self.history
            .iter()
            .rev()
            .map(|record| {
                let formula = to_unicode(&record.formula);
                if record.is_correct {
                    Line::from(vec![
                        Span::styled("✓ ", Style::default().fg(Color::Green)),
                        Span::raw(format!("{formula}: {}", record.user_answer)),
                    ])
                } else {
                    Line::from(vec![
                        Span::styled("✗ ", Style::default().fg(Color::Red)),
                        Span::raw(format!("{formula}: ")),
                        Span::styled(
                            record.user_answer.clone(),
                            Style::default().add_modifier(Modifier::CROSSED_OUT),
                        ),
                        Span::styled(
                            format!(" → {}", record.canonical_answer),
                            Style::default().fg(Color::Yellow),
                        ),
                    ])
                }
            })
            .collect()
    }
}

impl Widget for HistoryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!("History ({})", self.history.len());
        Paragraph::new(self.lines())
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
