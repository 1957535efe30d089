use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// A numbered, vertically centered menu with one highlighted entry.
pub struct Menu<'a> {
    pub title: &'a str,
    pub prompt: &'a str,
    pub items: Vec<String>,
    pub cursor: usize,
    pub legend: &'a str,
}

impl Widget for Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let menu_height = self.items.len() as u16 + 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(super::HORIZONTAL_MARGIN)
            .vertical_margin(super::VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Min(0),
                Constraint::Length(1), // prompt
                Constraint::Length(menu_height),
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            self.title,
            bold_style.fg(Color::Cyan),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        Paragraph::new(Span::styled(self.prompt, bold_style))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        let lines: Vec<Line> = self
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let selected = idx == self.cursor;
                let marker = if selected { "▶" } else { " " };
                let style = if selected {
                    bold_style.fg(Color::Magenta)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(format!("{marker} {}  {item}", idx + 1), style))
            })
            .collect();

        let width = chunks[3].width.min(40);
        let menu_area = Rect {
            x: chunks[3].x + (chunks[3].width - width) / 2,
            width,
            ..chunks[3]
        };
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .render(menu_area, buf);

        Paragraph::new(Span::styled(
            self.legend,
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[5], buf);
    }
}
