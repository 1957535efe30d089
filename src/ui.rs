pub mod history;
pub mod menu;
pub mod progress;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
};

use crate::{
    app::App,
    formula::to_unicode,
    session::Feedback,
    ui::{
        history::HistoryPanel,
        screen::Screen,
        progress::{format_percentage, progress_ratio, score_label, visible_tail},
    },
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
const SIDEBAR_WIDTH: u16 = 34;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(self.state()).render(self, area, buf);

        if self.celebration.is_active {
            render_celebration_particles(&self.celebration, area, buf);
        }
    }
}

/// Split off the history sidebar when there is room for it.
fn with_sidebar(area: Rect) -> (Rect, Option<Rect>) {
    if area.width < SIDEBAR_WIDTH * 2 {
        return (area, None);
    }
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(SIDEBAR_WIDTH)])
        .split(area);
    (chunks[0], Some(chunks[1]))
}

fn feedback_line(feedback: &Feedback) -> Line<'static> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    match feedback {
        Feedback::Correct => Line::from(Span::styled(
            "✅ Correct! Well done.",
            bold_style.fg(Color::Green),
        )),
        Feedback::Incorrect { formula, canonical } => Line::from(vec![
            Span::styled("❌ Not quite. ", bold_style.fg(Color::Red)),
            Span::raw(format!("The correct answer for {} is ", to_unicode(formula))),
            Span::styled(canonical.clone(), bold_style),
            Span::raw("."),
        ]),
    }
}

pub(crate) fn render_quiz(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let (main, sidebar) = with_sidebar(area);
    if let Some(sidebar) = sidebar {
        HistoryPanel {
            history: app.engine.history(),
        }
        .render(sidebar, buf);
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(1)
        .constraints([
            Constraint::Length(3), // progress + score
            Constraint::Min(0),
            Constraint::Length(1), // question
            Constraint::Length(3), // formula
            Constraint::Length(2), // feedback
            Constraint::Length(3), // answer box
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(main);

    let (answered, total) = app.engine.progress().unwrap_or((0, 0));
    let score = app.engine.score().unwrap_or(0);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(20)])
        .split(chunks[0]);

    Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(progress_ratio(answered, total))
        .label(format!("{answered} / {total}"))
        .render(top[0], buf);

    Paragraph::new(Span::styled(score_label(score, answered), bold_style))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .render(top[1], buf);

    Paragraph::new(Span::styled("What is the name of this ion?", bold_style))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    let formula = app.engine.current_formula().map(to_unicode).unwrap_or_default();
    Paragraph::new(Span::styled(formula, bold_style.fg(Color::Cyan)))
        .block(Block::default().borders(Borders::TOP | Borders::BOTTOM))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    if let Some(ref feedback) = app.feedback {
        Paragraph::new(feedback_line(feedback))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[4], buf);
    }

    // Two border columns plus the cursor
    let input_width = chunks[5].width.saturating_sub(3) as usize;
    Paragraph::new(Line::from(vec![
        Span::raw(visible_tail(&app.input, input_width).to_string()),
        Span::styled("▏", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Your answer (e.g. sulfate)"),
    )
    .render(chunks[5], buf);

    Paragraph::new(Span::styled(
        "(enter) submit / (ctrl+r) new quiz / (ctrl+b) modes / (esc)ape",
        italic_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[7], buf);
}

pub(crate) fn render_complete(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let (main, sidebar) = with_sidebar(area);
    if let Some(sidebar) = sidebar {
        HistoryPanel {
            history: app.engine.history(),
        }
        .render(sidebar, buf);
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1), // banner
            Constraint::Length(1),
            Constraint::Length(1), // score
            Constraint::Length(1), // percentage
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(main);

    Paragraph::new(Span::styled(
        "🎉 Quiz Complete! 🎉",
        bold_style.fg(Color::Green),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    if let Some(report) = app.engine.report() {
        Paragraph::new(Span::styled(
            format!(
                "Your final score: {} / {}",
                report.final_score, report.total_questions
            ),
            bold_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

        let summary = if report.total_questions == 0 {
            "There were no questions in this quiz.".to_string()
        } else {
            format!("You scored {}.", format_percentage(report.percentage))
        };
        Paragraph::new(summary)
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }

    Paragraph::new(Span::styled(
        "(r)estart / (m)odes / (esc)ape",
        italic_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[6], buf);
}

/// Render celebration particles on top of the results screen
fn render_celebration_particles(
    celebration: &crate::celebration::CelebrationAnimation,
    area: Rect,
    buf: &mut Buffer,
) {
    let colors = [
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Green,
        Color::Red,
        Color::Blue,
        Color::LightYellow,
    ];

    for particle in &celebration.particles {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let x = particle.x as u16;
        let y = particle.y as u16;

        if x < area.width && y < area.height {
            let color = colors[particle.color_index % colors.len()];
            let alpha = 1.0 - (particle.age / particle.max_age);

            let style = if particle.is_text {
                if alpha > 0.4 {
                    Style::default().fg(color).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(color)
                }
            } else if alpha > 0.7 {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else if alpha > 0.3 {
                Style::default().fg(color)
            } else {
                Style::default().fg(color).add_modifier(Modifier::DIM)
            };

            if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                cell.set_symbol(&particle.symbol.to_string());
                cell.set_style(style);
            }
        }
    }
}
