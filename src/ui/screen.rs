use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::{
    app::{App, AppState},
    session::{QuestionCount, QuizMode},
    ui::{menu::Menu, render_complete, render_quiz},
};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Mode selection menu
pub struct ModeSelectScreen;

impl Screen for ModeSelectScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let catalog = app.engine.catalog();
        let items = QuizMode::ALL
            .iter()
            .map(|mode| format!("{mode} ({})", mode.candidates(catalog).len()))
            .collect();

        Menu {
            title: "🧪 Ion Naming Practice",
            prompt: "Which ions do you want to practise?",
            items,
            cursor: app.mode_cursor,
            legend: "(1-4) or ↑/↓ + enter to choose / (esc)ape",
        }
        .render(area, buf);
    }
}

/// Question count menu for all-ions quizzes
pub struct CountSelectScreen;

impl Screen for CountSelectScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let available = app.engine.catalog().len();
        let items = app
            .count_options()
            .into_iter()
            .map(|count| match count {
                QuestionCount::All => format!("All {available} questions"),
                QuestionCount::Limit(_) => format!("{} questions", count.resolve(available)),
            })
            .collect();

        Menu {
            title: "All ions",
            prompt: "How many questions?",
            items,
            cursor: app.count_cursor,
            legend: "↑/↓ + enter or number to choose / (b)ack / (esc)ape",
        }
        .render(area, buf);
    }
}

/// Question, answer box, progress and history
pub struct QuizScreen;

impl Screen for QuizScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_quiz(app, area, buf);
    }
}

/// Final score
pub struct CompleteScreen;

impl Screen for CompleteScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_complete(app, area, buf);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: AppState) -> Box<dyn Screen> {
    match state {
        AppState::ModeSelect => Box::new(ModeSelectScreen),
        AppState::CountSelect => Box::new(CountSelectScreen),
        AppState::Quiz => Box::new(QuizScreen),
        AppState::Complete => Box::new(CompleteScreen),
    }
}
