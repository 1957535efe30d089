use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::{
    celebration::{headline, CelebrationAnimation},
    config::Config,
    engine::{Phase, QuizEngine},
    results_log::{ResultRow, ResultsLog},
    session::{Feedback, QuestionCount, QuizMode, SessionConfig},
};

/// Which screen the app is showing, derived from the engine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    ModeSelect,
    CountSelect,
    Quiz,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Presentation state around one quiz engine.
#[derive(Debug)]
pub struct App {
    pub engine: QuizEngine,
    pub config: Config,
    /// Answer being typed.
    pub input: String,
    /// Feedback for the previous answer, shown until the next one.
    pub feedback: Option<Feedback>,
    pub mode_cursor: usize,
    pub count_cursor: usize,
    pub celebration: CelebrationAnimation,
    pub results_log: Option<ResultsLog>,
    viewport: (u16, u16),
}

impl App {
    pub fn new(engine: QuizEngine, config: Config) -> Self {
        let results_log = config.log_results.then(ResultsLog::new);
        Self {
            engine,
            config,
            input: String::new(),
            feedback: None,
            mode_cursor: 0,
            count_cursor: 0,
            celebration: CelebrationAnimation::new(),
            results_log,
            viewport: (80, 24),
        }
    }

    pub fn with_results_log(mut self, log: ResultsLog) -> Self {
        self.results_log = Some(log);
        self
    }

    pub fn state(&self) -> AppState {
        match self.engine.phase() {
            Phase::ModeSelection => AppState::ModeSelect,
            Phase::CountSelection => AppState::CountSelect,
            Phase::Quiz(session) if session.is_complete() => AppState::Complete,
            Phase::Quiz(_) => AppState::Quiz,
        }
    }

    /// Entries of the count menu: configured presets, then "All".
    pub fn count_options(&self) -> Vec<QuestionCount> {
        self.config
            .normalized_presets()
            .into_iter()
            .map(QuestionCount::Limit)
            .chain(std::iter::once(QuestionCount::All))
            .collect()
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    /// Jump straight into a mode, optionally with a question count.
    pub fn start(&mut self, mode: QuizMode, count: Option<QuestionCount>) {
        self.transition(|engine| match count {
            Some(count) => engine.configure(SessionConfig::new(mode, count)),
            None => engine.select_mode(mode),
        });
    }

    pub fn on_tick(&mut self) {
        self.celebration.update();
    }

    pub fn on_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return KeyOutcome::Quit;
        }

        match self.state() {
            AppState::ModeSelect => self.on_mode_key(key),
            AppState::CountSelect => self.on_count_key(key),
            AppState::Quiz => self.on_quiz_key(key),
            AppState::Complete => self.on_complete_key(key),
        }
    }

    fn on_mode_key(&mut self, key: KeyEvent) -> KeyOutcome {
        let modes = QuizMode::ALL;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.mode_cursor = self.mode_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.mode_cursor = (self.mode_cursor + 1).min(modes.len() - 1);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                if let Some(&mode) = modes.get(idx) {
                    self.mode_cursor = idx;
                    self.choose_mode(mode);
                }
            }
            KeyCode::Enter => self.choose_mode(modes[self.mode_cursor]),
            KeyCode::Char('q') => return KeyOutcome::Quit,
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn choose_mode(&mut self, mode: QuizMode) {
        self.count_cursor = 0;
        self.transition(|engine| engine.select_mode(mode));
    }

    fn on_count_key(&mut self, key: KeyEvent) -> KeyOutcome {
        let options = self.count_options();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.count_cursor = self.count_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.count_cursor = (self.count_cursor + 1).min(options.len() - 1);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                if let Some(&count) = options.get(idx) {
                    self.count_cursor = idx;
                    self.choose_count(count);
                }
            }
            KeyCode::Enter => {
                if let Some(&count) = options.get(self.count_cursor) {
                    self.choose_count(count);
                }
            }
            KeyCode::Backspace | KeyCode::Char('b') => self.engine.reset(),
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn choose_count(&mut self, count: QuestionCount) {
        self.transition(|engine| {
            if let Err(e) = engine.select_question_count(count) {
                warn!(error = %e, "count selection rejected");
            }
        });
    }

    fn on_quiz_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('r') => self.restart(),
                KeyCode::Char('b') => self.back_to_modes(),
                _ => {}
            }
            return KeyOutcome::Continue;
        }

        match key.code {
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => self.submit(),
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn on_complete_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char('m') | KeyCode::Char('b') => self.back_to_modes(),
            KeyCode::Char('q') => return KeyOutcome::Quit,
            _ => {}
        }
        KeyOutcome::Continue
    }

    /// Submit the typed answer. Blank input stays on the same question.
    pub fn submit(&mut self) {
        let raw = std::mem::take(&mut self.input);
        let was_complete = self.engine.is_complete();

        match self.engine.submit_answer(&raw) {
            Ok(Some(_)) => {
                self.feedback = self.engine.take_feedback();
                if !was_complete && self.engine.is_complete() {
                    self.on_complete();
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "answer not accepted"),
        }
    }

    pub fn restart(&mut self) {
        self.transition(|engine| {
            if let Err(e) = engine.restart() {
                warn!(error = %e, "restart without a previous quiz");
            }
        });
    }

    pub fn back_to_modes(&mut self) {
        self.transition(|engine| engine.reset());
    }

    /// Run an engine transition that may start a new session.
    fn transition<F: FnOnce(&mut QuizEngine)>(&mut self, f: F) {
        f(&mut self.engine);
        self.input.clear();
        self.feedback = None;
        self.celebration.stop();
        // Zero-length sessions are complete as soon as they exist
        if self.engine.is_complete() {
            self.on_complete();
        }
    }

    fn on_complete(&mut self) {
        let (Some(report), Some(session)) = (self.engine.report(), self.engine.session()) else {
            return;
        };
        let mode = session.mode();
        info!(%mode, %report, "showing results");

        if report.total_questions > 0 {
            let (width, height) = self.viewport;
            self.celebration.start(width, height, headline(&report));
        }

        if let Some(ref log) = self.results_log {
            let row = ResultRow::new(mode, &report, Local::now());
            if let Err(e) = log.append(&row) {
                warn!(path = %log.path().display(), error = %e, "failed to write results log");
            }
        }
    }
}
