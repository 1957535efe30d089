use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::{
    catalog::Catalog,
    error::QuizError,
    session::{
        AnswerRecord, CompletionReport, Feedback, QuestionCount, QuizMode, QuizSession,
        SessionConfig,
    },
};

/// Where the engine is between user actions.
#[derive(Debug, Clone)]
pub enum Phase {
    /// No session; waiting for a mode.
    ModeSelection,
    /// All ions was picked; waiting for a question count.
    CountSelection,
    /// A session exists, active or complete.
    Quiz(QuizSession),
}

/// Drives the quiz: mode and count selection, answers, reset.
///
/// One engine serves one user. Every transition runs to completion and a
/// rejected call leaves the engine as it was.
#[derive(Debug)]
pub struct QuizEngine<R: Rng = StdRng> {
    catalog: Catalog,
    phase: Phase,
    last_config: Option<SessionConfig>,
    rng: R,
}

impl QuizEngine<StdRng> {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_rng(catalog, StdRng::from_entropy())
    }
}

impl<R: Rng> QuizEngine<R> {
    pub fn with_rng(catalog: Catalog, rng: R) -> Self {
        Self {
            catalog,
            phase: Phase::ModeSelection,
            last_config: None,
            rng,
        }
    }

    /// Pick a mode. All ions moves to count selection, any other mode starts
    /// a session over every matching ion. Any running session is discarded.
    pub fn select_mode(&mut self, mode: QuizMode) {
        debug!(%mode, "mode selected");
        if mode.needs_count() {
            self.phase = Phase::CountSelection;
        } else {
            self.configure(SessionConfig::new(mode, QuestionCount::All));
        }
    }

    /// Finish configuring an all-ions quiz.
    pub fn select_question_count(&mut self, count: QuestionCount) -> Result<(), QuizError> {
        if !matches!(self.phase, Phase::CountSelection) {
            warn!(%count, "question count chosen outside count selection");
            return Err(QuizError::NotChoosingCount);
        }
        self.configure(SessionConfig::new(QuizMode::AllIons, count));
        Ok(())
    }

    /// Start a fresh session for `config`, whatever the current phase.
    pub fn configure(&mut self, config: SessionConfig) {
        let session = QuizSession::configure(&self.catalog, config, &mut self.rng);
        info!(
            mode = %config.mode,
            count = %config.count,
            questions = session.total(),
            "quiz configured"
        );
        self.last_config = Some(config);
        self.phase = Phase::Quiz(session);
    }

    /// Start over with the mode and count of the last session.
    pub fn restart(&mut self) -> Result<(), QuizError> {
        let config = self.last_config.ok_or(QuizError::NoActiveSession)?;
        self.configure(config);
        Ok(())
    }

    /// Submit an answer for the current question.
    ///
    /// Returns `Ok(None)` when the input is blank.
    pub fn submit_answer(&mut self, raw: &str) -> Result<Option<AnswerRecord>, QuizError> {
        let Phase::Quiz(session) = &mut self.phase else {
            warn!("answer submitted without an active session");
            return Err(QuizError::NoActiveSession);
        };

        let record = match session.submit_answer(&self.catalog, raw) {
            Ok(record) => record.cloned(),
            Err(e) => {
                warn!(error = %e, "answer rejected");
                return Err(e);
            }
        };

        if let Some(ref record) = record {
            debug!(
                formula = %record.formula,
                correct = record.is_correct,
                index = session.current_index(),
                "answer recorded"
            );
            if session.is_complete() {
                let report = session.report();
                info!(
                    score = report.final_score,
                    total = report.total_questions,
                    "quiz complete"
                );
            }
        }

        Ok(record)
    }

    /// Discard any session and go back to mode selection.
    pub fn reset(&mut self) {
        debug!("reset");
        self.phase = Phase::ModeSelection;
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn last_config(&self) -> Option<SessionConfig> {
        self.last_config
    }

    pub fn session(&self) -> Option<&QuizSession> {
        match &self.phase {
            Phase::Quiz(session) => Some(session),
            _ => None,
        }
    }

    pub fn current_formula(&self) -> Option<&str> {
        self.session().and_then(QuizSession::current_formula)
    }

    /// `(answered, total)` for the running session.
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.session().map(|s| (s.current_index(), s.total()))
    }

    pub fn score(&self) -> Option<usize> {
        self.session().map(QuizSession::score)
    }

    pub fn history(&self) -> &[AnswerRecord] {
        self.session().map(QuizSession::history).unwrap_or_default()
    }

    /// Feedback for the last answer; cleared once read.
    pub fn take_feedback(&mut self) -> Option<Feedback> {
        match &mut self.phase {
            Phase::Quiz(session) => session.take_feedback(),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.session().is_some_and(QuizSession::is_complete)
    }

    pub fn report(&self) -> Option<CompletionReport> {
        self.session().map(QuizSession::report)
    }
}
