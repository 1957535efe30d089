use clap::ValueEnum;
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{
    catalog::{Catalog, Tag},
    error::QuizError,
    util::{normalize_answer, percentage},
};

/// Which part of the catalog a quiz draws from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum QuizMode {
    Cations,
    Anions,
    #[strum(to_string = "Compound ions")]
    CompoundIons,
    #[strum(to_string = "All ions")]
    AllIons,
}

impl QuizMode {
    pub const ALL: [QuizMode; 4] = [
        QuizMode::Cations,
        QuizMode::Anions,
        QuizMode::CompoundIons,
        QuizMode::AllIons,
    ];

    /// Tag filter for the mode; `None` means the whole catalog.
    pub fn tag(&self) -> Option<Tag> {
        match self {
            QuizMode::Cations => Some(Tag::Cation),
            QuizMode::Anions => Some(Tag::Anion),
            QuizMode::CompoundIons => Some(Tag::Compound),
            QuizMode::AllIons => None,
        }
    }

    /// Whether the mode asks for a question count before starting.
    pub fn needs_count(&self) -> bool {
        matches!(self, QuizMode::AllIons)
    }

    /// Formulas this mode may ask about, in catalog order.
    pub fn candidates<'a>(&self, catalog: &'a Catalog) -> Vec<&'a str> {
        match self.tag() {
            Some(tag) => catalog.entries_by_tag(tag),
            None => catalog.all_formulas(),
        }
    }
}

/// How many questions a session asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionCount {
    #[default]
    All,
    Limit(usize),
}

impl QuestionCount {
    /// Number of questions drawn from `available` candidates.
    pub fn resolve(&self, available: usize) -> usize {
        match self {
            QuestionCount::All => available,
            QuestionCount::Limit(n) => (*n).min(available),
        }
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionCount::All => write!(f, "all"),
            QuestionCount::Limit(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for QuestionCount {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(QuestionCount::All);
        }
        trimmed
            .parse::<usize>()
            .map(QuestionCount::Limit)
            .map_err(|_| QuizError::InvalidCount(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: QuizMode,
    pub count: QuestionCount,
}

impl SessionConfig {
    pub fn new(mode: QuizMode, count: QuestionCount) -> Self {
        Self { mode, count }
    }
}

/// One submitted answer. Never changed after it is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub formula: String,
    /// Trimmed but not case-folded.
    pub user_answer: String,
    pub is_correct: bool,
    pub canonical_answer: String,
}

/// Message produced by the last answer, shown once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect { formula: String, canonical: String },
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Correct => write!(f, "Correct! Well done."),
            Feedback::Incorrect { formula, canonical } => write!(
                f,
                "Not quite. The correct answer for {formula} is {canonical}."
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionReport {
    pub final_score: usize,
    pub total_questions: usize,
    pub percentage: f64,
}

impl fmt::Display for CompletionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} ({:.1}%)",
            self.final_score, self.total_questions, self.percentage
        )
    }
}

/// State of one play-through, from configuration to completion.
#[derive(Debug, Clone)]
pub struct QuizSession {
    config: SessionConfig,
    questions: Vec<String>,
    current_index: usize,
    score: usize,
    history: Vec<AnswerRecord>,
    pending_feedback: Option<Feedback>,
}

impl QuizSession {
    /// Draw a random, duplicate-free question sequence for `config`.
    ///
    /// An empty candidate set yields a session that is already complete.
    pub fn configure<R: Rng + ?Sized>(
        catalog: &Catalog,
        config: SessionConfig,
        rng: &mut R,
    ) -> Self {
        let mut questions: Vec<String> = config
            .mode
            .candidates(catalog)
            .into_iter()
            .map(str::to_string)
            .collect();
        let available = questions.len();

        questions.shuffle(rng);
        questions.truncate(config.count.resolve(available));

        Self::with_questions(config, questions)
    }

    /// Start a session over a fixed question sequence.
    pub fn with_questions(config: SessionConfig, questions: Vec<String>) -> Self {
        Self {
            config,
            questions,
            current_index: 0,
            score: 0,
            history: Vec::new(),
            pending_feedback: None,
        }
    }

    /// Score `raw` against the current question and advance.
    ///
    /// Blank input is ignored and returns `Ok(None)`.
    pub fn submit_answer(
        &mut self,
        catalog: &Catalog,
        raw: &str,
    ) -> Result<Option<&AnswerRecord>, QuizError> {
        let formula = self
            .current_formula()
            .ok_or(QuizError::SessionComplete)?;

        let answer = raw.trim();
        if answer.is_empty() {
            return Ok(None);
        }

        let entry = catalog.lookup(formula)?;
        let normalized = normalize_answer(answer);
        let is_correct = entry
            .accepted_names
            .iter()
            .any(|name| normalize_answer(name) == normalized);

        let record = AnswerRecord {
            formula: entry.formula.clone(),
            user_answer: answer.to_string(),
            is_correct,
            canonical_answer: entry.canonical_name().to_string(),
        };

        self.pending_feedback = Some(if is_correct {
            self.score += 1;
            Feedback::Correct
        } else {
            Feedback::Incorrect {
                formula: record.formula.clone(),
                canonical: record.canonical_answer.clone(),
            }
        });
        self.history.push(record);
        self.current_index += 1;

        Ok(self.history.last())
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn mode(&self) -> QuizMode {
        self.config.mode
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn current_formula(&self) -> Option<&str> {
        self.questions.get(self.current_index).map(String::as_str)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    pub fn is_complete(&self) -> bool {
        self.current_index >= self.questions.len()
    }

    pub fn pending_feedback(&self) -> Option<&Feedback> {
        self.pending_feedback.as_ref()
    }

    /// Read the pending feedback, clearing it.
    pub fn take_feedback(&mut self) -> Option<Feedback> {
        self.pending_feedback.take()
    }

    pub fn report(&self) -> CompletionReport {
        CompletionReport {
            final_score: self.score,
            total_questions: self.total(),
            percentage: percentage(self.score, self.total()),
        }
    }
}
