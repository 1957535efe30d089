use thiserror::Error;

/// Errors raised by the catalog, sessions and the quiz engine.
///
/// A call that fails with any of these leaves the session untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// A formula was looked up that the catalog does not contain.
    #[error("unknown formula: {0}")]
    UnknownFormula(String),

    /// An answer arrived after the last question was already answered.
    #[error("the quiz session is already complete")]
    SessionComplete,

    /// An answer or session view was requested while no quiz is running.
    #[error("no quiz session is active")]
    NoActiveSession,

    /// A question count was chosen outside the count selection step.
    #[error("question count can only be chosen after selecting all ions")]
    NotChoosingCount,

    /// A question count that is neither `all` nor a non-negative integer.
    #[error("invalid question count `{0}`, expected a number or `all`")]
    InvalidCount(String),

    /// The embedded ion table could not be loaded.
    #[error("ion catalog: {0}")]
    Catalog(String),
}
