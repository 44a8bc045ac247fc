use thiserror::Error;

/// Errors raised while validating session content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentError {
    #[error("quiz title cannot be empty")]
    EmptyTitle,

    #[error("quiz duration must be > 0 minutes")]
    ZeroDuration,

    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("a question needs at least two options, got {count}")]
    TooFewOptions { count: usize },

    #[error("option {index} is empty")]
    EmptyOption { index: usize },

    #[error("correct option {correct} is out of range for {options} options")]
    CorrectOutOfRange { correct: usize, options: usize },

    #[error("card face cannot be empty")]
    EmptyCardFace,

    #[error("letter pool must contain only letters and cannot be empty")]
    InvalidLetters,

    #[error("a word set needs at least one target word")]
    NoTargetWords,

    #[error("invalid target word: {word:?}")]
    InvalidWord { word: String },

    #[error("target word {word} cannot be spelled from the letter pool")]
    WordNotInPool { word: String },

    #[error("target word {word} is listed twice")]
    DuplicateWord { word: String },
}
