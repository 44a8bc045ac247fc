mod error;
mod ids;
mod memory;
mod quiz;
mod words;

pub use error::ContentError;
pub use ids::{ParseIdError, SessionId};

pub use memory::{CardPair, CardPairDraft};
pub use quiz::{Difficulty, Question, QuestionDraft, QuizDraft, QuizMeta, QuizPack};
pub use words::{LetterPool, TargetWord, WordSet, WordSetDraft};
