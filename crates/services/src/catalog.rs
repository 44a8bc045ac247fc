use async_trait::async_trait;
use rand::Rng;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use play_core::model::{
    CardPair, CardPairDraft, ContentError, Difficulty, QuestionDraft, QuizDraft, QuizPack, WordSet,
    WordSetDraft,
};

use crate::error::ContentSourceError;

/// Read-only supplier of session content.
///
/// The engine never fetches anything itself; hosts ask a source for content
/// and hand it to `Session::start`.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the quiz to play.
    ///
    /// # Errors
    ///
    /// Returns `ContentSourceError` if the quiz cannot be loaded or is invalid.
    async fn quiz(&self) -> Result<QuizPack, ContentSourceError>;

    /// Fetch the memory-match card pairs.
    ///
    /// # Errors
    ///
    /// Returns `ContentSourceError::Empty` if no pairs exist.
    async fn card_pairs(&self) -> Result<Vec<CardPair>, ContentSourceError>;

    /// Fetch the word-builder levels, in play order.
    ///
    /// # Errors
    ///
    /// Returns `ContentSourceError::Empty` if no word sets exist.
    async fn word_sets(&self) -> Result<Vec<WordSet>, ContentSourceError>;
}

//
// ─── IN-MEMORY ─────────────────────────────────────────────────────────────────
//

/// Fixed content held in memory; `builtin` ships the default games.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    quiz: Option<QuizPack>,
    pairs: Arc<[CardPair]>,
    word_sets: Arc<[WordSet]>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new(quiz: Option<QuizPack>, pairs: Vec<CardPair>, word_sets: Vec<WordSet>) -> Self {
        Self {
            quiz,
            pairs: pairs.into(),
            word_sets: word_sets.into(),
        }
    }

    /// Sample quiz, eight equation pairs and three word levels.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if any built-in item fails validation.
    pub fn builtin() -> Result<Self, ContentError> {
        Ok(Self::new(
            Some(builtin_quiz()?),
            builtin_pairs()?,
            builtin_word_sets()?,
        ))
    }
}

#[async_trait]
impl ContentSource for InMemoryCatalog {
    async fn quiz(&self) -> Result<QuizPack, ContentSourceError> {
        self.quiz
            .clone()
            .ok_or(ContentSourceError::Empty { kind: "quiz" })
    }

    async fn card_pairs(&self) -> Result<Vec<CardPair>, ContentSourceError> {
        if self.pairs.is_empty() {
            return Err(ContentSourceError::Empty { kind: "card pair" });
        }
        Ok(self.pairs.to_vec())
    }

    async fn word_sets(&self) -> Result<Vec<WordSet>, ContentSourceError> {
        if self.word_sets.is_empty() {
            return Err(ContentSourceError::Empty { kind: "word set" });
        }
        Ok(self.word_sets.to_vec())
    }
}

//
// ─── JSON FILE ─────────────────────────────────────────────────────────────────
//

/// Quiz loaded from a JSON file; games come from a fallback source.
#[derive(Clone)]
pub struct JsonCatalog {
    quiz_path: PathBuf,
    fallback: Arc<dyn ContentSource>,
}

impl JsonCatalog {
    #[must_use]
    pub fn new(quiz_path: impl Into<PathBuf>, fallback: Arc<dyn ContentSource>) -> Self {
        Self {
            quiz_path: quiz_path.into(),
            fallback,
        }
    }

    #[must_use]
    pub fn quiz_path(&self) -> &Path {
        &self.quiz_path
    }
}

#[async_trait]
impl ContentSource for JsonCatalog {
    async fn quiz(&self) -> Result<QuizPack, ContentSourceError> {
        let raw = tokio::fs::read_to_string(&self.quiz_path)
            .await
            .map_err(|source| ContentSourceError::Io {
                path: self.quiz_path.clone(),
                source,
            })?;
        let draft: QuizDraft =
            serde_json::from_str(&raw).map_err(|source| ContentSourceError::Json {
                path: self.quiz_path.clone(),
                source,
            })?;
        let pack = draft.validate()?;
        debug!(
            path = %self.quiz_path.display(),
            title = pack.meta().title(),
            questions = pack.questions().len(),
            "quiz loaded"
        );
        Ok(pack)
    }

    async fn card_pairs(&self) -> Result<Vec<CardPair>, ContentSourceError> {
        self.fallback.card_pairs().await
    }

    async fn word_sets(&self) -> Result<Vec<WordSet>, ContentSourceError> {
        self.fallback.word_sets().await
    }
}

/// Fresh seed for a memory board layout.
#[must_use]
pub fn random_seed() -> u64 {
    rand::rng().random()
}

//
// ─── BUILT-IN CONTENT ──────────────────────────────────────────────────────────
//

fn builtin_quiz() -> Result<QuizPack, ContentError> {
    let question = |prompt: &str, options: &[&str], correct: usize, explanation: &str| {
        QuestionDraft {
            prompt: prompt.to_owned(),
            options: options.iter().map(|o| (*o).to_owned()).collect(),
            correct,
            explanation: Some(explanation.to_owned()),
        }
    };

    QuizDraft {
        title: "Arithmetic Warm-up".to_owned(),
        subject: Some("Mathematics".to_owned()),
        difficulty: Difficulty::Easy,
        duration_minutes: 5,
        questions: vec![
            question(
                "What is 7 × 8?",
                &["54", "56", "63", "64"],
                1,
                "7 × 8 = 56.",
            ),
            question(
                "What is 144 ÷ 12?",
                &["11", "12", "13", "14"],
                1,
                "12 × 12 = 144.",
            ),
            question(
                "Which number is prime?",
                &["21", "27", "29", "33"],
                2,
                "29 has no divisors other than 1 and itself.",
            ),
            question(
                "What is 15% of 200?",
                &["15", "20", "30", "45"],
                2,
                "10% is 20 and 5% is 10, so 15% is 30.",
            ),
            question(
                "What is the next number: 2, 4, 8, 16, …?",
                &["18", "24", "32", "64"],
                2,
                "Each term doubles the previous one.",
            ),
        ],
    }
    .validate()
}

fn builtin_pairs() -> Result<Vec<CardPair>, ContentError> {
    [
        ("5 + 3", "8"),
        ("12 - 4", "8"),
        ("2 × 6", "12"),
        ("24 ÷ 2", "12"),
        ("7 + 8", "15"),
        ("20 - 5", "15"),
        ("4 × 4", "16"),
        ("32 ÷ 2", "16"),
    ]
    .into_iter()
    .map(|(prompt, answer)| {
        CardPairDraft {
            prompt: prompt.to_owned(),
            answer: answer.to_owned(),
            key: None,
        }
        .validate()
    })
    .collect()
}

fn builtin_word_sets() -> Result<Vec<WordSet>, ContentError> {
    let sets: [(&str, [&str; 10]); 3] = [
        (
            "EDUCATION",
            [
                "AUCTION", "AUDIO", "CUTE", "DATE", "DANCE", "DUCT", "ACE", "CUE", "TOE", "DUE",
            ],
        ),
        (
            "LEARNING",
            [
                "LEARN", "RANGE", "ANGER", "ANGEL", "GEAR", "RING", "REAL", "LEAN", "NEAR", "LINE",
            ],
        ),
        (
            "KNOWLEDGE",
            [
                "KNOW", "EDGE", "GONE", "DOG", "LOG", "NOD", "ELK", "GOD", "OLD", "END",
            ],
        ),
    ];

    sets.into_iter()
        .map(|(letters, words)| {
            WordSetDraft {
                letters: letters.to_owned(),
                words: words.iter().map(|w| (*w).to_owned()).collect(),
            }
            .validate()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_content_is_valid() {
        let catalog = InMemoryCatalog::builtin().unwrap();
        assert_eq!(catalog.pairs.len(), 8);
        assert_eq!(catalog.word_sets.len(), 3);
        assert!(catalog.word_sets.iter().all(|set| set.words().len() == 10));
        assert_eq!(catalog.quiz.as_ref().unwrap().questions().len(), 5);
    }

    #[test]
    fn builtin_pairs_share_keys_across_equations() {
        let pairs = builtin_pairs().unwrap();
        assert_eq!(pairs[0].key(), pairs[1].key());
        assert_ne!(pairs[1].key(), pairs[2].key());
    }
}
