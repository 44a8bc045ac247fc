use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ContentError;
use crate::time::TimeLimit;

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Unvalidated question as it arrives from a content source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: usize,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl QuestionDraft {
    /// Validate the draft into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` for an empty prompt, fewer than two options,
    /// an empty option or a correct index outside the options.
    pub fn validate(self) -> Result<Question, ContentError> {
        let prompt = self.prompt.trim().to_owned();
        if prompt.is_empty() {
            return Err(ContentError::EmptyPrompt);
        }
        if self.options.len() < 2 {
            return Err(ContentError::TooFewOptions {
                count: self.options.len(),
            });
        }

        let mut options = Vec::with_capacity(self.options.len());
        for (index, option) in self.options.into_iter().enumerate() {
            let option = option.trim().to_owned();
            if option.is_empty() {
                return Err(ContentError::EmptyOption { index });
            }
            options.push(option);
        }

        if self.correct >= options.len() {
            return Err(ContentError::CorrectOutOfRange {
                correct: self.correct,
                options: options.len(),
            });
        }

        let explanation = self
            .explanation
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty());

        Ok(Question {
            prompt,
            options,
            correct: self.correct,
            explanation,
        })
    }
}

/// A multiple-choice question with exactly one correct option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct: usize,
    explanation: Option<String>,
}

impl Question {
    /// Convenience constructor that validates in one step.
    ///
    /// # Errors
    ///
    /// See [`QuestionDraft::validate`].
    pub fn new(
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct: usize,
        explanation: Option<String>,
    ) -> Result<Self, ContentError> {
        QuestionDraft {
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct,
            explanation,
        }
        .validate()
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// Catalog metadata shown before a quiz starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizMeta {
    title: String,
    subject: Option<String>,
    difficulty: Difficulty,
    duration_minutes: u32,
}

impl QuizMeta {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    #[must_use]
    pub fn time_limit(&self) -> TimeLimit {
        TimeLimit::minutes(self.duration_minutes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDraft {
    pub title: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub duration_minutes: u32,
    pub questions: Vec<QuestionDraft>,
}

impl QuizDraft {
    /// Validate metadata and every question.
    ///
    /// An empty question list is accepted here; the session refuses to start
    /// on it instead.
    ///
    /// # Errors
    ///
    /// Returns the first `ContentError` found.
    pub fn validate(self) -> Result<QuizPack, ContentError> {
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return Err(ContentError::EmptyTitle);
        }
        if self.duration_minutes == 0 {
            return Err(ContentError::ZeroDuration);
        }

        let questions = self
            .questions
            .into_iter()
            .map(QuestionDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(QuizPack {
            meta: QuizMeta {
                title,
                subject: self
                    .subject
                    .map(|s| s.trim().to_owned())
                    .filter(|s| !s.is_empty()),
                difficulty: self.difficulty,
                duration_minutes: self.duration_minutes,
            },
            questions,
        })
    }
}

/// A validated quiz: metadata plus its ordered questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizPack {
    meta: QuizMeta,
    questions: Vec<Question>,
}

impl QuizPack {
    #[must_use]
    pub fn meta(&self) -> &QuizMeta {
        &self.meta
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft {
            prompt: " What is 2 + 2? ".into(),
            options: vec!["3".into(), "4".into(), "5".into()],
            correct: 1,
            explanation: Some("  ".into()),
        }
    }

    #[test]
    fn question_validates_and_trims() {
        let q = draft().validate().unwrap();
        assert_eq!(q.prompt(), "What is 2 + 2?");
        assert_eq!(q.option(1), Some("4"));
        assert_eq!(q.explanation(), None);
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
    }

    #[test]
    fn question_rejects_out_of_range_correct() {
        let mut d = draft();
        d.correct = 3;
        assert_eq!(
            d.validate().unwrap_err(),
            ContentError::CorrectOutOfRange {
                correct: 3,
                options: 3
            }
        );
    }

    #[test]
    fn question_rejects_single_option() {
        let mut d = draft();
        d.options = vec!["only".into()];
        assert_eq!(
            d.validate().unwrap_err(),
            ContentError::TooFewOptions { count: 1 }
        );
    }

    #[test]
    fn question_rejects_blank_option() {
        let mut d = draft();
        d.options[2] = "   ".into();
        assert_eq!(
            d.validate().unwrap_err(),
            ContentError::EmptyOption { index: 2 }
        );
    }

    #[test]
    fn quiz_draft_parses_from_json() {
        let raw = r#"{
            "title": "Algebra Basics",
            "subject": "Mathematics",
            "difficulty": "Medium",
            "duration_minutes": 2,
            "questions": [
                { "prompt": "x + 1 = 3, x = ?", "options": ["1", "2"], "correct": 1 }
            ]
        }"#;
        let pack: QuizPack = serde_json::from_str::<QuizDraft>(raw)
            .unwrap()
            .validate()
            .unwrap();

        assert_eq!(pack.meta().title(), "Algebra Basics");
        assert_eq!(pack.meta().difficulty(), Difficulty::Medium);
        assert_eq!(pack.meta().time_limit(), TimeLimit::seconds(120));
        assert_eq!(pack.questions().len(), 1);
    }

    #[test]
    fn quiz_draft_rejects_zero_duration() {
        let d = QuizDraft {
            title: "T".into(),
            subject: None,
            difficulty: Difficulty::Easy,
            duration_minutes: 0,
            questions: vec![],
        };
        assert_eq!(d.validate().unwrap_err(), ContentError::ZeroDuration);
    }
}
