use serde::{Deserialize, Serialize};

use crate::model::ContentError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPairDraft {
    pub prompt: String,
    pub answer: String,
    /// Defaults to the answer face when absent.
    #[serde(default)]
    pub key: Option<String>,
}

impl CardPairDraft {
    /// # Errors
    ///
    /// Returns `ContentError::EmptyCardFace` if either face or the key is blank.
    pub fn validate(self) -> Result<CardPair, ContentError> {
        let prompt = self.prompt.trim().to_owned();
        let answer = self.answer.trim().to_owned();
        if prompt.is_empty() || answer.is_empty() {
            return Err(ContentError::EmptyCardFace);
        }
        let key = match self.key {
            Some(key) => key.trim().to_owned(),
            None => answer.clone(),
        };
        if key.is_empty() {
            return Err(ContentError::EmptyCardFace);
        }
        Ok(CardPair {
            prompt,
            answer,
            key,
        })
    }
}

/// Two cards that belong together, e.g. the equation `5 + 3` and its answer `8`.
///
/// Cards match on `key`, not on pair identity: `5 + 3` also matches `12 - 4`
/// because both carry the key `8`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardPair {
    prompt: String,
    answer: String,
    key: String,
}

impl CardPair {
    /// # Errors
    ///
    /// Returns `ContentError::EmptyCardFace` if either face is blank.
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Result<Self, ContentError> {
        CardPairDraft {
            prompt: prompt.into(),
            answer: answer.into(),
            key: None,
        }
        .validate()
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_defaults_to_answer() {
        let pair = CardPair::new("5 + 3", " 8 ").unwrap();
        assert_eq!(pair.answer(), "8");
        assert_eq!(pair.key(), "8");
    }

    #[test]
    fn explicit_key_is_kept() {
        let pair = CardPairDraft {
            prompt: "H2O".into(),
            answer: "water".into(),
            key: Some("h2o".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(pair.key(), "h2o");
    }

    #[test]
    fn blank_face_is_rejected() {
        assert_eq!(
            CardPair::new("  ", "8").unwrap_err(),
            ContentError::EmptyCardFace
        );
    }
}
