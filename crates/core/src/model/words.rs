use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::model::ContentError;

//
// ─── LETTER POOL ───────────────────────────────────────────────────────────────
//

/// Fixed multiset of letters a word-builder level offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterPool {
    letters: String,
    #[serde(skip)]
    counts: BTreeMap<char, usize>,
}

impl LetterPool {
    /// # Errors
    ///
    /// Returns `ContentError::InvalidLetters` if `letters` is empty or contains
    /// anything other than alphabetic characters.
    pub fn new(letters: impl AsRef<str>) -> Result<Self, ContentError> {
        let letters = letters.as_ref().trim().to_uppercase();
        if letters.is_empty() || !letters.chars().all(char::is_alphabetic) {
            return Err(ContentError::InvalidLetters);
        }
        let counts = letter_counts(&letters);
        Ok(Self { letters, counts })
    }

    #[must_use]
    pub fn letters(&self) -> &str {
        &self.letters
    }

    /// True when every letter of `word` is available often enough in the pool.
    #[must_use]
    pub fn can_spell(&self, word: &str) -> bool {
        letter_counts(&word.to_uppercase())
            .into_iter()
            .all(|(letter, needed)| self.counts.get(&letter).is_some_and(|have| *have >= needed))
    }
}

fn letter_counts(word: &str) -> BTreeMap<char, usize> {
    word.chars().fold(BTreeMap::new(), |mut counts, letter| {
        *counts.entry(letter).or_insert(0) += 1;
        counts
    })
}

//
// ─── TARGET WORD ───────────────────────────────────────────────────────────────
//

/// Upper-cased word the player is trying to find.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TargetWord(String);

impl TargetWord {
    /// # Errors
    ///
    /// Returns `ContentError::InvalidWord` for blank or non-alphabetic input.
    pub fn new(word: impl AsRef<str>) -> Result<Self, ContentError> {
        let word = word.as_ref().trim().to_uppercase();
        if word.is_empty() || !word.chars().all(char::is_alphabetic) {
            return Err(ContentError::InvalidWord { word });
        }
        Ok(Self(word))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in letters, used for length-weighted scoring.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TargetWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── WORD SET ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSetDraft {
    pub letters: String,
    pub words: Vec<String>,
}

impl WordSetDraft {
    /// Validate the pool and every target.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` when the pool is invalid, there are no targets,
    /// or a target is malformed, listed twice or cannot be spelled from the pool.
    pub fn validate(self) -> Result<WordSet, ContentError> {
        let pool = LetterPool::new(&self.letters)?;
        if self.words.is_empty() {
            return Err(ContentError::NoTargetWords);
        }
        let mut seen = HashSet::new();
        let mut words = Vec::with_capacity(self.words.len());
        for raw in self.words {
            let word = TargetWord::new(raw)?;
            if !pool.can_spell(word.as_str()) {
                return Err(ContentError::WordNotInPool { word: word.0 });
            }
            if !seen.insert(word.clone()) {
                return Err(ContentError::DuplicateWord { word: word.0 });
            }
            words.push(word);
        }
        Ok(WordSet { pool, words })
    }
}

/// One word-builder level: a letter pool and the words hidden in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordSet {
    pool: LetterPool,
    words: Vec<TargetWord>,
}

impl WordSet {
    /// # Errors
    ///
    /// See [`WordSetDraft::validate`].
    pub fn new(
        letters: impl Into<String>,
        words: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, ContentError> {
        WordSetDraft {
            letters: letters.into(),
            words: words.into_iter().map(Into::into).collect(),
        }
        .validate()
    }

    #[must_use]
    pub fn pool(&self) -> &LetterPool {
        &self.pool
    }

    #[must_use]
    pub fn words(&self) -> &[TargetWord] {
        &self.words
    }

    #[must_use]
    pub fn into_parts(self) -> (LetterPool, Vec<TargetWord>) {
        (self.pool, self.words)
    }
}
