use serde::{Deserialize, Serialize};

use crate::model::{LetterPool, TargetWord, WordSet};
use crate::rules::{BonusContext, Judgement, Rejection, Ruleset, RulesError};
use crate::session::{Attempt, SessionError, SessionKind};

/// Scoring for the word-builder game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordRules {
    min_len: usize,
    points_per_letter: u32,
    bonus_per_second: u32,
}

impl WordRules {
    /// # Errors
    ///
    /// Returns `RulesError` if the minimum length or letter value is zero.
    pub fn new(
        min_len: usize,
        points_per_letter: u32,
        bonus_per_second: u32,
    ) -> Result<Self, RulesError> {
        if min_len == 0 {
            return Err(RulesError::InvalidMinWordLength);
        }
        if points_per_letter == 0 {
            return Err(RulesError::InvalidLetterPoints);
        }
        Ok(Self {
            min_len,
            points_per_letter,
            bonus_per_second,
        })
    }

    /// # Errors
    ///
    /// See [`WordRules::new`].
    pub fn validate(self) -> Result<Self, RulesError> {
        Self::new(self.min_len, self.points_per_letter, self.bonus_per_second)
    }

    #[must_use]
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    #[must_use]
    pub fn points_per_letter(&self) -> u32 {
        self.points_per_letter
    }

    #[must_use]
    pub fn bonus_per_second(&self) -> u32 {
        self.bonus_per_second
    }

    #[must_use]
    pub fn points_for(&self, word: &TargetWord) -> u32 {
        u32::try_from(word.len())
            .unwrap_or(u32::MAX)
            .saturating_mul(self.points_per_letter)
    }
}

impl Default for WordRules {
    fn default() -> Self {
        Self {
            min_len: 3,
            points_per_letter: 10,
            bonus_per_second: 10,
        }
    }
}

/// A typed word. Case and surrounding whitespace are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess(pub String);

impl Guess {
    #[must_use]
    pub fn normalized(&self) -> String {
        self.0.trim().to_uppercase()
    }
}

impl From<&str> for Guess {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Guess {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Found flags per target plus the order they were found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordBoard {
    found: Vec<bool>,
    order: Vec<usize>,
}

impl WordBoard {
    #[must_use]
    pub fn is_found(&self, item: usize) -> bool {
        self.found.get(item).copied().unwrap_or(false)
    }

    /// Target indexes in the order they were found.
    #[must_use]
    pub fn found_order(&self) -> &[usize] {
        &self.order
    }
}

/// Spell target words from a fixed letter pool against the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBuilder {
    pool: LetterPool,
    rules: WordRules,
}

impl WordBuilder {
    #[must_use]
    pub fn new(pool: LetterPool, rules: WordRules) -> Self {
        Self { pool, rules }
    }

    /// Ruleset and content for one word set.
    #[must_use]
    pub fn level(set: WordSet, rules: WordRules) -> (Self, Vec<TargetWord>) {
        let (pool, words) = set.into_parts();
        (Self::new(pool, rules), words)
    }

    #[must_use]
    pub fn pool(&self) -> &LetterPool {
        &self.pool
    }

    #[must_use]
    pub fn rules(&self) -> &WordRules {
        &self.rules
    }
}

impl Ruleset for WordBuilder {
    type Item = TargetWord;
    type Submission = Guess;
    type Board = WordBoard;

    fn kind(&self) -> SessionKind {
        SessionKind::WordBuilder
    }

    fn board(&self, content: &[TargetWord]) -> WordBoard {
        WordBoard {
            found: vec![false; content.len()],
            order: Vec::new(),
        }
    }

    fn judge(
        &self,
        content: &[TargetWord],
        board: &WordBoard,
        guess: &Guess,
    ) -> Result<Judgement, SessionError> {
        let word = guess.normalized();
        let len = word.chars().count();
        if len < self.rules.min_len {
            return Ok(Judgement::Rejected(Rejection::TooShort {
                len,
                min: self.rules.min_len,
            }));
        }

        let target = content.iter().position(|t| t.as_str() == word);
        if let Some(index) = target {
            if board.is_found(index) {
                return Err(SessionError::AlreadyResolved { index });
            }
        }
        if !self.pool.can_spell(&word) {
            return Ok(Judgement::Rejected(Rejection::NotInPool));
        }

        Ok(match target {
            Some(item) => Judgement::Correct { item },
            None => Judgement::Rejected(Rejection::NotInList),
        })
    }

    fn record(&self, board: &mut WordBoard, _guess: &Guess, judgement: &Judgement, _elapsed: u32) {
        if let Judgement::Correct { item } = judgement {
            if let Some(found) = board.found.get_mut(*item) {
                *found = true;
                board.order.push(*item);
            }
        }
    }

    fn resolved_count(&self, board: &WordBoard) -> usize {
        board.order.len()
    }

    fn base_score(&self, content: &[TargetWord], attempts: &[Attempt<Guess>]) -> u32 {
        attempts
            .iter()
            .filter(|a| a.correct)
            .filter_map(|a| a.item.and_then(|item| content.get(item)))
            .fold(0_u32, |total, word| {
                total.saturating_add(self.rules.points_for(word))
            })
    }

    /// Remaining seconds times the per-second bonus, only when every word was found.
    fn bonus(&self, ctx: &BonusContext) -> u32 {
        if !ctx.cleared {
            return 0;
        }
        ctx.remaining
            .unwrap_or(0)
            .saturating_mul(self.rules.bonus_per_second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn learning() -> (WordBuilder, Vec<TargetWord>) {
        let set = WordSet::new("LEARNING", ["LEARN", "RING", "LINE"]).unwrap();
        WordBuilder::level(set, WordRules::default())
    }

    #[test]
    fn guesses_are_case_insensitive() {
        let (game, content) = learning();
        let board = game.board(&content);
        let judgement = game.judge(&content, &board, &Guess::from(" learn ")).unwrap();
        assert_eq!(judgement, Judgement::Correct { item: 0 });
    }

    #[test]
    fn rejections_follow_the_check_order() {
        let (game, content) = learning();
        let board = game.board(&content);
        let judge = |w: &str| game.judge(&content, &board, &Guess::from(w)).unwrap();

        assert_eq!(
            judge("AN"),
            Judgement::Rejected(Rejection::TooShort { len: 2, min: 3 })
        );
        assert_eq!(judge("GREEN"), Judgement::Rejected(Rejection::NotInPool));
        assert_eq!(judge("GAIN"), Judgement::Rejected(Rejection::NotInList));
    }

    #[test]
    fn found_word_cannot_be_found_twice() {
        let (game, content) = learning();
        let mut board = game.board(&content);
        let guess = Guess::from("RING");
        let judgement = game.judge(&content, &board, &guess).unwrap();
        game.record(&mut board, &guess, &judgement, 0);

        assert_eq!(board.found_order(), &[1]);
        assert_eq!(
            game.judge(&content, &board, &guess).unwrap_err(),
            SessionError::AlreadyResolved { index: 1 }
        );
    }

    #[test]
    fn rules_reject_zero_values() {
        assert_eq!(
            WordRules::new(0, 10, 10).unwrap_err(),
            RulesError::InvalidMinWordLength
        );
        assert_eq!(
            WordRules::new(3, 0, 10).unwrap_err(),
            RulesError::InvalidLetterPoints
        );
    }

    #[test]
    fn bonus_pays_for_remaining_time() {
        let (game, _) = learning();
        let ctx = BonusContext {
            elapsed: 60,
            remaining: Some(120),
            moves: 4,
            cleared: true,
        };
        assert_eq!(game.bonus(&ctx), 1_200);
        assert_eq!(
            game.bonus(&BonusContext {
                cleared: false,
                ..ctx
            }),
            0
        );
    }
}
