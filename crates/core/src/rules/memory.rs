use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::model::CardPair;
use crate::rules::{BonusContext, Judgement, Ruleset, RulesError};
use crate::session::{Attempt, SessionError, SessionKind};

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// How cards are laid out on the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shuffle {
    /// Pair `i` occupies positions `2i` (prompt) and `2i + 1` (answer).
    #[default]
    InOrder,
    Seeded(u64),
}

/// Scoring and pacing for the memory-match game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryRules {
    points_per_match: u32,
    bonus_baseline: u32,
    move_penalty: u32,
    bonus_floor: u32,
    mismatch_reveal_secs: u32,
    shuffle: Shuffle,
}

impl MemoryRules {
    /// # Errors
    ///
    /// Returns `RulesError` if a match is worth nothing or the bonus floor
    /// lies above the baseline.
    pub fn new(
        points_per_match: u32,
        bonus_baseline: u32,
        move_penalty: u32,
        bonus_floor: u32,
        mismatch_reveal_secs: u32,
        shuffle: Shuffle,
    ) -> Result<Self, RulesError> {
        if points_per_match == 0 {
            return Err(RulesError::InvalidMatchPoints);
        }
        if bonus_floor > bonus_baseline {
            return Err(RulesError::InvalidBonusBounds {
                baseline: bonus_baseline,
                floor: bonus_floor,
            });
        }
        Ok(Self {
            points_per_match,
            bonus_baseline,
            move_penalty,
            bonus_floor,
            mismatch_reveal_secs,
            shuffle,
        })
    }

    /// Re-check values that arrived through deserialization.
    ///
    /// # Errors
    ///
    /// See [`MemoryRules::new`].
    pub fn validate(self) -> Result<Self, RulesError> {
        Self::new(
            self.points_per_match,
            self.bonus_baseline,
            self.move_penalty,
            self.bonus_floor,
            self.mismatch_reveal_secs,
            self.shuffle,
        )
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: Shuffle) -> Self {
        self.shuffle = shuffle;
        self
    }

    #[must_use]
    pub fn points_per_match(&self) -> u32 {
        self.points_per_match
    }

    #[must_use]
    pub fn bonus_baseline(&self) -> u32 {
        self.bonus_baseline
    }

    #[must_use]
    pub fn move_penalty(&self) -> u32 {
        self.move_penalty
    }

    #[must_use]
    pub fn bonus_floor(&self) -> u32 {
        self.bonus_floor
    }

    /// Seconds a mismatched pair stays face up.
    #[must_use]
    pub fn mismatch_reveal_secs(&self) -> u32 {
        self.mismatch_reveal_secs
    }

    #[must_use]
    pub fn shuffle(&self) -> Shuffle {
        self.shuffle
    }
}

impl Default for MemoryRules {
    fn default() -> Self {
        Self {
            points_per_match: 100,
            bonus_baseline: 1000,
            move_penalty: 10,
            bonus_floor: 100,
            mismatch_reveal_secs: 1,
            shuffle: Shuffle::InOrder,
        }
    }
}

//
// ─── BOARD ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Face {
    Prompt,
    Answer,
}

/// One face-down card: which pair it came from and which side it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardCard {
    pub pair: usize,
    pub face: Face,
}

impl BoardCard {
    /// Text printed on the card.
    #[must_use]
    pub fn label<'a>(&self, content: &'a [CardPair]) -> &'a str {
        match (content.get(self.pair), self.face) {
            (Some(pair), Face::Prompt) => pair.prompt(),
            (Some(pair), Face::Answer) => pair.answer(),
            (None, _) => "",
        }
    }
}

/// Two cards left face up after a miss until the reveal runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub first: usize,
    pub second: usize,
    pub clears_at: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryBoard {
    cards: Vec<BoardCard>,
    matched: Vec<bool>,
    mismatch: Option<Mismatch>,
}

impl MemoryBoard {
    #[must_use]
    pub fn cards(&self) -> &[BoardCard] {
        &self.cards
    }

    #[must_use]
    pub fn card(&self, position: usize) -> Option<&BoardCard> {
        self.cards.get(position)
    }

    #[must_use]
    pub fn is_matched(&self, position: usize) -> bool {
        self.matched.get(position).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn mismatch(&self) -> Option<&Mismatch> {
        self.mismatch.as_ref()
    }

    /// True when the card at `position` should be drawn face up.
    #[must_use]
    pub fn is_face_up(&self, position: usize) -> bool {
        self.is_matched(position)
            || self
                .mismatch
                .is_some_and(|m| m.first == position || m.second == position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

//
// ─── RULESET ───────────────────────────────────────────────────────────────────
//

/// Turn two cards over at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flip {
    pub first: usize,
    pub second: usize,
}

impl Flip {
    #[must_use]
    pub fn new(first: usize, second: usize) -> Self {
        Self { first, second }
    }
}

/// Match cards that share a key; finish with a moves-and-time bonus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryMatch {
    rules: MemoryRules,
}

impl MemoryMatch {
    #[must_use]
    pub fn new(rules: MemoryRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &MemoryRules {
        &self.rules
    }

    /// Same rules with a different board layout, for "play again".
    #[must_use]
    pub fn reseeded(self, seed: u64) -> Self {
        Self {
            rules: self.rules.with_shuffle(Shuffle::Seeded(seed)),
        }
    }

    fn check_position(board: &MemoryBoard, position: usize) -> Result<(), SessionError> {
        if position >= board.cards.len() {
            return Err(SessionError::InvalidIndex {
                index: position,
                len: board.cards.len(),
            });
        }
        if board.matched[position] {
            return Err(SessionError::AlreadyResolved { index: position });
        }
        Ok(())
    }
}

impl Ruleset for MemoryMatch {
    type Item = CardPair;
    type Submission = Flip;
    type Board = MemoryBoard;

    fn kind(&self) -> SessionKind {
        SessionKind::MemoryMatch
    }

    fn board(&self, content: &[CardPair]) -> MemoryBoard {
        let mut cards: Vec<BoardCard> = (0..content.len())
            .flat_map(|pair| {
                [
                    BoardCard {
                        pair,
                        face: Face::Prompt,
                    },
                    BoardCard {
                        pair,
                        face: Face::Answer,
                    },
                ]
            })
            .collect();

        if let Shuffle::Seeded(seed) = self.rules.shuffle {
            let mut rng = StdRng::seed_from_u64(seed);
            cards.as_mut_slice().shuffle(&mut rng);
        }

        MemoryBoard {
            matched: vec![false; cards.len()],
            cards,
            mismatch: None,
        }
    }

    fn judge(
        &self,
        content: &[CardPair],
        board: &MemoryBoard,
        flip: &Flip,
    ) -> Result<Judgement, SessionError> {
        Self::check_position(board, flip.first)?;
        Self::check_position(board, flip.second)?;
        if flip.first == flip.second {
            return Err(SessionError::SameCard {
                position: flip.first,
            });
        }
        if board.mismatch.is_some() {
            return Err(SessionError::BoardLocked);
        }

        let first = board.cards[flip.first];
        let second = board.cards[flip.second];
        let key = |card: BoardCard| content.get(card.pair).map(CardPair::key);

        Ok(if key(first) == key(second) {
            Judgement::Correct { item: first.pair }
        } else {
            Judgement::Incorrect {
                item: first.pair,
                settles: false,
            }
        })
    }

    fn record(&self, board: &mut MemoryBoard, flip: &Flip, judgement: &Judgement, elapsed: u32) {
        match judgement {
            Judgement::Correct { .. } => {
                board.matched[flip.first] = true;
                board.matched[flip.second] = true;
            }
            Judgement::Incorrect { .. } if self.rules.mismatch_reveal_secs > 0 => {
                board.mismatch = Some(Mismatch {
                    first: flip.first,
                    second: flip.second,
                    clears_at: elapsed.saturating_add(self.rules.mismatch_reveal_secs),
                });
            }
            _ => {}
        }
    }

    fn on_tick(&self, board: &mut MemoryBoard, elapsed: u32) -> bool {
        if board.mismatch.is_some_and(|m| elapsed >= m.clears_at) {
            board.mismatch = None;
            return true;
        }
        false
    }

    fn dismiss(&self, board: &mut MemoryBoard) -> bool {
        board.mismatch.take().is_some()
    }

    fn resolved_count(&self, board: &MemoryBoard) -> usize {
        board.matched.iter().filter(|m| **m).count() / 2
    }

    fn base_score(&self, _content: &[CardPair], attempts: &[Attempt<Flip>]) -> u32 {
        let matches = attempts.iter().filter(|a| a.correct).count();
        u32::try_from(matches)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.rules.points_per_match)
    }

    /// `max(baseline - moves * penalty - elapsed, floor)`, only for a cleared board.
    fn bonus(&self, ctx: &BonusContext) -> u32 {
        if !ctx.cleared {
            return 0;
        }
        let raw = i64::from(self.rules.bonus_baseline)
            - i64::from(ctx.moves) * i64::from(self.rules.move_penalty)
            - i64::from(ctx.elapsed);
        let bonus = raw.max(i64::from(self.rules.bonus_floor));
        u32::try_from(bonus).unwrap_or(self.rules.bonus_floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs() -> Vec<CardPair> {
        vec![
            CardPair::new("5 + 3", "8").unwrap(),
            CardPair::new("12 - 4", "8").unwrap(),
            CardPair::new("2 × 6", "12").unwrap(),
        ]
    }

    #[test]
    fn rules_reject_floor_above_baseline() {
        let err = MemoryRules::new(100, 50, 10, 100, 1, Shuffle::InOrder).unwrap_err();
        assert_eq!(
            err,
            RulesError::InvalidBonusBounds {
                baseline: 50,
                floor: 100
            }
        );
    }

    #[test]
    fn in_order_board_places_pairs_side_by_side() {
        let game = MemoryMatch::default();
        let content = pairs();
        let board = game.board(&content);
        assert_eq!(board.len(), 6);
        assert_eq!(board.card(4).unwrap().label(&content), "2 × 6");
        assert_eq!(board.card(5).unwrap().label(&content), "12");
    }

    #[test]
    fn seeded_shuffle_is_deterministic() {
        let content = pairs();
        let a = MemoryMatch::default().reseeded(7).board(&content);
        let b = MemoryMatch::default().reseeded(7).board(&content);
        assert_eq!(a, b);
        assert_eq!(a.len(), 6);
    }

    #[test]
    fn cards_from_different_pairs_match_on_shared_key() {
        let game = MemoryMatch::default();
        let content = pairs();
        let board = game.board(&content);
        // "5 + 3" (pos 0) and "12 - 4" (pos 2) both carry key "8"
        let judgement = game.judge(&content, &board, &Flip::new(0, 2)).unwrap();
        assert_eq!(judgement, Judgement::Correct { item: 0 });
    }

    #[test]
    fn mismatch_locks_board_until_it_clears() {
        let game = MemoryMatch::default();
        let content = pairs();
        let mut board = game.board(&content);
        let flip = Flip::new(0, 4);
        let judgement = game.judge(&content, &board, &flip).unwrap();
        game.record(&mut board, &flip, &judgement, 3);

        assert!(board.is_face_up(4));
        assert_eq!(
            game.judge(&content, &board, &Flip::new(0, 1)).unwrap_err(),
            SessionError::BoardLocked
        );
        assert!(!game.on_tick(&mut board, 3));
        assert!(game.on_tick(&mut board, 4));
        assert!(!board.is_face_up(4));
    }

    #[test]
    fn same_card_and_matched_cards_are_refused() {
        let game = MemoryMatch::default();
        let content = pairs();
        let mut board = game.board(&content);
        assert_eq!(
            game.judge(&content, &board, &Flip::new(1, 1)).unwrap_err(),
            SessionError::SameCard { position: 1 }
        );

        let flip = Flip::new(0, 1);
        let judgement = game.judge(&content, &board, &flip).unwrap();
        game.record(&mut board, &flip, &judgement, 0);
        assert_eq!(
            game.judge(&content, &board, &Flip::new(1, 3)).unwrap_err(),
            SessionError::AlreadyResolved { index: 1 }
        );
        assert_eq!(game.resolved_count(&board), 1);
    }

    #[test]
    fn bonus_has_a_floor_and_needs_a_cleared_board() {
        let game = MemoryMatch::default();
        let ctx = BonusContext {
            elapsed: 20,
            remaining: None,
            moves: 10,
            cleared: true,
        };
        assert_eq!(game.bonus(&ctx), 880);
        assert_eq!(
            game.bonus(&BonusContext {
                elapsed: 5_000,
                ..ctx
            }),
            100
        );
        assert_eq!(
            game.bonus(&BonusContext {
                cleared: false,
                ..ctx
            }),
            0
        );
    }
}
