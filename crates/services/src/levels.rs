use tracing::info;

use play_core::model::WordSet;
use play_core::rules::{WordBuilder, WordRules};
use play_core::{Session, SessionError, TimeLimit};

use crate::error::{ContentSourceError, ServiceError};

/// Word-builder levels played in order.
#[derive(Debug, Clone)]
pub struct LevelTrack {
    levels: Vec<WordSet>,
    current: usize,
    rules: WordRules,
    limit: TimeLimit,
}

impl LevelTrack {
    /// # Errors
    ///
    /// Returns `ContentSourceError::Empty` if `levels` is empty.
    pub fn new(
        levels: Vec<WordSet>,
        rules: WordRules,
        limit: TimeLimit,
    ) -> Result<Self, ContentSourceError> {
        if levels.is_empty() {
            return Err(ContentSourceError::Empty { kind: "word set" });
        }
        Ok(Self {
            levels,
            current: 0,
            rules,
            limit,
        })
    }

    /// Jump to a 1-based level number.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::UnknownLevel` if no such level exists.
    pub fn starting_at(mut self, level: usize) -> Result<Self, ServiceError> {
        if level == 0 || level > self.levels.len() {
            return Err(ServiceError::UnknownLevel {
                level,
                levels: self.levels.len(),
            });
        }
        self.current = level - 1;
        Ok(self)
    }

    /// 1-based number of the current level.
    #[must_use]
    pub fn level(&self) -> usize {
        self.current + 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.levels.len()
    }

    #[must_use]
    pub fn current(&self) -> &WordSet {
        &self.levels[self.current]
    }

    /// Running session for the current level.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyContent` if the level has no target words.
    pub fn session(&self) -> Result<Session<WordBuilder>, SessionError> {
        let (game, words) = WordBuilder::level(self.current().clone(), self.rules);
        Session::start(game, words, self.limit)
    }

    /// Move to the following level and start it from `played`.
    ///
    /// Returns `None` once every level has been played. The track only moves
    /// once the next session has been built.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyContent` if the next level has no target words.
    pub fn next_session(
        &mut self,
        played: &Session<WordBuilder>,
    ) -> Result<Option<Session<WordBuilder>>, SessionError> {
        if self.is_last() {
            info!(levels = self.levels.len(), "all levels complete");
            return Ok(None);
        }
        let upcoming = &self.levels[self.current + 1];
        let (game, words) = WordBuilder::level(upcoming.clone(), self.rules);
        let session = played.next_level_with(game, words)?;
        self.current += 1;
        info!(level = self.level(), letters = self.current().pool().letters(), "level started");
        Ok(Some(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> LevelTrack {
        let sets = vec![
            WordSet::new("LEARNING", ["LEARN", "RING"]).unwrap(),
            WordSet::new("KNOWLEDGE", ["KNOW", "EDGE", "DOG"]).unwrap(),
        ];
        LevelTrack::new(sets, WordRules::default(), TimeLimit::seconds(180)).unwrap()
    }

    #[test]
    fn walks_levels_then_stops() {
        let mut track = track();
        let first = track.session().unwrap();
        assert_eq!(track.level(), 1);
        assert_eq!(first.ruleset().pool().letters(), "LEARNING");

        let second = track.next_session(&first).unwrap().unwrap();
        assert_eq!(track.level(), 2);
        assert_eq!(second.total_count(), 3);
        assert_eq!(second.limit(), TimeLimit::seconds(180));
        assert!(track.is_last());

        assert!(track.next_session(&second).unwrap().is_none());
        assert_eq!(track.level(), 2);
    }

    #[test]
    fn level_numbers_are_one_based() {
        assert_eq!(track().starting_at(2).unwrap().level(), 2);
        assert!(matches!(
            track().starting_at(0),
            Err(ServiceError::UnknownLevel { level: 0, levels: 2 })
        ));
        assert!(matches!(
            track().starting_at(3),
            Err(ServiceError::UnknownLevel { level: 3, levels: 2 })
        ));
    }

    #[test]
    fn empty_track_is_refused() {
        let err = LevelTrack::new(Vec::new(), WordRules::default(), TimeLimit::Unbounded)
            .unwrap_err();
        assert!(matches!(err, ContentSourceError::Empty { .. }));
    }
}
