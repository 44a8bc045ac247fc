use serde::{Deserialize, Serialize};

use crate::model::Question;
use crate::rules::{Judgement, Ruleset};
use crate::session::{Attempt, SessionError, SessionKind};

/// Quiz policy knobs.
///
/// Without free navigation the quiz still steps forward one question at a
/// time; only moving back to earlier questions is switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizRules {
    free_navigation: bool,
    finish_when_all_answered: bool,
}

impl QuizRules {
    #[must_use]
    pub fn new(free_navigation: bool, finish_when_all_answered: bool) -> Self {
        Self {
            free_navigation,
            finish_when_all_answered,
        }
    }

    #[must_use]
    pub fn free_navigation(&self) -> bool {
        self.free_navigation
    }

    #[must_use]
    pub fn finish_when_all_answered(&self) -> bool {
        self.finish_when_all_answered
    }
}

impl Default for QuizRules {
    fn default() -> Self {
        Self {
            free_navigation: true,
            finish_when_all_answered: true,
        }
    }
}

/// Pick `option` for `question`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question: usize,
    pub option: usize,
}

impl Answer {
    #[must_use]
    pub fn new(question: usize, option: usize) -> Self {
        Self { question, option }
    }
}

/// Chosen option per question, `None` while unanswered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizBoard {
    answers: Vec<Option<usize>>,
}

impl QuizBoard {
    #[must_use]
    pub fn answer(&self, question: usize) -> Option<usize> {
        self.answers.get(question).copied().flatten()
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn is_answered(&self, question: usize) -> bool {
        self.answer(question).is_some()
    }
}

/// Timed multiple-choice quiz scored as a rounded percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quiz {
    rules: QuizRules,
}

impl Quiz {
    #[must_use]
    pub fn new(rules: QuizRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &QuizRules {
        &self.rules
    }
}

impl Ruleset for Quiz {
    type Item = Question;
    type Submission = Answer;
    type Board = QuizBoard;

    fn kind(&self) -> SessionKind {
        SessionKind::Quiz
    }

    fn navigable(&self) -> bool {
        true
    }

    fn backtracks(&self) -> bool {
        self.rules.free_navigation
    }

    fn completes_when_cleared(&self) -> bool {
        self.rules.finish_when_all_answered
    }

    fn board(&self, content: &[Question]) -> QuizBoard {
        QuizBoard {
            answers: vec![None; content.len()],
        }
    }

    fn judge(
        &self,
        content: &[Question],
        board: &QuizBoard,
        answer: &Answer,
    ) -> Result<Judgement, SessionError> {
        let question = content.get(answer.question).ok_or(SessionError::InvalidIndex {
            index: answer.question,
            len: content.len(),
        })?;
        if board.is_answered(answer.question) {
            return Err(SessionError::AlreadyResolved {
                index: answer.question,
            });
        }
        if answer.option >= question.options().len() {
            return Err(SessionError::InvalidOption {
                option: answer.option,
                options: question.options().len(),
            });
        }

        Ok(if question.is_correct(answer.option) {
            Judgement::Correct {
                item: answer.question,
            }
        } else {
            Judgement::Incorrect {
                item: answer.question,
                settles: true,
            }
        })
    }

    fn record(&self, board: &mut QuizBoard, answer: &Answer, judgement: &Judgement, _elapsed: u32) {
        if judgement.settles() {
            if let Some(slot) = board.answers.get_mut(answer.question) {
                *slot = Some(answer.option);
            }
        }
    }

    fn resolved_count(&self, board: &QuizBoard) -> usize {
        board.answers.iter().flatten().count()
    }

    fn base_score(&self, content: &[Question], attempts: &[Attempt<Answer>]) -> u32 {
        let correct = attempts.iter().filter(|a| a.correct).count();
        percentage(correct, content.len())
    }
}

/// `correct / total` as a percentage rounded half up.
fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let correct = u64::try_from(correct).unwrap_or(u64::MAX);
    let total = u64::try_from(total).unwrap_or(u64::MAX);
    let pct = (correct.saturating_mul(100) + total / 2) / total;
    u32::try_from(pct).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<Question> {
        vec![
            Question::new("1 + 1", ["1", "2"], 1, None).unwrap(),
            Question::new("2 + 2", ["4", "5", "6"], 0, None).unwrap(),
            Question::new("3 + 3", ["5", "6"], 1, None).unwrap(),
        ]
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(3, 4), 75);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn judge_flags_wrong_answer_as_settling() {
        let quiz = Quiz::default();
        let content = questions();
        let board = quiz.board(&content);
        let judgement = quiz.judge(&content, &board, &Answer::new(0, 0)).unwrap();
        assert_eq!(
            judgement,
            Judgement::Incorrect {
                item: 0,
                settles: true
            }
        );
    }

    #[test]
    fn judge_rejects_answered_question() {
        let quiz = Quiz::default();
        let content = questions();
        let mut board = quiz.board(&content);
        let answer = Answer::new(1, 0);
        let judgement = quiz.judge(&content, &board, &answer).unwrap();
        quiz.record(&mut board, &answer, &judgement, 0);

        let err = quiz.judge(&content, &board, &Answer::new(1, 2)).unwrap_err();
        assert_eq!(err, SessionError::AlreadyResolved { index: 1 });
        assert_eq!(board.answer(1), Some(0));
    }

    #[test]
    fn judge_rejects_bad_indexes() {
        let quiz = Quiz::default();
        let content = questions();
        let board = quiz.board(&content);

        assert_eq!(
            quiz.judge(&content, &board, &Answer::new(3, 0)).unwrap_err(),
            SessionError::InvalidIndex { index: 3, len: 3 }
        );
        assert_eq!(
            quiz.judge(&content, &board, &Answer::new(0, 2)).unwrap_err(),
            SessionError::InvalidOption {
                option: 2,
                options: 2
            }
        );
    }
}
