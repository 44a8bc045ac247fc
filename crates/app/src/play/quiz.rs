use anyhow::{Context, Result};
use tracing::info;

use play_core::model::QuizMeta;
use play_core::rules::Answer;
use play_core::session::Direction;
use play_core::{Clock, Quiz, Session, SessionAction, SessionSummary, TimeLimit};
use services::view::{Verdict, format_clock, position_percent};
use services::{ContentSource, PlayConfig, SessionHost, TracingObserver};

use super::{Game, Input};
use crate::terminal;

const HELP: &str = "\
Quiz: type an option number to answer the current question.
Each answer is checked right away; type `n` to move on.
  n / p      next / previous question
  go N       jump to question N
  done       submit the quiz now
  pause, resume, again, q";

struct QuizGame {
    meta: QuizMeta,
}

impl Game for QuizGame {
    type Rules = Quiz;

    fn help(&self) -> &'static str {
        HELP
    }

    fn parse(&self, line: &str, session: &Session<Quiz>) -> Input<Answer> {
        match line {
            "n" => return Input::Act(SessionAction::Advance(Direction::Next)),
            "p" | "prev" => return Input::Act(SessionAction::Advance(Direction::Previous)),
            _ => {}
        }
        if let Some(target) = line.strip_prefix("go ") {
            return match target.trim().parse::<usize>() {
                Ok(n) if n > 0 => Input::Act(SessionAction::GoTo(n - 1)),
                _ => Input::Invalid(format!("`{target}` is not a question number.")),
            };
        }
        match line.parse::<usize>() {
            Ok(n) if n > 0 => Input::Act(SessionAction::Submit(Answer::new(session.cursor(), n - 1))),
            _ => Input::Invalid(format!("Unknown command `{line}`. Type `help` for commands.")),
        }
    }

    fn render(&self, session: &Session<Quiz>) {
        let Some(question) = session.current_item() else {
            return;
        };
        let cursor = session.cursor();
        terminal::rule();
        println!(
            "{}  Question {} of {} ({}%)  {}",
            self.meta.title(),
            cursor + 1,
            session.total_count(),
            position_percent(cursor, session.total_count()),
            terminal::clock(session.elapsed(), session.limit()),
        );
        println!("{}", question.prompt());
        let chosen = session.board().answer(cursor);
        for (index, option) in question.options().iter().enumerate() {
            let mark = option_mark(chosen, index, question.correct());
            println!(" {mark} {}. {option}", index + 1);
        }
        if chosen.is_some() {
            if let Some(explanation) = question.explanation() {
                terminal::hint(explanation);
            }
        }
        let answered = session.progress();
        println!("Answered {} of {}", answered.resolved, answered.total);
    }

    fn finished(&self, summary: &SessionSummary, session: &Session<Quiz>) {
        terminal::rule();
        println!("{}", Verdict::for_percent(summary.score()).label());
        println!(
            "Score {}%  ({} of {} correct)  Time taken {}",
            summary.score(),
            summary.correct_count(),
            summary.total_count(),
            format_clock(summary.elapsed_seconds())
        );
        for (index, question) in session.content().iter().enumerate() {
            let chosen = session.board().answer(index);
            let mark = match chosen {
                Some(option) if question.is_correct(option) => "ok",
                Some(_) => "x ",
                None => "- ",
            };
            println!("[{mark}] {}. {}", index + 1, question.prompt());
            let yours = chosen.and_then(|o| question.option(o)).unwrap_or("(no answer)");
            println!("       yours: {yours}");
            if chosen != Some(question.correct()) {
                if let Some(right) = question.option(question.correct()) {
                    println!("       answer: {right}");
                }
            }
            if let Some(explanation) = question.explanation() {
                println!("       {explanation}");
            }
        }
        terminal::hint("Type `again` to retake the quiz or `q` to leave.");
    }
}

/// Marker in front of an option. Once the question is answered the right
/// option and a wrong pick are both shown.
fn option_mark(chosen: Option<usize>, index: usize, correct: usize) -> &'static str {
    match chosen {
        None => " ",
        Some(_) if index == correct => "✓",
        Some(pick) if pick == index => "✗",
        Some(_) => " ",
    }
}

/// Load the quiz and play it.
///
/// # Errors
///
/// Returns an error if the quiz cannot be loaded or stdin fails.
pub(crate) async fn run(
    source: &dyn ContentSource,
    config: &PlayConfig,
    minutes: Option<u32>,
) -> Result<()> {
    let pack = source.quiz().await.context("loading quiz")?;
    let limit = minutes
        .or(config.quiz.minutes)
        .map_or_else(|| pack.meta().time_limit(), TimeLimit::minutes);
    let meta = pack.meta().clone();
    info!(title = meta.title(), difficulty = %meta.difficulty(), "starting quiz");

    let session = Session::start(Quiz::new(config.quiz.rules), pack.into_questions(), limit)?;
    let host = SessionHost::new(session, Clock::default_clock()).with_observer(TracingObserver);
    super::run(QuizGame { meta }, host).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use play_core::model::{Difficulty, QuestionDraft, QuizDraft};

    fn game() -> (QuizGame, Session<Quiz>) {
        let question = |prompt: &str, correct: usize| QuestionDraft {
            prompt: prompt.to_owned(),
            options: vec!["2".to_owned(), "4".to_owned()],
            correct,
            explanation: None,
        };
        let pack = QuizDraft {
            title: "Sums".to_owned(),
            subject: None,
            difficulty: Difficulty::Easy,
            duration_minutes: 1,
            questions: vec![question("1 + 1", 0), question("2 + 2", 1)],
        }
        .validate()
        .unwrap();
        let meta = pack.meta().clone();
        let session = Session::start(Quiz::default(), pack.into_questions(), TimeLimit::Unbounded)
            .unwrap();
        (QuizGame { meta }, session)
    }

    #[test]
    fn numbers_answer_the_current_question() {
        let (game, session) = game();
        let session = session.go_to(1).unwrap().into_session();
        assert!(matches!(
            game.parse("2", &session),
            Input::Act(SessionAction::Submit(Answer { question: 1, option: 1 }))
        ));
    }

    #[test]
    fn navigation_and_bad_input() {
        let (game, session) = game();
        assert!(matches!(
            game.parse("go 2", &session),
            Input::Act(SessionAction::GoTo(1))
        ));
        assert!(matches!(
            game.parse("p", &session),
            Input::Act(SessionAction::Advance(Direction::Previous))
        ));
        assert!(matches!(game.parse("go 0", &session), Input::Invalid(_)));
        assert!(matches!(game.parse("0", &session), Input::Invalid(_)));
        assert!(matches!(game.parse("banana", &session), Input::Invalid(_)));
    }

    #[test]
    fn answered_question_marks_right_and_wrong_options() {
        assert_eq!(option_mark(None, 1, 1), " ");
        assert_eq!(option_mark(Some(0), 1, 1), "✓");
        assert_eq!(option_mark(Some(0), 0, 1), "✗");
        assert_eq!(option_mark(Some(1), 1, 1), "✓");
        assert_eq!(option_mark(Some(1), 2, 1), " ");
    }
}
