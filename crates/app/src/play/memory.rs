use anyhow::{Context, Result};
use tracing::info;

use play_core::rules::Flip;
use play_core::{Clock, MemoryMatch, Session, SessionAction, SessionSummary};
use services::catalog::random_seed;
use services::view::format_clock;
use services::{ContentSource, PlayConfig, SessionHost, TracingObserver};

use super::{Game, Input};
use crate::terminal;

const COLUMNS: usize = 4;

const HELP: &str = "\
Memory match: pair each equation with its answer.
  A B        turn over cards A and B, e.g. `3 11`
  ok         turn a missed pair back over
  again      shuffle a new board
  pause, resume, q";

struct MemoryGame;

impl Game for MemoryGame {
    type Rules = MemoryMatch;

    fn help(&self) -> &'static str {
        HELP
    }

    fn parse(&self, line: &str, _session: &Session<MemoryMatch>) -> Input<Flip> {
        if line == "ok" {
            return Input::Act(SessionAction::DismissMismatch);
        }
        let picks: Vec<usize> = line
            .split_whitespace()
            .filter_map(|part| part.parse::<usize>().ok())
            .collect();
        match picks.as_slice() {
            [a, b] if *a > 0 && *b > 0 && line.split_whitespace().count() == 2 => {
                Input::Act(SessionAction::Submit(Flip::new(a - 1, b - 1)))
            }
            _ => Input::Invalid("Name two cards by number, e.g. `3 11`.".to_owned()),
        }
    }

    fn render(&self, session: &Session<MemoryMatch>) {
        let board = session.board();
        let content = session.content();
        terminal::rule();
        println!(
            "Moves {}  Matches {}/{}  Score {}  {}",
            session.moves(),
            session.resolved_count(),
            session.total_count(),
            session.score(),
            terminal::clock(session.elapsed(), session.limit()),
        );
        for (r, cards) in board.cards().chunks(COLUMNS).enumerate() {
            let line: Vec<String> = cards
                .iter()
                .enumerate()
                .map(|(c, card)| {
                    let position = r * COLUMNS + c;
                    let face = if board.is_face_up(position) {
                        card.label(content).to_owned()
                    } else {
                        "??".to_owned()
                    };
                    let mark = if board.is_matched(position) { "*" } else { " " };
                    format!("{:>2}{mark}{face:<8}", position + 1)
                })
                .collect();
            println!("{}", line.join(" "));
        }
        if board.mismatch().is_some() {
            terminal::hint("No match. Type `ok` or wait a moment.");
        }
    }

    fn finished(&self, summary: &SessionSummary, _session: &Session<MemoryMatch>) {
        terminal::rule();
        println!(
            "Pairs {} of {}  Moves {}  Time {}",
            summary.correct_count(),
            summary.total_count(),
            summary.attempts(),
            format_clock(summary.elapsed_seconds())
        );
        println!(
            "Score {} + bonus {} = {}",
            summary.base_score(),
            summary.bonus(),
            summary.score()
        );
        terminal::hint("Type `again` for a new board or `q` to leave.");
    }

    fn again(&mut self, host: &mut SessionHost<MemoryMatch>) -> Result<()> {
        let session = host.session();
        let game = session.ruleset().reseeded(random_seed());
        let pairs = session.content().to_vec();
        host.next_level_with(game, pairs)?;
        Ok(())
    }
}

/// Deal the built-in pairs and play.
///
/// # Errors
///
/// Returns an error if no card pairs are available or stdin fails.
pub(crate) async fn run(
    source: &dyn ContentSource,
    config: &PlayConfig,
    seed: Option<u64>,
) -> Result<()> {
    let pairs = source.card_pairs().await.context("loading card pairs")?;
    let seed = seed.unwrap_or_else(random_seed);
    info!(pairs = pairs.len(), seed, "dealing memory board");

    let game = MemoryMatch::new(config.memory.rules).reseeded(seed);
    let session = Session::start(game, pairs, config.memory.limit)?;
    let host = SessionHost::new(session, Clock::default_clock()).with_observer(TracingObserver);
    super::run(MemoryGame, host).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use play_core::model::CardPair;
    use play_core::TimeLimit;

    fn session() -> Session<MemoryMatch> {
        let pairs = vec![
            CardPair::new("5 + 3", "8").unwrap(),
            CardPair::new("2 × 6", "12").unwrap(),
        ];
        Session::start(MemoryMatch::default(), pairs, TimeLimit::Unbounded).unwrap()
    }

    #[test]
    fn two_numbers_flip_two_cards() {
        assert!(matches!(
            MemoryGame.parse("1 4", &session()),
            Input::Act(SessionAction::Submit(Flip { first: 0, second: 3 }))
        ));
        assert!(matches!(
            MemoryGame.parse("ok", &session()),
            Input::Act(SessionAction::DismissMismatch)
        ));
    }

    #[test]
    fn malformed_flips_are_invalid() {
        for line in ["1", "0 2", "1 2 3", "a b", "1 x"] {
            assert!(matches!(MemoryGame.parse(line, &session()), Input::Invalid(_)), "{line}");
        }
    }

    #[test]
    fn again_deals_a_fresh_board_with_the_same_pairs() {
        let mut host = SessionHost::new(session(), Clock::default_clock());
        host.apply(SessionAction::Complete).unwrap();
        MemoryGame.again(&mut host).unwrap();
        assert!(host.should_tick());
        assert_eq!(host.session().total_count(), 2);
        assert_eq!(host.session().moves(), 0);
    }
}
