use anyhow::{Context, Result};
use tracing::{info, warn};

use play_core::rules::Guess;
use play_core::{Clock, Session, SessionAction, SessionSummary, TimeLimit, WordBuilder};
use services::view::{format_clock, word_hints};
use services::{
    Announce, ContentSource, LevelTrack, Notice, PlayConfig, SessionHost, TracingObserver,
};

use super::{Flow, Game, Input};
use crate::terminal;

const HELP: &str = "\
Word builder: spell words from the letters shown.
  WORD       submit a word
  hint       show a few target words
  done       end the level now
  next       go to the next level once this one is over
  pause, resume, again, q";

struct WordsGame {
    track: LevelTrack,
    hints: usize,
}

impl Game for WordsGame {
    type Rules = WordBuilder;

    fn help(&self) -> &'static str {
        HELP
    }

    fn parse(&self, line: &str, _session: &Session<WordBuilder>) -> Input<Guess> {
        if line.chars().all(char::is_alphabetic) {
            Input::Act(SessionAction::Submit(Guess::from(line)))
        } else {
            Input::Invalid("Words use letters only.".to_owned())
        }
    }

    fn render(&self, session: &Session<WordBuilder>) {
        let board = session.board();
        terminal::rule();
        println!(
            "Level {} of {}  Score {}  {}",
            self.track.level(),
            self.track.len(),
            session.score(),
            terminal::clock(session.elapsed(), session.limit()),
        );
        let letters: Vec<String> = session
            .ruleset()
            .pool()
            .letters()
            .chars()
            .map(String::from)
            .collect();
        println!("Letters: {}", letters.join(" "));
        let slots: Vec<String> = session
            .content()
            .iter()
            .enumerate()
            .map(|(index, word)| {
                if board.is_found(index) {
                    word.to_string()
                } else {
                    "_".repeat(word.len())
                }
            })
            .collect();
        println!("Found {}/{}: {}", session.resolved_count(), session.total_count(), slots.join(" "));
    }

    fn finished(&self, summary: &SessionSummary, session: &Session<WordBuilder>) {
        terminal::rule();
        println!(
            "Level {}: {} of {} words in {}  Score {} (bonus {})",
            self.track.level(),
            summary.correct_count(),
            summary.total_count(),
            format_clock(summary.elapsed_seconds()),
            summary.score(),
            summary.bonus()
        );
        let missed: Vec<&str> = session
            .content()
            .iter()
            .enumerate()
            .filter(|(index, _)| !session.board().is_found(*index))
            .map(|(_, word)| word.as_str())
            .collect();
        if !missed.is_empty() {
            println!("Missed: {}", missed.join(", "));
        }
        if self.track.is_last() {
            terminal::hint("Type `again` to replay this level or `q` to leave.");
        } else {
            terminal::hint("Type `next` for the next level, `again` to replay, `q` to leave.");
        }
    }

    fn next(&mut self, host: &mut SessionHost<WordBuilder>) -> Result<Flow> {
        if !host.session().status().is_finished() {
            terminal::hint("Finish this level first, or type `done` to end it.");
            return Ok(Flow::Continue);
        }
        match self.track.next_session(host.session()) {
            Ok(Some(session)) => {
                host.replace(session);
                self.render(host.session());
            }
            Ok(None) => terminal::notice(&Notice::all_levels_complete()),
            Err(err) => {
                warn!(error = %err, level = self.track.level(), "next level could not start");
                terminal::notice(&WordBuilder::refusal(&err));
            }
        }
        Ok(Flow::Continue)
    }

    fn hint(&self, session: &Session<WordBuilder>) {
        let hints = word_hints(session.content(), self.hints);
        terminal::hint(&format!("Try: {}", hints.join(", ")));
    }
}

/// Play the word levels starting at `level`.
///
/// # Errors
///
/// Returns an error if the level does not exist, no word sets are available,
/// or stdin fails.
pub(crate) async fn run(
    source: &dyn ContentSource,
    config: &PlayConfig,
    level: usize,
    seconds: Option<u32>,
) -> Result<()> {
    let sets = source.word_sets().await.context("loading word sets")?;
    let limit = seconds.map_or_else(|| config.words.time_limit(), TimeLimit::seconds);
    let track = LevelTrack::new(sets, config.words.rules, limit)?.starting_at(level)?;
    info!(level = track.level(), levels = track.len(), "starting word builder");

    let session = track.session()?;
    let host = SessionHost::new(session, Clock::default_clock()).with_observer(TracingObserver);
    let game = WordsGame {
        track,
        hints: config.words.hints,
    };
    super::run(game, host).await
}
