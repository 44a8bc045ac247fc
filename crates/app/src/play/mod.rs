//! Stdin-driven play loop shared by every game.
//!
//! One task multiplexes typed lines and clock ticks with `select!`. The
//! ticker only exists while the session is running and is dropped the moment
//! it stops.

pub(crate) mod memory;
pub(crate) mod quiz;
pub(crate) mod words;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use play_core::rules::Ruleset;
use play_core::{Session, SessionAction, SessionEvent, SessionSummary};
use services::{Announce, SessionHost, Ticker};

use crate::terminal;

pub(crate) type Submission<G> = <<G as Game>::Rules as Ruleset>::Submission;

/// What a typed line asks for.
pub(crate) enum Input<S> {
    Act(SessionAction<S>),
    Again,
    Next,
    Hint,
    Help,
    Quit,
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

/// Game-specific parsing and drawing around a generic session host.
pub(crate) trait Game {
    type Rules: Announce;

    fn help(&self) -> &'static str;

    /// Parse a line the shared commands did not claim.
    fn parse(&self, line: &str, session: &Session<Self::Rules>) -> Input<Submission<Self>>;

    fn render(&self, session: &Session<Self::Rules>);

    fn finished(&self, summary: &SessionSummary, session: &Session<Self::Rules>);

    /// Play the same content again.
    ///
    /// # Errors
    ///
    /// Returns an error if a fresh session cannot be built.
    fn again(&mut self, host: &mut SessionHost<Self::Rules>) -> Result<()> {
        host.restart();
        Ok(())
    }

    /// Move on to the next level, if the game has levels.
    ///
    /// # Errors
    ///
    /// Returns an error if the next level cannot be started.
    fn next(&mut self, _host: &mut SessionHost<Self::Rules>) -> Result<Flow> {
        terminal::hint("This game has no further levels. Type `again` to replay.");
        Ok(Flow::Continue)
    }

    fn hint(&self, _session: &Session<Self::Rules>) {
        terminal::hint("No hints for this game.");
    }
}

/// Run `game` until the player quits or stdin closes.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or a game hook fails.
pub(crate) async fn run<G: Game>(mut game: G, mut host: SessionHost<G::Rules>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker: Option<Ticker> = None;

    println!("{}", game.help());
    game.render(host.session());

    loop {
        sync_ticker(&host, &mut ticker);
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("stdin closed");
                    break;
                };
                if step(&mut game, &mut host, line.trim())? == Flow::Quit {
                    break;
                }
            }
            alive = next_tick(&mut ticker) => {
                if !alive {
                    warn!("tick source stopped, restarting it");
                    ticker = None;
                    continue;
                }
                let events = host.tick();
                if events.is_empty() {
                    announce_clock(&host);
                } else {
                    report(&game, &host, &events);
                }
            }
        }
    }
    Ok(())
}

fn sync_ticker<R: Ruleset>(host: &SessionHost<R>, ticker: &mut Option<Ticker>) {
    match (host.should_tick(), ticker.is_some()) {
        (true, false) => *ticker = Some(Ticker::every_second()),
        (false, true) => *ticker = None,
        _ => {}
    }
}

async fn next_tick(ticker: &mut Option<Ticker>) -> bool {
    match ticker {
        Some(ticker) => ticker.tick().await,
        None => std::future::pending().await,
    }
}

fn step<G: Game>(game: &mut G, host: &mut SessionHost<G::Rules>, line: &str) -> Result<Flow> {
    let input = match line {
        "" => return Ok(Flow::Continue),
        "q" | "quit" | "exit" => Input::Quit,
        "?" | "help" => Input::Help,
        "again" | "retry" => Input::Again,
        "next" => Input::Next,
        "hint" => Input::Hint,
        "pause" => Input::Act(SessionAction::Pause),
        "resume" => Input::Act(SessionAction::Resume),
        "done" | "finish" => Input::Act(SessionAction::Complete),
        other => game.parse(other, host.session()),
    };

    match input {
        Input::Act(action) => match host.apply(action) {
            Ok(events) => {
                report(game, host, &events);
                if host.session().status().is_active() {
                    game.render(host.session());
                }
            }
            Err(err) => terminal::notice(&<G::Rules as Announce>::refusal(&err)),
        },
        Input::Again => {
            game.again(host)?;
            game.render(host.session());
        }
        Input::Next => return game.next(host),
        Input::Hint => game.hint(host.session()),
        Input::Help => println!("{}", game.help()),
        Input::Quit => return Ok(Flow::Quit),
        Input::Invalid(message) => terminal::hint(&message),
    }
    Ok(Flow::Continue)
}

fn report<G: Game>(game: &G, host: &SessionHost<G::Rules>, events: &[SessionEvent]) {
    for event in events {
        if let Some(notice) = <G::Rules as Announce>::announce(host.session(), event) {
            terminal::notice(&notice);
        }
        if let Some(summary) = event.summary() {
            game.finished(summary, host.session());
        }
    }
    if events.iter().any(|e| matches!(e, SessionEvent::MismatchCleared))
        && host.session().status().is_active()
    {
        game.render(host.session());
    }
}

fn announce_clock<R: Ruleset>(host: &SessionHost<R>) {
    let session = host.session();
    if let Some(left) = session.remaining() {
        if left % 30 == 0 || left <= 10 {
            println!("{}", terminal::clock(session.elapsed(), session.limit()));
        }
    }
}
