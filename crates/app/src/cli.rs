//! Command-line interface for the terminal host.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Timed quizzes and learning games in the terminal.
#[derive(Parser, Debug)]
#[command(name = "app")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON file with rule and timer overrides
    #[arg(long, env = "PLAY_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer a timed multiple-choice quiz
    Quiz {
        /// Quiz JSON file; the built-in sample quiz is used otherwise
        #[arg(long)]
        file: Option<PathBuf>,

        /// Override the quiz duration in minutes
        #[arg(long)]
        minutes: Option<u32>,
    },

    /// Match equations to their answers
    Memory {
        /// Board layout seed; random when omitted
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Spell the hidden words from a pool of letters
    Words {
        /// Level to start at (1-based)
        #[arg(long, default_value_t = 1)]
        level: usize,

        /// Seconds per level
        #[arg(long)]
        seconds: Option<u32>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_word_level_flags() {
        let cli = Cli::try_parse_from(["app", "words", "--level", "2", "--seconds", "90"]).unwrap();
        match cli.command {
            Command::Words { level, seconds } => {
                assert_eq!(level, 2);
                assert_eq!(seconds, Some(90));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
