use cfg_if::cfg_if;
use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use log::{debug, warn};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

mod cli;
#[cfg(feature = "gui")]
mod gui;
mod libningenka;

use crate::libningenka::game::{GameConfig, GameMode, GameState};
use crate::libningenka::shitsumon::{Deck, DeckError};

#[derive(Parser, Debug)]
#[command(name = "人間か？ (Ningenka?)")]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "deck.json")]
    deck: PathBuf,
    #[arg(short, long, value_enum)]
    mode: Option<GameMode>,
    #[arg(short, long)]
    shuffle: bool,
    /// Time attack countdown in seconds.
    #[arg(
        short,
        long,
        default_value = "30",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    time_limit: u32,
    /// Questions per classic round.
    #[arg(
        short,
        long,
        default_value = "10",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    round_length: u32,
    #[arg(short, long, default_value = "error")]
    log_level: String,
    /// Play in the terminal even when the window is available.
    #[arg(long)]
    cli: bool,
}

#[derive(Debug, Error)]
enum Error {
    #[error("cannot load deck: {0}")]
    Deck(#[from] DeckError),
    #[error("terminal error")]
    Io(#[from] io::Error),
    #[cfg(feature = "kittygfx")]
    #[error("cannot decode image")]
    ImageDecode(#[from] image::ImageError),
    #[cfg(feature = "gui")]
    #[error("window error: {0}")]
    Gui(#[from] eframe::Error),
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str()))
        .init();

    let deck = match Deck::load(&args.deck) {
        Ok(deck) => deck,
        Err(err) => {
            warn!("[Setup] Cannot load deck {:?}: {}", args.deck, err);
            println!(
                "{}",
                format!("Could not load the deck at {:?}: {}", args.deck, err).yellow()
            );
            return Err(err.into());
        }
    };
    debug!("[Setup] Deck: {:?}", deck.name);

    let config = GameConfig {
        shuffle: args.shuffle,
        time_limit: args.time_limit,
        round_length: args.round_length as usize,
        ..Default::default()
    };
    let game = GameState::new(deck.questions, config);

    run_frontend(game, deck.name, args.mode, args.cli)
}

cfg_if! {
    if #[cfg(feature = "gui")] {
        fn run_frontend(
            game: GameState,
            title: Option<String>,
            mode: Option<GameMode>,
            prefer_cli: bool,
        ) -> Result<(), Error> {
            if prefer_cli {
                cli::cli_loop(game, title, mode)
            } else {
                gui::init_gui(game, title, mode)
            }
        }
    } else {
        fn run_frontend(
            game: GameState,
            title: Option<String>,
            mode: Option<GameMode>,
            _prefer_cli: bool,
        ) -> Result<(), Error> {
            cli::cli_loop(game, title, mode)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["ningenka"]).unwrap();
        assert_eq!(args.time_limit, 30);
        assert_eq!(args.round_length, 10);
        assert_eq!(args.mode, None);
    }

    #[test]
    fn test_args_reject_zero_limits() {
        assert!(Args::try_parse_from(["ningenka", "--time-limit", "0"]).is_err());
        assert!(Args::try_parse_from(["ningenka", "--round-length", "0"]).is_err());
        let args = Args::try_parse_from(["ningenka", "-m", "time-attack", "-t", "5"]).unwrap();
        assert_eq!(args.mode, Some(GameMode::TimeAttack));
        assert_eq!(args.time_limit, 5);
    }
}
