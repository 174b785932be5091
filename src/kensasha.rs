use colored::Colorize;
use env_logger::Env;
use log::{error, info};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
#[path = "libningenka/shitsumon.rs"]
mod shitsumon;
use crate::shitsumon::{Deck, Kind};

#[derive(Parser, Debug)]
#[command(name = "検査者 (Kensasha)")]
#[command(version, about = "Checks and creates Ningenka decks", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a deck and print a summary.
    Check { deck: PathBuf },
    /// Write a template deck.
    Template {
        out: PathBuf,
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str()))
        .init();

    match args.command {
        Commands::Check { deck } => {
            let content = match Deck::load(&deck) {
                Ok(d) => d,
                Err(e) => {
                    error!("{}{}", "Invalid deck: ".red(), e);
                    std::process::exit(1);
                }
            };
            info!(
                "{}",
                format!(
                    "Deck {} ({} Questions)",
                    content.name.as_deref().unwrap_or("<unnamed>"),
                    content.questions.len()
                )
                .blue()
            );
            content.questions.iter().for_each(|question| {
                let line = format!("├ {}: {} ({})", question.id, question.image, question.kind);
                if question.is_local_image() && !PathBuf::from(&question.image).exists() {
                    error!("{}", format!("{line} ✘ missing file").red());
                } else {
                    info!("{}", line.green());
                }
            });
            println!(
                "{} human, {} AI",
                content.count_of(Kind::Human),
                content.count_of(Kind::Ai)
            );
        }
        Commands::Template { out, force } => {
            if out.exists() && !force {
                error!("{}", format!("{:?} exists, pass --force to overwrite", out).red());
                std::process::exit(1);
            }
            let json = match serde_json::to_string_pretty(&Deck::template()) {
                Ok(j) => j,
                Err(e) => {
                    error!("{}{}", "Cannot serialize template: ".red(), e);
                    std::process::exit(1);
                }
            };
            if let Err(e) = std::fs::write(&out, json) {
                error!("{}{}", "Cannot write template: ".red(), e);
                std::process::exit(1);
            }
            info!("{}", format!("Wrote template to {:?}", out).cyan());
        }
    }
}
