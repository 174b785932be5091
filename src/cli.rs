use crate::libningenka::game::{GameMode, GameState};
use crate::libningenka::shitsumon::{Kind, Question};
use crate::Error;
use colored::Colorize;
#[cfg(feature = "kittygfx")]
use kitty_image::{Action, Command, WrappedCommand};
use log::debug;
use std::io::{self, Write};
use text_io::try_read;

#[derive(Debug, PartialEq)]
enum Choice {
    Answer(Kind),
    Quit,
    Invalid,
}

impl Choice {
    fn from_str(input: &str) -> Choice {
        match input.trim() {
            "q" | "quit" => Choice::Quit,
            input => match input.parse::<Kind>() {
                Ok(kind) => Choice::Answer(kind),
                Err(_) => Choice::Invalid,
            },
        }
    }
}

pub fn cli_loop(
    mut game: GameState,
    title: Option<String>,
    mode: Option<GameMode>,
) -> Result<(), Error> {
    game.start(mode);
    let banner = match mode {
        Some(GameMode::TimeAttack) => format!(
            "==========> {} (Time Attack, {} s) <==========",
            title.as_deref().unwrap_or("人間か？"),
            game.time_left().unwrap_or_default()
        ),
        _ => format!(
            "==========> {} ({} questions) <==========",
            title.as_deref().unwrap_or("人間か？"),
            game.total()
        ),
    };
    println!("{}", banner.cyan());

    while !game.is_finished() {
        let Some(question) = game.current_question().cloned() else {
            break;
        };

        let leading = if game.is_timed() {
            format!(
                "#{} [{}s] ",
                game.answered() + 1,
                game.time_left().unwrap_or_default()
            )
        } else {
            format!("{}/{}. ", game.index() + 1, game.total())
        };
        print_question(&leading, &question)?;

        print!("{} ", "Human or AI? (h/a, q to quit):".cyan());
        io::stdout().flush()?;
        let input: Result<String, _> = try_read!("{}\n");
        let choice = match input {
            Ok(line) => Choice::from_str(line.as_str()),
            Err(_) => Choice::Quit,
        };
        debug!("choice: {:?}", choice);

        game.poll_timer();
        if game.is_finished() {
            println!("{}", "Time's up! That answer did not count.".yellow());
            break;
        }

        match choice {
            Choice::Answer(kind) => {
                game.answer(kind);
                print_verdict(&game, &question);
                game.next();
            }
            Choice::Invalid => {
                println!("{}", "Type h for human or a for AI.".bright_red());
            }
            Choice::Quit => {
                println!("{}", "Quitting Early!".cyan());
                break;
            }
        }
    }

    print_summary(&game);
    game.reset();
    Ok(())
}

fn print_question(leading: &str, question: &Question) -> Result<(), Error> {
    let text = if question.description.is_empty() {
        format!("Image #{}", question.id)
    } else {
        question.description.clone()
    };
    println!("{}{}", leading.cyan(), text.black().bold().on_white());

    let indent = " ".repeat(leading.chars().count());
    println!("{}{}", indent, question.image.underline());

    #[cfg(feature = "kittygfx")]
    if question.is_local_image() && question.image.ends_with(".png") {
        let image_path = std::path::Path::new(&question.image);
        debug!("path at {image_path:?}");
        let (width, height) = image::image_dimensions(image_path)?;
        let action = Action::TransmitAndDisplay(
            kitty_image::ActionTransmission {
                format: kitty_image::Format::Png,
                medium: kitty_image::Medium::File,
                width,
                height,
                ..Default::default()
            },
            kitty_image::ActionPut {
                x_offset: 10 * indent.len() as u32,
                ..Default::default()
            },
        );
        let command = WrappedCommand::new(Command::with_payload_from_path(action, image_path));
        println!("{command}");
        print!("{}", "\n".repeat(height as usize / 20));
    }

    Ok(())
}

fn print_verdict(game: &GameState, question: &Question) {
    match game.last_correct() {
        Some(true) => {
            let mut line = format!("Correct! It was {}.", question.kind);
            if let Some(score) = game.timed_score() {
                line.push_str(&format!(" Score: {score}"));
            }
            println!("{}", line.bright_green());
        }
        Some(false) => {
            println!(
                "{}",
                format!("Incorrect! It was {}.", question.kind).bright_red()
            );
        }
        None => {}
    }
}

fn print_summary(game: &GameState) {
    println!(
        "{}",
        format!(
            "==========> {} correct, {} incorrect ({}%) <==========",
            game.correct(),
            game.incorrect(),
            game.success_rate()
        )
        .cyan()
    );
    if game.is_timed() {
        println!("{}", format!("Final score: {}", game.score()).bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_from_str() {
        assert_eq!(Choice::from_str("h"), Choice::Answer(Kind::Human));
        assert_eq!(Choice::from_str("AI\n"), Choice::Answer(Kind::Ai));
        assert_eq!(Choice::from_str("q"), Choice::Quit);
        assert_eq!(Choice::from_str(""), Choice::Invalid);
        assert_eq!(Choice::from_str("maybe"), Choice::Invalid);
    }
}
