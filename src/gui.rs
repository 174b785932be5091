use crate::libningenka::game::{GameMode, GameState, Phase};
use crate::libningenka::shitsumon::{Kind, Question};
use crate::Error;
use eframe::egui;
use eframe::egui::{Button, Color32, Image, ProgressBar, RichText, Ui};
use log::debug;
use std::time::Duration;

struct GuiState {
    game: GameState,
    title: String,
    mode: Option<GameMode>,
}

impl GuiState {
    fn new(
        cc: &eframe::CreationContext,
        game: GameState,
        title: String,
        mode: Option<GameMode>,
    ) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let mut state = Self { game, title, mode };
        // a mode given on the command line skips the menu
        if mode.is_some() {
            state.game.start(mode);
        }
        state
    }

    fn draw_menu(&mut self, ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new(&self.title).size(32.0));
            ui.label(format!("{} images. Human or AI?", self.game.total()));
            ui.add_space(16.0);
            ui.radio_value(&mut self.mode, None, "Simple");
            ui.radio_value(&mut self.mode, Some(GameMode::Classic), "Classic");
            ui.radio_value(&mut self.mode, Some(GameMode::TimeAttack), "Time Attack");
            ui.add_space(16.0);
            if ui.button(RichText::new("Start").size(20.0)).clicked() {
                debug!("[GUI] start {:?}", self.mode);
                self.game.start(self.mode);
            }
        });
    }

    fn draw_question(&mut self, ui: &mut Ui) {
        let Some(question) = self.game.current_question().cloned() else {
            return;
        };

        ui.vertical_centered(|ui| {
            if !question.description.is_empty() {
                ui.label(RichText::new(&question.description).size(18.0));
            }
            ui.add(
                Image::new(image_uri(&question))
                    .max_height(ui.available_height() * 0.7)
                    .maintain_aspect_ratio(true),
            );
            ui.add_space(8.0);

            let open = self.game.pending().is_none();
            ui.horizontal(|ui| {
                for kind in [Kind::Human, Kind::Ai] {
                    let button = Button::new(RichText::new(kind.label()).size(20.0));
                    if ui.add_enabled(open, button).clicked() {
                        self.game.answer(kind);
                    }
                }
            });

            if let Some(correct) = self.game.last_correct() {
                let (text, colour) = if correct {
                    (format!("Correct! It was {}.", question.kind), Color32::GREEN)
                } else {
                    (format!("Incorrect! It was {}.", question.kind), Color32::RED)
                };
                ui.colored_label(colour, RichText::new(text).size(18.0));

                let label = if self.game.is_last() && !self.game.is_timed() {
                    "Results"
                } else {
                    "Next"
                };
                if ui.button(label).clicked() {
                    self.game.next();
                }
            }
        });
    }

    fn draw_results(&mut self, ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new("Results").size(32.0));
            ui.label(format!(
                "{} correct, {} incorrect ({}%)",
                self.game.correct(),
                self.game.incorrect(),
                self.game.success_rate()
            ));
            if self.game.is_timed() {
                ui.label(RichText::new(format!("Score: {}", self.game.score())).size(24.0));
            }
            ui.add_space(16.0);
            ui.horizontal(|ui| {
                if ui.button("Play again").clicked() {
                    self.game.start(self.mode);
                }
                if ui.button("Menu").clicked() {
                    self.game.reset();
                }
            });
        });
    }

    fn draw_status(&self, ui: &mut Ui) {
        if self.game.is_timed() {
            ui.horizontal(|ui| {
                ui.label(format!("Time: {}s", self.game.time_left().unwrap_or_default()));
                ui.separator();
                ui.label(format!("Score: {}", self.game.score()));
            });
        } else {
            let text = format!("{}/{}", self.game.index() + 1, self.game.total());
            ui.add(ProgressBar::new(self.game.progress() as f32 / 100.0).text(text));
        }
    }
}

fn image_uri(question: &Question) -> String {
    if question.is_local_image() {
        format!("file://{}", question.image)
    } else {
        question.image.clone()
    }
}

impl eframe::App for GuiState {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.game.poll_timer();
        if self.game.timer_running() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        let phase = self.game.phase();
        if matches!(phase, Phase::Answering | Phase::Revealed) {
            egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.draw_status(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| match phase {
            Phase::NotStarted => self.draw_menu(ui),
            Phase::Answering | Phase::Revealed => self.draw_question(ui),
            Phase::Finished => self.draw_results(ui),
        });
    }
}

pub fn init_gui(
    game: GameState,
    title: Option<String>,
    mode: Option<GameMode>,
) -> Result<(), Error> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 720.0])
            .with_min_inner_size([320.0, 360.0]),
        ..Default::default()
    };
    let title = title.unwrap_or_else(|| String::from("Human or AI?"));
    eframe::run_native(
        "人間か？",
        native_options,
        Box::new(|cc| Ok(Box::new(GuiState::new(cc, game, title, mode)))),
    )?;

    Ok(())
}
