use crate::libningenka::shitsumon::{Kind, Question};
use crate::libningenka::ticker::Ticker;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::{rng, Rng};
use std::time::{Duration, Instant};


pub const MAX_POINTS: u32 = 1000;
pub const MIN_POINTS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GameMode {
    /// Every question once, then the results.
    Classic,
    /// Questions cycle until the countdown runs out.
    TimeAttack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Answering,
    Revealed,
    Finished,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub shuffle: bool,
    /// Countdown length in seconds for time attack.
    pub time_limit: u32,
    pub tick_interval: Duration,
    /// Questions per classic round, capped at the deck size.
    pub round_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            shuffle: false,
            time_limit: 30,
            tick_interval: Duration::from_secs(1),
            round_length: 10,
        }
    }
}

/// Points for a correct time-attack answer given after `elapsed`.
pub fn timed_points(elapsed: Duration) -> u32 {
    let points = (MAX_POINTS as f64 / (1.0 + elapsed.as_secs_f64())).round() as u32;
    points.max(MIN_POINTS)
}

#[derive(Debug)]
pub struct GameState {
    config: GameConfig,
    questions: Vec<Question>,
    index: usize,
    correct: u32,
    incorrect: u32,
    started: bool,
    finished: bool,
    last_correct: Option<bool>,
    pending: Option<Kind>,
    mode: Option<GameMode>,
    timed_score: Option<u32>,
    time_left: Option<u32>,
    question_started: Instant,
    ticker: Option<Ticker>,
}

impl GameState {
    pub fn new(questions: Vec<Question>, config: GameConfig) -> Self {
        Self {
            config,
            questions,
            index: 0,
            correct: 0,
            incorrect: 0,
            started: false,
            finished: false,
            last_correct: None,
            pending: None,
            mode: None,
            timed_score: None,
            time_left: None,
            question_started: Instant::now(),
            ticker: None,
        }
    }

    pub fn start(&mut self, mode: Option<GameMode>) {
        self.start_with_rng(mode, &mut rng())
    }

    pub fn start_with_rng<R: Rng + ?Sized>(&mut self, mode: Option<GameMode>, rng: &mut R) {
        self.stop_timer();
        self.clear();

        let timed = mode == Some(GameMode::TimeAttack);
        if self.config.shuffle || mode.is_some() {
            self.questions.shuffle(rng);
            debug!("[Game] Shuffled {} questions.", self.questions.len());
        }
        if timed {
            self.timed_score = Some(0);
            self.time_left = Some(self.config.time_limit);
            if self.config.time_limit > 0 {
                self.ticker = Some(Ticker::start(self.config.tick_interval));
            }
        }

        self.mode = mode;
        self.started = true;
        self.question_started = Instant::now();
        info!(
            "[Game] Started {:?} game with {} questions.",
            mode,
            self.total()
        );

        if timed && self.config.time_limit == 0 {
            self.finish();
        }
    }

    pub fn answer(&mut self, choice: Kind) {
        let elapsed = self.question_started.elapsed();
        self.answer_after(choice, elapsed)
    }

    pub(crate) fn answer_after(&mut self, choice: Kind, elapsed: Duration) {
        if !self.started || self.finished || self.pending.is_some() {
            return;
        }
        let Some(question) = self.questions.get(self.index) else {
            return;
        };

        let is_correct = question.kind == choice;
        debug!(
            "[Game] Question {} answered {:?} (truth {:?}) after {} ms.",
            question.id,
            choice,
            question.kind,
            elapsed.as_millis()
        );
        self.pending = Some(choice);
        self.last_correct = Some(is_correct);
        if is_correct {
            self.correct += 1;
            if let Some(score) = self.timed_score.as_mut() {
                *score += timed_points(elapsed);
            }
        } else {
            self.incorrect += 1;
        }
    }

    pub fn next(&mut self) {
        if !self.started || self.finished || self.total() == 0 {
            return;
        }

        if self.is_last() && !self.is_timed() {
            self.finish();
            return;
        }

        self.index = (self.index + 1) % self.questions.len();
        self.pending = None;
        self.last_correct = None;
        self.question_started = Instant::now();
    }

    pub fn reset(&mut self) {
        self.stop_timer();
        self.clear();
        debug!("[Game] Reset.");
    }

    /// One countdown step. Finishes the game when the countdown hits zero.
    pub fn tick(&mut self) {
        if self.finished {
            return;
        }
        let Some(left) = self.time_left.as_mut() else {
            return;
        };
        *left = left.saturating_sub(1);
        if *left == 0 {
            info!("[Game] Time is up.");
            self.finish();
        }
    }

    /// Applies every tick the countdown fired since the last poll.
    pub fn poll_timer(&mut self) {
        let fired = match &self.ticker {
            Some(ticker) => ticker.drain(),
            None => return,
        };
        for _ in 0..fired {
            self.tick();
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        self.stop_timer();
        info!(
            "[Game] Finished: {} correct, {} incorrect, score {}.",
            self.correct,
            self.incorrect,
            self.score()
        );
    }

    fn stop_timer(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.stop();
        }
    }

    fn clear(&mut self) {
        self.index = 0;
        self.correct = 0;
        self.incorrect = 0;
        self.started = false;
        self.finished = false;
        self.last_correct = None;
        self.pending = None;
        self.mode = None;
        self.timed_score = None;
        self.time_left = None;
    }

    /// Questions in the current round: the classic round length, or the whole deck.
    pub fn total(&self) -> usize {
        match self.mode {
            Some(GameMode::Classic) => self.config.round_length.min(self.questions.len()),
            _ => self.questions.len(),
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        if !self.started {
            return None;
        }
        self.questions.get(self.index)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    pub fn answered(&self) -> u32 {
        self.correct + self.incorrect
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn last_correct(&self) -> Option<bool> {
        self.last_correct
    }

    pub fn pending(&self) -> Option<Kind> {
        self.pending
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    pub fn is_timed(&self) -> bool {
        self.mode == Some(GameMode::TimeAttack)
    }

    pub fn timed_score(&self) -> Option<u32> {
        self.timed_score
    }

    pub fn time_left(&self) -> Option<u32> {
        self.time_left
    }

    pub fn timer_running(&self) -> bool {
        self.ticker.as_ref().is_some_and(Ticker::is_running)
    }

    pub fn phase(&self) -> Phase {
        if self.finished {
            Phase::Finished
        } else if !self.started {
            Phase::NotStarted
        } else if self.pending.is_some() {
            Phase::Revealed
        } else {
            Phase::Answering
        }
    }

    pub fn progress(&self) -> u32 {
        let total = self.total();
        if !self.started || total == 0 {
            return 0;
        }
        (self.index as f64 / total as f64 * 100.0).round() as u32
    }

    pub fn score(&self) -> u32 {
        self.timed_score.unwrap_or(self.correct)
    }

    pub fn success_rate(&self) -> u32 {
        let answered = self.answered();
        if answered == 0 {
            return 0;
        }
        (self.correct as f64 / answered as f64 * 100.0).round() as u32
    }

    pub fn is_last(&self) -> bool {
        let total = self.total();
        total != 0 && self.index == total - 1
    }
}
