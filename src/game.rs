use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::{thread::sleep, time::Duration};

use crate::arena::Arena;
use crate::config::*;
use crate::input::GameEvent;
use crate::render::Renderer;
use crate::snake::Snake;

use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::{debug, info, warn};

/// Outcome of one pass through the main loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// A queued score or input event was consumed.
    Handled,
    /// Nothing was queued, so simulation time advanced.
    Ticked,
    /// The board was replaced and needs drawing before the next tick.
    Redraw,
    Quit,
}

/// Owns the arena and score. The main loop is the only writer; input and
/// scoring reach it through the two queues.
pub struct Game<R = ThreadRng> {
    rng: R,
    arena: Arena,
    score: u32,
    over: bool,
    points_tx: Sender<u32>,
    points_rx: Receiver<u32>,
}

impl Game<ThreadRng> {
    pub fn new() -> Self {
        Game::with_rng(rand::thread_rng())
    }
}

impl Default for Game<ThreadRng> {
    fn default() -> Self {
        Game::new()
    }
}

impl<R> Game<R> {
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.over
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(mut rng: R) -> Self {
        let (points_tx, points_rx) = mpsc::channel();
        let arena = initial_arena(points_tx.clone(), &mut rng);

        Game { rng, arena, score: INITIAL_SCORE, over: false, points_tx, points_rx }
    }

    /// Runs until a quit event arrives or the input listener goes away.
    /// Renderer failures end the loop with an error.
    pub fn run<S: Renderer>(&mut self, screen: &mut S, events: &Receiver<GameEvent>) -> anyhow::Result<()> {
        info!("game started");
        screen.render(self)?;

        loop {
            match self.step(events) {
                Step::Quit => break,
                Step::Handled => {}
                Step::Redraw => screen.render(self)?,
                Step::Ticked => {
                    screen.render(self)?;
                    sleep(self.move_interval());
                }
            }
        }

        info!(score = self.score, "quitting");
        Ok(())
    }

    /// One loop iteration. Queued events win over the tick; the tick only
    /// runs when both queues are empty.
    pub fn step(&mut self, events: &Receiver<GameEvent>) -> Step {
        if let Ok(points) = self.points_rx.try_recv() {
            self.add_points(points);
            return Step::Handled;
        }

        match events.try_recv() {
            Ok(event) => return self.handle_event(event),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                warn!("input listener is gone");
                return Step::Quit;
            }
        }

        self.tick();
        Step::Ticked
    }

    pub fn handle_event(&mut self, event: GameEvent) -> Step {
        match event {
            GameEvent::Move(direction) if !self.over => {
                self.arena.snake_mut().change_direction(direction);
            }
            GameEvent::Move(_) => {}
            GameEvent::Retry if self.over => {
                self.retry();
                return Step::Redraw;
            }
            GameEvent::Retry => debug!("ignoring retry while playing"),
            GameEvent::Quit => return Step::Quit,
        }

        Step::Handled
    }

    /// Advances the snake unless the game is already over.
    pub fn tick(&mut self) {
        if self.over {
            return;
        }

        if self.arena.move_snake(&mut self.rng).is_err() {
            self.end();
        }
    }

    /// `100 - score / 10` milliseconds, never below the configured floor.
    pub fn move_interval(&self) -> Duration {
        let ms = BASE_MOVE_INTERVAL_MS.saturating_sub(u64::from(self.score) / 10);
        Duration::from_millis(ms.max(MIN_MOVE_INTERVAL_MS))
    }

    fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        debug!(points, score = self.score, "score updated");
    }

    fn end(&mut self) {
        info!(score = self.score, length = self.arena.snake().length(), "snake died");
        self.over = true;
    }

    fn retry(&mut self) {
        // Points still queued belong to the finished round.
        while let Ok(points) = self.points_rx.try_recv() {
            self.add_points(points);
        }
        info!(final_score = self.score, "retrying");

        self.arena = initial_arena(self.points_tx.clone(), &mut self.rng);
        self.score = INITIAL_SCORE;
        self.over = false;
    }
}

fn initial_snake() -> Snake {
    Snake::new(INITIAL_SNAKE_DIRECTION, INITIAL_SNAKE_BODY.to_vec())
}

fn initial_arena<R: Rng + ?Sized>(points: Sender<u32>, rng: &mut R) -> Arena {
    Arena::new(initial_snake(), points, ARENA_WIDTH, ARENA_HEIGHT, rng)
}
