use std::collections::VecDeque;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::core::board::SquareGameboard;
use crate::core::consts::{FOUR_TILE_ODDS, MAX_TILE};
use crate::core::delegate::GameModelDelegate;
use crate::core::models::{Direction, GameStatus, MoveOrder, Tile, Vec2};
use crate::core::update;
use crate::error::GameError;

/// Called once a queued move has been attempted, with whether it changed the board.
pub type MoveCompletion = Box<dyn FnOnce(bool)>;

struct MoveCommand {
    direction: Direction,
    completion: MoveCompletion,
}

/// Game state and rules. Moves go through a queue that is drained by a
/// one-shot delay timer, so consecutive animated moves stay at least
/// `queue_delay` apart.
pub struct GameModel<D: GameModelDelegate> {
    config: GameConfig,
    score: u32,
    board: SquareGameboard<Tile>,
    delegate: D,
    queue: VecDeque<MoveCommand>,
    /// Deadline of the armed delay timer, if any.
    timer: Option<Instant>,
    rng: StdRng,
}

impl<D: GameModelDelegate> GameModel<D> {
    pub fn new(config: GameConfig, delegate: D) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, delegate, rng)
    }

    pub fn with_rng(config: GameConfig, delegate: D, rng: StdRng) -> Self {
        let board = SquareGameboard::new(config.dimension, Tile::Empty);
        GameModel {
            config,
            score: 0,
            board,
            delegate,
            queue: VecDeque::new(),
            timer: None,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn board(&self) -> &SquareGameboard<Tile> {
        &self.board
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    pub fn pending_commands(&self) -> usize {
        self.queue.len()
    }

    pub fn timer_armed(&self) -> bool {
        self.timer.is_some()
    }

    fn set_score(&mut self, score: u32) {
        self.score = score;
        self.delegate.score_changed(score);
    }

    pub fn reset(&mut self) {
        info!(dimension = self.config.dimension, "game reset");
        self.set_score(0);
        self.board.set_all(Tile::Empty);
        self.queue.clear();
        self.timer = None;
    }

    /// Reset and place the two opening tiles.
    pub fn start(&mut self) {
        self.reset();
        for _ in 0..2 {
            let value = self.random_tile_value();
            self.insert_tile_at_random_location(value);
        }
    }

    pub fn queue_move(
        &mut self,
        direction: Direction,
        completion: MoveCompletion,
        now: Instant,
    ) -> Result<(), GameError> {
        if self.queue.len() >= self.config.max_commands {
            warn!(pending = self.queue.len(), "move queue is wedged, dropping {:?}", direction);
            return Err(GameError::QueueFull(self.queue.len()));
        }
        self.queue.push_back(MoveCommand { direction, completion });
        self.tick(now);
        if self.timer.is_none() {
            self.timer_fired(now);
        }
        Ok(())
    }

    /// Fire the delay timer if its deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.timer {
            if deadline <= now {
                self.timer = None;
                self.timer_fired(now);
            }
        }
    }

    /// Run queued commands until one changes the board, then re-arm the timer.
    pub fn timer_fired(&mut self, now: Instant) {
        let mut changed = false;
        while let Some(command) = self.queue.pop_front() {
            changed = self.perform_move(command.direction);
            (command.completion)(changed);
            if changed {
                break;
            }
        }
        if changed {
            let value = self.random_tile_value();
            self.insert_tile_at_random_location(value);
            self.timer = Some(now + self.config.queue_delay());
            match self.status() {
                GameStatus::Won => info!(score = self.score, "threshold {} reached", self.config.threshold),
                GameStatus::Lost => info!(score = self.score, "no moves left"),
                GameStatus::Playing => {}
            }
        }
    }

    /// Apply a move right away, bypassing the queue.
    pub fn perform_move(&mut self, direction: Direction) -> bool {
        let outcome = update::perform_move(&mut self.board, direction);
        debug!(?direction, changed = outcome.changed, gained = outcome.score_gained, "move");
        if !outcome.changed {
            return false;
        }
        for order in outcome.orders {
            match order {
                MoveOrder::Single { from, to, value } => self.delegate.move_one_tile(from, to, value),
                MoveOrder::Double { from, to, value } => self.delegate.move_two_tiles(from, to, value),
            }
        }
        if outcome.score_gained > 0 {
            self.set_score(self.score.saturating_add(outcome.score_gained));
        }
        true
    }

    pub fn insert_tile(&mut self, at: Vec2, value: u32) {
        if self.board.get(&at) == Some(&Tile::Empty) {
            self.board[&at] = Tile::Value(value);
            self.delegate.insert_tile(at, value);
        }
    }

    pub fn insert_tile_at_random_location(&mut self, value: u32) {
        let open = self.empty_spots();
        if open.is_empty() {
            return;
        }
        let at = open[self.rng.gen_range(0..open.len())];
        self.insert_tile(at, value);
    }

    pub fn random_tile_value(&mut self) -> u32 {
        if self.rng.gen_range(0..FOUR_TILE_ODDS) == 0 { 4 } else { 2 }
    }

    pub fn empty_spots(&self) -> Vec<Vec2> {
        self.board
            .positions()
            .filter(|pos| self.board[pos] == Tile::Empty)
            .collect()
    }

    pub fn user_has_won(&self) -> bool {
        self.board.positions().any(|pos| match self.board[&pos] {
            Tile::Value(v) => v >= self.config.threshold,
            Tile::Empty => false,
        })
    }

    pub fn user_has_lost(&self) -> bool {
        if !self.empty_spots().is_empty() {
            return false;
        }
        let n = self.board.dimension();
        !self.board.positions().any(|pos| {
            let here = self.board[&pos];
            let right = (pos.j + 1 < n).then(|| self.board[&Vec2 { i: pos.i, j: pos.j + 1 }]);
            let below = (pos.i + 1 < n).then(|| self.board[&Vec2 { i: pos.i + 1, j: pos.j }]);
            right == Some(here) || below == Some(here)
        })
    }

    pub fn status(&self) -> GameStatus {
        if self.user_has_won() {
            GameStatus::Won
        } else if self.user_has_lost() {
            GameStatus::Lost
        } else {
            GameStatus::Playing
        }
    }

    /// Replace the board wholesale, e.g. when restoring a test position.
    pub fn load_board(&mut self, board: SquareGameboard<Tile>) -> Result<(), GameError> {
        if board.dimension() != self.config.dimension {
            return Err(GameError::Parse(format!(
                "board is {0}x{0}, game expects {1}x{1}",
                board.dimension(),
                self.config.dimension
            )));
        }
        if let Some(value) = board.rows().flatten().find_map(|t| match t {
            Tile::Value(v) if *v > MAX_TILE || !v.is_power_of_two() => Some(*v),
            _ => None,
        }) {
            return Err(GameError::Parse(format!("{} is not a tile value", value)));
        }
        self.board = board;
        Ok(())
    }
}
