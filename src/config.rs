//! Built-in game parameters. None of these are exposed to the player.

use crate::Coords;
use crate::snake::Direction;

/// Playfield width in cells.
pub const ARENA_WIDTH: i32 = 50;

/// Playfield height in cells.
pub const ARENA_HEIGHT: i32 = 20;

/// Body of a freshly spawned snake, tail first.
pub const INITIAL_SNAKE_BODY: [Coords; 4] = [(1, 1), (1, 2), (1, 3), (1, 4)];
pub const INITIAL_SNAKE_DIRECTION: Direction = Direction::Right;

pub const INITIAL_SCORE: u32 = 0;

/// Points awarded per food eaten.
pub const FOOD_POINTS: u32 = 10;

/// Move interval at score 0. One millisecond is shaved off per 10 points.
pub const BASE_MOVE_INTERVAL_MS: u64 = 100;

/// Keeps the loop from spinning once the score passes 900.
pub const MIN_MOVE_INTERVAL_MS: u64 = 10;

/// Random draws before food placement falls back to enumerating free cells.
pub const FOOD_PLACEMENT_ATTEMPTS: usize = 256;

pub const RETRY_KEY: char = 'r';

/// Written to the working directory; stdout belongs to the game screen.
pub const LOG_FILE: &str = "snake.log";
