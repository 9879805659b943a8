use crate::Coords;
use crate::config::FOOD_PLACEMENT_ATTEMPTS;
use crate::food::Food;
use crate::snake::{Died, Snake};

use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// The playfield: `[0, width) x [0, height)` with one snake and one food.
pub struct Arena {
    snake: Snake,
    food: Food,
    width: i32,
    height: i32,
    points: Sender<u32>,
}

impl Arena {
    pub fn new<R: Rng + ?Sized>(
        snake: Snake,
        points: Sender<u32>,
        width: i32,
        height: i32,
        rng: &mut R,
    ) -> Self {
        debug_assert!(width > 0 && height > 0, "arena must have at least one cell");

        // Only a grid the snake already fills has no free cell; the food then
        // sits under the snake until it moves.
        let food = Food::place((0, 0), rng);
        let mut arena = Arena { snake, food, width, height, points };
        arena.place_food(rng);
        arena
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// One simulation tick: move, check the walls, then eat.
    pub fn move_snake<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), Died> {
        self.snake.move_step()?;

        if self.snake_left_arena() {
            debug!(head = ?self.snake.head(), "snake left the arena");
            return Err(self.snake.die());
        }

        if self.has_food(self.snake.head()) {
            self.add_points(self.food.points());
            self.snake.grow();
            self.place_food(rng);
        }

        Ok(())
    }

    pub fn is_occupied(&self, pos: Coords) -> bool {
        self.snake.is_on_position(pos)
    }

    #[cfg(test)]
    pub(crate) fn place_food_at<R: Rng + ?Sized>(&mut self, pos: Coords, rng: &mut R) {
        self.food = Food::place(pos, rng);
    }

    fn has_food(&self, pos: Coords) -> bool {
        self.food.pos() == pos
    }

    fn snake_left_arena(&self) -> bool {
        let (x, y) = self.snake.head();
        x < 0 || y < 0 || x >= self.width || y >= self.height
    }

    fn add_points(&self, points: u32) {
        debug!(points, "food eaten");
        if self.points.send(points).is_err() {
            warn!(points, "score receiver is gone, dropping points");
        }
    }

    fn place_food<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match self.free_cell(rng) {
            Some(pos) => {
                self.food = Food::place(pos, rng);
                debug!(?pos, glyph = %self.food.glyph(), "food placed");
            }
            None => warn!("no free cell left for food"),
        }
    }

    /// Samples random cells first and only enumerates the grid when the
    /// board is so crowded that sampling keeps missing.
    fn free_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Coords> {
        for _ in 0..FOOD_PLACEMENT_ATTEMPTS {
            let pos = (rng.gen_range(0..self.width), rng.gen_range(0..self.height));
            if !self.is_occupied(pos) {
                return Some(pos);
            }
        }

        let free: Vec<Coords> = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&pos| !self.is_occupied(pos))
            .collect();
        free.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::{self, *};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::mpsc::{self, Receiver};

    fn arena_with(
        direction: Direction,
        body: Vec<Coords>,
        width: i32,
        height: i32,
    ) -> (Arena, Receiver<u32>, StdRng) {
        let mut rng = StdRng::seed_from_u64(42);
        let (tx, rx) = mpsc::channel();
        let arena = Arena::new(Snake::new(direction, body), tx, width, height, &mut rng);
        (arena, rx, rng)
    }

    #[test]
    fn eating_scores_grows_and_replaces_food() {
        let (mut arena, points, mut rng) = arena_with(Right, vec![(0, 1), (1, 1), (2, 1)], 50, 20);
        arena.place_food_at((3, 1), &mut rng);

        arena.move_snake(&mut rng).unwrap();

        assert_eq!(arena.snake().head(), (3, 1));
        assert_eq!(points.try_recv(), Ok(10));
        assert_eq!(arena.snake().length(), 4);
        assert!(!arena.is_occupied(arena.food().pos()));

        arena.place_food_at((40, 15), &mut rng);
        arena.move_snake(&mut rng).unwrap();
        assert_eq!(arena.snake().body().len(), 4);
        assert!(points.try_recv().is_err());
    }

    #[test]
    fn leaving_through_any_wall_dies() {
        let cases = [
            (Right, (49, 5)),
            (Left, (0, 5)),
            (Up, (10, 19)),
            (Down, (10, 0)),
        ];
        for &(direction, head) in &cases {
            let (mut arena, _points, mut rng) = arena_with(direction, vec![head], 50, 20);
            assert_eq!(arena.move_snake(&mut rng), Err(Died), "{:?}", direction);
        }
    }

    #[test]
    fn last_column_and_row_are_playable() {
        let (mut arena, _points, mut rng) = arena_with(Right, vec![(47, 19)], 50, 20);
        arena.place_food_at((0, 0), &mut rng);

        assert_eq!(arena.move_snake(&mut rng), Ok(()));
        assert_eq!(arena.move_snake(&mut rng), Ok(()));
        assert_eq!(arena.snake().head(), (49, 19));
        assert_eq!(arena.move_snake(&mut rng), Err(Died));
    }

    #[test]
    fn self_collision_is_reported_as_death() {
        let body = vec![(1, 2), (1, 1), (2, 1), (3, 1), (3, 2), (2, 2)];
        let (mut arena, points, mut rng) = arena_with(Down, body, 10, 10);

        assert_eq!(arena.move_snake(&mut rng), Err(Died));
        assert!(points.try_recv().is_err());
    }

    #[test]
    fn food_never_lands_on_the_snake() {
        let body: Vec<Coords> = (0..5).flat_map(|y| (0..4).map(move |x| (x, y))).collect();
        let (mut arena, _points, mut rng) = arena_with(Right, body, 5, 5);

        for _ in 0..200 {
            arena.place_food(&mut rng);
            assert!(!arena.is_occupied(arena.food().pos()));
            assert_eq!(arena.food().pos().0, 4);
        }
    }

    #[test]
    fn single_free_cell_is_found() {
        let mut body: Vec<Coords> = (0..3).flat_map(|y| (0..3).map(move |x| (x, y))).collect();
        body.retain(|&pos| pos != (2, 2));
        let (arena, _points, _rng) = arena_with(Right, body, 3, 3);

        assert_eq!(arena.food().pos(), (2, 2));
    }

    #[test]
    fn full_grid_keeps_the_old_food() {
        let body: Vec<Coords> = (0..2).flat_map(|y| (0..2).map(move |x| (x, y))).collect();
        let (mut arena, _points, mut rng) = arena_with(Right, body, 2, 2);
        let before = *arena.food();

        arena.place_food(&mut rng);
        assert_eq!(*arena.food(), before);
    }

    #[test]
    fn dropped_receiver_does_not_stop_the_game() {
        let (mut arena, points, mut rng) = arena_with(Right, vec![(1, 1)], 10, 10);
        drop(points);
        arena.place_food_at((2, 1), &mut rng);

        assert_eq!(arena.move_snake(&mut rng), Ok(()));
        assert_eq!(arena.snake().length(), 2);
    }
}
