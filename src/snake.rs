use crate::Coords;
use std::collections::VecDeque;
use derive_more::{Display, Error};
use tracing::debug;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Right => Left,
            Left => Right,
            Up => Down,
            Down => Up,
        }
    }

    /// Step applied to a cell when moving this way. Y grows upwards.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Right => (1, 0),
            Left => (-1, 0),
            Up => (0, 1),
            Down => (0, -1),
        }
    }
}

/// The only way a move can fail. Self-collision and leaving the arena
/// are deliberately indistinguishable to callers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, Error)]
#[display("snake died")]
pub struct Died;

#[derive(Clone, Debug)]
pub struct Snake {
    /// Tail first; the head is the last element.
    body: VecDeque<Coords>,
    direction: Direction,
    /// Length the body grows toward, one segment per move.
    length: usize,
}

impl Snake {
    pub fn new(direction: Direction, body: Vec<Coords>) -> Self {
        debug_assert!(!body.is_empty(), "a snake needs at least one segment");
        Snake { length: body.len(), body: body.into(), direction }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn head(&self) -> Coords {
        self.body[self.body.len() - 1]
    }

    /// Advances the head one cell. The body is untouched when the
    /// candidate cell is already occupied, tail included.
    pub fn move_step(&mut self) -> Result<(), Died> {
        let new_head = self.next_cell(self.direction);

        if self.is_on_position(new_head) {
            debug!(?new_head, "snake collided with itself");
            return Err(self.die());
        }

        self.body.push_back(new_head);
        if self.body.len() > self.length {
            self.body.pop_front();
        }

        Ok(())
    }

    /// Ignores a turn straight back into the neck. Several turns may land
    /// before the next move, so the neck cell is checked as well as the
    /// current direction.
    pub fn change_direction(&mut self, new_direction: Direction) {
        let into_neck = self.neck() == Some(self.next_cell(new_direction));
        if new_direction == self.direction.opposite() || into_neck {
            debug!(?new_direction, current = ?self.direction, "ignoring reversal");
            return;
        }

        self.direction = new_direction;
    }

    pub fn grow(&mut self) {
        self.length += 1;
    }

    pub fn is_on_position(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    fn neck(&self) -> Option<Coords> {
        let len = self.body.len();
        if len < 2 {
            return None;
        }
        Some(self.body[len - 2])
    }

    fn next_cell(&self, direction: Direction) -> Coords {
        let (x, y) = self.head();
        let (dx, dy) = direction.offset();
        (x + dx, y + dy)
    }

    pub fn die(&self) -> Died {
        Died
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 4] = [Right, Left, Up, Down];

    fn initial() -> Snake {
        Snake::new(Right, vec![(1, 1), (1, 2), (1, 3), (1, 4)])
    }

    #[test]
    fn reversal_is_ignored() {
        for &d in &ALL {
            let mut snake = Snake::new(d, vec![(5, 5)]);
            snake.change_direction(d.opposite());
            assert_eq!(snake.direction(), d);
        }
    }

    #[test]
    fn any_other_turn_is_accepted() {
        for &d in &ALL {
            for &to in ALL.iter().filter(|&&to| to != d.opposite()) {
                let mut snake = Snake::new(d, vec![(5, 5)]);
                snake.change_direction(to);
                assert_eq!(snake.direction(), to);
            }
        }
    }

    #[test]
    fn move_drops_tail_when_not_growing() {
        let mut snake = initial();
        snake.move_step().unwrap();

        assert_eq!(snake.body(), &[(1, 2), (1, 3), (1, 4), (2, 4)]);
        assert_eq!(snake.head(), (2, 4));
    }

    #[test]
    fn length_is_stable_without_food() {
        let mut snake = initial();
        for _ in 0..10 {
            snake.move_step().unwrap();
            assert_eq!(snake.body().len(), 4);
        }
    }

    #[test]
    fn grows_one_segment_per_move_up_to_target() {
        let mut snake = initial();
        snake.grow();
        snake.grow();

        snake.move_step().unwrap();
        assert_eq!(snake.body().len(), 5);
        snake.move_step().unwrap();
        assert_eq!(snake.body().len(), 6);
        snake.move_step().unwrap();
        assert_eq!(snake.body().len(), 6);
        assert_eq!(snake.length(), 6);
    }

    #[test]
    fn moves_follow_axis_offsets() {
        let mut snake = Snake::new(Up, vec![(3, 3)]);
        snake.move_step().unwrap();
        assert_eq!(snake.head(), (3, 4));

        snake.change_direction(Left);
        snake.move_step().unwrap();
        assert_eq!(snake.head(), (2, 4));

        snake.change_direction(Down);
        snake.move_step().unwrap();
        assert_eq!(snake.head(), (2, 3));
    }

    #[test]
    fn running_into_body_dies_without_mutation() {
        // Head at (2,2) heading Down into (2,1), which is part of the body.
        let body = vec![(1, 2), (1, 1), (2, 1), (3, 1), (3, 2), (2, 2)];
        let mut snake = Snake::new(Down, body.clone());

        assert_eq!(snake.move_step(), Err(Died));
        assert_eq!(*snake.body(), body);
    }

    #[test]
    fn two_quick_turns_cannot_reverse_into_the_neck() {
        let mut snake = Snake::new(Right, vec![(5, 5), (6, 5), (7, 5)]);

        snake.change_direction(Up);
        snake.change_direction(Left);
        assert_eq!(snake.direction(), Up);

        snake.move_step().unwrap();
        assert_eq!(snake.head(), (7, 6));
    }

    #[test]
    fn turning_is_free_again_after_moving() {
        let mut snake = Snake::new(Right, vec![(5, 5), (6, 5), (7, 5)]);
        snake.change_direction(Up);
        snake.move_step().unwrap();

        snake.change_direction(Left);
        assert_eq!(snake.direction(), Left);
    }

    #[test]
    fn long_runs_keep_the_tail_order() {
        let mut snake = initial();
        snake.change_direction(Up);
        for _ in 0..5 {
            snake.move_step().unwrap();
        }

        assert_eq!(snake.body(), &[(1, 6), (1, 7), (1, 8), (1, 9)]);
    }

    #[test]
    fn tail_cell_counts_as_occupied() {
        let body = vec![(1, 1), (2, 1), (2, 2), (1, 2)];
        let mut snake = Snake::new(Down, body);

        assert_eq!(snake.move_step(), Err(Died));
    }

    #[test]
    fn is_on_position_checks_every_segment() {
        let snake = initial();
        assert!(snake.is_on_position((1, 1)));
        assert!(snake.is_on_position((1, 4)));
        assert!(!snake.is_on_position((2, 2)));
    }

    #[test]
    fn died_displays_plainly() {
        assert_eq!(initial().die().to_string(), "snake died");
    }
}
