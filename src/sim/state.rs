//! Game state and core simulation types
//!
//! `Entities` is the registry of everything on the board; `GameSession` wraps
//! it with the score, heading, spawn schedules and RNG of one playthrough.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Direction, Grid};
use super::spawn::{self, DogSchedule, TunaSchedule};
use crate::tick_interval_ms;
use crate::tuning::Tuning;

/// The cat: ordered body cells, head first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    segments: VecDeque<Cell>,
}

impl Snake {
    pub fn new(head: Cell) -> Self {
        Self {
            segments: VecDeque::from([head]),
        }
    }

    /// Build from explicit segments (head first); must not be empty
    pub fn from_segments(segments: impl IntoIterator<Item = Cell>) -> Self {
        let segments: VecDeque<Cell> = segments.into_iter().collect();
        debug_assert!(!segments.is_empty(), "snake needs at least a head");
        Self { segments }
    }

    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    /// True if the head shares a cell with any other segment
    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.segments.iter().skip(1).any(|&c| c == head)
    }
}

/// A dog obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub cell: Cell,
    /// Ticks left before the dog leaves (always > 0 while present)
    pub ttl_ticks: u32,
}

/// A tuna can bonus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunaCan {
    pub cell: Cell,
    pub ttl_ticks: u32,
}

/// Which entity kinds count as blocking for an occupancy query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub snake: bool,
    pub food: bool,
    pub dogs: bool,
    pub tuna: bool,
}

impl Occupancy {
    pub const SNAKE: Occupancy = Occupancy {
        snake: true,
        food: false,
        dogs: false,
        tuna: false,
    };
    /// Everything a dog may not be placed on
    pub const DOG_BLOCKERS: Occupancy = Occupancy {
        snake: true,
        food: true,
        dogs: true,
        tuna: false,
    };
    pub const ALL: Occupancy = Occupancy {
        snake: true,
        food: true,
        dogs: true,
        tuna: true,
    };
}

/// Entity registry
#[derive(Debug, Clone)]
pub struct Entities {
    pub snake: Snake,
    pub food: Cell,
    pub dogs: Vec<Dog>,
    pub tuna: Vec<TunaCan>,
}

impl Entities {
    pub fn new(snake: Snake, food: Cell) -> Self {
        Self {
            snake,
            food,
            dogs: Vec::new(),
            tuna: Vec::new(),
        }
    }

    pub fn head(&self) -> Cell {
        self.snake.head()
    }

    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.snake.contains(cell)
    }

    pub fn is_occupied(&self, cell: Cell, by: Occupancy) -> bool {
        (by.snake && self.snake.contains(cell))
            || (by.food && self.food == cell)
            || (by.dogs && self.dogs.iter().any(|d| d.cell == cell))
            || (by.tuna && self.tuna.iter().any(|t| t.cell == cell))
    }

    pub fn dog_at(&self, cell: Cell) -> Option<&Dog> {
        self.dogs.iter().find(|d| d.cell == cell)
    }

    /// Push a new head; the caller decides whether the tail follows
    pub fn grow_snake(&mut self, new_head: Cell) {
        self.snake.segments.push_front(new_head);
    }

    pub fn shrink_tail(&mut self) -> Option<Cell> {
        debug_assert!(self.snake.len() > 1, "shrinking would remove the head");
        if self.snake.len() > 1 {
            self.snake.segments.pop_back()
        } else {
            None
        }
    }

    pub fn set_food(&mut self, cell: Cell) {
        debug_assert!(!self.snake.contains(cell), "food placed on the cat");
        self.food = cell;
    }

    pub fn add_dog(&mut self, cell: Cell, lifetime: u32) {
        debug_assert!(lifetime > 0);
        self.dogs.push(Dog {
            cell,
            ttl_ticks: lifetime,
        });
    }

    /// Age every dog by one tick and remove the ones whose time ran out
    pub fn remove_expired_dogs(&mut self) -> Vec<Dog> {
        let mut expired = Vec::new();
        self.dogs.retain_mut(|dog| {
            dog.ttl_ticks = dog.ttl_ticks.saturating_sub(1);
            if dog.ttl_ticks == 0 {
                expired.push(*dog);
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn add_tuna(&mut self, cell: Cell, lifetime: u32) {
        debug_assert!(lifetime > 0);
        self.tuna.push(TunaCan {
            cell,
            ttl_ticks: lifetime,
        });
    }

    pub fn remove_expired_tuna(&mut self) -> Vec<TunaCan> {
        let mut expired = Vec::new();
        self.tuna.retain_mut(|can| {
            can.ttl_ticks = can.ttl_ticks.saturating_sub(1);
            if can.ttl_ticks == 0 {
                expired.push(*can);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Remove and return the can at `cell`, if any
    pub fn take_tuna_at(&mut self, cell: Cell) -> Option<TunaCan> {
        let idx = self.tuna.iter().position(|t| t.cell == cell)?;
        Some(self.tuna.remove(idx))
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Head ran into the cat's own body
    SelfCollision,
    /// Head ran into a dog
    Dog,
    /// No free cell left for a new bird
    BoardFull,
}

/// One playthrough, owned by whoever drives the ticks
#[derive(Debug, Clone)]
pub struct GameSession {
    pub grid: Grid,
    pub entities: Entities,
    pub direction: Direction,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Speed setting (1-10); scales lifetimes measured in real time
    pub speed: u8,
    pub dog_schedule: DogSchedule,
    pub tuna_schedule: TunaSchedule,
    pub ended: Option<EndReason>,
    pub tuning: Tuning,
    seed: u64,
    pub(crate) rng: Pcg32,
}

impl GameSession {
    /// Fresh session: cat at the start cell, standing still, one bird placed
    pub fn new(tuning: Tuning, speed: u8, seed: u64) -> Self {
        let grid = tuning.grid();
        let mut rng = Pcg32::seed_from_u64(seed);
        let snake = Snake::new(tuning.start);
        // Start cell is always free, so the scan fallback always finds a cell
        // unless the grid is a single cell.
        let food = spawn::place_food(&grid, &snake, tuning.food_attempts, &mut rng)
            .unwrap_or(tuning.start);
        let dog_schedule = DogSchedule::new(&tuning, &mut rng);
        let tuna_schedule = TunaSchedule::new(&tuning, &mut rng);
        Self {
            grid,
            entities: Entities::new(snake, food),
            direction: Direction::None,
            score: 0,
            time_ticks: 0,
            speed,
            dog_schedule,
            tuna_schedule,
            ended: None,
            tuning,
            seed,
            rng,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_over(&self) -> bool {
        self.ended.is_some()
    }

    /// Current tick interval for this session's speed
    pub fn tick_interval_ms(&self) -> u32 {
        tick_interval_ms(self.speed)
    }

    /// Request a new heading; reversing straight into the neck is dropped
    pub fn steer(&mut self, direction: Direction) -> bool {
        if direction == Direction::None || direction.is_reverse_of(self.direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Replace the snake (test setup and scripted scenarios)
    pub fn place_snake(&mut self, snake: Snake) {
        self.entities.snake = snake;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(Tuning::default(), 5, 7)
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "snake needs at least a head")]
    fn test_headless_snake_is_rejected() {
        Snake::from_segments(std::iter::empty());
    }

    #[test]
    fn test_new_session() {
        let s = session();
        assert_eq!(s.entities.snake.len(), 1);
        assert_eq!(s.entities.head(), Cell::new(10, 10));
        assert_ne!(s.entities.food, Cell::new(10, 10));
        assert!(s.grid.contains(s.entities.food));
        assert_eq!(s.direction, Direction::None);
        assert_eq!(s.score, 0);
        assert!(s.entities.dogs.is_empty());
        assert!(s.entities.tuna.is_empty());
    }

    #[test]
    fn test_steer_rejects_reversal() {
        let mut s = session();
        assert!(s.steer(Direction::Right));
        assert!(!s.steer(Direction::Left));
        assert_eq!(s.direction, Direction::Right);
        assert!(s.steer(Direction::Up));
        assert!(!s.steer(Direction::Down));
        assert_eq!(s.direction, Direction::Up);
        assert!(!s.steer(Direction::None));
        assert_eq!(s.direction, Direction::Up);
    }

    #[test]
    fn test_steer_from_rest_accepts_anything() {
        for dir in Direction::MOVES {
            let mut s = session();
            assert!(s.steer(dir));
            assert_eq!(s.direction, dir);
        }
    }

    #[test]
    fn test_occupancy_masks() {
        let mut e = Entities::new(Snake::new(Cell::new(1, 1)), Cell::new(2, 2));
        e.add_dog(Cell::new(3, 3), 5);
        e.add_tuna(Cell::new(4, 4), 5);

        assert!(e.is_occupied_by_snake(Cell::new(1, 1)));
        assert!(!e.is_occupied(Cell::new(2, 2), Occupancy::SNAKE));
        assert!(e.is_occupied(Cell::new(2, 2), Occupancy::DOG_BLOCKERS));
        assert!(e.is_occupied(Cell::new(3, 3), Occupancy::DOG_BLOCKERS));
        assert!(!e.is_occupied(Cell::new(4, 4), Occupancy::DOG_BLOCKERS));
        assert!(e.is_occupied(Cell::new(4, 4), Occupancy::ALL));
        assert!(!e.is_occupied(Cell::new(5, 5), Occupancy::ALL));
    }

    #[test]
    fn test_expiry_never_leaves_zero_counter() {
        let mut e = Entities::new(Snake::new(Cell::new(0, 0)), Cell::new(1, 0));
        e.add_dog(Cell::new(5, 5), 1);
        e.add_dog(Cell::new(6, 6), 2);
        e.add_tuna(Cell::new(7, 7), 1);

        let gone = e.remove_expired_dogs();
        assert_eq!(gone.len(), 1);
        assert_eq!(gone[0].cell, Cell::new(5, 5));
        assert_eq!(e.dogs, vec![Dog { cell: Cell::new(6, 6), ttl_ticks: 1 }]);

        let gone = e.remove_expired_tuna();
        assert_eq!(gone.len(), 1);
        assert!(e.tuna.is_empty());
        assert!(e.dogs.iter().all(|d| d.ttl_ticks > 0));
    }

    #[test]
    fn test_take_tuna() {
        let mut e = Entities::new(Snake::new(Cell::new(0, 0)), Cell::new(1, 0));
        e.add_tuna(Cell::new(2, 2), 10);
        e.add_tuna(Cell::new(3, 3), 10);
        assert!(e.take_tuna_at(Cell::new(9, 9)).is_none());
        let can = e.take_tuna_at(Cell::new(3, 3)).unwrap();
        assert_eq!(can.cell, Cell::new(3, 3));
        assert_eq!(e.tuna.len(), 1);
    }

    #[test]
    fn test_bites_itself() {
        let straight = Snake::from_segments([Cell::new(3, 0), Cell::new(2, 0), Cell::new(1, 0)]);
        assert!(!straight.bites_itself());
        let looped = Snake::from_segments([
            Cell::new(1, 1),
            Cell::new(1, 2),
            Cell::new(2, 2),
            Cell::new(2, 1),
            Cell::new(1, 1),
        ]);
        assert!(looped.bites_itself());
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = GameSession::new(Tuning::default(), 5, 42);
        let b = GameSession::new(Tuning::default(), 5, 42);
        assert_eq!(a.entities.food, b.entities.food);
        assert_eq!(a.dog_schedule, b.dog_schedule);
        assert_eq!(a.tuna_schedule, b.tuna_schedule);
    }
}
