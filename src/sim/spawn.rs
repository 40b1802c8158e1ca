//! Spawn placement and scheduling
//!
//! Every sampler takes the RNG explicitly so sessions stay reproducible from
//! their seed and tests can inject their own source.

use rand::Rng;

use super::grid::{Cell, Grid};
use super::state::{Entities, Occupancy, Snake};
use crate::tuning::Tuning;

/// Pick a cell for a new bird that the cat does not cover.
///
/// Rejection-samples up to `attempts` times, then scans the grid in row-major
/// order. Returns `None` only when the cat fills every cell.
pub fn place_food<R: Rng + ?Sized>(
    grid: &Grid,
    snake: &Snake,
    attempts: u32,
    rng: &mut R,
) -> Option<Cell> {
    if snake.len() >= grid.cell_count() {
        return None;
    }
    for _ in 0..attempts {
        let cell = grid.random_cell(rng);
        if !snake.contains(cell) {
            return Some(cell);
        }
    }
    log::debug!("Food sampling exhausted, scanning grid");
    grid.cells().find(|&c| !snake.contains(c))
}

/// Find a dog cell near the bird, falling back to anywhere on the board.
///
/// Candidates must be free of cat, bird and other dogs, and keep at least
/// `dog_min_head_distance` (Chebyshev) from the cat's head.
pub fn place_dog<R: Rng + ?Sized>(
    grid: &Grid,
    entities: &Entities,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<Cell> {
    let head = entities.head();
    let food = entities.food;
    let acceptable = |cell: Cell| {
        grid.contains(cell)
            && !entities.is_occupied(cell, Occupancy::DOG_BLOCKERS)
            && cell.chebyshev(head) >= tuning.dog_min_head_distance
    };

    let spread = tuning.dog_spread;
    if spread > 0.0 {
        for _ in 0..tuning.dog_near_attempts {
            let dx = rng.random_range(-spread..spread);
            let dy = rng.random_range(-spread..spread);
            let cell = Cell::new(
                (f64::from(food.x) + dx).floor() as i32,
                (f64::from(food.y) + dy).floor() as i32,
            );
            if acceptable(cell) {
                return Some(cell);
            }
        }
    }

    for _ in 0..tuning.dog_fallback_attempts {
        let cell = grid.random_cell(rng);
        if acceptable(cell) {
            return Some(cell);
        }
    }

    None
}

/// Find a free cell for a tuna can (not on cat, bird, dog or another can)
pub fn place_tuna<R: Rng + ?Sized>(
    grid: &Grid,
    entities: &Entities,
    attempts: u32,
    rng: &mut R,
) -> Option<Cell> {
    (0..attempts)
        .map(|_| grid.random_cell(rng))
        .find(|&cell| !entities.is_occupied(cell, Occupancy::ALL))
}

/// Counts birds eaten until the next dog is due
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DogSchedule {
    pub eaten: u32,
    pub threshold: u32,
}

impl DogSchedule {
    pub fn new<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Self {
        Self {
            eaten: 0,
            threshold: draw_dog_threshold(tuning, rng),
        }
    }

    /// Count one bird; returns true (and rearms) when a dog is due
    pub fn bird_eaten<R: Rng + ?Sized>(&mut self, tuning: &Tuning, rng: &mut R) -> bool {
        self.eaten += 1;
        if self.eaten >= self.threshold {
            self.eaten = 0;
            self.threshold = draw_dog_threshold(tuning, rng);
            true
        } else {
            false
        }
    }
}

fn draw_dog_threshold<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> u32 {
    rng.random_range(tuning.dog_threshold_min..=tuning.dog_threshold_max.max(tuning.dog_threshold_min))
}

/// Counts ticks until the next tuna can is due
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TunaSchedule {
    pub timer: u32,
    pub interval: u32,
}

impl TunaSchedule {
    pub fn new<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Self {
        Self {
            timer: 0,
            interval: draw_tuna_interval(tuning, rng),
        }
    }

    /// Advance one tick; returns true (and rearms) when a can is due
    pub fn tick<R: Rng + ?Sized>(&mut self, tuning: &Tuning, rng: &mut R) -> bool {
        self.timer += 1;
        if self.timer >= self.interval {
            self.timer = 0;
            self.interval = draw_tuna_interval(tuning, rng);
            true
        } else {
            false
        }
    }
}

fn draw_tuna_interval<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> u32 {
    let min = tuning.tuna_interval_min.max(1);
    let max = tuning.tuna_interval_max.max(min + 1);
    rng.random_range(min..max)
}
