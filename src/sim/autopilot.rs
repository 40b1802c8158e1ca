//! Idle/demo mode steering
//!
//! A greedy pilot: head for the bird along the shortest wrapped path, never
//! step onto a cell that would end the run this tick.

use super::grid::{Cell, Direction, Grid};
use super::state::GameSession;

/// Pick the heading for the next tick
pub fn choose_direction(session: &GameSession) -> Direction {
    let entities = &session.entities;
    let head = entities.head();
    let target = entities.tuna.first().map(|t| t.cell).unwrap_or(entities.food);

    let mut best: Option<(i32, Direction)> = None;
    for dir in Direction::MOVES {
        if dir.is_reverse_of(session.direction) {
            continue;
        }
        let (dx, dy) = dir.delta();
        let next = session.grid.wrap(head.offset(dx, dy));
        if is_lethal(session, next) {
            continue;
        }
        let dist = torus_distance(&session.grid, next, target);
        if best.is_none_or(|(d, _)| dist < d) {
            best = Some((dist, dir));
        }
    }

    match best {
        Some((_, dir)) => dir,
        // Boxed in: keep going and accept fate
        None if session.direction == Direction::None => Direction::Right,
        None => session.direction,
    }
}

fn is_lethal(session: &GameSession, next: Cell) -> bool {
    let entities = &session.entities;
    if entities.dog_at(next).is_some() {
        return true;
    }
    let eating = next == entities.food;
    let len = entities.snake.len();
    // The tail cell is vacated this tick unless the cat grows
    entities
        .snake
        .segments()
        .enumerate()
        .any(|(i, c)| c == next && (eating || i + 1 < len))
}

/// Manhattan distance on the torus
fn torus_distance(grid: &Grid, a: Cell, b: Cell) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    dx.min(grid.width - dx) + dy.min(grid.height - dy)
}
