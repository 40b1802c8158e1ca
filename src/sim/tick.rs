//! Fixed-step simulation tick
//!
//! Advances a session by exactly one discrete step. The caller owns the clock;
//! this module never looks at wall time.

use serde::{Deserialize, Serialize};

use super::grid::{Cell, Direction};
use super::spawn;
use super::state::{Dog, EndReason, GameSession, TunaCan};

/// Something that happened during a tick, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BirdEaten { cell: Cell },
    TunaEaten { cell: Cell },
    DogSpawned { cell: Cell },
    DogExpired { cell: Cell },
    TunaSpawned { cell: Cell },
    TunaExpired { cell: Cell },
    Died { reason: EndReason },
    BoardCleared,
}

/// Read-only copy of the board for renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub snake: Vec<Cell>,
    pub food: Cell,
    pub dogs: Vec<Dog>,
    pub tuna: Vec<TunaCan>,
    pub score: u64,
    pub direction: Direction,
    pub time_ticks: u64,
}

impl Snapshot {
    pub fn of(session: &GameSession) -> Self {
        let e = &session.entities;
        Self {
            snake: e.snake.segments().collect(),
            food: e.food,
            dogs: e.dogs.clone(),
            tuna: e.tuna.clone(),
            score: session.score,
            direction: session.direction,
            time_ticks: session.time_ticks,
        }
    }
}

/// Outcome of one `advance` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickResult {
    pub score_delta: u64,
    /// The session ended on this tick (or had already ended)
    pub terminal: bool,
    pub events: Vec<GameEvent>,
    pub snapshot: Snapshot,
}

impl TickResult {
    fn unchanged(session: &GameSession) -> Self {
        Self {
            score_delta: 0,
            terminal: session.is_over(),
            events: Vec::new(),
            snapshot: Snapshot::of(session),
        }
    }

    pub fn ate_bird(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::BirdEaten { .. }))
    }
}

/// Advance the session by one step
pub fn advance(session: &mut GameSession) -> TickResult {
    if session.direction == Direction::None || session.is_over() {
        return TickResult::unchanged(session);
    }

    session.time_ticks += 1;
    let mut events = Vec::new();

    // Move: new head in front, tail follows unless the bird is eaten
    let (dx, dy) = session.direction.delta();
    let head = session.grid.wrap(session.entities.head().offset(dx, dy));
    session.entities.grow_snake(head);
    let ate_bird = head == session.entities.food;
    if !ate_bird {
        session.entities.shrink_tail();
    }

    // Collisions are checked on the post-move body; walls wrap, never kill
    let death = if session.entities.snake.bites_itself() {
        Some(EndReason::SelfCollision)
    } else if session.entities.dog_at(head).is_some() {
        Some(EndReason::Dog)
    } else {
        None
    };
    if let Some(reason) = death {
        session.ended = Some(reason);
        events.push(GameEvent::Died { reason });
        log::info!(
            "Cat died ({:?}) at ({}, {}) after {} ticks, score {}",
            reason,
            head.x,
            head.y,
            session.time_ticks,
            session.score
        );
        return TickResult {
            score_delta: 0,
            terminal: true,
            events,
            snapshot: Snapshot::of(session),
        };
    }

    let mut score_delta = 0;

    if ate_bird {
        score_delta += session.tuning.bird_points;
        events.push(GameEvent::BirdEaten { cell: head });

        let food = spawn::place_food(
            &session.grid,
            &session.entities.snake,
            session.tuning.food_attempts,
            &mut session.rng,
        );
        match food {
            Some(cell) => session.entities.set_food(cell),
            None => {
                session.score += score_delta;
                session.ended = Some(EndReason::BoardFull);
                events.push(GameEvent::BoardCleared);
                log::info!("Board cleared with score {}", session.score);
                return TickResult {
                    score_delta,
                    terminal: true,
                    events,
                    snapshot: Snapshot::of(session),
                };
            }
        }

        if session.tuning.dogs_enabled
            && session
                .dog_schedule
                .bird_eaten(&session.tuning, &mut session.rng)
        {
            spawn_dog(session, &mut events);
        }
    }

    if let Some(can) = session.entities.take_tuna_at(head) {
        score_delta += session.tuning.tuna_points;
        events.push(GameEvent::TunaEaten { cell: can.cell });
    }

    if session.tuning.tuna_enabled
        && session
            .tuna_schedule
            .tick(&session.tuning, &mut session.rng)
    {
        spawn_tuna(session, &mut events);
    }

    for dog in session.entities.remove_expired_dogs() {
        events.push(GameEvent::DogExpired { cell: dog.cell });
    }
    for can in session.entities.remove_expired_tuna() {
        events.push(GameEvent::TunaExpired { cell: can.cell });
    }

    session.score += score_delta;

    TickResult {
        score_delta,
        terminal: false,
        events,
        snapshot: Snapshot::of(session),
    }
}

fn spawn_dog(session: &mut GameSession, events: &mut Vec<GameEvent>) {
    match spawn::place_dog(
        &session.grid,
        &session.entities,
        &session.tuning,
        &mut session.rng,
    ) {
        Some(cell) => {
            let lifetime = session
                .tuning
                .dog_lifetime_ticks(session.tick_interval_ms());
            session.entities.add_dog(cell, lifetime);
            events.push(GameEvent::DogSpawned { cell });
            log::debug!("Dog at ({}, {}) for {} ticks", cell.x, cell.y, lifetime);
        }
        None => log::debug!("No room for a dog this time"),
    }
}

fn spawn_tuna(session: &mut GameSession, events: &mut Vec<GameEvent>) {
    match spawn::place_tuna(
        &session.grid,
        &session.entities,
        session.tuning.tuna_attempts,
        &mut session.rng,
    ) {
        Some(cell) => {
            let lifetime = session
                .tuning
                .tuna_lifetime_ticks(session.speed, session.tick_interval_ms());
            session.entities.add_tuna(cell, lifetime);
            events.push(GameEvent::TunaSpawned { cell });
            log::debug!("Tuna at ({}, {}) for {} ticks", cell.x, cell.y, lifetime);
        }
        None => log::debug!("No room for a tuna can this time"),
    }
}
