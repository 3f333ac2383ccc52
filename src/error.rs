use thiserror::Error;

use crate::input::Direction;
use crate::snake::Position;

/// Rejected game configuration or layout.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must have positive dimensions, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },

    #[error("initial snake length must be at least 1")]
    ZeroLength,

    #[error("snake of length {length} does not fit on a grid {width} wide")]
    SnakeDoesNotFit { length: usize, width: u16 },

    #[error("no free cell left for food")]
    NoFreeCell,

    #[error("snake layout must contain at least one segment")]
    EmptySnake,

    #[error("segment ({}, {}) lies outside the grid", .0.x, .0.y)]
    SegmentOutOfBounds(Position),

    #[error("segment ({}, {}) appears more than once", .0.x, .0.y)]
    DuplicateSegment(Position),

    #[error("segment ({}, {}) is not next to the one before it", .0.x, .0.y)]
    DetachedSegment(Position),

    #[error("heading {0} points back into the neck")]
    DirectionIntoNeck(Direction),

    #[error("food ({}, {}) lies outside the grid", .0.x, .0.y)]
    FoodOutOfBounds(Position),

    #[error("food ({}, {}) overlaps the snake", .0.x, .0.y)]
    FoodOnSnake(Position),
}

/// A direction change refused by the reversal rule.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("cannot turn {requested:?} while moving {current:?}")]
pub struct TurnRejected {
    pub current: Direction,
    pub requested: Direction,
}

/// Unrecognized direction name.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("unknown direction `{0}`")]
pub struct ParseDirectionError(pub String);
