use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::config::{GameConfig, GridSize};
use crate::error::{ConfigError, TurnRejected};
use crate::food::spawn_position;
use crate::input::{Direction, GameInput, direction_change_is_valid};
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
///
/// Only `Playing` counts as running. `GameOver` is terminal: a new lifecycle
/// starts from a fresh [`GameState::new_game`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Ready,
    Playing,
    Paused,
    GameOver,
}

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// The game was not running; nothing changed.
    NoOp,
    Moved,
    Ate,
    /// Wall or self collision; the game is over.
    Dead,
}

/// Explicit board layout for [`GameState::with_layout`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LayoutSpec {
    pub grid: GridSize,
    /// Body segments, head first.
    pub snake: Vec<Position>,
    pub direction: Direction,
    /// Food cell, or `None` to place it with the seeded generator.
    pub food: Option<Position>,
    pub wrap: bool,
    pub seed: Option<u64>,
}

impl LayoutSpec {
    #[must_use]
    pub fn new(grid: GridSize, snake: Vec<Position>, direction: Direction) -> Self {
        Self {
            grid,
            snake,
            direction,
            food: None,
            wrap: false,
            seed: None,
        }
    }

    #[must_use]
    pub fn with_food(mut self, food: Position) -> Self {
        self.food = Some(food);
        self
    }

    #[must_use]
    pub fn wrapping(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    #[must_use]
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Complete immutable game state for one session.
///
/// Every operation borrows the state and returns a new value. The random
/// generator travels with the state, so two sessions started from the same
/// seed and fed the same inputs stay identical across every food respawn.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameState {
    grid: GridSize,
    snake: Snake,
    direction: Direction,
    /// Direction of the move that put the head on its current cell.
    heading: Direction,
    food: Option<Position>,
    score: u32,
    status: GameStatus,
    wrap: bool,
    tick_count: u64,
    rng: ChaCha8Rng,
}

impl GameState {
    /// Builds a fresh starting state: a horizontal snake whose head sits on the
    /// center cell, heading right, with food on a random free cell.
    ///
    /// The game starts in [`GameStatus::Ready`]; call [`GameState::start`] to
    /// begin play.
    pub fn new_game(config: &GameConfig) -> Result<Self, ConfigError> {
        let grid = config.grid();
        if grid.is_empty() {
            return Err(ConfigError::EmptyGrid {
                width: grid.width,
                height: grid.height,
            });
        }
        if config.init_length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        if config.init_length > usize::from(grid.width / 2) + 1 {
            return Err(ConfigError::SnakeDoesNotFit {
                length: config.init_length,
                width: grid.width,
            });
        }

        let center = Position::new(i32::from(grid.width / 2), i32::from(grid.height / 2));
        let segments = (0..=center.x)
            .take(config.init_length)
            .map(|offset| Position::new(center.x - offset, center.y))
            .collect();
        let snake = Snake::from_segments(segments).ok_or(ConfigError::ZeroLength)?;

        let mut rng = seeded_rng(config.seed);
        let food = spawn_position(&mut rng, grid, &snake).ok_or(ConfigError::NoFreeCell)?;

        log::debug!(
            "new game on {}x{} grid: length {}, wrap {}, seed {:?}, food at ({}, {})",
            grid.width,
            grid.height,
            snake.len(),
            config.wrap,
            config.seed,
            food.x,
            food.y,
        );

        Ok(Self {
            grid,
            snake,
            direction: Direction::Right,
            heading: Direction::Right,
            food: Some(food),
            score: 0,
            status: GameStatus::Ready,
            wrap: config.wrap,
            tick_count: 0,
            rng,
        })
    }

    /// Builds a validated state from an explicit layout, in [`GameStatus::Ready`].
    pub fn with_layout(layout: LayoutSpec) -> Result<Self, ConfigError> {
        let LayoutSpec {
            grid,
            snake,
            direction,
            food,
            wrap,
            seed,
        } = layout;

        if grid.is_empty() {
            return Err(ConfigError::EmptyGrid {
                width: grid.width,
                height: grid.height,
            });
        }
        if let Some(outside) = snake.iter().find(|segment| !segment.is_within_bounds(grid)) {
            return Err(ConfigError::SegmentOutOfBounds(*outside));
        }

        let snake = Snake::from_segments(snake).ok_or(ConfigError::EmptySnake)?;
        if let Some(duplicate) = snake.first_duplicate() {
            return Err(ConfigError::DuplicateSegment(duplicate));
        }

        let segments: Vec<Position> = snake.segments().copied().collect();
        if let Some(pair) = segments
            .windows(2)
            .find(|pair| pair[0].direction_to(pair[1], grid, wrap).is_none())
        {
            return Err(ConfigError::DetachedSegment(pair[1]));
        }

        let heading = match snake.neck() {
            Some(neck) => neck
                .direction_to(snake.head(), grid, wrap)
                .ok_or(ConfigError::DetachedSegment(neck))?,
            None => direction,
        };
        if direction == heading.opposite() {
            return Err(ConfigError::DirectionIntoNeck(direction));
        }

        let mut rng = seeded_rng(seed);
        let food = match food {
            Some(cell) if !cell.is_within_bounds(grid) => {
                return Err(ConfigError::FoodOutOfBounds(cell));
            }
            Some(cell) if snake.occupies(cell) => return Err(ConfigError::FoodOnSnake(cell)),
            Some(cell) => Some(cell),
            None => spawn_position(&mut rng, grid, &snake),
        };

        Ok(Self {
            grid,
            snake,
            direction,
            heading,
            food,
            score: 0,
            status: GameStatus::Ready,
            wrap,
            tick_count: 0,
            rng,
        })
    }

    /// Returns a copy heading in `direction`, or an unchanged copy when the
    /// request would reverse the snake onto its own neck.
    #[must_use]
    pub fn change_direction(&self, direction: Direction) -> Self {
        self.try_change_direction(direction).unwrap_or_else(|_| self.clone())
    }

    /// Like [`GameState::change_direction`] but reports a refused reversal.
    ///
    /// A turn is refused when it reverses either the queued direction or the
    /// direction the head last moved in, so several turns between two ticks
    /// can never fold the head back onto the neck.
    pub fn try_change_direction(&self, direction: Direction) -> Result<Self, TurnRejected> {
        self.check_turn(direction)?;

        Ok(Self {
            direction,
            ..self.clone()
        })
    }

    fn check_turn(&self, requested: Direction) -> Result<(), TurnRejected> {
        for current in [self.direction, self.heading] {
            if !direction_change_is_valid(current, requested) {
                log::trace!("ignoring reversal from {current} to {requested}");
                return Err(TurnRejected { current, requested });
            }
        }
        Ok(())
    }

    /// Applies a direction given by name; unknown names leave the state as is.
    #[must_use]
    pub fn change_direction_named(&self, name: &str) -> Self {
        match name.parse::<Direction>() {
            Ok(direction) => self.change_direction(direction),
            Err(error) => {
                log::trace!("{error}");
                self.clone()
            }
        }
    }

    /// Advances the game by one tick.
    ///
    /// `input` overrides the stored direction for this tick, subject to the
    /// same reversal rule as [`GameState::change_direction`].
    #[must_use]
    pub fn step(&self, input: Option<Direction>) -> (Self, Event) {
        if !self.is_running() {
            return (self.clone(), Event::NoOp);
        }

        let direction = input
            .filter(|requested| self.check_turn(*requested).is_ok())
            .unwrap_or(self.direction);

        let mut next = self.clone();
        next.tick_count += 1;

        let candidate = self.snake.head().stepped(direction);
        let head = if self.wrap {
            candidate.wrapped(self.grid)
        } else if candidate.is_within_bounds(self.grid) {
            candidate
        } else {
            log::info!(
                "hit the wall at ({}, {}) after {} ticks, score {}",
                candidate.x,
                candidate.y,
                next.tick_count,
                next.score,
            );
            next.status = GameStatus::GameOver;
            return (next, Event::Dead);
        };

        next.direction = direction;
        next.heading = direction;

        let ate = self.food == Some(head);
        next.snake = self.snake.advanced(head, ate);

        if next.snake.has_overlap() {
            log::info!(
                "ran into itself at ({}, {}) after {} ticks, score {}",
                head.x,
                head.y,
                next.tick_count,
                next.score,
            );
            next.status = GameStatus::GameOver;
            return (next, Event::Dead);
        }

        if ate {
            next.score += 1;
            next.food = spawn_position(&mut next.rng, next.grid, &next.snake);
            match next.food {
                Some(food) => log::debug!(
                    "ate at ({}, {}), score {}, next food at ({}, {})",
                    head.x,
                    head.y,
                    next.score,
                    food.x,
                    food.y,
                ),
                None => log::debug!("ate at ({}, {}), board is full", head.x, head.y),
            }
            return (next, Event::Ate);
        }

        log::trace!("moved {} to ({}, {})", direction, head.x, head.y);
        (next, Event::Moved)
    }

    /// Begins or resumes play. Has no effect once the game is over.
    #[must_use]
    pub fn start(&self) -> Self {
        match self.status {
            GameStatus::Ready | GameStatus::Paused => Self {
                status: GameStatus::Playing,
                ..self.clone()
            },
            GameStatus::Playing | GameStatus::GameOver => self.clone(),
        }
    }

    /// Suspends a running game.
    #[must_use]
    pub fn pause(&self) -> Self {
        match self.status {
            GameStatus::Playing => Self {
                status: GameStatus::Paused,
                ..self.clone()
            },
            _ => self.clone(),
        }
    }

    /// Applies one controller input event.
    #[must_use]
    pub fn apply_input(&self, input: GameInput) -> Self {
        match input {
            GameInput::Direction(direction) if self.is_running() => {
                self.change_direction(direction)
            }
            GameInput::Direction(_) => self.clone(),
            GameInput::Pause => match self.status {
                GameStatus::Playing => self.pause(),
                GameStatus::Paused => self.start(),
                _ => self.clone(),
            },
            GameInput::Confirm if self.status == GameStatus::Ready => self.start(),
            GameInput::Confirm => self.clone(),
        }
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True when the next tick will advance the game.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Playing
    }

    #[must_use]
    pub fn wrap(&self) -> bool {
        self.wrap
    }

    /// Number of ticks that advanced the game.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

/// Creates a new game; see [`GameState::new_game`].
pub fn new_game(
    grid: GridSize,
    init_length: usize,
    wrap: bool,
    seed: Option<u64>,
) -> Result<GameState, ConfigError> {
    GameState::new_game(&GameConfig {
        width: grid.width,
        height: grid.height,
        init_length,
        wrap,
        seed,
    })
}

/// See [`GameState::change_direction`].
#[must_use]
pub fn change_direction(state: &GameState, direction: Direction) -> GameState {
    state.change_direction(direction)
}

/// See [`GameState::step`].
#[must_use]
pub fn step_game(state: &GameState, input: Option<Direction>) -> (GameState, Event) {
    state.step(input)
}

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
