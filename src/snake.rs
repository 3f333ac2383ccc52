use std::collections::{HashSet, VecDeque};

use serde::Serialize;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        debug_assert!(!bounds.is_empty());

        Self {
            x: self.x.rem_euclid(i32::from(bounds.width)),
            y: self.y.rem_euclid(i32::from(bounds.height)),
        }
    }

    /// Returns the neighbouring cell one step in `direction`, unbounded.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns the direction that moves `self` onto `other` in one step, if the
    /// cells are neighbours. With `wrap` the step may cross a grid edge.
    #[must_use]
    pub fn direction_to(self, other: Self, bounds: GridSize, wrap: bool) -> Option<Direction> {
        Direction::ALL.into_iter().find(|direction| {
            let next = self.stepped(*direction);
            let next = if wrap { next.wrapped(bounds) } else { next };
            next == other
        })
    }
}

/// Snake body as an immutable value; the front segment is the head.
///
/// A `Snake` always holds at least one segment.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        Self {
            body: VecDeque::from([start]),
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Returns `None` when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            body: VecDeque::from(segments),
        })
    }

    /// Returns the body after the head moves onto `head`.
    ///
    /// With `grow` the previous tail is kept, otherwise it is dropped so the
    /// length stays the same.
    #[must_use]
    pub fn advanced(&self, head: Position, grow: bool) -> Self {
        let mut body = VecDeque::with_capacity(self.body.len() + 1);
        body.push_back(head);

        let kept = if grow {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        body.extend(self.body.iter().take(kept).copied());

        Self { body }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns the last segment.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns the first segment found a second time, scanning head to tail.
    #[must_use]
    pub fn first_duplicate(&self) -> Option<Position> {
        let mut seen = HashSet::with_capacity(self.body.len());
        self.body.iter().copied().find(|segment| !seen.insert(*segment))
    }

    /// Returns true if any coordinate repeats within the body.
    #[must_use]
    pub fn has_overlap(&self) -> bool {
        self.first_duplicate().is_some()
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments, which a constructed snake never has.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the segment right behind the head, if any.
    #[must_use]
    pub fn neck(&self) -> Option<Position> {
        self.body.get(1).copied()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Position, Snake};

    #[test]
    fn position_wrapping_keeps_coordinates_inside_bounds() {
        let bounds = GridSize {
            width: 10,
            height: 8,
        };

        let wrapped_left = Position { x: -1, y: 3 }.wrapped(bounds);
        let wrapped_bottom = Position { x: 4, y: 8 }.wrapped(bounds);

        assert_eq!(wrapped_left, Position { x: 9, y: 3 });
        assert_eq!(wrapped_bottom, Position { x: 4, y: 0 });
    }

    #[test]
    fn bounds_check_covers_every_edge() {
        let bounds = GridSize {
            width: 5,
            height: 5,
        };

        assert!(Position::new(0, 0).is_within_bounds(bounds));
        assert!(Position::new(4, 4).is_within_bounds(bounds));
        assert!(!Position::new(5, 2).is_within_bounds(bounds));
        assert!(!Position::new(2, -1).is_within_bounds(bounds));
    }

    #[test]
    fn stepping_up_decreases_row() {
        let origin = Position::new(2, 2);

        assert_eq!(origin.stepped(Direction::Up), Position::new(2, 1));
        assert_eq!(origin.stepped(Direction::Down), Position::new(2, 3));
        assert_eq!(origin.stepped(Direction::Left), Position::new(1, 2));
        assert_eq!(origin.stepped(Direction::Right), Position::new(3, 2));
    }

    #[test]
    fn neighbour_direction_crosses_edges_only_when_wrapping() {
        let bounds = GridSize::new(4, 3);

        assert_eq!(
            Position::new(1, 1).direction_to(Position::new(1, 0), bounds, false),
            Some(Direction::Up)
        );
        assert_eq!(
            Position::new(3, 1).direction_to(Position::new(0, 1), bounds, false),
            None
        );
        assert_eq!(
            Position::new(3, 1).direction_to(Position::new(0, 1), bounds, true),
            Some(Direction::Right)
        );
        assert_eq!(
            Position::new(0, 0).direction_to(Position::new(1, 1), bounds, true),
            None
        );
    }

    #[test]
    fn advancing_without_growth_drops_the_tail() {
        let snake =
            Snake::from_segments(vec![Position::new(2, 2), Position::new(1, 2)]).unwrap();

        let moved = snake.advanced(Position::new(3, 2), false);

        assert_eq!(moved.len(), 2);
        assert_eq!(moved.head(), Position::new(3, 2));
        assert_eq!(moved.tail(), Position::new(2, 2));
        assert_eq!(moved.neck(), Some(Position::new(2, 2)));
        assert_eq!(snake.head(), Position::new(2, 2), "input is left untouched");
    }

    #[test]
    fn advancing_with_growth_keeps_previous_tail() {
        let snake = Snake::new(Position::new(5, 5));

        let grown = snake.advanced(Position::new(6, 5), true);

        assert_eq!(grown.len(), 2);
        assert_eq!(grown.tail(), Position::new(5, 5));
    }

    #[test]
    fn empty_segment_list_is_rejected() {
        assert!(Snake::from_segments(Vec::new()).is_none());
    }

    #[test]
    fn duplicate_detection_reports_repeated_cell() {
        let ring = Snake::from_segments(vec![
            Position::new(1, 2),
            Position::new(2, 2),
            Position::new(2, 3),
            Position::new(1, 3),
            Position::new(1, 2),
        ])
        .unwrap();
        let line = Snake::from_segments(vec![Position::new(0, 0), Position::new(1, 0)]).unwrap();

        assert_eq!(ring.first_duplicate(), Some(Position::new(1, 2)));
        assert!(!line.has_overlap());
    }
}
