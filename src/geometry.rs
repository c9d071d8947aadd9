//! Grid geometry: map locations and compass directions.
//!
//! The y axis points north, so `Direction::North` adds one to `y`.

use std::fmt;

/// Compass direction on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    /// No displacement.
    Center,
}

/// The eight movement directions, in the fixed order N, NE, E, SE, S, SW, W, NW.
pub const DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

impl Direction {
    /// Returns the `(dx, dy)` offset of this direction.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
            Direction::Center => (0, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "NORTH",
            Direction::NorthEast => "NORTHEAST",
            Direction::East => "EAST",
            Direction::SouthEast => "SOUTHEAST",
            Direction::South => "SOUTH",
            Direction::SouthWest => "SOUTHWEST",
            Direction::West => "WEST",
            Direction::NorthWest => "NORTHWEST",
            Direction::Center => "CENTER",
        };
        f.write_str(name)
    }
}

/// A cell on the map.
///
/// Ordering is lexicographic on `(x, y)`; policies rely on it to break ties
/// deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    /// Creates a new location.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring location one step in `dir`.
    pub fn add(&self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        self.translate(dx, dy)
    }

    /// Returns the location offset by `(dx, dy)`, clamped at the `i32` range.
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Squared Euclidean distance to another location.
    pub fn distance_squared_to(&self, other: &Location) -> u32 {
        let dx = i64::from(other.x) - i64::from(self.x);
        let dy = i64::from(other.y) - i64::from(self.y);
        u32::try_from(dx * dx + dy * dy).unwrap_or(u32::MAX)
    }

    /// True if `other` is this cell or one of its eight neighbours.
    pub fn is_adjacent_to(&self, other: &Location) -> bool {
        self.distance_squared_to(other) <= 2
    }

    /// Returns the compass direction that best approximates the heading
    /// from `self` toward `target`.
    ///
    /// The plane is split into eight sectors; a heading within 22.5° of an
    /// axis maps to that axis (tan 67.5° ≈ 2.414), anything else to the
    /// diagonal. Returns [`Direction::Center`] when the locations coincide.
    pub fn direction_to(&self, target: &Location) -> Direction {
        let dx = i64::from(target.x) - i64::from(self.x);
        let dy = i64::from(target.y) - i64::from(self.y);
        let (ax, ay) = (dx.abs() * 1000, dy.abs() * 1000);

        if ax >= dy.abs() * 2414 {
            match dx.signum() {
                1 => Direction::East,
                -1 => Direction::West,
                _ => Direction::Center,
            }
        } else if ay >= dx.abs() * 2414 {
            if dy > 0 {
                Direction::North
            } else {
                Direction::South
            }
        } else if dy > 0 {
            if dx > 0 {
                Direction::NorthEast
            } else {
                Direction::NorthWest
            }
        } else if dx > 0 {
            Direction::SouthEast
        } else {
            Direction::SouthWest
        }
    }

    /// The 3×3 block of cells centred on this location, row by row.
    pub fn neighbourhood(&self) -> impl Iterator<Item = Location> + '_ {
        (-1..=1).flat_map(move |dx| (-1..=1).map(move |dy| self.translate(dx, dy)))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_moves_one_step() {
        let origin = Location::new(5, 5);
        assert_eq!(origin.add(Direction::North), Location::new(5, 6));
        assert_eq!(origin.add(Direction::SouthWest), Location::new(4, 4));
        assert_eq!(origin.add(Direction::Center), origin);
    }

    #[test]
    fn stepping_off_the_i32_range_saturates() {
        let corner = Location::new(i32::MAX, i32::MIN);
        assert_eq!(corner.add(Direction::NorthEast), Location::new(i32::MAX, i32::MIN + 1));
        assert_eq!(corner.translate(-1, -1), Location::new(i32::MAX - 1, i32::MIN));
    }

    #[test]
    fn direction_to_axes_and_diagonals() {
        let me = Location::new(0, 0);
        assert_eq!(me.direction_to(&Location::new(0, 4)), Direction::North);
        assert_eq!(me.direction_to(&Location::new(5, 0)), Direction::East);
        assert_eq!(me.direction_to(&Location::new(-3, -3)), Direction::SouthWest);
        assert_eq!(me.direction_to(&Location::new(2, 1)), Direction::NorthEast);
        assert_eq!(me.direction_to(&Location::new(5, 2)), Direction::East);
        assert_eq!(me.direction_to(&me), Direction::Center);
    }

    #[test]
    fn stepping_toward_always_gets_closer() {
        let target = Location::new(3, -7);
        let mut here = Location::new(-4, 6);
        for _ in 0..20 {
            if here == target {
                break;
            }
            let next = here.add(here.direction_to(&target));
            assert!(next.distance_squared_to(&target) < here.distance_squared_to(&target));
            here = next;
        }
        assert_eq!(here, target);
    }

    #[test]
    fn adjacency_includes_self_and_diagonals() {
        let me = Location::new(2, 2);
        assert!(me.is_adjacent_to(&me));
        assert!(me.is_adjacent_to(&Location::new(3, 3)));
        assert!(!me.is_adjacent_to(&Location::new(4, 2)));
    }

    #[test]
    fn neighbourhood_is_nine_cells() {
        let cells: Vec<_> = Location::new(1, 1).neighbourhood().collect();
        assert_eq!(cells.len(), 9);
        assert!(cells.contains(&Location::new(0, 0)));
        assert!(cells.contains(&Location::new(2, 2)));
    }

    #[test]
    fn location_order_is_lexicographic() {
        assert!(Location::new(0, 9) < Location::new(1, 0));
        assert!(Location::new(1, 0) < Location::new(1, 1));
    }
}
