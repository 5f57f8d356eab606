//! Grid geometry: where a step lands and how the heading rotates.
//!
//! All functions here are total. Bounds and obstacle checks belong to the caller.

use crate::robot::Heading;
use crate::room::Position;
use glam::IVec2;

impl Heading {
    /// Unit offset of one forward step. North decreases the row index.
    pub fn forward(self) -> IVec2 {
        match self {
            Heading::North => IVec2::NEG_Y,
            Heading::East => IVec2::X,
            Heading::South => IVec2::Y,
            Heading::West => IVec2::NEG_X,
        }
    }

    /// Quarter turn counter-clockwise: N -> W -> S -> E -> N.
    pub fn turn_left(self) -> Heading {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    /// Quarter turn clockwise: N -> E -> S -> W -> N.
    pub fn turn_right(self) -> Heading {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }
}

/// The cell one step ahead of `position`.
pub fn advance(heading: Heading, position: Position) -> Position {
    position + heading.forward()
}

/// The cell one step behind `position`; the inverse of [`advance`].
pub fn retreat(heading: Heading, position: Position) -> Position {
    position - heading.forward()
}

/// Free-function form of [`Heading::turn_left`].
pub fn turn_left(heading: Heading) -> Heading {
    heading.turn_left()
}

/// Free-function form of [`Heading::turn_right`].
pub fn turn_right(heading: Heading) -> Heading {
    heading.turn_right()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_offsets() {
        let p = IVec2::new(5, 5);
        assert_eq!(advance(Heading::East, p), IVec2::new(6, 5));
        assert_eq!(advance(Heading::West, p), IVec2::new(4, 5));
        assert_eq!(advance(Heading::North, p), IVec2::new(5, 4));
        assert_eq!(advance(Heading::South, p), IVec2::new(5, 6));
    }

    #[test]
    fn test_retreat_offsets() {
        let p = IVec2::new(5, 5);
        assert_eq!(retreat(Heading::East, p), IVec2::new(4, 5));
        assert_eq!(retreat(Heading::West, p), IVec2::new(6, 5));
        assert_eq!(retreat(Heading::North, p), IVec2::new(5, 6));
        assert_eq!(retreat(Heading::South, p), IVec2::new(5, 4));
    }

    #[test]
    fn test_retreat_undoes_advance() {
        for heading in Heading::ALL {
            for p in [IVec2::ZERO, IVec2::new(-3, 7), IVec2::new(2, -1)] {
                assert_eq!(retreat(heading, advance(heading, p)), p);
                assert_eq!(advance(heading, retreat(heading, p)), p);
            }
        }
    }

    #[test]
    fn test_turns_are_inverse() {
        for heading in Heading::ALL {
            assert_eq!(turn_left(turn_right(heading)), heading);
            assert_eq!(turn_right(turn_left(heading)), heading);
        }
    }

    #[test]
    fn test_four_turns_return_to_start() {
        for heading in Heading::ALL {
            let mut h = heading;
            for _ in 0..4 {
                h = turn_right(h);
            }
            assert_eq!(h, heading);
        }
        assert_eq!(turn_left(Heading::North), Heading::West);
        assert_eq!(turn_right(Heading::North), Heading::East);
    }
}
