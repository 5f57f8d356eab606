//! Robot state: heading, command set and the visit/clean history.

use crate::error::CleanerError;
use crate::room::Position;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The compass direction the robot faces.
///
/// North points towards row 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "W")]
    West,
}

impl Heading {
    /// Every heading, clockwise from north.
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// The one-letter wire code.
    pub fn code(self) -> &'static str {
        match self {
            Heading::North => "N",
            Heading::East => "E",
            Heading::South => "S",
            Heading::West => "W",
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Heading {
    type Err = CleanerError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "N" => Ok(Heading::North),
            "E" => Ok(Heading::East),
            "S" => Ok(Heading::South),
            "W" => Ok(Heading::West),
            _ => Err(CleanerError::UnknownHeading { code: code.into() }),
        }
    }
}

/// Instructions the robot understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Rotate 90 degrees counter-clockwise (`TL`).
    TurnLeft,
    /// Rotate 90 degrees clockwise (`TR`).
    TurnRight,
    /// Move one cell forward (`A`).
    Advance,
    /// Move one cell backward without turning (`B`).
    Back,
    /// Clean the current cell (`C`).
    Clean,
}

impl Command {
    /// The wire code, as written in the input command list.
    pub fn code(self) -> &'static str {
        match self {
            Command::TurnLeft => "TL",
            Command::TurnRight => "TR",
            Command::Advance => "A",
            Command::Back => "B",
            Command::Clean => "C",
        }
    }

    /// Whether the command changes the robot's cell.
    pub fn is_motion(self) -> bool {
        matches!(self, Command::Advance | Command::Back)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Battery cost of each command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandCosts {
    pub turn_left: i64,
    pub turn_right: i64,
    pub advance: i64,
    pub back: i64,
    pub clean: i64,
}

impl Default for CommandCosts {
    fn default() -> Self {
        Self {
            turn_left: 1,
            turn_right: 1,
            advance: 2,
            back: 3,
            clean: 5,
        }
    }
}

impl CommandCosts {
    /// Cost of `command`.
    pub fn of(&self, command: Command) -> i64 {
        match command {
            Command::TurnLeft => self.turn_left,
            Command::TurnRight => self.turn_right,
            Command::Advance => self.advance,
            Command::Back => self.back,
            Command::Clean => self.clean,
        }
    }
}

/// Returned by [`Command::from_str`] for codes outside `TL, TR, A, B, C`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown command code {0:?}")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "TL" => Ok(Command::TurnLeft),
            "TR" => Ok(Command::TurnRight),
            "A" => Ok(Command::Advance),
            "B" => Ok(Command::Back),
            "C" => Ok(Command::Clean),
            _ => Err(UnknownCommand(code.into())),
        }
    }
}

/// An insertion-ordered set of positions, iterated most-recent-first.
///
/// Re-inserting a known position is a no-op: it keeps its original rank.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    order: Vec<Position>,
    seen: HashSet<Position>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `pos`. Returns `false` when it was already present.
    pub fn record(&mut self, pos: Position) -> bool {
        if !self.seen.insert(pos) {
            return false;
        }
        self.order.push(pos);
        true
    }

    /// Whether `pos` has been recorded.
    pub fn contains(&self, pos: Position) -> bool {
        self.seen.contains(&pos)
    }

    /// Number of distinct positions recorded.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Positions, most recently recorded first.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.order.iter().rev().copied()
    }

    /// Collects [`iter`](Self::iter) into a vector.
    pub fn to_vec(&self) -> Vec<Position> {
        self.iter().collect()
    }
}

/// The mutable state of the cleaning robot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CleaningRobot {
    /// Current cell.
    pub position: Position,

    /// Current facing.
    pub heading: Heading,

    /// Remaining charge. Back-off manoeuvres may push this below zero.
    pub battery: i64,

    /// Cells the robot has moved away from.
    pub visited: History,

    /// Cells the robot has cleaned.
    pub cleaned: History,
}

impl CleaningRobot {
    /// Creates a robot at `position` with empty histories.
    pub fn new(position: Position, heading: Heading, battery: i64) -> Self {
        Self {
            position,
            heading,
            battery,
            visited: History::new(),
            cleaned: History::new(),
        }
    }

    /// Records the current cell as visited.
    pub fn mark_visited(&mut self) {
        self.visited.record(self.position);
    }

    /// Records the current cell as cleaned.
    pub fn mark_cleaned(&mut self) {
        self.cleaned.record(self.position);
    }
}
