//! The immutable room map the robot moves through.

use crate::error::{CleanerError, Result};
use glam::IVec2;

/// A grid cell address: `x` is the column, `y` is the row.
pub type Position = IVec2;

/// Cell marker for a wall or piece of furniture.
///
/// Shares its spelling with the CLEAN command code, but the two are never compared.
pub const OBSTACLE_MARKER: &str = "C";

/// Textual null some map producers write instead of a JSON `null`.
const NULL_MARKER: &str = "null";

/// A rectangular room made of string cell markers.
///
/// Rows are indexed by `y`, columns by `x`. The width is taken from the first row;
/// shorter rows are padded with missing cells, which count as obstacles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    rows: Vec<Vec<Option<String>>>,
    width: usize,
}

impl Room {
    /// Builds a room from rows of markers. `None` stands for a `null` cell.
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        let width = match rows.first() {
            None => return Err(CleanerError::invalid_map("the map has no rows")),
            Some(first) if first.is_empty() => {
                return Err(CleanerError::invalid_map("the first map row is empty"));
            }
            Some(first) => first.len(),
        };
        if rows.iter().any(|row| row.len() != width) {
            log::warn!("Room map is ragged; missing cells are treated as obstacles");
        }
        Ok(Self { rows, width })
    }

    /// Convenience constructor from plain string markers (no `null` cells).
    pub fn from_markers<R, S>(rows: R) -> Result<Self>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(|m| Some(m.into())).collect())
                .collect(),
        )
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Whether `pos` lies inside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height()
    }

    /// The marker at `pos`, or `None` when the cell is out of bounds, missing or `null`.
    pub fn marker(&self, pos: Position) -> Option<&str> {
        if !self.contains(pos) {
            return None;
        }
        self.rows
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
            .and_then(|cell| cell.as_deref())
    }

    /// Whether the robot may not enter `pos`. Cells outside the room are reported as obstacles too.
    pub fn is_obstacle(&self, pos: Position) -> bool {
        match self.marker(pos) {
            None => true,
            Some(marker) => marker == OBSTACLE_MARKER || marker == NULL_MARKER,
        }
    }

    /// Whether `pos` is inside the room and free.
    pub fn is_free(&self, pos: Position) -> bool {
        self.contains(pos) && !self.is_obstacle(pos)
    }
}
