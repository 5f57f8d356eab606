//! # cleaning-robot
//!
//! A deterministic simulator for a battery-powered cleaning robot on a grid room.
//!
//! A [`CleaningInterpreter`] applies a list of [`Command`]s to a [`CleaningRobot`],
//! charging each one against the battery and tracking visited and cleaned cells.
//! When a move runs into a wall or the room edge, the interpreter replays the
//! [`BackoffPlan`] until a recovery sequence works, or reports the robot as stuck.
//!
//! The [`io`] module reads the JSON input document and writes the final state.

pub mod backoff;
pub mod error;
pub mod interpreter;
pub mod io;
pub mod motion;
pub mod robot;
pub mod room;

pub use backoff::*;
pub use error::*;
pub use interpreter::*;
pub use io::*;
pub use motion::*;
pub use robot::*;
pub use room::*;
