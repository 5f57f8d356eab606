//! Recovery manoeuvres for a blocked ADVANCE or BACK.
//!
//! A [`BackoffPlan`] is an ordered list of fixed command sequences. When a move is
//! blocked, each sequence is replayed against the live robot until one completes.
//! Nothing is rolled back between attempts: turns and partial moves made by a
//! failed sequence stay applied, and the next sequence starts from there.
//!
//! Commands inside a sequence skip the battery precondition and always pay their
//! cost, so a long recovery can leave the battery negative.

use crate::motion::advance;
use crate::robot::{CleaningRobot, Command, CommandCosts};
use crate::room::Room;

/// Step right, move, face the original way again.
pub const SIDESTEP: &[Command] = &[Command::TurnRight, Command::Advance, Command::TurnLeft];

/// Step right and keep turning right. Tried twice in a row.
pub const SWING_RIGHT: &[Command] = &[Command::TurnRight, Command::Advance, Command::TurnRight];

/// Turn, back up, turn, move.
pub const REVERSE_AROUND: &[Command] = &[
    Command::TurnRight,
    Command::Back,
    Command::TurnRight,
    Command::Advance,
];

/// Turn around and move. The last resort before the robot is stuck.
pub const U_TURN: &[Command] = &[Command::TurnLeft, Command::TurnLeft, Command::Advance];

/// The canonical attempt order.
pub const CANONICAL_BACKOFF: [&[Command]; 5] =
    [SIDESTEP, SWING_RIGHT, SWING_RIGHT, REVERSE_AROUND, U_TURN];

/// Result of a recovery attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackoffOutcome {
    /// The sequence at this index (0-based) completed.
    Recovered { sequence: usize },
    /// Every sequence hit a wall or the room edge.
    Stuck { attempts: usize },
}

/// Ordered recovery sequences.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackoffPlan {
    sequences: Vec<Vec<Command>>,
}

impl Default for BackoffPlan {
    fn default() -> Self {
        Self::new(CANONICAL_BACKOFF.iter().map(|seq| seq.to_vec()).collect())
    }
}

impl BackoffPlan {
    /// Creates a plan that tries `sequences` in the given order.
    pub fn new(sequences: Vec<Vec<Command>>) -> Self {
        Self { sequences }
    }

    /// The sequences, in attempt order.
    pub fn sequences(&self) -> &[Vec<Command>] {
        &self.sequences
    }

    /// Replays the sequences in order until one completes.
    ///
    /// On [`BackoffOutcome::Stuck`] the robot keeps whatever the last attempt did to it.
    pub fn recover(
        &self,
        robot: &mut CleaningRobot,
        room: &Room,
        costs: &CommandCosts,
    ) -> BackoffOutcome {
        for (index, sequence) in self.sequences.iter().enumerate() {
            if run_sequence(sequence, robot, room, costs) {
                log::info!(
                    "Back-off sequence {} succeeded, robot at ({}, {}) facing {}",
                    index + 1,
                    robot.position.x,
                    robot.position.y,
                    robot.heading
                );
                return BackoffOutcome::Recovered { sequence: index };
            }
            log::debug!("Back-off sequence {} blocked", index + 1);
        }

        log::warn!(
            "All {} back-off sequences failed, robot stuck at ({}, {})",
            self.sequences.len(),
            robot.position.x,
            robot.position.y
        );
        BackoffOutcome::Stuck {
            attempts: self.sequences.len(),
        }
    }
}

/// Executes one sequence. Returns `false` at the first blocked step.
fn run_sequence(
    sequence: &[Command],
    robot: &mut CleaningRobot,
    room: &Room,
    costs: &CommandCosts,
) -> bool {
    for &command in sequence {
        match command {
            Command::TurnLeft => {
                robot.battery -= costs.of(command);
                robot.heading = robot.heading.turn_left();
            }
            Command::TurnRight => {
                robot.battery -= costs.of(command);
                robot.heading = robot.heading.turn_right();
            }
            // BACK moves forward here, unlike the top-level command.
            Command::Advance | Command::Back => {
                robot.battery -= costs.of(command);
                robot.mark_visited();
                let target = advance(robot.heading, robot.position);
                if !room.is_free(target) {
                    return false;
                }
                robot.position = target;
            }
            Command::Clean => {}
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::Heading;
    use glam::IVec2;

    #[test]
    fn test_canonical_order() {
        let plan = BackoffPlan::default();
        let seqs = plan.sequences();
        assert_eq!(seqs.len(), 5);
        assert_eq!(seqs[0], SIDESTEP);
        assert_eq!(seqs[1], seqs[2], "second sequence is attempted twice");
        assert_eq!(seqs[3], REVERSE_AROUND);
        assert_eq!(seqs[4], U_TURN);
    }

    #[test]
    fn test_failed_sequence_keeps_partial_mutation() {
        // Wall to the east: the turn is applied and paid for, the move is not.
        let room = Room::from_markers([["S", "S", "C"]]).unwrap();
        let mut robot = CleaningRobot::new(IVec2::new(1, 0), Heading::North, 10);

        assert!(!run_sequence(SIDESTEP, &mut robot, &room, &CommandCosts::default()));
        assert_eq!(robot.heading, Heading::East);
        assert_eq!(robot.position, IVec2::new(1, 0));
        assert_eq!(robot.battery, 7);
        assert!(robot.visited.contains(IVec2::new(1, 0)));
    }

    #[test]
    fn test_back_step_moves_forward() {
        let room = Room::from_markers([["S", "S", "S"]]).unwrap();
        let mut robot = CleaningRobot::new(IVec2::new(1, 0), Heading::East, 10);

        assert!(run_sequence(&[Command::Back], &mut robot, &room, &CommandCosts::default()));
        assert_eq!(robot.position, IVec2::new(2, 0));
        assert_eq!(robot.battery, 7);
    }

    #[test]
    fn test_clean_is_ignored() {
        let room = Room::from_markers([["S"]]).unwrap();
        let mut robot = CleaningRobot::new(IVec2::ZERO, Heading::East, 10);

        assert!(run_sequence(&[Command::Clean], &mut robot, &room, &CommandCosts::default()));
        assert_eq!(robot.battery, 10);
        assert!(robot.cleaned.is_empty());
    }

    #[test]
    fn test_recovery_may_drain_battery_below_zero() {
        let room = Room::from_markers([["S", "S"], ["S", "S"]]).unwrap();
        let mut robot = CleaningRobot::new(IVec2::ZERO, Heading::North, 1);

        let outcome = BackoffPlan::default().recover(&mut robot, &room, &CommandCosts::default());
        assert_eq!(outcome, BackoffOutcome::Recovered { sequence: 0 });
        assert_eq!(robot.position, IVec2::new(1, 0));
        assert_eq!(robot.battery, -3);
    }
}
