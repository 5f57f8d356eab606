//! Interpreter that drives a [`CleaningRobot`] through a command list.
//!
//! The entry point is [`CleaningInterpreter`]. Configure it with a [`CleaningConfig`],
//! then call [`CleaningInterpreter::run`] with the starting robot, the room and the
//! commands. Single commands can be applied with [`CleaningInterpreter::execute`].

use crate::backoff::{BackoffOutcome, BackoffPlan};
use crate::motion::{advance, retreat};
use crate::robot::{CleaningRobot, Command, CommandCosts};
use crate::room::Room;

/// Configuration for command interpretation.
#[derive(Clone, Debug, Default)]
pub struct CleaningConfig {
    /// Battery cost per command.
    pub costs: CommandCosts,
    /// Recovery sequences tried when a move is blocked.
    pub backoff: BackoffPlan,
}

/// What happened when a single command was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The command ran normally.
    Done,
    /// The move was blocked and the back-off sequence at this index took its place.
    Recovered { sequence: usize },
    /// Not enough charge; the robot was left untouched.
    InsufficientBattery,
    /// The move was blocked and no back-off sequence worked.
    Stuck,
}

impl StepOutcome {
    /// Whether the run must stop after this step.
    pub fn halts(self) -> bool {
        matches!(self, StepOutcome::InsufficientBattery | StepOutcome::Stuck)
    }
}

/// Why a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// A command needed more charge than was left, or the battery reached zero.
    OutOfBattery,
    /// Every back-off sequence failed.
    Stuck,
    /// All commands were applied.
    CommandsExhausted,
}

/// Final state of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub robot: CleaningRobot,
    pub status: RunStatus,
    /// Commands that completed, including ones replaced by a successful back-off.
    pub executed: usize,
}

/// Applies commands to a robot inside a room.
#[derive(Clone, Debug, Default)]
pub struct CleaningInterpreter {
    config: CleaningConfig,
}

impl CleaningInterpreter {
    /// Creates an interpreter with the given configuration.
    pub fn new(config: CleaningConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Runs `commands` in order until they run out, the battery does, or the robot is stuck.
    ///
    /// The battery is checked before every command: a run that starts (or drops) at zero
    /// or below stops without touching the robot further.
    pub fn run(&self, mut robot: CleaningRobot, room: &Room, commands: &[Command]) -> RunReport {
        let mut executed = 0;

        let status = loop {
            let Some(&command) = commands.get(executed) else {
                break RunStatus::CommandsExhausted;
            };
            if robot.battery <= 0 {
                log::warn!(
                    "Battery depleted ({}) with {} commands left",
                    robot.battery,
                    commands.len() - executed
                );
                break RunStatus::OutOfBattery;
            }

            match self.execute(&mut robot, room, command) {
                StepOutcome::InsufficientBattery => break RunStatus::OutOfBattery,
                StepOutcome::Stuck => break RunStatus::Stuck,
                StepOutcome::Done | StepOutcome::Recovered { .. } => executed += 1,
            }
        };

        log::info!(
            "Run finished ({:?}) after {} commands: robot at ({}, {}) facing {}, battery {}",
            status,
            executed,
            robot.position.x,
            robot.position.y,
            robot.heading,
            robot.battery
        );

        RunReport {
            robot,
            status,
            executed,
        }
    }

    /// Applies one command.
    ///
    /// Turns and CLEAN need charge strictly above zero once paid for; ADVANCE and BACK
    /// may use the last unit. A blocked move is paid for, marks the current cell as
    /// visited and hands over to the back-off plan.
    pub fn execute(&self, robot: &mut CleaningRobot, room: &Room, command: Command) -> StepOutcome {
        let cost = self.config.costs.of(command);
        let remaining = robot.battery - cost;
        let affordable = if command.is_motion() {
            remaining >= 0
        } else {
            remaining > 0
        };
        if !affordable {
            log::warn!(
                "Insufficient battery for {}: have {}, need {}",
                command,
                robot.battery,
                cost
            );
            return StepOutcome::InsufficientBattery;
        }

        log::debug!("Executing {} with battery {}", command, robot.battery);
        robot.battery = remaining;

        match command {
            Command::TurnLeft => robot.heading = robot.heading.turn_left(),
            Command::TurnRight => robot.heading = robot.heading.turn_right(),
            Command::Clean => robot.mark_cleaned(),
            Command::Advance | Command::Back => {
                robot.mark_visited();
                let target = if command == Command::Advance {
                    advance(robot.heading, robot.position)
                } else {
                    retreat(robot.heading, robot.position)
                };
                log::debug!(
                    "Candidate cell for {}: ({}, {})",
                    command,
                    target.x,
                    target.y
                );

                if room.is_free(target) {
                    robot.position = target;
                } else {
                    if room.contains(target) {
                        log::warn!("Obstacle at ({}, {}), backing off", target.x, target.y);
                    } else {
                        log::warn!("({}, {}) is outside the room, backing off", target.x, target.y);
                    }
                    let outcome = self.config.backoff.recover(robot, room, &self.config.costs);
                    return match outcome {
                        BackoffOutcome::Recovered { sequence } => {
                            StepOutcome::Recovered { sequence }
                        }
                        BackoffOutcome::Stuck { .. } => StepOutcome::Stuck,
                    };
                }
            }
        }

        StepOutcome::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::Heading;
    use glam::IVec2;

    fn open_room() -> Room {
        Room::from_markers([["S", "S", "S"], ["S", "S", "S"], ["S", "S", "S"]]).unwrap()
    }

    #[test]
    fn test_turn_needs_positive_remainder() {
        let interp = CleaningInterpreter::default();
        let mut robot = CleaningRobot::new(IVec2::ONE, Heading::North, 1);
        let before = robot.clone();

        assert_eq!(
            interp.execute(&mut robot, &open_room(), Command::TurnRight),
            StepOutcome::InsufficientBattery
        );
        assert_eq!(robot, before);

        robot.battery = 2;
        assert_eq!(
            interp.execute(&mut robot, &open_room(), Command::TurnLeft),
            StepOutcome::Done
        );
        assert_eq!(robot.battery, 1);
        assert_eq!(robot.heading, Heading::West);
    }

    #[test]
    fn test_advance_may_spend_last_unit() {
        let interp = CleaningInterpreter::default();
        let mut robot = CleaningRobot::new(IVec2::ONE, Heading::North, 2);

        assert_eq!(
            interp.execute(&mut robot, &open_room(), Command::Advance),
            StepOutcome::Done
        );
        assert_eq!(robot.battery, 0);
        assert_eq!(robot.position, IVec2::new(1, 0));
        assert_eq!(robot.visited.to_vec(), vec![IVec2::ONE]);
    }

    #[test]
    fn test_back_threshold() {
        let interp = CleaningInterpreter::default();
        let mut robot = CleaningRobot::new(IVec2::ONE, Heading::North, 2);
        assert_eq!(
            interp.execute(&mut robot, &open_room(), Command::Back),
            StepOutcome::InsufficientBattery
        );

        robot.battery = 3;
        assert_eq!(
            interp.execute(&mut robot, &open_room(), Command::Back),
            StepOutcome::Done
        );
        assert_eq!(robot.position, IVec2::new(1, 2));
        assert_eq!(robot.battery, 0);
    }

    #[test]
    fn test_clean_threshold() {
        let interp = CleaningInterpreter::default();
        let mut robot = CleaningRobot::new(IVec2::ONE, Heading::North, 5);
        assert_eq!(
            interp.execute(&mut robot, &open_room(), Command::Clean),
            StepOutcome::InsufficientBattery
        );
        assert!(robot.cleaned.is_empty());

        robot.battery = 6;
        assert_eq!(
            interp.execute(&mut robot, &open_room(), Command::Clean),
            StepOutcome::Done
        );
        assert_eq!(robot.battery, 1);
        assert_eq!(robot.cleaned.to_vec(), vec![IVec2::ONE]);
        assert!(robot.visited.is_empty());
    }

    #[test]
    fn test_custom_costs() {
        let config = CleaningConfig {
            costs: CommandCosts {
                clean: 1,
                ..Default::default()
            },
            ..Default::default()
        };
        let interp = CleaningInterpreter::new(config);
        let mut robot = CleaningRobot::new(IVec2::ONE, Heading::North, 2);

        assert_eq!(
            interp.execute(&mut robot, &open_room(), Command::Clean),
            StepOutcome::Done
        );
        assert_eq!(robot.battery, 1);
    }

    #[test]
    fn test_empty_backoff_plan_is_immediately_stuck() {
        let config = CleaningConfig {
            backoff: BackoffPlan::new(Vec::new()),
            ..Default::default()
        };
        let interp = CleaningInterpreter::new(config);
        let mut robot = CleaningRobot::new(IVec2::ZERO, Heading::North, 10);

        assert_eq!(
            interp.execute(&mut robot, &open_room(), Command::Advance),
            StepOutcome::Stuck
        );
        assert_eq!(robot.battery, 8);
        assert_eq!(robot.position, IVec2::ZERO);
    }
}
