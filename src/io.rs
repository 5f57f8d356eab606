//! JSON input and output records, and the file boundary around a run.

use crate::error::{CleanerError, Result};
use crate::interpreter::{CleaningInterpreter, RunReport};
use crate::robot::{CleaningRobot, Command, Heading};
use crate::room::{Position, Room};
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Raw input document.
#[derive(Clone, Debug, Deserialize)]
pub struct RunInput {
    pub map: Vec<Vec<Option<String>>>,
    pub commands: Vec<String>,
    pub battery: i64,
    pub start: StartRecord,
}

/// Starting pose as written in the input.
#[derive(Clone, Debug, Deserialize)]
pub struct StartRecord {
    #[serde(rename = "X")]
    pub x: i32,
    #[serde(rename = "Y")]
    pub y: i32,
    pub facing: String,
}

/// Everything a run needs, validated.
#[derive(Clone, Debug)]
pub struct RunSetup {
    pub room: Room,
    pub robot: CleaningRobot,
    pub commands: Vec<Command>,
}

impl RunInput {
    /// Parses the raw document without validating it.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Validates the document and builds the room, robot and command list.
    ///
    /// Unrecognised command codes are dropped with a warning.
    pub fn into_setup(self) -> Result<RunSetup> {
        let room = Room::new(self.map)?;
        let heading: Heading = self.start.facing.parse()?;
        let start = IVec2::new(self.start.x, self.start.y);

        if !room.contains(start) {
            return Err(CleanerError::StartOutOfBounds {
                x: start.x,
                y: start.y,
                width: room.width(),
                height: room.height(),
            });
        }
        if room.is_obstacle(start) {
            log::warn!("Robot starts on an obstacle cell at ({}, {})", start.x, start.y);
        }

        let commands = self
            .commands
            .iter()
            .filter_map(|code| match code.parse::<Command>() {
                Ok(cmd) => Some(cmd),
                Err(err) => {
                    log::warn!("Skipping {err}");
                    None
                }
            })
            .collect();

        Ok(RunSetup {
            room,
            robot: CleaningRobot::new(start, heading, self.battery),
            commands,
        })
    }
}

/// A cell address in the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    #[serde(rename = "X")]
    pub x: i32,
    #[serde(rename = "Y")]
    pub y: i32,
}

impl From<Position> for CellRecord {
    fn from(pos: Position) -> Self {
        Self { x: pos.x, y: pos.y }
    }
}

/// Final pose in the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalRecord {
    #[serde(rename = "X")]
    pub x: i32,
    #[serde(rename = "Y")]
    pub y: i32,
    pub facing: Heading,
}

/// Output document, written once per run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutput {
    pub visited: Vec<CellRecord>,
    pub cleaned: Vec<CellRecord>,
    #[serde(rename = "final")]
    pub final_pose: FinalRecord,
    pub battery: i64,
}

impl From<&CleaningRobot> for RunOutput {
    fn from(robot: &CleaningRobot) -> Self {
        Self {
            visited: robot.visited.iter().map(CellRecord::from).collect(),
            cleaned: robot.cleaned.iter().map(CellRecord::from).collect(),
            final_pose: FinalRecord {
                x: robot.position.x,
                y: robot.position.y,
                facing: robot.heading,
            },
            battery: robot.battery,
        }
    }
}

/// Reads and validates an input file.
pub fn load_input(path: &Path) -> Result<RunSetup> {
    let text = fs::read_to_string(path).map_err(|source| CleanerError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    let input = RunInput::from_json(&text).map_err(|source| CleanerError::ParseInput {
        path: path.to_path_buf(),
        source,
    })?;
    input.into_setup()
}

/// Writes `output` as JSON to `path`, replacing any existing file.
pub fn write_output(path: &Path, output: &RunOutput) -> Result<()> {
    let json = serde_json::to_string(output).map_err(CleanerError::EncodeOutput)?;
    fs::write(path, json).map_err(|source| CleanerError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads `input`, runs it with `interpreter`, and writes the final state to `output`.
///
/// Every run that starts produces an output file, whatever its [`RunStatus`](crate::RunStatus).
pub fn run_files(
    interpreter: &CleaningInterpreter,
    input: &Path,
    output: &Path,
) -> Result<RunReport> {
    let setup = load_input(input)?;
    log::info!(
        "Loaded {}x{} room, {} commands, battery {}",
        setup.room.width(),
        setup.room.height(),
        setup.commands.len(),
        setup.robot.battery
    );

    let report = interpreter.run(setup.robot, &setup.room, &setup.commands);
    write_output(output, &RunOutput::from(&report.robot))?;
    Ok(report)
}
