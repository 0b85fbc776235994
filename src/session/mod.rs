//! Session context and command dispatch.
//!
//! A [`Session`] owns everything one user works with: the input state (tools,
//! canvas, pointer state machine) and a handle to the collaboration
//! orchestrator. Front ends translate their widgets into [`Command`]s and
//! hand them to [`Session::dispatch`]; no other entry point mutates state.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::artwork::ArtworkId;
use crate::collab::{CollabError, OrchestrationState, Orchestrator, Transition};
use crate::config::{ColorSpec, Config};
use crate::draw::{self, RenderError};
use crate::input::{InputState, ToolKind, ToolState};
use crate::ui::{self, Panels};

#[cfg(test)]
mod tests;

/// Tool and pointer commands. These never wait on anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum InputCommand {
    SelectTool { tool: ToolKind },
    /// Thickness for brush and eraser, the shared size for shapes
    SetParameter { tool: ToolKind, value: f64 },
    SetColor { color: ColorSpec },
    PointerPress { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerRelease,
    Resize { width: f64, height: f64 },
}

/// Everything a front end can ask of a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Input(InputCommand),
    StartPhase1(ArtworkId),
    StartPhase2,
    /// Clears the canvas and all collaboration results; tool parameters survive
    Reset,
}

impl From<InputCommand> for Command {
    fn from(command: InputCommand) -> Self {
        Command::Input(command)
    }
}

/// A recorded sequence of input commands, replayable onto a fresh canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Window width; the config value is used when absent
    #[serde(default)]
    pub width: Option<f64>,
    /// Window height; the config value is used when absent
    #[serde(default)]
    pub height: Option<f64>,
    pub commands: Vec<InputCommand>,
}

pub struct Session {
    pub input: InputState,
    collab: Orchestrator,
}

impl Session {
    pub fn new(input: InputState, collab: Orchestrator) -> Self {
        Self { input, collab }
    }

    /// Builds the input state from the drawing and canvas sections of `config`.
    pub fn from_config(config: &Config, collab: Orchestrator) -> Self {
        let input = InputState::new(
            ToolState::new(config.tool_parameters()),
            config.canvas.width as f64,
            config.canvas.height as f64,
        )
        .with_background(config.background())
        .with_shape_outline(config.drawing.shape_outline);
        Self::new(input, collab)
    }

    /// Handle to the orchestrator, for front ends that run requests on their
    /// own tasks while pointer input keeps flowing.
    pub fn collab(&self) -> &Orchestrator {
        &self.collab
    }

    pub fn apply_input(&mut self, command: &InputCommand) {
        match *command {
            InputCommand::SelectTool { tool } => {
                self.input.tools.select_tool(tool);
            }
            InputCommand::SetParameter { tool, value } => {
                self.input.tools.set_parameter(tool, value);
            }
            InputCommand::SetColor { ref color } => {
                self.input.tools.set_color(color.to_color());
            }
            InputCommand::PointerPress { x, y } => self.input.on_pointer_press(x, y),
            InputCommand::PointerMove { x, y } => self.input.on_pointer_motion(x, y),
            InputCommand::PointerRelease => self.input.on_pointer_release(),
            InputCommand::Resize { width, height } => {
                self.input.update_surface_size(width, height)
            }
        }
    }

    /// Applies every command of `script` in order.
    pub fn replay(&mut self, script: &Script) {
        if script.width.is_some() || script.height.is_some() {
            let width = script.width.unwrap_or(self.input.surface_width);
            let height = script.height.unwrap_or(self.input.surface_height);
            self.input.update_surface_size(width, height);
        }
        for command in &script.commands {
            self.apply_input(command);
        }
        log::info!(
            "Replayed {} commands, canvas holds {} marks",
            script.commands.len(),
            self.input.canvas.len()
        );
    }

    /// Dispatches one command.
    ///
    /// Collaboration commands resolve once their round trip has finished and
    /// report what happened to the request; input commands and resets yield `None`.
    pub async fn dispatch(&mut self, command: Command) -> Result<Option<Transition>, CollabError> {
        match command {
            Command::Input(command) => {
                self.apply_input(&command);
                Ok(None)
            }
            Command::StartPhase1(artwork) => self.collab.start_phase1(artwork).await.map(Some),
            Command::StartPhase2 => self.collab.start_phase2().await.map(Some),
            Command::Reset => {
                self.input.clear_canvas();
                self.collab.reset().await;
                Ok(None)
            }
        }
    }

    pub async fn collab_state(&self) -> OrchestrationState {
        self.collab.snapshot().await
    }

    pub async fn panels(&self) -> Panels {
        ui::panels(&self.collab.snapshot().await)
    }

    /// Writes the committed canvas (middle region included, panels excluded) as PNG.
    pub fn write_png<W: Write>(&self, out: &mut W) -> Result<(), RenderError> {
        let width = self.input.surface_width.max(1.0).round() as u32;
        let height = self.input.surface_height.max(1.0).round() as u32;
        draw::write_png(&self.input.canvas, self.input.background, width, height, out)
    }
}
