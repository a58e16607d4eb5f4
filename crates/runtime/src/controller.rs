//! Abstraction for sourcing the agent's intent.
//!
//! Sessions run with a human at a prompt, scripted fixtures, or the
//! [`crate::Autopilot`] by plugging in an [`AgentController`].
use std::collections::VecDeque;

use escape_core::RoomId;
use serde::{Deserialize, Serialize};

use crate::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentCommand {
    /// Walk through an unlocked door of the current room.
    Move(RoomId),
    /// Work the puzzle guarding the current room's locked doors.
    SolvePuzzle,
    Wait,
    Quit,
}

pub trait AgentController {
    /// Chooses the agent's command for the coming turn. The session is
    /// read-only here; the command is applied by [`Session::step`].
    fn next_command(&mut self, session: &Session) -> AgentCommand;
}

/// Replays a fixed list of commands, then quits.
#[derive(Clone, Debug, Default)]
pub struct ScriptedController {
    commands: VecDeque<AgentCommand>,
}

impl ScriptedController {
    pub fn new(commands: impl IntoIterator<Item = AgentCommand>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.commands.len()
    }
}

impl AgentController for ScriptedController {
    fn next_command(&mut self, _session: &Session) -> AgentCommand {
        self.commands.pop_front().unwrap_or(AgentCommand::Quit)
    }
}
