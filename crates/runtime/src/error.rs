//! Errors surfaced by session setup and the turn loop.
use escape_content::ScenarioError;
use thiserror::Error;

use crate::session::Outcome;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session already ended: {outcome}")]
    SessionOver { outcome: Outcome },

    #[error("guard starts in room {0}, which is not part of the map")]
    GuardOutsideMap(escape_core::RoomId),

    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    /// Reading or parsing setup files failed.
    #[error(transparent)]
    Content(#[from] anyhow::Error),
}
