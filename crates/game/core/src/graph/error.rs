//! Room graph construction errors.

use crate::error::{ErrorSeverity, GameError};
use crate::graph::RoomId;

/// Errors raised while assembling a [`super::RoomGraph`].
///
/// Graph construction happens once per session from setup data, so every
/// variant indicates malformed input rather than a runtime condition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("room graph has no rooms")]
    Empty,

    #[error("door references unknown room {0}")]
    UnknownRoom(RoomId),

    #[error("door from room {0} to itself")]
    SelfLoop(RoomId),

    #[error("duplicate door between rooms {a} and {b}")]
    DuplicateDoor { a: RoomId, b: RoomId },
}

impl GameError for GraphError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            GraphError::Empty => "GRAPH_EMPTY",
            GraphError::UnknownRoom(_) => "GRAPH_UNKNOWN_ROOM",
            GraphError::SelfLoop(_) => "GRAPH_SELF_LOOP",
            GraphError::DuplicateDoor { .. } => "GRAPH_DUPLICATE_DOOR",
        }
    }
}
