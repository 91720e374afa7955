//! Error types for maze level generation

use thiserror::Error;

use crate::grid::Position;
use crate::objects::EntityKind;

/// Errors that can occur during level generation or queries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LevelError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No partition was large enough to host a room
    #[error("seed {seed} produced no rooms")]
    NoRooms { seed: u64 },

    /// The connectivity search ran out of routable room pairs
    #[error("rooms cannot be fully connected ({connected} of {total} joined)")]
    Disconnected { connected: usize, total: usize },

    /// Requested room index does not exist
    #[error("room not found: {0}")]
    RoomNotFound(usize),

    /// A relocation was issued on an entity that cannot move
    #[error("{kind:?} at {position} cannot be moved")]
    Immovable { kind: EntityKind, position: Position },

    /// Object population ran out of sampling attempts
    #[error("object placement failed: {0}")]
    PlacementFailed(String),
}

/// Result type alias for level operations
pub type Result<T> = std::result::Result<T, LevelError>;
