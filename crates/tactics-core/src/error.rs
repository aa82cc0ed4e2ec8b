//! Error types for the rules core
//!
//! Every failure here is a local precondition violation reported straight
//! back to the caller. Clamped movement at the board edge is not an error.

use crate::types::Square;

/// Rules-core errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// A piece was constructed with an empty or blank uid
    #[error("piece uid must not be empty")]
    InvalidIdentity,

    /// Loaded health exceeds the type's maximum
    #[error("health {health} exceeds max health {max_health}")]
    InvalidHealth { health: u32, max_health: u32 },

    /// The piece has no occupancy entry on the board
    #[error("piece {uid} is not on the board")]
    PieceNotOnBoard { uid: String },

    /// Board dimensions must both be positive
    #[error("degenerate board dimensions: {rows}x{cols}")]
    DegenerateBoard { rows: u32, cols: u32 },

    /// Checked placement onto a square outside the board
    #[error("{square} is outside the {rows}x{cols} board")]
    SquareOutOfBounds { square: Square, rows: u32, cols: u32 },

    /// Checked placement onto a square held by a different piece
    #[error("{square} is already occupied by {occupant}")]
    SquareOccupied { square: Square, occupant: String },

    /// Direction name could not be parsed
    #[error("unknown direction: {0}")]
    UnknownDirection(String),

    /// Piece type name could not be parsed
    #[error("unknown piece type: {0}")]
    UnknownPieceType(String),
}

/// Result type for rules-core operations
pub type RulesResult<T> = Result<T, RulesError>;
