//! 指し手（Move）

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Direction, Piece, PieceId};

/// 駒を1マス動かす指示
///
/// 生成時には何も検証しない。盤面に対する妥当性は
/// `Board::next_square_for` が判定する。盤面には保存されない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    piece: PieceId,
    #[serde(default)]
    direction: Direction,
}

impl Move {
    #[inline]
    pub fn new(piece: &Piece, direction: Direction) -> Self {
        Move {
            piece: piece.id().clone(),
            direction,
        }
    }

    /// 方向 `None`（その場に留まる）
    #[inline]
    pub fn stay(piece: &Piece) -> Self {
        Self::new(piece, Direction::None)
    }

    #[inline]
    pub fn piece_id(&self) -> &PieceId {
        &self.piece
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.piece, self.direction)
    }
}
