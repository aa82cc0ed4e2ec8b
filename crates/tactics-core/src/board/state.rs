//! 盤面（Board）

use std::collections::BTreeMap;

use log::{debug, trace, warn};

use super::BoardConfig;
use crate::error::{RulesError, RulesResult};
use crate::types::{Direction, Move, Piece, PieceId, Square};

/// 盤面
///
/// 行数・列数は生成時に固定される。占有表は駒IDをキーとし、
/// 1つの駒は高々1マスにしか存在しない。
///
/// `set_piece_at_square` は範囲外のマスや他の駒との重なりを検査しない
/// （呼び出し側の責務）。検査が必要な場合は `try_set_piece_at_square` を使う。
#[derive(Debug, Clone)]
pub struct Board {
    num_rows: u32,
    num_cols: u32,
    piece_to_square: BTreeMap<PieceId, Square>,
}

impl Board {
    /// 盤面を生成する
    ///
    /// 行数・列数のどちらかが 0 の場合は `DegenerateBoard`。
    pub fn new(rows: u32, cols: u32) -> RulesResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(RulesError::DegenerateBoard { rows, cols });
        }
        Ok(Board {
            num_rows: rows,
            num_cols: cols,
            piece_to_square: BTreeMap::new(),
        })
    }

    pub fn from_config(config: &BoardConfig) -> RulesResult<Self> {
        Self::new(config.rows, config.cols)
    }

    #[inline]
    pub fn num_rows(&self) -> u32 {
        self.num_rows
    }

    #[inline]
    pub fn num_cols(&self) -> u32 {
        self.num_cols
    }

    #[inline]
    pub fn config(&self) -> BoardConfig {
        BoardConfig::new(self.num_rows, self.num_cols)
    }

    /// マスが盤内か
    #[inline]
    pub fn contains_square(&self, square: Square) -> bool {
        square.row < self.num_rows && square.col < self.num_cols
    }

    /// `current` から `direction` へ1マス進んだマス
    ///
    /// 盤端を越える成分はその場に留まる（エラーにも折り返しにもならない）。
    /// `Direction::None` は `current` をそのまま返す。盤面は変更しない。
    pub fn next_square(&self, current: Square, direction: Direction) -> Square {
        let next = match direction {
            Direction::Up => Square::new(current.row.saturating_sub(1), current.col),
            Direction::Down => {
                Square::new(current.row.saturating_add(1).min(self.num_rows - 1), current.col)
            }
            Direction::Left => Square::new(current.row, current.col.saturating_sub(1)),
            Direction::Right => {
                Square::new(current.row, current.col.saturating_add(1).min(self.num_cols - 1))
            }
            Direction::None => return current,
        };
        if next == current {
            trace!("next_square: {direction} from {current} clamped at the edge");
        }
        next
    }

    /// 指し手の駒の現在地から `next_square` を計算する
    ///
    /// 駒が盤上にない場合は `PieceNotOnBoard`。
    pub fn next_square_for(&self, mv: &Move) -> RulesResult<Square> {
        let current = self.square_of(mv.piece_id()).ok_or_else(|| RulesError::PieceNotOnBoard {
            uid: mv.piece_id().to_string(),
        })?;
        Ok(self.next_square(current, mv.direction()))
    }

    /// 駒をマスに置く（既に盤上なら置き直す）
    ///
    /// 範囲外のマスや他の駒との重なりは検査しない。
    pub fn set_piece_at_square(&mut self, piece: &Piece, square: Square) {
        if !self.contains_square(square) {
            warn!(
                "set_piece_at_square: {} placed at {square} outside the {}x{} board",
                piece.id(),
                self.num_rows,
                self.num_cols
            );
        }
        match self.piece_to_square.insert(piece.id().clone(), square) {
            Some(prev) => debug!("set_piece_at_square: {} {prev} -> {square}", piece.id()),
            None => debug!("set_piece_at_square: {} placed at {square}", piece.id()),
        }
    }

    /// 範囲と重なりを検査してから駒を置く
    ///
    /// - 盤外のマス: `SquareOutOfBounds`
    /// - 別の駒がいるマス: `SquareOccupied`
    ///
    /// 失敗した場合、盤面は変更されない。
    pub fn try_set_piece_at_square(&mut self, piece: &Piece, square: Square) -> RulesResult<()> {
        if !self.contains_square(square) {
            return Err(RulesError::SquareOutOfBounds {
                square,
                rows: self.num_rows,
                cols: self.num_cols,
            });
        }
        if let Some(occupant) = self.pieces_at(square).find(|id| *id != piece.id()) {
            return Err(RulesError::SquareOccupied {
                square,
                occupant: occupant.to_string(),
            });
        }
        self.set_piece_at_square(piece, square);
        Ok(())
    }

    /// 駒を盤から取り除き、取り除く前のマスを返す
    ///
    /// 盤上になかった場合は何もせず `None`。
    pub fn remove_piece_from_board(&mut self, piece: &Piece) -> Option<Square> {
        let removed = self.piece_to_square.remove(piece.id());
        if let Some(square) = removed {
            debug!("remove_piece_from_board: {} removed from {square}", piece.id());
        }
        removed
    }

    #[inline]
    pub fn has_piece(&self, piece: &Piece) -> bool {
        self.piece_to_square.contains_key(piece.id())
    }

    /// 駒の現在地（盤上にない場合は `PieceNotOnBoard`）
    pub fn current_square(&self, piece: &Piece) -> RulesResult<Square> {
        self.square_of(piece.id()).ok_or_else(|| RulesError::PieceNotOnBoard {
            uid: piece.uid().to_string(),
        })
    }

    /// 駒IDから現在地を引く
    #[inline]
    pub fn square_of(&self, id: &PieceId) -> Option<Square> {
        self.piece_to_square.get(id).copied()
    }

    /// マスにいる駒（ID順）
    ///
    /// 通常は高々1つだが、`set_piece_at_square` は重なりを許すので複数もありうる。
    pub fn pieces_at(&self, square: Square) -> impl Iterator<Item = &PieceId> + '_ {
        self.piece_to_square
            .iter()
            .filter(move |(_, sq)| **sq == square)
            .map(|(id, _)| id)
    }

    /// 占有表（ID順）
    pub fn occupancy(&self) -> impl Iterator<Item = (&PieceId, Square)> + '_ {
        self.piece_to_square.iter().map(|(id, sq)| (id, *sq))
    }

    /// 盤上の駒数
    #[inline]
    pub fn len(&self) -> usize {
        self.piece_to_square.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.piece_to_square.is_empty()
    }
}
