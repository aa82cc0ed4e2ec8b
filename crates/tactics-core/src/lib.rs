//! # tactics-core
//!
//! グリッド型タクティクスゲームのルールコアライブラリ。
//!
//! ## モジュール構成
//!
//! - `types`: 基本型（Player, PieceType, Piece, Direction, Move, Square）
//! - `board`: 盤面（駒 → マスの占有表と、盤端でクランプされる移動先計算）
//! - `error`: ルール違反・前提条件違反のエラー型
//!
//! 描画・入力・手番進行・ダメージ計算は外部の呼び出し側が担当する。
//! このクレートは単一の呼び出し側から逐次的に操作されることを前提とし、
//! ロックや内部可変性は持たない。

pub mod board;
pub mod error;
pub mod types;

pub use board::{Board, BoardConfig};
pub use error::{RulesError, RulesResult};
pub use types::{Direction, Move, Piece, PieceId, PieceStats, PieceType, Player, Square};
