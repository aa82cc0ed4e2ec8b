//! 基本型モジュール
//!
//! ルールコアで使用する基本的な型を定義する。
//!
//! # 型の依存関係
//!
//! ```text
//! Player    PieceType
//!    ↘      ↙
//!     Piece (PieceId で同一性を判定)
//!       ↓
//! Direction → Move
//!
//! Square は独立
//! ```

mod direction;
mod moves;
mod piece;
mod piece_type;
mod player;
mod square;

pub use direction::Direction;
pub use moves::Move;
pub use piece::{Piece, PieceId};
pub use piece_type::{PieceStats, PieceType};
pub use player::Player;
pub use square::Square;
