//! 盤面モジュール
//!
//! - `Board`: 駒ID → マスの占有表。駒が盤上にあるかどうかの唯一の情報源
//! - `BoardConfig`: 盤面サイズの設定
//!
//! 駒の状態は「盤外」と「盤上(マス)」の2つだけで、
//! `set_piece_at_square` で盤上へ、`remove_piece_from_board` で盤外へ遷移する。
//! 移動先の計算（`next_square`）は盤面を変更しない。

mod config;
mod state;

pub use config::BoardConfig;
pub use state::Board;
