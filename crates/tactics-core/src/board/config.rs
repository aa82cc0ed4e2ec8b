//! 盤面サイズの設定

use serde::{Deserialize, Serialize};

/// 盤面サイズ
///
/// 検証は `Board::from_config` で行う（0 は `DegenerateBoard`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardConfig {
    pub rows: u32,
    pub cols: u32,
}

impl BoardConfig {
    pub const fn new(rows: u32, cols: u32) -> Self {
        BoardConfig { rows, cols }
    }
}
