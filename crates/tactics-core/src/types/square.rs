//! マス（Square）

use std::fmt;

use serde::{Deserialize, Serialize};

/// 盤上の座標 (row, col)
///
/// 不変の値型。等価性とハッシュは (row, col) で決まる。
/// 駒を動かすときは新しい `Square` を作る。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: u32,
    pub col: u32,
}

impl Square {
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Square { row, col }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Square row:{} col:{}]", self.row, self.col)
    }
}
