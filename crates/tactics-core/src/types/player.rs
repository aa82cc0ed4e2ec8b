//! 陣営（Player）

use std::fmt;

use serde::{Deserialize, Serialize};

/// 駒の所有者（A/B）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// 相手陣営を返す
    #[inline]
    pub const fn opponent(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }
}

impl std::ops::Not for Player {
    type Output = Player;

    #[inline]
    fn not(self) -> Player {
        self.opponent()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => f.write_str("A"),
            Player::B => f.write_str("B"),
        }
    }
}
