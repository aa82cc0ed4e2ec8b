//! 移動方向（Direction）

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// 1マス移動の方向
///
/// `None` はその場に留まる指示で、盤面上の移動先は元のマスになる。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// 実際に移動する4方向
    pub const CARDINAL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// 全ての方向（`None` を含む）
    pub const ALL: [Direction; 5] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::None,
    ];

    /// 逆方向（`None` は `None`）
    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
            Direction::None => "NONE",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RulesError::UnknownDirection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::None.opposite(), Direction::None);
    }

    #[test]
    fn test_direction_opposite_involution() {
        for d in Direction::CARDINAL {
            assert_ne!(d.opposite(), d);
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn test_direction_as_str() {
        assert_eq!(Direction::Up.as_str(), "UP");
        assert_eq!(Direction::Down.as_str(), "DOWN");
        assert_eq!(Direction::Left.as_str(), "LEFT");
        assert_eq!(Direction::Right.as_str(), "RIGHT");
        assert_eq!(Direction::None.to_string(), "NONE");
    }

    #[test]
    fn test_direction_parse() {
        for d in Direction::ALL {
            assert_eq!(d.as_str().parse::<Direction>(), Ok(d));
        }
        assert_eq!("left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(
            "north".parse::<Direction>(),
            Err(RulesError::UnknownDirection("north".to_string()))
        );
    }

    #[test]
    fn test_direction_default_is_none() {
        assert_eq!(Direction::default(), Direction::None);
    }
}
