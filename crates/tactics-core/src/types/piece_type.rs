//! 駒種（PieceType）と基本ステータス

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// 駒の基本ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceStats {
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
}

/// 駒種（3種類）
///
/// 相性は三すくみに近いが対称ではない。
/// - Horse は Sword と Spear に弱い
/// - Sword は Horse に弱い
/// - Spear はどの駒種とも相性関係を持たない
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum PieceType {
    #[default]
    Sword,
    Spear,
    Horse,
}

impl PieceType {
    /// 全ての駒種
    pub const ALL: [PieceType; 3] = [PieceType::Sword, PieceType::Spear, PieceType::Horse];

    /// 生成時のステータス
    #[inline]
    pub const fn base_stats(self) -> PieceStats {
        match self {
            PieceType::Sword => PieceStats {
                health: 100,
                attack: 5,
                defense: 5,
            },
            PieceType::Spear => PieceStats {
                health: 100,
                attack: 7,
                defense: 3,
            },
            PieceType::Horse => PieceStats {
                health: 80,
                attack: 9,
                defense: 1,
            },
        }
    }

    /// `self` が `other` に対して不利か
    ///
    /// 対称とは限らない。Spear が絡む組は片方向のみ、
    /// Sword と Horse は互いに不利になる。
    #[inline]
    pub const fn is_countered_by(self, other: PieceType) -> bool {
        matches!(
            (self, other),
            (PieceType::Horse, PieceType::Sword)
                | (PieceType::Horse, PieceType::Spear)
                | (PieceType::Sword, PieceType::Horse)
        )
    }

    /// 表示名（"SWORD" / "SPEAR" / "HORSE"）
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            PieceType::Sword => "SWORD",
            PieceType::Spear => "SPEAR",
            PieceType::Horse => "HORSE",
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PieceType {
    type Err = RulesError;

    /// 大文字小文字を区別せずに駒種名を解析する
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PieceType::ALL
            .into_iter()
            .find(|pt| pt.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RulesError::UnknownPieceType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_type_base_stats() {
        assert_eq!(
            PieceType::Sword.base_stats(),
            PieceStats {
                health: 100,
                attack: 5,
                defense: 5
            }
        );
        assert_eq!(
            PieceType::Spear.base_stats(),
            PieceStats {
                health: 100,
                attack: 7,
                defense: 3
            }
        );
        assert_eq!(
            PieceType::Horse.base_stats(),
            PieceStats {
                health: 80,
                attack: 9,
                defense: 1
            }
        );
    }

    #[test]
    fn test_piece_type_default_is_sword() {
        assert_eq!(PieceType::default(), PieceType::Sword);
    }

    #[test]
    fn test_piece_type_counter_table() {
        use PieceType::*;

        let countered = [(Horse, Sword), (Horse, Spear), (Sword, Horse)];
        for a in PieceType::ALL {
            for b in PieceType::ALL {
                assert_eq!(
                    a.is_countered_by(b),
                    countered.contains(&(a, b)),
                    "{a} countered by {b}"
                );
            }
        }
    }

    #[test]
    fn test_piece_type_counter_asymmetry() {
        use PieceType::*;

        // Horse は Spear に不利だが逆は成り立たない
        assert!(Horse.is_countered_by(Spear));
        assert!(!Spear.is_countered_by(Horse));

        // Sword と Horse は互いに不利
        assert!(Sword.is_countered_by(Horse));
        assert!(Horse.is_countered_by(Sword));

        // 同種同士は相性なし
        for pt in PieceType::ALL {
            assert!(!pt.is_countered_by(pt));
        }
    }

    #[test]
    fn test_piece_type_parse() {
        assert_eq!("SWORD".parse::<PieceType>(), Ok(PieceType::Sword));
        assert_eq!("spear".parse::<PieceType>(), Ok(PieceType::Spear));
        assert_eq!(" Horse ".parse::<PieceType>(), Ok(PieceType::Horse));
        assert_eq!(
            "bow".parse::<PieceType>(),
            Err(RulesError::UnknownPieceType("bow".to_string()))
        );
    }
}
