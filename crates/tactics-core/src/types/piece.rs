//! 駒（Piece）と駒ID（PieceId）

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::{PieceType, Player};
use crate::error::{RulesError, RulesResult};

/// 駒の一意な識別子
///
/// 空文字列（空白のみを含む）は受け付けない。デシリアライズ時も同じ検証を通る。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PieceId(String);

impl PieceId {
    pub fn new(uid: impl Into<String>) -> RulesResult<Self> {
        let uid = uid.into();
        if uid.trim().is_empty() {
            return Err(RulesError::InvalidIdentity);
        }
        Ok(PieceId(uid))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PieceId {
    type Error = RulesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PieceId::new(value)
    }
}

impl From<PieceId> for String {
    fn from(id: PieceId) -> Self {
        id.0
    }
}

impl AsRef<str> for PieceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 駒
///
/// 同一性は `uid` のみで決まる。`health` などが異なっていても
/// `uid` が等しければ同じ駒として比較・ハッシュされる。
///
/// `health` は外部の戦闘処理が減算する。このクレート内では変更しない。
/// `max_health` / `attack` / `defense` は駒種から決まり、生成後は変化しない。
///
/// デシリアライズは `Piece::new` を経由する。ステータスは駒種の値に
/// 正規化され、保存された `health` だけが引き継がれる。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PieceRepr")]
pub struct Piece {
    uid: PieceId,
    owner: Player,
    #[serde(rename = "type")]
    piece_type: PieceType,
    max_health: u32,
    pub health: u32,
    attack: u32,
    defense: u32,
}

/// デシリアライズ用の中間表現（ステータス列は無視する）
#[derive(Deserialize)]
struct PieceRepr {
    uid: String,
    owner: Player,
    #[serde(rename = "type", default)]
    piece_type: PieceType,
    #[serde(default)]
    health: Option<u32>,
}

impl TryFrom<PieceRepr> for Piece {
    type Error = RulesError;

    fn try_from(repr: PieceRepr) -> Result<Self, Self::Error> {
        let mut piece = Piece::new(repr.uid, repr.owner, repr.piece_type)?;
        if let Some(health) = repr.health {
            if health > piece.max_health {
                return Err(RulesError::InvalidHealth {
                    health,
                    max_health: piece.max_health,
                });
            }
            piece.health = health;
        }
        Ok(piece)
    }
}

impl Piece {
    /// 駒種の基本ステータスで駒を生成する（`max_health == health`）
    pub fn new(uid: impl Into<String>, owner: Player, piece_type: PieceType) -> RulesResult<Self> {
        let uid = PieceId::new(uid)?;
        let stats = piece_type.base_stats();
        Ok(Piece {
            uid,
            owner,
            piece_type,
            max_health: stats.health,
            health: stats.health,
            attack: stats.attack,
            defense: stats.defense,
        })
    }

    /// 駒種を省略した生成（Sword）
    pub fn with_default_type(uid: impl Into<String>, owner: Player) -> RulesResult<Self> {
        Self::new(uid, owner, PieceType::default())
    }

    #[inline]
    pub fn id(&self) -> &PieceId {
        &self.uid
    }

    #[inline]
    pub fn uid(&self) -> &str {
        self.uid.as_str()
    }

    #[inline]
    pub fn owner(&self) -> Player {
        self.owner
    }

    #[inline]
    pub fn piece_type(&self) -> PieceType {
        self.piece_type
    }

    /// 生成時の体力（以後変化しない）
    #[inline]
    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    #[inline]
    pub fn attack(&self) -> u32 {
        self.attack
    }

    #[inline]
    pub fn defense(&self) -> u32 {
        self.defense
    }

    /// `self` が `other` に対して相性で不利か
    ///
    /// 純粋関数。ダメージの適用は呼び出し側の責務。
    #[inline]
    pub fn is_countered_by(&self, other: &Piece) -> bool {
        self.piece_type.is_countered_by(other.piece_type)
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.uid == other.uid
    }
}

impl Eq for Piece {}

impl Hash for Piece {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uid.hash(state);
    }
}
