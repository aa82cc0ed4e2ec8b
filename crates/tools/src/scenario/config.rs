//! シナリオファイル（TOML）
//!
//! ```toml
//! [board]
//! rows = 5
//! cols = 5
//!
//! [[pieces]]
//! uid = "s1"
//! owner = "A"
//! type = "SWORD"
//! at = { row = 0, col = 0 }
//!
//! [[steps]]
//! action = "move"
//! piece = "s1"
//! direction = "RIGHT"
//! ```

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tactics_core::{BoardConfig, Direction, PieceType, Player, Square};

use crate::common::io::read_to_string;

/// シナリオ全体
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub board: BoardConfig,
    #[serde(default)]
    pub pieces: Vec<PieceSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// 駒の定義と初期配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PieceSpec {
    pub uid: String,
    pub owner: Player,
    /// 省略時は SWORD
    #[serde(rename = "type", default)]
    pub piece_type: PieceType,
    /// 省略時は盤外から開始
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<Square>,
}

fn default_commit() -> bool {
    true
}

/// 1手分の操作
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Step {
    /// 移動先を計算し、`commit` なら確定する
    Move {
        piece: String,
        #[serde(default)]
        direction: Direction,
        #[serde(default = "default_commit")]
        commit: bool,
    },
    /// 任意のマスへ置く（置き直し）
    Place { piece: String, at: Square },
    /// 盤から取り除く
    Remove { piece: String },
}

impl Step {
    pub fn piece(&self) -> &str {
        match self {
            Step::Move { piece, .. } | Step::Place { piece, .. } | Step::Remove { piece } => piece,
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            Step::Move { .. } => "move",
            Step::Place { .. } => "place",
            Step::Remove { .. } => "remove",
        }
    }
}

impl Scenario {
    pub fn parse(text: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(text).context("failed to parse scenario")?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// ファイルから読み込む（`.gz` 可、`-` は標準入力）
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid scenario {}", path.display()))
    }

    /// 盤面サイズ・uid の重複・未定義の駒への参照を検査する
    fn validate(&self) -> Result<()> {
        if self.board.rows == 0 || self.board.cols == 0 {
            bail!("board must be at least 1x1, got {}x{}", self.board.rows, self.board.cols);
        }
        let mut seen = std::collections::HashSet::new();
        for spec in &self.pieces {
            if !seen.insert(spec.uid.as_str()) {
                bail!("duplicate piece uid: {}", spec.uid);
            }
        }
        for (i, step) in self.steps.iter().enumerate() {
            if !seen.contains(step.piece()) {
                bail!("step {i} refers to unknown piece {}", step.piece());
            }
        }
        Ok(())
    }
}
