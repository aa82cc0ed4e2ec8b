//! シナリオ再生
//!
//! 手番進行役として tactics-core を呼び出す。`move` は
//! `next_square_for` で移動先を求め、`commit` のときだけ `set_piece_at_square`
//! で確定する。移動先に他の駒がいれば相性（`is_countered_by`）を両方向で記録するが、
//! ダメージは適用しない。

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::Serialize;
use tactics_core::{Board, Direction, Move, Piece, PieceType, Player, RulesResult, Square};

use super::config::{Scenario, Step};

/// 移動先で出会った駒
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Encounter {
    pub uid: String,
    pub owner: Player,
    #[serde(rename = "type")]
    pub piece_type: PieceType,
    /// 動いた駒が相手に対して不利か
    pub mover_countered: bool,
    /// 相手が動いた駒に対して不利か
    pub other_countered: bool,
}

/// 1手分の結果（JSONL の1行）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: usize,
    pub action: &'static str,
    pub piece: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    pub from: Option<Square>,
    pub to: Option<Square>,
    pub clamped: bool,
    pub committed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub encounters: Vec<Encounter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepRecord {
    fn new(step: usize, action: &'static str, piece: &str) -> Self {
        StepRecord {
            step,
            action,
            piece: piece.to_string(),
            direction: None,
            from: None,
            to: None,
            clamped: false,
            committed: false,
            encounters: Vec::new(),
            error: None,
        }
    }
}

/// 再生中の状態
pub struct Replay {
    board: Board,
    pieces: BTreeMap<String, Piece>,
    strict: bool,
}

impl Replay {
    /// 盤面と駒を生成し、初期配置を行う
    ///
    /// `strict` のときは配置に `try_set_piece_at_square` を使い、
    /// 盤外・重なりを拒否する。
    pub fn from_scenario(scenario: &Scenario, strict: bool) -> Result<Self> {
        let mut board = Board::from_config(&scenario.board)?;
        let mut pieces = BTreeMap::new();
        for spec in &scenario.pieces {
            let piece = Piece::new(spec.uid.clone(), spec.owner, spec.piece_type)
                .with_context(|| format!("invalid piece {:?}", spec.uid))?;
            if let Some(at) = spec.at {
                if strict {
                    board
                        .try_set_piece_at_square(&piece, at)
                        .with_context(|| format!("initial placement of {}", spec.uid))?;
                } else {
                    board.set_piece_at_square(&piece, at);
                }
            }
            pieces.insert(spec.uid.clone(), piece);
        }
        info!(
            "replay: {}x{} board, {} pieces ({} placed)",
            board.num_rows(),
            board.num_cols(),
            pieces.len(),
            board.len()
        );
        Ok(Replay { board, pieces, strict })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self, uid: &str) -> Option<&Piece> {
        self.pieces.get(uid)
    }

    /// 全ステップを順に実行し、結果を `on_step` に渡す
    ///
    /// ルール上のエラーは記録に残して続行する。戻り値はエラーになったステップ数。
    pub fn run(
        &mut self,
        steps: &[Step],
        on_step: &mut dyn FnMut(&StepRecord) -> Result<()>,
    ) -> Result<usize> {
        let mut errors = 0;
        for (i, step) in steps.iter().enumerate() {
            let record = self.apply(i, step)?;
            if let Some(err) = &record.error {
                warn!("step {i} ({} {}): {err}", record.action, record.piece);
                errors += 1;
            }
            on_step(&record)?;
        }
        Ok(errors)
    }

    /// 1ステップ実行する
    pub fn apply(&mut self, index: usize, step: &Step) -> Result<StepRecord> {
        let piece = self
            .pieces
            .get(step.piece())
            .cloned()
            .with_context(|| format!("step {index}: unknown piece {}", step.piece()))?;
        let mut record = StepRecord::new(index, step.action(), piece.uid());
        record.from = self.board.current_square(&piece).ok();

        match step {
            Step::Move { direction, commit, .. } => {
                record.direction = Some(*direction);
                let mv = Move::new(&piece, *direction);
                match self.board.next_square_for(&mv) {
                    Ok(to) => {
                        record.to = Some(to);
                        record.clamped = *direction != Direction::None && record.from == Some(to);
                        record.encounters = self.encounters(&piece, to);
                        if *commit {
                            self.commit(&piece, to, &mut record);
                        }
                    }
                    Err(err) => record.error = Some(err.to_string()),
                }
            }
            Step::Place { at, .. } => {
                record.to = Some(*at);
                record.encounters = self.encounters(&piece, *at);
                self.commit(&piece, *at, &mut record);
            }
            Step::Remove { .. } => {
                record.committed = self.board.remove_piece_from_board(&piece).is_some();
            }
        }
        debug!(
            "step {index}: {} {} {:?} -> {:?}",
            record.action, record.piece, record.from, record.to
        );
        Ok(record)
    }

    fn commit(&mut self, piece: &Piece, to: Square, record: &mut StepRecord) {
        let placed: RulesResult<()> = if self.strict {
            self.board.try_set_piece_at_square(piece, to)
        } else {
            self.board.set_piece_at_square(piece, to);
            Ok(())
        };
        match placed {
            Ok(()) => record.committed = true,
            Err(err) => record.error = Some(err.to_string()),
        }
    }

    fn encounters(&self, mover: &Piece, to: Square) -> Vec<Encounter> {
        self.board
            .pieces_at(to)
            .filter(|id| *id != mover.id())
            .filter_map(|id| self.pieces.get(id.as_str()))
            .map(|other| Encounter {
                uid: other.uid().to_string(),
                owner: other.owner(),
                piece_type: other.piece_type(),
                mover_countered: mover.is_countered_by(other),
                other_countered: other.is_countered_by(mover),
            })
            .collect()
    }

    /// 現在の占有状況（ID順）
    pub fn occupancy(&self) -> Vec<(String, Square)> {
        self.board.occupancy().map(|(id, sq)| (id.to_string(), sq)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(text: &str) -> Scenario {
        Scenario::parse(text).unwrap()
    }

    const DUEL: &str = r#"
board = { rows = 3, cols = 3 }

[[pieces]]
uid = "s1"
owner = "A"
type = "SWORD"
at = { row = 0, col = 0 }

[[pieces]]
uid = "h1"
owner = "B"
type = "HORSE"
at = { row = 0, col = 1 }
"#;

    #[test]
    fn test_move_reports_encounter_without_damage() {
        let sc = scenario(DUEL);
        let mut replay = Replay::from_scenario(&sc, false).unwrap();
        let step = Step::Move {
            piece: "s1".to_string(),
            direction: Direction::Right,
            commit: false,
        };
        let record = replay.apply(0, &step).unwrap();
        assert_eq!(record.from, Some(Square::new(0, 0)));
        assert_eq!(record.to, Some(Square::new(0, 1)));
        assert!(!record.committed);
        assert_eq!(record.encounters.len(), 1);
        assert!(record.encounters[0].mover_countered);
        assert!(record.encounters[0].other_countered);

        let s1 = replay.piece("s1").unwrap();
        assert_eq!(s1.health, s1.max_health());
        assert_eq!(replay.board().current_square(s1).unwrap(), Square::new(0, 0));
    }

    #[test]
    fn test_strict_commit_rejects_collision() {
        let sc = scenario(DUEL);
        let mut replay = Replay::from_scenario(&sc, true).unwrap();
        let step = Step::Move {
            piece: "s1".to_string(),
            direction: Direction::Right,
            commit: true,
        };
        let record = replay.apply(0, &step).unwrap();
        assert!(!record.committed);
        assert!(record.error.unwrap().contains("already occupied"));
    }

    #[test]
    fn test_permissive_commit_allows_stacking() {
        let sc = scenario(DUEL);
        let mut replay = Replay::from_scenario(&sc, false).unwrap();
        let step = Step::Move {
            piece: "s1".to_string(),
            direction: Direction::Right,
            commit: true,
        };
        let record = replay.apply(0, &step).unwrap();
        assert!(record.committed);
        assert_eq!(
            replay.occupancy(),
            vec![
                ("h1".to_string(), Square::new(0, 1)),
                ("s1".to_string(), Square::new(0, 1))
            ]
        );
    }

    #[test]
    fn test_clamped_move_flagged() {
        let sc = scenario(DUEL);
        let mut replay = Replay::from_scenario(&sc, false).unwrap();
        let step = Step::Move {
            piece: "s1".to_string(),
            direction: Direction::Up,
            commit: true,
        };
        let record = replay.apply(0, &step).unwrap();
        assert!(record.clamped);
        assert_eq!(record.to, Some(Square::new(0, 0)));
    }

    #[test]
    fn test_move_off_board_piece_is_recorded_error() {
        let sc = scenario(
            r#"
board = { rows = 2, cols = 2 }
pieces = [ { uid = "p1", owner = "A", type = "SPEAR" } ]
"#,
        );
        let mut replay = Replay::from_scenario(&sc, false).unwrap();
        let steps = vec![
            Step::Move {
                piece: "p1".to_string(),
                direction: Direction::Down,
                commit: true,
            },
            Step::Place {
                piece: "p1".to_string(),
                at: Square::new(1, 1),
            },
            Step::Remove {
                piece: "p1".to_string(),
            },
            Step::Remove {
                piece: "p1".to_string(),
            },
        ];
        let mut records = Vec::new();
        let errors = replay
            .run(&steps, &mut |r: &StepRecord| -> anyhow::Result<()> {
                records.push(r.clone());
                Ok(())
            })
            .unwrap();

        assert_eq!(errors, 1);
        assert!(records[0].error.as_deref().unwrap().contains("not on the board"));
        assert!(records[1].committed);
        assert!(records[2].committed);
        assert_eq!(records[2].from, Some(Square::new(1, 1)));
        assert!(!records[3].committed);
        assert!(replay.board().is_empty());
    }

    #[test]
    fn test_strict_initial_placement_out_of_bounds() {
        let sc = scenario(
            r#"
board = { rows = 2, cols = 2 }
pieces = [ { uid = "p1", owner = "A", at = { row = 2, col = 0 } } ]
"#,
        );
        assert!(Replay::from_scenario(&sc, true).is_err());
        assert!(Replay::from_scenario(&sc, false).is_ok());
    }
}
