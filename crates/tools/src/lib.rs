//! tactics-core を外部から駆動するためのツール群
//!
//! - `common`: ファイルI/O（gzip対応）
//! - `scenario`: シナリオ（TOML）の読み込みと再生

pub mod common;
pub mod scenario;
