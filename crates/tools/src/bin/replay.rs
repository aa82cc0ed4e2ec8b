use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use clap::Parser;
use log::info;
use tools::common::io::open_writer;
use tools::scenario::{Replay, Scenario, StepRecord};

/// シナリオ（TOML）を再生し、1手ごとの結果を JSONL で書き出す。
///
/// # よく使うコマンド例
///
/// - 標準出力へ:
///   `cargo run -p tools --bin replay -- scenarios/duel.toml --out -`
///
/// - 盤外・重なりを拒否して gzip 出力:
///   `cargo run -p tools --bin replay -- scenarios/duel.toml --strict --out runs/replay/duel.jsonl.gz`
///
/// `--out` 未指定時は `runs/replay/<timestamp>-replay.jsonl` に書き出す。
#[derive(Parser, Debug)]
#[command(author, version, about = "Replay a tactics scenario against the rules core")]
struct Cli {
    /// Scenario file (TOML, `.gz` allowed, `-` for stdin)
    scenario: PathBuf,

    /// Output JSONL path (`-` for stdout, `.gz` compresses)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Reject out-of-bounds and overlapping placements
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Exit with an error if any step fails
    #[arg(long, default_value_t = false)]
    fail_on_error: bool,
}

fn resolve_output_path(out: Option<&Path>, timestamp: &DateTime<Local>) -> PathBuf {
    match out {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(format!(
            "runs/replay/{}-replay.jsonl",
            timestamp.format("%Y%m%d-%H%M%S")
        )),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let scenario = Scenario::load(&cli.scenario)?;
    let mut replay = Replay::from_scenario(&scenario, cli.strict)?;

    let output_path = resolve_output_path(cli.out.as_deref(), &Local::now());
    let mut writer = open_writer(&output_path)
        .with_context(|| format!("failed to open {}", output_path.display()))?;

    let errors = replay.run(&scenario.steps, &mut |record: &StepRecord| -> Result<()> {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
        Ok(())
    })?;
    writer.close().with_context(|| format!("failed to close {}", output_path.display()))?;

    for (uid, square) in replay.occupancy() {
        info!("final: {uid} at {square}");
    }
    info!(
        "replayed {} steps ({} errors) -> {}",
        scenario.steps.len(),
        errors,
        output_path.display()
    );

    if cli.fail_on_error && errors > 0 {
        bail!("{errors} step(s) failed");
    }
    Ok(())
}
