use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use reputation_ledger::logging::init_logging;
use reputation_ledger::{
    LedgerConfig, LedgerSnapshot, ReputationStore, ScriptReport, VoteEngine, VoteScript,
};

#[derive(Serialize)]
struct RunOutput {
    report: ScriptReport,
    ledger: LedgerSnapshot,
}

fn main() -> Result<()> {
    let config = LedgerConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {:#}", e);
        eprintln!("Please check the REPLEDGER_* environment variables.");
        e
    })?;

    init_logging(&config.logging)?;
    config.log_summary();

    let script_path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: reputation-ledger <script.json>"))?;

    let script = VoteScript::from_file(&script_path)?;
    info!(
        path = %script_path,
        commands = script.commands().len(),
        "Loaded vote script"
    );

    let mut engine = VoteEngine::from_config(ReputationStore::new(), &config);
    let report = script.run(&mut engine);

    let output = RunOutput {
        report,
        ledger: engine.snapshot(),
    };
    let rendered =
        serde_json::to_string_pretty(&output).context("Failed to serialize ledger output")?;
    println!("{}", rendered);

    Ok(())
}
