//! Transaction verification: the host's per-script loop

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use udtswap_common::{Hash32, ProtocolConfig, Script, ScriptContext, ScriptKind, SwapError, Transaction};
use udtswap_pool::Verdict;

/// Validator a script is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    Pool,
    PoolLock,
    LiquidityToken,
}

impl Program {
    fn of(kind: ScriptKind, script: &Script, config: &ProtocolConfig) -> Option<Self> {
        match kind {
            ScriptKind::Type if script.code_hash == config.pool_type_code_hash => Some(Program::Pool),
            ScriptKind::Type if script.code_hash == config.liquidity_token_code_hash => {
                Some(Program::LiquidityToken)
            }
            ScriptKind::Lock if script.code_hash == config.pool_lock_code_hash => Some(Program::PoolLock),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Program::Pool => "pool",
            Program::PoolLock => "pool lock",
            Program::LiquidityToken => "liquidity token",
        }
    }
}

/// Verdict for one script group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptVerdict {
    pub program: Program,
    pub script_hash: Hash32,
    pub result: Result<String, SwapError>,
}

pub fn load_transaction(path: &Path) -> Result<Transaction> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read transaction file: {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse transaction JSON: {}", path.display()))
}

fn run_script(
    tx: &Transaction,
    kind: ScriptKind,
    script: Script,
    program: Program,
    config: &ProtocolConfig,
) -> ScriptVerdict {
    let ctx = ScriptContext::new(tx, script, kind);
    let result = match program {
        Program::Pool => udtswap_pool::validate(&ctx, config).map(|verdict| match verdict {
            Verdict::Created => "pool created".to_string(),
            Verdict::Operated(report) => format!("{} pool group(s) settled", report.groups),
        }),
        Program::PoolLock => udtswap_lock::validate(&ctx, config).map(|()| "unlocked".to_string()),
        Program::LiquidityToken => {
            udtswap_liquidity_token::validate(&ctx, config).map(|()| "balanced".to_string())
        }
    };
    ScriptVerdict {
        program,
        script_hash: ctx.script_hash(),
        result,
    }
}

/// Run every protocol script of `tx` once per script group
pub fn verify_transaction(tx: &Transaction, config: &ProtocolConfig) -> Vec<ScriptVerdict> {
    tx.script_groups()
        .into_iter()
        .filter_map(|(kind, script)| {
            let program = Program::of(kind, &script, config)?;
            Some(run_script(tx, kind, script, program, config))
        })
        .collect()
}

/// `udtswap verify`
pub fn verify_command(tx_path: &Path, config: &ProtocolConfig) -> Result<()> {
    // scripts are routed by code hash
    config
        .validate()
        .context("Protocol config cannot route scripts; pass --config with the deployed code hashes")?;
    let tx = load_transaction(tx_path)?;
    println!("{}", "=== Verify Transaction ===".bright_green().bold());
    println!(
        "{} {} inputs, {} outputs",
        "Transaction:".bright_cyan(),
        tx.inputs.len(),
        tx.outputs.len()
    );

    let verdicts = verify_transaction(&tx, config);
    if verdicts.is_empty() {
        println!("{}", "No UDTswap scripts in transaction".yellow());
        return Ok(());
    }

    let mut rejected = 0;
    for verdict in &verdicts {
        let hash = format!("0x{}", hex::encode(verdict.script_hash));
        match &verdict.result {
            Ok(summary) => println!(
                "  {} {:<16} {} {}",
                "✓".green(),
                verdict.program.name(),
                hash.dimmed(),
                summary
            ),
            Err(err) => {
                rejected += 1;
                println!(
                    "  {} {:<16} {} {} (code {})",
                    "✗".red(),
                    verdict.program.name(),
                    hash.dimmed(),
                    err.to_string().red(),
                    err.code()
                );
            }
        }
    }

    if rejected > 0 {
        anyhow::bail!("{} of {} script group(s) rejected", rejected, verdicts.len());
    }
    println!("\n{}", "Transaction accepted".bright_green());
    Ok(())
}
