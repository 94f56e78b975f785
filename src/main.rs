//! simple_bank - operator entry point
//!
//! ```text
//! simple_bank [--env dev]                          # bootstrap schema + health check
//! simple_bank [--env dev] transfer <from> <to> <amount>
//! ```

use std::time::Duration;

use anyhow::{Context, bail};
use simple_bank::config::AppConfig;
use simple_bank::{Database, Store, TransferTxParams};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// `transfer <from> <to> <amount>` if present on the command line
fn get_transfer_args() -> anyhow::Result<Option<TransferTxParams>> {
    let args: Vec<String> = std::env::args().collect();
    let Some(pos) = args.iter().position(|a| a == "transfer") else {
        return Ok(None);
    };
    if args.len() < pos + 4 {
        bail!("usage: transfer <from_account_id> <to_account_id> <amount>");
    }
    let parse = |i: usize, name: &str| -> anyhow::Result<i64> {
        args[i]
            .parse::<i64>()
            .with_context(|| format!("invalid {}: {}", name, args[i]))
    };
    Ok(Some(TransferTxParams::new(
        parse(pos + 1, "from_account_id")?,
        parse(pos + 2, "to_account_id")?,
        parse(pos + 3, "amount")?,
    )))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env)?;
    let _log_guard = simple_bank::logging::init_logging(&app_config)?;

    tracing::info!(git = env!("GIT_HASH"), "Starting simple_bank in {} mode", env);

    let db = Database::connect_with(&app_config.database)
        .await
        .context("cannot connect to db")?;
    db.init_schema().await.context("schema bootstrap failed")?;
    db.health_check().await.context("health check failed")?;

    let mut store = Store::new(&db);
    if let Some(ms) = app_config.database.tx_timeout_ms {
        store = store.with_tx_timeout(Duration::from_millis(ms));
    }

    if let Some(params) = get_transfer_args()? {
        let result = store.transfer_tx(params).await.map_err(|e| {
            tracing::error!(code = e.code(), error = %e, "Transfer failed");
            e
        })?;
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        tracing::info!("Database ready");
    }

    Ok(())
}
