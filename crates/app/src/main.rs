use anyhow::Context;

use holdco_app::{demo, settings::Settings};

fn main() -> anyhow::Result<()> {
    holdco_observability::init();

    let settings = Settings::from_env().context("loading settings")?;
    tracing::info!(fill_rate = %settings.fill_rate, "settings loaded");

    let summary = demo::run(&settings)?;
    tracing::info!(
        ledger_entries = summary.ledger_entries,
        headquarters = %summary.headquarters_balance,
        subsidiary = %summary.subsidiary_balance,
        warehouse_free_space = %summary.warehouse_free_space,
        payroll = %summary.payroll,
        "run finished"
    );
    Ok(())
}
