//! Fixed demonstration sequence: add, remove, query, report, save, load.

use std::io::Write;

use anyhow::Context;

use stockroom_infra::{Config, JsonFileRepository, SnapshotRepository, load_into, save_store};
use stockroom_inventory::InventoryStore;

use crate::messages;

/// Run the demonstration against `config`, writing the transcript to `out`.
///
/// Inventory and persistence failures are reported in the transcript and never
/// abort the run; only a failure to write `out` is returned as an error.
pub fn run<W: Write>(config: &Config, out: &mut W) -> anyhow::Result<InventoryStore> {
    let mut store = InventoryStore::new();
    let mut log = Vec::new();
    let repo = JsonFileRepository::new(&config.data_file);

    for (name, quantity) in [("apple", 10), ("banana", 2), ("grape", 12)] {
        let result = store.add(name, quantity, Some(&mut log));
        emit(out, messages::add_message(&result))?;
    }

    emit(out, messages::remove_message(&store.remove("apple", 3)))?;
    // orange is not stocked; reported, not fatal
    emit(out, messages::remove_message(&store.remove("orange", 1)))?;

    writeln!(out, "Apple stock: {}", store.quantity("apple")).context("write quantity")?;
    writeln!(
        out,
        "Low stock items: {}",
        messages::name_list(&store.low_stock(config.low_stock_threshold))
    )
    .context("write low-stock list")?;

    let saved = save_store(&store, &repo);
    writeln!(out, "{}", messages::save_message(&saved)).context("write save status")?;

    let loaded = load_into(&mut store, &repo);
    writeln!(out, "{}", messages::load_message(&loaded, &repo.location()))
        .context("write load status")?;

    writeln!(out, "{}", store.report()).context("write report")?;

    for entry in &log {
        tracing::debug!(%entry, "activity");
    }

    Ok(store)
}

fn emit<W: Write>(out: &mut W, message: Option<String>) -> anyhow::Result<()> {
    if let Some(message) = message {
        writeln!(out, "{message}").context("write status message")?;
    }
    Ok(())
}
