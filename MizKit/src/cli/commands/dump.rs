//! CLI command for printing decoded archive entries

use std::path::Path;

use tracing::debug;

use super::EntryArg;
use crate::formats::lua::encode_table;
use crate::formats::miz::read_miz;

/// Print one entry as table-literal text or JSON
pub fn execute(path: &Path, entry: EntryArg, json: bool) -> anyhow::Result<()> {
    let tables = read_miz(path)?;
    let table = match entry {
        EntryArg::Mission => &tables.mission,
        EntryArg::Options => &tables.options,
        EntryArg::Warehouses => &tables.warehouses,
        EntryArg::Dictionary => &tables.dictionary,
    };
    debug!(
        "Dumping {} ({} keys) from {}",
        entry.entry_name(),
        table.len(),
        path.display()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(table)?);
    } else {
        print!("{}", encode_table(table, entry.root_name()));
    }

    Ok(())
}
