//! Command execution implementations

use super::Commands;
use super::{dictionary, dump, info, roundtrip};
use crate::mission::ImportOptions;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Info { path, strict } => info::execute(path, ImportOptions { strict: *strict }),
            Commands::Dictionary {
                path,
                search,
                limit,
            } => dictionary::execute(path, search.as_deref(), *limit),
            Commands::Dump { path, entry, json } => dump::execute(path, *entry, *json),
            Commands::Roundtrip {
                source,
                destination,
                strict,
                quiet,
            } => roundtrip::execute(
                source,
                destination,
                ImportOptions { strict: *strict },
                *quiet,
            ),
        }
    }
}
