use clap::Subcommand;
use std::path::PathBuf;
use std::str::FromStr;

use crate::formats::miz::{DICTIONARY_ENTRY, MISSION_ENTRY, OPTIONS_ENTRY, WAREHOUSES_ENTRY};

/// Archive entry selection for `dump`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryArg {
    Mission,
    Options,
    Warehouses,
    Dictionary,
}

impl EntryArg {
    /// Name of the entry inside the archive.
    #[must_use]
    pub fn entry_name(self) -> &'static str {
        match self {
            EntryArg::Mission => MISSION_ENTRY,
            EntryArg::Options => OPTIONS_ENTRY,
            EntryArg::Warehouses => WAREHOUSES_ENTRY,
            EntryArg::Dictionary => DICTIONARY_ENTRY,
        }
    }

    /// Root name the table is assigned to.
    #[must_use]
    pub fn root_name(self) -> &'static str {
        match self {
            EntryArg::Mission => "mission",
            EntryArg::Options => "options",
            EntryArg::Warehouses => "warehouses",
            EntryArg::Dictionary => "dictionary",
        }
    }
}

impl FromStr for EntryArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mission" | "m" => Ok(EntryArg::Mission),
            "options" | "o" => Ok(EntryArg::Options),
            "warehouses" | "w" => Ok(EntryArg::Warehouses),
            "dictionary" | "dict" | "d" => Ok(EntryArg::Dictionary),
            _ => Err(format!(
                "Invalid entry '{s}'. Valid values: mission, options, warehouses, dictionary"
            )),
        }
    }
}

pub mod dictionary;
pub mod dump;
pub mod execute;
pub mod info;
pub mod roundtrip;

#[derive(Subcommand)]
pub enum Commands {
    /// Show a summary of a mission archive
    Info {
        /// Mission archive (.miz)
        path: PathBuf,

        /// Fail on content the mission model does not represent
        #[arg(long)]
        strict: bool,
    },

    /// List dictionary strings
    Dictionary {
        /// Mission archive (.miz)
        path: PathBuf,

        /// Only show entries whose id or text contains this (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Maximum number of entries to show
        #[arg(short, long, default_value = "100")]
        limit: usize,
    },

    /// Print one decoded archive entry
    Dump {
        /// Mission archive (.miz)
        path: PathBuf,

        /// Entry to print: mission, options, warehouses or dictionary
        #[arg(short, long, default_value = "mission")]
        entry: EntryArg,

        /// Print as JSON instead of table-literal text
        #[arg(long)]
        json: bool,
    },

    /// Load a mission and save it again through the mission model
    Roundtrip {
        /// Source mission archive
        source: PathBuf,

        /// Destination mission archive
        destination: PathBuf,

        /// Fail on content the mission model does not represent
        #[arg(long)]
        strict: bool,

        /// Suppress the summary
        #[arg(short, long)]
        quiet: bool,
    },
}
