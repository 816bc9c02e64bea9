//! # MizKit
//!
//! A pure-Rust library for reading, editing and writing DCS World mission
//! archives (`.miz`).
//!
//! ## Layers
//!
//! - **`formats::lua`** - Table-literal text codec used by every archive entry
//! - **`formats::miz`** - Zip container with the `mission`, `options`,
//!   `warehouses` and `l10n/DEFAULT/dictionary` entries
//! - **`mission`** - Typed mission model with import and export
//!
//! ## Quick Start
//!
//! ### Editing an existing mission
//!
//! ```no_run
//! use mizkit::prelude::*;
//!
//! let mut mission = Mission::load_file("Caucasus.miz", ImportOptions::default())?;
//! mission.sortie.set("Operation Clear Field")?;
//! if let Some(usa) = mission.country_by_name_mut("USA") {
//!     println!("{} units", usa.unit_count());
//! }
//! mission.save("Caucasus_edited.miz")?;
//! # Ok::<(), mizkit::Error>(())
//! ```
//!
//! ### Building a mission from scratch
//!
//! ```
//! use mizkit::prelude::*;
//!
//! let mut mission = Mission::new();
//! let group_name = mission.create_string("GroupName", "Armor");
//! let unit_name = mission.create_string("UnitName", "Armor-1");
//!
//! let usa = mission
//!     .add_coalition(Coalition::new("blue"))?
//!     .add_country(Country::new(2, "USA"));
//! let group = usa.add_vehicle_group(Group::vehicle(1, group_name, "Ground Nothing"))?;
//! group.add_unit(Unit::vehicle(1, unit_name, "M-1 Abrams").at(Position::new(-281_000.0, 647_000.0)))?;
//!
//! let tables = mission.export_tables();
//! assert!(tables.mission.contains_key("coalition"));
//! # Ok::<(), mizkit::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `mizkit` command-line binary

pub mod error;
pub mod formats;
pub mod mission;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::lua::{Key, Table, Value};
    pub use crate::formats::miz::{MizTables, read_miz, write_miz};
    pub use crate::mission::{
        AltitudeType, Callsign, Coalition, Country, Group, GroupCategory, GroupKind,
        ImportOptions, LocalizedString, Mission, Point, PointAction, Position, Pylon, Skill,
        Translation, Unit, UnitKind, Weather,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
