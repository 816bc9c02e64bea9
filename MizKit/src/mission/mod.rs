//! Mission document model
//!
//! A [`Mission`] is the typed form of the four tables in a `.miz` archive:
//! coalitions own countries, countries own categorized groups, groups own
//! units and a route. All user-visible strings are held as
//! [`LocalizedString`] handles into the mission's [`Translation`].
//!
//! # Example
//!
//! ```no_run
//! use mizkit::mission::{ImportOptions, Mission};
//!
//! let mission = Mission::load_file("Caucasus.miz", ImportOptions::default())?;
//! println!("{}", mission.sortie.text()?);
//! mission.save("Caucasus_copy.miz")?;
//! # Ok::<(), mizkit::Error>(())
//! ```

mod coalition;
mod export;
mod group;
mod import;
mod node;
mod point;
mod translation;
mod types;
mod unit;
mod weather;

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::formats::lua::{Table, Value};
use crate::formats::miz::{self, DEFAULT_LANG};

pub use coalition::{COALITION_NAMES, Coalition, Country};
pub use group::{Group, GroupCategory, GroupKind, Movement, Radio};
pub use import::{ImportOptions, Unsupported};
pub use point::Point;
pub use translation::{LocalizedString, Translation};
pub use types::{AltitudeType, PointAction, Position, Skill};
pub use unit::{
    Callsign, Payload, PlaneData, Pylon, StaticData, Transportable, Unit, UnitKind, VehicleData,
};
pub use weather::{Clouds, Fog, Layers, Season, Weather, Wind, WindLayer};

/// Modules a fresh mission declares as required.
const DEFAULT_MODULES: &[&str] = &[
    "A-10A by Eagle Dynamics",
    "A-10C Warthog by Eagle Dynamics",
    "Bf 109 K-4 by Eagle Dynamics",
    "C-101 Aviojet",
    "C-101 Aviojet by AvioDev",
    "Caucasus",
    "Combined Arms by Eagle Dynamics",
    "./CoreMods/aircraft/MQ-9 Reaper",
    "F-15C",
    "F-5E/E-3 by Belsimtek",
    "F-86F Sabre AI by Eagle Dynamics",
    "F-86F Sabre by Belsimtek",
    "FW-190D9 Dora by Eagle Dynamics",
    "Flaming Cliffs by Eagle Dynamics",
    "Hawk T.1A AI by VEAO Simulations",
    "Hawk T.1A by VEAO Simulations",
    "Ka-50 Black Shark by Eagle Dynamics",
    "L-39C/ZA by Eagle Dynamics",
    "M-2000C by RAZBAM Sims",
    "Mi-8MTV2 Hip by Belsimtek",
    "MiG-15bis AI by Eagle Dynamics",
    "MiG-15bis by Belsimtek",
    "MiG-21Bis AI by Leatherneck Simulations",
    "MiG-21Bis by Leatherneck Simulations",
    "P-51D Mustang by Eagle Dynamics",
    "Su-25A by Eagle Dynamics",
    "Su-25T by Eagle Dynamics",
    "Su-27 Flanker by Eagle Dynamics",
    "TF-51D Mustang by Eagle Dynamics",
    "UH-1H Huey by Belsimtek",
    "World War II AI Units by Eagle Dynamics",
];

/// A mission document.
#[derive(Debug, PartialEq)]
pub struct Mission {
    translation: Translation,
    pub version: i64,
    pub current_key: i64,
    /// Mission start, seconds after midnight.
    pub start_time: i64,
    pub theatre: String,
    pub sortie: LocalizedString,
    pub description_text: LocalizedString,
    pub description_blue_task: LocalizedString,
    pub description_red_task: LocalizedString,
    /// Briefing images, kept in whatever shape the source used.
    pub picture_file_name_r: Value,
    pub picture_file_name_b: Value,
    /// Required module name -> enabled.
    pub used_modules: BTreeMap<String, bool>,
    pub options: Table,
    pub weather: Weather,
    pub goals: Table,
    pub map: Table,
    pub forced_options: Table,
    pub failures: Table,
    pub need_modules: Table,
    coalitions: BTreeMap<String, Coalition>,
    unsupported: Vec<Unsupported>,
}

impl Default for Mission {
    fn default() -> Self {
        Self::new()
    }
}

impl Mission {
    /// A fresh mission with default weather and module list and no coalitions.
    #[must_use]
    pub fn new() -> Self {
        let translation = Translation::new();
        let description_text = translation.create_string("descriptionText", "");
        let description_blue_task = translation.create_string("descriptionBlueTask", "");
        let description_red_task = translation.create_string("descriptionRedTask", "");
        let sortie = translation.create_string("sortie", "");
        Self {
            translation,
            version: 9,
            current_key: 0,
            start_time: 43_200,
            theatre: String::from("Caucasus"),
            sortie,
            description_text,
            description_blue_task,
            description_red_task,
            picture_file_name_r: Value::Str(String::new()),
            picture_file_name_b: Value::Str(String::new()),
            used_modules: DEFAULT_MODULES
                .iter()
                .map(|name| ((*name).to_string(), true))
                .collect(),
            options: Table::new(),
            weather: Weather::default(),
            goals: Table::new(),
            map: Table::new(),
            forced_options: Table::new(),
            failures: Table::new(),
            need_modules: Table::new(),
            coalitions: BTreeMap::new(),
            unsupported: Vec::new(),
        }
    }

    /// Read and import a `.miz` archive.
    ///
    /// # Errors
    /// Returns an error if the archive cannot be read or its tables do not
    /// match the mission schema.
    pub fn load_file<P: AsRef<Path>>(path: P, options: ImportOptions) -> Result<Self> {
        let tables = miz::read_miz(path)?;
        Self::import_tables(&tables, options)
    }

    /// Export and write the mission as a `.miz` archive.
    ///
    /// # Errors
    /// Returns an error if the archive cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        miz::write_miz(path, &self.export_tables())
    }

    #[must_use]
    pub fn translation(&self) -> &Translation {
        &self.translation
    }

    /// Handle for a DEFAULT-language string id.
    #[must_use]
    pub fn get_string(&self, id: &str) -> LocalizedString {
        self.translation.get_string(id, DEFAULT_LANG)
    }

    /// Store `text` under `id` in the DEFAULT language.
    pub fn set_string(&self, id: &str, text: impl Into<String>) -> String {
        self.translation.set_string(id, text, DEFAULT_LANG)
    }

    /// Store `text` under a freshly allocated id.
    pub fn create_string(&self, kind: &str, text: impl Into<String>) -> LocalizedString {
        self.translation.create_string(kind, text)
    }

    /// Content found on import that the model does not represent.
    #[must_use]
    pub fn unsupported(&self) -> &[Unsupported] {
        &self.unsupported
    }

    #[must_use]
    pub fn coalition(&self, name: &str) -> Option<&Coalition> {
        self.coalitions.get(name)
    }

    pub fn coalition_mut(&mut self, name: &str) -> Option<&mut Coalition> {
        self.coalitions.get_mut(name)
    }

    /// Coalitions present in this mission, keyed by name.
    pub fn coalitions(&self) -> impl Iterator<Item = (&str, &Coalition)> {
        self.coalitions
            .iter()
            .map(|(name, coalition)| (name.as_str(), coalition))
    }

    /// Insert a coalition under its own name, replacing any existing one.
    ///
    /// # Errors
    /// Returns [`Error::UnknownCoalition`] unless the name is one of
    /// [`COALITION_NAMES`].
    pub fn add_coalition(&mut self, coalition: Coalition) -> Result<&mut Coalition> {
        if !COALITION_NAMES.contains(&coalition.name.as_str()) {
            return Err(Error::UnknownCoalition(coalition.name));
        }
        let name = coalition.name.clone();
        self.coalitions.insert(name.clone(), coalition);
        Ok(self.coalitions.entry(name).or_default())
    }

    pub fn remove_coalition(&mut self, name: &str) -> Option<Coalition> {
        self.coalitions.remove(name)
    }

    /// First country named `name` in any coalition.
    #[must_use]
    pub fn country_by_name(&self, name: &str) -> Option<&Country> {
        self.coalitions
            .values()
            .find_map(|coalition| coalition.country(name))
    }

    pub fn country_by_name_mut(&mut self, name: &str) -> Option<&mut Country> {
        self.coalitions
            .values_mut()
            .find_map(|coalition| coalition.country_mut(name))
    }

    fn groups(&self) -> impl Iterator<Item = &Group> {
        self.coalitions
            .values()
            .flat_map(Coalition::countries)
            .flat_map(Country::all_groups)
    }

    /// One past the largest group id in the mission.
    #[must_use]
    pub fn next_group_id(&self) -> i64 {
        self.groups().map(|group| group.id).max().unwrap_or(0) + 1
    }

    /// One past the largest unit id in the mission.
    #[must_use]
    pub fn next_unit_id(&self) -> i64 {
        self.groups()
            .flat_map(Group::units)
            .map(|unit| unit.id)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Total group and unit counts across all coalitions.
    #[must_use]
    pub fn counts(&self) -> (usize, usize) {
        self.groups()
            .fold((0, 0), |(groups, units), group| (groups + 1, units + group.units().len()))
    }
}
