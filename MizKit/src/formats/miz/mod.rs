//! `.miz` mission archive container
//!
//! A mission archive is a zip file with four required text entries, each a
//! table-literal document. [`MizTables`] holds them decoded, with the root
//! assignment already unwrapped.

mod reader;
mod writer;

pub use reader::read_miz;
pub use writer::write_miz;

use crate::formats::lua::Table;

/// Archive entry holding the mission table.
pub const MISSION_ENTRY: &str = "mission";
/// Archive entry holding the options table.
pub const OPTIONS_ENTRY: &str = "options";
/// Archive entry holding the warehouses table.
pub const WAREHOUSES_ENTRY: &str = "warehouses";
/// Archive entry holding the default-language dictionary.
pub const DICTIONARY_ENTRY: &str = "l10n/DEFAULT/dictionary";

/// Language every mission carries a dictionary for.
pub const DEFAULT_LANG: &str = "DEFAULT";

/// The decoded tables of one mission archive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MizTables {
    /// Contents of `mission = { ... }`.
    pub mission: Table,
    /// Contents of `options = { ... }`.
    pub options: Table,
    /// Contents of `warehouses = { ... }`.
    pub warehouses: Table,
    /// Contents of `dictionary = { ... }` for the DEFAULT language.
    pub dictionary: Table,
    /// Languages other than DEFAULT that ship a dictionary in the archive.
    pub other_languages: Vec<String>,
}

impl MizTables {
    /// `(entry name, root name, table)` for every entry written to an archive.
    fn entries(&self) -> [(&'static str, &'static str, &Table); 4] {
        [
            (MISSION_ENTRY, "mission", &self.mission),
            (OPTIONS_ENTRY, "options", &self.options),
            (WAREHOUSES_ENTRY, "warehouses", &self.warehouses),
            (DICTIONARY_ENTRY, "dictionary", &self.dictionary),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::formats::lua::Value;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn sample() -> MizTables {
        let mut tables = MizTables::default();
        tables.mission.insert("version", 9);
        tables.mission.insert("sortie", "DictKey_sortie_1");
        tables.options.insert("difficulty", Table::new());
        tables.dictionary.insert("DictKey_sortie_1", "Hello\nWorld");
        tables
    }

    #[test]
    fn test_archive_round_trip_in_memory() {
        let tables = sample();
        let cursor = tables.write_to(Cursor::new(Vec::new())).unwrap();
        let back = MizTables::from_reader(Cursor::new(cursor.into_inner())).unwrap();
        assert_eq!(back, tables);
    }

    #[test]
    fn test_missing_entry_is_reported() {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file(MISSION_ENTRY, SimpleFileOptions::default()).unwrap();
        zip.write_all(b"mission = { [\"version\"] = 9 }").unwrap();
        let cursor = zip.finish().unwrap();

        let err = MizTables::from_reader(Cursor::new(cursor.into_inner())).unwrap_err();
        assert!(matches!(err, Error::MissingArchiveEntry(ref name) if name == OPTIONS_ENTRY));
    }

    #[test]
    fn test_other_languages_are_listed() {
        let tables = sample();
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (entry, root, table) in tables.entries() {
            zip.start_file(entry, SimpleFileOptions::default()).unwrap();
            zip.write_all(crate::formats::lua::encode_table(table, root).as_bytes())
                .unwrap();
        }
        zip.start_file("l10n/RU/dictionary", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"dictionary = {}").unwrap();
        let cursor = zip.finish().unwrap();

        let back = MizTables::from_reader(Cursor::new(cursor.into_inner())).unwrap();
        assert_eq!(back.other_languages, vec!["RU".to_string()]);
        assert_eq!(back.mission.get("version"), Some(&Value::Int(9)));
    }

    #[test]
    fn test_write_miz_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.miz");
        let tables = sample();
        write_miz(&path, &tables).unwrap();
        assert_eq!(read_miz(&path).unwrap(), tables);
    }
}
