//! `.miz` archive reading

use super::{
    DEFAULT_LANG, DICTIONARY_ENTRY, MISSION_ENTRY, MizTables, OPTIONS_ENTRY, WAREHOUSES_ENTRY,
};
use crate::error::{Error, Result};
use crate::formats::lua::{Table, Value, decode};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use tracing::{debug, info};
use zip::ZipArchive;
use zip::result::ZipError;

/// Read a `.miz` archive from disk
///
/// # Errors
/// Returns [`Error::Io`] or [`Error::Zip`] if the container cannot be read,
/// [`Error::MissingArchiveEntry`] if a required entry is absent and
/// [`Error::LuaSyntax`] if an entry is not valid table-literal text.
pub fn read_miz<P: AsRef<Path>>(path: P) -> Result<MizTables> {
    let path = path.as_ref();
    info!("Reading mission archive {}", path.display());
    let file = File::open(path)?;
    MizTables::from_reader(BufReader::new(file))
}

impl MizTables {
    /// Read the four required entries from any zip source.
    ///
    /// The archive handle lives only for the duration of this call.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let mission = read_table(&mut archive, MISSION_ENTRY, "mission")?;
        let options = read_table(&mut archive, OPTIONS_ENTRY, "options")?;
        let warehouses = read_table(&mut archive, WAREHOUSES_ENTRY, "warehouses")?;
        let dictionary = read_table(&mut archive, DICTIONARY_ENTRY, "dictionary")?;

        let mut other_languages: Vec<String> = archive
            .file_names()
            .filter_map(|name| name.strip_prefix("l10n/")?.strip_suffix("/dictionary"))
            .filter(|lang| *lang != DEFAULT_LANG)
            .map(String::from)
            .collect();
        other_languages.sort();

        Ok(MizTables {
            mission,
            options,
            warehouses,
            dictionary,
            other_languages,
        })
    }
}

fn read_table<R: Read + Seek>(archive: &mut ZipArchive<R>, entry: &str, root: &str) -> Result<Table> {
    let mut file = match archive.by_name(entry) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Err(Error::MissingArchiveEntry(entry.to_string())),
        Err(err) => return Err(err.into()),
    };

    let mut bytes = Vec::with_capacity(usize::try_from(file.size()).unwrap_or_default());
    file.read_to_end(&mut bytes)?;
    let text = String::from_utf8(bytes)?;
    debug!("Decoding archive entry {entry} ({} bytes)", text.len());

    let mut decoded = decode(text.trim_start_matches('\u{feff}'))?;
    match decoded.remove(root) {
        Some(Value::Table(table)) => Ok(table),
        Some(other) => Err(Error::structural(
            root,
            format!("expected table, found {}", other.type_name()),
        )),
        None => Err(Error::structural(root, "missing root assignment")),
    }
}
