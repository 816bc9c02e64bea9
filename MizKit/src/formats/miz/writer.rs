//! `.miz` archive writing

use super::MizTables;
use crate::error::Result;
use crate::formats::lua::encode_table;
use std::io::{Seek, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Write a `.miz` archive to disk
///
/// The archive is assembled in a temporary file next to `path` and moved
/// into place only once complete, so a failed write leaves any existing
/// file untouched.
///
/// # Errors
/// Returns an error if the temporary file cannot be created, the archive
/// cannot be written or the final rename fails.
pub fn write_miz<P: AsRef<Path>>(path: P, tables: &MizTables) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(dir)?;
    tables.write_to(temp.as_file_mut())?;
    temp.persist(path)?;

    info!("Wrote mission archive {}", path.display());
    Ok(())
}

impl MizTables {
    /// Write all four entries as a deflated zip into `writer`.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (entry, root, table) in self.entries() {
            zip.start_file(entry, options)?;
            zip.write_all(encode_table(table, root).as_bytes())?;
        }

        Ok(zip.finish()?)
    }
}
