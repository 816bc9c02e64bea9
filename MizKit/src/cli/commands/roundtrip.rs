//! CLI command for re-saving a mission through the model

use std::path::Path;

use crate::mission::{ImportOptions, Mission};

/// Load `source` into the mission model and save it to `destination`
pub fn execute(
    source: &Path,
    destination: &Path,
    options: ImportOptions,
    quiet: bool,
) -> anyhow::Result<()> {
    let mission = Mission::load_file(source, options)?;
    mission.save(destination)?;

    if !quiet {
        let (groups, units) = mission.counts();
        let coalitions = mission.coalitions().count();
        println!(
            "Wrote {} ({coalitions} coalitions, {groups} groups, {units} units)",
            destination.display()
        );
        if !mission.unsupported().is_empty() {
            println!(
                "Dropped {} unsupported item(s); run `mizkit info` on the source for details",
                mission.unsupported().len()
            );
        }
    }

    Ok(())
}
