//! CLI command for mission summaries

use std::path::Path;

use crate::formats::miz::DEFAULT_LANG;
use crate::mission::{GroupCategory, ImportOptions, Mission};

/// Print theatre, sortie and per-coalition counts
pub fn execute(path: &Path, options: ImportOptions) -> anyhow::Result<()> {
    let mission = Mission::load_file(path, options)?;

    println!("File: {}", path.display());
    println!("Theatre: {}", mission.theatre);
    println!("Version: {}", mission.version);
    // An unresolvable sortie id is not fatal for a summary
    match mission.sortie.text() {
        Ok(text) => println!("Sortie: {text}"),
        Err(_) => println!("Sortie: <{}>", mission.sortie.id()),
    }
    println!(
        "Dictionary: {} strings (max id {})",
        mission.translation().len(DEFAULT_LANG),
        mission.translation().max_dict_id()
    );

    for (name, coalition) in mission.coalitions() {
        println!();
        println!("Coalition {name}: {} countries", coalition.countries().len());
        for country in coalition.countries() {
            let counts: Vec<String> = GroupCategory::ALL
                .into_iter()
                .map(|category| format!("{} {category}", country.groups(category).len()))
                .collect();
            println!(
                "  {} (id {}): {} groups, {} units",
                country.name,
                country.id,
                counts.join(", "),
                country.unit_count()
            );
        }
    }

    if !mission.unsupported().is_empty() {
        println!();
        println!("Unsupported content ({}):", mission.unsupported().len());
        for item in mission.unsupported() {
            println!("  {}: {}", item.path, item.feature);
        }
    }

    Ok(())
}
