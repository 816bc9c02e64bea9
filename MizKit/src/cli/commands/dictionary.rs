//! CLI command for listing dictionary strings

use std::path::Path;

use crate::formats::miz::read_miz;

/// List dictionary entries, optionally filtered by id or text
pub fn execute(path: &Path, search: Option<&str>, limit: usize) -> anyhow::Result<()> {
    let tables = read_miz(path)?;
    let query = search.map(str::to_lowercase);

    let matches: Vec<(String, &str)> = tables
        .dictionary
        .sorted_entries()
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.as_str().unwrap_or_default()))
        .filter(|(id, text)| {
            query.as_deref().is_none_or(|query| {
                id.to_lowercase().contains(query) || text.to_lowercase().contains(query)
            })
        })
        .collect();

    if matches.is_empty() {
        println!("No dictionary entries found");
        return Ok(());
    }

    for (id, text) in matches.iter().take(limit) {
        println!("{id} = {}", text.replace('\n', "\\n"));
    }
    if matches.len() > limit {
        println!("... and {} more", matches.len() - limit);
    }

    Ok(())
}
