//! Tags command implementation.

use anyhow::{Context, Result};
use docsieve_core::{Config, Page};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct TagRow {
    dropdown: String,
    value: String,
    label: String,
    occurrences: usize,
}

/// List every filter tag a configured catalog recognizes on the page
pub fn list_tags(config_path: &Path, json: bool) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let page = Page::from_file(config.page_path()).with_context(|| {
        format!("Failed to load page model {:?}", config.page_path())
    })?;

    let mut rows: Vec<TagRow> = Vec::new();
    for spec in &config.filters {
        let Some(catalog) = spec.catalog() else {
            continue;
        };
        page.visit(&mut |el| {
            for tag in catalog.recognized_tags(&el.classes) {
                let value = tag.value();
                match rows
                    .iter_mut()
                    .find(|r| r.dropdown == spec.dropdown && r.value == value)
                {
                    Some(row) => row.occurrences += 1,
                    None => rows.push(TagRow {
                        dropdown: spec.dropdown.clone(),
                        value,
                        label: tag.label(),
                        occurrences: 1,
                    }),
                }
            }
        });
    }

    if json {
        let payload = serde_json::to_string_pretty(&rows)?;
        println!("{payload}");
        return Ok(());
    }

    if rows.is_empty() {
        println!("No recognized filter tags on the page.");
        return Ok(());
    }

    println!("\n🏷️  {} recognized filter tags:\n", rows.len());
    for row in &rows {
        println!(
            "  [{}] {} ({}): {} element{}",
            row.dropdown,
            row.value,
            row.label,
            row.occurrences,
            if row.occurrences == 1 { "" } else { "s" }
        );
    }

    Ok(())
}
