//! Apply command implementation.

use anyhow::{bail, Context, Result};
use docsieve_core::{Config, FilterController, Page, VisibilityReport};
use docsieve_types::FilterEvent;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ApplyOptions {
    pub selections: Vec<String>,
    pub url: Option<String>,
    pub json: bool,
}

/// Register the configured filters, apply selections, and report visibility
pub fn apply_filters(config_path: &Path, opts: ApplyOptions) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let mut page = Page::from_file(config.page_path()).with_context(|| {
        format!("Failed to load page model {:?}", config.page_path())
    })?;

    let url = opts.url.clone().or_else(|| config.url.clone());

    let mut controller = FilterController::new().with_marker_class(config.marker_class.clone());
    if let Some(url) = &url {
        controller = controller.with_page_url(url.clone());
    }

    super::register_filters(&mut controller, &mut page, &config);

    // Initial visibility: URL preselection when a URL is known, dropdown
    // defaults otherwise.
    match &url {
        Some(url) => controller.initialize_from_url(&mut page, url),
        None => controller.compute_visibility(&mut page),
    }

    // Explicit selections override the initial state, in order.
    for raw in &opts.selections {
        let Some((name, value)) = raw.split_once('=') else {
            bail!("Invalid --select '{}': expected NAME=VALUE", raw);
        };
        controller
            .handle_event(
                &mut page,
                &FilterEvent::SelectionChanged {
                    dropdown: name.into(),
                    value: value.to_string(),
                },
            )
            .with_context(|| format!("Failed to apply selection '{}'", raw))?;
    }

    let report = VisibilityReport::collect(&controller, &page);

    if opts.json {
        let json = serde_json::to_string_pretty(&report)?;
        println!("{json}");
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &VisibilityReport) {
    println!(
        "\n🔍 {} visible, {} hidden of {} hideable elements\n",
        report.visible.len(),
        report.hidden.len(),
        report.visible.len() + report.hidden.len()
    );

    println!("Selections:");
    for selection in &report.selections {
        println!("  {} = {}", selection.dropdown, selection.value);
    }

    if !report.visible.is_empty() {
        println!("\nVisible:");
        for element in &report.visible {
            println!("  {}", element.describe());
        }
    }
    if !report.hidden.is_empty() {
        println!("\nHidden:");
        for element in &report.hidden {
            println!("  {}", element.describe());
        }
    }
}
