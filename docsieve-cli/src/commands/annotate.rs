//! Annotate command implementation.

use crate::PageFormat;
use anyhow::{Context, Result};
use docsieve_core::{Config, FilterController, Page};
use std::fs;
use std::path::Path;

/// Run the annotation pass and emit the badge-augmented page model
pub fn annotate_page(config_path: &Path, output: Option<&Path>, format: PageFormat) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let mut page = Page::from_file(config.page_path()).with_context(|| {
        format!("Failed to load page model {:?}", config.page_path())
    })?;

    let mut controller = FilterController::new().with_marker_class(config.marker_class.clone());
    if let Some(url) = &config.url {
        controller = controller.with_page_url(url.clone());
    }

    super::register_filters(&mut controller, &mut page, &config);

    let rendered = match format {
        PageFormat::Yaml => serde_yaml::to_string(&page)?,
        PageFormat::Json => serde_json::to_string_pretty(&page)?,
    };

    match output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {:?}", path))?;
            println!("✓ Annotated page model written to {:?}", path);
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
