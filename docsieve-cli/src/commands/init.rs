//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# docsieve configuration
page: page.yml
url: /docs/setup.html
marker_class: hideable

filters:
  - dropdown: versions
    annotate: section.doc-section/h2
    catalog:
      - class: versions
        label: Version
  - dropdown: platform
    annotate: section.doc-section/h2
    catalog:
      - class: linux
        label: Linux
"#;

const SAMPLE_PAGE: &str = r#"# Sample page model: two dropdowns, two filterable sections
elements:
  - tag: select
    name: versions
    children:
      - tag: option
        value: all
        label: All versions
      - tag: option
        value: v2-5-0
        label: v2.5.0
      - tag: option
        value: v2-6-0
        label: v2.6.0
  - tag: select
    name: platform
    children:
      - tag: option
        value: all
        label: All platforms
      - tag: option
        value: linux
        label: Linux
      - tag: option
        value: "!linux"
        label: Everything but Linux
  - tag: section
    id: setup-linux
    classes: [doc-section, linux, v2-5-0]
    children:
      - tag: h2
        label: Setting up on Linux
      - tag: p
  - tag: section
    id: setup-macos
    classes: [doc-section, macos, v2-6-0]
    children:
      - tag: h2
        label: Setting up on macOS
      - tag: p
"#;

/// Initialize a new docsieve project
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_if_missing(&root.join("docsieve.yml"), DEFAULT_CONFIG)?;
    write_if_missing(&root.join("page.yml"), SAMPLE_PAGE)?;

    println!("✓ docsieve initialized in {:?}", root);
    println!("  - Edit docsieve.yml to point at your page model");
    println!("  - Try: docsieve apply --select platform=linux");
    Ok(())
}

fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        println!("{:?} already exists, leaving it alone", path);
        return Ok(());
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))?;
    println!("Created {:?}", path);
    Ok(())
}
