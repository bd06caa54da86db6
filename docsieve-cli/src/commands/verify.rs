//! Verify command: check the configuration against the page model and emit
//! diagnostics.

use anyhow::{Context, Result};
use docsieve_core::tag::{is_version_token, Selection, VERSIONS_KEY};
use docsieve_core::{Config, Dropdown, Page};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Serialize)]
struct Diagnostic {
    severity: Severity,
    code: &'static str,
    dropdown: Option<String>,
    message: String,
}

#[derive(Serialize)]
struct VerificationSummary<'a> {
    filters: usize,
    hideable: usize,
    errors: usize,
    warnings: usize,
    infos: usize,
    diagnostics: &'a [Diagnostic],
}

/// Check every configured dropdown and catalog against the page model
pub fn verify_setup(config_path: &Path, json: bool) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let page = Page::from_file(config.page_path()).with_context(|| {
        format!("Failed to load page model {:?}", config.page_path())
    })?;

    let mut diagnostics = Vec::new();
    for spec in &config.filters {
        check_filter(&page, spec, &mut diagnostics);
    }

    let mut hideable = 0;
    page.visit(&mut |el| {
        if el.has_class(&config.marker_class) {
            hideable += 1;
        }
    });
    if hideable == 0 {
        diagnostics.push(Diagnostic {
            severity: Severity::Info,
            code: "no-hideable-elements",
            dropdown: None,
            message: format!(
                "no element carries the marker class '{}' yet (annotation adds it)",
                config.marker_class
            ),
        });
    }

    let count = |severity: Severity| {
        diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    };
    let summary = VerificationSummary {
        filters: config.filters.len(),
        hideable,
        errors: count(Severity::Error),
        warnings: count(Severity::Warning),
        infos: count(Severity::Info),
        diagnostics: &diagnostics,
    };

    if json {
        let payload = serde_json::to_string_pretty(&summary)?;
        println!("{}", payload);
    } else {
        println!(
            "Verification complete: {} filters, {} hideable elements, {} errors, {} warnings, {} info",
            summary.filters, summary.hideable, summary.errors, summary.warnings, summary.infos
        );
        for diag in &diagnostics {
            let dropdown = diag
                .dropdown
                .as_deref()
                .map(|d| format!(" [{}]", d))
                .unwrap_or_default();
            println!("- {:?} {}{}: {}", diag.severity, diag.code, dropdown, diag.message);
        }
    }

    Ok(())
}

fn check_filter(page: &Page, spec: &docsieve_core::FilterSpec, diagnostics: &mut Vec<Diagnostic>) {
    let Some(control) = page.find_control(&spec.dropdown) else {
        diagnostics.push(Diagnostic {
            severity: Severity::Error,
            code: "control-missing",
            dropdown: Some(spec.dropdown.clone()),
            message: format!("no selection control named '{}' on the page", spec.dropdown),
        });
        return;
    };

    let dropdown = match Dropdown::from_control(control) {
        Ok(dropdown) => dropdown,
        Err(err) => {
            diagnostics.push(Diagnostic {
                severity: Severity::Error,
                code: "control-empty",
                dropdown: Some(spec.dropdown.clone()),
                message: err.to_string(),
            });
            return;
        }
    };

    if !dropdown.offers("all") {
        diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            code: "no-all-option",
            dropdown: Some(spec.dropdown.clone()),
            message: "control offers no 'all' sentinel, filtering cannot be reset".to_string(),
        });
    }

    // Every non-sentinel option should match at least one element class.
    for option in dropdown.options() {
        let tag = match Selection::parse(option) {
            Selection::All => continue,
            Selection::Tag(tag) | Selection::Exclude(tag) => tag,
        };
        if !class_present(page, &tag) {
            diagnostics.push(Diagnostic {
                severity: Severity::Warning,
                code: "option-unmatched",
                dropdown: Some(spec.dropdown.clone()),
                message: format!("option '{}' matches no element class", option),
            });
        }
    }

    // Catalog entries that can never produce a badge.
    if let Some(catalog) = spec.catalog() {
        for entry in catalog.entries() {
            if entry.class == VERSIONS_KEY {
                let mut any_version = false;
                page.visit(&mut |el| {
                    any_version |= el.classes.iter().any(|c| is_version_token(c));
                });
                if !any_version {
                    diagnostics.push(Diagnostic {
                        severity: Severity::Warning,
                        code: "catalog-unused",
                        dropdown: Some(spec.dropdown.clone()),
                        message: "catalog declares 'versions' but no element carries a version token".to_string(),
                    });
                }
            } else if !class_present(page, &entry.class) {
                diagnostics.push(Diagnostic {
                    severity: Severity::Warning,
                    code: "catalog-unused",
                    dropdown: Some(spec.dropdown.clone()),
                    message: format!("catalog class '{}' appears on no element", entry.class),
                });
            }
        }
    }

    if spec.annotate.is_some() && spec.catalog().is_none() {
        diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            code: "annotate-without-catalog",
            dropdown: Some(spec.dropdown.clone()),
            message: "annotate path configured but the catalog is empty".to_string(),
        });
    }
}

fn class_present(page: &Page, class: &str) -> bool {
    let mut present = false;
    page.visit(&mut |el| {
        present |= el.has_class(class);
    });
    present
}
