//! CLI command implementations.

pub mod annotate;
pub mod apply;
pub mod init;
pub mod tags;
pub mod verify;

pub use annotate::annotate_page;
pub use apply::{apply_filters, ApplyOptions};
pub use init::init_project;
pub use tags::list_tags;
pub use verify::verify_setup;

use docsieve_core::{Config, FilterController, FilterError, Page};

/// Register every configured dropdown, continuing past per-dropdown failures.
///
/// A missing selection control aborts setup for that dropdown only; the
/// remaining registrations proceed.
pub(crate) fn register_filters(controller: &mut FilterController, page: &mut Page, config: &Config) {
    for spec in &config.filters {
        let result = controller.register(
            page,
            &spec.dropdown,
            spec.annotate.as_deref(),
            spec.catalog(),
        );
        match result {
            Ok(()) => {}
            Err(FilterError::DropdownNotFound(name)) => {
                eprintln!("⚠️  No selection control named '{}'; skipping", name);
            }
            Err(err) => {
                eprintln!("⚠️  Failed to register '{}': {}", spec.dropdown, err);
            }
        }
    }
}
