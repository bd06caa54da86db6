//! # docsieve-core
//!
//! Core library for the docsieve page filtering engine.
//!
//! This crate provides the building blocks for filtering documentation page
//! sections by tag or version: a serde-backed page model, dropdown state,
//! tag catalogs, and the filter controller that computes visibility.

pub mod config;
pub mod controller;
pub mod dropdown;
pub mod page;
pub mod report;
pub mod tag;

pub use config::{Config, ConfigError, FilterSpec};
pub use controller::{FilterController, FilterError};
pub use dropdown::{Dropdown, DropdownError};
pub use page::{Element, Page, PageError, PathSegment};
pub use report::{ElementRef, SelectionEntry, VisibilityReport};
pub use tag::{CatalogEntry, RecognizedTag, Selection, TagCatalog, VersionTag};
