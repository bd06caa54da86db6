//! Owned dropdown state extracted from a page's `select` controls.

use crate::page::Element;
use crate::tag::Selection;
use docsieve_types::DropdownName;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DropdownError {
    #[error("Control '{0}' has no options")]
    NoOptions(String),

    #[error("'{value}' is not an option of dropdown '{dropdown}'")]
    UnknownOption { dropdown: String, value: String },
}

/// The committed state of one registered selection control.
///
/// The page's `select` element is only the source of options and the default
/// selection; after registration this struct is the single source of truth
/// for the control's value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dropdown {
    name: DropdownName,
    options: Vec<String>,
    value: String,
}

impl Dropdown {
    /// Extract options and the default selection from a `select` element.
    ///
    /// The default is the first `option` child marked `selected`, or the
    /// first option otherwise. An option's value falls back to its label.
    pub fn from_control(control: &Element) -> Result<Self, DropdownError> {
        let name = control.name.clone().unwrap_or_default();

        let options: Vec<String> = control
            .children
            .iter()
            .filter(|child| child.tag == "option")
            .filter_map(|child| child.value.clone().or_else(|| child.label.clone()))
            .collect();

        if options.is_empty() {
            return Err(DropdownError::NoOptions(name));
        }

        let value = control
            .children
            .iter()
            .filter(|child| child.tag == "option")
            .find(|child| child.selected)
            .and_then(|child| child.value.clone().or_else(|| child.label.clone()))
            .unwrap_or_else(|| options[0].clone());

        Ok(Dropdown {
            name: DropdownName::new(name),
            options,
            value,
        })
    }

    pub fn name(&self) -> &DropdownName {
        &self.name
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn selection(&self) -> Selection {
        Selection::parse(&self.value)
    }

    /// Commit a new value; it must be one of the control's options
    pub fn set_value(&mut self, value: &str) -> Result<(), DropdownError> {
        if !self.options.iter().any(|o| o == value) {
            return Err(DropdownError::UnknownOption {
                dropdown: self.name.as_str().to_string(),
                value: value.to_string(),
            });
        }
        self.value = value.to_string();
        Ok(())
    }

    /// True if `value` is one of the control's options
    pub fn offers(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }
}
