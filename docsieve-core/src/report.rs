//! Visibility reports consumed by the CLI's text and JSON outputs.

use crate::controller::FilterController;
use crate::page::Page;
use serde::{Deserialize, Serialize};

/// A lightweight reference to a page element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementRef {
    #[serde(default)]
    pub id: Option<String>,
    pub tag: String,
    pub classes: Vec<String>,
}

impl ElementRef {
    /// Human-readable handle: the id if present, otherwise tag plus classes
    pub fn describe(&self) -> String {
        match &self.id {
            Some(id) => format!("#{}", id),
            None => {
                if self.classes.is_empty() {
                    self.tag.clone()
                } else {
                    format!("{}.{}", self.tag, self.classes.join("."))
                }
            }
        }
    }
}

/// Committed selection of one dropdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub dropdown: String,
    pub value: String,
}

/// Snapshot of the filter outcome: selections plus the visible/hidden split
/// of the hideable elements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityReport {
    pub selections: Vec<SelectionEntry>,
    pub visible: Vec<ElementRef>,
    pub hidden: Vec<ElementRef>,
}

impl VisibilityReport {
    /// Collect a report from a controller and the page it filtered
    pub fn collect(controller: &FilterController, page: &Page) -> Self {
        let selections = controller
            .selections()
            .into_iter()
            .map(|(dropdown, value)| SelectionEntry {
                dropdown: dropdown.as_str().to_string(),
                value,
            })
            .collect();

        let marker = controller.marker_class();
        let mut visible = Vec::new();
        let mut hidden = Vec::new();
        page.visit(&mut |el| {
            if !el.has_class(marker) {
                return;
            }
            let entry = ElementRef {
                id: el.id.clone(),
                tag: el.tag.clone(),
                classes: el.classes.clone(),
            };
            if el.hidden {
                hidden.push(entry);
            } else {
                visible.push(entry);
            }
        });

        VisibilityReport {
            selections,
            visible,
            hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::TagCatalog;

    #[test]
    fn test_collect_splits_by_hidden_flag() {
        let mut page: Page = serde_yaml::from_str(
            r#"
elements:
  - tag: select
    name: platform
    children:
      - tag: option
        value: all
      - tag: option
        value: linux
  - tag: section
    id: a
    classes: [hideable, linux]
  - tag: section
    id: b
    classes: [hideable, windows]
  - tag: section
    classes: [plain]
"#,
        )
        .unwrap();

        let mut controller = FilterController::new();
        controller
            .register(
                &mut page,
                "platform",
                None,
                Some(TagCatalog::new().with("linux", "Linux")),
            )
            .unwrap();
        controller.select(&mut page, "platform", "linux").unwrap();

        let report = VisibilityReport::collect(&controller, &page);
        assert_eq!(report.selections.len(), 1);
        assert_eq!(report.selections[0].value, "linux");
        assert_eq!(report.visible.len(), 1);
        assert_eq!(report.visible[0].describe(), "#a");
        assert_eq!(report.hidden.len(), 1);
        assert_eq!(report.hidden[0].describe(), "#b");
    }

    #[test]
    fn test_describe_without_id() {
        let anon = ElementRef {
            id: None,
            tag: "section".into(),
            classes: vec!["hideable".into(), "linux".into()],
        };
        assert_eq!(anon.describe(), "section.hideable.linux");

        let bare = ElementRef {
            id: None,
            tag: "p".into(),
            classes: vec![],
        };
        assert_eq!(bare.describe(), "p");
    }
}
