//! Page model: a serde-backed element tree standing in for the rendered page.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Failed to read page file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML page model: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON page model: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unsupported page file extension: {0}")]
    UnsupportedExtension(String),
}

/// A single element in the page tree.
///
/// This is a deliberately small slice of an HTML element: tag name, the
/// attributes the filter engine reads (`id`, `name`, `class`), the fields
/// badge injection writes (`value`, `label`, `href`), and children. The
/// `hidden` flag is what filtering toggles; elements are never removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,

    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub classes: Vec<String>,

    #[serde(default)]
    pub value: Option<String>,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub href: Option<String>,

    /// Marks the selected option inside a `select` control
    #[serde(default)]
    pub selected: bool,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default)]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class unless it is already present
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn matches(&self, segment: &PathSegment) -> bool {
        if let Some(tag) = &segment.tag {
            if &self.tag != tag {
                return false;
            }
        }
        if let Some(class) = &segment.class {
            if !self.has_class(class) {
                return false;
            }
        }
        true
    }

    /// Depth-first visit of this element and all descendants, document order
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Element)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }

    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }

    /// Child-index path of the nearest descendant matching `segment`.
    ///
    /// Breadth-first, so the shallowest match wins; ties resolve in document
    /// order. The element itself is not a candidate.
    pub fn nearest_descendant(&self, segment: &PathSegment) -> Option<Vec<usize>> {
        let mut queue: Vec<(Vec<usize>, &Element)> = self
            .children
            .iter()
            .enumerate()
            .map(|(i, c)| (vec![i], c))
            .collect();

        let mut cursor = 0;
        while cursor < queue.len() {
            let (path, element) = (queue[cursor].0.clone(), queue[cursor].1);
            if element.matches(segment) {
                return Some(path);
            }
            for (i, child) in element.children.iter().enumerate() {
                let mut child_path = path.clone();
                child_path.push(i);
                queue.push((child_path, child));
            }
            cursor += 1;
        }
        None
    }

    /// Resolve a child-index path relative to this element
    pub fn descendant_at(&self, path: &[usize]) -> Option<&Element> {
        let mut current = self;
        for &index in path {
            current = current.children.get(index)?;
        }
        Some(current)
    }

    pub fn descendant_at_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let mut current = self;
        for &index in path {
            current = current.children.get_mut(index)?;
        }
        Some(current)
    }
}

/// One segment of a `/`-separated annotate-target path.
///
/// Accepted forms: `tag`, `.class`, `tag.class`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub tag: Option<String>,
    pub class: Option<String>,
}

impl PathSegment {
    /// Parse a single segment; returns `None` for malformed input
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let (tag, class) = match raw.split_once('.') {
            Some((tag, class)) => {
                if class.is_empty() || class.contains('.') {
                    return None;
                }
                (tag, Some(class.to_string()))
            }
            None => (raw, None),
        };

        let tag = if tag.is_empty() {
            // ".class" form
            class.as_ref()?;
            None
        } else {
            if !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return None;
            }
            Some(tag.to_string())
        };

        Some(PathSegment { tag, class })
    }

    /// Parse a full `/`-separated path; `None` if any segment is malformed
    pub fn parse_path(raw: &str) -> Option<Vec<Self>> {
        let segments: Vec<Self> = raw
            .split('/')
            .filter(|s| !s.trim().is_empty())
            .map(Self::parse)
            .collect::<Option<Vec<_>>>()?;
        if segments.is_empty() {
            None
        } else {
            Some(segments)
        }
    }
}

/// The whole page: an ordered forest of root elements
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Page {
    /// Load a page model from a `.yml`/`.yaml` or `.json` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PageError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        match extension {
            "yml" | "yaml" => Ok(serde_yaml::from_str(&contents)?),
            "json" => Ok(serde_json::from_str(&contents)?),
            other => Err(PageError::UnsupportedExtension(other.to_string())),
        }
    }

    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Element)) {
        for element in &self.elements {
            element.visit(f);
        }
    }

    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        for element in &mut self.elements {
            element.visit_mut(f);
        }
    }

    /// Find the selection control with the given `name` attribute
    pub fn find_control(&self, name: &str) -> Option<&Element> {
        let mut found = None;
        self.visit(&mut |el| {
            if found.is_none() && el.tag == "select" && el.name.as_deref() == Some(name) {
                found = Some(el);
            }
        });
        found
    }

    /// Child-index paths (from the root forest) of every element matching
    /// `segment`, in document order
    pub fn find_matching(&self, segment: &PathSegment) -> Vec<Vec<usize>> {
        let mut paths = Vec::new();
        for (i, element) in self.elements.iter().enumerate() {
            collect_matching(element, segment, &mut vec![i], &mut paths);
        }
        paths
    }

    pub fn element_at(&self, path: &[usize]) -> Option<&Element> {
        let (&first, rest) = path.split_first()?;
        self.elements.get(first)?.descendant_at(rest)
    }

    pub fn element_at_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let (&first, rest) = path.split_first()?;
        self.elements.get_mut(first)?.descendant_at_mut(rest)
    }
}

fn collect_matching(
    element: &Element,
    segment: &PathSegment,
    path: &mut Vec<usize>,
    out: &mut Vec<Vec<usize>>,
) {
    if element.matches(segment) {
        out.push(path.clone());
    }
    for (i, child) in element.children.iter().enumerate() {
        path.push(i);
        collect_matching(child, segment, path, out);
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> Page {
        serde_yaml::from_str(
            r#"
elements:
  - tag: section
    id: intro
    classes: [doc-section, linux]
    children:
      - tag: h2
        classes: [heading]
      - tag: p
  - tag: section
    id: advanced
    classes: [doc-section]
    children:
      - tag: div
        children:
          - tag: h2
            classes: [heading]
  - tag: select
    name: platform
    children:
      - tag: option
        value: all
      - tag: option
        value: linux
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_segment_parsing() {
        assert_eq!(
            PathSegment::parse("section"),
            Some(PathSegment {
                tag: Some("section".into()),
                class: None
            })
        );
        assert_eq!(
            PathSegment::parse(".doc-section"),
            Some(PathSegment {
                tag: None,
                class: Some("doc-section".into())
            })
        );
        assert_eq!(
            PathSegment::parse("section.doc-section"),
            Some(PathSegment {
                tag: Some("section".into()),
                class: Some("doc-section".into())
            })
        );
        assert_eq!(PathSegment::parse(""), None);
        assert_eq!(PathSegment::parse("a.b.c"), None);
        assert_eq!(PathSegment::parse("bad tag"), None);
    }

    #[test]
    fn test_parse_path() {
        let path = PathSegment::parse_path("section.doc-section/h2").unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path[1].tag.as_deref(), Some("h2"));

        assert!(PathSegment::parse_path("").is_none());
        assert!(PathSegment::parse_path("section/..bad").is_none());
    }

    #[test]
    fn test_find_control() {
        let page = sample_page();
        let control = page.find_control("platform").unwrap();
        assert_eq!(control.children.len(), 2);
        assert!(page.find_control("missing").is_none());
    }

    #[test]
    fn test_find_matching_document_order() {
        let page = sample_page();
        let seg = PathSegment::parse(".doc-section").unwrap();
        let paths = page.find_matching(&seg);
        assert_eq!(paths, vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_nearest_descendant_prefers_shallow_match() {
        let page = sample_page();
        let seg = PathSegment::parse("h2").unwrap();

        // First section: h2 is a direct child.
        let first = page.element_at(&[0]).unwrap();
        assert_eq!(first.nearest_descendant(&seg), Some(vec![0]));

        // Second section: h2 is nested one level down.
        let second = page.element_at(&[1]).unwrap();
        assert_eq!(second.nearest_descendant(&seg), Some(vec![0, 0]));

        // No match anywhere.
        let missing = PathSegment::parse("table").unwrap();
        assert!(first.nearest_descendant(&missing).is_none());
    }

    #[test]
    fn test_add_class_is_idempotent() {
        let mut el = Element::new("section");
        el.add_class("hideable");
        el.add_class("hideable");
        assert_eq!(el.classes, vec!["hideable"]);
    }

    #[test]
    fn test_element_at_mut_roundtrip() {
        let mut page = sample_page();
        page.element_at_mut(&[1, 0, 0]).unwrap().add_class("deep");
        assert!(page.element_at(&[1, 0, 0]).unwrap().has_class("deep"));
        assert!(page.element_at(&[9]).is_none());
    }

    #[test]
    fn test_from_file_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.txt");
        std::fs::write(&path, "elements: []").unwrap();
        assert!(matches!(
            Page::from_file(&path),
            Err(PageError::UnsupportedExtension(_))
        ));
    }
}
