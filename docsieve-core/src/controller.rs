//! The filter controller: registered dropdowns, visibility computation, and
//! badge annotation.

use crate::dropdown::{Dropdown, DropdownError};
use crate::page::{Element, Page, PathSegment};
use crate::tag::{self, RecognizedTag, Selection, TagCatalog, VersionTag};
use docsieve_types::{DropdownName, FilterEvent};
use thiserror::Error;
use tracing::{debug, warn};

/// Class marking an element as eligible for hiding
pub const DEFAULT_MARKER_CLASS: &str = "hideable";

/// Class on injected badge containers
pub const BADGE_CONTAINER_CLASS: &str = "filtertags";

/// Class on every injected badge
pub const BADGE_CLASS: &str = "filtertag";

/// Additional class on version badges
pub const VERSION_BADGE_CLASS: &str = "versiontag";

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("No selection control named '{0}' on the page")]
    DropdownNotFound(String),

    #[error("Dropdown '{0}' is not registered")]
    NotRegistered(String),

    #[error(transparent)]
    Dropdown(#[from] DropdownError),
}

struct Registered {
    dropdown: Dropdown,
    catalog: Option<TagCatalog>,
}

/// Owns the registered dropdowns for one page and computes which hideable
/// elements stay visible.
///
/// One controller per page model; `register` may be called repeatedly for
/// independent dropdowns. All operations are synchronous and re-read the
/// committed dropdown values at call time, so a computation never observes
/// stale state.
pub struct FilterController {
    registered: Vec<Registered>,
    marker_class: String,
    page_url: Option<String>,
}

impl FilterController {
    pub fn new() -> Self {
        FilterController {
            registered: Vec::new(),
            marker_class: DEFAULT_MARKER_CLASS.to_string(),
            page_url: None,
        }
    }

    /// Override the marker class (default `hideable`)
    pub fn with_marker_class(mut self, class: impl Into<String>) -> Self {
        self.marker_class = class.into();
        self
    }

    /// Set the page URL used for version-badge links
    pub fn with_page_url(mut self, url: impl Into<String>) -> Self {
        self.page_url = Some(url.into());
        self
    }

    pub fn marker_class(&self) -> &str {
        &self.marker_class
    }

    /// Registered dropdowns with their committed values, in registration order
    pub fn selections(&self) -> Vec<(DropdownName, String)> {
        self.registered
            .iter()
            .map(|r| (r.dropdown.name().clone(), r.dropdown.value().to_string()))
            .collect()
    }

    pub fn dropdown(&self, name: &str) -> Option<&Dropdown> {
        self.registered
            .iter()
            .map(|r| &r.dropdown)
            .find(|d| d.name().as_str() == name)
    }

    /// Register the selection control named `name`.
    ///
    /// When `annotate` and `catalog` are both given, the page is scanned for
    /// elements to mark hideable and decorate with clickable tag badges; see
    /// [`FilterController::annotate`]. A missing control aborts registration
    /// for this dropdown only; previously registered dropdowns are untouched.
    pub fn register(
        &mut self,
        page: &mut Page,
        name: &str,
        annotate: Option<&str>,
        catalog: Option<TagCatalog>,
    ) -> Result<(), FilterError> {
        let control = page
            .find_control(name)
            .ok_or_else(|| FilterError::DropdownNotFound(name.to_string()))?;
        let dropdown = Dropdown::from_control(control)?;

        debug!(
            dropdown = name,
            options = dropdown.options().len(),
            "registered filter dropdown"
        );

        if let (Some(path), Some(catalog)) = (annotate, catalog.as_ref()) {
            self.annotate(page, &dropdown, path, catalog);
        }

        // Re-registration refreshes the existing slot instead of appending.
        let slot = Registered { dropdown, catalog };
        match self
            .registered
            .iter()
            .position(|r| r.dropdown.name().as_str() == name)
        {
            Some(i) => self.registered[i] = slot,
            None => self.registered.push(slot),
        }
        Ok(())
    }

    /// Scan the page for annotate-target matches and inject badge containers.
    ///
    /// The first path segment selects the hideable candidates (their class
    /// lists are checked against the catalog); the remaining segments locate
    /// the badge-insertion element inside each candidate, nearest descendant
    /// first. Candidates whose path does not resolve are skipped silently.
    pub fn annotate(&self, page: &mut Page, dropdown: &Dropdown, path: &str, catalog: &TagCatalog) {
        let Some(segments) = PathSegment::parse_path(path) else {
            warn!(dropdown = %dropdown.name(), path, "malformed annotate path, skipping");
            return;
        };
        let (first, rest) = match segments.split_first() {
            Some(parts) => parts,
            None => return,
        };

        for candidate_path in page.find_matching(first) {
            let Some(candidate) = page.element_at(&candidate_path) else {
                continue;
            };

            let tags = catalog.recognized_tags(&candidate.classes);
            if tags.is_empty() {
                continue;
            }

            // Resolve the insertion point relative to the candidate.
            let mut relative: Vec<usize> = Vec::new();
            let mut cursor = candidate;
            let mut resolved = true;
            for segment in rest {
                match cursor.nearest_descendant(segment) {
                    Some(step) => {
                        cursor = match cursor.descendant_at(&step) {
                            Some(next) => next,
                            None => {
                                resolved = false;
                                break;
                            }
                        };
                        relative.extend(step);
                    }
                    None => {
                        resolved = false;
                        break;
                    }
                }
            }
            if !resolved {
                debug!(
                    dropdown = %dropdown.name(),
                    path,
                    "annotate path unresolved for candidate, skipping"
                );
                continue;
            }

            if let Some(root) = page.element_at_mut(&candidate_path) {
                root.add_class(&self.marker_class);
            }

            let mut target_path = candidate_path.clone();
            target_path.extend(relative);
            let Some(target) = page.element_at_mut(&target_path) else {
                continue;
            };

            // One container per dropdown; repeated annotation is a no-op.
            let already_annotated = target.children.iter().any(|child| {
                child.has_class(BADGE_CONTAINER_CLASS)
                    && child.name.as_deref() == Some(dropdown.name().as_str())
            });
            if already_annotated {
                continue;
            }

            target.children.push(self.badge_container(dropdown, &tags));
        }
    }

    fn badge_container(&self, dropdown: &Dropdown, tags: &[RecognizedTag]) -> Element {
        let mut container = Element::new("div");
        container.classes = vec![BADGE_CONTAINER_CLASS.to_string()];
        container.name = Some(dropdown.name().as_str().to_string());
        container.children = tags
            .iter()
            .map(|tag| self.badge(dropdown, tag))
            .collect();
        container
    }

    fn badge(&self, dropdown: &Dropdown, tag: &RecognizedTag) -> Element {
        let mut badge = match tag {
            RecognizedTag::Literal { .. } => {
                let mut el = Element::new("button");
                el.classes = vec![BADGE_CLASS.to_string()];
                el
            }
            RecognizedTag::Version(version) => {
                let mut el = Element::new("a");
                el.classes = vec![BADGE_CLASS.to_string(), VERSION_BADGE_CLASS.to_string()];
                el.href = Some(self.version_href(version));
                el
            }
        };
        badge.name = Some(dropdown.name().as_str().to_string());
        badge.value = Some(tag.value());
        badge.label = Some(tag.label());
        badge
    }

    fn version_href(&self, version: &VersionTag) -> String {
        match &self.page_url {
            Some(url) => tag::share_url(url, version),
            None => format!("?v={}", version.token()),
        }
    }

    /// Recompute the hidden flag of every hideable element from the current
    /// dropdown values.
    ///
    /// With no active constraint everything is visible. Otherwise an element
    /// stays visible iff it carries at least one negated tag's class, or the
    /// positive set is non-empty and it carries every positive class.
    pub fn compute_visibility(&self, page: &mut Page) {
        let mut positives: Vec<String> = Vec::new();
        let mut negatives: Vec<String> = Vec::new();
        for registered in &self.registered {
            match registered.dropdown.selection() {
                Selection::All => {}
                Selection::Tag(tag) => positives.push(tag),
                Selection::Exclude(tag) => negatives.push(tag),
            }
        }

        let unconstrained = positives.is_empty() && negatives.is_empty();
        let marker = self.marker_class.clone();
        page.visit_mut(&mut |el| {
            if !el.has_class(&marker) {
                return;
            }
            el.hidden = if unconstrained {
                false
            } else {
                let negative_hit = negatives.iter().any(|t| el.has_class(t));
                let positive_hit =
                    !positives.is_empty() && positives.iter().all(|t| el.has_class(t));
                !(negative_hit || positive_hit)
            };
        });
    }

    /// Commit a new value for a registered dropdown and recompute visibility.
    ///
    /// This is the change-event path; badge clicks funnel through it too.
    pub fn select(&mut self, page: &mut Page, name: &str, value: &str) -> Result<(), FilterError> {
        let registered = self
            .registered
            .iter_mut()
            .find(|r| r.dropdown.name().as_str() == name)
            .ok_or_else(|| FilterError::NotRegistered(name.to_string()))?;
        registered.dropdown.set_value(value)?;

        self.compute_visibility(page);
        Ok(())
    }

    /// Apply one filter event
    pub fn handle_event(&mut self, page: &mut Page, event: &FilterEvent) -> Result<(), FilterError> {
        match event {
            FilterEvent::SelectionChanged { dropdown, value }
            | FilterEvent::BadgeClicked { dropdown, value } => {
                self.select(page, dropdown.as_str(), value)
            }
            FilterEvent::QueryPreselect { query_value } => {
                self.preselect_version(query_value);
                self.compute_visibility(page);
                Ok(())
            }
        }
    }

    /// Compute initial visibility, preselecting a version from the page URL.
    ///
    /// If the URL carries a well-formed `v` parameter and a registered
    /// dropdown both declares a `versions` catalog entry and offers that
    /// option, the value is committed first. Visibility is recomputed either
    /// way, so dropdown defaults apply when the parameter is absent or
    /// unusable.
    pub fn initialize_from_url(&mut self, page: &mut Page, page_url: &str) {
        if let Some(raw) = tag::version_param(page_url) {
            self.preselect_version(&raw);
        }
        self.compute_visibility(page);
    }

    fn preselect_version(&mut self, raw: &str) {
        let Some(version) = VersionTag::from_token(raw) else {
            debug!(value = raw, "ignoring malformed version parameter");
            return;
        };
        let token = version.token();

        let slot = self.registered.iter_mut().find(|r| {
            r.catalog.as_ref().is_some_and(|c| c.has_versions()) && r.dropdown.offers(&token)
        });
        match slot {
            Some(registered) => {
                // Membership was checked above.
                let _ = registered.dropdown.set_value(&token);
            }
            None => debug!(token = %token, "no registered dropdown offers this version"),
        }
    }
}

impl Default for FilterController {
    fn default() -> Self {
        Self::new()
    }
}
