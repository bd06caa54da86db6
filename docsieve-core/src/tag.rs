//! Filter tags, version tokens, and tag catalogs.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use url::Url;

/// Dropdown value meaning "impose no constraint from this dropdown"
pub const SENTINEL_ALL: &str = "all";

/// Reserved catalog key meaning "match the version-token pattern"
pub const VERSIONS_KEY: &str = "versions";

static VERSION_REGEX: OnceLock<Regex> = OnceLock::new();

fn version_regex() -> &'static Regex {
    VERSION_REGEX.get_or_init(|| Regex::new(r"^v(\d+)-(\d+)-(\d+)$").unwrap())
}

/// A parsed dropdown value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// The `"all"` sentinel: no constraint
    All,

    /// Keep only elements carrying this class
    Tag(String),

    /// `!`-prefixed: keep visible everything carrying this class
    Exclude(String),
}

impl Selection {
    pub fn parse(raw: &str) -> Self {
        if raw == SENTINEL_ALL {
            Selection::All
        } else if let Some(stripped) = raw.strip_prefix('!') {
            Selection::Exclude(stripped.to_string())
        } else {
            Selection::Tag(raw.to_string())
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(SENTINEL_ALL),
            Selection::Tag(tag) => f.write_str(tag),
            Selection::Exclude(tag) => write!(f, "!{}", tag),
        }
    }
}

/// A version-shaped filter tag
///
/// The class-token form is `v<major>-<minor>-<patch>` (hyphens, so it is a
/// valid class name); the user-facing form is dotted, e.g. `v2.5.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VersionTag {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl VersionTag {
    /// Parse the hyphenated class-token form; `None` if the shape is wrong
    pub fn from_token(token: &str) -> Option<Self> {
        let captures = version_regex().captures(token)?;
        // The regex only admits ASCII digits; overflow is the remaining failure.
        Some(VersionTag {
            major: captures.get(1)?.as_str().parse().ok()?,
            minor: captures.get(2)?.as_str().parse().ok()?,
            patch: captures.get(3)?.as_str().parse().ok()?,
        })
    }

    /// The class-token form, `v2-5-0`
    pub fn token(&self) -> String {
        format!("v{}-{}-{}", self.major, self.minor, self.patch)
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// True if the token has the `v<major>-<minor>-<patch>` shape
pub fn is_version_token(token: &str) -> bool {
    version_regex().is_match(token)
}

/// One catalog entry: a filter class and its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub class: String,
    pub label: String,
}

/// Catalog of recognized filter tags for one dropdown.
///
/// Entries keep insertion order (badges are emitted in catalog order). The
/// reserved class `"versions"` switches that entry from literal matching to
/// the version-token pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCatalog {
    entries: Vec<CatalogEntry>,
}

impl TagCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        TagCatalog { entries }
    }

    /// Builder-style literal entry
    pub fn with(mut self, class: impl Into<String>, label: impl Into<String>) -> Self {
        self.entries.push(CatalogEntry {
            class: class.into(),
            label: label.into(),
        });
        self
    }

    /// Builder-style `"versions"` entry
    pub fn with_versions(self, label: impl Into<String>) -> Self {
        self.with(VERSIONS_KEY, label)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn has_versions(&self) -> bool {
        self.entries.iter().any(|e| e.class == VERSIONS_KEY)
    }

    pub fn label_for(&self, class: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.class == class && e.class != VERSIONS_KEY)
            .map(|e| e.label.as_str())
    }

    /// Tags recognized by this catalog within an element's class list.
    ///
    /// Scans in catalog order; a `"versions"` entry matches every
    /// version-shaped class. Unrecognized classes are ignored.
    pub fn recognized_tags(&self, classes: &[String]) -> Vec<RecognizedTag> {
        let mut tags = Vec::new();
        for entry in &self.entries {
            if entry.class == VERSIONS_KEY {
                for class in classes {
                    if let Some(version) = VersionTag::from_token(class) {
                        tags.push(RecognizedTag::Version(version));
                    }
                }
            } else if classes.iter().any(|c| c == &entry.class) {
                tags.push(RecognizedTag::Literal {
                    class: entry.class.clone(),
                    label: entry.label.clone(),
                });
            }
        }
        tags
    }
}

/// A filter tag discovered on an element through a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizedTag {
    Literal { class: String, label: String },
    Version(VersionTag),
}

impl RecognizedTag {
    /// The dropdown value a badge for this tag commits
    pub fn value(&self) -> String {
        match self {
            RecognizedTag::Literal { class, .. } => class.clone(),
            RecognizedTag::Version(version) => version.token(),
        }
    }

    /// The badge's user-facing text
    pub fn label(&self) -> String {
        match self {
            RecognizedTag::Literal { label, .. } => label.clone(),
            RecognizedTag::Version(version) => version.to_string(),
        }
    }
}

const FALLBACK_BASE: &str = "https://docsieve.invalid/";

/// Read the `v` query parameter from a page URL (absolute or site-relative)
pub fn version_param(page_url: &str) -> Option<String> {
    let url = parse_lenient(page_url)?;
    url.query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
}

/// Build a same-page link that encodes `version` as the `v` query parameter.
///
/// Every other query parameter and the fragment are preserved, so the link is
/// shareable without losing the rest of the page state. Relative inputs stay
/// relative.
pub fn share_url(page_url: &str, version: &VersionTag) -> String {
    let was_absolute = Url::parse(page_url).is_ok();
    let Some(mut url) = parse_lenient(page_url) else {
        return format!("?v={}", version.token());
    };

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "v")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("v", &version.token());

    if was_absolute {
        url.to_string()
    } else {
        let mut out = url.path().to_string();
        if let Some(query) = url.query() {
            out.push('?');
            out.push_str(query);
        }
        if let Some(fragment) = url.fragment() {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }
}

fn parse_lenient(page_url: &str) -> Option<Url> {
    match Url::parse(page_url) {
        Ok(url) => Some(url),
        // Relative URL: resolve against a throwaway base.
        Err(_) => Url::parse(FALLBACK_BASE)
            .ok()
            .and_then(|base| base.join(page_url).ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::parse("all"), Selection::All);
        assert_eq!(Selection::parse("linux"), Selection::Tag("linux".into()));
        assert_eq!(
            Selection::parse("!linux"),
            Selection::Exclude("linux".into())
        );
    }

    #[test]
    fn test_selection_display_roundtrip() {
        for raw in ["all", "linux", "!linux", "v2-5-0"] {
            assert_eq!(Selection::parse(raw).to_string(), raw);
        }
    }

    #[test]
    fn test_version_token_parse() {
        let version = VersionTag::from_token("v2-5-0").unwrap();
        assert_eq!((version.major, version.minor, version.patch), (2, 5, 0));
        assert_eq!(version.token(), "v2-5-0");
        assert_eq!(version.to_string(), "v2.5.0");
    }

    #[test]
    fn test_version_token_rejects_malformed() {
        for bad in ["v2-5", "2-5-0", "v2.5.0", "va-b-c", "v2-5-0-1", "linux"] {
            assert!(VersionTag::from_token(bad).is_none(), "accepted {:?}", bad);
            assert!(!is_version_token(bad));
        }
        assert!(is_version_token("v10-20-30"));
    }

    #[test]
    fn test_version_ordering() {
        let older = VersionTag::from_token("v2-5-9").unwrap();
        let newer = VersionTag::from_token("v2-6-0").unwrap();
        assert!(older < newer);
    }

    #[test]
    fn test_catalog_recognizes_literals_in_order() {
        let catalog = TagCatalog::new()
            .with("linux", "Linux")
            .with("zephyr", "Zephyr");
        let classes = vec!["zephyr".to_string(), "other".to_string(), "linux".into()];

        let tags = catalog.recognized_tags(&classes);
        assert_eq!(tags.len(), 2);
        // Catalog order, not class order.
        assert_eq!(tags[0].value(), "linux");
        assert_eq!(tags[1].value(), "zephyr");
        assert_eq!(tags[0].label(), "Linux");
    }

    #[test]
    fn test_catalog_versions_entry() {
        let catalog = TagCatalog::new().with_versions("Version");
        assert!(catalog.has_versions());
        assert!(catalog.label_for("versions").is_none());

        let classes = vec!["hideable".to_string(), "v2-5-0".into()];
        let tags = catalog.recognized_tags(&classes);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].value(), "v2-5-0");
        assert_eq!(tags[0].label(), "v2.5.0");
    }

    #[test]
    fn test_catalog_ignores_unknown_classes() {
        let catalog = TagCatalog::new().with("linux", "Linux");
        let classes = vec!["windows".to_string(), "mystery".into()];
        assert!(catalog.recognized_tags(&classes).is_empty());
    }

    #[test]
    fn test_version_param() {
        assert_eq!(
            version_param("/docs/page.html?v=v2-5-0").as_deref(),
            Some("v2-5-0")
        );
        assert_eq!(
            version_param("https://example.com/p?x=1&v=v2-6-0").as_deref(),
            Some("v2-6-0")
        );
        assert!(version_param("/docs/page.html").is_none());
    }

    #[test]
    fn test_share_url_preserves_other_params() {
        let version = VersionTag::from_token("v2-6-0").unwrap();
        let href = share_url("/docs/page.html?hl=filter&v=v2-5-0#s1", &version);
        assert_eq!(href, "/docs/page.html?hl=filter&v=v2-6-0#s1");
    }

    #[test]
    fn test_share_url_absolute() {
        let version = VersionTag::from_token("v2-5-0").unwrap();
        let href = share_url("https://example.com/docs/?lang=en", &version);
        assert_eq!(href, "https://example.com/docs/?lang=en&v=v2-5-0");
    }
}
