//! End-to-end filtering behavior over a realistic page model.

use docsieve_core::{FilterController, Page, TagCatalog, VisibilityReport};

/// A release-notes style page: one versions dropdown, one platform dropdown,
/// one level dropdown, and four hideable sections.
fn page() -> Page {
    serde_yaml::from_str(
        r#"
elements:
  - tag: select
    name: versions
    children:
      - tag: option
        value: all
      - tag: option
        value: v2-5-0
      - tag: option
        value: v2-6-0
  - tag: select
    name: platform
    children:
      - tag: option
        value: all
      - tag: option
        value: linux
      - tag: option
        value: "!linux"
  - tag: select
    name: level
    children:
      - tag: option
        value: all
      - tag: option
        value: beginner
  - tag: section
    id: linux-beginner
    classes: [hideable, linux, beginner, v2-5-0]
  - tag: section
    id: linux-advanced
    classes: [hideable, linux, v2-6-0]
  - tag: section
    id: mac-beginner
    classes: [hideable, macos, beginner, v2-5-0]
  - tag: section
    id: mac-advanced
    classes: [hideable, macos, v2-6-0]
"#,
    )
    .unwrap()
}

fn setup(page: &mut Page) -> FilterController {
    let mut controller = FilterController::new();
    controller
        .register(
            page,
            "versions",
            None,
            Some(TagCatalog::new().with_versions("Version")),
        )
        .unwrap();
    controller
        .register(
            page,
            "platform",
            None,
            Some(TagCatalog::new().with("linux", "Linux")),
        )
        .unwrap();
    controller
        .register(
            page,
            "level",
            None,
            Some(TagCatalog::new().with("beginner", "Beginner")),
        )
        .unwrap();
    controller
}

fn visible_ids(controller: &FilterController, page: &Page) -> Vec<String> {
    VisibilityReport::collect(controller, page)
        .visible
        .iter()
        .map(|e| e.id.clone().unwrap_or_default())
        .collect()
}

#[test]
fn all_dropdowns_all_shows_everything() {
    let mut doc = page();
    let controller = setup(&mut doc);
    controller.compute_visibility(&mut doc);

    assert_eq!(
        visible_ids(&controller, &doc),
        vec![
            "linux-beginner",
            "linux-advanced",
            "mac-beginner",
            "mac-advanced"
        ]
    );
}

#[test]
fn single_positive_tag_keeps_exactly_matching_elements() {
    let mut doc = page();
    let mut controller = setup(&mut doc);

    controller.select(&mut doc, "platform", "linux").unwrap();
    assert_eq!(
        visible_ids(&controller, &doc),
        vec!["linux-beginner", "linux-advanced"]
    );
}

#[test]
fn negative_filter_keeps_tagged_elements_visible() {
    let mut doc = page();
    let mut controller = setup(&mut doc);

    // `!linux` alone keeps exactly the linux-tagged sections visible.
    controller.select(&mut doc, "platform", "!linux").unwrap();
    assert_eq!(
        visible_ids(&controller, &doc),
        vec!["linux-beginner", "linux-advanced"]
    );

    // Adding a positive filter elsewhere never hides a linux section, but
    // non-linux sections must now satisfy it.
    controller.select(&mut doc, "level", "beginner").unwrap();
    assert_eq!(
        visible_ids(&controller, &doc),
        vec!["linux-beginner", "linux-advanced", "mac-beginner"]
    );
}

#[test]
fn two_positive_filters_intersect() {
    let mut doc = page();
    let mut controller = setup(&mut doc);

    controller.select(&mut doc, "platform", "linux").unwrap();
    controller.select(&mut doc, "level", "beginner").unwrap();
    assert_eq!(visible_ids(&controller, &doc), vec!["linux-beginner"]);
}

#[test]
fn reset_to_all_restores_full_visibility() {
    let mut doc = page();
    let mut controller = setup(&mut doc);
    controller.compute_visibility(&mut doc);
    let before = visible_ids(&controller, &doc);

    controller.select(&mut doc, "versions", "v2-6-0").unwrap();
    assert_eq!(
        visible_ids(&controller, &doc),
        vec!["linux-advanced", "mac-advanced"]
    );

    controller.select(&mut doc, "versions", "all").unwrap();
    assert_eq!(visible_ids(&controller, &doc), before);
}

#[test]
fn version_selection_scenario() {
    let mut doc = page();
    let mut controller = setup(&mut doc);

    controller.select(&mut doc, "versions", "v2-6-0").unwrap();
    let report = VisibilityReport::collect(&controller, &doc);
    assert!(report.hidden.iter().any(|e| e.id.as_deref() == Some("linux-beginner")));

    controller.select(&mut doc, "versions", "v2-5-0").unwrap();
    assert!(visible_ids(&controller, &doc).contains(&"linux-beginner".to_string()));

    controller.select(&mut doc, "versions", "all").unwrap();
    assert_eq!(visible_ids(&controller, &doc).len(), 4);
}

#[test]
fn url_visit_preselects_version() {
    let mut doc = page();
    let mut controller = setup(&mut doc);

    controller.initialize_from_url(&mut doc, "/releases.html?v=v2-6-0");
    assert_eq!(controller.dropdown("versions").unwrap().value(), "v2-6-0");
    assert_eq!(
        visible_ids(&controller, &doc),
        vec!["linux-advanced", "mac-advanced"]
    );
}

#[test]
fn mixed_version_and_platform_filters() {
    let mut doc = page();
    let mut controller = setup(&mut doc);

    controller.select(&mut doc, "versions", "v2-5-0").unwrap();
    controller.select(&mut doc, "platform", "linux").unwrap();
    assert_eq!(visible_ids(&controller, &doc), vec!["linux-beginner"]);
}

#[test]
fn registration_failure_leaves_other_dropdowns_working() {
    let mut doc = page();
    let mut controller = setup(&mut doc);

    assert!(controller
        .register(&mut doc, "architecture", None, None)
        .is_err());

    // The three earlier registrations still drive filtering.
    controller.select(&mut doc, "platform", "linux").unwrap();
    assert_eq!(
        visible_ids(&controller, &doc),
        vec!["linux-beginner", "linux-advanced"]
    );
    assert_eq!(controller.selections().len(), 3);
}
