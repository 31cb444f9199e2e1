use docweave_core::{SlugRegistry, slugify};

#[test]
fn basic_slug_shape() {
    assert_eq!(slugify("Section 1"), "section-1");
    assert_eq!(slugify("  Spaced   Out  "), "spaced-out");
    assert_eq!(slugify("Already-Hyphenated -- Twice"), "already-hyphenated-twice");
}

#[test]
fn dots_survive() {
    assert_eq!(slugify("v1.2 Release Notes"), "v1.2-release-notes");
}

#[test]
fn entities_are_decoded_before_slugging() {
    assert_eq!(slugify("Q&amp;A"), "q-a");
    assert_eq!(slugify("A&#8212;B"), "a-b");
    assert_eq!(slugify("Rock &amp; Roll"), "rock-roll");
    // An unknown reference is literal text; its `&` and `;` fold to hyphens.
    assert_eq!(slugify("x&bogus;y"), "x-bogus-y");
}

#[test]
fn embedded_markup_is_stripped() {
    assert_eq!(slugify("The <em>Big</em> Game"), "the-big-game");
}

#[test]
fn unmatched_angle_brackets_fold_to_hyphens() {
    assert_eq!(slugify("Scores < 10"), "scores-10");
    assert_eq!(slugify("10 > Scores"), "10-scores");
    assert_eq!(slugify("a<b<c"), "a-b-c");
}

#[test]
fn empty_headings_fall_back() {
    assert_eq!(slugify(""), "section");
    assert_eq!(slugify("   "), "section");
    assert_eq!(slugify("!!!"), "section");
}

#[test]
fn identical_headings_disambiguate_in_order() {
    let mut registry = SlugRegistry::new();
    assert_eq!(registry.assign("Overview"), "overview");
    assert_eq!(registry.assign("Overview"), "overview-1");
    assert_eq!(registry.assign("Overview"), "overview-2");
    assert_eq!(registry.assign("Overview"), "overview-3");
}

#[test]
fn fallback_slugs_disambiguate_too() {
    let mut registry = SlugRegistry::new();
    assert_eq!(registry.assign("???"), "section");
    assert_eq!(registry.assign("!!!"), "section-1");
}

#[test]
fn collision_with_an_explicit_suffix() {
    // A literal "Overview 1" heading occupies overview-1; the duplicate of
    // "Overview" takes the next free integer.
    let mut registry = SlugRegistry::new();
    assert_eq!(registry.assign("Overview"), "overview");
    assert_eq!(registry.assign("Overview 1"), "overview-1");
    assert_eq!(registry.assign("Overview"), "overview-2");
}

#[test]
fn anchor_mapping() {
    let mut registry = SlugRegistry::new();
    let slug = registry.assign("Standings");
    registry.record_anchor("h.abc", slug.clone());
    assert_eq!(registry.anchor_slug("h.abc"), Some("standings"));
    assert_eq!(registry.anchor_slug("h.missing"), None);
}
