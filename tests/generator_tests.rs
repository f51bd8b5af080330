use std::collections::HashSet;

use a11y_autoid::identity::generator::{
    FALLBACK_ROLE, IdentifierGenerator, MAX_IDENTIFIER_LEN, compose_id,
};
use a11y_autoid::identity::sanitize::sanitize_label;
use a11y_autoid::{AccessibilityIdentifierConfig, GenerationMode, Identifiable, Identity};

use crate::common::utils::session;

mod common;

struct User {
    id: String,
    name: String,
}

impl Identifiable for User {
    fn stable_id(&self) -> String {
        self.id.clone()
    }
}

fn user(id: &str, name: &str) -> User {
    User {
        id: id.into(),
        name: name.into(),
    }
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn generated_id_contains_namespace_role_context_and_identity() {
    let mut s = session("test");
    let id = s.generate_id(&Identity::keyed("user-1"), "item", "list");

    for part in ["test", "item", "list", "user-1"] {
        assert!(id.contains(part), "{id} should contain {part}");
    }
    assert_eq!(id, "test.list.item.user-1");
}

#[test]
fn generation_is_deterministic() {
    let mut s = session("test");
    let identity = Identity::of(&user("user-1", "Alice"));
    let first = s.generate_id(&identity, "item", "list");
    let second = s.generate_id(&identity, "item", "list");
    let third = s.generate_id(&identity, "item", "list");
    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[test]
fn reordering_items_does_not_change_their_ids() {
    let alice = Identity::of(&user("user-1", "Alice"));
    let bob = Identity::of(&user("user-2", "Bob"));

    let mut forward = session("test");
    let a1 = forward.generate_id(&alice, "item", "list");
    let b1 = forward.generate_id(&bob, "item", "list");

    let mut reversed = session("test");
    let b2 = reversed.generate_id(&bob, "item", "list");
    let a2 = reversed.generate_id(&alice, "item", "list");

    assert_eq!(a1, a2);
    assert_eq!(b1, b2);
    assert_ne!(a1, b1);
}

#[test]
fn content_identity_produces_stable_non_empty_id() {
    let mut s = session("test");
    let first = s.generate_id(&Identity::content("Plain String Value"), "item", "list");
    let second = s.generate_id(&Identity::content("Plain String Value"), "item", "list");
    assert_eq!(first, second);
    assert!(first.ends_with("plain-string-value"), "got {first}");

    let debug = s.generate_id(&Identity::from_debug(&(3, "x")), "row", "table");
    assert!(!debug.is_empty());
}

#[test]
fn empty_inputs_still_yield_non_empty_id() {
    let mut s = session("test");
    let id = s.generate_id(&Identity::content(""), "", "");
    assert!(!id.is_empty());
    assert!(id.starts_with("test"));

    let mut bare = session("");
    let id = bare.generate_labeled_id(None, "", "", Some(""));
    assert!(!id.is_empty());
}

#[test]
fn empty_namespace_is_omitted() {
    let mut s = session("");
    let id = s.generate_id(&Identity::keyed("k"), "item", "list");
    assert_eq!(id, "list.item.k");
}

#[test]
fn namespace_and_mode_are_read_on_every_call() {
    let mut s = session("first");
    let before = s.generate_id(&Identity::keyed("k"), "item", "list");
    s.config.namespace = "second".into();
    let after = s.generate_id(&Identity::keyed("k"), "item", "list");
    assert!(before.starts_with("first."));
    assert!(after.starts_with("second."));

    s.config.mode = GenerationMode::Semantic;
    s.config.push_view_hierarchy("Sidebar");
    let semantic = s.generate_id(&Identity::keyed("k"), "item", "list");
    assert!(!semantic.contains("Sidebar"), "semantic ids skip breadcrumbs: {semantic}");
}

#[test]
fn empty_everything_falls_back_to_element() {
    let config = AccessibilityIdentifierConfig::with_namespace("");
    assert_eq!(compose_id(&config, None, "", "", None), FALLBACK_ROLE);
}

// ============================================================================
// Identity tokens next to matching segments
// ============================================================================

#[test]
fn key_equal_to_role_is_kept() {
    let mut s = session("app");
    assert!(!s.check_for_collision("app.list.item"));

    let upper = s.generate_id(&Identity::keyed("Item"), "item", "list");
    let lower = s.generate_id(&Identity::keyed("item"), "item", "list");
    assert_eq!(upper, "app.list.item.Item");
    assert_eq!(lower, "app.list.item.item");
    assert!(!s.check_for_collision("app.list.item"), "no identity-less id was issued");

    let bare = s.generate_labeled_id(None, "item", "list", None);
    assert_eq!(bare, "app.list.item");
    assert_ne!(bare, upper);
    assert_ne!(bare, lower);
}

#[test]
fn key_equal_to_context_or_namespace_is_kept() {
    let mut s = session("app");
    assert_eq!(s.generate_id(&Identity::keyed("list"), "item", "list"), "app.list.item.list");
    assert_eq!(s.generate_id(&Identity::keyed("app"), "item", ""), "app.item.app");
}

#[test]
fn label_equal_to_role_is_kept() {
    let mut s = session("app");
    let id = s.generate_labeled_id(None, "button", "toolbar", Some("Button"));
    assert_eq!(id, "app.toolbar.button.button");
}

#[test]
fn distinct_keys_always_yield_distinct_ids() {
    let keys = ["item", "Item", "ITEM", "list", "List", "app", "user-1", "User-1"];
    let mut s = session("app");
    let mut seen = HashSet::new();
    for key in keys {
        let id = s.generate_id(&Identity::keyed(key), "item", "list");
        assert!(id.ends_with(&format!(".{key}")), "{id} should end with key {key}");
        assert!(seen.insert(id.clone()), "{key} collided: {id}");
    }
    assert!(s.generator.collisions().is_empty());
}

// ============================================================================
// Context segments
// ============================================================================

#[test]
fn hierarchy_and_screen_context_feed_automatic_ids() {
    let mut s = session("app");
    s.config.set_screen_context("Checkout");
    s.config.push_view_hierarchy("Cart");
    let id = s.generate_id(&Identity::keyed("sku-9"), "row", "list");
    assert_eq!(id, "app.Checkout.Cart.list.row.sku-9");
}

#[test]
fn hierarchy_tracking_can_be_turned_off() {
    let mut s = session("app");
    s.config.enable_view_hierarchy_tracking = false;
    s.config.push_view_hierarchy("Cart");
    let id = s.generate_id(&Identity::keyed("sku-9"), "row", "list");
    assert_eq!(id, "app.list.row.sku-9");
}

#[test]
fn global_prefix_follows_namespace() {
    let mut s = session("app");
    s.config.global_prefix = "v2".into();
    let id = s.generate_id(&Identity::keyed("k"), "item", "list");
    assert_eq!(id, "app.v2.list.item.k");
}

#[test]
fn repeated_segments_are_not_duplicated() {
    let mut s = session("app");
    s.config.push_view_hierarchy("list");
    let id = s.generate_id(&Identity::keyed("k"), "item", "list");
    assert!(!id.contains("list.list"), "got {id}");
}

// ============================================================================
// Labels
// ============================================================================

#[test]
fn label_is_sanitized_before_inclusion() {
    let mut s = session("app");
    let id = s.generate_labeled_id(None, "button", "toolbar", Some("Save Document"));
    assert!(id.contains("save-document"), "got {id}");
    assert!(!id.contains("Save Document"));
    assert!(!id.contains(' '));
}

#[test]
fn sanitizing_twice_changes_nothing() {
    for raw in ["Save Document", "  Add   New Item!! ", "e-mail", "ÜBER cool", ""] {
        let once = sanitize_label(raw);
        assert_eq!(sanitize_label(&once), once, "raw: {raw:?}");
    }
}

#[test]
fn long_labels_keep_ids_short() {
    let mut s = session("app");
    let label = "This is an extremely long button title that keeps going ".repeat(5);
    let id = s.generate_labeled_id(None, "button", "toolbar", Some(&label));
    assert!(id.chars().count() <= MAX_IDENTIFIER_LEN, "{} chars", id.len());
    assert!(id.len() < 150);
}

#[test]
fn very_long_inputs_are_truncated_deterministically() {
    let mut s = session("app");
    s.config.push_view_hierarchy("a".repeat(120));
    let identity = Identity::keyed("k".repeat(200));
    let first = s.generate_id(&identity, "item", "list");
    let second = s.generate_id(&identity, "item", "list");
    assert_eq!(first, second);
    assert!(first.chars().count() <= MAX_IDENTIFIER_LEN);
}

#[test]
fn semantic_mode_uses_context_role_and_label() {
    let mut s = session("shop");
    s.config.mode = GenerationMode::Semantic;
    let id = s.generate_labeled_id(
        Some(&Identity::keyed("42")),
        "button",
        "checkout",
        Some("Pay Now"),
    );
    assert_eq!(id, "shop.checkout.button.pay-now");

    s.config.set_screen_context("Payment");
    let id = s.generate_labeled_id(None, "button", "checkout", Some("Pay Now"));
    assert_eq!(id, "shop.Payment.button.pay-now");
}

#[test]
fn semantic_mode_ignores_breadcrumbs_and_prefers_label() {
    let mut config = AccessibilityIdentifierConfig::with_namespace("shop");
    config.mode = GenerationMode::Semantic;
    config.global_prefix = "v2".into();
    config.push_view_hierarchy("Sidebar");
    let id = compose_id(
        &config,
        Some(&Identity::keyed("42")),
        "button",
        "checkout",
        Some("Pay Now"),
    );
    assert_eq!(id, "shop.checkout.button.pay-now");

    let keyed = compose_id(&config, Some(&Identity::keyed("42")), "button", "checkout", None);
    assert_eq!(keyed, "shop.checkout.button.42");
}

#[test]
fn compose_id_is_pure() {
    let s = session("app");
    let a = compose_id(&s.config, Some(&Identity::keyed("k")), "item", "list", None);
    assert!(!s.check_for_collision(&a), "composing must not register");
}

// ============================================================================
// Collisions
// ============================================================================

#[test]
fn registered_ids_report_collisions() {
    let mut s = session("app");
    let id = s.generate_id(&Identity::keyed("k"), "item", "list");
    assert!(s.check_for_collision(&id));
    assert!(!s.check_for_collision("app.never.generated"));
}

#[test]
fn register_reports_second_issue() {
    let mut generator = IdentifierGenerator::new();
    assert!(!generator.register("a"));
    assert!(generator.register("a"));
    assert_eq!(generator.collisions(), vec!["a"]);
    assert_eq!(generator.issued_len(), 1);

    generator.clear();
    assert!(!generator.check_for_collision("a"));
}

#[test]
fn duplicate_issues_are_listed() {
    let mut s = session("app");
    s.generate_id(&Identity::keyed("dup"), "item", "list");
    s.generate_id(&Identity::keyed("dup"), "item", "list");
    s.generate_id(&Identity::keyed("single"), "item", "list");
    assert_eq!(s.generator.collisions(), vec!["app.list.item.dup"]);
    assert_eq!(s.generator.issue_count("app.list.item.dup"), 2);
}

#[test]
fn reset_session_clears_collision_tracking() {
    let mut s = session("app");
    let id = s.generate_id(&Identity::keyed("k"), "item", "list");
    s.reset_session();
    assert!(!s.check_for_collision(&id));
    assert_eq!(s.config.namespace, "app", "settings survive a session reset");
}

// ============================================================================
// Debug log
// ============================================================================

#[test]
fn debug_log_records_each_generated_id() {
    let mut s = session("app");
    s.config.enable_debug_logging = true;
    let id = s.generate_id(&Identity::keyed("k"), "item", "list");

    let log = s.config.get_debug_log();
    assert!(log.contains("Generated ID:"));
    assert!(log.contains(&format!("Generated ID: {id}")));

    s.config.clear_debug_log();
    assert!(s.config.get_debug_log().is_empty());
}

#[test]
fn debug_log_stays_empty_when_disabled() {
    let mut s = session("app");
    s.generate_id(&Identity::keyed("k"), "item", "list");
    assert!(s.config.get_debug_log().is_empty());
}

#[test]
fn user_name_is_not_used_when_key_exists() {
    let mut s = session("app");
    let u = user("user-1", "Alice Smith");
    let id = s.generate_id(&Identity::of(&u), "item", "list");
    assert!(!id.contains(&u.name));
    assert!(id.ends_with("user-1"));
}
