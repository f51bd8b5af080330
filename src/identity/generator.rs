use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::config_model::{AccessibilityIdentifierConfig, GenerationMode};
use crate::identity::identity_model::Identity;
use crate::identity::sanitize::{append_segments, enforce_length, join_segments, label_token};

/// Longest identifier the generator hands out.
pub const MAX_IDENTIFIER_LEN: usize = 96;

/// Longest sanitized label segment.
pub const MAX_LABEL_LEN: usize = 40;

/// Used when every other segment is empty.
pub const FALLBACK_ROLE: &str = "element";

/// Derives identifiers from the live configuration and remembers every
/// identifier it issued for collision checks.
#[derive(Debug, Clone, Default)]
pub struct IdentifierGenerator {
    issued: HashMap<String, usize>,
}

impl IdentifierGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Generation
    // ========================================================================

    /// Generate, register and log the identifier for `(identity, role, context)`.
    pub fn generate_id(
        &mut self,
        config: &mut AccessibilityIdentifierConfig,
        identity: &Identity,
        role: &str,
        context: &str,
    ) -> String {
        let id = compose_id(config, Some(identity), role, context, None);
        self.issue(config, id, role, context)
    }

    /// Like [`generate_id`](Self::generate_id) with a human-readable label
    /// (button title, field placeholder) folded in after sanitization.
    pub fn generate_labeled_id(
        &mut self,
        config: &mut AccessibilityIdentifierConfig,
        identity: Option<&Identity>,
        role: &str,
        context: &str,
        label: Option<&str>,
    ) -> String {
        let id = compose_id(config, identity, role, context, label);
        self.issue(config, id, role, context)
    }

    /// Hierarchical identifier for a `named` element: namespace, screen
    /// context, every ancestor name on the breadcrumb stack, then `name`.
    pub fn generate_named_id(
        &mut self,
        config: &mut AccessibilityIdentifierConfig,
        name: &str,
        role: &str,
    ) -> String {
        let id = compose_named_id(config, name, role);
        let context = config.view_hierarchy().join("/");
        self.issue(config, id, role, &context)
    }

    fn issue(
        &mut self,
        config: &mut AccessibilityIdentifierConfig,
        id: String,
        role: &str,
        context: &str,
    ) -> String {
        if self.register(&id) {
            debug!(identifier = %id, "identifier issued more than once");
        }
        config.log_generated_id(&id, role, context);
        debug!(
            identifier = %id,
            role,
            context,
            mode = %config.mode,
            "generated accessibility identifier"
        );
        id
    }

    // ========================================================================
    // Collision tracking
    // ========================================================================

    /// Record an identifier. Returns `true` when it had already been issued.
    pub fn register(&mut self, id: &str) -> bool {
        let count = self.issued.entry(id.to_string()).or_insert(0);
        *count += 1;
        *count > 1
    }

    /// Whether `id` was issued earlier in this session.
    pub fn check_for_collision(&self, id: &str) -> bool {
        self.issued.contains_key(id)
    }

    /// How many times `id` has been issued.
    pub fn issue_count(&self, id: &str) -> usize {
        self.issued.get(id).copied().unwrap_or(0)
    }

    /// Identifiers issued more than once, sorted.
    pub fn collisions(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .issued
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn issued_len(&self) -> usize {
        self.issued.len()
    }

    /// Forget every issued identifier, e.g. between tests or app launches.
    pub fn clear(&mut self) {
        if self.issued.len() > 10_000 {
            warn!(count = self.issued.len(), "clearing a very large identifier registry");
        }
        self.issued.clear();
    }
}

// ============================================================================
// Pure composition
// ============================================================================

/// Compose an identifier without registering or logging it.
///
/// Reads `namespace`, `mode`, screen context and breadcrumbs from `config`
/// on every call. `Manual` mode composes like `Automatic`; whether an
/// element gets an automatic id at all is decided by the resolver.
///
/// Only the scope segments (namespace through context) collapse repeats.
/// Role, identity and label tokens are always appended, so a key that
/// happens to match the role or context still shows up verbatim.
pub fn compose_id(
    config: &AccessibilityIdentifierConfig,
    identity: Option<&Identity>,
    role: &str,
    context: &str,
    label: Option<&str>,
) -> String {
    let identity_token = identity.map(Identity::token);
    let label_token = label.and_then(|l| label_token(l, MAX_LABEL_LEN));

    let mut scope: Vec<String> = vec![config.namespace.clone()];
    let mut tokens: Vec<String> = vec![role.to_string()];

    match config.mode {
        GenerationMode::Automatic | GenerationMode::Manual => {
            scope.push(config.global_prefix.clone());
            scope.extend(config.screen_context().map(str::to_string));
            if config.enable_view_hierarchy_tracking {
                scope.extend(config.view_hierarchy().iter().cloned());
            }
            scope.push(context.to_string());
            tokens.extend(identity_token);
            tokens.extend(label_token);
        }
        GenerationMode::Semantic => {
            let screen_or_context = config
                .screen_context()
                .map(str::to_string)
                .unwrap_or_else(|| context.to_string());
            scope.push(screen_or_context);
            tokens.extend(label_token.or(identity_token));
        }
    }

    finish(&scope, &tokens, role)
}

/// Compose the hierarchical identifier used by `named`.
///
/// The name is part of the scope, so `named("container")` nested inside
/// another `named("container")` does not repeat itself.
pub fn compose_named_id(config: &AccessibilityIdentifierConfig, name: &str, role: &str) -> String {
    let mut scope: Vec<String> = vec![config.namespace.clone()];
    scope.extend(config.screen_context().map(str::to_string));
    scope.extend(config.view_hierarchy().iter().cloned());
    scope.push(name.to_string());
    finish(&scope, &[], role)
}

fn finish(scope: &[String], tokens: &[String], role: &str) -> String {
    let joined = append_segments(join_segments(scope), tokens);
    let id = if joined.is_empty() {
        let role = role.trim();
        if role.is_empty() {
            FALLBACK_ROLE.to_string()
        } else {
            role.to_string()
        }
    } else {
        joined
    };
    enforce_length(id, MAX_IDENTIFIER_LEN)
}
