use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::config::config_model::{AccessibilityIdentifierConfig, GenerationMode};
use crate::identity::generator::IdentifierGenerator;
use crate::modifier::modifier_model::{NamingModifiers, ViewElement};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::GenerationEvent;

// ============================================================================
// Decision model
// ============================================================================

/// Where an element's final identifier came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "reason", rename_all = "snake_case")]
pub enum IdentifierSource {
    Manual,
    ExactNamed,
    Named,
    Automatic,
    Suppressed(SuppressionReason),
}

/// Why an element ended up without an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressionReason {
    /// A disable modifier on the element or an ancestor
    LocalDisable,
    /// `enable_auto_ids` is off and nothing local turned it back on
    GlobalDisable,
    /// `mode = manual` and the element only had a global opt-in
    ManualMode,
    /// No modifier and global automatic identifiers are off
    NotOptedIn,
}

impl fmt::Display for IdentifierSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierSource::Manual => f.write_str("manual"),
            IdentifierSource::ExactNamed => f.write_str("exact_named"),
            IdentifierSource::Named => f.write_str("named"),
            IdentifierSource::Automatic => f.write_str("automatic"),
            IdentifierSource::Suppressed(reason) => write!(f, "suppressed ({:?})", reason),
        }
    }
}

/// Outcome of the precedence rules for one element, before any string is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingDecision {
    Manual(String),
    Exact(String),
    Named(String),
    Automatic,
    Suppressed(SuppressionReason),
}

impl NamingDecision {
    pub fn source(&self) -> IdentifierSource {
        match self {
            NamingDecision::Manual(_) => IdentifierSource::Manual,
            NamingDecision::Exact(_) => IdentifierSource::ExactNamed,
            NamingDecision::Named(_) => IdentifierSource::Named,
            NamingDecision::Automatic => IdentifierSource::Automatic,
            NamingDecision::Suppressed(reason) => IdentifierSource::Suppressed(*reason),
        }
    }
}

/// Apply the precedence rules, first match wins:
///
/// 1. explicit identifier assignment
/// 2. `exact_named`
/// 3. local enable (`named`, `automatic_compliance`)
/// 4. local disable on the element or inherited from an ancestor
/// 5. the global switches in `config`
///
/// An inherited `Some(true)` (from `enable_global_automatic_compliance`)
/// opts the subtree in regardless of the global switches.
pub fn decide(
    modifiers: &NamingModifiers,
    inherited_override: Option<bool>,
    config: &AccessibilityIdentifierConfig,
) -> NamingDecision {
    if let Some(manual) = &modifiers.manual_identifier {
        return NamingDecision::Manual(manual.clone());
    }
    if let Some(exact) = &modifiers.exact_name {
        return NamingDecision::Exact(exact.clone());
    }
    if let Some(name) = &modifiers.name {
        return NamingDecision::Named(name.clone());
    }
    if modifiers.automatic_compliance {
        return NamingDecision::Automatic;
    }

    match modifiers.auto_ids_override.or(inherited_override) {
        Some(false) => NamingDecision::Suppressed(SuppressionReason::LocalDisable),
        Some(true) => NamingDecision::Automatic,
        None if !config.enable_auto_ids => {
            NamingDecision::Suppressed(SuppressionReason::GlobalDisable)
        }
        None if !config.global_automatic_accessibility_identifiers => {
            NamingDecision::Suppressed(SuppressionReason::NotOptedIn)
        }
        None if config.mode == GenerationMode::Manual => {
            NamingDecision::Suppressed(SuppressionReason::ManualMode)
        }
        None => NamingDecision::Automatic,
    }
}

// ============================================================================
// Resolution output
// ============================================================================

/// Final identifier decision for one element of a resolved tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedElement {
    /// Structural path such as `VStack[0]/button[1]`
    pub path: String,
    pub role: String,
    pub label: Option<String>,
    pub identifier: Option<String>,
    pub source: IdentifierSource,
}

impl ResolvedElement {
    pub fn has_identifier(&self) -> bool {
        self.identifier.is_some()
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Context inherited from ancestors while walking a tree.
#[derive(Debug, Clone, Default)]
struct Inherited {
    path: String,
    context: Option<String>,
    auto_ids_override: Option<bool>,
}

/// Walks a view tree, applies the precedence rules and asks the generator
/// for the strings.
///
/// `named` levels are pushed onto the configuration's breadcrumb stack for
/// the duration of their subtree and popped afterwards, so the stack is
/// left as it was found.
pub struct NamingResolver<'a> {
    config: &'a mut AccessibilityIdentifierConfig,
    generator: &'a mut IdentifierGenerator,
    tracer: Option<&'a TraceLogger>,
}

impl<'a> NamingResolver<'a> {
    pub fn new(
        config: &'a mut AccessibilityIdentifierConfig,
        generator: &'a mut IdentifierGenerator,
    ) -> Self {
        Self {
            config,
            generator,
            tracer: None,
        }
    }

    pub fn with_tracer(mut self, tracer: &'a TraceLogger) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// Resolve every element of the tree in depth-first pre-order.
    pub fn resolve_tree(&mut self, root: &ViewElement) -> Vec<ResolvedElement> {
        let mut out = Vec::with_capacity(root.subtree_len());
        self.walk(root, 0, &Inherited::default(), &mut out);
        out
    }

    /// Resolve a single element against the current breadcrumb stack,
    /// ignoring its children.
    pub fn resolve_element(&mut self, element: &ViewElement) -> ResolvedElement {
        let inherited = Inherited::default();
        let path = segment_path(&inherited.path, &element.role, 0);
        self.resolve_one(element, path, &inherited)
    }

    fn walk(
        &mut self,
        element: &ViewElement,
        index: usize,
        inherited: &Inherited,
        out: &mut Vec<ResolvedElement>,
    ) {
        let path = segment_path(&inherited.path, &element.role, index);
        let resolved = self.resolve_one(element, path.clone(), inherited);
        out.push(resolved);

        if element.children.is_empty() {
            return;
        }

        let child_inherited = Inherited {
            path,
            context: element.context.clone().or_else(|| inherited.context.clone()),
            auto_ids_override: element
                .modifiers
                .auto_ids_override
                .or(inherited.auto_ids_override),
        };

        let pushed = match element.modifiers.name.as_deref() {
            Some(name) if !name.trim().is_empty() => {
                self.config.push_view_hierarchy(name);
                true
            }
            _ => false,
        };

        for (i, child) in element.children.iter().enumerate() {
            self.walk(child, i, &child_inherited, out);
        }

        if pushed {
            self.config.pop_view_hierarchy();
        }
    }

    fn resolve_one(
        &mut self,
        element: &ViewElement,
        path: String,
        inherited: &Inherited,
    ) -> ResolvedElement {
        let decision = decide(&element.modifiers, inherited.auto_ids_override, self.config);
        let source = decision.source();

        let identifier = match decision {
            NamingDecision::Manual(id) | NamingDecision::Exact(id) => Some(id),
            NamingDecision::Named(name) => Some(self.generator.generate_named_id(
                self.config,
                &name,
                &element.role,
            )),
            NamingDecision::Automatic => {
                let context = element
                    .context
                    .as_deref()
                    .or(inherited.context.as_deref())
                    .unwrap_or("");
                let label = element
                    .modifiers
                    .compliance_name
                    .as_deref()
                    .or(element.label.as_deref());
                Some(self.generator.generate_labeled_id(
                    self.config,
                    element.identity.as_ref(),
                    &element.role,
                    context,
                    label,
                ))
            }
            NamingDecision::Suppressed(_) => None,
        };

        trace!(path = %path, source = %source, identifier = ?identifier, "resolved element");

        if let Some(tracer) = self.tracer {
            tracer.log(&GenerationEvent::now(&path, &element.role, &source, identifier.as_deref()));
        }

        ResolvedElement {
            path,
            role: element.role.clone(),
            label: element.label.clone(),
            identifier,
            source,
        }
    }
}

fn segment_path(parent: &str, role: &str, index: usize) -> String {
    let role = if role.is_empty() { "view" } else { role };
    if parent.is_empty() {
        format!("{}[{}]", role, index)
    } else {
        format!("{}/{}[{}]", parent, role, index)
    }
}
