use serde::{Deserialize, Serialize};

use crate::identity::identity_model::Identity;

// ============================================================================
// Naming modifiers
// ============================================================================

/// Naming decorators accumulated on one element before resolution.
///
/// Each setter replaces its previous value, so calling `named` twice keeps
/// only the last name instead of stacking both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingModifiers {
    /// Explicit platform identifier; always wins
    #[serde(rename = "identifier", skip_serializing_if = "Option::is_none")]
    pub manual_identifier: Option<String>,

    /// Used verbatim, no namespace or hierarchy
    #[serde(rename = "exact_named", skip_serializing_if = "Option::is_none")]
    pub exact_name: Option<String>,

    /// Hierarchical name; also becomes the breadcrumb for the subtree
    #[serde(rename = "named", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub automatic_compliance: bool,

    /// Component name passed to `automatic_compliance_named`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance_name: Option<String>,

    /// Subtree override of the global switch: `Some(false)` from
    /// `disable_automatic_accessibility_identifiers`, `Some(true)` from
    /// `enable_global_automatic_compliance`
    #[serde(rename = "auto_ids", skip_serializing_if = "Option::is_none")]
    pub auto_ids_override: Option<bool>,
}

impl NamingModifiers {
    /// `named` or `automatic_compliance` present on this very element.
    pub fn has_local_enable(&self) -> bool {
        self.name.is_some() || self.automatic_compliance
    }
}

// ============================================================================
// View element
// ============================================================================

/// A UI element as seen by the identifier subsystem: a role, optional label
/// and identity, its naming modifiers, and its children.
///
/// Built with chained calls in code or deserialized from YAML:
///
/// ```yaml
/// role: VStack
/// named: Settings
/// children:
///   - role: button
///     label: Save
///     automatic_compliance: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewElement {
    pub role: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,

    /// Logical grouping token, inherited by descendants
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(flatten)]
    pub modifiers: NamingModifiers,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ViewElement>,
}

impl ViewElement {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            ..Self::default()
        }
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self::new("button").label(label)
    }

    pub fn text(label: impl Into<String>) -> Self {
        Self::new("text").label(label)
    }

    pub fn text_field(placeholder: impl Into<String>) -> Self {
        Self::new("textField").label(placeholder)
    }

    // ---- content ----------------------------------------------------------

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn identity(mut self, identity: impl Into<Identity>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn child(mut self, child: ViewElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ViewElement>) -> Self {
        self.children.extend(children);
        self
    }

    // ---- naming modifiers -------------------------------------------------

    /// Opt into automatic identifiers, even when they are globally off.
    pub fn automatic_compliance(mut self) -> Self {
        self.modifiers.automatic_compliance = true;
        self
    }

    /// Opt in with a component name used in place of the label.
    pub fn automatic_compliance_named(mut self, name: impl Into<String>) -> Self {
        self.modifiers.automatic_compliance = true;
        self.modifiers.compliance_name = Some(name.into());
        self
    }

    /// Replace this element's hierarchy level with `name`.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.modifiers.name = Some(name.into());
        self
    }

    /// Use `name` verbatim as the identifier.
    pub fn exact_named(mut self, name: impl Into<String>) -> Self {
        self.modifiers.exact_name = Some(name.into());
        self
    }

    /// Explicit identifier assignment, taking precedence over every modifier.
    pub fn accessibility_identifier(mut self, id: impl Into<String>) -> Self {
        self.modifiers.manual_identifier = Some(id.into());
        self
    }

    /// Turn automatic identifiers off for this element and its subtree.
    pub fn disable_automatic_accessibility_identifiers(mut self) -> Self {
        self.modifiers.auto_ids_override = Some(false);
        self
    }

    /// Turn automatic identifiers on for this element and its subtree.
    pub fn enable_global_automatic_compliance(mut self) -> Self {
        self.modifiers.auto_ids_override = Some(true);
        self
    }

    /// Environment-style override of the global switch for the subtree.
    pub fn auto_ids_environment(mut self, enabled: bool) -> Self {
        self.modifiers.auto_ids_override = Some(enabled);
        self
    }

    /// Number of elements in this subtree, including self.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(ViewElement::subtree_len).sum::<usize>()
    }
}
