use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IdentifierError;
use crate::export::debug_log::DebugLog;

// ============================================================================
// Generation mode
// ============================================================================

/// Strategy used when an element asks for an automatic identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Breadcrumb + role + identity
    #[default]
    Automatic,
    /// Only explicit, locally requested identifiers
    Manual,
    /// Context + role + readable label, no breadcrumbs
    Semantic,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Automatic => "automatic",
            GenerationMode::Manual => "manual",
            GenerationMode::Semantic => "semantic",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "automatic" => Ok(GenerationMode::Automatic),
            "manual" => Ok(GenerationMode::Manual),
            "semantic" => Ok(GenerationMode::Semantic),
            other => Err(IdentifierError::InvalidMode(other.to_string())),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Settings and runtime context read by the generator on every call.
///
/// Nothing here is cached by the generator: a change to `namespace` or
/// `mode` takes effect on the very next identifier. Tests build their own
/// instance instead of sharing one, which keeps parallel tests isolated.
///
/// The serialized form only carries the settings; the breadcrumb stack,
/// screen context and debug log are runtime state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibilityIdentifierConfig {
    /// Master switch for automatic (non-manual) identifiers
    pub enable_auto_ids: bool,

    /// First segment of every generated identifier; omitted when empty
    pub namespace: String,

    /// Optional segment placed right after the namespace
    pub global_prefix: String,

    pub mode: GenerationMode,

    /// Record every generated identifier in the in-memory debug log
    pub enable_debug_logging: bool,

    /// Include the breadcrumb stack in automatic identifiers
    pub enable_view_hierarchy_tracking: bool,

    /// Collect identifiers for UI-test code export
    pub enable_ui_test_integration: bool,

    /// Apply automatic identifiers to elements without any naming modifier
    pub global_automatic_accessibility_identifiers: bool,

    #[serde(skip)]
    view_hierarchy: Vec<String>,

    #[serde(skip)]
    screen_context: Option<String>,

    #[serde(skip)]
    debug_log: DebugLog,
}

impl Default for AccessibilityIdentifierConfig {
    fn default() -> Self {
        Self {
            enable_auto_ids: true,
            namespace: "app".to_string(),
            global_prefix: String::new(),
            mode: GenerationMode::Automatic,
            enable_debug_logging: false,
            enable_view_hierarchy_tracking: true,
            enable_ui_test_integration: false,
            global_automatic_accessibility_identifiers: true,
            view_hierarchy: Vec::new(),
            screen_context: None,
            debug_log: DebugLog::default(),
        }
    }
}

impl AccessibilityIdentifierConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config with the given namespace and every other setting at its default.
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Restore every setting and clear all runtime state.
    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }

    // ---- view hierarchy ---------------------------------------------------

    pub fn push_view_hierarchy(&mut self, name: impl Into<String>) {
        self.view_hierarchy.push(name.into());
    }

    pub fn pop_view_hierarchy(&mut self) -> Option<String> {
        self.view_hierarchy.pop()
    }

    pub fn is_view_hierarchy_empty(&self) -> bool {
        self.view_hierarchy.is_empty()
    }

    pub fn view_hierarchy(&self) -> &[String] {
        &self.view_hierarchy
    }

    // ---- screen context ---------------------------------------------------

    /// Set the logical screen name used as a context segment. An empty
    /// name clears it.
    pub fn set_screen_context(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.screen_context = if name.trim().is_empty() {
            None
        } else {
            Some(name)
        };
    }

    pub fn clear_screen_context(&mut self) {
        self.screen_context = None;
    }

    pub fn screen_context(&self) -> Option<&str> {
        self.screen_context.as_deref()
    }

    // ---- debug log --------------------------------------------------------

    /// Record a generated identifier when debug logging is on.
    pub fn log_generated_id(&mut self, id: &str, role: &str, context: &str) {
        if self.enable_debug_logging {
            self.debug_log.record(id, role, context);
        }
    }

    /// All debug lines, newline separated.
    pub fn get_debug_log(&self) -> String {
        self.debug_log.render()
    }

    pub fn clear_debug_log(&mut self) {
        self.debug_log.clear();
    }

    pub fn debug_log(&self) -> &DebugLog {
        &self.debug_log
    }
}
