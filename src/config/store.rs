use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::config::config_model::{AccessibilityIdentifierConfig, GenerationMode};
use crate::error::{IdentifierError, Result};

pub const DEFAULT_KEY_PREFIX: &str = "AccessibilityIdentifiers";

pub const KEY_ENABLE_AUTO_IDS: &str = "enableAutoIDs";
pub const KEY_NAMESPACE: &str = "namespace";
pub const KEY_GLOBAL_PREFIX: &str = "globalPrefix";
pub const KEY_MODE: &str = "mode";
pub const KEY_ENABLE_DEBUG_LOGGING: &str = "enableDebugLogging";
pub const KEY_ENABLE_VIEW_HIERARCHY_TRACKING: &str = "enableViewHierarchyTracking";
pub const KEY_ENABLE_UI_TEST_INTEGRATION: &str = "enableUITestIntegration";
pub const KEY_GLOBAL_AUTOMATIC_IDS: &str = "globalAutomaticAccessibilityIdentifiers";

// ============================================================================
// Key-value store abstraction
// ============================================================================

/// Flat key-value persistence for configuration settings.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|v| v.as_str().map(str::to_string))
    }
}

/// In-memory store, the default for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a flat JSON object on disk.
///
/// Every `set` rewrites the file, so the file always matches memory.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl JsonFileStore {
    /// Open a store; a missing file starts empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| IdentifierError::json(format!("reading {}", path.display()), e))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(IdentifierError::io(format!("reading {}", path.display()), e)),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.values)
            .map_err(|e| IdentifierError::json("serializing store", e))?;
        std::fs::write(&self.path, json)
            .map_err(|e| IdentifierError::io(format!("writing {}", self.path.display()), e))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }
}

// ============================================================================
// Save / load
// ============================================================================

fn prefixed(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

impl AccessibilityIdentifierConfig {
    /// Write every setting under `<prefix>.<key>`.
    pub fn save_to_store(&self, store: &mut dyn KeyValueStore, prefix: &str) -> Result<()> {
        let entries: [(&str, Value); 8] = [
            (KEY_ENABLE_AUTO_IDS, Value::Bool(self.enable_auto_ids)),
            (KEY_NAMESPACE, Value::String(self.namespace.clone())),
            (KEY_GLOBAL_PREFIX, Value::String(self.global_prefix.clone())),
            (KEY_MODE, Value::String(self.mode.as_str().to_string())),
            (KEY_ENABLE_DEBUG_LOGGING, Value::Bool(self.enable_debug_logging)),
            (
                KEY_ENABLE_VIEW_HIERARCHY_TRACKING,
                Value::Bool(self.enable_view_hierarchy_tracking),
            ),
            (
                KEY_ENABLE_UI_TEST_INTEGRATION,
                Value::Bool(self.enable_ui_test_integration),
            ),
            (
                KEY_GLOBAL_AUTOMATIC_IDS,
                Value::Bool(self.global_automatic_accessibility_identifiers),
            ),
        ];

        for (key, value) in entries {
            store.set(&prefixed(prefix, key), value)?;
        }
        debug!(prefix, "saved accessibility identifier settings");
        Ok(())
    }

    /// Overwrite only the settings present in the store; everything else
    /// keeps its current value.
    ///
    /// On error nothing is changed: every value is validated before the
    /// first field is assigned.
    pub fn load_from_store(&mut self, store: &dyn KeyValueStore, prefix: &str) -> Result<()> {
        let mode = store
            .get_string(&prefixed(prefix, KEY_MODE))
            .map(|v| v.parse::<GenerationMode>())
            .transpose()?;

        if let Some(v) = store.get_bool(&prefixed(prefix, KEY_ENABLE_AUTO_IDS)) {
            self.enable_auto_ids = v;
        }
        if let Some(v) = store.get_string(&prefixed(prefix, KEY_NAMESPACE)) {
            self.namespace = v;
        }
        if let Some(v) = store.get_string(&prefixed(prefix, KEY_GLOBAL_PREFIX)) {
            self.global_prefix = v;
        }
        if let Some(mode) = mode {
            self.mode = mode;
        }
        if let Some(v) = store.get_bool(&prefixed(prefix, KEY_ENABLE_DEBUG_LOGGING)) {
            self.enable_debug_logging = v;
        }
        if let Some(v) = store.get_bool(&prefixed(prefix, KEY_ENABLE_VIEW_HIERARCHY_TRACKING)) {
            self.enable_view_hierarchy_tracking = v;
        }
        if let Some(v) = store.get_bool(&prefixed(prefix, KEY_ENABLE_UI_TEST_INTEGRATION)) {
            self.enable_ui_test_integration = v;
        }
        if let Some(v) = store.get_bool(&prefixed(prefix, KEY_GLOBAL_AUTOMATIC_IDS)) {
            self.global_automatic_accessibility_identifiers = v;
        }
        debug!(prefix, "loaded accessibility identifier settings");
        Ok(())
    }
}
