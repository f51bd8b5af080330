/// Fixed prefix of every debug line; assertions match on it.
pub const GENERATED_ID_PREFIX: &str = "Generated ID:";

/// In-memory record of generated identifiers.
#[derive(Debug, Clone, Default)]
pub struct DebugLog {
    entries: Vec<DebugEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugEntry {
    pub identifier: String,
    pub role: String,
    pub context: String,
}

impl DebugEntry {
    /// `Generated ID: <id> (role: <role>, context: <context>)`
    pub fn line(&self) -> String {
        format!(
            "{} {} (role: {}, context: {})",
            GENERATED_ID_PREFIX, self.identifier, self.role, self.context
        )
    }
}

impl DebugLog {
    pub fn record(&mut self, identifier: &str, role: &str, context: &str) {
        self.entries.push(DebugEntry {
            identifier: identifier.to_string(),
            role: role.to_string(),
            context: context.to_string(),
        });
    }

    pub fn entries(&self) -> &[DebugEntry] {
        &self.entries
    }

    /// Identifiers in the order they were generated.
    pub fn identifiers(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.identifier.as_str()).collect()
    }

    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(DebugEntry::line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
