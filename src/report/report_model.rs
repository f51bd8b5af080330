use std::collections::BTreeMap;

use serde::Serialize;

use crate::identity::generator::MAX_IDENTIFIER_LEN;
use crate::modifier::resolver::{IdentifierSource, ResolvedElement};

/// Identifier shared by several elements, with the elements' paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateIdentifier {
    pub identifier: String,
    pub paths: Vec<String>,
    /// Every holder used `exact_named` or a manual id, i.e. the clash was asked for
    pub intentional: bool,
}

/// Summary of a resolved view tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentifierAudit {
    pub total: usize,
    pub identified: usize,
    /// Paths of elements that ended up without an identifier
    pub missing: Vec<String>,
    pub duplicates: Vec<DuplicateIdentifier>,
    /// Identifiers longer than the generator's cap (only verbatim ids can be)
    pub over_length: Vec<String>,
}

impl IdentifierAudit {
    pub fn from_resolved(resolved: &[ResolvedElement]) -> Self {
        let mut by_id: BTreeMap<&str, Vec<&ResolvedElement>> = BTreeMap::new();
        let mut missing = Vec::new();
        let mut over_length = Vec::new();

        for el in resolved {
            match el.identifier.as_deref() {
                Some(id) => {
                    let holders = by_id.entry(id).or_default();
                    if holders.is_empty() && id.chars().count() > MAX_IDENTIFIER_LEN {
                        over_length.push(id.to_string());
                    }
                    holders.push(el);
                }
                None => missing.push(el.path.clone()),
            }
        }

        let duplicates = by_id
            .into_iter()
            .filter(|(_, holders)| holders.len() > 1)
            .map(|(id, holders)| DuplicateIdentifier {
                identifier: id.to_string(),
                intentional: holders.iter().all(|el| {
                    matches!(el.source, IdentifierSource::ExactNamed | IdentifierSource::Manual)
                }),
                paths: holders.iter().map(|el| el.path.clone()).collect(),
            })
            .collect();

        Self {
            total: resolved.len(),
            identified: resolved.iter().filter(|el| el.has_identifier()).count(),
            missing,
            duplicates,
            over_length,
        }
    }

    /// No accidental duplicates and nothing over-length.
    pub fn is_clean(&self) -> bool {
        self.duplicates.iter().all(|d| d.intentional) && self.over_length.is_empty()
    }

    pub fn coverage(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.identified as f64 / self.total as f64
    }
}
