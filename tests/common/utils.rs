use a11y_autoid::{AccessibilityIdentifierConfig, IdentifierSession, ResolvedElement};

/// Fresh, isolated session with the given namespace.
pub fn session(namespace: &str) -> IdentifierSession {
    IdentifierSession::new(AccessibilityIdentifierConfig::with_namespace(namespace))
}

/// Resolved element at `path`; panics with the available paths otherwise.
pub fn at<'a>(resolved: &'a [ResolvedElement], path: &str) -> &'a ResolvedElement {
    resolved.iter().find(|el| el.path == path).unwrap_or_else(|| {
        let paths: Vec<&str> = resolved.iter().map(|el| el.path.as_str()).collect();
        panic!("no element at {path}; have {paths:?}")
    })
}

/// Identifier at `path`, or `None`.
pub fn id_at(resolved: &[ResolvedElement], path: &str) -> Option<String> {
    at(resolved, path).identifier.clone()
}
