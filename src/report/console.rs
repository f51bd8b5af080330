use crate::modifier::resolver::ResolvedElement;
use crate::report::report_model::IdentifierAudit;

// ============================================================================
// Console reporter: formatted terminal output
// ============================================================================

/// One line per element: path, source and identifier.
///
/// ```text
/// VStack[0]                      named       app.Settings
/// VStack[0]/button[0]            automatic   app.Settings.button.save
/// VStack[0]/text[1]              suppressed  -
/// ```
pub fn format_resolved(resolved: &[ResolvedElement]) -> String {
    let width = resolved.iter().map(|el| el.path.len()).max().unwrap_or(0);
    let mut out = String::new();
    for el in resolved {
        let source = el.source.to_string();
        let source = source.split_whitespace().next().unwrap_or("");
        out.push_str(&format!(
            "{:<width$}  {:<11} {}\n",
            el.path,
            source,
            el.identifier.as_deref().unwrap_or("-"),
            width = width
        ));
    }
    out
}

/// Format an audit for terminal output.
///
/// ```text
/// === Identifier Audit ===
///
/// 5/6 elements identified (83.3%)
/// ✗ DUPLICATE  app.list.item (2 elements)
///     VStack[0]/item[0]
///     VStack[0]/item[1]
///
/// === Audit: 1 issue(s) ===
/// ```
pub fn format_audit_report(audit: &IdentifierAudit) -> String {
    let mut out = String::from("=== Identifier Audit ===\n\n");

    out.push_str(&format!(
        "{}/{} elements identified ({:.1}%)\n",
        audit.identified,
        audit.total,
        audit.coverage() * 100.0
    ));

    for path in &audit.missing {
        out.push_str(&format!("    [NO ID] {}\n", path));
    }

    let mut issues = 0;
    for dup in &audit.duplicates {
        let marker = if dup.intentional {
            "\u{2713} SHARED   "
        } else {
            issues += 1;
            "\u{2717} DUPLICATE"
        };
        out.push_str(&format!(
            "{}  {} ({} elements)\n",
            marker,
            dup.identifier,
            dup.paths.len()
        ));
        for path in &dup.paths {
            out.push_str(&format!("    {}\n", path));
        }
    }

    for id in &audit.over_length {
        issues += 1;
        out.push_str(&format!(
            "\u{2717} TOO LONG   {} ({} chars)\n",
            id,
            id.chars().count()
        ));
    }

    out.push_str(&format!("\n=== Audit: {} issue(s) ===\n", issues));
    out
}
