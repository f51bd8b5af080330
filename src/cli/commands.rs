use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::config_model::AccessibilityIdentifierConfig;
use crate::error::{IdentifierError, Result};
use crate::export::sink::{SystemClipboard, copy_to_clipboard, export_to_file};
use crate::export::test_code::{TestDialect, UiTestCodeGenerator};
use crate::identity::identity_model::Identity;
use crate::identity::sanitize::sanitize_label;
use crate::modifier::modifier_model::ViewElement;
use crate::report::console::{format_audit_report, format_resolved};
use crate::report::report_model::IdentifierAudit;
use crate::session::identifier_session::IdentifierSession;
use crate::trace::logger::TraceLogger;

// ============================================================================
// Logging
// ============================================================================

/// Install the `tracing` subscriber. `RUST_LOG` wins over `-v`.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A second init (tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// ============================================================================
// generate subcommand
// ============================================================================

pub struct GenerateArgs<'a> {
    pub id: Option<&'a str>,
    pub content: Option<&'a str>,
    pub role: &'a str,
    pub context: &'a str,
    pub label: Option<&'a str>,
    pub screen: Option<&'a str>,
}

/// Generate a single identifier and return it.
pub fn cmd_generate(config: AccessibilityIdentifierConfig, args: &GenerateArgs<'_>) -> String {
    let mut session = IdentifierSession::new(config);
    if let Some(screen) = args.screen {
        session.config.set_screen_context(screen);
    }

    let identity = match (args.id, args.content) {
        (Some(id), _) => Some(Identity::keyed(id)),
        (None, Some(content)) => Some(Identity::content(content)),
        (None, None) => None,
    };

    session.generate_labeled_id(identity.as_ref(), args.role, args.context, args.label)
}

// ============================================================================
// sanitize subcommand
// ============================================================================

pub fn cmd_sanitize(label: &str) -> String {
    sanitize_label(label)
}

// ============================================================================
// resolve subcommand
// ============================================================================

pub struct ResolveArgs<'a> {
    pub tree: &'a str,
    pub screen: Option<&'a str>,
    pub audit: bool,
    pub export_dir: Option<&'a str>,
    pub dialect: TestDialect,
    pub clipboard: bool,
    pub trace: Option<&'a str>,
    pub debug_log: bool,
}

/// Resolve a view tree file and return the text to print.
pub fn cmd_resolve(
    config: AccessibilityIdentifierConfig,
    args: &ResolveArgs<'_>,
) -> Result<String> {
    let root = load_tree(args.tree)?;
    let mut session = IdentifierSession::new(config);
    if let Some(screen) = args.screen {
        session.config.set_screen_context(screen);
    }
    if args.debug_log {
        session.config.enable_debug_logging = true;
    }
    if args.export_dir.is_some() || args.clipboard {
        session.config.enable_ui_test_integration = true;
    }

    let resolved = match args.trace {
        Some(path) => session.resolve_traced(&root, &TraceLogger::open(path)?),
        None => session.resolve(&root),
    };
    info!(elements = resolved.len(), tree = args.tree, "resolved view tree");

    let mut out = format_resolved(&resolved);

    if args.audit {
        out.push('\n');
        out.push_str(&format_audit_report(&IdentifierAudit::from_resolved(&resolved)));
    }

    if args.debug_log {
        out.push('\n');
        out.push_str(&session.config.get_debug_log());
        out.push('\n');
    }

    let code = session.ui_test_code(&resolved, &UiTestCodeGenerator::new(args.dialect));

    if let Some(dir) = args.export_dir {
        match export_to_file(Path::new(dir), &code, args.dialect) {
            Some(path) => out.push_str(&format!("\nWrote {}\n", path.display())),
            None => out.push_str("\nUI test export skipped\n"),
        }
    }

    if args.clipboard {
        if copy_to_clipboard(&SystemClipboard, &code) {
            out.push_str("Copied UI test code to clipboard\n");
        } else {
            out.push_str("Clipboard unavailable\n");
        }
    }

    Ok(out)
}

/// Load a view tree from a YAML file.
pub fn load_tree(path: &str) -> Result<ViewElement> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| IdentifierError::io(format!("reading {}", path), e))?;
    parse_tree(&content).map_err(|e| match e {
        IdentifierError::Yaml { source, .. } => {
            IdentifierError::yaml(format!("parsing {}", path), source)
        }
        other => other,
    })
}

pub fn parse_tree(yaml: &str) -> Result<ViewElement> {
    serde_yaml::from_str(yaml).map_err(|e| IdentifierError::yaml("view tree", e))
}
