use a11y_autoid::GenerationMode;
use a11y_autoid::cli::commands::{
    GenerateArgs, ResolveArgs, cmd_generate, cmd_resolve, cmd_sanitize, load_tree, parse_tree,
};
use a11y_autoid::cli::config::{AppConfig, Cli, Commands, build_identifier_config, load_config};
use a11y_autoid::export::test_code::TestDialect;
use a11y_autoid::trace::logger::TraceLogger;
use a11y_autoid::trace::trace::GenerationEvent;
use a11y_autoid::{AccessibilityIdentifierConfig, IdentifierError, IdentifierSource, Identity};
use clap::Parser;

const SETTINGS_TREE: &str = r#"
role: VStack
named: Settings
children:
  - role: button
    label: Save
    automatic_compliance: true
  - role: textField
    label: Email Address
    identity: { kind: keyed, value: email }
    automatic_compliance: true
  - role: text
    label: Footer
    auto_ids: false
  - role: button
    label: Legacy
    identifier: legacy-button
"#;

fn resolve_args(tree: &str) -> ResolveArgs<'_> {
    ResolveArgs {
        tree,
        screen: None,
        audit: false,
        export_dir: None,
        dialect: TestDialect::Xcuitest,
        clipboard: false,
        trace: None,
        debug_log: false,
    }
}

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_generate_minimal() {
    let cli = Cli::parse_from(["a11y-autoid", "generate", "--id", "user-1"]);
    match cli.command {
        Commands::Generate {
            id,
            content,
            role,
            context,
            label,
            screen,
        } => {
            assert_eq!(id.as_deref(), Some("user-1"));
            assert_eq!(content, None);
            assert_eq!(role, "element");
            assert_eq!(context, "");
            assert_eq!(label, None);
            assert_eq!(screen, None);
        }
        _ => panic!("Expected Generate command"),
    }
    assert_eq!(cli.verbose, 0);
}

#[test]
fn cli_parse_global_flags_after_subcommand() {
    let cli = Cli::parse_from([
        "a11y-autoid",
        "resolve",
        "--tree",
        "tree.yaml",
        "--audit",
        "--dialect",
        "playwright",
        "--namespace",
        "shop",
        "--mode",
        "semantic",
        "--disable-auto-ids",
        "-vv",
    ]);
    assert_eq!(cli.namespace.as_deref(), Some("shop"));
    assert_eq!(cli.mode.as_deref(), Some("semantic"));
    assert!(cli.disable_auto_ids);
    assert_eq!(cli.verbose, 2);
    match cli.command {
        Commands::Resolve {
            tree,
            audit,
            dialect,
            clipboard,
            ..
        } => {
            assert_eq!(tree, "tree.yaml");
            assert!(audit);
            assert_eq!(dialect.as_deref(), Some("playwright"));
            assert!(!clipboard);
        }
        _ => panic!("Expected Resolve command"),
    }
}

#[test]
fn cli_rejects_id_with_content() {
    let result = Cli::try_parse_from([
        "a11y-autoid",
        "generate",
        "--id",
        "a",
        "--content",
        "b",
    ]);
    assert!(result.is_err());
}

#[test]
fn cli_parse_sanitize() {
    let cli = Cli::parse_from(["a11y-autoid", "sanitize", "Save Document"]);
    match cli.command {
        Commands::Sanitize { label } => assert_eq!(label, "Save Document"),
        _ => panic!("Expected Sanitize command"),
    }
}

// ============================================================================
// Config file
// ============================================================================

#[test]
fn load_config_missing_file_returns_defaults() {
    let config = load_config(Some("/nonexistent/a11y-autoid.yaml"));
    assert_eq!(config.identifiers.namespace, "app");
    assert_eq!(config.export.dialect, TestDialect::Xcuitest);
    assert!(!config.export.audit);
}

#[test]
fn load_config_reads_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a11y-autoid.yaml");
    std::fs::write(
        &path,
        concat!(
            "identifiers:\n",
            "  namespace: shop\n",
            "  enable_debug_logging: true\n",
            "export:\n",
            "  dialect: playwright\n",
            "  audit: true\n",
        ),
    )
    .unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.identifiers.namespace, "shop");
    assert!(config.identifiers.enable_debug_logging);
    assert!(config.identifiers.enable_auto_ids, "unspecified keys keep defaults");
    assert_eq!(config.export.dialect, TestDialect::Playwright);
    assert!(config.export.audit);
}

#[test]
fn load_config_malformed_returns_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "identifiers: [not, a, map").unwrap();
    let config = load_config(path.to_str());
    assert_eq!(config.identifiers.namespace, "app");
}

#[test]
fn cli_flags_override_file_config() {
    let file = AppConfig::default();
    let config = build_identifier_config(&file, Some("cli"), Some(GenerationMode::Manual), true);
    assert_eq!(config.namespace, "cli");
    assert_eq!(config.mode, GenerationMode::Manual);
    assert!(!config.enable_auto_ids);

    let untouched = build_identifier_config(&file, None, None, false);
    assert_eq!(untouched.namespace, "app");
    assert!(untouched.enable_auto_ids);
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn generate_command_builds_identifier() {
    let args = GenerateArgs {
        id: Some("user-1"),
        content: None,
        role: "item",
        context: "list",
        label: None,
        screen: Some("Users"),
    };
    let id = cmd_generate(AccessibilityIdentifierConfig::with_namespace("test"), &args);
    assert_eq!(id, "test.Users.list.item.user-1");
}

#[test]
fn sanitize_command_matches_label_rules() {
    assert_eq!(cmd_sanitize("Save Document"), "save-document");
}

#[test]
fn view_tree_yaml_maps_modifiers() {
    let root = parse_tree(SETTINGS_TREE).unwrap();
    assert_eq!(root.modifiers.name.as_deref(), Some("Settings"));
    assert_eq!(root.children.len(), 4);
    assert!(root.children[0].modifiers.automatic_compliance);
    assert_eq!(root.children[1].identity, Some(Identity::keyed("email")));
    assert_eq!(root.children[2].modifiers.auto_ids_override, Some(false));
    assert_eq!(
        root.children[3].modifiers.manual_identifier.as_deref(),
        Some("legacy-button")
    );
}

#[test]
fn resolve_command_prints_identifiers() {
    let dir = tempfile::tempdir().unwrap();
    let tree = dir.path().join("tree.yaml");
    std::fs::write(&tree, SETTINGS_TREE).unwrap();
    let tree = tree.to_str().unwrap();

    let mut args = resolve_args(tree);
    args.audit = true;
    args.debug_log = true;
    let out = cmd_resolve(AccessibilityIdentifierConfig::default(), &args).unwrap();

    assert!(out.contains("app.Settings.button.save"));
    assert!(out.contains("app.Settings.textField.email.email-address"));
    assert!(out.contains("legacy-button"));
    assert!(out.contains("=== Identifier Audit ==="));
    assert!(out.contains("Generated ID: app.Settings.button.save"));
}

#[test]
fn resolve_command_exports_and_traces() {
    let dir = tempfile::tempdir().unwrap();
    let tree = dir.path().join("tree.yaml");
    std::fs::write(&tree, SETTINGS_TREE).unwrap();
    let export_dir = dir.path().join("generated");
    let trace = dir.path().join("trace.jsonl");

    let mut args = resolve_args(tree.to_str().unwrap());
    let export_dir_str = export_dir.to_str().unwrap().to_string();
    let trace_str = trace.to_str().unwrap().to_string();
    args.export_dir = Some(&export_dir_str);
    args.trace = Some(&trace_str);
    args.dialect = TestDialect::Playwright;

    let out = cmd_resolve(AccessibilityIdentifierConfig::default(), &args).unwrap();
    assert!(out.contains("Wrote"));

    let files: Vec<_> = std::fs::read_dir(&export_dir).unwrap().collect();
    assert_eq!(files.len(), 1);
    let path = files[0].as_ref().unwrap().path();
    assert!(path.to_string_lossy().ends_with(".spec.ts"));

    let lines = std::fs::read_to_string(&trace).unwrap();
    assert_eq!(lines.lines().count(), 5);
    for line in lines.lines() {
        let event: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(event["element_path"].is_string());
    }
}

#[test]
fn load_tree_reports_missing_file() {
    assert!(load_tree("/nonexistent/tree.yaml").is_err());
}

// ============================================================================
// Trace file
// ============================================================================

#[test]
fn trace_open_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("trace.jsonl");
    assert!(matches!(
        TraceLogger::open(&path),
        Err(IdentifierError::Io { .. })
    ));
}

#[test]
fn resolve_with_unwritable_trace_fails() {
    let dir = tempfile::tempdir().unwrap();
    let tree = dir.path().join("tree.yaml");
    std::fs::write(&tree, SETTINGS_TREE).unwrap();
    let trace = dir.path().join("missing").join("trace.jsonl");
    let trace = trace.to_str().unwrap().to_string();

    let mut args = resolve_args(tree.to_str().unwrap());
    args.trace = Some(&trace);
    assert!(cmd_resolve(AccessibilityIdentifierConfig::default(), &args).is_err());
}

#[test]
fn trace_appends_one_line_per_event() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.jsonl");
    let logger = TraceLogger::open(&path).unwrap();
    assert!(logger.is_enabled());
    assert_eq!(logger.path(), Some(path.as_path()));

    logger.log(&GenerationEvent::now(
        "VStack[0]",
        "VStack",
        &IdentifierSource::Named,
        Some("app.Settings"),
    ));
    logger.log(&GenerationEvent::now(
        "VStack[0]/text[0]",
        "text",
        &IdentifierSource::Automatic,
        None,
    ));

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["identifier"], "app.Settings");
    assert_eq!(first["source"], "named");
}

#[test]
fn disabled_trace_drops_events() {
    let logger = TraceLogger::disabled();
    assert!(!logger.is_enabled());
    assert_eq!(logger.path(), None);
    logger.log(&GenerationEvent::now("x[0]", "x", &IdentifierSource::Manual, Some("x")));
}
