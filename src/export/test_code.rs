use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IdentifierError;
use crate::export::debug_log::DebugLog;
use crate::modifier::resolver::ResolvedElement;

// ============================================================================
// Dialects
// ============================================================================

/// UI-test framework the snippets are written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestDialect {
    /// Swift `XCUIApplication` queries
    #[default]
    Xcuitest,
    /// TypeScript `page.getByTestId`
    Playwright,
}

impl TestDialect {
    /// Suffix of exported test files.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            TestDialect::Xcuitest => ".swift",
            TestDialect::Playwright => ".spec.ts",
        }
    }

    pub fn file_stem(&self) -> &'static str {
        match self {
            TestDialect::Xcuitest => "GeneratedAccessibilityTests",
            TestDialect::Playwright => "generated-accessibility",
        }
    }
}

impl fmt::Display for TestDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestDialect::Xcuitest => f.write_str("xcuitest"),
            TestDialect::Playwright => f.write_str("playwright"),
        }
    }
}

impl FromStr for TestDialect {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xcuitest" | "xctest" | "swift" => Ok(TestDialect::Xcuitest),
            "playwright" | "ts" | "typescript" => Ok(TestDialect::Playwright),
            other => Err(IdentifierError::InvalidDialect(other.to_string())),
        }
    }
}

// ============================================================================
// Actions
// ============================================================================

/// One generated interaction with an identified element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestAction {
    Tap { identifier: String },
    TypeText { identifier: String, text: String },
    AssertExists { identifier: String },
}

const TAPPABLE_ROLES: &[&str] = &["button", "link", "toggle", "menu", "tab", "cell", "row", "item"];
const TEXT_ROLES: &[&str] = &["textfield", "securefield", "texteditor", "searchfield", "input"];

/// Sample text typed into generated text-input actions.
pub const SAMPLE_INPUT: &str = "test input";

/// Pick an action per identified element from its role.
pub fn plan_actions(resolved: &[ResolvedElement]) -> Vec<TestAction> {
    resolved
        .iter()
        .filter_map(|el| {
            let identifier = el.identifier.clone()?;
            let role = el.role.to_ascii_lowercase();
            let action = if TEXT_ROLES.iter().any(|r| role.contains(r)) {
                TestAction::TypeText {
                    identifier,
                    text: SAMPLE_INPUT.to_string(),
                }
            } else if TAPPABLE_ROLES.iter().any(|r| role.contains(r)) {
                TestAction::Tap { identifier }
            } else {
                TestAction::AssertExists { identifier }
            };
            Some(action)
        })
        .collect()
}

// ============================================================================
// Code generator
// ============================================================================

/// Renders identifiers into UI-test automation code.
///
/// Identifiers are referenced by their exact string; only quoting is escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiTestCodeGenerator {
    pub dialect: TestDialect,
}

impl UiTestCodeGenerator {
    pub fn new(dialect: TestDialect) -> Self {
        Self { dialect }
    }

    /// Look an element up by identifier and tap it.
    pub fn generate_tap_action(&self, id: &str) -> String {
        match self.dialect {
            TestDialect::Xcuitest => format!(
                "app.descendants(matching: .any)[\"{}\"].tap()",
                escape_double_quoted(id)
            ),
            TestDialect::Playwright => format!(
                "await page.getByTestId('{}').click();",
                escape_single_quoted(id)
            ),
        }
    }

    /// Look a text field up by identifier and type `text` into it.
    pub fn generate_text_input_action(&self, id: &str, text: &str) -> String {
        match self.dialect {
            TestDialect::Xcuitest => {
                let id = escape_double_quoted(id);
                format!(
                    "app.textFields[\"{id}\"].tap()\napp.textFields[\"{id}\"].typeText(\"{}\")",
                    escape_double_quoted(text)
                )
            }
            TestDialect::Playwright => format!(
                "await page.getByTestId('{}').fill('{}');",
                escape_single_quoted(id),
                escape_single_quoted(text)
            ),
        }
    }

    pub fn generate_exists_assertion(&self, id: &str) -> String {
        match self.dialect {
            TestDialect::Xcuitest => format!(
                "XCTAssertTrue(app.descendants(matching: .any)[\"{}\"]{})",
                escape_double_quoted(id),
                ".waitForExistence(timeout: 5)"
            ),
            TestDialect::Playwright => format!(
                "await expect(page.getByTestId('{}')).toBeVisible();",
                escape_single_quoted(id)
            ),
        }
    }

    pub fn render_action(&self, action: &TestAction) -> String {
        match action {
            TestAction::Tap { identifier } => self.generate_tap_action(identifier),
            TestAction::TypeText { identifier, text } => {
                self.generate_text_input_action(identifier, text)
            }
            TestAction::AssertExists { identifier } => self.generate_exists_assertion(identifier),
        }
    }

    /// A complete test source file exercising every identified element.
    pub fn generate_test_file(&self, resolved: &[ResolvedElement]) -> String {
        let body: Vec<String> = plan_actions(resolved)
            .iter()
            .map(|a| self.render_action(a))
            .collect();
        self.wrap(&body)
    }

    /// A test file asserting that every identifier in the debug log exists.
    pub fn generate_from_debug_log(&self, log: &DebugLog) -> String {
        let mut seen = std::collections::HashSet::new();
        let body: Vec<String> = log
            .identifiers()
            .into_iter()
            .filter(|id| seen.insert(*id))
            .map(|id| self.generate_exists_assertion(id))
            .collect();
        self.wrap(&body)
    }

    fn wrap(&self, body: &[String]) -> String {
        match self.dialect {
            TestDialect::Xcuitest => {
                let mut out = String::from(concat!(
                    "import XCTest\n\n",
                    "final class GeneratedAccessibilityTests: XCTestCase {\n",
                    "    func testGeneratedIdentifiers() throws {\n",
                    "        let app = XCUIApplication()\n",
                    "        app.launch()\n",
                ));
                push_indented(&mut out, body, "        ");
                out.push_str("    }\n}\n");
                out
            }
            TestDialect::Playwright => {
                let mut out = String::from(concat!(
                    "import { test, expect } from '@playwright/test';\n\n",
                    "test('generated accessibility identifiers', async ({ page }) => {\n",
                ));
                push_indented(&mut out, body, "  ");
                out.push_str("});\n");
                out
            }
        }
    }
}

fn push_indented(out: &mut String, body: &[String], indent: &str) {
    for snippet in body {
        for line in snippet.lines() {
            out.push_str(indent);
            out.push_str(line);
            out.push('\n');
        }
    }
}

fn escape_double_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn escape_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}
