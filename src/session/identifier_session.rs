use crate::config::config_model::AccessibilityIdentifierConfig;
use crate::export::test_code::UiTestCodeGenerator;
use crate::identity::generator::IdentifierGenerator;
use crate::identity::identity_model::Identity;
use crate::modifier::modifier_model::ViewElement;
use crate::modifier::resolver::{NamingResolver, ResolvedElement};
use crate::trace::logger::TraceLogger;

/// Explicit context object: one configuration plus the generator whose
/// collision registry belongs to it.
///
/// Each test builds its own session, so nothing leaks between tests.
#[derive(Debug, Clone, Default)]
pub struct IdentifierSession {
    pub config: AccessibilityIdentifierConfig,
    pub generator: IdentifierGenerator,
}

impl IdentifierSession {
    pub fn new(config: AccessibilityIdentifierConfig) -> Self {
        Self {
            config,
            generator: IdentifierGenerator::new(),
        }
    }

    pub fn generate_id(&mut self, identity: &Identity, role: &str, context: &str) -> String {
        self.generator
            .generate_id(&mut self.config, identity, role, context)
    }

    pub fn generate_labeled_id(
        &mut self,
        identity: Option<&Identity>,
        role: &str,
        context: &str,
        label: Option<&str>,
    ) -> String {
        self.generator
            .generate_labeled_id(&mut self.config, identity, role, context, label)
    }

    pub fn check_for_collision(&self, id: &str) -> bool {
        self.generator.check_for_collision(id)
    }

    /// Resolve a whole view tree.
    pub fn resolve(&mut self, root: &ViewElement) -> Vec<ResolvedElement> {
        NamingResolver::new(&mut self.config, &mut self.generator).resolve_tree(root)
    }

    pub fn resolve_traced(
        &mut self,
        root: &ViewElement,
        tracer: &TraceLogger,
    ) -> Vec<ResolvedElement> {
        NamingResolver::new(&mut self.config, &mut self.generator)
            .with_tracer(tracer)
            .resolve_tree(root)
    }

    /// Final identifier of a single element (children ignored).
    pub fn identifier_for(&mut self, element: &ViewElement) -> Option<String> {
        NamingResolver::new(&mut self.config, &mut self.generator)
            .resolve_element(element)
            .identifier
    }

    /// UI-test source exercising the resolved elements, or an empty string
    /// when UI-test integration is off.
    pub fn ui_test_code(&self, resolved: &[ResolvedElement], code: &UiTestCodeGenerator) -> String {
        if !self.config.enable_ui_test_integration {
            return String::new();
        }
        code.generate_test_file(resolved)
    }

    /// Clear collision tracking, the debug log and the breadcrumb stack,
    /// keeping the settings.
    pub fn reset_session(&mut self) {
        self.generator.clear();
        self.config.clear_debug_log();
        while self.config.pop_view_hierarchy().is_some() {}
        self.config.clear_screen_context();
    }
}
