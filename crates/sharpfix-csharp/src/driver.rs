//! The analysis driver.
//!
//! [`AnalysisDriver`] walks a document's tree once, in document order, and
//! calls every enabled rule registered for each node's kind. Rules never see
//! each other's output, so the result does not depend on registration
//! order. Diagnostics come back sorted by location, then rule id.

use std::collections::HashMap;

use sharpfix_core::cancel::CancellationToken;
use sharpfix_core::diagnostic::Diagnostic;
use sharpfix_cst::{walk, SyntaxKind, SyntaxNode, VisitResult, Visitor};
use tracing::{debug, trace};

use crate::config::AnalysisConfig;
use crate::document::Document;
use crate::rules::{Rule, RuleContext, RuleRegistry};

/// Runs the enabled rules of a registry over documents.
pub struct AnalysisDriver<'a> {
    config: &'a AnalysisConfig,
    by_kind: HashMap<SyntaxKind, Vec<&'a dyn Rule>>,
    cancel: CancellationToken,
}

impl<'a> AnalysisDriver<'a> {
    pub fn new(registry: &'a RuleRegistry, config: &'a AnalysisConfig) -> Self {
        let mut by_kind: HashMap<SyntaxKind, Vec<&'a dyn Rule>> = HashMap::new();
        for rule in registry.rules() {
            if !config.is_enabled(rule.descriptor()) {
                continue;
            }
            for &kind in rule.node_kinds() {
                by_kind.entry(kind).or_default().push(rule);
            }
        }
        AnalysisDriver {
            config,
            by_kind,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Diagnostics for `document`. When cancelled mid-walk, returns the
    /// diagnostics found so far.
    pub fn analyze(&self, document: &Document) -> Vec<Diagnostic> {
        let model = document.semantic_model();
        let mut walker = RuleWalker {
            driver: self,
            context: RuleContext {
                model: &model,
                config: self.config,
            },
            diagnostics: Vec::new(),
            invocations: 0,
        };
        walk(&mut walker, document.root());

        let mut diagnostics = walker.diagnostics;
        diagnostics.sort_by(|a, b| a.span.cmp(&b.span).then_with(|| a.rule_id.cmp(&b.rule_id)));
        diagnostics.dedup();
        debug!(
            path = document.path(),
            invocations = walker.invocations,
            diagnostics = diagnostics.len(),
            cancelled = self.cancel.is_cancelled(),
            "analysis finished"
        );
        diagnostics
    }
}

struct RuleWalker<'d, 'm> {
    driver: &'d AnalysisDriver<'d>,
    context: RuleContext<'m>,
    diagnostics: Vec<Diagnostic>,
    invocations: usize,
}

impl Visitor for RuleWalker<'_, '_> {
    fn visit_node(&mut self, node: &SyntaxNode) -> VisitResult {
        if self.driver.cancel.is_cancelled() {
            return VisitResult::Stop;
        }
        let Some(rules) = self.driver.by_kind.get(&node.kind()) else {
            return VisitResult::Continue;
        };
        for rule in rules {
            self.invocations += 1;
            let descriptor = rule.descriptor();
            let severity = self.driver.config.severity_for(descriptor);
            for diagnostic in rule.analyze(node, &self.context) {
                trace!(rule = descriptor.id, span = %diagnostic.span, "diagnostic");
                self.diagnostics.push(diagnostic.with_severity(severity));
            }
        }
        VisitResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::CommentTarget;
    use crate::rules::comments::CommentRule;
    use crate::rules::compiler::CompilerRule;
    use crate::rules::forwarding::ForwardingRule;
    use crate::rules::static_import::StaticImportRule;
    use sharpfix_core::diagnostic::Severity;

    const SOURCE: &str = "namespace N\n{\n    // a\n    class C\n    {\n        void M()\n        {\n            // b\n        }\n    }\n}\n";

    fn ids(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.rule_id.as_str()).collect()
    }

    #[test]
    fn diagnostics_are_sorted_by_location() {
        let registry = RuleRegistry::builtin();
        let config = AnalysisConfig::default();
        let document = Document::parse("N.cs", SOURCE).unwrap();
        let diagnostics = AnalysisDriver::new(&registry, &config).analyze(&document);
        assert_eq!(ids(&diagnostics), vec!["ACA0005", "ACA0002", "ACA0003"]);
    }

    #[test]
    fn disabled_rules_do_not_run_and_overrides_apply() {
        let registry = RuleRegistry::builtin();
        let mut config = AnalysisConfig::default().with_cli_rules(vec![], vec!["ACA0002".into()]);
        config
            .severity_overrides
            .insert("ACA0003".to_string(), Severity::Warning);
        let document = Document::parse("N.cs", SOURCE).unwrap();
        let diagnostics = AnalysisDriver::new(&registry, &config).analyze(&document);
        assert_eq!(ids(&diagnostics), vec!["ACA0005", "ACA0003"]);
        assert_eq!(diagnostics[1].severity, Severity::Warning);
    }

    #[test]
    fn registration_order_does_not_matter() {
        let builtin = RuleRegistry::builtin();
        let mut reversed = RuleRegistry::new();
        for descriptor in crate::semantic::compiler::DESCRIPTORS.into_iter().rev() {
            reversed.register_rule(Box::new(CompilerRule::new(descriptor)));
        }
        reversed.register_rule(Box::new(StaticImportRule));
        for target in CommentTarget::ALL.into_iter().rev() {
            reversed.register_rule(Box::new(CommentRule::new(target)));
        }
        reversed.register_rule(Box::new(ForwardingRule));
        let config = AnalysisConfig::default();
        let document = Document::parse("N.cs", SOURCE).unwrap();
        assert_eq!(
            AnalysisDriver::new(&builtin, &config).analyze(&document),
            AnalysisDriver::new(&reversed, &config).analyze(&document)
        );
    }

    #[test]
    fn cancelled_analysis_returns_partial_results() {
        let registry = RuleRegistry::builtin();
        let config = AnalysisConfig::default();
        let document = Document::parse("N.cs", SOURCE).unwrap();
        let token = CancellationToken::new();
        token.cancel();
        let diagnostics = AnalysisDriver::new(&registry, &config)
            .with_cancellation(token)
            .analyze(&document);
        assert!(diagnostics.is_empty());
    }
}
