//! Rules and fix providers.
//!
//! A rule pairs a [`RuleDescriptor`] with a detector; a fix provider repairs
//! the diagnostics of one rule id. Both are registered in a
//! [`RuleRegistry`], which the driver and the dispatcher query.
//!
//! # Fix providers
//!
//! [`FixProvider::fix_root`] computes the new root for one diagnostic, or
//! `None` when the diagnostic's anchor is gone or the code has a shape the
//! fix does not handle. The provided [`FixProvider::fixed_document`] runs the
//! formatter over annotated nodes and falls back to the unchanged document,
//! which the dispatcher then drops as a no-op.
//!
//! Equivalence keys are `{rule_id}-{fix_name}{discriminator}`. Only fixes
//! that can differ for the same rule (forwarding to different members) use
//! a discriminator.

pub mod comments;
pub mod compiler;
pub mod forwarding;
pub mod static_import;

use sharpfix_core::diagnostic::{Diagnostic, RuleDescriptor};
use sharpfix_core::error::SharpfixError;
use sharpfix_cst::{SyntaxAnnotation, SyntaxKind, SyntaxNode};

use crate::config::AnalysisConfig;
use crate::detectors::CommentTarget;
use crate::document::Document;
use crate::format::format_annotated;
use crate::semantic::compiler::DESCRIPTORS as COMPILER_DESCRIPTORS;
use crate::semantic::SemanticModel;

// ============================================================================
// Traits
// ============================================================================

/// What a rule sees while analyzing one node.
pub struct RuleContext<'a> {
    pub model: &'a SemanticModel,
    pub config: &'a AnalysisConfig,
}

/// A detector registered for some node kinds.
pub trait Rule: Send + Sync {
    fn descriptor(&self) -> &'static RuleDescriptor;

    /// Node kinds the driver calls [`Rule::analyze`] for.
    fn node_kinds(&self) -> &'static [SyntaxKind];

    /// Diagnostics raised at `node`, with the descriptor's default severity.
    fn analyze(&self, node: &SyntaxNode, context: &RuleContext<'_>) -> Vec<Diagnostic>;
}

/// Repairs diagnostics of one rule id.
pub trait FixProvider: Send + Sync {
    fn rule_id(&self) -> &'static str;

    /// Name of the fix, used for its title and equivalence key.
    fn fix_name(&self) -> &'static str;

    /// The new root fixing `diagnostic`, or `None` when there is nothing to
    /// do.
    fn fix_root(&self, document: &Document, diagnostic: &Diagnostic) -> Option<SyntaxNode>;

    /// `document` with `diagnostic` fixed and the result formatted.
    fn fixed_document(&self, document: &Document, diagnostic: &Diagnostic) -> Document {
        match self.fix_root(document, diagnostic) {
            Some(root) => document.with_syntax_root(format_annotated(&root)),
            None => document.clone(),
        }
    }

    /// Arguments for the fix title template.
    #[allow(unused_variables)]
    fn title_args(&self, diagnostic: &Diagnostic, fixed: &Document) -> Vec<String> {
        diagnostic.message_args.clone()
    }

    /// Suffix telling apart fixes of the same rule.
    #[allow(unused_variables)]
    fn discriminator(&self, diagnostic: &Diagnostic) -> String {
        String::new()
    }

    fn equivalence_key(&self, diagnostic: &Diagnostic) -> String {
        format!(
            "{}-{}{}",
            self.rule_id(),
            self.fix_name(),
            self.discriminator(diagnostic)
        )
    }
}

/// The `Member` and `Type` annotations of a fixed root, in that order.
/// Missing annotations are skipped.
pub fn annotation_args(fixed: &Document) -> Vec<String> {
    let green = fixed.root().green();
    [SyntaxAnnotation::MEMBER, SyntaxAnnotation::TYPE]
        .into_iter()
        .filter_map(|kind| green.annotation_data(kind).map(str::to_string))
        .collect()
}

// ============================================================================
// Registry
// ============================================================================

/// Every rule and fix provider, looked up by rule id.
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
    fixes: Vec<Box<dyn FixProvider>>,
}

impl RuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        RuleRegistry {
            rules: Vec::new(),
            fixes: Vec::new(),
        }
    }

    /// All built-in rules and their fixes.
    pub fn builtin() -> Self {
        let mut registry = RuleRegistry::new();

        registry.register_rule(Box::new(forwarding::ForwardingRule));
        registry.register_fix(Box::new(forwarding::ForwardToCollectionChildren));

        for target in CommentTarget::ALL {
            registry.register_rule(Box::new(comments::CommentRule::new(target)));
            registry.register_fix(Box::new(comments::RemoveComments::new(target)));
        }

        registry.register_rule(Box::new(static_import::StaticImportRule));
        registry.register_fix(Box::new(static_import::ImportTypeAsStatic));

        for descriptor in COMPILER_DESCRIPTORS {
            registry.register_rule(Box::new(compiler::CompilerRule::new(descriptor)));
        }
        registry.register_fix(Box::new(compiler::ThrowInBranchesWithoutExit));
        registry.register_fix(Box::new(compiler::RewriteParameters));
        registry.register_fix(Box::new(compiler::ChangeReturnType));
        registry.register_fix(Box::new(compiler::WrapInTaskResult));
        registry.register_fix(Box::new(compiler::UnwrapTaskFromResult));

        registry
    }

    pub fn register_rule(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn register_fix(&mut self, fix: Box<dyn FixProvider>) {
        self.fixes.push(fix);
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    /// Descriptors of every registered rule, sorted by id.
    pub fn descriptors(&self) -> Vec<&'static RuleDescriptor> {
        let mut descriptors: Vec<_> = self.rules.iter().map(|rule| rule.descriptor()).collect();
        descriptors.sort_by_key(|descriptor| descriptor.id);
        descriptors.dedup_by_key(|descriptor| descriptor.id);
        descriptors
    }

    pub fn descriptor(&self, rule_id: &str) -> Option<&'static RuleDescriptor> {
        self.rules
            .iter()
            .map(|rule| rule.descriptor())
            .find(|descriptor| descriptor.id.eq_ignore_ascii_case(rule_id))
    }

    /// Fix providers for `rule_id`, in registration order.
    pub fn fixes_for<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a dyn FixProvider> {
        self.fixes
            .iter()
            .map(|fix| fix.as_ref())
            .filter(move |fix| fix.rule_id().eq_ignore_ascii_case(rule_id))
    }

    pub fn is_fixable(&self, rule_id: &str) -> bool {
        self.fixes_for(rule_id).next().is_some()
    }

    /// Fail on the first id no registered rule owns.
    pub fn check_rule_ids<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a String>,
    ) -> Result<(), SharpfixError> {
        match ids.into_iter().find(|id| self.descriptor(id).is_none()) {
            Some(unknown) => Err(SharpfixError::unknown_rule(unknown.clone())),
            None => Ok(()),
        }
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        RuleRegistry::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_lists_every_rule_once() {
        let registry = RuleRegistry::builtin();
        let ids: Vec<&str> = registry.descriptors().iter().map(|d| d.id).collect();
        assert_eq!(
            ids,
            vec![
                "ACA0001", "ACA0002", "ACA0003", "ACA0004", "ACA0005", "ACA0006", "CS0123",
                "CS0161", "CS0407", "CS1998", "CS4016",
            ]
        );
    }

    #[test]
    fn every_builtin_rule_is_fixable() {
        let registry = RuleRegistry::builtin();
        for descriptor in registry.descriptors() {
            assert!(registry.is_fixable(descriptor.id), "{}", descriptor.id);
        }
        assert!(registry.is_fixable("cs0161"));
    }

    #[test]
    fn unknown_rule_ids_are_reported() {
        let registry = RuleRegistry::builtin();
        let ids = vec!["ACA0006".to_string(), "ACA9999".to_string()];
        let err = registry.check_rule_ids(&ids).unwrap_err();
        assert_eq!(err.to_string(), "unknown rule id 'ACA9999'");
        assert!(registry.check_rule_ids(&ids[..1]).is_ok());
    }
}
