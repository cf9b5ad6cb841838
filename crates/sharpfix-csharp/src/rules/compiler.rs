//! Fixes for compiler diagnostics.
//!
//! | Id     | Fix                                   |
//! |--------|---------------------------------------|
//! | CS0161 | throw in branches without an exit     |
//! | CS0123 | rewrite return and parameter types    |
//! | CS0407 | rewrite the return type               |
//! | CS1998 | drop `async`, wrap in `Task.FromResult` |
//! | CS4016 | unwrap `Task.FromResult`              |

use sharpfix_core::diagnostic::{Diagnostic, RuleDescriptor};
use sharpfix_cst::{SyntaxKind, SyntaxNode};

use super::{annotation_args, FixProvider, Rule, RuleContext};
use crate::descriptors::{CS0123, CS0161, CS0407, CS1998, CS4016};
use crate::document::Document;
use crate::rewrite::branch_exit::inject_branch_exits;
use crate::rewrite::signature::{match_delegate_signature, SignaturePart};
use crate::rewrite::task_result::{unwrap_task_from_result, wrap_in_task_result};
use crate::rewrite::{method_at, node_at};
use crate::semantic::compiler::node_diagnostics;

// ============================================================================
// Rules
// ============================================================================

/// Reports one compiler diagnostic id.
pub struct CompilerRule {
    descriptor: &'static RuleDescriptor,
}

impl CompilerRule {
    pub fn new(descriptor: &'static RuleDescriptor) -> Self {
        CompilerRule { descriptor }
    }
}

impl Rule for CompilerRule {
    fn descriptor(&self) -> &'static RuleDescriptor {
        self.descriptor
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        if self.descriptor.id == CS0123.id || self.descriptor.id == CS0407.id {
            &[SyntaxKind::ObjectCreationExpression]
        } else {
            &[SyntaxKind::MethodDeclaration]
        }
    }

    fn analyze(&self, node: &SyntaxNode, context: &RuleContext<'_>) -> Vec<Diagnostic> {
        node_diagnostics(context.model, node)
            .into_iter()
            .filter(|d| d.is_rule(self.descriptor.id))
            .collect()
    }
}

// ============================================================================
// Fixes
// ============================================================================

/// CS0161.
pub struct ThrowInBranchesWithoutExit;

impl FixProvider for ThrowInBranchesWithoutExit {
    fn rule_id(&self) -> &'static str {
        CS0161.id
    }

    fn fix_name(&self) -> &'static str {
        "FixByReplacingWithThrowExpression"
    }

    fn fix_root(&self, document: &Document, diagnostic: &Diagnostic) -> Option<SyntaxNode> {
        let method = method_at(document.root(), diagnostic.span)?;
        inject_branch_exits(&method)
    }

    fn title_args(&self, _diagnostic: &Diagnostic, fixed: &Document) -> Vec<String> {
        annotation_args(fixed)
    }
}

/// CS0123.
pub struct RewriteParameters;

impl FixProvider for RewriteParameters {
    fn rule_id(&self) -> &'static str {
        CS0123.id
    }

    fn fix_name(&self) -> &'static str {
        "FixByRewritingParameters"
    }

    fn fix_root(&self, document: &Document, diagnostic: &Diagnostic) -> Option<SyntaxNode> {
        let model = document.semantic_model();
        let argument = node_at(model.root(), diagnostic.span, SyntaxKind::Argument)?;
        match_delegate_signature(&model, &argument, SignaturePart::ReturnAndParameters)
    }

    fn title_args(&self, _diagnostic: &Diagnostic, fixed: &Document) -> Vec<String> {
        annotation_args(fixed)
    }
}

/// CS0407.
pub struct ChangeReturnType;

impl FixProvider for ChangeReturnType {
    fn rule_id(&self) -> &'static str {
        CS0407.id
    }

    fn fix_name(&self) -> &'static str {
        "FixByChangingReturnTypeOfMethod"
    }

    fn fix_root(&self, document: &Document, diagnostic: &Diagnostic) -> Option<SyntaxNode> {
        let model = document.semantic_model();
        let argument = node_at(model.root(), diagnostic.span, SyntaxKind::Argument)?;
        match_delegate_signature(&model, &argument, SignaturePart::ReturnType)
    }

    fn title_args(&self, _diagnostic: &Diagnostic, fixed: &Document) -> Vec<String> {
        annotation_args(fixed)
    }
}

/// CS1998.
pub struct WrapInTaskResult;

impl FixProvider for WrapInTaskResult {
    fn rule_id(&self) -> &'static str {
        CS1998.id
    }

    fn fix_name(&self) -> &'static str {
        "FixByWrappingInTaskResult"
    }

    fn fix_root(&self, document: &Document, diagnostic: &Diagnostic) -> Option<SyntaxNode> {
        let model = document.semantic_model();
        let method = method_at(model.root(), diagnostic.span)?;
        wrap_in_task_result(&model, &method)
    }
}

/// CS4016.
pub struct UnwrapTaskFromResult;

impl FixProvider for UnwrapTaskFromResult {
    fn rule_id(&self) -> &'static str {
        CS4016.id
    }

    fn fix_name(&self) -> &'static str {
        "FixByUnwrappingTaskFromResult"
    }

    fn fix_root(&self, document: &Document, diagnostic: &Diagnostic) -> Option<SyntaxNode> {
        unwrap_task_from_result(document.root(), diagnostic.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;

    fn analyze(rule: &CompilerRule, source: &str) -> (Document, Vec<Diagnostic>) {
        let document = Document::parse("Test.cs", source).unwrap();
        let model = document.semantic_model();
        let config = AnalysisConfig::default();
        let context = RuleContext {
            model: &model,
            config: &config,
        };
        let diagnostics = document
            .root()
            .descendants()
            .filter(|n| rule.node_kinds().contains(&n.kind()))
            .flat_map(|n| rule.analyze(&n, &context))
            .collect();
        (document, diagnostics)
    }

    #[test]
    fn each_rule_reports_only_its_own_id() {
        let source = "using System.Threading.Tasks;\n\nclass C\n{\n    async Task<int> Get(bool a)\n    {\n        if (a)\n        {\n            return 1;\n        }\n    }\n}\n";
        let (_, missing) = analyze(&CompilerRule::new(&CS0161), source);
        let (_, no_await) = analyze(&CompilerRule::new(&CS1998), source);
        let (_, task) = analyze(&CompilerRule::new(&CS4016), source);
        assert_eq!(missing.len(), 1);
        assert!(missing[0].is_rule("CS0161"));
        assert_eq!(no_await.len(), 1);
        assert!(task.is_empty());
    }

    #[test]
    fn missing_return_title_uses_annotations() {
        let source = "using System;\n\nclass C\n{\n    int M(bool a)\n    {\n        if (a)\n        {\n            Log();\n        }\n        else\n        {\n            return 2;\n        }\n    }\n}\n";
        let (document, diagnostics) = analyze(&CompilerRule::new(&CS0161), source);
        let fixed = ThrowInBranchesWithoutExit.fixed_document(&document, &diagnostics[0]);
        assert_eq!(
            ThrowInBranchesWithoutExit.title_args(&diagnostics[0], &fixed),
            vec!["M".to_string(), "int".to_string()]
        );
        assert!(fixed
            .text()
            .contains("        {\n            throw new NotImplementedException();\n            Log();\n"));
    }

    #[test]
    fn task_from_result_is_unwrapped_at_the_reported_expression() {
        let source = "using System.Threading.Tasks;\n\nclass C\n{\n    async Task<int> Get()\n    {\n        await Task.Delay(1);\n        return Task.FromResult(3);\n    }\n}\n";
        let (document, diagnostics) = analyze(&CompilerRule::new(&CS4016), source);
        assert_eq!(diagnostics.len(), 1);
        let fixed = UnwrapTaskFromResult.fixed_document(&document, &diagnostics[0]);
        assert!(fixed.text().contains("        return 3;\n"));
        assert_eq!(
            UnwrapTaskFromResult.equivalence_key(&diagnostics[0]),
            "CS4016-FixByUnwrappingTaskFromResult"
        );
    }
}
