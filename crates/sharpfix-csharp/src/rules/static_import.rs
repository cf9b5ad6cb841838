//! ACA0006: import a heavily used static class with `using static`.

use sharpfix_core::diagnostic::{Diagnostic, DiagnosticPayload, RuleDescriptor};
use sharpfix_cst::{SyntaxKind, SyntaxNode};

use super::{FixProvider, Rule, RuleContext};
use crate::descriptors::ACA0006;
use crate::detectors::detect_static_imports;
use crate::document::Document;
use crate::rewrite::static_import::import_type_as_static;

pub struct StaticImportRule;

impl Rule for StaticImportRule {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &ACA0006
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::MemberAccessExpression]
    }

    fn analyze(&self, node: &SyntaxNode, context: &RuleContext<'_>) -> Vec<Diagnostic> {
        detect_static_imports(node, context.model, context.config.static_import_threshold)
    }
}

pub struct ImportTypeAsStatic;

impl FixProvider for ImportTypeAsStatic {
    fn rule_id(&self) -> &'static str {
        ACA0006.id
    }

    fn fix_name(&self) -> &'static str {
        "FixByImportingTypeAsStatic"
    }

    fn fix_root(&self, document: &Document, diagnostic: &Diagnostic) -> Option<SyntaxNode> {
        let DiagnosticPayload::StaticImport { type_name } = &diagnostic.payload else {
            return None;
        };
        import_type_as_static(&document.semantic_model(), type_name)
    }
}
