//! Diagnostic-to-fix dispatch.
//!
//! For each diagnostic the [`FixDispatcher`] asks every fix provider of the
//! diagnostic's rule for a fixed document. A fix whose tree is structurally
//! equivalent to the input is dropped; the rest become [`FixCandidate`]s with
//! a title from the resource provider and an equivalence key.
//!
//! # Fix all
//!
//! [`FixDispatcher::fix_all`] applies every candidate sharing one
//! equivalence key at once. Each fix is computed independently from the
//! pristine document and lowered to text edits with
//! [`sharpfix_cst::diff_trees`]. Edits are offered per fix in document order:
//! identical edits collapse, and a fix whose edits overlap an accepted fix is
//! skipped whole. The merged text is parsed again to produce the result.

use sharpfix_core::cancel::CancellationToken;
use sharpfix_core::diagnostic::Diagnostic;
use sharpfix_core::error::SharpfixError;
use sharpfix_core::patch::{EditOutcome, EditSet};
use sharpfix_core::resources::ResourceProvider;
use sharpfix_cst::diff_trees;
use tracing::{debug, warn};

use crate::document::Document;
use crate::rules::{FixProvider, RuleRegistry};

/// A fix offered for one diagnostic.
#[derive(Debug, Clone)]
pub struct FixCandidate {
    pub title: String,
    pub equivalence_key: String,
    pub diagnostic: Diagnostic,
    document: Document,
}

impl FixCandidate {
    /// The fixed document. Computed once when the candidate was registered.
    pub fn apply(&self) -> Document {
        self.document.clone()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

/// Result of [`FixDispatcher::fix_all`].
#[derive(Debug, Clone)]
pub struct FixAllOutcome {
    pub document: Document,
    /// Candidates whose edits made it into `document`, in document order.
    pub applied: Vec<FixCandidate>,
    /// Candidates dropped because they overlapped an applied fix.
    pub skipped: Vec<FixCandidate>,
}

/// Computes fix candidates for diagnostics.
pub struct FixDispatcher<'a> {
    registry: &'a RuleRegistry,
    resources: &'a dyn ResourceProvider,
    cancel: CancellationToken,
}

impl<'a> FixDispatcher<'a> {
    pub fn new(registry: &'a RuleRegistry, resources: &'a dyn ResourceProvider) -> Self {
        FixDispatcher {
            registry,
            resources,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Every fix for `diagnostic` that changes `document`.
    pub fn candidates(&self, document: &Document, diagnostic: &Diagnostic) -> Vec<FixCandidate> {
        self.registry
            .fixes_for(&diagnostic.rule_id)
            .filter_map(|fix| self.candidate(fix, document, diagnostic))
            .collect()
    }

    /// Candidates for each diagnostic, in diagnostic order. Stops early when
    /// cancelled and returns what it has.
    pub fn candidates_for_all(
        &self,
        document: &Document,
        diagnostics: &[Diagnostic],
    ) -> Vec<FixCandidate> {
        let mut candidates = Vec::new();
        for diagnostic in diagnostics {
            if self.cancel.is_cancelled() {
                debug!(path = document.path(), "fix computation cancelled");
                break;
            }
            candidates.extend(self.candidates(document, diagnostic));
        }
        candidates
    }

    fn candidate(
        &self,
        fix: &dyn FixProvider,
        document: &Document,
        diagnostic: &Diagnostic,
    ) -> Option<FixCandidate> {
        let fixed = fix.fixed_document(document, diagnostic);
        if fixed.is_equivalent_to(document) {
            debug!(
                rule = %diagnostic.rule_id,
                fix = fix.fix_name(),
                span = %diagnostic.span,
                "fix is a no-op, dropped"
            );
            return None;
        }
        let title = self
            .resources
            .fix_title(fix.fix_name(), &fix.title_args(diagnostic, &fixed));
        Some(FixCandidate {
            title,
            equivalence_key: fix.equivalence_key(diagnostic),
            diagnostic: diagnostic.clone(),
            document: fixed,
        })
    }

    /// Apply every candidate with `equivalence_key` in one pass.
    pub fn fix_all(
        &self,
        document: &Document,
        diagnostics: &[Diagnostic],
        equivalence_key: &str,
    ) -> Result<FixAllOutcome, SharpfixError> {
        let mut ordered: Vec<&Diagnostic> = diagnostics.iter().collect();
        ordered.sort_by(|a, b| a.span.cmp(&b.span).then_with(|| a.rule_id.cmp(&b.rule_id)));

        let mut edits = EditSet::new();
        let mut applied = Vec::new();
        let mut skipped = Vec::new();
        for diagnostic in ordered {
            if self.cancel.is_cancelled() {
                debug!(path = document.path(), "fix all cancelled");
                break;
            }
            for candidate in self.candidates(document, diagnostic) {
                if candidate.equivalence_key != equivalence_key {
                    continue;
                }
                let group = diff_trees(document.root(), candidate.document.root());
                match edits.offer_group(group) {
                    EditOutcome::Accepted | EditOutcome::Duplicate => applied.push(candidate),
                    EditOutcome::Conflict => {
                        warn!(
                            path = document.path(),
                            key = equivalence_key,
                            span = %candidate.diagnostic.span,
                            "fix overlaps an earlier fix, skipped"
                        );
                        skipped.push(candidate);
                    }
                }
            }
        }

        if edits.is_empty() {
            return Ok(FixAllOutcome {
                document: document.clone(),
                applied,
                skipped,
            });
        }
        let text = edits.apply(&document.text())?;
        let fixed = Document::parse(document.path(), &text)?;
        Ok(FixAllOutcome {
            document: fixed,
            applied,
            skipped,
        })
    }
}
