//! Command implementations behind the `sharpfix` binary.
//!
//! Each command returns a serializable response; `main.rs` owns argument
//! parsing, logging setup and printing.
//!
//! ## Error Handling
//!
//! All commands return `Result<T, SharpfixError>`. Rule-level outcomes
//! (nothing to fix, a fix that overlaps another) are part of the response,
//! not errors.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use sharpfix_core::diff::generate_unified_diff;
use sharpfix_core::error::SharpfixError;
use sharpfix_core::output::{
    AnalyzeResponse, AppliedFix, DiagnosticInfo, FileDiagnostics, FixResponse, RuleInfo,
    RulesResponse, SCHEMA_VERSION,
};
use sharpfix_core::patch::ContentHash;
use sharpfix_core::resources::ResourceProvider;
use sharpfix_core::text::byte_offset_to_position;
use sharpfix_csharp::{
    AnalysisConfig, AnalysisDriver, Document, EnglishResources, FixCandidate, FixDispatcher,
    RuleRegistry,
};
use tracing::{debug, info, info_span, warn};

use crate::files::{collect_csharp_files, read_source, write_atomic};

// ============================================================================
// Analyze
// ============================================================================

/// Analyze every C# file under `paths`, in parallel.
///
/// Files are reported in path order whatever order the workers finish in.
/// A file that cannot be read or parsed is reported with its error and does
/// not stop the others.
pub fn analyze_paths(
    paths: &[PathBuf],
    registry: &RuleRegistry,
    config: &AnalysisConfig,
) -> Result<AnalyzeResponse, SharpfixError> {
    let files = collect_csharp_files(paths)?;
    let _span = info_span!("analyze", files = files.len()).entered();

    let driver = AnalysisDriver::new(registry, config);
    let results: Vec<FileDiagnostics> = files
        .par_iter()
        .map(|path| {
            let shown = path.display().to_string();
            match analyze_file(path, &shown, &driver) {
                Ok(diagnostics) => FileDiagnostics::analyzed(shown, diagnostics),
                Err(err) => {
                    warn!(path = %shown, error = %err, "file skipped");
                    FileDiagnostics::failed(shown, &err)
                }
            }
        })
        .collect();

    let response = AnalyzeResponse::new(results);
    info!(total = response.total, failed = response.failed, "analysis complete");
    Ok(response)
}

fn analyze_file(
    path: &Path,
    shown: &str,
    driver: &AnalysisDriver<'_>,
) -> Result<Vec<DiagnosticInfo>, SharpfixError> {
    let text = read_source(path)?;
    let document = Document::parse(shown, &text)?;
    Ok(driver
        .analyze(&document)
        .iter()
        .map(|d| DiagnosticInfo::from_diagnostic(d, &text, &EnglishResources))
        .collect())
}

// ============================================================================
// Fix
// ============================================================================

/// Options for [`fix_file`].
#[derive(Debug, Clone, Default)]
pub struct FixOptions {
    /// Apply only fixes with this equivalence key. When absent, every key
    /// offered for the file is applied, one batch per key.
    pub equivalence_key: Option<String>,
    /// Write the fixed text back to the file.
    pub write: bool,
}

/// Fix one file. Without `write` this is a dry run that only reports the
/// diff.
pub fn fix_file(
    path: &Path,
    registry: &RuleRegistry,
    config: &AnalysisConfig,
    options: &FixOptions,
) -> Result<FixResponse, SharpfixError> {
    let shown = path.display().to_string();
    let _span = info_span!("fix", path = %shown).entered();
    let original = read_source(path)?;
    let driver = AnalysisDriver::new(registry, config);
    let dispatcher = FixDispatcher::new(registry, &EnglishResources);

    let mut document = Document::parse(shown.as_str(), &original)?;
    let keys = match &options.equivalence_key {
        Some(key) => vec![key.clone()],
        None => offered_keys(&dispatcher, &driver, &document),
    };

    let mut applied = Vec::new();
    let mut skipped = 0;
    for key in keys {
        let diagnostics = driver.analyze(&document);
        let outcome = dispatcher.fix_all(&document, &diagnostics, &key)?;
        let text = document.text();
        debug!(
            key = %key,
            applied = outcome.applied.len(),
            skipped = outcome.skipped.len(),
            "fix batch"
        );
        applied.extend(outcome.applied.iter().map(|c| applied_fix(c, &text)));
        skipped += outcome.skipped.len();
        document = outcome.document;
    }

    let fixed = document.text();
    let diff = generate_unified_diff(&shown, &original, &fixed);
    let written = options.write && fixed != original;
    if written {
        write_atomic(path, &fixed)?;
        info!(fixes = applied.len(), "file written");
    }

    Ok(FixResponse {
        status: "ok".to_string(),
        schema_version: SCHEMA_VERSION.to_string(),
        path: shown,
        original_hash: ContentHash::compute(original.as_bytes()),
        applied,
        skipped,
        written,
        diff,
    })
}

/// Equivalence keys of every fix offered for `document`, in the order of
/// the diagnostics that offer them.
fn offered_keys(
    dispatcher: &FixDispatcher<'_>,
    driver: &AnalysisDriver<'_>,
    document: &Document,
) -> Vec<String> {
    let diagnostics = driver.analyze(document);
    let mut seen = BTreeSet::new();
    dispatcher
        .candidates_for_all(document, &diagnostics)
        .into_iter()
        .map(|candidate| candidate.equivalence_key)
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

fn applied_fix(candidate: &FixCandidate, text: &str) -> AppliedFix {
    let (line, col) = byte_offset_to_position(text, candidate.diagnostic.span.start);
    AppliedFix {
        title: candidate.title.clone(),
        equivalence_key: candidate.equivalence_key.clone(),
        rule_id: candidate.diagnostic.rule_id.clone(),
        line,
        col,
    }
}

// ============================================================================
// Rules
// ============================================================================

/// Every registered rule, with whether `config` enables it.
pub fn list_rules(registry: &RuleRegistry, config: &AnalysisConfig) -> RulesResponse {
    let resources = EnglishResources;
    let rules = registry
        .descriptors()
        .into_iter()
        .map(|descriptor| RuleInfo {
            id: descriptor.id.to_string(),
            title: resources
                .rule_title(descriptor.id)
                .unwrap_or(descriptor.id)
                .to_string(),
            category: descriptor.category.to_string(),
            default_severity: config.severity_for(descriptor),
            enabled_by_default: config.is_enabled(descriptor),
            fixable: registry.is_fixable(descriptor.id),
        })
        .collect();
    RulesResponse::new(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const COMMENTED: &str = "class C\n{\n    void M()\n    {\n        // note\n        Run();\n    }\n}\n";

    fn workspace(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(temp.path().join(name), content).unwrap();
        }
        temp
    }

    #[test]
    fn analyze_reports_files_in_path_order() {
        let temp = workspace(&[("B.cs", COMMENTED), ("A.cs", "class A\n{\n}\n")]);
        let response = analyze_paths(
            &[temp.path().to_path_buf()],
            &RuleRegistry::builtin(),
            &AnalysisConfig::default(),
        )
        .unwrap();
        assert_eq!(response.files.len(), 2);
        assert!(response.files[0].path.ends_with("A.cs"));
        assert!(response.files[0].diagnostics.is_empty());
        let rules: Vec<&str> = response.files[1]
            .diagnostics
            .iter()
            .map(|d| d.rule_id.as_str())
            .collect();
        assert_eq!(rules, vec!["ACA0002", "ACA0003"]);
        assert_eq!(response.total, 2);
    }

    #[test]
    fn unparseable_file_does_not_stop_the_others() {
        let temp = workspace(&[
            ("A.cs", COMMENTED),
            ("B.cs", "class B\n{\n    void M(\n"),
        ]);
        let response = analyze_paths(
            &[temp.path().to_path_buf()],
            &RuleRegistry::builtin(),
            &AnalysisConfig::default(),
        )
        .unwrap();
        assert_eq!(response.files.len(), 2);
        assert_eq!(response.failed, 1);
        assert!(response.files[0].error.is_none());
        assert_eq!(response.files[0].diagnostics.len(), 2);
        let broken = &response.files[1];
        assert!(broken.path.ends_with("B.cs"));
        assert!(broken.diagnostics.is_empty());
        assert_eq!(broken.error.as_ref().unwrap().code, 5);
    }

    #[test]
    fn fix_runs_under_a_subscriber() {
        let temp = workspace(&[("C.cs", COMMENTED)]);
        let path = temp.path().join("C.cs");
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(std::io::sink)
            .finish();
        let response = tracing::subscriber::with_default(subscriber, || {
            fix_file(
                &path,
                &RuleRegistry::builtin(),
                &AnalysisConfig::default(),
                &FixOptions::default(),
            )
        })
        .unwrap();
        assert!(response.path.ends_with("C.cs"));
        assert!(!response.applied.is_empty());
    }

    #[test]
    fn dry_run_leaves_the_file_alone() {
        let temp = workspace(&[("C.cs", COMMENTED)]);
        let path = temp.path().join("C.cs");
        let options = FixOptions {
            equivalence_key: Some("ACA0003-FixByRemovingMethodComments".to_string()),
            write: false,
        };
        let response = fix_file(
            &path,
            &RuleRegistry::builtin(),
            &AnalysisConfig::default(),
            &options,
        )
        .unwrap();
        assert_eq!(response.applied.len(), 1);
        assert_eq!(response.applied[0].rule_id, "ACA0003");
        assert!(!response.written);
        assert!(response.diff.contains("-        // note"));
        assert_eq!(fs::read_to_string(&path).unwrap(), COMMENTED);
    }

    #[test]
    fn fix_without_key_applies_every_batch() {
        let temp = workspace(&[("C.cs", COMMENTED)]);
        let path = temp.path().join("C.cs");
        let options = FixOptions {
            equivalence_key: None,
            write: true,
        };
        let response = fix_file(
            &path,
            &RuleRegistry::builtin(),
            &AnalysisConfig::default(),
            &options,
        )
        .unwrap();
        assert!(response.written);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "class C\n{\n    void M()\n    {\n        Run();\n    }\n}\n"
        );
        assert_eq!(response.original_hash, ContentHash::compute(COMMENTED.as_bytes()));
    }

    #[test]
    fn rules_listing_reflects_configuration() {
        let config = AnalysisConfig::default().with_cli_rules(vec![], vec!["ACA0006".into()]);
        let response = list_rules(&RuleRegistry::builtin(), &config);
        let import = response.rules.iter().find(|r| r.id == "ACA0006").unwrap();
        assert!(!import.enabled_by_default);
        assert!(import.fixable);
        assert_eq!(import.title, "Static type can be imported");
        assert!(response.rules.iter().any(|r| r.id == "CS0161"));
    }
}
