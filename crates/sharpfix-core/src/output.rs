//! JSON output types and serialization for CLI responses.
//!
//! ## Design Principles
//!
//! 1. **Structured JSON:** All CLI output is valid JSON on stdout
//! 2. **Status first:** Every response has `status` as first field
//! 3. **Deterministic:** Same input -> same output (field order, array ordering)
//! 4. **Versioned:** Schema version in response enables forward compatibility

use std::collections::BTreeMap;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::diagnostic::{Diagnostic, Severity};
use crate::error::{OutputErrorCode, SharpfixError};
use crate::patch::{ContentHash, Span};
use crate::resources::ResourceProvider;
use crate::text::byte_offset_to_position;

/// Current schema version for all responses.
pub const SCHEMA_VERSION: &str = "1";

// ============================================================================
// Diagnostic Output
// ============================================================================

/// A diagnostic rendered for output, with its message resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticInfo {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    /// 1-indexed line of the diagnostic start.
    pub line: u32,
    /// 1-indexed column of the diagnostic start.
    pub col: u32,
    pub span: Span,
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub properties: BTreeMap<String, String>,
}

impl DiagnosticInfo {
    /// Render `diagnostic` against the text it was computed on.
    pub fn from_diagnostic(
        diagnostic: &Diagnostic,
        text: &str,
        resources: &dyn ResourceProvider,
    ) -> Self {
        let (line, col) = byte_offset_to_position(text, diagnostic.span.start);
        DiagnosticInfo {
            rule_id: diagnostic.rule_id.clone(),
            severity: diagnostic.severity,
            message: resources.message(&diagnostic.rule_id, &diagnostic.message_args),
            line,
            col,
            span: diagnostic.span,
            args: diagnostic.message_args.clone(),
            properties: diagnostic.properties(),
        }
    }
}

/// Diagnostics for one file, or why the file could not be analyzed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDiagnostics {
    pub path: String,
    pub diagnostics: Vec<DiagnosticInfo>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<ErrorInfo>,
}

impl FileDiagnostics {
    pub fn analyzed(path: impl Into<String>, diagnostics: Vec<DiagnosticInfo>) -> Self {
        FileDiagnostics {
            path: path.into(),
            diagnostics,
            error: None,
        }
    }

    /// A file that failed to read or parse. It reports no diagnostics.
    pub fn failed(path: impl Into<String>, err: &SharpfixError) -> Self {
        FileDiagnostics {
            path: path.into(),
            diagnostics: Vec::new(),
            error: Some(ErrorInfo::from_error(err)),
        }
    }
}

/// Response for `sharpfix analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub status: String,
    pub schema_version: String,
    pub files: Vec<FileDiagnostics>,
    /// Total diagnostics across all files.
    pub total: usize,
    /// Files that could not be analyzed.
    pub failed: usize,
}

impl AnalyzeResponse {
    pub fn new(files: Vec<FileDiagnostics>) -> Self {
        let total = files.iter().map(|f| f.diagnostics.len()).sum();
        let failed = files.iter().filter(|f| f.error.is_some()).count();
        AnalyzeResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            files,
            total,
            failed,
        }
    }
}

// ============================================================================
// Fix Output
// ============================================================================

/// One fix that was applied (or would be, in dry-run mode).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedFix {
    pub title: String,
    pub equivalence_key: String,
    pub rule_id: String,
    pub line: u32,
    pub col: u32,
}

/// Response for `sharpfix fix`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixResponse {
    pub status: String,
    pub schema_version: String,
    pub path: String,
    /// Hash of the text the fixes were computed against.
    pub original_hash: ContentHash,
    pub applied: Vec<AppliedFix>,
    /// Fixes dropped because their edits overlapped an applied fix.
    pub skipped: usize,
    pub written: bool,
    /// Unified diff of the change (empty when nothing changed).
    pub diff: String,
}

/// Rule listing entry for `sharpfix rules`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleInfo {
    pub id: String,
    pub title: String,
    pub category: String,
    pub default_severity: Severity,
    pub enabled_by_default: bool,
    pub fixable: bool,
}

/// Response for `sharpfix rules`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesResponse {
    pub status: String,
    pub schema_version: String,
    pub rules: Vec<RuleInfo>,
}

impl RulesResponse {
    pub fn new(rules: Vec<RuleInfo>) -> Self {
        RulesResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            rules,
        }
    }
}

// ============================================================================
// Error Output
// ============================================================================

/// Error details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: u8,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorInfo {
    pub fn from_error(err: &SharpfixError) -> Self {
        let details = match err {
            SharpfixError::InvalidArguments { details, .. } => details.clone(),
            SharpfixError::ParseError { path, line, col, .. } => Some(serde_json::json!({
                "path": path,
                "line": line,
                "col": col,
            })),
            SharpfixError::ApplyError {
                file: Some(file), ..
            } => Some(serde_json::json!({ "file": file })),
            _ => None,
        };
        ErrorInfo {
            code: OutputErrorCode::from(err).code(),
            message: err.to_string(),
            details,
        }
    }
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub schema_version: String,
    pub error: ErrorInfo,
}

impl ErrorResponse {
    pub fn from_error(err: &SharpfixError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo::from_error(err),
        }
    }
}

/// Serialize `response` as pretty JSON to `writer`, followed by a newline.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response).map_err(io::Error::other)?;
    writeln!(writer, "{}", json)?;
    writer.flush()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{DiagnosticPayload, RuleDescriptor};

    struct Plain;

    impl ResourceProvider for Plain {
        fn rule_title(&self, _rule_id: &str) -> Option<&str> {
            None
        }

        fn message_format(&self, _rule_id: &str) -> Option<&str> {
            Some("forward {0} to {1}")
        }

        fn fix_title_format(&self, _fix_name: &str) -> Option<&str> {
            None
        }
    }

    const RULE: RuleDescriptor = RuleDescriptor {
        id: "ACA0001",
        category: "CodeGeneration",
        default_severity: Severity::Info,
        enabled_by_default: true,
    };

    #[test]
    fn diagnostic_info_resolves_message_and_position() {
        let text = "class A\n{\n    void Method1() {}\n}";
        let start = text.find("Method1").unwrap();
        let diagnostic = Diagnostic::new(
            &RULE,
            Span::new(start, start + 7),
            vec!["Method1".into(), "_items".into()],
        )
        .with_payload(DiagnosticPayload::Forwarding {
            member_name: "_items".into(),
        });

        let info = DiagnosticInfo::from_diagnostic(&diagnostic, text, &Plain);
        assert_eq!(info.message, "forward Method1 to _items");
        assert_eq!((info.line, info.col), (3, 10));
        assert_eq!(info.properties["MemberName"], "_items");
    }

    #[test]
    fn status_is_first_field() {
        let response = AnalyzeResponse::new(vec![]);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.starts_with("{\"status\":\"ok\""));
        assert!(json.contains("\"total\":0"));
    }

    #[test]
    fn error_response_carries_code_and_details() {
        let err = SharpfixError::ParseError {
            path: "A.cs".into(),
            line: 2,
            col: 4,
            message: "expected ';'".into(),
        };
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.status, "error");
        assert_eq!(response.error.code, 5);
        assert_eq!(response.error.details.as_ref().unwrap()["line"], 2);
    }

    #[test]
    fn failed_files_are_counted_and_carry_their_error() {
        let err = SharpfixError::ParseError {
            path: "B.cs".into(),
            line: 1,
            col: 37,
            message: "expected ';'".into(),
        };
        let response = AnalyzeResponse::new(vec![
            FileDiagnostics::analyzed("A.cs", vec![]),
            FileDiagnostics::failed("B.cs", &err),
        ]);
        assert_eq!(response.failed, 1);
        assert_eq!(response.total, 0);
        assert_eq!(response.files[1].error.as_ref().unwrap().code, 5);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["files"][0].get("error").is_none());
        assert_eq!(json["files"][1]["error"]["details"]["path"], "B.cs");
    }

    #[test]
    fn emit_writes_pretty_json_line() {
        let mut buffer = Vec::new();
        emit_response(&RulesResponse::new(vec![]), &mut buffer).unwrap();
        let out = String::from_utf8(buffer).unwrap();
        assert!(out.ends_with("}\n"));
        assert!(out.contains("\"schema_version\": \"1\""));
    }
}
