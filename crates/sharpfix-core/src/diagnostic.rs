//! Diagnostics and rule descriptors.
//!
//! A [`Diagnostic`] is produced by a pattern detector and consumed by the fix
//! provider of the same rule. Rule-specific data needed by the fix stage
//! travels in a typed [`DiagnosticPayload`] rather than a string map;
//! [`Diagnostic::properties`] renders it as key/value pairs for output.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::patch::Span;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(name)
    }
}

/// Static description of a rule, registered once per rule.
///
/// Immutable for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDescriptor {
    /// Stable rule id, e.g. `ACA0001` or `CS0161`.
    pub id: &'static str,
    pub category: &'static str,
    pub default_severity: Severity,
    pub enabled_by_default: bool,
}

/// Typed, rule-specific data carried from detection to fixing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticPayload {
    #[default]
    None,
    /// The collection member an interface method should forward to.
    Forwarding { member_name: String },
    /// The fully qualified static type to import.
    StaticImport { type_name: String },
}

/// A single finding of a rule at a location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub rule_id: String,
    pub span: Span,
    pub severity: Severity,
    pub message_args: Vec<String>,
    pub payload: DiagnosticPayload,
}

impl Diagnostic {
    /// Create a diagnostic with the descriptor's default severity.
    pub fn new(descriptor: &RuleDescriptor, span: Span, message_args: Vec<String>) -> Self {
        Diagnostic {
            rule_id: descriptor.id.to_string(),
            span,
            severity: descriptor.default_severity,
            message_args,
            payload: DiagnosticPayload::None,
        }
    }

    pub fn with_payload(mut self, payload: DiagnosticPayload) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Whether this diagnostic belongs to `rule_id` (ids compare case-insensitively).
    pub fn is_rule(&self, rule_id: &str) -> bool {
        self.rule_id.eq_ignore_ascii_case(rule_id)
    }

    /// The forwarding member name, if this is a forwarding diagnostic.
    pub fn forwarding_member(&self) -> Option<&str> {
        match &self.payload {
            DiagnosticPayload::Forwarding { member_name } => Some(member_name),
            _ => None,
        }
    }

    /// The payload as ordered key/value pairs.
    pub fn properties(&self) -> BTreeMap<String, String> {
        let mut properties = BTreeMap::new();
        match &self.payload {
            DiagnosticPayload::None => {}
            DiagnosticPayload::Forwarding { member_name } => {
                properties.insert("MemberName".to_string(), member_name.clone());
            }
            DiagnosticPayload::StaticImport { type_name } => {
                properties.insert("TypeName".to_string(), type_name.clone());
            }
        }
        properties
    }
}

// ============================================================================
// Tests
// ============================================================================
