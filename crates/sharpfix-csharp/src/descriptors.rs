//! One descriptor per built-in rule.

use sharpfix_core::diagnostic::{RuleDescriptor, Severity};

pub use crate::semantic::compiler::{CS0123, CS0161, CS0407, CS1998, CS4016};

const ACA_CATEGORY: &str = "ACA Diagnostics";

/// A composite implements an interface but does not forward to its children.
pub const ACA0001: RuleDescriptor = RuleDescriptor {
    id: "ACA0001",
    category: "CodeGeneration",
    default_severity: Severity::Info,
    enabled_by_default: true,
};

/// Comments inside a class.
pub const ACA0002: RuleDescriptor = RuleDescriptor {
    id: "ACA0002",
    category: ACA_CATEGORY,
    default_severity: Severity::Info,
    enabled_by_default: true,
};

/// Comments inside a method.
pub const ACA0003: RuleDescriptor = RuleDescriptor {
    id: "ACA0003",
    category: ACA_CATEGORY,
    default_severity: Severity::Info,
    enabled_by_default: true,
};

/// Comments inside an array initializer.
pub const ACA0004: RuleDescriptor = RuleDescriptor {
    id: "ACA0004",
    category: ACA_CATEGORY,
    default_severity: Severity::Info,
    enabled_by_default: true,
};

/// Comments inside a namespace.
pub const ACA0005: RuleDescriptor = RuleDescriptor {
    id: "ACA0005",
    category: ACA_CATEGORY,
    default_severity: Severity::Info,
    enabled_by_default: true,
};

/// Repeated qualified access to one static class.
pub const ACA0006: RuleDescriptor = RuleDescriptor {
    id: "ACA0006",
    category: ACA_CATEGORY,
    default_severity: Severity::Info,
    enabled_by_default: true,
};
