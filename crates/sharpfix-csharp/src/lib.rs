//! C# rule engine for sharpfix.
//!
//! This crate detects structural patterns in C# source and offers rewrites
//! that keep the code compiling. It includes:
//! - Documents and the semantic model (symbols, binding, control flow,
//!   compiler diagnostics)
//! - Symbol helpers shared by detectors and fixes
//! - Pattern detectors and tree rewrite primitives
//! - Rules, fix providers and the rule registry
//! - The analysis driver and the fix dispatcher
//! - English resources, configuration and a formatter for rewritten regions
//!
//! # Example
//!
//! ```
//! use sharpfix_csharp::{AnalysisConfig, AnalysisDriver, Document, RuleRegistry};
//!
//! let document = Document::parse("C.cs", "class C\n{\n    // note\n}\n").unwrap();
//! let registry = RuleRegistry::builtin();
//! let config = AnalysisConfig::default();
//! let diagnostics = AnalysisDriver::new(&registry, &config).analyze(&document);
//! assert_eq!(diagnostics[0].rule_id, "ACA0002");
//! ```

pub mod config;
pub mod descriptors;
pub mod detectors;
pub mod dispatch;
pub mod document;
pub mod driver;
pub mod format;
pub mod helpers;
pub mod resources;
pub mod rewrite;
pub mod rules;
pub mod semantic;

pub use config::{AnalysisConfig, ConfigError};
pub use dispatch::{FixAllOutcome, FixCandidate, FixDispatcher};
pub use document::Document;
pub use driver::AnalysisDriver;
pub use resources::EnglishResources;
pub use rules::{FixProvider, Rule, RuleContext, RuleRegistry};
