//! sharpfix: structural analyzers and compiling code fixes for C#.
//!
//! The `sharpfix` binary analyzes C# files, applies fixes and lists rules.
//! All output is JSON.
//!
//! ## Modules
//!
//! - `cli` - command implementations
//! - `files` - source discovery and atomic writes

pub mod cli;
pub mod files;

// Re-export core types for convenience
pub use sharpfix_core::error::{OutputErrorCode, SharpfixError};
pub use sharpfix_core::output::{
    AnalyzeResponse, ErrorResponse, FixResponse, RulesResponse, SCHEMA_VERSION,
};
pub use sharpfix_csharp::{
    AnalysisConfig, AnalysisDriver, Document, EnglishResources, FixDispatcher, RuleRegistry,
};
