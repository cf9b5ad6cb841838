//! Core infrastructure for sharpfix.
//!
//! This crate provides language-agnostic infrastructure:
//! - Spans, content hashes and conflict-checked text edits
//! - Diagnostics, rule descriptors and typed diagnostic payloads
//! - The resource provider seam for rule titles and messages
//! - Error types and error codes
//! - JSON output types for CLI responses
//! - Text position utilities and unified diff generation
//! - Cooperative cancellation

pub mod cancel;
pub mod diagnostic;
pub mod diff;
pub mod error;
pub mod output;
pub mod patch;
pub mod resources;
pub mod text;
