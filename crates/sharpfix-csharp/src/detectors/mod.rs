//! Pattern detectors.
//!
//! A detector is a pure function from a node and the document's semantic
//! model to the diagnostics found at that node. The driver calls each one
//! for the node kinds its rule registers. Detectors never look at other
//! detectors' output, so the diagnostic set does not depend on rule order.

pub mod comments;
pub mod forwarding;
pub mod static_import;

pub use comments::{detect_comments, has_comment_trivia, CommentTarget};
pub use forwarding::detect_forwarding;
pub use static_import::detect_static_imports;
