//! Syntax foundation types: spans and statement structures.

mod span;
pub mod statement;

// Re-export span types
pub use span::{Span, Spanned};

// Re-export statement structure
pub use statement::{Statement, StatementShape};
