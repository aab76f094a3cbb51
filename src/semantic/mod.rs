//! Semantic checks over collection and field names.
//!
//! Name checking is the only stage with state: the [`Registry`] it reads
//! is also written to, so every collection a query mentions is known to
//! the queries that follow it.
//!
//! # Example
//!
//! ```
//! use docquery_analyzer::semantic::{Registry, check_names};
//!
//! let mut registry = Registry::default();
//! let first = check_names("collection('nueva').add({\"id\": \"1\"});", &mut registry);
//! assert!(!first.is_valid());
//!
//! let second = check_names("collection('nueva').add({\"id\": \"2\"});", &mut registry);
//! assert!(second.is_valid());
//! ```

pub mod checker;
pub mod registry;

pub use checker::{NameCheck, SemanticVerdict, check_names, check_names_detailed};
pub use registry::Registry;
