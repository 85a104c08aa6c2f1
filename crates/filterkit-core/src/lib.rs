//! Filterkit Core - Twig-style value filters for template pipelines
//!
//! This crate provides the filter library a template engine calls when a
//! template pipes a value through `|name(args...)`. Each filter receives a call
//! [`Context`], the subject [`Value`] and its positional arguments, and returns
//! a new value. Filters never fail: input they cannot handle produces
//! [`Value::Null`].
//!
//! # Main Components
//!
//! - **Value Model**: [`Value`] with number/string coercion and natural enumeration order
//! - **Pattern Translation**: human date tokens (`yyyy-MM-dd`) to strftime via [`translate`]
//! - **Filters**: date formatting, batching, element access, merging and the
//!   common Twig string, number and collection filters
//! - **Registry**: [`FilterRegistry`] for name-based dispatch
//!
//! # Example
//!
//! ```
//! use filterkit_core::{Context, FilterRegistry, Result, Value};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let registry = FilterRegistry::builtin();
//!     let ctx = Context::new();
//!
//!     let date = registry.apply("date", &ctx, &Value::from("2024-03-05"), &[Value::from("dd/MM/yyyy")])?;
//!     assert_eq!(date, Value::from("\n 05/03/2024"));
//!
//!     let rows = registry.apply("batch", &ctx, &Value::from(json!([1, 2, 3])), &[Value::from(2)])?;
//!     assert_eq!(rows, Value::from(json!([[1, 2], [3]])));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod context;
pub mod error;
pub mod filters;
pub mod pattern;
pub mod registry;
pub mod value;

// Re-export main types for convenience
pub use context::Context;
pub use error::{Error, Result};
pub use pattern::{translate, DEFAULT_DATE_PATTERN, DEFAULT_DATE_TIME_PATTERN, DEFAULT_TIME_PATTERN};
pub use registry::{builtin_filters, FilterFn, FilterRegistry};
pub use value::{Mapping, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_reexports() {
        assert_eq!(translate(DEFAULT_DATE_PATTERN), "%Y-%m-%d");
        assert_eq!(FilterRegistry::default().len(), builtin_filters().len());
        assert!(Value::from(Mapping::new()).is_mapping());
    }
}
