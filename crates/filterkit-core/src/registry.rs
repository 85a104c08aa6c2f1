//! Filter registry for name-based lookup by a host template engine.
//!
//! The registry maps filter names to plain function pointers. The built-in set
//! is a fixed table; hosts may register additional filters or replace existing
//! ones before handing the registry to their engine.

use crate::context::Context;
use crate::error::{Error, Result};
use crate::filters::BUILTIN_FILTERS;
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;

/// Signature shared by every filter: context, subject and positional arguments
pub type FilterFn = fn(&Context, &Value, &[Value]) -> Value;

/// Build the name -> function map of every built-in filter
pub fn builtin_filters() -> HashMap<&'static str, FilterFn> {
    BUILTIN_FILTERS.iter().copied().collect()
}

/// Filter lookup table
#[derive(Clone)]
pub struct FilterRegistry {
    filters: HashMap<String, FilterFn>,
}

impl FilterRegistry {
    /// Create a registry holding every built-in filter
    pub fn builtin() -> Self {
        let filters = BUILTIN_FILTERS
            .iter()
            .map(|(name, filter)| (name.to_string(), *filter))
            .collect();
        Self { filters }
    }

    /// Create a registry with no filters
    pub fn empty() -> Self {
        Self {
            filters: HashMap::new(),
        }
    }

    /// Register a filter, replacing any existing filter with the same name.
    ///
    /// Returns the replaced filter, if any.
    pub fn register(&mut self, name: impl Into<String>, filter: FilterFn) -> Result<Option<FilterFn>> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::configuration("filter name must not be empty"));
        }
        tracing::debug!(filter = %name, "registering filter");
        Ok(self.filters.insert(name, filter))
    }

    pub fn get(&self, name: &str) -> Option<FilterFn> {
        self.filters.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Registered names in ascending order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Look up `name` and run it against `value`.
    ///
    /// The filter itself never fails; the only error is an unknown name.
    pub fn apply(&self, name: &str, ctx: &Context, value: &Value, args: &[Value]) -> Result<Value> {
        let filter = self.get(name).ok_or_else(|| Error::unknown_filter(name))?;
        tracing::trace!(filter = name, subject = value.type_name(), args = args.len(), "applying filter");
        Ok(filter(ctx, value, args))
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("filters", &self.names())
            .finish()
    }
}
