//! Call context handed to every filter invocation
//!
//! The host engine owns the context; filters only read from it. Besides
//! template-scoped globals it carries the diagnostics opt-in that controls how
//! loudly a filter reports degrading to [`Value::Null`].

use crate::value::{Mapping, Value};

/// Host-provided services available to a filter call
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Template-scoped global values
    globals: Mapping,
    /// Report degrade-to-null at warn level instead of debug
    diagnostics: bool,
}

impl Context {
    /// Create an empty context with diagnostics disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template global
    pub fn with_global(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.globals.insert(name.into(), value.into());
        self
    }

    /// Opt in to (or out of) warn-level degrade diagnostics
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Look up a template global
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }

    pub fn globals(&self) -> &Mapping {
        &self.globals
    }

    pub fn diagnostics_enabled(&self) -> bool {
        self.diagnostics
    }

    /// Report that `filter` could not handle its input and return the absent value.
    ///
    /// The returned value is always [`Value::Null`]; only the log level
    /// depends on the diagnostics setting.
    pub fn degrade(&self, filter: &str, reason: &str) -> Value {
        if self.diagnostics {
            tracing::warn!(filter = filter, reason = reason, "Filter degraded to null");
        } else {
            tracing::debug!(filter = filter, reason = reason, "Filter degraded to null");
        }
        Value::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_globals() {
        let ctx = Context::new().with_global("site", "example.org");
        assert_eq!(ctx.global("site"), Some(&Value::from("example.org")));
        assert_eq!(ctx.global("missing"), None);
        assert_eq!(ctx.globals().len(), 1);
    }

    #[test]
    fn test_degrade_always_returns_null() {
        assert!(Context::new().degrade("batch", "not iterable").is_null());
        let loud = Context::new().with_diagnostics(true);
        assert!(loud.diagnostics_enabled());
        assert!(loud.degrade("batch", "not iterable").is_null());
    }
}
