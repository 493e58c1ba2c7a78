//! Per-field rewrite hooks consulted before a condition is compiled.

use crate::error::HookError;
use filterql_syntax::{Condition, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookAction {
    /// Continue with the (possibly rewritten) condition.
    Keep,
    /// Omit this condition from the emitted predicate entirely.
    Skip,
}

/// A per-field capability consulted during compilation. The hook may edit
/// the field name as well as the values on the right-hand side of the
/// comparison, including adding and removing values.
pub trait FilterHook: Send + Sync {
    fn apply(&self, condition: &mut Condition) -> Result<HookAction, HookError>;
}

impl<F> FilterHook for F
where
    F: Fn(&mut Condition) -> Result<HookAction, HookError> + Send + Sync,
{
    fn apply(&self, condition: &mut Condition) -> Result<HookAction, HookError> {
        self(condition)
    }
}

/// Configuration for compiling filter expressions into WHERE clauses.
///
/// `hooks` maps filter expression field names to hook functions. When the
/// field name participating in a comparison is found here, the hook runs
/// against the parsed condition before field resolution; a [`HookAction::Skip`]
/// drops the one condition silently, any error aborts the whole compile.
#[derive(Default)]
pub struct FilterConfig {
    hooks: HashMap<String, Box<dyn FilterHook>>,
}

impl FilterConfig {
    pub fn new() -> Self {
        FilterConfig::default()
    }

    pub fn hook(mut self, field: impl Into<String>, hook: impl FilterHook + 'static) -> Self {
        self.hooks.insert(field.into(), Box::new(hook));
        self
    }

    pub(crate) fn get(&self, field: &str) -> Option<&dyn FilterHook> {
        self.hooks.get(field).map(|hook| hook.as_ref())
    }
}

/// Calls `map` for every element in `values`, replacing each element with
/// the mapped value. Returns early on the first error, numbered by element.
pub fn map_values<F>(values: &mut [Value], map: F) -> Result<(), HookError>
where
    F: Fn(&Value) -> Result<Value, HookError>,
{
    for (i, value) in values.iter_mut().enumerate() {
        *value = map(value).map_err(|e| HookError::new(format!("value #{}: {}", i + 1, e)))?;
    }
    Ok(())
}

/// Convenience hook that renames the condition's field to `field` and runs
/// [`map_values`] over its values.
pub fn rename_and_map_values<F>(field: impl Into<String>, map: F) -> impl FilterHook
where
    F: Fn(&Value) -> Result<Value, HookError> + Send + Sync,
{
    let field = field.into();
    move |condition: &mut Condition| -> Result<HookAction, HookError> {
        map_values(&mut condition.values, &map)?;
        condition.field = field.clone();
        Ok(HookAction::Keep)
    }
}
