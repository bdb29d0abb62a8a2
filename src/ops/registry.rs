//! Operation registry: (family, kind) → function.
//!
//! Every action in a compiled program names its operation by [`OpSelector`].
//! The interpreter resolves the selector here on each pass. A missing entry
//! is a configuration defect, reported as [`RuntimeError::UnknownOperation`].

use crate::ops::builtin;
use crate::ops::selector::OpSelector;
use crate::runtime::error::RuntimeError;
use crate::value::{try_coerce, CoercionStats, Coerce, Value};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

/// Signature of a registered operation.
///
/// Reads `inputs` (one per input descriptor of the action) and pushes one
/// value per produced output into `outputs`, which arrives empty.
pub type OpFn = fn(ctx: &mut OpContext, inputs: &[Value], outputs: &mut Vec<Value>);

/// Per-instance state available to operations.
///
/// Operations do not share state with each other; the only mutable pieces
/// are the instance's random number generator and its coercion counters.
pub struct OpContext {
    rng: StdRng,
    coercion: CoercionStats,
}

impl OpContext {
    /// Create a context. A `seed` makes random operations reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            coercion: CoercionStats::new(),
        }
    }

    #[inline]
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Coerce `value` into `T`, counting lossy fallbacks.
    pub fn coerce<T: Coerce>(&mut self, value: &Value) -> T {
        match try_coerce::<T>(value) {
            Some(v) => v,
            None => {
                self.coercion
                    .record_fallback(value.value_type(), T::VALUE_TYPE);
                T::zero()
            }
        }
    }

    pub fn coercion_stats(&self) -> &CoercionStats {
        &self.coercion
    }

    pub fn coercion_stats_mut(&mut self) -> &mut CoercionStats {
        &mut self.coercion
    }
}

impl Default for OpContext {
    fn default() -> Self {
        Self::new(None)
    }
}

/// A registered operation.
#[derive(Clone, Copy)]
pub struct OpEntry {
    pub name: &'static str,
    pub func: OpFn,
}

impl std::fmt::Debug for OpEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpEntry").field("name", &self.name).finish()
    }
}

/// Lookup table from [`OpSelector`] to operation.
#[derive(Debug, Clone, Default)]
pub struct OperationRegistry {
    entries: HashMap<OpSelector, OpEntry>,
}

impl OperationRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// A registry with all built-in operations.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtin::register_all(&mut registry);
        registry
    }

    /// Register `func` under `selector`, replacing any previous entry.
    pub fn register(&mut self, selector: OpSelector, name: &'static str, func: OpFn) {
        if let Some(previous) = self.entries.insert(selector, OpEntry { name, func }) {
            tracing::debug!(
                "Operation {} '{}' replaced by '{}'",
                selector,
                previous.name,
                name
            );
        }
    }

    pub fn contains(&self, selector: OpSelector) -> bool {
        self.entries.contains_key(&selector)
    }

    pub fn get(&self, selector: OpSelector) -> Option<&OpEntry> {
        self.entries.get(&selector)
    }

    /// Resolve `selector`, failing with `UnknownOperation` if unregistered.
    pub fn resolve(&self, selector: OpSelector) -> Result<OpFn, RuntimeError> {
        self.entries
            .get(&selector)
            .map(|entry| entry.func)
            .ok_or(RuntimeError::UnknownOperation(selector))
    }

    /// Display name of a registered operation.
    pub fn name(&self, selector: OpSelector) -> Option<&'static str> {
        self.get(selector).map(|entry| entry.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered selectors in (family, kind) order.
    pub fn selectors(&self) -> Vec<OpSelector> {
        let mut selectors: Vec<_> = self.entries.keys().copied().collect();
        selectors.sort();
        selectors
    }
}
