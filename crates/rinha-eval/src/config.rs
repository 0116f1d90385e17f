use serde::Deserialize;

/// Default step budget for one top-level evaluation.
pub const DEFAULT_GAS_LIMIT: u64 = 10_000_000;

/// Evaluator settings. Deserializable so drivers can load them from a
/// JSON file; missing fields keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalConfig {
    /// Maximum number of terms reduced before evaluation fails with
    /// [`EvalError::GasExhausted`](crate::EvalError::GasExhausted).
    pub gas_limit: u64,
}

impl EvalConfig {
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            gas_limit: DEFAULT_GAS_LIMIT,
        }
    }
}
