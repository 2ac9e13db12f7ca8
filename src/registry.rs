use crate::errors::EngineError;
use crate::strategy::{BreakoutStrategy, MaCrossoverStrategy, RsiReversionStrategy, Strategy};
use std::collections::HashMap;

type StrategyBuilder =
    fn(&HashMap<String, f64>) -> Result<Box<dyn Strategy + Send + Sync>, EngineError>;

/// Case-insensitive name -> strategy builder map. Populated once at startup
/// and read-only afterwards, so concurrent lookups need no synchronization.
pub struct StrategyRegistry {
    builders: HashMap<String, StrategyBuilder>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Registry with the built-in strategies.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("sma", |params| {
            Ok(Box::new(MaCrossoverStrategy::new(params)?))
        });
        registry.register("rsi", |params| {
            Ok(Box::new(RsiReversionStrategy::new(params)?))
        });
        registry.register("breakout", |params| {
            Ok(Box::new(BreakoutStrategy::new(params)?))
        });
        registry
    }

    /// Register a builder under a name. Names are matched case-insensitively;
    /// re-registering a name replaces the previous builder.
    pub fn register(&mut self, name: &str, builder: StrategyBuilder) {
        self.builders.insert(name.trim().to_lowercase(), builder);
    }

    /// Instantiate the named strategy from a parameter map.
    pub fn create(
        &self,
        name: &str,
        parameters: &HashMap<String, f64>,
    ) -> Result<Box<dyn Strategy + Send + Sync>, EngineError> {
        let builder = self
            .builders
            .get(&name.trim().to_lowercase())
            .ok_or_else(|| EngineError::UnknownStrategy(name.to_string()))?;
        builder(parameters)
    }

    pub fn strategy_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.builders.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
