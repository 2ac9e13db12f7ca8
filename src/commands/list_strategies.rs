use crate::registry::StrategyRegistry;
use anyhow::Result;

pub fn run() -> Result<()> {
    let registry = StrategyRegistry::with_builtins();
    for name in registry.strategy_names() {
        println!("{}", name);
    }
    Ok(())
}
