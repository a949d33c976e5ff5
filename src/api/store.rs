use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Calculator {
    LoanVsCash,
    Goal,
    VehicleTco,
}

/// Key-value storage for the last inputs each calculator ran with.
pub trait InputStore: Send + Sync {
    fn load(&self, calculator: Calculator) -> Option<Value>;
    fn save(&self, calculator: Calculator, inputs: Value);
}

/// Process-lifetime store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryInputStore {
    entries: RwLock<HashMap<Calculator, Value>>,
}

impl InputStore for MemoryInputStore {
    fn load(&self, calculator: Calculator) -> Option<Value> {
        let entries = self.entries.read().ok()?;
        entries.get(&calculator).cloned()
    }

    fn save(&self, calculator: Calculator, inputs: Value) {
        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert(calculator, inputs);
            }
            Err(_) => warn!(?calculator, "last-inputs store is poisoned; dropping save"),
        }
    }
}
