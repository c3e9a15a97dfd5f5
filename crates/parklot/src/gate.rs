//! Entry and exit gates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateType {
    Entry,
    Exit,
    Emergency,
}

/// A gate of the lot. Gates are configuration: supplied once at setup.
#[derive(Debug, Clone)]
pub struct Gate {
    id: String,
    gate_type: GateType,
}

impl Gate {
    pub fn new(id: impl Into<String>, gate_type: GateType) -> Self {
        Self {
            id: id.into(),
            gate_type,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn gate_type(&self) -> GateType {
        self.gate_type
    }

    pub fn is_entry(&self) -> bool {
        self.gate_type == GateType::Entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_entry_gates_admit() {
        assert!(Gate::new("GATE01", GateType::Entry).is_entry());
        assert!(!Gate::new("GATE02", GateType::Exit).is_entry());
        assert!(!Gate::new("GATE04", GateType::Emergency).is_entry());
    }

    #[test]
    fn gate_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(GateType::Emergency).unwrap(),
            serde_json::json!("emergency")
        );
        assert_eq!(
            serde_json::from_str::<GateType>("\"entry\"").unwrap(),
            GateType::Entry
        );
    }
}
