use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Machine {
    pub id: u64,
    pub name: String,
    pub motherboard: String,
    pub gpu: String,
    pub cpu: String,
    pub status: MachineStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub enum MachineStatus {
    Available,
    Unavailable,
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineStatus::Available => write!(f, "✅ Available"),
            MachineStatus::Unavailable => write!(f, "🚫 Unavailable"),
        }
    }
}

impl Machine {
    /// Single-line label used in selection prompts
    pub fn summary(&self) -> String {
        format!(
            "{} (CPU: {}, GPU: {}, {})",
            self.name, self.cpu, self.gpu, self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn machine_deserializes_from_inventory_json() {
        let json = r#"{
            "id": 3,
            "name": "bench-03",
            "motherboard": "X13SWA-TF",
            "gpu": "RTX 4090",
            "cpu": "Xeon W9-3475X",
            "status": "Available"
        }"#;

        let machine: Machine = serde_json::from_str(json).unwrap();
        assert_eq!(machine.id, 3);
        assert_eq!(machine.status, MachineStatus::Available);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let json = r#"{
            "id": 1,
            "name": "bench-01",
            "motherboard": "B650",
            "gpu": "RTX 4080",
            "cpu": "Ryzen 9 7950X",
            "status": "Broken"
        }"#;

        assert!(serde_json::from_str::<Machine>(json).is_err());
    }
}
