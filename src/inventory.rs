use colored::*;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::models::{Machine, MachineStatus, TestCase, TestCaseGroup};

/// Optional inventory override file in the working directory
pub const MACHINES_FILE: &str = "machines.json";

/// Optional catalog override file in the working directory
pub const CATALOG_FILE: &str = "test_cases.json";

/// Loads the machine inventory, falling back to the built-in benches
pub fn load_machines(path: &Path) -> io::Result<Vec<Machine>> {
    if !path.exists() {
        return Ok(default_machines());
    }

    let file = File::open(path)?;
    let machines: Vec<Machine> = serde_json::from_reader(file)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    if machines.is_empty() {
        println!(
            "{}",
            format!("Inventory file {} is empty, using defaults.", path.display()).yellow()
        );
        return Ok(default_machines());
    }

    Ok(machines)
}

/// Loads the test-case catalog, falling back to the built-in groups
pub fn load_catalog(path: &Path) -> io::Result<TestCaseGroup> {
    if !path.exists() {
        return Ok(default_catalog());
    }

    let file = File::open(path)?;
    let catalog: TestCaseGroup = serde_json::from_reader(file)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    if catalog.is_empty() {
        println!(
            "{}",
            format!("Catalog file {} is empty, using defaults.", path.display()).yellow()
        );
        return Ok(default_catalog());
    }

    Ok(catalog)
}

/// Built-in machine inventory
pub fn default_machines() -> Vec<Machine> {
    vec![
        Machine {
            id: 1,
            name: "bench-01".into(),
            motherboard: "X13SWA-TF".into(),
            gpu: "RTX 4090".into(),
            cpu: "Xeon W9-3475X".into(),
            status: MachineStatus::Available,
        },
        Machine {
            id: 2,
            name: "bench-02".into(),
            motherboard: "TRX50 AERO D".into(),
            gpu: "RTX 4080".into(),
            cpu: "Threadripper 7980X".into(),
            status: MachineStatus::Available,
        },
        Machine {
            id: 3,
            name: "bench-03".into(),
            motherboard: "H13SSL-N".into(),
            gpu: "H100".into(),
            cpu: "EPYC 9654".into(),
            status: MachineStatus::Unavailable,
        },
        Machine {
            id: 4,
            name: "bench-04".into(),
            motherboard: "W790E SAGE".into(),
            gpu: "L40S".into(),
            cpu: "Xeon W7-3455".into(),
            status: MachineStatus::Available,
        },
    ]
}

/// Built-in test-case catalog
pub fn default_catalog() -> TestCaseGroup {
    let mut catalog = TestCaseGroup::new();

    let case = |id: u64, name: &str, description: &str, test_type: &str, subgroup: &str| TestCase {
        id,
        name: name.into(),
        description: description.into(),
        test_type: Some(test_type.into()),
        subgroup: Some(subgroup.into()),
        custom_group: None,
    };

    let smoke = catalog.entry("smoke".to_string()).or_default();
    smoke.entry("power".to_string()).or_default().extend([
        case(101, "cold-boot", "Cold boot to login prompt", "smoke", "power"),
        case(102, "warm-reboot", "Warm reboot cycle", "smoke", "power"),
    ]);
    smoke.entry("bus".to_string()).or_default().extend([
        case(103, "pcie-link", "PCIe link trains at expected width", "smoke", "bus"),
        case(104, "gpu-probe", "GPU enumerates and driver loads", "smoke", "bus"),
    ]);

    let regression = catalog.entry("regression".to_string()).or_default();
    regression.entry("memory".to_string()).or_default().extend([
        case(201, "memtest-short", "One-pass memory pattern test", "regression", "memory"),
        case(202, "numa-bandwidth", "Cross-node bandwidth baseline", "regression", "memory"),
    ]);
    regression.entry("storage".to_string()).or_default().extend([
        case(203, "nvme-smart", "NVMe SMART health read", "regression", "storage"),
        case(204, "fio-seq", "Sequential read/write baseline", "regression", "storage"),
    ]);

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_have_unique_ids() {
        let machines = default_machines();
        let mut ids: Vec<u64> = machines.iter().map(|m| m.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), machines.len());

        let catalog = default_catalog();
        let mut case_ids: Vec<u64> = catalog
            .values()
            .flat_map(|subgroups| subgroups.values())
            .flatten()
            .map(|c| c.id)
            .collect();
        let total = case_ids.len();
        case_ids.sort();
        case_ids.dedup();
        assert_eq!(case_ids.len(), total);
        assert!(total > 0);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let machines = load_machines(Path::new("definitely/not/here.json")).unwrap();
        assert_eq!(machines, default_machines());
    }

    #[test]
    fn inventory_file_overrides_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 42, "name": "lab-42", "motherboard": "B650", "gpu": "RTX 4070", "cpu": "Ryzen 7 7700X", "status": "Available"}}]"#
        )
        .unwrap();

        let machines = load_machines(file.path()).unwrap();
        assert_eq!(machines.len(), 1);
        assert_eq!(machines[0].id, 42);
    }

    #[test]
    fn malformed_inventory_is_invalid_data() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = load_machines(file.path()).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn empty_catalog_falls_back_to_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog, default_catalog());
    }

    #[test]
    fn catalog_file_overrides_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"smoke": {{"power": [{{"id": 1, "name": "boot", "description": "Boot", "testType": "smoke", "subgroup": "power"}}]}}}}"#
        )
        .unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog["smoke"]["power"][0].name, "boot");
    }
}
