use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{ConfigMethod, FormData, KernelSelection, Machine, OsSelection};

/// Exported test-plan document
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct YamlData {
    pub metadata: Metadata,
    pub hardware: Hardware,
    pub environment: Environment,
    pub firmware: Firmware,
    pub test_suites: Vec<TestSuiteEntry>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Metadata {
    pub generated: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Hardware {
    pub cpu: String,
    pub gpu: String,
    pub machines: Vec<MachineEntry>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MachineEntry {
    pub id: u64,
    pub name: String,
    pub specs: MachineSpecs,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MachineSpecs {
    pub motherboard: String,
    pub gpu: String,
    pub cpu: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Environment {
    pub os: OsEnvironment,
    pub kernel: KernelEnvironment,
}

/// OS section: one shared selection, or one selection per machine id
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum OsEnvironment {
    Shared(OsSelection),
    PerMachine(BTreeMap<String, OsSelection>),
}

/// Kernel section, same two shapes as the OS section
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum KernelEnvironment {
    Shared(KernelSelection),
    PerMachine(BTreeMap<String, KernelSelection>),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Firmware {
    pub gpu_version: String,
    pub comparison: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TestSuiteEntry {
    pub id: u64,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub suite_type: String,
    pub subgroup: String,
    pub order: u32,
}

impl YamlData {
    /// Assembles the export document from the form state and the inventory
    pub fn assemble(form: &FormData, machines: &[Machine], plan_version: &str) -> YamlData {
        // Keep inventory order for the selected machines
        let selected: Vec<&Machine> = machines
            .iter()
            .filter(|m| form.selected_machines.contains(&m.id))
            .collect();

        let machine_entries = selected
            .iter()
            .map(|m| MachineEntry {
                id: m.id,
                name: m.name.clone(),
                specs: MachineSpecs {
                    motherboard: m.motherboard.clone(),
                    gpu: m.gpu.clone(),
                    cpu: m.cpu.clone(),
                },
            })
            .collect();

        let os = match form.os_config_method {
            ConfigMethod::Same => OsEnvironment::Shared(OsSelection {
                os: form.os.clone().unwrap_or_default(),
                deployment: form.deployment.clone().unwrap_or_default(),
            }),
            ConfigMethod::Individual => OsEnvironment::PerMachine(
                selected
                    .iter()
                    .filter_map(|m| {
                        form.individual_os_config
                            .get(&m.id)
                            .map(|sel| (m.id.to_string(), sel.clone()))
                    })
                    .collect(),
            ),
        };

        let kernel = match form.kernel_config_method {
            ConfigMethod::Same => KernelEnvironment::Shared(KernelSelection {
                kernel_type: form.kernel_type.clone().unwrap_or_default(),
                version: form.kernel_version.clone().unwrap_or_default(),
            }),
            ConfigMethod::Individual => KernelEnvironment::PerMachine(
                selected
                    .iter()
                    .filter_map(|m| {
                        form.individual_kernel_config
                            .get(&m.id)
                            .map(|sel| (m.id.to_string(), sel.clone()))
                    })
                    .collect(),
            ),
        };

        let test_suites = form
            .selected_test_cases
            .iter()
            .enumerate()
            .map(|(i, case)| TestSuiteEntry {
                id: case.id,
                name: case.name.clone(),
                description: case.description.clone(),
                suite_type: case.test_type.clone().unwrap_or_default(),
                subgroup: case.subgroup.clone().unwrap_or_default(),
                order: (i + 1) as u32,
            })
            .collect();

        YamlData {
            metadata: Metadata {
                generated: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                version: plan_version.to_string(),
            },
            hardware: Hardware {
                cpu: form.cpu.clone(),
                gpu: form.gpu.clone(),
                machines: machine_entries,
            },
            environment: Environment { os, kernel },
            firmware: Firmware {
                gpu_version: form.firmware_version.clone(),
                comparison: form.version_comparison,
            },
            test_suites,
        }
    }

    /// Short OS description for list/show output
    pub fn os_summary(&self) -> String {
        match &self.environment.os {
            OsEnvironment::Shared(sel) => format!("{} ({})", sel.os, sel.deployment),
            OsEnvironment::PerMachine(map) => format!("per machine ({} entries)", map.len()),
        }
    }

    /// Short kernel description for list/show output
    pub fn kernel_summary(&self) -> String {
        match &self.environment.kernel {
            KernelEnvironment::Shared(sel) => format!("{} {}", sel.kernel_type, sel.version),
            KernelEnvironment::PerMachine(map) => format!("per machine ({} entries)", map.len()),
        }
    }
}
