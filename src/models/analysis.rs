use serde::{Deserialize, Serialize};

use crate::models::{ConfigMethod, FormData, Machine, MachineStatus};

/// Outcome of checking a form selection against the machine inventory
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct AnalysisResult {
    #[serde(rename = "compatibleMachines")]
    pub compatible_machines: Vec<Machine>,
    #[serde(rename = "incompatibleMachines")]
    pub incompatible_machines: Vec<IncompatibleMachine>,
    #[serde(rename = "missingConfigurations")]
    pub missing_configurations: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IncompatibleMachine {
    pub machine: Machine,
    pub reasons: Vec<String>,
}

impl AnalysisResult {
    /// Availability and completeness precheck over the current selection
    pub fn precheck(form: &FormData, machines: &[Machine]) -> AnalysisResult {
        let mut result = AnalysisResult::default();

        for id in &form.selected_machines {
            match machines.iter().find(|m| m.id == *id) {
                Some(machine) if machine.status == MachineStatus::Available => {
                    result.compatible_machines.push(machine.clone());
                }
                Some(machine) => {
                    result.incompatible_machines.push(IncompatibleMachine {
                        machine: machine.clone(),
                        reasons: vec![format!("machine '{}' is unavailable", machine.name)],
                    });
                }
                None => {
                    result
                        .warnings
                        .push(format!("machine id {} is not in the inventory", id));
                }
            }
        }

        match form.os_config_method {
            ConfigMethod::Same => {
                if form.os.as_deref().unwrap_or("").is_empty() {
                    result.missing_configurations.push("os".to_string());
                }
                if form.deployment.as_deref().unwrap_or("").is_empty() {
                    result.missing_configurations.push("deployment".to_string());
                }
            }
            ConfigMethod::Individual => {
                for id in &form.selected_machines {
                    if !form.individual_os_config.contains_key(id) {
                        result
                            .missing_configurations
                            .push(format!("os config for machine {}", id));
                    }
                }
            }
        }

        match form.kernel_config_method {
            ConfigMethod::Same => {
                if form.kernel_type.as_deref().unwrap_or("").is_empty() {
                    result.missing_configurations.push("kernel type".to_string());
                }
                if form.kernel_version.as_deref().unwrap_or("").is_empty() {
                    result
                        .missing_configurations
                        .push("kernel version".to_string());
                }
            }
            ConfigMethod::Individual => {
                for id in &form.selected_machines {
                    if !form.individual_kernel_config.contains_key(id) {
                        result
                            .missing_configurations
                            .push(format!("kernel config for machine {}", id));
                    }
                }
            }
        }

        if form.selected_machines.is_empty() {
            result.warnings.push("no machines selected".to_string());
        }
        if form.selected_test_cases.is_empty() {
            result.warnings.push("no test cases selected".to_string());
        }
        if form.firmware_version.is_empty() {
            result
                .warnings
                .push("firmware version is empty".to_string());
        }

        result
    }

    /// True when nothing blocks generating the plan
    pub fn is_clean(&self) -> bool {
        self.incompatible_machines.is_empty() && self.missing_configurations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OsSelection, TestCase};

    fn machines() -> Vec<Machine> {
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
                motherboard: "TRX50".into(),
                gpu: "RTX 4080".into(),
                cpu: "Threadripper 7980X".into(),
                status: MachineStatus::Unavailable,
            },
        ]
    }

    fn filled_form() -> FormData {
        FormData {
            cpu: "Xeon W9-3475X".into(),
            gpu: "RTX 4090".into(),
            selected_machines: vec![1],
            os: Some("ubuntu-22.04".into()),
            deployment: Some("bare-metal".into()),
            kernel_type: Some("default".into()),
            kernel_version: Some("6.1.0".into()),
            firmware_version: "535.104".into(),
            selected_test_cases: vec![TestCase {
                id: 1,
                name: "boot".into(),
                description: "Cold boot".into(),
                test_type: Some("smoke".into()),
                subgroup: None,
                custom_group: None,
            }],
            ..FormData::default()
        }
    }

    #[test]
    fn clean_selection_passes() {
        let result = AnalysisResult::precheck(&filled_form(), &machines());
        assert!(result.is_clean());
        assert_eq!(result.compatible_machines.len(), 1);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn unavailable_machine_is_partitioned_with_reason() {
        let mut form = filled_form();
        form.selected_machines = vec![1, 2];

        let result = AnalysisResult::precheck(&form, &machines());
        assert_eq!(result.compatible_machines.len(), 1);
        assert_eq!(result.incompatible_machines.len(), 1);
        assert!(result.incompatible_machines[0].reasons[0].contains("bench-02"));
        assert!(!result.is_clean());
    }

    #[test]
    fn unknown_machine_id_becomes_warning() {
        let mut form = filled_form();
        form.selected_machines = vec![99];

        let result = AnalysisResult::precheck(&form, &machines());
        assert!(result.compatible_machines.is_empty());
        assert!(result.warnings.iter().any(|w| w.contains("99")));
    }

    #[test]
    fn shared_config_gaps_are_reported() {
        let mut form = filled_form();
        form.os = None;
        form.kernel_version = Some(String::new());

        let result = AnalysisResult::precheck(&form, &machines());
        assert!(result.missing_configurations.contains(&"os".to_string()));
        assert!(result
            .missing_configurations
            .contains(&"kernel version".to_string()));
    }

    #[test]
    fn individual_config_must_cover_every_selected_machine() {
        let mut form = filled_form();
        form.os_config_method = ConfigMethod::Individual;
        form.individual_os_config.insert(
            1,
            OsSelection {
                os: "rhel-9".into(),
                deployment: "vm".into(),
            },
        );
        form.selected_machines = vec![1, 2];

        let result = AnalysisResult::precheck(&form, &machines());
        assert!(result
            .missing_configurations
            .iter()
            .any(|m| m.contains("machine 2")));
    }

    #[test]
    fn result_serializes_with_original_field_names() {
        let result = AnalysisResult::precheck(&filled_form(), &machines());
        let json = serde_json::to_value(&result).unwrap();

        assert!(json["compatibleMachines"].is_array());
        assert!(json["incompatibleMachines"].is_array());
        assert!(json["missingConfigurations"].is_array());
        assert!(json["warnings"].is_array());
    }
}
