use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::TestCase;

/// Whether a setting is shared by every machine or configured per machine
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConfigMethod {
    #[default]
    Same,
    Individual,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OsSelection {
    pub os: String,
    pub deployment: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct KernelSelection {
    #[serde(rename = "type")]
    pub kernel_type: String,
    pub version: String,
}

/// In-progress state of the plan form
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct FormData {
    pub cpu: String,
    pub gpu: String,
    #[serde(rename = "selectedMachines")]
    pub selected_machines: Vec<u64>,
    #[serde(rename = "osConfigMethod")]
    pub os_config_method: ConfigMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment: Option<String>,
    #[serde(rename = "individualOsConfig")]
    pub individual_os_config: BTreeMap<u64, OsSelection>,
    #[serde(rename = "kernelConfigMethod")]
    pub kernel_config_method: ConfigMethod,
    #[serde(rename = "kernelType", skip_serializing_if = "Option::is_none")]
    pub kernel_type: Option<String>,
    #[serde(rename = "kernelVersion", skip_serializing_if = "Option::is_none")]
    pub kernel_version: Option<String>,
    #[serde(rename = "individualKernelConfig")]
    pub individual_kernel_config: BTreeMap<u64, KernelSelection>,
    #[serde(rename = "firmwareVersion")]
    pub firmware_version: String,
    #[serde(rename = "versionComparison")]
    pub version_comparison: bool,
    #[serde(rename = "selectedTestCases")]
    pub selected_test_cases: Vec<TestCase>,
}
