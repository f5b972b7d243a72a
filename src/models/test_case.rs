use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TestCase {
    pub id: u64,
    pub name: String,
    pub description: String,
    #[serde(rename = "testType", skip_serializing_if = "Option::is_none")]
    pub test_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subgroup: Option<String>,
    #[serde(rename = "customGroup", skip_serializing_if = "Option::is_none")]
    pub custom_group: Option<String>,
}

/// Catalog of cases, grouped test-type -> subgroup -> ordered cases
pub type TestCaseGroup = BTreeMap<String, BTreeMap<String, Vec<TestCase>>>;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CustomGroup {
    pub name: String,
    #[serde(rename = "testCases")]
    pub test_cases: Vec<TestCase>,
    #[serde(rename = "selectedExistingCases")]
    pub selected_existing_cases: Vec<u64>,
}

impl TestCase {
    /// Single-line label used in selection prompts
    pub fn summary(&self) -> String {
        format!("{}: {} - {}", self.id, self.name, self.description)
    }
}
