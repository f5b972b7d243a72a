use colored::*;
use inquire::{Confirm, MultiSelect, Select, Text};
use std::io;
use std::path::Path;

use crate::inventory::{load_catalog, load_machines, CATALOG_FILE, MACHINES_FILE};
use crate::models::{
    AnalysisResult, ConfigMethod, CustomGroup, FormData, KernelSelection, Machine, OsSelection,
    TestCase, TestCaseGroup, YamlData,
};
use crate::options::{
    labels, value_for_label, DEPLOYMENT_OPTIONS, KERNEL_TYPE_OPTIONS, KERNEL_VERSION_OPTIONS,
    OS_OPTIONS,
};
use crate::utils::{save_plan, save_report};

/// Runs the interactive plan form and writes the YAML export
pub fn generate_plan(name: Option<String>) -> io::Result<()> {
    let machines = load_machines(Path::new(MACHINES_FILE))?;
    let catalog = load_catalog(Path::new(CATALOG_FILE))?;

    // Plan version
    let version = Text::new("Plan version:")
        .prompt()
        .unwrap_or_else(|_| String::from("1.0.0"));

    let mut form = FormData::default();

    // Target hardware models
    form.cpu = Text::new("CPU model:").prompt().unwrap_or_default();
    form.gpu = Text::new("GPU model:").prompt().unwrap_or_default();

    // Machine selection
    form.selected_machines = select_machines(&machines);

    if form.selected_machines.is_empty() {
        println!("{}", "No machines selected.".yellow());
    }

    // OS configuration, shared or per machine
    let os_method = Select::new(
        "How should the OS be configured?",
        vec!["Same for all machines", "Per machine"],
    )
    .prompt()
    .unwrap_or("Same for all machines");

    if os_method == "Per machine" {
        form.os_config_method = ConfigMethod::Individual;
        for id in &form.selected_machines {
            let target = machine_name(&machines, *id);
            println!("{}", format!("OS for {}", target).blue());
            form.individual_os_config.insert(
                *id,
                OsSelection {
                    os: select_from_table("Operating system:", OS_OPTIONS),
                    deployment: select_from_table("Deployment:", DEPLOYMENT_OPTIONS),
                },
            );
        }
    } else {
        form.os_config_method = ConfigMethod::Same;
        form.os = Some(select_from_table("Operating system:", OS_OPTIONS));
        form.deployment = Some(select_from_table("Deployment:", DEPLOYMENT_OPTIONS));
    }

    // Kernel configuration, same two modes
    let kernel_method = Select::new(
        "How should the kernel be configured?",
        vec!["Same for all machines", "Per machine"],
    )
    .prompt()
    .unwrap_or("Same for all machines");

    if kernel_method == "Per machine" {
        form.kernel_config_method = ConfigMethod::Individual;
        for id in &form.selected_machines {
            let target = machine_name(&machines, *id);
            println!("{}", format!("Kernel for {}", target).blue());
            form.individual_kernel_config.insert(
                *id,
                KernelSelection {
                    kernel_type: select_from_table("Kernel type:", KERNEL_TYPE_OPTIONS),
                    version: select_from_table("Kernel version:", KERNEL_VERSION_OPTIONS),
                },
            );
        }
    } else {
        form.kernel_config_method = ConfigMethod::Same;
        form.kernel_type = Some(select_from_table("Kernel type:", KERNEL_TYPE_OPTIONS));
        form.kernel_version = Some(select_from_table("Kernel version:", KERNEL_VERSION_OPTIONS));
    }

    // Firmware
    form.firmware_version = Text::new("GPU firmware version:").prompt().unwrap_or_default();
    form.version_comparison = Confirm::new("Enable firmware version comparison?")
        .with_default(false)
        .prompt()
        .unwrap_or(false);

    // Test case selection from the grouped catalog
    form.selected_test_cases = select_test_cases(&catalog);

    // Optional custom group on top of the catalog picks
    let wants_custom = Confirm::new("Create a custom test-case group?")
        .with_default(false)
        .prompt()
        .unwrap_or(false);

    if wants_custom {
        let group = build_custom_group(&catalog);
        if let Some(group) = group {
            println!(
                "{}",
                format!(
                    "Custom group '{}' with {} new case(s) and {} existing reference(s).",
                    group.name,
                    group.test_cases.len(),
                    group.selected_existing_cases.len()
                )
                .green()
            );
            apply_custom_group(&mut form.selected_test_cases, &group, &catalog);
        }
    }

    // Check the selection before exporting
    let analysis = AnalysisResult::precheck(&form, &machines);
    print_analysis(&analysis);

    if !analysis.is_clean() {
        let options = vec!["Generate anyway", "Cancel"];
        let selection = Select::new("The selection has problems. What do you want to do?", options)
            .prompt();

        if let Ok("Cancel") = selection {
            println!("{}", "Operation cancelled.".yellow());
            return Ok(());
        }
    }

    // File name for the plan and its report
    let base_name = match name {
        Some(n) if !n.is_empty() => n,
        _ => String::from("test-plan"),
    };

    let plan_path = format!("plans/{}.yaml", base_name);
    let report_path = format!("reports/{}.md", base_name);

    // Confirm overwrite of an existing plan
    if Path::new(&plan_path).exists() {
        let options = vec!["Yes", "No"];
        let selection = Select::new(
            format!("A plan named '{}' already exists. Overwrite it?", base_name).as_str(),
            options,
        )
        .prompt();

        if let Ok("No") = selection {
            println!("{}", "Operation cancelled.".yellow());
            return Ok(());
        }
    }

    let plan = YamlData::assemble(&form, &machines, &version);
    save_plan(&plan_path, &plan)?;
    save_report(&report_path, &plan, &base_name)?;

    println!(
        "{}",
        format!("Plan written to {} and report to {}", plan_path, report_path).green()
    );

    Ok(())
}

/// Picks machines from the inventory, returning their ids
fn select_machines(machines: &[Machine]) -> Vec<u64> {
    let choices: Vec<String> = machines
        .iter()
        .map(|m| format!("{}: {}", m.id, m.summary()))
        .collect();

    let selected = MultiSelect::new("Select the target machines:", choices)
        .prompt()
        .unwrap_or_default();

    selected.iter().filter_map(|s| parse_leading_id(s)).collect()
}

/// Walks the catalog and multi-selects cases per type and subgroup
fn select_test_cases(catalog: &TestCaseGroup) -> Vec<TestCase> {
    let mut selected = Vec::new();

    for (test_type, subgroups) in catalog {
        for (subgroup, cases) in subgroups {
            if cases.is_empty() {
                continue;
            }

            let choices: Vec<String> = cases.iter().map(|c| c.summary()).collect();
            let picks = MultiSelect::new(
                format!("Select {} / {} cases:", test_type, subgroup).as_str(),
                choices,
            )
            .prompt()
            .unwrap_or_default();

            for pick in picks {
                if let Some(id) = parse_leading_id(&pick) {
                    if let Some(case) = cases.iter().find(|c| c.id == id) {
                        selected.push(case.clone());
                    }
                }
            }
        }
    }

    selected
}

/// Builds a user-defined bundle of new cases plus existing references
fn build_custom_group(catalog: &TestCaseGroup) -> Option<CustomGroup> {
    let group_name = Text::new("Custom group name:").prompt().ok()?;
    if group_name.is_empty() {
        println!("{}", "Custom group needs a name, skipping.".yellow());
        return None;
    }

    // References to cases that already exist in the catalog
    let all_cases: Vec<&TestCase> = catalog
        .values()
        .flat_map(|subgroups| subgroups.values())
        .flatten()
        .collect();

    let choices: Vec<String> = all_cases.iter().map(|c| c.summary()).collect();
    let picks = MultiSelect::new("Reference existing cases:", choices)
        .prompt()
        .unwrap_or_default();

    let selected_existing_cases: Vec<u64> =
        picks.iter().filter_map(|s| parse_leading_id(s)).collect();

    // Fresh cases owned by the group, ids continue after the catalog
    let mut next_id = all_cases.iter().map(|c| c.id).max().unwrap_or(0) + 1;
    let mut test_cases = Vec::new();

    println!(
        "{}",
        "Add new cases to the group. Leave the name empty to finish.".blue()
    );

    loop {
        let case_name = Text::new("Case name:").prompt().unwrap_or_default();
        if case_name.trim().is_empty() {
            break;
        }

        let description = Text::new("Case description:").prompt().unwrap_or_default();

        test_cases.push(TestCase {
            id: next_id,
            name: case_name,
            description,
            test_type: None,
            subgroup: None,
            custom_group: Some(group_name.clone()),
        });
        next_id += 1;
    }

    Some(CustomGroup {
        name: group_name,
        test_cases,
        selected_existing_cases,
    })
}

/// Merges a custom group into the selection: referenced catalog cases
/// first (skipping ones already picked), then the group's own cases
fn apply_custom_group(selected: &mut Vec<TestCase>, group: &CustomGroup, catalog: &TestCaseGroup) {
    for id in &group.selected_existing_cases {
        if selected.iter().any(|c| c.id == *id) {
            continue;
        }

        let referenced = catalog
            .values()
            .flat_map(|subgroups| subgroups.values())
            .flatten()
            .find(|c| c.id == *id);

        match referenced {
            Some(case) => selected.push(case.clone()),
            None => println!(
                "{}",
                format!("Referenced case {} is not in the catalog.", id).yellow()
            ),
        }
    }

    selected.extend(group.test_cases.iter().cloned());
}

/// Prints the precheck outcome with the teacher's color scheme
fn print_analysis(analysis: &AnalysisResult) {
    if !analysis.compatible_machines.is_empty() {
        println!(
            "{}",
            format!("{} machine(s) ready.", analysis.compatible_machines.len()).green()
        );
    }

    for entry in &analysis.incompatible_machines {
        for reason in &entry.reasons {
            println!("{}", format!("Incompatible: {}", reason).red());
        }
    }

    for missing in &analysis.missing_configurations {
        println!("{}", format!("Missing configuration: {}", missing).red());
    }

    for warning in &analysis.warnings {
        println!("{}", format!("Warning: {}", warning).yellow());
    }
}

/// Selects one option from a label/value table, returning the value
fn select_from_table(prompt: &str, table: &[crate::options::SelectOption]) -> String {
    let selection = Select::new(prompt, labels(table)).prompt();

    match selection {
        Ok(label) => value_for_label(table, label).to_string(),
        Err(_) => table.first().map(|o| o.value).unwrap_or("").to_string(),
    }
}

/// Name of a machine by id, for per-machine prompts
fn machine_name(machines: &[Machine], id: u64) -> String {
    machines
        .iter()
        .find(|m| m.id == id)
        .map(|m| m.name.clone())
        .unwrap_or_else(|| format!("machine {}", id))
}

/// Numeric id prefix of a "id: ..." prompt line
fn parse_leading_id(line: &str) -> Option<u64> {
    line.split(':').next()?.trim().parse().ok()
}
