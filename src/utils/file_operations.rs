use chrono::Local;
use colored::*;
use std::collections::BTreeMap;
use std::fs::{create_dir_all, read_dir, File};
use std::io::{self, Write};
use std::path::Path;
use std::time::SystemTime;

use crate::models::YamlData;

/// Directory holding generated and imported plan documents
pub const PLANS_DIR: &str = "plans";

/// Directory holding markdown reports
pub const REPORTS_DIR: &str = "reports";

/// Saves a plan document as YAML
pub fn save_plan(file_path: &str, plan: &YamlData) -> io::Result<()> {
    let file = File::create(file_path)?;
    serde_yaml::to_writer(file, plan).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Loads a plan document from a YAML file
pub fn load_plan(file_path: &str) -> io::Result<YamlData> {
    if !Path::new(file_path).exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("file {} does not exist", file_path),
        ));
    }

    let file = File::open(file_path)?;
    serde_yaml::from_reader(file).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Lists the available plan files, sorted by name
pub fn get_plan_files() -> io::Result<Vec<String>> {
    let mut plan_files = Vec::new();

    let plans_dir = Path::new(PLANS_DIR);
    if !plans_dir.exists() {
        create_dir_all(plans_dir)?;
        return Ok(plan_files);
    }

    for entry in read_dir(plans_dir)? {
        let entry = entry?;
        let path = entry.path();

        // Only YAML documents
        let ext = path.extension().and_then(|s| s.to_str());
        if path.is_file() && matches!(ext, Some("yaml") | Some("yml")) {
            if let Some(path_str) = path.to_str() {
                plan_files.push(path_str.to_string());
            }
        }
    }

    plan_files.sort();

    Ok(plan_files)
}

/// Lists the available report files, newest first
pub fn get_report_files() -> io::Result<Vec<String>> {
    reports_in(Path::new(REPORTS_DIR))
}

/// Report files in a directory, sorted by modification time descending
fn reports_in(reports_dir: &Path) -> io::Result<Vec<String>> {
    let mut report_files: Vec<(SystemTime, String)> = Vec::new();

    if !reports_dir.exists() {
        create_dir_all(reports_dir)?;
        return Ok(Vec::new());
    }

    for entry in read_dir(reports_dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            if let Some(path_str) = path.to_str() {
                let modified = entry.metadata()?.modified()?;
                report_files.push((modified, path_str.to_string()));
            }
        }
    }

    report_files.sort_by(|a, b| b.0.cmp(&a.0));

    Ok(report_files.into_iter().map(|(_, path)| path).collect())
}

/// Writes the markdown report for a plan
pub fn save_report(file_path: &str, plan: &YamlData, title: &str) -> io::Result<()> {
    let mut file = File::create(file_path)?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    writeln!(file, "# Test Plan: {}", title)?;
    writeln!(file, "\nReport generated: {}", timestamp)?;
    writeln!(file, "Plan generated: {}", plan.metadata.generated)?;
    writeln!(file, "Plan version: {}\n", plan.metadata.version)?;

    writeln!(file, "## Hardware\n")?;
    writeln!(file, "- CPU: {}", plan.hardware.cpu)?;
    writeln!(file, "- GPU: {}\n", plan.hardware.gpu)?;
    writeln!(file, "| ID | Machine | Motherboard | CPU | GPU |")?;
    writeln!(file, "|----|---------|-------------|-----|-----|")?;
    for machine in &plan.hardware.machines {
        writeln!(
            file,
            "| {} | {} | {} | {} | {} |",
            machine.id,
            machine.name,
            machine.specs.motherboard,
            machine.specs.cpu,
            machine.specs.gpu
        )?;
    }

    writeln!(file, "\n## Environment\n")?;
    writeln!(file, "- OS: {}", plan.os_summary())?;
    writeln!(file, "- Kernel: {}", plan.kernel_summary())?;

    writeln!(file, "\n## Firmware\n")?;
    writeln!(file, "- GPU firmware: {}", plan.firmware.gpu_version)?;
    writeln!(
        file,
        "- Version comparison: {}",
        if plan.firmware.comparison { "yes" } else { "no" }
    )?;

    // Count suites per type for the pie chart
    let mut per_type: BTreeMap<&str, usize> = BTreeMap::new();
    for suite in &plan.test_suites {
        *per_type.entry(suite.suite_type.as_str()).or_insert(0) += 1;
    }

    writeln!(file, "\n## Test Suites\n")?;
    writeln!(file, "Total suites: {}\n", plan.test_suites.len())?;

    writeln!(file, "```mermaid")?;
    writeln!(file, "pie title Suites by Test Type")?;
    for (suite_type, count) in &per_type {
        let label = if suite_type.is_empty() { "untyped" } else { suite_type };
        writeln!(file, "    \"{}\" : {}", label, count)?;
    }
    writeln!(file, "```\n")?;

    writeln!(file, "| Order | ID | Name | Type | Subgroup | Description |")?;
    writeln!(file, "|-------|----|------|------|----------|-------------|")?;
    for suite in &plan.test_suites {
        writeln!(
            file,
            "| {} | {} | {} | {} | {} | {} |",
            suite.order, suite.id, suite.name, suite.suite_type, suite.subgroup, suite.description
        )?;
    }

    Ok(())
}

/// Prints a one-line summary of a stored plan file
pub fn print_plan_line(index: usize, file_path: &str) {
    match load_plan(file_path) {
        Ok(plan) => println!(
            "{}: {} ({} machines, {} suites)",
            index,
            file_path,
            plan.hardware.machines.len(),
            plan.test_suites.len()
        ),
        Err(_) => println!("{}: {} {}", index, file_path, "(unreadable)".red()),
    }
}
