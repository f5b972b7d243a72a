use colored::*;
use std::io;

use crate::models::{KernelEnvironment, OsEnvironment};
use crate::utils::load_plan;

/// Prints the full summary of a stored plan
pub fn show_plan(file_path: &str) -> io::Result<()> {
    let plan = match load_plan(file_path) {
        Ok(plan) => plan,
        Err(e) => {
            println!("{}", format!("Could not load {}: {}", file_path, e).red());
            return Ok(());
        }
    };

    println!("{}", format!("Plan: {}", file_path).blue());
    println!("Generated: {}", plan.metadata.generated);
    println!("Version: {}", plan.metadata.version);

    println!("{}", "\nHardware:".blue());
    println!("  CPU: {}", plan.hardware.cpu);
    println!("  GPU: {}", plan.hardware.gpu);
    for machine in &plan.hardware.machines {
        println!(
            "  {}: {} ({} / {} / {})",
            machine.id,
            machine.name,
            machine.specs.motherboard,
            machine.specs.cpu,
            machine.specs.gpu
        );
    }

    println!("{}", "\nEnvironment:".blue());
    match &plan.environment.os {
        OsEnvironment::Shared(sel) => {
            println!("  OS: {} ({})", sel.os, sel.deployment);
        }
        OsEnvironment::PerMachine(map) => {
            for (machine_id, sel) in map {
                println!("  OS for machine {}: {} ({})", machine_id, sel.os, sel.deployment);
            }
        }
    }
    match &plan.environment.kernel {
        KernelEnvironment::Shared(sel) => {
            println!("  Kernel: {} {}", sel.kernel_type, sel.version);
        }
        KernelEnvironment::PerMachine(map) => {
            for (machine_id, sel) in map {
                println!(
                    "  Kernel for machine {}: {} {}",
                    machine_id, sel.kernel_type, sel.version
                );
            }
        }
    }

    println!("{}", "\nFirmware:".blue());
    println!("  GPU firmware: {}", plan.firmware.gpu_version);
    println!(
        "  Version comparison: {}",
        if plan.firmware.comparison { "yes" } else { "no" }
    );

    println!("{}", "\nTest suites:".blue());
    if plan.test_suites.is_empty() {
        println!("{}", "  (none)".yellow());
    }
    for suite in &plan.test_suites {
        println!(
            "  {}. [{}] {} - {}",
            suite.order, suite.suite_type, suite.name, suite.description
        );
    }

    Ok(())
}
