use colored::*;
use std::io;

use crate::utils::{get_plan_files, get_report_files, print_plan_line};

/// Lists the available plan and report files
pub fn list_plan_files() -> io::Result<()> {
    let plan_files = get_plan_files()?;
    let report_files = get_report_files()?;

    if plan_files.is_empty() && report_files.is_empty() {
        println!("{}", "No plan files available.".yellow());
        return Ok(());
    }

    if !plan_files.is_empty() {
        println!("{}", "Available plans:".green());
        for (i, file) in plan_files.iter().enumerate() {
            print_plan_line(i + 1, file);
        }
        println!();
    } else {
        println!("{}", "No plans available.".yellow());
    }

    if !report_files.is_empty() {
        println!("{}", "Available reports:".green());
        for (i, file) in report_files.iter().enumerate() {
            println!("{}: {}", i + 1, file);
        }
    } else {
        println!("{}", "No reports available.".yellow());
    }

    Ok(())
}
