use clap::{Parser, Subcommand};
use colored::*;
use inquire::Select;
use std::fs::create_dir_all;
use std::io;
use std::path::Path;

mod commands;
mod inventory;
mod models;
mod options;
mod utils;

use commands::{generate_plan, import_plan, list_plan_files, show_plan};
use utils::{get_plan_files, PLANS_DIR, REPORTS_DIR};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a test plan interactively
    Generate {
        /// Name for the plan file
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Import and validate an existing YAML plan
    Import {
        /// Path to the YAML plan file
        #[arg(short, long)]
        file: String,
    },
    /// Show a stored plan
    Show {
        /// Path to the YAML plan file
        #[arg(short, long)]
        file: String,
    },
    /// List available plan and report files
    List,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Create the working directories if they do not exist
    for dir in &[Path::new(PLANS_DIR), Path::new(REPORTS_DIR)] {
        if !dir.exists() {
            create_dir_all(dir)?;
        }
    }

    match &cli.command {
        Some(Commands::Generate { name }) => generate_plan(name.clone())?,
        Some(Commands::Import { file }) => import_plan(file)?,
        Some(Commands::Show { file }) => show_plan(file)?,
        Some(Commands::List) => list_plan_files()?,
        None => {
            // Interactive menu when no subcommand is given
            let menu = vec![
                "Generate a test plan",
                "Import a YAML plan",
                "Show a plan",
                "List plan files",
                "Exit",
            ];

            let selection = Select::new("What do you want to do?", menu).prompt();

            match selection {
                Ok("Generate a test plan") => {
                    let name = inquire::Text::new("Plan name (optional):").prompt().ok();
                    generate_plan(name)?
                }
                Ok("Import a YAML plan") => {
                    let file = inquire::Text::new("Path to the YAML file:").prompt();
                    match file {
                        Ok(path) if !path.is_empty() => import_plan(&path)?,
                        _ => println!("{}", "Operation cancelled.".yellow()),
                    }
                }
                Ok("Show a plan") => {
                    if let Some(file) = select_plan_file()? {
                        show_plan(&file)?
                    }
                }
                Ok("List plan files") => list_plan_files()?,
                _ => println!("{}", "Goodbye!".blue()),
            }
        }
    }

    Ok(())
}

/// Picks one of the stored plan files
fn select_plan_file() -> io::Result<Option<String>> {
    let plan_files = get_plan_files()?;

    if plan_files.is_empty() {
        println!("{}", "No plan files available.".yellow());
        return Ok(None);
    }

    let selection = Select::new("Select a plan file:", plan_files).prompt();

    match selection {
        Ok(file) => Ok(Some(file)),
        Err(_) => Ok(None),
    }
}
