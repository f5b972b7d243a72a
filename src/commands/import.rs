use colored::*;
use std::fs;
use std::io;
use std::path::Path;

use crate::models::YamlData;
use crate::utils::PLANS_DIR;

/// Upload size cap carried over from the original service
const MAX_PLAN_SIZE: u64 = 5 * 1024 * 1024;

/// Validates an external plan file and copies it into the plan library
pub fn import_plan(file_path: &str) -> io::Result<()> {
    import_plan_into(file_path, Path::new(PLANS_DIR))
}

fn import_plan_into(file_path: &str, plans_dir: &Path) -> io::Result<()> {
    let path = Path::new(file_path);

    let plan = match validate_plan_file(path) {
        Ok(plan) => plan,
        Err(e) => {
            println!("{}", format!("Import rejected: {}", e).red());
            return Ok(());
        }
    };

    // Basic info, as the original stored it alongside the record
    println!("{}", "Plan accepted.".green());
    println!("Version: {}", plan.metadata.version);
    println!("Generated: {}", plan.metadata.generated);
    println!("CPU: {}", plan.hardware.cpu);
    println!("GPU: {}", plan.hardware.gpu);
    println!("OS: {}", plan.os_summary());
    println!("Kernel: {}", plan.kernel_summary());
    println!("Machines: {}", plan.hardware.machines.len());
    println!("Test suites: {}", plan.test_suites.len());

    // Copy into the library unless it is already there
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("imported.yaml");
    let target = plans_dir.join(file_name);

    // The source may be the stored copy itself under another path spelling;
    // copying onto the same inode would truncate it
    if target.exists() && fs::canonicalize(path)? == fs::canonicalize(&target)? {
        println!("{}", "File is already in the plan library.".yellow());
        return Ok(());
    }

    fs::copy(path, &target)?;
    println!("{}", format!("Plan stored as {}", target.display()).green());

    Ok(())
}

/// Runs the extension, size and shape checks on a plan file
pub fn validate_plan_file(path: &Path) -> io::Result<YamlData> {
    let ext = path.extension().and_then(|s| s.to_str());
    if !matches!(ext, Some("yaml") | Some("yml")) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "only YAML files (.yaml, .yml) are allowed",
        ));
    }

    let size = fs::metadata(path)?.len();
    if size > MAX_PLAN_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "file size exceeds the 5MB limit",
        ));
    }

    let content = fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FormData, Machine, MachineStatus, YamlData};
    use crate::utils::{load_plan, save_plan};
    use std::io::Write;
    use tempfile::{tempdir, Builder};

    fn sample_plan() -> YamlData {
        let form = FormData {
            cpu: "Ryzen 9 7950X".into(),
            gpu: "RTX 4080".into(),
            selected_machines: vec![1],
            os: Some("ubuntu-24.04".into()),
            deployment: Some("bare-metal".into()),
            kernel_type: Some("default".into()),
            kernel_version: Some("6.5.0".into()),
            firmware_version: "545.29".into(),
            ..FormData::default()
        };
        let machines = vec![Machine {
            id: 1,
            name: "bench-01".into(),
            motherboard: "B650".into(),
            gpu: "RTX 4080".into(),
            cpu: "Ryzen 9 7950X".into(),
            status: MachineStatus::Available,
        }];

        YamlData::assemble(&form, &machines, "1.0.0")
    }

    #[test]
    fn wrong_extension_is_rejected() {
        let file = Builder::new().suffix(".txt").tempfile().unwrap();
        let err = validate_plan_file(file.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn oversized_file_is_rejected() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        let chunk = vec![b'a'; 1024 * 1024];
        for _ in 0..6 {
            file.write_all(&chunk).unwrap();
        }
        file.flush().unwrap();

        let err = validate_plan_file(file.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn malformed_document_is_invalid_data() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "metadata: [not, the, right, shape]").unwrap();
        file.flush().unwrap();

        let err = validate_plan_file(file.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn importing_the_stored_copy_keeps_its_content() {
        let dir = tempdir().unwrap();
        let plans_dir = dir.path().join("plans");
        std::fs::create_dir_all(&plans_dir).unwrap();

        let stored = plans_dir.join("p.yaml");
        let plan = sample_plan();
        save_plan(stored.to_str().unwrap(), &plan).unwrap();

        // Same file, reached through a different path spelling
        let spelled = format!("{}/./p.yaml", plans_dir.to_str().unwrap());
        import_plan_into(&spelled, &plans_dir).unwrap();

        let reloaded = load_plan(stored.to_str().unwrap()).unwrap();
        assert_eq!(reloaded, plan);
    }

    #[test]
    fn import_copies_external_plans_into_the_library() {
        let dir = tempdir().unwrap();
        let plans_dir = dir.path().join("plans");
        std::fs::create_dir_all(&plans_dir).unwrap();

        let source = dir.path().join("incoming.yaml");
        let plan = sample_plan();
        save_plan(source.to_str().unwrap(), &plan).unwrap();

        import_plan_into(source.to_str().unwrap(), &plans_dir).unwrap();

        let stored = plans_dir.join("incoming.yaml");
        assert_eq!(load_plan(stored.to_str().unwrap()).unwrap(), plan);
    }

    #[test]
    fn well_formed_plan_passes_validation() {
        let file = Builder::new().suffix(".yaml").tempfile().unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let plan = sample_plan();
        save_plan(&path, &plan).unwrap();

        let validated = validate_plan_file(Path::new(&path)).unwrap();
        assert_eq!(validated, plan);
    }
}
