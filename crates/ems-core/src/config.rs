use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{EmsError, Result};
use crate::types::EmsConfig;

const EMS_DIR: &str = ".ems";
const CONFIG_FILE: &str = "ems.config.yaml";
const EMPLOYEES_FILE: &str = "employees.jsonl";
const DOCUMENTS_DIR: &str = "documents";
const OUTBOX_FILE: &str = "outbox.jsonl";

static EMPLOYEE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").unwrap());

pub const EMS_README: &str = r#"# .ems/

This directory holds CUBS EMS employee records.

## Key Commands

- `ems init`       : Initialize a .ems directory
- `ems add`        : Add an employee
- `ems import`     : Bulk-add employees from a JSON file
- `ems list`       : List employees with their visa status
- `ems alerts`     : Show visa expiry alerts, soonest first
- `ems breakdown`  : Count employees by nationality, trade, company, age or join month
- `ems status`     : Dashboard summary
- `ems remind`     : Send visa expiry reminders
- `ems docs`       : Manage employee documents

## Structure

- `ems.config.yaml`: Configuration file
- `employees.jsonl`: One employee record per line
- `documents/`     : Uploaded documents, one folder per employee
- `outbox.jsonl`   : Reminder emails queued for delivery
"#;

pub fn get_ems_dir(cwd: &Path) -> PathBuf {
    cwd.join(EMS_DIR)
}

pub fn get_config_path(cwd: &Path) -> PathBuf {
    get_ems_dir(cwd).join(CONFIG_FILE)
}

pub fn get_employees_path(cwd: &Path) -> PathBuf {
    get_ems_dir(cwd).join(EMPLOYEES_FILE)
}

pub fn get_documents_dir(cwd: &Path) -> PathBuf {
    get_ems_dir(cwd).join(DOCUMENTS_DIR)
}

pub fn get_outbox_path(cwd: &Path) -> PathBuf {
    get_ems_dir(cwd).join(OUTBOX_FILE)
}

pub fn validate_employee_id(employee_id: &str) -> Result<()> {
    if !EMPLOYEE_ID_RE.is_match(employee_id) {
        return Err(EmsError::InvalidEmployeeId(employee_id.to_string()));
    }
    Ok(())
}

pub fn read_config(cwd: &Path) -> Result<EmsConfig> {
    let content = fs::read_to_string(get_config_path(cwd))?;
    let config: EmsConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

pub fn write_config(config: &EmsConfig, cwd: &Path) -> Result<()> {
    let content = serde_yaml::to_string(config)?;
    fs::write(get_config_path(cwd), content)?;
    Ok(())
}

pub fn ensure_ems_dir(cwd: &Path) -> Result<()> {
    if !get_ems_dir(cwd).is_dir() {
        return Err(EmsError::NotInitialized);
    }
    Ok(())
}

pub fn init_ems_dir(cwd: &Path) -> Result<()> {
    let ems_dir = get_ems_dir(cwd);
    fs::create_dir_all(&ems_dir)?;
    fs::create_dir_all(get_documents_dir(cwd))?;

    // Never overwrite existing config or records
    if !get_config_path(cwd).exists() {
        write_config(&EmsConfig::default(), cwd)?;
    }
    let employees_path = get_employees_path(cwd);
    if !employees_path.exists() {
        fs::write(&employees_path, "")?;
    }

    let readme_path = ems_dir.join("README.md");
    if !readme_path.exists() {
        fs::write(&readme_path, EMS_README)?;
    }

    Ok(())
}
