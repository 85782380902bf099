use anyhow::{Context, Result};

use crate::context::RuntimeContext;
use crate::output::*;
use ems_core::config;
use ems_core::types::Employee;

pub fn run(ctx: &RuntimeContext) -> Result<()> {
    config::ensure_ems_dir(&ctx.cwd)?;

    let file_path = config::get_employees_path(&ctx.cwd);
    let content = std::fs::read_to_string(&file_path)
        .with_context(|| format!("failed to read {}", file_path.display()))?;

    let mut all_errors: Vec<serde_json::Value> = Vec::new();
    let mut total_records = 0usize;

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        total_records += 1;
        let line_number = line_num + 1;

        let problems: Vec<String> = match serde_json::from_str::<Employee>(trimmed) {
            Err(e) => vec![format!("schema validation failed: {e}")],
            Ok(employee) => employee
                .malformed_dates()
                .into_iter()
                .map(|(field, raw)| {
                    format!("{}: {field} \"{raw}\" is not a valid date", employee.employee_id)
                })
                .collect(),
        };

        for message in problems {
            if !ctx.json {
                print_error(&format!("employees.jsonl:{line_number} - {message}"));
            }
            all_errors.push(serde_json::json!({
                "line": line_number,
                "message": message,
            }));
        }
    }

    let total_errors = all_errors.len();
    if ctx.json {
        output_json(&serde_json::json!({
            "success": total_errors == 0,
            "command": "validate",
            "valid": total_errors == 0,
            "totalRecords": total_records,
            "totalErrors": total_errors,
            "errors": all_errors,
        }));
    } else if total_errors > 0 {
        print_error(&format!(
            "{total_records} records validated, {total_errors} errors found"
        ));
    } else {
        print_success(&format!(
            "{total_records} records validated, {total_errors} errors found"
        ));
    }

    Ok(())
}
