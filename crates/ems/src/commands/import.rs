use std::fs;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::ImportArgs;
use crate::context::RuntimeContext;
use crate::output::*;
use ems_core::EmsError;
use ems_core::store::EmployeeStore;
use ems_core::types::NewEmployee;

use super::open_store;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportError {
    index: usize,
    employee_id: String,
    error: String,
}

/// Accept either a single object or an array of them.
fn parse_batch(content: &str) -> Result<Vec<NewEmployee>> {
    let value: serde_json::Value = serde_json::from_str(content).context("input is not valid JSON")?;
    let batch = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<NewEmployee>, _>>()?,
        other => vec![serde_json::from_value(other)?],
    };
    Ok(batch)
}

pub fn run(ctx: &RuntimeContext, args: &ImportArgs) -> Result<()> {
    let (_cfg, store) = open_store(ctx)?;

    let content =
        fs::read_to_string(&args.file).with_context(|| format!("failed to read {}", args.file))?;
    let batch = parse_batch(&content)?;

    if args.dry_run {
        if ctx.json {
            output_json(&serde_json::json!({
                "success": true,
                "command": "import",
                "dryRun": true,
                "wouldImport": batch.len(),
            }));
        } else {
            println!("Dry run: would import {} employee(s).", batch.len());
        }
        return Ok(());
    }

    let mut created = 0;
    let mut skipped = 0;
    let mut errors: Vec<ImportError> = Vec::new();

    for (index, data) in batch.into_iter().enumerate() {
        let employee_id = data.employee_id.clone();
        match store.create(data) {
            Ok(_) => created += 1,
            Err(EmsError::DuplicateEmployee { .. }) => skipped += 1,
            Err(e) => errors.push(ImportError {
                index,
                employee_id,
                error: e.to_string(),
            }),
        }
    }

    if ctx.json {
        output_json(&serde_json::json!({
            "success": errors.is_empty(),
            "command": "import",
            "created": created,
            "skipped": skipped,
            "errors": errors,
        }));
    } else {
        print_success(&format!(
            "Imported {created} employee(s), skipped {skipped} duplicate(s)."
        ));
        for e in &errors {
            print_error(&format!(
                "  #{} {}: {}",
                e.index + 1,
                if e.employee_id.is_empty() { "-" } else { e.employee_id.as_str() },
                e.error
            ));
        }
    }

    Ok(())
}
