use anyhow::{Result, bail};

use crate::cli::EditArgs;
use crate::context::RuntimeContext;
use crate::output::*;
use ems_core::store::EmployeeStore;
use ems_core::types::EmployeeUpdate;

use super::open_store;

/// `Some(None)` for a cleared field, `Some(Some(v))` for a new value.
fn field(value: &Option<String>, clear: &[String], flag: &str) -> Option<Option<String>> {
    if clear.iter().any(|c| c == flag) {
        Some(None)
    } else {
        value.clone().map(Some)
    }
}

fn build_update(args: &EditArgs) -> EmployeeUpdate {
    let clear = &args.clear;
    EmployeeUpdate {
        name: args.name.clone(),
        trade: field(&args.trade, clear, "trade"),
        nationality: field(&args.nationality, clear, "nationality"),
        company_name: field(&args.company, clear, "company"),
        date_of_birth: field(&args.dob, clear, "dob"),
        join_date: field(&args.join_date, clear, "join-date"),
        visa_expiry_date: field(&args.visa_expiry, clear, "visa-expiry"),
        email_id: field(&args.email, clear, "email"),
        mobile_number: field(&args.mobile, clear, "mobile"),
        passport_number: field(&args.passport, clear, "passport"),
        is_active: match (args.active, args.inactive) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        },
    }
}

pub fn run(ctx: &RuntimeContext, args: &EditArgs) -> Result<()> {
    let (_cfg, store) = open_store(ctx)?;

    let update = build_update(args);
    if update.is_empty() {
        bail!("nothing to update. Pass at least one field flag, --clear, --active or --inactive.");
    }

    let employee = store.update(&args.id, update)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "edit",
            "employee": employee,
        }));
    } else {
        print_success(&format!(
            "Updated {} {}.",
            employee.employee_id, employee.name
        ));
    }

    Ok(())
}
