use anyhow::Result;

use crate::cli::ShowArgs;
use crate::context::RuntimeContext;
use crate::output::*;
use ems_core::store::EmployeeStore;
use ems_core::{format, resolve, visa};

use super::open_store;

pub fn run(ctx: &RuntimeContext, args: &ShowArgs) -> Result<()> {
    let (cfg, store) = open_store(ctx)?;
    let employees = store.list()?;
    let (_, employee) = resolve::resolve_employee(&employees, &args.id)?;

    if ctx.json {
        let classification = visa::classify_employee(employee, ctx.now);
        output_json(&serde_json::json!({
            "success": true,
            "command": "show",
            "employee": employee,
            "visaStatus": visa::chip_status(employee, ctx.now),
            "visa": {
                "category": classification.category,
                "daysRemaining": classification.days_remaining,
                "urgency": classification.urgency,
            },
        }));
    } else {
        println!(
            "{}",
            format::format_employee_detail(employee, ctx.now, &cfg.default_company)
        );
    }

    Ok(())
}
