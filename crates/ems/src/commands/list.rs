use anyhow::{Result, bail};

use crate::cli::ListArgs;
use crate::context::RuntimeContext;
use crate::output::*;
use ems_core::filter::EmployeeFilter;
use ems_core::store::EmployeeStore;
use ems_core::types::VisaCategory;
use ems_core::{format, visa};

use super::open_store;

fn parse_status(s: &str) -> Result<VisaCategory> {
    match s {
        "active" => Ok(VisaCategory::Active),
        "expiring" => Ok(VisaCategory::Expiring),
        "inactive" => Ok(VisaCategory::Inactive),
        other => bail!("unknown visa status \"{other}\""),
    }
}

pub fn run(ctx: &RuntimeContext, args: &ListArgs) -> Result<()> {
    let (cfg, store) = open_store(ctx)?;
    let employees = store.list()?;

    let criteria = EmployeeFilter {
        status: args.status.as_deref().map(parse_status).transpose()?,
        company: args.company.clone(),
        search: args.search.clone(),
        active_only: args.active_only,
    };
    let selected = criteria.apply(&employees, ctx.now, &cfg.default_company);

    if ctx.json {
        let rows: Vec<serde_json::Value> = selected
            .iter()
            .map(|e| {
                serde_json::json!({
                    "employee": e,
                    "visaStatus": visa::chip_status(e, ctx.now),
                })
            })
            .collect();
        output_json(&serde_json::json!({
            "success": true,
            "command": "list",
            "count": rows.len(),
            "employees": rows,
        }));
    } else {
        println!(
            "{}",
            format::format_employee_list(&selected, ctx.now, &cfg.default_company)
        );
    }

    Ok(())
}
