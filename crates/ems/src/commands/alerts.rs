use anyhow::Result;

use crate::cli::AlertsArgs;
use crate::context::RuntimeContext;
use crate::output::*;
use ems_core::store::EmployeeStore;
use ems_core::types::VisaAlert;
use ems_core::{alerts, format};

use super::{open_store, parse_urgency};

pub fn run(ctx: &RuntimeContext, args: &AlertsArgs) -> Result<()> {
    let (_cfg, store) = open_store(ctx)?;
    let employees = store.list()?;

    let all = alerts::build_alerts(&employees, ctx.now);
    let counts = alerts::count_by_urgency(&all);

    let mut selected: Vec<VisaAlert> = match parse_urgency(args.urgency.as_deref())? {
        Some(u) => alerts::filter_by_urgency(&all, u).into_iter().cloned().collect(),
        None => all,
    };
    if let Some(limit) = args.limit {
        selected.truncate(limit);
    }

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "alerts",
            "now": ctx.now.to_rfc3339(),
            "counts": counts,
            "alerts": selected,
        }));
    } else {
        println!("{}", format::format_alerts(&selected));
    }

    Ok(())
}
