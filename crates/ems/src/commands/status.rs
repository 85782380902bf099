use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::*;
use ems_core::breakdown::Dimension;
use ems_core::store::EmployeeStore;
use ems_core::{alerts, dashboard, format};

use super::open_store;

const UPCOMING_SHOWN: usize = 5;

pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let (cfg, store) = open_store(ctx)?;
    let employees = store.list()?;

    let summary = dashboard::summarize(&employees, ctx.now);
    let upcoming = alerts::build_alerts(&employees, ctx.now);

    if ctx.json {
        let breakdowns: serde_json::Map<String, serde_json::Value> = Dimension::ALL
            .iter()
            .map(|d| {
                let counts = d.compute(&employees, ctx.now, &cfg.default_company);
                (d.as_str().to_string(), serde_json::json!(counts))
            })
            .collect();
        output_json(&serde_json::json!({
            "success": true,
            "command": "status",
            "now": ctx.now.to_rfc3339(),
            "summary": summary,
            "breakdowns": breakdowns,
            "upcoming": upcoming.iter().take(UPCOMING_SHOWN).collect::<Vec<_>>(),
        }));
    } else {
        println!("{}", format::format_dashboard(&summary));
        if !upcoming.is_empty() {
            println!();
            println!("Soonest expiries:");
            for alert in upcoming.iter().take(UPCOMING_SHOWN) {
                println!(
                    "  [{}] {} {} | {}",
                    urgency_label(alert.urgency),
                    alert.employee_id,
                    alert.employee_name,
                    format::format_days_remaining(alert.days_remaining)
                );
            }
            if upcoming.len() > UPCOMING_SHOWN {
                println!(
                    "  ... and {} more. Run `ems alerts` for the full list.",
                    upcoming.len() - UPCOMING_SHOWN
                );
            }
        }
    }

    Ok(())
}
