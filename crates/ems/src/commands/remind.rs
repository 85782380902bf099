use anyhow::Result;

use crate::cli::RemindArgs;
use crate::context::RuntimeContext;
use crate::output::*;
use ems_core::mail::OutboxSender;
use ems_core::store::{EmailMessage, EmployeeStore};
use ems_core::types::VisaAlert;
use ems_core::{alerts, config, reminders};

use super::{open_store, parse_urgency};

pub fn run(ctx: &RuntimeContext, args: &RemindArgs) -> Result<()> {
    let (cfg, store) = open_store(ctx)?;
    let employees = store.list()?;

    let all = alerts::build_alerts(&employees, ctx.now);
    let selected: Vec<VisaAlert> = match parse_urgency(args.urgency.as_deref())? {
        Some(u) => alerts::filter_by_urgency(&all, u).into_iter().cloned().collect(),
        None => all,
    };

    if args.dry_run {
        let previews: Vec<EmailMessage> = selected
            .iter()
            .map(|a| reminders::compose_reminder(a, &cfg.reminders))
            .collect();
        if ctx.json {
            output_json(&serde_json::json!({
                "success": true,
                "command": "remind",
                "dryRun": true,
                "messages": previews,
            }));
        } else if previews.is_empty() {
            println!("No reminders to send.");
        } else {
            println!("Dry run: {} reminder(s) would be sent.", previews.len());
            for (alert, message) in selected.iter().zip(&previews) {
                let to = if message.to.is_empty() { "(no recipient)" } else { message.to.as_str() };
                println!("  [{}] {} -> {to}", urgency_label(alert.urgency), message.subject);
            }
        }
        return Ok(());
    }

    let sender = OutboxSender::new(config::get_outbox_path(&ctx.cwd));
    let report = reminders::dispatch_reminders(&selected, &sender, &cfg.reminders);

    if ctx.json {
        output_json(&serde_json::json!({
            "success": report.failed == 0,
            "command": "remind",
            "sent": report.sent,
            "failed": report.failed,
            "failures": report.failures,
        }));
    } else {
        if report.sent == 0 && report.failed == 0 {
            println!("No reminders to send.");
        } else {
            print_success(&format!("Queued {} reminder(s).", report.sent));
        }
        for failure in &report.failures {
            print_warning(&format!(
                "  {}: {}",
                failure.employee_id, failure.error
            ));
        }
    }

    Ok(())
}
