use chrono::{DateTime, Utc};

use crate::alerts::partition_by_urgency;
use crate::breakdown::{Breakdown, Dimension, sorted_entries};
use crate::dashboard::DashboardSummary;
use crate::dates;
use crate::documents::DocumentFolder;
use crate::store::FileMetadata;
use crate::types::{Employee, VisaAlert};
use crate::visa;

// ── Helpers ────────────────────────────────────────────────────────────────

pub fn format_days_remaining(days: i64) -> String {
    match days {
        d if d < -1 => format!("expired {} days ago", -d),
        -1 => "expired yesterday".to_string(),
        0 => "expires today".to_string(),
        1 => "expires tomorrow".to_string(),
        d => format!("in {d} days"),
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Stored date shown as `DD-MM-YYYY`, the raw value if it does not parse,
/// or `-` when absent.
fn display_date(raw: Option<&str>) -> String {
    match raw {
        None => "-".to_string(),
        Some(r) => dates::parse_date(r)
            .map(dates::to_display)
            .unwrap_or_else(|| format!("{r} (invalid)")),
    }
}

fn id_tag(employee: &Employee) -> String {
    match employee.id.as_deref() {
        Some(id) => format!("[{id}] "),
        None => String::new(),
    }
}

// ── Employees ──────────────────────────────────────────────────────────────

pub fn format_employee_line(
    employee: &Employee,
    now: DateTime<Utc>,
    default_company: &str,
) -> String {
    let chip = visa::chip_status(employee, now);
    let trade = employee.trade.as_deref().unwrap_or("-");
    let inactive = if employee.is_active { "" } else { " (inactive)" };
    format!(
        "  {}{} {} | {} | {} | visa {} | {chip}{inactive}",
        id_tag(employee),
        employee.employee_id,
        employee.name,
        trade,
        employee.company_or(default_company),
        display_date(employee.visa_expiry_date.as_deref()),
    )
}

pub fn format_employee_list(
    employees: &[&Employee],
    now: DateTime<Utc>,
    default_company: &str,
) -> String {
    if employees.is_empty() {
        return "No employees found.".to_string();
    }
    let mut lines = vec![format!("Employees ({})", employees.len()), String::new()];
    lines.extend(
        employees
            .iter()
            .map(|e| format_employee_line(e, now, default_company)),
    );
    lines.join("\n")
}

pub fn format_employee_detail(
    employee: &Employee,
    now: DateTime<Utc>,
    default_company: &str,
) -> String {
    let classification = visa::classify_employee(employee, now);
    let alert = match (classification.urgency, classification.days_remaining) {
        (Some(u), Some(d)) => format!("{u} ({})", format_days_remaining(d)),
        (None, Some(d)) => format!("none ({})", format_days_remaining(d)),
        _ => "none".to_string(),
    };
    let opt = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());

    [
        format!("{} {}", employee.name, id_tag(employee).trim_end()),
        format!("  Employee ID:   {}", employee.employee_id),
        format!("  Company:       {}", employee.company_or(default_company)),
        format!("  Trade:         {}", opt(&employee.trade)),
        format!("  Nationality:   {}", opt(&employee.nationality)),
        format!("  Date of birth: {}", display_date(employee.date_of_birth.as_deref())),
        format!("  Joined:        {}", display_date(employee.join_date.as_deref())),
        format!("  Visa expiry:   {}", display_date(employee.visa_expiry_date.as_deref())),
        format!("  Visa status:   {}", visa::chip_status(employee, now)),
        format!("  Visa alert:    {} / {alert}", classification.category),
        format!("  Email:         {}", opt(&employee.email_id)),
        format!("  Mobile:        {}", opt(&employee.mobile_number)),
        format!("  Passport:      {}", opt(&employee.passport_number)),
        format!("  Active:        {}", if employee.is_active { "yes" } else { "no" }),
    ]
    .join("\n")
}

// ── Alerts ─────────────────────────────────────────────────────────────────

fn format_alert_line(alert: &VisaAlert) -> String {
    format!(
        "  {} {} | {} | {}",
        alert.employee_id,
        alert.employee_name,
        dates::to_display(alert.expiry_date),
        format_days_remaining(alert.days_remaining)
    )
}

pub fn format_alerts(alerts: &[VisaAlert]) -> String {
    if alerts.is_empty() {
        return "No visa alerts. Every visa is more than 60 days from expiry.".to_string();
    }

    let buckets = partition_by_urgency(alerts);
    let mut lines = vec![format!("Visa Alerts ({})", alerts.len())];
    for (title, bucket) in [
        ("Critical", &buckets.critical),
        ("Warning", &buckets.warning),
        ("Notice", &buckets.notice),
    ] {
        if bucket.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(format!("{title} ({})", bucket.len()));
        lines.extend(bucket.iter().map(|a| format_alert_line(a)));
    }
    lines.join("\n")
}

// ── Breakdown ──────────────────────────────────────────────────────────────

pub fn format_breakdown(dimension: Dimension, counts: &Breakdown) -> String {
    let title = format!("Employees by {dimension}");
    let mut lines = vec![title.clone(), "=".repeat(title.len())];
    if counts.is_empty() {
        lines.push("No employees in this breakdown.".to_string());
        return lines.join("\n");
    }

    let entries = sorted_entries(counts);
    let width = entries.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, count) in entries {
        lines.push(format!("  {label:<width$}  {count:>4}  {}", "#".repeat(count.min(40))));
    }
    lines.push(format!("  {:<width$}  {:>4}", "Total", counts.values().sum::<usize>()));
    lines.join("\n")
}

// ── Dashboard ──────────────────────────────────────────────────────────────

pub fn format_dashboard(summary: &DashboardSummary) -> String {
    let mut lines = vec![
        "CUBS EMS Status".to_string(),
        "===============".to_string(),
        String::new(),
    ];

    if summary.total == 0 {
        lines.push("No employees yet. Run `ems add <employee-id> <name>` to get started.".to_string());
        return lines.join("\n");
    }

    lines.push(format!(
        "  Employees: {} ({} active, {} inactive)",
        summary.total, summary.active, summary.inactive_flag
    ));
    lines.push(format!(
        "  Visa status: {} active, {} expiring, {} inactive",
        summary.chip.active, summary.chip.expiring, summary.chip.inactive
    ));
    lines.push(format!(
        "  Alerts: {} critical, {} warning, {} notice",
        summary.alerts.critical, summary.alerts.warning, summary.alerts.notice
    ));
    if summary.missing_expiry > 0 {
        lines.push(format!(
            "  {} employee(s) have no usable visa expiry date",
            summary.missing_expiry
        ));
    }
    lines.join("\n")
}

// ── Documents ──────────────────────────────────────────────────────────────

pub fn format_folders(folders: &[DocumentFolder]) -> String {
    if folders.is_empty() {
        return "No documents uploaded.".to_string();
    }
    folders
        .iter()
        .map(|f| {
            format!(
                "  {}/  {} file(s), {}",
                f.name,
                f.file_count,
                format_bytes(f.total_bytes)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_files(files: &[FileMetadata]) -> String {
    if files.is_empty() {
        return "No documents found.".to_string();
    }
    files
        .iter()
        .map(|f| format!("  {}  {}", f.path, format_bytes(f.size)))
        .collect::<Vec<_>>()
        .join("\n")
}
