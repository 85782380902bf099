//! Visa expiry reminder emails.

use serde::Serialize;
use tracing::{info, warn};

use crate::dates;
use crate::store::{EmailMessage, EmailSender};
use crate::types::{ReminderSettings, VisaAlert, VisaCategory};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderFailure {
    pub employee_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReminderReport {
    pub sent: usize,
    pub failed: usize,
    pub failures: Vec<ReminderFailure>,
}

fn recipient_for(alert: &VisaAlert, settings: &ReminderSettings) -> Option<String> {
    settings
        .recipient
        .clone()
        .or_else(|| alert.email_id.clone())
        .filter(|r| !r.trim().is_empty())
}

fn status_line(alert: &VisaAlert) -> String {
    let expiry = dates::to_display(alert.expiry_date);
    match (alert.category, alert.days_remaining) {
        (VisaCategory::Expired, days) => {
            let ago = days.unsigned_abs();
            let unit = if ago == 1 { "day" } else { "days" };
            format!("expired on {expiry} ({ago} {unit} ago)")
        }
        (_, 0) => format!("expires today ({expiry})"),
        (_, 1) => format!("expires tomorrow ({expiry})"),
        (_, days) => format!("expires on {expiry} (in {days} days)"),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Build the reminder for one alert. `to` is left empty when neither the
/// settings nor the employee provide an address.
pub fn compose_reminder(alert: &VisaAlert, settings: &ReminderSettings) -> EmailMessage {
    let status = status_line(alert);
    let subject = if alert.category == VisaCategory::Expired {
        format!(
            "{} Visa expired: {} ({})",
            settings.subject_prefix, alert.employee_name, alert.employee_id
        )
    } else {
        format!(
            "{} Visa expiring: {} ({})",
            settings.subject_prefix, alert.employee_name, alert.employee_id
        )
    };
    let company = alert.company_name.as_deref().unwrap_or("-");

    let text_body = format!(
        "Visa expiry reminder\n\n\
         Employee: {name}\n\
         Employee ID: {id}\n\
         Company: {company}\n\
         Urgency: {urgency}\n\n\
         The visa for {name} {status}.\n\
         Please start the renewal process and upload the new visa to the employee's documents.\n",
        name = alert.employee_name,
        id = alert.employee_id,
        urgency = alert.urgency,
    );

    let html_body = format!(
        "<h2>Visa expiry reminder</h2>\
         <table>\
         <tr><td>Employee</td><td>{name}</td></tr>\
         <tr><td>Employee ID</td><td>{id}</td></tr>\
         <tr><td>Company</td><td>{company}</td></tr>\
         <tr><td>Urgency</td><td>{urgency}</td></tr>\
         </table>\
         <p>The visa for <strong>{name}</strong> {status}.</p>\
         <p>Please start the renewal process and upload the new visa to the employee's documents.</p>",
        name = escape_html(&alert.employee_name),
        id = escape_html(&alert.employee_id),
        company = escape_html(company),
        urgency = alert.urgency,
        status = escape_html(&status),
    );

    EmailMessage {
        from: settings.sender.clone(),
        to: recipient_for(alert, settings).unwrap_or_default(),
        subject,
        html_body,
        text_body,
    }
}

/// Send one reminder per alert. A failed or unaddressable reminder is
/// recorded and the batch carries on.
pub fn dispatch_reminders(
    alerts: &[VisaAlert],
    sender: &dyn EmailSender,
    settings: &ReminderSettings,
) -> ReminderReport {
    let mut report = ReminderReport::default();

    for alert in alerts {
        let message = compose_reminder(alert, settings);
        if message.to.is_empty() {
            warn!(employee_id = %alert.employee_id, "no recipient for visa reminder");
            report.failed += 1;
            report.failures.push(ReminderFailure {
                employee_id: alert.employee_id.clone(),
                recipient: None,
                error: "no recipient address".to_string(),
            });
            continue;
        }

        match sender.send(&message) {
            Ok(()) => report.sent += 1,
            Err(e) => {
                warn!(employee_id = %alert.employee_id, recipient = %message.to, error = %e, "visa reminder failed");
                report.failed += 1;
                report.failures.push(ReminderFailure {
                    employee_id: alert.employee_id.clone(),
                    recipient: Some(message.to),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(sent = report.sent, failed = report.failed, "visa reminders dispatched");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EmsError, Result};
    use crate::types::Urgency;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    /// Records every message; refuses recipients listed in `reject`.
    struct RecordingSender {
        sent: RefCell<Vec<EmailMessage>>,
        reject: Vec<&'static str>,
    }

    impl RecordingSender {
        fn new(reject: Vec<&'static str>) -> Self {
            Self {
                sent: RefCell::new(Vec::new()),
                reject,
            }
        }
    }

    impl EmailSender for RecordingSender {
        fn send(&self, message: &EmailMessage) -> Result<()> {
            if self.reject.contains(&message.to.as_str()) {
                return Err(EmsError::Delivery {
                    recipient: message.to.clone(),
                    reason: "mailbox unavailable".to_string(),
                });
            }
            self.sent.borrow_mut().push(message.clone());
            Ok(())
        }
    }

    fn alert(employee_id: &str, days: i64, email: Option<&str>) -> VisaAlert {
        let category = if days < 0 {
            VisaCategory::Expired
        } else {
            VisaCategory::Expiring
        };
        VisaAlert {
            id: None,
            employee_id: employee_id.to_string(),
            employee_name: format!("Worker {employee_id}"),
            expiry_date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            days_remaining: days,
            urgency: Urgency::Critical,
            category,
            email_id: email.map(str::to_string),
            company_name: Some("CUBS Technical".to_string()),
        }
    }

    #[test]
    fn compose_expiring_reminder() {
        let msg = compose_reminder(&alert("CT-001", 5, Some("w1@example.com")), &ReminderSettings::default());
        assert_eq!(msg.to, "w1@example.com");
        assert_eq!(msg.from, "noreply@cubstechnical.com");
        assert_eq!(msg.subject, "[CUBS EMS] Visa expiring: Worker CT-001 (CT-001)");
        assert!(msg.text_body.contains("expires on 10-06-2024 (in 5 days)"));
        assert!(msg.html_body.contains("<strong>Worker CT-001</strong>"));
    }

    #[test]
    fn compose_expired_reminder() {
        let msg = compose_reminder(&alert("CT-002", -1, None), &ReminderSettings::default());
        assert_eq!(msg.subject, "[CUBS EMS] Visa expired: Worker CT-002 (CT-002)");
        assert!(msg.text_body.contains("expired on 10-06-2024 (1 day ago)"));
        assert_eq!(msg.to, "");
    }

    #[test]
    fn configured_recipient_overrides_employee_address() {
        let settings = ReminderSettings {
            recipient: Some("hr@cubstechnical.com".to_string()),
            ..ReminderSettings::default()
        };
        let msg = compose_reminder(&alert("CT-001", 3, Some("w1@example.com")), &settings);
        assert_eq!(msg.to, "hr@cubstechnical.com");
    }

    #[test]
    fn html_is_escaped() {
        let mut a = alert("CT-001", 3, Some("w1@example.com"));
        a.employee_name = "<script>".to_string();
        let msg = compose_reminder(&a, &ReminderSettings::default());
        assert!(msg.html_body.contains("&lt;script&gt;"));
        assert!(!msg.html_body.contains("<script>"));
    }

    #[test]
    fn one_failure_does_not_stop_the_batch() {
        let sender = RecordingSender::new(vec!["bad@example.com"]);
        let alerts = vec![
            alert("CT-001", -3, Some("a@example.com")),
            alert("CT-002", 2, Some("bad@example.com")),
            alert("CT-003", 4, None),
            alert("CT-004", 6, Some("d@example.com")),
        ];

        let report = dispatch_reminders(&alerts, &sender, &ReminderSettings::default());

        assert_eq!(report.sent, 2);
        assert_eq!(report.failed, 2);
        let failed_ids: Vec<&str> = report.failures.iter().map(|f| f.employee_id.as_str()).collect();
        assert_eq!(failed_ids, vec!["CT-002", "CT-003"]);
        assert_eq!(report.failures[1].recipient, None);

        let delivered: Vec<String> = sender.sent.borrow().iter().map(|m| m.to.clone()).collect();
        assert_eq!(delivered, vec!["a@example.com", "d@example.com"]);
    }

    #[test]
    fn empty_alert_list_sends_nothing() {
        let sender = RecordingSender::new(vec![]);
        let report = dispatch_reminders(&[], &sender, &ReminderSettings::default());
        assert_eq!(report, ReminderReport::default());
    }
}
