use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::types::{Employee, Urgency, VisaAlert};
use crate::visa;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertCounts {
    pub critical: usize,
    pub warning: usize,
    pub notice: usize,
}

impl AlertCounts {
    pub fn total(&self) -> usize {
        self.critical + self.warning + self.notice
    }

    pub(crate) fn record(&mut self, urgency: Urgency) {
        match urgency {
            Urgency::Critical => self.critical += 1,
            Urgency::Warning => self.warning += 1,
            Urgency::Notice => self.notice += 1,
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct AlertBuckets<'a> {
    pub critical: Vec<&'a VisaAlert>,
    pub warning: Vec<&'a VisaAlert>,
    pub notice: Vec<&'a VisaAlert>,
}

fn to_alert(employee: &Employee, now: DateTime<Utc>) -> Option<VisaAlert> {
    let expiry = employee.visa_expiry()?;
    let classification = visa::classify(Some(expiry), now);
    Some(VisaAlert {
        id: employee.id.clone(),
        employee_id: employee.employee_id.clone(),
        employee_name: employee.name.clone(),
        expiry_date: expiry,
        days_remaining: classification.days_remaining?,
        urgency: classification.urgency?,
        category: classification.category,
        email_id: employee.email_id.clone(),
        company_name: employee.company_name.clone(),
    })
}

/// Build the visa alert list, soonest expiry first.
///
/// Employees without an expiry date, with an unparseable one, or more than
/// 60 days from expiry produce no alert. Ties on `days_remaining` are
/// ordered by name, then employee ID.
pub fn build_alerts(employees: &[Employee], now: DateTime<Utc>) -> Vec<VisaAlert> {
    let mut alerts: Vec<VisaAlert> = employees
        .iter()
        .filter_map(|e| {
            if e.visa_expiry_date.is_some() && e.visa_expiry().is_none() {
                debug!(employee_id = %e.employee_id, "skipping unparseable visa expiry date");
            }
            to_alert(e, now)
        })
        .collect();

    alerts.sort_by(|a, b| {
        a.days_remaining
            .cmp(&b.days_remaining)
            .then_with(|| a.employee_name.cmp(&b.employee_name))
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });
    alerts
}

/// Split alerts by urgency, keeping their order within each tier.
pub fn partition_by_urgency(alerts: &[VisaAlert]) -> AlertBuckets<'_> {
    let mut buckets = AlertBuckets::default();
    for alert in alerts {
        match alert.urgency {
            Urgency::Critical => buckets.critical.push(alert),
            Urgency::Warning => buckets.warning.push(alert),
            Urgency::Notice => buckets.notice.push(alert),
        }
    }
    buckets
}

pub fn count_by_urgency(alerts: &[VisaAlert]) -> AlertCounts {
    let mut counts = AlertCounts::default();
    for alert in alerts {
        counts.record(alert.urgency);
    }
    counts
}

pub fn filter_by_urgency(alerts: &[VisaAlert], urgency: Urgency) -> Vec<&VisaAlert> {
    alerts.iter().filter(|a| a.urgency == urgency).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VisaCategory;
    use chrono::{Duration, NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    fn emp(id: &str, name: &str, expiry_in_days: Option<i64>) -> Employee {
        let mut e = Employee::new(id, name);
        e.visa_expiry_date = expiry_in_days.map(|d| {
            let date: NaiveDate = now().date_naive() + Duration::days(d);
            date.format("%Y-%m-%d").to_string()
        });
        e
    }

    #[test]
    fn ten_employees_five_within_sixty_days() {
        let employees = vec![
            emp("E01", "Anil", Some(90)),
            emp("E02", "Bala", Some(45)),
            emp("E03", "Chen", Some(120)),
            emp("E04", "Dina", Some(3)),
            emp("E05", "Eko", Some(61)),
            emp("E06", "Faisal", Some(-2)),
            emp("E07", "Gita", Some(365)),
            emp("E08", "Hari", Some(20)),
            emp("E09", "Ivan", Some(200)),
            emp("E10", "Joy", Some(60)),
        ];
        let alerts = build_alerts(&employees, now());

        assert_eq!(alerts.len(), 5);
        let order: Vec<(&str, i64)> = alerts
            .iter()
            .map(|a| (a.employee_id.as_str(), a.days_remaining))
            .collect();
        assert_eq!(
            order,
            vec![("E06", -2), ("E04", 3), ("E08", 20), ("E02", 45), ("E10", 60)]
        );
        for pair in alerts.windows(2) {
            assert!(pair[0].days_remaining <= pair[1].days_remaining);
        }
    }

    #[test]
    fn absent_and_malformed_dates_produce_no_alert() {
        let mut bad = emp("E02", "Bad", None);
        bad.visa_expiry_date = Some("31/31/2024".to_string());
        let employees = vec![emp("E01", "None", None), bad, emp("E03", "Ok", Some(1))];

        let alerts = build_alerts(&employees, now());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].employee_id, "E03");
    }

    #[test]
    fn ties_are_broken_by_name() {
        let employees = vec![
            emp("E1", "Zara", Some(10)),
            emp("E2", "Amir", Some(10)),
            emp("E3", "Mona", Some(10)),
        ];
        let alerts = build_alerts(&employees, now());
        let names: Vec<&str> = alerts.iter().map(|a| a.employee_name.as_str()).collect();
        assert_eq!(names, vec!["Amir", "Mona", "Zara"]);
    }

    #[test]
    fn alert_carries_classification() {
        let mut e = emp("E1", "Asha", Some(-1));
        e.email_id = Some("asha@example.com".to_string());
        let alerts = build_alerts(&[e], now());
        assert_eq!(alerts[0].category, VisaCategory::Expired);
        assert_eq!(alerts[0].urgency, Urgency::Critical);
        assert_eq!(alerts[0].days_remaining, -1);
        assert_eq!(alerts[0].email_id.as_deref(), Some("asha@example.com"));
    }

    #[test]
    fn building_twice_gives_identical_results() {
        let employees = vec![
            emp("E1", "A", Some(5)),
            emp("E2", "B", Some(40)),
            emp("E3", "C", Some(-10)),
        ];
        assert_eq!(build_alerts(&employees, now()), build_alerts(&employees, now()));
    }

    #[test]
    fn partition_and_count() {
        let employees = vec![
            emp("E1", "A", Some(-3)),
            emp("E2", "B", Some(2)),
            emp("E3", "C", Some(15)),
            emp("E4", "D", Some(50)),
            emp("E5", "E", Some(55)),
        ];
        let alerts = build_alerts(&employees, now());
        let buckets = partition_by_urgency(&alerts);
        assert_eq!(buckets.critical.len(), 2);
        assert_eq!(buckets.warning.len(), 1);
        assert_eq!(buckets.notice.len(), 2);
        assert_eq!(buckets.critical[0].employee_id, "E1");

        let counts = count_by_urgency(&alerts);
        assert_eq!(
            counts,
            AlertCounts {
                critical: 2,
                warning: 1,
                notice: 2
            }
        );
        assert_eq!(counts.total(), 5);
        assert_eq!(filter_by_urgency(&alerts, Urgency::Notice).len(), 2);
    }
}
