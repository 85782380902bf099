use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::alerts::AlertCounts;
use crate::types::{Employee, VisaCategory};
use crate::visa;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChipCounts {
    pub active: usize,
    pub expiring: usize,
    pub inactive: usize,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    /// Employees flagged active, regardless of visa state.
    pub active: usize,
    pub inactive_flag: usize,
    pub chip: ChipCounts,
    pub alerts: AlertCounts,
    /// Employees with a valid expiry more than 60 days out.
    pub far_from_expiry: usize,
    pub missing_expiry: usize,
}

/// Single pass over the employee snapshot.
pub fn summarize(employees: &[Employee], now: DateTime<Utc>) -> DashboardSummary {
    let mut summary = DashboardSummary {
        total: employees.len(),
        ..Default::default()
    };

    for employee in employees {
        if employee.is_active {
            summary.active += 1;
        } else {
            summary.inactive_flag += 1;
        }

        let expiry = employee.visa_expiry();
        match visa::classify_chip(expiry, now) {
            VisaCategory::Active => summary.chip.active += 1,
            VisaCategory::Expiring => summary.chip.expiring += 1,
            VisaCategory::Expired | VisaCategory::Inactive => summary.chip.inactive += 1,
        }

        let classification = visa::classify(expiry, now);
        match (classification.urgency, classification.days_remaining) {
            (Some(urgency), _) => summary.alerts.record(urgency),
            (None, Some(_)) => summary.far_from_expiry += 1,
            (None, None) => summary.missing_expiry += 1,
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn emp(expiry: Option<&str>, active: bool) -> Employee {
        let mut e = Employee::new("E", "N");
        e.visa_expiry_date = expiry.map(str::to_string);
        e.is_active = active;
        e
    }

    #[test]
    fn every_dated_employee_lands_in_exactly_one_bucket() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let employees = vec![
            emp(Some("2024-05-01"), true),  // expired
            emp(Some("2024-06-05"), true),  // critical
            emp(Some("2024-06-20"), false), // warning
            emp(Some("2024-07-15"), true),  // notice
            emp(Some("2025-01-01"), true),  // far
            emp(None, true),
            emp(Some("bogus"), false),
        ];
        let summary = summarize(&employees, now);

        assert_eq!(summary.total, 7);
        assert_eq!(summary.active, 5);
        assert_eq!(summary.inactive_flag, 2);
        assert_eq!(
            summary.alerts,
            AlertCounts {
                critical: 2,
                warning: 1,
                notice: 1
            }
        );
        assert_eq!(summary.far_from_expiry, 1);
        assert_eq!(summary.missing_expiry, 2);
        assert_eq!(
            summary.alerts.total() + summary.far_from_expiry + summary.missing_expiry,
            summary.total
        );
        assert_eq!(
            summary.chip,
            ChipCounts {
                active: 2,
                expiring: 2,
                inactive: 3
            }
        );
    }

    #[test]
    fn empty_snapshot() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(summarize(&[], now), DashboardSummary::default());
    }
}
