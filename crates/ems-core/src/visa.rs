//! Visa status classification.
//!
//! Two policies are in use. The alert policy ([`classify`]) drives the
//! alert list, reminders and dashboard counts. The chip policy
//! ([`classify_chip`]) is the coarse three-state status shown next to an
//! employee in lists. They disagree for some inputs: a visa 45 days out is
//! a `notice` alert but an `ACTIVE` chip.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::dates;
use crate::types::{Employee, Urgency, VisaCategory};

/// Last day (inclusive) that is still `critical` before expiry.
pub const CRITICAL_WITHIN_DAYS: i64 = 7;
/// Last day (inclusive) that counts as `EXPIRING`.
pub const EXPIRING_WITHIN_DAYS: i64 = 30;
/// Last day (inclusive) that still produces a `notice` alert.
pub const NOTICE_WITHIN_DAYS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisaClassification {
    pub category: VisaCategory,
    pub days_remaining: Option<i64>,
    pub urgency: Option<Urgency>,
}

impl VisaClassification {
    const INACTIVE: Self = Self {
        category: VisaCategory::Inactive,
        days_remaining: None,
        urgency: None,
    };

    /// Whether this result produces an entry in the alert list.
    pub fn is_alert(&self) -> bool {
        self.urgency.is_some()
    }
}

/// Alert policy.
pub fn classify(expiry: Option<NaiveDate>, now: DateTime<Utc>) -> VisaClassification {
    let Some(expiry) = expiry else {
        return VisaClassification::INACTIVE;
    };
    let days = dates::days_until(expiry, now);

    let (category, urgency) = if days < 0 {
        (VisaCategory::Expired, Some(Urgency::Critical))
    } else if days <= CRITICAL_WITHIN_DAYS {
        (VisaCategory::Expiring, Some(Urgency::Critical))
    } else if days <= EXPIRING_WITHIN_DAYS {
        (VisaCategory::Expiring, Some(Urgency::Warning))
    } else if days <= NOTICE_WITHIN_DAYS {
        (VisaCategory::Active, Some(Urgency::Notice))
    } else {
        (VisaCategory::Active, None)
    };

    VisaClassification {
        category,
        days_remaining: Some(days),
        urgency,
    }
}

/// Alert policy applied to an employee's stored expiry date. A malformed
/// date classifies the same as an absent one.
pub fn classify_employee(employee: &Employee, now: DateTime<Utc>) -> VisaClassification {
    classify(employee.visa_expiry(), now)
}

/// Chip policy: expired or absent is `INACTIVE`, up to 30 days is
/// `EXPIRING`, anything later is `ACTIVE`. Never returns `EXPIRED`.
pub fn classify_chip(expiry: Option<NaiveDate>, now: DateTime<Utc>) -> VisaCategory {
    match expiry.map(|d| dates::days_until(d, now)) {
        None => VisaCategory::Inactive,
        Some(days) if days < 0 => VisaCategory::Inactive,
        Some(days) if days <= EXPIRING_WITHIN_DAYS => VisaCategory::Expiring,
        Some(_) => VisaCategory::Active,
    }
}

pub fn chip_status(employee: &Employee, now: DateTime<Utc>) -> VisaCategory {
    classify_chip(employee.visa_expiry(), now)
}
