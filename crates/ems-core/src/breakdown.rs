//! Grouped employee counts for dashboard charts.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::types::Employee;

pub const UNKNOWN_LABEL: &str = "Unknown";

/// Category label to count.
pub type Breakdown = BTreeMap<String, usize>;

/// Count employees by the label `key_fn` returns. `None` leaves the
/// employee out of this breakdown.
pub fn breakdown<F>(employees: &[Employee], key_fn: F) -> Breakdown
where
    F: Fn(&Employee) -> Option<String>,
{
    let mut counts = Breakdown::new();
    for employee in employees {
        if let Some(key) = key_fn(employee) {
            *counts.entry(key).or_default() += 1;
        }
    }
    counts
}

pub fn by_nationality(employees: &[Employee]) -> Breakdown {
    breakdown(employees, |e| {
        Some(e.nationality.clone().unwrap_or_else(|| UNKNOWN_LABEL.to_string()))
    })
}

pub fn by_trade(employees: &[Employee]) -> Breakdown {
    breakdown(employees, |e| {
        Some(e.trade.clone().unwrap_or_else(|| UNKNOWN_LABEL.to_string()))
    })
}

pub fn by_company(employees: &[Employee], default_company: &str) -> Breakdown {
    breakdown(employees, |e| Some(e.company_or(default_company).to_string()))
}

/// Age bracket label for a whole-year age.
pub fn age_bracket(age: u32) -> &'static str {
    match age {
        0..=24 => "<25",
        25..=29 => "25-29",
        30..=34 => "30-34",
        35..=39 => "35-39",
        40..=49 => "40-49",
        _ => "50+",
    }
}

/// Employees without a usable birth date are left out entirely.
pub fn by_age_bracket(employees: &[Employee], now: DateTime<Utc>) -> Breakdown {
    breakdown(employees, |e| {
        let dob = e.birth_date()?;
        let age = dates::age_in_years(dob, now)?;
        Some(age_bracket(age).to_string())
    })
}

/// Joiners over the trailing twelve months, keyed like `Jan 24`.
pub fn by_join_month(employees: &[Employee], now: DateTime<Utc>) -> Breakdown {
    let window_start = dates::twelve_months_before(now);
    let today = now.date_naive();
    breakdown(employees, |e| {
        let joined = e.joined_on()?;
        (joined >= window_start && joined <= today).then(|| dates::month_key(joined))
    })
}

/// The breakdowns shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dimension {
    Nationality,
    Trade,
    Company,
    Age,
    JoinMonth,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Nationality,
        Dimension::Trade,
        Dimension::Company,
        Dimension::Age,
        Dimension::JoinMonth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nationality => "nationality",
            Self::Trade => "trade",
            Self::Company => "company",
            Self::Age => "age",
            Self::JoinMonth => "join-month",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == s)
    }

    pub fn compute(
        &self,
        employees: &[Employee],
        now: DateTime<Utc>,
        default_company: &str,
    ) -> Breakdown {
        match self {
            Self::Nationality => by_nationality(employees),
            Self::Trade => by_trade(employees),
            Self::Company => by_company(employees, default_company),
            Self::Age => by_age_bracket(employees, now),
            Self::JoinMonth => by_join_month(employees, now),
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entries ordered for display: largest count first, then label.
pub fn sorted_entries(counts: &Breakdown) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}
