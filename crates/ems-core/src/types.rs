use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates;

/// Company used when an employee record carries no company name.
pub const DEFAULT_COMPANY: &str = "CUBS Technical";

// ── Enums ──────────────────────────────────────────────────────────────────

/// Visa status category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisaCategory {
    Active,
    Expiring,
    Expired,
    Inactive,
}

impl VisaCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Expiring => "EXPIRING",
            Self::Expired => "EXPIRED",
            Self::Inactive => "INACTIVE",
        }
    }
}

impl std::fmt::Display for VisaCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency tier of a visa alert, most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Critical,
    Warning,
    Notice,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Notice => "notice",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "critical" => Some(Self::Critical),
            "warning" => Some(Self::Warning),
            "notice" => Some(Self::Notice),
            _ => None,
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Employee ───────────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}

/// An employee record as held by the employee store.
///
/// Date fields keep the raw stored string. Use the typed accessors, which
/// treat a malformed value the same as an absent one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub employee_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visa_expiry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Employee {
    /// A bare active employee with no optional fields set.
    pub fn new(employee_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            employee_id: employee_id.into(),
            name: name.into(),
            trade: None,
            nationality: None,
            company_name: None,
            date_of_birth: None,
            join_date: None,
            visa_expiry_date: None,
            email_id: None,
            mobile_number: None,
            passport_number: None,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn visa_expiry(&self) -> Option<NaiveDate> {
        self.visa_expiry_date.as_deref().and_then(dates::parse_date)
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.date_of_birth.as_deref().and_then(dates::parse_date)
    }

    pub fn joined_on(&self) -> Option<NaiveDate> {
        self.join_date.as_deref().and_then(dates::parse_date)
    }

    /// Company name with the given default applied when absent.
    pub fn company_or<'a>(&'a self, default_company: &'a str) -> &'a str {
        self.company_name.as_deref().unwrap_or(default_company)
    }

    /// Date fields that hold a value which does not parse as a date.
    pub fn malformed_dates(&self) -> Vec<(&'static str, &str)> {
        [
            ("date_of_birth", self.date_of_birth.as_deref()),
            ("join_date", self.join_date.as_deref()),
            ("visa_expiry_date", self.visa_expiry_date.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, raw)| {
            let raw = raw?;
            dates::parse_date(raw).is_none().then_some((field, raw))
        })
        .collect()
    }
}

/// Input for creating an employee. The store assigns `id` and timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewEmployee {
    pub employee_id: String,
    pub name: String,
    #[serde(default)]
    pub trade: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub join_date: Option<String>,
    #[serde(default)]
    pub visa_expiry_date: Option<String>,
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub passport_number: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Partial update. `None` leaves a field untouched; `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub trade: Option<Option<String>>,
    pub nationality: Option<Option<String>>,
    pub company_name: Option<Option<String>>,
    pub date_of_birth: Option<Option<String>>,
    pub join_date: Option<Option<String>>,
    pub visa_expiry_date: Option<Option<String>>,
    pub email_id: Option<Option<String>>,
    pub mobile_number: Option<Option<String>>,
    pub passport_number: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl EmployeeUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.trade.is_none()
            && self.nationality.is_none()
            && self.company_name.is_none()
            && self.date_of_birth.is_none()
            && self.join_date.is_none()
            && self.visa_expiry_date.is_none()
            && self.email_id.is_none()
            && self.mobile_number.is_none()
            && self.passport_number.is_none()
            && self.is_active.is_none()
    }

    pub fn apply_to(self, employee: &mut Employee) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *slot = v;
            }
        }
        set(&mut employee.name, self.name);
        set(&mut employee.trade, self.trade);
        set(&mut employee.nationality, self.nationality);
        set(&mut employee.company_name, self.company_name);
        set(&mut employee.date_of_birth, self.date_of_birth);
        set(&mut employee.join_date, self.join_date);
        set(&mut employee.visa_expiry_date, self.visa_expiry_date);
        set(&mut employee.email_id, self.email_id);
        set(&mut employee.mobile_number, self.mobile_number);
        set(&mut employee.passport_number, self.passport_number);
        set(&mut employee.is_active, self.is_active);
    }
}

// ── Derived ────────────────────────────────────────────────────────────────

/// One employee's upcoming or past visa expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisaAlert {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub employee_id: String,
    pub employee_name: String,
    pub expiry_date: NaiveDate,
    pub days_remaining: i64,
    pub urgency: Urgency,
    pub category: VisaCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

// ── Config ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderSettings {
    pub sender: String,
    /// Admin inbox that receives every reminder. When unset, reminders go
    /// to the employee's own address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    pub subject_prefix: String,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            sender: "noreply@cubstechnical.com".to_string(),
            recipient: None,
            subject_prefix: "[CUBS EMS]".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmsConfig {
    pub version: String,
    #[serde(default = "default_company")]
    pub default_company: String,
    #[serde(default)]
    pub reminders: ReminderSettings,
}

fn default_company() -> String {
    DEFAULT_COMPANY.to_string()
}

impl Default for EmsConfig {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            default_company: default_company(),
            reminders: ReminderSettings::default(),
        }
    }
}
