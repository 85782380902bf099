use chrono::{DateTime, Utc};

use crate::types::{Employee, VisaCategory};
use crate::visa;

/// Combined list criteria. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    pub status: Option<VisaCategory>,
    pub company: Option<String>,
    pub search: Option<String>,
    pub active_only: bool,
}

impl EmployeeFilter {
    pub fn matches(&self, employee: &Employee, now: DateTime<Utc>, default_company: &str) -> bool {
        if self.active_only && !employee.is_active {
            return false;
        }
        if let Some(company) = &self.company {
            if employee.company_or(default_company) != company {
                return false;
            }
        }
        if let Some(query) = &self.search {
            if !matches_query(employee, &query.to_lowercase()) {
                return false;
            }
        }
        self.status
            .is_none_or(|status| visa::chip_status(employee, now) == status)
    }

    pub fn apply<'a>(
        &self,
        employees: &'a [Employee],
        now: DateTime<Utc>,
        default_company: &str,
    ) -> Vec<&'a Employee> {
        employees
            .iter()
            .filter(|e| self.matches(e, now, default_company))
            .collect()
    }
}

fn matches_query(employee: &Employee, needle: &str) -> bool {
    employee.name.to_lowercase().contains(needle)
        || employee.employee_id.to_lowercase().contains(needle)
}

pub fn filter_by_chip_status(
    employees: &[Employee],
    status: VisaCategory,
    now: DateTime<Utc>,
) -> Vec<&Employee> {
    employees
        .iter()
        .filter(|e| visa::chip_status(e, now) == status)
        .collect()
}

pub fn filter_by_company<'a>(
    employees: &'a [Employee],
    company: &str,
    default_company: &str,
) -> Vec<&'a Employee> {
    employees
        .iter()
        .filter(|e| e.company_or(default_company) == company)
        .collect()
}

pub fn filter_active(employees: &[Employee]) -> Vec<&Employee> {
    employees.iter().filter(|e| e.is_active).collect()
}

/// Case-insensitive substring match on name or employee ID.
pub fn search<'a>(employees: &'a [Employee], query: &str) -> Vec<&'a Employee> {
    let needle = query.to_lowercase();
    employees.iter().filter(|e| matches_query(e, &needle)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_COMPANY;
    use chrono::TimeZone;

    fn employees() -> Vec<Employee> {
        let mut a = Employee::new("CT-001", "Ravi Kumar");
        a.visa_expiry_date = Some("2024-06-10".to_string());
        let mut b = Employee::new("CT-002", "Maria Santos");
        b.visa_expiry_date = Some("2025-06-10".to_string());
        b.company_name = Some("CUBS Contracting".to_string());
        let mut c = Employee::new("CC-003", "Omar Farouk");
        c.is_active = false;
        vec![a, b, c]
    }

    #[test]
    fn chip_status_filter() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let list = employees();
        let expiring = filter_by_chip_status(&list, VisaCategory::Expiring, now);
        assert_eq!(expiring.len(), 1);
        assert_eq!(expiring[0].employee_id, "CT-001");
        assert_eq!(
            filter_by_chip_status(&list, VisaCategory::Inactive, now).len(),
            1
        );
    }

    #[test]
    fn company_filter_applies_default() {
        let list = employees();
        assert_eq!(filter_by_company(&list, DEFAULT_COMPANY, DEFAULT_COMPANY).len(), 2);
        assert_eq!(
            filter_by_company(&list, "CUBS Contracting", DEFAULT_COMPANY).len(),
            1
        );
    }

    #[test]
    fn active_and_search() {
        let list = employees();
        assert_eq!(filter_active(&list).len(), 2);
        assert_eq!(search(&list, "maria").len(), 1);
        assert_eq!(search(&list, "ct-").len(), 2);
        assert!(search(&list, "nobody").is_empty());
    }

    #[test]
    fn combined_filter() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let list = employees();
        let f = EmployeeFilter {
            company: Some(DEFAULT_COMPANY.to_string()),
            active_only: true,
            ..Default::default()
        };
        let ids: Vec<&str> = f
            .apply(&list, now, DEFAULT_COMPANY)
            .iter()
            .map(|e| e.employee_id.as_str())
            .collect();
        assert_eq!(ids, vec!["CT-001"]);

        let f = EmployeeFilter {
            status: Some(VisaCategory::Active),
            search: Some("SANTOS".to_string()),
            ..Default::default()
        };
        assert_eq!(f.apply(&list, now, DEFAULT_COMPANY).len(), 1);
        assert_eq!(EmployeeFilter::default().apply(&list, now, DEFAULT_COMPANY).len(), 3);
    }
}
