//! Collaborator contracts and the file-backed employee store.
//!
//! Everything that reaches outside the process goes through one of three
//! traits: [`EmployeeStore`], [`ObjectStore`] and [`EmailSender`]. The pure
//! modules never touch them; callers fetch a snapshot first and pass it in.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config;
use crate::dates;
use crate::error::{EmsError, Result};
use crate::id::generate_employee_id;
use crate::lock::FileLock;
use crate::resolve::resolve_employee;
use crate::storage;
use crate::types::{Employee, EmployeeUpdate, EmsConfig, NewEmployee};

pub trait EmployeeStore {
    /// Every employee record. A failed read is an error, never an empty list.
    fn list(&self) -> Result<Vec<Employee>>;
    fn create(&self, data: NewEmployee) -> Result<Employee>;
    /// `id` may be anything [`resolve_employee`] accepts.
    fn update(&self, id: &str, patch: EmployeeUpdate) -> Result<Employee>;
    fn delete(&self, id: &str) -> Result<Employee>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Object key, `/`-separated.
    pub path: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

pub trait ObjectStore {
    /// Store `bytes` under `path` and return a URL for it.
    fn put(&self, bytes: &[u8], path: &str) -> Result<String>;
    /// Objects under `prefix`, matched on whole path segments.
    fn list(&self, prefix: &str) -> Result<Vec<FileMetadata>>;
    fn delete(&self, path: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

pub trait EmailSender {
    fn send(&self, message: &EmailMessage) -> Result<()>;
}

fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Normalize an optional date to storage format. Empty input clears the
/// field; anything else that is not a date is rejected.
fn normalize_date(field: &str, value: Option<String>) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => dates::display_to_storage(&raw).map(Some).ok_or_else(|| {
            EmsError::ValidationError(format!("{field} \"{raw}\" is not a valid date"))
        }),
    }
}

fn normalize_patch_date(field: &str, value: Option<Option<String>>) -> Result<Option<Option<String>>> {
    value.map(|inner| normalize_date(field, inner)).transpose()
}

/// Employee records in `.ems/employees.jsonl`, one JSON object per line.
/// Writers hold a [`FileLock`] and rewrite the file atomically.
#[derive(Debug, Clone)]
pub struct JsonlEmployeeStore {
    path: PathBuf,
    default_company: String,
}

impl JsonlEmployeeStore {
    pub fn new(path: impl Into<PathBuf>, default_company: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            default_company: default_company.into(),
        }
    }

    pub fn open(cwd: &Path, config: &EmsConfig) -> Self {
        Self::new(config::get_employees_path(cwd), config.default_company.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Employee IDs are unique per company. `skip` is the row being edited.
    fn check_unique(
        &self,
        employees: &[Employee],
        skip: Option<usize>,
        employee_id: &str,
        company: &str,
        id: &str,
    ) -> Result<()> {
        let clash = employees.iter().enumerate().any(|(i, e)| {
            Some(i) != skip
                && (e.id.as_deref() == Some(id)
                    || (e.employee_id == employee_id
                        && e.company_or(&self.default_company) == company))
        });
        if clash {
            return Err(EmsError::DuplicateEmployee {
                employee_id: employee_id.to_string(),
                company: company.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

impl EmployeeStore for JsonlEmployeeStore {
    fn list(&self) -> Result<Vec<Employee>> {
        storage::read_employees(&self.path)
    }

    fn create(&self, data: NewEmployee) -> Result<Employee> {
        config::validate_employee_id(&data.employee_id)?;
        if data.name.trim().is_empty() {
            return Err(EmsError::ValidationError(format!(
                "employee {} has no name",
                data.employee_id
            )));
        }

        let company = data
            .company_name
            .clone()
            .unwrap_or_else(|| self.default_company.clone());
        let id = generate_employee_id(&company, &data.employee_id);
        let timestamp = now_iso();

        let employee = Employee {
            id: Some(id.clone()),
            employee_id: data.employee_id,
            name: data.name.trim().to_string(),
            trade: data.trade,
            nationality: data.nationality,
            company_name: data.company_name,
            date_of_birth: normalize_date("date_of_birth", data.date_of_birth)?,
            join_date: normalize_date("join_date", data.join_date)?,
            visa_expiry_date: normalize_date("visa_expiry_date", data.visa_expiry_date)?,
            email_id: data.email_id,
            mobile_number: data.mobile_number,
            passport_number: data.passport_number,
            is_active: data.is_active.unwrap_or(true),
            created_at: Some(timestamp.clone()),
            updated_at: Some(timestamp),
        };

        let _lock = FileLock::acquire(&self.path)?;
        let mut employees = storage::read_employees(&self.path)?;
        self.check_unique(&employees, None, &employee.employee_id, &company, &id)?;

        employees.push(employee.clone());
        storage::write_employees(&self.path, &employees)?;
        info!(id = %id, employee_id = %employee.employee_id, "created employee");
        Ok(employee)
    }

    fn update(&self, id: &str, patch: EmployeeUpdate) -> Result<Employee> {
        let patch = EmployeeUpdate {
            date_of_birth: normalize_patch_date("date_of_birth", patch.date_of_birth)?,
            join_date: normalize_patch_date("join_date", patch.join_date)?,
            visa_expiry_date: normalize_patch_date("visa_expiry_date", patch.visa_expiry_date)?,
            ..patch
        };
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(EmsError::ValidationError("name cannot be empty".to_string()));
            }
        }

        let _lock = FileLock::acquire(&self.path)?;
        let mut employees = storage::read_employees(&self.path)?;
        let (idx, current) = resolve_employee(&employees, id)?;

        let mut updated = current.clone();
        let old_company = current.company_or(&self.default_company).to_string();
        patch.apply_to(&mut updated);
        let new_company = updated.company_or(&self.default_company).to_string();
        if new_company != old_company {
            let new_id = generate_employee_id(&new_company, &updated.employee_id);
            self.check_unique(&employees, Some(idx), &updated.employee_id, &new_company, &new_id)?;
            updated.id = Some(new_id);
        }
        updated.updated_at = Some(now_iso());
        employees[idx] = updated.clone();

        storage::write_employees(&self.path, &employees)?;
        info!(employee_id = %updated.employee_id, "updated employee");
        Ok(updated)
    }

    fn delete(&self, id: &str) -> Result<Employee> {
        let _lock = FileLock::acquire(&self.path)?;
        let mut employees = storage::read_employees(&self.path)?;
        let (idx, _) = resolve_employee(&employees, id)?;
        let removed = employees.remove(idx);
        storage::write_employees(&self.path, &employees)?;
        info!(employee_id = %removed.employee_id, "deleted employee");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_COMPANY;
    use pretty_assertions::assert_eq;

    fn store(dir: &Path) -> JsonlEmployeeStore {
        JsonlEmployeeStore::new(dir.join("employees.jsonl"), DEFAULT_COMPANY)
    }

    fn new_employee(employee_id: &str, name: &str) -> NewEmployee {
        NewEmployee {
            employee_id: employee_id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn create_then_list() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());

        let created = store
            .create(NewEmployee {
                visa_expiry_date: Some("31-12-2025".to_string()),
                nationality: Some("Indian".to_string()),
                ..new_employee("CT-001", "Ravi Kumar")
            })
            .unwrap();

        assert!(created.id.as_deref().unwrap().starts_with("emp-"));
        assert_eq!(created.visa_expiry_date.as_deref(), Some("2025-12-31"));
        assert!(created.is_active);
        assert!(created.created_at.is_some());

        let listed = store.list().unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[test]
    fn duplicate_employee_id_in_same_company_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());
        store.create(new_employee("CT-001", "A")).unwrap();

        let err = store.create(new_employee("CT-001", "B")).unwrap_err();
        assert!(matches!(err, EmsError::DuplicateEmployee { .. }));

        // Same employee ID at another company is fine
        store
            .create(NewEmployee {
                company_name: Some("CUBS Contracting".to_string()),
                ..new_employee("CT-001", "C")
            })
            .unwrap();
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn create_rejects_bad_input() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());
        assert!(store.create(new_employee("bad id", "A")).is_err());
        assert!(store.create(new_employee("CT-002", "  ")).is_err());
        let err = store
            .create(NewEmployee {
                visa_expiry_date: Some("next year".to_string()),
                ..new_employee("CT-003", "A")
            })
            .unwrap_err();
        assert!(matches!(err, EmsError::ValidationError(_)));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn update_and_clear_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());
        store
            .create(NewEmployee {
                visa_expiry_date: Some("2025-01-01".to_string()),
                trade: Some("Mason".to_string()),
                ..new_employee("CT-001", "A")
            })
            .unwrap();

        let updated = store
            .update(
                "CT-001",
                EmployeeUpdate {
                    visa_expiry_date: Some(Some("01-02-2026".to_string())),
                    trade: Some(None),
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.visa_expiry_date.as_deref(), Some("2026-02-01"));
        assert_eq!(updated.trade, None);
        assert!(!updated.is_active);
        assert_eq!(store.list().unwrap()[0], updated);
    }

    #[test]
    fn update_missing_employee_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());
        let err = store.update("CT-404", EmployeeUpdate::default()).unwrap_err();
        assert!(matches!(err, EmsError::EmployeeNotFound(_)));
    }

    #[test]
    fn delete_by_record_id() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());
        let a = store.create(new_employee("CT-001", "A")).unwrap();
        store.create(new_employee("CT-002", "B")).unwrap();

        let removed = store.delete(a.id.as_deref().unwrap()).unwrap();
        assert_eq!(removed.employee_id, "CT-001");
        let rest = store.list().unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].employee_id, "CT-002");
    }

    #[test]
    fn moving_company_checks_uniqueness_and_rehashes_id() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());
        store.create(new_employee("CT-001", "A")).unwrap();
        let other = store
            .create(NewEmployee {
                company_name: Some("CUBS Contracting".to_string()),
                ..new_employee("CT-001", "B")
            })
            .unwrap();
        let other_id = other.id.clone().unwrap();

        let err = store
            .update(
                &other_id,
                EmployeeUpdate {
                    company_name: Some(Some(DEFAULT_COMPANY.to_string())),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, EmsError::DuplicateEmployee { .. }));
        assert_eq!(store.list().unwrap()[1], other);

        let moved = store
            .update(
                &other_id,
                EmployeeUpdate {
                    company_name: Some(Some("CUBS Facilities".to_string())),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(
            moved.id.as_deref(),
            Some(generate_employee_id("CUBS Facilities", "CT-001").as_str())
        );
        assert_ne!(moved.id.as_deref(), Some(other_id.as_str()));
    }

    #[test]
    fn blank_identifier_never_matches() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());
        store.create(new_employee("CT-001", "A")).unwrap();

        assert!(matches!(store.delete(""), Err(EmsError::EmployeeNotFound(_))));
        assert_eq!(store.list().unwrap().len(), 1);
    }
}
