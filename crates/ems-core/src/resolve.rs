use crate::error::{EmsError, Result};
use crate::id::ID_PREFIX;
use crate::types::Employee;

/// Resolve an identifier to an employee within a list.
/// Accepts: full record ID (emp-abc123), bare hash (abc123), a unique prefix
/// of either, or an exact employee ID (CT-001).
/// Returns (index, employee) or error if not found / ambiguous.
pub fn resolve_employee<'a>(
    employees: &'a [Employee],
    identifier: &str,
) -> Result<(usize, &'a Employee)> {
    let hash = identifier.strip_prefix(ID_PREFIX).unwrap_or(identifier);
    if hash.trim().is_empty() {
        return Err(EmsError::EmployeeNotFound(identifier.to_string()));
    }
    let full_id = format!("{ID_PREFIX}{hash}");

    if let Some(found) = employees
        .iter()
        .enumerate()
        .find(|(_, e)| e.id.as_deref() == Some(full_id.as_str()))
    {
        return Ok(found);
    }

    let by_employee_id: Vec<(usize, &Employee)> = employees
        .iter()
        .enumerate()
        .filter(|(_, e)| e.employee_id == identifier)
        .collect();
    if by_employee_id.len() == 1 {
        return Ok(by_employee_id[0]);
    }

    let matches: Vec<(usize, &Employee)> = if by_employee_id.is_empty() {
        employees
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                e.id.as_deref()
                    .map(|id| id.starts_with(&full_id))
                    .unwrap_or(false)
            })
            .collect()
    } else {
        by_employee_id
    };

    match matches.len() {
        1 => Ok(matches[0]),
        0 => Err(EmsError::EmployeeNotFound(identifier.to_string())),
        n => {
            let ids: Vec<&str> = matches.iter().filter_map(|(_, e)| e.id.as_deref()).collect();
            Err(EmsError::AmbiguousId {
                id: identifier.to_string(),
                count: n,
                ids: ids.join(", "),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str, employee_id: &str) -> Employee {
        let mut e = Employee::new(employee_id, format!("Name {employee_id}"));
        e.id = Some(id.to_string());
        e
    }

    #[test]
    fn exact_match() {
        let list = vec![employee("emp-abc123", "CT-001")];
        let (i, _) = resolve_employee(&list, "emp-abc123").unwrap();
        assert_eq!(i, 0);
    }

    #[test]
    fn bare_hash_and_prefix() {
        let list = vec![employee("emp-abc123", "CT-001"), employee("emp-def456", "CT-002")];
        assert_eq!(resolve_employee(&list, "abc123").unwrap().0, 0);
        assert_eq!(resolve_employee(&list, "def").unwrap().0, 1);
        assert_eq!(resolve_employee(&list, "emp-de").unwrap().0, 1);
    }

    #[test]
    fn employee_id_match() {
        let list = vec![employee("emp-abc123", "CT-001"), employee("emp-def456", "CT-002")];
        let (i, e) = resolve_employee(&list, "CT-002").unwrap();
        assert_eq!(i, 1);
        assert_eq!(e.employee_id, "CT-002");
    }

    #[test]
    fn employee_id_shared_across_companies_is_ambiguous() {
        let list = vec![employee("emp-abc123", "CT-001"), employee("emp-def456", "CT-001")];
        let err = resolve_employee(&list, "CT-001").unwrap_err();
        assert!(matches!(err, EmsError::AmbiguousId { count: 2, .. }));
    }

    #[test]
    fn not_found() {
        let list = vec![employee("emp-abc123", "CT-001")];
        assert!(matches!(
            resolve_employee(&list, "xyz"),
            Err(EmsError::EmployeeNotFound(_))
        ));
    }

    #[test]
    fn ambiguous_prefix() {
        let list = vec![employee("emp-abc123", "CT-001"), employee("emp-abc456", "CT-002")];
        let err = resolve_employee(&list, "abc").unwrap_err();
        assert!(matches!(err, EmsError::AmbiguousId { .. }));
    }

    #[test]
    fn blank_identifier_is_not_a_prefix() {
        let list = vec![employee("emp-abc123", "CT-001")];
        for blank in ["", "emp-", "  "] {
            assert!(matches!(
                resolve_employee(&list, blank),
                Err(EmsError::EmployeeNotFound(_))
            ));
        }
    }
}
