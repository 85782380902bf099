use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::types::Employee;

/// Read every line of a JSONL file as `T`.
/// Returns an empty vec if the file doesn't exist.
pub fn read_jsonl<T: DeserializeOwned>(file_path: &Path) -> Result<Vec<T>> {
    let content = match fs::read_to_string(file_path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut items = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        items.push(serde_json::from_str(trimmed)?);
    }
    Ok(items)
}

/// Append one value as a JSON line.
pub fn append_jsonl<T: Serialize>(file_path: &Path, value: &T) -> Result<()> {
    let mut line = serde_json::to_string(value)?;
    line.push('\n');

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)?;
    file.write_all(line.as_bytes())?;
    Ok(())
}

/// Read all employee records. Unreadable lines fail the whole read so a
/// caller never mistakes a damaged file for an empty workforce.
pub fn read_employees(file_path: &Path) -> Result<Vec<Employee>> {
    read_jsonl(file_path)
}

/// Atomically write all records (temp file + rename).
pub fn write_employees(file_path: &Path, employees: &[Employee]) -> Result<()> {
    let dir = file_path.parent().unwrap_or(Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;

    for e in employees {
        let line = serde_json::to_string(e)?;
        writeln!(tmp, "{line}")?;
    }

    tmp.flush()?;
    tmp.persist(file_path).map_err(std::io::Error::other)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn read_nonexistent_returns_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let employees = read_employees(&tmp.path().join("missing.jsonl")).unwrap();
        assert!(employees.is_empty());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("employees.jsonl");
        fs::write(
            &path,
            "{\"employee_id\":\"E1\",\"name\":\"A\"}\n\n   \n{\"employee_id\":\"E2\",\"name\":\"B\"}\n",
        )
        .unwrap();
        assert_eq!(read_employees(&path).unwrap().len(), 2);
    }

    #[test]
    fn corrupt_line_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("employees.jsonl");
        fs::write(&path, "{\"employee_id\":\"E1\",\"name\":\"A\"}\n{oops\n").unwrap();
        assert!(read_employees(&path).is_err());
    }

    #[test]
    fn atomic_write_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("employees.jsonl");

        let mut first = Employee::new("E1", "Ravi");
        first.visa_expiry_date = Some("2025-01-31".to_string());
        let employees = vec![first, Employee::new("E2", "Maria")];
        write_employees(&path, &employees).unwrap();

        assert_eq!(read_employees(&path).unwrap(), employees);
    }

    #[test]
    fn append_adds_a_line() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("employees.jsonl");
        append_jsonl(&path, &Employee::new("E1", "A")).unwrap();
        append_jsonl(&path, &Employee::new("E2", "B")).unwrap();
        assert_eq!(read_employees(&path).unwrap().len(), 2);
    }
}
