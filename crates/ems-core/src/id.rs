use sha2::{Digest, Sha256};

pub const ID_PREFIX: &str = "emp-";

/// Deterministic record ID from company and employee ID.
/// Format: `emp-{first 6 hex chars of SHA256}`.
pub fn generate_employee_id(company: &str, employee_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{company}:{employee_id}").as_bytes());
    let hash = hasher.finalize();
    let hex: String = hash.iter().take(3).map(|b| format!("{b:02x}")).collect();
    format!("{ID_PREFIX}{hex}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_deterministic() {
        let id1 = generate_employee_id("CUBS Technical", "CT-001");
        let id2 = generate_employee_id("CUBS Technical", "CT-001");
        assert_eq!(id1, id2);
        assert!(id1.starts_with("emp-"));
        assert_eq!(id1.len(), 10); // "emp-" + 6 hex chars
    }

    #[test]
    fn same_employee_id_at_other_company_differs() {
        assert_ne!(
            generate_employee_id("CUBS Technical", "CT-001"),
            generate_employee_id("CUBS Contracting", "CT-001")
        );
    }
}
