use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmsError {
    #[error("No .ems/ directory found. Run `ems init` first.")]
    NotInitialized,

    #[error("Employee \"{0}\" not found. Run `ems list` to see employee IDs.")]
    EmployeeNotFound(String),

    #[error(
        "Ambiguous identifier \"{id}\" matches {count} employees: {ids}. Use more characters to disambiguate."
    )]
    AmbiguousId {
        id: String,
        count: usize,
        ids: String,
    },

    #[error("Employee \"{employee_id}\" already exists at {company} (record {id}).")]
    DuplicateEmployee {
        employee_id: String,
        company: String,
        id: String,
    },

    #[error(
        "Invalid employee ID: \"{0}\". Only letters, digits, hyphens and underscores are allowed."
    )]
    InvalidEmployeeId(String),

    #[error("Invalid document path: \"{0}\".")]
    InvalidObjectKey(String),

    #[error("Invalid reference date \"{0}\". Use YYYY-MM-DD, DD-MM-YYYY, or an RFC 3339 timestamp.")]
    InvalidReferenceDate(String),

    #[error(
        "Timed out waiting for lock on {0}. If no other ems process is running, delete the lock file manually."
    )]
    LockTimeout(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Could not deliver message to {recipient}: {reason}")]
    Delivery { recipient: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, EmsError>;
