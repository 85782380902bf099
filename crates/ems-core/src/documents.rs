//! Folder view over the flat document listing. Each employee's documents
//! live under a key prefix of their employee ID.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config;
use crate::error::{EmsError, Result};
use crate::objects;
use crate::store::FileMetadata;

pub const GENERAL_FOLDER: &str = "General";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFolder {
    pub name: String,
    pub file_count: usize,
    pub total_bytes: u64,
}

/// Object key for an employee document: `<employee_id>/<file_name>`.
pub fn object_key(employee_id: &str, file_name: &str) -> Result<String> {
    config::validate_employee_id(employee_id)?;
    if file_name.contains('/') {
        return Err(EmsError::InvalidObjectKey(file_name.to_string()));
    }
    let key = format!("{employee_id}/{file_name}");
    objects::validate_key(&key)?;
    Ok(key)
}

pub fn folder_of(file: &FileMetadata) -> &str {
    match file.path.split_once('/') {
        Some((folder, _)) => folder,
        None => GENERAL_FOLDER,
    }
}

pub fn file_name_of(file: &FileMetadata) -> &str {
    file.path.rsplit('/').next().unwrap_or(&file.path)
}

/// Group a flat listing into folders, sorted by folder name.
pub fn folders(files: &[FileMetadata]) -> Vec<DocumentFolder> {
    let mut grouped: BTreeMap<&str, (usize, u64)> = BTreeMap::new();
    for file in files {
        let entry = grouped.entry(folder_of(file)).or_default();
        entry.0 += 1;
        entry.1 += file.size;
    }
    grouped
        .into_iter()
        .map(|(name, (file_count, total_bytes))| DocumentFolder {
            name: name.to_string(),
            file_count,
            total_bytes,
        })
        .collect()
}
