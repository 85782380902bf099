use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{EmsError, Result};
use crate::store::{FileMetadata, ObjectStore};

/// Object store backed by a local directory. Keys map to relative paths.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

/// Keys are relative, `/`-separated, with no empty, `.` or `..` segments.
pub fn validate_key(key: &str) -> Result<()> {
    let invalid = key.is_empty()
        || key.contains('\\')
        || key.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..")
        || Path::new(key)
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
    if invalid {
        return Err(EmsError::InvalidObjectKey(key.to_string()));
    }
    Ok(())
}

fn collect_files(dir: &Path, root: &Path, out: &mut Vec<FileMetadata>) -> Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let meta = entry.metadata()?;
        if meta.is_dir() {
            collect_files(&path, root, out)?;
            continue;
        }

        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let key: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        out.push(FileMetadata {
            path: key.join("/"),
            size: meta.len(),
            modified: meta
                .modified()
                .ok()
                .map(|t| DateTime::<Utc>::from(t).to_rfc3339()),
        });
    }
    Ok(())
}

/// Prefixes match whole path segments: `CT-001` covers `CT-001/visa.pdf`
/// but not `CT-0010/visa.pdf`.
fn within_prefix(path: &str, prefix: &str) -> bool {
    if prefix.is_empty() || prefix.ends_with('/') {
        return path.starts_with(prefix);
    }
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

impl ObjectStore for LocalObjectStore {
    fn put(&self, bytes: &[u8], path: &str) -> Result<String> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, bytes)?;
        let absolute = fs::canonicalize(&target)?;
        Ok(format!("file://{}", absolute.display()))
    }

    fn list(&self, prefix: &str) -> Result<Vec<FileMetadata>> {
        let mut files = Vec::new();
        collect_files(&self.root, &self.root, &mut files)?;
        files.retain(|f| within_prefix(&f.path, prefix));
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    fn delete(&self, path: &str) -> Result<()> {
        let target = self.resolve(path)?;
        fs::remove_file(&target)?;

        // Drop the folder once its last document is gone
        if let Some(parent) = target.parent() {
            if parent != self.root {
                let _ = fs::remove_dir(parent);
            }
        }
        Ok(())
    }
}
