use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant, SystemTime};

use tracing::warn;

use crate::error::{EmsError, Result};

const STALE_AFTER: Duration = Duration::from_secs(30);
const RETRY_INTERVAL: Duration = Duration::from_millis(50);
const TIMEOUT: Duration = Duration::from_secs(5);

/// Advisory lock held as `<file>.lock` for as long as the guard lives.
#[derive(Debug)]
pub struct FileLock {
    path: PathBuf,
}

impl FileLock {
    /// Acquire the lock for `file_path`, waiting up to five seconds. A lock
    /// file older than thirty seconds is treated as abandoned and removed.
    pub fn acquire(file_path: &Path) -> Result<Self> {
        let path = lock_path(file_path);
        let deadline = Instant::now() + TIMEOUT;

        loop {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => return Ok(Self { path }),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    if is_stale(&path) {
                        warn!(lock = %path.display(), "removing stale lock file");
                        let _ = fs::remove_file(&path);
                        continue;
                    }
                    if Instant::now() >= deadline {
                        return Err(EmsError::LockTimeout(path.display().to_string()));
                    }
                    thread::sleep(RETRY_INTERVAL);
                }
                Err(e) => return Err(EmsError::Io(e)),
            }
        }
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn lock_path(file_path: &Path) -> PathBuf {
    let mut p = file_path.as_os_str().to_owned();
    p.push(".lock");
    PathBuf::from(p)
}

fn is_stale(path: &Path) -> bool {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map(|modified| {
            SystemTime::now()
                .duration_since(modified)
                .unwrap_or(Duration::ZERO)
                > STALE_AFTER
        })
        .unwrap_or(false)
}
