use std::env;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::cli::GlobalArgs;
use ems_core::dates;

#[derive(Debug)]
pub struct RuntimeContext {
    pub json: bool,
    pub cwd: PathBuf,
    /// Reference instant for every visa calculation in this run.
    pub now: DateTime<Utc>,
}

impl RuntimeContext {
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let now = match global.now.as_deref() {
            Some(raw) => dates::parse_reference_instant(raw)?,
            None => Utc::now(),
        };
        debug!(now = %now.to_rfc3339(), "using reference instant");
        Ok(Self {
            json: global.json,
            cwd: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            now,
        })
    }
}
