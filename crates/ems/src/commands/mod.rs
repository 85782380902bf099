pub mod add;
pub mod alerts;
pub mod breakdown;
pub mod delete;
pub mod docs;
pub mod edit;
pub mod import;
pub mod init;
pub mod list;
pub mod remind;
pub mod show;
pub mod status;
pub mod validate;

use anyhow::{Result, bail};

use crate::context::RuntimeContext;
use ems_core::config;
use ems_core::store::JsonlEmployeeStore;
use ems_core::types::{EmsConfig, Urgency};

/// Check that `.ems/` exists and open the employee store with its config.
pub fn open_store(ctx: &RuntimeContext) -> Result<(EmsConfig, JsonlEmployeeStore)> {
    config::ensure_ems_dir(&ctx.cwd)?;
    let cfg = config::read_config(&ctx.cwd)?;
    let store = JsonlEmployeeStore::open(&ctx.cwd, &cfg);
    Ok((cfg, store))
}

pub fn parse_urgency(raw: Option<&str>) -> Result<Option<Urgency>> {
    match raw {
        None => Ok(None),
        Some(s) => match Urgency::parse(s) {
            Some(u) => Ok(Some(u)),
            None => bail!("unknown urgency \"{s}\". Use critical, warning or notice."),
        },
    }
}
