use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::*;
use ems_core::config;

pub fn run(ctx: &RuntimeContext) -> Result<()> {
    config::init_ems_dir(&ctx.cwd)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "init",
            "path": config::get_ems_dir(&ctx.cwd).display().to_string(),
        }));
    } else {
        print_success("Initialized .ems/ directory.");
    }

    Ok(())
}
