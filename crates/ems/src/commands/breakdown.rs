use anyhow::{Result, anyhow};

use crate::cli::BreakdownArgs;
use crate::context::RuntimeContext;
use crate::output::*;
use ems_core::breakdown::Dimension;
use ems_core::format;
use ems_core::store::EmployeeStore;

use super::open_store;

pub fn run(ctx: &RuntimeContext, args: &BreakdownArgs) -> Result<()> {
    let dimension = Dimension::parse(&args.dimension)
        .ok_or_else(|| anyhow!("unknown breakdown \"{}\"", args.dimension))?;

    let (cfg, store) = open_store(ctx)?;
    let employees = store.list()?;
    let counts = dimension.compute(&employees, ctx.now, &cfg.default_company);

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "breakdown",
            "dimension": dimension,
            "total": counts.values().sum::<usize>(),
            "counts": counts,
        }));
    } else {
        println!("{}", format::format_breakdown(dimension, &counts));
    }

    Ok(())
}
