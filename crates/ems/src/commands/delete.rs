use anyhow::Result;

use crate::cli::DeleteArgs;
use crate::context::RuntimeContext;
use crate::output::*;
use ems_core::store::EmployeeStore;

use super::open_store;

pub fn run(ctx: &RuntimeContext, args: &DeleteArgs) -> Result<()> {
    let (_cfg, store) = open_store(ctx)?;
    let removed = store.delete(&args.id)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "delete",
            "id": removed.id,
            "employeeId": removed.employee_id,
        }));
    } else {
        print_success(&format!(
            "Deleted {} (\"{}\").",
            removed.employee_id, removed.name
        ));
    }

    Ok(())
}
