use anyhow::Result;

use crate::cli::AddArgs;
use crate::context::RuntimeContext;
use crate::output::*;
use ems_core::store::EmployeeStore;
use ems_core::types::NewEmployee;
use ems_core::visa;

use super::open_store;

pub fn run(ctx: &RuntimeContext, args: &AddArgs) -> Result<()> {
    let (_cfg, store) = open_store(ctx)?;

    let employee = store.create(NewEmployee {
        employee_id: args.employee_id.clone(),
        name: args.name.clone(),
        trade: args.trade.clone(),
        nationality: args.nationality.clone(),
        company_name: args.company.clone(),
        date_of_birth: args.dob.clone(),
        join_date: args.join_date.clone(),
        visa_expiry_date: args.visa_expiry.clone(),
        email_id: args.email.clone(),
        mobile_number: args.mobile.clone(),
        passport_number: args.passport.clone(),
        is_active: args.inactive.then_some(false),
    })?;

    let status = visa::chip_status(&employee, ctx.now);
    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "add",
            "employee": employee,
            "visaStatus": status,
        }));
    } else {
        print_success(&format!(
            "Added {} {} [{}] (visa {status}).",
            employee.employee_id,
            employee.name,
            employee.id.as_deref().unwrap_or("-"),
        ));
    }

    Ok(())
}
