use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "ems",
    about = "CUBS employee records and visa expiry tracking",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Output as structured JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Reference date for visa calculations (YYYY-MM-DD, DD-MM-YYYY or RFC 3339). Defaults to now.
    #[arg(long, global = true)]
    pub now: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a .ems directory
    Init,

    /// Add an employee
    Add(AddArgs),

    /// Bulk-add employees from a JSON file
    Import(ImportArgs),

    /// Edit an existing employee
    Edit(EditArgs),

    /// Delete an employee
    Delete(DeleteArgs),

    /// List employees with their visa status
    List(ListArgs),

    /// Show one employee in detail
    Show(ShowArgs),

    /// Show visa expiry alerts, soonest first
    Alerts(AlertsArgs),

    /// Count employees by a category
    Breakdown(BreakdownArgs),

    /// Show the dashboard summary
    Status,

    /// Send visa expiry reminders
    Remind(RemindArgs),

    /// Manage employee documents
    Docs(DocsArgs),

    /// Check stored records for unusable dates
    Validate,
}

// ── Argument structs ───────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Employee ID (unique within the company)
    pub employee_id: String,

    /// Full name
    pub name: String,

    /// Trade (e.g. Welder, Electrician)
    #[arg(long)]
    pub trade: Option<String>,

    /// Nationality
    #[arg(long)]
    pub nationality: Option<String>,

    /// Company name (defaults to the configured company)
    #[arg(long)]
    pub company: Option<String>,

    /// Date of birth (DD-MM-YYYY or YYYY-MM-DD)
    #[arg(long)]
    pub dob: Option<String>,

    /// Join date (DD-MM-YYYY or YYYY-MM-DD)
    #[arg(long = "join-date")]
    pub join_date: Option<String>,

    /// Visa expiry date (DD-MM-YYYY or YYYY-MM-DD)
    #[arg(long = "visa-expiry")]
    pub visa_expiry: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Mobile number
    #[arg(long)]
    pub mobile: Option<String>,

    /// Passport number
    #[arg(long)]
    pub passport: Option<String>,

    /// Mark the employee as inactive
    #[arg(long)]
    pub inactive: bool,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON file holding one employee object or an array of them
    pub file: String,

    /// Preview what would be imported without writing
    #[arg(long)]
    pub dry_run: bool,
}

pub const CLEARABLE_FIELDS: [&str; 9] = [
    "trade",
    "nationality",
    "company",
    "dob",
    "join-date",
    "visa-expiry",
    "email",
    "mobile",
    "passport",
];

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Record ID (full, bare hash, or prefix) or employee ID
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New trade
    #[arg(long)]
    pub trade: Option<String>,

    /// New nationality
    #[arg(long)]
    pub nationality: Option<String>,

    /// New company name
    #[arg(long)]
    pub company: Option<String>,

    /// New date of birth
    #[arg(long)]
    pub dob: Option<String>,

    /// New join date
    #[arg(long = "join-date")]
    pub join_date: Option<String>,

    /// New visa expiry date
    #[arg(long = "visa-expiry")]
    pub visa_expiry: Option<String>,

    /// New email address
    #[arg(long)]
    pub email: Option<String>,

    /// New mobile number
    #[arg(long)]
    pub mobile: Option<String>,

    /// New passport number
    #[arg(long)]
    pub passport: Option<String>,

    /// Mark the employee as active
    #[arg(long, conflicts_with = "inactive")]
    pub active: bool,

    /// Mark the employee as inactive
    #[arg(long)]
    pub inactive: bool,

    /// Comma-separated fields to clear
    #[arg(long, value_delimiter = ',', value_parser = CLEARABLE_FIELDS)]
    pub clear: Vec<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Record ID or employee ID
    pub id: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by visa status
    #[arg(long, value_parser = ["active", "expiring", "inactive"])]
    pub status: Option<String>,

    /// Filter by company
    #[arg(long)]
    pub company: Option<String>,

    /// Search name or employee ID
    #[arg(long)]
    pub search: Option<String>,

    /// Only employees flagged active
    #[arg(long)]
    pub active_only: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Record ID or employee ID
    pub id: String,
}

#[derive(Args, Debug)]
pub struct AlertsArgs {
    /// Only alerts of this urgency
    #[arg(long, value_parser = ["critical", "warning", "notice"])]
    pub urgency: Option<String>,

    /// Maximum number of alerts to show
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct BreakdownArgs {
    /// Category to count by
    #[arg(value_parser = ["nationality", "trade", "company", "age", "join-month"])]
    pub dimension: String,
}

#[derive(Args, Debug)]
pub struct RemindArgs {
    /// Only remind for alerts of this urgency
    #[arg(long, value_parser = ["critical", "warning", "notice"])]
    pub urgency: Option<String>,

    /// Preview the reminders without sending
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct DocsArgs {
    #[command(subcommand)]
    pub command: DocsCommand,
}

#[derive(Subcommand, Debug)]
pub enum DocsCommand {
    /// Upload a document for an employee
    Upload {
        /// Record ID or employee ID
        employee: String,

        /// File to upload
        file: String,

        /// Store under this file name instead of the original
        #[arg(long)]
        name: Option<String>,
    },

    /// List documents, optionally for one employee
    List {
        /// Record ID or employee ID
        employee: Option<String>,
    },

    /// Show document folders
    Folders,

    /// Delete a document
    Delete {
        /// Document path as shown by `ems docs list`
        path: String,
    },
}
