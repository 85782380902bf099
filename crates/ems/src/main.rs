mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::RuntimeContext;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("EMS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Init => "init",
        Commands::Add(_) => "add",
        Commands::Import(_) => "import",
        Commands::Edit(_) => "edit",
        Commands::Delete(_) => "delete",
        Commands::List(_) => "list",
        Commands::Show(_) => "show",
        Commands::Alerts(_) => "alerts",
        Commands::Breakdown(_) => "breakdown",
        Commands::Status => "status",
        Commands::Remind(_) => "remind",
        Commands::Docs(_) => "docs",
        Commands::Validate => "validate",
    }
}

fn fail(json: bool, command: &str, e: &anyhow::Error) -> ! {
    if json {
        output::output_json_error(command, &format!("{e:#}"));
    } else {
        output::print_error(&format!("Error: {e:#}"));
    }
    std::process::exit(1);
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let name = command_name(&cli.command);
    let ctx = match RuntimeContext::from_global_args(&cli.global) {
        Ok(ctx) => ctx,
        Err(e) => fail(cli.global.json, name, &e),
    };

    let result = match &cli.command {
        Commands::Init => commands::init::run(&ctx),
        Commands::Add(args) => commands::add::run(&ctx, args),
        Commands::Import(args) => commands::import::run(&ctx, args),
        Commands::Edit(args) => commands::edit::run(&ctx, args),
        Commands::Delete(args) => commands::delete::run(&ctx, args),
        Commands::List(args) => commands::list::run(&ctx, args),
        Commands::Show(args) => commands::show::run(&ctx, args),
        Commands::Alerts(args) => commands::alerts::run(&ctx, args),
        Commands::Breakdown(args) => commands::breakdown::run(&ctx, args),
        Commands::Status => commands::status::run(&ctx),
        Commands::Remind(args) => commands::remind::run(&ctx, args),
        Commands::Docs(args) => commands::docs::run(&ctx, args),
        Commands::Validate => commands::validate::run(&ctx),
    };

    if let Err(e) = result {
        fail(ctx.json, name, &e);
    }
}
