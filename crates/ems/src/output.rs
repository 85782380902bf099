use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::{self, Write};

pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            let _ = writeln!(handle, "{json}");
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {e}");
            std::process::exit(1);
        }
    }
}

pub fn output_json_error(command: &str, error: &str) {
    output_json(&serde_json::json!({
        "success": false,
        "command": command,
        "error": error,
    }));
}

pub fn print_success(msg: &str) {
    println!("{}", msg.green());
}

pub fn print_error(msg: &str) {
    eprintln!("{}", msg.red());
}

pub fn print_warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Coloured urgency label for human output.
pub fn urgency_label(urgency: ems_core::types::Urgency) -> String {
    use ems_core::types::Urgency;
    match urgency {
        Urgency::Critical => urgency.as_str().red().bold().to_string(),
        Urgency::Warning => urgency.as_str().yellow().to_string(),
        Urgency::Notice => urgency.as_str().cyan().to_string(),
    }
}
