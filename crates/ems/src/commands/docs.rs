use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use crate::cli::{DocsArgs, DocsCommand};
use crate::context::RuntimeContext;
use crate::output::*;
use ems_core::objects::LocalObjectStore;
use ems_core::store::{EmployeeStore, ObjectStore};
use ems_core::{config, documents, format, resolve};

use super::open_store;

pub fn run(ctx: &RuntimeContext, args: &DocsArgs) -> Result<()> {
    let (_cfg, store) = open_store(ctx)?;
    let objects = LocalObjectStore::new(config::get_documents_dir(&ctx.cwd));

    match &args.command {
        DocsCommand::Upload {
            employee,
            file,
            name,
        } => {
            let employees = store.list()?;
            let (_, owner) = resolve::resolve_employee(&employees, employee)?;

            let source = Path::new(file);
            let file_name = match name {
                Some(n) => n.clone(),
                None => source
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .ok_or_else(|| anyhow!("cannot take a file name from \"{file}\""))?,
            };
            let bytes = fs::read(source).with_context(|| format!("failed to read {file}"))?;
            let key = documents::object_key(&owner.employee_id, &file_name)?;
            let url = objects.put(&bytes, &key)?;

            if ctx.json {
                output_json(&serde_json::json!({
                    "success": true,
                    "command": "docs upload",
                    "path": key,
                    "url": url,
                    "size": bytes.len(),
                }));
            } else {
                print_success(&format!(
                    "Uploaded {key} ({}).",
                    format::format_bytes(bytes.len() as u64)
                ));
            }
        }

        DocsCommand::List { employee } => {
            let prefix = match employee {
                Some(id) => {
                    let employees = store.list()?;
                    let (_, owner) = resolve::resolve_employee(&employees, id)?;
                    format!("{}/", owner.employee_id)
                }
                None => String::new(),
            };
            let files = objects.list(&prefix)?;

            if ctx.json {
                output_json(&serde_json::json!({
                    "success": true,
                    "command": "docs list",
                    "files": files,
                }));
            } else {
                println!("{}", format::format_files(&files));
            }
        }

        DocsCommand::Folders => {
            let files = objects.list("")?;
            let folders = documents::folders(&files);

            if ctx.json {
                output_json(&serde_json::json!({
                    "success": true,
                    "command": "docs folders",
                    "folders": folders,
                }));
            } else {
                println!("{}", format::format_folders(&folders));
            }
        }

        DocsCommand::Delete { path } => {
            objects.delete(path)?;

            if ctx.json {
                output_json(&serde_json::json!({
                    "success": true,
                    "command": "docs delete",
                    "path": path,
                }));
            } else {
                print_success(&format!("Deleted {path}."));
            }
        }
    }

    Ok(())
}
