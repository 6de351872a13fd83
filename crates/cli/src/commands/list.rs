use std::path::Path;
use std::process;

use resmock_store::{LocalDisk, Store};

use crate::{report_error, OutputFormat};

/// Enumerate the persisted resource documents in a directory through the
/// store, applying the same type/id/limit filtering the provider's list
/// operation uses.
pub(crate) fn cmd_list(
    dir: &Path,
    type_name: Option<&str>,
    id: Option<&str>,
    limit: Option<u64>,
    output: OutputFormat,
    quiet: bool,
) {
    let store = LocalDisk::new(dir, dir);

    let mut resources = Vec::new();
    let mut errors = Vec::new();
    let result = store.list_resources(type_name, id, limit, &mut |item| {
        match item {
            Ok(resource) => resources.push(resource),
            Err(err) => errors.push(err.to_string()),
        }
        true
    });

    if let Err(err) = result {
        report_error(&err.to_string(), output, quiet);
        process::exit(1);
    }

    match output {
        OutputFormat::Text => {
            if !quiet {
                for resource in &resources {
                    match resource.resource_type.as_deref() {
                        Some(resource_type) => {
                            println!("{}  {}", resource.id().unwrap_or("<no id>"), resource_type)
                        }
                        None => println!("{}", resource.id().unwrap_or("<no id>")),
                    }
                }
                for err in &errors {
                    eprintln!("error: {}", err);
                }
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({"resources": resources, "errors": errors});
            match serde_json::to_string_pretty(&json) {
                Ok(rendered) => println!("{}", rendered),
                Err(err) => {
                    report_error(&err.to_string(), output, quiet);
                    process::exit(1);
                }
            }
        }
    }

    if !errors.is_empty() {
        process::exit(1);
    }
}
