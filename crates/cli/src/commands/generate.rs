use std::path::Path;
use std::process;

use resmock_core::{generate_computed_values, Resource, Schema};
use resmock_provider::{
    complex_resource, simple_resource, DynamicResources, COMPLEX_RESOURCE, COMPLEX_RESOURCE_DEPTH,
    SIMPLE_RESOURCE,
};

use crate::{report_error, OutputFormat};

/// Run the computed-value generator offline: resolve the schema for the
/// named type, read the (possibly empty) input value map, fill the gaps,
/// and print the resulting resource document.
pub(crate) fn cmd_generate(
    type_name: &str,
    schema_path: Option<&Path>,
    input: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
) {
    let schema = match resolve_schema(type_name, schema_path, output, quiet) {
        Some(schema) => schema,
        None => {
            let msg = format!("unknown resource type '{}'", type_name);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let mut resource = match input {
        Some(path) => match read_resource(path) {
            Ok(resource) => resource,
            Err(msg) => {
                report_error(&msg, output, quiet);
                process::exit(1);
            }
        },
        None => Resource::default(),
    };

    if let Err(err) = generate_computed_values(&mut resource, &schema) {
        report_error(&err.to_string(), output, quiet);
        process::exit(1);
    }

    match serde_json::to_string_pretty(&resource) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            report_error(&err.to_string(), output, quiet);
            process::exit(1);
        }
    }
}

fn resolve_schema(
    type_name: &str,
    schema_path: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
) -> Option<Schema> {
    if let Some(path) = schema_path {
        let resources = match DynamicResources::load(Some(path)) {
            Ok(resources) => resources,
            Err(err) => {
                report_error(&err.to_string(), output, quiet);
                process::exit(1);
            }
        };
        if let Some(schema) = resources.dynamic_resources.get(type_name) {
            return Some(schema.clone());
        }
    }

    match type_name {
        SIMPLE_RESOURCE => Some(simple_resource()),
        COMPLEX_RESOURCE => Some(complex_resource(COMPLEX_RESOURCE_DEPTH)),
        _ => None,
    }
}

fn read_resource(path: &Path) -> Result<Resource, String> {
    let data = std::fs::read_to_string(path)
        .map_err(|err| format!("error reading file '{}': {}", path.display(), err))?;
    serde_json::from_str(&data)
        .map_err(|err| format!("error parsing resource document '{}': {}", path.display(), err))
}
