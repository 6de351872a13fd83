use std::path::Path;
use std::process;

use resmock_provider::DynamicResources;

use crate::{report_error, OutputFormat};

static DYNAMIC_RESOURCES_SCHEMA_STR: &str =
    include_str!("../../../../docs/dynamic-resources-schema.json");

/// Validate a dynamic resources file: first against the formal JSON Schema,
/// then against the structural rules the JSON Schema cannot express (the
/// reserved `id` attribute, defaults without computed, child descriptors
/// matching their kind).
pub(crate) fn cmd_validate(file: &Path, output: OutputFormat, quiet: bool) {
    let document_schema: serde_json::Value = match serde_json::from_str(DYNAMIC_RESOURCES_SCHEMA_STR)
    {
        Ok(schema) => schema,
        Err(err) => {
            let msg = format!("internal error: failed to parse embedded schema: {}", err);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let doc_str = match std::fs::read_to_string(file) {
        Ok(data) => data,
        Err(err) => {
            let msg = format!("error reading file '{}': {}", file.display(), err);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let doc: serde_json::Value = match serde_json::from_str(&doc_str) {
        Ok(value) => value,
        Err(err) => {
            let msg = format!("error parsing JSON in '{}': {}", file.display(), err);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let validator = match jsonschema::validator_for(&document_schema) {
        Ok(validator) => validator,
        Err(err) => {
            let msg = format!("internal error: failed to compile schema: {}", err);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let mut errors: Vec<String> = validator.iter_errors(&doc).map(|e| format!("{}", e)).collect();

    if errors.is_empty() {
        // The document has the right shape; now run the consistency checks.
        match serde_json::from_value::<DynamicResources>(doc) {
            Ok(resources) => {
                if let Err(err) = resources.validate() {
                    errors.push(err.to_string());
                }
            }
            Err(err) => errors.push(err.to_string()),
        }
    }

    if errors.is_empty() {
        if !quiet {
            match output {
                OutputFormat::Text => println!("valid"),
                OutputFormat::Json => println!("{}", serde_json::json!({"valid": true})),
            }
        }
        return;
    }

    match output {
        OutputFormat::Text => {
            if !quiet {
                eprintln!("invalid dynamic resources file");
                for err in &errors {
                    eprintln!("  - {}", err);
                }
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({"valid": false, "errors": errors});
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
    }
    process::exit(1);
}
