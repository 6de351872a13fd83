mod commands;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Print an error in the requested output format.
pub(crate) fn report_error(message: &str, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Text => {
            if !quiet {
                eprintln!("error: {}", message);
            }
        }
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": message }));
        }
    }
}

/// Mock resource provider toolchain.
#[derive(Parser)]
#[command(name = "resmock", version, about = "Mock resource provider toolchain")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a dynamic resources JSON file
    Validate {
        /// Path to the dynamic resources file
        file: PathBuf,
    },

    /// Run the computed-value generator over a value map and print the
    /// filled resource document
    Generate {
        /// Resource type to generate for (built-in or from --schema)
        #[arg(long = "type")]
        type_name: String,
        /// Path to a dynamic resources file defining the type
        #[arg(long)]
        schema: Option<PathBuf>,
        /// Path to a resource document holding the input values; empty when
        /// omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Enumerate persisted resource documents
    List {
        /// Resource directory to enumerate
        #[arg(long, default_value = "resmock.resource")]
        dir: PathBuf,
        /// Only yield resources of this type
        #[arg(long = "type")]
        type_name: Option<String>,
        /// Only yield the resource with this id
        #[arg(long)]
        id: Option<String>,
        /// Stop after this many results
        #[arg(long)]
        limit: Option<u64>,
    },

    /// Serve the provider over an HTTP JSON API
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 8080)]
        port: u16,
        /// Where created resources are written
        #[arg(long)]
        resource_dir: Option<PathBuf>,
        /// Where data source documents are read from
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Path to the dynamic resources file
        #[arg(long)]
        dynamic_resources: Option<PathBuf>,
        /// Discard writes and rely on the host's state
        #[arg(long)]
        use_only_state: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { file } => commands::validate::cmd_validate(&file, cli.output, cli.quiet),
        Commands::Generate {
            type_name,
            schema,
            input,
        } => commands::generate::cmd_generate(
            &type_name,
            schema.as_deref(),
            input.as_deref(),
            cli.output,
            cli.quiet,
        ),
        Commands::List {
            dir,
            type_name,
            id,
            limit,
        } => commands::list::cmd_list(
            &dir,
            type_name.as_deref(),
            id.as_deref(),
            limit,
            cli.output,
            cli.quiet,
        ),
        Commands::Serve {
            port,
            resource_dir,
            data_dir,
            dynamic_resources,
            use_only_state,
        } => serve::cmd_serve(port, resource_dir, data_dir, dynamic_resources, use_only_state, cli.output, cli.quiet),
    }
}
