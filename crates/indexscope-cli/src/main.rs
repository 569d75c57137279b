//! IndexScope CLI - MySQL index structure visualizer

use indexscope_cli::cli;
#[cfg(feature = "metadata-provider")]
use indexscope_cli::config::ConnectionConfig;
use indexscope_cli::input;
#[cfg(feature = "metadata-provider")]
use indexscope_cli::metadata;
use indexscope_cli::output;
#[cfg(feature = "serve")]
use indexscope_cli::server;

use anyhow::{bail, Context, Result};
use clap::Parser;
use indexscope_core::{render, RenderOptions, SchemaCatalog};
use std::fs;
use std::process::ExitCode;

use cli::{Args, OutputFormat};

/// Render failure (connection, unknown schema/table).
const EXIT_FAILURE: u8 = 1;
/// Configuration error (e.g. missing selection or credentials).
const EXIT_CONFIG_ERROR: u8 = 66;

fn main() -> ExitCode {
    let args = Args::parse();

    #[cfg(feature = "serve")]
    if args.serve {
        return run_serve_mode(args);
    }

    match run(args) {
        Ok(failed) => {
            if failed {
                ExitCode::from(EXIT_FAILURE)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("indexscope: error: {e:#}");
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}

/// Resolve the connection URL from --database-url or the three
/// credential settings.
#[cfg(feature = "metadata-provider")]
fn connection_url(args: &Args) -> Result<Option<String>> {
    if let Some(url) = &args.database_url {
        return Ok(Some(url.clone()));
    }
    let config =
        ConnectionConfig::from_parts(args.host.clone(), args.user.clone(), args.password.clone())?;
    Ok(config.map(|c| c.to_url()))
}

#[cfg(not(feature = "metadata-provider"))]
fn connection_url(_args: &Args) -> Result<Option<String>> {
    Ok(None)
}

/// Run the CLI in one-shot mode.
///
/// Returns `Ok(true)` when the render failed with a user-visible message
/// (exit 1); `Err` means a configuration problem (exit 66).
fn run(args: Args) -> Result<bool> {
    let url = connection_url(&args)?;

    if args.list_schemas {
        return list_schemas(&args, url.as_deref());
    }

    let catalog = match load_catalog(&args, url.as_deref())? {
        Ok(catalog) => catalog,
        Err(message) => {
            eprintln!("indexscope: error: {message}");
            return Ok(true);
        }
    };

    if args.list_tables {
        for table in catalog.table_names() {
            println!("{table}");
        }
        return Ok(false);
    }

    let Some(table) = args.table.clone() else {
        bail!("no table selected: pass --table (or --list-tables to see what is available)");
    };

    let Some(table_meta) = catalog.table(&table) else {
        eprintln!(
            "indexscope: error: table not found: {}.{}",
            catalog.schema, table
        );
        return Ok(true);
    };

    let options = RenderOptions::with_seed(args.seed);
    let result = match render(&catalog, &table, &options) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("indexscope: error: {e}");
            return Ok(true);
        }
    };

    let rendered = match args.format {
        OutputFormat::Table => {
            output::format_table(&result, table_meta, args.quiet, args.output.is_none())
        }
        OutputFormat::Json => output::format_json(&result, args.compact),
        OutputFormat::Mermaid => output::format_mermaid(&result.graph),
    };

    // table format embeds issues; the other formats report them on stderr
    if !args.quiet && args.format != OutputFormat::Table {
        for issue in &result.issues {
            eprintln!("indexscope: [{}] {}", issue.code, issue.message);
        }
    }

    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Failed to write output to {}", path.display()))?,
        None => print!("{rendered}"),
    }

    Ok(false)
}

/// List schemas from the configured metadata source.
fn list_schemas(args: &Args, url: Option<&str>) -> Result<bool> {
    if let Some(path) = &args.input {
        let catalog = input::read_catalog(path)?;
        println!("{}", catalog.schema);
        return Ok(false);
    }

    #[cfg(feature = "metadata-provider")]
    if let Some(url) = url {
        match metadata::list_schemas_from_database(url) {
            Ok(schemas) => {
                for schema in schemas {
                    println!("{schema}");
                }
                return Ok(false);
            }
            Err(e) => {
                eprintln!("indexscope: error: {e}");
                return Ok(true);
            }
        }
    }

    let _ = url;
    bail!("no metadata source: pass --input or connection settings");
}

/// Load the catalog from the file input or the live database.
///
/// The outer `Err` is a configuration problem; the inner `Err(String)` is
/// a runtime failure to surface as a message.
fn load_catalog(
    args: &Args,
    url: Option<&str>,
) -> Result<std::result::Result<SchemaCatalog, String>> {
    if let Some(path) = &args.input {
        let catalog = input::read_catalog(path)?;
        if let Some(schema) = &args.schema {
            if *schema != catalog.schema {
                return Ok(Err(format!(
                    "schema not found in catalog file: {schema} (file holds {})",
                    catalog.schema
                )));
            }
        }
        return Ok(Ok(catalog));
    }

    #[cfg(feature = "metadata-provider")]
    if let Some(url) = url {
        let Some(schema) = args.schema.clone() else {
            bail!("no schema selected: pass --schema (or --list-schemas to see what is available)");
        };
        return Ok(metadata::fetch_catalog_from_database(url, &schema)
            .map_err(|e| e.to_string()));
    }

    let _ = url;
    bail!("no metadata source: pass --input or connection settings");
}

/// Run the CLI in serve mode with embedded web UI.
#[cfg(feature = "serve")]
fn run_serve_mode(args: Args) -> ExitCode {
    use server::{MetadataBackend, ServerConfig};

    let url = match connection_url(&args) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("indexscope: error: {e:#}");
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    // Create tokio runtime and run server
    let runtime = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    let backend = match (&args.input, url.as_deref()) {
        (Some(path), _) => match input::read_catalog(path) {
            Ok(catalog) => MetadataBackend::Static(catalog),
            Err(e) => {
                eprintln!("indexscope: error: {e:#}");
                return ExitCode::from(EXIT_CONFIG_ERROR);
            }
        },
        #[cfg(feature = "metadata-provider")]
        (None, Some(url)) => {
            match runtime.block_on(metadata::SqlxMetadataProvider::connect(url)) {
                Ok(provider) => MetadataBackend::Live(provider),
                Err(e) => {
                    eprintln!("indexscope: error: {e}");
                    return ExitCode::from(EXIT_FAILURE);
                }
            }
        }
        _ => {
            eprintln!("indexscope: error: no metadata source: pass --input or connection settings");
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let config = ServerConfig {
        database_url: url,
        seed: args.seed,
        port: args.port,
        open_browser: args.open,
    };

    match runtime.block_on(server::run_server(config, backend)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("indexscope: server error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
