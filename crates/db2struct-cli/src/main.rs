//! db2struct CLI - generate Go structs from MySQL tables.

use clap::{Args, Parser, Subcommand};
use db2struct::config::GenerateConfig;
use db2struct::drivers::to_snapshot;
use db2struct::{Config, GenError, Generator, MysqlReader, SchemaSource, SourceImpl};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "db2struct")]
#[command(about = "Generate Go structs from MySQL table metadata")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file [default: ./db2struct.yaml if present]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "warn")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Go struct for a table
    Generate {
        #[command(flatten)]
        target: TableArgs,

        /// Go package name
        #[arg(long)]
        package: Option<String>,

        /// Go struct name [default: capitalized table name]
        #[arg(long)]
        struct_name: Option<String>,

        /// Emit json tags
        #[arg(long, overrides_with = "no_json")]
        json: bool,

        /// Do not emit json tags
        #[arg(long, overrides_with = "json")]
        no_json: bool,

        /// Emit gorm tags and a TableName method
        #[arg(long, overrides_with = "no_gorm")]
        gorm: bool,

        /// Do not emit gorm tags
        #[arg(long, overrides_with = "gorm")]
        no_gorm: bool,

        /// Use gopkg.in/guregu/null.v4 nullable types
        #[arg(long, overrides_with = "no_rich_nullable")]
        rich_nullable: bool,

        /// Use database/sql nullable types
        #[arg(long, overrides_with = "rich_nullable")]
        no_rich_nullable: bool,

        /// Emit a storage struct, a plain struct and conversions between them
        #[arg(long, overrides_with = "no_dual")]
        dual: bool,

        /// Emit a single struct
        #[arg(long, overrides_with = "dual")]
        no_dual: bool,

        /// Write the Go file here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Read columns from a snapshot file instead of the database
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },

    /// Dump a table's column metadata as a YAML snapshot
    Columns {
        #[command(flatten)]
        target: TableArgs,

        /// Write the snapshot here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Read columns from a snapshot file instead of the database
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },

    /// Test the database connection
    HealthCheck,
}

#[derive(Args)]
struct TableArgs {
    /// Table name [default: generate.table]
    #[arg(short, long)]
    table: Option<String>,

    /// Schema name [default: generate.schema, then source.database]
    #[arg(short, long)]
    schema: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), GenError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(GenError::Config)?;

    let mut config = Config::discover(cli.config.as_deref())?;
    info!("Loaded configuration");

    match cli.command {
        Commands::Generate {
            target,
            package,
            struct_name,
            json,
            no_json,
            gorm,
            no_gorm,
            rich_nullable,
            no_rich_nullable,
            dual,
            no_dual,
            output,
            snapshot,
        } => {
            apply_overrides(&mut config.generate, &target);
            let generate = &mut config.generate;
            if let Some(package) = package {
                generate.package = package;
            }
            if struct_name.is_some() {
                generate.struct_name = struct_name;
            }
            let style = &mut generate.style;
            style.json = toggle(style.json, json, no_json);
            style.gorm = toggle(style.gorm, gorm, no_gorm);
            style.rich_nullable = toggle(style.rich_nullable, rich_nullable, no_rich_nullable);
            style.dual = toggle(style.dual, dual, no_dual);
            if output.is_some() {
                generate.output = output;
            }
            config.validate()?;

            let table = required_table(&config)?;
            let source = SourceImpl::open(&config, snapshot.as_deref()).await?;
            let schema = config.effective_schema().unwrap_or_default().to_string();

            let generator = Generator::new(config.generate.clone());
            let generated = generator.run(&source, &schema, &table).await;
            source.close().await;
            let generated = generated?;

            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(&generated)?);
            } else {
                emit(config.generate.output.as_deref(), &generated.source)?;
            }
        }

        Commands::Columns {
            target,
            output,
            snapshot,
        } => {
            apply_overrides(&mut config.generate, &target);
            config.validate()?;

            let table = required_table(&config)?;
            let source = SourceImpl::open(&config, snapshot.as_deref()).await?;
            let schema = config.effective_schema().unwrap_or_default().to_string();

            let columns = source.fetch_columns(&schema, &table).await;
            source.close().await;
            let columns = columns?;

            let text = if cli.output_json {
                format!("{}\n", serde_json::to_string_pretty(&columns)?)
            } else {
                to_snapshot(&columns)?
            };
            emit(output.as_deref(), &text)?;
        }

        Commands::HealthCheck => {
            let source = config.source.as_ref().ok_or_else(|| {
                GenError::Config("health-check needs a source section".to_string())
            })?;

            let start = Instant::now();
            let reader = MysqlReader::new(source).await?;
            let result = reader.test_connection().await;
            let latency_ms = start.elapsed().as_millis();
            reader.close().await;

            if cli.output_json {
                let report = serde_json::json!({
                    "source_connected": result.is_ok(),
                    "source_latency_ms": latency_ms,
                    "source_error": result.as_ref().err().map(|e| e.to_string()),
                    "healthy": result.is_ok(),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Health Check Results:");
                println!(
                    "  Source (MySQL): {} ({}ms)",
                    if result.is_ok() { "OK" } else { "FAILED" },
                    latency_ms
                );
                if let Err(ref err) = result {
                    println!("    Error: {}", err);
                }
            }

            result?;
        }
    }

    Ok(())
}

/// Command-line table and schema win over the config file.
fn apply_overrides(generate: &mut GenerateConfig, target: &TableArgs) {
    if target.table.is_some() {
        generate.table = target.table.clone();
    }
    if target.schema.is_some() {
        generate.schema = target.schema.clone();
    }
}

/// A `--flag` / `--no-flag` pair; when neither is given the config value stands.
fn toggle(current: bool, on: bool, off: bool) -> bool {
    if off {
        false
    } else if on {
        true
    } else {
        current
    }
}

fn required_table(config: &Config) -> Result<String, GenError> {
    config.generate.table.clone().ok_or_else(|| {
        GenError::Config("no table given (use --table or generate.table)".to_string())
    })
}

/// Write `text` to `path`, or to stdout when there is no path.
fn emit(path: Option<&Path>, text: &str) -> Result<(), GenError> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, text)?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => return Err(format!("unknown verbosity '{}'", other)),
    };

    // stdout carries generated code only
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        "json" => subscriber.json().init(),
        "text" => subscriber.init(),
        other => return Err(format!("unknown log format '{}'", other)),
    }

    Ok(())
}
