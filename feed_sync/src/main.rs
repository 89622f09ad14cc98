//! # feed_sync CLI
//!
//! Reads a catalog feed and mirrors it into PostgreSQL.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `feed_sync schema` | Print the inferred tables as JSON |
//! | `feed_sync ddl` | Print the creation statement of every inferred table |
//! | `feed_sync create` | Create missing tables and validate existing ones |
//! | `feed_sync sync` | Write every item, upserting or updating only |
//! | `feed_sync drop` | Drop named tables, or every table of a schema |

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use feed_sync::config::{self, Config};
use feed_sync::utils::logging::init_logging;
use feed_sync::{inference_for, FeedSyncClient, SyncMode};

#[derive(Parser)]
#[command(name = "feed_sync", version, about = "Mirror product-catalog XML feeds into PostgreSQL")]
struct Cli {
    /// Path to the configuration file (TOML). Defaults apply when it is absent.
    #[arg(long, global = true, default_value = "feed_sync.toml")]
    config: String,

    /// Read the document from this file instead of the configured source
    #[arg(long, global = true)]
    file: Option<String>,

    /// Fetch the document from this URL instead of the configured source
    #[arg(long, global = true, conflicts_with = "file")]
    url: Option<String>,

    /// Override `database.url`
    #[arg(long, global = true, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the inferred tables as JSON
    Schema,

    /// Print the creation statement of every inferred table
    Ddl,

    /// Create missing tables and validate existing ones
    Create,

    /// Synchronize every item of the document
    Sync {
        /// Write mode; defaults to `sync.mode` from the configuration
        #[arg(long, value_enum)]
        mode: Option<SyncMode>,
    },

    /// Drop tables
    Drop {
        /// Schema to drop from; defaults to `database.schema`
        #[arg(long)]
        schema: Option<String>,

        /// Append CASCADE to every drop
        #[arg(long)]
        cascade: bool,

        /// Tables to drop; every table of the schema when empty
        tables: Vec<String>,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = if Path::new(&cli.config).exists() {
        config::load_from_file(&cli.config)?
    } else {
        Config::default()
    };

    if let Some(file) = &cli.file {
        config.source.file = Some(file.clone());
        config.source.url = None;
    }
    if let Some(url) = &cli.url {
        config.source.file = None;
        config.source.url = Some(url.clone());
    }
    if let Some(database_url) = &cli.database_url {
        config.database.url = database_url.clone();
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config.logging)?;

    // Commands that don't require a database
    match &cli.command {
        Commands::Schema => {
            let document = feed_sync::document::source::load(&config.source).await?;
            let schema = inference_for(&config).infer(&document);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Ddl => {
            let document = feed_sync::document::source::load(&config.source).await?;
            let schema = inference_for(&config).infer(&document);
            for statement in schema.create_statements(&config.database.schema) {
                println!("{}\n", statement);
            }
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let default_mode = config.sync.mode;
    let client = FeedSyncClient::new(config)
        .await
        .context("failed to connect to database")?;

    match cli.command {
        Commands::Schema | Commands::Ddl => unreachable!("handled above"),
        Commands::Create => {
            let document = client.load_document().await?;
            let created = client.ensure_tables(&document).await?;
            println!("Created {} table(s): {}", created.len(), created.join(", "));
        }
        Commands::Sync { mode } => {
            let document = client.load_document().await?;
            let report = client.sync(&document, mode.unwrap_or(default_mode)).await;

            for outcome in &report.outcomes {
                match &outcome.result {
                    Ok(stats) => println!(
                        "{}: {} row(s) written, {} skipped{}",
                        stats.table,
                        stats.rows_written,
                        stats.rows_skipped,
                        if stats.created { " (created)" } else { "" }
                    ),
                    Err(e) => eprintln!("{}: {}", outcome.table, e),
                }
            }
            if !report.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Drop {
            schema,
            cascade,
            tables,
        } => {
            if tables.is_empty() {
                let dropped = client.drop_all_tables(schema.as_deref(), cascade).await?;
                println!("Dropped {} table(s)", dropped.len());
            } else {
                client.drop_tables(schema.as_deref(), &tables, cascade).await?;
                println!("Dropped {} table(s)", tables.len());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
