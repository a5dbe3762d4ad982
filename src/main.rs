//! Aweshore CLI - serve the notes API and manage its database

use aweshore::config::{self, AweshoreConfig, LogFormat};
use aweshore::server::{self, ServerSettings};
use aweshore::storage::{self, Database};
use aweshore::ui::{self, Icons};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "aweshore")]
#[command(version)]
#[command(about = "Note-taking REST backend over SQLite")]
#[command(long_about = r#"
Aweshore serves notes, tags, attachments, users and note types as JSON over HTTP.

Example usage:
  aweshore init
  aweshore serve --port 8080
  aweshore seed --count 100000
  aweshore stats
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log output format (overrides config)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Fill the notes table with random notes
    Seed {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Number of notes to insert
        #[arg(short = 'n', long, default_value = "1000")]
        count: usize,

        /// Notes per transaction
        #[arg(short, long, default_value = "5000")]
        batch_size: usize,
    },

    /// Show row counts for every table
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init(),
    }
}

fn open_database(cfg: &AweshoreConfig, cli_path: Option<PathBuf>) -> anyhow::Result<(Database, PathBuf)> {
    let path = cfg.database_path(cli_path);
    config::ensure_db_dir(&path)?;
    let db = Database::open(&path)?;
    Ok((db, path))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cfg = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    init_logging(cli.verbose, cfg.log_format(cli.log_format));

    match cli.command {
        Commands::Serve { database, host, port } => {
            let (db, path) = open_database(&cfg, database)?;
            let settings = ServerSettings {
                host: cfg.host(host),
                port: cfg.port(port),
                allowed_origins: cfg.allowed_origins(),
            };

            ui::header(Icons::ROCKET, &format!("Serving on http://{}:{}", settings.host, settings.port));
            ui::info("Database", &path.display().to_string());
            ui::info("Allowed origins", &settings.allowed_origins.join(", "));

            server::start_server(settings, db).await?;
        }

        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            config::write_config(&path, &AweshoreConfig::with_defaults(), force)?;
            ui::success(&format!("Wrote {}", path.display()));
        }

        Commands::Seed { database, count, batch_size } => {
            if count == 0 {
                ui::warn("Nothing to seed (--count 0)");
                return Ok(());
            }

            let (db, path) = open_database(&cfg, database)?;
            ui::header(Icons::SEED, &format!("Seeding {} notes into {}", count, path.display()));

            let started = Instant::now();
            let progress = ui::SeedProgress::new(count);
            let inserted = storage::seed_notes(&db, count, batch_size, |rows| progress.advance(rows))?;
            progress.finish();

            ui::success(&format!("Inserted {} notes", inserted));
            ui::timing(&format!("{:.2?}", started.elapsed()));
        }

        Commands::Stats { database } => {
            let (db, path) = open_database(&cfg, database)?;
            let stats = db.stats()?;

            ui::header(Icons::STATS, &format!("Aweshore Statistics ({})", path.display()));
            println!("{}", ui::stats_table(&stats.tables));

            let notes = stats.count("notes").unwrap_or(0);
            ui::section("Listing");
            ui::summary_row(
                "Pages at default size:",
                &aweshore::pagination::total_pages(notes, aweshore::pagination::DEFAULT_PAGE_SIZE).to_string(),
            );
        }
    }

    Ok(())
}
