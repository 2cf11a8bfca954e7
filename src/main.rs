//! orgadmin - back-office CLI for organization department management.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use orgadmin as app;

use app::config::{AppConfig, ConfigLoadResult};
use app::db;
use app::export;
use app::models::department::{CreateDepartment, DeptNode, UpdateDepartment};
use app::service::DeptService;

/// Back-office tool for organization department management.
#[derive(Parser)]
#[command(name = "orgadmin", version)]
struct Cli {
    /// Path to config.toml (default: per-user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default config file
    InitConfig,
    /// Print the department tree
    Tree {
        /// Emit JSON instead of the indented listing
        #[arg(long)]
        json: bool,
    },
    /// List the direct children of a department
    Children { parent_id: i32 },
    /// Create a department
    Create {
        #[arg(long)]
        name: String,
        /// Parent department id (omit for a root department)
        #[arg(long)]
        parent: Option<i32>,
        #[arg(long, default_value_t = 0)]
        order: i32,
    },
    /// Update a department
    Update {
        id: i32,
        #[arg(long)]
        name: Option<String>,
        /// Move under a new parent
        #[arg(long, conflicts_with = "detach")]
        parent: Option<i32>,
        /// Make the department a root
        #[arg(long)]
        detach: bool,
        #[arg(long)]
        order: Option<i32>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete departments together with all their descendants
    Delete {
        /// Department ids to remove (descendants are included automatically)
        #[arg(required = true)]
        ids: Vec<i32>,
    },
    /// Export the department tree to an Excel file
    Export {
        #[arg(long, short)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);

    if let Command::InitConfig = cli.command {
        return init_config(&config_path);
    }

    let config = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => config,
        ConfigLoadResult::Missing => {
            bail!(
                "config not found at {}; run `orgadmin init-config` first",
                config_path.display()
            );
        }
        ConfigLoadResult::Invalid(e) => {
            bail!("config at {} is invalid: {e}", config_path.display());
        }
    };

    // Keep the appender guard alive for the whole run
    let _log_guard = init_logging(&config);
    tracing::info!("orgadmin starting, config: {}", config_path.display());

    let pool = db::create_pool(&config.database.connection_string())
        .await
        .context("failed to connect to database")?;
    db::connection::test_connection(&pool)
        .await
        .context("database ping failed")?;
    let service = DeptService::new(pool);

    match cli.command {
        Command::InitConfig => unreachable!("handled before config load"),
        Command::Tree { json } => {
            let forest = service.tree().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&forest)?);
            } else {
                print_forest(&forest, 0);
            }
        }
        Command::Children { parent_id } => {
            for dept in service.children(parent_id).await? {
                println!("{:>6}  {}", dept.id, dept.name);
            }
        }
        Command::Create { name, parent, order } => {
            let dept = service
                .create(CreateDepartment {
                    name,
                    parent_id: parent,
                    display_order: order,
                })
                .await?;
            println!("Created department {} ({})", dept.id, dept.name);
        }
        Command::Update {
            id,
            name,
            parent,
            detach,
            order,
            active,
        } => {
            let parent_id = if detach {
                Some(None)
            } else {
                parent.map(Some)
            };
            let dept = service
                .update(
                    id,
                    UpdateDepartment {
                        name,
                        parent_id,
                        display_order: order,
                        is_active: active,
                    },
                )
                .await?;
            println!("Updated department {} ({})", dept.id, dept.name);
        }
        Command::Delete { ids } => {
            let requested: BTreeSet<i32> = ids.into_iter().collect();
            let outcome = service.delete(&requested).await?;
            for dept in &outcome.removed {
                println!("{:>6}  {}", dept.id, dept.name);
            }
            println!("{}", outcome.summary());
        }
        Command::Export { output } => {
            let forest = service.tree().await?;
            export::export_departments_to_excel(&forest, &output)?;
            println!("Exported department tree to {}", output.display());
        }
    }

    Ok(())
}

/// Write a default config file without overwriting an existing one.
fn init_config(path: &PathBuf) -> anyhow::Result<()> {
    if path.exists() {
        bail!("config already exists at {}", path.display());
    }
    AppConfig::default()
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

/// Initialize tracing with the configured level, to a daily-rolling file
/// when a log directory is configured, otherwise to stderr.
fn init_logging(config: &AppConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.logging.level.clone()));

    match &config.logging.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "orgadmin.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

/// Print the forest as an indented listing.
fn print_forest(nodes: &[DeptNode], depth: usize) {
    for node in nodes {
        let marker = if node.is_active { "" } else { " (inactive)" };
        println!("{:indent$}{} [{}]{marker}", "", node.name, node.id, indent = depth * 2);
        print_forest(&node.children, depth + 1);
    }
}
