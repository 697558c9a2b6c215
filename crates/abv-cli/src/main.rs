use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use abv_catalog::{ImageCache, UntappdClient};
use abv_core::{parse_sort_fields, AppConfig, Database, InventoryController, InventoryStore};
use abv_server::{ApiState, WebState};
use abv_tui::app::async_tasks::Services;
use abv_tui::app::App;

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "abv",
    about = "Barcode-driven beverage inventory for a home bar",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Show debug messages in the activity log and log file.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy the database to another file.
    Backup { dest: PathBuf },

    /// Back up the database, then delete every stock movement.
    Reset,

    /// Serve the JSON inventory API.
    Api,

    /// Serve the front-end page.
    Web,

    /// Print the current inventory as JSON.
    Inventory {
        /// Sort column; repeat for secondary orderings.
        #[arg(long = "sort", action = clap::ArgAction::Append)]
        sort: Vec<String>,
    },
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config, cli.command.is_none(), cli.verbose)?;

    let db = Arc::new(Database::open(&config.database_path()).with_context(|| {
        format!("opening database at {}", config.database_path().display())
    })?);

    match cli.command {
        None => {
            let runtime = tokio::runtime::Runtime::new()?;
            let services = Services {
                runtime: runtime.handle().clone(),
                catalog: Arc::new(UntappdClient::new(&config.untappd)?),
                images: ImageCache::new(config.images_dir())?,
            };
            let controller =
                InventoryController::new(db.clone(), config.scan.clone(), config.nickname_map());
            let mut app = App::new(controller, config)
                .with_services(services)
                .with_verbose(cli.verbose);
            abv_tui::run_tui(&mut app)?;
        }

        Some(Commands::Backup { dest }) => {
            db.backup_to(&dest)?;
            println!(
                "Backed up {} to {}",
                db.path().unwrap_or(":memory:"),
                dest.display()
            );
        }

        Some(Commands::Reset) => {
            let backup = config.backup_path();
            db.backup_to(&backup)?;
            let removed = db.clear_movements()?;
            tracing::info!(removed, backup = %backup.display(), "cleared stock movements");
            println!(
                "Removed {removed} stock movements. Previous data saved to {}",
                backup.display()
            );
        }

        Some(Commands::Api) => {
            let state = ApiState::new(db).with_images(ImageCache::new(config.images_dir())?);
            let app = abv_server::api_router(state);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(abv_server::serve(
                app,
                &config.server.api_host,
                config.server.api_port,
            ))?;
        }

        Some(Commands::Web) => {
            let state = WebState::from_config(&config).with_context(|| {
                format!("loading front.html from {}", config.server.web_root)
            })?;
            let app = abv_server::web_router(state);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(abv_server::serve(
                app,
                &config.server.api_host,
                config.server.web_port,
            ))?;
        }

        Some(Commands::Inventory { sort }) => {
            let order = parse_sort_fields(sort.as_slice())?;
            let drinks = db.inventory_sorted(&order)?;
            println!("{}", serde_json::to_string_pretty(&drinks)?);
        }
    }

    Ok(())
}

/// The TUI owns the terminal, so it logs to a file. Everything else logs
/// to stderr.
fn init_tracing(config: &AppConfig, to_file: bool, verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "abv={level},abv_core={level},abv_catalog={level},abv_tui={level},abv_server={level},tower_http={level}"
        )
        .into()
    });

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}
