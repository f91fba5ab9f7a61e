use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing_subscriber::{prelude::*, EnvFilter};

use project_hub::config::Config;
use project_hub::models::format_date;
use project_hub::routes::create_routes;
use project_hub::services::SeaOrmProjectStore;
use project_hub::state::AppState;
use project_hub::view::{load_dashboard, Filters, ListSession, SortDirection, SortKey, ViewState};

#[derive(Parser)]
#[command(name = "project-hub", version, about = "Project tracking dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print the project list
    List(ListArgs),
    /// Print the dashboard summary
    Stats,
    /// Create the project_track table on a development database
    Migrate,
}

#[derive(Args)]
struct ListArgs {
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long)]
    client: Option<String>,
    #[arg(long)]
    revit_version: Option<String>,
    /// entry_date, project_no, client or project_name
    #[arg(long, default_value = "entry_date")]
    sort: SortKey,
    /// Sort ascending instead of descending
    #[arg(long)]
    asc: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let db = Database::connect(config.database_url.as_str())
        .await
        .context("failed to connect to database")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, db).await,
        Command::List(args) => list(db, args).await,
        Command::Stats => stats(db).await,
        Command::Migrate => {
            Migrator::up(&db, None).await?;
            tracing::info!("migrations applied");
            Ok(())
        }
    }
}

async fn serve(config: &Config, db: DatabaseConnection) -> anyhow::Result<()> {
    let store = Arc::new(SeaOrmProjectStore::new(db));
    let state = AppState::new(store, config.write_key_sha256.clone());
    if state.write_key_sha256.is_none() {
        tracing::warn!("WRITE_KEY_SHA256 not set, write routes are open");
    }

    let app = create_routes(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn list(db: DatabaseConnection, args: ListArgs) -> anyhow::Result<()> {
    let store = SeaOrmProjectStore::new(db);
    let state = ViewState {
        search: args.search,
        filters: Filters {
            client: args.client,
            revit_version: args.revit_version,
        },
        sort: args.sort,
        direction: if args.asc {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        },
    };

    let mut session = ListSession::new(state);
    session.refresh(&store).await;
    if let Some(notice) = session.notice() {
        eprintln!("{notice}");
    }

    let view = session.view();
    println!("{:>8}  {:<14}  {:<24}  {}", "No.", "Entry Date", "Client", "Project");
    for project in &view.projects {
        println!(
            "{:>8}  {:<14}  {:<24}  {}",
            project.project_no,
            format_date(project.entry_date.as_deref()),
            project.client.as_deref().unwrap_or("—"),
            project.title(),
        );
    }
    println!(
        "\n{} projects found | {} with DWG | {} with PDF",
        view.projects.len(),
        view.summary.with_dwg,
        view.summary.with_pdf
    );
    Ok(())
}

async fn stats(db: DatabaseConnection) -> anyhow::Result<()> {
    let store = SeaOrmProjectStore::new(db);
    let (dashboard, notice) = load_dashboard(&store).await;
    if let Some(notice) = notice {
        eprintln!("{notice}");
    }
    let summary = dashboard.summary;

    println!("Total Projects      {}", summary.total);
    println!("Active Clients      {}", summary.active_clients);
    println!("Projects with DWG   {} ({}%)", summary.with_dwg, dashboard.dwg_percent);
    println!("Completed Projects  {} ({}%)", summary.completed, dashboard.completed_percent);
    println!("\nRecent Projects");
    for recent in &dashboard.recent {
        println!(
            "  #{:<6} {:<30} {:<20} {:<14} {:?}",
            recent.project_no,
            recent.title,
            recent.client.as_deref().unwrap_or("—"),
            recent.entry_date.as_deref().unwrap_or("—"),
            recent.status,
        );
    }
    Ok(())
}
