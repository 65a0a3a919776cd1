//! Manage the dates on which slots can be offered.
//! Dates have no HTTP write path; this is how they get into the database.
//!
//! Usage:
//!   manage-dates add --date 2025-09-10 [--label "Kita-Streik"]
//!   manage-dates list

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use notbetreuung_api::{db, models::date::NewCareDate, services::dates::DateService, store::PgStore};

#[derive(Parser)]
#[command(name = "manage-dates", about = "Add or list emergency childcare dates")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a date (re-adding an existing date only updates its label)
    Add {
        /// Calendar day, YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// Optional display label
        #[arg(long)]
        label: Option<String>,
    },
    /// List all dates, earliest first
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable not set"))?;
    let pool = db::create_pool(&database_url, 2).await?;
    db::run_migrations(&pool).await?;
    let store = PgStore::new(pool.clone());

    match args.command {
        Command::Add { date, label } => {
            let label = label.map(|l| l.trim().to_string()).filter(|l| !l.is_empty());
            let row = DateService::add(&store, &NewCareDate { date, label }).await?;
            tracing::info!("Date {} stored with id {}", row.date, row.id);
        }
        Command::List => {
            for row in DateService::list(&store).await? {
                tracing::info!(
                    "{:>5}  {}  {}",
                    row.id,
                    row.date,
                    row.label.as_deref().unwrap_or("-")
                );
            }
        }
    }

    pool.close().await;
    Ok(())
}
