//! CLI administration tool for shortlink.
//!
//! Works directly against PostgreSQL, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a short link
//! cargo run --bin admin -- shorten https://example.com/long --alias promo --expires-at 2030-01-01T00:00:00Z
//!
//! # Look up where a code points
//! cargo run --bin admin -- resolve promo
//!
//! # Show counters for a code
//! cargo run --bin admin -- stats aZ3kP9q
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components: PostgreSQL connection
//! - `BASE_URL` (optional): prefix for printed short URLs

use shortlink::application::services::LinkService;
use shortlink::config::Config;
use shortlink::infrastructure::persistence::PgLinkRepository;
use shortlink::utils::timestamp::parse_timestamp;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// URL to shorten (http or https)
        url: String,

        /// Custom alias (3-50 alphanumeric characters)
        #[arg(short, long)]
        alias: Option<String>,

        /// Expiry timestamp, ISO-8601 (naive values are UTC)
        #[arg(short, long, value_parser = parse_expiry)]
        expires_at: Option<DateTime<Utc>>,
    },

    /// Show the original URL for a code or alias
    Resolve { code: String },

    /// Show counters for a code or alias
    Stats { code: String },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info and link totals
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url().context("Database is not configured")?;
    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let service = LinkService::new(Arc::new(PgLinkRepository::new(Arc::new(pool.clone()))));

    match cli.command {
        Commands::Shorten {
            url,
            alias,
            expires_at,
        } => shorten(&service, url, alias, expires_at).await?,
        Commands::Resolve { code } => resolve(&service, &code).await?,
        Commands::Stats { code } => show_stats(&service, &code).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    println!();
    Ok(())
}

fn parse_expiry(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(raw).map_err(|e| format!("invalid timestamp '{raw}': {e}"))
}

async fn shorten(
    service: &LinkService<PgLinkRepository>,
    url: String,
    alias: Option<String>,
    expires_at: Option<DateTime<Utc>>,
) -> Result<()> {
    let link = service
        .shorten(url, alias, expires_at)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    let base_url =
        std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

    println!("{}", "Short link ready".green().bold());
    println!();
    println!(
        "  Short URL: {}",
        service
            .short_url(&base_url, &link.short_code)
            .bright_yellow()
            .bold()
    );
    println!("  Code:      {}", link.short_code.cyan());
    if let Some(alias) = &link.custom_alias {
        println!("  Alias:     {}", alias.cyan());
    }
    println!("  Target:    {}", link.original_url);
    if let Some(expires_at) = link.expires_at {
        println!("  Expires:   {}", format_time(expires_at).bright_black());
    }

    Ok(())
}

async fn resolve(service: &LinkService<PgLinkRepository>, code: &str) -> Result<()> {
    let link = service
        .resolve(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{} -> {}", code.cyan(), link.original_url.bright_white());
    Ok(())
}

/// Prints counters for a link, expired or not.
async fn show_stats(service: &LinkService<PgLinkRepository>, code: &str) -> Result<()> {
    let link = service
        .stats(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let status = if link.is_expired() {
        "EXPIRED".red()
    } else {
        "ACTIVE".green()
    };

    println!("{}", "Link statistics".bright_blue().bold());
    println!();
    println!("  Code:          {}", link.short_code.cyan());
    if let Some(alias) = &link.custom_alias {
        println!("  Alias:         {}", alias.cyan());
    }
    println!("  Target:        {}", link.original_url);
    println!("  Status:        {}", status);
    println!(
        "  Redirects:     {}",
        link.redirect_count.to_string().bright_green().bold()
    );
    println!(
        "  Created:       {}",
        format_time(link.created_at).bright_black()
    );
    println!(
        "  Last accessed: {}",
        link.last_accessed_at
            .map(format_time)
            .unwrap_or_else(|| "never".to_string())
            .bright_black()
    );

    Ok(())
}

fn format_time(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let (links, redirects): (i64, i64) = sqlx::query_as(
                "SELECT COUNT(*), COALESCE(SUM(redirect_count), 0)::BIGINT FROM short_links",
            )
            .fetch_one(pool)
            .await?;

            let expired: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM short_links WHERE expires_at IS NOT NULL AND expires_at <= NOW()",
            )
            .fetch_one(pool)
            .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Links:      {}", links.to_string().bright_green().bold());
            println!("  Expired:    {}", expired.to_string().yellow());
            println!(
                "  Redirects:  {}",
                redirects.to_string().bright_green().bold()
            );
        }
    }

    Ok(())
}
