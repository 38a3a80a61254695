//! CLI administration tool for shortlink.
//!
//! Manages accounts, inspects links and checks the database without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create an account
//! cargo run --bin admin -- account create --email alice@example.com
//!
//! # List accounts
//! cargo run --bin admin -- account list
//!
//! # Links owned by an account
//! cargo run --bin admin -- links alice@example.com
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use shortlink::config::Config;
use shortlink::domain::entities::{NewAccount, normalize_email};
use shortlink::domain::repositories::{AccountRepository, LinkRepository};
use shortlink::infrastructure::auth::hash_password;
use shortlink::infrastructure::persistence::{PgAccountRepository, PgLinkRepository};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// Shortest accepted password, same as the register endpoint.
const MIN_PASSWORD_LENGTH: usize = 6;

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
    /// Manage accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// List links owned by an account, newest first
    Links {
        /// Account email
        email: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Create an account
    Create {
        /// Account email (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all accounts
    List,
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[derive(sqlx::FromRow)]
struct AccountOverview {
    id: i64,
    email: String,
    created_at: DateTime<Utc>,
    links: i64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Account { action } => handle_account_action(action, &pool).await?,
        Commands::Links { email } => list_links(&pool, &email).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_account_action(action: AccountAction, pool: &PgPool) -> Result<()> {
    match action {
        AccountAction::Create { email, yes } => {
            let repo = PgAccountRepository::new(Arc::new(pool.clone()));
            create_account(&repo, email, yes).await?;
        }
        AccountAction::List => list_accounts(pool).await?,
    }

    Ok(())
}

/// Creates an account with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for email (or use provided)
/// 2. Prompt for password twice
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Hash the password with Argon2id and store the account
async fn create_account(
    repo: &PgAccountRepository,
    email: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create Account".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let email = normalize_email(&email);

    if !email.contains('@') {
        anyhow::bail!("'{email}' is not an email address");
    }

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .validate_with(|input: &String| -> Result<(), String> {
            if input.chars().count() >= MIN_PASSWORD_LENGTH {
                Ok(())
            } else {
                Err(format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"))
            }
        })
        .interact()?;

    println!();
    println!("  Email: {}", email.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this account?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let password_hash = hash_password(&password)?;

    let account = repo
        .create(NewAccount::new(&email, password_hash))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {e}"))?;

    println!();
    println!("{}", "✅ Account created successfully!".green().bold());
    println!("  ID: {}", account.id.to_string().bright_white().bold());
    println!();
    println!("{}", "Log in with:".bright_white());
    println!(
        "  curl -X POST -H 'Content-Type: application/json' \\\n    -d '{{\"email\":\"{}\",\"password\":\"...\"}}' http://localhost:3000/api/login",
        email
    );
    println!();

    Ok(())
}

/// Lists all accounts with their link counts.
///
/// # Output Format
///
/// ```text
/// 📋 Accounts
///
///   ID   Email                          Created              Links
///   ───────────────────────────────────────────────────────────────
///   1    alice@example.com              2025-01-15 10:30     12
/// ```
async fn list_accounts(pool: &PgPool) -> Result<()> {
    println!("{}", "📋 Accounts".bright_blue().bold());
    println!();

    let accounts = sqlx::query_as::<_, AccountOverview>(
        r#"
        SELECT a.id, a.email, a.created_at, COUNT(l.id) AS links
        FROM accounts a
        LEFT JOIN links l ON l.owner_id = a.id
        GROUP BY a.id
        ORDER BY a.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    if accounts.is_empty() {
        println!("{}", "  No accounts found".yellow());
        println!();
        println!(
            "  Create one with: {} admin account create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<30} {:<20} {:<6}",
        "ID".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold(),
        "Links".bright_white().bold()
    );
    println!("  {}", "─".repeat(64).bright_black());

    for account in &accounts {
        println!(
            "  {:<4} {:<30} {:<20} {}",
            account.id.to_string().bright_black(),
            account.email.cyan(),
            account
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            account.links.to_string().bright_green()
        );
    }

    println!();
    println!(
        "  Total: {}",
        accounts.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Lists links owned by an account, newest first.
async fn list_links(pool: &PgPool, email: &str) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let accounts = PgAccountRepository::new(pool.clone());
    let links = PgLinkRepository::new(pool);

    let account = accounts
        .find_by_email(&normalize_email(email))
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {e}"))?
        .with_context(|| format!("No account with email '{email}'"))?;

    println!(
        "{} {}",
        "🔗 Links of".bright_blue().bold(),
        account.email.cyan().bold()
    );
    println!();

    let owned = links
        .list_by_owner(account.id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {e}"))?;

    if owned.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<6} {:<16} {:<8} {:<20} {}",
        "ID".bright_white().bold(),
        "Slug".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for link in &owned {
        println!(
            "  {:<6} {:<16} {:<8} {:<20} {}",
            link.id.to_string().bright_black(),
            link.slug.cyan(),
            link.clicks.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.original_url
        );
    }

    println!();
    println!("  Total: {}", owned.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of links, and how many have an owner
/// - Total number of clicks
/// - Number of accounts
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (links_count, owned_count, clicks_count): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*),
               COUNT(owner_id),
               COALESCE(SUM(clicks), 0)::BIGINT
        FROM links
        "#,
    )
    .fetch_one(pool)
    .await?;

    let accounts_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
        .fetch_one(pool)
        .await?;

    println!(
        "  Links:    {} ({} owned)",
        links_count.to_string().bright_green().bold(),
        owned_count.to_string().bright_white()
    );
    println!(
        "  Clicks:   {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!(
        "  Accounts: {}",
        accounts_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
                    .fetch_one(pool)
                    .await
                    .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
