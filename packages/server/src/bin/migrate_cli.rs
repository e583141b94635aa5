//! Operator CLI for schema migrations and user roles
//!
//! Outputs JSON so it can be scripted.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use server_core::domains::users::models::{Role, User};
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "migrate_cli")]
#[command(about = "Schema migrations and user role administration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Run,

    /// List all users
    ListUsers,

    /// Set the role of one user
    SetRole {
        #[arg(long)]
        email: String,
        /// USER or ADMIN
        #[arg(long)]
        role: Role,
    },
}

// ============================================================================
// JSON Response Types
// ============================================================================

#[derive(Serialize)]
struct Response {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    users: Option<Vec<User>>,
}

fn output(resp: Response) -> Result<()> {
    println!("{}", serde_json::to_string(&resp)?);
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,sqlx=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => cmd_run().await,
        Commands::ListUsers => cmd_list_users().await,
        Commands::SetRole { email, role } => cmd_set_role(&email, role).await,
    }
}

/// Only DATABASE_URL is needed here, so the full server config is not loaded.
async fn get_pool() -> Result<PgPool> {
    let _ = dotenvy::dotenv();
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

// ============================================================================
// Commands
// ============================================================================

async fn cmd_run() -> Result<()> {
    let pool = get_pool().await?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    output(Response {
        success: true,
        message: Some("Migrations complete".to_string()),
        users: None,
    })
}

async fn cmd_list_users() -> Result<()> {
    let pool = get_pool().await?;
    let users = User::find_all(&pool).await?;

    output(Response {
        success: true,
        message: None,
        users: Some(users),
    })
}

async fn cmd_set_role(email: &str, role: Role) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        bail!("--email must not be empty");
    }

    let pool = get_pool().await?;
    let updated = User::set_role_by_email(email, role, &pool).await?;

    output(Response {
        success: updated,
        message: Some(if updated {
            format!("{} is now {}", email, role)
        } else {
            format!("No user with email {}", email)
        }),
        users: None,
    })
}
