//! CLI administration tool for DissConnect.
//!
//! Manages profiles and session tokens, shows statistics and runs
//! database checks without going through the HTTP surface.
//!
//! # Usage
//!
//! ```bash
//! # Create a profile
//! cargo run --bin admin -- profile create --role professor --organization MIT
//!
//! # List profiles
//! cargo run --bin admin -- profile list
//!
//! # Issue a session token for a profile
//! cargo run --bin admin -- session issue 2b0c…-uuid --label laptop
//!
//! # Revoke a session
//! cargo run --bin admin -- session revoke 12
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
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `SESSION_SIGNING_SECRET` (required for `session issue`): must match the server's

use dissconnect::application::services::AuthService;
use dissconnect::domain::entities::{NewProfile, Role};
use dissconnect::domain::repositories::{ProfileRepository, SessionRepository};
use dissconnect::infrastructure::persistence::{PgProfileRepository, PgSessionRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Select};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// CLI tool for managing DissConnect.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Manage session tokens
    Session {
        #[command(subcommand)]
        action: SessionAction,
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
enum ProfileAction {
    /// Create a profile
    Create {
        /// charity, student or professor
        #[arg(short, long)]
        role: Option<Role>,

        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// University for students and professors, charity name for charities
        #[arg(short, long)]
        organization: Option<String>,

        #[arg(short, long)]
        subject: Option<String>,
    },

    /// List all profiles
    List,
}

#[derive(Subcommand)]
enum SessionAction {
    /// Issue a new session token for a profile
    Issue {
        profile_id: Uuid,

        /// Label shown in listings (e.g., "laptop")
        #[arg(short, long, default_value = "cli")]
        label: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List sessions of a profile
    List { profile_id: Uuid },

    /// Revoke a session by ID
    Revoke { id: i64 },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Profile { action } => handle_profile_action(action, &pool).await?,
        Commands::Session { action } => handle_session_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_profile_action(action: ProfileAction, pool: &PgPool) -> Result<()> {
    let repo = PgProfileRepository::new(Arc::new(pool.clone()));

    match action {
        ProfileAction::Create {
            role,
            full_name,
            organization,
            subject,
        } => create_profile(&repo, role, full_name, organization, subject).await,
        ProfileAction::List => list_profiles(&repo).await,
    }
}

fn non_empty(value: String) -> Option<String> {
    Some(value.trim().to_string()).filter(|v| !v.is_empty())
}

async fn create_profile(
    repo: &PgProfileRepository,
    role: Option<Role>,
    full_name: Option<String>,
    organization: Option<String>,
    subject: Option<String>,
) -> Result<()> {
    println!("{}", "👤 Create Profile".bright_blue().bold());
    println!();

    let role = match role {
        Some(r) => r,
        None => {
            let roles = [Role::Charity, Role::Student, Role::Professor];
            let labels: Vec<&str> = roles.iter().map(Role::as_str).collect();
            let idx = Select::new()
                .with_prompt("Role")
                .items(&labels)
                .default(1)
                .interact()?;
            roles[idx]
        }
    };

    let organization = match organization {
        Some(o) => non_empty(o),
        None => non_empty(
            Input::<String>::new()
                .with_prompt("Organization (empty for none)")
                .allow_empty(true)
                .interact_text()?,
        ),
    };

    let profile = repo
        .create(NewProfile {
            role,
            full_name: full_name.and_then(non_empty),
            organization,
            subject: subject.and_then(non_empty),
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create profile: {}", e))?;

    println!("{}", "✅ Profile created".green().bold());
    println!("  ID:           {}", profile.id.to_string().bright_yellow());
    println!("  Role:         {}", profile.role.as_str().cyan());
    println!(
        "  Organization: {}",
        profile.organization.as_deref().unwrap_or("-").cyan()
    );
    println!();
    println!(
        "  Issue a session with: {} admin -- session issue {}",
        "cargo run --bin".bright_cyan(),
        profile.id
    );

    Ok(())
}

async fn list_profiles(repo: &PgProfileRepository) -> Result<()> {
    println!("{}", "📋 Profiles".bright_blue().bold());
    println!();

    let profiles = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list profiles: {}", e))?;

    if profiles.is_empty() {
        println!("{}", "  No profiles found".yellow());
        return Ok(());
    }

    println!(
        "  {:<36} {:<10} {:<24} {:<20}",
        "ID".bright_white().bold(),
        "Role".bright_white().bold(),
        "Organization".bright_white().bold(),
        "Name".bright_white().bold()
    );
    println!("  {}", "─".repeat(92).bright_black());

    for profile in &profiles {
        println!(
            "  {:<36} {:<10} {:<24} {:<20}",
            profile.id.to_string().bright_black(),
            profile.role.as_str().cyan(),
            profile.organization.as_deref().unwrap_or("-"),
            profile.full_name.as_deref().unwrap_or("-"),
        );
    }

    println!();
    println!(
        "  Total: {}",
        profiles.len().to_string().bright_white().bold()
    );

    Ok(())
}

async fn handle_session_action(action: SessionAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgSessionRepository::new(Arc::new(pool.clone())));

    match action {
        SessionAction::Issue {
            profile_id,
            label,
            yes,
        } => issue_session(repo, pool, profile_id, label, yes).await,
        SessionAction::List { profile_id } => list_sessions(&repo, profile_id).await,
        SessionAction::Revoke { id } => revoke_session(&repo, id).await,
    }
}

/// Issues a session token through [`AuthService`], so the stored hash uses
/// the same HMAC key the server verifies with.
async fn issue_session(
    repo: Arc<PgSessionRepository>,
    pool: &PgPool,
    profile_id: Uuid,
    label: String,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Issue Session Token".bright_blue().bold());
    println!();

    let secret =
        std::env::var("SESSION_SIGNING_SECRET").context("SESSION_SIGNING_SECRET must be set")?;

    let profile = PgProfileRepository::new(Arc::new(pool.clone()))
        .find_by_id(profile_id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Profile not found")?;

    println!("  Profile: {}", profile.id.to_string().cyan());
    println!("  Role:    {}", profile.role.as_str().cyan());
    println!("  Label:   {}", label.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Issue a token for this profile?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let auth = AuthService::new(repo, secret);
    let (token, session) = auth
        .issue_session(profile.id, &label)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to issue session: {}", e))?;

    println!("{}", "✅ Session issued".green().bold());
    println!("  Session ID: {}", session.id.to_string().bright_black());
    println!("  Token:      {}", token.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Use it to log in on /login, or with the API:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/projects",
        token.bright_yellow()
    );

    Ok(())
}

async fn list_sessions(repo: &PgSessionRepository, profile_id: Uuid) -> Result<()> {
    println!("{}", "📋 Sessions".bright_blue().bold());
    println!();

    let sessions = repo
        .list_for_profile(profile_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list sessions: {}", e))?;

    if sessions.is_empty() {
        println!("{}", "  No sessions found".yellow());
        return Ok(());
    }

    println!(
        "  {:<6} {:<20} {:<18} {:<18} {:<10}",
        "ID".bright_white().bold(),
        "Label".bright_white().bold(),
        "Created".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(78).bright_black());

    for session in &sessions {
        let status = if session.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };
        let last_used = session
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<6} {:<20} {:<18} {:<18} {}",
            session.id.to_string().bright_black(),
            session.label.cyan(),
            session.created_at.format("%Y-%m-%d %H:%M").to_string(),
            last_used,
            status
        );
    }

    Ok(())
}

async fn revoke_session(repo: &PgSessionRepository, id: i64) -> Result<()> {
    println!("{}", "🔒 Revoke Session".bright_blue().bold());
    println!();

    let confirmed = Confirm::new()
        .with_prompt(format!("Revoke session {id}?"))
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    let revoked = repo
        .revoke(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke session: {}", e))?;

    if revoked {
        println!("{}", "✅ Session revoked".green().bold());
    } else {
        println!("{}", "⚠️  Session not found or already revoked".yellow());
    }

    Ok(())
}

/// Displays marketplace statistics.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let by_role: Vec<(String, i64)> =
        sqlx::query_as("SELECT role, COUNT(*) FROM profiles GROUP BY role ORDER BY role")
            .fetch_all(pool)
            .await?;

    let open_projects: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE status = 'open'")
            .fetch_one(pool)
            .await?;

    let interests: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM interests")
        .fetch_one(pool)
        .await?;

    let sessions: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE revoked_at IS NULL")
            .fetch_one(pool)
            .await?;

    for (role, count) in &by_role {
        println!(
            "  {:<16} {}",
            format!("{role}s:"),
            count.to_string().bright_green().bold()
        );
    }
    println!(
        "  {:<16} {}",
        "Open projects:",
        open_projects.to_string().bright_green().bold()
    );
    println!(
        "  {:<16} {}",
        "Interests:",
        interests.to_string().bright_green().bold()
    );
    println!(
        "  {:<16} {}",
        "Active sessions:",
        sessions.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

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

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
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
