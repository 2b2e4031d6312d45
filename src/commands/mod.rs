//! Console commands.
//!
//! One module per resource family, mirroring the store layout. Every admin
//! command passes through [`require_admin`], which enforces the routing
//! contract the same way the web shell did: edge gate first (token
//! presence), then a session check (token validity).

use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};

use maktab_core::routes::{self, RouteAction};
use maktab_models::admin::Admin;

use crate::context::AppContext;

pub mod auth;
pub mod classes;
pub mod dashboard;
pub mod registrations;
pub mod teachers;

#[derive(Parser)]
#[command(name = "maktab-admin")]
#[command(about = "Maktab admin console - manage classes, teachers, and registrations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in to the admin back office
    Login {
        /// Email address (prompted if not provided)
        #[arg(short, long)]
        email: Option<String>,

        /// Password (prompted securely if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Sign out and discard the persisted session
    Logout,
    /// Show the signed-in admin's profile
    Profile,
    /// Update the signed-in admin's profile
    UpdateProfile {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Submit a public registration (no sign-in required)
    Register(registrations::RegisterArgs),
    /// Manage classes
    Classes {
        #[command(subcommand)]
        command: classes::ClassesCommand,
    },
    /// Manage teachers
    Teachers {
        #[command(subcommand)]
        command: teachers::TeachersCommand,
    },
    /// Manage registrations
    Registrations {
        #[command(subcommand)]
        command: registrations::RegistrationsCommand,
    },
    /// Show registration and enrollment totals
    Dashboard,
    /// Export registrations to CSV
    Export {
        /// Output file path
        #[arg(short, long, default_value = "registrations.csv")]
        output: PathBuf,
    },
}

pub async fn dispatch(cli: Cli, ctx: &AppContext) -> anyhow::Result<()> {
    match cli.command {
        Commands::Login { email, password } => auth::login(ctx, email, password).await,
        Commands::Logout => auth::logout(ctx),
        Commands::Profile => auth::profile(ctx).await,
        Commands::UpdateProfile { username, email } => {
            auth::update_profile(ctx, username, email).await
        }
        Commands::Register(args) => registrations::register(ctx, args).await,
        Commands::Classes { command } => classes::dispatch(ctx, command).await,
        Commands::Teachers { command } => teachers::dispatch(ctx, command).await,
        Commands::Registrations { command } => registrations::dispatch(ctx, command).await,
        Commands::Dashboard => dashboard::dashboard(ctx).await,
        Commands::Export { output } => dashboard::export(ctx, &output).await,
    }
}

/// Enters the admin section and returns the validated identity.
///
/// Two layers, matching the web shell: the edge gate only sees token
/// presence and redirects when it is absent; the session check then
/// validates the token against the backend and redirects when it is stale.
pub(crate) async fn require_admin(ctx: &AppContext) -> anyhow::Result<Admin> {
    let action = ctx
        .navigator
        .enter(routes::ADMIN_SECTION, ctx.api.token().is_some());
    if action == RouteAction::RedirectToLogin {
        bail!("not signed in; run `maktab-admin login` first");
    }

    ctx.session.check_auth().await;
    match ctx.session.admin() {
        Some(admin) => Ok(admin),
        None => {
            ctx.navigator.navigate(routes::LOGIN_PATH);
            bail!("session expired; run `maktab-admin login` again");
        }
    }
}
