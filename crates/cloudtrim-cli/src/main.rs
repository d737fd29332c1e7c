use anyhow::Result;
use clap::{Parser, Subcommand};
use cloudtrim_infrastructure::CloudTrimPaths;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

mod commands;
mod context;
mod logging;
mod render;

use context::{AppContext, Overrides};

#[derive(Parser)]
#[command(name = "cloudtrim")]
#[command(about = "CloudTrim CLI - cloud cost dashboard and optimization", long_about = None)]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides config and CLOUDTRIM_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Demo login and example data; nothing is persisted
    #[arg(long, global = true, conflicts_with = "no_fallback")]
    demo: bool,

    /// Show errors instead of example data when a request fails
    #[arg(long, global = true)]
    no_fallback: bool,

    /// Read configuration from this file instead of the default config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        company_name: String,
    },
    /// Sign out and forget the stored token
    Logout,
    /// Show the configured backend and sign-in state
    Whoami,
    /// Summary cards, resources and recommendations
    Dashboard,
    /// Current month costs, or the trailing window with --days
    Costs {
        #[arg(long)]
        days: Option<u32>,
    },
    /// Cloud resources with status and cost
    Resources,
    /// Account-wide CPU, memory and storage usage
    Utilization,
    /// Optimization recommendations and total potential savings
    Recommendations,
    /// Apply one recommendation by ID
    Apply { id: String },
    /// Resources running well below capacity
    Underutilized,
    /// Savings forecast across open recommendations
    Forecast,
    /// Backend liveness check
    Health,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            api_url: self.api_url.clone(),
            demo: self.demo,
            no_fallback: self.no_fallback,
            config: self.config.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = CloudTrimPaths::default();

    let config = AppContext::load_config(&paths, &cli.overrides())?;
    logging::init(&config.log_level);
    let ctx = AppContext::build(&paths, config)?;

    // Ctrl-C cancels whatever request is in flight.
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let result = run(&ctx, &cancel, cli.command).await;
    if let Err(err) = &result {
        tracing::error!("[cloudtrim] {:#}", err);
    }
    result
}

async fn run(ctx: &AppContext, cancel: &CancellationToken, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => {
            commands::auth::login(ctx, cancel, email, password).await
        }
        Commands::Signup {
            email,
            password,
            company_name,
        } => commands::auth::signup(ctx, cancel, email, password, company_name).await,
        Commands::Logout => commands::auth::logout(ctx, cancel).await,
        Commands::Whoami => commands::auth::whoami(ctx),
        Commands::Dashboard => commands::dashboard::dashboard(ctx, cancel).await,
        Commands::Costs { days } => commands::dashboard::costs(ctx, cancel, days).await,
        Commands::Resources => commands::dashboard::resources(ctx, cancel).await,
        Commands::Utilization => commands::dashboard::utilization(ctx, cancel).await,
        Commands::Recommendations => commands::optimize::recommendations(ctx, cancel).await,
        Commands::Apply { id } => commands::optimize::apply(ctx, cancel, &id).await,
        Commands::Underutilized => commands::optimize::underutilized(ctx, cancel).await,
        Commands::Forecast => commands::optimize::forecast(ctx, cancel).await,
        Commands::Health => commands::dashboard::health(ctx, cancel).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "cloudtrim",
            "costs",
            "--days",
            "30",
            "--api-url",
            "http://localhost:9000/api/v1",
            "--no-fallback",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Costs { days: Some(30) }));
        let overrides = cli.overrides();
        assert_eq!(overrides.api_url.as_deref(), Some("http://localhost:9000/api/v1"));
        assert!(overrides.no_fallback);
    }

    #[test]
    fn test_parse_signup() {
        let cli = Cli::try_parse_from([
            "cloudtrim",
            "signup",
            "--email",
            "cfo@globex.io",
            "--password",
            "pw",
            "--company-name",
            "Globex",
        ])
        .unwrap();
        match cli.command {
            Commands::Signup { company_name, .. } => assert_eq!(company_name, "Globex"),
            _ => panic!("expected signup"),
        }
    }

    #[test]
    fn test_demo_conflicts_with_no_fallback() {
        let result = Cli::try_parse_from(["cloudtrim", "--demo", "--no-fallback", "dashboard"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_requires_id() {
        assert!(Cli::try_parse_from(["cloudtrim", "apply"]).is_err());
        let cli = Cli::try_parse_from(["cloudtrim", "apply", "rec-7"]).unwrap();
        assert!(matches!(cli.command, Commands::Apply { ref id } if id == "rec-7"));
    }
}
