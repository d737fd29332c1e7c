use super::failure;
use crate::context::AppContext;
use anyhow::{Context, Result};
use cloudtrim_core::auth::{Credentials, SignupCredentials};
use cloudtrim_core::config::AuthMode;
use colored::Colorize;
use tokio_util::sync::CancellationToken;

pub async fn login(
    ctx: &AppContext,
    cancel: &CancellationToken,
    email: String,
    password: String,
) -> Result<()> {
    let user = ctx
        .auth
        .login(cancel, &Credentials::new(email, password))
        .await
        .map_err(|err| failure("Login", err))?;

    println!(
        "{} Signed in as {} ({}, {} plan)",
        "✓".green(),
        user.email,
        user.company_name,
        user.plan
    );
    if ctx.auth.mode() == AuthMode::Demo {
        println!("  Demo mode: nothing was sent and no token was stored.");
    }
    Ok(())
}

pub async fn signup(
    ctx: &AppContext,
    cancel: &CancellationToken,
    email: String,
    password: String,
    company_name: String,
) -> Result<()> {
    let credentials = SignupCredentials {
        email,
        password,
        company_name,
    };
    let user = ctx
        .auth
        .signup(cancel, &credentials)
        .await
        .map_err(|err| failure("Sign up", err))?;

    println!(
        "{} Account created for {} ({})",
        "✓".green(),
        user.email,
        user.company_name
    );
    Ok(())
}

pub async fn logout(ctx: &AppContext, cancel: &CancellationToken) -> Result<()> {
    match ctx.auth.logout(cancel).await {
        Ok(()) => println!("{} Signed out", "✓".green()),
        Err(err) => println!(
            "{} Signed out locally; the server did not confirm: {}",
            "!".yellow(),
            err.user_message()
        ),
    }
    Ok(())
}

pub fn whoami(ctx: &AppContext) -> Result<()> {
    println!("API:       {}", ctx.config.api_base_url);
    println!("Auth mode: {}", ctx.config.auth_mode);

    let token = ctx.tokens.load().context("Failed to read stored token")?;
    match (&ctx.token_path, token) {
        (Some(path), Some(_)) => println!("Token:     stored in {}", path.display()),
        (Some(_), None) => println!("Token:     none (run `cloudtrim login`)"),
        (None, _) => println!("Token:     not persisted in demo mode"),
    }
    Ok(())
}
