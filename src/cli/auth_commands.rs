// src/cli/auth_commands.rs
use crossterm::style::Stylize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::instrument;

use crate::cli::error::{CliError, CliResult};
use crate::cli::CommandContext;
use crate::domain::user::Credentials;

fn resolve_password(password: Option<String>) -> CliResult<String> {
    match password {
        Some(password) => Ok(password),
        None => prompt_password(),
    }
}

fn prompt_password() -> CliResult<String> {
    let mut rl = DefaultEditor::new()
        .map_err(|e| CliError::Other(format!("Failed to initialize prompt: {}", e)))?;
    match rl.readline("Password: ") {
        Ok(line) => Ok(line.trim_end_matches(['\r', '\n']).to_string()),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            Err(CliError::OperationAborted)
        }
        Err(e) => Err(CliError::Other(format!("Failed to read password: {}", e))),
    }
}

#[instrument(skip(ctx, password), level = "debug")]
pub async fn signup(ctx: &CommandContext<'_>, email: &str, password: Option<String>) -> CliResult<()> {
    let credentials = Credentials::new(email, resolve_password(password)?);
    let mut dashboard = ctx.services.dashboard();
    dashboard
        .sign_up(&credentials)
        .await
        .map_err(CliError::Reported)?;
    Ok(())
}

#[instrument(skip(ctx, password), level = "debug")]
pub async fn signin(ctx: &CommandContext<'_>, email: &str, password: Option<String>) -> CliResult<()> {
    let credentials = Credentials::new(email, resolve_password(password)?);
    let mut dashboard = ctx.services.dashboard();
    let user = dashboard
        .sign_in(&credentials)
        .await
        .map_err(CliError::Reported)?;

    let email = if ctx.color {
        user.email.as_str().green().to_string()
    } else {
        user.email.clone()
    };
    eprintln!("Signed in as {} ({})", email, dashboard.summary());
    Ok(())
}

pub async fn signout(ctx: &CommandContext<'_>) -> CliResult<()> {
    let mut dashboard = ctx.services.dashboard();
    match dashboard.current_user() {
        Some(user) => {
            dashboard.sign_out().await.map_err(CliError::Reported)?;
            eprintln!("Signed out {}", user.email);
        }
        None => eprintln!("Not signed in"),
    }
    Ok(())
}

pub fn whoami(ctx: &CommandContext<'_>) -> CliResult<()> {
    let user = ctx
        .services
        .dashboard()
        .current_user()
        .ok_or(CliError::NotSignedIn)?;
    println!("{} ({})", user.email, user.id);
    Ok(())
}
