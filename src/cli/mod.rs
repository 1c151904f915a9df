// src/cli/mod.rs
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::application::Dashboard;
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use tracing::debug;

pub mod args;
pub mod auth_commands;
pub mod completion;
pub mod display;
pub mod error;
pub mod link_commands;
pub mod tag_commands;

/// Everything a command handler needs besides its own arguments
pub struct CommandContext<'a> {
    pub services: &'a ServiceContainer,
    pub settings: &'a Settings,
    pub color: bool,
}

impl CommandContext<'_> {
    /// Dashboard with the current user's collection loaded; fails without a session
    pub async fn signed_in_dashboard(&self) -> CliResult<Dashboard> {
        let mut dashboard = self.services.dashboard();
        if dashboard.current_user().is_none() {
            return Err(CliError::NotSignedIn);
        }
        dashboard.load().await.map_err(CliError::Reported)?;
        Ok(dashboard)
    }
}

pub async fn execute_command(cli: Cli, ctx: &CommandContext<'_>) -> CliResult<()> {
    match cli.command {
        Some(Commands::Signup { email, password }) => {
            auth_commands::signup(ctx, &email, password).await
        }
        Some(Commands::Signin { email, password }) => {
            auth_commands::signin(ctx, &email, password).await
        }
        Some(Commands::Signout) => auth_commands::signout(ctx).await,
        Some(Commands::Whoami) => auth_commands::whoami(ctx),
        Some(Commands::List { query, tags, json }) => {
            link_commands::list(ctx, query, tags, json).await
        }
        Some(Commands::Tags { counts }) => tag_commands::show_tags(ctx, counts).await,
        Some(Commands::Add {
            url,
            title,
            description,
            tags,
        }) => link_commands::add(ctx, url, title, description, tags).await,
        Some(Commands::Edit {
            id,
            title,
            url,
            description,
            clear_description,
            tags,
        }) => {
            let changes = link_commands::EditArgs {
                title,
                url,
                description,
                clear_description,
                tags,
            };
            link_commands::edit(ctx, &id, changes).await
        }
        Some(Commands::Delete { id, yes }) => link_commands::delete(ctx, &id, yes).await,
        Some(Commands::Open { id }) => link_commands::open(ctx, &id).await,
        Some(Commands::Completion { shell }) => handle_completion(&shell),
        None => {
            debug!("No command given, listing links");
            link_commands::list(ctx, None, None, false).await
        }
    }
}

pub fn handle_completion(shell: &str) -> CliResult<()> {
    if let Some(hint) = completion::usage_hint(shell) {
        eprintln!("{}", hint);
    }

    completion::generate_completion(shell, &mut std::io::stdout()).map_err(|e| {
        CliError::InvalidInput(format!("Failed to generate completion script: {}", e))
    })
}
