// src/cli/link_commands.rs
use std::io::{self, Write};

use tracing::{debug, instrument};

use crate::cli::display::{render_card, show_empty_state, show_links, CardStyle};
use crate::cli::error::{CliError, CliResult};
use crate::cli::CommandContext;
use crate::domain::link::{LinkDraftBuilder, LinkUpdate};
use crate::domain::tag::Tag;
use crate::infrastructure::json::{write_links_as_json, JsonLinkView};
use crate::util::helper::{confirm, truncate};

/// Field changes requested by `edit`
#[derive(Debug, Default)]
pub struct EditArgs {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub clear_description: bool,
    pub tags: Option<String>,
}

impl EditArgs {
    /// Translate the flags into a partial update; `--tags ""` removes every tag.
    pub fn into_update(self) -> CliResult<LinkUpdate> {
        let mut update = LinkUpdate::new();
        if let Some(title) = self.title {
            update = update.with_title(title);
        }
        if let Some(url) = self.url {
            update = update.with_url(url);
        }
        if self.clear_description {
            update = update.with_description(None::<String>);
        } else if let Some(description) = self.description {
            update = update.with_description(Some(description));
        }
        if let Some(tags) = self.tags {
            let tags = Tag::parse_tags(&tags).map_err(|e| CliError::InvalidInput(e.to_string()))?;
            update = update.with_tags(tags);
        }

        if update.is_empty() {
            return Err(CliError::InvalidInput(
                "Nothing to change: use --title, --url, --description, --clear-description or --tags"
                    .to_string(),
            ));
        }
        Ok(update)
    }
}

fn parse_tag_filter(tags: Option<&str>) -> CliResult<Vec<Tag>> {
    Ok(Tag::parse_tag_option(tags)
        .map_err(|e| CliError::InvalidInput(e.to_string()))?
        .unwrap_or_default())
}

#[instrument(skip(ctx), level = "debug")]
pub async fn list(
    ctx: &CommandContext<'_>,
    query: Option<String>,
    tags: Option<String>,
    json: bool,
) -> CliResult<()> {
    let selected = parse_tag_filter(tags.as_deref())?;
    let mut dashboard = ctx.signed_in_dashboard().await?;

    if let Some(query) = query {
        dashboard.set_search(query);
    }
    for tag in selected {
        dashboard.select_tag(tag);
    }
    let visible = dashboard.visible_links();
    debug!("{} of {} links visible", visible.len(), dashboard.state().links.len());

    if json {
        let user = dashboard.current_user().ok_or(CliError::NotSignedIn)?;
        let views = JsonLinkView::from_domain_collection(&visible, &user.id);
        let mut stdout = io::stdout().lock();
        write_links_as_json(&mut stdout, &views)?;
        return Ok(());
    }

    let mut stderr = io::stderr().lock();
    match dashboard.empty_state() {
        Some(state) => show_empty_state(&mut stderr, state, ctx.color)?,
        None => {
            let style = CardStyle::new(&ctx.settings.display, ctx.color);
            show_links(&mut stderr, &visible, &style)?;
            writeln!(stderr, "{}", dashboard.summary())?;
        }
    }
    Ok(())
}

#[instrument(skip(ctx), level = "debug")]
pub async fn add(
    ctx: &CommandContext<'_>,
    url: String,
    title: Option<String>,
    description: Option<String>,
    tags: Option<String>,
) -> CliResult<()> {
    let tags = parse_tag_filter(tags.as_deref())?;
    let draft = LinkDraftBuilder::default()
        .title(title.unwrap_or_default())
        .url(url)
        .description(description.unwrap_or_default())
        .tags(tags)
        .build()
        .map_err(|e| CliError::InvalidInput(e.to_string()))?;

    let mut dashboard = ctx.services.dashboard();
    match dashboard.add_link(draft).await.map_err(CliError::Reported)? {
        Some(link) => {
            // the id goes to stdout so scripts can pick it up
            println!("{}", link.id);
            Ok(())
        }
        None => Err(CliError::NotSignedIn),
    }
}

#[instrument(skip(ctx, changes), level = "debug")]
pub async fn edit(ctx: &CommandContext<'_>, id: &str, changes: EditArgs) -> CliResult<()> {
    let update = changes.into_update()?;
    let mut dashboard = ctx.signed_in_dashboard().await?;
    let id = dashboard.find_link(id)?.id.clone();

    let updated = dashboard
        .update_link(&id, update)
        .await
        .map_err(CliError::Reported)?
        .ok_or(CliError::NotSignedIn)?;

    let style = CardStyle::new(&ctx.settings.display, ctx.color);
    eprint!("{}", render_card(1, 1, &updated, &style));
    Ok(())
}

#[instrument(skip(ctx), level = "debug")]
pub async fn delete(ctx: &CommandContext<'_>, id: &str, yes: bool) -> CliResult<()> {
    let mut dashboard = ctx.signed_in_dashboard().await?;
    let link = dashboard.find_link(id)?.clone();

    let prompt = format!(
        "Delete '{}' ({})?",
        truncate(&link.title, 60),
        truncate(&link.url, 80)
    );
    if !yes && !confirm(&prompt)? {
        return Err(CliError::OperationAborted);
    }

    if !dashboard
        .delete_link(&link.id)
        .await
        .map_err(CliError::Reported)?
    {
        return Err(CliError::NotSignedIn);
    }
    Ok(())
}

#[instrument(skip(ctx), level = "debug")]
pub async fn open(ctx: &CommandContext<'_>, id: &str) -> CliResult<()> {
    let dashboard = ctx.signed_in_dashboard().await?;
    let url = dashboard.find_link(id)?.url.clone();

    debug!("Opening {}", url);
    open::that(&url).map_err(|e| CliError::CommandFailed(format!("Failed to open {}: {}", url, e)))
}
