// src/cli/display.rs
use std::fmt::Write as _;
use std::io::{self, Write};

use chrono::{DateTime, Utc};
use crossterm::style::Stylize;
use tracing::warn;

use crate::application::dashboard::EmptyState;
use crate::config::{DisplaySettings, DEFAULT_DATE_FORMAT};
use crate::domain::link::Link;

/// Rendering options for link cards
#[derive(Debug, Clone)]
pub struct CardStyle {
    pub date_format: String,
    pub show_ids: bool,
    pub color: bool,
}

impl CardStyle {
    pub fn new(settings: &DisplaySettings, color: bool) -> Self {
        Self {
            date_format: settings.date_format.clone(),
            show_ids: settings.show_ids,
            color,
        }
    }
}

/// Format with the configured pattern, falling back to the default one if chrono rejects it
fn format_date(created_at: &DateTime<Utc>, format: &str) -> String {
    let mut rendered = String::new();
    if write!(rendered, "{}", created_at.format(format)).is_err() {
        warn!("Invalid date format '{}', using '{}'", format, DEFAULT_DATE_FORMAT);
        return created_at.format(DEFAULT_DATE_FORMAT).to_string();
    }
    rendered
}

/// One card per link: title and short id, host and url, description, tags, creation date.
pub fn render_card(index: usize, width: usize, link: &Link, style: &CardStyle) -> String {
    let mut card = String::new();
    let pad = " ".repeat(width);

    let title = if style.color {
        link.title.as_str().green().bold().to_string()
    } else {
        link.title.clone()
    };
    card.push_str(&format!("{:width$}. {}", index, title));
    if style.show_ids {
        card.push_str(&format!(" [{}]", link.id.short()));
    }
    card.push('\n');

    let location = match link.host() {
        Some(host) if host != link.url => format!("{} | {}", host, link.url),
        _ => link.url.clone(),
    };
    let location = if style.color {
        location.yellow().to_string()
    } else {
        location
    };
    card.push_str(&format!("{}  {}\n", pad, location));

    if let Some(description) = &link.description {
        card.push_str(&format!("{}  {}\n", pad, description));
    }

    if !link.tags.is_empty() {
        let tags = link
            .tags
            .iter()
            .map(|t| format!("#{}", t.value()))
            .collect::<Vec<_>>()
            .join(" ");
        let tags = if style.color {
            tags.blue().to_string()
        } else {
            tags
        };
        card.push_str(&format!("{}  {}\n", pad, tags));
    }

    let added = format!("Added {}", format_date(&link.created_at, &style.date_format));
    let added = if style.color {
        added.dark_grey().to_string()
    } else {
        added
    };
    card.push_str(&format!("{}  {}\n", pad, added));

    card
}

pub fn show_links<W: Write>(out: &mut W, links: &[Link], style: &CardStyle) -> io::Result<()> {
    let width = links.len().to_string().len();
    for (i, link) in links.iter().enumerate() {
        writeln!(out, "{}", render_card(i + 1, width, link, style))?;
    }
    out.flush()
}

pub fn show_empty_state<W: Write>(out: &mut W, state: EmptyState, color: bool) -> io::Result<()> {
    if color {
        writeln!(out, "{}", state.title().bold())?;
    } else {
        writeln!(out, "{}", state.title())?;
    }
    writeln!(out, "{}", state.hint())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::link::LinkId;
    use crate::domain::tag::Tag;
    use chrono::{TimeZone, Utc};

    fn plain() -> CardStyle {
        CardStyle::new(&DisplaySettings::default(), false)
    }

    fn sample() -> Link {
        Link::from_storage(
            LinkId::new("5c1d9a0e-1111-4000-8000-000000000001"),
            "React Docs".to_string(),
            "https://react.dev/learn".to_string(),
            Some("Learn React".to_string()),
            vec![Tag::new("dev").unwrap(), Tag::new("frontend").unwrap()],
            Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn given_link_when_render_card_then_shows_all_parts() {
        let card = render_card(1, 1, &sample(), &plain());

        assert_eq!(
            card,
            "1. React Docs [5c1d9a0e]\n   react.dev | https://react.dev/learn\n   Learn React\n   #dev #frontend\n   Added Jan 5, 2024\n"
        );
    }

    #[test]
    fn given_hidden_ids_and_bare_link_when_render_card_then_omits_optional_lines() {
        let mut link = sample();
        link.description = None;
        link.tags.clear();
        let style = CardStyle {
            show_ids: false,
            ..plain()
        };

        let card = render_card(2, 1, &link, &style);

        assert!(card.starts_with("2. React Docs\n"));
        assert!(!card.contains('#'));
        assert!(!card.contains("Learn React"));
    }

    #[test]
    fn given_unparsable_url_when_render_card_then_shows_url_only() {
        let mut link = sample();
        link.url = "not a url".to_string();

        let card = render_card(1, 1, &link, &plain());

        assert!(card.contains("   not a url\n"));
        assert!(!card.contains(" | "));
    }

    #[test]
    fn given_unrenderable_date_format_when_render_card_then_falls_back_to_default() {
        let style = CardStyle {
            date_format: "%Q".to_string(),
            ..plain()
        };

        let card = render_card(1, 1, &sample(), &style);

        assert!(card.ends_with("   Added Jan 5, 2024\n"));
    }

    #[test]
    fn given_empty_state_when_show_then_prints_title_and_hint() -> io::Result<()> {
        let mut out = Vec::new();
        show_empty_state(&mut out, EmptyState::NoMatches, false)?;

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "No matching links\nTry adjusting your search or filters\n");
        Ok(())
    }
}
