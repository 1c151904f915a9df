// src/infrastructure/json.rs

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::link::Link;
use crate::domain::user::UserId;
use serde::Serialize;
use std::io::Write;

/// Persisted record shape of a link, for JSON output
#[derive(Debug, Serialize)]
pub struct JsonLinkView {
    pub id: String,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub created_at: String,
    pub user_id: String,
}

impl JsonLinkView {
    pub fn from_domain(link: &Link, owner: &UserId) -> Self {
        Self {
            id: link.id.to_string(),
            title: link.title.clone(),
            url: link.url.clone(),
            description: link.description.clone(),
            tags: link.tags.iter().map(|tag| tag.value().to_string()).collect(),
            created_at: link.created_at.to_rfc3339(),
            user_id: owner.to_string(),
        }
    }

    pub fn from_domain_collection(links: &[Link], owner: &UserId) -> Vec<Self> {
        links.iter().map(|link| Self::from_domain(link, owner)).collect()
    }
}

/// Serialize the views as a pretty JSON array to `out`
pub fn write_links_as_json<W: Write>(out: &mut W, views: &[JsonLinkView]) -> DomainResult<()> {
    let json = serde_json::to_string_pretty(&views).map_err(|e| {
        DomainError::SerializationError(format!("Failed to serialize links to JSON: {}", e))
    })?;

    writeln!(out, "{}", json)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::link_with;

    #[test]
    fn given_links_when_write_json_then_emits_record_shape() {
        let owner = UserId::new("user-1");
        let link = link_with("React", "https://react.dev", &["js", "ui"]);
        let views = JsonLinkView::from_domain_collection(std::slice::from_ref(&link), &owner);

        let mut out = Vec::new();
        write_links_as_json(&mut out, &views).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();

        let record = &parsed[0];
        assert_eq!(record["id"], link.id.as_str());
        assert_eq!(record["title"], "React");
        assert_eq!(record["url"], "https://react.dev");
        assert!(record["description"].is_null());
        assert_eq!(record["tags"], serde_json::json!(["js", "ui"]));
        assert_eq!(record["user_id"], "user-1");
        assert!(record["created_at"].as_str().unwrap().contains('T'));
    }
}
