use crate::types::{CuratorError, FeedEntry, Result};
use feed_rs::parser;
use tracing::{debug, info};

/// Parse feed XML into candidate entries. Entries missing a title or a
/// link are skipped.
pub fn parse_entries(content: &str) -> Result<Vec<FeedEntry>> {
    debug!("Parsing feed content ({} bytes)", content.len());

    let feed = parser::parse(content.as_bytes())
        .map_err(|e| CuratorError::FeedParse(format!("Failed to parse feed: {}", e)))?;

    let entries: Vec<FeedEntry> = feed.entries.into_iter().filter_map(to_entry).collect();

    info!("Parsed feed with {} entries", entries.len());
    Ok(entries)
}

/// Parse feed XML and return the entry titles, for the published-title
/// snapshot.
pub fn parse_titles(content: &str) -> Result<Vec<String>> {
    let feed = parser::parse(content.as_bytes())
        .map_err(|e| CuratorError::FeedParse(format!("Failed to parse feed: {}", e)))?;

    Ok(feed
        .entries
        .into_iter()
        .filter_map(|entry| entry.title.map(|t| t.content))
        .collect())
}

fn to_entry(entry: feed_rs::model::Entry) -> Option<FeedEntry> {
    let title = entry.title.map(|t| t.content)?;
    let link = entry.links.first()?.href.clone();
    Some(FeedEntry { title, link })
}
