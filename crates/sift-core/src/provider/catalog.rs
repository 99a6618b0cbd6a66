use crate::Result;
use crate::search::QueryMatcher;
use sift_types::{Catalog, LinkDescriptor, SearchResult, ToolDescriptor};
use std::path::Path;
use tracing::debug;

/// Filters the static tool and link catalogs
#[derive(Debug, Clone, Default)]
pub struct CatalogProvider {
    tools: Vec<ToolDescriptor>,
    links: Vec<LinkDescriptor>,
}

impl CatalogProvider {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            tools: catalog.tools,
            links: catalog.links,
        }
    }

    /// Tools whose name, description or tags contain the query
    pub fn tools(&self, matcher: &mut QueryMatcher) -> Vec<SearchResult> {
        self.tools
            .iter()
            .filter(|t| {
                matcher.matches_any(
                    [t.name.as_str(), t.description.as_str()]
                        .into_iter()
                        .chain(t.tags.iter().map(String::as_str)),
                )
            })
            .map(|t| SearchResult::Tool {
                title: t.name.clone(),
                excerpt: t.description.clone(),
                path: t.path.clone(),
            })
            .collect()
    }

    /// External links whose title, description or tags contain the query
    pub fn links(&self, matcher: &mut QueryMatcher) -> Vec<SearchResult> {
        self.links
            .iter()
            .filter(|l| {
                matcher.matches_any(
                    [l.title.as_str(), l.description.as_str()]
                        .into_iter()
                        .chain(l.tags.iter().map(String::as_str)),
                )
            })
            .map(|l| SearchResult::Navigation {
                title: l.title.clone(),
                excerpt: l.description.clone(),
                url: l.url.clone(),
            })
            .collect()
    }
}

/// Load `catalog.json`. A missing file yields empty catalogs.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid catalog.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        debug!("Catalog not found at {}", path.display());
        return Ok(Catalog::default());
    }

    let content = std::fs::read_to_string(path)?;
    let catalog: Catalog = serde_json::from_str(&content)?;
    debug!(
        "Loaded catalog: {} tools, {} links",
        catalog.tools.len(),
        catalog.links.len()
    );
    Ok(catalog)
}
