//! Shared types for sift palette components.
//!
//! This crate provides the types exchanged between sift-core and its
//! front-ends: the merged result rows, the inbound events a front-end sends,
//! the outbound updates it renders, and the wire formats of the static
//! catalogs and the remote search endpoint. Everything is serializable so a
//! front-end can forward updates over any transport.

use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize a Vec that may be null or missing (both become empty vec)
fn deserialize_null_as_empty_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Events sent from a front-end to the palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaletteEvent {
    /// Query text changed (every keystroke)
    QueryChanged { query: String },

    /// Navigation key pressed while the palette has focus
    Key { key: NavKey },

    /// Pointer moved over a row
    Hover { index: usize },

    /// Row clicked
    Activate { index: usize },

    /// Forget one recorded query
    RemoveHistory { query: String },

    /// Forget every recorded query
    ClearHistory,
}

/// Keys the palette consumes. Everything else belongs to the text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    Enter,
}

/// Updates sent from the palette to a front-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaletteUpdate {
    /// Result list replaced (never patched)
    ResultsChanged { results: Vec<SearchResult> },

    /// Loading state changed
    LoadingChanged { loading: bool },

    /// Selected row changed; `None` when the list is empty
    SelectionChanged { index: Option<usize> },

    /// Navigate the current view to a site path
    Navigate { path: String },

    /// Open a URL in a new context, keeping the current view
    OpenExternal { url: String },

    /// Query text replaced by the palette (history replay)
    QueryReplaced { query: String },

    /// Close the search surface
    RequestClose,
}

impl PaletteUpdate {
    /// Create a results update
    #[must_use]
    pub fn results(results: Vec<SearchResult>) -> Self {
        Self::ResultsChanged { results }
    }
}

/// Category of a result row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Tool,
    Navigation,
    Doc,
    Blog,
    Command,
    History,
}

impl ResultKind {
    /// Short label used for section headers
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Tool => "Tool",
            Self::Navigation => "Link",
            Self::Doc => "Doc",
            Self::Blog => "Blog",
            Self::Command => "Command",
            Self::History => "Recent",
        }
    }

    /// Whether dispatching a row of this kind records the live query.
    /// Commands and history replays never do.
    #[must_use]
    pub fn records_history(self) -> bool {
        !matches!(self, Self::Command | Self::History)
    }
}

/// One row of the merged result list.
///
/// The variant alone decides how the row is dispatched, see [`SearchResult::target`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchResult {
    /// Self-hosted tool page
    Tool {
        title: String,
        excerpt: String,
        path: String,
    },

    /// External link, opened in a new context
    Navigation {
        title: String,
        excerpt: String,
        url: String,
    },

    /// Documentation page from the remote index
    Doc {
        title: String,
        excerpt: String,
        path: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        highlights: Vec<String>,
    },

    /// Blog post from the remote index
    Blog {
        title: String,
        excerpt: String,
        path: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        highlights: Vec<String>,
    },

    /// Entry of the command table
    Command {
        id: String,
        title: String,
        excerpt: String,
    },

    /// Previously committed query
    History { query: String },
}

/// How a result is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// Replace the current view with a site path
    Navigate(&'a str),
    /// Open a URL elsewhere
    External(&'a str),
    /// Run a zero-argument action
    Action(ActionRef<'a>),
}

/// Action bound to a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRef<'a> {
    /// Invoke the command with this id
    RunCommand(&'a str),
    /// Put this text back into the query field
    ReplayQuery(&'a str),
}

impl SearchResult {
    #[must_use]
    pub fn kind(&self) -> ResultKind {
        match self {
            Self::Tool { .. } => ResultKind::Tool,
            Self::Navigation { .. } => ResultKind::Navigation,
            Self::Doc { .. } => ResultKind::Doc,
            Self::Blog { .. } => ResultKind::Blog,
            Self::Command { .. } => ResultKind::Command,
            Self::History { .. } => ResultKind::History,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Tool { title, .. }
            | Self::Navigation { title, .. }
            | Self::Doc { title, .. }
            | Self::Blog { title, .. }
            | Self::Command { title, .. } => title,
            Self::History { query } => query,
        }
    }

    #[must_use]
    pub fn excerpt(&self) -> &str {
        match self {
            Self::Tool { excerpt, .. }
            | Self::Navigation { excerpt, .. }
            | Self::Doc { excerpt, .. }
            | Self::Blog { excerpt, .. }
            | Self::Command { excerpt, .. } => excerpt,
            Self::History { .. } => "",
        }
    }

    /// The single dispatch mechanism of this row
    #[must_use]
    pub fn target(&self) -> Target<'_> {
        match self {
            Self::Tool { path, .. } | Self::Doc { path, .. } | Self::Blog { path, .. } => {
                Target::Navigate(path)
            }
            Self::Navigation { url, .. } => Target::External(url),
            Self::Command { id, .. } => Target::Action(ActionRef::RunCommand(id)),
            Self::History { query } => Target::Action(ActionRef::ReplayQuery(query)),
        }
    }
}

/// Static tool catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_null_as_empty_vec")]
    pub tags: Vec<String>,
}

/// Static external link catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDescriptor {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_null_as_empty_vec")]
    pub tags: Vec<String>,
}

/// Both static catalogs, as stored in `catalog.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, deserialize_with = "deserialize_null_as_empty_vec")]
    pub tools: Vec<ToolDescriptor>,
    #[serde(default, deserialize_with = "deserialize_null_as_empty_vec")]
    pub links: Vec<LinkDescriptor>,
}

/// Hit type reported by the remote search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteKind {
    Doc,
    Blog,
    Tool,
    Link,
    #[serde(other)]
    Unknown,
}

/// One hit of `GET /api/search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteHit {
    #[serde(rename = "type")]
    pub kind: RemoteKind,
    pub title: String,
    pub path: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default, deserialize_with = "deserialize_null_as_empty_vec")]
    pub highlights: Vec<String>,
}

/// Body of `GET /api/search`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteResponse {
    #[serde(default, deserialize_with = "deserialize_null_as_empty_vec")]
    pub results: Vec<RemoteHit>,
}

impl RemoteHit {
    /// Convert into a result row. Only doc and blog hits are kept;
    /// tools and links come from the local catalogs instead.
    #[must_use]
    pub fn into_result(self) -> Option<SearchResult> {
        match self.kind {
            RemoteKind::Doc => Some(SearchResult::Doc {
                title: self.title,
                excerpt: self.excerpt,
                path: self.path,
                highlights: self.highlights,
            }),
            RemoteKind::Blog => Some(SearchResult::Blog {
                title: self.title,
                excerpt: self.excerpt,
                path: self.path,
                highlights: self.highlights,
            }),
            RemoteKind::Tool | RemoteKind::Link | RemoteKind::Unknown => None,
        }
    }
}
