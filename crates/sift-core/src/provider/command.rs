use crate::search::QueryMatcher;
use sift_types::SearchResult;
use std::sync::Arc;

/// Zero-argument action bound to a command
pub type CommandAction = Arc<dyn Fn() + Send + Sync>;

/// Entry of the command table
#[derive(Clone)]
pub struct Command {
    pub id: String,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    action: CommandAction,
}

impl Command {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        action: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            keywords: Vec::new(),
            action: Arc::new(action),
        }
    }

    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn invoke(&self) {
        (self.action)();
    }

    fn to_result(&self) -> SearchResult {
        SearchResult::Command {
            id: self.id.clone(),
            title: self.title.clone(),
            excerpt: self.description.clone(),
        }
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("keywords", &self.keywords)
            .finish_non_exhaustive()
    }
}

/// Fixed command table, in declaration order
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    commands: Vec<Command>,
}

impl CommandTable {
    #[must_use]
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every command, for the blank-query landing view
    #[must_use]
    pub fn all(&self) -> Vec<SearchResult> {
        self.commands.iter().map(Command::to_result).collect()
    }

    /// Commands whose title, description or keywords contain the query
    pub fn search(&self, matcher: &mut QueryMatcher) -> Vec<SearchResult> {
        self.commands
            .iter()
            .filter(|c| {
                matcher.matches_any(
                    [c.title.as_str(), c.description.as_str()]
                        .into_iter()
                        .chain(c.keywords.iter().map(String::as_str)),
                )
            })
            .map(Command::to_result)
            .collect()
    }
}
