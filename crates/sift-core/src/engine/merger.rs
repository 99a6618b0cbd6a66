use sift_types::SearchResult;

/// Output of every provider for one committed query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderOutput {
    pub history: Vec<SearchResult>,
    pub docs: Vec<SearchResult>,
    pub blogs: Vec<SearchResult>,
    pub tools: Vec<SearchResult>,
    pub links: Vec<SearchResult>,
    pub commands: Vec<SearchResult>,
}

/// Concatenates provider outputs in a fixed category order.
///
/// Committed query: History, Docs, Blog, Tools, Links, Commands.
/// Blank query: Commands, History.
/// Provider order is kept inside each category; nothing is re-ranked.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultMerger {
    max_per_category: Option<usize>,
}

impl ResultMerger {
    #[must_use]
    pub fn new(max_per_category: Option<usize>) -> Self {
        Self { max_per_category }
    }

    #[must_use]
    pub fn merge(&self, output: ProviderOutput) -> Vec<SearchResult> {
        let ProviderOutput {
            history,
            docs,
            blogs,
            tools,
            links,
            commands,
        } = output;
        self.concat([history, docs, blogs, tools, links, commands])
    }

    /// Landing view for the blank query
    #[must_use]
    pub fn merge_landing(
        &self,
        commands: Vec<SearchResult>,
        history: Vec<SearchResult>,
    ) -> Vec<SearchResult> {
        self.concat([commands, history])
    }

    fn concat<const N: usize>(&self, categories: [Vec<SearchResult>; N]) -> Vec<SearchResult> {
        let cap = self.max_per_category.unwrap_or(usize::MAX);
        categories
            .into_iter()
            .flat_map(|category| category.into_iter().take(cap))
            .collect()
    }
}
