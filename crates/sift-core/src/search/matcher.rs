use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// Case-insensitive substring predicate shared by all local providers.
///
/// The query is trimmed and matched literally (inner whitespace included),
/// so "json format" only matches text containing that exact phrase.
pub struct QueryMatcher {
    needle: String,
    atom: Atom,
    matcher: Matcher,
    buf: Vec<char>,
}

impl QueryMatcher {
    /// Build a matcher for `query`. Returns `None` for blank queries.
    #[must_use]
    pub fn new(query: &str) -> Option<Self> {
        let needle = query.trim();
        if needle.is_empty() {
            return None;
        }

        let atom = Atom::new(
            needle,
            CaseMatching::Ignore,
            Normalization::Never,
            AtomKind::Substring,
            false,
        );

        Some(Self {
            needle: needle.to_string(),
            atom,
            matcher: Matcher::new(Config::DEFAULT),
            buf: Vec::new(),
        })
    }

    /// The trimmed query
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub fn is_match(&mut self, text: &str) -> bool {
        let haystack = Utf32Str::new(text, &mut self.buf);
        self.atom.score(haystack, &mut self.matcher).is_some()
    }

    /// True if any of `fields` contains the query
    pub fn matches_any<'a, I>(&mut self, fields: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        fields.into_iter().any(|field| self.is_match(field))
    }
}

impl std::fmt::Debug for QueryMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryMatcher")
            .field("needle", &self.needle)
            .finish_non_exhaustive()
    }
}
