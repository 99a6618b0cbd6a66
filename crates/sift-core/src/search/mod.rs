mod matcher;

pub use matcher::QueryMatcher;
