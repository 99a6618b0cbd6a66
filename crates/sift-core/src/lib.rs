pub mod config;
pub mod provider;
pub mod storage;

// Exposed for front-ends that filter locally - not part of stable API
#[doc(hidden)]
pub mod search;

mod engine;
mod error;
mod history;

#[cfg(test)]
mod tests;

pub use engine::{
    Phase, ProviderOutput, QueryController, RemoteFetch, RemoteTicket, ResultMerger, Selection,
    run_session,
};
pub use error::{Error, Result};
pub use history::{DEFAULT_HISTORY_LIMIT, HISTORY_KEY, HistoryStore};

pub use sift_types::*;
