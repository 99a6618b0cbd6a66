//! Result providers.
//!
//! Three synchronous providers filter in-memory data (command table, static
//! catalogs, history) with the shared [`QueryMatcher`](crate::search::QueryMatcher);
//! the remote provider fetches doc and blog hits over HTTP.

pub mod catalog;
pub mod command;
pub mod history;
pub mod remote;

pub use catalog::{CatalogProvider, load_catalog};
pub use command::{Command, CommandTable};
pub use remote::{HttpRemoteSearch, RemoteSearch};
