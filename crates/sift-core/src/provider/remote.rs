use crate::config::RemoteConfig;
use crate::{Error, Result};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use sift_types::{RemoteHit, RemoteResponse, SearchResult};
use tracing::trace;

/// Asynchronous full-text search over docs and blog posts.
///
/// The returned future must not borrow `self`; the controller keeps it in
/// flight while it continues to accept keystrokes.
pub trait RemoteSearch: Send + Sync {
    fn search(&self, query: &str) -> BoxFuture<'static, Result<Vec<RemoteHit>>>;
}

/// `GET {baseUrl}{endpoint}?q=<query>`
#[derive(Debug, Clone)]
pub struct HttpRemoteSearch {
    client: reqwest::Client,
    url: String,
}

impl HttpRemoteSearch {
    /// Build a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: config.search_url(),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RemoteSearch for HttpRemoteSearch {
    fn search(&self, query: &str) -> BoxFuture<'static, Result<Vec<RemoteHit>>> {
        let request = self.client.get(&self.url).query(&[("q", query)]);

        async move {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(Error::Remote(format!("endpoint returned {status}")));
            }

            let body: RemoteResponse = response.json().await?;
            trace!("Remote search returned {} hits", body.results.len());
            Ok(body.results)
        }
        .boxed()
    }
}

/// Split remote hits into (docs, blogs), preserving endpoint order.
/// Tool and link hits are dropped.
#[must_use]
pub fn split_hits(hits: Vec<RemoteHit>) -> (Vec<SearchResult>, Vec<SearchResult>) {
    hits.into_iter()
        .filter_map(RemoteHit::into_result)
        .partition(|result| matches!(result, SearchResult::Doc { .. }))
}
