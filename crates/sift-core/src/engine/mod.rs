mod dispatch;
mod merger;
mod selection;
mod session;

pub use merger::{ProviderOutput, ResultMerger};
pub use selection::Selection;
pub use session::run_session;

use crate::Result;
use crate::config::{Config, Directories, SearchConfig};
use crate::history::HistoryStore;
use crate::provider::remote::split_hits;
use crate::provider::{
    self, CatalogProvider, CommandTable, HttpRemoteSearch, RemoteSearch, load_catalog,
};
use crate::search::QueryMatcher;
use crate::storage::JsonFileStore;
use futures_util::FutureExt;
use futures_util::future::{self, BoxFuture};
use sift_types::{NavKey, PaletteEvent, PaletteUpdate, RemoteHit, SearchResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Where the controller is in the debounce / fetch cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Blank query, landing view shown
    #[default]
    Idle,
    /// Waiting for the debounce window to close
    Pending,
    /// Committed, remote fetch in flight
    Loading,
    /// Results for the last commit are shown
    Settled,
}

/// A remote fetch requested by [`QueryController::commit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTicket {
    pub generation: u64,
    pub query: String,
}

/// Fetch future tagged with the generation it was issued for
pub type RemoteFetch = BoxFuture<'static, (u64, Result<Vec<RemoteHit>>)>;

/// Local provider output held until the remote half of the same commit lands
#[derive(Debug)]
struct PendingCommit {
    generation: u64,
    output: ProviderOutput,
}

#[derive(Debug, Default)]
struct QueryState {
    query: String,
    phase: Phase,

    /// Bumped on every commit and every blank query; responses tagged with
    /// an older value are stale
    generation: u64,

    loading: bool,
    deadline: Option<Instant>,
    pending: Option<PendingCommit>,
    results: Vec<SearchResult>,
    selection: Selection,
}

/// Debounced query controller.
///
/// Owns the live query, the result snapshot and the selection. Front-ends
/// feed it [`PaletteEvent`]s and render the [`PaletteUpdate`]s it emits; the
/// timer and remote futures are driven by [`run_session`].
pub struct QueryController {
    commands: CommandTable,
    catalog: CatalogProvider,
    remote: Option<Arc<dyn RemoteSearch>>,
    history: HistoryStore,
    merger: ResultMerger,
    debounce: Duration,
    state: QueryState,

    /// Channel to send updates to the front-end
    update_tx: UnboundedSender<PaletteUpdate>,
}

impl QueryController {
    /// Create a controller over the given providers.
    /// Returns the controller and a receiver for updates.
    pub fn new(
        commands: CommandTable,
        catalog: CatalogProvider,
        history: HistoryStore,
        remote: Option<Arc<dyn RemoteSearch>>,
        search: &SearchConfig,
    ) -> (Self, UnboundedReceiver<PaletteUpdate>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                commands,
                catalog,
                remote,
                history,
                merger: ResultMerger::new(search.max_per_category),
                debounce: search.debounce(),
                state: QueryState::default(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Create a controller backed by the on-disk catalog and history and,
    /// when enabled, the HTTP search endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn open(
        dirs: &Directories,
        config: &Config,
        commands: CommandTable,
    ) -> Result<(Self, UnboundedReceiver<PaletteUpdate>)> {
        let catalog = match load_catalog(&dirs.catalog_file) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("Failed to load catalog: {}", e);
                sift_types::Catalog::default()
            }
        };

        let history = HistoryStore::load(
            Box::new(JsonFileStore::new(&dirs.state_file)),
            config.search.history_limit,
        );

        let remote: Option<Arc<dyn RemoteSearch>> = if config.remote.enabled {
            let http = HttpRemoteSearch::new(&config.remote)?;
            debug!("Remote search at {}", http.url());
            Some(Arc::new(http))
        } else {
            debug!("Remote search disabled");
            None
        };

        Ok(Self::new(
            commands,
            CatalogProvider::new(catalog),
            history,
            remote,
            &config.search,
        ))
    }

    /// Emit the landing view for the initial blank query
    pub fn start(&mut self) {
        info!(
            "Palette opened: {} commands, {} history entries",
            self.commands.len(),
            self.history.len()
        );
        self.show_landing();
    }

    /// Process an event from the front-end
    pub fn process(&mut self, event: PaletteEvent) {
        debug!("Processing event: {:?}", event);

        match event {
            PaletteEvent::QueryChanged { query } => self.set_query(query),
            PaletteEvent::Key { key } => self.handle_key(key),
            PaletteEvent::Hover { index } => self.hover(index),
            PaletteEvent::Activate { index } => self.activate(index),
            PaletteEvent::RemoveHistory { query } => self.remove_history(&query),
            PaletteEvent::ClearHistory => self.clear_history(),
        }
    }

    /// Replace the live query.
    ///
    /// A blank query shows the landing view immediately and invalidates any
    /// fetch in flight. Anything else restarts the debounce window.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();

        if self.state.query.trim().is_empty() {
            self.state.deadline = None;
            self.supersede();
            self.show_landing();
            self.state.phase = Phase::Idle;
            return;
        }

        self.state.deadline = Some(Instant::now() + self.debounce);
        self.state.phase = Phase::Pending;
    }

    /// When the pending debounce window closes, if one is open
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.state.deadline
    }

    /// Commit the live query: run the local providers now and hand back the
    /// remote fetch to issue, if any.
    ///
    /// Without a remote provider the commit settles immediately.
    pub fn commit(&mut self) -> Option<RemoteTicket> {
        self.state.deadline = None;
        let mut matcher = QueryMatcher::new(&self.state.query)?;

        self.state.generation = self.state.generation.wrapping_add(1);
        let generation = self.state.generation;

        let output = ProviderOutput {
            history: provider::history::search(&self.history, &mut matcher),
            tools: self.catalog.tools(&mut matcher),
            links: self.catalog.links(&mut matcher),
            commands: self.commands.search(&mut matcher),
            ..ProviderOutput::default()
        };
        debug!(
            "Committed '{}' (generation {}): {} history, {} tools, {} links, {} commands",
            matcher.needle(),
            generation,
            output.history.len(),
            output.tools.len(),
            output.links.len(),
            output.commands.len()
        );

        if self.remote.is_none() {
            let results = self.merger.merge(output);
            self.replace_results(results);
            self.state.phase = Phase::Settled;
            return None;
        }

        if let Some(previous) = self.state.pending.replace(PendingCommit { generation, output }) {
            debug!("Superseding generation {}", previous.generation);
        }
        self.state.phase = Phase::Loading;
        self.set_loading(true);

        Some(RemoteTicket {
            generation,
            query: matcher.needle().to_string(),
        })
    }

    /// Build the fetch future for a ticket. It does not borrow the controller.
    #[must_use]
    pub fn fetch(&self, ticket: RemoteTicket) -> RemoteFetch {
        let generation = ticket.generation;
        match &self.remote {
            Some(remote) => remote
                .search(&ticket.query)
                .map(move |outcome| (generation, outcome))
                .boxed(),
            None => future::ready((generation, Ok(Vec::new()))).boxed(),
        }
    }

    /// Settle a commit with its remote outcome.
    ///
    /// Returns false when the response belongs to a superseded commit and
    /// was discarded. A failed fetch settles with local results only.
    pub fn resolve(&mut self, generation: u64, outcome: Result<Vec<RemoteHit>>) -> bool {
        if generation != self.state.generation {
            debug!(
                "Discarding stale response for generation {} (current {})",
                generation, self.state.generation
            );
            return false;
        }

        let Some(pending) = self.state.pending.take() else {
            debug!("No pending commit for generation {}", generation);
            return false;
        };

        let mut output = pending.output;
        match outcome {
            Ok(hits) => {
                let (docs, blogs) = split_hits(hits);
                output.docs = docs;
                output.blogs = blogs;
            }
            Err(e) => warn!("Remote search failed, showing local results: {}", e),
        }

        let results = self.merger.merge(output);
        self.replace_results(results);
        self.set_loading(false);

        if self.state.deadline.is_none() {
            self.state.phase = Phase::Settled;
        }
        true
    }

    /// Commit `query` right away and wait for its remote half.
    /// Used by one-shot front-ends that have no timer to drive.
    pub async fn search_now(&mut self, query: &str) -> &[SearchResult] {
        self.set_query(query);
        if let Some(ticket) = self.commit() {
            let (generation, outcome) = self.fetch(ticket).await;
            self.resolve(generation, outcome);
        }
        &self.state.results
    }

    pub fn handle_key(&mut self, key: NavKey) {
        match key {
            NavKey::ArrowDown => {
                if let Some(index) = self.state.selection.select_next() {
                    self.send_selection(Some(index));
                }
            }
            NavKey::ArrowUp => {
                if let Some(index) = self.state.selection.select_previous() {
                    self.send_selection(Some(index));
                }
            }
            NavKey::Enter => self.dispatch_selected(),
        }
    }

    /// Pointer moved onto row `index`
    pub fn hover(&mut self, index: usize) {
        let before = self.state.selection.index();
        if !self.state.selection.select(index) {
            debug!(
                "Ignoring hover on row {} ({} rows)",
                index,
                self.state.selection.len()
            );
            return;
        }
        if before != Some(index) {
            self.send_selection(Some(index));
        }
    }

    /// Pointer clicked row `index`
    pub fn activate(&mut self, index: usize) {
        if index >= self.state.selection.len() {
            debug!(
                "Ignoring activation of row {} ({} rows)",
                index,
                self.state.selection.len()
            );
            return;
        }
        self.hover(index);
        self.dispatch_selected();
    }

    /// Forget one history entry and refresh the landing view if shown
    pub fn remove_history(&mut self, query: &str) {
        self.history.remove(query);
        debug!("Removed {:?} from search history", query);

        if self.state.query.trim().is_empty() {
            self.show_landing();
        }
    }

    /// Forget every history entry and refresh the landing view if shown
    pub fn clear_history(&mut self) {
        self.history.clear();
        info!("Search history cleared");

        if self.state.query.trim().is_empty() {
            self.show_landing();
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.state.query
    }

    #[must_use]
    pub fn results(&self) -> &[SearchResult] {
        &self.state.results
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.state.selection.index()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    fn show_landing(&mut self) {
        let results = self
            .merger
            .merge_landing(self.commands.all(), provider::history::all(&self.history));
        self.replace_results(results);
    }

    /// Any fetch in flight is abandoned; its response will be stale
    fn supersede(&mut self) {
        self.state.generation = self.state.generation.wrapping_add(1);
        if let Some(pending) = self.state.pending.take() {
            debug!("Abandoning generation {}", pending.generation);
        }
        self.set_loading(false);
    }

    fn replace_results(&mut self, results: Vec<SearchResult>) {
        self.state.selection.reset(results.len());
        self.state.results.clone_from(&results);
        self.send_update(PaletteUpdate::results(results));
        self.send_selection(self.state.selection.index());
    }

    fn set_loading(&mut self, loading: bool) {
        if self.state.loading != loading {
            self.state.loading = loading;
            self.send_update(PaletteUpdate::LoadingChanged { loading });
        }
    }

    fn send_selection(&self, index: Option<usize>) {
        self.send_update(PaletteUpdate::SelectionChanged { index });
    }

    fn send_update(&self, update: PaletteUpdate) {
        if let Err(e) = self.update_tx.send(update) {
            error!("Failed to send update: {}", e);
        }
    }
}
