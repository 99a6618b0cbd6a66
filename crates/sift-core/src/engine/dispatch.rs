use super::QueryController;
use sift_types::{ActionRef, PaletteUpdate, SearchResult, Target};
use tracing::{debug, warn};

impl QueryController {
    /// Dispatch the highlighted row, if any
    pub fn dispatch_selected(&mut self) {
        let Some(result) = self
            .state
            .selection
            .index()
            .and_then(|index| self.state.results.get(index))
            .cloned()
        else {
            debug!("Nothing selected to dispatch");
            return;
        };

        self.dispatch(&result);
    }

    /// Run the row's single dispatch target, then ask the front-end to close.
    ///
    /// Content rows record the live query in history first. Commands and
    /// history rows never do.
    pub fn dispatch(&mut self, result: &SearchResult) {
        debug!("Dispatching {} '{}'", result.kind().label(), result.title());

        match result.target() {
            Target::Navigate(path) => {
                self.record_query(result);
                self.send_update(PaletteUpdate::Navigate {
                    path: path.to_string(),
                });
            }
            Target::External(url) => {
                self.record_query(result);
                self.send_update(PaletteUpdate::OpenExternal {
                    url: url.to_string(),
                });
            }
            Target::Action(ActionRef::RunCommand(id)) => match self.commands.get(id) {
                Some(command) => command.invoke(),
                None => warn!("Command '{}' is not registered", id),
            },
            Target::Action(ActionRef::ReplayQuery(query)) => {
                self.send_update(PaletteUpdate::QueryReplaced {
                    query: query.to_string(),
                });
                self.set_query(query);
            }
        }

        self.send_update(PaletteUpdate::RequestClose);
    }

    fn record_query(&mut self, result: &SearchResult) {
        if result.kind().records_history() {
            self.history.record(&self.state.query);
        }
    }
}
