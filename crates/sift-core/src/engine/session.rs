use super::{QueryController, RemoteFetch};
use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use sift_types::PaletteEvent;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::Instant;
use tracing::debug;

/// Drive a controller until the event channel closes.
///
/// Emits the landing view first, then multiplexes front-end events, the
/// debounce deadline and remote fetches in flight. Events win ties so a
/// keystroke landing on the deadline restarts the window. Superseded fetches
/// are left to finish and discarded on arrival.
///
/// Returns the controller so callers can inspect the final state.
pub async fn run_session(
    mut controller: QueryController,
    mut events: UnboundedReceiver<PaletteEvent>,
) -> QueryController {
    let mut in_flight: FuturesUnordered<RemoteFetch> = FuturesUnordered::new();
    controller.start();

    loop {
        let deadline = controller.deadline();

        tokio::select! {
            biased;

            event = events.recv() => {
                let Some(event) = event else {
                    break;
                };
                controller.process(event);
            }

            () = wait_until(deadline) => {
                if let Some(ticket) = controller.commit() {
                    debug!("Fetching remote results for '{}'", ticket.query);
                    in_flight.push(controller.fetch(ticket));
                }
            }

            Some((generation, outcome)) = in_flight.next(), if !in_flight.is_empty() => {
                controller.resolve(generation, outcome);
            }
        }
    }

    debug!("Palette session closed, {} fetches abandoned", in_flight.len());
    controller
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
