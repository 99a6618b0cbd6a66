//! Tests for `run_session`: debounce timing and remote fan-out on virtual time

use super::fixtures::*;
use crate::run_session;
use sift_types::{NavKey, PaletteEvent, PaletteUpdate, RemoteKind, SearchResult};
use std::time::Duration;
use tokio::sync::mpsc;

fn query(text: &str) -> PaletteEvent {
    PaletteEvent::QueryChanged {
        query: text.to_string(),
    }
}

fn shown_titles(updates: &[PaletteUpdate]) -> Vec<Vec<String>> {
    updates
        .iter()
        .filter_map(|u| match u {
            PaletteUpdate::ResultsChanged { results } => Some(
                results
                    .iter()
                    .map(|r| SearchResult::title(r).to_string())
                    .collect(),
            ),
            _ => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_rapid_typing_commits_once() {
    let remote = FakeRemote::new();
    let h = make_controller(Some(remote.clone()), &[]);
    let (tx, rx) = mpsc::unbounded_channel();
    let session = tokio::spawn(run_session(h.controller, rx));

    tx.send(query("a")).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    tx.send(query("ab")).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    tx.send(query("abc")).unwrap();
    tokio::time::sleep(Duration::from_millis(1000)).await;

    drop(tx);
    let controller = session.await.unwrap();

    assert_eq!(remote.calls(), vec!["abc"]);
    assert!(titles(controller.results()).contains(&"abc guide"));
}

#[tokio::test(start_paused = true)]
async fn test_nothing_commits_inside_window() {
    let remote = FakeRemote::new();
    let h = make_controller(Some(remote.clone()), &[]);
    let (tx, rx) = mpsc::unbounded_channel();
    let session = tokio::spawn(run_session(h.controller, rx));

    tx.send(query("uuid")).unwrap();
    tokio::time::sleep(Duration::from_millis(299)).await;
    assert!(remote.calls().is_empty());

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(remote.calls(), vec!["uuid"]);

    drop(tx);
    session.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_late_response_never_overwrites_newer_query() {
    let remote = FakeRemote::new()
        .reply(
            "x",
            Duration::from_millis(500),
            FakeReply::Hits(vec![make_hit(RemoteKind::Doc, "x doc")]),
        )
        .reply(
            "y",
            Duration::from_millis(50),
            FakeReply::Hits(vec![make_hit(RemoteKind::Doc, "y doc")]),
        );
    let mut h = make_controller(Some(remote.clone()), &[]);
    let (tx, rx) = mpsc::unbounded_channel();
    let session = tokio::spawn(run_session(h.controller, rx));

    tx.send(query("x")).unwrap();
    tokio::time::sleep(Duration::from_millis(310)).await;
    tx.send(query("y")).unwrap();
    tokio::time::sleep(Duration::from_millis(2000)).await;

    drop(tx);
    let controller = session.await.unwrap();
    let updates = drain(&mut h.updates);

    assert_eq!(remote.calls(), vec!["x", "y"]);
    assert!(titles(controller.results()).contains(&"y doc"));
    assert!(
        shown_titles(&updates)
            .iter()
            .all(|shown| !shown.iter().any(|t| t == "x doc")),
        "Superseded response must never be shown"
    );
    assert_eq!(loading_changes(&updates), vec![true, false]);
}

#[tokio::test(start_paused = true)]
async fn test_blank_query_is_immediate_and_local() {
    let remote = FakeRemote::new();
    let mut h = make_controller(Some(remote.clone()), &["uuid"]);
    let (tx, rx) = mpsc::unbounded_channel();
    let session = tokio::spawn(run_session(h.controller, rx));

    tx.send(query("")).unwrap();
    tokio::time::sleep(Duration::from_millis(1000)).await;

    drop(tx);
    let controller = session.await.unwrap();
    let updates = drain(&mut h.updates);

    assert!(remote.calls().is_empty());
    assert_eq!(
        titles(controller.results()),
        vec!["Toggle theme", "Open settings", "uuid"]
    );
    assert!(loading_changes(&updates).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_clearing_query_abandons_fetch() {
    let remote = FakeRemote::new().reply(
        "slow",
        Duration::from_millis(500),
        FakeReply::Hits(vec![make_hit(RemoteKind::Doc, "slow doc")]),
    );
    let mut h = make_controller(Some(remote.clone()), &[]);
    let (tx, rx) = mpsc::unbounded_channel();
    let session = tokio::spawn(run_session(h.controller, rx));

    tx.send(query("slow")).unwrap();
    tokio::time::sleep(Duration::from_millis(310)).await;
    tx.send(query("")).unwrap();
    tokio::time::sleep(Duration::from_millis(1000)).await;

    drop(tx);
    let controller = session.await.unwrap();
    let updates = drain(&mut h.updates);

    assert_eq!(
        titles(controller.results()),
        vec!["Toggle theme", "Open settings"]
    );
    assert_eq!(loading_changes(&updates), vec![true, false]);
    assert!(
        shown_titles(&updates)
            .iter()
            .all(|shown| !shown.iter().any(|t| t == "slow doc"))
    );
}

#[tokio::test(start_paused = true)]
async fn test_remote_failure_still_settles() {
    let remote = FakeRemote::new().reply("test", Duration::from_millis(20), FakeReply::Fail);
    let mut h = make_controller(Some(remote.clone()), &["test runner"]);
    let (tx, rx) = mpsc::unbounded_channel();
    let session = tokio::spawn(run_session(h.controller, rx));

    tx.send(query("test")).unwrap();
    tokio::time::sleep(Duration::from_millis(1000)).await;

    drop(tx);
    let controller = session.await.unwrap();
    let updates = drain(&mut h.updates);

    assert_eq!(
        titles(controller.results()),
        vec!["test runner", "Test Anything Protocol", "Toggle theme"]
    );
    assert_eq!(loading_changes(&updates), vec![true, false]);
    assert_eq!(controller.phase(), crate::Phase::Settled);
}

#[tokio::test(start_paused = true)]
async fn test_select_and_dispatch_through_session() {
    let mut h = make_controller(Some(FakeRemote::new()), &[]);
    let (tx, rx) = mpsc::unbounded_channel();
    let session = tokio::spawn(run_session(h.controller, rx));

    tx.send(query("password")).unwrap();
    tokio::time::sleep(Duration::from_millis(400)).await;
    tx.send(PaletteEvent::Key {
        key: NavKey::ArrowDown,
    })
    .unwrap();
    tx.send(PaletteEvent::Key { key: NavKey::Enter }).unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    drop(tx);
    let controller = session.await.unwrap();
    let updates = drain(&mut h.updates);

    assert_eq!(controller.history().entries(), ["password"]);
    assert!(updates.ends_with(&[
        PaletteUpdate::SelectionChanged { index: Some(1) },
        PaletteUpdate::Navigate {
            path: "/tools/password-strength".to_string()
        },
        PaletteUpdate::RequestClose,
    ]));
}
