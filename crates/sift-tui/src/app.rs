//! Application state and update handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use sift_core::provider::{Command, CommandTable};
use sift_core::{NavKey, PaletteEvent, PaletteUpdate, SearchResult};
use std::process::{Command as Process, Stdio};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Terminal lines per result row (title, excerpt)
pub const ROW_HEIGHT: u16 = 2;

/// Side effects requested by the built-in commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    ClearHistory,
    ToggleHelp,
}

/// The palette's own commands. Their actions are forwarded to the event loop.
pub fn builtin_commands(actions: &UnboundedSender<AppAction>) -> CommandTable {
    let clear = actions.clone();
    let help = actions.clone();

    CommandTable::new(vec![
        Command::new(
            "clear-history",
            "Clear search history",
            "Forget every recorded query",
            move || {
                let _ = clear.send(AppAction::ClearHistory);
            },
        )
        .with_keywords(["history", "reset"]),
        Command::new(
            "toggle-help",
            "Toggle help",
            "Show or hide key bindings",
            move || {
                let _ = help.send(AppAction::ToggleHelp);
            },
        )
        .with_keywords(["keys", "shortcuts"]),
    ])
}

/// Spawn a command with all I/O redirected to null (fire and forget)
fn spawn_silent(program: &str, args: &[&str]) {
    let _ = Process::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
}

fn open_external(url: &str) {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };
    spawn_silent(opener, &[url]);
}

/// Main application state
pub struct App {
    pub input: String,
    /// Cursor position in characters
    pub cursor_position: usize,
    pub results: Vec<SearchResult>,
    pub selected: Option<usize>,
    pub list_state: ListState,
    pub loading: bool,
    pub show_help: bool,
    pub status_message: Option<String>,
    pub should_quit: bool,
    /// Results list area from the last draw, for mouse hit-testing
    pub results_area: Rect,
    /// Set by a history replay so the close that follows keeps the palette up
    replaying: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            cursor_position: 0,
            results: Vec::new(),
            selected: None,
            list_state: ListState::default(),
            loading: false,
            show_help: false,
            status_message: None,
            should_quit: false,
            results_area: Rect::default(),
            replaying: false,
        }
    }

    /// Apply an update from the controller. Returns an event to send back, if any.
    pub fn handle_update(&mut self, update: PaletteUpdate) -> Option<PaletteEvent> {
        match update {
            PaletteUpdate::ResultsChanged { results } => {
                self.results = results;
                self.list_state = ListState::default();
            }
            PaletteUpdate::LoadingChanged { loading } => self.loading = loading,
            PaletteUpdate::SelectionChanged { index } => {
                self.selected = index;
                self.list_state.select(index);
            }
            PaletteUpdate::Navigate { path } => {
                self.status_message = Some(format!("Navigate: {path}"));
            }
            PaletteUpdate::OpenExternal { url } => {
                open_external(&url);
                self.status_message = Some(format!("Opened: {url}"));
            }
            PaletteUpdate::QueryReplaced { query } => {
                self.cursor_position = query.chars().count();
                self.input = query;
                self.replaying = true;
            }
            PaletteUpdate::RequestClose => {
                if std::mem::take(&mut self.replaying) {
                    return None;
                }
                // Closing the palette returns it to the landing view
                debug!("Palette closed, resetting input");
                self.input.clear();
                self.cursor_position = 0;
                return Some(PaletteEvent::QueryChanged {
                    query: String::new(),
                });
            }
        }
        None
    }

    pub fn handle_action(&mut self, action: AppAction) -> Option<PaletteEvent> {
        match action {
            AppAction::ClearHistory => {
                self.status_message = Some("Search history cleared".to_string());
                Some(PaletteEvent::ClearHistory)
            }
            AppAction::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
        }
    }

    /// Map a key press to a palette event
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PaletteEvent> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc if self.show_help => {
                self.show_help = false;
                None
            }
            KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                None
            }
            KeyCode::Up => Some(nav(NavKey::ArrowUp)),
            KeyCode::Char('p') if ctrl => Some(nav(NavKey::ArrowUp)),
            KeyCode::Down => Some(nav(NavKey::ArrowDown)),
            KeyCode::Char('n') if ctrl => Some(nav(NavKey::ArrowDown)),
            KeyCode::Enter => Some(nav(NavKey::Enter)),
            KeyCode::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.cursor_position = (self.cursor_position + 1).min(self.input.chars().count());
                None
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                None
            }
            KeyCode::End => {
                self.cursor_position = self.input.chars().count();
                None
            }
            KeyCode::Char('d') if ctrl => self.remove_selected_history(),
            KeyCode::Char('u') if ctrl => {
                self.input.clear();
                self.cursor_position = 0;
                Some(self.query_event())
            }
            KeyCode::Backspace => {
                if self.cursor_position == 0 {
                    return None;
                }
                self.cursor_position -= 1;
                let at = self.byte_index();
                self.input.remove(at);
                Some(self.query_event())
            }
            KeyCode::Char(c) if !ctrl => {
                let at = self.byte_index();
                self.input.insert(at, c);
                self.cursor_position += 1;
                Some(self.query_event())
            }
            _ => None,
        }
    }

    /// Map pointer movement and clicks over the list to hover / activate
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<PaletteEvent> {
        let index = self.row_at(mouse.column, mouse.row)?;
        match mouse.kind {
            MouseEventKind::Moved => Some(PaletteEvent::Hover { index }),
            MouseEventKind::Down(MouseButton::Left) => Some(PaletteEvent::Activate { index }),
            _ => None,
        }
    }

    fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.results_area;
        let top = area.y + 1;
        let bottom = (area.y + area.height).saturating_sub(1);
        let left = area.x + 1;
        let right = (area.x + area.width).saturating_sub(1);
        if row < top || row >= bottom || column < left || column >= right {
            return None;
        }

        let index = self.list_state.offset() + usize::from((row - top) / ROW_HEIGHT);
        (index < self.results.len()).then_some(index)
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_position)
            .map_or(self.input.len(), |(i, _)| i)
    }

    /// Forget the selected row if it is a recent query
    fn remove_selected_history(&mut self) -> Option<PaletteEvent> {
        let index = self.selected?;
        match self.results.get(index)? {
            SearchResult::History { query } => {
                self.status_message = Some(format!("Forgot: {query}"));
                Some(PaletteEvent::RemoveHistory {
                    query: query.clone(),
                })
            }
            _ => None,
        }
    }

    fn query_event(&self) -> PaletteEvent {
        PaletteEvent::QueryChanged {
            query: self.input.clone(),
        }
    }
}

fn nav(key: NavKey) -> PaletteEvent {
    PaletteEvent::Key { key }
}
