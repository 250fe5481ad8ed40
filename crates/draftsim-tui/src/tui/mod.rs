// TUI: layout, input handling, and widget rendering for the draft board.
//
// The TUI owns a `ViewState` holding the shared catalogue, the latest board
// snapshot, and purely local concerns (focus, cursors, filter). The app
// orchestrator pushes `UiUpdate` messages over an mpsc channel; the TUI
// applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream};
use futures_util::StreamExt;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::info;

use draftsim_core::catalogue::{Catalogue, Entry};
use draftsim_core::draft::{BoardLayout, BoardSnapshot, Side, SlotKey};

use crate::protocol::{UiUpdate, UserCommand};

use layout::{build_layout, catalogue_list_area, AppLayout};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Which half of the screen keyboard navigation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Catalogue,
    Board,
}

impl Focus {
    pub fn toggled(self) -> Focus {
        match self {
            Focus::Catalogue => Focus::Board,
            Focus::Board => Focus::Catalogue,
        }
    }
}

/// TUI-local state for rendering.
///
/// `board` is replaced wholesale on every `UiUpdate::Board`; everything else
/// is owned by the TUI.
pub struct ViewState {
    pub catalogue: Arc<Catalogue>,
    /// Latest snapshot from the app orchestrator.
    pub board: BoardSnapshot,
    pub focus: Focus,
    /// Index into `visible_entries()`.
    pub catalogue_cursor: usize,
    /// First visible row of the catalogue list.
    pub catalogue_scroll: usize,
    pub board_cursor: SlotKey,
    /// Current filter/search text.
    pub filter_text: String,
    /// Whether the filter input is active.
    pub filter_mode: bool,
    /// Whether the quit confirmation dialog is showing.
    pub confirm_quit: bool,
    /// Feedback for the last rejected command, cleared by the next board.
    pub notice: Option<String>,
    /// Terminal area of the last drawn frame, for mouse hit-testing.
    pub area: Rect,
}

impl ViewState {
    pub fn new(catalogue: Arc<Catalogue>, board: BoardLayout) -> Self {
        ViewState {
            catalogue,
            board: BoardSnapshot::empty(board),
            focus: Focus::Catalogue,
            catalogue_cursor: 0,
            catalogue_scroll: 0,
            board_cursor: SlotKey::ban(Side::Blue, 0),
            filter_text: String::new(),
            filter_mode: false,
            confirm_quit: false,
            notice: None,
            area: Rect::default(),
        }
    }

    /// Catalogue entries matching the filter, in catalogue order.
    ///
    /// Matches case-insensitively on name or any tag.
    pub fn visible_entries(&self) -> Vec<&Entry> {
        let needle = self.filter_text.trim().to_lowercase();
        self.catalogue
            .iter()
            .filter(|e| needle.is_empty() || entry_matches(e, &needle))
            .collect()
    }

    /// The entry under the catalogue cursor.
    pub fn cursor_entry(&self) -> Option<&Entry> {
        self.visible_entries().get(self.catalogue_cursor).copied()
    }

    pub fn layout(&self) -> AppLayout {
        build_layout(self.area, self.board.layout)
    }

    /// Number of catalogue rows that fit on screen.
    pub fn catalogue_rows(&self) -> usize {
        usize::from(catalogue_list_area(&self.layout()).height)
    }
}

fn entry_matches(entry: &Entry, needle: &str) -> bool {
    entry.name.to_lowercase().contains(needle)
        || entry.tags.iter().any(|t| t.to_lowercase().contains(needle))
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Board(snapshot) => {
            state.board = *snapshot;
            state.notice = None;
        }
        UiUpdate::Notice(text) => {
            state.notice = Some(text);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area(), state.board.layout);

    widgets::status_bar::render(frame, layout.status_bar, state);
    for side in Side::ALL {
        widgets::side_panel::render(frame, &layout, side, state);
    }
    widgets::catalogue::render(frame, &layout, state);
    widgets::draft_log::render(frame, layout.draft_log, state);
    render_help_bar(frame, &layout, state);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let text = if state.filter_mode {
        " Type to filter | Enter:Keep | Esc:Clear | Backspace:Delete"
    } else {
        " Tab:Focus | \u{2191}\u{2193}:Move | \u{2190}\u{2192}:Side | Enter:Select/Place | x:Clear | /:Filter | Esc:Deselect | R:Reset | q:Quit"
    };
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits or the app closes the update
/// channel.
///
/// Restores the terminal (raw mode, alternate screen, mouse capture) on exit
/// and on panic.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    catalogue: Arc<Catalogue>,
    board: BoardLayout,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::new(catalogue, board);
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        info!("UI channel closed, leaving TUI");
                        break;
                    }
                }
            }

            maybe_event = event_stream.next() => {
                let cmd = match maybe_event {
                    Some(Ok(Event::Key(key_event))) => input::handle_key(key_event, &mut view_state),
                    Some(Ok(Event::Mouse(mouse_event))) => input::handle_mouse(mouse_event, &mut view_state),
                    Some(Ok(Event::Resize(width, height))) => {
                        view_state.area = Rect::new(0, 0, width, height);
                        None
                    }
                    Some(Ok(_)) => None,
                    Some(Err(_)) | None => break,
                };
                if let Some(cmd) = cmd {
                    let quit = cmd == UserCommand::Quit;
                    let _ = cmd_tx.send(cmd).await;
                    if quit {
                        break;
                    }
                }
            }

            _ = render_tick.tick() => {
                let completed = terminal.draw(|frame| render_frame(frame, &view_state))?;
                view_state.area = completed.area;
            }
        }
    }

    let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// A small catalogue on a 120x40 screen, used by the TUI unit tests.
#[cfg(test)]
pub(crate) fn sample_view_state() -> ViewState {
    let catalogue = Catalogue::new(vec![
        Entry::new("ahri", "Ahri")
            .with_image("Ahri.png")
            .with_tags(vec!["Mage".into(), "Assassin".into()]),
        Entry::new("braum", "Braum").with_tags(vec!["Support".into()]),
        Entry::new("jinx", "Jinx").with_tags(vec!["Marksman".into()]),
        Entry::new("lux", "Lux").with_tags(vec!["Mage".into(), "Support".into()]),
        Entry::new("zed", "Zed").with_tags(vec!["Assassin".into()]),
    ])
    .unwrap();
    let mut state = ViewState::new(Arc::new(catalogue), BoardLayout::default());
    state.area = Rect::new(0, 0, 120, 40);
    state
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
