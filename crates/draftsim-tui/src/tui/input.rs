// Keyboard and mouse input handling.
//
// Translates crossterm events into UserCommand messages for the app
// orchestrator, or into local ViewState mutations (focus, cursors, filter,
// scrolling).

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use draftsim_core::draft::{BoardLayout, Side, SlotKey, SlotKind};

use super::layout::{catalogue_row_at, slot_at};
use super::{Focus, ViewState};
use crate::protocol::UserCommand;

/// Rows moved per mouse wheel notch.
const WHEEL_STEP: isize = 3;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator. Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    if view_state.filter_mode {
        return handle_filter_mode(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Tab | KeyCode::BackTab => {
            view_state.focus = view_state.focus.toggled();
            None
        }

        KeyCode::Up | KeyCode::Char('k') => {
            move_cursor(view_state, -1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            move_cursor(view_state, 1);
            None
        }
        KeyCode::PageUp => {
            let page = page_size(view_state);
            move_cursor(view_state, -page);
            None
        }
        KeyCode::PageDown => {
            let page = page_size(view_state);
            move_cursor(view_state, page);
            None
        }

        // Left/right jump onto that side of the board.
        KeyCode::Left | KeyCode::Char('h') => {
            focus_side(view_state, Side::Blue);
            None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            focus_side(view_state, Side::Red);
            None
        }

        KeyCode::Enter | KeyCode::Char(' ') => match view_state.focus {
            Focus::Catalogue => view_state
                .cursor_entry()
                .map(|e| UserCommand::ToggleEntry(e.id.clone())),
            Focus::Board => Some(UserCommand::ActivateSlot(view_state.board_cursor)),
        },

        KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('x') => match view_state.focus {
            Focus::Board => Some(UserCommand::ClearSlot(view_state.board_cursor)),
            Focus::Catalogue => None,
        },

        KeyCode::Char('/') => {
            if view_state.focus == Focus::Catalogue {
                view_state.filter_mode = true;
            }
            None
        }

        // Escape: drop the filter and the armed entry
        KeyCode::Esc => {
            if !view_state.filter_text.is_empty() {
                view_state.filter_text.clear();
                reset_catalogue_view(view_state);
            }
            view_state
                .board
                .selection
                .is_some()
                .then_some(UserCommand::Deselect)
        }

        KeyCode::Char('R') => Some(UserCommand::ResetDraft),

        // Quit: enter confirmation mode instead of quitting immediately
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        _ => None,
    }
}

/// Handle key events while the quit dialog is showing.
///
/// `y`/`q` confirm, `n`/Esc cancel, everything else is blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// Handle key events while typing a filter.
///
/// Enter keeps the filter, Esc clears it; both leave filter mode.
fn handle_filter_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.filter_mode = false;
            view_state.filter_text.clear();
            reset_catalogue_view(view_state);
        }
        KeyCode::Enter => {
            view_state.filter_mode = false;
        }
        KeyCode::Backspace => {
            view_state.filter_text.pop();
            reset_catalogue_view(view_state);
        }
        KeyCode::Char(c) => {
            view_state.filter_text.push(c);
            reset_catalogue_view(view_state);
        }
        _ => {}
    }
    None
}

/// Handle a mouse event.
///
/// Left click arms/disarms a catalogue entry or activates a slot, right click
/// clears a slot, the wheel scrolls the catalogue.
pub fn handle_mouse(event: MouseEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    if view_state.confirm_quit {
        return None;
    }

    let layout = view_state.layout();
    let board = view_state.board.layout;
    let (x, y) = (event.column, event.row);

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(key) = slot_at(&layout, board, x, y) {
                view_state.focus = Focus::Board;
                view_state.board_cursor = key;
                return Some(UserCommand::ActivateSlot(key));
            }
            let index = view_state.catalogue_scroll + catalogue_row_at(&layout, x, y)?;
            let id = view_state.visible_entries().get(index)?.id.clone();
            view_state.focus = Focus::Catalogue;
            view_state.catalogue_cursor = index;
            Some(UserCommand::ToggleEntry(id))
        }
        MouseEventKind::Down(MouseButton::Right) => {
            let key = slot_at(&layout, board, x, y)?;
            view_state.focus = Focus::Board;
            view_state.board_cursor = key;
            Some(UserCommand::ClearSlot(key))
        }
        MouseEventKind::ScrollUp => {
            scroll_catalogue(view_state, -WHEEL_STEP);
            None
        }
        MouseEventKind::ScrollDown => {
            scroll_catalogue(view_state, WHEEL_STEP);
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Cursor helpers
// ---------------------------------------------------------------------------

fn move_cursor(view_state: &mut ViewState, delta: isize) {
    match view_state.focus {
        Focus::Catalogue => move_catalogue_cursor(view_state, delta),
        Focus::Board => {
            let board = view_state.board.layout;
            for _ in 0..delta.unsigned_abs() {
                view_state.board_cursor = if delta > 0 {
                    next_slot(view_state.board_cursor, board)
                } else {
                    prev_slot(view_state.board_cursor, board)
                };
            }
        }
    }
}

fn move_catalogue_cursor(view_state: &mut ViewState, delta: isize) {
    let len = view_state.visible_entries().len();
    if len == 0 {
        view_state.catalogue_cursor = 0;
        return;
    }
    view_state.catalogue_cursor = view_state
        .catalogue_cursor
        .saturating_add_signed(delta)
        .min(len - 1);
    ensure_cursor_visible(view_state);
}

/// Scroll so the catalogue cursor row is on screen.
fn ensure_cursor_visible(view_state: &mut ViewState) {
    let rows = view_state.catalogue_rows();
    if rows == 0 {
        return;
    }
    let cursor = view_state.catalogue_cursor;
    if cursor < view_state.catalogue_scroll {
        view_state.catalogue_scroll = cursor;
    } else if cursor >= view_state.catalogue_scroll + rows {
        view_state.catalogue_scroll = cursor + 1 - rows;
    }
}

/// Scroll the catalogue viewport, dragging the cursor along when it would
/// leave the screen.
fn scroll_catalogue(view_state: &mut ViewState, delta: isize) {
    let len = view_state.visible_entries().len();
    let rows = view_state.catalogue_rows();
    if len == 0 || rows == 0 {
        return;
    }
    let max_scroll = len.saturating_sub(rows);
    view_state.catalogue_scroll = view_state
        .catalogue_scroll
        .saturating_add_signed(delta)
        .min(max_scroll);

    let first = view_state.catalogue_scroll;
    let last = (first + rows - 1).min(len - 1);
    view_state.catalogue_cursor = view_state.catalogue_cursor.clamp(first, last);
}

fn reset_catalogue_view(view_state: &mut ViewState) {
    view_state.catalogue_cursor = 0;
    view_state.catalogue_scroll = 0;
}

fn focus_side(view_state: &mut ViewState, side: Side) {
    view_state.focus = Focus::Board;
    view_state.board_cursor.side = side;
}

/// Next slot down a side column: bans first, then picks.
fn next_slot(key: SlotKey, board: BoardLayout) -> SlotKey {
    if key.index + 1 < board.capacity(key.kind) {
        SlotKey { index: key.index + 1, ..key }
    } else if key.kind == SlotKind::Ban && board.picks > 0 {
        SlotKey::pick(key.side, 0)
    } else {
        key
    }
}

/// Previous slot up a side column.
fn prev_slot(key: SlotKey, board: BoardLayout) -> SlotKey {
    if key.index > 0 {
        SlotKey { index: key.index - 1, ..key }
    } else if key.kind == SlotKind::Pick && board.bans > 0 {
        SlotKey::ban(key.side, board.bans - 1)
    } else {
        key
    }
}

/// Rows moved by PageUp/PageDown.
fn page_size(view_state: &ViewState) -> isize {
    let rows = match view_state.focus {
        Focus::Catalogue => view_state.catalogue_rows(),
        Focus::Board => view_state.board.layout.capacity(view_state.board_cursor.kind),
    };
    isize::try_from(rows.max(1)).unwrap_or(isize::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
