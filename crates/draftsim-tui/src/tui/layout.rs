// Screen layout: panel arrangement, sizing, and mouse hit-testing.
//
// +--------------------------------------------------------------+
// | Status Bar (1 row)                                            |
// +--------------+--------------------------------+--------------+
// | Blue Bans    | Catalogue                      | Red Bans     |
// +--------------+                                +--------------+
// | Blue Picks   |                                | Red Picks    |
// +--------------+--------------------------------+--------------+
// |              | Draft Log (8 rows)             |              |
// +--------------+--------------------------------+--------------+
// | Help Bar (1 row)                                              |
// +--------------------------------------------------------------+
//
// Ban and pick blocks are sized to the configured slot counts, one row per
// slot plus borders.

use ratatui::layout::{Constraint, Direction, Layout, Margin, Position, Rect};

use draftsim_core::draft::{BoardLayout, Side, SlotKey, SlotKind};

/// Width of each side column, borders included.
pub const SIDE_WIDTH: u16 = 26;
/// Height of the draft log panel, borders included.
pub const DRAFT_LOG_HEIGHT: u16 = 8;

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: mode, armed entry, slot counts, notice.
    pub status_bar: Rect,
    pub blue_bans: Rect,
    pub blue_picks: Rect,
    /// Centre column top: the entry pool.
    pub catalogue: Rect,
    /// Centre column bottom: recent slot changes.
    pub draft_log: Rect,
    pub red_bans: Rect,
    pub red_picks: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

impl AppLayout {
    /// The bordered block holding `side`'s `kind` slots.
    pub fn side_block(&self, side: Side, kind: SlotKind) -> Rect {
        match (side, kind) {
            (Side::Blue, SlotKind::Ban) => self.blue_bans,
            (Side::Blue, SlotKind::Pick) => self.blue_picks,
            (Side::Red, SlotKind::Ban) => self.red_bans,
            (Side::Red, SlotKind::Pick) => self.red_picks,
        }
    }
}

/// Build the layout from the terminal area and the board's slot counts.
pub fn build_layout(area: Rect, board: BoardLayout) -> AppLayout {
    // Vertical: status(1) | middle(fill) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(6),    // board + catalogue
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let status_bar = vertical[0];
    let middle = vertical[1];
    let help_bar = vertical[2];

    // Horizontal: blue | catalogue + log | red
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDE_WIDTH),
            Constraint::Min(20),
            Constraint::Length(SIDE_WIDTH),
        ])
        .split(middle);

    let (blue_bans, blue_picks) = split_side(columns[0], board);
    let (red_bans, red_picks) = split_side(columns[2], board);

    let centre = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(DRAFT_LOG_HEIGHT)])
        .split(columns[1]);

    AppLayout {
        status_bar,
        blue_bans,
        blue_picks,
        catalogue: centre[0],
        draft_log: centre[1],
        red_bans,
        red_picks,
        help_bar,
    }
}

fn split_side(column: Rect, board: BoardLayout) -> (Rect, Rect) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(block_height(board.bans)),
            Constraint::Length(block_height(board.picks)),
            Constraint::Min(0),
        ])
        .split(column);
    (sections[0], sections[1])
}

fn block_height(slots: usize) -> u16 {
    u16::try_from(slots).unwrap_or(u16::MAX).saturating_add(2)
}

// ---------------------------------------------------------------------------
// Hit-testing
// ---------------------------------------------------------------------------

/// The one-row area of a slot, or `None` if it does not fit on screen.
pub fn slot_area(layout: &AppLayout, key: SlotKey) -> Option<Rect> {
    let inner = layout
        .side_block(key.side, key.kind)
        .inner(Margin::new(1, 1));
    let row = u16::try_from(key.index).ok()?;
    if row >= inner.height || inner.width == 0 {
        return None;
    }
    Some(Rect::new(inner.x, inner.y + row, inner.width, 1))
}

/// The slot drawn at screen cell (`x`, `y`), if any.
pub fn slot_at(layout: &AppLayout, board: BoardLayout, x: u16, y: u16) -> Option<SlotKey> {
    let pos = Position::new(x, y);
    board
        .keys()
        .find(|&key| slot_area(layout, key).is_some_and(|r| r.contains(pos)))
}

/// Rows of the catalogue list: inside the borders, above the footer line.
pub fn catalogue_list_area(layout: &AppLayout) -> Rect {
    let inner = layout.catalogue.inner(Margin::new(1, 1));
    Rect {
        height: inner.height.saturating_sub(1),
        ..inner
    }
}

/// The catalogue footer line (image reference of the cursor entry).
pub fn catalogue_footer_area(layout: &AppLayout) -> Rect {
    let inner = layout.catalogue.inner(Margin::new(1, 1));
    if inner.height == 0 {
        return Rect { height: 0, ..inner };
    }
    Rect {
        y: inner.y + inner.height - 1,
        height: 1,
        ..inner
    }
}

/// Visible row index of the catalogue list at screen cell (`x`, `y`).
pub fn catalogue_row_at(layout: &AppLayout, x: u16, y: u16) -> Option<usize> {
    let list = catalogue_list_area(layout);
    if !list.contains(Position::new(x, y)) {
        return None;
    }
    Some(usize::from(y - list.y))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
