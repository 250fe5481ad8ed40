// Side panel widget: one side's ban and pick slots.
//
// Each slot is one row: "1. Name" or "1. (empty)". The board cursor is shown
// reversed when the board has focus; a slot holding the armed entry is
// highlighted yellow.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use draftsim_core::draft::{Side, SlotKey, SlotKind};

use crate::tui::layout::AppLayout;
use crate::tui::{Focus, ViewState};

/// Render both slot blocks of `side`.
pub fn render(frame: &mut Frame, layout: &AppLayout, side: Side, state: &ViewState) {
    for kind in SlotKind::ALL {
        render_block(frame, layout.side_block(side, kind), side, kind, state);
    }
}

fn render_block(frame: &mut Frame, area: Rect, side: Side, kind: SlotKind, state: &ViewState) {
    let capacity = state.board.layout.capacity(kind);
    let lines: Vec<Line> = (0..capacity)
        .map(|index| slot_line(SlotKey::new(side, kind, index), state))
        .collect();

    let has_cursor = state.focus == Focus::Board
        && state.board_cursor.side == side
        && state.board_cursor.kind == kind;
    let mut border_style = Style::default().fg(side_color(side));
    if has_cursor {
        border_style = border_style.add_modifier(Modifier::BOLD);
    }

    let title = format!(
        " {} ({}/{}) ",
        block_title(side, kind),
        state.board.side(side).filled(kind),
        capacity
    );

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );
    frame.render_widget(paragraph, area);
}

/// The row for a single slot.
pub fn slot_line(key: SlotKey, state: &ViewState) -> Line<'static> {
    let number = format!("{}. ", key.index + 1);
    let occupant = state.board.occupant(key);

    let (text, mut style) = match occupant {
        Some(id) if state.board.is_armed(id) => (
            state.catalogue.name_of(id),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Some(id) => (state.catalogue.name_of(id), Style::default().fg(Color::White)),
        None => ("(empty)".to_string(), Style::default().fg(Color::DarkGray)),
    };

    if state.focus == Focus::Board && state.board_cursor == key {
        style = style.add_modifier(Modifier::REVERSED);
    }

    Line::from(vec![
        Span::styled(number, Style::default().fg(Color::Gray)),
        Span::styled(text, style),
    ])
}

/// E.g. "Blue Bans".
pub fn block_title(side: Side, kind: SlotKind) -> String {
    format!("{} {}", side.title(), kind.title())
}

pub fn side_color(side: Side) -> Color {
    match side {
        Side::Blue => Color::LightBlue,
        Side::Red => Color::LightRed,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
