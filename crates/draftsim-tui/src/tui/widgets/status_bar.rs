// Status bar widget: mode, armed entry, per-side slot counts, notice.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use draftsim_core::draft::{BoardSnapshot, Side, SlotKind};

use super::side_panel::side_color;
use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [mode] [armed entry] | [blue counts] [red counts] | [notice]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();

    let (label, style) = mode_badge(&state.board);
    spans.push(Span::styled(label, style));

    if let Some(id) = &state.board.selection {
        spans.push(Span::styled(
            format!(" {} ", state.catalogue.name_of(id)),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
    for side in Side::ALL {
        spans.push(Span::styled(
            side_summary(&state.board, side),
            Style::default().fg(side_color(side)),
        ));
        spans.push(Span::raw("  "));
    }

    if let Some(version) = state.catalogue.version() {
        spans.push(Span::styled(
            format!("v{version}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if let Some(notice) = &state.notice {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(notice.clone(), Style::default().fg(Color::LightRed)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Mode label and its style.
pub fn mode_badge(board: &BoardSnapshot) -> (&'static str, Style) {
    if board.selection.is_some() {
        (
            " ARMED ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (" IDLE ", Style::default().fg(Color::Black).bg(Color::Gray))
    }
}

/// E.g. "Blue B 2/5 P 1/5".
pub fn side_summary(board: &BoardSnapshot, side: Side) -> String {
    let sb = board.side(side);
    let name = match side {
        Side::Blue => "Blue",
        Side::Red => "Red",
    };
    format!(
        "{} B {}/{} P {}/{}",
        name,
        sb.filled(SlotKind::Ban),
        board.layout.bans,
        sb.filled(SlotKind::Pick),
        board.layout.picks
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
