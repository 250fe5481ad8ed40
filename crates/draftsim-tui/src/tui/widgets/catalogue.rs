// Catalogue widget: the filterable entry pool.
//
// Placed entries are dimmed and tagged with their slot, the armed entry is
// highlighted, and the footer shows the image reference of the entry under
// the cursor.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use draftsim_core::catalogue::Entry;

use crate::tui::layout::{catalogue_footer_area, catalogue_list_area, AppLayout};
use crate::tui::{Focus, ViewState};

/// Render the catalogue panel (border, list, footer).
pub fn render(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let visible = state.visible_entries();
    let focused = state.focus == Focus::Catalogue;

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(build_title(state, visible.len())),
        layout.catalogue,
    );

    let list_area = catalogue_list_area(layout);
    if visible.is_empty() {
        let message = if state.catalogue.is_empty() {
            "  Catalogue is empty."
        } else {
            "  No entries match the filter."
        };
        frame.render_widget(
            Paragraph::new(message).style(Style::default().fg(Color::DarkGray)),
            list_area,
        );
    } else {
        let lines: Vec<Line> = visible
            .iter()
            .enumerate()
            .skip(state.catalogue_scroll)
            .take(usize::from(list_area.height))
            .map(|(i, entry)| entry_line(entry, state, focused && i == state.catalogue_cursor))
            .collect();
        frame.render_widget(Paragraph::new(lines), list_area);
    }

    frame.render_widget(
        Paragraph::new(footer_text(state)).style(Style::default().fg(Color::DarkGray)),
        catalogue_footer_area(layout),
    );
}

/// Panel title with counts and the active filter.
pub fn build_title(state: &ViewState, shown: usize) -> String {
    let total = state.catalogue.len();
    let mut title = if shown == total {
        format!(" Catalogue ({total}) ")
    } else {
        format!(" Catalogue ({shown}/{total}) ")
    };
    if state.filter_mode {
        title.push_str(&format!("[/{}_] ", state.filter_text));
    } else if !state.filter_text.is_empty() {
        title.push_str(&format!("[/{}] ", state.filter_text));
    }
    title
}

/// One list row: marker, name, tags, and the slot of a placed entry.
pub fn entry_line(entry: &Entry, state: &ViewState, is_cursor: bool) -> Line<'static> {
    let armed = state.board.is_armed(&entry.id);
    let slot = state.board.slot_of(&entry.id);

    let mut name_style = if armed {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if slot.is_some() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    if is_cursor {
        name_style = name_style.add_modifier(Modifier::REVERSED);
    }

    let mut spans = vec![
        Span::raw(if is_cursor { "> " } else { "  " }),
        Span::styled(entry.name.clone(), name_style),
    ];
    if !entry.tags.is_empty() {
        spans.push(Span::styled(
            format!("  {}", entry.tags.join(", ")),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ));
    }
    if let Some(slot) = slot {
        spans.push(Span::styled(
            format!("  [{}]", slot.label()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Image reference of the cursor entry.
pub fn footer_text(state: &ViewState) -> String {
    match state.cursor_entry() {
        Some(entry) => match state.catalogue.image_url(&entry.id) {
            Some(url) => format!(" {url}"),
            None => format!(" {}: no image", entry.name),
        },
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
