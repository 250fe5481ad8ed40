// Draft log widget: recent slot changes, newest first.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use draftsim_core::catalogue::Catalogue;
use draftsim_core::draft::{DraftAction, DraftEvent};

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Draft Log ({}) ", state.board.recent.len()));

    if state.board.recent.is_empty() {
        frame.render_widget(
            Paragraph::new("  No slot changes yet.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let lines: Vec<Line> = state
        .board
        .recent
        .iter()
        .rev()
        .map(|event| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", event.at.format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(describe(&event.action, &state.catalogue)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// One log line with its timestamp.
pub fn format_event(event: &DraftEvent, catalogue: &Catalogue) -> String {
    format!(
        "{} {}",
        event.at.format("%H:%M:%S"),
        describe(&event.action, catalogue)
    )
}

fn describe(action: &DraftAction, catalogue: &Catalogue) -> String {
    match action {
        DraftAction::Assigned {
            slot,
            entry,
            evicted,
            vacated,
        } => {
            let mut text = format!("{} -> {}", catalogue.name_of(entry), slot.label());
            if let Some(evicted) = evicted {
                text.push_str(&format!(" (replaced {})", catalogue.name_of(evicted)));
            }
            if let Some(vacated) = vacated {
                text.push_str(&format!(" (from {})", vacated.label()));
            }
            text
        }
        DraftAction::Removed { slot, entry } => {
            format!("{} removed from {}", catalogue.name_of(entry), slot.label())
        }
        DraftAction::Reset => "Board reset".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use draftsim_core::catalogue::EntryId;
    use draftsim_core::draft::{Side, SlotKey};

    use crate::tui::sample_view_state;

    fn event(action: DraftAction) -> DraftEvent {
        DraftEvent {
            at: Utc.with_ymd_and_hms(2024, 5, 1, 18, 4, 9).unwrap(),
            action,
        }
    }

    #[test]
    fn assigned_with_eviction_and_move() {
        let state = sample_view_state();
        let e = event(DraftAction::Assigned {
            slot: SlotKey::pick(Side::Blue, 0),
            entry: EntryId::from("ahri"),
            evicted: Some(EntryId::from("zed")),
            vacated: Some(SlotKey::ban(Side::Red, 2)),
        });
        assert_eq!(
            format_event(&e, &state.catalogue),
            "18:04:09 Ahri -> Blue pick 1 (replaced Zed) (from Red ban 3)"
        );
    }

    #[test]
    fn plain_assignment_removal_and_reset() {
        let state = sample_view_state();
        let assigned = event(DraftAction::Assigned {
            slot: SlotKey::ban(Side::Red, 0),
            entry: EntryId::from("lux"),
            evicted: None,
            vacated: None,
        });
        assert_eq!(
            format_event(&assigned, &state.catalogue),
            "18:04:09 Lux -> Red ban 1"
        );

        let removed = event(DraftAction::Removed {
            slot: SlotKey::pick(Side::Red, 4),
            entry: EntryId::from("jinx"),
        });
        assert_eq!(
            format_event(&removed, &state.catalogue),
            "18:04:09 Jinx removed from Red pick 5"
        );

        assert_eq!(
            format_event(&event(DraftAction::Reset), &state.catalogue),
            "18:04:09 Board reset"
        );
    }

    #[test]
    fn render_shows_newest_first() {
        let mut state = sample_view_state();
        state.board.recent = vec![
            event(DraftAction::Assigned {
                slot: SlotKey::ban(Side::Blue, 0),
                entry: EntryId::from("braum"),
                evicted: None,
                vacated: None,
            }),
            event(DraftAction::Reset),
        ];

        let backend = ratatui::backend::TestBackend::new(60, 8);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect()
        };
        assert!(row(0).contains("Draft Log (2)"));
        assert!(row(1).contains("Board reset"));
        assert!(row(2).contains("Braum -> Blue ban 1"));
    }

    #[test]
    fn render_empty_log() {
        let state = sample_view_state();
        let backend = ratatui::backend::TestBackend::new(60, 8);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = (0..buffer.area.width)
            .map(|x| buffer[(x, 1)].symbol().to_string())
            .collect();
        assert!(text.contains("No slot changes yet."));
    }
}
