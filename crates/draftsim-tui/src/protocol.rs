// Messages exchanged between the app orchestrator and the TUI.

use draftsim_core::catalogue::EntryId;
use draftsim_core::draft::{BoardSnapshot, SlotKey};

/// Commands sent from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Arm the entry, or disarm it when it is already armed.
    ToggleEntry(EntryId),
    /// Arm the entry, replacing any prior selection.
    SelectEntry(EntryId),
    /// Drop the armed selection.
    Deselect,
    /// Primary click on a slot.
    ActivateSlot(SlotKey),
    /// Secondary click on a slot.
    ClearSlot(SlotKey),
    /// Empty every slot.
    ResetDraft,
    Quit,
}

/// Updates pushed from the app orchestrator to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Full board state after the latest command.
    Board(Box<BoardSnapshot>),
    /// Short feedback line for the status bar.
    Notice(String),
}
