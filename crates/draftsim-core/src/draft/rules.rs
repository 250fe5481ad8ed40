// Configurable interaction policies for the draft engine.

use serde::{Deserialize, Serialize};

/// What a primary click on a slot does when nothing is armed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptySelectionClick {
    /// Leave the slot alone.
    #[default]
    Ignore,
    /// Remove the slot's occupant, same as a secondary click.
    Clear,
}

/// What selecting an entry that already occupies a slot does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacedEntrySelect {
    /// Reject the selection; placed entries cannot be armed.
    #[default]
    Ignore,
    /// Arm the entry so the next slot activation moves it (or toggles it off
    /// when activating the slot it already sits in).
    Rearm,
}

/// The full rule set applied by [`super::engine::DraftEngine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRules {
    #[serde(default)]
    pub empty_selection_click: EmptySelectionClick,
    #[serde(default)]
    pub placed_entry_select: PlacedEntrySelect,
}
