// Draft board: slot addressing, rules, the state engine, its log and read model.

pub mod engine;
pub mod log;
pub mod rules;
pub mod slot;
pub mod snapshot;

pub use engine::{DraftEngine, Ignored, Mode, Outcome};
pub use log::{DraftAction, DraftEvent, DraftLog};
pub use rules::{DraftRules, EmptySelectionClick, PlacedEntrySelect};
pub use slot::{BoardLayout, Side, SlotKey, SlotKeyParseError, SlotKind};
pub use snapshot::{BoardSnapshot, SideBoard};
