// Read model handed to the presentation layer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::log::DraftEvent;
use super::slot::{BoardLayout, Side, SlotKey, SlotKind};
use crate::catalogue::EntryId;

/// Number of log events carried in each snapshot.
pub const SNAPSHOT_LOG_LEN: usize = 50;

/// One side's slots in index order; `None` is an empty slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideBoard {
    pub side: Side,
    pub bans: Vec<Option<EntryId>>,
    pub picks: Vec<Option<EntryId>>,
}

impl SideBoard {
    pub fn empty(side: Side, layout: BoardLayout) -> Self {
        SideBoard {
            side,
            bans: vec![None; layout.bans],
            picks: vec![None; layout.picks],
        }
    }

    pub fn slots(&self, kind: SlotKind) -> &[Option<EntryId>] {
        match kind {
            SlotKind::Ban => &self.bans,
            SlotKind::Pick => &self.picks,
        }
    }

    /// Number of occupied slots of `kind`.
    pub fn filled(&self, kind: SlotKind) -> usize {
        self.slots(kind).iter().filter(|s| s.is_some()).count()
    }
}

/// Complete, self-contained picture of the board at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub layout: BoardLayout,
    pub blue: SideBoard,
    pub red: SideBoard,
    /// The armed entry, if any.
    pub selection: Option<EntryId>,
    /// Every entry currently occupying a slot.
    pub used: BTreeSet<EntryId>,
    /// Most recent log events, oldest first.
    pub recent: Vec<DraftEvent>,
}

impl BoardSnapshot {
    pub fn empty(layout: BoardLayout) -> Self {
        BoardSnapshot {
            layout,
            blue: SideBoard::empty(Side::Blue, layout),
            red: SideBoard::empty(Side::Red, layout),
            selection: None,
            used: BTreeSet::new(),
            recent: Vec::new(),
        }
    }

    pub fn side(&self, side: Side) -> &SideBoard {
        match side {
            Side::Blue => &self.blue,
            Side::Red => &self.red,
        }
    }

    pub fn occupant(&self, key: SlotKey) -> Option<&EntryId> {
        self.side(key.side)
            .slots(key.kind)
            .get(key.index)
            .and_then(|s| s.as_ref())
    }

    /// The slot `id` occupies, if any.
    pub fn slot_of(&self, id: &EntryId) -> Option<SlotKey> {
        if !self.used.contains(id) {
            return None;
        }
        self.layout.keys().find(|&key| self.occupant(key) == Some(id))
    }

    pub fn is_used(&self, id: &EntryId) -> bool {
        self.used.contains(id)
    }

    pub fn is_armed(&self, id: &EntryId) -> bool {
        self.selection.as_ref() == Some(id)
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        BoardSnapshot::empty(BoardLayout::default())
    }
}
