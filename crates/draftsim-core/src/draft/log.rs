// Draft log: timestamped record of every slot mutation.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::slot::SlotKey;
use crate::catalogue::EntryId;

/// A slot mutation performed by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DraftAction {
    /// `entry` was written into `slot`.
    Assigned {
        slot: SlotKey,
        entry: EntryId,
        /// Previous occupant of `slot`, now back in the pool.
        evicted: Option<EntryId>,
        /// Slot `entry` was moved out of.
        vacated: Option<SlotKey>,
    },
    /// `entry` was taken out of `slot`.
    Removed { slot: SlotKey, entry: EntryId },
    /// Every slot was emptied.
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftEvent {
    pub at: DateTime<Utc>,
    pub action: DraftAction,
}

/// Most events the log keeps; older ones are dropped as new ones arrive.
pub const MAX_LOG_LEN: usize = 200;

/// History of draft events, oldest first, bounded by [`MAX_LOG_LEN`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftLog {
    events: VecDeque<DraftEvent>,
}

impl DraftLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `action` stamped with the current time, evicting the oldest
    /// event once the log is full.
    pub fn record(&mut self, action: DraftAction) {
        if self.events.len() == MAX_LOG_LEN {
            self.events.pop_front();
        }
        self.events.push_back(DraftEvent {
            at: Utc::now(),
            action,
        });
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> impl DoubleEndedIterator<Item = &DraftEvent> + '_ {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&DraftEvent> {
        self.events.back()
    }

    /// The newest `n` events, oldest first.
    pub fn recent(&self, n: usize) -> Vec<DraftEvent> {
        let start = self.events.len().saturating_sub(n);
        self.events.range(start..).cloned().collect()
    }
}
