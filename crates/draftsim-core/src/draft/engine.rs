// Draft state engine: armed selection, slot assignment, exclusivity, clear.
//
// The engine owns the only mutable copy of the board. Every operation runs to
// completion synchronously and reports what it did as an `Outcome`; invalid
// input (unknown entry, out-of-range slot, nothing armed) is never an error,
// it is an `Outcome::Ignored` that leaves state untouched.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::log::{DraftAction, DraftLog};
use super::rules::{DraftRules, EmptySelectionClick, PlacedEntrySelect};
use super::slot::{BoardLayout, Side, SlotKey, SlotKind};
use super::snapshot::{BoardSnapshot, SideBoard, SNAPSHOT_LOG_LEN};
use crate::catalogue::{Catalogue, EntryId};

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// The two externally observable modes of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Nothing armed.
    Idle,
    /// One entry armed, awaiting placement.
    Armed,
}

/// Why an operation left the state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ignored {
    /// The id is not in the catalogue.
    UnknownEntry(EntryId),
    /// The entry already occupies `slot` and placed entries cannot be armed.
    EntryInUse { entry: EntryId, slot: SlotKey },
    /// Nothing is armed.
    NoSelection,
    /// The slot index exceeds the configured capacity.
    SlotOutOfRange(SlotKey),
    /// The slot has no occupant to clear.
    SlotEmpty(SlotKey),
}

impl fmt::Display for Ignored {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ignored::UnknownEntry(id) => write!(f, "unknown entry '{id}'"),
            Ignored::EntryInUse { entry, slot } => write!(f, "'{entry}' already sits in {slot}"),
            Ignored::NoSelection => write!(f, "nothing is armed"),
            Ignored::SlotOutOfRange(slot) => write!(f, "no such slot {slot}"),
            Ignored::SlotEmpty(slot) => write!(f, "{slot} is already empty"),
        }
    }
}

/// Result of a single engine operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The entry is now the armed selection.
    Armed(EntryId),
    /// The armed selection was cleared without placing it.
    Disarmed(EntryId),
    /// `entry` was written into `slot`.
    Assigned {
        slot: SlotKey,
        entry: EntryId,
        evicted: Option<EntryId>,
        vacated: Option<SlotKey>,
    },
    /// `entry` was removed from `slot`.
    Removed { slot: SlotKey, entry: EntryId },
    /// The whole board was emptied.
    Reset,
    /// Nothing changed.
    Ignored(Ignored),
}

impl Outcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Outcome::Ignored(_))
    }

    /// Whether any slot changed.
    pub fn changed_board(&self) -> bool {
        matches!(
            self,
            Outcome::Assigned { .. } | Outcome::Removed { .. } | Outcome::Reset
        )
    }
}

// ---------------------------------------------------------------------------
// DraftEngine
// ---------------------------------------------------------------------------

/// Holds and mutates the draft board.
#[derive(Debug, Clone)]
pub struct DraftEngine {
    catalogue: Arc<Catalogue>,
    layout: BoardLayout,
    rules: DraftRules,
    /// Slot map. Invariant: values are catalogue ids and pairwise distinct.
    slots: BTreeMap<SlotKey, EntryId>,
    selection: Option<EntryId>,
    log: DraftLog,
}

impl DraftEngine {
    pub fn new(catalogue: Arc<Catalogue>, layout: BoardLayout, rules: DraftRules) -> Self {
        DraftEngine {
            catalogue,
            layout,
            rules,
            slots: BTreeMap::new(),
            selection: None,
            log: DraftLog::new(),
        }
    }

    /// Engine with 5 bans / 5 picks per side and the default rules.
    pub fn with_defaults(catalogue: Arc<Catalogue>) -> Self {
        Self::new(catalogue, BoardLayout::default(), DraftRules::default())
    }

    // -- Mutations --------------------------------------------------------

    /// Arm `id`, replacing any prior selection.
    pub fn select_entry(&mut self, id: &EntryId) -> Outcome {
        if !self.catalogue.contains(id) {
            return self.ignore(Ignored::UnknownEntry(id.clone()));
        }

        if let Some(slot) = self.slot_of(id) {
            if self.rules.placed_entry_select == PlacedEntrySelect::Ignore {
                return self.ignore(Ignored::EntryInUse {
                    entry: id.clone(),
                    slot,
                });
            }
        }

        self.selection = Some(id.clone());
        debug!("Armed {}", id);
        Outcome::Armed(id.clone())
    }

    /// Clear the armed selection.
    pub fn deselect(&mut self) -> Outcome {
        match self.selection.take() {
            Some(id) => {
                debug!("Disarmed {}", id);
                Outcome::Disarmed(id)
            }
            None => self.ignore(Ignored::NoSelection),
        }
    }

    /// Catalogue click: disarm `id` if it is the armed entry, otherwise arm it.
    pub fn toggle_entry(&mut self, id: &EntryId) -> Outcome {
        if self.selection.as_ref() == Some(id) {
            self.deselect()
        } else {
            self.select_entry(id)
        }
    }

    /// Primary action on a slot.
    ///
    /// 1. The slot holds the armed entry: remove it and disarm (toggle-off).
    /// 2. Something is armed: place it here, vacating any other slot it held
    ///    and evicting the current occupant, then disarm.
    /// 3. Nothing is armed: governed by [`EmptySelectionClick`].
    pub fn activate_slot(&mut self, key: SlotKey) -> Outcome {
        if !self.layout.contains(key) {
            return self.ignore(Ignored::SlotOutOfRange(key));
        }

        let Some(armed) = self.selection.clone() else {
            return match self.rules.empty_selection_click {
                EmptySelectionClick::Ignore => self.ignore(Ignored::NoSelection),
                EmptySelectionClick::Clear => self.clear_slot(key),
            };
        };

        if self.slots.get(&key) == Some(&armed) {
            self.slots.remove(&key);
            self.selection = None;
            debug!("Toggled {} off {}", armed, key);
            self.log.record(DraftAction::Removed {
                slot: key,
                entry: armed.clone(),
            });
            return Outcome::Removed {
                slot: key,
                entry: armed,
            };
        }

        let (evicted, vacated) = self.place(key, armed.clone());
        self.selection = None;
        debug!(
            "Assigned {} to {} (evicted={:?}, vacated={:?})",
            armed, key, evicted, vacated
        );
        self.log.record(DraftAction::Assigned {
            slot: key,
            entry: armed.clone(),
            evicted: evicted.clone(),
            vacated,
        });
        Outcome::Assigned {
            slot: key,
            entry: armed,
            evicted,
            vacated,
        }
    }

    /// Secondary action on a slot: remove its occupant. Never touches the
    /// selection.
    pub fn clear_slot(&mut self, key: SlotKey) -> Outcome {
        if !self.layout.contains(key) {
            return self.ignore(Ignored::SlotOutOfRange(key));
        }
        match self.slots.remove(&key) {
            Some(entry) => {
                debug!("Cleared {} from {}", entry, key);
                self.log.record(DraftAction::Removed {
                    slot: key,
                    entry: entry.clone(),
                });
                Outcome::Removed { slot: key, entry }
            }
            None => self.ignore(Ignored::SlotEmpty(key)),
        }
    }

    /// Empty every slot, disarm, and start a fresh log.
    pub fn reset(&mut self) -> Outcome {
        self.slots.clear();
        self.selection = None;
        self.log.clear();
        self.log.record(DraftAction::Reset);
        debug!("Board reset");
        Outcome::Reset
    }

    /// The single write path into the slot map. Removes `entry` from any other
    /// slot before writing it into `key`, so no entry is ever placed twice.
    ///
    /// Returns the evicted previous occupant of `key` and the slot `entry`
    /// was moved out of.
    fn place(&mut self, key: SlotKey, entry: EntryId) -> (Option<EntryId>, Option<SlotKey>) {
        let vacated = self.slot_of(&entry).filter(|&from| from != key);
        if let Some(from) = vacated {
            self.slots.remove(&from);
        }
        let evicted = self.slots.insert(key, entry);
        (evicted, vacated)
    }

    fn ignore(&self, reason: Ignored) -> Outcome {
        debug!("Ignored: {}", reason);
        Outcome::Ignored(reason)
    }

    // -- Queries ----------------------------------------------------------

    /// True iff `id` occupies any slot.
    pub fn is_used(&self, id: &EntryId) -> bool {
        self.slots.values().any(|v| v == id)
    }

    /// The slot `id` occupies, if any.
    pub fn slot_of(&self, id: &EntryId) -> Option<SlotKey> {
        self.slots
            .iter()
            .find_map(|(key, v)| (v == id).then_some(*key))
    }

    pub fn occupant_of(&self, key: SlotKey) -> Option<&EntryId> {
        self.slots.get(&key)
    }

    pub fn selection(&self) -> Option<&EntryId> {
        self.selection.as_ref()
    }

    pub fn mode(&self) -> Mode {
        if self.selection.is_some() {
            Mode::Armed
        } else {
            Mode::Idle
        }
    }

    /// Number of occupied slots of `kind` on `side`.
    pub fn filled(&self, side: Side, kind: SlotKind) -> usize {
        self.slots
            .keys()
            .filter(|k| k.side == side && k.kind == kind)
            .count()
    }

    /// Occupied slots in display order.
    pub fn occupied(&self) -> impl Iterator<Item = (SlotKey, &EntryId)> {
        self.slots.iter().map(|(k, v)| (*k, v))
    }

    pub fn catalogue(&self) -> &Arc<Catalogue> {
        &self.catalogue
    }

    pub fn layout(&self) -> BoardLayout {
        self.layout
    }

    pub fn log(&self) -> &DraftLog {
        &self.log
    }

    /// Build the read model for the presentation layer.
    pub fn snapshot(&self) -> BoardSnapshot {
        let mut snapshot = BoardSnapshot::empty(self.layout);
        for (key, entry) in &self.slots {
            let side: &mut SideBoard = match key.side {
                Side::Blue => &mut snapshot.blue,
                Side::Red => &mut snapshot.red,
            };
            let slots = match key.kind {
                SlotKind::Ban => &mut side.bans,
                SlotKind::Pick => &mut side.picks,
            };
            slots[key.index] = Some(entry.clone());
            snapshot.used.insert(entry.clone());
        }
        snapshot.selection = self.selection.clone();
        snapshot.recent = self.log.recent(SNAPSHOT_LOG_LEN);
        snapshot
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::Entry;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn id(n: u32) -> EntryId {
        EntryId::from(n)
    }

    fn key(s: &str) -> SlotKey {
        s.parse().unwrap()
    }

    fn catalogue() -> Arc<Catalogue> {
        Arc::new(
            Catalogue::new(vec![
                Entry::new(1u32, "Warrior"),
                Entry::new(2u32, "Mage"),
                Entry::new(3u32, "Archer"),
                Entry::new(4u32, "Healer"),
            ])
            .unwrap(),
        )
    }

    fn engine() -> DraftEngine {
        DraftEngine::with_defaults(catalogue())
    }

    fn engine_with(rules: DraftRules) -> DraftEngine {
        DraftEngine::new(catalogue(), BoardLayout::default(), rules)
    }

    fn rearm() -> DraftRules {
        DraftRules {
            placed_entry_select: PlacedEntrySelect::Rearm,
            ..DraftRules::default()
        }
    }

    fn assert_exclusive(engine: &DraftEngine) {
        let mut seen = HashSet::new();
        for (slot, entry) in engine.occupied() {
            assert!(seen.insert(entry.clone()), "{entry} appears twice (again at {slot})");
        }
    }

    // -- select / deselect --

    #[test]
    fn select_arms_entry() {
        let mut e = engine();
        assert_eq!(e.mode(), Mode::Idle);
        assert_eq!(e.select_entry(&id(1)), Outcome::Armed(id(1)));
        assert_eq!(e.selection(), Some(&id(1)));
        assert_eq!(e.mode(), Mode::Armed);
    }

    #[test]
    fn select_replaces_prior_selection() {
        let mut e = engine();
        e.select_entry(&id(1));
        e.select_entry(&id(2));
        assert_eq!(e.selection(), Some(&id(2)));
    }

    #[test]
    fn select_unknown_entry_ignored() {
        let mut e = engine();
        e.select_entry(&id(1));
        assert_eq!(
            e.select_entry(&id(99)),
            Outcome::Ignored(Ignored::UnknownEntry(id(99)))
        );
        assert_eq!(e.selection(), Some(&id(1)));
    }

    #[test]
    fn deselect_clears_selection() {
        let mut e = engine();
        e.select_entry(&id(3));
        assert_eq!(e.deselect(), Outcome::Disarmed(id(3)));
        assert_eq!(e.mode(), Mode::Idle);
        assert_eq!(e.deselect(), Outcome::Ignored(Ignored::NoSelection));
    }

    #[test]
    fn toggle_entry_arms_then_disarms() {
        let mut e = engine();
        assert_eq!(e.toggle_entry(&id(2)), Outcome::Armed(id(2)));
        assert_eq!(e.toggle_entry(&id(2)), Outcome::Disarmed(id(2)));
        assert_eq!(e.selection(), None);
        e.toggle_entry(&id(2));
        assert_eq!(e.toggle_entry(&id(3)), Outcome::Armed(id(3)));
    }

    // -- activate_slot --

    #[test]
    fn activate_assigns_and_disarms() {
        let mut e = engine();
        e.select_entry(&id(1));
        let out = e.activate_slot(key("blue-pick-0"));
        assert_eq!(
            out,
            Outcome::Assigned {
                slot: key("blue-pick-0"),
                entry: id(1),
                evicted: None,
                vacated: None,
            }
        );
        assert_eq!(e.occupant_of(key("blue-pick-0")), Some(&id(1)));
        assert_eq!(e.mode(), Mode::Idle);
        assert!(e.is_used(&id(1)));
    }

    #[test]
    fn activate_evicts_previous_occupant() {
        let mut e = engine();
        e.select_entry(&id(1));
        e.activate_slot(key("red-ban-2"));
        e.select_entry(&id(2));
        let out = e.activate_slot(key("red-ban-2"));
        assert_eq!(
            out,
            Outcome::Assigned {
                slot: key("red-ban-2"),
                entry: id(2),
                evicted: Some(id(1)),
                vacated: None,
            }
        );
        assert!(!e.is_used(&id(1)));
        assert_eq!(e.occupant_of(key("red-ban-2")), Some(&id(2)));
    }

    #[test]
    fn no_op_safety_on_empty_slot() {
        let mut e = engine();
        e.select_entry(&id(1));
        e.activate_slot(key("blue-ban-0"));
        let before = e.snapshot();

        assert_eq!(
            e.activate_slot(key("blue-ban-1")),
            Outcome::Ignored(Ignored::NoSelection)
        );
        assert_eq!(e.snapshot(), before);
    }

    #[test]
    fn activate_out_of_range_ignored() {
        let mut e = engine();
        e.select_entry(&id(1));
        let out = e.activate_slot(SlotKey::pick(Side::Blue, 5));
        assert_eq!(
            out,
            Outcome::Ignored(Ignored::SlotOutOfRange(SlotKey::pick(Side::Blue, 5)))
        );
        // Selection survives an ignored click.
        assert_eq!(e.selection(), Some(&id(1)));
        assert!(!e.is_used(&id(1)));
    }

    #[test]
    fn filled_slot_click_without_selection_ignored_by_default() {
        let mut e = engine();
        e.select_entry(&id(4));
        e.activate_slot(key("red-pick-1"));
        assert_eq!(
            e.activate_slot(key("red-pick-1")),
            Outcome::Ignored(Ignored::NoSelection)
        );
        assert_eq!(e.occupant_of(key("red-pick-1")), Some(&id(4)));
    }

    #[test]
    fn filled_slot_click_without_selection_clears_with_clear_policy() {
        let mut e = engine_with(DraftRules {
            empty_selection_click: EmptySelectionClick::Clear,
            ..DraftRules::default()
        });
        e.select_entry(&id(4));
        e.activate_slot(key("red-pick-1"));
        assert_eq!(
            e.activate_slot(key("red-pick-1")),
            Outcome::Removed {
                slot: key("red-pick-1"),
                entry: id(4),
            }
        );
        assert!(!e.is_used(&id(4)));
        assert_eq!(
            e.activate_slot(key("red-pick-1")),
            Outcome::Ignored(Ignored::SlotEmpty(key("red-pick-1")))
        );
    }

    // -- placed entries --

    #[test]
    fn select_placed_entry_rejected_by_default() {
        let mut e = engine();
        e.select_entry(&id(1));
        e.activate_slot(key("blue-pick-0"));
        assert_eq!(
            e.select_entry(&id(1)),
            Outcome::Ignored(Ignored::EntryInUse {
                entry: id(1),
                slot: key("blue-pick-0"),
            })
        );
        assert_eq!(e.mode(), Mode::Idle);
    }

    #[test]
    fn toggle_idempotence_with_rearm() {
        let mut e = engine_with(rearm());
        let before = e.snapshot();

        e.select_entry(&id(1));
        e.activate_slot(key("blue-pick-2"));
        e.select_entry(&id(1));
        assert_eq!(
            e.activate_slot(key("blue-pick-2")),
            Outcome::Removed {
                slot: key("blue-pick-2"),
                entry: id(1),
            }
        );
        assert_eq!(e.mode(), Mode::Idle);

        let after = e.snapshot();
        assert_eq!(after.blue, before.blue);
        assert_eq!(after.red, before.red);
        assert_eq!(after.used, before.used);
        assert_eq!(after.selection, None);
    }

    #[test]
    fn reassignment_vacates_source() {
        let mut e = engine_with(rearm());
        e.select_entry(&id(1));
        e.activate_slot(key("blue-ban-0"));
        e.select_entry(&id(1));
        let out = e.activate_slot(key("red-pick-4"));
        assert_eq!(
            out,
            Outcome::Assigned {
                slot: key("red-pick-4"),
                entry: id(1),
                evicted: None,
                vacated: Some(key("blue-ban-0")),
            }
        );
        assert_eq!(e.occupant_of(key("blue-ban-0")), None);
        assert_eq!(e.occupant_of(key("red-pick-4")), Some(&id(1)));
        assert_exclusive(&e);
    }

    #[test]
    fn move_into_occupied_slot_evicts_and_vacates() {
        let mut e = engine_with(rearm());
        e.select_entry(&id(1));
        e.activate_slot(key("blue-pick-0"));
        e.select_entry(&id(2));
        e.activate_slot(key("blue-pick-1"));

        e.select_entry(&id(1));
        let out = e.activate_slot(key("blue-pick-1"));
        assert_eq!(
            out,
            Outcome::Assigned {
                slot: key("blue-pick-1"),
                entry: id(1),
                evicted: Some(id(2)),
                vacated: Some(key("blue-pick-0")),
            }
        );
        assert!(!e.is_used(&id(2)));
        assert_eq!(e.occupant_of(key("blue-pick-0")), None);
        assert_exclusive(&e);
    }

    // -- clear_slot --

    #[test]
    fn clear_never_changes_selection() {
        let mut e = engine();
        e.select_entry(&id(1));
        e.activate_slot(key("red-ban-0"));

        // Idle mode.
        e.clear_slot(key("red-ban-0"));
        assert_eq!(e.selection(), None);

        // Armed mode, slot empty and filled.
        e.select_entry(&id(2));
        e.activate_slot(key("red-ban-1"));
        e.select_entry(&id(3));
        assert_eq!(
            e.clear_slot(key("red-ban-4")),
            Outcome::Ignored(Ignored::SlotEmpty(key("red-ban-4")))
        );
        assert_eq!(e.selection(), Some(&id(3)));
        assert_eq!(
            e.clear_slot(key("red-ban-1")),
            Outcome::Removed {
                slot: key("red-ban-1"),
                entry: id(2),
            }
        );
        assert_eq!(e.selection(), Some(&id(3)));
    }

    #[test]
    fn clear_out_of_range_ignored() {
        let mut e = engine();
        assert_eq!(
            e.clear_slot(SlotKey::ban(Side::Red, 9)),
            Outcome::Ignored(Ignored::SlotOutOfRange(SlotKey::ban(Side::Red, 9)))
        );
    }

    // -- scenarios --

    #[test]
    fn scenario_warrior_blue_pick() {
        let cat = Arc::new(
            Catalogue::new(vec![Entry::new(1u32, "Warrior"), Entry::new(2u32, "Mage")]).unwrap(),
        );
        let mut e = DraftEngine::with_defaults(cat);

        e.select_entry(&id(1));
        assert_eq!(e.selection(), Some(&id(1)));

        e.activate_slot(key("blue-pick-0"));
        assert_eq!(e.occupant_of(key("blue-pick-0")), Some(&id(1)));
        assert_eq!(e.selection(), None);

        assert!(e.select_entry(&id(1)).is_ignored());
        assert_eq!(e.selection(), None);

        assert!(e.activate_slot(key("blue-pick-0")).is_ignored());
        assert_eq!(e.occupant_of(key("blue-pick-0")), Some(&id(1)));

        e.clear_slot(key("blue-pick-0"));
        assert_eq!(e.occupant_of(key("blue-pick-0")), None);
        assert!(!e.is_used(&id(1)));
    }

    #[test]
    fn scenario_red_ban_to_red_pick() {
        let mut e = engine_with(rearm());
        e.select_entry(&id(2));
        e.activate_slot(key("red-ban-0"));
        e.select_entry(&id(2));
        e.activate_slot(key("red-pick-3"));
        assert_eq!(e.occupant_of(key("red-ban-0")), None);
        assert_eq!(e.occupant_of(key("red-pick-3")), Some(&id(2)));
    }

    // -- reset / snapshot / log --

    #[test]
    fn reset_empties_board_and_log() {
        let mut e = engine();
        e.select_entry(&id(1));
        e.activate_slot(key("blue-pick-0"));
        e.select_entry(&id(2));
        assert_eq!(e.reset(), Outcome::Reset);
        assert_eq!(e.occupied().count(), 0);
        assert_eq!(e.selection(), None);
        assert_eq!(e.log().len(), 1);
        assert_eq!(e.log().last().unwrap().action, DraftAction::Reset);
    }

    #[test]
    fn snapshot_reflects_slots() {
        let mut e = engine();
        e.select_entry(&id(1));
        e.activate_slot(key("blue-ban-1"));
        e.select_entry(&id(2));
        e.activate_slot(key("red-pick-4"));
        e.select_entry(&id(3));

        let snap = e.snapshot();
        assert_eq!(snap.blue.bans[1], Some(id(1)));
        assert_eq!(snap.red.picks[4], Some(id(2)));
        assert_eq!(snap.blue.filled(SlotKind::Ban), 1);
        assert_eq!(snap.red.filled(SlotKind::Ban), 0);
        assert_eq!(snap.occupant(key("red-pick-4")), Some(&id(2)));
        assert!(snap.is_used(&id(1)));
        assert!(!snap.is_used(&id(3)));
        assert!(snap.is_armed(&id(3)));
        assert_eq!(snap.recent.len(), 2);
        assert_eq!(e.filled(Side::Red, SlotKind::Pick), 1);
    }

    #[test]
    fn log_records_only_slot_mutations() {
        let mut e = engine();
        e.select_entry(&id(1));
        e.deselect();
        e.select_entry(&id(1));
        e.activate_slot(key("blue-pick-0"));
        e.clear_slot(key("blue-pick-0"));
        e.clear_slot(key("blue-pick-0"));

        let actions: Vec<&DraftAction> = e.log().events().map(|ev| &ev.action).collect();
        assert_eq!(
            actions,
            vec![
                &DraftAction::Assigned {
                    slot: key("blue-pick-0"),
                    entry: id(1),
                    evicted: None,
                    vacated: None,
                },
                &DraftAction::Removed {
                    slot: key("blue-pick-0"),
                    entry: id(1),
                },
            ]
        );
    }

    #[test]
    fn smaller_layout_limits_slots() {
        let mut e = DraftEngine::new(catalogue(), BoardLayout::new(3, 5), DraftRules::default());
        e.select_entry(&id(1));
        assert!(e.activate_slot(key("blue-ban-3")).is_ignored());
        assert!(e.activate_slot(key("blue-ban-2")).changed_board());
        assert_eq!(e.snapshot().blue.bans.len(), 3);
    }

    // -- properties --

    #[derive(Debug, Clone)]
    enum Op {
        Select(u32),
        Toggle(u32),
        Deselect,
        Activate(SlotKey),
        Clear(SlotKey),
        Reset,
    }

    fn slot_strategy() -> impl Strategy<Value = SlotKey> {
        (
            prop_oneof![Just(Side::Blue), Just(Side::Red)],
            prop_oneof![Just(SlotKind::Ban), Just(SlotKind::Pick)],
            0usize..7,
        )
            .prop_map(|(side, kind, index)| SlotKey::new(side, kind, index))
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0u32..6).prop_map(Op::Select),
            2 => (0u32..6).prop_map(Op::Toggle),
            1 => Just(Op::Deselect),
            6 => slot_strategy().prop_map(Op::Activate),
            2 => slot_strategy().prop_map(Op::Clear),
            1 => Just(Op::Reset),
        ]
    }

    fn rules_strategy() -> impl Strategy<Value = DraftRules> {
        (
            prop_oneof![Just(EmptySelectionClick::Ignore), Just(EmptySelectionClick::Clear)],
            prop_oneof![Just(PlacedEntrySelect::Ignore), Just(PlacedEntrySelect::Rearm)],
        )
            .prop_map(|(empty_selection_click, placed_entry_select)| DraftRules {
                empty_selection_click,
                placed_entry_select,
            })
    }

    proptest! {
        #[test]
        fn exclusivity_holds_for_any_sequence(
            rules in rules_strategy(),
            ops in proptest::collection::vec(op_strategy(), 0..80),
        ) {
            let mut e = engine_with(rules);
            for op in ops {
                let selection_before = e.selection().cloned();
                let out = match op {
                    Op::Select(n) => e.select_entry(&id(n)),
                    Op::Toggle(n) => e.toggle_entry(&id(n)),
                    Op::Deselect => e.deselect(),
                    Op::Activate(k) => e.activate_slot(k),
                    Op::Clear(k) => {
                        let out = e.clear_slot(k);
                        prop_assert_eq!(e.selection().cloned(), selection_before.clone());
                        out
                    }
                    Op::Reset => e.reset(),
                };

                let mut seen = HashSet::new();
                for (_, entry) in e.occupied() {
                    prop_assert!(seen.insert(entry.clone()));
                    prop_assert!(e.catalogue().contains(entry));
                }
                for (slot, _) in e.occupied() {
                    prop_assert!(e.layout().contains(slot));
                }
                if let Outcome::Assigned { .. } = out {
                    prop_assert_eq!(e.mode(), Mode::Idle);
                }
                if out.is_ignored() {
                    prop_assert_eq!(e.selection().cloned(), selection_before);
                }
            }
        }
    }
}
