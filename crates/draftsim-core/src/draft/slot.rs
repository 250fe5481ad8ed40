// Slot addressing: sides, slot kinds, and typed composite slot keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of ban slots per side.
pub const DEFAULT_BAN_SLOTS: usize = 5;

/// Default number of pick slots per side.
pub const DEFAULT_PICK_SLOTS: usize = 5;

// ---------------------------------------------------------------------------
// Side / SlotKind
// ---------------------------------------------------------------------------

/// One of the two opposing rosters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Blue,
    Red,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Blue, Side::Red];

    /// Lowercase label used in slot keys ("blue" / "red").
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Blue => "blue",
            Side::Red => "red",
        }
    }

    /// Capitalised name for people ("Blue" / "Red").
    pub fn title(self) -> &'static str {
        match self {
            Side::Blue => "Blue",
            Side::Red => "Red",
        }
    }
}

/// The two slot kinds. Functionally identical containers; only capacity and
/// presentation differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Ban,
    Pick,
}

impl SlotKind {
    pub const ALL: [SlotKind; 2] = [SlotKind::Ban, SlotKind::Pick];

    pub fn as_str(self) -> &'static str {
        match self {
            SlotKind::Ban => "ban",
            SlotKind::Pick => "pick",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SlotKind::Ban => "Bans",
            SlotKind::Pick => "Picks",
        }
    }
}

// ---------------------------------------------------------------------------
// SlotKey
// ---------------------------------------------------------------------------

/// Address of a single slot: (side, kind, index).
///
/// Ordering follows side, then kind, then index, which is also the order the
/// board is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub side: Side,
    pub kind: SlotKind,
    pub index: usize,
}

impl SlotKey {
    pub fn new(side: Side, kind: SlotKind, index: usize) -> Self {
        SlotKey { side, kind, index }
    }

    pub fn ban(side: Side, index: usize) -> Self {
        SlotKey::new(side, SlotKind::Ban, index)
    }

    pub fn pick(side: Side, index: usize) -> Self {
        SlotKey::new(side, SlotKind::Pick, index)
    }

    /// One-based label for people, e.g. "Blue pick 1".
    pub fn label(&self) -> String {
        format!(
            "{} {} {}",
            self.side.title(),
            self.kind.as_str(),
            self.index + 1
        )
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.side.as_str(), self.kind.as_str(), self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotKeyParseError {
    #[error("slot key `{0}` must look like `<side>-<kind>-<index>`")]
    Malformed(String),

    #[error("unknown side `{0}` (expected `blue` or `red`)")]
    UnknownSide(String),

    #[error("unknown slot kind `{0}` (expected `ban` or `pick`)")]
    UnknownKind(String),

    #[error("invalid slot index `{0}`")]
    InvalidIndex(String),
}

impl FromStr for SlotKey {
    type Err = SlotKeyParseError;

    /// Parse keys like `blue-pick-0` or `red-ban-3` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let parts: Vec<&str> = lower.split('-').collect();
        let [side, kind, index] = parts.as_slice() else {
            return Err(SlotKeyParseError::Malformed(s.to_string()));
        };

        let side = match *side {
            "blue" => Side::Blue,
            "red" => Side::Red,
            other => return Err(SlotKeyParseError::UnknownSide(other.to_string())),
        };
        let kind = match *kind {
            "ban" => SlotKind::Ban,
            "pick" => SlotKind::Pick,
            other => return Err(SlotKeyParseError::UnknownKind(other.to_string())),
        };
        let index = index
            .parse::<usize>()
            .map_err(|_| SlotKeyParseError::InvalidIndex(index.to_string()))?;

        Ok(SlotKey { side, kind, index })
    }
}

// ---------------------------------------------------------------------------
// BoardLayout
// ---------------------------------------------------------------------------

/// Slot capacities per side. Both sides always share the same layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub bans: usize,
    pub picks: usize,
}

impl Default for BoardLayout {
    fn default() -> Self {
        BoardLayout {
            bans: DEFAULT_BAN_SLOTS,
            picks: DEFAULT_PICK_SLOTS,
        }
    }
}

impl BoardLayout {
    pub fn new(bans: usize, picks: usize) -> Self {
        BoardLayout { bans, picks }
    }

    /// Number of slots of `kind` on one side.
    pub fn capacity(&self, kind: SlotKind) -> usize {
        match kind {
            SlotKind::Ban => self.bans,
            SlotKind::Pick => self.picks,
        }
    }

    /// Whether `key` addresses a slot that exists on this board.
    pub fn contains(&self, key: SlotKey) -> bool {
        key.index < self.capacity(key.kind)
    }

    /// Total number of slots across both sides.
    pub fn total(&self) -> usize {
        (self.bans + self.picks) * Side::ALL.len()
    }

    /// Every slot on one side: bans first, then picks.
    pub fn keys_for(&self, side: Side) -> impl Iterator<Item = SlotKey> + '_ {
        SlotKind::ALL.into_iter().flat_map(move |kind| {
            (0..self.capacity(kind)).map(move |index| SlotKey::new(side, kind, index))
        })
    }

    /// Every slot on the board in display order (blue bans, blue picks, red
    /// bans, red picks).
    pub fn keys(&self) -> impl Iterator<Item = SlotKey> + '_ {
        Side::ALL.into_iter().flat_map(move |side| self.keys_for(side))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_key_display() {
        assert_eq!(SlotKey::pick(Side::Blue, 0).to_string(), "blue-pick-0");
        assert_eq!(SlotKey::ban(Side::Red, 3).to_string(), "red-ban-3");
    }

    #[test]
    fn slot_key_label_is_one_based() {
        assert_eq!(SlotKey::pick(Side::Blue, 0).label(), "Blue pick 1");
        assert_eq!(SlotKey::ban(Side::Red, 4).label(), "Red ban 5");
    }

    #[test]
    fn side_title_is_capitalised() {
        assert_eq!(Side::Blue.title(), "Blue");
        assert_eq!(Side::Red.title(), "Red");
    }

    #[test]
    fn slot_key_parses_display_form() {
        let key: SlotKey = "red-pick-3".parse().unwrap();
        assert_eq!(key, SlotKey::pick(Side::Red, 3));

        let key: SlotKey = " Blue-Ban-4 ".parse().unwrap();
        assert_eq!(key, SlotKey::ban(Side::Blue, 4));
    }

    #[test]
    fn slot_key_parse_errors() {
        assert_eq!(
            "blue-pick".parse::<SlotKey>(),
            Err(SlotKeyParseError::Malformed("blue-pick".into()))
        );
        assert_eq!(
            "left-pick-0".parse::<SlotKey>(),
            Err(SlotKeyParseError::UnknownSide("left".into()))
        );
        assert_eq!(
            "blue-swap-0".parse::<SlotKey>(),
            Err(SlotKeyParseError::UnknownKind("swap".into()))
        );
        assert_eq!(
            "blue-pick-x".parse::<SlotKey>(),
            Err(SlotKeyParseError::InvalidIndex("x".into()))
        );
        assert!("blue-pick--1".parse::<SlotKey>().is_err());
    }

    #[test]
    fn layout_contains_respects_capacity() {
        let layout = BoardLayout::new(3, 5);
        assert!(layout.contains(SlotKey::ban(Side::Blue, 2)));
        assert!(!layout.contains(SlotKey::ban(Side::Blue, 3)));
        assert!(layout.contains(SlotKey::pick(Side::Red, 4)));
        assert!(!layout.contains(SlotKey::pick(Side::Red, 5)));
    }

    #[test]
    fn layout_keys_in_display_order() {
        let layout = BoardLayout::new(1, 2);
        let keys: Vec<String> = layout.keys().map(|k| k.to_string()).collect();
        assert_eq!(
            keys,
            vec![
                "blue-ban-0",
                "blue-pick-0",
                "blue-pick-1",
                "red-ban-0",
                "red-pick-0",
                "red-pick-1",
            ]
        );
        assert_eq!(layout.total(), 6);
    }

    #[test]
    fn default_layout_is_five_and_five() {
        let layout = BoardLayout::default();
        assert_eq!(layout.bans, 5);
        assert_eq!(layout.picks, 5);
        assert_eq!(layout.keys().count(), 20);
    }

    #[test]
    fn slot_key_ordering_matches_display_order() {
        let layout = BoardLayout::default();
        let mut sorted: Vec<SlotKey> = layout.keys().collect();
        sorted.sort();
        let in_order: Vec<SlotKey> = layout.keys().collect();
        assert_eq!(sorted, in_order);
    }
}
