use crate::math::Rect;

slotmap::new_key_type! {
    /// Unique identifier for a room in the plan store.
    pub struct RoomId;
}

/// Functional classification of a room.
///
/// Categories drive the compliance rule lookup; a category with no rule
/// entry (e.g. circulation) is neutral everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomCategory {
    Living,
    Kitchen,
    Bedroom,
    WetRoom,
    Worship,
    Circulation,
    Study,
    Dining,
}

impl RoomCategory {
    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Living => "living",
            Self::Kitchen => "kitchen",
            Self::Bedroom => "bedroom",
            Self::WetRoom => "wet room",
            Self::Worship => "worship",
            Self::Circulation => "circulation",
            Self::Study => "study",
            Self::Dining => "dining",
        }
    }
}

/// A room: a categorized, labelled rectangle.
///
/// Zone membership, compliance score, and violation state are *not* stored
/// here; they are derived on read from `(rect, category)` by the
/// `compliance` module, so they can never go stale after an edit.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Room {
    pub category: RoomCategory,
    pub label: String,
    pub rect: Rect,
}

impl Room {
    /// Creates a new room.
    #[must_use]
    pub fn new(category: RoomCategory, label: impl Into<String>, rect: Rect) -> Self {
        Self {
            category,
            label: label.into(),
            rect,
        }
    }
}
