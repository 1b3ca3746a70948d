use super::wall::WallId;

slotmap::new_key_type! {
    /// Unique identifier for a door in the plan store.
    pub struct DoorId;
}

/// Which way a door leaf swings when opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwingDirection {
    Left,
    Right,
}

/// Data associated with a door.
///
/// A door has no independent coordinates: `position` is a normalized offset
/// along the referenced wall, and the world position is derived from the
/// wall on read.
#[derive(Debug, Clone, PartialEq)]
pub struct DoorData {
    pub wall: WallId,
    /// Normalized offset along the wall, in `[0, 1]`.
    pub position: f64,
    pub width: f64,
    /// Opening angle of the swing arc in degrees.
    pub swing_angle: f64,
    pub swing_direction: SwingDirection,
}

impl DoorData {
    /// Creates a door at `position` along `wall` with the default
    /// 90-degree right-hand swing.
    #[must_use]
    pub fn new(wall: WallId, position: f64, width: f64) -> Self {
        Self {
            wall,
            position: position.clamp(0.0, 1.0),
            width,
            swing_angle: 90.0,
            swing_direction: SwingDirection::Right,
        }
    }
}
