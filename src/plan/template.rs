use crate::zones::ZoneId;

use super::room::{Room, RoomCategory};
use super::wall::WallData;

/// A width/height pair in meters.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Creates a size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The corner (or center) of a room rectangle held fixed during a resize.
///
/// Corner names follow the plan compass convention: the minimum-x/minimum-y
/// corner is north-east.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Ne,
    Nw,
    Se,
    Sw,
    Center,
}

/// A room within a reference design, with its resize and placement intent.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomTemplate {
    pub room: Room,
    /// Zones this room should be nudged toward when adapted.
    pub zone_intent: Vec<ZoneId>,
    pub min_size: Size,
    pub max_size: Size,
    pub anchor: Anchor,
}

/// A door within a reference design, referencing a wall by index into the
/// template's wall list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateDoor {
    pub wall_index: usize,
    /// Normalized offset along the wall, in `[0, 1]`.
    pub position: f64,
    pub width: f64,
}

/// An immutable reference floor-plan design.
///
/// Templates are fitted onto a target footprint by uniform scale and
/// centering; they are never distorted per-axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: String,
    pub base_envelope: Size,
    pub walls: Vec<WallData>,
    pub rooms: Vec<RoomTemplate>,
    pub doors: Vec<TemplateDoor>,
}

impl Template {
    /// Number of bedrooms in the design.
    #[must_use]
    pub fn bedroom_count(&self) -> usize {
        self.rooms
            .iter()
            .filter(|r| r.room.category == RoomCategory::Bedroom)
            .count()
    }
}

/// A read-only catalog of named reference designs.
///
/// Curating catalog content is outside the kernel; this is the query
/// surface the kernel requires of a catalog provider.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    /// Creates a catalog from a list of templates.
    #[must_use]
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// Looks up a template by id.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Returns every template with the given bedroom count.
    pub fn by_bedroom_count(&self, bedrooms: usize) -> impl Iterator<Item = &Template> {
        self.templates
            .iter()
            .filter(move |t| t.bedroom_count() == bedrooms)
    }

    /// Iterates over all templates.
    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }
}

/// Convenience constructor for a square-ish room template used across tests.
#[cfg(test)]
#[must_use]
pub(crate) fn room_template(
    category: RoomCategory,
    label: &str,
    rect: crate::math::Rect,
    anchor: Anchor,
) -> RoomTemplate {
    RoomTemplate {
        room: Room::new(category, label, rect),
        zone_intent: Vec::new(),
        min_size: Size::new(rect.w * 0.5, rect.h * 0.5),
        max_size: Size::new(rect.w * 2.0, rect.h * 2.0),
        anchor,
    }
}
