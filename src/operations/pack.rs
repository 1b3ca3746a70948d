use tracing::{debug, warn};

use crate::compliance::rules::zone_rule;
use crate::error::{InputError, Result};
use crate::math::Rect;
use crate::plan::{Footprint, Room, RoomCategory};
use crate::zones::{Zone, ZoneId};

/// Free rectangles smaller than this on either side are pruned.
const MIN_SPLIT: f64 = 0.01;

/// Target width/height ratio for a requested room.
const TARGET_ASPECT: f64 = 1.4;

/// A request for one room of roughly `target_area` square meters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RoomRequest {
    pub category: RoomCategory,
    pub label: String,
    pub target_area: f64,
    /// Lower values place earlier; defaults to 5.
    pub priority: u8,
}

impl RoomRequest {
    /// Creates a request with the default priority.
    #[must_use]
    pub fn new(category: RoomCategory, label: impl Into<String>, target_area: f64) -> Self {
        Self {
            category,
            label: label.into(),
            target_area,
            priority: 5,
        }
    }

    /// Overrides the placement priority.
    #[must_use]
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }
}

/// A packed room with the zone it landed in.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRoom {
    pub room: Room,
    /// Zone the placer targeted; the derived zone of the final rectangle
    /// may differ after optimization.
    pub zone: ZoneId,
    /// Set when the guaranteed-termination fallback placed this room in the
    /// center regardless of remaining space; the geometry may overlap.
    pub forced: bool,
}

/// One free rectangle in the guillotine pool, tagged with its source zone.
#[derive(Debug, Clone, Copy)]
struct FreeRect {
    zone: ZoneId,
    rect: Rect,
}

/// Greedy guillotine bin-packing of room requests into the compass grid.
///
/// The free-rectangle pool is seeded with the nine zone rectangles and each
/// request tries its rule-preferred zones first, so placement is
/// compliance-aware rather than purely area-greedy. Placement always
/// terminates: a request no zone can hold is force-centered and flagged.
#[derive(Debug)]
pub struct PackRooms<'a> {
    footprint: Footprint,
    requests: &'a [RoomRequest],
}

impl<'a> PackRooms<'a> {
    /// Creates a new `PackRooms` operation.
    #[must_use]
    pub fn new(footprint: Footprint, requests: &'a [RoomRequest]) -> Self {
        Self {
            footprint,
            requests,
        }
    }

    /// Executes the packing.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyRequestList`] for an empty request list
    /// and [`InputError::InvalidTargetArea`] for a non-positive or
    /// non-finite target area.
    pub fn execute(&self) -> Result<Vec<PlacedRoom>> {
        if self.requests.is_empty() {
            return Err(InputError::EmptyRequestList.into());
        }
        for request in self.requests {
            if !(request.target_area.is_finite() && request.target_area > 0.0) {
                return Err(InputError::InvalidTargetArea {
                    label: request.label.clone(),
                    area: request.target_area,
                }
                .into());
            }
        }

        let zones = self.footprint.zones();
        let mut pool: Vec<FreeRect> = zones
            .iter()
            .map(|z| FreeRect {
                zone: z.id,
                rect: z.rect,
            })
            .collect();

        // Stable sort: ties keep input order for deterministic fixtures.
        let mut ordered: Vec<&RoomRequest> = self.requests.iter().collect();
        ordered.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| b.target_area.total_cmp(&a.target_area))
        });

        let mut placed = Vec::with_capacity(ordered.len());
        for request in ordered {
            placed.push(place_request(request, &zones, &mut pool, &self.footprint));
        }
        Ok(placed)
    }
}

fn place_request(
    request: &RoomRequest,
    zones: &[Zone; 9],
    pool: &mut Vec<FreeRect>,
    footprint: &Footprint,
) -> PlacedRoom {
    let want_w = (request.target_area * TARGET_ASPECT).sqrt();
    let want_h = (request.target_area / TARGET_ASPECT).sqrt();

    // Rule-preferred zones first, then allowed, then the rest in grid order.
    let mut try_order: Vec<ZoneId> = Vec::with_capacity(9);
    if let Some(rule) = zone_rule(request.category) {
        try_order.extend_from_slice(rule.preferred);
        try_order.extend_from_slice(rule.allowed);
    }
    for id in ZoneId::ALL {
        if !try_order.contains(&id) {
            try_order.push(id);
        }
    }

    for zone in try_order {
        let slot = pool
            .iter()
            .position(|f| f.zone == zone && f.rect.w >= want_w && f.rect.h >= want_h);
        if let Some(i) = slot {
            let rect = place_in(pool, i, want_w, want_h);
            debug!(room = %request.label, zone = zone.label(), "placed in zone");
            return PlacedRoom {
                room: Room::new(request.category, request.label.clone(), rect),
                zone,
                forced: false,
            };
        }
    }

    // Fallback: the largest remaining free rectangle, if it can hold at
    // least half the requested area, shrinking the room to fit.
    let largest = pool
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.rect.area().total_cmp(&b.rect.area()));
    if let Some((i, f)) = largest {
        if f.rect.area() >= request.target_area / 2.0 {
            let zone = f.zone;
            let w = want_w.min(f.rect.w);
            let h = want_h.min(f.rect.h);
            let rect = place_in(pool, i, w, h);
            debug!(room = %request.label, zone = zone.label(), "placed shrunk in largest free rect");
            return PlacedRoom {
                room: Room::new(request.category, request.label.clone(), rect),
                zone,
                forced: false,
            };
        }
    }

    // Guaranteed termination: force-center in C. The result may overlap
    // previously placed rooms; callers surface the flag as a warning.
    warn!(room = %request.label, "no free space; force-centering in zone C");
    let c = zones[4].rect;
    let w = want_w.min(footprint.width);
    let h = want_h.min(footprint.height);
    let center = c.center();
    let rect = Rect::new(center.x - w / 2.0, center.y - h / 2.0, w, h);
    PlacedRoom {
        room: Room::new(request.category, request.label.clone(), rect),
        zone: ZoneId::C,
        forced: true,
    }
}

/// Places a `w`×`h` room at the origin of pool slot `i` and guillotine-
/// splits the remainder into a right strip and a bottom strip.
fn place_in(pool: &mut Vec<FreeRect>, i: usize, w: f64, h: f64) -> Rect {
    let free = pool.swap_remove(i);
    let rect = Rect::new(free.rect.x, free.rect.y, w, h);

    let right = Rect::new(free.rect.x + w, free.rect.y, free.rect.w - w, h);
    let bottom = Rect::new(
        free.rect.x,
        free.rect.y + h,
        free.rect.w,
        free.rect.h - h,
    );
    for strip in [right, bottom] {
        if strip.w >= MIN_SPLIT && strip.h >= MIN_SPLIT {
            pool.push(FreeRect {
                zone: free.zone,
                rect: strip,
            });
        }
    }
    rect
}
