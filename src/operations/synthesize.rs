use crate::math::distance_2d::point_to_segment_dist;
use crate::math::{Point2, Rect};
use crate::plan::{DoorData, PlanStore, RoomCategory, RoomId, WallData, WallId};

/// How far a room edge may sit from the global bounding box and still be
/// classified external.
const EXTERNAL_EDGE_TOLERANCE: f64 = 0.05;

/// How close a wall endpoint must be to a room boundary to host its door.
const DOOR_ATTACH_TOLERANCE: f64 = 0.1;

const DOOR_WIDTH_DEFAULT: f64 = 0.9;
const DOOR_WIDTH_LIVING: f64 = 1.2;

/// Standard masonry thicknesses for synthesized walls.
const EXTERNAL_WALL_THICKNESS: f64 = 0.23;
const INTERNAL_WALL_THICKNESS: f64 = 0.115;

/// Derives a wall set and door placements from final room rectangles.
///
/// Every room contributes its four boundary edges; an edge lying on the
/// global bounding box of all rooms (within tolerance on the relevant axis)
/// becomes external. Shared edges between neighboring rooms are emitted
/// once per room — colinear merging is deliberately not performed. Each
/// room then receives one door on the first wall with an endpoint near its
/// boundary, at the wall midpoint.
#[derive(Debug)]
pub struct SynthesizeStructure<'a> {
    rooms: &'a [(RoomId, Rect, RoomCategory)],
}

impl<'a> SynthesizeStructure<'a> {
    /// Creates the synthesis operation over rooms already in a store.
    #[must_use]
    pub fn new(rooms: &'a [(RoomId, Rect, RoomCategory)]) -> Self {
        Self { rooms }
    }

    /// Executes the synthesis, adding walls and doors to `store`.
    pub fn execute(&self, store: &mut PlanStore) {
        let Some(bounds) = self
            .rooms
            .iter()
            .map(|(_, r, _)| *r)
            .reduce(|a, b| a.union(&b))
        else {
            return;
        };

        let mut wall_ids: Vec<WallId> = Vec::with_capacity(self.rooms.len() * 4);
        for &(room_id, rect, _) in self.rooms {
            for (start, end, on_boundary) in rect_edges(rect, bounds) {
                let thickness = if on_boundary {
                    EXTERNAL_WALL_THICKNESS
                } else {
                    INTERNAL_WALL_THICKNESS
                };
                let mut wall = WallData::new(start, end, thickness, on_boundary);
                wall.adjacent_rooms.push(room_id);
                wall_ids.push(store.add_wall(wall));
            }
        }

        for &(_, rect, category) in self.rooms {
            let width = if category == RoomCategory::Living {
                DOOR_WIDTH_LIVING
            } else {
                DOOR_WIDTH_DEFAULT
            };
            let host = wall_ids.iter().find(|&&id| {
                store
                    .wall(id)
                    .is_ok_and(|w| touches_boundary(w, rect, DOOR_ATTACH_TOLERANCE))
            });
            if let Some(&wall) = host {
                store.add_door(DoorData::new(wall, 0.5, width));
            }
        }
    }
}

/// The four edges of a rectangle with their external classification.
///
/// An edge is external when it lies on the global bounding box within
/// [`EXTERNAL_EDGE_TOLERANCE`] on the axis perpendicular to it.
fn rect_edges(r: Rect, bounds: Rect) -> [(Point2, Point2, bool); 4] {
    let (x0, y0) = (r.x, r.y);
    let (x1, y1) = (r.x + r.w, r.y + r.h);
    let (bx0, by0) = (bounds.x, bounds.y);
    let (bx1, by1) = (bounds.x + bounds.w, bounds.y + bounds.h);
    [
        // North edge (minimum y).
        (
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            (y0 - by0).abs() <= EXTERNAL_EDGE_TOLERANCE,
        ),
        // West edge (maximum x).
        (
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            (x1 - bx1).abs() <= EXTERNAL_EDGE_TOLERANCE,
        ),
        // South edge (maximum y).
        (
            Point2::new(x1, y1),
            Point2::new(x0, y1),
            (y1 - by1).abs() <= EXTERNAL_EDGE_TOLERANCE,
        ),
        // East edge (minimum x).
        (
            Point2::new(x0, y1),
            Point2::new(x0, y0),
            (x0 - bx0).abs() <= EXTERNAL_EDGE_TOLERANCE,
        ),
    ]
}

/// True when either wall endpoint lies within `tol` of the rectangle's
/// boundary.
fn touches_boundary(wall: &WallData, rect: Rect, tol: f64) -> bool {
    let corners = [
        Point2::new(rect.x, rect.y),
        Point2::new(rect.x + rect.w, rect.y),
        Point2::new(rect.x + rect.w, rect.y + rect.h),
        Point2::new(rect.x, rect.y + rect.h),
    ];
    [wall.start, wall.end].into_iter().any(|p| {
        (0..4).any(|i| point_to_segment_dist(p, corners[i], corners[(i + 1) % 4]) <= tol)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::plan::Room;
    use crate::topology::{built_envelope, validate_topology};

    fn build(rooms: &[(Rect, RoomCategory)]) -> PlanStore {
        let mut store = PlanStore::new();
        let mut tagged = Vec::new();
        for (i, &(rect, category)) in rooms.iter().enumerate() {
            let id = store.add_room(Room::new(category, format!("room-{i}"), rect));
            tagged.push((id, rect, category));
        }
        SynthesizeStructure::new(&tagged).execute(&mut store);
        store
    }

    #[test]
    fn each_room_emits_four_walls() {
        let store = build(&[
            (Rect::new(0.0, 0.0, 4.0, 3.0), RoomCategory::Living),
            (Rect::new(4.0, 0.0, 4.0, 3.0), RoomCategory::Kitchen),
        ]);
        assert_eq!(store.wall_count(), 8);
    }

    #[test]
    fn perimeter_edges_are_external() {
        let store = build(&[
            (Rect::new(0.0, 0.0, 4.0, 3.0), RoomCategory::Living),
            (Rect::new(4.0, 0.0, 4.0, 3.0), RoomCategory::Kitchen),
        ]);
        let external = store.walls().filter(|(_, w)| w.is_external).count();
        // 3 of each room's 4 edges lie on the 8x3 bounding box; the two
        // copies of the shared x=4 edge are internal.
        assert_eq!(external, 6);
        let env = built_envelope(&store);
        assert!((env.w - 8.0).abs() < 1e-10);
        assert!((env.h - 3.0).abs() < 1e-10);
    }

    #[test]
    fn synthesized_perimeter_passes_topology_validation() {
        let store = build(&[
            (Rect::new(0.0, 0.0, 4.0, 3.0), RoomCategory::Living),
            (Rect::new(4.0, 0.0, 4.0, 3.0), RoomCategory::Kitchen),
        ]);
        let report = validate_topology(&store);
        assert!(report.is_valid, "errors: {:?}", report.errors);
    }

    #[test]
    fn every_room_gets_one_door() {
        let store = build(&[
            (Rect::new(0.0, 0.0, 4.0, 3.0), RoomCategory::Living),
            (Rect::new(4.0, 0.0, 4.0, 3.0), RoomCategory::Kitchen),
            (Rect::new(0.0, 3.0, 8.0, 3.0), RoomCategory::Bedroom),
        ]);
        assert_eq!(store.doors().count(), 3);
    }

    #[test]
    fn living_space_doors_are_wider() {
        let store = build(&[
            (Rect::new(0.0, 0.0, 4.0, 3.0), RoomCategory::Living),
            (Rect::new(4.0, 0.0, 4.0, 3.0), RoomCategory::Kitchen),
        ]);
        let widths: Vec<f64> = store.doors().map(|(_, d)| d.width).collect();
        assert!(widths.contains(&DOOR_WIDTH_LIVING));
        assert!(widths.contains(&DOOR_WIDTH_DEFAULT));
    }

    #[test]
    fn doors_sit_at_wall_midpoints() {
        let store = build(&[(Rect::new(0.0, 0.0, 4.0, 3.0), RoomCategory::Study)]);
        for (_, door) in store.doors() {
            assert!((door.position - 0.5).abs() < 1e-10);
        }
    }

    #[test]
    fn no_rooms_synthesizes_nothing() {
        let mut store = PlanStore::new();
        SynthesizeStructure::new(&[]).execute(&mut store);
        assert_eq!(store.wall_count(), 0);
        assert_eq!(store.doors().count(), 0);
    }
}
