//! Wall connectivity and derived topology queries.
//!
//! Two walls are connected when any endpoint pair lies within
//! [`CONNECT_TOLERANCE`]. Connectivity is resolved through an
//! [`EndpointIndex`] — a multimap from tolerance-quantized endpoint
//! coordinates to wall endpoints — so coupled-move and neighbor queries are
//! hash lookups rather than pairwise distance scans.

pub mod envelope;
pub mod move_wall;
pub mod validate;

pub use envelope::built_envelope;
pub use move_wall::MoveWall;
pub use validate::{validate_topology, TopologyReport};

use std::collections::HashMap;

use crate::math::distance_2d::closest_point_on_segment;
use crate::math::{Point2, CONNECT_TOLERANCE};
use crate::plan::{PlanStore, WallData, WallEnd, WallId};

/// Returns true when any endpoint pair of the two walls coincides within
/// [`CONNECT_TOLERANCE`].
///
/// This is the definitional predicate; bulk queries go through
/// [`EndpointIndex`].
#[must_use]
pub fn connected(w1: &WallData, w2: &WallData) -> bool {
    let ends1 = [w1.start, w1.end];
    let ends2 = [w2.start, w2.end];
    ends1.iter().any(|a| {
        ends2
            .iter()
            .any(|b| ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt() < CONNECT_TOLERANCE)
    })
}

/// Snaps `p` onto the wall's centerline if it lies within `tolerance`.
#[must_use]
pub fn snap_to_wall(p: Point2, wall: &WallData, tolerance: f64) -> Option<Point2> {
    let c = closest_point_on_segment(p, wall.start, wall.end);
    let d = ((p.x - c.x).powi(2) + (p.y - c.y).powi(2)).sqrt();
    (d <= tolerance).then_some(c)
}

/// Spatial index over wall endpoints.
///
/// Endpoints are bucketed by their coordinates quantized to the connection
/// tolerance; a lookup scans the 3×3 cell neighborhood and filters by exact
/// distance, so near-cell-boundary junctions are never missed.
#[derive(Debug, Default)]
pub struct EndpointIndex {
    cells: HashMap<(i64, i64), Vec<(WallId, WallEnd, Point2)>>,
}

impl EndpointIndex {
    /// Builds the index from every wall in the store.
    #[must_use]
    pub fn build(store: &PlanStore) -> Self {
        let mut index = Self::default();
        for (id, wall) in store.walls() {
            index.insert(id, WallEnd::Start, wall.start);
            index.insert(id, WallEnd::End, wall.end);
        }
        index
    }

    fn insert(&mut self, id: WallId, end: WallEnd, p: Point2) {
        self.cells.entry(Self::key(p)).or_default().push((id, end, p));
    }

    #[allow(clippy::cast_possible_truncation)]
    fn key(p: Point2) -> (i64, i64) {
        (
            (p.x / CONNECT_TOLERANCE).round() as i64,
            (p.y / CONNECT_TOLERANCE).round() as i64,
        )
    }

    /// All wall endpoints within [`CONNECT_TOLERANCE`] of `p`.
    #[must_use]
    pub fn endpoints_near(&self, p: Point2) -> Vec<(WallId, WallEnd)> {
        let (kx, ky) = Self::key(p);
        let mut hits = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(bucket) = self.cells.get(&(kx + dx, ky + dy)) else {
                    continue;
                };
                for &(id, end, q) in bucket {
                    let d = ((p.x - q.x).powi(2) + (p.y - q.y).powi(2)).sqrt();
                    if d < CONNECT_TOLERANCE {
                        hits.push((id, end));
                    }
                }
            }
        }
        hits
    }

    /// Ids of walls sharing a junction with `wall` (itself excluded).
    #[must_use]
    pub fn neighbors_of(&self, id: WallId, wall: &WallData) -> Vec<WallId> {
        let mut out = Vec::new();
        for p in [wall.start, wall.end] {
            for (other, _) in self.endpoints_near(p) {
                if other != id && !out.contains(&other) {
                    out.push(other);
                }
            }
        }
        out
    }
}
