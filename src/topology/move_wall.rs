use std::collections::HashSet;

use crate::error::TopologyError;
use crate::math::Vector2;
use crate::plan::{PlanStore, WallEnd, WallId};

use super::EndpointIndex;

/// Translates a wall while keeping every junction intact.
///
/// The wall's own endpoints move by `offset`; every wall sharing one of the
/// original endpoints has *only the matching endpoint* translated by the
/// same offset, so connectivity is preserved and no other geometry changes.
#[derive(Debug)]
pub struct MoveWall {
    wall: WallId,
    offset: Vector2,
}

impl MoveWall {
    /// Creates a new `MoveWall` operation.
    #[must_use]
    pub fn new(wall: WallId, offset: Vector2) -> Self {
        Self { wall, offset }
    }

    /// Executes the move, modifying the store in-place.
    ///
    /// The operation is atomic: coupled endpoint updates are collected
    /// against the pre-move geometry before anything is written, and an
    /// unknown wall id leaves the store untouched.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if the wall id is not in the
    /// store.
    pub fn execute(&self, store: &mut PlanStore) -> Result<(), TopologyError> {
        let moved = store.wall(self.wall)?.clone();
        let index = EndpointIndex::build(store);

        // Collect coupled endpoints against pre-move positions.
        let mut updates: Vec<(WallId, WallEnd)> = Vec::new();
        let mut seen: HashSet<(WallId, WallEnd)> = HashSet::new();
        for p in [moved.start, moved.end] {
            for (id, end) in index.endpoints_near(p) {
                if id != self.wall && seen.insert((id, end)) {
                    updates.push((id, end));
                }
            }
        }

        // Apply: the wall itself, then every coupled endpoint.
        {
            let wall = store.wall_mut(self.wall)?;
            wall.start.x += self.offset.x;
            wall.start.y += self.offset.y;
            wall.end.x += self.offset.x;
            wall.end.y += self.offset.y;
        }
        for (id, end) in updates {
            let wall = store.wall_mut(id)?;
            match end {
                WallEnd::Start => {
                    wall.start.x += self.offset.x;
                    wall.start.y += self.offset.y;
                }
                WallEnd::End => {
                    wall.end.x += self.offset.x;
                    wall.end.y += self.offset.y;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::plan::WallData;
    use crate::topology::connected;

    const TOL: f64 = 1e-10;

    fn l_shaped_store() -> (PlanStore, WallId, WallId, WallId) {
        let mut store = PlanStore::new();
        let a = store.add_wall(WallData::external(
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            0.23,
        ));
        let b = store.add_wall(WallData::external(
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 3.0),
            0.23,
        ));
        // Far away, untouched by any move of `a`.
        let c = store.add_wall(WallData::internal(
            Point2::new(10.0, 10.0),
            Point2::new(12.0, 10.0),
            0.1,
        ));
        (store, a, b, c)
    }

    #[test]
    fn coupled_endpoint_moves_with_wall() {
        let (mut store, a, b, _) = l_shaped_store();
        MoveWall::new(a, Vector2::new(0.5, 0.25))
            .execute(&mut store)
            .unwrap();

        let wall_a = store.wall(a).unwrap();
        let wall_b = store.wall(b).unwrap();
        // Wall a fully translated.
        assert!((wall_a.start.x - 0.5).abs() < TOL);
        assert!((wall_a.end.x - 4.5).abs() < TOL);
        // Wall b: only the shared endpoint moved.
        assert!((wall_b.start.x - 4.5).abs() < TOL);
        assert!((wall_b.start.y - 0.25).abs() < TOL);
        assert!((wall_b.end.x - 4.0).abs() < TOL);
        assert!((wall_b.end.y - 3.0).abs() < TOL);
        // Connectivity invariant preserved.
        assert!(connected(wall_a, wall_b));
    }

    #[test]
    fn unrelated_walls_are_untouched() {
        let (mut store, a, _, c) = l_shaped_store();
        let before = store.wall(c).unwrap().clone();
        MoveWall::new(a, Vector2::new(1.0, 1.0))
            .execute(&mut store)
            .unwrap();
        assert_eq!(*store.wall(c).unwrap(), before);
    }

    #[test]
    fn unknown_wall_id_leaves_store_unchanged() {
        // Concrete scenario: moving a missing wall fails without mutation.
        let (mut store, a, b, c) = l_shaped_store();
        let mut other = PlanStore::new();
        let missing = other.add_wall(WallData::internal(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            0.1,
        ));

        let before: Vec<WallData> = [a, b, c]
            .iter()
            .map(|&id| store.wall(id).unwrap().clone())
            .collect();
        let result = MoveWall::new(missing, Vector2::new(1.0, 0.0)).execute(&mut store);
        assert!(result.is_err());
        for (id, want) in [a, b, c].iter().zip(before.iter()) {
            assert_eq!(store.wall(*id).unwrap(), want);
        }
    }

    #[test]
    fn three_way_junction_stays_connected() {
        let mut store = PlanStore::new();
        let a = store.add_wall(WallData::internal(
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            0.1,
        ));
        let b = store.add_wall(WallData::internal(
            Point2::new(4.0, 0.0),
            Point2::new(8.0, 0.0),
            0.1,
        ));
        let c = store.add_wall(WallData::internal(
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 5.0),
            0.1,
        ));
        MoveWall::new(a, Vector2::new(0.0, 1.0))
            .execute(&mut store)
            .unwrap();
        let wall_a = store.wall(a).unwrap().clone();
        for id in [b, c] {
            assert!(
                connected(&wall_a, store.wall(id).unwrap()),
                "junction broken after move"
            );
        }
    }
}
