use crate::plan::PlanStore;

use super::EndpointIndex;

/// Result of a topology validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Checks that the external walls form a closed loop.
///
/// Every external wall must share junctions with at least two other
/// external walls; one message is collected per under-connected wall.
#[must_use]
pub fn validate_topology(store: &PlanStore) -> TopologyReport {
    let index = EndpointIndex::build(store);
    let mut errors = Vec::new();

    for (id, wall) in store.walls().filter(|(_, w)| w.is_external) {
        let external_neighbors = index
            .neighbors_of(id, wall)
            .into_iter()
            .filter(|&other| store.wall(other).is_ok_and(|w| w.is_external))
            .count();
        if external_neighbors < 2 {
            errors.push(format!(
                "external wall from ({:.2}, {:.2}) to ({:.2}, {:.2}) has {external_neighbors} external neighbor(s), expected at least 2",
                wall.start.x, wall.start.y, wall.end.x, wall.end.y
            ));
        }
    }

    TopologyReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::plan::WallData;

    fn external(sx: f64, sy: f64, ex: f64, ey: f64) -> WallData {
        WallData::external(Point2::new(sx, sy), Point2::new(ex, ey), 0.23)
    }

    #[test]
    fn closed_rectangle_is_valid() {
        let mut store = PlanStore::new();
        store.add_wall(external(0.0, 0.0, 8.0, 0.0));
        store.add_wall(external(8.0, 0.0, 8.0, 6.0));
        store.add_wall(external(8.0, 6.0, 0.0, 6.0));
        store.add_wall(external(0.0, 6.0, 0.0, 0.0));
        let report = validate_topology(&store);
        assert!(report.is_valid, "errors: {:?}", report.errors);
    }

    #[test]
    fn open_loop_reports_each_dangling_wall() {
        let mut store = PlanStore::new();
        store.add_wall(external(0.0, 0.0, 8.0, 0.0));
        store.add_wall(external(8.0, 0.0, 8.0, 6.0));
        // Third side missing: both remaining walls have one neighbor each.
        let report = validate_topology(&store);
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn internal_walls_do_not_count_toward_the_loop() {
        let mut store = PlanStore::new();
        store.add_wall(external(0.0, 0.0, 8.0, 0.0));
        store.add_wall(WallData::internal(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 6.0),
            0.1,
        ));
        store.add_wall(WallData::internal(
            Point2::new(8.0, 0.0),
            Point2::new(8.0, 6.0),
            0.1,
        ));
        let report = validate_topology(&store);
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn empty_store_is_trivially_valid() {
        let report = validate_topology(&PlanStore::new());
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }
}
