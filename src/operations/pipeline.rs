use tracing::debug;

use crate::compliance::{score_report, ComplianceReport};
use crate::error::Result;
use crate::plan::{Footprint, PlanStore};
use crate::zones::Zone;

use super::optimize::OptimizeLayout;
use super::pack::{PackRooms, RoomRequest};
use super::synthesize::SynthesizeStructure;

/// A fully generated freeform plan.
#[derive(Debug)]
pub struct FloorPlan {
    pub footprint: Footprint,
    pub store: PlanStore,
    pub zones: [Zone; 9],
    pub report: ComplianceReport,
    /// Degradations the caller should surface: forced placements and an
    /// optimizer short-circuit.
    pub warnings: Vec<String>,
}

/// End-to-end freeform generation: pack, optimize, synthesize, score.
///
/// Both this path and template adaptation terminate in the same scoring
/// entry point, so externally produced candidates can be validated through
/// an identical pipeline tail.
#[derive(Debug)]
pub struct GeneratePlan<'a> {
    footprint: Footprint,
    requests: &'a [RoomRequest],
    iterations: u32,
    seed: u64,
}

impl<'a> GeneratePlan<'a> {
    /// Creates a generation pipeline with the default optimizer settings.
    #[must_use]
    pub fn new(footprint: Footprint, requests: &'a [RoomRequest]) -> Self {
        Self {
            footprint,
            requests,
            iterations: super::optimize::DEFAULT_ITERATIONS,
            seed: 0,
        }
    }

    /// Sets the optimizer seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the optimizer iteration budget.
    #[must_use]
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Executes the pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error only for malformed input (empty request list,
    /// non-positive target area); constraint pressure degrades to flagged
    /// placements instead of failing.
    pub fn execute(&self) -> Result<FloorPlan> {
        let zones = self.footprint.zones();
        let mut warnings = Vec::new();

        // Step 1: Greedy zone-aware packing.
        let placed = PackRooms::new(self.footprint, self.requests).execute()?;
        for p in placed.iter().filter(|p| p.forced) {
            warnings.push(format!(
                "room '{}' was force-placed in the center and may overlap",
                p.room.label
            ));
        }

        // Step 2: Seeded local search.
        let rooms: Vec<_> = placed.into_iter().map(|p| p.room).collect();
        let optimized = OptimizeLayout::new(&zones, self.seed)
            .with_iterations(self.iterations)
            .execute(rooms);
        if optimized.short_circuited {
            warnings.push(
                "initial placement contains a hard violation; optimization skipped".to_owned(),
            );
        }
        debug!(
            initial_score = optimized.initial_score,
            final_score = optimized.final_score,
            "optimization finished"
        );

        // Step 3: Structural synthesis from the final rectangles.
        let mut store = PlanStore::new();
        let mut tagged = Vec::with_capacity(optimized.rooms.len());
        for room in &optimized.rooms {
            let rect = room.rect;
            let category = room.category;
            let id = store.add_room(room.clone());
            tagged.push((id, rect, category));
        }
        SynthesizeStructure::new(&tagged).execute(&mut store);

        // Step 4: Final report over the synthesized plan.
        let report = score_report(&optimized.rooms, &zones);

        Ok(FloorPlan {
            footprint: self.footprint,
            store,
            zones,
            report,
            warnings,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::plan::RoomCategory;

    fn requests() -> Vec<RoomRequest> {
        vec![
            RoomRequest::new(RoomCategory::Living, "living", 14.0),
            RoomRequest::new(RoomCategory::Kitchen, "kitchen", 8.0),
            RoomRequest::new(RoomCategory::Bedroom, "bed-1", 12.0),
            RoomRequest::new(RoomCategory::WetRoom, "bath", 4.0),
            RoomRequest::new(RoomCategory::Worship, "puja", 3.0),
        ]
    }

    #[test]
    fn pipeline_produces_rooms_walls_doors_and_report() {
        let footprint = Footprint::new(15.0, 15.0).unwrap();
        let reqs = requests();
        let plan = GeneratePlan::new(footprint, &reqs)
            .with_seed(7)
            .execute()
            .unwrap();
        assert_eq!(plan.store.room_count(), 5);
        assert_eq!(plan.store.wall_count(), 20);
        assert!(plan.store.doors().count() >= 1);
        assert_eq!(plan.report.room_scores.len(), 5);
    }

    #[test]
    fn pipeline_is_deterministic_for_a_seed() {
        let footprint = Footprint::new(15.0, 15.0).unwrap();
        let reqs = requests();
        let a = GeneratePlan::new(footprint, &reqs).with_seed(3).execute().unwrap();
        let b = GeneratePlan::new(footprint, &reqs).with_seed(3).execute().unwrap();
        let rooms_a: Vec<_> = a.store.rooms().map(|(_, r)| r.clone()).collect();
        let rooms_b: Vec<_> = b.store.rooms().map(|(_, r)| r.clone()).collect();
        assert_eq!(rooms_a, rooms_b);
        assert!((a.report.total_score - b.report.total_score).abs() < 1e-10);
    }

    #[test]
    fn empty_requests_fail_fast() {
        let footprint = Footprint::new(15.0, 15.0).unwrap();
        assert!(GeneratePlan::new(footprint, &[]).execute().is_err());
    }

    #[test]
    fn forced_placements_surface_as_warnings() {
        let footprint = Footprint::new(6.0, 6.0).unwrap();
        let reqs: Vec<RoomRequest> = (0..8)
            .map(|i| RoomRequest::new(RoomCategory::Bedroom, format!("bed-{i}"), 18.0))
            .collect();
        let plan = GeneratePlan::new(footprint, &reqs).execute().unwrap();
        assert!(!plan.warnings.is_empty());
    }
}
