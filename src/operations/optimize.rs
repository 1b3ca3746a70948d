use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::compliance::{assess, score_report, ComplianceReport};
use crate::math::Rect;
use crate::plan::Room;
use crate::zones::{zone_rect, Zone};

/// Default iteration budget.
pub const DEFAULT_ITERATIONS: u32 = 140;

/// Largest fraction of a zone's extent a nudge may cover.
const NUDGE_FRACTION: f64 = 0.3;

/// Resize factor half-range per mutation.
const RESIZE_RANGE: f64 = 0.1;

/// Largest fraction of a zone's extent a resized room may occupy.
const MAX_ZONE_FILL: f64 = 0.9;

/// Result of an optimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedLayout {
    pub rooms: Vec<Room>,
    pub initial_score: f64,
    pub final_score: f64,
    /// Set when the initial layout already carried a hard violation and the
    /// search was skipped.
    pub short_circuited: bool,
    pub report: ComplianceReport,
}

/// Seeded stochastic hill-climbing over a placed layout.
///
/// Each iteration mutates the incumbent by one of three moves (zone swap,
/// in-zone nudge, in-zone resize) and accepts only hard-violation-free
/// candidates that strictly improve the mean compliance score. Termination
/// is the fixed iteration budget, which bounds runtime deterministically at
/// the cost of not guaranteeing a local optimum. All randomness comes from
/// a `ChaCha8` generator seeded by the caller, so identical inputs produce
/// bit-identical output.
#[derive(Debug)]
pub struct OptimizeLayout<'a> {
    zones: &'a [Zone],
    iterations: u32,
    seed: u64,
}

impl<'a> OptimizeLayout<'a> {
    /// Creates an optimizer with the default iteration budget.
    #[must_use]
    pub fn new(zones: &'a [Zone], seed: u64) -> Self {
        Self {
            zones,
            iterations: DEFAULT_ITERATIONS,
            seed,
        }
    }

    /// Overrides the iteration budget.
    #[must_use]
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Executes the search, returning the best layout found.
    ///
    /// If the initial layout already carries a hard violation the search is
    /// not attempted; the input is returned with the violation reported.
    #[must_use]
    pub fn execute(&self, rooms: Vec<Room>) -> OptimizedLayout {
        let initial_report = score_report(&rooms, self.zones);
        let initial_score = initial_report.total_score;

        if !initial_report.is_clean() {
            warn!(
                violations = initial_report.hard_violations.len(),
                "initial layout hard-violates; optimizer short-circuits"
            );
            return OptimizedLayout {
                rooms,
                initial_score,
                final_score: initial_score,
                short_circuited: true,
                report: initial_report,
            };
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut best = rooms;
        let mut best_score = initial_score;

        for iteration in 0..self.iterations {
            let Some(candidate) = self.mutate(&best, &mut rng) else {
                continue;
            };
            let report = score_report(&candidate, self.zones);
            if report.is_clean() && report.total_score > best_score {
                debug!(
                    iteration,
                    score = report.total_score,
                    "accepted improving candidate"
                );
                best = candidate;
                best_score = report.total_score;
            }
        }

        let report = score_report(&best, self.zones);
        OptimizedLayout {
            rooms: best,
            initial_score,
            final_score: best_score,
            short_circuited: false,
            report,
        }
    }

    /// Applies one randomly chosen mutation to a copy of `rooms`.
    fn mutate(&self, rooms: &[Room], rng: &mut ChaCha8Rng) -> Option<Vec<Room>> {
        if rooms.is_empty() {
            return None;
        }
        let mut candidate = rooms.to_vec();
        match rng.gen_range(0..3_u8) {
            0 => self.swap_zones(&mut candidate, rng)?,
            1 => self.nudge(&mut candidate, rng),
            _ => self.resize(&mut candidate, rng),
        }
        Some(candidate)
    }

    /// Moves two rooms into each other's zones, recentered and clamped.
    fn swap_zones(&self, rooms: &mut [Room], rng: &mut ChaCha8Rng) -> Option<()> {
        if rooms.len() < 2 {
            return None;
        }
        let i = rng.gen_range(0..rooms.len());
        let mut j = rng.gen_range(0..rooms.len() - 1);
        if j >= i {
            j += 1;
        }
        let zone_i = zone_rect(self.zones, assess(&rooms[i], self.zones).zone);
        let zone_j = zone_rect(self.zones, assess(&rooms[j], self.zones).zone);
        rooms[i].rect = center_in(rooms[i].rect, zone_j);
        rooms[j].rect = center_in(rooms[j].rect, zone_i);
        Some(())
    }

    /// Translates one room by up to ±30% of its zone's extent.
    fn nudge(&self, rooms: &mut [Room], rng: &mut ChaCha8Rng) {
        let i = rng.gen_range(0..rooms.len());
        let zone = zone_rect(self.zones, assess(&rooms[i], self.zones).zone);
        let dx = (rng.gen::<f64>() * 2.0 - 1.0) * NUDGE_FRACTION * zone.w;
        let dy = (rng.gen::<f64>() * 2.0 - 1.0) * NUDGE_FRACTION * zone.h;
        let r = rooms[i].rect;
        rooms[i].rect = clamp_into(Rect::new(r.x + dx, r.y + dy, r.w, r.h), zone);
    }

    /// Rescales one room by ±10%, capped at 90% of its zone's extent.
    fn resize(&self, rooms: &mut [Room], rng: &mut ChaCha8Rng) {
        let i = rng.gen_range(0..rooms.len());
        let zone = zone_rect(self.zones, assess(&rooms[i], self.zones).zone);
        let factor = 1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * RESIZE_RANGE;
        let r = rooms[i].rect;
        let w = (r.w * factor).min(MAX_ZONE_FILL * zone.w);
        let h = (r.h * factor).min(MAX_ZONE_FILL * zone.h);
        let resized = Rect::new(
            r.x + (r.w - w) / 2.0,
            r.y + (r.h - h) / 2.0,
            w,
            h,
        );
        rooms[i].rect = clamp_into(resized, zone);
    }
}

/// Recenters `r` inside `zone`, clamped to fit.
fn center_in(r: Rect, zone: Rect) -> Rect {
    let c = zone.center();
    clamp_into(Rect::new(c.x - r.w / 2.0, c.y - r.h / 2.0, r.w, r.h), zone)
}

/// Clamps the rectangle's position so it lies inside `zone` where possible.
fn clamp_into(r: Rect, zone: Rect) -> Rect {
    let max_x = zone.x + (zone.w - r.w).max(0.0);
    let max_y = zone.y + (zone.h - r.h).max(0.0);
    Rect::new(r.x.clamp(zone.x, max_x), r.y.clamp(zone.y, max_y), r.w, r.h)
}
