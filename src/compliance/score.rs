//! Rule-based compliance scoring.
//!
//! The scorer is the sole arbiter of legality: the optimizer's veto and any
//! caller-side advisory text both consume the report produced here. Scoring
//! is side-effect-free and mode-agnostic; [`VastuMode`] interpretation
//! belongs to the caller.

use crate::plan::{Room, RoomCategory};
use crate::zones::{pick_zone, Zone, ZoneId};

use super::rules::zone_rule;

/// Score for a room centered in one of its preferred zones.
pub const SCORE_PREFERRED: f64 = 100.0;
/// Score for a room centered in one of its allowed zones.
pub const SCORE_ALLOWED: f64 = 60.0;
/// Score for a room whose rule names neither set.
pub const SCORE_NEUTRAL: f64 = 30.0;
/// Score for a category with no rule at all.
pub const SCORE_UNRULED: f64 = 50.0;
/// Score for a forbidden placement.
pub const SCORE_FORBIDDEN: f64 = 0.0;

/// Separation under which a worship room and a wet room count as adjacent.
pub const ADJACENCY_TOLERANCE: f64 = 0.1;

/// Per-room violation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    /// The room's center lies in a zone its rule forbids.
    Forbidden,
}

/// Derived placement facts for one room: its zone, score, and violation
/// state. Computed on read from `(rect, category)`; never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomAssessment {
    pub zone: ZoneId,
    pub score: f64,
    pub violation: Option<Violation>,
}

/// One room's entry in a compliance report.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomScore {
    pub label: String,
    pub category: RoomCategory,
    pub assessment: RoomAssessment,
}

/// Why a layout is hard-rejected under strict policy.
#[derive(Debug, Clone, PartialEq)]
pub enum HardViolationKind {
    /// Room centered in a zone its category forbids.
    ForbiddenZone(ZoneId),
    /// Worship room within [`ADJACENCY_TOLERANCE`] of a wet room.
    WorshipWetAdjacency { wet_room: String },
}

/// A hard violation attached to a named room.
#[derive(Debug, Clone, PartialEq)]
pub struct HardViolation {
    pub label: String,
    pub kind: HardViolationKind,
}

/// Aggregate compliance over a room set.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceReport {
    /// Unweighted mean of per-room scores; 100 for an empty room set.
    pub total_score: f64,
    pub room_scores: Vec<RoomScore>,
    pub hard_violations: Vec<HardViolation>,
}

impl ComplianceReport {
    /// True when the report carries no hard violations.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.hard_violations.is_empty()
    }
}

/// Scores a `(category, zone)` pairing.
///
/// Lookup priority is forbidden > preferred > allowed > neutral; a category
/// with no rule scores [`SCORE_UNRULED`] and can never violate.
#[must_use]
pub fn score_zone(category: RoomCategory, zone: ZoneId) -> (f64, Option<Violation>) {
    let Some(rule) = zone_rule(category) else {
        return (SCORE_UNRULED, None);
    };
    if rule.forbidden.contains(&zone) {
        (SCORE_FORBIDDEN, Some(Violation::Forbidden))
    } else if rule.preferred.contains(&zone) {
        (SCORE_PREFERRED, None)
    } else if rule.allowed.contains(&zone) {
        (SCORE_ALLOWED, None)
    } else {
        (SCORE_NEUTRAL, None)
    }
}

/// Derives a room's zone membership and compliance from its rectangle.
///
/// The zone is always the one containing the rectangle's center point.
#[must_use]
pub fn assess(room: &Room, zones: &[Zone]) -> RoomAssessment {
    let center = room.rect.center();
    let zone = pick_zone(zones, center.x, center.y);
    let (score, violation) = score_zone(room.category, zone);
    RoomAssessment {
        zone,
        score,
        violation,
    }
}

/// Scores a room set and collects every hard violation.
///
/// Hard violations are forbidden-zone placements plus the worship/wet-room
/// adjacency veto (one entry per offending pair).
#[must_use]
pub fn score_report(rooms: &[Room], zones: &[Zone]) -> ComplianceReport {
    let mut room_scores = Vec::with_capacity(rooms.len());
    let mut hard_violations = Vec::new();

    for room in rooms {
        let assessment = assess(room, zones);
        if assessment.violation == Some(Violation::Forbidden) {
            hard_violations.push(HardViolation {
                label: room.label.clone(),
                kind: HardViolationKind::ForbiddenZone(assessment.zone),
            });
        }
        room_scores.push(RoomScore {
            label: room.label.clone(),
            category: room.category,
            assessment,
        });
    }

    for worship in rooms.iter().filter(|r| r.category == RoomCategory::Worship) {
        for wet in rooms.iter().filter(|r| r.category == RoomCategory::WetRoom) {
            if worship.rect.gap_to(&wet.rect) < ADJACENCY_TOLERANCE {
                hard_violations.push(HardViolation {
                    label: worship.label.clone(),
                    kind: HardViolationKind::WorshipWetAdjacency {
                        wet_room: wet.label.clone(),
                    },
                });
            }
        }
    }

    let total_score = if room_scores.is_empty() {
        100.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let n = room_scores.len() as f64;
        room_scores.iter().map(|r| r.assessment.score).sum::<f64>() / n
    };

    ComplianceReport {
        total_score,
        room_scores,
        hard_violations,
    }
}

/// Caller-side policy for interpreting compliance results.
///
/// The scorer itself is mode-agnostic; these helpers encode the contract:
/// `Off` neutralizes a report entirely, `Soft` computes but never blocks,
/// `Strict` lets hard violations block an edit at the calling layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VastuMode {
    Strict,
    #[default]
    Soft,
    Off,
}

impl VastuMode {
    /// Applies this mode to a raw report.
    ///
    /// `Off` replaces every score with the neutral value and clears all
    /// violations; the other modes return the report untouched.
    #[must_use]
    pub fn apply(self, mut report: ComplianceReport) -> ComplianceReport {
        if self != Self::Off {
            return report;
        }
        for rs in &mut report.room_scores {
            rs.assessment.score = SCORE_UNRULED;
            rs.assessment.violation = None;
        }
        report.hard_violations.clear();
        report.total_score = if report.room_scores.is_empty() {
            100.0
        } else {
            SCORE_UNRULED
        };
        report
    }

    /// Whether this mode blocks an edit producing `report`.
    #[must_use]
    pub fn blocks_edit(self, report: &ComplianceReport) -> bool {
        self == Self::Strict && !report.is_clean()
    }
}

/// Coloring band for a score, exposed for the rendering boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    /// Band thresholds: preferred placements are excellent, allowed good,
    /// neutral fair, anything below poor.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= SCORE_PREFERRED {
            Self::Excellent
        } else if score >= SCORE_ALLOWED {
            Self::Good
        } else if score >= SCORE_NEUTRAL {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Rect;
    use crate::zones::compute_zones;

    const TOL: f64 = 1e-10;

    fn room(category: RoomCategory, label: &str, rect: Rect) -> Room {
        Room::new(category, label, rect)
    }

    #[test]
    fn score_values_come_from_fixed_set() {
        for category in [
            RoomCategory::Living,
            RoomCategory::Kitchen,
            RoomCategory::Bedroom,
            RoomCategory::WetRoom,
            RoomCategory::Worship,
            RoomCategory::Study,
            RoomCategory::Dining,
        ] {
            for zone in ZoneId::ALL {
                let (score, violation) = score_zone(category, zone);
                assert!(
                    [
                        SCORE_FORBIDDEN,
                        SCORE_NEUTRAL,
                        SCORE_ALLOWED,
                        SCORE_PREFERRED
                    ]
                    .contains(&score),
                    "{category:?}/{zone:?} scored {score}"
                );
                assert_eq!(violation.is_some(), score == SCORE_FORBIDDEN);
            }
        }
    }

    #[test]
    fn kitchen_in_ne_is_hard_violation() {
        // Concrete scenario: kitchen centered in NE scores 0, forbidden.
        let zones = compute_zones(10.0, 10.0);
        let kitchen = room(RoomCategory::Kitchen, "kitchen", Rect::new(0.5, 0.5, 2.0, 2.0));
        let a = assess(&kitchen, &zones);
        assert_eq!(a.zone, ZoneId::Ne);
        assert!(a.score.abs() < TOL);
        assert_eq!(a.violation, Some(Violation::Forbidden));
    }

    #[test]
    fn unruled_category_is_neutral_everywhere() {
        for zone in ZoneId::ALL {
            let (score, violation) = score_zone(RoomCategory::Circulation, zone);
            assert!((score - SCORE_UNRULED).abs() < TOL);
            assert!(violation.is_none());
        }
    }

    #[test]
    fn empty_room_set_scores_100() {
        let zones = compute_zones(10.0, 10.0);
        let report = score_report(&[], &zones);
        assert!((report.total_score - 100.0).abs() < TOL);
        assert!(report.is_clean());
    }

    #[test]
    fn total_is_unweighted_mean() {
        let zones = compute_zones(9.0, 9.0);
        // Worship in NE (100) and kitchen in SE (100): mean 100.
        let rooms = vec![
            room(RoomCategory::Worship, "puja", Rect::new(0.5, 0.5, 1.0, 1.0)),
            room(RoomCategory::Kitchen, "kitchen", Rect::new(0.5, 6.5, 1.0, 1.0)),
        ];
        let report = score_report(&rooms, &zones);
        assert!((report.total_score - 100.0).abs() < TOL);
        assert!(report.is_clean());
    }

    #[test]
    fn worship_wet_adjacency_is_vetoed() {
        let zones = compute_zones(9.0, 9.0);
        // Touching rectangles: gap 0 < tolerance.
        let rooms = vec![
            room(RoomCategory::Worship, "puja", Rect::new(0.5, 0.5, 1.0, 1.0)),
            room(RoomCategory::WetRoom, "bath", Rect::new(1.5, 0.5, 1.0, 1.0)),
        ];
        let report = score_report(&rooms, &zones);
        assert!(report
            .hard_violations
            .iter()
            .any(|v| matches!(&v.kind, HardViolationKind::WorshipWetAdjacency { wet_room } if wet_room == "bath")));
    }

    #[test]
    fn separated_worship_and_wet_room_pass() {
        let zones = compute_zones(9.0, 9.0);
        let rooms = vec![
            room(RoomCategory::Worship, "puja", Rect::new(0.5, 0.5, 1.0, 1.0)),
            room(RoomCategory::WetRoom, "bath", Rect::new(4.0, 6.0, 1.0, 1.0)),
        ];
        let report = score_report(&rooms, &zones);
        assert!(report
            .hard_violations
            .iter()
            .all(|v| !matches!(v.kind, HardViolationKind::WorshipWetAdjacency { .. })));
    }

    #[test]
    fn off_mode_neutralizes_report() {
        let zones = compute_zones(10.0, 10.0);
        let rooms = vec![room(
            RoomCategory::Kitchen,
            "kitchen",
            Rect::new(0.5, 0.5, 2.0, 2.0),
        )];
        let report = VastuMode::Off.apply(score_report(&rooms, &zones));
        assert!(report.is_clean());
        assert!((report.total_score - SCORE_UNRULED).abs() < TOL);
    }

    #[test]
    fn strict_mode_blocks_on_hard_violation() {
        let zones = compute_zones(10.0, 10.0);
        let rooms = vec![room(
            RoomCategory::Kitchen,
            "kitchen",
            Rect::new(0.5, 0.5, 2.0, 2.0),
        )];
        let report = score_report(&rooms, &zones);
        assert!(VastuMode::Strict.blocks_edit(&report));
        assert!(!VastuMode::Soft.blocks_edit(&report));
        assert!(!VastuMode::Off.blocks_edit(&VastuMode::Off.apply(report)));
    }

    #[test]
    fn score_bands_follow_thresholds() {
        assert_eq!(ScoreBand::from_score(100.0), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(60.0), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(50.0), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(0.0), ScoreBand::Poor);
    }
}
