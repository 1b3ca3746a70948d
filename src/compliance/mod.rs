pub mod rules;
pub mod score;

pub use rules::{zone_rule, ZoneRule};
pub use score::{
    assess, score_report, score_zone, ComplianceReport, HardViolation, HardViolationKind,
    RoomAssessment, RoomScore, ScoreBand, VastuMode, Violation,
};
