//! Persistence and external-candidate boundary.
//!
//! A [`Snapshot`] is the unit of save/load; the kernel is agnostic to the
//! storage medium and only defines the record shape plus validated
//! reconstruction. [`CandidateLayout`] is the ingestion record for the
//! remote AI-assisted generator: its self-reported score is never trusted —
//! every candidate is re-scored through the same compliance pipeline as
//! locally generated layouts.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::compliance::{score_report, ComplianceReport, VastuMode};
use crate::error::{Result, SnapshotError};
use crate::math::{Point2, Rect};
use crate::plan::{DoorData, Footprint, PlanStore, Room, RoomCategory, WallData};

/// Tolerated difference between a stored/claimed score and the locally
/// re-derived one before a warning is logged.
const SCORE_MISMATCH_TOLERANCE: f64 = 0.5;

/// A serialized project record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub footprint: Footprint,
    pub rooms: Vec<Room>,
    pub vastu_mode: VastuMode,
    pub compliance_score: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub template_id: Option<String>,
}

/// A project state reconstructed from a snapshot, with freshly derived
/// compliance.
#[derive(Debug, Clone, PartialEq)]
pub struct RestoredState {
    pub footprint: Footprint,
    pub rooms: Vec<Room>,
    pub vastu_mode: VastuMode,
    pub template_id: Option<String>,
    pub report: ComplianceReport,
}

/// Captures the current project state as a snapshot record.
#[must_use]
pub fn snapshot(
    footprint: Footprint,
    rooms: &[Room],
    vastu_mode: VastuMode,
    template_id: Option<String>,
) -> Snapshot {
    let report = vastu_mode.apply(score_report(rooms, &footprint.zones()));
    Snapshot {
        footprint,
        rooms: rooms.to_vec(),
        vastu_mode,
        compliance_score: report.total_score,
        template_id,
    }
}

/// Reconstructs project state from a snapshot.
///
/// Geometry is re-validated and the compliance report re-derived; the
/// stored score is advisory only and a stale value merely logs a warning.
///
/// # Errors
///
/// Returns [`SnapshotError::Malformed`] for non-positive footprint
/// dimensions or non-finite room geometry.
pub fn restore(snapshot: &Snapshot) -> Result<RestoredState> {
    let footprint = Footprint::new(snapshot.footprint.width, snapshot.footprint.height)
        .map_err(|e| SnapshotError::Malformed(e.to_string()))?
        .with_orientation(snapshot.footprint.orientation);

    for room in &snapshot.rooms {
        if !room.rect.is_finite() || room.rect.w <= 0.0 || room.rect.h <= 0.0 {
            return Err(SnapshotError::Malformed(format!(
                "room '{}' has degenerate or non-finite geometry",
                room.label
            ))
            .into());
        }
    }

    let report = score_report(&snapshot.rooms, &footprint.zones());
    if (report.total_score - snapshot.compliance_score).abs() > SCORE_MISMATCH_TOLERANCE
        && snapshot.vastu_mode != VastuMode::Off
    {
        warn!(
            stored = snapshot.compliance_score,
            derived = report.total_score,
            "stored compliance score is stale; using derived value"
        );
    }

    Ok(RestoredState {
        footprint,
        rooms: snapshot.rooms.clone(),
        vastu_mode: snapshot.vastu_mode,
        template_id: snapshot.template_id.clone(),
        report: snapshot.vastu_mode.apply(report),
    })
}

/// Encodes a snapshot as JSON.
///
/// # Errors
///
/// Returns an encoding error from the serializer.
pub fn to_json(snapshot: &Snapshot) -> Result<String> {
    serde_json::to_string_pretty(snapshot)
        .map_err(SnapshotError::from)
        .map_err(Into::into)
}

/// Decodes a snapshot from JSON.
///
/// # Errors
///
/// Returns a decoding error for malformed JSON or unknown categories.
pub fn from_json(json: &str) -> Result<Snapshot> {
    serde_json::from_str(json)
        .map_err(SnapshotError::from)
        .map_err(Into::into)
}

/// A room as reported by the external generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRoom {
    pub category: RoomCategory,
    pub label: String,
    pub rect: Rect,
}

/// A wall as reported by the external generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateWall {
    pub start: [f64; 2],
    pub end: [f64; 2],
    pub thickness: f64,
    pub is_external: bool,
}

/// A door as reported by the external generator, referencing a wall by
/// index into the candidate's wall list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateDoor {
    pub wall_index: usize,
    pub position: f64,
    pub width: f64,
}

/// An AI-generated candidate layout with its self-reported score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateLayout {
    pub rooms: Vec<CandidateRoom>,
    pub walls: Vec<CandidateWall>,
    pub doors: Vec<CandidateDoor>,
    pub claimed_score: f64,
}

/// A candidate that passed validation, with its locally derived report.
#[derive(Debug)]
pub struct ValidatedCandidate {
    pub store: PlanStore,
    pub report: ComplianceReport,
}

/// Validates and re-scores an externally generated candidate.
///
/// The candidate enters through the same scoring functions as any locally
/// generated layout; the self-reported score is discarded (a large mismatch
/// is logged). Malformed candidates are rejected whole — nothing is
/// partially ingested.
///
/// # Errors
///
/// Returns [`SnapshotError::MalformedCandidate`] for an empty room list,
/// non-finite coordinates, out-of-range door references, or door positions
/// outside `[0, 1]`.
pub fn ingest_candidate(
    candidate: &CandidateLayout,
    footprint: &Footprint,
) -> Result<ValidatedCandidate> {
    if candidate.rooms.is_empty() {
        return Err(SnapshotError::MalformedCandidate("no rooms".to_owned()).into());
    }
    for room in &candidate.rooms {
        if !room.rect.is_finite() || room.rect.w <= 0.0 || room.rect.h <= 0.0 {
            return Err(SnapshotError::MalformedCandidate(format!(
                "room '{}' has degenerate or non-finite geometry",
                room.label
            ))
            .into());
        }
    }
    for (i, wall) in candidate.walls.iter().enumerate() {
        let coords = [wall.start[0], wall.start[1], wall.end[0], wall.end[1]];
        if coords.iter().any(|c| !c.is_finite()) || !wall.thickness.is_finite() {
            return Err(
                SnapshotError::MalformedCandidate(format!("wall {i} is non-finite")).into(),
            );
        }
    }
    for (i, door) in candidate.doors.iter().enumerate() {
        if door.wall_index >= candidate.walls.len() {
            return Err(SnapshotError::MalformedCandidate(format!(
                "door {i} references wall {} of {}",
                door.wall_index,
                candidate.walls.len()
            ))
            .into());
        }
        if !(0.0..=1.0).contains(&door.position) || !door.width.is_finite() {
            return Err(SnapshotError::MalformedCandidate(format!(
                "door {i} has an invalid position or width"
            ))
            .into());
        }
    }

    let mut store = PlanStore::new();
    let rooms: Vec<Room> = candidate
        .rooms
        .iter()
        .map(|r| Room::new(r.category, r.label.clone(), r.rect))
        .collect();
    for room in &rooms {
        store.add_room(room.clone());
    }
    let wall_ids: Vec<_> = candidate
        .walls
        .iter()
        .map(|w| {
            store.add_wall(WallData::new(
                Point2::new(w.start[0], w.start[1]),
                Point2::new(w.end[0], w.end[1]),
                w.thickness,
                w.is_external,
            ))
        })
        .collect();
    for door in &candidate.doors {
        store.add_door(DoorData::new(
            wall_ids[door.wall_index],
            door.position,
            door.width,
        ));
    }

    let report = score_report(&rooms, &footprint.zones());
    if (report.total_score - candidate.claimed_score).abs() > SCORE_MISMATCH_TOLERANCE {
        warn!(
            claimed = candidate.claimed_score,
            derived = report.total_score,
            "candidate's self-reported score disagrees with local scoring"
        );
    }

    Ok(ValidatedCandidate { store, report })
}
