use crate::compliance::{score_report, ComplianceReport};
use crate::error::{PlacementError, Result};
use crate::math::{Point2, Rect, Vector2};
use crate::plan::{
    Anchor, DoorData, Footprint, PlanStore, Room, RoomTemplate, Template, WallData,
};
use crate::topology::envelope::envelope_of;
use crate::zones::{zones_of_rect, Zone};

/// Fraction of the footprint reserved as margin around an adapted design.
const FIT_MARGIN: f64 = 0.9;

/// Advisory scale bounds: outside these the template is a poor match for
/// the plot, but adaptation still proceeds.
const MIN_COMFORTABLE_SCALE: f64 = 0.5;
const MAX_COMFORTABLE_SCALE: f64 = 2.0;

/// Result of fitting a template onto a footprint.
#[derive(Debug)]
pub struct AdaptedPlan {
    pub store: PlanStore,
    /// The single uniform scale factor applied to every coordinate.
    pub scale: f64,
    /// Translation applied after scaling to center the design.
    pub offset: Vector2,
    /// Compass zones of the *built* envelope, not the plot.
    pub zones: [Zone; 9],
    pub report: ComplianceReport,
}

/// Fits a reference design onto a target footprint.
///
/// The design is scaled by one uniform factor (never stretched per-axis,
/// which would distort room proportions and invalidate min/max size
/// semantics) and centered. Zones are recomputed against the scaled walls'
/// built envelope so the compass grid tracks actual structure.
#[derive(Debug)]
pub struct AdaptTemplate<'a> {
    template: &'a Template,
    footprint: Footprint,
}

impl<'a> AdaptTemplate<'a> {
    /// Creates a new `AdaptTemplate` operation.
    #[must_use]
    pub fn new(template: &'a Template, footprint: Footprint) -> Self {
        Self {
            template,
            footprint,
        }
    }

    /// Executes the adaptation.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError::InvalidInput` if the template's base
    /// envelope is not positive.
    pub fn execute(&self) -> Result<AdaptedPlan> {
        let base = self.template.base_envelope;
        if base.width <= 0.0 || base.height <= 0.0 {
            return Err(PlacementError::InvalidInput(format!(
                "template base envelope {}x{} must be positive",
                base.width, base.height
            ))
            .into());
        }

        let scale = compute_scale(self.template, &self.footprint);
        let offset = Vector2::new(
            (self.footprint.width - base.width * scale) / 2.0,
            (self.footprint.height - base.height * scale) / 2.0,
        );

        let mut store = PlanStore::new();

        let scaled_walls: Vec<WallData> = self
            .template
            .walls
            .iter()
            .map(|w| {
                let mut wall = w.clone();
                wall.start = transform_point(w.start, scale, offset);
                wall.end = transform_point(w.end, scale, offset);
                wall.thickness = w.thickness * scale;
                wall
            })
            .collect();

        let wall_ids: Vec<_> = scaled_walls
            .iter()
            .map(|w| store.add_wall(w.clone()))
            .collect();

        let mut rooms = Vec::with_capacity(self.template.rooms.len());
        for rt in &self.template.rooms {
            let room = Room::new(
                rt.room.category,
                rt.room.label.clone(),
                transform_rect(rt.room.rect, scale, offset),
            );
            rooms.push(room.clone());
            store.add_room(room);
        }

        for td in &self.template.doors {
            if let Some(&wall) = wall_ids.get(td.wall_index) {
                store.add_door(DoorData::new(wall, td.position, td.width * scale));
            }
        }

        let zones = zones_of_rect(envelope_of(scaled_walls.iter()));
        let report = score_report(&rooms, &zones);

        Ok(AdaptedPlan {
            store,
            scale,
            offset,
            zones,
            report,
        })
    }
}

fn compute_scale(template: &Template, footprint: &Footprint) -> f64 {
    let base = template.base_envelope;
    (FIT_MARGIN * footprint.width / base.width).min(FIT_MARGIN * footprint.height / base.height)
}

fn transform_point(p: Point2, scale: f64, offset: Vector2) -> Point2 {
    Point2::new(p.x * scale + offset.x, p.y * scale + offset.y)
}

fn transform_rect(r: Rect, scale: f64, offset: Vector2) -> Rect {
    Rect::new(
        r.x * scale + offset.x,
        r.y * scale + offset.y,
        r.w * scale,
        r.h * scale,
    )
}

/// Advisory fit assessment for a template/footprint pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct FitReport {
    pub fits: bool,
    pub scale: f64,
    pub reason: Option<String>,
}

/// Flags extreme scale factors without blocking adaptation.
#[must_use]
pub fn validate_fit(template: &Template, footprint: &Footprint) -> FitReport {
    let scale = compute_scale(template, footprint);
    if scale < MIN_COMFORTABLE_SCALE {
        FitReport {
            fits: false,
            scale,
            reason: Some(format!(
                "design would shrink to {scale:.2}x of its reference size"
            )),
        }
    } else if scale > MAX_COMFORTABLE_SCALE {
        FitReport {
            fits: false,
            scale,
            reason: Some(format!(
                "design would grow to {scale:.2}x of its reference size"
            )),
        }
    } else {
        FitReport {
            fits: true,
            scale,
            reason: None,
        }
    }
}

/// Resizes a room within its template bounds, keeping the anchor fixed.
///
/// Rejects without mutation when either dimension falls outside
/// `[min_size, max_size]`, naming the failed bound. No other room is
/// touched.
///
/// # Errors
///
/// Returns `PlacementError::ResizeRejected` naming the violated bound.
pub fn resize_room(
    room: &Room,
    template: &RoomTemplate,
    new_w: f64,
    new_h: f64,
) -> Result<Room> {
    let min = template.min_size;
    let max = template.max_size;
    let reason = if new_w < min.width {
        Some(format!("width {new_w:.2} below minimum {:.2}", min.width))
    } else if new_w > max.width {
        Some(format!("width {new_w:.2} above maximum {:.2}", max.width))
    } else if new_h < min.height {
        Some(format!("height {new_h:.2} below minimum {:.2}", min.height))
    } else if new_h > max.height {
        Some(format!("height {new_h:.2} above maximum {:.2}", max.height))
    } else {
        None
    };
    if let Some(reason) = reason {
        return Err(PlacementError::ResizeRejected(reason).into());
    }

    let r = room.rect;
    let (x, y) = match template.anchor {
        Anchor::Ne => (r.x, r.y),
        Anchor::Nw => (r.x + r.w - new_w, r.y),
        Anchor::Se => (r.x, r.y + r.h - new_h),
        Anchor::Sw => (r.x + r.w - new_w, r.y + r.h - new_h),
        Anchor::Center => (r.x + (r.w - new_w) / 2.0, r.y + (r.h - new_h) / 2.0),
    };

    let mut resized = room.clone();
    resized.rect = Rect::new(x, y, new_w, new_h);
    Ok(resized)
}
