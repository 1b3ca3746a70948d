use crate::math::Rect;
use crate::plan::{PlanStore, WallData};

/// Axis-aligned bounding box of a set of walls' external members.
///
/// The built envelope tracks actual structure, not the land parcel: zone
/// semantics for an adapted template are computed against this rectangle so
/// the compass grid never stretches into unbuilt plot margin. Returns the
/// degenerate zero rectangle when no external walls exist.
#[must_use]
pub fn envelope_of<'a>(walls: impl Iterator<Item = &'a WallData>) -> Rect {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut any = false;

    for wall in walls.filter(|w| w.is_external) {
        any = true;
        for p in [wall.start, wall.end] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
    }

    if any {
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    } else {
        Rect::zero()
    }
}

/// Built envelope of every external wall in the store.
#[must_use]
pub fn built_envelope(store: &PlanStore) -> Rect {
    envelope_of(store.walls().map(|(_, w)| w))
}
