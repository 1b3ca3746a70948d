use crate::math::Point2;

use super::room::RoomId;

slotmap::new_key_type! {
    /// Unique identifier for a wall in the plan store.
    pub struct WallId;
}

/// One of the two endpoints of a wall segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallEnd {
    Start,
    End,
}

/// Data associated with a wall: an undirected thick segment.
///
/// `is_external` marks perimeter walls; the built envelope and the closed
/// external loop check only consider those.
#[derive(Debug, Clone, PartialEq)]
pub struct WallData {
    pub start: Point2,
    pub end: Point2,
    pub thickness: f64,
    pub is_external: bool,
    /// Rooms this wall bounds (empty for walls not derived from rooms).
    pub adjacent_rooms: Vec<RoomId>,
}

impl WallData {
    /// Creates a wall segment.
    #[must_use]
    pub fn new(start: Point2, end: Point2, thickness: f64, is_external: bool) -> Self {
        Self {
            start,
            end,
            thickness,
            is_external,
            adjacent_rooms: Vec::new(),
        }
    }

    /// Creates an external (perimeter) wall.
    #[must_use]
    pub fn external(start: Point2, end: Point2, thickness: f64) -> Self {
        Self::new(start, end, thickness, true)
    }

    /// Creates an internal wall.
    #[must_use]
    pub fn internal(start: Point2, end: Point2, thickness: f64) -> Self {
        Self::new(start, end, thickness, false)
    }

    /// Returns the endpoint named by `end`.
    #[must_use]
    pub fn endpoint(&self, end: WallEnd) -> Point2 {
        match end {
            WallEnd::Start => self.start,
            WallEnd::End => self.end,
        }
    }

    /// Segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        ((self.end.x - self.start.x).powi(2) + (self.end.y - self.start.y).powi(2)).sqrt()
    }

    /// Segment midpoint.
    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        self.point_at(0.5)
    }

    /// Angle of the segment in radians, measured from the +x axis.
    #[must_use]
    pub fn angle(&self) -> f64 {
        (self.end.y - self.start.y).atan2(self.end.x - self.start.x)
    }

    /// Point at normalized parameter `t` along the segment.
    ///
    /// `t` is clamped to `[0, 1]`, matching the door position contract.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        let t = t.clamp(0.0, 1.0);
        Point2::new(
            self.start.x + t * (self.end.x - self.start.x),
            self.start.y + t * (self.end.y - self.start.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn length_and_midpoint() {
        let w = WallData::internal(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0), 0.1);
        assert!((w.length() - 5.0).abs() < TOL);
        let m = w.midpoint();
        assert!((m.x - 1.5).abs() < TOL);
        assert!((m.y - 2.0).abs() < TOL);
    }

    #[test]
    fn angle_of_vertical_wall() {
        let w = WallData::internal(Point2::new(1.0, 1.0), Point2::new(1.0, 5.0), 0.1);
        assert!((w.angle() - std::f64::consts::FRAC_PI_2).abs() < TOL);
    }

    #[test]
    fn point_at_clamps_parameter() {
        let w = WallData::internal(Point2::new(0.0, 0.0), Point2::new(2.0, 0.0), 0.1);
        let p = w.point_at(1.5);
        assert!((p.x - 2.0).abs() < TOL);
        let p = w.point_at(-0.5);
        assert!(p.x.abs() < TOL);
    }
}
