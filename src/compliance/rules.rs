//! Static Vastu placement classification.
//!
//! Each room category maps to three disjoint sets of zones. Categories
//! without an entry (circulation) are neutral everywhere and can never
//! violate.

use crate::plan::RoomCategory;
use crate::zones::ZoneId;

use ZoneId::{C, E, N, Ne, Nw, S, Se, Sw, W};

/// Zone classification for one room category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneRule {
    pub preferred: &'static [ZoneId],
    pub allowed: &'static [ZoneId],
    pub forbidden: &'static [ZoneId],
}

/// Returns the Vastu rule for `category`, or `None` for unruled categories.
#[must_use]
pub fn zone_rule(category: RoomCategory) -> Option<ZoneRule> {
    match category {
        RoomCategory::Kitchen => Some(ZoneRule {
            preferred: &[Se],
            allowed: &[Nw, S],
            forbidden: &[Ne, N],
        }),
        RoomCategory::Worship => Some(ZoneRule {
            preferred: &[Ne],
            allowed: &[N, E],
            forbidden: &[Sw, S],
        }),
        RoomCategory::Bedroom => Some(ZoneRule {
            preferred: &[Sw],
            allowed: &[S, W, Nw],
            forbidden: &[Ne],
        }),
        RoomCategory::WetRoom => Some(ZoneRule {
            preferred: &[Nw],
            allowed: &[W, Se],
            forbidden: &[Ne, C],
        }),
        RoomCategory::Living => Some(ZoneRule {
            preferred: &[Ne, N, E],
            allowed: &[C],
            forbidden: &[],
        }),
        RoomCategory::Dining => Some(ZoneRule {
            preferred: &[W],
            allowed: &[E, S, Se],
            forbidden: &[],
        }),
        RoomCategory::Study => Some(ZoneRule {
            preferred: &[E],
            allowed: &[N, Ne, W],
            forbidden: &[],
        }),
        RoomCategory::Circulation => None,
    }
}
