pub mod adapt;
pub mod optimize;
pub mod pack;
pub mod pipeline;
pub mod synthesize;

pub use adapt::{resize_room, validate_fit, AdaptTemplate, AdaptedPlan, FitReport};
pub use optimize::{OptimizeLayout, OptimizedLayout};
pub use pack::{PackRooms, PlacedRoom, RoomRequest};
pub use pipeline::{FloorPlan, GeneratePlan};
pub use synthesize::SynthesizeStructure;
