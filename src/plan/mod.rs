pub mod door;
pub mod footprint;
pub mod room;
pub mod template;
pub mod wall;

pub use door::{DoorData, DoorId, SwingDirection};
pub use footprint::Footprint;
pub use room::{Room, RoomCategory, RoomId};
pub use template::{Anchor, RoomTemplate, Size, Template, TemplateCatalog, TemplateDoor};
pub use wall::{WallData, WallEnd, WallId};

use crate::error::TopologyError;
use crate::math::Point2;
use slotmap::SlotMap;

/// Central arena that owns all plan entities.
///
/// Entities reference each other via typed IDs (generational indices),
/// avoiding self-referential structures and enabling safe mutation.
#[derive(Debug, Default, Clone)]
pub struct PlanStore {
    rooms: SlotMap<RoomId, Room>,
    walls: SlotMap<WallId, WallData>,
    doors: SlotMap<DoorId, DoorData>,
}

impl PlanStore {
    /// Creates a new, empty plan store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Room operations ---

    /// Inserts a room and returns its ID.
    pub fn add_room(&mut self, data: Room) -> RoomId {
        self.rooms.insert(data)
    }

    /// Returns a reference to the room data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn room(&self, id: RoomId) -> Result<&Room, TopologyError> {
        self.rooms
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("room".into()))
    }

    /// Returns a mutable reference to the room data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn room_mut(&mut self, id: RoomId) -> Result<&mut Room, TopologyError> {
        self.rooms
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("room".into()))
    }

    /// Iterates over all rooms with their IDs.
    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms.iter()
    }

    /// Number of rooms in the store.
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    // --- Wall operations ---

    /// Inserts a wall and returns its ID.
    pub fn add_wall(&mut self, data: WallData) -> WallId {
        self.walls.insert(data)
    }

    /// Returns a reference to the wall data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn wall(&self, id: WallId) -> Result<&WallData, TopologyError> {
        self.walls
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("wall".into()))
    }

    /// Returns a mutable reference to the wall data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn wall_mut(&mut self, id: WallId) -> Result<&mut WallData, TopologyError> {
        self.walls
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("wall".into()))
    }

    /// Iterates over all walls with their IDs.
    pub fn walls(&self) -> impl Iterator<Item = (WallId, &WallData)> {
        self.walls.iter()
    }

    /// Number of walls in the store.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    // --- Door operations ---

    /// Inserts a door and returns its ID.
    pub fn add_door(&mut self, data: DoorData) -> DoorId {
        self.doors.insert(data)
    }

    /// Returns a reference to the door data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn door(&self, id: DoorId) -> Result<&DoorData, TopologyError> {
        self.doors
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("door".into()))
    }

    /// Iterates over all doors with their IDs.
    pub fn doors(&self) -> impl Iterator<Item = (DoorId, &DoorData)> {
        self.doors.iter()
    }

    /// World position of a door, derived from its wall on read.
    ///
    /// A door stores only a normalized offset along its wall, so moving the
    /// wall can never strand the door.
    ///
    /// # Errors
    ///
    /// Returns an error if the door or its wall is not found in the store.
    pub fn door_world_position(&self, id: DoorId) -> Result<Point2, TopologyError> {
        let door = self.door(id)?;
        let wall = self.wall(door.wall)?;
        Ok(wall.point_at(door.position))
    }
}
