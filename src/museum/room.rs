//! Room/Door graph. Rooms own their entities; doors are outgoing edges.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Bounds;
use super::guard::Guard;
use super::item::Item;
use super::puzzle::Puzzle;

pub type RoomId = u32;

pub const DOOR_SIZE: Vec2 = Vec2::new(30.0, 60.0);

/// A door precondition checked before lock state: the player must hold a
/// tool of `tool_type` (and have it switched on, if `require_active`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolGate {
    pub tool_type: String,
    #[serde(default)]
    pub require_active: bool,
    pub message: String,
}

#[derive(Clone, Debug)]
pub struct Door {
    pub target_room: RoomId,
    pub position: Vec2,
    locked: bool,
    /// Empty means no key is needed once the door is tried.
    pub required_key: String,
    /// Where the player appears in `target_room`.
    pub spawn: Vec2,
    pub gate: Option<ToolGate>,
}

impl Door {
    pub fn new(position: Vec2, target_room: RoomId, spawn: Vec2) -> Self {
        Self {
            target_room,
            position,
            locked: false,
            required_key: String::new(),
            spawn,
            gate: None,
        }
    }

    pub fn locked_with(mut self, required_key: impl Into<String>) -> Self {
        self.locked = true;
        self.required_key = required_key.into();
        self
    }

    pub fn gated_by(mut self, gate: ToolGate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::at(self.position, DOOR_SIZE)
    }

    /// Checking and opening are one step: a locked door that accepts
    /// `presented` unlocks for good.
    pub fn can_open(&mut self, presented: &str) -> bool {
        if !self.locked {
            return true;
        }
        if self.required_key.is_empty() || presented == self.required_key {
            self.locked = false;
            return true;
        }
        false
    }
}

#[derive(Clone, Debug)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub bounds: Bounds,
    pub puzzles: Vec<Puzzle>,
    pub items: Vec<Item>,
    pub guards: Vec<Guard>,
    pub doors: Vec<Door>,
    pub is_exit: bool,
    visited: bool,
}

impl Room {
    pub fn new(id: RoomId, name: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            id,
            name: name.into(),
            bounds,
            puzzles: Vec::new(),
            items: Vec::new(),
            guards: Vec::new(),
            doors: Vec::new(),
            is_exit: false,
            visited: false,
        }
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn mark_visited(&mut self) {
        self.visited = true;
    }

    pub fn all_puzzles_solved(&self) -> bool {
        self.puzzles.iter().all(Puzzle::is_solved)
    }

    pub fn first_unsolved_puzzle(&self) -> Option<usize> {
        self.puzzles.iter().position(|p| !p.is_solved())
    }

    /// Advance puzzles, then guards.
    pub fn update(&mut self, dt: f32) {
        for puzzle in &mut self.puzzles {
            puzzle.update(dt);
        }
        for guard in &mut self.guards {
            guard.update(dt);
        }
    }

    /// First door overlapping `area`.
    pub fn door_at(&self, area: &Bounds) -> Option<usize> {
        self.doors.iter().position(|d| d.bounds().intersects(area))
    }

    /// First uncollected item overlapping `area`.
    pub fn item_at(&self, area: &Bounds) -> Option<usize> {
        self.items
            .iter()
            .position(|i| !i.is_collected() && i.bounds().intersects(area))
    }

    /// Hand an item over to the caller; the room no longer holds it.
    pub fn take_item(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn door() -> Door {
        Door::new(Vec2::new(750.0, 300.0), 3, Vec2::new(100.0, 300.0))
    }

    #[test]
    fn unlocked_door_always_opens() {
        let mut d = door();
        assert!(d.can_open("anything"));
        assert!(d.can_open(""));
        assert!(!d.is_locked());
    }

    #[test]
    fn wrong_key_keeps_door_locked() {
        let mut d = door().locked_with("master_key");
        assert!(!d.can_open("security_card"));
        assert!(!d.can_open(""));
        assert!(d.is_locked());
    }

    #[test]
    fn matching_key_unlocks_for_good() {
        let mut d = door().locked_with("master_key");
        assert!(d.can_open("master_key"));
        assert!(!d.is_locked());
        assert!(d.can_open("nope"));
        assert!(!d.is_locked());
    }

    #[test]
    fn locked_without_requirement_opens_on_first_try() {
        let mut d = door().locked_with("");
        assert!(d.is_locked());
        assert!(d.can_open("whatever"));
        assert!(!d.is_locked());
    }

    #[test]
    fn take_item_moves_out() {
        let mut room = Room::new(1, "Hall", Bounds::new(0.0, 0.0, 800.0, 600.0));
        room.items.push(Item::basic("Coin", "", Vec2::new(10.0, 10.0)));
        let area = Bounds::new(0.0, 0.0, 32.0, 32.0);
        let idx = room.item_at(&area).unwrap();
        let coin = room.take_item(idx).unwrap();
        assert_eq!(coin.name, "Coin");
        assert!(room.items.is_empty());
        assert!(room.take_item(0).is_none());
    }

    #[test]
    fn door_hit_uses_door_bounds() {
        let mut room = Room::new(1, "Hall", Bounds::new(0.0, 0.0, 800.0, 600.0));
        room.doors.push(door());
        let near = Bounds::new(740.0, 320.0, 32.0, 32.0);
        let far = Bounds::new(100.0, 100.0, 32.0, 32.0);
        assert_eq!(room.door_at(&near), Some(0));
        assert_eq!(room.door_at(&far), None);
    }

    #[test]
    fn empty_room_counts_as_solved() {
        let room = Room::new(5, "Exit", Bounds::new(0.0, 0.0, 800.0, 600.0));
        assert!(room.all_puzzles_solved());
        assert_eq!(room.first_unsolved_puzzle(), None);
    }
}
