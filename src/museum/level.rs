//! Level data: the rooms, doors, guards, items and puzzles of a museum, as
//! JSON. A level is validated once when parsed; building rooms from a valid
//! level cannot fail.

use std::collections::{BTreeMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::{GameConfig, WinCondition};
use super::geometry::Bounds;
use super::guard::{Guard, DEFAULT_COOLDOWN, DEFAULT_SPEED};
use super::item::{Item, ItemKind};
use super::puzzle::pattern::SWITCH_NAMES;
use super::puzzle::riddle::MAX_ANSWER_LEN;
use super::puzzle::wire::WIRE_COLORS;
use super::puzzle::Puzzle;
use super::room::{Door, Room, RoomId, ToolGate};

/// The museum that ships with the game.
const MUSEUM_JSON: &str = include_str!("../../assets/museum.json");

pub const WORLD_BOUNDS: Bounds = Bounds::new(0.0, 0.0, 800.0, 600.0);

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("Level parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Level has no rooms")]
    NoRooms,
    #[error("Duplicate room id {0}")]
    DuplicateRoom(RoomId),
    #[error("Start room {0} does not exist")]
    UnknownStartRoom(RoomId),
    #[error("Door in room {room} leads to unknown room {target}")]
    UnknownDoorTarget { room: RoomId, target: RoomId },
    #[error("No exit room, but the win condition needs one")]
    NoExitRoom,
    #[error("Win item {0:?} is not placed anywhere")]
    MissingWinItem(String),
    #[error("Puzzle in room {room} has an empty answer")]
    EmptyAnswer { room: RoomId },
    #[error("Keypad answer {code:?} in room {room} is not all digits")]
    NonNumericCode { room: RoomId, code: String },
    #[error("Pattern in room {room} uses switch {switch}, expected 1..=4")]
    BadSwitch { room: RoomId, switch: u8 },
    #[error("Wire colour {color:?} in room {room} is not one of the five wires")]
    UnknownWireColor { room: RoomId, color: String },
    #[error("Wire colour {color:?} appears twice in room {room}")]
    RepeatedWire { room: RoomId, color: String },
    #[error("Duplicate item name {0:?}")]
    DuplicateItem(String),
    #[error("Time limit must be positive, got {0}")]
    BadTimeLimit(f32),
    #[error("Inventory capacity must be at least 1")]
    ZeroCapacity,
    #[error("Frame delta ceiling must be positive, got {0}")]
    BadFrameDelta(f32),
    #[error("Riddle answer {answer:?} in room {room} cannot be typed (printable ASCII, at most {max} characters)")]
    UntypeableAnswer { room: RoomId, answer: String, max: usize },
}

// ── Definitions ─────────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Level {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub config: GameConfig,
    pub start_room: RoomId,
    pub rooms: Vec<RoomDef>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoomDef {
    pub id: RoomId,
    pub name: String,
    #[serde(default = "world_bounds")]
    pub bounds: Bounds,
    #[serde(default)]
    pub exit: bool,
    #[serde(default)]
    pub items: Vec<ItemDef>,
    #[serde(default)]
    pub guards: Vec<GuardDef>,
    #[serde(default)]
    pub doors: Vec<DoorDef>,
    #[serde(default)]
    pub puzzles: Vec<PuzzleDef>,
}

fn world_bounds() -> Bounds {
    WORLD_BOUNDS
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub position: Vec2,
    #[serde(flatten)]
    pub kind: ItemKindDef,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKindDef {
    Key { door_id: String },
    Passcode { code: String },
    Basic,
    Tool { tool_type: String },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GuardDef {
    pub position: Vec2,
    pub detection_radius: f32,
    #[serde(default)]
    pub speed: Option<f32>,
    #[serde(default)]
    pub cooldown: Option<f32>,
    #[serde(default)]
    pub patrol: Vec<Vec2>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DoorDef {
    pub position: Vec2,
    pub target: RoomId,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub required_key: String,
    #[serde(default)]
    pub spawn: Option<Vec2>,
    #[serde(default)]
    pub gate: Option<ToolGate>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PuzzleDef {
    #[serde(flatten)]
    pub kind: PuzzleKindDef,
    #[serde(default)]
    pub time_bonus: Option<f32>,
    #[serde(default)]
    pub time_penalty: Option<f32>,
    #[serde(default)]
    pub reward: Option<ItemDef>,
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PuzzleKindDef {
    Riddle { riddle: String, answer: String },
    Pattern { pattern: Vec<u8> },
    Lock { code: String },
    Math { equation: String, answer: String },
    Wire { sequence: Vec<String> },
}

// ── Loading ─────────────────────────────────────────────────────

impl Level {
    pub fn from_json(json: &str) -> Result<Level, LevelError> {
        let level: Level = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    pub fn museum() -> Result<Level, LevelError> {
        Self::from_json(MUSEUM_JSON)
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        if !(self.config.time_limit > 0.0) {
            return Err(LevelError::BadTimeLimit(self.config.time_limit));
        }
        if self.config.inventory_capacity == 0 {
            return Err(LevelError::ZeroCapacity);
        }
        if !(self.config.max_frame_delta > 0.0) {
            return Err(LevelError::BadFrameDelta(self.config.max_frame_delta));
        }
        if self.rooms.is_empty() {
            return Err(LevelError::NoRooms);
        }

        let mut ids = HashSet::new();
        for room in &self.rooms {
            if !ids.insert(room.id) {
                return Err(LevelError::DuplicateRoom(room.id));
            }
        }
        if !ids.contains(&self.start_room) {
            return Err(LevelError::UnknownStartRoom(self.start_room));
        }

        let mut item_names = HashSet::new();
        for room in &self.rooms {
            for door in &room.doors {
                if !ids.contains(&door.target) {
                    return Err(LevelError::UnknownDoorTarget { room: room.id, target: door.target });
                }
            }
            let placed = room.items.iter().chain(room.puzzles.iter().filter_map(|p| p.reward.as_ref()));
            for item in placed {
                if !item_names.insert(item.name.as_str()) {
                    return Err(LevelError::DuplicateItem(item.name.clone()));
                }
            }
            for puzzle in &room.puzzles {
                validate_puzzle(room.id, &puzzle.kind)?;
            }
        }

        match &self.config.win_condition {
            WinCondition::EscapeWithAllPuzzles => {
                if !self.rooms.iter().any(|r| r.exit) {
                    return Err(LevelError::NoExitRoom);
                }
            }
            WinCondition::HoldItem { name } => {
                if !item_names.contains(name.as_str()) {
                    return Err(LevelError::MissingWinItem(name.clone()));
                }
            }
        }

        for room in &self.rooms {
            if room.puzzles.is_empty() && room.items.is_empty() && room.guards.is_empty() && !room.exit {
                log::warn!("room {} ({}) is empty", room.id, room.name);
            }
        }
        Ok(())
    }

    /// Fresh, unvisited rooms for a new run.
    pub fn build_rooms(&self) -> BTreeMap<RoomId, Room> {
        self.rooms
            .iter()
            .map(|def| (def.id, build_room(def, &self.config)))
            .collect()
    }
}

fn validate_puzzle(room: RoomId, kind: &PuzzleKindDef) -> Result<(), LevelError> {
    match kind {
        PuzzleKindDef::Riddle { answer, .. } => {
            let answer = answer.trim();
            if answer.is_empty() {
                return Err(LevelError::EmptyAnswer { room });
            }
            if answer.len() > MAX_ANSWER_LEN || !answer.chars().all(|c| (' '..='~').contains(&c)) {
                return Err(LevelError::UntypeableAnswer { room, answer: answer.to_string(), max: MAX_ANSWER_LEN });
            }
        }
        PuzzleKindDef::Pattern { pattern } => {
            if pattern.is_empty() {
                return Err(LevelError::EmptyAnswer { room });
            }
            if let Some(&switch) = pattern.iter().find(|&&s| !(1..=SWITCH_NAMES.len() as u8).contains(&s)) {
                return Err(LevelError::BadSwitch { room, switch });
            }
        }
        PuzzleKindDef::Lock { code } | PuzzleKindDef::Math { answer: code, .. } => {
            if code.is_empty() {
                return Err(LevelError::EmptyAnswer { room });
            }
            if !code.chars().all(|c| c.is_ascii_digit()) {
                return Err(LevelError::NonNumericCode { room, code: code.clone() });
            }
        }
        PuzzleKindDef::Wire { sequence } => {
            if sequence.is_empty() {
                return Err(LevelError::EmptyAnswer { room });
            }
            let mut seen = HashSet::new();
            for color in sequence {
                if !WIRE_COLORS.contains(&color.as_str()) {
                    return Err(LevelError::UnknownWireColor { room, color: color.clone() });
                }
                if !seen.insert(color.as_str()) {
                    return Err(LevelError::RepeatedWire { room, color: color.clone() });
                }
            }
        }
    }
    Ok(())
}

fn build_room(def: &RoomDef, config: &GameConfig) -> Room {
    let mut room = Room::new(def.id, def.name.clone(), def.bounds);
    room.is_exit = def.exit;
    room.items = def.items.iter().map(build_item).collect();
    room.guards = def.guards.iter().map(build_guard).collect();
    room.doors = def
        .doors
        .iter()
        .map(|d| {
            let spawn = d.spawn.unwrap_or(config.default_spawn);
            let mut door = Door::new(d.position, d.target, spawn);
            if d.locked {
                door = door.locked_with(d.required_key.clone());
            }
            if let Some(gate) = &d.gate {
                door = door.gated_by(gate.clone());
            }
            door
        })
        .collect();
    room.puzzles = def.puzzles.iter().map(build_puzzle).collect();
    room
}

fn build_item(def: &ItemDef) -> Item {
    let (kind, default_desc) = match &def.kind {
        ItemKindDef::Key { door_id } => (ItemKind::Key { door_id: door_id.clone() }, "A key to unlock doors"),
        ItemKindDef::Passcode { code } => (ItemKind::Passcode { code: code.clone() }, "A numeric passcode"),
        ItemKindDef::Basic => (ItemKind::Basic, ""),
        ItemKindDef::Tool { tool_type } => {
            (ItemKind::Tool { tool_type: tool_type.clone(), active: false }, "A useful tool")
        }
    };
    let description = def.description.clone().unwrap_or_else(|| default_desc.to_string());
    Item::new(def.name.clone(), description, def.position, kind)
}

fn build_guard(def: &GuardDef) -> Guard {
    let mut guard = Guard::new(def.position, def.detection_radius).with_patrol(def.patrol.clone());
    guard.speed = def.speed.unwrap_or(DEFAULT_SPEED);
    guard.cooldown_time = def.cooldown.unwrap_or(DEFAULT_COOLDOWN);
    guard
}

fn build_puzzle(def: &PuzzleDef) -> Puzzle {
    let mut puzzle = match &def.kind {
        PuzzleKindDef::Riddle { riddle, answer } => Puzzle::riddle(riddle.clone(), answer),
        PuzzleKindDef::Pattern { pattern } => Puzzle::pattern(pattern.clone()),
        PuzzleKindDef::Lock { code } => Puzzle::lock(code.clone()),
        PuzzleKindDef::Math { equation, answer } => Puzzle::math(equation.clone(), answer.clone()),
        PuzzleKindDef::Wire { sequence } => Puzzle::wire(sequence.clone()),
    };
    if let Some(bonus) = def.time_bonus {
        puzzle.time_bonus = bonus;
    }
    if let Some(penalty) = def.time_penalty {
        puzzle.time_penalty = penalty;
    }
    if let Some(reward) = &def.reward {
        puzzle = puzzle.with_reward(build_item(reward));
    }
    if let Some(prompt) = &def.prompt {
        puzzle = puzzle.with_prompt(prompt.clone());
    }
    puzzle
}
