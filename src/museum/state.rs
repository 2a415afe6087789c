//! Museum Escape game state: the top-level state enum, the player, the
//! transient notification and everything a run owns.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::input::Direction;

use super::config::GameConfig;
use super::geometry::Bounds;
use super::item::Inventory;
use super::level::Level;
use super::room::{Room, RoomId};
use super::timer::Timer;

/// Lines kept in the side-panel event log.
const LOG_CAPACITY: usize = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Playing,
    Paused,
    PuzzleActive,
    GameOver,
    Victory,
}

/// Why the run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ending {
    Escaped,
    Caught,
    TimeUp,
}

pub struct Player {
    /// Top-left corner in world units.
    pub position: Vec2,
    pub speed: f32,
    pub size: f32,
    warned: bool,
    heading: Option<Direction>,
    /// Seconds of walking left from the last movement press.
    walk_timer: f32,
}

impl Player {
    pub fn new(position: Vec2, speed: f32, size: f32) -> Self {
        Self {
            position,
            speed,
            size,
            warned: false,
            heading: None,
            walk_timer: 0.0,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::at(self.position, Vec2::splat(self.size))
    }

    pub fn is_warned(&self) -> bool {
        self.warned
    }

    pub fn warn(&mut self) {
        self.warned = true;
    }

    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    /// Start (or keep) walking in `dir` for `hold` seconds.
    pub fn walk(&mut self, dir: Direction, hold: f32) {
        self.heading = Some(dir);
        self.walk_timer = hold;
    }

    pub fn stop(&mut self) {
        self.heading = None;
        self.walk_timer = 0.0;
    }

    pub fn update(&mut self, dt: f32) {
        let Some(dir) = self.heading else {
            return;
        };
        let step = dt.min(self.walk_timer);
        self.position += direction_vector(dir) * self.speed * step;
        self.walk_timer -= dt;
        if self.walk_timer <= 0.0 {
            self.stop();
        }
    }
}

pub fn direction_vector(dir: Direction) -> Vec2 {
    match dir {
        Direction::Up => Vec2::NEG_Y,
        Direction::Down => Vec2::Y,
        Direction::Left => Vec2::NEG_X,
        Direction::Right => Vec2::X,
    }
}

/// Colour tag for the notification line; the renderer picks the palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeColor {
    Green,
    Yellow,
    Cyan,
    Red,
    Magenta,
    White,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub message: String,
    pub color: NoticeColor,
    /// Seconds left on screen.
    pub remaining: f32,
}

impl Notification {
    pub fn new(message: impl Into<String>, color: NoticeColor, duration: f32) -> Self {
        Self {
            message: message.into(),
            color,
            remaining: duration,
        }
    }

    /// Returns `false` once the notification has run out.
    pub fn update(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining > 0.0
    }
}

pub struct MuseumState {
    pub state: GameState,
    pub rooms: BTreeMap<RoomId, Room>,
    pub current_room: RoomId,
    pub player: Player,
    pub inventory: Inventory,
    pub timer: Timer,
    /// Index into the current room's puzzles while `PuzzleActive`.
    pub active_puzzle: Option<usize>,
    pub notification: Option<Notification>,
    pub ending: Option<Ending>,
    pub config: GameConfig,
    /// Event log for the side panel.
    pub log: Vec<String>,
    /// Kept for restarts.
    level: Level,
}

impl MuseumState {
    pub fn new(level: Level) -> Self {
        let config = level.config.clone();
        let rooms = fresh_rooms(&level);
        Self {
            state: GameState::Menu,
            rooms,
            current_room: level.start_room,
            player: Player::new(config.player_start, config.player_speed, config.player_size),
            inventory: Inventory::new(config.inventory_capacity),
            timer: Timer::with_thresholds(config.time_limit, config.warning_threshold, config.critical_threshold),
            active_puzzle: None,
            notification: None,
            ending: None,
            log: vec![format!("Welcome to {}.", level.name)],
            config,
            level,
        }
    }

    /// Throw the run away and rebuild it from the level, back at the menu.
    /// The countdown is rewound rather than replaced.
    pub fn reset(&mut self) {
        self.config = self.level.config.clone();
        self.rooms = fresh_rooms(&self.level);
        self.current_room = self.level.start_room;
        self.player = Player::new(self.config.player_start, self.config.player_speed, self.config.player_size);
        self.inventory = Inventory::new(self.config.inventory_capacity);
        self.timer.reset();
        self.state = GameState::Menu;
        self.active_puzzle = None;
        self.notification = None;
        self.ending = None;
        self.log = vec![format!("Welcome to {}.", self.level.name)];
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.rooms.get(&self.current_room)
    }

    pub fn current_room_mut(&mut self) -> Option<&mut Room> {
        self.rooms.get_mut(&self.current_room)
    }

    pub fn notify(&mut self, message: impl Into<String>, color: NoticeColor, duration: f32) {
        self.notification = Some(Notification::new(message, color, duration));
    }

    pub fn add_log(&mut self, text: &str) {
        self.log.push(text.to_string());
        if self.log.len() > LOG_CAPACITY {
            self.log.remove(0);
        }
    }

    pub fn puzzles_solved(&self) -> usize {
        self.rooms.values().flat_map(|r| &r.puzzles).filter(|p| p.is_solved()).count()
    }

    pub fn puzzles_total(&self) -> usize {
        self.rooms.values().map(|r| r.puzzles.len()).sum()
    }

    pub fn all_puzzles_solved(&self) -> bool {
        self.rooms.values().all(Room::all_puzzles_solved)
    }
}

/// The level's rooms with the start room already visited.
fn fresh_rooms(level: &Level) -> BTreeMap<RoomId, Room> {
    let mut rooms = level.build_rooms();
    if let Some(start) = rooms.get_mut(&level.start_room) {
        start.mark_visited();
    }
    rooms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> MuseumState {
        MuseumState::new(Level::museum().unwrap())
    }

    #[test]
    fn initial_state() {
        let s = state();
        assert_eq!(s.state, GameState::Menu);
        assert_eq!(s.current_room, 1);
        assert!(s.current_room().unwrap().is_visited());
        assert_eq!(s.player.position, Vec2::new(100.0, 100.0));
        assert_eq!(s.inventory.max_capacity(), 10);
        assert_eq!(s.timer.remaining(), 600.0);
        assert!(!s.timer.is_running());
        assert_eq!(s.puzzles_total(), 5);
        assert_eq!(s.puzzles_solved(), 0);
        assert!(!s.all_puzzles_solved());
    }

    #[test]
    fn player_walks_for_hold_time() {
        let mut p = Player::new(Vec2::ZERO, 200.0, 32.0);
        p.walk(Direction::Right, 0.15);
        p.update(0.1);
        assert!((p.position.x - 20.0).abs() < 1e-4);
        p.update(0.1);
        // Only 0.05 s of walking was left.
        assert!((p.position.x - 30.0).abs() < 1e-4);
        assert_eq!(p.heading(), None);
        p.update(0.1);
        assert!((p.position.x - 30.0).abs() < 1e-4);
    }

    #[test]
    fn repeated_press_extends_walk() {
        let mut p = Player::new(Vec2::new(50.0, 50.0), 100.0, 32.0);
        p.walk(Direction::Up, 0.15);
        p.update(0.1);
        p.walk(Direction::Up, 0.15);
        p.update(0.1);
        assert!((p.position.y - 30.0).abs() < 1e-4);
        assert_eq!(p.heading(), Some(Direction::Up));
    }

    #[test]
    fn notification_decays() {
        let mut n = Notification::new("Picked up: Map", NoticeColor::Cyan, 2.0);
        assert!(n.update(1.5));
        assert!(!n.update(0.5));
    }

    #[test]
    fn log_is_capped() {
        let mut s = state();
        for i in 0..40 {
            s.add_log(&format!("event {}", i));
        }
        assert_eq!(s.log.len(), LOG_CAPACITY);
        assert_eq!(s.log.last().map(String::as_str), Some("event 39"));
    }

    #[test]
    fn reset_returns_to_menu() {
        let mut s = state();
        s.state = GameState::Playing;
        s.current_room = 3;
        s.player.warn();
        s.timer.start();
        s.timer.subtract_time(100.0);
        if let Some(room) = s.rooms.get_mut(&2) {
            room.mark_visited();
        }
        s.reset();
        assert_eq!(s.state, GameState::Menu);
        assert_eq!(s.current_room, 1);
        assert!(!s.player.is_warned());
        assert_eq!(s.timer.remaining(), s.timer.total());
        assert!(!s.timer.is_running());
        assert!(s.rooms[&1].is_visited());
        assert!(!s.rooms[&2].is_visited());
    }
}
