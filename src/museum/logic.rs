//! Game orchestrator: per-tick update, interactions and win/lose evaluation.
//!
//! Everything here is a free function over `&mut MuseumState`, so a whole
//! run can be scripted from tests without a terminal.

use glam::Vec2;

use crate::input::Direction;

use super::config::{CatchPolicy, WinCondition};
use super::item::{ItemKind, ItemUse};
use super::puzzle::{Puzzle, PuzzleInput, PuzzleOutcome, Region};
use super::room::{Room, RoomId};
use super::state::{Ending, GameState, MuseumState, NoticeColor};

/// Tool type the wire puzzle needs.
pub const BOLT_CUTTERS: &str = "bolt_cutters";

const EXIT_REMINDER: &str = "Solve ALL puzzles to escape!";

// ── State transitions ───────────────────────────────────────────

/// Menu → Playing. Starts the countdown.
pub fn start_game(state: &mut MuseumState) -> bool {
    if state.state != GameState::Menu {
        return false;
    }
    state.state = GameState::Playing;
    state.timer.start();
    log::info!("run started in room {}", state.current_room);
    if let Some(name) = state.current_room().map(|r| r.name.clone()) {
        state.add_log(&format!("The lights go out in the {}. Find the way out!", name));
    }
    true
}

pub fn pause(state: &mut MuseumState) -> bool {
    if state.state != GameState::Playing {
        return false;
    }
    state.state = GameState::Paused;
    state.timer.pause();
    state.player.stop();
    true
}

pub fn resume(state: &mut MuseumState) -> bool {
    if state.state != GameState::Paused {
        return false;
    }
    state.state = GameState::Playing;
    state.timer.resume();
    true
}

/// New run from the same level, straight into Playing.
pub fn restart(state: &mut MuseumState) {
    state.reset();
    start_game(state);
}

fn game_over(state: &mut MuseumState, ending: Ending) {
    state.state = GameState::GameOver;
    state.ending = Some(ending);
    state.active_puzzle = None;
    state.timer.stop();
    state.player.stop();
    match ending {
        Ending::Caught => {
            state.notify("CAUGHT! Game Over!", NoticeColor::Red, 2.0);
            state.add_log("A guard caught you.");
        }
        _ => state.add_log("Time ran out."),
    }
    log::info!("game over: {:?} in room {}", ending, state.current_room);
}

fn victory(state: &mut MuseumState) {
    state.state = GameState::Victory;
    state.ending = Some(Ending::Escaped);
    state.timer.stop();
    state.player.stop();
    state.add_log("You escaped the museum!");
    log::info!(
        "escaped with {} left after {:.0}s",
        state.timer.formatted(),
        state.timer.total() - state.timer.remaining()
    );
}

// ── Tick ────────────────────────────────────────────────────────

/// Advance the run by one frame of `dt` seconds (clamped to the configured
/// ceiling). Only Playing and PuzzleActive move anything.
pub fn tick(state: &mut MuseumState, dt: f32) {
    let dt = if dt.is_finite() {
        dt.min(state.config.max_frame_delta).max(0.0)
    } else {
        0.0
    };
    match state.state {
        GameState::Playing => tick_playing(state, dt),
        GameState::PuzzleActive => tick_puzzle(state, dt),
        _ => {}
    }
}

fn decay_notification(state: &mut MuseumState, dt: f32) {
    if let Some(n) = &mut state.notification {
        if !n.update(dt) {
            state.notification = None;
        }
    }
}

/// Timer → player → room (puzzles, guards) → clamp → detection → win → lose.
fn tick_playing(state: &mut MuseumState, dt: f32) {
    state.timer.update(dt);
    decay_notification(state, dt);
    state.player.update(dt);

    let size = Vec2::splat(state.player.size);
    let Some(room) = state.rooms.get_mut(&state.current_room) else {
        return;
    };
    room.update(dt);
    state.player.position = room.bounds.clamp_inside(state.player.position, size);

    let player = state.player.position;
    let mut catches = 0;
    for guard in &mut room.guards {
        if guard.detect_player(player) {
            catches += 1;
        }
    }
    for _ in 0..catches {
        apply_catch(state);
        if state.state != GameState::Playing {
            return;
        }
    }

    let won = win_condition_met(state);
    if state.timer.is_expired() {
        game_over(state, Ending::TimeUp);
    } else if won {
        victory(state);
    }
}

fn tick_puzzle(state: &mut MuseumState, dt: f32) {
    decay_notification(state, dt);
    let has_cutters = state.inventory.has_tool(BOLT_CUTTERS);
    if let Some(puzzle) = active_puzzle_mut(state) {
        puzzle.set_tool(has_cutters);
        puzzle.update(dt);
    }
}

fn apply_catch(state: &mut MuseumState) {
    let policy = state.config.catch_policy.clone();
    match policy {
        CatchPolicy::Immediate => game_over(state, Ending::Caught),
        CatchPolicy::WarnThenCatch { .. } if state.player.is_warned() => game_over(state, Ending::Caught),
        CatchPolicy::WarnThenCatch { penalty } | CatchPolicy::WarnOnly { penalty } => {
            state.player.warn();
            state.timer.subtract_time(penalty);
            state.notify("WARNING! Caught by guard!", NoticeColor::Yellow, 3.0);
            state.add_log(&format!("Spotted by a guard! -{}s", penalty));
            log::info!("guard spotted the player in room {}", state.current_room);
            if state.timer.is_expired() {
                game_over(state, Ending::TimeUp);
            }
        }
    }
}

fn win_condition_met(state: &mut MuseumState) -> bool {
    let condition = state.config.win_condition.clone();
    match condition {
        WinCondition::EscapeWithAllPuzzles => {
            let in_exit = state.current_room().map_or(false, |r| r.is_exit);
            if !in_exit {
                return false;
            }
            if state.all_puzzles_solved() {
                return true;
            }
            if state.notification.is_none() {
                state.notify(EXIT_REMINDER, NoticeColor::Red, 2.0);
            }
            false
        }
        WinCondition::HoldItem { name } => state.inventory.has_item(&name),
    }
}

// ── Player actions ──────────────────────────────────────────────

pub fn move_player(state: &mut MuseumState, dir: Direction) -> bool {
    if state.state != GameState::Playing {
        return false;
    }
    state.player.walk(dir, state.config.move_hold);
    true
}

/// The interact key: try the door under the player, then the item under the
/// player. Returns `true` if the player changed rooms or picked something up.
pub fn interact(state: &mut MuseumState) -> bool {
    if state.state != GameState::Playing {
        return false;
    }
    let bounds = state.player.bounds();
    if let Some(door) = state.current_room().and_then(|r| r.door_at(&bounds)) {
        if use_door(state, door) {
            return true;
        }
    }
    pick_up(state)
}

/// Tool gate first, then the lock, then the move.
fn use_door(state: &mut MuseumState, index: usize) -> bool {
    let room_id = state.current_room;
    let Some(door) = state.rooms.get(&room_id).and_then(|r| r.doors.get(index)) else {
        return false;
    };

    if let Some(gate) = &door.gate {
        let passes = if gate.require_active {
            state.inventory.has_active_tool(&gate.tool_type)
        } else {
            state.inventory.has_tool(&gate.tool_type)
        };
        if !passes {
            let message = gate.message.clone();
            log::debug!("door {} in room {} gated by {}", index, room_id, gate.tool_type);
            state.notify(message, NoticeColor::Red, 2.0);
            return false;
        }
    }

    let (target, spawn) = (door.target_room, door.spawn);
    if door.is_locked() {
        let required = door.required_key.clone();
        let key = state
            .inventory
            .items()
            .iter()
            .find(|i| i.key_id() == required)
            .map(|i| i.name.clone());
        let Some(door) = state.rooms.get_mut(&room_id).and_then(|r| r.doors.get_mut(index)) else {
            return false;
        };
        let presented = key.as_ref().map_or("", |_| required.as_str());
        if !door.can_open(presented) {
            log::debug!("door {} in room {} needs {}", index, room_id, required);
            state.notify(format!("LOCKED! Need {}", display_name(&required)), NoticeColor::Red, 2.0);
            return false;
        }
        if let Some(name) = key {
            log::info!("unlocked door to room {} with {}", target, name);
            state.notify(format!("Door unlocked with {}!", name), NoticeColor::Green, 2.0);
            state.add_log(&format!("Unlocked a door with the {}.", name));
        }
    }

    change_room(state, target, spawn)
}

pub fn change_room(state: &mut MuseumState, target: RoomId, spawn: Vec2) -> bool {
    let Some(room) = state.rooms.get_mut(&target) else {
        log::warn!("door leads to missing room {}", target);
        return false;
    };
    room.mark_visited();
    let name = room.name.clone();
    state.current_room = target;
    state.player.position = spawn;
    state.player.stop();
    log::info!("entered room {} ({})", target, name);
    state.add_log(&format!("Entered the {}.", name));
    true
}

/// `master_key` → `Master Key`.
fn display_name(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn pick_up(state: &mut MuseumState) -> bool {
    let bounds = state.player.bounds();
    let Some(index) = state.current_room().and_then(|r| r.item_at(&bounds)) else {
        return false;
    };
    if state.inventory.is_full() {
        log::debug!("inventory full, item left in room {}", state.current_room);
        state.notify("Inventory full!", NoticeColor::Red, 2.0);
        return false;
    }
    let Some(item) = state.current_room_mut().and_then(|r| r.take_item(index)) else {
        return false;
    };

    let name = item.name.clone();
    let (message, color, duration) = match &item.kind {
        ItemKind::Passcode { code } => (format!("SECRET CODE: {}", code), NoticeColor::Yellow, 10.0),
        _ => (format!("Picked up: {}", name), NoticeColor::Cyan, 2.0),
    };
    match state.inventory.add_item(item) {
        Ok(()) => {
            log::info!("picked up {} in room {}", name, state.current_room);
            state.notify(message, color, duration);
            state.add_log(&format!("Picked up the {}.", name));
            true
        }
        Err(item) => {
            if let Some(room) = state.current_room_mut() {
                room.items.insert(index, item);
            }
            state.notify(format!("You already carry a {}.", name), NoticeColor::White, 2.0);
            false
        }
    }
}

pub fn toggle_inventory(state: &mut MuseumState) -> bool {
    if state.state != GameState::Playing {
        return false;
    }
    state.inventory.toggle_visibility();
    true
}

/// Use the item in `slot` (0-based). Only while the inventory is open.
pub fn use_inventory_slot(state: &mut MuseumState, slot: usize) -> bool {
    if state.state != GameState::Playing || !state.inventory.is_visible() {
        return false;
    }
    let Some((name, used)) = state.inventory.use_slot(slot) else {
        return false;
    };
    match used {
        ItemUse::ToolSwitched { active } => {
            let onoff = if active { "on" } else { "off" };
            state.notify(format!("{} switched {}", name, onoff), NoticeColor::Cyan, 2.0);
            log::info!("{} switched {}", name, onoff);
        }
        ItemUse::RevealCode(code) => state.notify(format!("SECRET CODE: {}", code), NoticeColor::Yellow, 10.0),
        ItemUse::OpensDoor(_) => {
            state.notify(format!("The {} opens a locked door. Press E at the door.", name), NoticeColor::White, 3.0)
        }
        ItemUse::Inspect(description) if description.is_empty() => {
            state.notify(name, NoticeColor::White, 3.0)
        }
        ItemUse::Inspect(description) => {
            state.notify(format!("{}: {}", name, description), NoticeColor::White, 3.0)
        }
    }
    true
}

// ── Puzzles ─────────────────────────────────────────────────────

/// Playing → PuzzleActive on the first unsolved puzzle in the room.
pub fn activate_puzzle(state: &mut MuseumState) -> bool {
    if state.state != GameState::Playing {
        return false;
    }
    let Some(index) = state.current_room().and_then(Room::first_unsolved_puzzle) else {
        state.notify("Nothing to solve here.", NoticeColor::White, 2.0);
        return false;
    };

    state.active_puzzle = Some(index);
    let has_cutters = state.inventory.has_tool(BOLT_CUTTERS);
    let (title, prompt) = match active_puzzle_mut(state) {
        Some(puzzle) => {
            puzzle.set_tool(has_cutters);
            (puzzle.title(), puzzle.prompt.clone())
        }
        None => {
            state.active_puzzle = None;
            return false;
        }
    };

    state.state = GameState::PuzzleActive;
    state.timer.pause();
    state.player.stop();
    if let Some(prompt) = prompt {
        state.notify(prompt, NoticeColor::Magenta, 4.0);
    }
    log::info!("opened {} in room {}", title, state.current_room);
    true
}

/// PuzzleActive → Playing, solved or not.
pub fn exit_puzzle(state: &mut MuseumState) -> bool {
    if state.state != GameState::PuzzleActive {
        return false;
    }
    state.state = GameState::Playing;
    state.active_puzzle = None;
    state.timer.resume();
    true
}

pub fn active_puzzle(state: &MuseumState) -> Option<&Puzzle> {
    let index = state.active_puzzle?;
    state.current_room()?.puzzles.get(index)
}

pub fn active_puzzle_mut(state: &mut MuseumState) -> Option<&mut Puzzle> {
    let index = state.active_puzzle?;
    state.current_room_mut()?.puzzles.get_mut(index)
}

/// Forward one input to the active puzzle and apply what follows from it.
pub fn puzzle_input(state: &mut MuseumState, input: &PuzzleInput) -> PuzzleOutcome {
    if state.state != GameState::PuzzleActive {
        return PuzzleOutcome::Ignored;
    }
    let Some(puzzle) = active_puzzle_mut(state) else {
        return PuzzleOutcome::Ignored;
    };
    let outcome = puzzle.handle_input(input);
    settle_outcome(state, outcome);
    outcome
}

/// Submit a whole answer to the active puzzle.
pub fn solve_active_puzzle(state: &mut MuseumState, answer: &str) -> bool {
    if state.state != GameState::PuzzleActive {
        return false;
    }
    let Some(puzzle) = active_puzzle_mut(state) else {
        return false;
    };
    if puzzle.is_solved() {
        return true;
    }
    let solved = puzzle.solve(answer);
    settle_outcome(state, if solved { PuzzleOutcome::Solved } else { PuzzleOutcome::Rejected });
    solved
}

fn settle_outcome(state: &mut MuseumState, outcome: PuzzleOutcome) {
    match outcome {
        PuzzleOutcome::Solved => on_solved(state),
        PuzzleOutcome::Rejected => {
            let penalty = active_puzzle(state).map_or(0.0, |p| p.time_penalty);
            log::debug!("wrong answer in room {}", state.current_room);
            if state.config.apply_puzzle_penalties && penalty > 0.0 {
                state.timer.subtract_time(penalty);
                state.add_log(&format!("Wrong answer! -{}s", penalty));
                if state.timer.is_expired() {
                    game_over(state, Ending::TimeUp);
                }
            }
        }
        PuzzleOutcome::Ignored | PuzzleOutcome::Updated => {}
    }
}

/// Bonus time, notification, and the puzzle's reward dropped into the room.
fn on_solved(state: &mut MuseumState) {
    let Some(index) = state.active_puzzle else {
        return;
    };
    let Some(room) = state.current_room_mut() else {
        return;
    };
    let Some(puzzle) = room.puzzles.get_mut(index) else {
        return;
    };
    let bonus = puzzle.time_bonus;
    let title = puzzle.title();
    let reward = puzzle.reward.take();
    let reward_name = reward.as_ref().map(|item| item.name.clone());
    if let Some(item) = reward {
        room.items.push(item);
    }

    state.timer.add_time(bonus);
    state.notify(format!("Puzzle Solved! +{}s", bonus), NoticeColor::Green, 3.0);
    state.add_log(&format!("Solved the {}. +{}s", title.to_lowercase(), bonus));
    log::info!(
        "{} solved in room {} ({}/{})",
        title,
        state.current_room,
        state.puzzles_solved(),
        state.puzzles_total()
    );
    if let Some(name) = reward_name {
        state.notify(format!("{} appeared!", name), NoticeColor::Yellow, 4.0);
        state.add_log(&format!("A {} appeared in the room.", name));
    }
}

/// Clickable regions of the active puzzle, in world units.
pub fn active_regions(state: &MuseumState) -> Vec<Region> {
    if state.state != GameState::PuzzleActive {
        return Vec::new();
    }
    active_puzzle(state).map(Puzzle::regions).unwrap_or_default()
}

/// The action under a world-space point, topmost region first.
pub fn region_at(state: &MuseumState, point: Vec2) -> Option<u16> {
    active_regions(state)
        .iter()
        .rev()
        .find(|r| r.bounds.contains(point))
        .map(|r| r.action)
}
