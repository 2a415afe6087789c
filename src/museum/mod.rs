//! Museum Escape: sneak past guards, solve the exhibits' puzzles and reach
//! the exit before the countdown runs out.
//!
//! Input is dispatched per [`GameState`]; rules live in [`logic`], drawing in
//! [`render`].

pub mod actions;
pub mod config;
pub mod geometry;
pub mod guard;
pub mod item;
pub mod level;
pub mod logic;
pub mod puzzle;
pub mod render;
pub mod room;
pub mod state;
pub mod timer;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, Direction, InputEvent};

use actions::*;
use level::Level;
use puzzle::{PuzzleInput, PuzzleOutcome};
use state::{GameState, MuseumState};

pub struct MuseumGame {
    pub state: MuseumState,
}

impl MuseumGame {
    pub fn new(level: Level) -> Self {
        Self {
            state: MuseumState::new(level),
        }
    }

    /// Handle an input event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let state = &mut self.state;
        match state.state {
            GameState::Menu => handle_menu(state, event),
            GameState::Playing => match event {
                InputEvent::Click(id) => handle_playing_click(state, *id),
                _ => handle_playing_key(state, event),
            },
            GameState::Paused => match event {
                InputEvent::Escape | InputEvent::Enter | InputEvent::Click(RESUME) => logic::resume(state),
                InputEvent::Key('p' | 'P') => logic::resume(state),
                _ => false,
            },
            GameState::PuzzleActive => handle_puzzle(state, event),
            GameState::GameOver | GameState::Victory => match event {
                InputEvent::Key('r' | 'R') | InputEvent::Enter | InputEvent::Click(RESTART) => {
                    logic::restart(state);
                    true
                }
                _ => false,
            },
        }
    }

    /// Advance the run by `dt` seconds of wall time.
    pub fn tick(&mut self, dt: f32) {
        logic::tick(&mut self.state, dt);
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}

// ── Menu ────────────────────────────────────────────────────

fn handle_menu(state: &mut MuseumState, event: &InputEvent) -> bool {
    match event {
        InputEvent::Enter | InputEvent::Key(' ') | InputEvent::Click(START_GAME) => logic::start_game(state),
        _ => false,
    }
}

// ── Playing ─────────────────────────────────────────────────

fn handle_playing_key(state: &mut MuseumState, event: &InputEvent) -> bool {
    match event {
        InputEvent::Arrow(dir) => logic::move_player(state, *dir),
        InputEvent::Escape if state.inventory.is_visible() => {
            state.inventory.set_visible(false);
            true
        }
        InputEvent::Escape => logic::pause(state),
        InputEvent::Key(ch) => match ch.to_ascii_lowercase() {
            'w' => logic::move_player(state, Direction::Up),
            's' => logic::move_player(state, Direction::Down),
            'a' => logic::move_player(state, Direction::Left),
            'd' => logic::move_player(state, Direction::Right),
            'e' => logic::interact(state),
            'i' => logic::toggle_inventory(state),
            'p' => logic::activate_puzzle(state),
            c @ '1'..='9' => logic::use_inventory_slot(state, (c as u8 - b'1') as usize),
            _ => false,
        },
        _ => false,
    }
}

fn handle_playing_click(state: &mut MuseumState, id: u16) -> bool {
    match id {
        MOVE_UP => logic::move_player(state, Direction::Up),
        MOVE_DOWN => logic::move_player(state, Direction::Down),
        MOVE_LEFT => logic::move_player(state, Direction::Left),
        MOVE_RIGHT => logic::move_player(state, Direction::Right),
        INTERACT => logic::interact(state),
        TOGGLE_INVENTORY => logic::toggle_inventory(state),
        ACTIVATE_PUZZLE => logic::activate_puzzle(state),
        PAUSE => logic::pause(state),
        id if (USE_SLOT_BASE..USE_SLOT_BASE + 10).contains(&id) => {
            logic::use_inventory_slot(state, (id - USE_SLOT_BASE) as usize)
        }
        _ => false,
    }
}

// ── Puzzle ──────────────────────────────────────────────────

fn handle_puzzle(state: &mut MuseumState, event: &InputEvent) -> bool {
    let input = match event {
        InputEvent::Escape | InputEvent::Click(EXIT_PUZZLE) => return logic::exit_puzzle(state),
        InputEvent::Key(c) => PuzzleInput::Char(*c),
        InputEvent::Backspace => PuzzleInput::Backspace,
        InputEvent::Enter => PuzzleInput::Submit,
        InputEvent::Click(id) => PuzzleInput::Action(*id),
        InputEvent::Arrow(_) => return false,
    };
    logic::puzzle_input(state, &input) != PuzzleOutcome::Ignored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> MuseumGame {
        MuseumGame::new(Level::museum().unwrap())
    }

    fn press(game: &mut MuseumGame, keys: &str) {
        for c in keys.chars() {
            game.handle_input(&InputEvent::Key(c));
        }
    }

    #[test]
    fn enter_starts_from_menu() {
        let mut game = game();
        assert!(!game.handle_input(&InputEvent::Key('w')));
        assert!(game.handle_input(&InputEvent::Enter));
        assert_eq!(game.state.state, GameState::Playing);
    }

    #[test]
    fn wasd_and_arrows_move() {
        let mut game = game();
        game.handle_input(&InputEvent::Click(START_GAME));
        assert!(game.handle_input(&InputEvent::Key('D')));
        game.tick(0.1);
        assert!(game.state.player.position.x > 100.0);
        assert!(game.handle_input(&InputEvent::Arrow(Direction::Down)));
        game.tick(0.1);
        assert!(game.state.player.position.y > 100.0);
    }

    #[test]
    fn escape_closes_inventory_before_pausing() {
        let mut game = game();
        game.handle_input(&InputEvent::Enter);
        press(&mut game, "i");
        assert!(game.state.inventory.is_visible());
        game.handle_input(&InputEvent::Escape);
        assert!(!game.state.inventory.is_visible());
        assert_eq!(game.state.state, GameState::Playing);
        game.handle_input(&InputEvent::Escape);
        assert_eq!(game.state.state, GameState::Paused);
        game.handle_input(&InputEvent::Escape);
        assert_eq!(game.state.state, GameState::Playing);
    }

    #[test]
    fn typed_riddle_answer() {
        let mut game = game();
        game.handle_input(&InputEvent::Enter);
        game.state.current_room = 3;
        game.state.player.position = glam::Vec2::new(400.0, 320.0);
        press(&mut game, "p");
        assert_eq!(game.state.state, GameState::PuzzleActive);

        // Letters are puzzle input now, not movement.
        press(&mut game, "echp");
        assert!(game.handle_input(&InputEvent::Backspace));
        press(&mut game, "o");
        assert!(game.handle_input(&InputEvent::Enter));
        assert!(game.state.rooms[&3].puzzles[0].is_solved());
        assert_eq!(game.state.state, GameState::PuzzleActive);

        assert!(game.handle_input(&InputEvent::Escape));
        assert_eq!(game.state.state, GameState::Playing);
    }

    #[test]
    fn keypad_clicks() {
        let mut game = game();
        game.handle_input(&InputEvent::Enter);
        game.state.current_room = 4;
        game.handle_input(&InputEvent::Click(ACTIVATE_PUZZLE));
        for d in [4, 7, 3, 8] {
            assert!(game.handle_input(&InputEvent::Click(KEYPAD_DIGIT_BASE + d)));
        }
        assert!(game.handle_input(&InputEvent::Click(KEYPAD_OK)));
        assert!(game.state.rooms[&4].puzzles[0].is_solved());
    }

    #[test]
    fn restart_after_game_over() {
        let mut game = game();
        game.handle_input(&InputEvent::Enter);
        game.state.timer.subtract_time(600.0);
        game.tick(0.016);
        assert_eq!(game.state.state, GameState::GameOver);
        assert!(!game.handle_input(&InputEvent::Key('w')));
        assert!(game.handle_input(&InputEvent::Key('r')));
        assert_eq!(game.state.state, GameState::Playing);
        assert_eq!(game.state.timer.remaining(), 600.0);
    }
}
