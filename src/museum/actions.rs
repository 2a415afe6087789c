//! Semantic action IDs for Museum Escape click targets.

// ── Screens ─────────────────────────────────────────────────────
pub const START_GAME: u16 = 1;
pub const RESUME: u16 = 2;
pub const RESTART: u16 = 3;
pub const TOGGLE_INVENTORY: u16 = 4;
pub const EXIT_PUZZLE: u16 = 5;
pub const PAUSE: u16 = 6;
pub const INTERACT: u16 = 7;
pub const ACTIVATE_PUZZLE: u16 = 8;

// ── Movement pad ────────────────────────────────────────────────
pub const MOVE_UP: u16 = 10;
pub const MOVE_DOWN: u16 = 11;
pub const MOVE_LEFT: u16 = 12;
pub const MOVE_RIGHT: u16 = 13;

// ── Puzzle regions ──────────────────────────────────────────────
/// Pattern switches 1..=4 map to `SWITCH_BASE + (n - 1)`.
pub const SWITCH_BASE: u16 = 20;
pub const PATTERN_RESET: u16 = 24;
/// Keypad digit `d` maps to `KEYPAD_DIGIT_BASE + d`.
pub const KEYPAD_DIGIT_BASE: u16 = 30;
pub const KEYPAD_CLEAR: u16 = 40;
pub const KEYPAD_OK: u16 = 41;
/// Wire `i` (0-based, in display order) maps to `WIRE_CUT_BASE + i`.
pub const WIRE_CUT_BASE: u16 = 50;

// ── Inventory ───────────────────────────────────────────────────
/// Inventory slot `i` (0-based) maps to `USE_SLOT_BASE + i`.
pub const USE_SLOT_BASE: u16 = 60;
