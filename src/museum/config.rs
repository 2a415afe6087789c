//! Tunables and rule policies, read from the level file's `"config"` block.
//!
//! Every field has a default, so a level may omit the block entirely or set
//! only the knobs it cares about.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What happens when a guard spots the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatchPolicy {
    /// Every catch ends the run.
    Immediate,
    /// First catch costs `penalty` seconds and a warning; the second ends the run.
    WarnThenCatch { penalty: f32 },
    /// Catches only ever cost time.
    WarnOnly { penalty: f32 },
}

impl Default for CatchPolicy {
    fn default() -> Self {
        CatchPolicy::WarnThenCatch { penalty: 5.0 }
    }
}

/// How the run is won.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WinCondition {
    /// Stand in the exit room with every puzzle in the museum solved.
    EscapeWithAllPuzzles,
    /// Carry the named item.
    HoldItem { name: String },
}

impl Default for WinCondition {
    fn default() -> Self {
        WinCondition::EscapeWithAllPuzzles
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seconds on the countdown.
    pub time_limit: f32,
    pub inventory_capacity: usize,
    /// Ceiling on a single tick's delta, in seconds.
    pub max_frame_delta: f32,
    pub player_speed: f32,
    pub player_size: f32,
    pub player_start: Vec2,
    /// Spawn for doors that do not set their own.
    pub default_spawn: Vec2,
    pub warning_threshold: f32,
    pub critical_threshold: f32,
    pub catch_policy: CatchPolicy,
    pub win_condition: WinCondition,
    /// Charge a puzzle's `time_penalty` on a wrong attempt.
    pub apply_puzzle_penalties: bool,
    /// How long one movement key press keeps the player walking.
    pub move_hold: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            time_limit: 600.0,
            inventory_capacity: 10,
            max_frame_delta: 0.1,
            player_speed: 200.0,
            player_size: 32.0,
            player_start: Vec2::new(100.0, 100.0),
            default_spawn: Vec2::new(100.0, 300.0),
            warning_threshold: 60.0,
            critical_threshold: 30.0,
            catch_policy: CatchPolicy::default(),
            win_condition: WinCondition::default(),
            apply_puzzle_penalties: false,
            move_hold: 0.15,
        }
    }
}
