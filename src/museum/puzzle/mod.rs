//! Puzzle state machines.
//!
//! Every puzzle moves one way, from unsolved to solved. Variants only track
//! their own partial input; rewards, time bonuses and notifications belong to
//! the orchestrator, which reacts to [`PuzzleOutcome::Solved`].

pub mod keypad;
pub mod pattern;
pub mod riddle;
pub mod wire;

use super::geometry::Bounds;
use super::item::Item;

pub use keypad::{DigitPad, LockPuzzle, MathPuzzle};
pub use pattern::PatternPuzzle;
pub use riddle::RiddlePuzzle;
pub use wire::WirePuzzle;

/// Input forwarded to the active puzzle. Each variant decides what a
/// character or click means to it.
#[derive(Clone, Debug, PartialEq)]
pub enum PuzzleInput {
    /// Printable character typed on the keyboard.
    Char(char),
    Backspace,
    Submit,
    /// A click on one of the puzzle's [`Region`]s.
    Action(u16),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PuzzleOutcome {
    /// Nothing changed.
    Ignored,
    /// Partial state changed.
    Updated,
    /// The puzzle just became solved.
    Solved,
    /// A complete attempt was wrong.
    Rejected,
}

/// A clickable rectangle on the puzzle panel, in world units.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub bounds: Bounds,
    pub action: u16,
    pub label: String,
}

impl Region {
    pub fn new(bounds: Bounds, action: u16, label: impl Into<String>) -> Self {
        Self { bounds, action, label: label.into() }
    }
}

#[derive(Clone, Debug)]
pub enum PuzzleKind {
    Riddle(RiddlePuzzle),
    Pattern(PatternPuzzle),
    Lock(LockPuzzle),
    Math(MathPuzzle),
    Wire(WirePuzzle),
}

#[derive(Clone, Debug)]
pub struct Puzzle {
    pub description: String,
    pub hint: String,
    pub time_bonus: f32,
    pub time_penalty: f32,
    solved: bool,
    pub kind: PuzzleKind,
    /// Dropped into the puzzle's room when it is solved.
    pub reward: Option<Item>,
    /// Shown when the puzzle is opened.
    pub prompt: Option<String>,
}

impl Puzzle {
    pub fn new(
        description: impl Into<String>,
        hint: impl Into<String>,
        time_bonus: f32,
        time_penalty: f32,
        kind: PuzzleKind,
    ) -> Self {
        Self {
            description: description.into(),
            hint: hint.into(),
            time_bonus,
            time_penalty,
            solved: false,
            kind,
            reward: None,
            prompt: None,
        }
    }

    pub fn with_reward(mut self, reward: Item) -> Self {
        self.reward = Some(reward);
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn riddle(riddle: impl Into<String>, answer: &str) -> Self {
        let riddle = riddle.into();
        Self::new(riddle.clone(), "Think carefully...", 30.0, 10.0, PuzzleKind::Riddle(RiddlePuzzle::new(riddle, answer)))
    }

    pub fn pattern(target: Vec<u8>) -> Self {
        Self::new("Match the pattern", "Watch carefully...", 40.0, 15.0, PuzzleKind::Pattern(PatternPuzzle::new(target)))
    }

    pub fn lock(code: impl Into<String>) -> Self {
        Self::new("Enter the code", "Look for clues...", 35.0, 10.0, PuzzleKind::Lock(LockPuzzle::new(code)))
    }

    pub fn math(equation: impl Into<String>, answer: impl Into<String>) -> Self {
        Self::new(
            "Solve the equation to unlock the safe",
            "Check the equation carefully",
            35.0,
            10.0,
            PuzzleKind::Math(MathPuzzle::new(equation, answer)),
        )
    }

    pub fn wire(sequence: Vec<String>) -> Self {
        Self::new(
            "Cut the wires in the correct sequence",
            "Primary colors first, then secondary",
            40.0,
            10.0,
            PuzzleKind::Wire(WirePuzzle::new(sequence)),
        )
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            PuzzleKind::Riddle(_) => "RIDDLE PUZZLE",
            PuzzleKind::Pattern(_) => "PATTERN PUZZLE",
            PuzzleKind::Lock(_) => "LOCK PUZZLE",
            PuzzleKind::Math(_) => "MATH PUZZLE - SAFE LOCK",
            PuzzleKind::Wire(_) => "WIRE CUTTING PUZZLE",
        }
    }

    /// Feed one input event. A solved puzzle ignores everything.
    pub fn handle_input(&mut self, input: &PuzzleInput) -> PuzzleOutcome {
        if self.solved {
            return PuzzleOutcome::Ignored;
        }
        let outcome = match &mut self.kind {
            PuzzleKind::Riddle(p) => p.handle_input(input),
            PuzzleKind::Pattern(p) => p.handle_input(input),
            PuzzleKind::Lock(p) => p.handle_input(input),
            PuzzleKind::Math(p) => p.handle_input(input),
            PuzzleKind::Wire(p) => p.handle_input(input),
        };
        if outcome == PuzzleOutcome::Solved {
            self.solved = true;
        }
        outcome
    }

    /// Check a whole answer at once. What counts as an answer depends on the
    /// variant: free text, digits, switch numbers like `"1324"`, or
    /// comma-separated wire colours.
    pub fn solve(&mut self, answer: &str) -> bool {
        if self.solved {
            return true;
        }
        let correct = match &mut self.kind {
            PuzzleKind::Riddle(p) => p.solve(answer),
            PuzzleKind::Pattern(p) => p.solve(answer),
            PuzzleKind::Lock(p) => p.pad.solve(answer),
            PuzzleKind::Math(p) => p.pad.solve(answer),
            PuzzleKind::Wire(p) => p.solve(answer),
        };
        self.solved = correct;
        correct
    }

    /// Per-frame hook. None of the current variants animate.
    pub fn update(&mut self, _dt: f32) {}

    /// Pushed in by the orchestrator; only the wire puzzle cares.
    pub fn set_tool(&mut self, has_tool: bool) {
        if let PuzzleKind::Wire(p) = &mut self.kind {
            p.set_bolt_cutters(has_tool);
        }
    }

    pub fn regions(&self) -> Vec<Region> {
        if self.solved {
            return Vec::new();
        }
        match &self.kind {
            PuzzleKind::Riddle(_) => Vec::new(),
            PuzzleKind::Pattern(p) => p.regions(),
            PuzzleKind::Lock(p) => p.pad.regions(),
            PuzzleKind::Math(p) => p.pad.regions(),
            PuzzleKind::Wire(p) => p.regions(),
        }
    }

    /// Status line for the puzzle panel, if there is something to say.
    pub fn feedback(&self) -> Option<String> {
        if self.solved {
            let msg = match self.kind {
                PuzzleKind::Math(_) => format!("Correct! Safe unlocked! +{} seconds!", self.time_bonus),
                PuzzleKind::Wire(_) => format!("Success! Alarm disabled! +{} seconds!", self.time_bonus),
                _ => format!("Correct! +{} seconds!", self.time_bonus),
            };
            return Some(msg);
        }
        match &self.kind {
            PuzzleKind::Riddle(p) if p.was_wrong() => Some("Wrong answer. Try again.".to_string()),
            PuzzleKind::Pattern(p) if p.misses() > 0 && p.entered().is_empty() => {
                Some("Wrong pattern! Try again.".to_string())
            }
            PuzzleKind::Lock(p) if p.pad.is_rejected() => Some("Wrong code! Try again.".to_string()),
            PuzzleKind::Math(p) if p.pad.is_rejected() => Some("Wrong answer! Try again.".to_string()),
            PuzzleKind::Wire(p) if !p.has_bolt_cutters() => Some("ERROR: Bolt Cutters required!".to_string()),
            PuzzleKind::Wire(p) if p.is_wrong() => {
                Some("WRONG SEQUENCE! Alarm triggered! (Press ESC)".to_string())
            }
            _ => None,
        }
    }
}
