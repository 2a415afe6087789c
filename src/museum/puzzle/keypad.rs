//! Numeric keypads: the door lock and the arithmetic safe share one pad.

use crate::museum::actions::{KEYPAD_CLEAR, KEYPAD_DIGIT_BASE, KEYPAD_OK};
use crate::museum::geometry::Bounds;

use super::{PuzzleInput, PuzzleOutcome, Region};

const PAD_X: f32 = 235.0;
const PAD_Y: f32 = 200.0;
const BUTTON: f32 = 65.0;
const SPACING: f32 = 85.0;

/// A digit buffer as long as its code, judged only on submit.
#[derive(Clone, Debug)]
pub struct DigitPad {
    code: String,
    entered: String,
    rejected: bool,
}

impl DigitPad {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into(), entered: String::new(), rejected: false }
    }

    pub fn entered(&self) -> &str {
        &self.entered
    }

    pub fn max_digits(&self) -> usize {
        self.code.len()
    }

    pub fn is_full(&self) -> bool {
        self.entered.len() >= self.max_digits()
    }

    /// Set after a wrong submit, cleared by the next edit.
    pub fn is_rejected(&self) -> bool {
        self.rejected
    }

    pub fn push_digit(&mut self, digit: char) -> PuzzleOutcome {
        if !digit.is_ascii_digit() || self.is_full() {
            return PuzzleOutcome::Ignored;
        }
        self.entered.push(digit);
        self.rejected = false;
        PuzzleOutcome::Updated
    }

    pub fn backspace(&mut self) -> PuzzleOutcome {
        match self.entered.pop() {
            Some(_) => {
                self.rejected = false;
                PuzzleOutcome::Updated
            }
            None => PuzzleOutcome::Ignored,
        }
    }

    pub fn clear(&mut self) -> PuzzleOutcome {
        self.entered.clear();
        self.rejected = false;
        PuzzleOutcome::Updated
    }

    /// Judge the current buffer. A wrong entry stays on the display.
    pub fn submit(&mut self) -> PuzzleOutcome {
        if self.entered == self.code {
            PuzzleOutcome::Solved
        } else {
            self.rejected = true;
            PuzzleOutcome::Rejected
        }
    }

    pub fn solve(&mut self, answer: &str) -> bool {
        if answer.trim() == self.code {
            self.entered = self.code.clone();
            true
        } else {
            false
        }
    }

    /// The keyboard Enter only submits a full buffer; the on-screen OK
    /// submits whatever is there.
    pub fn handle_input(&mut self, input: &PuzzleInput) -> PuzzleOutcome {
        match input {
            PuzzleInput::Char(c) => self.push_digit(*c),
            PuzzleInput::Backspace => self.backspace(),
            PuzzleInput::Submit if self.is_full() => self.submit(),
            PuzzleInput::Submit => PuzzleOutcome::Ignored,
            PuzzleInput::Action(KEYPAD_CLEAR) => self.clear(),
            PuzzleInput::Action(KEYPAD_OK) => self.submit(),
            PuzzleInput::Action(id) if (KEYPAD_DIGIT_BASE..KEYPAD_DIGIT_BASE + 10).contains(id) => {
                match char::from_digit(u32::from(id - KEYPAD_DIGIT_BASE), 10) {
                    Some(d) => self.push_digit(d),
                    None => PuzzleOutcome::Ignored,
                }
            }
            PuzzleInput::Action(_) => PuzzleOutcome::Ignored,
        }
    }

    /// 1-9 in a 3×3 grid, then `C`, `0`, `OK` along the bottom.
    pub fn regions(&self) -> Vec<Region> {
        let cell = |col: usize, row: usize| {
            Bounds::new(PAD_X + col as f32 * SPACING, PAD_Y + row as f32 * SPACING, BUTTON, BUTTON)
        };
        let mut regions: Vec<Region> = (1..=9u16)
            .map(|d| {
                let i = (d - 1) as usize;
                Region::new(cell(i % 3, i / 3), KEYPAD_DIGIT_BASE + d, d.to_string())
            })
            .collect();
        regions.push(Region::new(cell(0, 3), KEYPAD_CLEAR, "C"));
        regions.push(Region::new(cell(1, 3), KEYPAD_DIGIT_BASE, "0"));
        regions.push(Region::new(cell(2, 3), KEYPAD_OK, "OK"));
        regions
    }
}

#[derive(Clone, Debug)]
pub struct LockPuzzle {
    pub pad: DigitPad,
}

impl LockPuzzle {
    pub fn new(code: impl Into<String>) -> Self {
        Self { pad: DigitPad::new(code) }
    }

    pub fn handle_input(&mut self, input: &PuzzleInput) -> PuzzleOutcome {
        self.pad.handle_input(input)
    }
}

/// An equation shown to the player; the pad's code is its precomputed result.
#[derive(Clone, Debug)]
pub struct MathPuzzle {
    pub equation: String,
    pub pad: DigitPad,
}

impl MathPuzzle {
    pub fn new(equation: impl Into<String>, answer: impl Into<String>) -> Self {
        Self { equation: equation.into(), pad: DigitPad::new(answer) }
    }

    pub fn handle_input(&mut self, input: &PuzzleInput) -> PuzzleOutcome {
        self.pad.handle_input(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_digits(pad: &mut DigitPad, digits: &str) {
        for c in digits.chars() {
            pad.handle_input(&PuzzleInput::Char(c));
        }
    }

    #[test]
    fn right_code_solves() {
        let mut pad = DigitPad::new("4738");
        type_digits(&mut pad, "4738");
        assert_eq!(pad.handle_input(&PuzzleInput::Submit), PuzzleOutcome::Solved);
    }

    #[test]
    fn wrong_code_is_kept_and_flagged() {
        let mut pad = DigitPad::new("4738");
        type_digits(&mut pad, "1234");
        assert_eq!(pad.handle_input(&PuzzleInput::Submit), PuzzleOutcome::Rejected);
        assert_eq!(pad.entered(), "1234");
        assert!(pad.is_rejected());
        pad.handle_input(&PuzzleInput::Backspace);
        assert!(!pad.is_rejected());
        assert_eq!(pad.entered(), "123");
    }

    #[test]
    fn buffer_capped_at_code_length() {
        let mut pad = DigitPad::new("118");
        type_digits(&mut pad, "11899");
        assert_eq!(pad.entered(), "118");
        assert_eq!(pad.handle_input(&PuzzleInput::Char('a')), PuzzleOutcome::Ignored);
    }

    #[test]
    fn enter_needs_full_buffer_but_ok_does_not() {
        let mut pad = DigitPad::new("4738");
        type_digits(&mut pad, "47");
        assert_eq!(pad.handle_input(&PuzzleInput::Submit), PuzzleOutcome::Ignored);
        assert_eq!(pad.handle_input(&PuzzleInput::Action(KEYPAD_OK)), PuzzleOutcome::Rejected);
    }

    #[test]
    fn on_screen_buttons() {
        let mut pad = DigitPad::new("40");
        pad.handle_input(&PuzzleInput::Action(KEYPAD_DIGIT_BASE + 9));
        pad.handle_input(&PuzzleInput::Action(KEYPAD_CLEAR));
        assert_eq!(pad.entered(), "");
        pad.handle_input(&PuzzleInput::Action(KEYPAD_DIGIT_BASE + 4));
        pad.handle_input(&PuzzleInput::Action(KEYPAD_DIGIT_BASE));
        assert_eq!(pad.handle_input(&PuzzleInput::Action(KEYPAD_OK)), PuzzleOutcome::Solved);
    }

    #[test]
    fn keypad_layout() {
        let regions = DigitPad::new("1").regions();
        assert_eq!(regions.len(), 12);
        assert_eq!(regions[0].bounds, Bounds::new(235.0, 200.0, 65.0, 65.0));
        assert_eq!(regions[8].label, "9");
        assert_eq!(regions[8].bounds.x, 235.0 + 2.0 * 85.0);
        assert_eq!(regions[8].bounds.y, 200.0 + 2.0 * 85.0);
        assert_eq!(regions[11].action, KEYPAD_OK);
        assert_eq!(regions[10].label, "0");
    }
}
