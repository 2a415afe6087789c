use crate::museum::actions::WIRE_CUT_BASE;
use crate::museum::geometry::Bounds;

use super::{PuzzleInput, PuzzleOutcome, Region};

pub const WIRE_COUNT: usize = 5;
/// Wires in display order.
pub const WIRE_COLORS: [&str; WIRE_COUNT] = ["Red", "Yellow", "Blue", "Green", "Purple"];

const WIRE_Y: f32 = 180.0;
const WIRE_SPACING: f32 = 60.0;
const CUT_X: f32 = 620.0;

/// Cut wires in the target colour order. Cuts cannot be undone, so a wrong
/// full-length sequence stays wrong until the player leaves the puzzle.
#[derive(Clone, Debug)]
pub struct WirePuzzle {
    target: Vec<String>,
    cut: [bool; WIRE_COUNT],
    cut_sequence: Vec<String>,
    has_bolt_cutters: bool,
}

impl WirePuzzle {
    pub fn new(target: Vec<String>) -> Self {
        Self {
            target,
            cut: [false; WIRE_COUNT],
            cut_sequence: Vec::new(),
            has_bolt_cutters: false,
        }
    }

    pub fn set_bolt_cutters(&mut self, has: bool) {
        self.has_bolt_cutters = has;
    }

    pub fn has_bolt_cutters(&self) -> bool {
        self.has_bolt_cutters
    }

    pub fn is_cut(&self, wire: usize) -> bool {
        self.cut.get(wire).copied().unwrap_or(false)
    }

    pub fn cut_sequence(&self) -> &[String] {
        &self.cut_sequence
    }

    /// Full length and not the target.
    pub fn is_wrong(&self) -> bool {
        self.cut_sequence.len() >= self.target.len() && self.cut_sequence != self.target
    }

    /// Cut wire `index` (display order). Needs bolt cutters; each wire once;
    /// nothing more after a wrong sequence.
    pub fn cut_wire(&mut self, index: usize) -> PuzzleOutcome {
        if !self.has_bolt_cutters || index >= WIRE_COUNT || self.cut[index] || self.is_wrong() {
            return PuzzleOutcome::Ignored;
        }
        self.cut[index] = true;
        self.cut_sequence.push(WIRE_COLORS[index].to_string());
        if self.cut_sequence == self.target {
            PuzzleOutcome::Solved
        } else if self.cut_sequence.len() == self.target.len() {
            PuzzleOutcome::Rejected
        } else {
            PuzzleOutcome::Updated
        }
    }

    /// Comma-separated colour names, case-insensitive.
    pub fn solve(&mut self, answer: &str) -> bool {
        let attempt: Vec<&str> = answer
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        let matches = attempt.len() == self.target.len()
            && attempt.iter().zip(&self.target).all(|(a, t)| a.eq_ignore_ascii_case(t));
        if matches {
            self.cut_sequence = self.target.clone();
        }
        matches
    }

    pub fn handle_input(&mut self, input: &PuzzleInput) -> PuzzleOutcome {
        match input {
            PuzzleInput::Char(c @ '1'..='5') => self.cut_wire((*c as u8 - b'1') as usize),
            PuzzleInput::Action(id) if (WIRE_CUT_BASE..WIRE_CUT_BASE + WIRE_COUNT as u16).contains(id) => {
                self.cut_wire((id - WIRE_CUT_BASE) as usize)
            }
            _ => PuzzleOutcome::Ignored,
        }
    }

    /// CUT buttons for the wires still intact.
    pub fn regions(&self) -> Vec<Region> {
        if !self.has_bolt_cutters || self.is_wrong() {
            return Vec::new();
        }
        WIRE_COLORS
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.cut[*i])
            .map(|(i, color)| {
                let y = WIRE_Y + i as f32 * WIRE_SPACING - 5.0;
                Region::new(Bounds::new(CUT_X, y, 60.0, 35.0), WIRE_CUT_BASE + i as u16, format!("CUT {}", color))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bomb() -> WirePuzzle {
        WirePuzzle::new(WIRE_COLORS.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn cuts_rejected_without_tool() {
        let mut p = bomb();
        for i in 0..5 {
            assert_eq!(p.cut_wire(i), PuzzleOutcome::Ignored);
            assert!(!p.is_cut(i));
        }
        assert!(p.cut_sequence().is_empty());
        assert!(p.regions().is_empty());
    }

    #[test]
    fn correct_order_solves() {
        let mut p = bomb();
        p.set_bolt_cutters(true);
        for i in 0..4 {
            assert_eq!(p.cut_wire(i), PuzzleOutcome::Updated);
        }
        assert_eq!(p.cut_wire(4), PuzzleOutcome::Solved);
    }

    #[test]
    fn each_wire_cut_once() {
        let mut p = bomb();
        p.set_bolt_cutters(true);
        p.cut_wire(0);
        assert_eq!(p.cut_wire(0), PuzzleOutcome::Ignored);
        assert_eq!(p.cut_sequence().len(), 1);
        assert_eq!(p.regions().len(), 4);
    }

    #[test]
    fn wrong_order_sticks() {
        let mut p = bomb();
        p.set_bolt_cutters(true);
        for i in [1, 0, 2, 3] {
            assert_eq!(p.cut_wire(i), PuzzleOutcome::Updated);
        }
        assert_eq!(p.cut_wire(4), PuzzleOutcome::Rejected);
        assert!(p.is_wrong());
        assert!(p.regions().is_empty());
        assert_eq!(p.handle_input(&PuzzleInput::Char('1')), PuzzleOutcome::Ignored);
    }

    #[test]
    fn keyboard_wire_numbers() {
        let mut p = WirePuzzle::new(vec!["Yellow".into()]);
        p.set_bolt_cutters(true);
        assert_eq!(p.handle_input(&PuzzleInput::Char('6')), PuzzleOutcome::Ignored);
        assert_eq!(p.handle_input(&PuzzleInput::Char('2')), PuzzleOutcome::Solved);
    }

    #[test]
    fn cut_button_layout() {
        let mut p = bomb();
        p.set_bolt_cutters(true);
        let regions = p.regions();
        assert_eq!(regions[0].bounds, Bounds::new(620.0, 175.0, 60.0, 35.0));
        assert_eq!(regions[4].bounds.y, 180.0 + 4.0 * 60.0 - 5.0);
        assert_eq!(regions[2].action, WIRE_CUT_BASE + 2);
    }
}
