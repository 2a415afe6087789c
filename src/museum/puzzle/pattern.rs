use crate::museum::actions::{PATTERN_RESET, SWITCH_BASE};
use crate::museum::geometry::Bounds;

use super::{PuzzleInput, PuzzleOutcome, Region};

pub const SWITCH_NAMES: [&str; 4] = ["Blue", "Red", "Green", "Yellow"];

const SWITCH_X: f32 = 200.0;
const SWITCH_SPACING: f32 = 120.0;
const SWITCH_Y: f32 = 350.0;
const SWITCH_SIZE: f32 = 80.0;

/// Press four coloured switches (numbered 1..=4) in the target order.
#[derive(Clone, Debug)]
pub struct PatternPuzzle {
    target: Vec<u8>,
    entered: Vec<u8>,
    misses: u32,
}

impl PatternPuzzle {
    pub fn new(target: Vec<u8>) -> Self {
        Self { target, entered: Vec::new(), misses: 0 }
    }

    pub fn target(&self) -> &[u8] {
        &self.target
    }

    pub fn entered(&self) -> &[u8] {
        &self.entered
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn reset(&mut self) {
        self.entered.clear();
    }

    /// Record a press. At full length the attempt is judged; a wrong one is
    /// wiped so the player can start over.
    pub fn press(&mut self, switch: u8) -> PuzzleOutcome {
        if !(1..=SWITCH_NAMES.len() as u8).contains(&switch) {
            return PuzzleOutcome::Ignored;
        }
        self.entered.push(switch);
        if self.entered.len() < self.target.len() {
            return PuzzleOutcome::Updated;
        }
        if self.entered == self.target {
            PuzzleOutcome::Solved
        } else {
            self.entered.clear();
            self.misses += 1;
            PuzzleOutcome::Rejected
        }
    }

    /// Digits in `answer` are switch numbers; anything else separates them.
    pub fn solve(&mut self, answer: &str) -> bool {
        let attempt: Vec<u8> = answer
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(|d| d as u8)
            .collect();
        if attempt == self.target {
            self.entered = attempt;
            true
        } else {
            false
        }
    }

    pub fn handle_input(&mut self, input: &PuzzleInput) -> PuzzleOutcome {
        match input {
            PuzzleInput::Char('r' | 'R') | PuzzleInput::Action(PATTERN_RESET) => {
                self.reset();
                PuzzleOutcome::Updated
            }
            PuzzleInput::Char(c @ '1'..='4') => self.press(*c as u8 - b'0'),
            PuzzleInput::Action(id) if (SWITCH_BASE..SWITCH_BASE + 4).contains(id) => {
                self.press((id - SWITCH_BASE) as u8 + 1)
            }
            _ => PuzzleOutcome::Ignored,
        }
    }

    pub fn regions(&self) -> Vec<Region> {
        let mut regions: Vec<Region> = SWITCH_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let x = SWITCH_X + i as f32 * SWITCH_SPACING;
                Region::new(
                    Bounds::new(x, SWITCH_Y, SWITCH_SIZE, SWITCH_SIZE),
                    SWITCH_BASE + i as u16,
                    *name,
                )
            })
            .collect();
        regions.push(Region::new(Bounds::new(340.0, 460.0, 120.0, 40.0), PATTERN_RESET, "RESET"));
        regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_order_solves() {
        let mut p = PatternPuzzle::new(vec![1, 3, 2, 4]);
        assert_eq!(p.press(1), PuzzleOutcome::Updated);
        assert_eq!(p.press(3), PuzzleOutcome::Updated);
        assert_eq!(p.press(2), PuzzleOutcome::Updated);
        assert_eq!(p.press(4), PuzzleOutcome::Solved);
    }

    #[test]
    fn wrong_order_clears_after_full_length() {
        let mut p = PatternPuzzle::new(vec![1, 3, 2, 4]);
        for s in [1, 2, 3] {
            assert_eq!(p.press(s), PuzzleOutcome::Updated);
        }
        assert_eq!(p.entered(), &[1, 2, 3]);
        assert_eq!(p.press(4), PuzzleOutcome::Rejected);
        assert!(p.entered().is_empty());
        assert_eq!(p.misses(), 1);
        for s in [1, 3, 2] {
            p.press(s);
        }
        assert_eq!(p.press(4), PuzzleOutcome::Solved);
    }

    #[test]
    fn keyboard_and_clicks() {
        let mut p = PatternPuzzle::new(vec![1, 3]);
        assert_eq!(p.handle_input(&PuzzleInput::Char('1')), PuzzleOutcome::Updated);
        assert_eq!(p.handle_input(&PuzzleInput::Char('r')), PuzzleOutcome::Updated);
        assert!(p.entered().is_empty());
        assert_eq!(p.handle_input(&PuzzleInput::Char('5')), PuzzleOutcome::Ignored);
        assert_eq!(p.handle_input(&PuzzleInput::Action(SWITCH_BASE)), PuzzleOutcome::Updated);
        assert_eq!(p.handle_input(&PuzzleInput::Action(SWITCH_BASE + 2)), PuzzleOutcome::Solved);
    }

    #[test]
    fn regions_follow_switch_layout() {
        let p = PatternPuzzle::new(vec![1]);
        let regions = p.regions();
        assert_eq!(regions.len(), 5);
        assert_eq!(regions[0].bounds, Bounds::new(200.0, 350.0, 80.0, 80.0));
        assert_eq!(regions[3].bounds.x, 560.0);
        assert_eq!(regions[3].label, "Yellow");
        assert_eq!(regions[4].action, PATTERN_RESET);
    }
}
