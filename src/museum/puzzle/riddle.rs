use super::{PuzzleInput, PuzzleOutcome};

/// Longest answer the text field accepts.
pub const MAX_ANSWER_LEN: usize = 30;

/// Free-text riddle. Answers are compared trimmed and case-insensitively.
#[derive(Clone, Debug)]
pub struct RiddlePuzzle {
    pub riddle: String,
    answer: String,
    input: String,
    wrong: bool,
}

impl RiddlePuzzle {
    pub fn new(riddle: impl Into<String>, answer: &str) -> Self {
        Self {
            riddle: riddle.into(),
            answer: normalize(answer),
            input: String::new(),
            wrong: false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn was_wrong(&self) -> bool {
        self.wrong
    }

    pub fn solve(&mut self, answer: &str) -> bool {
        let correct = normalize(answer) == self.answer;
        self.wrong = !correct;
        correct
    }

    /// A wrong submission keeps the typed text so the player can fix it.
    pub fn handle_input(&mut self, input: &PuzzleInput) -> PuzzleOutcome {
        match input {
            PuzzleInput::Char(c) => {
                if (' '..='~').contains(c) && self.input.len() < MAX_ANSWER_LEN {
                    self.input.push(*c);
                    self.wrong = false;
                    PuzzleOutcome::Updated
                } else {
                    PuzzleOutcome::Ignored
                }
            }
            PuzzleInput::Backspace => match self.input.pop() {
                Some(_) => {
                    self.wrong = false;
                    PuzzleOutcome::Updated
                }
                None => PuzzleOutcome::Ignored,
            },
            PuzzleInput::Submit if !self.input.is_empty() => {
                let attempt = self.input.clone();
                if self.solve(&attempt) {
                    PuzzleOutcome::Solved
                } else {
                    PuzzleOutcome::Rejected
                }
            }
            PuzzleInput::Submit | PuzzleInput::Action(_) => PuzzleOutcome::Ignored,
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(p: &mut RiddlePuzzle, s: &str) {
        for c in s.chars() {
            p.handle_input(&PuzzleInput::Char(c));
        }
    }

    #[test]
    fn correct_answer_any_case_and_padding() {
        let mut p = RiddlePuzzle::new("What am I?", "Echo");
        type_str(&mut p, "  eCHo ");
        assert_eq!(p.handle_input(&PuzzleInput::Submit), PuzzleOutcome::Solved);
    }

    #[test]
    fn wrong_answer_keeps_buffer() {
        let mut p = RiddlePuzzle::new("What am I?", "echo");
        type_str(&mut p, "wind");
        assert_eq!(p.handle_input(&PuzzleInput::Submit), PuzzleOutcome::Rejected);
        assert_eq!(p.input(), "wind");
        assert!(p.was_wrong());
        p.handle_input(&PuzzleInput::Backspace);
        assert!(!p.was_wrong());
        assert_eq!(p.input(), "win");
    }

    #[test]
    fn empty_submit_ignored() {
        let mut p = RiddlePuzzle::new("?", "echo");
        assert_eq!(p.handle_input(&PuzzleInput::Submit), PuzzleOutcome::Ignored);
        assert_eq!(p.handle_input(&PuzzleInput::Backspace), PuzzleOutcome::Ignored);
    }

    #[test]
    fn rejects_control_chars_and_overflow() {
        let mut p = RiddlePuzzle::new("?", "echo");
        assert_eq!(p.handle_input(&PuzzleInput::Char('\n')), PuzzleOutcome::Ignored);
        assert_eq!(p.handle_input(&PuzzleInput::Char('é')), PuzzleOutcome::Ignored);
        type_str(&mut p, &"x".repeat(40));
        assert_eq!(p.input().len(), MAX_ANSWER_LEN);
    }
}
