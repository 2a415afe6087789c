//! Shared input handling: event types, click targets, and pixel→cell conversion.
//!
//! Nothing here knows about the museum; `museum::MuseumGame` does the dispatch.

use ratzilla::ratatui::layout::Rect;

/// Arrow-key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Input events, normalized from keyboard, mouse, and touch sources.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A printable key press.
    Key(char),
    Enter,
    Escape,
    Backspace,
    Arrow(Direction),
    /// A click/tap on a registered target, identified by a semantic action ID
    /// (see `museum::actions`).
    Click(u16),
}

/// A region on screen that can be tapped/clicked to trigger an action.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// Hit region in terminal cells.
    pub rect: Rect,
    pub action_id: u16,
}

/// Click targets registered by the last frame, plus the terminal size they
/// were laid out for. Shared between the render loop and the mouse handler.
#[derive(Default)]
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame at the given terminal size.
    pub fn begin_frame(&mut self, cols: u16, rows: u16) {
        self.terminal_cols = cols;
        self.terminal_rows = rows;
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        if rect.width > 0 && rect.height > 0 {
            self.targets.push(ClickTarget { rect, action_id });
        }
    }

    /// Split a one-line bar into buttons. Each entry is `(label_width, action_id)`;
    /// labels are laid out left to right with `gap` columns between them, and
    /// every button also claims half of each neighbouring gap.
    pub fn add_button_row(&mut self, buttons: &[(u16, u16)], gap: u16, area: Rect) {
        let mut x = area.x;
        let right_edge = area.x + area.width;
        for (i, &(width, action_id)) in buttons.iter().enumerate() {
            let left = if i == 0 { area.x } else { x.saturating_sub(gap / 2) };
            let right = if i + 1 == buttons.len() {
                right_edge
            } else {
                (x + width + gap - gap / 2).min(right_edge)
            };
            if left >= right_edge {
                break;
            }
            self.add_click_target(Rect::new(left, area.y, right.saturating_sub(left), area.height), action_id);
            x += width + gap;
        }
    }

    /// Action ID under a cell. Later targets are drawn on top, so they win.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }
}

/// Narrow screens (phones) drop the side panel.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Pixel Y (relative to the grid's top edge) to a row index.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    pixel_to_cell(click_y, grid_height, terminal_rows)
}

/// Pixel X (relative to the grid's left edge) to a column index.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    pixel_to_cell(click_x, grid_width, terminal_cols)
}

fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── hit_test ────────────────────────────────────────────────────

    #[test]
    fn hit_test_inside_and_outside() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(10, 5, 6, 3), 31);
        assert_eq!(cs.hit_test(10, 5), Some(31));
        assert_eq!(cs.hit_test(15, 7), Some(31));
        assert_eq!(cs.hit_test(16, 7), None);
        assert_eq!(cs.hit_test(10, 8), None);
        assert_eq!(cs.hit_test(9, 5), None);
    }

    #[test]
    fn overlay_target_wins_over_background() {
        let mut cs = ClickState::new();
        // Movement pad under the whole map, then a keypad button on top.
        cs.add_click_target(Rect::new(0, 0, 80, 20), 10);
        cs.add_click_target(Rect::new(30, 8, 4, 2), 35);
        assert_eq!(cs.hit_test(31, 9), Some(35));
        assert_eq!(cs.hit_test(5, 9), Some(10));
    }

    #[test]
    fn zero_sized_targets_are_dropped() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 0, 3), 1);
        cs.add_click_target(Rect::new(0, 0, 3, 0), 2);
        assert!(cs.targets.is_empty());
        assert_eq!(cs.hit_test(0, 0), None);
    }

    #[test]
    fn begin_frame_resets_targets() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 5, 1), 1);
        cs.begin_frame(100, 40);
        assert!(cs.targets.is_empty());
        assert_eq!((cs.terminal_cols, cs.terminal_rows), (100, 40));
    }

    // ── add_button_row ──────────────────────────────────────────────

    #[test]
    fn button_row_covers_bar_without_gaps() {
        let mut cs = ClickState::new();
        // " [E] Use " (9) | " [P] Puzzle " (12) | " [I] Bag " (9), gap 2
        let buttons = [(9, 7), (12, 8), (9, 4)];
        cs.add_button_row(&buttons, 2, Rect::new(0, 30, 60, 1));
        assert_eq!(cs.targets.len(), 3);

        assert_eq!(cs.hit_test(0, 30), Some(7));
        assert_eq!(cs.hit_test(9, 30), Some(7)); // first gap column
        assert_eq!(cs.hit_test(10, 30), Some(8)); // second gap column
        assert_eq!(cs.hit_test(22, 30), Some(8));
        assert_eq!(cs.hit_test(23, 30), Some(8));
        assert_eq!(cs.hit_test(24, 30), Some(4));
        assert_eq!(cs.hit_test(59, 30), Some(4)); // last button runs to the edge

        for col in 0..60 {
            assert!(cs.hit_test(col, 30).is_some(), "gap at col {}", col);
        }
    }

    #[test]
    fn button_row_with_offset_area() {
        let mut cs = ClickState::new();
        cs.add_button_row(&[(5, 1), (5, 2)], 1, Rect::new(4, 2, 20, 1));
        assert_eq!(cs.hit_test(3, 2), None);
        assert_eq!(cs.hit_test(4, 2), Some(1));
        assert_eq!(cs.hit_test(10, 2), Some(2));
        assert_eq!(cs.hit_test(23, 2), Some(2));
        assert_eq!(cs.hit_test(24, 2), None);
    }

    #[test]
    fn button_row_empty_or_clipped() {
        let mut cs = ClickState::new();
        cs.add_button_row(&[], 2, Rect::new(0, 0, 40, 1));
        assert!(cs.targets.is_empty());
        // Labels wider than the bar: the overflow is not registered.
        cs.add_button_row(&[(30, 1), (30, 2)], 2, Rect::new(0, 0, 20, 1));
        assert_eq!(cs.hit_test(19, 0), Some(1));
        assert_eq!(cs.targets.len(), 1);
    }

    // ── pixel conversion ────────────────────────────────────────────

    #[test]
    fn rows_from_pixels() {
        assert_eq!(pixel_y_to_row(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(14.9, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_y_to_row(449.0, 450.0, 30), Some(29));
        assert_eq!(pixel_y_to_row(450.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(-1.0, 450.0, 30), None);
    }

    #[test]
    fn cols_from_pixels() {
        assert_eq!(pixel_x_to_col(0.0, 800.0, 80), Some(0));
        assert_eq!(pixel_x_to_col(10.0, 800.0, 80), Some(1));
        assert_eq!(pixel_x_to_col(799.0, 800.0, 80), Some(79));
        assert_eq!(pixel_x_to_col(800.0, 800.0, 80), None);
    }

    #[test]
    fn degenerate_grids() {
        assert_eq!(pixel_y_to_row(10.0, 0.0, 30), None);
        assert_eq!(pixel_x_to_col(10.0, 800.0, 0), None);
    }

    #[test]
    fn pixel_to_target_pipeline() {
        let mut cs = ClickState::new();
        cs.begin_frame(100, 40);
        // keypad "5" button: cols 40..46, rows 12..14
        cs.add_click_target(Rect::new(40, 12, 6, 2), 35);

        let (grid_w, grid_h) = (1000.0, 600.0); // 10 px × 15 px cells
        let col = pixel_x_to_col(425.0, grid_w, cs.terminal_cols).unwrap();
        let row = pixel_y_narrow(190.0, grid_h, cs.terminal_rows);
        assert_eq!((col, row), (42, 12));
        assert_eq!(cs.hit_test(col, row), Some(35));
    }

    fn pixel_y_narrow(y: f64, h: f64, rows: u16) -> u16 {
        pixel_y_to_row(y, h, rows).unwrap()
    }

    #[test]
    fn narrow_threshold() {
        assert!(is_narrow_layout(40));
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
    }
}
