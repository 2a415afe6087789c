//! Museum Escape rendering: one screen per game state.
//!
//! Playing: header + room map (+ side panel when wide) + notification + help bar.
//! Menu, pause, puzzle and end screens replace the map entirely.
//! Puzzle regions are laid out in world units and mapped onto the panel.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction as LayoutDir, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};

use super::actions::*;
use super::geometry::Bounds;
use super::item::{Item, ItemKind};
use super::level::WORLD_BOUNDS;
use super::logic;
use super::puzzle::pattern::SWITCH_NAMES;
use super::puzzle::wire::WIRE_COLORS;
use super::puzzle::{Puzzle, PuzzleKind};
use super::room::Room;
use super::state::{Ending, GameState, MuseumState, NoticeColor};
use super::timer::Urgency;

const SIDE_PANEL_WIDTH: u16 = 32;
const BUTTON_GAP: u16 = 2;

pub fn render(
    state: &MuseumState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Screen
            Constraint::Length(1), // Notification
            Constraint::Length(3), // Help
        ])
        .split(area);

    render_header(state, f, chunks[0]);
    match state.state {
        GameState::Menu => render_menu(state, f, chunks[1], click_state),
        GameState::Playing => render_playing(state, f, chunks[1], click_state),
        GameState::Paused => render_paused(state, f, chunks[1], click_state),
        GameState::PuzzleActive => render_puzzle(state, f, chunks[1], click_state),
        GameState::GameOver | GameState::Victory => render_ending(state, f, chunks[1], click_state),
    }
    render_notification(state, f, chunks[2]);
    render_help(state, f, chunks[3], click_state);
}

fn borders_for(area_width: u16) -> Borders {
    if is_narrow_layout(area_width) {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    }
}

fn notice_color(color: NoticeColor) -> Color {
    match color {
        NoticeColor::Green => Color::Green,
        NoticeColor::Yellow => Color::Yellow,
        NoticeColor::Cyan => Color::Cyan,
        NoticeColor::Red => Color::Red,
        NoticeColor::Magenta => Color::Magenta,
        NoticeColor::White => Color::White,
    }
}

fn urgency_color(urgency: Urgency) -> Color {
    match urgency {
        Urgency::Normal => Color::Green,
        Urgency::Warning => Color::Yellow,
        Urgency::Critical => Color::Red,
    }
}

/// Map a world-space rectangle onto the cells of `area`, which shows `world`.
pub fn world_rect_to_cells(rect: &Bounds, world: &Bounds, area: Rect) -> Rect {
    if world.w <= 0.0 || world.h <= 0.0 || area.width == 0 || area.height == 0 {
        return Rect::new(area.x, area.y, 0, 0);
    }
    let sx = area.width as f32 / world.w;
    let sy = area.height as f32 / world.h;
    let x0 = ((rect.x - world.x) * sx).floor().clamp(0.0, area.width as f32) as u16;
    let y0 = ((rect.y - world.y) * sy).floor().clamp(0.0, area.height as f32) as u16;
    let x1 = ((rect.right() - world.x) * sx).ceil().clamp(0.0, area.width as f32) as u16;
    let y1 = ((rect.bottom() - world.y) * sy).ceil().clamp(0.0, area.height as f32) as u16;
    Rect::new(area.x + x0, area.y + y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
}

// ── Header ──────────────────────────────────────────────────

fn render_header(state: &MuseumState, f: &mut Frame, area: Rect) {
    let room_name = state.current_room().map_or("?", |r| r.name.as_str());
    let timer_style = Style::default()
        .fg(urgency_color(state.timer.urgency()))
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled(format!(" {} ", room_name), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::styled(" Time ", Style::default().fg(Color::DarkGray)),
        Span::styled(state.timer.formatted(), timer_style),
        Span::styled(
            format!("  Puzzles {}/{}", state.puzzles_solved(), state.puzzles_total()),
            Style::default().fg(Color::Cyan),
        ),
    ];
    if state.player.is_warned() {
        spans.push(Span::styled(
            "  ! SPOTTED",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(" Museum Escape ", Style::default().fg(Color::Yellow)));
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

// ── Playing ─────────────────────────────────────────────────

fn render_playing(
    state: &MuseumState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    if is_narrow_layout(area.width) {
        if state.inventory.is_visible() {
            render_inventory(state, f, area, click_state);
        } else {
            render_map(state, f, area, click_state);
        }
        return;
    }

    let h_chunks = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(SIDE_PANEL_WIDTH)])
        .split(area);
    render_map(state, f, h_chunks[0], click_state);

    if state.inventory.is_visible() {
        render_inventory(state, f, h_chunks[1], click_state);
    } else {
        render_log(state, f, h_chunks[1]);
    }
}

/// One character per cell, painted back to front.
struct Canvas {
    cells: Vec<Vec<(char, Style)>>,
    world: Bounds,
    area: Rect,
}

impl Canvas {
    fn new(world: Bounds, area: Rect) -> Self {
        let floor = ('·', Style::default().fg(Color::Rgb(50, 50, 60)));
        Self {
            cells: vec![vec![floor; area.width as usize]; area.height as usize],
            world,
            area,
        }
    }

    fn fill(&mut self, rect: &Bounds, ch: char, style: Style) {
        let r = world_rect_to_cells(rect, &self.world, self.area);
        for y in r.y..r.y + r.height {
            for x in r.x..r.x + r.width {
                self.put_cell(x - self.area.x, y - self.area.y, ch, style);
            }
        }
    }

    /// Put one glyph at the cell holding the centre of `rect`.
    fn mark(&mut self, rect: &Bounds, ch: char, style: Style) {
        let c = rect.center();
        let col = ((c.x - self.world.x) / self.world.w * self.area.width as f32).floor();
        let row = ((c.y - self.world.y) / self.world.h * self.area.height as f32).floor();
        if col >= 0.0 && row >= 0.0 {
            self.put_cell(col as u16, row as u16, ch, style);
        }
    }

    fn put_cell(&mut self, col: u16, row: u16, ch: char, style: Style) {
        if let Some(cell) = self.cells.get_mut(row as usize).and_then(|r| r.get_mut(col as usize)) {
            *cell = (ch, style);
        }
    }

    fn into_lines(self) -> Vec<Line<'static>> {
        self.cells
            .into_iter()
            .map(|row| {
                Line::from(
                    row.into_iter()
                        .map(|(ch, style)| Span::styled(ch.to_string(), style))
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }
}

fn item_glyph(item: &Item) -> (char, Color) {
    match &item.kind {
        ItemKind::Key { .. } => ('k', Color::Yellow),
        ItemKind::Passcode { .. } => ('#', Color::Magenta),
        ItemKind::Basic => ('?', Color::White),
        ItemKind::Tool { .. } => ('t', Color::Cyan),
    }
}

fn render_map(
    state: &MuseumState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let Some(room) = state.current_room() else {
        return;
    };
    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(if room.is_exit { Color::Green } else { Color::Blue }))
        .title(Span::styled(
            format!(" Room {} ", room.id),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let canvas = paint_room(state, room, inner);
    f.render_widget(Paragraph::new(canvas.into_lines()), inner);

    // Tap the map to walk: top and bottom thirds move vertically, the middle
    // band moves left or right of centre.
    let third = inner.height / 3;
    let half = inner.width / 2;
    let band = inner.height.saturating_sub(third * 2);
    let mut cs = click_state.borrow_mut();
    cs.add_click_target(Rect::new(inner.x, inner.y, inner.width, third), MOVE_UP);
    cs.add_click_target(Rect::new(inner.x, inner.y + third, half, band), MOVE_LEFT);
    cs.add_click_target(Rect::new(inner.x + half, inner.y + third, inner.width - half, band), MOVE_RIGHT);
    cs.add_click_target(Rect::new(inner.x, inner.y + third + band, inner.width, third), MOVE_DOWN);
}

fn paint_room(state: &MuseumState, room: &Room, inner: Rect) -> Canvas {
    let mut canvas = Canvas::new(room.bounds, inner);

    for guard in &room.guards {
        let r = guard.detection_radius;
        let c = guard.bounds().center();
        let zone = Bounds::new(c.x - r, c.y - r, r * 2.0, r * 2.0);
        canvas.fill(&zone, '░', Style::default().fg(Color::Rgb(90, 30, 30)));
    }
    for door in &room.doors {
        let color = if door.is_locked() { Color::Red } else { Color::Green };
        canvas.fill(&door.bounds(), '█', Style::default().fg(color));
    }
    for item in room.items.iter().filter(|i| !i.is_collected()) {
        let (ch, color) = item_glyph(item);
        canvas.mark(&item.bounds(), ch, Style::default().fg(color).add_modifier(Modifier::BOLD));
    }
    for guard in &room.guards {
        canvas.mark(&guard.bounds(), 'G', Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
    }
    canvas.mark(
        &state.player.bounds(),
        '@',
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    );
    canvas
}

fn render_inventory(
    state: &MuseumState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut lines = Vec::new();
    if state.inventory.count() == 0 {
        lines.push(Line::from(Span::styled(" (empty)", Style::default().fg(Color::DarkGray))));
    }
    for (i, item) in state.inventory.items().iter().enumerate() {
        let (glyph, color) = item_glyph(item);
        let mut spans = vec![
            Span::styled(format!(" [{}] ", i + 1), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled(format!("{} ", glyph), Style::default().fg(color)),
            Span::styled(item.name.clone(), Style::default().fg(Color::White)),
        ];
        if item.tool_type().is_some() {
            let (label, c) = if item.is_active_tool() { (" ON", Color::Green) } else { (" off", Color::DarkGray) };
            spans.push(Span::styled(label, Style::default().fg(c)));
        }
        lines.push(Line::from(spans));
    }

    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(Color::Magenta))
        .title(Span::styled(
            format!(" Inventory {}/{} ", state.inventory.count(), state.inventory.max_capacity()),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(Paragraph::new(lines).block(block), area);

    let mut cs = click_state.borrow_mut();
    for i in 0..state.inventory.count().min(inner.height as usize) {
        cs.add_click_target(Rect::new(inner.x, inner.y + i as u16, inner.width, 1), USE_SLOT_BASE + i as u16);
    }
}

fn render_log(state: &MuseumState, f: &mut Frame, area: Rect) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(visible_height);
    let lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|entry| Line::from(Span::styled(format!(" {}", entry), Style::default().fg(Color::Gray))))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Log ");
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

// ── Puzzle ──────────────────────────────────────────────────

fn render_puzzle(
    state: &MuseumState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let Some(puzzle) = logic::active_puzzle(state) else {
        return;
    };
    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(Color::Magenta))
        .title(Span::styled(
            format!(" {} ", puzzle.title()),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(puzzle.description.clone(), Style::default().fg(Color::White))),
        Line::from(Span::styled(format!("Hint: {}", puzzle.hint), Style::default().fg(Color::DarkGray))),
        Line::from(""),
    ];
    lines.extend(puzzle_body(puzzle));
    if let Some(feedback) = puzzle.feedback() {
        let color = if puzzle.is_solved() { Color::Green } else { Color::Red };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(feedback, Style::default().fg(color).add_modifier(Modifier::BOLD))));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);

    // Buttons go on top of the text, positioned as on the 800×600 panel.
    let mut cs = click_state.borrow_mut();
    for region in puzzle.regions() {
        let cell = world_rect_to_cells(&region.bounds, &WORLD_BOUNDS, inner);
        if cell.width == 0 || cell.height == 0 {
            continue;
        }
        let button = if cell.height >= 3 && cell.width as usize >= region.label.len() + 2 {
            Paragraph::new(region.label.clone()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
        } else {
            Paragraph::new(region.label.clone())
                .style(Style::default().fg(Color::Black).bg(Color::Yellow))
        };
        f.render_widget(button.alignment(Alignment::Center), cell);
        cs.add_click_target(cell, region.action);
    }
}

fn puzzle_body(puzzle: &Puzzle) -> Vec<Line<'static>> {
    let accent = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    match &puzzle.kind {
        PuzzleKind::Riddle(p) => {
            let mut lines: Vec<Line> = p
                .riddle
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Cyan))))
                .collect();
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("Answer: "),
                Span::styled(format!("{}_", p.input()), accent),
            ]));
            lines
        }
        PuzzleKind::Pattern(p) => {
            let entered: Vec<&str> = p
                .entered()
                .iter()
                .filter_map(|&s| SWITCH_NAMES.get(usize::from(s).wrapping_sub(1)).copied())
                .collect();
            let target: Vec<String> = p.target().iter().map(|s| s.to_string()).collect();
            vec![
                Line::from(vec![Span::raw("Memorise: "), Span::styled(target.join(" "), accent)]),
                Line::from(format!("Pressed {}/{}: {}", p.entered().len(), p.target().len(), entered.join(", "))),
            ]
        }
        PuzzleKind::Lock(p) => vec![keypad_display(p.pad.entered(), p.pad.max_digits())],
        PuzzleKind::Math(p) => vec![
            Line::from(Span::styled(p.equation.clone(), Style::default().fg(Color::Cyan))),
            keypad_display(p.pad.entered(), p.pad.max_digits()),
        ],
        PuzzleKind::Wire(p) => WIRE_COLORS
            .iter()
            .enumerate()
            .map(|(i, color)| {
                let (mark, style) = if p.is_cut(i) {
                    ("✂ cut", Style::default().fg(Color::DarkGray))
                } else {
                    ("━━━━━━", Style::default().fg(wire_color(color)))
                };
                Line::from(vec![Span::raw(format!("[{}] {:<7}", i + 1, color)), Span::styled(mark, style)])
            })
            .collect(),
    }
}

fn keypad_display(entered: &str, max: usize) -> Line<'static> {
    let shown: String = entered.chars().chain(std::iter::repeat('_')).take(max).collect();
    Line::from(vec![
        Span::raw("Code: "),
        Span::styled(shown, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
    ])
}

fn wire_color(name: &str) -> Color {
    match name {
        "Red" => Color::Red,
        "Yellow" => Color::Yellow,
        "Blue" => Color::Blue,
        "Green" => Color::Green,
        "Purple" => Color::Magenta,
        _ => Color::White,
    }
}

// ── Menu / pause / endings ──────────────────────────────────

fn render_centered(
    f: &mut Frame,
    area: Rect,
    title: &str,
    color: Color,
    lines: Vec<Line<'static>>,
    click_state: &Rc<RefCell<ClickState>>,
    action: u16,
) {
    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(
        Paragraph::new(lines).block(block).alignment(Alignment::Center).wrap(Wrap { trim: true }),
        area,
    );
    // The whole screen is one big button.
    click_state.borrow_mut().add_click_target(inner, action);
}

fn render_menu(
    state: &MuseumState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            state.level().name.clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Locked in after closing time."),
        Line::from(format!(
            "Solve every puzzle and reach the exit within {}.",
            state.timer.formatted()
        )),
        Line::from("Keep out of the guards' sight."),
        Line::from(""),
        Line::from(Span::styled("WASD/arrows move   E use   P puzzle   I inventory", Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(Span::styled(
            "▶ Press Enter or tap to start",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
    ];
    render_centered(f, area, "Menu", Color::Yellow, lines, click_state, START_GAME);
}

fn render_paused(
    state: &MuseumState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("PAUSED", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(format!("Time left {}", state.timer.formatted())),
        Line::from(""),
        Line::from(Span::styled("Esc or tap to resume", Style::default().fg(Color::Cyan))),
    ];
    render_centered(f, area, "Paused", Color::Yellow, lines, click_state, RESUME);
}

fn render_ending(
    state: &MuseumState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let (title, color, headline, detail) = match state.ending {
        Some(Ending::Escaped) => (
            "Victory",
            Color::Green,
            "★ YOU ESCAPED! ★",
            format!("Time left {}", state.timer.formatted()),
        ),
        Some(Ending::Caught) => ("Game Over", Color::Red, "CAUGHT!", "A guard dragged you back.".to_string()),
        _ => ("Game Over", Color::Red, "TIME'S UP!", "The doors locked for the night.".to_string()),
    };
    let visited = state.rooms.values().filter(|r| r.is_visited()).count();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(headline, Style::default().fg(color).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(detail),
        Line::from(format!(
            "Puzzles {}/{}   Rooms {}/{}   Items {}",
            state.puzzles_solved(),
            state.puzzles_total(),
            visited,
            state.rooms.len(),
            state.inventory.count()
        )),
        Line::from(""),
        Line::from(Span::styled("[R] Play again", Style::default().fg(Color::Cyan))),
    ];
    render_centered(f, area, title, color, lines, click_state, RESTART);
}

// ── Notification / help ─────────────────────────────────────

fn render_notification(state: &MuseumState, f: &mut Frame, area: Rect) {
    let Some(n) = &state.notification else {
        return;
    };
    let style = Style::default().fg(notice_color(n.color)).add_modifier(Modifier::BOLD);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(n.message.clone(), style))).alignment(Alignment::Center),
        area,
    );
}

fn help_buttons(state: &MuseumState) -> Vec<(&'static str, u16)> {
    match state.state {
        GameState::Menu => vec![(" [Enter] Start ", START_GAME)],
        GameState::Playing => vec![
            (" [E] Use ", INTERACT),
            (" [P] Puzzle ", ACTIVATE_PUZZLE),
            (" [I] Bag ", TOGGLE_INVENTORY),
            (" [Esc] Pause ", PAUSE),
        ],
        GameState::Paused => vec![(" [Esc] Resume ", RESUME)],
        GameState::PuzzleActive => vec![(" [Esc] Leave puzzle ", EXIT_PUZZLE)],
        GameState::GameOver | GameState::Victory => vec![(" [R] Restart ", RESTART)],
    }
}

fn render_help(
    state: &MuseumState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let buttons = help_buttons(state);
    let mut spans = Vec::new();
    for (i, (label, _)) in buttons.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" ".repeat(BUTTON_GAP as usize)));
        }
        spans.push(Span::styled(
            *label,
            Style::default().fg(Color::Black).bg(Color::DarkGray),
        ));
    }
    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);

    let widths: Vec<(u16, u16)> = buttons
        .iter()
        .map(|(label, action)| (label.chars().count() as u16, *action))
        .collect();
    click_state.borrow_mut().add_button_row(&widths, BUTTON_GAP, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::museum::level::Level;
    use ratzilla::ratatui::backend::TestBackend;
    use ratzilla::ratatui::Terminal;

    fn draw(state: &MuseumState, width: u16, height: u16) -> (String, Rc<RefCell<ClickState>>) {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let cs = Rc::new(RefCell::new(ClickState::new()));
        terminal
            .draw(|f| {
                cs.borrow_mut().begin_frame(width, height);
                render(state, f, f.area(), &cs);
            })
            .unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        (text, cs)
    }

    fn playing() -> MuseumState {
        let mut state = MuseumState::new(Level::museum().unwrap());
        logic::start_game(&mut state);
        state
    }

    #[test]
    fn world_rect_mapping() {
        let area = Rect::new(10, 5, 80, 30);
        let cell = world_rect_to_cells(&Bounds::new(0.0, 0.0, 100.0, 100.0), &WORLD_BOUNDS, area);
        assert_eq!(cell, Rect::new(10, 5, 10, 5));
        let right_edge = world_rect_to_cells(&Bounds::new(790.0, 590.0, 50.0, 50.0), &WORLD_BOUNDS, area);
        assert_eq!(right_edge.x + right_edge.width, 90);
        assert_eq!(right_edge.y + right_edge.height, 35);
        let empty = world_rect_to_cells(&Bounds::new(0.0, 0.0, 10.0, 10.0), &WORLD_BOUNDS, Rect::new(0, 0, 0, 0));
        assert_eq!(empty.width, 0);
    }

    #[test]
    fn menu_screen() {
        let state = MuseumState::new(Level::museum().unwrap());
        let (text, cs) = draw(&state, 100, 40);
        assert!(text.contains("Museum Escape"));
        assert!(text.contains("Press Enter"));
        assert_eq!(cs.borrow().hit_test(50, 20), Some(START_GAME));
    }

    #[test]
    fn playing_screen_shows_room_and_timer() {
        let state = playing();
        let (text, cs) = draw(&state, 100, 40);
        assert!(text.contains("Entrance Hall"));
        assert!(text.contains("10:00"));
        assert!(text.contains('@'));
        assert!(text.contains('G'));
        // Help bar buttons on the second to last row.
        let cs = cs.borrow();
        assert_eq!(cs.hit_test(2, 38), Some(INTERACT));
    }

    #[test]
    fn narrow_inventory_replaces_map() {
        let mut state = playing();
        logic::toggle_inventory(&mut state);
        let (text, _) = draw(&state, 40, 30);
        assert!(text.contains("Inventory 0/10"));
        assert!(text.contains("(empty)"));
        assert!(!text.contains('@'));
    }

    #[test]
    fn keypad_buttons_are_clickable() {
        let mut state = playing();
        state.current_room = 4;
        assert!(logic::activate_puzzle(&mut state));
        let (text, cs) = draw(&state, 100, 40);
        assert!(text.contains("LOCK PUZZLE"));
        assert!(text.contains("Code: ____"));
        let cs = cs.borrow();
        for action in [KEYPAD_DIGIT_BASE + 1, KEYPAD_DIGIT_BASE, KEYPAD_CLEAR, KEYPAD_OK] {
            assert!(cs.targets.iter().any(|t| t.action_id == action), "missing {}", action);
        }
    }

    #[test]
    fn ending_screens() {
        let mut state = playing();
        state.timer.subtract_time(600.0);
        logic::tick(&mut state, 0.016);
        let (text, cs) = draw(&state, 100, 40);
        assert!(text.contains("TIME'S UP!"));
        assert_eq!(cs.borrow().hit_test(50, 20), Some(RESTART));
    }
}
