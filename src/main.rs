use std::{cell::RefCell, io, rc::Rc};

use log::{Level as LogLevel, LevelFilter, Log, Metadata, Record};
use museum_escape::input::{pixel_x_to_col, pixel_y_to_row, ClickState, Direction, InputEvent};
use museum_escape::time::FrameClock;
use museum_escape::{Level, MuseumGame};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

/// Sends `log` records to the browser console.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}: {}", record.level(), record.target(), record.args());
        match record.level() {
            LogLevel::Error => web_sys::console::error_1(&line.into()),
            LogLevel::Warn => web_sys::console::warn_1(&line.into()),
            _ => web_sys::console::log_1(&line.into()),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_x_to_col(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols);
    let row = pixel_y_to_row(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows);
    log::debug!(
        "click: pixel=({}, {}) cell=({:?}, {:?}) targets={}",
        mouse_x,
        mouse_y,
        col,
        row,
        cs.targets.len()
    );
    Some((col?, row?))
}

fn key_to_event(code: &KeyCode) -> Option<InputEvent> {
    let event = match code {
        KeyCode::Char(c) => InputEvent::Key(*c),
        KeyCode::Enter => InputEvent::Enter,
        KeyCode::Esc => InputEvent::Escape,
        KeyCode::Backspace => InputEvent::Backspace,
        KeyCode::Up => InputEvent::Arrow(Direction::Up),
        KeyCode::Down => InputEvent::Arrow(Direction::Down),
        KeyCode::Left => InputEvent::Arrow(Direction::Left),
        KeyCode::Right => InputEvent::Arrow(Direction::Right),
        _ => return None,
    };
    Some(event)
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or(0.0, |p| p.now())
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    let level = match Level::museum() {
        Ok(level) => level,
        Err(err) => {
            log::error!("built-in level failed to load: {}", err);
            let message = format!("The museum level could not be loaded:\n\n{}", err);
            terminal.draw_web(move |f| {
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Museum Escape ");
                f.render_widget(
                    Paragraph::new(message.clone()).block(block).wrap(Wrap { trim: false }),
                    f.area(),
                );
            });
            return Ok(());
        }
    };

    let max_delta = level.config.max_frame_delta;
    let game = Rc::new(RefCell::new(MuseumGame::new(level)));
    let click_state = Rc::new(RefCell::new(ClickState::new()));

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let hit = cs.hit_test(col, row);
            drop(cs);

            if let Some(action_id) = hit {
                game.borrow_mut().handle_input(&InputEvent::Click(action_id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let Some(event) = key_to_event(&key_event.code) {
                game.borrow_mut().handle_input(&event);
            }
        }
    });

    let mut clock = FrameClock::new(max_delta);
    terminal.draw_web(move |f| {
        let dt = clock.update(now_ms());
        let mut game = game.borrow_mut();
        game.tick(dt);

        let size = f.area();
        click_state.borrow_mut().begin_frame(size.width, size.height);
        game.render(f, size, &click_state);
    });

    Ok(())
}
