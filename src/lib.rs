//! Museum Escape: a stealth/puzzle escape game for the browser terminal.
//!
//! The gameplay core lives in [`museum`]; [`input`] and [`time`] are the glue
//! the WASM front end uses to feed it.

pub mod input;
pub mod museum;
pub mod time;

pub use museum::level::{Level, LevelError};
pub use museum::MuseumGame;
