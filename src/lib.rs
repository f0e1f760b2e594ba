pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod game;
pub mod input;
pub mod keyboard;

pub use error::{GameError, Result};
