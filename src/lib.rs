pub mod action;
pub mod cleanup;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logic;
pub mod registry;

pub use data::{FieldView, GameState, Level};
pub use error::{GameError, Result};
pub use logic::{Board, Game};
pub use registry::{GameSource, Registry};
