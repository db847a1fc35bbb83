//! Command-line interface for the console game.

use std::path::PathBuf;

use clap::Parser;

use crate::registry::GameSource;

/// Play minesweeper in the terminal, one `row:column` move per line.
#[derive(Parser, Debug)]
#[command(name = "minesweeper-engine")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Difficulty preset: easy, medium or hard. Anything else plays easy.
    #[arg(conflicts_with = "layout")]
    pub level: Option<String>,

    /// Load a fixed 8x8 layout of whitespace separated 0/1 tokens
    #[arg(long, value_name = "PATH")]
    pub layout: Option<PathBuf>,
}

impl Cli {
    pub fn source(&self) -> GameSource {
        match &self.layout {
            Some(path) => GameSource::LayoutFile(path.clone()),
            None => GameSource::level(self.level.as_deref()),
        }
    }
}
