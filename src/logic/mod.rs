use std::{fs, path::Path};

use rand::{Rng, seq::SliceRandom};
use tracing::{debug, info, instrument, warn};

use crate::{
    data::{Field, FieldView},
    error::{GameError, Result},
};

mod game;

pub use game::Game;

/// Fixed layouts are always read onto a board of this width.
pub const LAYOUT_WIDTH: usize = 8;

/// Square minesweeper grid stored row-major.
#[derive(Debug)]
pub struct Board {
    size: usize,
    bombs: usize,
    disclosed: usize,
    cells: Vec<Field>,
}

fn validate_params(bombs: i32, size: i32) -> Result<()> {
    if i64::from(bombs) > i64::from(size) * i64::from(size) {
        return Err(GameError::Configuration(format!(
            "Number of bombs ({bombs}) can't be higher than board area ({size}x{size})"
        )));
    }

    if bombs < 0 || size <= 0 {
        return Err(GameError::Configuration(format!(
            "Number of bombs ({bombs}) can't be negative and board size ({size}) must be positive"
        )));
    }

    Ok(())
}

impl Board {
    fn with_size(size: usize) -> Self {
        Self {
            size,
            bombs: 0,
            disclosed: 0,
            cells: (0..size * size).map(|_| Field::default()).collect(),
        }
    }

    /// Zero-size placeholder board.
    pub fn empty() -> Self {
        Self::with_size(0)
    }

    /// Builds an 8x8 board from whitespace separated `0`/`1` tokens in
    /// row-major order. Only `1` places a bomb, every other token is treated
    /// as an empty cell.
    #[instrument(level = "trace", skip(layout))]
    pub fn from_layout(layout: &str) -> Result<Self> {
        if layout.trim().is_empty() {
            return Err(GameError::Configuration("Layout is empty".to_string()));
        }

        let mut board = Self::with_size(LAYOUT_WIDTH);
        let capacity = board.cells.len();
        let mut tokens = layout.split_whitespace();

        for (cell, token) in board.cells.iter_mut().zip(tokens.by_ref()) {
            if token.parse::<i32>() == Ok(1) {
                cell.has_bomb = true;
                board.bombs += 1;
            }
        }

        let extra = tokens.count();
        if extra > 0 {
            warn!("Ignoring {} layout tokens beyond {} cells", extra, capacity);
        }

        board.compute_bombs_around();
        info!("Created fixed layout board with {} bombs", board.bombs);
        Ok(board)
    }

    pub fn from_layout_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let layout = fs::read_to_string(path).map_err(|err| {
            GameError::Configuration(format!("Cannot read layout {}: {}", path.display(), err))
        })?;
        Self::from_layout(&layout)
    }

    pub fn random(bombs: i32, size: i32) -> Result<Self> {
        Self::random_with(bombs, size, &mut rand::rng())
    }

    /// Places `bombs` bombs at random, never next to or on a cell whose
    /// neighbourhood is already saturated for its position on the board.
    ///
    /// Candidates are drawn from a shuffled list of every cell. A rejected
    /// cell can never become acceptable later because bomb counts only grow,
    /// so running out of candidates means the requested density can't be
    /// reached.
    #[instrument(level = "trace", skip(rng))]
    pub fn random_with<R: Rng + ?Sized>(bombs: i32, size: i32, rng: &mut R) -> Result<Self> {
        validate_params(bombs, size)?;
        let (bombs, size) = (bombs as usize, size as usize);

        let mut board = Self::with_size(size);
        let mut candidates: Vec<usize> = (0..size * size).collect();
        candidates.shuffle(rng);

        for index in candidates {
            if board.bombs == bombs {
                break;
            }

            if board.can_place_bomb(index) {
                board.cells[index].has_bomb = true;
                board.bombs += 1;
            }
        }

        if board.bombs < bombs {
            return Err(GameError::Configuration(format!(
                "Only {} of {} bombs fit on a {}x{} board",
                board.bombs, bombs, size, size
            )));
        }

        board.compute_bombs_around();
        info!("Created random {}x{} board with {} bombs", size, size, bombs);
        Ok(board)
    }

    fn neighbours(&self, index: usize) -> impl Iterator<Item = usize> + use<> {
        let size = self.size as i64;
        let x = (index % self.size) as i64;
        let y = (index / self.size) as i64;

        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(move |(dx, dy)| (x + dx, y + dy))
            .filter(move |&(new_x, new_y)| {
                new_x >= 0 && new_x < size && new_y >= 0 && new_y < size
            })
            .map(move |(new_x, new_y)| (new_x + new_y * size) as usize)
    }

    fn count_bombs_around(&self, index: usize) -> u8 {
        self.neighbours(index)
            .filter(|&neighbour| self.cells[neighbour].has_bomb)
            .count() as u8
    }

    /// Bomb count at which a cell's neighbourhood is considered full:
    /// 3 for corners, 5 for other edge cells, 8 inside.
    fn crowding_limit(&self, index: usize) -> u8 {
        let last = self.size - 1;
        let on_edge = |coord: usize| coord == 0 || coord == last;
        match (on_edge(index % self.size), on_edge(index / self.size)) {
            (true, true) => 3,
            (true, false) | (false, true) => 5,
            (false, false) => 8,
        }
    }

    fn is_crowded(&self, index: usize) -> bool {
        self.count_bombs_around(index) >= self.crowding_limit(index)
    }

    fn can_place_bomb(&self, index: usize) -> bool {
        !self.cells[index].has_bomb
            && !self.is_crowded(index)
            && !self.neighbours(index).any(|neighbour| self.is_crowded(neighbour))
    }

    fn compute_bombs_around(&mut self) {
        for index in 0..self.cells.len() {
            if !self.cells[index].has_bomb {
                self.cells[index].bombs_around = self.count_bombs_around(index);
            }
        }
    }

    fn index_of(&self, row: i32, column: i32) -> Result<usize> {
        if row < 0 || column < 0 {
            return Err(GameError::InvalidAction(format!(
                "Row and column can't be negative, got [{row}:{column}]"
            )));
        }

        let (row, column) = (row as usize, column as usize);
        if row >= self.size || column >= self.size {
            return Err(GameError::InvalidAction(format!(
                "[{}:{}] is outside the {}x{} board",
                row, column, self.size, self.size
            )));
        }

        Ok(column + row * self.size)
    }

    /// Resolves a move to a safe cell index without touching the board.
    pub fn target(&self, row: i32, column: i32) -> Result<usize> {
        let index = self.index_of(row, column)?;

        if self.cells[index].has_bomb {
            return Err(GameError::BombHit { row, column });
        }

        Ok(index)
    }

    /// Discloses the cell and, if it has no bombs around, the whole connected
    /// region of empty cells plus their numbered border. Returns how many
    /// cells were newly disclosed.
    #[instrument(level = "trace", skip(self))]
    pub fn reveal(&mut self, row: i32, column: i32) -> Result<usize> {
        let index = self.target(row, column)?;

        if self.cells[index].disclosed {
            debug!("Field [{}:{}] already disclosed", row, column);
            return Ok(0);
        }

        let newly_disclosed = self.disclose_from(index);
        debug!(
            "Disclosed {} fields starting at [{}:{}] with {} bombs around",
            newly_disclosed, row, column, self.cells[index].bombs_around
        );
        Ok(newly_disclosed)
    }

    fn disclose_from(&mut self, start: usize) -> usize {
        self.cells[start].disclosed = true;
        let mut newly_disclosed = 1;
        let mut pending = vec![start];

        while let Some(index) = pending.pop() {
            if self.cells[index].bombs_around != 0 {
                continue;
            }

            for neighbour in self.neighbours(index) {
                let cell = &mut self.cells[neighbour];
                if cell.disclosed || cell.has_bomb {
                    continue;
                }

                cell.disclosed = true;
                newly_disclosed += 1;
                pending.push(neighbour);
            }
        }

        self.disclosed += newly_disclosed;
        newly_disclosed
    }

    pub fn all_safe_disclosed(&self) -> bool {
        self.cells.len() == self.bombs + self.disclosed
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn bomb_count(&self) -> usize {
        self.bombs
    }

    pub fn disclosed_count(&self) -> usize {
        self.disclosed
    }

    pub fn field(&self, row: usize, column: usize) -> Option<&Field> {
        if row >= self.size || column >= self.size {
            return None;
        }
        self.cells.get(column + row * self.size)
    }

    pub fn rows(&self) -> Vec<Vec<FieldView>> {
        if self.size == 0 {
            return Vec::new();
        }

        self.cells
            .chunks(self.size)
            .map(|chunk| chunk.iter().map(FieldView::from).collect())
            .collect()
    }
}
