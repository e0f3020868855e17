use serde::{Deserialize, Serialize};

use crate::types::Rect;

/// Atomic grid unit. Pure data: every mutation goes through the owning
/// [`Board`](crate::Board).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) row: usize,
    pub(crate) col: usize,
    pub(crate) rect: Rect,
    pub(crate) mine: bool,
    pub(crate) open: bool,
    pub(crate) flagged: bool,
    pub(crate) neighbor_mines: u8,
}

impl Cell {
    pub(crate) fn new(row: usize, col: usize, rect: Rect) -> Self {
        Self {
            row,
            col,
            rect,
            mine: false,
            open: false,
            flagged: false,
            neighbor_mines: 0,
        }
    }

    pub const fn row(&self) -> usize {
        self.row
    }

    pub const fn col(&self) -> usize {
        self.col
    }

    /// Screen rectangle this cell is drawn into and hit-tested against.
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    pub const fn is_mine(&self) -> bool {
        self.mine
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// Number of mined cells among the up-to-8 neighbors, `0..=8`.
    pub const fn neighbor_mines(&self) -> u8 {
        self.neighbor_mines
    }
}
