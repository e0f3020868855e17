use std::collections::VecDeque;

use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::{GameError, Result};
use crate::types::{Coord2, NeighborIterExt, Point, Rect};

/// Clicked cell plus its up-to-8 neighbors, kept mine-free on the first reveal.
const SAFE_ZONE_CELLS: usize = 9;

/// Which mouse button a click came from, as far as the board cares.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickKind {
    /// Primary (left) button: reveal.
    Primary,
    /// Secondary (right) button: flag.
    Secondary,
}

/// Outcome of [`Board::handle_click`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    NoChange,
    Revealed,
    Exploded,
    Flagged,
    Unflagged,
}

impl ClickOutcome {
    /// Whether this outcome could have caused an update to the board.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Whether at least one cell was opened. This is the cue consumers map to
    /// the short click sound.
    pub const fn opened_cell(self) -> bool {
        matches!(self, Self::Revealed | Self::Exploded)
    }
}

/// One minesweeper grid with its screen placement.
///
/// Mines are placed lazily on the first reveal so the first click and its
/// neighbors are always safe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    total_mines: usize,
    cells: Array2<Cell>,
    game_over: bool,
    win: bool,
    first_click: bool,
    flags_placed: usize,
    origin: Point,
    cell_size: i32,
    seed: u64,
}

impl Board {
    /// Builds a closed `rows x cols` grid. Fails if `mines` could not all be
    /// placed outside the first click's safe zone.
    pub fn new(
        rows: usize,
        cols: usize,
        mines: usize,
        origin: Point,
        cell_size: i32,
        seed: u64,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        if mines > (rows * cols).saturating_sub(SAFE_ZONE_CELLS) {
            return Err(GameError::TooManyMines);
        }

        Ok(Self {
            rows,
            cols,
            total_mines: mines,
            cells: Self::build_grid(rows, cols, origin, cell_size),
            game_over: false,
            win: false,
            first_click: true,
            flags_placed: 0,
            origin,
            cell_size,
            seed,
        })
    }

    /// Builds a board with an explicit mine layout, skipping the lazy
    /// placement. Duplicated coordinates count once.
    pub fn from_layout(
        rows: usize,
        cols: usize,
        mine_coords: &[Coord2],
        origin: Point,
        cell_size: i32,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidBoardShape);
        }

        let mut cells = Self::build_grid(rows, cols, origin, cell_size);
        for &(row, col) in mine_coords {
            if row >= rows || col >= cols {
                return Err(GameError::InvalidCoords);
            }
            cells[(row, col)].mine = true;
        }
        let total_mines = cells.iter().filter(|cell| cell.mine).count();

        let mut board = Self {
            rows,
            cols,
            total_mines,
            cells,
            game_over: false,
            win: false,
            first_click: false,
            flags_placed: 0,
            origin,
            cell_size,
            seed: 0,
        };
        board.recount_neighbors();
        Ok(board)
    }

    fn build_grid(rows: usize, cols: usize, origin: Point, cell_size: i32) -> Array2<Cell> {
        Array2::from_shape_fn((rows, cols), |(row, col)| {
            Cell::new(row, col, Self::cell_rect(origin, cell_size, row, col))
        })
    }

    fn cell_rect(origin: Point, cell_size: i32, row: usize, col: usize) -> Rect {
        Rect::new(
            origin.0 + col as i32 * cell_size,
            origin.1 + row as i32 * cell_size,
            cell_size,
            cell_size,
        )
    }

    /// Recomputes every cell's screen rectangle without touching logical
    /// state. Used on window resize.
    pub fn reposition(&mut self, origin: Point, cell_size: i32) {
        self.origin = origin;
        self.cell_size = cell_size;
        for cell in self.cells.iter_mut() {
            cell.rect = Self::cell_rect(origin, cell_size, cell.row, cell.col);
        }
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    pub const fn total_mines(&self) -> usize {
        self.total_mines
    }

    pub const fn game_over(&self) -> bool {
        self.game_over
    }

    pub const fn won(&self) -> bool {
        self.win
    }

    pub const fn flags_placed(&self) -> usize {
        self.flags_placed
    }

    /// How many mines have not been flagged yet. Negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        self.total_mines as isize - self.flags_placed as isize
    }

    pub const fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Screen rectangle covering the whole grid.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.origin.0,
            self.origin.1,
            self.cols as i32 * self.cell_size,
            self.rows as i32 * self.cell_size,
        )
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get((row, col))
    }

    /// Row-major iteration over all cells.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Routes a mouse click to the cell whose rectangle contains `pos`.
    /// A no-op once the game is over or when the click lands outside the grid.
    /// Re-evaluates the win condition after either button.
    pub fn handle_click(&mut self, pos: Point, button: ClickKind) -> ClickOutcome {
        if self.game_over {
            return ClickOutcome::NoChange;
        }
        let Some(coords) = self.cell_under(pos) else {
            return ClickOutcome::NoChange;
        };

        let outcome = match button {
            ClickKind::Primary => self.reveal(coords),
            ClickKind::Secondary => self.toggle_flag(coords),
        };
        self.check_win();
        outcome
    }

    fn cell_under(&self, pos: Point) -> Option<Coord2> {
        // first match by row-major scan; rectangles never overlap
        self.cells
            .iter()
            .find(|cell| cell.rect.contains(pos))
            .map(|cell| (cell.row, cell.col))
    }

    /// Opens a cell. On the board's very first reveal, places the mines first
    /// so the clicked cell and its neighbors stay clear.
    pub(crate) fn reveal(&mut self, coords: Coord2) -> ClickOutcome {
        {
            let cell = &self.cells[coords];
            if cell.open || cell.flagged {
                return ClickOutcome::NoChange;
            }
        }

        if self.first_click {
            self.place_mines(coords);
            self.first_click = false;
        }

        if self.cells[coords].mine {
            self.cells[coords].open = true;
            self.game_over = true;
            self.win = false;
            self.reveal_all_mines();
            log::debug!("mine hit at {:?}", coords);
            return ClickOutcome::Exploded;
        }

        // Iterative equivalent of the recursive flood fill. Every cell opens
        // at most once, so the worklist always drains.
        let mut queue = VecDeque::from([coords]);
        while let Some(cur) = queue.pop_front() {
            let cell = &mut self.cells[cur];
            if cell.open || cell.flagged {
                continue;
            }
            // neighbors of a zero-count cell are never mines
            debug_assert!(!cell.mine);
            cell.open = true;
            let count = cell.neighbor_mines;
            log::trace!("opened {:?}, {} adjacent mines", cur, count);

            if count == 0 {
                queue.extend(self.cells.iter_neighbors(cur).filter(|&pos| {
                    let neighbor = &self.cells[pos];
                    !neighbor.open && !neighbor.flagged
                }));
            }
        }
        ClickOutcome::Revealed
    }

    /// Uniform rejection sampling over cells outside the safe zone around
    /// `safe`. Terminates because construction guaranteed enough free cells.
    fn place_mines(&mut self, safe: Coord2) {
        let (safe_row, safe_col) = safe;
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed = 0;
        while placed < self.total_mines {
            let row = rng.random_range(0..self.rows);
            let col = rng.random_range(0..self.cols);
            let in_safe_zone = row.abs_diff(safe_row) <= 1 && col.abs_diff(safe_col) <= 1;
            let cell = &mut self.cells[(row, col)];
            if !cell.mine && !in_safe_zone {
                cell.mine = true;
                placed += 1;
            }
        }
        self.recount_neighbors();
        log::debug!(
            "placed {} mines on {}x{} grid, safe zone around {:?}",
            placed,
            self.rows,
            self.cols,
            safe
        );
    }

    fn recount_neighbors(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.cells[(row, col)].mine {
                    continue;
                }
                let count = self
                    .cells
                    .iter_neighbors((row, col))
                    .filter(|&pos| self.cells[pos].mine)
                    .count();
                self.cells[(row, col)].neighbor_mines = count as u8;
            }
        }
    }

    pub(crate) fn toggle_flag(&mut self, coords: Coord2) -> ClickOutcome {
        let cell = &mut self.cells[coords];
        if cell.open {
            return ClickOutcome::NoChange;
        }
        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flags_placed += 1;
            ClickOutcome::Flagged
        } else {
            debug_assert!(self.flags_placed > 0);
            self.flags_placed -= 1;
            ClickOutcome::Unflagged
        }
    }

    /// Win when no cell is simultaneously closed and mine-free. Mines are not
    /// auto-revealed on win (they are on loss).
    pub fn check_win(&mut self) {
        if self.game_over {
            return;
        }
        let covered = self
            .cells
            .iter()
            .filter(|cell| !cell.open && !cell.mine)
            .count();
        if covered == 0 {
            self.game_over = true;
            self.win = true;
            log::debug!("board cleared, {} flags placed", self.flags_placed);
        }
    }

    fn reveal_all_mines(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.mine {
                cell.open = true;
            }
        }
    }

    /// Debug override: settles the board immediately without touching the
    /// grid. Only meant for developer shortcuts and tests.
    pub fn force_result(&mut self, win: bool) {
        self.game_over = true;
        self.win = win;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL: i32 = 10;

    fn board(rows: usize, cols: usize, mines: usize, seed: u64) -> Board {
        Board::new(rows, cols, mines, (0, 0), CELL, seed).unwrap()
    }

    fn center_of(row: usize, col: usize) -> Point {
        (col as i32 * CELL + CELL / 2, row as i32 * CELL + CELL / 2)
    }

    fn click(board: &mut Board, row: usize, col: usize) -> ClickOutcome {
        board.handle_click(center_of(row, col), ClickKind::Primary)
    }

    fn flag(board: &mut Board, row: usize, col: usize) -> ClickOutcome {
        board.handle_click(center_of(row, col), ClickKind::Secondary)
    }

    fn mine_count(board: &Board) -> usize {
        board.cells().filter(|cell| cell.is_mine()).count()
    }

    #[test]
    fn rejects_mine_counts_that_crowd_the_safe_zone() {
        assert_eq!(
            Board::new(4, 4, 8, (0, 0), CELL, 0).unwrap_err(),
            GameError::TooManyMines
        );
        assert!(Board::new(4, 4, 7, (0, 0), CELL, 0).is_ok());
        assert!(Board::new(1, 1, 0, (0, 0), CELL, 0).is_ok());
        assert_eq!(
            Board::new(1, 1, 1, (0, 0), CELL, 0).unwrap_err(),
            GameError::TooManyMines
        );
        assert_eq!(
            Board::new(0, 5, 0, (0, 0), CELL, 0).unwrap_err(),
            GameError::InvalidBoardShape
        );
    }

    #[test]
    fn zero_mine_board_opens_fully_and_wins_on_first_click() {
        let mut board = board(5, 5, 0, 0);

        assert_eq!(click(&mut board, 2, 2), ClickOutcome::Revealed);

        assert!(board.cells().all(|cell| cell.is_open()));
        assert!(board.game_over());
        assert!(board.won());
    }

    #[test]
    fn single_cell_board_wins_instantly() {
        let mut board = board(1, 1, 0, 7);

        assert_eq!(click(&mut board, 0, 0), ClickOutcome::Revealed);

        assert!(board.game_over());
        assert!(board.won());
    }

    #[test]
    fn first_click_safe_zone_is_mine_free_at_max_density() {
        for seed in 0..32 {
            let mut board = board(9, 9, 72, seed);
            click(&mut board, 4, 4);

            assert_eq!(mine_count(&board), 72, "seed {}", seed);
            for row in 3..=5 {
                for col in 3..=5 {
                    assert!(!board.get(row, col).unwrap().is_mine(), "seed {}", seed);
                }
            }
            assert!(board.get(4, 4).unwrap().is_open());
        }
    }

    #[test]
    fn neighbor_counts_match_actual_mines() {
        for seed in 0..8 {
            let mut board = board(8, 8, 12, seed);
            click(&mut board, 0, 0);

            for cell in board.cells().filter(|cell| !cell.is_mine()) {
                let expected = board
                    .cells()
                    .filter(|other| {
                        other.is_mine()
                            && other.row().abs_diff(cell.row()) <= 1
                            && other.col().abs_diff(cell.col()) <= 1
                    })
                    .count();
                assert_eq!(cell.neighbor_mines() as usize, expected, "seed {}", seed);
            }
        }
    }

    #[test]
    fn flood_fill_opens_zero_region_and_its_boundary() {
        let mut board = Board::from_layout(3, 3, &[(2, 2)], (0, 0), CELL).unwrap();

        assert_eq!(click(&mut board, 0, 0), ClickOutcome::Revealed);

        assert!(!board.get(2, 2).unwrap().is_open());
        assert!(
            board
                .cells()
                .filter(|cell| !cell.is_mine())
                .all(|cell| cell.is_open())
        );
        assert_eq!(board.get(1, 1).unwrap().neighbor_mines(), 1);
        assert!(board.won());
    }

    #[test]
    fn flood_fill_skips_flagged_cells() {
        let mut board = Board::from_layout(4, 4, &[], (0, 0), CELL).unwrap();
        flag(&mut board, 3, 3);

        click(&mut board, 0, 0);

        assert!(!board.get(3, 3).unwrap().is_open());
        // the flagged cell is still covered, so the board is not won yet
        assert!(!board.game_over());
    }

    #[test]
    fn revealing_an_open_cell_again_changes_nothing() {
        let mut board = Board::from_layout(4, 4, &[(3, 3)], (0, 0), CELL).unwrap();
        click(&mut board, 0, 0);
        let snapshot = board.clone();

        assert_eq!(click(&mut board, 0, 0), ClickOutcome::NoChange);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn hitting_a_mine_reveals_every_mine() {
        let mut board = Board::from_layout(3, 3, &[(0, 0), (2, 2)], (0, 0), CELL).unwrap();

        assert_eq!(click(&mut board, 0, 0), ClickOutcome::Exploded);

        assert!(board.game_over());
        assert!(!board.won());
        assert!(
            board
                .cells()
                .filter(|cell| cell.is_mine())
                .all(|cell| cell.is_open())
        );
    }

    #[test]
    fn winning_does_not_reveal_mines() {
        let mut board = Board::from_layout(1, 2, &[(0, 1)], (0, 0), CELL).unwrap();

        click(&mut board, 0, 0);

        assert!(board.won());
        assert!(!board.get(0, 1).unwrap().is_open());
    }

    #[test]
    fn flag_bookkeeping_tracks_toggles() {
        let mut board = Board::from_layout(3, 3, &[(1, 1)], (0, 0), CELL).unwrap();

        assert_eq!(flag(&mut board, 0, 0), ClickOutcome::Flagged);
        assert_eq!(flag(&mut board, 0, 1), ClickOutcome::Flagged);
        assert_eq!(board.flags_placed(), 2);
        assert_eq!(board.mines_left(), -1);

        assert_eq!(flag(&mut board, 0, 1), ClickOutcome::Unflagged);
        assert_eq!(board.flags_placed(), 1);

        // flagged cells cannot be revealed
        assert_eq!(click(&mut board, 0, 0), ClickOutcome::NoChange);
        assert!(!board.get(0, 0).unwrap().is_open());
    }

    #[test]
    fn flagging_an_open_cell_is_a_noop() {
        let mut board = Board::from_layout(3, 3, &[(2, 2)], (0, 0), CELL).unwrap();
        click(&mut board, 0, 0);

        let open_before = board.cells().filter(|cell| cell.is_open()).count();
        assert_eq!(flag(&mut board, 0, 0), ClickOutcome::NoChange);
        assert_eq!(board.flags_placed(), 0);
        assert_eq!(board.cells().filter(|cell| cell.is_open()).count(), open_before);
    }

    #[test]
    fn clicks_after_game_over_are_ignored() {
        let mut board = Board::from_layout(2, 2, &[(0, 0)], (0, 0), CELL).unwrap();
        click(&mut board, 0, 0);
        assert!(board.game_over());
        let snapshot = board.clone();

        assert_eq!(click(&mut board, 1, 1), ClickOutcome::NoChange);
        assert_eq!(flag(&mut board, 1, 1), ClickOutcome::NoChange);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn clicks_outside_the_grid_are_ignored() {
        let mut board = board(3, 3, 0, 0);
        assert_eq!(
            board.handle_click((-5, -5), ClickKind::Primary),
            ClickOutcome::NoChange
        );
        assert_eq!(
            board.handle_click((500, 500), ClickKind::Primary),
            ClickOutcome::NoChange
        );
        assert!(board.cells().all(|cell| !cell.is_open()));
    }

    #[test]
    fn reposition_moves_rects_but_keeps_logical_state() {
        let mut board = Board::from_layout(3, 3, &[(2, 2)], (0, 0), CELL).unwrap();
        click(&mut board, 0, 0);
        flag(&mut board, 2, 2);
        let open_before: Vec<bool> = board.cells().map(|cell| cell.is_open()).collect();

        board.reposition((100, 200), 20);

        let open_after: Vec<bool> = board.cells().map(|cell| cell.is_open()).collect();
        assert_eq!(open_before, open_after);
        assert_eq!(board.flags_placed(), 1);
        assert_eq!(board.get(0, 0).unwrap().rect(), Rect::new(100, 200, 20, 20));
        assert_eq!(board.bounds(), Rect::new(100, 200, 60, 60));
    }

    #[test]
    fn win_asymmetry_holds_with_unflagged_mine() {
        // every safe cell open, mine still covered and unflagged: that is a win
        let mut board = Board::from_layout(1, 3, &[(0, 2)], (0, 0), CELL).unwrap();

        click(&mut board, 0, 0);
        click(&mut board, 0, 1);

        assert!(board.won());
        assert!(!board.get(0, 2).unwrap().is_open());
    }
}
