use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Grid coordinates `(row, col)`.
pub type Coord2 = (usize, usize);

/// Screen position in pixels `(x, y)`.
pub type Point = (i32, i32);

/// Axis-aligned screen rectangle in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn contains(self, (px, py): Point) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    pub const fn center(self) -> Point {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Grows (or shrinks, for negative `d`) the rectangle by `d` on every side.
    pub const fn inflate(self, d: i32) -> Self {
        Self {
            x: self.x - d,
            y: self.y - d,
            w: self.w + 2 * d,
            h: self.h + 2 * d,
        }
    }
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, self.dim())
    }
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (drow, dcol) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(drow)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(dcol)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterator over the up-to-8 in-bounds neighbors of a grid cell.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
