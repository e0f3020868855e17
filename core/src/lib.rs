//! Core minesweeper model: cells, boards, mine placement, flood-fill reveal
//! and win/loss detection. No rendering, audio or asset code lives here; the
//! board only knows about screen rectangles so it can hit-test clicks.

pub use board::*;
pub use cell::*;
pub use error::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod types;
