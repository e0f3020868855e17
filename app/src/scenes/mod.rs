//! The game's screens. Each scene owns its widgets and layout; transitions
//! between them go through [`crate::scene::Transition`].

pub use game::*;
pub use game_over::*;
pub use highscores::*;
pub use menu::*;
pub use pause::*;

mod game;
mod game_over;
mod highscores;
mod menu;
mod pause;
