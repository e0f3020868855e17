//! Collaborator interfaces the core calls into. The embedding frontend
//! implements these; the scenes never load files, play audio or touch pixels
//! directly.

use std::any::Any;

use sapper_core::{Point, Rect};

use crate::config::Difficulty;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u32);

/// Looks up (and usually caches) assets by name. Missing images and fonts are
/// the provider's problem to substitute; a missing sound is simply `None` and
/// means "do not play".
pub trait AssetProvider {
    fn font(&mut self, family: &str, size: u16) -> FontHandle;
    fn image(&mut self, key: &str) -> ImageHandle;
    fn sound(&mut self, key: &str) -> Option<SoundHandle>;
}

/// Discrete sound cues the game emits. The sink decides what (if anything)
/// actually plays and at which volume.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SoundEvent {
    Click,
    Explosion,
    Win,
    MultiplayerWin,
}

impl SoundEvent {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Explosion => "explosion",
            Self::Win => "win",
            Self::MultiplayerWin => "multiplayer_win",
        }
    }
}

/// Background-music transport controls.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MusicControl {
    Start,
    Pause,
    Resume,
    Stop,
}

pub trait AudioSink: Any {
    fn play(&mut self, event: SoundEvent);
    fn music(&mut self, control: MusicControl);
    fn set_master_volume(&mut self, volume: f32);
}

/// Persistent high-score storage. Ranking (top-5, ascending seconds) is the
/// store's responsibility.
pub trait ScoreStore {
    fn record_score(&mut self, difficulty: Difficulty, seconds: u32);
    fn top_scores(&self, difficulty: Difficulty) -> Vec<u32>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// One frame's drawing surface. Scenes issue high-level commands; all pixel
/// work happens on the frontend side.
pub trait Frame {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Blits an image scaled into `rect` with the given opacity.
    fn draw_image(&mut self, image: ImageHandle, rect: Rect, alpha: u8);
    /// Renders `text` centered on `center`.
    fn draw_text(&mut self, font: FontHandle, text: &str, center: Point, color: Color);
}
