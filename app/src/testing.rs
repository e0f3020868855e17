//! In-memory collaborator implementations for the test suite.

use std::any::Any;
use std::collections::HashMap;

use sapper_core::{Point, Rect};

use crate::backend::{
    AssetProvider, AudioSink, Color, FontHandle, Frame, ImageHandle, MusicControl, ScoreStore,
    SoundEvent, SoundHandle,
};
use crate::config::{Config, Difficulty};
use crate::context::AppCtx;

pub(crate) fn test_ctx() -> AppCtx {
    AppCtx::new(
        Config::default(),
        Box::new(NullAssets::default()),
        Box::new(RecordingAudio::default()),
        Box::new(MemoryScores::default()),
        7,
    )
}

/// Sound cues played through the context's [`RecordingAudio`], in order.
pub(crate) fn recorded_events(ctx: &AppCtx) -> Vec<SoundEvent> {
    let any: &dyn Any = &*ctx.audio;
    any.downcast_ref::<RecordingAudio>()
        .map(|audio| audio.events.clone())
        .unwrap_or_default()
}

pub(crate) fn master_volume(ctx: &AppCtx) -> Option<f32> {
    let any: &dyn Any = &*ctx.audio;
    any.downcast_ref::<RecordingAudio>()
        .and_then(|audio| audio.master_volume)
}

pub(crate) fn recorded_music(ctx: &AppCtx) -> Vec<MusicControl> {
    let any: &dyn Any = &*ctx.audio;
    any.downcast_ref::<RecordingAudio>()
        .map(|audio| audio.music.clone())
        .unwrap_or_default()
}

/// Hands out distinct handles without loading anything.
#[derive(Default)]
pub(crate) struct NullAssets {
    next: u32,
    fonts: HashMap<(String, u16), FontHandle>,
    images: HashMap<String, ImageHandle>,
}

impl AssetProvider for NullAssets {
    fn font(&mut self, family: &str, size: u16) -> FontHandle {
        let key = (family.to_string(), size);
        if let Some(handle) = self.fonts.get(&key) {
            return *handle;
        }
        self.next += 1;
        let handle = FontHandle(self.next);
        self.fonts.insert(key, handle);
        handle
    }

    fn image(&mut self, key: &str) -> ImageHandle {
        if let Some(handle) = self.images.get(key) {
            return *handle;
        }
        self.next += 1;
        let handle = ImageHandle(self.next);
        self.images.insert(key.to_string(), handle);
        handle
    }

    fn sound(&mut self, _key: &str) -> Option<SoundHandle> {
        None
    }
}

/// Journals every cue instead of making noise.
#[derive(Default)]
pub(crate) struct RecordingAudio {
    pub(crate) events: Vec<SoundEvent>,
    pub(crate) music: Vec<MusicControl>,
    pub(crate) master_volume: Option<f32>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, event: SoundEvent) {
        self.events.push(event);
    }

    fn music(&mut self, control: MusicControl) {
        self.music.push(control);
    }

    fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = Some(volume);
    }
}

/// Keeps the top five times per difficulty, fastest first.
#[derive(Default)]
pub(crate) struct MemoryScores {
    by_difficulty: HashMap<&'static str, Vec<u32>>,
}

impl ScoreStore for MemoryScores {
    fn record_score(&mut self, difficulty: Difficulty, seconds: u32) {
        let scores = self.by_difficulty.entry(difficulty.key()).or_default();
        scores.push(seconds);
        scores.sort_unstable();
        scores.truncate(5);
    }

    fn top_scores(&self, difficulty: Difficulty) -> Vec<u32> {
        self.by_difficulty
            .get(difficulty.key())
            .cloned()
            .unwrap_or_default()
    }
}

/// Swallows draw commands; tests only assert on logic, not pixels.
pub(crate) struct NullFrame;

impl Frame for NullFrame {
    fn fill_rect(&mut self, _rect: Rect, _color: Color) {}

    fn draw_image(&mut self, _image: ImageHandle, _rect: Rect, _alpha: u8) {}

    fn draw_text(&mut self, _font: FontHandle, _text: &str, _center: Point, _color: Color) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_store_keeps_five_fastest_ascending() {
        let mut scores = MemoryScores::default();
        for seconds in [90, 12, 45, 300, 7, 60, 2] {
            scores.record_score(Difficulty::Easy, seconds);
        }

        assert_eq!(scores.top_scores(Difficulty::Easy), vec![2, 7, 12, 45, 60]);
        assert!(scores.top_scores(Difficulty::Hard).is_empty());
    }

    #[test]
    fn asset_handles_are_stable_per_key() {
        let mut assets = NullAssets::default();
        let a = assets.font("main", 28);
        let b = assets.font("main", 28);
        let c = assets.font("main", 56);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(assets.image("lose"), assets.image("lose"));
    }
}
