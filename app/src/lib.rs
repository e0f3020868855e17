//! Frontend-agnostic game application: scenes, widgets and the frame driver.
//!
//! The embedding frontend owns the window, input and actual rendering. Each
//! frame it collects [`Event`]s, then calls [`App::frame`] with a [`Frame`]
//! implementation to draw into. Everything time-based runs on the millisecond
//! timestamp passed down through [`AppCtx`], which keeps the whole crate
//! testable without a clock.

pub use backend::*;
pub use config::*;
pub use context::*;
pub use events::*;
pub use scene::*;
pub use ui::*;

pub mod scenes;

mod backend;
mod config;
mod context;
mod events;
mod scene;
#[cfg(test)]
mod testing;
mod ui;

use web_time::Instant;

use crate::scenes::MenuScene;

/// Ties the context, the scene stack and the real clock together.
pub struct App {
    ctx: AppCtx,
    scenes: SceneManager,
    started: Instant,
}

impl App {
    pub fn new(
        config: Config,
        assets: Box<dyn AssetProvider>,
        audio: Box<dyn AudioSink>,
        scores: Box<dyn ScoreStore>,
        seed: u64,
    ) -> Self {
        Self {
            ctx: AppCtx::new(config, assets, audio, scores, seed),
            scenes: SceneManager::default(),
            started: Instant::now(),
        }
    }

    /// Installs the entry scene. Call once before the first frame.
    pub fn start(&mut self) {
        log::info!(
            "starting {} ({}x{})",
            self.ctx.config.title,
            self.ctx.width,
            self.ctx.height
        );
        let menu = Box::new(MenuScene::new(&self.ctx));
        self.scenes.change(&mut self.ctx, menu);
    }

    pub const fn running(&self) -> bool {
        self.ctx.running
    }

    pub fn ctx(&self) -> &AppCtx {
        &self.ctx
    }

    /// One frame against the real clock.
    pub fn frame(&mut self, events: &[Event], frame: &mut dyn Frame) {
        let now_ms = self.started.elapsed().as_millis() as u64;
        self.frame_at(now_ms, events, frame);
    }

    /// One frame at an explicit timestamp: dispatch events, update, draw.
    pub fn frame_at(&mut self, now_ms: u64, events: &[Event], frame: &mut dyn Frame) {
        self.ctx.now_ms = now_ms;

        for event in events {
            match *event {
                Event::Quit => self.ctx.running = false,
                Event::Resize { width, height } => {
                    self.ctx.width = width;
                    self.ctx.height = height;
                    self.scenes.on_resize(&mut self.ctx);
                }
                _ => {}
            }
            self.scenes.handle_event(&mut self.ctx, event);
        }

        self.scenes.update(&mut self.ctx);
        self.scenes.draw(&mut self.ctx, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_ctx, NullFrame};

    fn app() -> App {
        let ctx = test_ctx();
        App {
            ctx,
            scenes: SceneManager::default(),
            started: Instant::now(),
        }
    }

    #[test]
    fn starts_on_the_menu() {
        let mut app = app();
        app.start();

        assert_eq!(app.scenes.current().unwrap().name(), "menu");
        assert!(app.running());
    }

    #[test]
    fn quit_event_stops_the_loop() {
        let mut app = app();
        app.start();

        app.frame_at(16, &[Event::Quit], &mut NullFrame);

        assert!(!app.running());
    }

    #[test]
    fn resize_updates_the_context_dimensions() {
        let mut app = app();
        app.start();

        app.frame_at(
            16,
            &[Event::Resize {
                width: 640,
                height: 480,
            }],
            &mut NullFrame,
        );

        assert_eq!((app.ctx.width, app.ctx.height), (640, 480));
    }

    #[test]
    fn full_session_reaches_a_game_scene_through_events() {
        let mut app = app();
        app.start();

        // click the single-player button straight through the driver
        let menu = app.scenes.current().unwrap();
        let menu = menu.as_any().downcast_ref::<scenes::MenuScene>().unwrap();
        let pos = menu.single_button_center();

        app.frame_at(
            16,
            &[Event::MouseDown {
                pos,
                button: MouseButton::Left,
            }],
            &mut NullFrame,
        );

        assert_eq!(app.scenes.current().unwrap().name(), "game");
    }
}
