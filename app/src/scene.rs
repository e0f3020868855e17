use std::any::Any;

use crate::backend::Frame;
use crate::context::AppCtx;
use crate::events::Event;

/// Result of a scene's `update`/`handle_event` pass, applied by the manager.
pub enum Transition {
    None,
    /// Swap to the given scene: current scene's `exit` runs, then the new
    /// scene's `enter`.
    Switch(Box<dyn Scene>),
}

impl Transition {
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// One screen of the game. Exactly one scene is active at a time; the manager
/// drives the lifecycle hooks and the per-frame update/draw pair.
pub trait Scene {
    /// Short identifier for logging and tests.
    fn name(&self) -> &'static str;

    fn enter(&mut self, _ctx: &mut AppCtx) {}

    fn exit(&mut self, _ctx: &mut AppCtx) {}

    fn update(&mut self, _ctx: &mut AppCtx) -> Transition {
        Transition::None
    }

    fn draw(&self, ctx: &mut AppCtx, frame: &mut dyn Frame);

    fn handle_event(&mut self, _ctx: &mut AppCtx, _event: &Event) -> Transition {
        Transition::None
    }

    /// Window size changed; relayout without losing logical state.
    fn on_resize(&mut self, _ctx: &mut AppCtx) {}

    fn as_any(&self) -> &dyn Any;
}

/// Holds the single active scene. Starts empty; the application installs the
/// entry scene with [`SceneManager::change`] before the first frame.
#[derive(Default)]
pub struct SceneManager {
    current: Option<Box<dyn Scene>>,
}

impl SceneManager {
    /// The only legal way to swap scenes: exit hook on the old scene, then
    /// enter hook on the new one.
    pub fn change(&mut self, ctx: &mut AppCtx, mut next: Box<dyn Scene>) {
        if let Some(mut current) = self.current.take() {
            current.exit(ctx);
        }
        log::debug!("scene change -> {}", next.name());
        next.enter(ctx);
        self.current = Some(next);
    }

    pub fn update(&mut self, ctx: &mut AppCtx) {
        let transition = match &mut self.current {
            Some(scene) => scene.update(ctx),
            None => Transition::None,
        };
        self.apply(ctx, transition);
    }

    pub fn handle_event(&mut self, ctx: &mut AppCtx, event: &Event) {
        let transition = match &mut self.current {
            Some(scene) => scene.handle_event(ctx, event),
            None => Transition::None,
        };
        self.apply(ctx, transition);
    }

    pub fn draw(&self, ctx: &mut AppCtx, frame: &mut dyn Frame) {
        if let Some(scene) = &self.current {
            scene.draw(ctx, frame);
        }
    }

    pub fn on_resize(&mut self, ctx: &mut AppCtx) {
        if let Some(scene) = &mut self.current {
            scene.on_resize(ctx);
        }
    }

    pub fn current(&self) -> Option<&dyn Scene> {
        self.current.as_deref()
    }

    fn apply(&mut self, ctx: &mut AppCtx, transition: Transition) {
        if let Transition::Switch(next) = transition {
            self.change(ctx, next);
        }
    }
}
