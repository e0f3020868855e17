use sapper_core::Rect;

use crate::backend::{Color, Frame, MusicControl, SoundEvent};
use crate::context::AppCtx;
use crate::events::{Event, Key, MouseButton};
use crate::scene::{Scene, Transition};
use crate::scenes::game::GameScene;
use crate::scenes::menu::MenuScene;
use crate::ui::{Button, ButtonStyle, Slider};

const DIM: Color = Color::rgba(0, 0, 0, 150);
const PANEL: Color = Color::rgba(20, 22, 28, 230);
const TITLE: Color = Color::rgb(255, 255, 255);

const PANEL_W: i32 = 420;
const PANEL_H: i32 = 320;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PauseAction {
    Resume,
    MainMenu,
}

/// Modal overlay that owns the suspended game. The game's clock is stopped on
/// entry and compensated on resume, so pause time never counts as play time.
pub struct PauseScene {
    game: Option<GameScene>,
    resume_btn: Button<PauseAction>,
    menu_btn: Button<PauseAction>,
    volume: Slider,
}

impl PauseScene {
    pub fn new(ctx: &mut AppCtx, mut game: GameScene) -> Self {
        game.pause(ctx);
        let mut scene = Self {
            game: Some(game),
            resume_btn: Button::new(Rect::default(), "RESUME", Some(PauseAction::Resume), ButtonStyle::Primary),
            menu_btn: Button::new(Rect::default(), "MAIN MENU", Some(PauseAction::MainMenu), ButtonStyle::Danger),
            volume: Slider::new(Rect::default(), 0.0, 1.0, ctx.config.audio.music_volume),
        };
        scene.apply_layout(ctx);
        scene
    }

    fn panel_rect(ctx: &AppCtx) -> Rect {
        Rect::new(
            (ctx.width - PANEL_W) / 2,
            (ctx.height - PANEL_H) / 2,
            PANEL_W,
            PANEL_H,
        )
    }

    fn apply_layout(&mut self, ctx: &AppCtx) {
        let panel = Self::panel_rect(ctx);
        let volume_rect = Rect::new(panel.x + 40, panel.y + 110, panel.w - 140, 12);
        self.volume = Slider::new(volume_rect, 0.0, 1.0, self.volume.value());
        self.resume_btn = Button::new(
            Rect::new(panel.x + 40, panel.y + 160, panel.w - 80, 50),
            "RESUME",
            Some(PauseAction::Resume),
            ButtonStyle::Primary,
        );
        self.menu_btn = Button::new(
            Rect::new(panel.x + 40, panel.y + 230, panel.w - 80, 50),
            "MAIN MENU",
            Some(PauseAction::MainMenu),
            ButtonStyle::Danger,
        );
    }

    /// Hands the game back with its clock compensated for the pause.
    fn resume(&mut self, ctx: &mut AppCtx) -> Transition {
        match self.game.take() {
            Some(mut game) => {
                game.resume(ctx);
                Transition::Switch(Box::new(game))
            }
            None => Transition::None,
        }
    }

    fn to_menu(&self, ctx: &mut AppCtx) -> Transition {
        ctx.audio.music(MusicControl::Stop);
        Transition::Switch(Box::new(MenuScene::new(ctx)))
    }

    fn set_volume(&self, ctx: &mut AppCtx, volume: f32) {
        ctx.config.audio.music_volume = volume;
        ctx.config.audio.sfx_volume = volume;
        ctx.audio.set_master_volume(volume);
    }
}

impl Scene for PauseScene {
    fn name(&self) -> &'static str {
        "pause"
    }

    fn handle_event(&mut self, ctx: &mut AppCtx, event: &Event) -> Transition {
        if let Some(volume) = self.volume.handle_event(event) {
            self.set_volume(ctx, volume);
            return Transition::None;
        }

        match *event {
            Event::MouseMove { pos } => {
                self.resume_btn.hover(pos);
                self.menu_btn.hover(pos);
            }
            Event::MouseDown {
                pos,
                button: MouseButton::Left,
            } => {
                let pressed = self
                    .resume_btn
                    .press(pos)
                    .or_else(|| self.menu_btn.press(pos));
                if let Some(action) = pressed {
                    ctx.audio.play(SoundEvent::Click);
                    return match action {
                        PauseAction::Resume => self.resume(ctx),
                        PauseAction::MainMenu => self.to_menu(ctx),
                    };
                }
            }
            Event::KeyDown(Key::Escape) => return self.resume(ctx),
            _ => {}
        }
        Transition::None
    }

    fn draw(&self, ctx: &mut AppCtx, frame: &mut dyn Frame) {
        // the frozen game stays visible behind the dimmer
        if let Some(game) = &self.game {
            game.draw(ctx, frame);
        }
        frame.fill_rect(Rect::new(0, 0, ctx.width, ctx.height), DIM);

        let panel = Self::panel_rect(ctx);
        frame.fill_rect(panel, PANEL);

        let family = ctx.config.fonts.family.clone();
        let title_font = ctx.assets.font(&family, ctx.config.fonts.size_large);
        frame.draw_text(title_font, "PAUSED", (panel.x + panel.w / 2, panel.y + 45), TITLE);

        let label_font = ctx.assets.font(&family, ctx.config.fonts.size_small);
        frame.draw_text(
            label_font,
            "VOLUME",
            (panel.x + panel.w / 2, panel.y + 90),
            Color::rgb(200, 200, 200),
        );

        self.volume.draw(ctx, frame);
        self.resume_btn.draw(ctx, frame);
        self.menu_btn.draw(ctx, frame);
    }

    fn on_resize(&mut self, ctx: &mut AppCtx) {
        if let Some(game) = &mut self.game {
            game.on_resize(ctx);
        }
        self.apply_layout(ctx);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
