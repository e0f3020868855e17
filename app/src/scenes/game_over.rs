use sapper_core::Rect;

use crate::backend::{Color, Frame, SoundEvent};
use crate::context::AppCtx;
use crate::events::{Event, Key, MouseButton};
use crate::scene::{Scene, Transition};
use crate::scenes::game::{GameScene, Mode};
use crate::scenes::menu::MenuScene;
use crate::ui::{Button, ButtonStyle};

const BACKGROUND: Color = Color::rgb(15, 17, 22);
const WIN_TEXT: Color = Color::rgb(0, 255, 160);
const LOSS_TEXT: Color = Color::rgb(255, 80, 80);

/// Final result carried out of a game scene.
#[derive(Clone, Debug)]
pub struct GameOutcome {
    pub text: String,
    /// Play time in whole seconds, when the mode tracks one.
    pub elapsed_secs: Option<u32>,
    pub mode: Mode,
    pub won: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum GameOverAction {
    Restart,
    MainMenu,
}

/// Shows the result and offers restart or menu. Ranked single-player wins are
/// committed to the score store exactly once, on entry.
pub struct GameOverScene {
    outcome: GameOutcome,
    recorded: bool,
    restart_btn: Button<GameOverAction>,
    menu_btn: Button<GameOverAction>,
}

impl GameOverScene {
    pub fn new(ctx: &AppCtx, outcome: GameOutcome) -> Self {
        let mut scene = Self {
            outcome,
            recorded: false,
            restart_btn: Button::new(Rect::default(), "PLAY AGAIN", Some(GameOverAction::Restart), ButtonStyle::Primary),
            menu_btn: Button::new(Rect::default(), "MAIN MENU", Some(GameOverAction::MainMenu), ButtonStyle::Glass),
        };
        scene.apply_layout(ctx);
        scene
    }

    pub(crate) fn outcome(&self) -> &GameOutcome {
        &self.outcome
    }

    fn apply_layout(&mut self, ctx: &AppCtx) {
        let cx = ctx.width / 2;
        let y = ctx.height / 2 + 40;
        self.restart_btn = Button::new(
            Rect::new(cx - 160, y, 320, 52),
            "PLAY AGAIN",
            Some(GameOverAction::Restart),
            ButtonStyle::Primary,
        );
        self.menu_btn = Button::new(
            Rect::new(cx - 160, y + 70, 320, 52),
            "MAIN MENU",
            Some(GameOverAction::MainMenu),
            ButtonStyle::Glass,
        );
    }

    /// Campaigns restart from the first level; other modes replay as-is.
    fn restart_mode(&self) -> Mode {
        match self.outcome.mode {
            Mode::Campaign { .. } => Mode::Campaign { level: 1 },
            mode => mode,
        }
    }

    fn activate(&self, ctx: &mut AppCtx, action: GameOverAction) -> Transition {
        ctx.audio.play(SoundEvent::Click);
        match action {
            GameOverAction::Restart => match GameScene::new(ctx, self.restart_mode()) {
                Ok(game) => Transition::Switch(Box::new(game)),
                Err(err) => {
                    log::error!("could not restart {:?}: {err}", self.restart_mode());
                    Transition::Switch(Box::new(MenuScene::new(ctx)))
                }
            },
            GameOverAction::MainMenu => Transition::Switch(Box::new(MenuScene::new(ctx))),
        }
    }
}

impl Scene for GameOverScene {
    fn name(&self) -> &'static str {
        "game_over"
    }

    fn enter(&mut self, ctx: &mut AppCtx) {
        if self.recorded {
            return;
        }
        self.recorded = true;

        if !self.outcome.won {
            return;
        }
        if let (Some(difficulty), Some(seconds)) =
            (self.outcome.mode.ranked_difficulty(), self.outcome.elapsed_secs)
        {
            log::info!("recording {seconds} s win on {}", difficulty.key());
            ctx.scores.record_score(difficulty, seconds);
        }
    }

    fn handle_event(&mut self, ctx: &mut AppCtx, event: &Event) -> Transition {
        match *event {
            Event::MouseMove { pos } => {
                self.restart_btn.hover(pos);
                self.menu_btn.hover(pos);
            }
            Event::MouseDown {
                pos,
                button: MouseButton::Left,
            } => {
                let pressed = self
                    .restart_btn
                    .press(pos)
                    .or_else(|| self.menu_btn.press(pos));
                if let Some(action) = pressed {
                    return self.activate(ctx, action);
                }
            }
            Event::KeyDown(Key::Escape) => {
                return Transition::Switch(Box::new(MenuScene::new(ctx)));
            }
            _ => {}
        }
        Transition::None
    }

    fn draw(&self, ctx: &mut AppCtx, frame: &mut dyn Frame) {
        frame.fill_rect(Rect::new(0, 0, ctx.width, ctx.height), BACKGROUND);

        let family = ctx.config.fonts.family.clone();
        let title_font = ctx.assets.font(&family, ctx.config.fonts.size_large);
        let color = if self.outcome.won { WIN_TEXT } else { LOSS_TEXT };
        frame.draw_text(
            title_font,
            &self.outcome.text,
            (ctx.width / 2, ctx.height / 2 - 120),
            color,
        );

        if let Some(seconds) = self.outcome.elapsed_secs {
            let detail_font = ctx.assets.font(&family, ctx.config.fonts.size_medium);
            frame.draw_text(
                detail_font,
                &format!("Time: {seconds}s"),
                (ctx.width / 2, ctx.height / 2 - 50),
                Color::rgb(220, 220, 220),
            );
        }

        self.restart_btn.draw(ctx, frame);
        self.menu_btn.draw(ctx, frame);
    }

    fn on_resize(&mut self, ctx: &mut AppCtx) {
        self.apply_layout(ctx);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
