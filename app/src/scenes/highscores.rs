use sapper_core::Rect;

use crate::backend::{Color, Frame, SoundEvent};
use crate::config::Difficulty;
use crate::context::AppCtx;
use crate::events::{Event, Key, MouseButton};
use crate::scene::{Scene, Transition};
use crate::scenes::menu::MenuScene;
use crate::ui::{Button, ButtonStyle};

const BACKGROUND: Color = Color::rgb(15, 17, 22);
const HEADING: Color = Color::rgb(0, 255, 255);
const ROW_TEXT: Color = Color::rgb(220, 220, 220);

/// Read-only table of the five fastest times per difficulty.
pub struct HighScoresScene {
    back_btn: Button<()>,
}

impl HighScoresScene {
    pub fn new(ctx: &AppCtx) -> Self {
        let mut scene = Self {
            back_btn: Button::new(Rect::default(), "BACK", Some(()), ButtonStyle::Glass),
        };
        scene.apply_layout(ctx);
        scene
    }

    fn apply_layout(&mut self, ctx: &AppCtx) {
        self.back_btn = Button::new(
            Rect::new(ctx.width / 2 - 100, ctx.height - 100, 200, 50),
            "BACK",
            Some(()),
            ButtonStyle::Glass,
        );
    }
}

impl Scene for HighScoresScene {
    fn name(&self) -> &'static str {
        "highscores"
    }

    fn handle_event(&mut self, ctx: &mut AppCtx, event: &Event) -> Transition {
        match *event {
            Event::MouseMove { pos } => self.back_btn.hover(pos),
            Event::MouseDown {
                pos,
                button: MouseButton::Left,
            } if self.back_btn.press(pos).is_some() => {
                ctx.audio.play(SoundEvent::Click);
                return Transition::Switch(Box::new(MenuScene::new(ctx)));
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
        frame.draw_text(title_font, "HIGH SCORES", (ctx.width / 2, 100), HEADING);

        let heading_font = ctx.assets.font(&family, ctx.config.fonts.size_medium);
        let row_font = ctx.assets.font(&family, ctx.config.fonts.size_small);

        let columns = Difficulty::ALL.len() as i32;
        for (i, difficulty) in Difficulty::ALL.into_iter().enumerate() {
            let cx = ctx.width * (2 * i as i32 + 1) / (2 * columns);
            frame.draw_text(heading_font, difficulty.label(), (cx, 200), HEADING);

            let scores = ctx.scores.top_scores(difficulty);
            for rank in 0..5 {
                let line = match scores.get(rank) {
                    Some(seconds) => format!("{}. {seconds}s", rank + 1),
                    None => format!("{}. ---", rank + 1),
                };
                frame.draw_text(row_font, &line, (cx, 250 + rank as i32 * 40), ROW_TEXT);
            }
        }

        self.back_btn.draw(ctx, frame);
    }

    fn on_resize(&mut self, ctx: &mut AppCtx) {
        self.apply_layout(ctx);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
