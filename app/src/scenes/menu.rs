use sapper_core::Rect;

use crate::backend::{Color, Frame, MusicControl, SoundEvent};
use crate::config::Difficulty;
use crate::context::AppCtx;
use crate::events::{Event, MouseButton};
use crate::scene::{Scene, Transition};
use crate::scenes::game::{GameScene, Mode};
use crate::scenes::highscores::HighScoresScene;
use crate::ui::{Button, ButtonStyle};

const BACKGROUND: Color = Color::rgb(15, 17, 22);
const TITLE: Color = Color::rgb(0, 255, 255);

const BUTTON_W: i32 = 320;
const BUTTON_H: i32 = 52;
const BUTTON_GAP: i32 = 68;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum MenuAction {
    PrevDifficulty,
    NextDifficulty,
    Single,
    Multiplayer,
    Campaign,
    HighScores,
    Exit,
}

/// Entry screen: difficulty carousel plus the mode and navigation buttons.
pub struct MenuScene {
    difficulty: Difficulty,
    prev_btn: Button<MenuAction>,
    next_btn: Button<MenuAction>,
    diff_label: Button<MenuAction>,
    single_btn: Button<MenuAction>,
    multi_btn: Button<MenuAction>,
    campaign_btn: Button<MenuAction>,
    scores_btn: Button<MenuAction>,
    exit_btn: Button<MenuAction>,
}

impl MenuScene {
    pub fn new(ctx: &AppCtx) -> Self {
        let mut scene = Self {
            difficulty: Difficulty::Easy,
            prev_btn: Button::new(Rect::default(), "<", Some(MenuAction::PrevDifficulty), ButtonStyle::Glass),
            next_btn: Button::new(Rect::default(), ">", Some(MenuAction::NextDifficulty), ButtonStyle::Glass),
            diff_label: Button::new(Rect::default(), Difficulty::Easy.label(), None, ButtonStyle::Glass),
            single_btn: Button::new(Rect::default(), "SINGLE PLAYER", Some(MenuAction::Single), ButtonStyle::Primary),
            multi_btn: Button::new(Rect::default(), "MULTIPLAYER", Some(MenuAction::Multiplayer), ButtonStyle::Primary),
            campaign_btn: Button::new(Rect::default(), "CAMPAIGN", Some(MenuAction::Campaign), ButtonStyle::Primary),
            scores_btn: Button::new(Rect::default(), "HIGH SCORES", Some(MenuAction::HighScores), ButtonStyle::Glass),
            exit_btn: Button::new(Rect::default(), "EXIT", Some(MenuAction::Exit), ButtonStyle::Danger),
        };
        scene.apply_layout(ctx);
        scene
    }

    fn apply_layout(&mut self, ctx: &AppCtx) {
        let cx = ctx.width / 2;
        let mut y = ctx.height / 2 - 2 * BUTTON_GAP - BUTTON_H;

        // carousel row: arrows flanking the difficulty label
        let row = Rect::new(cx - BUTTON_W / 2, y, BUTTON_W, BUTTON_H);
        self.prev_btn = Button::new(
            Rect::new(row.x, row.y, BUTTON_H, BUTTON_H),
            "<",
            Some(MenuAction::PrevDifficulty),
            ButtonStyle::Glass,
        );
        self.next_btn = Button::new(
            Rect::new(row.x + row.w - BUTTON_H, row.y, BUTTON_H, BUTTON_H),
            ">",
            Some(MenuAction::NextDifficulty),
            ButtonStyle::Glass,
        );
        self.diff_label = Button::new(
            Rect::new(row.x + BUTTON_H, row.y, row.w - 2 * BUTTON_H, BUTTON_H),
            self.difficulty.label(),
            None,
            ButtonStyle::Glass,
        );

        let column = |label: &str, action: MenuAction, style: ButtonStyle, y: i32| {
            Button::new(
                Rect::new(cx - BUTTON_W / 2, y, BUTTON_W, BUTTON_H),
                label,
                Some(action),
                style,
            )
        };
        y += BUTTON_GAP;
        self.single_btn = column("SINGLE PLAYER", MenuAction::Single, ButtonStyle::Primary, y);
        y += BUTTON_GAP;
        self.multi_btn = column("MULTIPLAYER", MenuAction::Multiplayer, ButtonStyle::Primary, y);
        y += BUTTON_GAP;
        self.campaign_btn = column("CAMPAIGN", MenuAction::Campaign, ButtonStyle::Primary, y);
        y += BUTTON_GAP;
        self.scores_btn = column("HIGH SCORES", MenuAction::HighScores, ButtonStyle::Glass, y);
        y += BUTTON_GAP;
        self.exit_btn = column("EXIT", MenuAction::Exit, ButtonStyle::Danger, y);
    }

    fn buttons_mut(&mut self) -> [&mut Button<MenuAction>; 8] {
        [
            &mut self.prev_btn,
            &mut self.next_btn,
            &mut self.diff_label,
            &mut self.single_btn,
            &mut self.multi_btn,
            &mut self.campaign_btn,
            &mut self.scores_btn,
            &mut self.exit_btn,
        ]
    }

    fn buttons(&self) -> [&Button<MenuAction>; 8] {
        [
            &self.prev_btn,
            &self.next_btn,
            &self.diff_label,
            &self.single_btn,
            &self.multi_btn,
            &self.campaign_btn,
            &self.scores_btn,
            &self.exit_btn,
        ]
    }

    #[cfg(test)]
    pub(crate) fn single_button_center(&self) -> sapper_core::Point {
        self.single_btn.rect().center()
    }

    fn start_game(&self, ctx: &mut AppCtx, mode: Mode) -> Transition {
        match GameScene::new(ctx, mode) {
            Ok(game) => Transition::Switch(Box::new(game)),
            Err(err) => {
                log::error!("could not start {mode:?}: {err}");
                Transition::None
            }
        }
    }

    fn activate(&mut self, ctx: &mut AppCtx, action: MenuAction) -> Transition {
        ctx.audio.play(SoundEvent::Click);
        match action {
            MenuAction::PrevDifficulty => {
                self.difficulty = self.difficulty.prev();
                self.diff_label.set_label(self.difficulty.label());
            }
            MenuAction::NextDifficulty => {
                self.difficulty = self.difficulty.next();
                self.diff_label.set_label(self.difficulty.label());
            }
            MenuAction::Single => return self.start_game(ctx, Mode::Single(self.difficulty)),
            MenuAction::Multiplayer => return self.start_game(ctx, Mode::Versus(self.difficulty)),
            MenuAction::Campaign => return self.start_game(ctx, Mode::Campaign { level: 1 }),
            MenuAction::HighScores => {
                return Transition::Switch(Box::new(HighScoresScene::new(ctx)));
            }
            MenuAction::Exit => ctx.running = false,
        }
        Transition::None
    }
}

impl Scene for MenuScene {
    fn name(&self) -> &'static str {
        "menu"
    }

    fn enter(&mut self, ctx: &mut AppCtx) {
        ctx.audio.music(MusicControl::Stop);
    }

    fn handle_event(&mut self, ctx: &mut AppCtx, event: &Event) -> Transition {
        match *event {
            Event::MouseMove { pos } => {
                for button in self.buttons_mut() {
                    button.hover(pos);
                }
            }
            Event::MouseDown {
                pos,
                button: MouseButton::Left,
            } => {
                let pressed = self.buttons().iter().find_map(|button| button.press(pos));
                if let Some(action) = pressed {
                    return self.activate(ctx, action);
                }
            }
            _ => {}
        }
        Transition::None
    }

    fn draw(&self, ctx: &mut AppCtx, frame: &mut dyn Frame) {
        frame.fill_rect(Rect::new(0, 0, ctx.width, ctx.height), BACKGROUND);

        let family = ctx.config.fonts.family.clone();
        let title_font = ctx.assets.font(&family, ctx.config.fonts.size_large);
        frame.draw_text(title_font, &ctx.config.title.to_uppercase(), (ctx.width / 2, 120), TITLE);

        for button in self.buttons() {
            button.draw(ctx, frame);
        }
    }

    fn on_resize(&mut self, ctx: &mut AppCtx) {
        self.apply_layout(ctx);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_ctx;

    fn click(scene: &mut MenuScene, ctx: &mut AppCtx, rect: Rect) -> Transition {
        scene.handle_event(
            ctx,
            &Event::MouseDown {
                pos: rect.center(),
                button: MouseButton::Left,
            },
        )
    }

    #[test]
    fn single_player_button_starts_a_game() {
        let mut ctx = test_ctx();
        let mut scene = MenuScene::new(&ctx);

        let rect = scene.single_btn.rect();
        match click(&mut scene, &mut ctx, rect) {
            Transition::Switch(next) => {
                assert_eq!(next.name(), "game");
                let game = next.as_any().downcast_ref::<GameScene>().unwrap();
                assert_eq!(game.mode(), Mode::Single(Difficulty::Easy));
            }
            Transition::None => panic!("expected game transition"),
        }
    }

    #[test]
    fn carousel_changes_the_started_difficulty() {
        let mut ctx = test_ctx();
        let mut scene = MenuScene::new(&ctx);

        let next_rect = scene.next_btn.rect();
        assert!(click(&mut scene, &mut ctx, next_rect).is_none());
        let multi_rect = scene.multi_btn.rect();
        match click(&mut scene, &mut ctx, multi_rect) {
            Transition::Switch(next) => {
                let game = next.as_any().downcast_ref::<GameScene>().unwrap();
                assert_eq!(game.mode(), Mode::Versus(Difficulty::Medium));
            }
            Transition::None => panic!("expected game transition"),
        }
    }

    #[test]
    fn carousel_wraps_backwards() {
        let mut ctx = test_ctx();
        let mut scene = MenuScene::new(&ctx);

        let rect = scene.prev_btn.rect();
        click(&mut scene, &mut ctx, rect);
        assert_eq!(scene.difficulty, Difficulty::Hard);
    }

    #[test]
    fn exit_button_stops_the_frame_loop() {
        let mut ctx = test_ctx();
        let mut scene = MenuScene::new(&ctx);

        let rect = scene.exit_btn.rect();
        assert!(click(&mut scene, &mut ctx, rect).is_none());
        assert!(!ctx.running);
    }

    #[test]
    fn clicks_outside_buttons_do_nothing() {
        let mut ctx = test_ctx();
        let mut scene = MenuScene::new(&ctx);

        assert!(click(&mut scene, &mut ctx, Rect::new(0, 0, 2, 2)).is_none());
        assert!(ctx.running);
    }
}
