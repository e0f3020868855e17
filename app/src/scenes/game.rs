use sapper_core::{Board, ClickKind, GameError, Point, Rect};

use crate::backend::{Color, Frame, ImageHandle, MusicControl, SoundEvent};
use crate::config::Difficulty;
use crate::context::AppCtx;
use crate::events::{Event, Key, MouseButton};
use crate::scene::{Scene, Transition};
use crate::scenes::game_over::{GameOutcome, GameOverScene};
use crate::scenes::pause::PauseScene;
use crate::ui::{Button, ButtonStyle};

/// Loss and draw overlays fade quickly; multiplayer result overlays linger.
const SHORT_OVERLAY_MS: u64 = 2000;
const LONG_OVERLAY_MS: u64 = 9000;
/// Long overlays hold at full opacity and only fade in the last stretch.
const LONG_OVERLAY_FADE_MS: u64 = 200;
/// Update ticks to wait after a win before cutting to the game-over scene.
const SETTLE_TICKS: u32 = 60;

const BACKGROUND: Color = Color::rgb(15, 17, 22);
const PANEL: Color = Color::rgba(10, 10, 10, 180);
const CELL_CLOSED: Color = Color::rgb(70, 80, 100);
const CELL_OPEN: Color = Color::rgb(180, 185, 190);
const CELL_MINE: Color = Color::rgb(200, 60, 60);
const FLAG: Color = Color::rgb(255, 80, 80);
const HUD_TEXT: Color = Color::rgb(255, 255, 255);

/// How a game scene was started.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Single(Difficulty),
    Versus(Difficulty),
    Campaign { level: u8 },
}

impl Mode {
    pub const fn player_count(self) -> usize {
        match self {
            Self::Versus(_) => 2,
            Self::Single(_) | Self::Campaign { .. } => 1,
        }
    }

    /// Ranked games feed the high-score table.
    pub const fn ranked_difficulty(self) -> Option<Difficulty> {
        match self {
            Self::Single(difficulty) => Some(difficulty),
            Self::Versus(_) | Self::Campaign { .. } => None,
        }
    }
}

/// Timed outcome banner layered over the boards. While present, board update
/// logic is suspended and only the countdown runs.
#[derive(Clone, Debug)]
pub(crate) struct Overlay {
    pub(crate) image: ImageHandle,
    pub(crate) text: String,
    pub(crate) started_ms: u64,
    pub(crate) duration_ms: u64,
    /// Elapsed play time banked when the overlay started.
    pub(crate) elapsed_secs: u32,
    pub(crate) won: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum GameAction {
    Pause,
}

/// Runs one or two boards, the play-time clock, pause bookkeeping and the
/// outcome overlays that sequence into the game-over scene.
#[derive(Clone)]
pub struct GameScene {
    mode: Mode,
    boards: Vec<Board>,
    start_ms: u64,
    pause_started_ms: Option<u64>,
    settle_ticks: u32,
    overlay: Option<Overlay>,
    pause_btn: Button<GameAction>,
    cursor: Point,
}

impl GameScene {
    pub fn new(ctx: &mut AppCtx, mode: Mode) -> Result<Self, GameError> {
        let params = match mode {
            Mode::Campaign { level } => ctx.config.campaign_params(level),
            Mode::Single(difficulty) | Mode::Versus(difficulty) => {
                ctx.config.board_params(difficulty)
            }
        };

        let mut boards = Vec::with_capacity(mode.player_count());
        for _ in 0..mode.player_count() {
            boards.push(Board::new(
                params.rows,
                params.cols,
                params.mines,
                (0, 0),
                ctx.config.layout.cell_size,
                ctx.next_seed(),
            )?);
        }

        let mut scene = Self {
            mode,
            boards,
            start_ms: ctx.now_ms,
            pause_started_ms: None,
            settle_ticks: 0,
            overlay: None,
            pause_btn: Button::new(Rect::default(), "", Some(GameAction::Pause), ButtonStyle::Glass),
            cursor: (0, 0),
        };
        scene.apply_layout(ctx);
        Ok(scene)
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub(crate) fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// Scales cells to fit the window while reserving the HUD band, then
    /// centers the board(s). Idempotent; never touches logical board state.
    fn apply_layout(&mut self, ctx: &AppCtx) {
        let Some(board) = self.boards.first() else {
            return;
        };
        let layout = &ctx.config.layout;
        let (rows, cols) = (board.rows() as i32, board.cols() as i32);

        let board_w = cols * layout.cell_size;
        let board_h = rows * layout.cell_size;
        let (req_w, req_h) = if self.boards.len() == 1 {
            (board_w + layout.margin * 2, board_h + layout.hud_height + layout.margin * 2)
        } else {
            (
                board_w * 2 + layout.board_gap + layout.margin * 2,
                board_h + layout.hud_height + layout.margin * 2,
            )
        };

        let mut scale = 1.0f32;
        if req_w > ctx.width || req_h > ctx.height {
            scale = (ctx.width as f32 / req_w as f32).min(ctx.height as f32 / req_h as f32);
        }
        let cell = ((layout.cell_size as f32 * scale) as i32).max(1);
        let scaled_w = cols * cell;
        let scaled_h = rows * cell;
        let y = (ctx.height - scaled_h + layout.hud_height) / 2;

        if self.boards.len() == 1 {
            let x = (ctx.width - scaled_w) / 2;
            self.boards[0].reposition((x, y), cell);
        } else {
            let gap = (layout.board_gap as f32 * scale) as i32;
            let start_x = (ctx.width - (scaled_w * 2 + gap)) / 2;
            self.boards[0].reposition((start_x, y), cell);
            self.boards[1].reposition((start_x + scaled_w + gap, y), cell);
        }

        self.pause_btn = Button::new(
            Rect::new(ctx.width - 60, 20, 40, 40),
            "II",
            Some(GameAction::Pause),
            ButtonStyle::Glass,
        );
    }

    /// Called by the pause scene when it takes over.
    pub(crate) fn pause(&mut self, ctx: &mut AppCtx) {
        self.pause_started_ms = Some(ctx.now_ms);
        ctx.audio.music(MusicControl::Pause);
    }

    /// Shifts the start timestamp by the pause duration so elapsed time
    /// excludes it.
    pub(crate) fn resume(&mut self, ctx: &mut AppCtx) {
        if let Some(pause_started) = self.pause_started_ms.take() {
            self.start_ms += ctx.now_ms.saturating_sub(pause_started);
        }
        ctx.audio.music(MusicControl::Resume);
    }

    pub(crate) fn elapsed_secs(&self, now_ms: u64) -> u32 {
        let end = self.pause_started_ms.unwrap_or(now_ms);
        (end.saturating_sub(self.start_ms) / 1000) as u32
    }

    fn begin_overlay(
        &mut self,
        ctx: &mut AppCtx,
        text: &str,
        image_key: &str,
        duration_ms: u64,
        sound: SoundEvent,
    ) {
        ctx.audio.music(MusicControl::Stop);
        ctx.audio.play(sound);
        self.overlay = Some(Overlay {
            image: ctx.assets.image(image_key),
            text: text.to_string(),
            started_ms: ctx.now_ms,
            duration_ms,
            elapsed_secs: self.elapsed_secs(ctx.now_ms),
            won: self.boards.iter().all(Board::won),
        });
        log::debug!("outcome overlay: {text:?} for {duration_ms} ms");
    }

    fn game_over(&self, ctx: &mut AppCtx, text: &str, elapsed_secs: Option<u32>, won: bool) -> Transition {
        Transition::Switch(Box::new(GameOverScene::new(
            ctx,
            GameOutcome {
                text: text.to_string(),
                elapsed_secs,
                mode: self.mode,
                won,
            },
        )))
    }

    /// Both boards settled: map the four win-flag combinations to an outcome.
    fn resolve_versus(&self) -> (&'static str, &'static str, u64, SoundEvent) {
        let p1 = self.boards[0].won();
        let p2 = self.boards[1].won();
        match (p1, p2) {
            (true, true) => (
                "Both Players Win!",
                "mp_win",
                LONG_OVERLAY_MS,
                SoundEvent::MultiplayerWin,
            ),
            (false, false) => (
                "Draw - Both Lost!",
                "mp_draw",
                SHORT_OVERLAY_MS,
                SoundEvent::Explosion,
            ),
            (true, false) => (
                "Player 1 Wins!",
                "p2_lose",
                LONG_OVERLAY_MS,
                SoundEvent::MultiplayerWin,
            ),
            (false, true) => (
                "Player 2 Wins!",
                "p1_lose",
                LONG_OVERLAY_MS,
                SoundEvent::MultiplayerWin,
            ),
        }
    }

    /// Debug shortcut: settle the boards immediately. Forcing one player's
    /// win forces the other board to an immediate loss rather than waiting
    /// for its natural outcome.
    #[cfg(debug_assertions)]
    fn debug_force_win(&mut self, key: Key) {
        if self.boards.len() == 1 {
            self.boards[0].force_result(true);
            return;
        }
        match key {
            Key::F1 => {
                self.boards[0].force_result(true);
                self.boards[1].force_result(false);
            }
            Key::F2 => {
                self.boards[1].force_result(true);
                self.boards[0].force_result(false);
            }
            _ => {
                self.boards[0].force_result(true);
                self.boards[1].force_result(true);
            }
        }
    }

    fn click_boards(&mut self, ctx: &mut AppCtx, pos: Point, kind: ClickKind) {
        for board in &mut self.boards {
            let outcome = board.handle_click(pos, kind);
            if outcome.opened_cell() {
                ctx.audio.play(SoundEvent::Click);
            }
        }
    }

    fn to_pause(&self, ctx: &mut AppCtx) -> Transition {
        Transition::Switch(Box::new(PauseScene::new(ctx, self.clone())))
    }

    fn draw_board(&self, ctx: &mut AppCtx, frame: &mut dyn Frame, board: &Board) {
        frame.fill_rect(board.bounds().inflate(15), PANEL);

        let family = ctx.config.fonts.family.clone();
        let number_font = ctx
            .assets
            .font(&family, (board.cell_size() * 4 / 5).max(8) as u16);

        for cell in board.cells() {
            let rect = cell.rect().inflate(-1);
            if cell.is_open() {
                if cell.is_mine() {
                    frame.fill_rect(rect, CELL_MINE);
                } else {
                    frame.fill_rect(rect, CELL_OPEN);
                    if cell.neighbor_mines() > 0 {
                        frame.draw_text(
                            number_font,
                            &cell.neighbor_mines().to_string(),
                            rect.center(),
                            number_color(cell.neighbor_mines()),
                        );
                    }
                }
            } else {
                frame.fill_rect(rect, CELL_CLOSED);
                if cell.is_flagged() {
                    frame.fill_rect(rect.inflate(-rect.w / 4), FLAG);
                }
            }
        }
    }

    fn draw_hud(&self, ctx: &mut AppCtx, frame: &mut dyn Frame) {
        let family = ctx.config.fonts.family.clone();
        let hud_font = ctx.assets.font(&family, ctx.config.fonts.size_medium);

        let timer = format!("TIME: {:03}", self.elapsed_secs(ctx.now_ms));
        frame.draw_text(hud_font, &timer, (ctx.width / 2, 30), HUD_TEXT);

        for board in &self.boards {
            let bounds = board.bounds();
            let label = format!("MINES: {}", board.mines_left());
            frame.draw_text(
                hud_font,
                &label,
                (bounds.x + bounds.w / 2, bounds.y - 40),
                HUD_TEXT,
            );
        }
    }

    fn draw_overlay(&self, ctx: &mut AppCtx, frame: &mut dyn Frame, overlay: &Overlay) {
        let diff = ctx.now_ms.saturating_sub(overlay.started_ms);
        let alpha = overlay_alpha(diff, overlay.duration_ms);
        let size = 600.min(ctx.width).min(ctx.height);
        let rect = Rect::new(
            (ctx.width - size) / 2,
            (ctx.height - size) / 2,
            size,
            size,
        );
        frame.draw_image(overlay.image, rect, alpha);
    }
}

/// Short overlays fade linearly across their lifetime; long ones hold at full
/// opacity and fade only over the final stretch.
fn overlay_alpha(diff_ms: u64, duration_ms: u64) -> u8 {
    if duration_ms > SHORT_OVERLAY_MS {
        let hold = duration_ms.saturating_sub(LONG_OVERLAY_FADE_MS);
        if diff_ms < hold {
            return 255;
        }
        let progress = (diff_ms - hold) as f32 / LONG_OVERLAY_FADE_MS as f32;
        return (255.0 * (1.0 - progress)).max(0.0) as u8;
    }
    let progress = (diff_ms as f32 / duration_ms.max(1) as f32).min(1.0);
    (255.0 * (1.0 - progress)) as u8
}

fn number_color(n: u8) -> Color {
    match n {
        1 => Color::rgb(0, 0, 255),
        2 => Color::rgb(0, 128, 0),
        3 => Color::rgb(255, 0, 0),
        4 => Color::rgb(0, 0, 128),
        5 => Color::rgb(128, 0, 0),
        6 => Color::rgb(0, 128, 128),
        7 => Color::rgb(0, 0, 0),
        _ => Color::rgb(128, 128, 128),
    }
}

impl Scene for GameScene {
    fn name(&self) -> &'static str {
        "game"
    }

    fn enter(&mut self, ctx: &mut AppCtx) {
        if ctx.config.audio.enabled {
            ctx.audio.music(MusicControl::Start);
        }
    }

    fn update(&mut self, ctx: &mut AppCtx) -> Transition {
        if let Some(overlay) = &self.overlay {
            if ctx.now_ms.saturating_sub(overlay.started_ms) > overlay.duration_ms {
                let (text, elapsed, won) =
                    (overlay.text.clone(), overlay.elapsed_secs, overlay.won);
                return self.game_over(ctx, &text, Some(elapsed), won);
            }
            // board logic stays suspended while the overlay counts down
            return Transition::None;
        }

        let all_finished = self.boards.iter().all(Board::game_over);
        let any_lost = self
            .boards
            .iter()
            .any(|board| board.game_over() && !board.won());

        if self.boards.len() == 1 {
            if any_lost {
                self.begin_overlay(ctx, "You Lose!", "lose", SHORT_OVERLAY_MS, SoundEvent::Explosion);
                return Transition::None;
            }
        } else if all_finished {
            let (text, image, duration, sound) = self.resolve_versus();
            self.begin_overlay(ctx, text, image, duration, sound);
            return Transition::None;
        }

        // single-player win path; losses went through the overlay above
        if all_finished {
            self.settle_ticks += 1;
            if self.settle_ticks > SETTLE_TICKS {
                ctx.audio.music(MusicControl::Stop);
                ctx.audio.play(SoundEvent::Win);
                let elapsed = self.elapsed_secs(ctx.now_ms);

                if let Mode::Campaign { level } = self.mode {
                    if level < ctx.config.campaign.max_level {
                        return match GameScene::new(ctx, Mode::Campaign { level: level + 1 }) {
                            Ok(next) => Transition::Switch(Box::new(next)),
                            Err(err) => {
                                log::error!("could not build campaign level {}: {err}", level + 1);
                                self.game_over(ctx, "Campaign Complete!", Some(elapsed), true)
                            }
                        };
                    }
                    return self.game_over(ctx, "Campaign Complete!", Some(elapsed), true);
                }
                return self.game_over(ctx, "You Win!", Some(elapsed), true);
            }
        }

        Transition::None
    }

    fn handle_event(&mut self, ctx: &mut AppCtx, event: &Event) -> Transition {
        match *event {
            Event::MouseMove { pos } => {
                self.cursor = pos;
                self.pause_btn.hover(pos);
            }
            Event::MouseDown {
                pos,
                button: MouseButton::Left,
            } => {
                if self.pause_btn.press(pos).is_some() {
                    ctx.audio.play(SoundEvent::Click);
                    return self.to_pause(ctx);
                }
                self.click_boards(ctx, pos, ClickKind::Primary);
            }
            Event::MouseDown {
                pos,
                button: MouseButton::Right,
            } => {
                self.click_boards(ctx, pos, ClickKind::Secondary);
            }
            Event::KeyDown(Key::Escape) => return self.to_pause(ctx),
            #[cfg(debug_assertions)]
            Event::KeyDown(key @ (Key::F1 | Key::F2 | Key::F3)) => self.debug_force_win(key),
            _ => {}
        }
        Transition::None
    }

    fn draw(&self, ctx: &mut AppCtx, frame: &mut dyn Frame) {
        frame.fill_rect(Rect::new(0, 0, ctx.width, ctx.height), BACKGROUND);

        for board in &self.boards {
            self.draw_board(ctx, frame, board);
        }
        self.draw_hud(ctx, frame);

        if let Some(overlay) = &self.overlay {
            self.draw_overlay(ctx, frame, overlay);
        }
        self.pause_btn.draw(ctx, frame);
    }

    fn on_resize(&mut self, ctx: &mut AppCtx) {
        self.apply_layout(ctx);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
