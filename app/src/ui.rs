//! Small retained widgets shared by the scenes. Widgets do their own hit
//! testing and hand back action values; the owning scene decides what those
//! mean.

use sapper_core::{Point, Rect};

use crate::backend::{Color, Frame};
use crate::context::AppCtx;
use crate::events::{Event, MouseButton};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ButtonStyle {
    Glass,
    Primary,
    Danger,
}

impl ButtonStyle {
    const fn accent(self) -> Color {
        match self {
            Self::Glass => Color::rgb(150, 150, 150),
            Self::Primary => Color::rgb(0, 255, 255),
            Self::Danger => Color::rgb(255, 50, 50),
        }
    }

    const fn text_color(self) -> Color {
        match self {
            Self::Glass => Color::rgb(200, 200, 200),
            Self::Primary | Self::Danger => Color::rgb(255, 255, 255),
        }
    }
}

/// Clickable rectangle that yields its action value when pressed.
#[derive(Clone, Debug)]
pub struct Button<A> {
    rect: Rect,
    label: String,
    action: Option<A>,
    style: ButtonStyle,
    hovered: bool,
}

impl<A: Copy> Button<A> {
    pub fn new(rect: Rect, label: impl Into<String>, action: Option<A>, style: ButtonStyle) -> Self {
        Self {
            rect,
            label: label.into(),
            action,
            style,
            hovered: false,
        }
    }

    pub const fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn hover(&mut self, cursor: Point) {
        self.hovered = self.rect.contains(cursor);
    }

    /// Returns the action when `pos` lands on the button. Label-only buttons
    /// (no action) never fire.
    pub fn press(&self, pos: Point) -> Option<A> {
        if self.rect.contains(pos) { self.action } else { None }
    }

    pub fn draw(&self, ctx: &mut AppCtx, frame: &mut dyn Frame) {
        let accent = self.style.accent();
        let fill = if self.hovered {
            Color::rgba(accent.r, accent.g, accent.b, 50)
        } else {
            Color::rgba(0, 0, 0, 150)
        };
        frame.fill_rect(self.rect, fill);

        let border_alpha = if self.hovered { 255 } else { 100 };
        let border = Color::rgba(accent.r, accent.g, accent.b, border_alpha);
        frame.fill_rect(Rect::new(self.rect.x, self.rect.y, self.rect.w, 1), border);
        frame.fill_rect(
            Rect::new(self.rect.x, self.rect.y + self.rect.h - 1, self.rect.w, 1),
            border,
        );

        if !self.label.is_empty() {
            let family = ctx.config.fonts.family.clone();
            let font = ctx.assets.font(&family, ctx.config.fonts.size_medium);
            frame.draw_text(font, &self.label, self.rect.center(), self.style.text_color());
        }
    }
}

/// Horizontal drag slider over `min..=max`, reporting changes as they happen.
#[derive(Clone, Debug)]
pub struct Slider {
    rect: Rect,
    min: f32,
    max: f32,
    value: f32,
    dragging: bool,
}

impl Slider {
    pub fn new(rect: Rect, min: f32, max: f32, value: f32) -> Self {
        Self {
            rect,
            min,
            max,
            value: value.clamp(min, max),
            dragging: false,
        }
    }

    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Consumes mouse events; returns the new value whenever it changed.
    pub fn handle_event(&mut self, event: &Event) -> Option<f32> {
        match *event {
            Event::MouseDown {
                pos,
                button: MouseButton::Left,
            } if self.rect.inflate(5).contains(pos) => {
                self.dragging = true;
                Some(self.set_from_x(pos.0))
            }
            Event::MouseMove { pos } if self.dragging => Some(self.set_from_x(pos.0)),
            Event::MouseUp {
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = false;
                None
            }
            _ => None,
        }
    }

    fn set_from_x(&mut self, x: i32) -> f32 {
        let ratio = (x - self.rect.x) as f32 / self.rect.w as f32;
        self.value = self.min + ratio.clamp(0.0, 1.0) * (self.max - self.min);
        self.value
    }

    pub fn draw(&self, ctx: &mut AppCtx, frame: &mut dyn Frame) {
        frame.fill_rect(self.rect, Color::rgb(100, 100, 100));

        let ratio = (self.value - self.min) / (self.max - self.min);
        let filled = Rect::new(
            self.rect.x,
            self.rect.y,
            (self.rect.w as f32 * ratio) as i32,
            self.rect.h,
        );
        frame.fill_rect(filled, Color::rgb(0, 200, 255));

        let handle_x = self.rect.x + filled.w - 5;
        frame.fill_rect(
            Rect::new(handle_x, self.rect.y - 5, 10, self.rect.h + 10),
            Color::rgb(200, 200, 200),
        );

        let family = ctx.config.fonts.family.clone();
        let font = ctx.assets.font(&family, ctx.config.fonts.size_medium);
        let label = format!("{}%", (self.value * 100.0) as i32);
        let center = (self.rect.x + self.rect.w + 40, self.rect.y + self.rect.h / 2);
        frame.draw_text(font, &label, center, Color::rgb(220, 220, 220));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    enum Action {
        Go,
    }

    #[test]
    fn button_fires_only_inside_its_rect() {
        let button = Button::new(
            Rect::new(10, 10, 100, 40),
            "GO",
            Some(Action::Go),
            ButtonStyle::Primary,
        );

        assert_eq!(button.press((50, 20)), Some(Action::Go));
        assert_eq!(button.press((5, 5)), None);
    }

    #[test]
    fn label_only_button_never_fires() {
        let button: Button<Action> =
            Button::new(Rect::new(0, 0, 50, 20), "EASY", None, ButtonStyle::Glass);
        assert_eq!(button.press((10, 10)), None);
    }

    #[test]
    fn slider_drag_tracks_and_clamps() {
        let mut slider = Slider::new(Rect::new(0, 0, 100, 10), 0.0, 1.0, 0.5);

        let value = slider
            .handle_event(&Event::MouseDown {
                pos: (25, 5),
                button: MouseButton::Left,
            })
            .unwrap();
        assert!((value - 0.25).abs() < 0.01);

        let value = slider
            .handle_event(&Event::MouseMove { pos: (500, 5) })
            .unwrap();
        assert!((value - 1.0).abs() < f32::EPSILON);

        slider.handle_event(&Event::MouseUp {
            pos: (500, 5),
            button: MouseButton::Left,
        });
        // no longer dragging
        assert!(slider.handle_event(&Event::MouseMove { pos: (0, 5) }).is_none());
    }
}
