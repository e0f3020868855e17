use sapper_core::Point;

/// Mouse buttons the game distinguishes. Frontends map their native button
/// indices here; 1 is primary, 2 is secondary.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Other,
}

impl MouseButton {
    pub const fn from_index(index: u8) -> Self {
        match index {
            1 => Self::Left,
            2 => Self::Right,
            _ => Self::Other,
        }
    }
}

/// Keys the scenes react to; everything else arrives as `Other`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    F1,
    F2,
    F3,
    Other,
}

/// Abstract input event stream consumed by the scene machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Quit,
    Resize { width: i32, height: i32 },
    KeyDown(Key),
    MouseDown { pos: Point, button: MouseButton },
    MouseMove { pos: Point },
    MouseUp { pos: Point, button: MouseButton },
}
