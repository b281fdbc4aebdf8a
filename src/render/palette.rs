use super::frame::Color;
use crate::shared::Direction;

pub const BACKGROUND: Color = Color::rgb(0xf8, 0xfa, 0xfc);
pub const FLOOR_LINE: Color = Color::rgb(0xe2, 0xe8, 0xf0);
pub const FLOOR_TEXT: Color = Color::rgb(0x64, 0x74, 0x8b);
pub const SHAFT: Color = Color::rgb(0xcb, 0xd5, 0xe1);

pub const CAR_BODY: Color = Color::rgb(0x63, 0x66, 0xf1);
pub const CAR_BORDER: Color = Color::rgb(0x4f, 0x46, 0xe5);
pub const CAR_TEXT: Color = Color::rgb(0xff, 0xff, 0xff);

pub const PASSENGER_WAITING: Color = Color::rgb(0xef, 0x44, 0x44);
pub const PASSENGER_ONBOARD: Color = Color::rgb(0x10, 0xb9, 0x81);

pub const INDICATOR_UP: Color = Color::rgb(0x10, 0xb9, 0x81);
pub const INDICATOR_DOWN: Color = Color::rgb(0xef, 0x44, 0x44);
pub const INDICATOR_IDLE: Color = Color::rgb(0x64, 0x74, 0x8b);

/// Shape drawn above a car for its direction tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorShape {
    UpTriangle,
    DownTriangle,
    Dot,
}

pub fn indicator(direction: Direction) -> (IndicatorShape, Color) {
    match direction {
        Direction::Up => (IndicatorShape::UpTriangle, INDICATOR_UP),
        Direction::Down => (IndicatorShape::DownTriangle, INDICATOR_DOWN),
        Direction::Idle => (IndicatorShape::Dot, INDICATOR_IDLE),
    }
}
