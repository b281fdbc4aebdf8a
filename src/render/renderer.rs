/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, warn};
use std::cell::Cell;

/***************************************/
/*           Local modules             */
/***************************************/
use super::frame::{Baseline, Color, DrawCommand, Font, Frame, Point, Rect, RenderError, TextAlign};
use super::geometry::*;
use super::palette::{self, IndicatorShape};
use crate::shared::{Elevator, Snapshot, WaitingPassenger};

const LABEL_FONT: Font = Font { size: 14.0, bold: false };
const CAR_FONT: Font = Font { size: 14.0, bold: true };
const BADGE_FONT: Font = Font { size: 10.0, bold: true };

/// Latch for a layout mismatch that would otherwise be reported every frame.
#[derive(Default)]
pub(super) struct WarnOnce(Cell<bool>);

impl WarnOnce {
    /// True the first time only.
    pub(super) fn first(&self) -> bool {
        !self.0.replace(true)
    }
}

macro_rules! warn_once {
    ($latch:expr, $($arg:tt)+) => {
        if $latch.first() {
            warn!($($arg)+);
        } else {
            debug!($($arg)+);
        }
    };
}

/**
 * Maps a snapshot onto a complete display list.
 *
 * Every call produces the whole frame from scratch: background, floor
 * grid, one shaft and car per elevator, then the waiting passengers of
 * each queued floor. Nothing is carried over from the previous call, so
 * the same snapshot always yields the same frame.
 *
 * # Fields
 * - `layout`:  Fixed geometry for the session's surface and building size.
 * - `extra_elevators`, `clamped_floor`, `queue_outside`:  Mismatches between
 *   the snapshot and the layout are warned about once, then logged at debug.
 */
pub struct Renderer {
    layout: Layout,
    pub(super) extra_elevators: WarnOnce,
    pub(super) clamped_floor: WarnOnce,
    pub(super) queue_outside: WarnOnce,
}

impl Renderer {
    pub fn new(layout: Layout) -> Renderer {
        Renderer {
            layout,
            extra_elevators: WarnOnce::default(),
            clamped_floor: WarnOnce::default(),
            queue_outside: WarnOnce::default(),
        }
    }

    pub fn render(&self, snapshot: &Snapshot) -> Result<Frame, RenderError> {
        let mut frame = Frame::new(self.layout.width, self.layout.height);
        frame.push(DrawCommand::Clear {
            color: palette::BACKGROUND,
        });

        self.draw_floors(&mut frame);

        if snapshot.elevators.len() > self.layout.n_elevators {
            warn_once!(
                self.extra_elevators,
                "Snapshot has {} elevators but the layout has {} shafts, drawing the first {}",
                snapshot.elevators.len(),
                self.layout.n_elevators,
                self.layout.n_elevators
            );
        }
        for (index, elevator) in snapshot.elevators.iter().take(self.layout.n_elevators).enumerate() {
            self.draw_elevator(&mut frame, index, elevator);
        }

        for (floor, passengers) in snapshot.queue_floors() {
            if floor < 0 || floor > self.layout.top_floor() {
                warn_once!(
                    self.queue_outside,
                    "Skipping queue for floor {} outside 0..{}",
                    floor,
                    self.layout.n_floors
                );
                continue;
            }
            self.draw_waiting(&mut frame, floor, passengers);
        }

        frame.validate()?;
        Ok(frame)
    }

    fn draw_floors(&self, frame: &mut Frame) {
        for floor in 0..=self.layout.n_floors {
            let y = self.layout.floor_line_y(floor);
            frame.push(DrawCommand::Line {
                from: Point::new(0.0, y),
                to: Point::new(self.layout.width, y),
                color: palette::FLOOR_LINE,
                width: 1.0,
            });
            frame.push(DrawCommand::Text {
                text: format!("Floor {}", floor),
                at: Point::new(FLOOR_LABEL_X, y - FLOOR_LABEL_OFFSET),
                color: palette::FLOOR_TEXT,
                font: LABEL_FONT,
                align: TextAlign::Left,
                baseline: Baseline::Bottom,
            });
        }
    }

    fn draw_elevator(&self, frame: &mut Frame, index: usize, elevator: &Elevator) {
        let shaft_x = self.layout.shaft_x(index);
        frame.push(DrawCommand::Line {
            from: Point::new(shaft_x, 0.0),
            to: Point::new(shaft_x, self.layout.height),
            color: palette::SHAFT,
            width: 1.0,
        });

        let floor = elevator.current_floor.clamp(0, self.layout.top_floor());
        if floor != elevator.current_floor {
            warn_once!(
                self.clamped_floor,
                "Car {} reports floor {}, drawing it at floor {}",
                index + 1,
                elevator.current_floor,
                floor
            );
        }

        let car = self.layout.car_rect(index, floor);
        frame.push(DrawCommand::RoundedRect {
            rect: car,
            radius: CAR_CORNER_RADIUS,
            fill: palette::CAR_BODY,
            stroke: Some(palette::CAR_BORDER),
            stroke_width: CAR_BORDER_WIDTH,
        });
        frame.push(DrawCommand::Text {
            text: (index + 1).to_string(),
            at: Point::new(shaft_x, car.center_y()),
            color: palette::CAR_TEXT,
            font: CAR_FONT,
            align: TextAlign::Center,
            baseline: Baseline::Middle,
        });

        self.draw_indicator(frame, &car, elevator);

        // Onboard passengers sit on the m + 1 divisions of the car width
        let count = elevator.passengers.len();
        for (i, destination) in elevator.passengers.iter().enumerate() {
            let cx = self.layout.onboard_x(&car, count, i);
            let cy = car.center_y();
            self.draw_marker(
                frame,
                Point::new(cx, cy - 10.0),
                Point::new(cx, cy + 5.0),
                destination.as_str(),
                palette::PASSENGER_ONBOARD,
            );
        }
    }

    fn draw_indicator(&self, frame: &mut Frame, car: &Rect, elevator: &Elevator) {
        let center = self.layout.indicator_center(car);
        let (Point { x, y }, s) = (center, INDICATOR_SIZE);
        let (shape, color) = palette::indicator(elevator.direction);

        let command = match shape {
            IndicatorShape::UpTriangle => DrawCommand::Triangle {
                points: [Point::new(x - s, y + s), Point::new(x, y - s), Point::new(x + s, y + s)],
                fill: color,
            },
            IndicatorShape::DownTriangle => DrawCommand::Triangle {
                points: [Point::new(x - s, y - s), Point::new(x, y + s), Point::new(x + s, y - s)],
                fill: color,
            },
            IndicatorShape::Dot => DrawCommand::Circle {
                center,
                radius: s / 2.0,
                fill: color,
            },
        };
        frame.push(command);
    }

    fn draw_waiting(&self, frame: &mut Frame, floor: i64, passengers: &[WaitingPassenger]) {
        let y = self.layout.row_center_y(floor);
        for (i, passenger) in passengers.iter().enumerate() {
            let cx = self.layout.queue_x(i);
            self.draw_marker(
                frame,
                Point::new(cx, y),
                Point::new(cx, y + 10.0),
                passenger.destination(),
                palette::PASSENGER_WAITING,
            );
        }
    }

    /// Dot, then a badge whose top edge is centered on `badge_top`.
    fn draw_marker(&self, frame: &mut Frame, dot: Point, badge_top: Point, label: &str, color: Color) {
        frame.push(DrawCommand::Circle {
            center: dot,
            radius: PASSENGER_DOT_RADIUS,
            fill: color,
        });
        frame.push(DrawCommand::RoundedRect {
            rect: Rect {
                x: badge_top.x - BADGE_WIDTH / 2.0,
                y: badge_top.y,
                width: BADGE_WIDTH,
                height: BADGE_HEIGHT,
            },
            radius: BADGE_RADIUS,
            fill: color,
            stroke: None,
            stroke_width: 0.0,
        });
        frame.push(DrawCommand::Text {
            text: label.to_string(),
            at: Point::new(badge_top.x, badge_top.y + 7.0),
            color: palette::CAR_TEXT,
            font: BADGE_FONT,
            align: TextAlign::Center,
            baseline: Baseline::Middle,
        });
    }
}
