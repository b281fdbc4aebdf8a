/***************************************/
/*           Local modules             */
/***************************************/
use super::frame::{Point, Rect};

/***************************************/
/*             Constants               */
/***************************************/
pub const CAR_WIDTH: f64 = 50.0;
pub const CAR_CORNER_RADIUS: f64 = 6.0;
pub const CAR_HEIGHT_RATIO: f64 = 0.7;
pub const CAR_BORDER_WIDTH: f64 = 2.0;

pub const INDICATOR_SIZE: f64 = 8.0;
pub const INDICATOR_OFFSET: f64 = 15.0;

pub const PASSENGER_DOT_RADIUS: f64 = 6.0;
pub const BADGE_WIDTH: f64 = 20.0;
pub const BADGE_HEIGHT: f64 = 15.0;
pub const BADGE_RADIUS: f64 = 4.0;

pub const FLOOR_LABEL_X: f64 = 20.0;
pub const FLOOR_LABEL_OFFSET: f64 = 10.0;

pub const QUEUE_START_X: f64 = 100.0;
pub const QUEUE_SPACING: f64 = 20.0;

/**
 * Pixel geometry of the building for a fixed surface size.
 *
 * Floor 0 sits at the bottom of the surface, so every floor-to-y mapping
 * inverts the axis. Shafts are spread uniformly over the width.
 *
 * # Fields
 * - `width`, `height`:  Surface size in pixels, queried once at startup.
 * - `n_floors`:         Number of floor rows; `n_floors + 1` lines are drawn.
 * - `n_elevators`:      Number of shafts the width is divided between.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub n_floors: u32,
    pub n_elevators: usize,
}

impl Layout {
    pub fn new(width: f64, height: f64, n_floors: u32, n_elevators: usize) -> Layout {
        Layout {
            width,
            height,
            n_floors,
            n_elevators,
        }
    }

    pub fn floor_height(&self) -> f64 {
        self.height / self.n_floors as f64
    }

    /// y of the line under floor `floor`.
    pub fn floor_line_y(&self, floor: u32) -> f64 {
        self.height - floor as f64 * self.floor_height()
    }

    pub fn shaft_spacing(&self) -> f64 {
        self.width / (self.n_elevators + 1) as f64
    }

    pub fn shaft_x(&self, index: usize) -> f64 {
        self.shaft_spacing() * (index + 1) as f64
    }

    pub fn car_center_y(&self, floor: i64) -> f64 {
        self.height - (floor as f64 + 0.5) * self.floor_height()
    }

    pub fn car_height(&self) -> f64 {
        self.floor_height() * CAR_HEIGHT_RATIO
    }

    pub fn car_rect(&self, index: usize, floor: i64) -> Rect {
        let car_height = self.car_height();
        Rect {
            x: self.shaft_x(index) - CAR_WIDTH / 2.0,
            y: self.car_center_y(floor) - car_height / 2.0,
            width: CAR_WIDTH,
            height: car_height,
        }
    }

    /// Center of the band between the floor's line and the one above it.
    pub fn row_center_y(&self, floor: i64) -> f64 {
        self.height - floor as f64 * self.floor_height() - self.floor_height() / 2.0
    }

    pub fn indicator_center(&self, car: &Rect) -> Point {
        Point::new(car.center_x(), car.y - INDICATOR_OFFSET)
    }

    /// x of onboard passenger `i` of `count`, on the `count + 1` equal
    /// divisions of the car width.
    pub fn onboard_x(&self, car: &Rect, count: usize, i: usize) -> f64 {
        let spacing = car.width / (count + 1) as f64;
        car.x + spacing * (i + 1) as f64
    }

    pub fn queue_x(&self, i: usize) -> f64 {
        QUEUE_START_X + i as f64 * QUEUE_SPACING
    }

    /// Highest floor a car can be drawn on.
    pub fn top_floor(&self) -> i64 {
        self.n_floors as i64 - 1
    }
}
