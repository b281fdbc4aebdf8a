/*
 * Unit tests for the render module
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_shaft_positions
 * - test_car_center_decreases_with_floor
 * - test_render_is_idempotent
 * - test_floor_grid
 * - test_onboard_markers
 * - test_direction_indicators
 * - test_waiting_passengers
 * - test_empty_queues
 * - test_count_mismatch
 * - test_mismatch_warned_once
 * - test_stats_formatting
 * - test_stats_updater
 * - test_non_finite_frame_is_rejected
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod render_tests {
    use crate::config::StatsConfig;
    use crate::display::{MemorySlots, SlotError};
    use crate::render::frame::{DrawCommand, Point, RenderError};
    use crate::render::palette;
    use crate::render::{format_stats, Frame, Layout, Renderer, StatsUpdater};
    use crate::shared::{Direction, Elevator, Snapshot, Stats, WaitingPassenger};
    use serde_json::json;

    fn layout() -> Layout {
        Layout::new(800.0, 600.0, 10, 3)
    }

    fn renderer() -> Renderer {
        Renderer::new(layout())
    }

    fn snapshot(elevators: Vec<Elevator>) -> Snapshot {
        Snapshot {
            elevators,
            ..Default::default()
        }
    }

    fn triangles(frame: &Frame) -> Vec<[Point; 3]> {
        frame
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Triangle { points, .. } => Some(*points),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_shaft_positions() {
        let layout = layout();

        assert_eq!(layout.shaft_x(0), 200.0);
        assert_eq!(layout.shaft_x(1), 400.0);
        assert_eq!(layout.shaft_x(2), 600.0);
    }

    #[test]
    fn test_car_center_decreases_with_floor() {
        let layout = layout();

        assert_eq!(layout.floor_height(), 60.0);
        assert_eq!(layout.car_center_y(0), 570.0);
        assert_eq!(layout.car_center_y(9), 30.0);
        for floor in 0..9 {
            assert!(layout.car_center_y(floor + 1) < layout.car_center_y(floor));
        }

        let car = layout.car_rect(1, 3);
        assert_eq!(car.x, 375.0);
        assert_eq!(car.width, 50.0);
        assert!((car.height - 42.0).abs() < 1e-9);
        assert!((car.center_y() - layout.car_center_y(3)).abs() < 1e-9);
    }

    #[test]
    fn test_render_is_idempotent() {
        // Arrange
        let payload = json!({
            "elevators": [
                { "current_floor": 3, "direction": "up", "passengers": ["7", "1"] },
                { "current_floor": 8, "direction": "down", "passengers": [] },
                { "current_floor": 0, "direction": "idle", "passengers": ["5"] }
            ],
            "queues": { "0": ["0->4", "0->9"], "5": ["5->2"] },
            "stats": { "total_passengers_served": 3, "average_wait_time": 1.0,
                       "average_journey_time": 2.0 }
        });
        let snapshot: Snapshot = serde_json::from_value(payload).unwrap();
        let renderer = renderer();

        // Act
        let first = renderer.render(&snapshot).unwrap();
        let second = renderer.render(&snapshot).unwrap();

        // Assert
        assert_eq!(first, second);
    }

    #[test]
    fn test_floor_grid() {
        let frame = renderer().render(&Snapshot::default()).unwrap();

        assert!(matches!(frame.commands[0], DrawCommand::Clear { color } if color == palette::BACKGROUND));

        let floor_lines: Vec<f64> = frame
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, color, .. } if *color == palette::FLOOR_LINE => Some(from.y),
                _ => None,
            })
            .collect();
        assert_eq!(floor_lines.len(), 11);
        assert_eq!(floor_lines[0], 600.0);
        assert_eq!(floor_lines[10], 0.0);

        let texts = frame.texts();
        assert_eq!(texts.first(), Some(&"Floor 0"));
        assert!(texts.contains(&"Floor 10"));
    }

    #[test]
    fn test_onboard_markers() {
        // Arrange
        let empty = snapshot(vec![Elevator::new(2, Direction::Idle, &[])]);
        let full = snapshot(vec![Elevator::new(2, Direction::Idle, &["3", "6", "9"])]);

        // Act
        let empty_frame = renderer().render(&empty).unwrap();
        let full_frame = renderer().render(&full).unwrap();

        // Assert
        assert!(empty_frame.circles_filled(palette::PASSENGER_ONBOARD).is_empty());

        let xs: Vec<f64> = full_frame
            .circles_filled(palette::PASSENGER_ONBOARD)
            .iter()
            .map(|p| p.x)
            .collect();
        assert_eq!(xs, vec![187.5, 200.0, 212.5]);

        let texts = full_frame.texts();
        let labels: Vec<&str> = texts.iter().rev().take(3).rev().cloned().collect();
        assert_eq!(labels, vec!["3", "6", "9"]);
        assert!(texts.contains(&"1"));
    }

    #[test]
    fn test_direction_indicators() {
        // Arrange
        let payload = json!({
            "elevators": [
                { "current_floor": 1, "direction": "up", "passengers": [] },
                { "current_floor": 1, "direction": "down", "passengers": [] },
                { "current_floor": 1, "direction": "sideways", "passengers": [] }
            ]
        });
        let snapshot: Snapshot = serde_json::from_value(payload).unwrap();

        // Act
        let frame = renderer().render(&snapshot).unwrap();

        // Assert
        let triangles = triangles(&frame);
        assert_eq!(triangles.len(), 2);

        let up = triangles[0];
        assert!(up[1].y < up[0].y && up[1].y < up[2].y);
        let down = triangles[1];
        assert!(down[1].y > down[0].y && down[1].y > down[2].y);

        let idle = frame.circles_filled(palette::INDICATOR_IDLE);
        assert_eq!(idle.len(), 1);
        assert_eq!(idle[0].x, 600.0);

        let car = layout().car_rect(2, 1);
        assert_eq!(idle[0].y, car.y - 15.0);
    }

    #[test]
    fn test_waiting_passengers() {
        // Arrange
        let mut snapshot = Snapshot::default();
        snapshot.queues.insert(
            "2".into(),
            vec![
                WaitingPassenger::new("2->7"),
                WaitingPassenger::new("2"),
                WaitingPassenger::new("2->0"),
            ],
        );

        // Act
        let frame = renderer().render(&snapshot).unwrap();

        // Assert
        let dots = frame.circles_filled(palette::PASSENGER_WAITING);
        let xs: Vec<f64> = dots.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![100.0, 120.0, 140.0]);
        assert!(dots.iter().all(|p| p.y == layout().row_center_y(2)));
        assert_eq!(layout().row_center_y(2), 450.0);

        let texts = frame.texts();
        let labels: Vec<&str> = texts.iter().rev().take(3).rev().cloned().collect();
        assert_eq!(labels, vec!["7", "", "0"]);
    }

    #[test]
    fn test_empty_queues() {
        let payload = json!({
            "elevators": [{ "current_floor": 0, "direction": "idle", "passengers": [] }],
            "queues": {}
        });
        let snapshot: Snapshot = serde_json::from_value(payload).unwrap();

        let frame = renderer().render(&snapshot).unwrap();

        assert!(frame.circles_filled(palette::PASSENGER_WAITING).is_empty());
    }

    #[test]
    fn test_count_mismatch() {
        // Arrange: four cars for three shafts, one car below the ground
        // floor, one queue above the roof
        let mut snapshot = snapshot(vec![
            Elevator::new(-2, Direction::Idle, &[]),
            Elevator::new(12, Direction::Idle, &[]),
            Elevator::new(4, Direction::Idle, &[]),
            Elevator::new(4, Direction::Idle, &[]),
        ]);
        snapshot.queues.insert("10".into(), vec![WaitingPassenger::new("10->1")]);
        snapshot.queues.insert("-1".into(), vec![WaitingPassenger::new("-1->1")]);

        // Act
        let frame = renderer().render(&snapshot).unwrap();

        // Assert
        let cars: Vec<f64> = frame
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::RoundedRect { rect, fill, .. } if *fill == palette::CAR_BODY => Some(rect.center_y()),
                _ => None,
            })
            .collect();
        assert_eq!(cars.len(), 3);
        assert!((cars[0] - layout().car_center_y(0)).abs() < 1e-9);
        assert!((cars[1] - layout().car_center_y(9)).abs() < 1e-9);
        assert!(frame.circles_filled(palette::PASSENGER_WAITING).is_empty());
    }

    #[test]
    fn test_mismatch_warned_once() {
        // Arrange
        let renderer = renderer();
        let matching = snapshot(vec![Elevator::new(2, Direction::Up, &[])]);
        let mut mismatched = snapshot(vec![
            Elevator::new(15, Direction::Idle, &[]),
            Elevator::new(0, Direction::Idle, &[]),
            Elevator::new(0, Direction::Idle, &[]),
            Elevator::new(0, Direction::Idle, &[]),
        ]);
        mismatched.queues.insert("11".into(), vec![WaitingPassenger::new("11->0")]);

        // Act
        renderer.render(&matching).unwrap();
        let untouched = (
            renderer.extra_elevators.first(),
            renderer.clamped_floor.first(),
            renderer.queue_outside.first(),
        );
        let renderer = Renderer::new(layout());
        let first = renderer.render(&mismatched).unwrap();
        let second = renderer.render(&mismatched).unwrap();

        // Assert: latches are armed by the first mismatched frame only
        assert_eq!(untouched, (true, true, true));
        assert!(!renderer.extra_elevators.first());
        assert!(!renderer.clamped_floor.first());
        assert!(!renderer.queue_outside.first());
        assert_eq!(first, second);
    }

    #[test]
    fn test_stats_formatting() {
        let stats = Stats {
            total_passengers_served: 42,
            average_wait_time: 12.34,
            average_journey_time: 9.0,
        };

        let text = format_stats(&stats);

        assert_eq!(text.served, "42");
        assert_eq!(text.wait, "12.3 s");
        assert_eq!(text.journey, "9.0 s");

        // Halfway values round up
        let ties = Stats {
            total_passengers_served: 0,
            average_wait_time: 12.25,
            average_journey_time: 0.25,
        };
        let text = format_stats(&ties);
        assert_eq!(text.wait, "12.3 s");
        assert_eq!(text.journey, "0.3 s");

        let ties = Stats {
            total_passengers_served: 0,
            average_wait_time: 3.75,
            average_journey_time: 2.5,
        };
        let text = format_stats(&ties);
        assert_eq!(text.wait, "3.8 s");
        assert_eq!(text.journey, "2.5 s");
    }

    #[test]
    fn test_stats_updater() {
        // A missing slot is a startup failure
        let missing = StatsUpdater::new(MemorySlots::new(["totalServed", "avgWait"]), &StatsConfig::default());
        assert!(matches!(missing, Err(SlotError::Missing(id)) if id == "avgJourney"));

        let mut updater = StatsUpdater::new(
            MemorySlots::new(["totalServed", "avgWait", "avgJourney"]),
            &StatsConfig::default(),
        )
        .unwrap();
        let stats = Stats {
            total_passengers_served: 7,
            average_wait_time: 0.04,
            average_journey_time: 100.0,
        };

        updater.update(Some(&stats)).unwrap();
        updater.update(None).unwrap();

        assert_eq!(updater.slots().get("totalServed"), Some("7"));
        assert_eq!(updater.slots().get("avgWait"), Some("0.0 s"));
        assert_eq!(updater.slots().get("avgJourney"), Some("100.0 s"));
    }

    #[test]
    fn test_non_finite_frame_is_rejected() {
        let mut frame = Frame::new(800.0, 600.0);
        frame.push(DrawCommand::Clear {
            color: palette::BACKGROUND,
        });
        frame.push(DrawCommand::Circle {
            center: Point::new(f64::NAN, 1.0),
            radius: 6.0,
            fill: palette::PASSENGER_WAITING,
        });

        assert_eq!(frame.validate(), Err(RenderError::NonFinite { command: 1 }));
    }
}
