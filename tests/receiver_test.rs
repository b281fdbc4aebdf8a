use crossbeam_channel::{unbounded, RecvTimeoutError};
use elevator_viewer::config::{NetworkConfig, StatsConfig};
use elevator_viewer::display::{MemorySlots, RecordingSurface};
use elevator_viewer::network::StateReceiver;
use elevator_viewer::render::frame::Color;
use elevator_viewer::render::{palette, DrawCommand, Frame, StatsUpdater};
use elevator_viewer::{Controller, Layout, Renderer, Snapshot};
use std::io::Write;
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

fn network_config(address: String) -> NetworkConfig {
    NetworkConfig {
        server_address: address,
        event: "update".to_string(),
        max_retries: 1,
        retry_delay: 20,
    }
}

fn dots(frame: &Frame, color: Color) -> usize {
    frame
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Circle { fill, .. } if *fill == color))
        .count()
}

/// Serves `lines` to the first client, then closes both the connection
/// and the listener so a reconnect is refused.
fn serve_once(lines: Vec<String>) -> (String, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap().to_string();
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        for line in lines {
            stream.write_all(line.as_bytes()).unwrap();
            stream.write_all(b"\n").unwrap();
        }
        stream.flush().unwrap();
    });
    (address, server)
}

#[test]
fn receiver_forwards_snapshots_in_order() {
    // Arrange
    let (address, server) = serve_once(vec![
        r#"{"event":"connect","data":{}}"#.to_string(),
        r#"{"event":"update","data":{"elevators":[{"current_floor":1,"direction":"up","passengers":[]}],"queues":{}}}"#.to_string(),
        r#"not json"#.to_string(),
        r#"{"event":"update","data":{"elevators":[{"current_floor":2,"direction":"up","passengers":[]}],"queues":{}}}"#.to_string(),
    ]);
    let (snapshot_tx, snapshot_rx) = unbounded::<Snapshot>();

    // Act
    let _receiver = StateReceiver::new(&network_config(address), snapshot_tx).unwrap();

    // Assert
    let first = snapshot_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    let second = snapshot_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(first.elevators[0].current_floor, 1);
    assert_eq!(second.elevators[0].current_floor, 2);
    server.join().unwrap();

    // Reconnect is refused and the receiver gives up
    assert_eq!(
        snapshot_rx.recv_timeout(Duration::from_secs(5)).unwrap_err(),
        RecvTimeoutError::Disconnected
    );
}

#[test]
fn receiver_gives_up_without_server() {
    let address = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().to_string()
    };
    let (snapshot_tx, snapshot_rx) = unbounded::<Snapshot>();

    let _receiver = StateReceiver::new(&network_config(address), snapshot_tx).unwrap();

    assert_eq!(
        snapshot_rx.recv_timeout(Duration::from_secs(5)).unwrap_err(),
        RecvTimeoutError::Disconnected
    );
}

#[test]
fn snapshots_from_the_wire_are_rendered() {
    // Arrange
    let (address, server) = serve_once(vec![
        r#"{"event":"update","data":{"elevators":[{"current_floor":0,"direction":"idle","passengers":[]}],"queues":{"3":["3->1"]},"stats":{"total_passengers_served":1,"average_wait_time":2.0,"average_journey_time":3.0}}}"#.to_string(),
        r#"{"event":"update","data":{"elevators":[{"current_floor":1,"direction":"up","passengers":[1,4]}],"queues":{},"stats":null}}"#.to_string(),
    ]);
    let (snapshot_tx, snapshot_rx) = unbounded::<Snapshot>();
    let (_terminate_tx, terminate_rx) = unbounded::<()>();
    let stats = StatsUpdater::new(
        MemorySlots::new(["totalServed", "avgWait", "avgJourney"]),
        &StatsConfig::default(),
    )
    .unwrap();
    let mut controller = Controller::new(
        Renderer::new(Layout::new(800.0, 600.0, 10, 3)),
        RecordingSurface::new(800.0, 600.0),
        stats,
        snapshot_rx,
        terminate_rx,
    );
    let _receiver = StateReceiver::new(&network_config(address), snapshot_tx).unwrap();

    // Act: runs until the receiver gives up after the server goes away
    controller.run();
    server.join().unwrap();

    // Assert
    assert_eq!(controller.frames_rendered(), 2);
    let frame = controller.surface().last_frame().unwrap();
    assert_eq!(dots(frame, palette::PASSENGER_ONBOARD), 2);
    assert_eq!(dots(frame, palette::PASSENGER_WAITING), 0);
    assert_eq!(controller.slots().get("totalServed"), Some("1"));
    assert_eq!(controller.slots().get("avgWait"), Some("2.0 s"));
}
