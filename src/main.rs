/* 3rd party libraries */
use clap::Parser;
use crossbeam_channel as cbc;
use log::info;
use std::path::PathBuf;

/* Custom libraries */
use elevator_viewer::config::{self, Backend, LayoutConfig};
use elevator_viewer::display::{CellGrid, MemorySlots, RecordingSurface, Surface, TerminalSlots, TerminalSurface, TextSlots};
use elevator_viewer::network::StateReceiver;
use elevator_viewer::render::StatsUpdater;
use elevator_viewer::unwrap_or_exit;
use elevator_viewer::{Controller, Layout, Renderer, Snapshot};

/// Renders a live elevator-bank simulation from its state snapshots.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to the TOML configuration file
    #[clap(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Record frames instead of drawing on the terminal
    #[clap(long)]
    headless: bool,
}

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // Load the configuration
    let mut config = unwrap_or_exit!(config::load_config(&args.config), "Failed to load configuration");
    if args.headless {
        config.display.backend = Backend::Headless;
    }

    let layout = Layout::new(
        config.layout.width,
        config.layout.height,
        config.layout.n_floors,
        config.layout.n_elevators,
    );

    // Initialize channels
    let (snapshot_tx, snapshot_rx) = cbc::unbounded::<Snapshot>();
    let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();

    unwrap_or_exit!(
        ctrlc::set_handler(move || {
            let _ = terminate_tx.send(());
        }),
        "Failed to install Ctrl+C handler"
    );

    // Start the network module
    let _receiver = unwrap_or_exit!(
        StateReceiver::new(&config.network, snapshot_tx),
        "Failed to start state receiver"
    );
    info!(
        "Subscribed to {:?} on {}",
        config.network.event, config.network.server_address
    );

    // Slots are resolved before the surface takes over the screen
    match config.display.backend {
        Backend::Terminal => {
            let (_, rows) = CellGrid::dimensions(
                layout.width,
                layout.height,
                config.display.cell_width,
                config.display.cell_height,
            );
            let slots = TerminalSlots::under_grid(&config.display.slots, rows);
            let stats = unwrap_or_exit!(StatsUpdater::new(slots, &config.stats), "Missing display slot");
            let slot_rows = TerminalSlots::reserved_rows(&config.display.slots);
            let surface = unwrap_or_exit!(
                TerminalSurface::new(&config.display, &layout, slot_rows),
                "No drawing surface"
            );
            start(&config.layout, surface, stats, snapshot_rx, terminate_rx);
        }
        Backend::Headless => {
            let slots = MemorySlots::new(config.display.slots.iter().map(|slot| slot.id.clone()));
            let stats = unwrap_or_exit!(StatsUpdater::new(slots, &config.stats), "Missing display slot");
            let surface = match &config.display.frame_dump {
                Some(path) => unwrap_or_exit!(
                    RecordingSurface::with_dump(layout.width, layout.height, path),
                    "Failed to open frame dump"
                ),
                None => RecordingSurface::new(layout.width, layout.height),
            };
            start(&config.layout, surface, stats, snapshot_rx, terminate_rx);
        }
    }
}

fn start<S: Surface, T: TextSlots>(
    building: &LayoutConfig,
    surface: S,
    stats: StatsUpdater<T>,
    snapshot_rx: cbc::Receiver<Snapshot>,
    terminate_rx: cbc::Receiver<()>,
) {
    // The surface size is read once; the layout never changes afterwards
    let (width, height) = surface.size();
    let layout = Layout::new(width, height, building.n_floors, building.n_elevators);

    // Start the controller on this thread; it owns the surface
    let mut controller = Controller::new(Renderer::new(layout), surface, stats, snapshot_rx, terminate_rx);
    controller.run();
}
