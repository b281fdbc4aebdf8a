pub mod macros;
pub mod structs;

pub use structs::Direction;
pub use structs::Elevator;
pub use structs::Label;
pub use structs::Snapshot;
pub use structs::Stats;
pub use structs::WaitingPassenger;
