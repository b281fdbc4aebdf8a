/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/***************************************/
/*             Constants               */
/***************************************/
pub const PASSENGER_DELIMITER: &str = "->";

/***************************************/
/*       Public data structures        */
/***************************************/

/// Travel intent of a car. Closed over three values; anything the
/// simulation sends that is not recognisably up or down becomes `Idle`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(from = "Value", rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    #[default]
    Idle,
}

impl From<Value> for Direction {
    fn from(value: Value) -> Self {
        match value {
            Value::String(tag) => match tag.trim().to_ascii_lowercase().as_str() {
                "up" => Direction::Up,
                "down" => Direction::Down,
                "idle" => Direction::Idle,
                _ => {
                    warn!("Unrecognized direction tag {:?}, rendering as idle", tag);
                    Direction::Idle
                }
            },
            // The simulation's native encoding: 1 up, -1 down, 0 stopped
            Value::Number(n) => match n.as_i64() {
                Some(1) => Direction::Up,
                Some(-1) => Direction::Down,
                Some(0) => Direction::Idle,
                _ => {
                    warn!("Unrecognized direction code {}, rendering as idle", n);
                    Direction::Idle
                }
            },
            other => {
                warn!("Unrecognized direction value {}, rendering as idle", other);
                Direction::Idle
            }
        }
    }
}

/// A destination label shown on an onboard-passenger badge.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "Value")]
pub struct Label(pub String);

impl From<Value> for Label {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Label(s),
            other => Label(other.to_string()),
        }
    }
}

impl Label {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A queued passenger, carried in its wire encoding `"<origin>-><destination>"`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "Value")]
pub struct WaitingPassenger(pub String);

impl From<Value> for WaitingPassenger {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => WaitingPassenger(s),
            other => WaitingPassenger(other.to_string()),
        }
    }
}

impl WaitingPassenger {
    pub fn new<S: Into<String>>(encoded: S) -> WaitingPassenger {
        WaitingPassenger(encoded.into())
    }

    /// Destination half of the encoding, or `""` unless the delimiter
    /// occurs exactly once.
    pub fn destination(&self) -> &str {
        self.split().map(|(_, dest)| dest).unwrap_or("")
    }

    pub fn origin(&self) -> &str {
        self.split().map(|(origin, _)| origin).unwrap_or("")
    }

    fn split(&self) -> Option<(&str, &str)> {
        let mut parts = self.0.split(PASSENGER_DELIMITER);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(origin), Some(dest), None) => Some((origin, dest)),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Elevator {
    pub current_floor: i64,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub passengers: Vec<Label>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Stats {
    pub total_passengers_served: u64,
    pub average_wait_time: f64,
    pub average_journey_time: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    #[serde(default)]
    pub elevators: Vec<Elevator>,
    #[serde(default)]
    pub queues: BTreeMap<String, Vec<WaitingPassenger>>,
    #[serde(default, deserialize_with = "lenient_stats")]
    pub stats: Option<Stats>,
}

/***************************************/
/*             Public API              */
/***************************************/
impl Elevator {
    pub fn new(current_floor: i64, direction: Direction, passengers: &[&str]) -> Elevator {
        Elevator {
            current_floor,
            direction,
            passengers: passengers.iter().map(|p| Label(p.to_string())).collect(),
        }
    }
}

impl Snapshot {
    /// Queue rows keyed by numeric floor, ascending. Keys that are not
    /// integers are skipped.
    pub fn queue_floors(&self) -> Vec<(i64, &[WaitingPassenger])> {
        let mut floors: Vec<(i64, &[WaitingPassenger])> = self
            .queues
            .iter()
            .filter_map(|(key, passengers)| match key.trim().parse::<i64>() {
                Ok(floor) => Some((floor, passengers.as_slice())),
                Err(_) => {
                    warn!("Skipping queue with non-numeric floor key {:?}", key);
                    None
                }
            })
            .collect();
        floors.sort_by_key(|(floor, _)| *floor);
        floors
    }
}

/// A stats object that does not decode is reported and treated as absent,
/// so one bad field never discards the rest of the snapshot.
fn lenient_stats<'de, D>(deserializer: D) -> Result<Option<Stats>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(value) => match serde_json::from_value::<Stats>(value) {
            Ok(stats) => Ok(Some(stats)),
            Err(e) => {
                warn!("Ignoring malformed stats: {}", e);
                Ok(None)
            }
        },
    }
}
