/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub network: NetworkConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub stats: StatsConfig,
}

#[derive(Deserialize, Clone, Debug)]
pub struct NetworkConfig {
    pub server_address: String,
    #[serde(default = "default_event")]
    pub event: String,
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64,
}

#[derive(Deserialize, Clone, Debug)]
pub struct LayoutConfig {
    pub n_floors: u32,
    pub n_elevators: usize,
    pub width: f64,
    pub height: f64,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Terminal,
    Headless,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct SlotConfig {
    pub id: String,
    pub label: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DisplayConfig {
    #[serde(default = "default_backend")]
    pub backend: Backend,
    #[serde(default = "default_cell_width")]
    pub cell_width: f64,
    #[serde(default = "default_cell_height")]
    pub cell_height: f64,
    #[serde(default)]
    pub frame_dump: Option<String>,
    #[serde(default = "default_slots")]
    pub slots: Vec<SlotConfig>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct StatsConfig {
    pub served_slot: String,
    pub wait_slot: String,
    pub journey_slot: String,
}

#[derive(Debug)]
pub enum ConfigError {
    Read(io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

/***************************************/
/*              Defaults               */
/***************************************/
fn default_event() -> String {
    "update".to_string()
}

fn default_retry_delay() -> u64 {
    1000
}

fn default_backend() -> Backend {
    Backend::Terminal
}

fn default_cell_width() -> f64 {
    8.0
}

fn default_cell_height() -> f64 {
    16.0
}

fn default_slots() -> Vec<SlotConfig> {
    vec![
        SlotConfig { id: "totalServed".into(), label: "Passengers served".into() },
        SlotConfig { id: "avgWait".into(), label: "Average wait".into() },
        SlotConfig { id: "avgJourney".into(), label: "Average journey".into() },
    ]
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            n_floors: 10,
            n_elevators: 3,
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            backend: default_backend(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            frame_dump: None,
            slots: default_slots(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        StatsConfig {
            served_slot: "totalServed".into(),
            wait_slot: "avgWait".into(),
            journey_slot: "avgJourney".into(),
        }
    }
}

/***************************************/
/*          Error conversions          */
/***************************************/
impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(e) => write!(f, "failed to read configuration file: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse configuration file: {}", e),
            ConfigError::Invalid(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Read(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/***************************************/
/*             Public API              */
/***************************************/
impl Config {
    /// Rejects layouts the renderer cannot draw. Called once at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.network.server_address.trim().is_empty() {
            return Err(ConfigError::Invalid("network.server_address is empty".into()));
        }
        if self.layout.n_floors == 0 {
            return Err(ConfigError::Invalid("layout.n_floors must be at least 1".into()));
        }
        if self.layout.n_elevators == 0 {
            return Err(ConfigError::Invalid("layout.n_elevators must be at least 1".into()));
        }
        if !(self.layout.width > 0.0 && self.layout.height > 0.0) {
            return Err(ConfigError::Invalid("layout.width and layout.height must be positive".into()));
        }
        if !(self.display.cell_width > 0.0 && self.display.cell_height > 0.0) {
            return Err(ConfigError::Invalid("display cell size must be positive".into()));
        }
        Ok(())
    }
}

pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path)?;
    parse_config(&config_str)
}

/***************************************/
/*             Unit tests              */
/***************************************/
