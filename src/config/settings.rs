use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::devices::ProducerRegistry;
use crate::utils::error::MeterError;

/// Highest unicast address on a Modbus RTU bus.
pub const MAX_BUS_ADDRESS: u8 = 247;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Connection settings, handed through to the transport
    #[serde(default)]
    pub bus: BusConfig,

    // Device configuration
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    pub adapter: String,                // Serial device or host:port
    pub baud_rate: u32,
    pub parity: ParityConfig,
    pub timeout_ms: u64,
    pub update_interval_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParityConfig {
    None,
    Even,
    Odd,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub model: String,                  // Registered model name, e.g. SDM630
    pub address: u8,                    // Modbus address
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            adapter: "/dev/ttyUSB0".to_string(),
            baud_rate: 9600,
            parity: ParityConfig::None,
            timeout_ms: 1000,
            update_interval_seconds: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bus: BusConfig::default(),
            devices: vec![DeviceConfig {
                model: "SDM630".to_string(),
                address: 1,
                name: Some("Main meter".to_string()),
                enabled: true,
            }],
        }
    }
}

impl DeviceConfig {
    pub fn new(model: &str, address: u8) -> Self {
        Self {
            model: model.trim().to_string(),
            address,
            name: None,
            enabled: true,
        }
    }

    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("{}@{}", self.model, self.address),
        }
    }
}

/// Parses the `MODEL:address` device notation, e.g. `SDM630:1`.
impl FromStr for DeviceConfig {
    type Err = MeterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (model, address) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| MeterError::ConfigError(format!("invalid device '{}', expected MODEL:ADDRESS", s)))?;

        if model.trim().is_empty() {
            return Err(MeterError::ConfigError(format!("invalid device '{}', missing model", s)));
        }

        let address = address
            .trim()
            .parse::<u8>()
            .map_err(|e| MeterError::ConfigError(format!("invalid address in '{}': {}", s, e)))?;

        Ok(DeviceConfig::new(model, address))
    }
}

impl fmt::Display for DeviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.model, self.address)
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MeterError> {
        info!("📄 Loading configuration from {}", path.as_ref().display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, MeterError> {
        let config: Config = toml::from_str(content)?;
        debug!("Parsed configuration with {} devices", config.devices.len());
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), MeterError> {
        // Create directory if it doesn't exist
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Replace the device list with a comma separated `MODEL:address` list.
    pub fn with_devices(mut self, devices: &str) -> Result<Self, MeterError> {
        self.devices = devices
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse::<DeviceConfig>())
            .collect::<Result<Vec<_>, MeterError>>()?;
        Ok(self)
    }

    // Get list of enabled devices
    pub fn enabled_devices(&self) -> Vec<&DeviceConfig> {
        self.devices.iter().filter(|d| d.enabled).collect()
    }

    pub fn device_by_address(&self, address: u8) -> Option<&DeviceConfig> {
        self.devices.iter().find(|d| d.address == address)
    }

    /// Check addresses and that every enabled device names a known model.
    pub fn validate(&self, registry: &ProducerRegistry) -> Result<(), MeterError> {
        let mut seen = HashSet::new();

        for device in &self.devices {
            if !device.enabled {
                warn!("⏸️  Device {} is disabled", device.display_name());
                continue;
            }

            if device.address == 0 || device.address > MAX_BUS_ADDRESS {
                return Err(MeterError::ConfigError(format!(
                    "device {}: address {} outside 1-{}",
                    device.display_name(),
                    device.address,
                    MAX_BUS_ADDRESS
                )));
            }

            if !seen.insert(device.address) {
                return Err(MeterError::ConfigError(format!(
                    "duplicate bus address {}",
                    device.address
                )));
            }

            if !registry.contains(&device.model) {
                return Err(MeterError::UnsupportedModel(device.model.clone()));
            }
        }

        Ok(())
    }
}
