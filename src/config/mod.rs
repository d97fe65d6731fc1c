pub mod settings;

pub use settings::{BusConfig, Config, DeviceConfig, ParityConfig, MAX_BUS_ADDRESS};
