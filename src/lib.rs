//! Modbus smart meter register maps
//!
//! This library describes how to read electrical measurements from smart
//! meters over Modbus: each supported device model declares which
//! measurements it exposes and at which registers, and the crate turns that
//! into read operations and decoders. Talking to the bus is left to the
//! caller.

pub mod cli;
pub mod config;
pub mod devices;
pub mod modbus;
pub mod output;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, DeviceConfig};
pub use devices::{Measurement, MeterProducer, OpcodeTable, OperationGenerator, Producer, ProducerRegistry};
pub use modbus::{Operation, ReadKind, Reading, Transform};
pub use output::{ConsoleFormatter, CsvFormatter, JsonFormatter, PlanFormatter};
pub use services::PlanService;
pub use utils::error::MeterError;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
