pub mod error;

pub use error::MeterError;
