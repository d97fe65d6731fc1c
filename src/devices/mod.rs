pub mod generator;
pub mod measurement;
pub mod models;
pub mod opcodes;
pub mod registry;
pub mod traits;

pub use generator::{MeterProducer, OperationGenerator, DEFAULT_PROBE};
pub use measurement::{Measurement, Unit};
pub use opcodes::OpcodeTable;
pub use registry::{ProducerConstructor, ProducerRegistry};
pub use traits::Producer;
