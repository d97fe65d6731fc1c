use log::debug;

use super::measurement::Measurement;
use super::opcodes::OpcodeTable;
use super::traits::Producer;
use crate::modbus::{Operation, ReadKind, Transform, BYTES_PER_REGISTER};
use crate::utils::error::MeterError;

/// Measurement every built-in model answers, used for probing.
pub const DEFAULT_PROBE: Measurement = Measurement::VoltageL1;

/// Turns an opcode table into read operations.
///
/// Read kind, length and transform are fixed for the whole model: vendors
/// document a single encoding per register class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationGenerator {
    opcodes: OpcodeTable,
    read_kind: ReadKind,
    register_count: u16,
    transform: Transform,
    probe: Measurement,
}

impl OperationGenerator {
    pub fn new(
        opcodes: OpcodeTable,
        read_kind: ReadKind,
        register_count: u16,
        transform: Transform,
        probe: Measurement,
    ) -> Result<Self, MeterError> {
        if register_count as usize * BYTES_PER_REGISTER != transform.byte_len() {
            return Err(MeterError::ConfigError(format!(
                "{} registers cannot carry {} ({} bytes)",
                register_count,
                transform,
                transform.byte_len()
            )));
        }

        if !opcodes.contains(probe) {
            return Err(MeterError::ConfigError(format!(
                "probe measurement {} has no opcode",
                probe
            )));
        }

        Ok(Self {
            opcodes,
            read_kind,
            register_count,
            transform,
            probe,
        })
    }

    pub fn opcodes(&self) -> &OpcodeTable {
        &self.opcodes
    }

    pub fn read_kind(&self) -> ReadKind {
        self.read_kind
    }

    pub fn register_count(&self) -> u16 {
        self.register_count
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn probe_measurement(&self) -> Measurement {
        self.probe
    }

    fn snip(&self, measurement: Measurement, address: u16) -> Operation {
        Operation {
            read_kind: self.read_kind,
            address,
            register_count: self.register_count,
            measurement,
            transform: self.transform,
        }
    }

    pub fn operation(&self, measurement: Measurement) -> Option<Operation> {
        self.opcodes
            .address(measurement)
            .map(|address| self.snip(measurement, address))
    }

    pub fn probe(&self) -> Operation {
        // Presence checked in new()
        let address = self.opcodes.address(self.probe).unwrap_or_default();
        self.snip(self.probe, address)
    }

    pub fn produce(&self) -> Vec<Operation> {
        let mut operations: Vec<Operation> = self
            .opcodes
            .iter()
            .map(|(measurement, address)| self.snip(measurement, address))
            .collect();

        operations.sort_by_key(|op| (op.address, op.measurement.code()));
        debug!("Generated {} operations", operations.len());
        operations
    }
}

/// Standard producer: a model description plus its generator.
#[derive(Debug, Clone)]
pub struct MeterProducer {
    description: &'static str,
    generator: OperationGenerator,
}

impl MeterProducer {
    pub fn new(description: &'static str, generator: OperationGenerator) -> Self {
        Self {
            description,
            generator,
        }
    }

    pub fn generator(&self) -> &OperationGenerator {
        &self.generator
    }
}

impl Producer for MeterProducer {
    fn description(&self) -> &str {
        self.description
    }

    fn probe(&self) -> Operation {
        self.generator.probe()
    }

    fn produce(&self) -> Vec<Operation> {
        self.generator.produce()
    }

    fn opcodes(&self) -> &OpcodeTable {
        self.generator.opcodes()
    }

    fn probe_measurement(&self) -> Measurement {
        self.generator.probe_measurement()
    }

    fn operation(&self, measurement: Measurement) -> Option<Operation> {
        self.generator.operation(measurement)
    }
}
