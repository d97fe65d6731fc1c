use crate::devices::generator::{MeterProducer, OperationGenerator, DEFAULT_PROBE};
use crate::devices::measurement::Measurement::*;
use crate::devices::opcodes::OpcodeTable;
use crate::devices::traits::Producer;
use crate::modbus::{ReadKind, Transform};
use crate::utils::error::MeterError;

pub const NAME: &str = "JANITZA";
const DESCRIPTION: &str = "Janitza B23-312-10J";

/// Janitza B23. Values live in holding registers as big-endian floats.
pub fn producer() -> Result<Box<dyn Producer>, MeterError> {
    let opcodes = OpcodeTable::from([
        (VoltageL1, 0x4A38),
        (VoltageL2, 0x4A3A),
        (VoltageL3, 0x4A3C),
        (CurrentL1, 0x4A44),
        (CurrentL2, 0x4A46),
        (CurrentL3, 0x4A48),
        (PowerL1, 0x4A4C),
        (PowerL2, 0x4A4E),
        (PowerL3, 0x4A50),
        (Power, 0x4A52),
        (ReactivePowerL1, 0x4A54),
        (ReactivePowerL2, 0x4A56),
        (ReactivePowerL3, 0x4A58),
        (ReactivePower, 0x4A5A),
        (CosphiL1, 0x4A64),
        (CosphiL2, 0x4A66),
        (CosphiL3, 0x4A68),
        (Frequency, 0x4A6C),
        (ImportL1, 0x4A76),
        (ImportL2, 0x4A78),
        (ImportL3, 0x4A7A),
        (Import, 0x4A7C),
        (ExportL1, 0x4A7E),
        (ExportL2, 0x4A80),
        (ExportL3, 0x4A82),
        (Export, 0x4A84),
    ]);

    let generator = OperationGenerator::new(
        opcodes,
        ReadKind::Holding,
        2,
        Transform::Ieee754Float32,
        DEFAULT_PROBE,
    )?;

    Ok(Box::new(MeterProducer::new(DESCRIPTION, generator)))
}
