use crate::devices::generator::{MeterProducer, OperationGenerator, DEFAULT_PROBE};
use crate::devices::measurement::Measurement::*;
use crate::devices::opcodes::OpcodeTable;
use crate::devices::traits::Producer;
use crate::modbus::{ReadKind, Transform};
use crate::utils::error::MeterError;

pub const NAME: &str = "SDM72";
const DESCRIPTION: &str = "Eastron SDM72";

/// Eastron SDM72, a reduced SDM630 register set.
pub fn producer() -> Result<Box<dyn Producer>, MeterError> {
    let opcodes = OpcodeTable::from([
        (VoltageL1, 0x0000),
        (VoltageL2, 0x0002),
        (VoltageL3, 0x0004),
        (CurrentL1, 0x0006),
        (CurrentL2, 0x0008),
        (CurrentL3, 0x000A),
        (PowerL1, 0x000C),
        (PowerL2, 0x000E),
        (PowerL3, 0x0010),
        (Power, 0x0034),
        (Import, 0x0048),
        (Export, 0x004A),
        (Sum, 0x0156),
    ]);

    let generator = OperationGenerator::new(
        opcodes,
        ReadKind::Input,
        2,
        Transform::Ieee754Float32,
        DEFAULT_PROBE,
    )?;

    Ok(Box::new(MeterProducer::new(DESCRIPTION, generator)))
}
