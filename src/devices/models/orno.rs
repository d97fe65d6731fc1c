use crate::devices::generator::{MeterProducer, OperationGenerator, DEFAULT_PROBE};
use crate::devices::measurement::Measurement::*;
use crate::devices::opcodes::OpcodeTable;
use crate::devices::traits::Producer;
use crate::modbus::{ReadKind, Transform};
use crate::utils::error::MeterError;

pub const NAME: &str = "ORNO3P";
const DESCRIPTION: &str = "ORNO WE-516";

/// ORNO WE-516 three-phase meter.
pub fn producer() -> Result<Box<dyn Producer>, MeterError> {
    let opcodes = OpcodeTable::from([
        (VoltageL1, 0x000E),
        (VoltageL2, 0x0010),
        (VoltageL3, 0x0012),
        (Frequency, 0x0014),
        (CurrentL1, 0x0016),
        (CurrentL2, 0x0018),
        (CurrentL3, 0x001A),
        (Power, 0x001C),
        (PowerL1, 0x001E),
        (PowerL2, 0x0020),
        (PowerL3, 0x0022),
        (ReactivePower, 0x0024),
        (ReactivePowerL1, 0x0026),
        (ReactivePowerL2, 0x0028),
        (ReactivePowerL3, 0x002A),
        (ApparentPower, 0x002C),
        (ApparentPowerL1, 0x002E),
        (ApparentPowerL2, 0x0030),
        (ApparentPowerL3, 0x0032),
        (Cosphi, 0x0034),
        (CosphiL1, 0x0036),
        (CosphiL2, 0x0038),
        (CosphiL3, 0x003A),
        (Sum, 0x0100),
        (SumL1, 0x0102),
        (SumL2, 0x0104),
        (SumL3, 0x0106),
        // Import/export split 0x0108..0x011E reads zero on early batches
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
