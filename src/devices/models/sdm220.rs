use crate::devices::generator::{MeterProducer, OperationGenerator, DEFAULT_PROBE};
use crate::devices::measurement::Measurement::*;
use crate::devices::opcodes::OpcodeTable;
use crate::devices::traits::Producer;
use crate::modbus::{ReadKind, Transform};
use crate::utils::error::MeterError;

pub const NAME: &str = "SDM220";
const DESCRIPTION: &str = "Eastron SDM220";

/// Eastron SDM220 single-phase meter.
pub fn producer() -> Result<Box<dyn Producer>, MeterError> {
    let opcodes = OpcodeTable::from([
        (VoltageL1, 0x0000),
        (CurrentL1, 0x0006),
        (PowerL1, 0x000C),
        (ApparentPowerL1, 0x0012),
        (ReactivePowerL1, 0x0018),
        (CosphiL1, 0x001E),
        (Frequency, 0x0046),
        (Import, 0x0048),
        (Export, 0x004A),
        (ReactiveImport, 0x004C),
        (ReactiveExport, 0x004E),
        (Sum, 0x0156),
        (ReactiveSum, 0x0158),
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
