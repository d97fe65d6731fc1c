use crate::devices::generator::{MeterProducer, OperationGenerator, DEFAULT_PROBE};
use crate::devices::measurement::Measurement::*;
use crate::devices::opcodes::OpcodeTable;
use crate::devices::traits::Producer;
use crate::modbus::{ReadKind, Transform};
use crate::utils::error::MeterError;

pub const NAME: &str = "SDM630";
const DESCRIPTION: &str = "Eastron SDM630";

/// Eastron SDM630 three-phase meter.
///
/// Register map: http://bg-etech.de/download/manual/SDM630Register.pdf
/// Most SDM models share this layout, but not every register answers on
/// every firmware, so the table only lists the ones seen working.
pub fn producer() -> Result<Box<dyn Producer>, MeterError> {
    let opcodes = OpcodeTable::from([
        (VoltageL1, 0x0000),
        // VoltageL2 0x0002
        // VoltageL3 0x0004
        (CurrentL1, 0x0006),
        (CurrentL2, 0x0008),
        (CurrentL3, 0x000A),
        (PowerL1, 0x000C),
        (PowerL2, 0x000E),
        (PowerL3, 0x0010),
        (ReactivePowerL1, 0x0018),
        (ReactivePowerL2, 0x001A),
        (ReactivePowerL3, 0x001C),
        (Power, 0x0034),
        // ApparentPower 0x0038
        (ReactivePower, 0x003C),
        // Frequency 0x0046
        (Import, 0x0048),
        // Export 0x004A
        (ImportL1, 0x015A),
        (ImportL2, 0x015C),
        (ImportL3, 0x015E),
        // ExportL1..L3 0x0160..0x0164, THD block 0x00EA..0x00FA
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
