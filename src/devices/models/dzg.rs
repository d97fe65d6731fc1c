use crate::devices::generator::{MeterProducer, OperationGenerator, DEFAULT_PROBE};
use crate::devices::measurement::Measurement::*;
use crate::devices::opcodes::OpcodeTable;
use crate::devices::traits::Producer;
use crate::modbus::{ReadKind, Transform};
use crate::utils::error::MeterError;

pub const NAME: &str = "DZG";
const DESCRIPTION: &str = "DZG Metering GmbH DVH4013";

/// DZG DVH4013. Fixed-point unsigned 32-bit values in hundredths.
///
/// Currents and power factor use a different scale and are left out.
pub fn producer() -> Result<Box<dyn Producer>, MeterError> {
    let opcodes = OpcodeTable::from([
        (VoltageL1, 0x0000),
        (VoltageL2, 0x0002),
        (VoltageL3, 0x0004),
        (Power, 0x0012),
        (Frequency, 0x0014),
        (Import, 0x4000),
        (Export, 0x4020),
    ]);

    let generator = OperationGenerator::new(
        opcodes,
        ReadKind::Holding,
        2,
        Transform::Uint32 { divisor: 100 },
        DEFAULT_PROBE,
    )?;

    Ok(Box::new(MeterProducer::new(DESCRIPTION, generator)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dzg_decodes_fixed_point() {
        let probe = producer().unwrap().probe();
        assert_eq!(probe.read_kind, ReadKind::Holding);

        // 23012 hundredths of a volt
        let volts = probe.decode(&[0x00, 0x00, 0x59, 0xE4]).unwrap();
        assert!((volts - 230.12).abs() < 1e-9);
    }
}
