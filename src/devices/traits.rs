use super::measurement::Measurement;
use super::opcodes::OpcodeTable;
use crate::modbus::Operation;

/// A device model's read plan.
///
/// Producers never touch the bus. They describe which registers to read and
/// how to decode them; one instance can back every physical device of its
/// model.
pub trait Producer: Send + Sync {
    /// Human-readable model name, e.g. "Eastron SDM630".
    fn description(&self) -> &str;

    /// Cheap read used to confirm a bus address answers as this model.
    fn probe(&self) -> Operation;

    /// One operation per supported measurement, sorted by register address.
    fn produce(&self) -> Vec<Operation>;

    fn opcodes(&self) -> &OpcodeTable;

    fn probe_measurement(&self) -> Measurement;

    fn operation(&self, measurement: Measurement) -> Option<Operation> {
        self.produce()
            .into_iter()
            .find(|op| op.measurement == measurement)
    }
}
