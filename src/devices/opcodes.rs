use std::collections::HashMap;

use super::measurement::Measurement;

/// Register addresses a device model exposes, keyed by measurement.
///
/// A measurement that is missing from the table is simply not offered by
/// the model. The table is read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpcodeTable {
    opcodes: HashMap<Measurement, u16>,
}

impl OpcodeTable {
    pub fn address(&self, measurement: Measurement) -> Option<u16> {
        self.opcodes.get(&measurement).copied()
    }

    pub fn contains(&self, measurement: Measurement) -> bool {
        self.opcodes.contains_key(&measurement)
    }

    /// Measurements in catalog order.
    pub fn measurements(&self) -> Vec<Measurement> {
        let mut measurements: Vec<Measurement> = self.opcodes.keys().copied().collect();
        measurements.sort();
        measurements
    }

    pub fn iter(&self) -> impl Iterator<Item = (Measurement, u16)> + '_ {
        self.opcodes.iter().map(|(m, addr)| (*m, *addr))
    }

    pub fn len(&self) -> usize {
        self.opcodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opcodes.is_empty()
    }
}

impl<const N: usize> From<[(Measurement, u16); N]> for OpcodeTable {
    fn from(entries: [(Measurement, u16); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl FromIterator<(Measurement, u16)> for OpcodeTable {
    fn from_iter<I: IntoIterator<Item = (Measurement, u16)>>(iter: I) -> Self {
        Self {
            opcodes: iter.into_iter().collect(),
        }
    }
}
