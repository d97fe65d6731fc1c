use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::transform::Transform;
use crate::devices::measurement::Measurement;
use crate::utils::error::MeterError;

/// Width of one Modbus register on the wire.
pub const BYTES_PER_REGISTER: usize = 2;

/// Register class a read targets. Fixed per device model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadKind {
    Holding,
    Input,
}

impl ReadKind {
    pub fn function_code(&self) -> u8 {
        match self {
            ReadKind::Holding => 0x03,
            ReadKind::Input => 0x04,
        }
    }
}

impl fmt::Display for ReadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadKind::Holding => f.pad("holding"),
            ReadKind::Input => f.pad("input"),
        }
    }
}

/// One fully specified register read for a single measurement.
///
/// The transport collaborator executes `(read_kind, address, register_count)`
/// and hands the returned bytes back to [`Operation::decode`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operation {
    pub read_kind: ReadKind,
    pub address: u16,
    pub register_count: u16,
    pub measurement: Measurement,
    pub transform: Transform,
}

impl Operation {
    /// Payload length the transport must return for this read.
    pub fn byte_len(&self) -> usize {
        self.register_count as usize * BYTES_PER_REGISTER
    }

    pub fn decode(&self, data: &[u8]) -> Result<f64, MeterError> {
        self.transform.decode(data)
    }

    /// Decode a payload into a timestamped reading.
    pub fn read(&self, data: &[u8]) -> Result<Reading, MeterError> {
        let value = self.decode(data)?;
        Ok(Reading {
            measurement: self.measurement,
            value,
            timestamp: Utc::now(),
        })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ 0x{:04X} ({} x {}, {})",
            self.measurement, self.address, self.register_count, self.read_kind, self.transform
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub measurement: Measurement,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.measurement.unit().symbol();
        if unit.is_empty() {
            write!(f, "{}: {:.3}", self.measurement.description(), self.value)
        } else {
            write!(f, "{}: {:.3} {}", self.measurement.description(), self.value, unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current_l1() -> Operation {
        Operation {
            read_kind: ReadKind::Input,
            address: 0x0006,
            register_count: 2,
            measurement: Measurement::CurrentL1,
            transform: Transform::Ieee754Float32,
        }
    }

    #[test]
    fn test_function_codes() {
        assert_eq!(ReadKind::Holding.function_code(), 0x03);
        assert_eq!(ReadKind::Input.function_code(), 0x04);
    }

    #[test]
    fn test_operation_read() {
        let op = current_l1();
        assert_eq!(op.byte_len(), 4);

        let reading = op.read(&[0x41, 0x20, 0x00, 0x00]).unwrap();
        assert_eq!(reading.measurement, Measurement::CurrentL1);
        assert_eq!(reading.value, 10.0);
        assert_eq!(reading.to_string(), "Current L1: 10.000 A");
    }

    #[test]
    fn test_operation_read_rejects_short_payload() {
        let err = current_l1().read(&[0x41, 0x20]).unwrap_err();
        assert!(err.is_decode_error());
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(
            current_l1().to_string(),
            "CurrentL1 @ 0x0006 (2 x input, float32)"
        );
    }

    #[test]
    fn test_operation_serializes() {
        let json = serde_json::to_value(current_l1()).unwrap();
        assert_eq!(json["read_kind"], "input");
        assert_eq!(json["address"], 6);
        assert_eq!(json["measurement"], "CurrentL1");
        assert_eq!(json["transform"]["type"], "ieee754_float32");
    }
}
