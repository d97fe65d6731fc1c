//! Decoders from raw register payloads to numeric values.
//!
//! A transform only knows a byte layout. It never looks at which measurement
//! it is decoding; the producer that owns a register map picks the layout its
//! model family uses.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::error::MeterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transform {
    /// Big-endian IEEE-754 single precision.
    Ieee754Float32,
    /// IEEE-754 single precision sent as two big-endian words, low word first.
    Ieee754Float32Swapped,
    /// Big-endian IEEE-754 double precision.
    Ieee754Float64,
    Uint16 { divisor: u32 },
    Int16 { divisor: u32 },
    Uint32 { divisor: u32 },
    Int32 { divisor: u32 },
    Uint64 { divisor: u32 },
}

impl Transform {
    /// Number of payload bytes this transform consumes.
    pub fn byte_len(&self) -> usize {
        match self {
            Transform::Uint16 { .. } | Transform::Int16 { .. } => 2,
            Transform::Ieee754Float32
            | Transform::Ieee754Float32Swapped
            | Transform::Uint32 { .. }
            | Transform::Int32 { .. } => 4,
            Transform::Ieee754Float64 | Transform::Uint64 { .. } => 8,
        }
    }

    pub fn decode(&self, data: &[u8]) -> Result<f64, MeterError> {
        if data.len() != self.byte_len() {
            return Err(MeterError::DecodeError {
                transform: *self,
                expected: self.byte_len(),
                actual: data.len(),
            });
        }

        let value = match *self {
            Transform::Ieee754Float32 => {
                f32::from_be_bytes([data[0], data[1], data[2], data[3]]) as f64
            }
            Transform::Ieee754Float32Swapped => {
                f32::from_be_bytes([data[2], data[3], data[0], data[1]]) as f64
            }
            Transform::Ieee754Float64 => f64::from_be_bytes(be_array(data)),
            Transform::Uint16 { divisor } => {
                scale(u16::from_be_bytes([data[0], data[1]]) as f64, divisor)
            }
            Transform::Int16 { divisor } => {
                scale(i16::from_be_bytes([data[0], data[1]]) as f64, divisor)
            }
            Transform::Uint32 { divisor } => {
                scale(u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as f64, divisor)
            }
            Transform::Int32 { divisor } => {
                scale(i32::from_be_bytes([data[0], data[1], data[2], data[3]]) as f64, divisor)
            }
            Transform::Uint64 { divisor } => scale(u64::from_be_bytes(be_array(data)) as f64, divisor),
        };

        Ok(value)
    }
}

// Caller has already checked the length.
fn be_array(data: &[u8]) -> [u8; 8] {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&data[..8]);
    buf
}

fn scale(raw: f64, divisor: u32) -> f64 {
    if divisor <= 1 {
        raw
    } else {
        raw / divisor as f64
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Ieee754Float32 => write!(f, "float32"),
            Transform::Ieee754Float32Swapped => write!(f, "float32-swapped"),
            Transform::Ieee754Float64 => write!(f, "float64"),
            Transform::Uint16 { divisor } => write_scaled(f, "uint16", *divisor),
            Transform::Int16 { divisor } => write_scaled(f, "int16", *divisor),
            Transform::Uint32 { divisor } => write_scaled(f, "uint32", *divisor),
            Transform::Int32 { divisor } => write_scaled(f, "int32", *divisor),
            Transform::Uint64 { divisor } => write_scaled(f, "uint64", *divisor),
        }
    }
}

fn write_scaled(f: &mut fmt::Formatter<'_>, name: &str, divisor: u32) -> fmt::Result {
    if divisor <= 1 {
        write!(f, "{}", name)
    } else {
        write!(f, "{}/{}", name, divisor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float32_big_endian() {
        let value = Transform::Ieee754Float32.decode(&[0x43, 0x66, 0x00, 0x00]).unwrap();
        assert_eq!(value, 230.0);
    }

    #[test]
    fn test_float32_word_swapped() {
        let value = Transform::Ieee754Float32Swapped
            .decode(&[0x00, 0x00, 0x43, 0x66])
            .unwrap();
        assert_eq!(value, 230.0);
    }

    #[test]
    fn test_float64() {
        let bytes = 50.5f64.to_be_bytes();
        assert_eq!(Transform::Ieee754Float64.decode(&bytes).unwrap(), 50.5);
    }

    #[test]
    fn test_scaled_integers() {
        // 23012 / 100
        let value = Transform::Uint32 { divisor: 100 }
            .decode(&[0x00, 0x00, 0x59, 0xE4])
            .unwrap();
        assert!((value - 230.12).abs() < 1e-9);

        let value = Transform::Int16 { divisor: 10 }.decode(&[0xFF, 0xF6]).unwrap();
        assert_eq!(value, -1.0);

        let value = Transform::Int32 { divisor: 1 }
            .decode(&[0xFF, 0xFF, 0xFF, 0xFE])
            .unwrap();
        assert_eq!(value, -2.0);

        let value = Transform::Uint16 { divisor: 0 }.decode(&[0x01, 0x00]).unwrap();
        assert_eq!(value, 256.0);

        let value = Transform::Uint64 { divisor: 1000 }
            .decode(&[0, 0, 0, 0, 0, 0, 0x03, 0xE8])
            .unwrap();
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_wrong_length_is_decode_error() {
        let transforms = [
            Transform::Ieee754Float32,
            Transform::Ieee754Float32Swapped,
            Transform::Ieee754Float64,
            Transform::Uint16 { divisor: 1 },
            Transform::Int16 { divisor: 1 },
            Transform::Uint32 { divisor: 1 },
            Transform::Int32 { divisor: 1 },
            Transform::Uint64 { divisor: 1 },
        ];

        for transform in transforms {
            let too_long = vec![0u8; transform.byte_len() + 1];
            let too_short = vec![0u8; transform.byte_len() - 1];

            for payload in [too_long, too_short, Vec::new()] {
                match transform.decode(&payload) {
                    Err(MeterError::DecodeError { expected, actual, .. }) => {
                        assert_eq!(expected, transform.byte_len());
                        assert_eq!(actual, payload.len());
                    }
                    other => panic!("{} accepted {} bytes: {:?}", transform, payload.len(), other),
                }
            }
        }
    }

    #[test]
    fn test_decode_is_deterministic() {
        let payload = [0x41, 0x20, 0x00, 0x01];
        let first = Transform::Ieee754Float32.decode(&payload).unwrap();
        let second = Transform::Ieee754Float32.decode(&payload).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_display() {
        assert_eq!(Transform::Ieee754Float32.to_string(), "float32");
        assert_eq!(Transform::Uint32 { divisor: 100 }.to_string(), "uint32/100");
        assert_eq!(Transform::Int16 { divisor: 1 }.to_string(), "int16");
    }
}
