//! Catalog of quantities a meter can report.
//!
//! Codes are part of the persisted vocabulary: append new quantities at the
//! end, never renumber or rename an existing one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::MeterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Volt,
    Ampere,
    Watt,
    VoltAmpere,
    Var,
    KiloWattHour,
    KiloVarHour,
    Hertz,
    Percent,
    Dimensionless,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Volt => "V",
            Unit::Ampere => "A",
            Unit::Watt => "W",
            Unit::VoltAmpere => "VA",
            Unit::Var => "var",
            Unit::KiloWattHour => "kWh",
            Unit::KiloVarHour => "kvarh",
            Unit::Hertz => "Hz",
            Unit::Percent => "%",
            Unit::Dimensionless => "",
        }
    }
}

macro_rules! measurements {
    ($( $variant:ident = $code:literal, $desc:literal, $unit:ident; )*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[repr(u16)]
        pub enum Measurement {
            $( $variant = $code, )*
        }

        impl Measurement {
            pub const ALL: &'static [Measurement] = &[ $( Measurement::$variant, )* ];

            pub fn name(&self) -> &'static str {
                match self {
                    $( Measurement::$variant => stringify!($variant), )*
                }
            }

            pub fn description(&self) -> &'static str {
                match self {
                    $( Measurement::$variant => $desc, )*
                }
            }

            pub fn unit(&self) -> Unit {
                match self {
                    $( Measurement::$variant => Unit::$unit, )*
                }
            }
        }
    };
}

measurements! {
    Frequency = 1, "Frequency", Hertz;

    Voltage = 10, "Voltage", Volt;
    VoltageL1 = 11, "Voltage L1", Volt;
    VoltageL2 = 12, "Voltage L2", Volt;
    VoltageL3 = 13, "Voltage L3", Volt;

    Current = 20, "Current", Ampere;
    CurrentL1 = 21, "Current L1", Ampere;
    CurrentL2 = 22, "Current L2", Ampere;
    CurrentL3 = 23, "Current L3", Ampere;

    Power = 30, "Power", Watt;
    PowerL1 = 31, "Power L1", Watt;
    PowerL2 = 32, "Power L2", Watt;
    PowerL3 = 33, "Power L3", Watt;

    ImportPower = 40, "Import Power", Watt;
    ImportPowerL1 = 41, "Import Power L1", Watt;
    ImportPowerL2 = 42, "Import Power L2", Watt;
    ImportPowerL3 = 43, "Import Power L3", Watt;

    ExportPower = 50, "Export Power", Watt;
    ExportPowerL1 = 51, "Export Power L1", Watt;
    ExportPowerL2 = 52, "Export Power L2", Watt;
    ExportPowerL3 = 53, "Export Power L3", Watt;

    ReactivePower = 60, "Reactive Power", Var;
    ReactivePowerL1 = 61, "Reactive Power L1", Var;
    ReactivePowerL2 = 62, "Reactive Power L2", Var;
    ReactivePowerL3 = 63, "Reactive Power L3", Var;

    ApparentPower = 70, "Apparent Power", VoltAmpere;
    ApparentPowerL1 = 71, "Apparent Power L1", VoltAmpere;
    ApparentPowerL2 = 72, "Apparent Power L2", VoltAmpere;
    ApparentPowerL3 = 73, "Apparent Power L3", VoltAmpere;

    Cosphi = 80, "Cosphi", Dimensionless;
    CosphiL1 = 81, "Cosphi L1", Dimensionless;
    CosphiL2 = 82, "Cosphi L2", Dimensionless;
    CosphiL3 = 83, "Cosphi L3", Dimensionless;

    Sum = 90, "Total Sum", KiloWattHour;
    SumL1 = 91, "Total Sum L1", KiloWattHour;
    SumL2 = 92, "Total Sum L2", KiloWattHour;
    SumL3 = 93, "Total Sum L3", KiloWattHour;

    Import = 100, "Total Import", KiloWattHour;
    ImportL1 = 101, "Total Import L1", KiloWattHour;
    ImportL2 = 102, "Total Import L2", KiloWattHour;
    ImportL3 = 103, "Total Import L3", KiloWattHour;

    Export = 110, "Total Export", KiloWattHour;
    ExportL1 = 111, "Total Export L1", KiloWattHour;
    ExportL2 = 112, "Total Export L2", KiloWattHour;
    ExportL3 = 113, "Total Export L3", KiloWattHour;

    ReactiveSum = 120, "Reactive Sum", KiloVarHour;
    ReactiveImport = 121, "Reactive Import", KiloVarHour;
    ReactiveExport = 122, "Reactive Export", KiloVarHour;

    Thd = 130, "Average voltage to neutral THD", Percent;
    ThdL1 = 131, "Voltage to neutral THD L1", Percent;
    ThdL2 = 132, "Voltage to neutral THD L2", Percent;
    ThdL3 = 133, "Voltage to neutral THD L3", Percent;

    ThdCurrent = 140, "Average current THD", Percent;
    ThdCurrentL1 = 141, "Current THD L1", Percent;
    ThdCurrentL2 = 142, "Current THD L2", Percent;
    ThdCurrentL3 = 143, "Current THD L3", Percent;

    ApparentImportPower = 150, "Apparent Import Power", VoltAmpere;
}

impl Measurement {
    /// Stable numeric code of this measurement.
    pub fn code(&self) -> u16 {
        *self as u16
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Measurement {
    type Err = MeterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Measurement::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MeterError::UnknownMeasurement(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<u16> = Measurement::ALL.iter().map(|m| m.code()).collect();
        assert_eq!(codes.len(), Measurement::ALL.len());
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(Measurement::Frequency.code(), 1);
        assert_eq!(Measurement::Voltage.code(), 10);
        assert_eq!(Measurement::CurrentL1.code(), 21);
        assert_eq!(Measurement::PowerL3.code(), 33);
        assert_eq!(Measurement::Import.code(), 100);
    }

    #[test]
    fn test_parse_round_trips_names() {
        for m in Measurement::ALL {
            assert_eq!(m.name().parse::<Measurement>().unwrap(), *m);
        }
        assert_eq!("currentl1".parse::<Measurement>().unwrap(), Measurement::CurrentL1);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "Temperature".parse::<Measurement>().unwrap_err();
        assert!(matches!(err, MeterError::UnknownMeasurement(name) if name == "Temperature"));
    }

    #[test]
    fn test_metadata() {
        assert_eq!(Measurement::VoltageL2.description(), "Voltage L2");
        assert_eq!(Measurement::VoltageL2.unit().symbol(), "V");
        assert_eq!(Measurement::Import.unit(), Unit::KiloWattHour);
        assert_eq!(Measurement::Cosphi.unit().symbol(), "");
        assert_eq!(Measurement::ReactivePowerL1.to_string(), "ReactivePowerL1");
    }
}
