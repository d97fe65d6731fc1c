use chrono::Utc;
use serde_json::Value;

use crate::modbus::{Operation, Reading};

/// A registered model as shown to operators: (name, description).
pub type ModelInfo = (String, String);

/// Read plan for one configured device: (label, operations).
pub type DevicePlan = (String, Vec<Operation>);

/// Each `format_*` call yields one complete document, column headers included.
/// `format_header` is a banner printed ahead of it and may be empty.
pub trait PlanFormatter: Send + Sync {
    fn format_models(&self, models: &[ModelInfo]) -> String;
    fn format_operations(&self, model: &str, operations: &[Operation]) -> String;
    fn format_plan(&self, plan: &[DevicePlan]) -> String;
    fn format_readings(&self, device: &str, readings: &[Reading]) -> String;
    fn format_header(&self) -> String;
}

pub fn formatter_for(name: &str) -> Option<Box<dyn PlanFormatter>> {
    match name {
        "console" => Some(Box::new(ConsoleFormatter)),
        "json" => Some(Box::new(JsonFormatter)),
        "csv" => Some(Box::new(CsvFormatter)),
        _ => None,
    }
}

pub struct ConsoleFormatter;

impl PlanFormatter for ConsoleFormatter {
    fn format_models(&self, models: &[ModelInfo]) -> String {
        let mut output = String::from("📋 Supported device models:\n");
        for (name, description) in models {
            output.push_str(&format!("  {:<10} {}\n", name, description));
        }
        output
    }

    fn format_operations(&self, model: &str, operations: &[Operation]) -> String {
        let mut output = format!("🔹 {} ({} operations):\n", model, operations.len());
        output.push_str(&"═".repeat(60));
        output.push('\n');

        for op in operations {
            output.push_str(&format!(
                "  0x{:04X}  {:<20} {} x {:<7} {}\n",
                op.address,
                op.measurement.name(),
                op.register_count,
                op.read_kind,
                op.transform
            ));
        }
        output
    }

    fn format_plan(&self, plan: &[DevicePlan]) -> String {
        plan.iter()
            .map(|(device, operations)| self.format_operations(device, operations))
            .collect()
    }

    fn format_readings(&self, device: &str, readings: &[Reading]) -> String {
        let mut output = format!("🔹 {} Data:\n", device);
        for reading in readings {
            output.push_str(&format!("{}\n", reading));
        }
        output
    }

    fn format_header(&self) -> String {
        format!("🚀 Modbus Meters - {}\n", Utc::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

pub struct JsonFormatter;

impl PlanFormatter for JsonFormatter {
    fn format_models(&self, models: &[ModelInfo]) -> String {
        let models: Vec<Value> = models
            .iter()
            .map(|(name, description)| {
                serde_json::json!({
                    "name": name,
                    "description": description
                })
            })
            .collect();

        serde_json::to_string_pretty(&models).unwrap_or_default()
    }

    fn format_operations(&self, model: &str, operations: &[Operation]) -> String {
        let result = serde_json::json!({
            "model": model,
            "operations": operations
        });

        serde_json::to_string_pretty(&result).unwrap_or_default()
    }

    fn format_plan(&self, plan: &[DevicePlan]) -> String {
        let devices: Vec<Value> = plan
            .iter()
            .map(|(device, operations)| {
                serde_json::json!({
                    "device": device,
                    "operations": operations
                })
            })
            .collect();

        serde_json::to_string_pretty(&devices).unwrap_or_default()
    }

    fn format_readings(&self, device: &str, readings: &[Reading]) -> String {
        let result = serde_json::json!({
            "device": device,
            "readings": readings
        });

        serde_json::to_string_pretty(&result).unwrap_or_default()
    }

    fn format_header(&self) -> String {
        String::new() // JSON doesn't need headers
    }
}

pub struct CsvFormatter;

impl PlanFormatter for CsvFormatter {
    fn format_models(&self, models: &[ModelInfo]) -> String {
        let mut csv = String::from("Model,Description\n");
        for (name, description) in models {
            csv.push_str(&format!("{},{}\n", name, description));
        }
        csv
    }

    fn format_operations(&self, model: &str, operations: &[Operation]) -> String {
        let mut csv = String::from("Model,Measurement,ReadKind,Address,Registers,Transform\n");
        for op in operations {
            csv.push_str(&csv_operation_row(model, op));
        }
        csv
    }

    fn format_plan(&self, plan: &[DevicePlan]) -> String {
        let mut csv = String::from("Device,Measurement,ReadKind,Address,Registers,Transform\n");
        for (device, operations) in plan {
            for op in operations {
                csv.push_str(&csv_operation_row(device, op));
            }
        }
        csv
    }

    fn format_readings(&self, device: &str, readings: &[Reading]) -> String {
        let mut csv = String::from("Device,Measurement,Value,Unit,Timestamp\n");
        for reading in readings {
            csv.push_str(&format!(
                "{},{},{},{},{}\n",
                device,
                reading.measurement,
                reading.value,
                reading.measurement.unit().symbol(),
                reading.timestamp.to_rfc3339()
            ));
        }
        csv
    }

    fn format_header(&self) -> String {
        String::new() // every CSV document carries its own column header
    }
}

fn csv_operation_row(label: &str, op: &Operation) -> String {
    format!(
        "{},{},{},{},{},{}\n",
        label, op.measurement, op.read_kind, op.address, op.register_count, op.transform
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::Measurement;
    use crate::modbus::{ReadKind, Transform};

    fn operations() -> Vec<Operation> {
        vec![Operation {
            read_kind: ReadKind::Input,
            address: 0x0006,
            register_count: 2,
            measurement: Measurement::CurrentL1,
            transform: Transform::Ieee754Float32,
        }]
    }

    #[test]
    fn test_formatter_for() {
        assert!(formatter_for("json").is_some());
        assert!(formatter_for("csv").is_some());
        assert!(formatter_for("console").is_some());
        assert!(formatter_for("xml").is_none());
    }

    #[test]
    fn test_json_operations() {
        let output = JsonFormatter.format_operations("SDM630", &operations());
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["model"], "SDM630");
        assert_eq!(value["operations"][0]["address"], 6);
        assert_eq!(value["operations"][0]["register_count"], 2);
    }

    #[test]
    fn test_csv_operations() {
        let output = CsvFormatter.format_operations("SDM630", &operations());
        assert_eq!(output.lines().nth(1), Some("SDM630,CurrentL1,input,6,2,float32"));
    }

    #[test]
    fn test_csv_documents_start_with_their_own_header() {
        assert!(CsvFormatter.format_header().is_empty());

        let plan = CsvFormatter.format_plan(&[
            ("Garage".to_string(), operations()),
            ("Shed".to_string(), operations()),
        ]);
        let lines: Vec<&str> = plan.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Device,Measurement,ReadKind,Address,Registers,Transform");
        assert_eq!(lines[2], "Shed,CurrentL1,input,6,2,float32");

        let reading = operations()[0].read(&[0x41, 0x20, 0x00, 0x00]).unwrap();
        let readings = CsvFormatter.format_readings("Garage", &[reading]);
        assert_eq!(readings.lines().next(), Some("Device,Measurement,Value,Unit,Timestamp"));
        assert!(readings.lines().nth(1).unwrap().starts_with("Garage,CurrentL1,10,A,"));
    }

    #[test]
    fn test_json_plan_is_one_document() {
        let output = JsonFormatter.format_plan(&[
            ("Garage".to_string(), operations()),
            ("Shed".to_string(), operations()),
        ]);
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[1]["device"], "Shed");
        assert_eq!(value[1]["operations"][0]["address"], 6);
    }

    #[test]
    fn test_console_models() {
        let models = vec![("SDM630".to_string(), "Eastron SDM630".to_string())];
        let output = ConsoleFormatter.format_models(&models);
        assert!(output.contains("Eastron SDM630"));
    }
}
