use std::sync::Arc;

use modbus_meters::config::Config;
use modbus_meters::devices::{Measurement, ProducerRegistry};
use modbus_meters::services::PlanService;

const CONFIG: &str = r#"
[bus]
adapter = "192.168.1.10:502"

[[devices]]
model = "SDM630"
address = 1
name = "House"

[[devices]]
model = "SDM630"
address = 2
name = "Heat pump"

[[devices]]
model = "DZG"
address = 3
"#;

#[test]
fn config_resolves_into_shared_producers() {
    let registry = ProducerRegistry::with_builtin_models().unwrap();
    let config = Config::from_toml_str(CONFIG).unwrap();
    let service = PlanService::new(&config, &registry).unwrap();

    let devices = service.devices();
    assert_eq!(devices.len(), 3);
    assert!(Arc::ptr_eq(&devices[0].producer, &devices[1].producer));
    assert_eq!(devices[2].producer.description(), "DZG Metering GmbH DVH4013");

    let plan = service.poll_plan();
    assert_eq!(plan[0].1, plan[1].1);
    assert_eq!(plan[2].0, 3);
}

#[test]
fn readings_from_engine_payloads() {
    let registry = ProducerRegistry::with_builtin_models().unwrap();
    let config = Config::from_toml_str(CONFIG).unwrap();
    let service = PlanService::new(&config, &registry).unwrap();

    let (address, probe) = service.probe_plan().remove(2);
    let reading = service.decode(address, &probe, &[0x00, 0x00, 0x5A, 0x0A]).unwrap();
    assert_eq!(reading.measurement, Measurement::VoltageL1);
    assert!((reading.value - 230.50).abs() < 1e-9);
}
