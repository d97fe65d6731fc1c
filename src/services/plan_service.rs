use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{Config, DeviceConfig};
use crate::devices::registry::normalize;
use crate::devices::{Producer, ProducerRegistry};
use crate::modbus::{Operation, Reading};
use crate::utils::error::MeterError;

/// A configured device bound to the producer for its model.
#[derive(Clone)]
pub struct PlannedDevice {
    pub config: DeviceConfig,
    pub producer: Arc<dyn Producer>,
}

impl PlannedDevice {
    pub fn address(&self) -> u8 {
        self.config.address
    }
}

/// Resolves configured devices into read plans for the polling engine.
///
/// Devices of the same model share one producer.
pub struct PlanService {
    devices: Vec<PlannedDevice>,
}

impl PlanService {
    pub fn new(config: &Config, registry: &ProducerRegistry) -> Result<Self, MeterError> {
        config.validate(registry)?;

        let mut producers: HashMap<String, Arc<dyn Producer>> = HashMap::new();
        let mut devices = Vec::new();

        for device_config in config.enabled_devices() {
            let key = normalize(&device_config.model);
            let producer = match producers.get(&key) {
                Some(producer) => Arc::clone(producer),
                None => {
                    let producer: Arc<dyn Producer> = Arc::from(registry.lookup(&device_config.model)?);
                    producers.insert(key, Arc::clone(&producer));
                    producer
                }
            };

            info!(
                "📋 Planned device '{}' [{}] at address {}",
                device_config.display_name(),
                producer.description(),
                device_config.address
            );

            devices.push(PlannedDevice {
                config: device_config.clone(),
                producer,
            });
        }

        info!("📡 {} devices planned, {} distinct models", devices.len(), producers.len());
        Ok(Self { devices })
    }

    pub fn devices(&self) -> &[PlannedDevice] {
        &self.devices
    }

    pub fn device(&self, address: u8) -> Option<&PlannedDevice> {
        self.devices.iter().find(|d| d.address() == address)
    }

    /// One probe read per device, for connection validation.
    pub fn probe_plan(&self) -> Vec<(u8, Operation)> {
        self.devices
            .iter()
            .map(|d| (d.address(), d.producer.probe()))
            .collect()
    }

    /// Full read plan per device.
    pub fn poll_plan(&self) -> Vec<(u8, Vec<Operation>)> {
        self.devices
            .iter()
            .map(|d| (d.address(), d.producer.produce()))
            .collect()
    }

    /// Decode bytes the transport returned for `operation` on `address`.
    pub fn decode(&self, address: u8, operation: &Operation, data: &[u8]) -> Result<Reading, MeterError> {
        operation.read(data).map_err(|e| {
            warn!("⚠️  Device {}: {} failed to decode: {}", address, operation.measurement, e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::Measurement;

    fn service(devices: &str) -> PlanService {
        let registry = ProducerRegistry::with_builtin_models().unwrap();
        let config = Config::default().with_devices(devices).unwrap();
        PlanService::new(&config, &registry).unwrap()
    }

    #[test]
    fn test_same_model_shares_producer() {
        let service = service("SDM630:1,sdm630:2,SDM220:3");
        let devices = service.devices();

        assert_eq!(devices.len(), 3);
        assert!(Arc::ptr_eq(&devices[0].producer, &devices[1].producer));
        assert!(!Arc::ptr_eq(&devices[0].producer, &devices[2].producer));
    }

    #[test]
    fn test_padded_model_name_shares_producer() {
        let registry = ProducerRegistry::with_builtin_models().unwrap();
        let config = Config {
            devices: vec![
                DeviceConfig {
                    model: "SDM630".to_string(),
                    address: 1,
                    name: None,
                    enabled: true,
                },
                DeviceConfig {
                    model: " sdm630 ".to_string(),
                    address: 2,
                    name: None,
                    enabled: true,
                },
            ],
            ..Config::default()
        };

        let service = PlanService::new(&config, &registry).unwrap();
        let devices = service.devices();
        assert_eq!(devices.len(), 2);
        assert!(Arc::ptr_eq(&devices[0].producer, &devices[1].producer));
    }

    #[test]
    fn test_plans() {
        let service = service("SDM630:1,JANITZA:7");

        let probes = service.probe_plan();
        assert_eq!(probes.len(), 2);
        assert_eq!(probes[0].0, 1);
        assert_eq!(probes[0].1.address, 0x0000);
        assert_eq!(probes[1].0, 7);
        assert_eq!(probes[1].1.address, 0x4A38);

        let plans = service.poll_plan();
        assert_eq!(plans[0].1, service.device(1).unwrap().producer.produce());
    }

    #[test]
    fn test_decode() {
        let service = service("SDM630:1");
        let probe = service.device(1).unwrap().producer.probe();

        let reading = service.decode(1, &probe, &[0x43, 0x66, 0x00, 0x00]).unwrap();
        assert_eq!(reading.measurement, Measurement::VoltageL1);
        assert_eq!(reading.value, 230.0);

        assert!(service.decode(1, &probe, &[0x43]).unwrap_err().is_decode_error());
    }

    #[test]
    fn test_unknown_model_rejected() {
        let registry = ProducerRegistry::with_builtin_models().unwrap();
        let config = Config::default().with_devices("SDM630:1,UnknownModel:2").unwrap();
        assert!(matches!(
            PlanService::new(&config, &registry),
            Err(MeterError::UnsupportedModel(_))
        ));
    }
}
