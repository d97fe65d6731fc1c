//! Directory of supported device models.
//!
//! Models are registered once at startup through `&mut self`; afterwards the
//! registry is handed out by shared reference and only resolved from.
//!
//! ```
//! use modbus_meters::devices::ProducerRegistry;
//!
//! let registry = ProducerRegistry::with_builtin_models().unwrap();
//! let producer = registry.lookup("SDM630").unwrap();
//! assert_eq!(producer.description(), "Eastron SDM630");
//! ```

use log::debug;
use std::collections::BTreeMap;

use super::models;
use super::traits::Producer;
use crate::utils::error::MeterError;

pub type ProducerConstructor = fn() -> Result<Box<dyn Producer>, MeterError>;

#[derive(Default)]
pub struct ProducerRegistry {
    constructors: BTreeMap<String, ProducerConstructor>,
}

impl ProducerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every model this crate ships.
    pub fn with_builtin_models() -> Result<Self, MeterError> {
        let mut registry = Self::new();
        models::register_all(&mut registry)?;
        Ok(registry)
    }

    /// Model names are matched case-insensitively. Registering a name twice
    /// is an error, the first registration is kept.
    pub fn register(&mut self, name: &str, constructor: ProducerConstructor) -> Result<(), MeterError> {
        let key = normalize(name);
        if key.is_empty() {
            return Err(MeterError::ConfigError("device model name must not be empty".to_string()));
        }

        if self.constructors.contains_key(&key) {
            return Err(MeterError::DuplicateModel(key));
        }

        debug!("Registered device model {}", key);
        self.constructors.insert(key, constructor);
        Ok(())
    }

    /// Build a fresh producer for `name`.
    pub fn lookup(&self, name: &str) -> Result<Box<dyn Producer>, MeterError> {
        let key = normalize(name);
        let constructor = self
            .constructors
            .get(&key)
            .ok_or_else(|| MeterError::UnsupportedModel(name.trim().to_string()))?;

        let producer = constructor()?;
        debug!("Resolved device model {} ({})", key, producer.description());
        Ok(producer)
    }

    /// Registered model names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(&normalize(name))
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

/// Registry key for a model name.
pub(crate) fn normalize(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}
