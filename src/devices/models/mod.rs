//! Built-in device models.
//!
//! Each model contributes an opcode table and its fixed encoding; adding a
//! model means adding a module and one line to [`register_all`].

pub mod dzg;
pub mod janitza;
pub mod orno;
pub mod sdm220;
pub mod sdm630;
pub mod sdm72;

use super::registry::ProducerRegistry;
use crate::utils::error::MeterError;

/// Register every built-in model. Call once, before any lookup.
pub fn register_all(registry: &mut ProducerRegistry) -> Result<(), MeterError> {
    registry.register(sdm630::NAME, sdm630::producer)?;
    registry.register(sdm220::NAME, sdm220::producer)?;
    registry.register(sdm72::NAME, sdm72::producer)?;
    registry.register(janitza::NAME, janitza::producer)?;
    registry.register(dzg::NAME, dzg::producer)?;
    registry.register(orno::NAME, orno::producer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_all_twice_collides() {
        let mut registry = ProducerRegistry::new();
        register_all(&mut registry).unwrap();
        assert_eq!(registry.len(), 6);

        let err = register_all(&mut registry).unwrap_err();
        assert!(matches!(err, MeterError::DuplicateModel(_)));
    }

    #[test]
    fn test_every_model_builds() {
        let registry = ProducerRegistry::with_builtin_models().unwrap();
        for name in registry.names() {
            let producer = registry.lookup(name).unwrap();
            assert!(!producer.description().is_empty());
            assert!(!producer.produce().is_empty());
        }
    }
}
