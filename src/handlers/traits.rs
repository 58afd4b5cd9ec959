use thiserror::Error;

use crate::function::{FunctionAliasMap, FunctionMap};
use crate::logger::Logger;
use crate::notice::FunctionNotice;
use crate::registry::{Registry, RegistryError};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("registry already registered: {0}")]
    DuplicateRegistry(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Function handler: collects registries and builds the final function map
pub trait Handler {
    fn logger(&self) -> &Logger;

    /// Link and load a registry. On error the handler keeps nothing from it.
    fn add_registry(&mut self, registry: Box<dyn Registry>) -> Result<(), HandlerError>;

    /// Add registries in order, stopping at the first failure
    fn add_registries(&mut self, registries: Vec<Box<dyn Registry>>) -> Result<(), HandlerError> {
        for registry in registries {
            self.add_registry(registry)?;
        }
        Ok(())
    }

    /// Produce the decorated function map (aliases, notices, safe variants)
    fn build(&self) -> FunctionMap;

    fn functions(&self) -> &FunctionMap;

    fn aliases(&self) -> &FunctionAliasMap;

    fn notices(&self) -> &[FunctionNotice];
}
