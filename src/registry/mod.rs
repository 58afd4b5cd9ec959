//! Function registries
//!
//! A [`Registry`] is a named group of functions a handler can load. Besides
//! functions it may contribute aliases and notices.
//!
//! ## Built-in registries
//!
//! - [`StdRegistry`] (`std`) - defaults, emptiness checks, concatenation
//! - [`StringsRegistry`] (`strings`) - case conversion, trimming, searching

mod standard;
mod strings;

pub use standard::StdRegistry;
pub use strings::StringsRegistry;

use thiserror::Error;

use crate::function::{FunctionAliasMap, FunctionMap};
use crate::handlers::Handler;
use crate::notice::FunctionNotice;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry '{uid}' failed to link: {reason}")]
    Link { uid: String, reason: String },
    #[error("registry '{uid}' failed to register: {reason}")]
    Register { uid: String, reason: String },
    #[error("unknown registry: {0}")]
    NotFound(String),
}

/// Source of functions for a [`Handler`]
pub trait Registry: Send + Sync {
    /// Unique identifier; a handler loads each uid at most once
    fn uid(&self) -> &str;

    /// Called once before registration so the registry can keep what it
    /// needs from the handler (typically its logger)
    fn link_handler(&mut self, handler: &dyn Handler) -> Result<(), RegistryError>;

    fn register_functions(&self, functions: &mut FunctionMap) -> Result<(), RegistryError>;

    fn register_aliases(&self, _aliases: &mut FunctionAliasMap) -> Result<(), RegistryError> {
        Ok(())
    }

    fn register_notices(&self, _notices: &mut Vec<FunctionNotice>) -> Result<(), RegistryError> {
        Ok(())
    }
}

/// Names accepted by [`builtin`]
pub const BUILTIN_NAMES: &[&str] = &["std", "strings"];

/// Resolve a built-in registry by short name
pub fn builtin(name: &str) -> Result<Box<dyn Registry>, RegistryError> {
    match name {
        "std" => Ok(Box::new(StdRegistry::new())),
        "strings" => Ok(Box::new(StringsRegistry::new())),
        other => Err(RegistryError::NotFound(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(builtin("std").unwrap().uid(), "sprout.std");
        assert_eq!(builtin("strings").unwrap().uid(), "sprout.strings");
        assert!(matches!(builtin("crypto"), Err(RegistryError::NotFound(name)) if name == "crypto"));
    }

    #[test]
    fn test_builtin_names_resolve() {
        for name in BUILTIN_NAMES {
            assert!(builtin(name).is_ok());
        }
    }
}
