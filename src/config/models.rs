use serde::{Deserialize, Serialize};

use crate::function::FunctionAliasMap;
use crate::notice::FunctionNotice;

/// Handler settings loaded from file and environment
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    /// Built-in registries to load, by short name
    #[serde(default = "default_registries")]
    pub registries: Vec<String>,
    /// Generate `safeXxx` variants that swallow errors
    #[serde(default)]
    pub safe_functions: bool,
    #[serde(default)]
    pub aliases: FunctionAliasMap,
    #[serde(default)]
    pub notices: Vec<FunctionNotice>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registries: default_registries(),
            safe_functions: false,
            aliases: FunctionAliasMap::new(),
            notices: Vec::new(),
        }
    }
}

fn default_registries() -> Vec<String> {
    vec!["std".to_string(), "strings".to_string()]
}
