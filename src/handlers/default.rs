use std::collections::HashSet;
use std::fmt;

use super::options::HandlerOption;
use super::traits::{Handler, HandlerError};
use crate::function::{Function, FunctionAliasMap, FunctionMap, Value};
use crate::logger::Logger;
use crate::notice::FunctionNotice;
use crate::registry::Registry;

/// Default handler implementation
///
/// Built with [`DefaultHandler::new`] and a list of options, or with
/// [`Default`] for a handler that only carries the current logger.
pub struct DefaultHandler {
    pub(super) logger: Logger,
    registries: Vec<Box<dyn Registry>>,
    functions: FunctionMap,
    pub(super) aliases: FunctionAliasMap,
    pub(super) notices: Vec<FunctionNotice>,
    pub(super) safe_functions: bool,
}

impl DefaultHandler {
    pub fn new(options: impl IntoIterator<Item = HandlerOption<Self>>) -> Self {
        let mut handler = Self {
            logger: Logger::default(),
            registries: Vec::new(),
            functions: FunctionMap::new(),
            aliases: FunctionAliasMap::new(),
            notices: Vec::new(),
            safe_functions: false,
        };
        for option in options {
            option(&mut handler);
        }
        handler
    }

    /// Uids of the loaded registries, in load order
    pub fn registry_uids(&self) -> Vec<&str> {
        self.registries.iter().map(|r| r.uid()).collect()
    }

    pub fn safe_functions(&self) -> bool {
        self.safe_functions
    }

    pub(super) fn add_aliases(&mut self, aliases: FunctionAliasMap) {
        for (original, names) in aliases {
            self.aliases.entry(original).or_default().extend(names);
        }
    }

    /// Install aliases, returning the `(original, alias)` pairs actually added
    fn assign_aliases(&self, functions: &mut FunctionMap) -> Vec<(String, String)> {
        let mut installed = Vec::new();
        for (original, aliases) in &self.aliases {
            let Some(function) = functions.get(original).cloned() else {
                tracing::warn!(original = %original, "Alias target not found, skipping");
                continue;
            };
            for alias in aliases {
                if functions.contains_key(alias) {
                    tracing::warn!(
                        original = %original,
                        alias = %alias,
                        "Alias collides with an existing function"
                    );
                    continue;
                }
                functions.insert(alias.clone(), function.clone());
                installed.push((original.clone(), alias.clone()));
            }
        }
        installed
    }

    fn assign_notices(&self, functions: &mut FunctionMap, installed: &[(String, String)]) {
        for notice in &self.notices {
            let mut wrapped = HashSet::new();
            for name in &notice.functions {
                if !functions.contains_key(name) {
                    tracing::warn!(function = %name, "Notice references unknown function");
                    continue;
                }
                let aliases = installed
                    .iter()
                    .filter(|(original, _)| original == name)
                    .map(|(_, alias)| alias);
                for target in std::iter::once(name).chain(aliases) {
                    if !wrapped.insert(target.clone()) {
                        continue;
                    }
                    if let Some(inner) = functions.remove(target) {
                        let decorated = notice.wrap(&self.logger, target, inner);
                        functions.insert(target.clone(), decorated);
                    }
                }
            }
        }
    }

    fn assign_safe_variants(&self, functions: &mut FunctionMap) {
        let originals: Vec<(String, Function)> = functions
            .iter()
            .map(|(name, f)| (name.clone(), f.clone()))
            .collect();

        for (name, inner) in originals {
            let safe_name = safe_name(&name);
            if functions.contains_key(&safe_name) {
                tracing::warn!(
                    function = %name,
                    safe_name = %safe_name,
                    "Safe variant already defined"
                );
                continue;
            }
            let logger = self.logger.clone();
            let safe = Function::new(move |args| match inner.call(args) {
                Ok(value) => Ok(value),
                Err(e) => {
                    logger.in_scope(|| {
                        tracing::error!(function = %name, error = %e, "Function call failed");
                    });
                    Ok(Value::Null)
                }
            });
            functions.insert(safe_name, safe);
        }
    }
}

/// `toUpper` -> `safeToUpper`
fn safe_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("safe{}{}", first.to_uppercase(), chars.as_str()),
        None => "safe".to_string(),
    }
}

impl Handler for DefaultHandler {
    fn logger(&self) -> &Logger {
        &self.logger
    }

    fn add_registry(&mut self, mut registry: Box<dyn Registry>) -> Result<(), HandlerError> {
        let uid = registry.uid().to_string();
        if self.registries.iter().any(|r| r.uid() == uid) {
            return Err(HandlerError::DuplicateRegistry(uid));
        }

        registry.link_handler(&*self)?;

        // Stage everything so a failing registry leaves no partial state
        let mut functions = FunctionMap::new();
        let mut aliases = FunctionAliasMap::new();
        let mut notices = Vec::new();
        registry.register_functions(&mut functions)?;
        registry.register_aliases(&mut aliases)?;
        registry.register_notices(&mut notices)?;

        self.logger.in_scope(|| {
            tracing::debug!(registry = %uid, functions = functions.len(), "Registry added");
        });

        self.functions.extend(functions);
        self.add_aliases(aliases);
        self.notices.extend(notices);
        self.registries.push(registry);
        Ok(())
    }

    fn build(&self) -> FunctionMap {
        let mut functions = self.functions.clone();
        self.logger.in_scope(|| {
            let installed = self.assign_aliases(&mut functions);
            self.assign_notices(&mut functions, &installed);
            if self.safe_functions {
                self.assign_safe_variants(&mut functions);
            }
        });
        functions
    }

    fn functions(&self) -> &FunctionMap {
        &self.functions
    }

    fn aliases(&self) -> &FunctionAliasMap {
        &self.aliases
    }

    fn notices(&self) -> &[FunctionNotice] {
        &self.notices
    }
}

impl Default for DefaultHandler {
    fn default() -> Self {
        Self::new([])
    }
}

impl PartialEq for DefaultHandler {
    fn eq(&self, other: &Self) -> bool {
        self.logger == other.logger
            && self.registry_uids() == other.registry_uids()
            && self.functions == other.functions
            && self.aliases == other.aliases
            && self.notices == other.notices
            && self.safe_functions == other.safe_functions
    }
}

impl fmt::Debug for DefaultHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultHandler")
            .field("logger", &self.logger)
            .field("registries", &self.registry_uids())
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .field("aliases", &self.aliases)
            .field("notices", &self.notices)
            .field("safe_functions", &self.safe_functions)
            .finish()
    }
}
