use super::models::Settings;
use crate::registry::BUILTIN_NAMES;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Unknown registry '{name}', expected one of: {expected}")]
    UnknownRegistry { name: String, expected: String },

    #[error("Registry '{name}' listed more than once")]
    DuplicateRegistry { name: String },

    #[error("Function '{function}' cannot be an alias of itself")]
    SelfAlias { function: String },

    #[error("Empty function name in {context}")]
    EmptyFunctionName { context: String },

    #[error("Notice #{index} names no functions")]
    NoticeWithoutFunctions { index: usize },
}

/// Validate the entire settings document
pub fn validate(settings: &Settings) -> Result<(), ValidationError> {
    validate_registries(settings)?;
    validate_aliases(settings)?;
    validate_notices(settings)?;
    Ok(())
}

fn validate_registries(settings: &Settings) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for name in &settings.registries {
        if !BUILTIN_NAMES.contains(&name.as_str()) {
            return Err(ValidationError::UnknownRegistry {
                name: name.clone(),
                expected: BUILTIN_NAMES.join(", "),
            });
        }
        if !seen.insert(name.as_str()) {
            return Err(ValidationError::DuplicateRegistry { name: name.clone() });
        }
    }
    Ok(())
}

fn validate_aliases(settings: &Settings) -> Result<(), ValidationError> {
    for (original, aliases) in &settings.aliases {
        if original.is_empty() {
            return Err(ValidationError::EmptyFunctionName {
                context: "aliases".to_string(),
            });
        }
        for alias in aliases {
            if alias.is_empty() {
                return Err(ValidationError::EmptyFunctionName {
                    context: format!("aliases of '{original}'"),
                });
            }
            if alias == original {
                return Err(ValidationError::SelfAlias {
                    function: original.clone(),
                });
            }
        }
    }
    Ok(())
}

fn validate_notices(settings: &Settings) -> Result<(), ValidationError> {
    for (index, notice) in settings.notices.iter().enumerate() {
        if notice.functions.is_empty() {
            return Err(ValidationError::NoticeWithoutFunctions { index });
        }
        if notice.functions.iter().any(String::is_empty) {
            return Err(ValidationError::EmptyFunctionName {
                context: format!("notice #{index}"),
            });
        }
    }
    Ok(())
}
