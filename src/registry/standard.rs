use serde_json::json;

use super::{Registry, RegistryError};
use crate::function::{Function, FunctionError, FunctionMap, Value, expect_args, is_empty};
use crate::handlers::Handler;
use crate::logger::Logger;

/// Core helpers every template needs
#[derive(Debug, Default)]
pub struct StdRegistry {
    logger: Option<Logger>,
}

impl StdRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Registry for StdRegistry {
    fn uid(&self) -> &str {
        "sprout.std"
    }

    fn link_handler(&mut self, handler: &dyn Handler) -> Result<(), RegistryError> {
        self.logger = Some(handler.logger().clone());
        Ok(())
    }

    fn register_functions(&self, functions: &mut FunctionMap) -> Result<(), RegistryError> {
        functions.insert("hello".into(), Function::new(hello));
        functions.insert("default".into(), Function::new(default));
        functions.insert("empty".into(), Function::new(empty));
        functions.insert("all".into(), Function::new(all));
        functions.insert("any".into(), Function::new(any));
        functions.insert("coalesce".into(), Function::new(coalesce));
        functions.insert("ternary".into(), Function::new(ternary));
        functions.insert("cat".into(), Function::new(cat));

        if let Some(logger) = &self.logger {
            logger.in_scope(|| tracing::debug!(registry = self.uid(), "Registered std functions"));
        }
        Ok(())
    }
}

fn hello(args: &[Value]) -> Result<Value, FunctionError> {
    expect_args(args, 0)?;
    Ok(json!("Hello!"))
}

/// `default DEFAULT GIVEN` - GIVEN unless it is missing or empty
fn default(args: &[Value]) -> Result<Value, FunctionError> {
    match args {
        [] => Err(FunctionError::Arity { expected: 1, got: 0 }),
        [fallback] => Ok(fallback.clone()),
        [fallback, given, ..] if is_empty(given) => Ok(fallback.clone()),
        [_, given, ..] => Ok(given.clone()),
    }
}

fn empty(args: &[Value]) -> Result<Value, FunctionError> {
    expect_args(args, 1)?;
    Ok(Value::Bool(is_empty(&args[0])))
}

fn all(args: &[Value]) -> Result<Value, FunctionError> {
    Ok(Value::Bool(args.iter().all(|v| !is_empty(v))))
}

fn any(args: &[Value]) -> Result<Value, FunctionError> {
    Ok(Value::Bool(args.iter().any(|v| !is_empty(v))))
}

fn coalesce(args: &[Value]) -> Result<Value, FunctionError> {
    Ok(args
        .iter()
        .find(|v| !is_empty(v))
        .cloned()
        .unwrap_or(Value::Null))
}

/// `ternary TRUE FALSE CONDITION`
fn ternary(args: &[Value]) -> Result<Value, FunctionError> {
    expect_args(args, 3)?;
    if is_empty(&args[2]) {
        Ok(args[1].clone())
    } else {
        Ok(args[0].clone())
    }
}

/// Space-joined rendering of every non-null argument
fn cat(args: &[Value]) -> Result<Value, FunctionError> {
    let parts: Vec<String> = args
        .iter()
        .filter(|v| !v.is_null())
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect();
    Ok(Value::String(parts.join(" ")))
}
