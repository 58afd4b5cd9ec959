use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Dynamic value passed to and returned from template functions
pub type Value = serde_json::Value;

/// Function name -> callable
pub type FunctionMap = BTreeMap<String, Function>;

/// Original function name -> aliases it is also reachable under
pub type FunctionAliasMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunctionError {
    #[error("expected {expected} argument(s), got {got}")]
    Arity { expected: usize, got: usize },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Failed(String),
}

type Callable = dyn Fn(&[Value]) -> Result<Value, FunctionError> + Send + Sync;

/// Shared callable; clones point at the same closure
#[derive(Clone)]
pub struct Function(Arc<Callable>);

impl Function {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, FunctionError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, FunctionError> {
        (self.0)(args)
    }

    pub fn same_as(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({:p})", Arc::as_ptr(&self.0))
    }
}

/// Fail with [`FunctionError::Arity`] unless exactly `expected` args were given
pub fn expect_args(args: &[Value], expected: usize) -> Result<(), FunctionError> {
    if args.len() != expected {
        return Err(FunctionError::Arity {
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

/// Borrow argument `index` as a string
pub fn str_arg(args: &[Value], index: usize) -> Result<&str, FunctionError> {
    args.get(index)
        .and_then(Value::as_str)
        .ok_or_else(|| FunctionError::InvalidArgument(format!("argument {index} must be a string")))
}

/// Template truthiness: null, false, 0, "", [] and {} are empty
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}
