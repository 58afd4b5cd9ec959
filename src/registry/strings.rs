use super::{Registry, RegistryError};
use crate::function::{
    Function, FunctionAliasMap, FunctionError, FunctionMap, Value, expect_args, str_arg,
};
use crate::handlers::Handler;

/// String manipulation helpers
#[derive(Debug, Default)]
pub struct StringsRegistry;

impl StringsRegistry {
    pub fn new() -> Self {
        Self
    }
}

impl Registry for StringsRegistry {
    fn uid(&self) -> &str {
        "sprout.strings"
    }

    fn link_handler(&mut self, _handler: &dyn Handler) -> Result<(), RegistryError> {
        Ok(())
    }

    fn register_functions(&self, functions: &mut FunctionMap) -> Result<(), RegistryError> {
        functions.insert("toUpper".into(), Function::new(|args| map_str(args, str::to_uppercase)));
        functions.insert("toLower".into(), Function::new(|args| map_str(args, str::to_lowercase)));
        functions.insert("trim".into(), Function::new(|args| map_str(args, |s| s.trim().to_string())));
        functions.insert("repeat".into(), Function::new(repeat));
        functions.insert("contains".into(), Function::new(contains));
        functions.insert("hasPrefix".into(), Function::new(has_prefix));
        Ok(())
    }

    fn register_aliases(&self, aliases: &mut FunctionAliasMap) -> Result<(), RegistryError> {
        aliases.entry("toUpper".into()).or_default().push("upper".into());
        aliases.entry("toLower".into()).or_default().push("lower".into());
        Ok(())
    }
}

fn map_str(args: &[Value], f: impl Fn(&str) -> String) -> Result<Value, FunctionError> {
    expect_args(args, 1)?;
    Ok(Value::String(f(str_arg(args, 0)?)))
}

/// `repeat COUNT STR`
fn repeat(args: &[Value]) -> Result<Value, FunctionError> {
    expect_args(args, 2)?;
    let count = args[0]
        .as_u64()
        .ok_or_else(|| FunctionError::InvalidArgument("count must be a non-negative integer".into()))?;
    let count = usize::try_from(count)
        .map_err(|_| FunctionError::InvalidArgument(format!("count {count} is too large")))?;
    Ok(Value::String(str_arg(args, 1)?.repeat(count)))
}

/// `contains SUBSTR STR`
fn contains(args: &[Value]) -> Result<Value, FunctionError> {
    expect_args(args, 2)?;
    Ok(Value::Bool(str_arg(args, 1)?.contains(str_arg(args, 0)?)))
}

/// `hasPrefix PREFIX STR`
fn has_prefix(args: &[Value]) -> Result<Value, FunctionError> {
    expect_args(args, 2)?;
    Ok(Value::Bool(str_arg(args, 1)?.starts_with(str_arg(args, 0)?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(name: &str, args: &[Value]) -> Result<Value, FunctionError> {
        let mut map = FunctionMap::new();
        StringsRegistry::new().register_functions(&mut map).unwrap();
        map[name].call(args)
    }

    #[test]
    fn test_case_and_trim() {
        assert_eq!(call("toUpper", &[json!("abc")]).unwrap(), json!("ABC"));
        assert_eq!(call("toLower", &[json!("AbC")]).unwrap(), json!("abc"));
        assert_eq!(call("trim", &[json!("  padded \n")]).unwrap(), json!("padded"));
    }

    #[test]
    fn test_rejects_non_string() {
        assert!(matches!(
            call("toUpper", &[json!(12)]),
            Err(FunctionError::InvalidArgument(_))
        ));
        assert!(matches!(
            call("toUpper", &[]),
            Err(FunctionError::Arity { expected: 1, got: 0 })
        ));
    }

    #[test]
    fn test_repeat() {
        assert_eq!(call("repeat", &[json!(3), json!("ab")]).unwrap(), json!("ababab"));
        assert!(call("repeat", &[json!(-1), json!("ab")]).is_err());
    }

    #[test]
    fn test_contains_and_prefix() {
        assert_eq!(call("contains", &[json!("ell"), json!("hello")]).unwrap(), json!(true));
        assert_eq!(call("contains", &[json!("xyz"), json!("hello")]).unwrap(), json!(false));
        assert_eq!(call("hasPrefix", &[json!("he"), json!("hello")]).unwrap(), json!(true));
    }

    #[test]
    fn test_aliases() {
        let mut aliases = FunctionAliasMap::new();
        StringsRegistry::new().register_aliases(&mut aliases).unwrap();

        assert_eq!(aliases["toUpper"], vec!["upper"]);
        assert_eq!(aliases["toLower"], vec!["lower"]);
    }
}
