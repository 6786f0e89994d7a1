//! Coercion and introspection builtins

use crate::value::{BuiltinError, BuiltinResult, Value};

/// `tostring(value)`
pub fn tostring(args: &[Value]) -> BuiltinResult {
    if args.len() != 1 {
        return Err(BuiltinError::new("tostring() expects 1 argument"));
    }
    Ok(Value::Str(args[0].to_string()))
}

/// `tonumber(value)`: numbers pass through, strings are parsed
pub fn tonumber(args: &[Value]) -> BuiltinResult {
    if args.len() != 1 {
        return Err(BuiltinError::new("tonumber() expects 1 argument"));
    }
    match &args[0] {
        Value::Number(n) => Ok(Value::Number(*n)),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| BuiltinError::new("cannot convert string to number")),
        _ => Err(BuiltinError::new("cannot convert to number")),
    }
}

/// `type(value)`: the language-level type name
pub fn type_of(args: &[Value]) -> BuiltinResult {
    if args.len() != 1 {
        return Err(BuiltinError::new("type expects 1 argument"));
    }
    Ok(Value::Str(args[0].type_name().to_string()))
}
