//! String builtins
//!
//! Positions and lengths count characters, so substring operations can
//! never split a multi-byte sequence.

use crate::value::{BuiltinError, BuiltinResult, Value};

fn string_arg<'a>(args: &'a [Value], index: usize, message: &str) -> Result<&'a str, BuiltinError> {
    args.get(index)
        .and_then(Value::as_str)
        .ok_or_else(|| BuiltinError::new(message))
}

/// `substr(string, start, length)`
pub fn substr(args: &[Value]) -> BuiltinResult {
    if args.len() != 3 {
        return Err(BuiltinError::new(
            "substr expects 3 arguments (string, start, length)",
        ));
    }
    let s = string_arg(args, 0, "substr requires (string, number, number)")?;
    let (start, length) = match (args[1].as_number(), args[2].as_number()) {
        (Some(start), Some(length)) => (start, length),
        _ => return Err(BuiltinError::new("substr requires (string, number, number)")),
    };

    if start < 0.0 || length < 0.0 {
        return Ok(Value::Str(String::new()));
    }
    let result: String = s
        .chars()
        .skip(start as usize)
        .take(length as usize)
        .collect();
    Ok(Value::Str(result))
}

/// `concat(...)`: every argument rendered and joined
pub fn concat(args: &[Value]) -> BuiltinResult {
    let mut result = String::new();
    for arg in args {
        result.push_str(&arg.to_string());
    }
    Ok(Value::Str(result))
}

/// `upper(string)`
pub fn upper(args: &[Value]) -> BuiltinResult {
    if args.len() != 1 {
        return Err(BuiltinError::new("upper expects 1 argument"));
    }
    let s = string_arg(args, 0, "upper requires string")?;
    Ok(Value::Str(s.to_uppercase()))
}

/// `lower(string)`
pub fn lower(args: &[Value]) -> BuiltinResult {
    if args.len() != 1 {
        return Err(BuiltinError::new("lower expects 1 argument"));
    }
    let s = string_arg(args, 0, "lower requires string")?;
    Ok(Value::Str(s.to_lowercase()))
}

/// `split(string)` on spaces, or `split(string, separator)`
pub fn split(args: &[Value]) -> BuiltinResult {
    if args.len() != 1 && args.len() != 2 {
        return Err(BuiltinError::new("split expects 1 or 2 arguments"));
    }
    let s = string_arg(args, 0, "split requires string")?;
    let sep = if args.len() == 2 {
        match args[1].as_str() {
            Some(sep) => sep,
            None => return Err(BuiltinError::new("split separator must be string")),
        }
    } else {
        " "
    };
    let parts = s
        .split(sep)
        .map(|part| Value::Str(part.to_string()))
        .collect();
    Ok(Value::Array(parts))
}

/// `find(string, substring)`: character index of the first occurrence,
/// or -1
pub fn find(args: &[Value]) -> BuiltinResult {
    if args.len() != 2 {
        return Err(BuiltinError::new(
            "find expects 2 arguments (string, substring)",
        ));
    }
    let s = string_arg(args, 0, "find requires strings")?;
    let sub = string_arg(args, 1, "find requires strings")?;
    match s.find(sub) {
        Some(byte_pos) => Ok(Value::Number(s[..byte_pos].chars().count() as f64)),
        None => Ok(Value::Number(-1.0)),
    }
}

/// `replace(string, old, new)`: every occurrence replaced
pub fn replace(args: &[Value]) -> BuiltinResult {
    if args.len() != 3 {
        return Err(BuiltinError::new(
            "replace expects 3 arguments (string, old, new)",
        ));
    }
    let s = string_arg(args, 0, "replace requires strings")?;
    let old = string_arg(args, 1, "replace requires strings")?;
    let new = string_arg(args, 2, "replace requires strings")?;
    Ok(Value::Str(s.replace(old, new)))
}
