//! Math builtins

use crate::value::{BuiltinError, BuiltinResult, Value};

fn unary_number(args: &[Value], name: &str) -> Result<f64, BuiltinError> {
    if args.len() != 1 {
        return Err(BuiltinError::new(format!("{} expects 1 argument", name)));
    }
    args[0]
        .as_number()
        .ok_or_else(|| BuiltinError::new(format!("{} requires number", name)))
}

/// `sqrt(x)`
pub fn sqrt(args: &[Value]) -> BuiltinResult {
    Ok(Value::Number(unary_number(args, "sqrt")?.sqrt()))
}

/// `abs(x)`
pub fn abs(args: &[Value]) -> BuiltinResult {
    Ok(Value::Number(unary_number(args, "abs")?.abs()))
}

/// `pow(base, exponent)`
pub fn pow(args: &[Value]) -> BuiltinResult {
    if args.len() != 2 {
        return Err(BuiltinError::new("pow expects 2 arguments (base, exponent)"));
    }
    match (args[0].as_number(), args[1].as_number()) {
        (Some(base), Some(exp)) => Ok(Value::Number(base.powf(exp))),
        _ => Err(BuiltinError::new("pow requires numbers")),
    }
}

/// `sin(x)`
pub fn sin(args: &[Value]) -> BuiltinResult {
    Ok(Value::Number(unary_number(args, "sin")?.sin()))
}

/// `cos(x)`
pub fn cos(args: &[Value]) -> BuiltinResult {
    Ok(Value::Number(unary_number(args, "cos")?.cos()))
}

/// `tan(x)`
pub fn tan(args: &[Value]) -> BuiltinResult {
    Ok(Value::Number(unary_number(args, "tan")?.tan()))
}

/// `log(x)`, natural logarithm
pub fn log(args: &[Value]) -> BuiltinResult {
    Ok(Value::Number(unary_number(args, "log")?.ln()))
}

/// `exp(x)`
pub fn exp(args: &[Value]) -> BuiltinResult {
    Ok(Value::Number(unary_number(args, "exp")?.exp()))
}

/// `floor(x)`
pub fn floor(args: &[Value]) -> BuiltinResult {
    Ok(Value::Number(unary_number(args, "floor")?.floor()))
}

/// `ceil(x)`
pub fn ceil(args: &[Value]) -> BuiltinResult {
    Ok(Value::Number(unary_number(args, "ceil")?.ceil()))
}

/// `round(x)`, half away from zero
pub fn round(args: &[Value]) -> BuiltinResult {
    Ok(Value::Number(unary_number(args, "round")?.round()))
}

/// `max(...)` over one or more numbers
pub fn max(args: &[Value]) -> BuiltinResult {
    if args.is_empty() {
        return Err(BuiltinError::new("max expects at least 1 argument"));
    }
    let mut result = f64::NEG_INFINITY;
    for arg in args {
        let n = arg
            .as_number()
            .ok_or_else(|| BuiltinError::new("max requires numbers"))?;
        if n > result {
            result = n;
        }
    }
    Ok(Value::Number(result))
}

/// `min(...)` over one or more numbers
pub fn min(args: &[Value]) -> BuiltinResult {
    if args.is_empty() {
        return Err(BuiltinError::new("min expects at least 1 argument"));
    }
    let mut result = f64::INFINITY;
    for arg in args {
        let n = arg
            .as_number()
            .ok_or_else(|| BuiltinError::new("min requires numbers"))?;
        if n < result {
            result = n;
        }
    }
    Ok(Value::Number(result))
}

/// `clamp(value, min, max)`
pub fn clamp(args: &[Value]) -> BuiltinResult {
    if args.len() != 3 {
        return Err(BuiltinError::new(
            "clamp expects 3 arguments (value, min, max)",
        ));
    }
    match (
        args[0].as_number(),
        args[1].as_number(),
        args[2].as_number(),
    ) {
        (Some(val), Some(lo), Some(hi)) => {
            let clamped = if val < lo {
                lo
            } else if val > hi {
                hi
            } else {
                val
            };
            Ok(Value::Number(clamped))
        }
        _ => Err(BuiltinError::new("clamp requires numbers")),
    }
}

/// `lerp(a, b, t)`
pub fn lerp(args: &[Value]) -> BuiltinResult {
    if args.len() != 3 {
        return Err(BuiltinError::new("lerp expects 3 arguments (a, b, t)"));
    }
    match (
        args[0].as_number(),
        args[1].as_number(),
        args[2].as_number(),
    ) {
        (Some(a), Some(b), Some(t)) => Ok(Value::Number(a + t * (b - a))),
        _ => Err(BuiltinError::new("lerp requires numbers")),
    }
}
