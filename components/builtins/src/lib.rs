//! lightlang runtime library
//!
//! This crate provides the builtin functions the bytecode targets, plus
//! the name registry the optimizer consults: builtin names are part of
//! the runtime environment and are never renamed.
//!
//! # Example
//!
//! ```
//! use builtins::{lookup, Value};
//!
//! let sqrt = lookup("sqrt").unwrap();
//! assert_eq!(sqrt(&[Value::Number(9.0)]).unwrap(), Value::Number(3.0));
//! assert!(builtins::is_builtin("print"));
//! assert!(!builtins::is_builtin("my_function"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coerce;
pub mod collections;
pub mod io;
pub mod math;
pub mod random;
pub mod string;
pub mod time;
pub mod value;

pub use value::{BuiltinError, BuiltinResult, Value};

/// Signature shared by every builtin function
pub type BuiltinFn = fn(&[Value]) -> BuiltinResult;

/// Every builtin name shipped with the runtime
pub const NAMES: &[&str] = &[
    "print", "readfile", "writefile", "makedir", "gotodir", "range", "pairs", "ipairs", "len",
    "push", "pop", "keys", "sqrt", "abs", "pow", "sin", "cos", "tan", "log", "exp", "floor",
    "ceil", "round", "max", "min", "clamp", "lerp", "substr", "concat", "upper", "lower", "split",
    "find", "replace", "tick", "time", "date", "wait", "random", "tostring", "tonumber", "type",
];

/// Resolve a builtin by name
pub fn lookup(name: &str) -> Option<BuiltinFn> {
    let f: BuiltinFn = match name {
        "print" => io::print,
        "readfile" => io::readfile,
        "writefile" => io::writefile,
        "makedir" => io::makedir,
        "gotodir" => io::gotodir,
        "range" => collections::range,
        "pairs" => collections::pairs,
        "ipairs" => collections::ipairs,
        "len" => collections::len,
        "push" => collections::push,
        "pop" => collections::pop,
        "keys" => collections::keys,
        "sqrt" => math::sqrt,
        "abs" => math::abs,
        "pow" => math::pow,
        "sin" => math::sin,
        "cos" => math::cos,
        "tan" => math::tan,
        "log" => math::log,
        "exp" => math::exp,
        "floor" => math::floor,
        "ceil" => math::ceil,
        "round" => math::round,
        "max" => math::max,
        "min" => math::min,
        "clamp" => math::clamp,
        "lerp" => math::lerp,
        "substr" => string::substr,
        "concat" => string::concat,
        "upper" => string::upper,
        "lower" => string::lower,
        "split" => string::split,
        "find" => string::find,
        "replace" => string::replace,
        "tick" => time::tick,
        "time" => time::time,
        "date" => time::date,
        "wait" => time::wait,
        "random" => random::random,
        "tostring" => coerce::tostring,
        "tonumber" => coerce::tonumber,
        "type" => coerce::type_of,
        _ => return None,
    };
    Some(f)
}

/// Check whether a name belongs to the runtime environment
pub fn is_builtin(name: &str) -> bool {
    lookup(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_name_resolves() {
        for name in NAMES {
            assert!(lookup(name).is_some(), "{} must resolve", name);
        }
    }

    #[test]
    fn test_membership() {
        assert!(is_builtin("print"));
        assert!(is_builtin("type"));
        assert!(!is_builtin("g1"));
        assert!(!is_builtin(""));
        assert!(!is_builtin("Print"));
    }

    #[test]
    fn test_dispatch_through_registry() {
        let concat = lookup("concat").unwrap();
        let result = concat(&[
            Value::Str("pi = ".to_string()),
            Value::Number(3.0),
        ])
        .unwrap();
        assert_eq!(result, Value::Str("pi = 3".to_string()));
    }
}
