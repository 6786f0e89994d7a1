//! Random-number builtin
//!
//! An xorshift generator with thread-local state, seeded once per thread
//! from the system clock.

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::value::{BuiltinError, BuiltinResult, Value};

thread_local! {
    static STATE: Cell<u64> = Cell::new(seed());
}

fn seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x9E37_79B9_7F4A_7C15);
    // Zero state would stay zero forever.
    nanos | 1
}

fn next_u64() -> u64 {
    STATE.with(|state| {
        let mut x = state.get();
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        state.set(x);
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    })
}

fn next_f64() -> f64 {
    // 53 random bits over 2^53 gives a uniform value in [0, 1).
    (next_u64() >> 11) as f64 / 9_007_199_254_740_992.0
}

fn uniform_int(span: u64) -> u64 {
    next_u64() % span
}

/// `random()`: uniform float in [0, 1). `random(max)`: uniform integer
/// in [0, max). `random(min, max)`: uniform integer in [min, max).
pub fn random(args: &[Value]) -> BuiltinResult {
    match args.len() {
        0 => Ok(Value::Number(next_f64())),
        1 => {
            let max = args[0]
                .as_number()
                .ok_or_else(|| BuiltinError::new("random requires number"))?;
            if max <= 0.0 {
                return Err(BuiltinError::new("random max must be positive"));
            }
            let span = max.trunc() as u64;
            if span == 0 {
                return Err(BuiltinError::new("random max must be positive"));
            }
            Ok(Value::Number(uniform_int(span) as f64))
        }
        2 => {
            let (min, max) = match (args[0].as_number(), args[1].as_number()) {
                (Some(min), Some(max)) => (min, max),
                _ => return Err(BuiltinError::new("random requires numbers")),
            };
            let lo = min.trunc() as i64;
            let hi = max.trunc() as i64;
            if hi <= lo {
                return Err(BuiltinError::new("random max must be greater than min"));
            }
            let offset = uniform_int((hi - lo) as u64) as i64;
            Ok(Value::Number((lo + offset) as f64))
        }
        _ => Err(BuiltinError::new("random expects 0, 1, or 2 arguments")),
    }
}
