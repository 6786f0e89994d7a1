//! Time builtins

use std::collections::HashMap;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};

use crate::value::{BuiltinError, BuiltinResult, Value};

fn epoch_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// `tick()`: seconds since the Unix epoch with sub-second precision
pub fn tick(args: &[Value]) -> BuiltinResult {
    if !args.is_empty() {
        return Err(BuiltinError::new("tick expects 0 arguments"));
    }
    Ok(Value::Number(epoch_seconds()))
}

/// `time()`: whole seconds since the Unix epoch
pub fn time(args: &[Value]) -> BuiltinResult {
    if !args.is_empty() {
        return Err(BuiltinError::new("time expects 0 arguments"));
    }
    Ok(Value::Number(epoch_seconds().trunc()))
}

fn date_table(moment: DateTime<Local>, tick: f64) -> Value {
    let mut table = HashMap::new();
    table.insert("year".to_string(), Value::Number(f64::from(moment.year())));
    table.insert("month".to_string(), Value::Number(f64::from(moment.month())));
    table.insert("day".to_string(), Value::Number(f64::from(moment.day())));
    table.insert("hour".to_string(), Value::Number(f64::from(moment.hour())));
    table.insert("min".to_string(), Value::Number(f64::from(moment.minute())));
    table.insert("sec".to_string(), Value::Number(f64::from(moment.second())));
    table.insert(
        "wday".to_string(),
        Value::Number(f64::from(moment.weekday().num_days_from_sunday())),
    );
    table.insert(
        "yday".to_string(),
        Value::Number(f64::from(moment.ordinal())),
    );
    table.insert(
        "epoch".to_string(),
        Value::Number(moment.timestamp() as f64),
    );
    table.insert("tick".to_string(), Value::Number(tick));
    Value::Table(table)
}

/// `date()` or `date(timestamp)`: calendar fields in local time
pub fn date(args: &[Value]) -> BuiltinResult {
    match args.len() {
        0 => {
            let now = epoch_seconds();
            Ok(date_table(Local::now(), now))
        }
        1 => {
            let ts = args[0]
                .as_number()
                .ok_or_else(|| BuiltinError::new("date requires number or no arguments"))?;
            let seconds = ts.trunc() as i64;
            let nanoseconds = ((ts - ts.trunc()) * 1e9) as u32;
            match Local.timestamp_opt(seconds, nanoseconds) {
                chrono::LocalResult::Single(moment) => Ok(date_table(moment, ts)),
                _ => Err(BuiltinError::new("date timestamp out of range")),
            }
        }
        _ => Err(BuiltinError::new("date expects 0 or 1 argument")),
    }
}

/// `wait(seconds)` or `wait()`: sleeps and returns the waited duration
pub fn wait(args: &[Value]) -> BuiltinResult {
    let seconds = match args.len() {
        0 => 0.0,
        1 => args[0]
            .as_number()
            .ok_or_else(|| BuiltinError::new("wait requires number"))?,
        _ => return Err(BuiltinError::new("wait expects 0 or 1 argument")),
    };

    if !seconds.is_finite() {
        return Err(BuiltinError::new("wait requires a finite number"));
    }
    if seconds > 0.0 {
        thread::sleep(Duration::from_secs_f64(seconds));
    }
    Ok(Value::Number(seconds))
}
