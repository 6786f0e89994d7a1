//! File-system and output builtins

use std::env;
use std::fs;
use std::path::Path;

use crate::value::{BuiltinError, BuiltinResult, Value};

/// `print(...)`: arguments rendered space-separated, newline-terminated
pub fn print(args: &[Value]) -> BuiltinResult {
    let rendered: Vec<String> = args.iter().map(Value::to_string).collect();
    println!("{}", rendered.join(" "));
    Ok(Value::Nil)
}

/// `readfile(filename)`: the file contents as a string
pub fn readfile(args: &[Value]) -> BuiltinResult {
    if args.len() != 1 {
        return Err(BuiltinError::new("readfile expects 1 argument (filename)"));
    }
    let filename = args[0]
        .as_str()
        .ok_or_else(|| BuiltinError::new("readfile filename must be string"))?;
    let data = fs::read_to_string(filename)
        .map_err(|e| BuiltinError::new(format!("failed to read file: {}", e)))?;
    Ok(Value::Str(data))
}

/// `writefile(filename, content)`: renders the content and writes it,
/// creating parent directories as needed
pub fn writefile(args: &[Value]) -> BuiltinResult {
    if args.len() != 2 {
        return Err(BuiltinError::new(
            "writefile expects 2 arguments (filename, content)",
        ));
    }
    let filename = args[0]
        .as_str()
        .ok_or_else(|| BuiltinError::new("writefile filename must be string"))?;
    let content = args[1].to_string();

    if let Some(dir) = Path::new(filename).parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .map_err(|e| BuiltinError::new(format!("failed to create directory: {}", e)))?;
        }
    }

    fs::write(filename, content)
        .map_err(|e| BuiltinError::new(format!("failed to write file: {}", e)))?;
    Ok(Value::Nil)
}

/// `makedir(dirname)`: creates the directory and any missing parents
pub fn makedir(args: &[Value]) -> BuiltinResult {
    if args.len() != 1 {
        return Err(BuiltinError::new("makedir expects 1 argument (dirname)"));
    }
    let dirname = args[0]
        .as_str()
        .ok_or_else(|| BuiltinError::new("makedir dirname must be string"))?;
    fs::create_dir_all(dirname)
        .map_err(|e| BuiltinError::new(format!("failed to create directory: {}", e)))?;
    Ok(Value::Nil)
}

/// `gotodir(dirname)`: changes the working directory
pub fn gotodir(args: &[Value]) -> BuiltinResult {
    if args.len() != 1 {
        return Err(BuiltinError::new("gotodir expects 1 argument (dirname)"));
    }
    let dirname = args[0]
        .as_str()
        .ok_or_else(|| BuiltinError::new("gotodir dirname must be string"))?;

    let metadata = fs::metadata(dirname).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BuiltinError::new(format!("directory does not exist: {}", dirname))
        } else {
            BuiltinError::new(format!("failed to access directory: {}", e))
        }
    })?;
    if !metadata.is_dir() {
        return Err(BuiltinError::new(format!("not a directory: {}", dirname)));
    }

    env::set_current_dir(dirname)
        .map_err(|e| BuiltinError::new(format!("failed to change directory: {}", e)))?;
    Ok(Value::Nil)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readfile_requires_string() {
        assert!(readfile(&[Value::Number(1.0)]).is_err());
        assert!(readfile(&[]).is_err());
    }

    #[test]
    fn test_readfile_missing_file() {
        let result = readfile(&[Value::Str("/nonexistent/path/file.txt".to_string())]);
        assert!(result.is_err());
    }

    #[test]
    fn test_gotodir_rejects_missing_directory() {
        let result = gotodir(&[Value::Str("/nonexistent/dir".to_string())]);
        assert_eq!(
            result.unwrap_err().message,
            "directory does not exist: /nonexistent/dir"
        );
    }

    #[test]
    fn test_write_and_read_roundtrip() {
        let dir = env::temp_dir().join("lightlang_io_test");
        let path = dir.join("nested").join("out.txt");
        let path_str = path.to_string_lossy().into_owned();

        writefile(&[Value::Str(path_str.clone()), Value::Number(42.0)]).unwrap();
        let contents = readfile(&[Value::Str(path_str)]).unwrap();
        assert_eq!(contents, Value::Str("42".to_string()));

        fs::remove_dir_all(&dir).ok();
    }
}
