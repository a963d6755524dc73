use std::{backtrace::Backtrace, fs, io, path::Path};

use snafu::Snafu;

#[derive(Debug, Snafu)]
pub enum FileError {
    #[snafu(transparent)]
    Io { source: io::Error },
    #[snafu(display("the file '{path}' was not found:\n{backtrace}"))]
    FileNotFound { path: String, backtrace: Backtrace },
    #[snafu(display("failed to read file '{path}', ran out of memory:\n{backtrace}"))]
    FileOutOfMemory { path: String, backtrace: Backtrace },
    #[snafu(display("the file '{path}' is not valid UTF-8:\n{backtrace}"))]
    InvalidUtf8 { path: String, backtrace: Backtrace },
}

/// Wrapper for [`fs::read_to_string`] with clearer errors.
pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String, FileError> {
    let path = path.as_ref();
    let string = match fs::read_to_string(path) {
        Ok(string) => string,
        Err(err) => {
            let path = path.to_string_lossy();
            match err.kind() {
                io::ErrorKind::NotFound => return FileNotFoundSnafu { path }.fail(),
                io::ErrorKind::OutOfMemory => return FileOutOfMemorySnafu { path }.fail(),
                io::ErrorKind::InvalidData => return InvalidUtf8Snafu { path }.fail(),
                _ => Err(err)?,
            }
        }
    };
    Ok(string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let result = read_to_string("this/path/does/not/exist.txt");
        assert!(matches!(result, Err(FileError::FileNotFound { .. })));
    }
}
