//! Assorted utility functions and structures.
//!
//! This module contains various utility functions and structures
//! that are used throughout the emulator core codebase.

use std::{
    fs::File,
    io::{Read, Write},
};

use crate::error::Error;

/// Reads the contents of the file at the given path into
/// a vector of bytes.
pub fn read_file(path: &str) -> Result<Vec<u8>, Error> {
    let mut file =
        File::open(path).map_err(|_| Error::CustomError(format!("Failed to open file: {path}")))?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .map_err(|_| Error::CustomError(format!("Failed to read from file: {path}")))?;
    Ok(data)
}

/// Writes the given data to the file at the given path.
pub fn write_file(path: &str, data: &[u8], flush: Option<bool>) -> Result<(), Error> {
    let mut file = File::create(path)
        .map_err(|_| Error::CustomError(format!("Failed to create file: {path}")))?;
    file.write_all(data)
        .map_err(|_| Error::CustomError(format!("Failed to write to file: {path}")))?;
    if flush.unwrap_or(true) {
        file.flush()
            .map_err(|_| Error::CustomError(format!("Failed to flush file: {path}")))?;
    }
    Ok(())
}

/// Capitalizes the first character of the given string, leaving the
/// remainder untouched.
pub fn capitalize(string: &str) -> String {
    let mut chars = string.chars();
    match chars.next() {
        None => String::new(),
        Some(chr) => chr.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::{capitalize, read_file, write_file};
    use std::{env::temp_dir, fs::remove_file};

    #[test]
    fn test_write_then_read_file() {
        let path = temp_dir().join("dmg_core_util_test.bin");
        let path = path.to_str().unwrap();
        write_file(path, &[0x01, 0x02, 0x03], Some(true)).unwrap();
        let data = read_file(path).unwrap();
        assert_eq!(data, vec![0x01, 0x02, 0x03]);
        remove_file(path).unwrap();
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("game boy"), "Game boy");
        assert_eq!(capitalize(""), "");
    }
}
