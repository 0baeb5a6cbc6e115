//! Request-document JSON reading: from a file argument or from stdin.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::config::RequestDocument;

/// Reads and parses a [`RequestDocument`] from a file path.
///
/// # Errors
///
/// Returns an `io::Error` if the file cannot be read, or wraps a JSON
/// parse failure as an `io::Error` of kind `InvalidData`.
pub fn read_request_file(path: &Path) -> io::Result<RequestDocument> {
    let body = fs::read_to_string(path)?;
    parse_request(&body)
}

/// Reads and parses a [`RequestDocument`] from stdin.
///
/// # Errors
///
/// Returns an `io::Error` if stdin cannot be read, or wraps a JSON parse
/// failure as an `io::Error` of kind `InvalidData`.
pub fn read_request_stdin() -> io::Result<RequestDocument> {
    let mut body = String::new();
    io::stdin().read_to_string(&mut body)?;
    parse_request(&body)
}

fn parse_request(body: &str) -> io::Result<RequestDocument> {
    serde_json::from_str(body).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
