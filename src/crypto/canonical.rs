pub const DELIMITER: &str = ":";

/// Builds the string hashed for inbound verification: `<version>:<timestamp>:<body>`.
///
/// The timestamp must be the string as received, not a re-formatted number.
pub fn canonicalize(version: &str, timestamp: &str, body: &str) -> String {
    [version, timestamp, body].join(DELIMITER)
}

/// Builds the string hashed for outbound signing of a single header: `<name>: <value>`.
pub fn header_line(name: &str, value: &str) -> String {
    format!("{}{} {}", name, DELIMITER, value)
}
