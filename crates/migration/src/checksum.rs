use sha2::{Digest, Sha512};

const UP_SENTINEL: &str = "$$__UP__$$\n";
const DOWN_SENTINEL: &str = "$$__DOWN__$$\n";

/// Content hash over both bodies of a migration.
///
/// Line endings are normalized to `\n` before hashing, so a file checked out with CRLF
/// hashes the same as its LF twin.
pub fn checksum(up: &str, down: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(UP_SENTINEL.as_bytes());
    hasher.update(normalize_line_endings(up).as_bytes());
    hasher.update(DOWN_SENTINEL.as_bytes());
    hasher.update(normalize_line_endings(down).as_bytes());
    hex::encode(hasher.finalize())
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
