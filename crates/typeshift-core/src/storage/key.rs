//! Row key encoding.

/// Size of an encoded row key in bytes.
pub const ROW_KEY_SIZE: usize = 8;

/// Prefix of the per-table row trees.
pub const ROWS_TREE_PREFIX: &str = "rows:";

/// Encode a primary id as a row key.
///
/// Big-endian encoding makes lexicographic key order match numeric id
/// order, so a tree scan returns rows in ascending id order.
pub fn encode_row_key(id: u64) -> [u8; ROW_KEY_SIZE] {
    id.to_be_bytes()
}

/// Decode a row key back into its primary id.
pub fn decode_row_key(bytes: &[u8]) -> Option<u64> {
    let buf: [u8; ROW_KEY_SIZE] = bytes.try_into().ok()?;
    Some(u64::from_be_bytes(buf))
}

/// Name of the sled tree holding the rows of `table`.
pub fn rows_tree_name(table: &str) -> String {
    format!("{}{}", ROWS_TREE_PREFIX, table)
}

/// Get current timestamp in microseconds since Unix epoch.
pub fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}
