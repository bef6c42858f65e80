//! Year-scoped sequential client codes in the form `YYYY/NNNN`.

/// SQL LIKE pattern matching every code issued in `year`.
pub fn year_prefix_pattern(year: i32) -> String {
    format!("{}/%", year)
}

/// Next code for a user who already holds `existing` codes in `year`.
/// Sequences start at 0001 and are zero-padded to four digits.
pub fn next_client_code(year: i32, existing: i64) -> String {
    format!("{}/{:04}", year, existing + 1)
}
