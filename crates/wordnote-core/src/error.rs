#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid date key: {0} (expected YYYY-MM-DD)")]
    InvalidDateKey(String),

    #[error("Invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
}
