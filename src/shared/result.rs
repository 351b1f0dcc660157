/// Type alias for Result with anyhow::Error as the error type.
/// Ports and adapters return this; domain failures are `ModelError` values wrapped inside.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
