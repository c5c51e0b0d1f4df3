/// Crate-wide result type; `anyhow::Error` carries the context chain
/// added at each layer boundary.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
