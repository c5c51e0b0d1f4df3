/// Shared kernel - error types and helpers used by every layer
pub mod error;
pub mod fs_guard;
mod result;

pub use result::Result;
