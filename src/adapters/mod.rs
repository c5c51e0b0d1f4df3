/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: the filesystem, the
/// rating service over HTTP and the console.
pub mod outbound;
