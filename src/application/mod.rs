/// Application layer - Use cases, services and DTOs
///
/// Orchestrates the rating_tree domain and reaches infrastructure only
/// through the outbound ports.
pub mod dto;
pub mod services;
pub mod use_cases;
