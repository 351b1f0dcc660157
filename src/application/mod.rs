/// Application layer - Use cases and DTOs
///
/// This layer owns the model registry and orchestrates domain services,
/// reaching infrastructure only through ports.
pub mod dto;
pub mod use_cases;
