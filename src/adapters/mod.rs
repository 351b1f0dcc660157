/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the ports: an in-memory
/// dependency graph and workspace, snapshot loading, and report rendering.
pub mod outbound;
