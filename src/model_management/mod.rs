/// Domain layer for the bundle model
///
/// Pure model types, policies and graph algorithms. Nothing in here performs
/// I/O; collaborators are reached through the ports passed in by callers.
pub mod domain;
pub mod policies;
pub mod services;
