mod affected_units;
mod dependency_closure;

pub use affected_units::AffectedUnitsPropagator;
pub use dependency_closure::DependencyClosureResolver;
