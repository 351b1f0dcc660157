/// Use cases module containing application business logic orchestration
mod compute_closure;
mod model_registry;

pub use compute_closure::ComputeClosureUseCase;
pub use model_registry::ModelRegistry;
