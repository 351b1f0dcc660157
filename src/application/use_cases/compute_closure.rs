use crate::application::dto::{ClosureRequest, ClosureResponse, RegistrySettings};
use crate::model_management::domain::BundleId;
use crate::model_management::services::DependencyClosureResolver;
use crate::ports::inbound::ModelQueryPort;
use crate::ports::outbound::DependencyGraph;
use crate::shared::error::ModelError;
use crate::shared::Result;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;

/// ComputeClosureUseCase - Answers "everything these bundles need"
///
/// # Type Parameters
/// * `Q` - ModelQueryPort implementation (usually the registry)
/// * `G` - DependencyGraph implementation
pub struct ComputeClosureUseCase<Q, G> {
    query: Q,
    graph: Arc<G>,
    resolver: DependencyClosureResolver,
    implicit: Vec<BundleId>,
}

impl<Q, G> ComputeClosureUseCase<Q, G>
where
    Q: ModelQueryPort,
    G: DependencyGraph,
{
    /// Creates a use case that resolves closures the way `settings` describes
    pub fn new(query: Q, graph: Arc<G>, settings: &RegistrySettings) -> Self {
        Self {
            query,
            graph,
            resolver: DependencyClosureResolver::from_settings(settings),
            implicit: settings.implicit_dependencies.clone(),
        }
    }

    /// Executes the closure query
    ///
    /// # Errors
    /// `ModelError::UnknownBundle` for an id the registry does not know, and
    /// `ModelError::Validation` when no id is requested
    pub fn execute(&self, request: ClosureRequest) -> Result<ClosureResponse> {
        if request.bundle_ids.is_empty() {
            return Err(ModelError::Validation {
                message: "at least one bundle id is required".to_string(),
            }
            .into());
        }

        let mut seeds = Vec::with_capacity(request.bundle_ids.len());
        let mut seed_ids = BTreeSet::new();
        for raw in &request.bundle_ids {
            let model = self
                .query
                .find_model(raw)
                .ok_or_else(|| ModelError::UnknownBundle { id: raw.clone() })?;
            if let Some(id) = model.id() {
                seed_ids.insert(id.clone());
            }
            seeds.push(model);
        }

        let bundles = self.resolver.closure(
            &seeds,
            &self.implicit,
            self.graph.as_ref(),
            request.exclude_self,
        );
        info!(
            seeds = seed_ids.len(),
            bundles = bundles.len(),
            "computed dependency closure"
        );

        Ok(ClosureResponse::new(seed_ids, bundles))
    }
}
