use crate::model_management::domain::{AffectedSet, BundleId, ClasspathContainer, ModelVariant, ProjectRef};
use crate::model_management::services::DependencyClosureResolver;
use crate::ports::outbound::{ClasspathManager, DependencyGraph};
use crate::shared::error::ModelError;
use crate::shared::Result;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

/// ClosureClasspathManager adapter computing containers from dependency closures
///
/// A workspace bundle's container lists every bundle in its closure except
/// itself. Installed containers are kept in memory. Clones share state, so a
/// handle kept by the caller observes what the registry installs.
pub struct ClosureClasspathManager<G> {
    graph: Arc<G>,
    resolver: DependencyClosureResolver,
    implicit: Vec<BundleId>,
    installed: Arc<DashMap<ProjectRef, ClasspathContainer>>,
    last_batch: Arc<Mutex<AffectedSet>>,
    batches: Arc<AtomicUsize>,
}

impl<G> Clone for ClosureClasspathManager<G> {
    fn clone(&self) -> Self {
        Self {
            graph: Arc::clone(&self.graph),
            resolver: self.resolver.clone(),
            implicit: self.implicit.clone(),
            installed: Arc::clone(&self.installed),
            last_batch: Arc::clone(&self.last_batch),
            batches: Arc::clone(&self.batches),
        }
    }
}

impl<G: DependencyGraph> ClosureClasspathManager<G> {
    pub fn new(graph: Arc<G>, resolver: DependencyClosureResolver) -> Self {
        Self {
            graph,
            resolver,
            implicit: Vec::new(),
            installed: Arc::new(DashMap::new()),
            last_batch: Arc::new(Mutex::new(AffectedSet::new())),
            batches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Bundles appended to every container
    pub fn with_implicit(mut self, implicit: Vec<BundleId>) -> Self {
        self.implicit = implicit;
        self
    }

    pub fn installed(&self, project: &ProjectRef) -> Option<ClasspathContainer> {
        self.installed.get(project).map(|c| c.clone())
    }

    /// The most recently installed batch
    pub fn last_batch(&self) -> AffectedSet {
        self.last_batch
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of `install_containers` calls so far
    pub fn batch_count(&self) -> usize {
        self.batches.load(Ordering::SeqCst)
    }
}

impl<G: DependencyGraph> ClasspathManager for ClosureClasspathManager<G> {
    fn build_container(&self, model: &ModelVariant) -> Result<ClasspathContainer> {
        let Some(id) = model.id().cloned() else {
            return Err(ModelError::Validation {
                message: format!(
                    "model at {} has no bundle id",
                    model.location().display()
                ),
            }
            .into());
        };

        let closure = self.resolver.closure(
            std::slice::from_ref(model),
            &self.implicit,
            self.graph.as_ref(),
            true,
        );
        debug!(bundle = %id, entries = closure.len(), "computed classpath container");

        Ok(ClasspathContainer::new(
            id,
            closure.into_iter().map(|b| b.to_string()).collect(),
        ))
    }

    fn install_containers(&self, affected: AffectedSet) -> Result<()> {
        for (project, container) in affected.iter() {
            self.installed.insert(project.clone(), container.clone());
        }
        let batch = self.batches.fetch_add(1, Ordering::SeqCst) + 1;
        info!(batch, projects = affected.len(), "installed classpath containers");

        *self
            .last_batch
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = affected;
        Ok(())
    }
}
