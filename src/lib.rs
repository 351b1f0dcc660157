//! bundle-model - Live registry of bundle models for a plug-in workspace
//!
//! This library keeps a registry of bundle models coming from two sources
//! (workspace projects and an externally installed bundle set), mirrors them
//! into a dependency graph, computes dependency closures and propagates
//! changes to the classpath containers of dependent projects. It follows
//! hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`model_management`): Model types, policies and graph algorithms
//! - **Application Layer** (`application`): The registry and closure use cases
//! - **Ports** (`ports`): Interface definitions for collaborators
//! - **Adapters** (`adapters`): In-memory, filesystem and console implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use bundle_model::prelude::*;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<()> {
//! let snapshot = FileSystemSnapshotReader::new().read_snapshot(Path::new("snapshot.json"))?;
//! let settings = RegistrySettings::default();
//!
//! let graph = Arc::new(InMemoryDependencyGraph::new());
//! let classpath = ClosureClasspathManager::new(
//!     Arc::clone(&graph),
//!     DependencyClosureResolver::from_settings(&settings),
//! );
//! let registry = ModelRegistry::new(
//!     StaticModelProvider::new(snapshot.workspace),
//!     StaticModelProvider::new(snapshot.external),
//!     Arc::clone(&graph),
//!     classpath,
//!     InMemoryWorkspace::new(snapshot.projects),
//!     TracingSearchIndex::new(),
//!     settings.clone(),
//! );
//!
//! let closure = ComputeClosureUseCase::new(&registry, graph, &settings);
//! let response = closure.execute(ClosureRequest::new(vec!["com.example.app".into()], false))?;
//! println!("{}", TextFormatter::new().format_closure(&response)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod model_management;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{StdoutPresenter, TracingSearchIndex};
    pub use crate::adapters::outbound::filesystem::FileSystemSnapshotReader;
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
    pub use crate::adapters::outbound::memory::{
        ClosureClasspathManager, InMemoryDependencyGraph, InMemoryWorkspace, StaticModelProvider,
    };
    pub use crate::application::dto::{
        ClosureRequest, ClosureResponse, OutputFormat, ProviderEvent, RegistrySettings,
        WorkspaceProject, WorkspaceSnapshot,
    };
    pub use crate::application::use_cases::{ComputeClosureUseCase, ModelRegistry};
    pub use crate::model_management::domain::{
        AffectedSet, BundleId, BundleManifest, ChangeDelta, ClasspathContainer, DeltaKind,
        ModelChange, ModelEntry, ModelSource, ModelVariant, ProjectRef,
    };
    pub use crate::model_management::services::{
        AffectedUnitsPropagator, DependencyClosureResolver,
    };
    pub use crate::ports::inbound::ModelQueryPort;
    pub use crate::ports::outbound::{
        ClasspathManager, DependencyGraph, ModelChangeListener, ModelProvider, OutputPresenter,
        ProjectWorkspace, ReportFormatter, SearchIndex, SnapshotReader,
    };
    pub use crate::shared::error::ModelError;
    pub use crate::shared::Result;
}
