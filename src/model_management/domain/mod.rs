pub mod bundle_id;
pub mod change_delta;
pub mod classpath;
pub mod graph_node;
pub mod model_entry;
pub mod model_variant;

pub use bundle_id::{BundleId, ProjectRef};
pub use change_delta::{ChangeDelta, DeltaKind, ModelChange};
pub use classpath::{AffectedSet, ClasspathContainer};
pub use graph_node::{DependencyGraphNode, GraphChange, GraphDelta, ImportEdge, NodeId, RequiredEdge};
pub use model_entry::{EntryTable, ModelEntry};
pub use model_variant::{BundleManifest, ModelSource, ModelVariant, RequiredBundle};
