/// Inbound ports (Driving ports) - Registry query interfaces
///
/// These ports define the interfaces that application use cases and
/// adapters (e.g., the CLI) use to read the model registry.
pub mod model_query_port;

pub use model_query_port::ModelQueryPort;
