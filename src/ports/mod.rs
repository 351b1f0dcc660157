/// Ports module defining interfaces for hexagonal architecture
///
/// This module contains both inbound ports (driving ports - registry queries)
/// and outbound ports (driven ports - dependency graph, classpath, workspace, ...).
pub mod inbound;
pub mod outbound;
