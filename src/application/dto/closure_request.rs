/// ClosureRequest - Request DTO for the closure use case
#[derive(Debug, Clone)]
pub struct ClosureRequest {
    /// Identifiers of the requested bundles; `system.bundle` is accepted
    pub bundle_ids: Vec<String>,
    /// Drop the requested bundles themselves from the result
    pub exclude_self: bool,
}

impl ClosureRequest {
    pub fn new(bundle_ids: Vec<String>, exclude_self: bool) -> Self {
        Self {
            bundle_ids,
            exclude_self,
        }
    }
}
