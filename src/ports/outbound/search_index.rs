/// SearchIndex port for the secondary combined-search container
pub trait SearchIndex {
    /// Rebuilds the search container; called at most once per registry event
    fn refresh_container(&self);
}
