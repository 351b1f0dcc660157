use crate::model_management::domain::ChangeDelta;

/// Receives the change delta of every registry mutation
///
/// Listeners may add or remove listeners from inside the callback; such
/// changes take effect from the next dispatch.
pub trait ModelChangeListener: Send + Sync {
    fn models_changed(&self, delta: &ChangeDelta);
}
