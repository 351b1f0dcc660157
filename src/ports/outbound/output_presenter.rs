use crate::shared::Result;

/// OutputPresenter port for delivering a rendered report
pub trait OutputPresenter {
    fn present(&self, content: &str) -> Result<()>;
}
