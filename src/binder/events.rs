use std::sync::Arc;

use crate::http::FetchError;
use crate::release::ReleaseDescriptor;

/// Notification broadcast once per applied fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseEvent {
    Loaded(Arc<ReleaseDescriptor>),
    Failed(FetchError),
}

impl ReleaseEvent {
    pub const LOADED: &'static str = "release-loaded";
    pub const FAILED: &'static str = "release-error";

    pub fn name(&self) -> &'static str {
        match self {
            ReleaseEvent::Loaded(_) => Self::LOADED,
            ReleaseEvent::Failed(_) => Self::FAILED,
        }
    }
}
