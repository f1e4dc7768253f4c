//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the domain's driving port and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::ProfileCommand;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub profiles: Arc<dyn ProfileCommand>,
}

impl HttpState {
    /// Create a new state from the driving port implementation.
    pub fn new(profiles: Arc<dyn ProfileCommand>) -> Self {
        Self { profiles }
    }
}
