//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::ModelEvent;

/// Rendering collaborator. Receives every model change in order and reflects it.
/// Must not call back into the session.
pub trait ModelObserver: Send + Sync {
    fn notify(&self, event: &ModelEvent);
}
