//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: an interactive front end driving a macro session until the user quits.
pub trait InputPort {
    fn run(&mut self) -> Result<(), DomainError>;
}
