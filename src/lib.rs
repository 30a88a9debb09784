//! Client for the email triage service: submit an email as text or a file,
//! normalize the service's loosely-typed response, and render the triage.

pub mod api;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infra;

pub use error::TriageError;
