pub mod client;

use async_trait::async_trait;

use crate::domain::{AnalysisResult, Submission};
use crate::error::TriageError;

/// Seam to the remote classification collaborator.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Send one submission and return the normalized result, or `None`
    /// when the service answered with something unusable.
    async fn analyze(
        &self,
        submission: &Submission,
    ) -> Result<Option<AnalysisResult>, TriageError>;
}

pub use client::HttpAnalyzer;
