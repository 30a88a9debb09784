use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::debug;

use crate::api::Analyzer;
use crate::domain::{extract_analysis, AnalysisResult, Submission};
use crate::error::TriageError;

const ANALYZE_PATH: &str = "/analyze";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for the analysis endpoint. One POST per submission, no
/// retries, no streaming.
#[derive(Debug, Clone)]
pub struct HttpAnalyzer {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAnalyzer {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, ANALYZE_PATH)
    }

    /// Reachability probe for `health`. Any HTTP answer counts as
    /// reachable; only a connection failure is an error.
    pub async fn probe(&self) -> Result<(), TriageError> {
        self.client
            .get(&self.base_url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| TriageError::Transport(e.to_string()))
    }

    /// One multipart form with exactly one field: the file blob under
    /// `file`, otherwise the raw text under `text_input`.
    async fn build_form(submission: &Submission) -> Result<Form, TriageError> {
        match submission {
            Submission::File(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|source| TriageError::FileRead {
                        path: path.clone(),
                        source,
                    })?;
                let file_name = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or("email.txt")
                    .to_string();
                let part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(mime_for(path))
                    .map_err(|e| TriageError::Transport(e.to_string()))?;
                Ok(Form::new().part("file", part))
            }
            Submission::Text(text) => Ok(Form::new().text("text_input", text.clone())),
        }
    }
}

#[async_trait]
impl Analyzer for HttpAnalyzer {
    async fn analyze(
        &self,
        submission: &Submission,
    ) -> Result<Option<AnalysisResult>, TriageError> {
        let form = Self::build_form(submission).await?;

        let response = self
            .client
            .post(self.endpoint())
            .multipart(form)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| TriageError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TriageError::Status { status, body });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TriageError::Transport(e.to_string()))?;
        debug!("analysis response decoded");

        Ok(extract_analysis(&body))
    }
}

fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => "application/pdf",
        Some(ext) if ext.eq_ignore_ascii_case("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn endpoint_joins_base_url_and_path() {
        let analyzer = HttpAnalyzer::new("http://localhost:8000/");
        assert_eq!(analyzer.endpoint(), "http://localhost:8000/analyze");

        let analyzer = HttpAnalyzer::new("http://localhost:8000");
        assert_eq!(analyzer.endpoint(), "http://localhost:8000/analyze");
    }

    #[test]
    fn mime_type_follows_the_extension() {
        assert_eq!(mime_for(Path::new("email.txt")), "text/plain");
        assert_eq!(mime_for(Path::new("email.PDF")), "application/pdf");
        assert_eq!(mime_for(Path::new("email")), "application/octet-stream");
    }

    #[tokio::test]
    async fn file_form_reads_the_attached_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("email.txt");
        std::fs::write(&path, "Prezado time, preciso de ajuda.").unwrap();

        let form = HttpAnalyzer::build_form(&Submission::File(path)).await;
        assert!(form.is_ok());
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let err = HttpAnalyzer::build_form(&Submission::File(PathBuf::from(
            "/nonexistent/email.txt",
        )))
        .await
        .unwrap_err();
        assert!(matches!(err, TriageError::FileRead { .. }));
    }

    #[tokio::test]
    async fn text_form_builds_without_touching_the_filesystem() {
        let form = HttpAnalyzer::build_form(&Submission::Text("hello".to_string())).await;
        assert!(form.is_ok());
    }
}
