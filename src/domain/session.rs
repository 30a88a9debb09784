use std::path::{Path, PathBuf};

use crate::domain::AnalysisResult;
use crate::error::TriageError;

const ACCEPTED_EXTENSIONS: &[&str] = &["txt", "pdf"];

/// The one payload a submission carries. An attached file always wins over
/// text typed earlier; the two are never sent together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    File(PathBuf),
    Text(String),
}

/// In-memory form state: the input pair, the in-flight flag, and the single
/// current result. Only the interaction handlers and the one response
/// handler mutate it, and at most one request is in flight at a time.
#[derive(Debug, Default)]
pub struct TriageSession {
    text: String,
    file: Option<PathBuf>,
    pending: bool,
    result: Option<AnalysisResult>,
}

impl TriageSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the text input. Returns false and keeps the old text while a
    /// file is attached, mirroring the disabled text box.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        if self.file.is_some() {
            return false;
        }
        self.text = text.into();
        true
    }

    /// Attach an email file. Anything other than .txt/.pdf is rejected and
    /// leaves the session untouched.
    pub fn attach_file(&mut self, path: impl Into<PathBuf>) -> Result<(), TriageError> {
        let path = path.into();
        if !has_accepted_extension(&path) {
            return Err(TriageError::UnsupportedFile(path.display().to_string()));
        }
        self.file = Some(path);
        Ok(())
    }

    /// Drop the attached file, re-enabling text entry.
    pub fn detach_file(&mut self) {
        self.file = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Start a submission: validate the inputs, drop the previous result,
    /// and mark the request in flight. A second call before `complete` or
    /// `fail` is rejected so only one request can be outstanding.
    pub fn begin_submission(&mut self) -> Result<Submission, TriageError> {
        if self.pending {
            return Err(TriageError::RequestPending);
        }

        let submission = if let Some(file) = &self.file {
            Submission::File(file.clone())
        } else if !self.text.is_empty() {
            Submission::Text(self.text.clone())
        } else {
            return Err(TriageError::EmptyInput);
        };

        self.result = None;
        self.pending = true;
        Ok(submission)
    }

    /// Response handler: store whatever normalization produced (`None`
    /// means "no usable result") and clear the in-flight flag.
    pub fn complete(&mut self, result: Option<AnalysisResult>) {
        self.result = result;
        self.pending = false;
    }

    /// Transport failure: the attempt is over, nothing to show.
    pub fn fail(&mut self) {
        self.pending = false;
    }

    /// Reset file, text, and result together, whatever the prior state.
    pub fn clear(&mut self) {
        self.text.clear();
        self.file = None;
        self.result = None;
    }
}

fn has_accepted_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            category: "Produtivo".to_string(),
            justification: "Pedido de suporte".to_string(),
            suggested_reply: "Vamos verificar.".to_string(),
        }
    }

    #[test]
    fn text_submission_carries_the_text() {
        let mut session = TriageSession::new();
        assert!(session.set_text("Prezado time, preciso de ajuda."));

        let submission = session.begin_submission().unwrap();
        assert_eq!(
            submission,
            Submission::Text("Prezado time, preciso de ajuda.".to_string())
        );
        assert!(session.is_pending());
    }

    #[test]
    fn file_takes_precedence_over_earlier_text() {
        let mut session = TriageSession::new();
        session.set_text("draft typed before picking a file");
        session.attach_file("email.txt").unwrap();

        let submission = session.begin_submission().unwrap();
        assert_eq!(submission, Submission::File(PathBuf::from("email.txt")));
    }

    #[test]
    fn empty_form_fails_validation() {
        let mut session = TriageSession::new();
        let err = session.begin_submission().unwrap_err();
        assert!(matches!(err, TriageError::EmptyInput));
        assert!(!session.is_pending());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let mut session = TriageSession::new();
        let err = session.attach_file("email.docx").unwrap_err();
        assert!(matches!(err, TriageError::UnsupportedFile(_)));

        // Nothing was attached, so the empty form still fails validation.
        let err = session.begin_submission().unwrap_err();
        assert!(matches!(err, TriageError::EmptyInput));
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let mut session = TriageSession::new();
        session.attach_file("EMAIL.PDF").unwrap();
        assert!(matches!(
            session.begin_submission().unwrap(),
            Submission::File(_)
        ));
    }

    #[test]
    fn text_entry_is_disabled_while_a_file_is_attached() {
        let mut session = TriageSession::new();
        session.attach_file("email.pdf").unwrap();
        assert!(!session.set_text("should be ignored"));

        session.detach_file();
        assert!(session.set_text("typed after detaching"));
        assert_eq!(
            session.begin_submission().unwrap(),
            Submission::Text("typed after detaching".to_string())
        );
    }

    #[test]
    fn resubmit_while_pending_is_rejected() {
        let mut session = TriageSession::new();
        session.set_text("hello");
        session.begin_submission().unwrap();

        let err = session.begin_submission().unwrap_err();
        assert!(matches!(err, TriageError::RequestPending));

        session.complete(Some(sample_result()));
        assert!(!session.is_pending());
        session.begin_submission().unwrap();
    }

    #[test]
    fn resubmit_is_allowed_again_after_a_failure() {
        let mut session = TriageSession::new();
        session.set_text("hello");
        session.begin_submission().unwrap();

        session.fail();
        assert!(!session.is_pending());
        assert_eq!(session.result(), None);
        session.begin_submission().unwrap();
    }

    #[test]
    fn beginning_a_submission_drops_the_previous_result() {
        let mut session = TriageSession::new();
        session.set_text("first");
        session.begin_submission().unwrap();
        session.complete(Some(sample_result()));
        assert!(session.result().is_some());

        session.begin_submission().unwrap();
        assert_eq!(session.result(), None);
    }

    #[test]
    fn completing_with_nothing_shows_no_result() {
        let mut session = TriageSession::new();
        session.set_text("hello");
        session.begin_submission().unwrap();

        session.complete(None);
        assert_eq!(session.result(), None);
        assert!(!session.is_pending());
    }

    #[test]
    fn clear_resets_everything_at_once() {
        let mut session = TriageSession::new();
        session.set_text("hello");
        session.begin_submission().unwrap();
        session.complete(Some(sample_result()));

        session.clear();
        assert_eq!(session.result(), None);
        assert!(matches!(
            session.begin_submission().unwrap_err(),
            TriageError::EmptyInput
        ));
    }
}
