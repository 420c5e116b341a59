//! Document Session
//!
//! Interactive state for one user: the current document (single slot,
//! last writer wins) and an append-only chat transcript. The transcript is
//! for display only; refine always sees just the current document and the
//! latest instruction.

use std::path::Path;

use super::{ReadmeService, UNCHANGED_NOTICE};
use crate::types::{
    ChatTurn, GeneratedDocument, ReadmeError, Result, ValidationError,
};

pub const UPDATED_NOTICE: &str = "Document updated.";

#[derive(Debug, Clone, Default)]
pub struct DocumentSession {
    current: Option<GeneratedDocument>,
    transcript: Vec<ChatTurn>,
}

impl DocumentSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: GeneratedDocument) -> Self {
        Self {
            current: Some(document),
            transcript: Vec::new(),
        }
    }

    /// Replace the current document (after a fresh generation)
    pub fn set_document(&mut self, document: GeneratedDocument) {
        self.current = Some(document);
    }

    pub fn current(&self) -> Option<&GeneratedDocument> {
        self.current.as_ref()
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    /// Apply one chat instruction. Records the user turn and an assistant
    /// acknowledgement; the current document only changes on success.
    pub async fn send(&mut self, service: &ReadmeService, instruction: &str) -> &ChatTurn {
        self.transcript.push(ChatTurn::user(instruction));

        let reply = match self.apply(service, instruction).await {
            Ok(true) => UPDATED_NOTICE.to_string(),
            Ok(false) => UNCHANGED_NOTICE.to_string(),
            Err(e) => format!("Error: {}", e),
        };

        self.transcript.push(ChatTurn::assistant(reply));
        &self.transcript[self.transcript.len() - 1]
    }

    async fn apply(&mut self, service: &ReadmeService, instruction: &str) -> Result<bool> {
        let current = self
            .current
            .as_ref()
            .ok_or_else(|| ValidationError::missing_field("document"))?;

        let outcome = service.refine(current.as_str(), instruction).await?;
        self.current = Some(outcome.document);
        Ok(outcome.changed)
    }

    /// Write the current document to `path` as markdown
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let document = self
            .current
            .as_ref()
            .ok_or_else(|| ReadmeError::from(ValidationError::missing_field("document")))?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut content = document.as_str().to_string();
        if !content.ends_with('\n') {
            content.push('\n');
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readme::testing::{RecordingProvider, StaticSource};
    use crate::types::ChatRole;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn service(reply: RecordingProvider) -> (ReadmeService, Arc<RecordingProvider>) {
        let provider = Arc::new(reply);
        let service = ReadmeService::new(provider.clone(), Arc::new(StaticSource::widget()));
        (service, provider)
    }

    #[tokio::test]
    async fn test_successful_refine_replaces_document() {
        let (service, _) = service(RecordingProvider::replying("# New"));
        let mut session = DocumentSession::with_document(GeneratedDocument::new("# Old"));

        let ack = session.send(&service, "rename it").await;
        assert_eq!(ack.role, ChatRole::Assistant);
        assert_eq!(ack.content, UPDATED_NOTICE);

        assert_eq!(session.current().unwrap().as_str(), "# New");
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[0].role, ChatRole::User);
        assert_eq!(session.transcript()[0].content, "rename it");
    }

    #[tokio::test]
    async fn test_failed_refine_keeps_document() {
        let (service, _) = service(RecordingProvider::failing("quota exceeded"));
        let mut session = DocumentSession::with_document(GeneratedDocument::new("# Old"));

        let ack = session.send(&service, "rename it").await;
        assert!(ack.content.starts_with("Error: "));
        assert!(ack.content.contains("quota exceeded"));
        assert_eq!(session.current().unwrap().as_str(), "# Old");
    }

    #[tokio::test]
    async fn test_unchanged_refine_acknowledged() {
        let (service, _) = service(RecordingProvider::replying("# Old"));
        let mut session = DocumentSession::with_document(GeneratedDocument::new("# Old"));

        let ack = session.send(&service, "improve").await;
        assert_eq!(ack.content, UNCHANGED_NOTICE);
    }

    #[tokio::test]
    async fn test_only_latest_instruction_reaches_model() {
        let (service, provider) = service(RecordingProvider::replying("# Next"));
        let mut session = DocumentSession::with_document(GeneratedDocument::new("# Old"));

        session.send(&service, "first instruction").await;
        session.send(&service, "second instruction").await;

        let prompt = provider.last_prompt().unwrap();
        assert!(prompt.contains("second instruction"));
        assert!(!prompt.contains("first instruction"));
        assert!(prompt.contains("# Next"));
        assert_eq!(session.transcript().len(), 4);
    }

    #[tokio::test]
    async fn test_send_without_document() {
        let (service, provider) = service(RecordingProvider::replying("# x"));
        let mut session = DocumentSession::new();

        let ack = session.send(&service, "anything").await;
        assert!(ack.content.starts_with("Error: "));
        assert_eq!(provider.calls(), 0);
        assert!(session.current().is_none());
    }

    #[test]
    fn test_save_to() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out/README.md");

        let session = DocumentSession::with_document(GeneratedDocument::new("# Saved"));
        session.save_to(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Saved\n");

        let empty = DocumentSession::new();
        assert!(empty.save_to(&temp_dir.path().join("x.md")).is_err());
    }
}
