use std::path::Path;

use async_trait::async_trait;
use crate::application::errors::TranscriptionError;

/// Speech-to-text provider
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe the audio file at `path`; `Ok(None)` when the provider returned no text
    async fn transcribe(&self, path: &Path) -> Result<Option<String>, TranscriptionError>;
}
