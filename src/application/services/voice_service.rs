use std::io::Write;
use std::sync::Arc;

use crate::application::errors::VoiceError;
use crate::domain::traits::SpeechToText;

/// Turns downloaded voice notes into command text
#[derive(Clone, Default)]
pub struct VoiceService {
    transcriber: Option<Arc<dyn SpeechToText>>,
}

impl VoiceService {
    pub fn new(transcriber: Option<Arc<dyn SpeechToText>>) -> Self {
        Self { transcriber }
    }

    pub fn is_enabled(&self) -> bool {
        self.transcriber.is_some()
    }

    /// Write the audio to a temporary `.ogg` file, transcribe it and remove the
    /// file whatever the outcome. Provider failures are logged and yield `None`.
    pub async fn transcribe(&self, audio: &[u8]) -> Result<Option<String>, VoiceError> {
        let Some(transcriber) = &self.transcriber else {
            tracing::warn!("Speech-to-text not configured for voice transcription");
            return Ok(None);
        };

        let mut file = tempfile::Builder::new()
            .prefix("homecontrol-voice-")
            .suffix(".ogg")
            .tempfile()?;
        file.write_all(audio)?;
        file.flush()?;

        let result = transcriber.transcribe(file.path()).await;
        file.close()?;

        match result {
            Ok(text) => Ok(text.filter(|t| !t.trim().is_empty())),
            Err(e) => {
                tracing::error!("Transcription error: {}", e);
                Ok(None)
            }
        }
    }
}
