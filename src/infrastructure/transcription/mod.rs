//! Whisper speech-to-text client

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::application::errors::TranscriptionError;
use crate::domain::traits::SpeechToText;

/// OpenAI transcription endpoint
const API_URL: &str = "https://api.openai.com/v1/audio/transcriptions";
const MODEL: &str = "whisper-1";
const LANGUAGE: &str = "en";

#[derive(Deserialize, Debug)]
struct TranscriptionResponse {
    text: Option<String>,
}

/// Transcribes voice notes with OpenAI Whisper
pub struct WhisperTranscriber {
    api_key: String,
    client: Client,
}

impl WhisperTranscriber {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl SpeechToText for WhisperTranscriber {
    async fn transcribe(&self, path: &Path) -> Result<Option<String>, TranscriptionError> {
        let audio = tokio::fs::read(path).await?;

        let part = Part::bytes(audio)
            .file_name("audio.ogg")
            .mime_str("audio/ogg")
            .map_err(|e| TranscriptionError::Parse(e.to_string()))?;
        let form = Form::new()
            .part("file", part)
            .text("model", MODEL)
            .text("language", LANGUAGE);

        let response = self.client
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TranscriptionError::Network(e.to_string()))?;
        parse_transcription(status, &body)
    }
}

/// Only a 200 counts as success
fn parse_transcription(status: StatusCode, body: &str) -> Result<Option<String>, TranscriptionError> {
    if status != StatusCode::OK {
        tracing::error!("Transcription failed: {}", status);
        return Err(TranscriptionError::Status(status.as_u16()));
    }

    let result: TranscriptionResponse =
        serde_json::from_str(body).map_err(|e| TranscriptionError::Parse(e.to_string()))?;
    Ok(result.text)
}
