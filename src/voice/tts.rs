//! Text-to-speech synthesis client
//!
//! Thin client over the cloud speech endpoint. The provider offers two engine
//! tiers; not every voice supports both, so a rejected pairing is an expected
//! runtime failure that the caller may retry on the other tier.

use reqwest::StatusCode;

use crate::{Error, Result};

/// Synthesis engine tier offered by the speech provider
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Engine {
    /// Concatenative tier; cheaper, supported by most voices
    Standard,
    /// Neural tier; higher quality, narrower voice support
    Neural,
}

impl Engine {
    /// Wire name of the engine tier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Neural => "neural",
        }
    }
}

/// Classified synthesis failure, derived from the provider's HTTP status
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// Provider rejected the voice/engine pairing or the request shape
    InvalidVoiceEngine,
    /// Credentials missing or not permitted for this endpoint
    AccessDenied,
    /// Provider throttled the request
    Throttled,
    /// Anything else (5xx, unexpected statuses)
    Other,
}

impl FailureKind {
    /// Classify a non-success HTTP status from the provider
    #[must_use]
    pub const fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::InvalidVoiceEngine,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::AccessDenied,
            StatusCode::TOO_MANY_REQUESTS => Self::Throttled,
            _ => Self::Other,
        }
    }

    /// Short label for log lines and error messages
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidVoiceEngine => "invalid voice/engine",
            Self::AccessDenied => "access denied",
            Self::Throttled => "throttled",
            Self::Other => "other",
        }
    }
}

/// Synthesizes speech from text via the cloud speech endpoint
pub struct Synthesizer {
    client: reqwest::Client,
    url: String,
    api_key: String,
    output_format: String,
}

impl Synthesizer {
    /// Create a new synthesizer for the given endpoint
    ///
    /// # Errors
    ///
    /// Returns error if the API key is empty.
    pub fn new(url: String, api_key: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "speech API key required for TTS (HERALD_TTS_API_KEY)".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            url,
            api_key,
            output_format: "mp3".to_string(),
        })
    }

    /// Synthesize text to speech on the given engine tier
    ///
    /// # Returns
    ///
    /// Audio bytes (MP3 format)
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the provider rejects it; provider
    /// rejections carry a [`FailureKind`] classification in the message.
    pub async fn synthesize(&self, text: &str, voice: &str, engine: Engine) -> Result<Vec<u8>> {
        #[derive(serde::Serialize)]
        struct SpeechRequest<'a> {
            text: &'a str,
            voice: &'a str,
            engine: &'a str,
            output_format: &'a str,
        }

        let request = SpeechRequest {
            text,
            voice,
            engine: engine.as_str(),
            output_format: &self.output_format,
        };

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let kind = FailureKind::from_status(status);
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Tts(format!(
                "{} engine failed ({}, {status}): {body}",
                engine.as_str(),
                kind.as_str(),
            )));
        }

        let audio = response.bytes().await?;
        Ok(audio.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_provider_statuses() {
        assert_eq!(
            FailureKind::from_status(StatusCode::BAD_REQUEST),
            FailureKind::InvalidVoiceEngine
        );
        assert_eq!(
            FailureKind::from_status(StatusCode::UNAUTHORIZED),
            FailureKind::AccessDenied
        );
        assert_eq!(
            FailureKind::from_status(StatusCode::FORBIDDEN),
            FailureKind::AccessDenied
        );
        assert_eq!(
            FailureKind::from_status(StatusCode::TOO_MANY_REQUESTS),
            FailureKind::Throttled
        );
        assert_eq!(
            FailureKind::from_status(StatusCode::INTERNAL_SERVER_ERROR),
            FailureKind::Other
        );
    }

    #[test]
    fn rejects_empty_api_key() {
        let result = Synthesizer::new("https://example.test/v1/speech".to_string(), String::new());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn engine_wire_names() {
        assert_eq!(Engine::Standard.as_str(), "standard");
        assert_eq!(Engine::Neural.as_str(), "neural");
    }
}
