//! Google Translate text-to-speech client.
//!
//! The endpoint accepts at most 100 characters per request, so text is split
//! into chunks on word boundaries and the MP3 segments are concatenated.

use async_trait::async_trait;
use tracing::debug;

use super::{SpeechSynthesis, ensure_success, make_http_client};
use crate::domains::tools::error::HandlerFailure;

const DEFAULT_BASE_URL: &str = "https://translate.google.com";
const MAX_CHUNK_CHARS: usize = 100;

pub struct GoogleTts {
    http: reqwest::Client,
    base_url: String,
}

impl GoogleTts {
    pub fn new() -> Self {
        Self {
            http: make_http_client(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for GoogleTts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechSynthesis for GoogleTts {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, HandlerFailure> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(HandlerFailure::backend("No text to synthesize"));
        }

        let total = chunks.len().to_string();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            debug!(idx, total = chunks.len(), "Requesting TTS chunk");
            let idx = idx.to_string();
            let textlen = chunk.chars().count().to_string();
            let response = self
                .http
                .get(format!("{}/translate_tts", self.base_url))
                .query(&[
                    ("ie", "UTF-8"),
                    ("q", chunk.as_str()),
                    ("tl", lang),
                    ("total", total.as_str()),
                    ("idx", idx.as_str()),
                    ("textlen", textlen.as_str()),
                    ("client", "tw-ob"),
                ])
                .send()
                .await?;
            let bytes = ensure_success("Google TTS", response).await?.bytes().await?;
            audio.extend_from_slice(&bytes);
        }
        Ok(audio)
    }
}

/// Split `text` into chunks of at most `max` characters.
///
/// Words are kept whole unless a single word exceeds `max`.
pub fn chunk_text(text: &str, max: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word_len = word.chars().count();
        let mut word = word.to_string();

        while word_len > max {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let head: String = word.chars().take(max).collect();
            word = word.chars().skip(max).collect();
            word_len -= max;
            chunks.push(head);
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(&word);
        current_len += word_len;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
