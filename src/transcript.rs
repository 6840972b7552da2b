/*!
 * Transcript input: token records and their extraction from recognizer JSON.
 *
 * A transcript is a JSON document holding a flat `tokens` array. Realtime
 * results nest the tokens under `segments[*].tokens` or
 * `segments[*].alternatives[*].tokens`; both layouts are accepted.
 */

use log::{debug, info};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::errors::TranscriptError;

// @struct: Recognizer output unit
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Token {
    // @field: Token text, may start with a space marking a word boundary
    #[serde(default, deserialize_with = "deserialize_text")]
    pub text: String,

    // @field: Start time in ms
    #[serde(default)]
    pub start_ms: Option<u64>,

    // @field: End time in ms
    #[serde(default)]
    pub end_ms: Option<u64>,

    // @field: Speaker id
    #[serde(default, deserialize_with = "deserialize_speaker")]
    pub speaker: Option<String>,

    // @field: Language tag
    #[serde(default)]
    pub language: Option<String>,
}

impl Token {
    /// Create a token with both timestamps known
    pub fn new(text: impl Into<String>, start_ms: u64, end_ms: u64) -> Self {
        Self {
            text: text.into(),
            start_ms: Some(start_ms),
            end_ms: Some(end_ms),
            ..Self::default()
        }
    }

    /// Create a token without timing
    pub fn untimed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Attach a speaker id
    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }
}

/// A null text is an empty token, dropped later like any other
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Speakers arrive as strings ("1", "A") or bare numbers depending on the engine
fn deserialize_speaker<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Pull the ordered token list out of a transcript document
pub fn extract_tokens(transcript: &Value) -> Result<Vec<Token>, TranscriptError> {
    let raw = match transcript.get("tokens") {
        Some(Value::Array(tokens)) => tokens.iter().map(|t| (t, None)).collect::<Vec<_>>(),
        Some(_) => return Err(TranscriptError::MissingTokens),
        None => collect_nested_tokens(transcript)?,
    };

    if raw.is_empty() {
        return Err(TranscriptError::EmptyTokens);
    }

    let mut tokens = Vec::with_capacity(raw.len());
    for (index, (value, segment_speaker)) in raw.into_iter().enumerate() {
        let mut token = Token::deserialize(value).map_err(|e| TranscriptError::InvalidToken {
            index,
            message: e.to_string(),
        })?;
        if token.speaker.is_none() {
            token.speaker = segment_speaker;
        }
        tokens.push(token);
    }

    debug!("Extracted {} tokens from transcript", tokens.len());
    Ok(tokens)
}

/// Walk `segments[*]` for token arrays, carrying a segment-level speaker down
fn collect_nested_tokens(transcript: &Value) -> Result<Vec<(&Value, Option<String>)>, TranscriptError> {
    let segments = match transcript.get("segments") {
        Some(Value::Array(segments)) => segments,
        _ => return Err(TranscriptError::MissingTokens),
    };

    let mut collected = Vec::new();
    for segment in segments {
        let speaker = match segment.get("speaker") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        if let Some(Value::Array(tokens)) = segment.get("tokens") {
            collected.extend(tokens.iter().map(|t| (t, speaker.clone())));
        }

        if let Some(Value::Array(alternatives)) = segment.get("alternatives") {
            for alternative in alternatives {
                if let Some(Value::Array(tokens)) = alternative.get("tokens") {
                    collected.extend(tokens.iter().map(|t| (t, speaker.clone())));
                }
            }
        }
    }

    Ok(collected)
}

/// Parse a transcript JSON string
pub fn parse_transcript(content: &str) -> Result<Value, TranscriptError> {
    Ok(serde_json::from_str(content)?)
}

/// Load a transcript JSON file from disk
pub fn load_transcript<P: AsRef<Path>>(path: P) -> Result<Value, TranscriptError> {
    let path = path.as_ref();
    info!("Loading transcript from {}", path.display());
    let content = fs::read_to_string(path)?;
    parse_transcript(&content)
}

/// Load a transcript file and extract its tokens in one step
pub fn load_tokens<P: AsRef<Path>>(path: P) -> Result<Vec<Token>, TranscriptError> {
    let transcript = load_transcript(path)?;
    extract_tokens(&transcript)
}
