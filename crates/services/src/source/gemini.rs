//! Gemini-backed question source.

use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use quiz_core::model::{OPTION_COUNT, Question, QuestionDraft};

use crate::error::QuestionSourceError;
use crate::source::{QuestionSource, finalize_batch};

/// Instruction payload sent with every batch request. Topic mix, context
/// variety, and the Indonesian explanation language are fixed policy.
const PROMPT: &str = "Buatkan 25 soal pilihan ganda bahasa Inggris yang menantang dan edukatif. \
    Topik harus tercampur rata antara: Simple Present Tense, Simple Past Tense, dan Present Perfect Tense. \
    Konteks kalimat harus bervariasi (sehari-hari, akademik, bisnis). \
    Pastikan setiap soal memiliki satu jawaban yang benar dan penjelasan (pembahasan) yang jelas dalam Bahasa Indonesia.";

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl GeminiConfig {
    /// Read the adapter configuration from the environment.
    ///
    /// Returns `None` when `GEMINI_API_KEY` is missing or blank; base URL
    /// and model fall back to sensible defaults. The config is meant to be
    /// read once at startup and passed in explicitly; the adapter itself
    /// never touches the environment.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("GEMINI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url = env::var("QUIZ_AI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into());
        let model = env::var("QUIZ_AI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// Question source backed by the Gemini `generateContent` endpoint.
///
/// One request per batch: the structured-output schema asks for exactly the
/// wire shape `QuestionDraft` expects, and the response is validated,
/// shuffled, and re-indexed before anything reaches a session.
pub struct GeminiQuestionSource {
    client: Client,
    config: GeminiConfig,
}

impl GeminiQuestionSource {
    #[must_use]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn generate(&self) -> Result<String, QuestionSourceError> {
        let payload = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: PROMPT.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: batch_schema(),
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(QuestionSourceError::HttpStatus(response.status()));
        }

        let body: GenerateContentResponse = response.json().await?;
        extract_text(body)
    }
}

#[async_trait]
impl QuestionSource for GeminiQuestionSource {
    async fn fetch(&self) -> Result<Vec<Question>, QuestionSourceError> {
        let payload = self.generate().await?;
        let drafts = parse_drafts(&payload)?;
        finalize_batch(drafts)
    }
}

//
// ─── WIRE TYPES ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

/// Raw question record as emitted by the model, before validation.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    text: String,
    options: Vec<String>,
    #[serde(rename = "correctIndex")]
    correct_index: usize,
    explanation: String,
    topic: String,
}

/// Structured-output schema for one batch: an array of question objects
/// with four options and a 0-3 correct index.
fn batch_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "text": {
                    "type": "STRING",
                    "description": "The question sentence with a blank space or a question asking for the correct form.",
                },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": format!("Array of {OPTION_COUNT} possible answers."),
                },
                "correctIndex": {
                    "type": "INTEGER",
                    "description": "The index (0-3) of the correct answer in the options array.",
                },
                "explanation": {
                    "type": "STRING",
                    "description": "Explanation of why the answer is correct in Indonesian.",
                },
                "topic": {
                    "type": "STRING",
                    "description": "The tense topic of the question (Present, Past, or Present Perfect).",
                },
            },
            "required": ["text", "options", "correctIndex", "explanation", "topic"],
        },
    })
}

fn extract_text(response: GenerateContentResponse) -> Result<String, QuestionSourceError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .map(|part| part.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or(QuestionSourceError::EmptyResponse)
}

fn parse_drafts(payload: &str) -> Result<Vec<QuestionDraft>, QuestionSourceError> {
    let raw: Vec<RawQuestion> = serde_json::from_str(payload)?;
    Ok(raw
        .into_iter()
        .map(|question| QuestionDraft {
            text: question.text,
            options: question.options,
            correct_index: question.correct_index,
            explanation: question.explanation,
            topic: question.topic,
        })
        .collect())
}
