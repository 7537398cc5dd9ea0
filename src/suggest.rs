//! AI suggestion client.
//!
//! The completion service is an opaque [`SuggestionProvider`]: it gets the
//! current notes plus a free-text instruction and answers with JSON text.
//! Nothing the provider returns is trusted until it has passed the same
//! validation as any other note record.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::NoteDefaults;
use crate::error::{Result, ScoreError};
use crate::model::{notes_from_records, notes_to_records, Note, NoteRecord, Origin};

/// Instruction sent ahead of every structured suggestion request.
pub const SYSTEM_INSTRUCTION: &str = "You are a music composition assistant. You will be asked to provide a set of notes. \
You be given a prompt and a set of notes. The index marks the order of the notes. \
You may reuse an index to make chords & harmonies. Or continue after the index to make new notes.";

/// Name of the structured output format.
pub const SCHEMA_NAME: &str = "notes";

/// Everything a provider needs for one structured completion.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionRequest {
    pub system: String,
    /// The current score as a JSON note list
    pub notes_json: String,
    pub prompt: String,
    /// JSON schema the answer must follow
    pub schema: Value,
}

/// A completion service.
pub trait SuggestionProvider {
    /// Answer `request` with JSON text following `request.schema`.
    fn complete_structured(&self, request: &SuggestionRequest) -> Result<String>;

    /// Free-text completion, no schema.
    fn complete(&self, input: &str) -> Result<String>;
}

impl<P: SuggestionProvider + ?Sized> SuggestionProvider for &P {
    fn complete_structured(&self, request: &SuggestionRequest) -> Result<String> {
        (**self).complete_structured(request)
    }

    fn complete(&self, input: &str) -> Result<String> {
        (**self).complete(input)
    }
}

/// The shape every suggested note must have. All fields are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SuggestedNote {
    pub note_index: u32,
    pub note: String,
    pub duration: String,
    pub rest: bool,
    pub origin: Origin,
}

impl From<SuggestedNote> for NoteRecord {
    fn from(s: SuggestedNote) -> Self {
        NoteRecord {
            note_index: s.note_index,
            note: Some(s.note),
            duration: Some(s.duration),
            rest: Some(s.rest),
            origin: Some(s.origin),
            ..NoteRecord::default()
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SuggestedNotes {
    notes: Vec<SuggestedNote>,
}

/// JSON schema of the structured answer.
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "notes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "noteIndex": { "type": "number" },
                        "note": { "type": "string" },
                        "duration": { "type": "string" },
                        "rest": { "type": "boolean" },
                        "origin": { "type": "string", "enum": ["user", "ai"] }
                    },
                    "required": ["noteIndex", "note", "duration", "rest", "origin"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["notes"],
        "additionalProperties": false
    })
}

/// Validate a provider answer into notes.
///
/// Any missing or extra field, unknown duration or malformed pitch rejects
/// the whole answer.
pub fn parse_suggestion(text: &str) -> Result<Vec<Note>> {
    let parsed: SuggestedNotes =
        serde_json::from_str(text).map_err(|e| ScoreError::InvalidSuggestion(e.to_string()))?;
    let records: Vec<NoteRecord> = parsed.notes.into_iter().map(NoteRecord::from).collect();
    // Defaults never apply: every field the defaults could fill is required above.
    notes_from_records(&records, &NoteDefaults::default())
        .map_err(|e| ScoreError::InvalidSuggestion(e.to_string()))
}

/// A validated round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub score: Vec<Note>,
    pub suggestion: Vec<Note>,
}

/// Result of [`SuggestionClient::suggest_json`] as handed back to a UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Vec<NoteRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Vec<NoteRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SuggestOutcome {
    fn failed(error: &ScoreError) -> Self {
        Self {
            success: false,
            score: None,
            suggestion: None,
            error: Some(error.to_string()),
        }
    }
}

/// Result of [`SuggestionClient::prompt`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptOutcome {
    pub prompt: String,
    pub result: String,
    pub success: bool,
}

pub struct SuggestionClient<P> {
    provider: P,
    defaults: NoteDefaults,
}

impl<P: SuggestionProvider> SuggestionClient<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            defaults: NoteDefaults::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: NoteDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Ask for notes continuing or harmonising `score`.
    pub fn suggest(&self, score: &[Note], prompt: &str) -> Result<Suggestion> {
        let request = SuggestionRequest {
            system: SYSTEM_INSTRUCTION.to_string(),
            notes_json: serde_json::to_string(&notes_to_records(score))?,
            prompt: prompt.to_string(),
            schema: response_schema(),
        };
        log::debug!("requesting suggestion for {} notes", score.len());

        let answer = self.provider.complete_structured(&request)?;
        let suggestion = parse_suggestion(&answer)?;
        log::debug!("accepted {} suggested notes", suggestion.len());

        Ok(Suggestion {
            score: score.to_vec(),
            suggestion,
        })
    }

    /// [`suggest`](Self::suggest) on a JSON score. Never fails: errors come
    /// back as `success: false` with a message.
    pub fn suggest_json(&self, score_json: &str, prompt: &str) -> SuggestOutcome {
        let result = serde_json::from_str::<Vec<NoteRecord>>(score_json)
            .map_err(ScoreError::from)
            .and_then(|records| notes_from_records(&records, &self.defaults))
            .and_then(|score| self.suggest(&score, prompt));

        match result {
            Ok(s) => SuggestOutcome {
                success: true,
                score: Some(notes_to_records(&s.score)),
                suggestion: Some(notes_to_records(&s.suggestion)),
                error: None,
            },
            Err(e) => {
                log::warn!("suggestion failed: {e}");
                SuggestOutcome::failed(&e)
            }
        }
    }

    /// Plain completion of `input`.
    pub fn prompt(&self, input: &str) -> Result<PromptOutcome> {
        let result = self.provider.complete(input)?;
        Ok(PromptOutcome {
            prompt: input.to_string(),
            result,
            success: true,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════
// OpenAI-compatible provider
// ═══════════════════════════════════════════════════════════════════════

#[cfg(feature = "http")]
pub use openai::OpenAiProvider;

#[cfg(feature = "http")]
mod openai {
    use std::time::Duration;

    use serde_json::{json, Value};

    use super::{SuggestionProvider, SuggestionRequest, SCHEMA_NAME};
    use crate::error::{Result, ScoreError};

    const API_BASE_URL: &str = "https://api.openai.com";
    const STRUCTURED_MODEL: &str = "gpt-4o-2024-08-06";
    const COMPLETION_MODEL: &str = "o4-mini-2025-04-16";
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Provider backed by the `/v1/responses` endpoint.
    #[derive(Debug, Clone)]
    pub struct OpenAiProvider {
        api_key: String,
        base_url: String,
        structured_model: String,
        completion_model: String,
        timeout: Duration,
    }

    impl OpenAiProvider {
        pub fn new(api_key: impl Into<String>) -> Self {
            Self {
                api_key: api_key.into(),
                base_url: API_BASE_URL.to_string(),
                structured_model: STRUCTURED_MODEL.to_string(),
                completion_model: COMPLETION_MODEL.to_string(),
                timeout: REQUEST_TIMEOUT,
            }
        }

        /// Key from `OPENAI_API_KEY`.
        pub fn from_env() -> Result<Self> {
            std::env::var("OPENAI_API_KEY")
                .map(Self::new)
                .map_err(|_| ScoreError::Provider("OPENAI_API_KEY is not set".into()))
        }

        pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
            self.base_url = base_url.into();
            self
        }

        pub fn with_models(mut self, structured: impl Into<String>, completion: impl Into<String>) -> Self {
            self.structured_model = structured.into();
            self.completion_model = completion.into();
            self
        }

        pub fn with_timeout(mut self, timeout: Duration) -> Self {
            self.timeout = timeout;
            self
        }

        fn send(&self, body: Value) -> Result<String> {
            // One runtime per call; the library stays synchronous.
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            rt.block_on(self.send_async(body))
        }

        async fn send_async(&self, body: Value) -> Result<String> {
            let client = reqwest::Client::builder().timeout(self.timeout).build()?;
            let url = format!("{}/v1/responses", self.base_url.trim_end_matches('/'));

            let response = client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(ScoreError::Provider(format!("HTTP {status}: {text}")));
            }

            let value: Value = response.json().await?;
            output_text(&value).ok_or_else(|| ScoreError::Provider("response has no output text".into()))
        }
    }

    impl SuggestionProvider for OpenAiProvider {
        fn complete_structured(&self, request: &SuggestionRequest) -> Result<String> {
            self.send(json!({
                "model": self.structured_model,
                "input": [
                    { "role": "system", "content": request.system },
                    { "role": "user", "content": request.notes_json },
                    { "role": "user", "content": request.prompt }
                ],
                "text": {
                    "format": {
                        "type": "json_schema",
                        "name": SCHEMA_NAME,
                        "schema": request.schema,
                        "strict": true
                    }
                }
            }))
        }

        fn complete(&self, input: &str) -> Result<String> {
            self.send(json!({
                "model": self.completion_model,
                "input": input
            }))
        }
    }

    /// Concatenated `output_text` parts of a responses payload.
    pub(super) fn output_text(response: &Value) -> Option<String> {
        let parts: Vec<&str> = response
            .get("output")?
            .as_array()?
            .iter()
            .filter_map(|item| item.get("content")?.as_array())
            .flatten()
            .filter(|c| c.get("type").and_then(Value::as_str) == Some("output_text"))
            .filter_map(|c| c.get("text")?.as_str())
            .collect();
        (!parts.is_empty()).then(|| parts.concat())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Duration, NoteEvent};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    struct Canned {
        answer: String,
        seen: RefCell<Option<SuggestionRequest>>,
    }

    impl Canned {
        fn new(answer: &str) -> Self {
            Self {
                answer: answer.to_string(),
                seen: RefCell::new(None),
            }
        }
    }

    impl SuggestionProvider for Canned {
        fn complete_structured(&self, request: &SuggestionRequest) -> Result<String> {
            *self.seen.borrow_mut() = Some(request.clone());
            Ok(self.answer.clone())
        }

        fn complete(&self, input: &str) -> Result<String> {
            Ok(format!("echo: {input}"))
        }
    }

    #[test]
    fn valid_answer_is_accepted() {
        let notes = parse_suggestion(
            r#"{"notes":[{"noteIndex":0,"note":"E4","duration":"half","rest":false,"origin":"ai"},
                         {"noteIndex":1,"note":"","duration":"quarter","rest":true,"origin":"ai"}]}"#,
        )
        .unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].origin, Some(Origin::Ai));
        assert_eq!(notes[1].event, NoteEvent::Rest { duration: Duration::QUARTER });
    }

    #[test]
    fn missing_duration_rejects_the_answer() {
        let err = parse_suggestion(r#"{"notes":[{"noteIndex":0,"note":"E4","rest":false,"origin":"ai"}]}"#).unwrap_err();
        assert!(matches!(err, ScoreError::InvalidSuggestion(_)));
    }

    #[test]
    fn bad_pitch_rejects_the_answer() {
        let err = parse_suggestion(r#"{"notes":[{"noteIndex":0,"note":"H9","duration":"half","rest":false,"origin":"ai"}]}"#)
            .unwrap_err();
        assert!(matches!(err, ScoreError::InvalidSuggestion(_)));
    }

    #[test]
    fn request_carries_instruction_score_and_prompt() {
        let client = SuggestionClient::new(Canned::new(r#"{"notes":[]}"#));
        let score = vec![Note::pitched(0, "C4".parse().unwrap(), Duration::QUARTER)];
        let result = client.suggest(&score, "add a third").unwrap();
        assert_eq!(result.score, score);
        assert!(result.suggestion.is_empty());

        let seen = client.provider().seen.borrow().clone().unwrap();
        assert_eq!(seen.system, SYSTEM_INSTRUCTION);
        assert_eq!(seen.prompt, "add a third");
        assert!(seen.notes_json.contains(r#""note":"C4""#));
        assert_eq!(seen.schema, response_schema());
    }

    #[test]
    fn json_outcome_reports_failure() {
        let client = SuggestionClient::new(Canned::new(r#"{"notes":[{"noteIndex":0}]}"#));
        let outcome = client.suggest_json(r#"[{"noteIndex":0,"note":"C4","duration":"quarter"}]"#, "more");
        assert!(!outcome.success);
        assert!(outcome.error.is_some());
        assert_eq!(outcome.suggestion, None);

        let bad_score = client.suggest_json("not json", "more");
        assert!(!bad_score.success);
    }

    #[test]
    fn prompt_is_plain_completion() {
        let client = SuggestionClient::new(Canned::new(""));
        let outcome = client.prompt("hello").unwrap();
        assert_eq!(outcome.result, "echo: hello");
        assert!(outcome.success);
    }
}
