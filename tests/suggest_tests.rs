//! Suggestion client tests with a scripted provider.

use std::cell::RefCell;

use pretty_assertions::assert_eq;
use stafflib::suggest::{response_schema, SuggestionRequest, SYSTEM_INSTRUCTION};
use stafflib::{Note, NoteRecord, Origin, Result, ScoreError, SuggestionClient, SuggestionProvider};

/// Replies with queued answers and records what it was asked.
#[derive(Default)]
struct Scripted {
    answers: RefCell<Vec<Result<String>>>,
    requests: RefCell<Vec<SuggestionRequest>>,
}

impl Scripted {
    fn answering(answer: &str) -> Self {
        let s = Scripted::default();
        s.answers.borrow_mut().push(Ok(answer.to_string()));
        s
    }

    fn failing(message: &str) -> Self {
        let s = Scripted::default();
        s.answers.borrow_mut().push(Err(ScoreError::Provider(message.to_string())));
        s
    }
}

impl SuggestionProvider for Scripted {
    fn complete_structured(&self, request: &SuggestionRequest) -> Result<String> {
        self.requests.borrow_mut().push(request.clone());
        self.answers
            .borrow_mut()
            .pop()
            .unwrap_or_else(|| Err(ScoreError::Provider("no scripted answer".into())))
    }

    fn complete(&self, input: &str) -> Result<String> {
        Ok(input.chars().rev().collect())
    }
}

const SCORE: &str = r#"[
    {"noteIndex": 0, "note": "C4", "duration": "quarter", "barIndex": 0, "position": 0.1, "origin": "user"},
    {"noteIndex": 1, "note": "E4", "duration": "quarter", "origin": "user"}
]"#;

#[test]
fn accepted_suggestion_round_trips_to_records() {
    let provider = Scripted::answering(
        r#"{"notes": [
            {"noteIndex": 1, "note": "G4", "duration": "quarter", "rest": false, "origin": "ai"},
            {"noteIndex": 2, "note": "C5", "duration": "dotted_half", "rest": false, "origin": "ai"}
        ]}"#,
    );
    let client = SuggestionClient::new(&provider);
    let outcome = client.suggest_json(SCORE, "harmonise the second note");

    assert!(outcome.success, "{:?}", outcome.error);
    let suggestion = outcome.suggestion.unwrap();
    let pitches: Vec<Option<&str>> = suggestion.iter().map(|r| r.note.as_deref()).collect();
    assert_eq!(pitches, vec![Some("G4"), Some("C5")]);
    assert!(suggestion.iter().all(|r| r.origin == Some(Origin::Ai)));

    let score = outcome.score.unwrap();
    assert_eq!(score[0].bar_index, Some(0));
    assert_eq!(score[0].position, Some(0.1));

    let requests = provider.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].system, SYSTEM_INSTRUCTION);
    assert_eq!(requests[0].prompt, "harmonise the second note");
    let sent: Vec<NoteRecord> = serde_json::from_str(&requests[0].notes_json).unwrap();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].note.as_deref(), Some("E4"));
}

#[test]
fn suggestion_missing_duration_fails_whole_call() {
    let provider = Scripted::answering(
        r#"{"notes": [
            {"noteIndex": 2, "note": "G4", "duration": "quarter", "rest": false, "origin": "ai"},
            {"noteIndex": 3, "note": "A4", "rest": false, "origin": "ai"}
        ]}"#,
    );
    let outcome = SuggestionClient::new(&provider).suggest_json(SCORE, "continue");

    assert!(!outcome.success);
    assert_eq!(outcome.suggestion, None);
    let error = outcome.error.unwrap();
    assert!(error.contains("duration"), "{error}");
}

#[test]
fn suggestion_with_unknown_origin_fails() {
    let provider = Scripted::answering(
        r#"{"notes": [{"noteIndex": 2, "note": "G4", "duration": "quarter", "rest": false, "origin": "robot"}]}"#,
    );
    let err = SuggestionClient::new(&provider)
        .suggest(&[], "continue")
        .unwrap_err();
    assert!(matches!(err, ScoreError::InvalidSuggestion(_)));
}

#[test]
fn provider_failure_is_reported_not_retried() {
    let provider = Scripted::failing("rate limited");
    let outcome = SuggestionClient::new(&provider).suggest_json(SCORE, "continue");

    assert!(!outcome.success);
    assert!(outcome.error.unwrap().contains("rate limited"));
    assert_eq!(provider.requests.borrow().len(), 1);
}

#[test]
fn invalid_score_never_reaches_the_provider() {
    let provider = Scripted::answering(r#"{"notes": []}"#);
    let outcome = SuggestionClient::new(&provider)
        .suggest_json(r#"[{"noteIndex": 0, "note": "C#", "duration": "quarter"}]"#, "continue");

    assert!(!outcome.success);
    assert!(provider.requests.borrow().is_empty());
}

#[test]
fn outcome_serializes_like_a_form_action_result() {
    let provider = Scripted::failing("offline");
    let outcome = SuggestionClient::new(&provider).suggest_json(SCORE, "continue");
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["success"], false);
    assert!(json.get("suggestion").is_none());
    assert!(json["error"].as_str().unwrap().contains("offline"));
}

#[test]
fn schema_requires_every_field() {
    let schema = response_schema();
    let required = &schema["properties"]["notes"]["items"]["required"];
    assert_eq!(
        required,
        &serde_json::json!(["noteIndex", "note", "duration", "rest", "origin"])
    );
}

#[test]
fn prompt_passes_text_through() {
    let provider = Scripted::default();
    let outcome = SuggestionClient::new(&provider).prompt("abc").unwrap();
    assert_eq!(outcome.result, "cba");
    assert_eq!(outcome.prompt, "abc");
    assert!(outcome.success);
}

#[test]
fn suggest_keeps_input_score() {
    let provider = Scripted::answering(r#"{"notes": []}"#);
    let score = vec![Note::pitched(0, "D4".parse().unwrap(), stafflib::Duration::QUARTER)];
    let result = SuggestionClient::new(&provider).suggest(&score, "nothing").unwrap();
    assert_eq!(result.score, score);
    assert!(result.suggestion.is_empty());
}
