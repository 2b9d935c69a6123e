//! End-to-end pipeline tests against the fake generation client.

use sorcerer_common::{
    build_request, ApiKey, CampaignBrief, FakeLlmClient, GenerationMode, GenerationRequest,
    Orchestrator, SchemaVariant, SorcererError, SubjectLine,
};
use std::collections::HashMap;
use std::sync::Arc;

const STANDARD_RESPONSE: &str = r#"{"subjectLines":[{"tone":"Curiosity","subject":"What's hiding in your cart?","preview":"Take a peek."},{"tone":"Fun","subject":"Treat yo' inbox","preview":"Smiles inside."},{"tone":"Urgency","subject":"Last Call!","preview":"Ends at midnight."},{"tone":"Promo","subject":"30% off, today only","preview":"Code GLOW30."},{"tone":"Clear","subject":"Our spring sale is live","preview":"Shop the collection."},{"tone":"Irreverent / Wild","subject":"Our serum ate the moon","preview":"Glow responsibly."}]}"#;

fn key() -> ApiKey {
    ApiKey::new("sk-test").unwrap()
}

fn request(goal: &str, ab_test: bool) -> GenerationRequest {
    let mut fields = HashMap::new();
    fields.insert("goal".to_string(), goal.to_string());
    fields.insert("brandName".to_string(), "Glow & Co.".to_string());
    fields.insert("industry".to_string(), String::new());
    build_request(&fields, ab_test)
}

#[tokio::test]
async fn test_generate_fills_winner_from_goal_table() {
    let fake = Arc::new(FakeLlmClient::always_text(STANDARD_RESPONSE));
    let orchestrator = Orchestrator::new(fake.clone());

    let result = orchestrator
        .generate(&request("Clicks", false), Some(&key()))
        .await
        .unwrap();

    assert_eq!(result.subject_lines.len(), 6);
    let winner = result.chance_of_success.unwrap();
    assert_eq!(winner.subject, "Last Call!");
    assert!(winner.reason.contains("Urgency"));
    assert!(winner.reason.contains("Clicks"));
    assert_eq!(fake.call_count(), 1);
}

#[tokio::test]
async fn test_generate_sends_compiled_brief() {
    let fake = Arc::new(FakeLlmClient::always_text(STANDARD_RESPONSE));
    let orchestrator = Orchestrator::new(fake.clone());

    orchestrator
        .generate(&request("Opens", false), Some(&key()))
        .await
        .unwrap();

    let prompt = fake.last_prompt().unwrap();
    assert_eq!(prompt.schema, SchemaVariant::Standard);
    assert!(prompt.user.contains("Brand: Glow & Co."));
    assert!(prompt.user.contains("Goal: Opens"));
    assert!(!prompt.user.contains("Industry:"));
}

#[tokio::test]
async fn test_generate_missing_key_never_calls_service() {
    let fake = Arc::new(FakeLlmClient::always_text(STANDARD_RESPONSE));
    let orchestrator = Orchestrator::new(fake.clone());

    let err = orchestrator
        .generate(&request("Clicks", false), None)
        .await
        .unwrap_err();

    assert!(matches!(err, SorcererError::ConfigurationMissing(_)));
    assert_eq!(fake.call_count(), 0);
    assert!(fake.last_prompt().is_none());
}

#[tokio::test]
async fn test_generate_ab_mode_with_fenced_response() {
    let raw = r#"Here are your A/B variants:
```json
{"subjectLines":[
 {"tone":"Curiosity","subjectA":"Psst, look inside","subjectB":"You'll want to see this","previewA":"a","previewB":"b"},
 {"tone":"Fun","subjectA":"Inbox party!","subjectB":"Confetti time","previewA":"a","previewB":"b"},
 {"tone":"Urgency","subjectA":"Last chance","subjectB":"Ends tomorrow","previewA":"a","previewB":"b"},
 {"tone":"Promo","subjectA":"Save 30%","subjectB":"30% off now","previewA":"a","previewB":"b"},
 {"tone":"Clear","subjectA":"Spring sale","subjectB":"Sale is live","previewA":"a","previewB":"b"},
 {"tone":"Irreverent","subjectA":"We hired a goat as CFO","previewA":"Prices are baaa-d"}
],"chanceOfSuccess":{"subject":"Ends tomorrow","reason":"A concrete deadline beats vague urgency."}}
```"#;
    let fake = Arc::new(FakeLlmClient::always_text(raw));
    let orchestrator = Orchestrator::new(fake.clone());

    let result = orchestrator
        .generate(&request("Clicks", true), Some(&key()))
        .await
        .unwrap();

    assert_eq!(fake.last_prompt().unwrap().schema, SchemaVariant::AbTest);
    assert_eq!(result.subject_lines.len(), 6);
    assert_eq!(result.primary_lines().count(), 5);
    let wild = result.wild_line().unwrap();
    assert_eq!(wild.primary_subject(), "We hired a goat as CFO");
    assert_eq!(wild.variant_b(), None);
    assert_eq!(result.chance_of_success.unwrap().subject, "Ends tomorrow");
}

#[tokio::test]
async fn test_generate_ab_mode_with_unpaired_wild_line() {
    let raw = r#"{"subjectLines":[
 {"tone":"Curiosity","subjectA":"Psst, look inside","subjectB":"You'll want to see this","previewA":"a","previewB":"b"},
 {"tone":"Urgency","subjectA":"Last chance","subjectB":"Ends tomorrow","previewA":"a","previewB":"b"},
 {"tone":"Irreverent / Wild","subject":"Our intern is a raccoon","preview":"He means well"}
]}"#;
    let fake = Arc::new(FakeLlmClient::always_text(raw));
    let orchestrator = Orchestrator::new(fake);

    let result = orchestrator
        .generate(&request("Clicks", true), Some(&key()))
        .await
        .unwrap();

    assert_eq!(
        result.wild_line(),
        Some(&SubjectLine::single(
            "Irreverent / Wild",
            "Our intern is a raccoon",
            "He means well"
        ))
    );
    assert_eq!(result.primary_lines().count(), 2);
    assert_eq!(result.chance_of_success.unwrap().subject, "Last chance");
}

#[tokio::test]
async fn test_generate_keeps_prediction_with_null_reason() {
    let raw = r#"{"subjectLines":[{"tone":"Curiosity","subject":"X","preview":null},{"tone":"Fun","subject":"Y","preview":"p"}],"chanceOfSuccess":{"subject":"Y","reason":null}}"#;
    let fake = Arc::new(FakeLlmClient::always_text(raw));
    let orchestrator = Orchestrator::new(fake);

    let result = orchestrator
        .generate(&request("Opens", false), Some(&key()))
        .await
        .unwrap();

    assert_eq!(result.subject_lines[0].primary_preview(), "");
    let winner = result.chance_of_success.unwrap();
    assert_eq!(winner.subject, "Y");
    assert_eq!(winner.reason, "");
}

#[tokio::test]
async fn test_generate_prose_wrapped_array() {
    let raw = r#"Absolutely! [{"tone":"Curiosity","subject":"X","preview":"Y"},{"tone":"Clear","subject":"Z","preview":"W"}] Let me know if you need more."#;
    let fake = Arc::new(FakeLlmClient::always_text(raw));
    let orchestrator = Orchestrator::new(fake);

    let result = orchestrator
        .generate(&request("Engagement", false), Some(&key()))
        .await
        .unwrap();

    assert_eq!(
        result.subject_lines,
        vec![
            SubjectLine::single("Curiosity", "X", "Y"),
            SubjectLine::single("Clear", "Z", "W"),
        ]
    );
    assert_eq!(result.chance_of_success.unwrap().subject, "X");
}

#[tokio::test]
async fn test_generate_unexpected_tones_leave_null_winner() {
    let raw = r#"[{"tone":"Nostalgic","subject":"Remember 1999?","preview":"p"}]"#;
    let orchestrator = Orchestrator::new(Arc::new(FakeLlmClient::always_text(raw)));

    let result = orchestrator
        .generate(&request("Clicks", false), Some(&key()))
        .await
        .unwrap();

    assert_eq!(result.subject_lines.len(), 1);
    assert!(result.chance_of_success.is_none());
}

#[tokio::test]
async fn test_generate_malformed_response_carries_raw_text() {
    let raw = "Sorry, I cannot produce subject lines today.";
    let orchestrator = Orchestrator::new(Arc::new(FakeLlmClient::always_text(raw)));

    let err = orchestrator
        .generate(&request("Clicks", false), Some(&key()))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "malformed_response");
    assert_eq!(err.raw_text(), Some(raw));
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let fake = Arc::new(FakeLlmClient::always_text(STANDARD_RESPONSE));
    let orchestrator = Orchestrator::new(fake.clone());
    let k = key();

    let clicks = request("Clicks", false);
    let awareness = request("Awareness", false);
    let (a, b) = tokio::join!(
        orchestrator.generate(&clicks, Some(&k)),
        orchestrator.generate(&awareness, Some(&k)),
    );

    assert_eq!(a.unwrap().chance_of_success.unwrap().subject, "Last Call!");
    assert_eq!(
        b.unwrap().chance_of_success.unwrap().subject,
        "Our spring sale is live"
    );
    assert_eq!(fake.call_count(), 2);
}

#[tokio::test]
async fn test_blank_brief_still_generates() {
    let orchestrator = Orchestrator::new(Arc::new(FakeLlmClient::always_text(STANDARD_RESPONSE)));
    let request = GenerationRequest {
        brief: CampaignBrief::default(),
        mode: GenerationMode::standard(),
    };

    let result = orchestrator.generate(&request, Some(&key())).await.unwrap();
    assert_eq!(
        result.chance_of_success.unwrap().subject,
        "What's hiding in your cart?"
    );
}
