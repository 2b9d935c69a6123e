//! Generation orchestrator.
//!
//! Flow:
//! 1. Fail fast if no credential was resolved (no network call)
//! 2. Compile the brief into an instruction
//! 3. One exchange with the generation service
//! 4. Extract the structured result
//! 5. Guarantee a winner prediction where possible
//!
//! Invariants:
//! - Exactly one service call per successful-credential invocation
//! - No retries, no internal timeout
//! - No state is shared between invocations

use crate::brief::GenerationRequest;
use crate::credentials::ApiKey;
use crate::error::SorcererError;
use crate::extractor::extract_result;
use crate::llm_client::LlmClient;
use crate::prompts::compile_prompt;
use crate::types::GenerationResult;
use crate::winner::resolve_winner;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

#[derive(Clone)]
pub struct Orchestrator {
    client: Arc<dyn LlmClient>,
}

impl Orchestrator {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub async fn generate(
        &self,
        request: &GenerationRequest,
        api_key: Option<&ApiKey>,
    ) -> Result<GenerationResult, SorcererError> {
        let span = info_span!("generate", request_id = %Uuid::new_v4(), ab_test = request.mode.ab_test);
        self.generate_inner(request, api_key).instrument(span).await
    }

    async fn generate_inner(
        &self,
        request: &GenerationRequest,
        api_key: Option<&ApiKey>,
    ) -> Result<GenerationResult, SorcererError> {
        let api_key = api_key.ok_or_else(|| {
            SorcererError::ConfigurationMissing(
                "no API key provided; pass --api-key, set llm.api_key in the config file, or export OPENAI_API_KEY".to_string(),
            )
        })?;

        let prompt = compile_prompt(&request.brief, request.mode);
        debug!(
            "Compiled {:?} prompt ({} chars)",
            prompt.schema,
            prompt.user.len()
        );

        let started = Instant::now();
        let raw = self.client.complete(api_key, &prompt).await?;
        info!(
            "Generation service answered in {} ms ({} chars)",
            started.elapsed().as_millis(),
            raw.len()
        );

        let extracted = extract_result(&raw)?;
        let resolved = resolve_winner(extracted, request.brief.goal.as_deref());

        info!(
            "Generated {} subject lines, winner: {}",
            resolved.subject_lines.len(),
            resolved
                .chance_of_success
                .as_ref()
                .map(|w| w.subject.as_str())
                .unwrap_or("<none>")
        );
        Ok(resolved)
    }
}
