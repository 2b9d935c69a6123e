//! Shared library for Subject Line Sorcerer.
//!
//! Pipeline: brief -> prompt -> llm_client -> extractor -> winner.
//! `orchestrator` wires the stages together behind a single `generate` call.

pub mod brief;
pub mod config;
pub mod credentials;
pub mod error;
pub mod extractor;
pub mod llm_client;
pub mod orchestrator;
pub mod prompts;
pub mod tone;
pub mod types;
pub mod winner;

pub use brief::{build_request, CampaignBrief, GenerationMode, GenerationRequest};
pub use config::{LlmConfig, SorcererConfig};
pub use credentials::{ApiKey, CredentialSources, OPENAI_API_KEY_ENV};
pub use error::SorcererError;
pub use extractor::extract_result;
pub use llm_client::{FakeLlmClient, HttpLlmClient, LlmClient};
pub use orchestrator::Orchestrator;
pub use prompts::{compile_prompt, CompiledPrompt, SchemaVariant};
pub use tone::Tone;
pub use types::{GenerationResult, SubjectLine, WinnerPrediction};
pub use winner::{fallback_tone_for_goal, resolve_winner};
