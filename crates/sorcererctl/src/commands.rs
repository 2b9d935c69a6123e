//! Command implementations

use crate::cli::BriefArgs;
use crate::display::{self, Style};
use anyhow::{Context, Result};
use sorcerer_common::{
    compile_prompt, CredentialSources, HttpLlmClient, Orchestrator, SorcererConfig,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub fn load_config(path: Option<&Path>) -> Result<SorcererConfig> {
    let mut config = SorcererConfig::load(path)?;
    config.apply_env_overrides();
    Ok(config)
}

/// Flag beats config file; both are "local" and beat OPENAI_API_KEY.
pub fn credential_sources(flag: Option<String>, config: &SorcererConfig) -> CredentialSources {
    let local_override = flag
        .filter(|k| !k.trim().is_empty())
        .or_else(|| config.llm.api_key.clone());
    CredentialSources::from_env(local_override)
}

pub async fn generate(
    config: SorcererConfig,
    brief: BriefArgs,
    api_key: Option<String>,
    json: bool,
    timeout_secs: Option<u64>,
) -> Result<()> {
    let request = brief.to_request();
    let api_key = credential_sources(api_key, &config).resolve();
    debug!("Credential resolved: {}", api_key.is_some());

    let client = HttpLlmClient::new(config.llm.clone())?;
    let orchestrator = Orchestrator::new(Arc::new(client));

    let call = orchestrator.generate(&request, api_key.as_ref());
    let result = match timeout_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), call)
            .await
            .with_context(|| format!("Generation timed out after {} seconds", secs))??,
        None => call.await?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!(
            "{}",
            display::render_result(&result, request.brief.goal.as_deref(), Style::Color)
        );
    }
    Ok(())
}

pub fn prompt(brief: BriefArgs) -> Result<()> {
    let request = brief.to_request();
    let compiled = compile_prompt(&request.brief, request.mode);
    println!("[SYSTEM]\n{}\n", compiled.system);
    println!("[USER]\n{}", compiled.user);
    Ok(())
}

pub fn tips() -> Result<()> {
    println!("{}", display::render_tips());
    Ok(())
}
