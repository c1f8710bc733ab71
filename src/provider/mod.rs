use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::cli::ProviderKind;
use crate::config::Config;
use crate::wire::GenerationRequest;

pub mod anthropic;
pub mod gemini;
pub mod ollama;
pub mod openai;

/// A hosted or local text model. Returns the model's raw markdown.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn generate(&self, req: &GenerationRequest) -> Result<String>;
}

pub type DynProvider = Box<dyn Provider + Send + Sync>;

fn env_key(names: &[&str]) -> Result<String> {
    names
        .iter()
        .find_map(|n| std::env::var(n).ok().filter(|v| !v.trim().is_empty()))
        .ok_or_else(|| anyhow!("{} env var is not set", names.join(" or ")))
}

/// Built once at startup and handed to the session.
pub fn make_provider(kind: ProviderKind, cfg: &Config) -> Result<DynProvider> {
    let timeout = Duration::from_secs(cfg.timeout_secs);
    match kind {
        ProviderKind::Gemini => Ok(Box::new(gemini::GeminiProvider::new(
            env_key(&["GEMINI_API_KEY", "API_KEY"])?,
            cfg.gemini_url.clone(),
            timeout,
        )?)),
        ProviderKind::OpenAI => Ok(Box::new(openai::OpenAIProvider::new(
            env_key(&["OPENAI_API_KEY"])?,
            cfg.openai_url.clone(),
            timeout,
        )?)),
        ProviderKind::Anthropic => Ok(Box::new(anthropic::Anthropic::new(
            env_key(&["ANTHROPIC_API_KEY"])?,
            cfg.anthropic_url.clone(),
            cfg.anthropic_version.clone(),
            timeout,
        )?)),
        ProviderKind::Ollama => Ok(Box::new(ollama::Ollama::new(cfg.ollama_url.clone(), timeout)?)),
    }
}
