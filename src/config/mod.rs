use anyhow::{Context, Result};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cli::{Args, ProviderKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub root: String,
    pub out_dir: String,
    pub provider: ProviderKind,
    /// Unset means the provider's own default model.
    pub model: Option<String>,
    pub temperature: f32,
    pub thinking_budget: u32,
    pub timeout_secs: u64,
    pub gemini_url: String,
    pub openai_url: String,
    pub anthropic_url: String,
    pub anthropic_version: String,
    pub ollama_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: ".".into(),
            out_dir: "locobot-out".into(),
            provider: ProviderKind::Gemini,
            model: None,
            temperature: 0.8,
            thinking_budget: 4000,
            timeout_secs: 600,
            gemini_url: "https://generativelanguage.googleapis.com/v1beta".into(),
            openai_url: "https://api.openai.com".into(),
            anthropic_url: "https://api.anthropic.com".into(),
            anthropic_version: "2023-06-01".into(),
            ollama_url: "http://localhost:11434".into(),
        }
    }
}

impl Config {
    /// Parse a TOML config; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid config TOML")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                let text = fs::read_to_string(p)?;
                Self::from_toml_str(&text).with_context(|| format!("while loading {}", p.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or_else(|| self.provider.default_model())
    }

    /// CLI flags win over file values.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(root) = &args.root { self.root = root.clone(); }
        if let Some(out) = &args.out { self.out_dir = out.clone(); }
        if let Some(kind) = args.provider { self.provider = kind; }
        if let Some(model) = &args.model { self.model = Some(model.clone()); }
        if let Some(t) = args.temperature { self.temperature = t; }
        if let Some(b) = args.thinking_budget { self.thinking_budget = b; }
        if let Some(secs) = args.timeout_secs { self.timeout_secs = secs; }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = Config::from_toml_str("model = \"gemini-2.5-flash\"\ntemperature = 0.3\n").unwrap();
        assert_eq!(cfg.model(), "gemini-2.5-flash");
        assert_eq!(cfg.temperature, 0.3);
        assert_eq!(cfg.thinking_budget, 4000);
        assert!(matches!(cfg.provider, ProviderKind::Gemini));
    }

    #[test]
    fn provider_is_read_in_lowercase() {
        let cfg = Config::from_toml_str("provider = \"ollama\"\nmodel = \"llama3\"").unwrap();
        assert!(matches!(cfg.provider, ProviderKind::Ollama));
    }

    #[test]
    fn cli_flags_override_file_values() {
        let mut cfg = Config::from_toml_str("model = \"from-file\"\ntimeout_secs = 5").unwrap();
        let args = Args::parse_from(["locobot", "--model", "from-cli", "--temperature", "1.1"]);
        cfg.apply_args(&args);
        assert_eq!(cfg.model(), "from-cli");
        assert_eq!(cfg.temperature, 1.1);
        assert_eq!(cfg.timeout_secs, 5);
    }

    #[test]
    fn load_without_path_is_default() {
        let cfg = Config::load(None).unwrap();
        assert_eq!(cfg.model(), "gemini-3-pro-preview");
    }

    #[test]
    fn switching_provider_switches_default_model() {
        let mut cfg = Config::default();
        let args = Args::parse_from(["locobot", "--provider", "openai"]);
        cfg.apply_args(&args);
        assert_eq!(cfg.model(), "gpt-4.1-mini");

        let cfg = Config::from_toml_str("provider = \"ollama\"").unwrap();
        assert_eq!(cfg.model(), "llama3.1");
    }

    #[test]
    fn explicit_model_survives_provider_switch() {
        let mut cfg = Config::from_toml_str("model = \"gpt-4o\"").unwrap();
        let args = Args::parse_from(["locobot", "--provider", "openai"]);
        cfg.apply_args(&args);
        assert_eq!(cfg.model(), "gpt-4o");
    }
}
