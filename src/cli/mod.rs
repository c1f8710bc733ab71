use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::wire::Mode;

#[derive(ValueEnum, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[value(alias = "google")]
    Gemini,
    #[value(name = "openai", alias = "open-ai")]
    OpenAI,
    Anthropic,
    Ollama,
}

impl ProviderKind {
    /// Model used when neither the config file nor `--model` names one.
    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini-3-pro-preview",
            ProviderKind::OpenAI => "gpt-4.1-mini",
            ProviderKind::Anthropic => "claude-sonnet-4-5",
            ProviderKind::Ollama => "llama3.1",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "locobot", version, about = "LOCOBOT Architect: synthesize blueprints and runnable HTML artifacts from a prompt")]
pub struct Args {
    /// Synthesis module to run.
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Synthesis target. Read from stdin when omitted.
    #[arg(long)]
    pub prompt: Option<String>,

    /// Print the synthesis modules and exit.
    #[arg(long, default_value_t = false)]
    pub list_modes: bool,

    #[arg(long)]
    pub config: Option<String>,

    #[arg(long)]
    pub root: Option<String>,

    /// Directory for exported artifacts.
    #[arg(long)]
    pub out: Option<String>,

    #[arg(long, value_enum)]
    pub provider: Option<ProviderKind>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub temperature: Option<f32>,

    #[arg(long)]
    pub thinking_budget: Option<u32>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Skip writing the `.html` artifact.
    #[arg(long, default_value_t = false)]
    pub no_export: bool,

    /// Also write a sandboxed preview page.
    #[arg(long, default_value_t = false)]
    pub preview: bool,

    /// Also write the rendered blueprint page.
    #[arg(long, default_value_t = false)]
    pub blueprint: bool,

    /// Print the extracted code instead of the raw markdown.
    #[arg(long, default_value_t = false)]
    pub print_code: bool,

    /// Copy the extracted code (or the whole response) to the clipboard.
    #[arg(long, default_value_t = false)]
    pub copy: bool,

    #[arg(long, default_value_t = false)]
    pub save_request: bool,

    #[arg(long, default_value_t = false)]
    pub save_response: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,
}
