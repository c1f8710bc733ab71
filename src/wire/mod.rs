use chrono::{DateTime, Local};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ========================================
/// Synthesis request/result model
/// ========================================

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    Web,
    Games,
    Apps,
    Automation,
    Learning,
}

impl Mode {
    pub const ALL: [Mode; 5] = [Mode::Web, Mode::Games, Mode::Apps, Mode::Automation, Mode::Learning];

    /// Upper-case tag, as shown in the console header.
    pub fn tag(self) -> &'static str {
        match self {
            Mode::Web => "WEB",
            Mode::Games => "GAMES",
            Mode::Apps => "APPS",
            Mode::Automation => "AUTOMATION",
            Mode::Learning => "LEARNING",
        }
    }

    /// Lower-case slug used in artifact file names.
    pub fn slug(self) -> &'static str {
        match self {
            Mode::Web => "web",
            Mode::Games => "games",
            Mode::Apps => "apps",
            Mode::Automation => "automation",
            Mode::Learning => "learning",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Mode::Web => "Web Architect",
            Mode::Games => "Game Engine",
            Mode::Apps => "App Forge",
            Mode::Automation => "Neural Automation",
            Mode::Learning => "Omni-Mentor",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            Mode::Web => "Next.js 14, Supabase, Stripe Integration",
            Mode::Games => "High-Fidelity Scaffolding",
            Mode::Apps => "iOS & Android Native Systems",
            Mode::Automation => "Python/Node Local Scripts",
            Mode::Learning => "Step-by-Step Interactive Learning",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Mode::Web => "🌐",
            Mode::Games => "🎮",
            Mode::Apps => "📱",
            Mode::Automation => "🧠",
            Mode::Learning => "🎓",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Mode::Web => "E.g., High-performance SaaS landing page with user dashboard...",
            Mode::Games => "E.g., Multiplayer Cyberpunk RPG with advanced inventory systems...",
            Mode::Apps => "E.g., Fintech mobile app with biometric security and crypto wallet...",
            Mode::Automation => "E.g., Local Node.js service that auto-syncs cloud storage to WhatsApp...",
            Mode::Learning => "What would you like to master today? E.g., How does LOCOBOT handle state management?",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Everything a text-generation provider needs for one synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub mode: Mode,
    pub user_prompt: String,
    pub system_instruction: String,
    /// The user prompt wrapped with its prefix label; this is what the model sees.
    pub contents: String,
    pub temperature: f32,
    pub model: String,
    pub thinking_budget: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// A complete page (doctype or `<html>` root).
    Document,
    /// Markup, script or styles that need a host page.
    Fragment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub raw_markdown: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_code: Option<String>,
}

impl GenerationResult {
    pub fn has_code(&self) -> bool {
        self.extracted_code.is_some()
    }

    pub fn artifact_kind(&self) -> Option<ArtifactKind> {
        let code = self.extracted_code.as_deref()?;
        // Only the leading token counts; scripts may mention "<html" anywhere.
        let head = code.trim_start();
        let opens_with = |token: &str| head.get(..token.len()).is_some_and(|h| h.eq_ignore_ascii_case(token));
        if opens_with("<!doctype") || opens_with("<html") {
            Some(ArtifactKind::Document)
        } else {
            Some(ArtifactKind::Fragment)
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub at: DateTime<Local>,
    pub message: String,
}

impl LogEntry {
    pub fn now(message: impl Into<String>) -> Self {
        Self { at: Local::now(), message: message.into() }
    }
}
