use crate::config::Config;
use crate::errors::ArchitectError;
use crate::wire::{GenerationRequest, Mode};

pub const TARGET_LABEL: &str = "SYNTHESIS TARGET: ";

const MIN_TEMPERATURE: f32 = 0.0;
const MAX_TEMPERATURE: f32 = 2.0;

fn markdown_rules() -> &'static str {
r#"
CRITICAL DIRECTIVE:
1. You are LOCOBOT Architect from the year 2045.
2. ALWAYS provide a single, complete HTML code block at the end of your response.
3. This HTML block MUST include ALL necessary CSS (Tailwind via CDN) and JS.
4. It must be a fully functional single-file executable that can run in an iframe.
5. If it's a website, make it responsive and futuristic.
6. If it's a game, ensure it's playable with keyboard or mouse.
7. Use '##' for main sections and '###' for features in your architectural breakdown.
"#
}

/// Mode-specific lead line of the system instruction.
pub fn mode_template(mode: Mode) -> &'static str {
    match mode {
        Mode::Web => "LOCOBOT Web Synthesis Module: Create high-performance web systems.",
        Mode::Games => "LOCOBOT Game Engine: Synthesize AAA browser-based game prototypes.",
        Mode::Apps => "LOCOBOT App Forge: Create sleek, cross-platform app interfaces.",
        Mode::Automation => "LOCOBOT Neural Automation: Create advanced visualization scripts and tools.",
        Mode::Learning => "LOCOBOT Omni-Mentor: Create interactive, gamified learning environments.",
    }
}

pub fn system_instruction(mode: Mode) -> String {
    format!("{} {}", mode_template(mode), markdown_rules())
}

pub fn user_contents(prompt: &str) -> String {
    format!("{TARGET_LABEL}{prompt}")
}

/// Turns (mode, prompt) into a provider-ready request. Holds only the
/// generation parameters, so the same inputs always build the same request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBuilder {
    model: String,
    temperature: f32,
    thinking_budget: u32,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        let cfg = Config::default();
        Self {
            model: cfg.model().to_string(),
            temperature: cfg.temperature,
            thinking_budget: cfg.thinking_budget,
        }
    }
}

impl RequestBuilder {
    pub fn new(model: impl Into<String>, temperature: f32, thinking_budget: u32) -> Result<Self, ArchitectError> {
        if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&temperature) {
            return Err(ArchitectError::Config(format!(
                "temperature {temperature} outside [{MIN_TEMPERATURE}, {MAX_TEMPERATURE}]"
            )));
        }
        let model = model.into();
        if model.trim().is_empty() {
            return Err(ArchitectError::Config("model identifier is empty".into()));
        }
        Ok(Self { model, temperature, thinking_budget })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, ArchitectError> {
        Self::new(cfg.model(), cfg.temperature, cfg.thinking_budget)
    }

    pub fn build(&self, mode: Mode, user_prompt: &str) -> Result<GenerationRequest, ArchitectError> {
        if user_prompt.trim().is_empty() {
            return Err(ArchitectError::EmptyPrompt);
        }
        Ok(GenerationRequest {
            mode,
            user_prompt: user_prompt.to_string(),
            system_instruction: system_instruction(mode),
            contents: user_contents(user_prompt),
            temperature: self.temperature,
            model: self.model.clone(),
            thinking_budget: self.thinking_budget,
        })
    }
}

/// Build with the default generation parameters.
pub fn build_request(mode: Mode, user_prompt: &str) -> Result<GenerationRequest, ArchitectError> {
    RequestBuilder::default().build(mode, user_prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ProviderKind;

    #[test]
    fn build_is_pure_for_every_mode() {
        for mode in Mode::ALL {
            let a = build_request(mode, "neon dashboard").unwrap();
            let b = build_request(mode, "neon dashboard").unwrap();
            assert_eq!(a, b);
            assert_eq!(serde_json::to_vec(&a).unwrap(), serde_json::to_vec(&b).unwrap());
        }
    }

    #[test]
    fn empty_or_blank_prompt_is_rejected() {
        assert_eq!(build_request(Mode::Web, ""), Err(ArchitectError::EmptyPrompt));
        assert_eq!(build_request(Mode::Web, "  \n\t "), Err(ArchitectError::EmptyPrompt));
    }

    #[test]
    fn instruction_combines_mode_template_and_shared_rules() {
        let req = build_request(Mode::Games, "retro pong game").unwrap();
        assert!(req.system_instruction.starts_with(mode_template(Mode::Games)));
        assert!(req.system_instruction.contains("single, complete HTML code block"));
        assert!(req.system_instruction.contains("playable with keyboard or mouse"));
        assert_eq!(req.contents, "SYNTHESIS TARGET: retro pong game");
        assert_eq!(req.user_prompt, "retro pong game");
    }

    #[test]
    fn templates_are_distinct_per_mode() {
        let mut seen = std::collections::HashSet::new();
        for mode in Mode::ALL {
            assert!(seen.insert(mode_template(mode)));
        }
    }

    #[test]
    fn defaults_match_config() {
        let req = build_request(Mode::Apps, "wallet").unwrap();
        assert_eq!(req.model, "gemini-3-pro-preview");
        assert_eq!(req.temperature, 0.8);
        assert_eq!(req.thinking_budget, 4000);
    }

    #[test]
    fn builder_from_config_uses_the_providers_model() {
        let cfg = Config { provider: ProviderKind::Anthropic, ..Config::default() };
        let req = RequestBuilder::from_config(&cfg).unwrap().build(Mode::Web, "landing page").unwrap();
        assert_eq!(req.model, ProviderKind::Anthropic.default_model());
    }

    #[test]
    fn out_of_range_temperature_is_a_config_error() {
        assert!(matches!(RequestBuilder::new("m", 2.5, 0), Err(ArchitectError::Config(_))));
        assert!(matches!(RequestBuilder::new("m", -0.1, 0), Err(ArchitectError::Config(_))));
        assert!(matches!(RequestBuilder::new("  ", 0.5, 0), Err(ArchitectError::Config(_))));
        assert!(RequestBuilder::new("m", 2.0, 0).is_ok());
    }
}
