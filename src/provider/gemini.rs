//! Google Gemini `generateContent` adapter.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Provider;
use crate::wire::GenerationRequest;

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<PartIn<'a>>,
}

#[derive(Serialize)]
struct PartIn<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    thinking_config: ThinkingConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ContentOut>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ContentOut {
    #[serde(default)]
    parts: Vec<PartOut>,
}

#[derive(Deserialize)]
struct PartOut {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    fn url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url.trim_end_matches('/'), model)
    }
}

fn to_body(req: &GenerationRequest) -> GenerateRequest<'_> {
    GenerateRequest {
        contents: vec![Content { role: Some("user"), parts: vec![PartIn { text: &req.contents }] }],
        system_instruction: Content { role: None, parts: vec![PartIn { text: &req.system_instruction }] },
        generation_config: GenerationConfig {
            temperature: req.temperature,
            thinking_config: ThinkingConfig { thinking_budget: req.thinking_budget },
        },
    }
}

/// Joined text of the first candidate, skipping thought summaries.
fn response_text(parsed: GenerateResponse) -> Result<String> {
    if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
        bail!("gemini blocked the prompt: {reason}");
    }
    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("gemini: no candidates returned"))?;
    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|p| !p.thought)
        .filter_map(|p| p.text)
        .collect();
    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".into());
        bail!("gemini: empty response (finish reason: {reason})");
    }
    Ok(text)
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(&self, req: &GenerationRequest) -> Result<String> {
        let url = self.url(&req.model);
        tracing::debug!(%url, mode = %req.mode, "gemini: POST");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&to_body(req))
            .send()
            .await
            .context("gemini request failed")?;

        let status = resp.status();
        let text = resp.text().await.context("gemini read body failed")?;
        tracing::debug!(%status, bytes = text.len(), "gemini: response");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            bail!("gemini authentication failed ({status}): {text}");
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            bail!("gemini quota exceeded ({status}): {text}");
        }
        if !status.is_success() {
            bail!("gemini API error ({status}): {text}");
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("gemini response parse error: {e}\nRaw: {text}"))?;
        response_text(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::build_request;
    use crate::wire::Mode;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> GeminiProvider {
        GeminiProvider::new("test-key", server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn body_uses_gemini_field_names() {
        let req = build_request(Mode::Web, "landing page").unwrap();
        let body = serde_json::to_value(to_body(&req)).unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "SYNTHESIS TARGET: landing page");
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["generationConfig"]["thinkingConfig"]["thinkingBudget"], 4000);
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn url_trims_trailing_slash() {
        let p = GeminiProvider::new("k", "https://example.test/v1beta/", Duration::from_secs(1)).unwrap();
        assert_eq!(p.url("gemini-x"), "https://example.test/v1beta/models/gemini-x:generateContent");
    }

    #[tokio::test]
    async fn returns_joined_text_without_thoughts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-3-pro-preview:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{ "parts": [{ "text": "SYNTHESIS TARGET: retro pong game" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [
                        { "text": "planning...", "thought": true },
                        { "text": "## Pong\n" },
                        { "text": "```html\n<canvas></canvas>\n```" }
                    ]},
                    "finishReason": "STOP"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let req = build_request(Mode::Games, "retro pong game").unwrap();
        let text = provider(&server).generate(&req).await.unwrap();
        assert_eq!(text, "## Pong\n```html\n<canvas></canvas>\n```");
    }

    #[tokio::test]
    async fn blocked_prompt_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            })))
            .mount(&server)
            .await;

        let req = build_request(Mode::Web, "x").unwrap();
        let err = provider(&server).generate(&req).await.unwrap_err();
        assert!(err.to_string().contains("blocked the prompt: SAFETY"));
    }

    #[tokio::test]
    async fn http_errors_carry_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("RESOURCE_EXHAUSTED"))
            .mount(&server)
            .await;

        let req = build_request(Mode::Apps, "x").unwrap();
        let err = provider(&server).generate(&req).await.unwrap_err().to_string();
        assert!(err.contains("quota exceeded"));
        assert!(err.contains("RESOURCE_EXHAUSTED"));
    }

    #[tokio::test]
    async fn auth_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let req = build_request(Mode::Apps, "x").unwrap();
        let err = provider(&server).generate(&req).await.unwrap_err().to_string();
        assert!(err.contains("authentication failed"));
    }
}
