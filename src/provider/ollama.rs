use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Provider;
use crate::wire::GenerationRequest;

pub struct Ollama {
    client: Client,
    url: String,
}

impl Ollama {
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        Ok(Self { client: Client::builder().timeout(timeout).build()?, url })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: MsgOut,
}

#[derive(Deserialize)]
struct MsgOut {
    content: String,
}

fn to_messages(req: &GenerationRequest) -> Vec<Msg<'_>> {
    vec![
        Msg { role: "system", content: &req.system_instruction },
        Msg { role: "user", content: &req.contents },
    ]
}

#[async_trait]
impl Provider for Ollama {
    async fn generate(&self, req: &GenerationRequest) -> Result<String> {
        let url = format!("{}/api/chat", self.url.trim_end_matches('/'));
        let body = ChatRequest {
            model: &req.model,
            messages: to_messages(req),
            stream: false,
            options: OllamaOptions { temperature: req.temperature },
        };
        tracing::debug!(%url, mode = %req.mode, "ollama: POST");

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("ollama request failed")?;

        let status = resp.status();
        let text = resp.text().await.context("ollama read body failed")?;
        if !status.is_success() {
            return Err(anyhow!("ollama error ({}): {}", status, text));
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("ollama response parse error: {e}\nRaw: {text}"))?;
        Ok(parsed.message.content)
    }
}
