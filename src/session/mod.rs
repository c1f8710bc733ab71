use crate::errors::ArchitectError;
use crate::interpret::interpret;
use crate::prompt::RequestBuilder;
use crate::provider::Provider;
use crate::wire::{GenerationRequest, GenerationResult, LogEntry, Mode};

const START_LOGS: [&str; 3] = [
    "Initializing LOCOBOT Neural Interface...",
    "Accessing 2045 Repository...",
    "Synthesizing Architecture...",
];
const DONE_LOGS: [&str; 2] = ["Synthesis Complete.", "Ready for Deployment."];
const FAILED_LOG: &str = "ERROR: Synthesis Interrupted.";

/// One console: a provider, a builder, the latest result and its log lines.
///
/// `synthesize` takes `&mut self`, so a session never has two requests in
/// flight; a new call replaces whatever the previous one left behind.
pub struct Session<'p> {
    provider: &'p dyn Provider,
    builder: RequestBuilder,
    last_request: Option<GenerationRequest>,
    result: Option<GenerationResult>,
    logs: Vec<LogEntry>,
}

impl<'p> Session<'p> {
    pub fn new(provider: &'p dyn Provider, builder: RequestBuilder) -> Self {
        Self { provider, builder, last_request: None, result: None, logs: Vec::new() }
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    pub fn last_request(&self) -> Option<&GenerationRequest> {
        self.last_request.as_ref()
    }

    fn log(&mut self, message: impl Into<String>) {
        let entry = LogEntry::now(message);
        tracing::info!("{}", entry.message);
        self.logs.push(entry);
    }

    pub async fn synthesize(&mut self, mode: Mode, prompt: &str) -> Result<&GenerationResult, ArchitectError> {
        // Blank prompts never reach the provider and leave prior state alone.
        let req = self.builder.build(mode, prompt)?;

        self.result = None;
        self.logs.clear();
        for line in START_LOGS {
            self.log(line);
        }
        let outcome = self.provider.generate(&req).await;
        self.last_request = Some(req);

        match outcome {
            Ok(raw) => {
                let result = interpret(&raw);
                tracing::debug!(bytes = raw.len(), has_code = result.has_code(), "synthesis finished");
                for line in DONE_LOGS {
                    self.log(line);
                }
                Ok(self.result.insert(result))
            }
            Err(e) => {
                let message = format!("{e:#}");
                tracing::warn!(error = %message, "synthesis failed");
                self.log(FAILED_LOG);
                self.log(message.clone());
                Err(ArchitectError::Generation(message))
            }
        }
    }
}
