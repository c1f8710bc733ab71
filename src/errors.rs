use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArchitectError {
    #[error("prompt is empty")] EmptyPrompt,
    #[error("generation failed: {0}")] Generation(String),
    #[error("config error: {0}")] Config(String),
    #[error("export failed: {0}")] Export(String),
}
