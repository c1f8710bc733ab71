use crate::wire::{GenerationRequest, GenerationResult};
use fs_err as fs;
use serde_json::to_string_pretty;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct SavedPaths {
    pub dir: PathBuf,
    pub request: Option<PathBuf>,
    pub response: Option<PathBuf>,
}

pub fn tx_dir(root: &Path, tx: Uuid) -> PathBuf {
    root.join(".locobot").join("tx").join(tx.to_string())
}

/// Persist the request and/or result of one synthesis as pretty JSON.
pub fn save_stage(
    stage: &str,
    req: &GenerationRequest,
    result: Option<&GenerationResult>,
    root: &Path,
    tx: Uuid,
    save_request: bool,
    save_response: bool,
) -> anyhow::Result<SavedPaths> {
    let dir = tx_dir(root, tx);
    let mut request_path = None;
    let mut response_path = None;

    let response = result.filter(|_| save_response);
    if save_request || response.is_some() {
        fs::create_dir_all(&dir)?;
    }

    if save_request {
        let p = dir.join(format!("{stage}.request.json"));
        fs::write(&p, to_string_pretty(req)?)?;
        request_path = Some(p);
    }

    if let Some(result) = response {
        let p = dir.join(format!("{stage}.response.json"));
        fs::write(&p, to_string_pretty(result)?)?;
        response_path = Some(p);
    }

    Ok(SavedPaths { dir, request: request_path, response: response_path })
}

pub fn trace_planned_paths(root: &Path, tx: Uuid) {
    let dir = tx_dir(root, tx);
    tracing::debug!("planned transcript directory: {}", dir.display());
}

pub fn trace_saved_paths(stage: &str, saved: &SavedPaths) {
    tracing::debug!("[{stage}] transcript directory: {}", saved.dir.display());
    match &saved.request {
        Some(p) => tracing::debug!("[{stage}] request saved at: {}", p.display()),
        None => tracing::debug!("[{stage}] request not saved (flag off)"),
    }
    match &saved.response {
        Some(p) => tracing::debug!("[{stage}] response saved at: {}", p.display()),
        None => tracing::debug!("[{stage}] response not saved"),
    }
}

pub fn trace_json(stage: &str, req: &GenerationRequest, result: Option<&GenerationResult>) -> anyhow::Result<()> {
    tracing::debug!("===== [{stage}] REQUEST JSON =====\n{}", to_string_pretty(req)?);
    if let Some(r) = result {
        tracing::debug!("===== [{stage}] RESULT JSON =====\n{}", to_string_pretty(r)?);
    }
    Ok(())
}
