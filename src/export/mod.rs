use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use fs_err as fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::errors::ArchitectError;
use crate::preview::render_preview_page;
use crate::render::render_blueprint_page;
use crate::wire::{GenerationResult, Mode};

#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    pub artifact: bool,
    pub blueprint: bool,
    pub preview: bool,
}

#[derive(Debug, Clone)]
pub struct Written {
    pub label: &'static str,
    pub path: PathBuf,
    pub bytes: u64,
}

/// `<mode>-<YYYYMMDD-HHMMSS>`, shared by every file of one export.
pub fn artifact_stem(mode: Mode, at: DateTime<Local>) -> String {
    format!("{}-{}", mode.slug(), at.format("%Y%m%d-%H%M%S"))
}

/// Downloadable payload: the extracted code, or the whole response when
/// nothing was extracted.
pub fn artifact_body(result: &GenerationResult) -> &str {
    result.extracted_code.as_deref().unwrap_or(&result.raw_markdown)
}

/// Write through a temp file in the same directory, then rename into place.
pub fn write_atomic(path: &Path, data: &str) -> Result<u64> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("cannot create temp file in {}", dir.display()))?;
    fs::write(tmp.path(), data)?;
    tmp.persist(path)
        .with_context(|| format!("cannot persist {}", path.display()))?;
    Ok(data.len() as u64)
}

fn export_inner(
    out_dir: &Path,
    mode: Mode,
    result: &GenerationResult,
    opts: ExportOptions,
    at: DateTime<Local>,
) -> Result<Vec<Written>> {
    let stem = artifact_stem(mode, at);
    let mut written = Vec::new();

    if opts.artifact {
        let path = out_dir.join(format!("{stem}.html"));
        let bytes = write_atomic(&path, artifact_body(result))?;
        written.push(Written { label: "artifact", path, bytes });
    }
    if opts.blueprint {
        let path = out_dir.join(format!("{stem}.blueprint.html"));
        let bytes = write_atomic(&path, &render_blueprint_page(mode, &result.raw_markdown))?;
        written.push(Written { label: "blueprint", path, bytes });
    }
    if opts.preview {
        let path = out_dir.join(format!("{stem}.preview.html"));
        let bytes = write_atomic(&path, &render_preview_page(mode, result))?;
        written.push(Written { label: "preview", path, bytes });
    }

    tracing::debug!(count = written.len(), dir = %out_dir.display(), "export finished");
    Ok(written)
}

pub fn export(
    out_dir: &Path,
    mode: Mode,
    result: &GenerationResult,
    opts: ExportOptions,
    at: DateTime<Local>,
) -> Result<Vec<Written>, ArchitectError> {
    export_inner(out_dir, mode, result, opts, at).map_err(|e| ArchitectError::Export(format!("{e:#}")))
}
