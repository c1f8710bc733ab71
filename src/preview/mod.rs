//! Isolated preview page for an extracted artifact.
//!
//! The artifact runs inside an `<iframe sandbox="allow-scripts">` loaded
//! through `srcdoc`. Without `allow-same-origin` the frame gets an opaque
//! origin: scripts run, but storage, cookies and the parent DOM are out of
//! reach.

use crate::render::escape_html;
use crate::wire::{ArtifactKind, GenerationResult, Mode};

pub const SANDBOX_POLICY: &str = "allow-scripts";
pub const PLACEHOLDER_TEXT: &str = "No executable artifact was synthesized";

/// Wrap a fragment (bare markup, script or styles) in a host document.
fn as_document(code: &str, kind: ArtifactKind) -> String {
    match kind {
        ArtifactKind::Document => code.to_string(),
        ArtifactKind::Fragment => format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><script src=\"https://cdn.tailwindcss.com\"></script></head>\n<body>\n{code}\n</body>\n</html>\n"
        ),
    }
}

fn frame(result: &GenerationResult) -> String {
    match (result.extracted_code.as_deref(), result.artifact_kind()) {
        (Some(code), Some(kind)) => format!(
            "<iframe title=\"artifact\" sandbox=\"{SANDBOX_POLICY}\" srcdoc=\"{}\"></iframe>",
            escape_html(&as_document(code, kind))
        ),
        _ => format!("<div class=\"placeholder\">{PLACEHOLDER_TEXT}</div>"),
    }
}

pub fn render_preview_page(mode: Mode, result: &GenerationResult) -> String {
    format!(
"<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<title>LOCOBOT {tag} Preview</title>
<style>
  html, body {{ margin: 0; height: 100%; background: #09090b; }}
  iframe {{ border: 0; width: 100%; height: 100%; background: #fff; }}
  .placeholder {{ display: flex; height: 100%; align-items: center; justify-content: center;
    color: #71717a; font: 14px ui-monospace, monospace; text-transform: uppercase; letter-spacing: .1em; }}
</style>
</head>
<body>
{frame}
</body>
</html>
",
        tag = mode.tag(),
        frame = frame(result),
    )
}
