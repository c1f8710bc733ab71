use pulldown_cmark::{escape, html, Event, Options, Parser};

use crate::wire::Mode;

fn options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);
    opts
}

/// Markdown to an HTML fragment. GitHub-style tables and fences are on and
/// single line breaks are kept as `<br />`.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options()).map(|ev| match ev {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Escape text for a double-quoted attribute or an element body.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    // Writing into a String cannot fail.
    let _ = escape::escape_html(&mut out, text);
    out
}

const PAGE_STYLE: &str = r#"
  body { margin: 0; background: #09090b; color: #d4d4d8; font: 15px/1.7 system-ui, sans-serif; }
  main { max-width: 960px; margin: 0 auto; padding: 48px 24px 120px; }
  header { font: 700 11px/1 ui-monospace, monospace; letter-spacing: .2em; text-transform: uppercase; color: #71717a; margin-bottom: 32px; }
  h1, h2, h3 { color: #fafafa; }
  pre { background: #18181b; border: 1px solid #27272a; border-radius: 12px; padding: 16px; overflow-x: auto; }
  code { font-family: ui-monospace, monospace; font-size: 13px; }
  table { border-collapse: collapse; } th, td { border: 1px solid #27272a; padding: 6px 12px; }
  a { color: #60a5fa; }
"#;

/// Standalone page around the rendered blueprint.
pub fn render_blueprint_page(mode: Mode, markdown: &str) -> String {
    format!(
"<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">
<title>LOCOBOT {title} Blueprint</title>
<style>{style}</style>
</head>
<body>
<main>
<header>{tag} Synthesis &bull; Architectural Output</header>
<article class=\"markdown-content\">
{body}</article>
</main>
</body>
</html>
",
        title = escape_html(mode.title()),
        style = PAGE_STYLE,
        tag = mode.tag(),
        body = render_markdown(markdown),
    )
}
