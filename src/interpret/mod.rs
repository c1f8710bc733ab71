use regex::Regex;
use std::sync::OnceLock;

use crate::wire::GenerationResult;

/// Language tags accepted on a fence. An untagged fence is accepted too.
pub const RECOGNIZED_TAGS: [&str; 6] = ["html", "javascript", "typescript", "jsx", "tsx", "css"];

const FENCE: &str = "```";

/// A fence's info string: nothing, or one tag word glued to the backticks.
/// Backticks followed by a space and prose are a mention, not a fence.
fn info_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9+#.\-]*$").expect("info regex is valid"))
}

fn tag_is_recognized(tag: &str) -> bool {
    tag.is_empty() || RECOGNIZED_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

/// Inner text of the first fenced block whose tag is empty or recognized.
/// Blocks with other tags are skipped whole, so their closing fence is never
/// mistaken for an opening one.
pub fn extract_code(raw: &str) -> Option<&str> {
    let mut pos = 0;
    while let Some(found) = raw[pos..].find(FENCE) {
        let after = pos + found + FENCE.len();
        // No newline left means no block body can follow.
        let line_end = after + raw[after..].find('\n')?;
        let info = raw[after..line_end].trim_end();
        if !info_re().is_match(info) {
            pos = after;
            continue;
        }
        let body = line_end + 1;
        let close = body + raw[body..].find(FENCE)?;
        if tag_is_recognized(info) {
            return Some(&raw[body..close]);
        }
        pos = close + FENCE.len();
    }
    None
}

pub fn interpret(raw: &str) -> GenerationResult {
    GenerationResult {
        raw_markdown: raw.to_string(),
        extracted_code: extract_code(raw).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_fence_means_no_code() {
        let r = interpret("no code here");
        assert_eq!(r.raw_markdown, "no code here");
        assert!(r.extracted_code.is_none());
    }

    #[test]
    fn extracts_inline_html_block() {
        let r = interpret("prefix ```html\n<h1>hi</h1>\n``` suffix");
        assert_eq!(r.extracted_code.as_deref(), Some("<h1>hi</h1>\n"));
    }

    #[test]
    fn first_of_two_blocks_wins() {
        let raw = "## Plan\n```html\n<p>one</p>\n```\ntext\n```html\n<p>two</p>\n```\n";
        assert_eq!(extract_code(raw), Some("<p>one</p>\n"));
    }

    #[test]
    fn untagged_and_uppercase_tags_are_accepted() {
        assert_eq!(extract_code("```\nlet x = 1;\n```"), Some("let x = 1;\n"));
        assert_eq!(extract_code("```HTML\n<b>x</b>\n```"), Some("<b>x</b>\n"));
        assert_eq!(extract_code("```tsx  \nconst A = 1\n```"), Some("const A = 1\n"));
    }

    #[test]
    fn unrecognized_block_is_skipped_whole() {
        let raw = "```python\nprint('hi')\n```\n\n```css\nbody { margin: 0 }\n```";
        assert_eq!(extract_code(raw), Some("body { margin: 0 }\n"));
    }

    #[test]
    fn only_unrecognized_blocks_yield_nothing() {
        assert_eq!(extract_code("```bash\nls\n```"), None);
    }

    #[test]
    fn backticks_mentioned_in_prose_are_not_a_fence() {
        let raw = "Wrap code in ``` fences.\n\n```html\n<p>x</p>\n```\n";
        assert_eq!(extract_code(raw), Some("<p>x</p>\n"));
    }

    #[test]
    fn mention_after_a_skipped_block_is_ignored_too() {
        let raw = "```bash\nls\n```\nUse ``` to quote.\n```css\na { color: red }\n```";
        assert_eq!(extract_code(raw), Some("a { color: red }\n"));
    }

    #[test]
    fn unterminated_fence_yields_nothing() {
        assert_eq!(extract_code("```html\n<div>"), None);
    }

    #[test]
    fn crlf_line_endings() {
        assert_eq!(extract_code("```html\r\n<i>x</i>\r\n```"), Some("<i>x</i>\r\n"));
    }

    #[test]
    fn extracted_code_is_a_substring_of_the_markdown() {
        let raw = "### Features\n```javascript\nalert(1)\n```";
        let r = interpret(raw);
        let code = r.extracted_code.unwrap();
        assert!(r.raw_markdown.contains(&code));
    }
}
