//! Markdown-to-HTML rendering for transcript entries.
//!
//! Model replies are mostly a fenced code block with a little prose around
//! it. This renderer handles the block-level subset that shows up in
//! practice (paragraphs, ATX headings, bullet and numbered lists, fenced
//! code) plus inline code, bold and emphasis. Fenced blocks are emitted as
//! `<pre class="language-X"><code class="language-X">` so a client-side
//! highlighter can pick them up.
//!
//! Replies are passed through [`normalize`] first to undo the escaping some
//! providers and proxies apply.

use regex::Regex;
use std::sync::LazyLock;

#[cfg(test)]
mod tests;

/// Language assumed for fenced blocks without an info string.
pub const DEFAULT_CODE_LANGUAGE: &str = "typescript";

static LEADING_FENCE_LANG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```\w+").expect("Invalid leading fence regex"));
static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(\w*)").expect("Invalid fence regex"));
static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```\s*$").expect("Invalid trailing fence regex"));
static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("Invalid blank run regex"));

/// Clean up a raw reply before rendering.
///
/// - a language tag on a fence opening the reply is dropped
/// - `&#x60;` and `&grave;` become backticks
/// - literal `\n` sequences become newlines and `\"` becomes `"`
/// - every fence is isolated on its own line
/// - runs of three or more newlines collapse to one blank line
pub fn normalize(text: &str) -> String {
    let text = LEADING_FENCE_LANG.replace(text, "```");
    let text = text
        .replace("&#x60;", "`")
        .replace("&grave;", "`")
        .replace("\\n", "\n")
        .replace("\\\"", "\"");
    let text = FENCE.replace_all(&text, "\n```${1}\n");
    let text = TRAILING_FENCE.replace(&text, "\n```\n");
    BLANK_RUNS.replace_all(&text, "\n\n").into_owned()
}

/// Escape text for inclusion in HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// A fenced code block found in a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Lower-cased info string, or [`DEFAULT_CODE_LANGUAGE`].
    pub language: String,
    /// Block body without surrounding blank lines.
    pub code: String,
}

#[derive(Debug)]
enum Block {
    Paragraph(Vec<String>),
    Heading(usize, String),
    List { ordered: bool, items: Vec<String> },
    Code(CodeBlock),
}

/// Render normalized Markdown to an HTML fragment.
pub fn render_html(text: &str) -> String {
    let normalized = normalize(text);
    parse_blocks(&normalized)
        .iter()
        .map(block_to_html)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every fenced code block in a reply, in order.
pub fn code_blocks(text: &str) -> Vec<CodeBlock> {
    parse_blocks(&normalize(text))
        .into_iter()
        .filter_map(|block| match block {
            Block::Code(code) => Some(code),
            _ => None,
        })
        .collect()
}

/// The text a "Copy code" action puts on the clipboard: all code block
/// bodies, trimmed and joined by a blank line. `None` when the reply has
/// no code.
pub fn copy_code(text: &str) -> Option<String> {
    let blocks = code_blocks(text);
    if blocks.is_empty() {
        return None;
    }
    Some(
        blocks
            .iter()
            .map(|b| b.code.trim())
            .collect::<Vec<_>>()
            .join("\n\n"),
    )
}

fn parse_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<String> = Vec::new();
    let mut code: Option<(String, Vec<&str>)> = None;

    for line in text.lines() {
        let trimmed = line.trim();

        if let Some((language, lines)) = code.as_mut() {
            if trimmed.starts_with("```") {
                blocks.push(Block::Code(finish_code(language, lines)));
                code = None;
            } else {
                lines.push(line);
            }
            continue;
        }

        if let Some(info) = trimmed.strip_prefix("```") {
            flush_paragraph(&mut blocks, &mut paragraph);
            code = Some((fence_language(info), Vec::new()));
            continue;
        }

        if trimmed.is_empty() {
            flush_paragraph(&mut blocks, &mut paragraph);
            continue;
        }

        if let Some((level, title)) = heading(trimmed) {
            flush_paragraph(&mut blocks, &mut paragraph);
            blocks.push(Block::Heading(level, title.to_string()));
            continue;
        }

        if let Some((ordered, item)) = list_item(trimmed) {
            flush_paragraph(&mut blocks, &mut paragraph);
            match blocks.last_mut() {
                Some(Block::List { ordered: o, items }) if *o == ordered => {
                    items.push(item.to_string())
                }
                _ => blocks.push(Block::List {
                    ordered,
                    items: vec![item.to_string()],
                }),
            }
            continue;
        }

        paragraph.push(trimmed.to_string());
    }

    // An unterminated fence still yields its code.
    if let Some((language, lines)) = code {
        blocks.push(Block::Code(finish_code(&language, &lines)));
    }
    flush_paragraph(&mut blocks, &mut paragraph);

    blocks
}

fn flush_paragraph(blocks: &mut Vec<Block>, paragraph: &mut Vec<String>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph(std::mem::take(paragraph)));
    }
}

fn fence_language(info: &str) -> String {
    let language: String = info
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '#'))
        .collect();
    if language.is_empty() {
        DEFAULT_CODE_LANGUAGE.to_string()
    } else {
        language
    }
}

fn finish_code(language: &str, lines: &[&str]) -> CodeBlock {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    let code = match (start, end) {
        (Some(s), Some(e)) => lines[s..=e].join("\n"),
        _ => String::new(),
    };
    CodeBlock {
        language: language.to_string(),
        code,
    }
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if (1..=6).contains(&level) {
        line[level..].strip_prefix(' ').map(|rest| (level, rest.trim()))
    } else {
        None
    }
}

fn list_item(line: &str) -> Option<(bool, &str)> {
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Some((false, rest));
    }
    let pos = line.find(". ")?;
    let prefix = &line[..pos];
    if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit()) {
        Some((true, &line[pos + 2..]))
    } else {
        None
    }
}

fn block_to_html(block: &Block) -> String {
    match block {
        Block::Paragraph(lines) => {
            let body = lines
                .iter()
                .map(|l| render_inline(l))
                .collect::<Vec<_>>()
                .join("<br>\n");
            format!("<p>{}</p>", body)
        }
        Block::Heading(level, title) => {
            format!("<h{level}>{}</h{level}>", render_inline(title))
        }
        Block::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            let items: String = items
                .iter()
                .map(|item| format!("<li>{}</li>", render_inline(item)))
                .collect();
            format!("<{tag}>{items}</{tag}>")
        }
        Block::Code(CodeBlock { language, code }) => format!(
            "<pre class=\"language-{lang}\"><code class=\"language-{lang}\">{}</code></pre>",
            escape_html(code),
            lang = language
        ),
    }
}

/// Inline formatting: `` `code` ``, `**bold**`, `*em*`. Text is escaped.
fn render_inline(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut out = String::new();
    let mut buf = String::new();
    let mut i = 0;

    while i < len {
        if chars[i] == '`' {
            if let Some(end) = find_char(&chars, i + 1, '`') {
                out.push_str(&escape_html(&std::mem::take(&mut buf)));
                let code: String = chars[i + 1..end].iter().collect();
                out.push_str(&format!("<code>{}</code>", escape_html(&code)));
                i = end + 1;
                continue;
            }
        }

        if chars[i] == '*' && i + 1 < len && chars[i + 1] == '*' {
            if let Some(end) = find_pair(&chars, i + 2, '*') {
                out.push_str(&escape_html(&std::mem::take(&mut buf)));
                let inner: String = chars[i + 2..end].iter().collect();
                out.push_str(&format!("<strong>{}</strong>", render_inline(&inner)));
                i = end + 2;
                continue;
            }
        }

        if chars[i] == '*' {
            if let Some(end) = find_char(&chars, i + 1, '*').filter(|&e| e > i + 1) {
                out.push_str(&escape_html(&std::mem::take(&mut buf)));
                let inner: String = chars[i + 1..end].iter().collect();
                out.push_str(&format!("<em>{}</em>", escape_html(&inner)));
                i = end + 1;
                continue;
            }
        }

        buf.push(chars[i]);
        i += 1;
    }

    out.push_str(&escape_html(&buf));
    out
}

fn find_char(chars: &[char], from: usize, target: char) -> Option<usize> {
    (from..chars.len()).find(|&j| chars[j] == target)
}

fn find_pair(chars: &[char], from: usize, target: char) -> Option<usize> {
    (from..chars.len().saturating_sub(1)).find(|&j| chars[j] == target && chars[j + 1] == target)
}
