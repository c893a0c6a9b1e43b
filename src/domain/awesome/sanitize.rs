use html2text::render::text_renderer::TrivialDecorator;
use regex::Regex;
use std::sync::LazyLock;

static NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\r|\n").expect("valid newline pattern"));

/// Make user text safe for a Markdown table cell.
///
/// Markup is stripped down to its text and newlines become spaces. The
/// text is then HTML-escaped, since html2text decodes entities such as
/// `&lt;`, and pipes are escaped so the cell cannot break out of its row.
pub fn sanitize(text: &str) -> String {
    // Convert HTML to plain text, without markdown decorations
    let plain_text =
        html2text::from_read_with_decorator(text.as_bytes(), usize::MAX, TrivialDecorator::new());

    let single_line = NEWLINES.replace_all(&plain_text, " ");

    escape_html(single_line.trim()).replace('|', "\\|")
}

/// Escape the characters that can open a tag or close a quoted attribute
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
