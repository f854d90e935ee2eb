use std::collections::VecDeque;

/// Default output column count
pub const DEFAULT_LINE_WIDTH: usize = 90;

/// Configuration for terminal text layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextConfig {
    /// Wrap lines at this many characters
    pub line_width: usize,

    /// Center a `line_width` block within the terminal
    pub centered: bool,

    /// Left margin used when not centering
    pub indentation: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { line_width: DEFAULT_LINE_WIDTH, centered: true, indentation: 0 }
    }
}

impl TextConfig {
    /// Left margin for a terminal `terminal_width` columns wide (`None` when unknown).
    pub fn margin(&self, terminal_width: Option<usize>) -> usize {
        if self.centered {
            terminal_width.map_or(0, |width| centered_margin(width, self.line_width))
        } else {
            self.indentation
        }
    }

    /// Indent `text` for display.
    pub fn display(&self, text: &str, terminal_width: Option<usize>) -> String {
        indent(text, self.margin(terminal_width))
    }
}

/// Spaces needed to center a `line_width` block in `terminal_width` columns.
pub fn centered_margin(terminal_width: usize, line_width: usize) -> usize {
    terminal_width.saturating_sub(line_width) / 2
}

/// Wrap every line of `text` to at most `width` characters.
///
/// Lines that already fit are kept verbatim. A trailing empty line is added
/// unless the last line is whitespace only.
pub fn wrap_lines(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();

    for line in text.lines() {
        if width == 0 || line.chars().count() <= width {
            lines.push(line.to_string());
        } else {
            lines.extend(wrap_words(line, width));
        }
    }

    if lines.last().is_some_and(|last| last.is_empty() || !last.trim().is_empty()) {
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Split a line into alternating runs of whitespace and non-whitespace.
/// Every whitespace character becomes a single space.
fn chunks(line: &str) -> VecDeque<String> {
    let mut chunks = VecDeque::new();
    let mut current = String::new();
    let mut in_space = false;

    for c in line.chars() {
        let is_space = c.is_whitespace();
        if is_space != in_space && !current.is_empty() {
            chunks.push_back(std::mem::take(&mut current));
        }
        in_space = is_space;
        current.push(if is_space { ' ' } else { c });
    }
    if !current.is_empty() {
        chunks.push_back(current);
    }

    chunks
}

fn is_blank(chunk: &str) -> bool {
    chunk.trim().is_empty()
}

/// Greedily fill lines of at most `width` characters.
///
/// Whitespace runs inside a line are kept, whitespace at a break is dropped
/// (except the first line's indentation) and a chunk wider than `width` is
/// split to fill the rest of the current line.
fn wrap_words(line: &str, width: usize) -> Vec<String> {
    let mut chunks = chunks(line);
    let mut lines = Vec::new();

    while !chunks.is_empty() {
        if !lines.is_empty() && chunks.front().is_some_and(|c| is_blank(c)) {
            chunks.pop_front();
        }

        let mut current: Vec<String> = Vec::new();
        let mut current_length = 0;

        while let Some(chunk) = chunks.front() {
            let len = chunk.chars().count();
            if current_length + len > width {
                break;
            }
            current_length += len;
            if let Some(chunk) = chunks.pop_front() {
                current.push(chunk);
            }
        }

        if let Some(chunk) = chunks.front_mut()
            && chunk.chars().count() > width
        {
            let space_left = width - current_length;
            let split = chunk.char_indices().nth(space_left).map_or(chunk.len(), |(i, _)| i);
            let rest = chunk.split_off(split);
            if !chunk.is_empty() {
                current.push(std::mem::replace(chunk, rest));
            } else {
                *chunk = rest;
            }
        }

        if current.last().is_some_and(|c| is_blank(c)) {
            current.pop();
        }
        if !current.is_empty() {
            lines.push(current.concat());
        }
    }

    lines
}

/// Prefix every non-blank line with `margin` spaces, keeping line endings.
pub fn indent(text: &str, margin: usize) -> String {
    if margin == 0 {
        return text.to_string();
    }

    let prefix = " ".repeat(margin);
    text.split_inclusive('\n')
        .map(|line| if line.trim().is_empty() { line.to_string() } else { format!("{}{}", prefix, line) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_lines_unchanged() {
        let text = "Item #: SCP-173\n\nObject Class: Euclid";
        assert_eq!(wrap_lines(text, 90), format!("{}\n", text));
    }

    #[test]
    fn test_trailing_blank_not_doubled() {
        assert_eq!(wrap_lines("abc\n   ", 90), "abc\n   ");
    }

    #[test]
    fn test_empty_last_line_still_gets_newline() {
        assert_eq!(wrap_lines("a\n\n", 90), "a\n\n");
        assert_eq!(wrap_lines("+--+\n\n", 90), "+--+\n\n");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(wrap_lines("", 90), "");
    }

    #[test]
    fn test_long_line_wrapped() {
        let text = "This is a long line that should be wrapped at a smaller width";
        let wrapped = wrap_lines(text, 20);
        let lines: Vec<&str> = wrapped.lines().collect();
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 20));
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_words_not_split_unless_too_long() {
        let wrapped = wrap_lines("aaaa bbbbbbbbbbbb cc", 5);
        assert_eq!(wrapped, "aaaa\nbbbbb\nbbbbb\nbb cc\n");
    }

    #[test]
    fn test_mixed_lines() {
        let text = "short\none two three four five six";
        assert_eq!(wrap_lines(text, 10), "short\none two\nthree four\nfive six\n");
    }

    #[test]
    fn test_wrap_words() {
        let wrapped = wrap_words("hello world this is a test", 10);
        assert_eq!(wrapped, vec!["hello", "world this", "is a test"]);
    }

    #[test]
    fn test_inner_spacing_kept() {
        assert_eq!(wrap_lines("one  two three four", 10), "one  two\nthree four\n");
    }

    #[test]
    fn test_leading_indent_kept() {
        assert_eq!(wrap_lines("  alpha beta gamma", 12), "  alpha beta\ngamma\n");
    }

    #[test]
    fn test_long_word_fills_current_line() {
        assert_eq!(wrap_words("ab cdefghij", 5), vec!["ab cd", "efghi", "j"]);
    }

    #[test]
    fn test_indent_skips_blank_lines() {
        assert_eq!(indent("a\n\nb\n", 2), "  a\n\n  b\n");
        assert_eq!(indent("a", 0), "a");
    }

    #[test]
    fn test_centered_margin() {
        assert_eq!(centered_margin(120, 90), 15);
        assert_eq!(centered_margin(80, 90), 0);
    }

    #[test]
    fn test_text_config_margin() {
        let config = TextConfig::default();
        assert_eq!(config.margin(Some(100)), 5);
        assert_eq!(config.margin(None), 0);

        let fixed = TextConfig { centered: false, indentation: 4, ..Default::default() };
        assert_eq!(fixed.margin(Some(200)), 4);
        assert_eq!(fixed.display("x\n", None), "    x\n");
    }
}
