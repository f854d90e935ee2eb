/// Default spaces between the frame border and its content
pub const DEFAULT_PADDING: usize = 2;

/// Draw an ASCII box around already wrapped text.
///
/// ```text
/// +-------+
/// |  abc  |
/// |  d    |
/// +-------+
/// ```
///
/// Width is measured in characters. Empty content produces an empty string.
pub fn create_frame(content: &str, padding: usize) -> String {
    if content.is_empty() {
        return String::new();
    }

    let lines: Vec<&str> = content.split('\n').collect();
    let Some(max_length) = lines.iter().map(|line| line.chars().count()).max() else {
        return String::new();
    };

    let edge = format!("+{}+", "-".repeat(max_length + 2 * padding));
    let pad = " ".repeat(padding);

    let mut framed = Vec::with_capacity(lines.len() + 2);
    framed.push(edge.clone());
    for line in &lines {
        framed.push(format!("|{pad}{line:<max_length$}{pad}|"));
    }
    framed.push(edge);

    framed.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_layout() {
        let framed = create_frame("abc\nd", DEFAULT_PADDING);
        assert_eq!(framed, "+-------+\n|  abc  |\n|  d    |\n+-------+");
    }

    #[test]
    fn test_frame_widths_are_uniform() {
        let content = "The quick brown fox\njumps\n\nover the lazy dog, twice over";
        let framed = create_frame(content, 3);
        let max = content.lines().map(|l| l.chars().count()).max().unwrap();

        let lines: Vec<&str> = framed.lines().collect();
        assert_eq!(lines.len(), content.split('\n').count() + 2);
        assert_eq!(lines[0].chars().count(), max + 2 * 3 + 2);
        assert_eq!(lines[0], lines[lines.len() - 1]);
        for interior in &lines[1..lines.len() - 1] {
            assert!(interior.starts_with('|') && interior.ends_with('|'));
            let inner = &interior[1..interior.len() - 1];
            assert_eq!(inner.chars().count(), max + 2 * 3);
        }
    }

    #[test]
    fn test_frame_counts_chars_not_bytes() {
        let framed = create_frame("née\nab", 1);
        let lines: Vec<&str> = framed.lines().collect();
        assert_eq!(lines[0], "+-----+");
        assert_eq!(lines[1], "| née |");
        assert_eq!(lines[2], "| ab  |");
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(create_frame("", DEFAULT_PADDING), "");
    }

    #[test]
    fn test_blank_lines_are_framed() {
        let framed = create_frame("\nA\n", 2);
        assert_eq!(framed, "+-----+\n|     |\n|  A  |\n|     |\n+-----+");
    }
}
