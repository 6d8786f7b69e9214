/// Splits `text` into lines, each retaining its own line terminator (`\n` or
/// `\r\n`) except possibly the last, which has none iff `text` did not end in
/// a newline. Mirrors the line-splitting rule the ASCII codec and the
/// line-oriented generators (Starscream/Optimus/Megatron/Flash) all rely on.
pub fn split_lines_keep_ends(text: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\n' {
            result.push(&text[start..=i]);
            i += 1;
            start = i;
        } else {
            i += 1;
        }
    }

    if start < text.len() {
        result.push(&text[start..]);
    }

    result
}

/// Strips a trailing `\n` or `\r\n` from a single line, returning the line
/// content without its terminator.
pub fn strip_terminator(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(split_lines_keep_ends(""), Vec::<&str>::new());
    }

    #[test]
    fn test_no_trailing_newline() {
        assert_eq!(split_lines_keep_ends("a\nb"), vec!["a\n", "b"]);
    }

    #[test]
    fn test_trailing_newline() {
        assert_eq!(split_lines_keep_ends("a\nb\n"), vec!["a\n", "b\n"]);
    }

    #[test]
    fn test_crlf() {
        assert_eq!(split_lines_keep_ends("a\r\nb"), vec!["a\r\n", "b"]);
    }

    #[test]
    fn test_strip_terminator() {
        assert_eq!(strip_terminator("a\n"), "a");
        assert_eq!(strip_terminator("a\r\n"), "a");
        assert_eq!(strip_terminator("a"), "a");
    }
}
