use super::token::Token;
use crate::utils::lines::split_lines_keep_ends;

/// Splits text into lines, each token holding a whole line including its
/// terminator (`\n` or `\r\n`). Unlike the word tokenizer, a line's
/// terminator is not semantically separable from its content: the
/// line-level generators (Starscream/Optimus/Megatron) need exactly one
/// token per line so that "one operation per line" means what it says.
///
/// ## Example
///
/// ```not_rust
/// "Hello\nWorld!" -> ["Hello\n", "World!"]
/// "Line 1\r\nLine 2" -> ["Line 1\r\n", "Line 2"]
/// ```
pub fn line_tokenizer(text: &str) -> Vec<Token<String>> {
    split_lines_keep_ends(text).into_iter().map(Token::from).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn originals(tokens: &[Token<String>]) -> Vec<&str> {
        tokens.iter().map(Token::original).collect()
    }

    #[test]
    fn test_empty() {
        assert_eq!(line_tokenizer(""), Vec::<Token<String>>::new());
    }

    #[test]
    fn test_single_line_without_terminator() {
        assert_eq!(originals(&line_tokenizer("Hello")), vec!["Hello"]);
    }

    #[test]
    fn test_line_content_and_terminator_share_one_token() {
        assert_eq!(originals(&line_tokenizer("Hello\nWorld")), vec!["Hello\n", "World"]);
    }

    #[test]
    fn test_trailing_newline() {
        assert_eq!(originals(&line_tokenizer("Hello\nWorld\n")), vec!["Hello\n", "World\n"]);
    }

    #[test]
    fn test_crlf() {
        assert_eq!(originals(&line_tokenizer("Line 1\r\nLine 2")), vec!["Line 1\r\n", "Line 2"]);
    }

    #[test]
    fn test_multiple_lines() {
        assert_eq!(
            originals(&line_tokenizer("Multi\nLine\nText\nHere")),
            vec!["Multi\n", "Line\n", "Text\n", "Here"]
        );
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(originals(&line_tokenizer("Start\n\nEnd")), vec!["Start\n", "\n", "End"]);
    }

    #[test]
    fn test_only_newlines() {
        assert_eq!(originals(&line_tokenizer("\n\n")), vec!["\n", "\n"]);
    }
}
