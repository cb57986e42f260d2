mod token;

pub use token::Token;

pub struct Lexer;

impl Lexer {
    /// Splits a raw line into words and single-character operators.
    /// `&`, `>` and `|` always stand alone, whitespace only separates.
    pub fn tokenize(line: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut buf = String::new();

        for ch in line.chars() {
            // any Unicode whitespace separates, not only space, tab and newline
            if ch.is_whitespace() {
                Self::flush(&mut buf, &mut tokens);
            } else if let Some(op) = Token::from_operator(ch) {
                Self::flush(&mut buf, &mut tokens);
                tokens.push(op);
            } else {
                buf.push(ch);
            }
        }
        Self::flush(&mut buf, &mut tokens);

        log::trace!("tokenized {:?} into {} tokens", line, tokens.len());
        tokens
    }

    fn flush(buf: &mut String, tokens: &mut Vec<Token>) {
        if !buf.is_empty() {
            tokens.push(Token::Word(std::mem::take(buf)));
        }
    }
}
