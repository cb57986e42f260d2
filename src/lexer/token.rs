#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),  // command name or argument
    Parallel,      // &
    RedirectOut,   // >
    Pipe,          // |
}

impl Token {
    pub fn from_operator(ch: char) -> Option<Token> {
        match ch {
            '&' => Some(Token::Parallel),
            '>' => Some(Token::RedirectOut),
            '|' => Some(Token::Pipe),
            _ => None,
        }
    }

    /// The token as it appeared on the line.
    pub fn text(&self) -> &str {
        match self {
            Token::Word(w) => w,
            Token::Parallel => "&",
            Token::RedirectOut => ">",
            Token::Pipe => "|",
        }
    }
}
