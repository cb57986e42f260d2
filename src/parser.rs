use crate::error::ShellError;
use crate::lexer::Token;

/// Splits a token run on every occurrence of `delim`.
///
/// Always yields one more group than there are delimiters, so leading,
/// trailing and doubled delimiters show up as empty groups. Callers skip
/// those rather than treat them as errors.
pub fn split_on<'a>(tokens: &'a [Token], delim: &Token) -> Vec<&'a [Token]> {
    tokens.split(|t| t == delim).collect()
}

/// A group with its output redirection resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection<'a> {
    pub command: &'a [Token],
    pub target: Option<&'a str>,
}

/// Accepts `cmd ...` or `cmd ... > file`, nothing else.
pub fn parse_redirect(group: &[Token]) -> Result<Redirection<'_>, ShellError> {
    let parts = split_on(group, &Token::RedirectOut);
    match parts[..] {
        [command] if !command.is_empty() => Ok(Redirection { command, target: None }),
        [_] => Err(ShellError::Syntax("empty command".to_string())),
        [command, _] if command.is_empty() => {
            Err(ShellError::Syntax("missing command before '>'".to_string()))
        }
        [command, target] => match target {
            [Token::Word(file)] => Ok(Redirection { command, target: Some(file.as_str()) }),
            _ => Err(ShellError::Syntax("'>' expects exactly one file".to_string())),
        },
        _ => Err(ShellError::Syntax("more than one '>'".to_string())),
    }
}

/// Argument vector for one stage; operators never reach here but are kept
/// by their text if they do.
pub fn argv(stage: &[Token]) -> Vec<String> {
    stage.iter().map(|t| t.text().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    #[test]
    fn test_split_keeps_empty_groups() {
        let tokens = Lexer::tokenize("& a b && c &");
        let groups = split_on(&tokens, &Token::Parallel);
        let sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        assert_eq!(sizes, vec![0, 2, 0, 1, 0]);
    }

    #[test]
    fn test_split_without_delimiter() {
        let tokens = Lexer::tokenize("ls -l");
        let groups = split_on(&tokens, &Token::Pipe);
        assert_eq!(groups.len(), 1);
        assert_eq!(argv(groups[0]), vec!["ls", "-l"]);
    }

    #[test]
    fn test_split_empty_sequence() {
        let groups = split_on(&[], &Token::Parallel);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].is_empty());
    }

    #[test]
    fn test_redirect_absent() {
        let tokens = Lexer::tokenize("ls | wc");
        let r = parse_redirect(&tokens).unwrap();
        assert_eq!(r.command.len(), 3);
        assert_eq!(r.target, None);
    }

    #[test]
    fn test_redirect_single_target() {
        let tokens = Lexer::tokenize("echo hi | cat >out.txt");
        let r = parse_redirect(&tokens).unwrap();
        assert_eq!(argv(r.command), vec!["echo", "hi", "|", "cat"]);
        assert_eq!(r.target, Some("out.txt"));
    }

    #[test]
    fn test_redirect_rejects_malformed_shapes() {
        for line in ["> out", "echo >", "echo > a b", "echo > a > b", "echo >> a", "echo > |"] {
            let tokens = Lexer::tokenize(line);
            let err = parse_redirect(&tokens).unwrap_err();
            assert!(matches!(err, ShellError::Syntax(_)), "{line}: {err:?}");
        }
    }
}
