use crate::environment::Environment;
use crate::error::{ErrorReporter, ShellError};
use crate::executor::redirect::RedirectHandler;
use crate::executor::spawn::{spawn, ProcessSet, StdioBinding};
use crate::lexer::Token;
use crate::parser::split_on;

pub struct ParallelHandler;

impl ParallelHandler {
    /// Runs every `&`-separated group of a line in its own process and
    /// returns once all of them have exited.
    ///
    /// `&` only means "at the same time": the caller does not get control
    /// back while any group is still running. Returns the number of groups
    /// spawned.
    pub fn run(tokens: &[Token], env: &Environment, reporter: ErrorReporter) -> Result<usize, ShellError> {
        let mut children = ProcessSet::new();

        for group in split_on(tokens, &Token::Parallel) {
            if group.is_empty() {
                continue;
            }
            let body = || RedirectHandler::run_group(group, env, reporter);
            match spawn(&StdioBinding::inherit(), reporter, body) {
                Ok(pid) => children.push(pid),
                Err(e) => {
                    // reap what already started before giving up
                    let _ = children.wait_all();
                    return Err(e);
                }
            }
        }

        let spawned = children.len();
        children.wait_all()?;
        Ok(spawned)
    }
}
