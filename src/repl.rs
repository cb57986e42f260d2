use std::io::BufRead;

use crate::config::Config;
use crate::environment::Environment;
use crate::error::ErrorReporter;
use crate::executor::{BuiltinManager, ExecOutcome, ExecStatus, ParallelHandler, EXIT_FAILURE, EXIT_SUCCESS};
use crate::io::InputHandler;
use crate::lexer::Lexer;

/// The interpreter: one line at a time, each fully finished before the
/// next is read.
pub struct Shell {
    env: Environment,
    builtins: BuiltinManager,
    reporter: ErrorReporter,
}

impl Shell {
    pub fn new(config: &Config) -> Self {
        Shell {
            env: Environment::with_search_path(config.search_path.clone()),
            builtins: BuiltinManager::new(),
            reporter: ErrorReporter::new(config.verbose_errors),
        }
    }

    /// Reads and runs lines until end of input or `exit`, returning the
    /// interpreter's exit status.
    pub fn run<R: BufRead>(&mut self, input: &mut InputHandler<R>) -> i32 {
        loop {
            let line = match input.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => return EXIT_SUCCESS,
                Err(e) => {
                    log::debug!("input closed: {}", e);
                    return EXIT_SUCCESS;
                }
            };

            match self.execute_line(&line) {
                Ok(ExecOutcome::Continue) => {}
                Ok(ExecOutcome::Exit(code)) => return code,
                Err(e) => {
                    // spawning or reaping failed in the interpreter itself
                    self.reporter.report(&e);
                    return EXIT_FAILURE;
                }
            }
        }
    }

    /// Built-ins run here; everything else goes out to child processes.
    /// Errors a built-in reports are not fatal, only process-management
    /// failures come back as `Err`.
    pub fn execute_line(&mut self, line: &str) -> ExecStatus {
        let tokens = Lexer::tokenize(line);
        if tokens.is_empty() {
            return Ok(ExecOutcome::Continue);
        }

        if let Some(status) = self.builtins.dispatch(&tokens, &mut self.env) {
            return match status {
                Err(e) => {
                    self.reporter.report(&e);
                    Ok(ExecOutcome::Continue)
                }
                ok => ok,
            };
        }

        let spawned = ParallelHandler::run(&tokens, &self.env, self.reporter)?;
        log::debug!("line finished, {} group(s) reaped", spawned);
        Ok(ExecOutcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use std::io::Cursor;

    fn shell() -> Shell {
        Shell::new(&ConfigLoader::default_config())
    }

    #[test]
    fn test_blank_and_delimiter_lines_continue() {
        let mut sh = shell();
        for line in ["", "\n", "   \t\n", "&", "& &\n"] {
            assert!(matches!(sh.execute_line(line), Ok(ExecOutcome::Continue)), "{line:?}");
        }
    }

    #[test]
    fn test_builtin_errors_are_not_fatal() {
        let mut sh = shell();
        let before = std::env::current_dir().unwrap();
        assert!(matches!(sh.execute_line("cd\n"), Ok(ExecOutcome::Continue)));
        assert!(matches!(sh.execute_line("cd a b\n"), Ok(ExecOutcome::Continue)));
        assert!(matches!(sh.execute_line("exit 3\n"), Ok(ExecOutcome::Continue)));
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_path_updates_environment() {
        let mut sh = shell();
        assert_eq!(sh.env.search_path(), &["/bin"]);
        sh.execute_line("path /usr/bin /usr/local/bin\n").unwrap();
        assert_eq!(sh.env.search_path(), &["/usr/bin", "/usr/local/bin"]);
        sh.execute_line("path\n").unwrap();
        assert!(sh.env.search_path().is_empty());
    }

    #[test]
    fn test_run_stops_at_exit() {
        let mut sh = shell();
        let mut input = InputHandler::batch(Cursor::new("path /x\nexit\npath /y\n"));
        assert_eq!(sh.run(&mut input), EXIT_SUCCESS);
        assert_eq!(sh.env.search_path(), &["/x"]);
    }

    #[test]
    fn test_run_ends_at_eof() {
        let mut sh = shell();
        let mut input = InputHandler::batch(Cursor::new(""));
        assert_eq!(sh.run(&mut input), EXIT_SUCCESS);
        assert_eq!(sh.reporter, ErrorReporter::new(false));
    }
}
