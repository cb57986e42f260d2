use std::fs::OpenOptions;
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;
use libc::STDOUT_FILENO;
use nix::unistd::dup2;

use crate::environment::Environment;
use crate::error::{ErrorReporter, ShellError};
use crate::executor::pipeline::PipelineHandler;
use crate::lexer::Token;
use crate::parser::parse_redirect;

/// Owner read, write and execute.
pub const REDIRECT_MODE: u32 = 0o700;

pub struct RedirectHandler;

impl RedirectHandler {
    /// Runs one `&`-separated group inside its own process: resolve `>`,
    /// rebind stdout, hand the rest to the pipeline.
    ///
    /// The rebinding is inherited by every stage, but all stages except the
    /// last write into their pipe instead, so only the final stage's output
    /// lands in the file.
    pub fn run_group(group: &[Token], env: &Environment, reporter: ErrorReporter) -> Result<(), ShellError> {
        let redirect = parse_redirect(group)?;
        if let Some(target) = redirect.target {
            Self::bind_stdout(target)?;
        }
        PipelineHandler::run(redirect.command, env, reporter)
    }

    /// Points this process's stdout at `target`, created if absent and
    /// truncated if present.
    pub fn bind_stdout(target: &str) -> Result<(), ShellError> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(REDIRECT_MODE)
            .open(target)
            .map_err(ShellError::io(format!("open({})", target)))?;
        dup2(file.as_raw_fd(), STDOUT_FILENO).map_err(ShellError::sys("dup2(stdout)"))?;
        log::debug!("stdout redirected to {}", target);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    #[test]
    fn test_malformed_group_runs_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("never.txt");
        let line = format!("echo hi > {} extra", target.display());
        let tokens = Lexer::tokenize(&line);

        let err = RedirectHandler::run_group(&tokens, &Environment::new(), ErrorReporter::default())
            .unwrap_err();
        assert!(matches!(err, ShellError::Syntax(_)));
        assert!(!target.exists());
    }

    #[test]
    fn test_unopenable_target_is_io_error() {
        let err = RedirectHandler::bind_stdout("/nonexistent/dir/out.txt").unwrap_err();
        assert!(matches!(err, ShellError::Io { .. }));
    }
}
