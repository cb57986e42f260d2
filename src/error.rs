use std::io::{self, Write};
use nix::errno::Errno;

/// The one message every failure collapses to in terse mode.
pub const GENERIC_ERROR_MESSAGE: &str = "An error has occurred";

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("{op}: {source}")]
    Sys {
        op: &'static str,
        #[source]
        source: Errno,
    },
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot execute {name}: {source}")]
    Exec {
        name: String,
        #[source]
        source: Errno,
    },
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("{0}")]
    Builtin(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("usage: {0}")]
    Usage(String),
}

impl ShellError {
    pub fn sys(op: &'static str) -> impl FnOnce(Errno) -> ShellError {
        move |source| ShellError::Sys { op, source }
    }

    pub fn io(context: impl Into<String>) -> impl FnOnce(io::Error) -> ShellError {
        let context = context.into();
        move |source| ShellError::Io { context, source }
    }
}

/// Writes errors to stderr, either as the fixed generic line or with the
/// failing operation and the system's description of the cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorReporter {
    verbose: bool,
}

impl ErrorReporter {
    pub fn new(verbose: bool) -> Self {
        ErrorReporter { verbose }
    }

    pub fn render(&self, err: &ShellError) -> String {
        if self.verbose {
            err.to_string()
        } else {
            GENERIC_ERROR_MESSAGE.to_string()
        }
    }

    pub fn report(&self, err: &ShellError) {
        log::debug!("reporting error: {:?}", err);
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{}", self.render(err));
        let _ = stderr.flush();
    }
}
