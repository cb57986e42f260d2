use crate::error::ShellError;

/// What the main loop should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    Continue,
    Exit(i32),
}

pub type ExecStatus = Result<ExecOutcome, ShellError>;

/// Exit code of a forked process whose work failed.
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_SUCCESS: i32 = 0;
