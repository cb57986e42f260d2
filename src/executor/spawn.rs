use std::io::{self, Write};
use std::os::fd::RawFd;
use libc::{STDIN_FILENO, STDOUT_FILENO};
use nix::errno::Errno;
use nix::sys::signal::{signal, SigHandler, Signal};
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{close, dup2, fork, ForkResult, Pid};

use crate::error::{ErrorReporter, ShellError};
use crate::executor::{EXIT_FAILURE, EXIT_SUCCESS};

/// Descriptor wiring for one spawned process.
///
/// `stdin`/`stdout` are duplicated onto descriptors 0 and 1, then every
/// descriptor in `close` is closed, before the body runs. `None` inherits
/// the spawner's stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StdioBinding {
    pub stdin: Option<RawFd>,
    pub stdout: Option<RawFd>,
    pub close: Vec<RawFd>,
}

impl StdioBinding {
    pub fn inherit() -> Self {
        Self::default()
    }

    fn apply(&self) -> Result<(), ShellError> {
        if let Some(fd) = self.stdin {
            dup2(fd, STDIN_FILENO).map_err(ShellError::sys("dup2(stdin)"))?;
        }
        if let Some(fd) = self.stdout {
            dup2(fd, STDOUT_FILENO).map_err(ShellError::sys("dup2(stdout)"))?;
        }
        for &fd in &self.close {
            close(fd).map_err(ShellError::sys("close()"))?;
        }
        Ok(())
    }
}

/// Forks a process that applies `binding`, runs `body` and exits.
///
/// Only the spawner returns from here. The child exits 0 if `body`
/// succeeds (a body that execs never gets that far) and 1 after reporting
/// the error otherwise.
pub fn spawn<F>(binding: &StdioBinding, reporter: ErrorReporter, body: F) -> Result<Pid, ShellError>
where
    F: FnOnce() -> Result<(), ShellError>,
{
    // Anything still buffered would otherwise be written twice.
    io::stdout().flush().map_err(ShellError::io("flush(stdout)"))?;

    // SAFETY: the interpreter is single-threaded; the child only touches
    // its own copy of the state and leaves through `exit`.
    match unsafe { fork() }.map_err(ShellError::sys("fork()"))? {
        ForkResult::Parent { child } => {
            log::debug!("spawned {} with {:?}", child, binding);
            Ok(child)
        }
        ForkResult::Child => {
            let code = match restore_sigpipe().and_then(|()| binding.apply()).and_then(|()| body()) {
                Ok(()) => EXIT_SUCCESS,
                Err(e) => {
                    reporter.report(&e);
                    EXIT_FAILURE
                }
            };
            std::process::exit(code)
        }
    }
}

/// The Rust runtime ignores SIGPIPE and an ignored disposition survives
/// `execv`. Programs must start with the default so a writer dies when its
/// reader goes away.
fn restore_sigpipe() -> Result<(), ShellError> {
    // SAFETY: installs the default disposition, no handler code runs.
    unsafe { signal(Signal::SIGPIPE, SigHandler::SigDfl) }.map_err(ShellError::sys("signal(SIGPIPE)"))?;
    Ok(())
}

/// Every process one orchestration step spawned, in spawn order.
#[derive(Debug, Default)]
pub struct ProcessSet {
    pids: Vec<Pid>,
}

impl ProcessSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pid: Pid) {
        self.pids.push(pid);
    }

    pub fn len(&self) -> usize {
        self.pids.len()
    }

    /// Waits for every pid exactly once, in spawn order.
    ///
    /// A failed wait does not stop the others from being reaped; the first
    /// failure is returned once all have been attempted.
    pub fn wait_all(self) -> Result<Vec<WaitStatus>, ShellError> {
        let mut statuses = Vec::with_capacity(self.pids.len());
        let mut first_err = None;
        for pid in self.pids {
            match wait_for(pid) {
                Ok(status) => statuses.push(status),
                Err(e) => {
                    first_err.get_or_insert(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(statuses),
        }
    }
}

fn wait_for(pid: Pid) -> Result<WaitStatus, ShellError> {
    loop {
        match waitpid(pid, None) {
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(ShellError::Sys { op: "waitpid()", source: e }),
            Ok(status) => {
                log::debug!("reaped {}: {:?}", pid, status);
                return Ok(status);
            }
        }
    }
}
