use std::os::fd::{IntoRawFd, RawFd};
use nix::unistd::{close, pipe};

use crate::environment::Environment;
use crate::error::{ErrorReporter, ShellError};
use crate::executor::command::run_command;
use crate::executor::spawn::{spawn, ProcessSet, StdioBinding};
use crate::lexer::Token;
use crate::parser::split_on;

/// The N-1 pipes joining N stages. Pipe `i` carries stage `i`'s output to
/// stage `i + 1`.
#[derive(Debug)]
pub struct PipeSet {
    ends: Vec<(RawFd, RawFd)>,
}

impl PipeSet {
    pub fn new(count: usize) -> Result<Self, ShellError> {
        let mut set = PipeSet { ends: Vec::with_capacity(count) };
        for _ in 0..count {
            let (read, write) = pipe().map_err(ShellError::sys("pipe()"))?;
            set.ends.push((read.into_raw_fd(), write.into_raw_fd()));
        }
        Ok(set)
    }

    pub fn raw_fds(&self) -> Vec<RawFd> {
        self.ends.iter().flat_map(|&(r, w)| [r, w]).collect()
    }

    /// Wiring for the stage at `position`: read from the pipe before it,
    /// write into the pipe after it, close every endpoint once rebound.
    pub fn binding_for(&self, position: usize) -> StdioBinding {
        StdioBinding {
            stdin: position.checked_sub(1).and_then(|i| self.ends.get(i)).map(|&(r, _)| r),
            stdout: self.ends.get(position).map(|&(_, w)| w),
            close: self.raw_fds(),
        }
    }

    /// Closes every endpoint this process still holds. Readers only see
    /// end-of-file once the last copy of a write end is gone.
    pub fn close_all(&mut self) -> Result<(), ShellError> {
        let mut result = Ok(());
        for (read, write) in self.ends.drain(..) {
            for fd in [read, write] {
                if let Err(e) = close(fd) {
                    if result.is_ok() {
                        result = Err(ShellError::Sys { op: "close()", source: e });
                    }
                }
            }
        }
        result
    }
}

impl Drop for PipeSet {
    fn drop(&mut self) {
        let _ = self.close_all();
    }
}

pub struct PipelineHandler;

impl PipelineHandler {
    /// Runs a `|`-separated command run that has no `&` or `>` left.
    ///
    /// A single stage is exec'd in the calling process and only comes back
    /// on failure. Otherwise each non-empty stage gets its own process;
    /// empty stages are skipped but still occupy their position.
    pub fn run(tokens: &[Token], env: &Environment, reporter: ErrorReporter) -> Result<(), ShellError> {
        let stages = split_on(tokens, &Token::Pipe);
        if let [stage] = stages[..] {
            return run_command(stage, env);
        }

        let mut pipes = PipeSet::new(stages.len() - 1)?;
        let mut children = ProcessSet::new();
        let mut spawn_err = None;

        for (position, stage) in stages.iter().enumerate() {
            if stage.is_empty() {
                log::debug!("skipping empty stage {}", position);
                continue;
            }
            let binding = pipes.binding_for(position);
            match spawn(&binding, reporter, || run_command(stage, env)) {
                Ok(pid) => children.push(pid),
                Err(e) => {
                    spawn_err = Some(e);
                    break;
                }
            }
        }

        let closed = pipes.close_all();
        let waited = children.wait_all();
        if let Some(e) = spawn_err {
            return Err(e);
        }
        closed?;
        waited.map(|_| ())
    }
}
