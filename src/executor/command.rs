use std::convert::Infallible;
use std::ffi::{CStr, CString};
use std::os::unix::ffi::OsStrExt;
use nix::errno::Errno;
use nix::unistd::execv;

use crate::environment::Environment;
use crate::error::ShellError;
use crate::executor::path_resolver::PathResolver;
use crate::lexer::Token;
use crate::parser;

/// Replaces the current process image with the stage's program.
///
/// The first word is tried exactly as written, then under each search
/// directory that holds an executable of that name. argv[0] stays the name
/// the user typed. Only returns if nothing could be executed, so it must
/// run in a process forked for this one command.
pub fn exec_command(stage: &[Token], env: &Environment) -> Result<Infallible, ShellError> {
    let args = parser::argv(stage);
    let Some(name) = args.first() else {
        return Err(ShellError::InvalidArgument("empty command".to_string()));
    };
    let argv = args
        .iter()
        .map(|a| CString::new(a.as_bytes()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ShellError::InvalidArgument(format!("NUL byte in arguments of {}", name)))?;

    log::debug!("exec {:?}", args);
    let mut last_err = exec_at(&argv[0], &argv);

    let resolver = PathResolver::new(env.search_path());
    for candidate in resolver.executables(name) {
        let Ok(path) = CString::new(candidate.as_os_str().as_bytes()) else {
            continue;
        };
        last_err = exec_at(&path, &argv);
    }

    Err(ShellError::Exec { name: name.clone(), source: last_err })
}

/// `exec_command` for callers that expect a plain result.
pub fn run_command(stage: &[Token], env: &Environment) -> Result<(), ShellError> {
    let never = exec_command(stage, env)?;
    match never {}
}

fn exec_at(path: &CStr, argv: &[CString]) -> Errno {
    match execv(path, argv) {
        Ok(never) => match never {},
        Err(errno) => errno,
    }
}
