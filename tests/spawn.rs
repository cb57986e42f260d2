//! Forking checks for the process plumbing, kept in their own test binary
//! so no other test thread can hold a std lock while a child is forked.

use anubis::environment::Environment;
use anubis::error::{ErrorReporter, ShellError};
use anubis::executor::spawn::{spawn, ProcessSet, StdioBinding};
use anubis::executor::ParallelHandler;
use anubis::lexer::Lexer;
use nix::sys::wait::WaitStatus;
use tempfile::TempDir;

#[test]
fn test_spawned_processes_report_and_are_reaped() {
    // child exit status follows the body's result
    let reporter = ErrorReporter::default();
    let mut children = ProcessSet::new();
    children.push(spawn(&StdioBinding::inherit(), reporter, || Ok(())).unwrap());
    children.push(
        spawn(&StdioBinding::inherit(), reporter, || {
            Err(ShellError::Syntax("boom".to_string()))
        })
        .unwrap(),
    );
    assert_eq!(children.len(), 2);

    let statuses = children.wait_all().unwrap();
    assert!(matches!(statuses[0], WaitStatus::Exited(_, 0)));
    assert!(matches!(statuses[1], WaitStatus::Exited(_, 1)));

    // every non-empty `&` group gets a process and is waited for
    let dir = TempDir::new().unwrap();
    let env = Environment::with_search_path(vec!["/bin".into(), "/usr/bin".into()]);
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    let line = format!("true > {} & & true > {}", a.display(), b.display());

    let spawned = ParallelHandler::run(&Lexer::tokenize(&line), &env, reporter).unwrap();
    assert_eq!(spawned, 2);
    assert!(a.exists());
    assert!(b.exists());
}
