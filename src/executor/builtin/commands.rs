use crate::environment::Environment;
use crate::error::ShellError;
use crate::executor::{ExecOutcome, ExecStatus, EXIT_SUCCESS};
use crate::executor::builtin::manager::BuiltinCommand;

pub struct ExitCommand;

impl BuiltinCommand for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }
    fn run(&self, args: &[String], _env: &mut Environment) -> ExecStatus {
        if !args.is_empty() {
            return Err(ShellError::Builtin(format!("exit: takes no arguments, got {}", args.len())));
        }
        Ok(ExecOutcome::Exit(EXIT_SUCCESS))
    }
}

pub struct CdCommand;

impl BuiltinCommand for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }
    fn run(&self, args: &[String], _env: &mut Environment) -> ExecStatus {
        let [target] = args else {
            return Err(ShellError::Builtin(format!("cd: expected one directory, got {}", args.len())));
        };
        std::env::set_current_dir(target).map_err(ShellError::io(format!("cd {}", target)))?;
        Ok(ExecOutcome::Continue)
    }
}

pub struct PathCommand;

impl BuiltinCommand for PathCommand {
    fn name(&self) -> &'static str {
        "path"
    }
    fn run(&self, args: &[String], env: &mut Environment) -> ExecStatus {
        env.set_search_path(args.to_vec());
        Ok(ExecOutcome::Continue)
    }
}
