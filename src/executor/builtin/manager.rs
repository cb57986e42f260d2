use std::collections::HashMap;
use crate::environment::Environment;
use crate::executor::ExecStatus;
use crate::executor::builtin::commands::{CdCommand, ExitCommand, PathCommand};
use crate::lexer::Token;

pub trait BuiltinCommand {
    fn name(&self) -> &'static str;
    fn run(&self, args: &[String], env: &mut Environment) -> ExecStatus;
}

pub struct BuiltinManager {
    commands: HashMap<&'static str, Box<dyn BuiltinCommand>>,
}

impl BuiltinManager {
    pub fn new() -> Self {
        let mut mgr = BuiltinManager {
            commands: HashMap::new(),
        };
        mgr.register(Box::new(ExitCommand));
        mgr.register(Box::new(CdCommand));
        mgr.register(Box::new(PathCommand));
        mgr
    }

    pub fn register(&mut self, cmd: Box<dyn BuiltinCommand>) {
        self.commands.insert(cmd.name(), cmd);
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Runs the whole line as a built-in if its first token names one.
    ///
    /// `None` means the line is not a built-in and should be spawned. Every
    /// remaining token, operators included, becomes an argument.
    pub fn dispatch(&self, tokens: &[Token], env: &mut Environment) -> Option<ExecStatus> {
        let (Token::Word(name), rest) = tokens.split_first()? else {
            return None;
        };
        let cmd = self.commands.get(name.as_str())?;
        let args: Vec<String> = rest.iter().map(|t| t.text().to_string()).collect();
        log::debug!("builtin {} {:?}", name, args);
        Some(cmd.run(&args, env))
    }
}

impl Default for BuiltinManager {
    fn default() -> Self {
        Self::new()
    }
}
