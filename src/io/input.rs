use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use crate::error::ShellError;

/// Line source picked from the command line.
pub type LineInput = InputHandler<Box<dyn BufRead>>;

/// Where command lines come from. Interactive sources print a prompt before
/// every read, batch sources read silently.
pub struct InputHandler<R> {
    reader: R,
    prompt: Option<String>,
}

impl<R: BufRead> InputHandler<R> {
    pub fn interactive(reader: R, prompt: &str) -> Self {
        InputHandler { reader, prompt: Some(prompt.to_string()) }
    }

    pub fn batch(reader: R) -> Self {
        InputHandler { reader, prompt: None }
    }

    pub fn is_interactive(&self) -> bool {
        self.prompt.is_some()
    }

    /// Next raw line including its newline, `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        if let Some(prompt) = &self.prompt {
            let mut stdout = io::stdout().lock();
            stdout.write_all(prompt.as_bytes())?;
            stdout.flush()?;
        }

        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            if self.is_interactive() {
                // EOF (e.g. Ctrl-D) leaves the cursor after the prompt
                println!();
            }
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

impl LineInput {
    /// No argument reads stdin interactively, one argument names a batch
    /// file, anything else is a usage error.
    pub fn from_args(args: &[String], prompt: &str) -> Result<Self, ShellError> {
        match args {
            [] => Ok(Self::interactive(Box::new(io::stdin().lock()), prompt)),
            [path] => {
                let file = File::open(path).map_err(ShellError::io(format!("open({})", path)))?;
                Ok(Self::batch(Box::new(BufReader::new(file))))
            }
            _ => Err(ShellError::Usage("anubis [batch-file]".to_string())),
        }
    }
}
