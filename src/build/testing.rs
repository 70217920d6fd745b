//! Scripted command runner shared by the driver tests.

use std::cell::RefCell;

use super::command::{CommandRunner, ToolCommand};
use super::error::BuildError;

type Responder = Box<dyn Fn(&ToolCommand, usize) -> Result<(), BuildError>>;

/// Records every command and answers with a caller supplied closure.
/// The closure also receives the zero-based call index.
pub struct ScriptedRunner {
    calls: RefCell<Vec<ToolCommand>>,
    responder: Responder,
}

impl ScriptedRunner {
    pub fn new(responder: impl Fn(&ToolCommand, usize) -> Result<(), BuildError> + 'static) -> Self {
        ScriptedRunner {
            calls: RefCell::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    /// A runner on which every command succeeds
    pub fn succeeding() -> Self {
        ScriptedRunner::new(|_, _| Ok(()))
    }

    pub fn calls(&self) -> Vec<ToolCommand> {
        self.calls.borrow().clone()
    }

    /// Recorded command lines, without cwd or env
    pub fn lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &ToolCommand) -> Result<(), BuildError> {
        let index = {
            let mut calls = self.calls.borrow_mut();
            calls.push(command.clone());
            calls.len() - 1
        };
        (self.responder)(command, index)
    }
}

/// Failure as reported by a real process exiting with `code`
pub fn failed(command: &ToolCommand, code: i32) -> BuildError {
    BuildError::CommandFailed {
        command: command.to_string(),
        code: Some(code),
    }
}
