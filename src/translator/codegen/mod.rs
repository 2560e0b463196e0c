//! Lowers VM commands to Hack assembly fragments.
//!
//! Every fragment keeps the stack invariant: `SP` holds the address of the
//! next free slot. Pushing writes at `SP` then increments it, popping
//! decrements it then reads.
//!
//! `R13` and `R14` are scratch registers owned by the generated code.

/// Collects assembly lines into a `Vec<String>`.
macro_rules! asm {
    ($($line:expr),* $(,)?) => {
        vec![$(String::from($line)),*]
    };
}

mod arithmetic;
mod flow;
mod memory;

use super::ast::Command;
use crate::error::{Error, Result};

/// Stateful only in the label counter and the enclosing function name,
/// both scoped to the file being translated.
pub struct CodeGenerator {
    file: String,
    function: Option<String>,
    labels: usize,
}

impl CodeGenerator {
    /// `file` is the source file stem; it prefixes statics and comparison
    /// labels.
    pub fn new<S: Into<String>>(file: S) -> Self {
        CodeGenerator { file: file.into(), function: None, labels: 0 }
    }

    /// Lowers one command. `line` is only used to report operands that
    /// fail [`Command::check`].
    pub fn generate(&mut self, line: usize, command: &Command) -> Result<Vec<String>> {
        command.check(line)?;
        let asm = match command {
            Command::Arithmetic(op) => self.arithmetic(*op),
            Command::Push(segment, index) => self.push(*segment, *index),
            Command::Pop(segment, index) => self.pop(*segment, *index).ok_or_else(|| {
                Error::misuse(line, "`constant` cannot be the target of a pop")
            })?,
            Command::Label(name) => self.label(name),
            Command::Goto(name) => self.goto(name),
            Command::IfGoto(name) => self.if_goto(name),
            Command::Function(name, locals) => self.function(name, *locals),
            Command::Call(name, args) => self.call(name, *args),
            Command::Return => self.ret(),
        };
        Ok(asm)
    }

    /// Number of unique labels handed out so far.
    pub fn label_count(&self) -> usize {
        self.labels
    }

    /// The function whose body is currently being generated.
    pub fn current_function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    fn next_label(&mut self) -> usize {
        let n = self.labels;
        self.labels += 1;
        n
    }

    /// Qualifies a user label with its enclosing function, or with the file
    /// when it appears outside any function.
    fn scoped(&self, name: &str) -> String {
        match &self.function {
            Some(function) => format!("{}${}", function, name),
            None => format!("{}${}", self.file, name),
        }
    }
}

/// Writes D to the top of the stack and advances `SP`.
fn push_d() -> Vec<String> {
    asm!["@SP", "A=M", "M=D", "@SP", "M=M+1"]
}

/// Pops the top of the stack into D.
fn pop_d() -> Vec<String> {
    asm!["@SP", "AM=M-1", "D=M"]
}
