//! Commands of the stack-based VM language.
//!
//! ```text
//! push constant 7      // memory access
//! pop local 0
//! add                  // arithmetic and logic
//! label LOOP           // control flow
//! if-goto LOOP
//! function Main.f 2    // functions
//! call Main.f 1
//! return
//! ```
use std::fmt;

use crate::assembler::encoder::MAX_ADDRESS;
use crate::error::{Error, Result};

/// Words pushed by a call before the callee starts.
pub const FRAME_SIZE: u16 = 5;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

impl ArithmeticOp {
    pub const ALL: [ArithmeticOp; 9] = [
        ArithmeticOp::Add, ArithmeticOp::Sub, ArithmeticOp::Neg,
        ArithmeticOp::Eq, ArithmeticOp::Gt, ArithmeticOp::Lt,
        ArithmeticOp::And, ArithmeticOp::Or, ArithmeticOp::Not,
    ];

    pub fn from_mnemonic(s: &str) -> Option<ArithmeticOp> {
        ArithmeticOp::ALL.iter().copied().find(|op| op.mnemonic() == s)
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "add",
            ArithmeticOp::Sub => "sub",
            ArithmeticOp::Neg => "neg",
            ArithmeticOp::Eq  => "eq",
            ArithmeticOp::Gt  => "gt",
            ArithmeticOp::Lt  => "lt",
            ArithmeticOp::And => "and",
            ArithmeticOp::Or  => "or",
            ArithmeticOp::Not => "not",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Segment {
    Argument,
    Local,
    Static,
    Constant,
    This,
    That,
    Pointer,
    Temp,
}

impl Segment {
    pub const ALL: [Segment; 8] = [
        Segment::Argument, Segment::Local, Segment::Static, Segment::Constant,
        Segment::This, Segment::That, Segment::Pointer, Segment::Temp,
    ];

    pub fn from_name(s: &str) -> Option<Segment> {
        Segment::ALL.iter().copied().find(|segment| segment.name() == s)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Segment::Argument => "argument",
            Segment::Local    => "local",
            Segment::Static   => "static",
            Segment::Constant => "constant",
            Segment::This     => "this",
            Segment::That     => "that",
            Segment::Pointer  => "pointer",
            Segment::Temp     => "temp",
        }
    }

    /// Highest index the segment accepts, for the fixed-size segments.
    pub fn max_index(&self) -> Option<u16> {
        match self {
            Segment::Pointer => Some(1),
            Segment::Temp => Some(7),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    Arithmetic(ArithmeticOp),
    Push(Segment, u16),
    Pop(Segment, u16),
    Label(String),
    Goto(String),
    IfGoto(String),
    Function(String, u16),
    Call(String, u16),
    Return,
}

impl Command {
    /// Rejects operands that would lower to assembly the assembler refuses:
    /// literals past 15 bits, out of range fixed segments and `pop constant`.
    pub fn check(&self, line: usize) -> Result<()> {
        match self {
            Command::Pop(Segment::Constant, _) => {
                Err(Error::misuse(line, "`constant` cannot be the target of a pop"))
            }
            Command::Push(segment, index) | Command::Pop(segment, index) => {
                check_index(*segment, *index, line)
            }
            Command::Function(name, locals) if *locals > MAX_ADDRESS => Err(Error::syntax(
                line,
                format!("function `{}` declares {} locals (max {})", name, locals, MAX_ADDRESS),
            )),
            Command::Call(name, args) => match FRAME_SIZE.checked_add(*args) {
                Some(words) if words <= MAX_ADDRESS => Ok(()),
                _ => Err(Error::syntax(
                    line,
                    format!(
                        "call to `{}` passes {} arguments (max {})",
                        name,
                        args,
                        MAX_ADDRESS - FRAME_SIZE
                    ),
                )),
            },
            _ => Ok(()),
        }
    }
}

fn check_index(segment: Segment, index: u16, line: usize) -> Result<()> {
    if index > MAX_ADDRESS {
        return Err(Error::syntax(
            line,
            format!("`{} {}` does not fit in 15 bits (max {})", segment, index, MAX_ADDRESS),
        ));
    }
    match segment.max_index() {
        Some(max) if index > max => Err(Error::misuse(
            line,
            format!("{} index {} is out of range 0..={}", segment, index, max),
        )),
        _ => Ok(()),
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Command::Arithmetic(op) => write!(f, "{}", op.mnemonic()),
            Command::Push(segment, index) => write!(f, "push {} {}", segment, index),
            Command::Pop(segment, index) => write!(f, "pop {} {}", segment, index),
            Command::Label(name) => write!(f, "label {}", name),
            Command::Goto(name) => write!(f, "goto {}", name),
            Command::IfGoto(name) => write!(f, "if-goto {}", name),
            Command::Function(name, locals) => write!(f, "function {} {}", name, locals),
            Command::Call(name, args) => write!(f, "call {} {}", name, args),
            Command::Return => write!(f, "return"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_mnemonics() {
        for op in ArithmeticOp::ALL.iter() {
            assert_eq!(ArithmeticOp::from_mnemonic(op.mnemonic()), Some(*op));
        }
        assert_eq!(ArithmeticOp::from_mnemonic("ADD"), None);
        assert_eq!(ArithmeticOp::from_mnemonic("xor"), None);
    }

    #[test]
    fn test_segment_names() {
        for segment in Segment::ALL.iter() {
            assert_eq!(Segment::from_name(segment.name()), Some(*segment));
        }
        assert_eq!(Segment::from_name("heap"), None);
        assert_eq!(Segment::Temp.max_index(), Some(7));
        assert_eq!(Segment::Local.max_index(), None);
    }

    #[test]
    fn test_check_operands() {
        assert!(Command::Push(Segment::Constant, MAX_ADDRESS).check(1).is_ok());
        assert!(Command::Push(Segment::Local, MAX_ADDRESS).check(1).is_ok());
        assert!(Command::Call("Main.f".into(), MAX_ADDRESS - FRAME_SIZE).check(1).is_ok());
        assert!(Command::Return.check(1).is_ok());

        assert!(matches!(Command::Push(Segment::Local, 32768).check(2), Err(Error::Syntax { line: 2, .. })));
        assert!(matches!(Command::Pop(Segment::Static, 40000).check(2), Err(Error::Syntax { .. })));
        assert!(matches!(Command::Push(Segment::Temp, u16::MAX).check(2), Err(Error::Syntax { .. })));
        assert!(matches!(Command::Pop(Segment::Temp, 8).check(2), Err(Error::SymbolMisuse { .. })));
        assert!(matches!(Command::Pop(Segment::Constant, 0).check(2), Err(Error::SymbolMisuse { .. })));
        assert!(matches!(Command::Call("Main.f".into(), u16::MAX).check(3), Err(Error::Syntax { line: 3, .. })));
        assert!(matches!(Command::Call("Main.f".into(), 32763).check(3), Err(Error::Syntax { .. })));
        assert!(matches!(Command::Function("Main.f".into(), 32768).check(3), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_display() {
        assert_eq!(Command::Push(Segment::Constant, 7).to_string(), "push constant 7");
        assert_eq!(Command::Pop(Segment::That, 2).to_string(), "pop that 2");
        assert_eq!(Command::IfGoto("END".into()).to_string(), "if-goto END");
        assert_eq!(Command::Call("Math.multiply".into(), 2).to_string(), "call Math.multiply 2");
        assert_eq!(Command::Arithmetic(ArithmeticOp::Not).to_string(), "not");
        assert_eq!(Command::Return.to_string(), "return");
    }
}
