//! Splits cleaned VM lines into whitespace-separated tokens and builds
//! [`Command`]s, rejecting anything the code generator cannot lower.
use super::ast::*;
use crate::error::{Error, Result};
use crate::source::{SourceLine, SymbolPattern};

#[derive(Default)]
pub struct Parser {
    symbols: SymbolPattern,
}

impl Parser {
    pub fn new() -> Self {
        Parser { symbols: SymbolPattern::new() }
    }

    pub fn parse(&self, line: &SourceLine) -> Result<Command> {
        let number = line.number;
        let tokens: Vec<&str> = line.text.split_whitespace().collect();
        let (op, args) = match tokens.split_first() {
            Some(split) => split,
            None => return Err(Error::syntax(number, "empty command")),
        };

        let command = if let Some(op) = ArithmeticOp::from_mnemonic(op) {
            expect_arity(args, 0, number)?;
            Command::Arithmetic(op)
        } else {
            match *op {
                "push" | "pop" => {
                    expect_arity(args, 2, number)?;
                    let segment = Segment::from_name(args[0])
                        .ok_or_else(|| Error::unknown(number, "segment", args[0]))?;
                    let index = number_arg(args[1], number)?;
                    if *op == "push" {
                        Command::Push(segment, index)
                    } else {
                        Command::Pop(segment, index)
                    }
                }
                "label" | "goto" | "if-goto" => {
                    expect_arity(args, 1, number)?;
                    let name = self.name_arg(args[0], number)?;
                    match *op {
                        "label" => Command::Label(name),
                        "goto" => Command::Goto(name),
                        _ => Command::IfGoto(name),
                    }
                }
                "function" | "call" => {
                    expect_arity(args, 2, number)?;
                    let name = self.name_arg(args[0], number)?;
                    let count = number_arg(args[1], number)?;
                    if *op == "function" {
                        Command::Function(name, count)
                    } else {
                        Command::Call(name, count)
                    }
                }
                "return" => {
                    expect_arity(args, 0, number)?;
                    Command::Return
                }
                _ => return Err(Error::unknown(number, "command", *op)),
            }
        };

        command.check(number)?;
        Ok(command)
    }

    fn name_arg(&self, token: &str, line: usize) -> Result<String> {
        if self.symbols.is_match(token) {
            Ok(token.to_owned())
        } else {
            Err(Error::syntax(line, format!("invalid name `{}`", token)))
        }
    }
}

fn expect_arity(args: &[&str], expected: usize, line: usize) -> Result<()> {
    if args.len() == expected {
        return Ok(());
    }
    let reason = if args.len() < expected {
        format!("expected {} argument(s), found {}", expected, args.len())
    } else {
        format!("unexpected trailing `{}`", args[expected..].join(" "))
    };
    Err(Error::syntax(line, reason))
}

fn number_arg(token: &str, line: usize) -> Result<u16> {
    if !token.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::syntax(line, format!("`{}` is not a non-negative integer", token)));
    }
    token
        .parse::<u16>()
        .map_err(|_| Error::syntax(line, format!("`{}` is too large", token)))
}
