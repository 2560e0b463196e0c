//! The Parser classifies cleaned source lines and converts them into
//! [`Instruction`]s.
use super::ast::*;
use super::encoder::MAX_ADDRESS;
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

    /// Parses one cleaned line. The line's shape is decided by its first
    /// character: `@` is an address, `(` a label, anything else a compute.
    pub fn parse(&self, line: &SourceLine) -> Result<Instruction> {
        let text = line.text.as_str();
        if let Some(payload) = text.strip_prefix('@') {
            self.address(payload, line.number)
        } else if let Some(rest) = text.strip_prefix('(') {
            self.label(rest, line.number)
        } else {
            compute(text, line.number)
        }
    }

    fn address(&self, payload: &str, line: usize) -> Result<Instruction> {
        let payload = payload.trim();
        if payload.is_empty() {
            return Err(Error::syntax(line, "`@` without a value"));
        }

        // A leading digit commits the payload to being a decimal literal.
        if payload.starts_with(|c: char| c.is_ascii_digit()) {
            if !payload.chars().all(|c| c.is_ascii_digit()) {
                return Err(Error::syntax(line, format!("malformed literal `{}`", payload)));
            }
            return match payload.parse::<u16>() {
                Ok(value) if value <= MAX_ADDRESS => {
                    Ok(Instruction::Address(Operand::Literal(value)))
                }
                _ => Err(Error::syntax(
                    line,
                    format!("literal `{}` does not fit in 15 bits (max {})", payload, MAX_ADDRESS),
                )),
            };
        }

        if !self.symbols.is_match(payload) {
            return Err(Error::syntax(line, format!("invalid symbol `{}`", payload)));
        }
        Ok(Instruction::Address(Operand::Symbol(payload.to_owned())))
    }

    fn label(&self, rest: &str, line: usize) -> Result<Instruction> {
        let name = match rest.strip_suffix(')') {
            Some(name) => name.trim(),
            None => return Err(Error::syntax(line, "label is missing its closing `)`")),
        };
        if !self.symbols.is_match(name) {
            return Err(Error::syntax(line, format!("invalid label name `{}`", name)));
        }
        Ok(Instruction::Label(name.to_owned()))
    }
}

/// Splits `dest=comp;jump`. Whitespace inside the expression is ignored.
fn compute(text: &str, line: usize) -> Result<Instruction> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    let (dest, rest) = match compact.split_once('=') {
        Some((dest, rest)) => (Some(dest), rest),
        None => (None, compact.as_str()),
    };
    if rest.contains('=') {
        return Err(Error::syntax(line, "more than one `=` in compute instruction"));
    }

    let (comp, jump) = match rest.split_once(';') {
        Some((comp, jump)) => (comp, Some(jump)),
        None => (rest, None),
    };
    if jump.map_or(false, |jump| jump.contains(';')) {
        return Err(Error::syntax(line, "more than one `;` in compute instruction"));
    }

    let dest = match dest {
        None => Dest::Null,
        Some("") => return Err(Error::syntax(line, "empty destination before `=`")),
        Some(dest) => Dest::from_mnemonic(dest).ok_or_else(|| Error::unknown(line, "dest", dest))?,
    };

    if comp.is_empty() {
        return Err(Error::syntax(line, "compute instruction has no computation"));
    }
    let comp = Comp::from_mnemonic(comp).ok_or_else(|| Error::unknown(line, "comp", comp))?;

    let jump = match jump {
        None => Jump::Null,
        Some("") => return Err(Error::syntax(line, "empty jump condition after `;`")),
        Some(jump) => Jump::from_mnemonic(jump).ok_or_else(|| Error::unknown(line, "jump", jump))?,
    };

    Ok(Instruction::Compute { dest, comp, jump })
}
