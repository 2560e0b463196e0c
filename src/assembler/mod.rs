//! The Assembler module turns cleaned Hack assembly lines into 16-bit
//! machine words.
//!
//! It runs two passes. The first binds every label to the ROM address of
//! the instruction that follows it, so labels may be referenced before they
//! are defined. The second encodes each real instruction, allocating RAM
//! for variables in first-seen order.

pub mod ast;
pub mod encoder;
pub mod parser;
pub mod symbols;

use self::ast::{Instruction, Operand};
use self::encoder::MAX_ADDRESS;
use self::parser::Parser;
use self::symbols::SymbolTable;
use crate::error::{Error, Result};
use crate::source::SourceLine;

/// A real instruction together with the source line it came from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Statement {
    pub line: usize,
    pub instruction: Instruction,
}

/// The result of assembling one file.
#[derive(Clone, Debug)]
pub struct Assembly {
    /// Real instructions in ROM order.
    pub statements: Vec<Statement>,
    /// One machine word per statement.
    pub words: Vec<u16>,
    pub symbols: SymbolTable,
}

impl Assembly {
    /// Renders the `.hack` text: one 16-character binary line per word.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.words.len() * 17);
        for word in &self.words {
            out.push_str(&encoder::to_binary(*word));
            out.push('\n');
        }
        out
    }
}

/// Runs both passes over `lines`.
pub fn assemble(lines: &[SourceLine]) -> Result<Assembly> {
    let (symbols, statements) = first_pass(lines, SymbolTable::new())?;
    let (symbols, words) = second_pass(&statements, symbols)?;
    info!(
        "assembled {} instruction(s), {} symbol(s) bound",
        words.len(),
        symbols.len()
    );
    Ok(Assembly { statements, words, symbols })
}

/// Label resolution. Returns the table extended with every label and the
/// real instructions in ROM order.
pub fn first_pass(
    lines: &[SourceLine],
    mut symbols: SymbolTable,
) -> Result<(SymbolTable, Vec<Statement>)> {
    let parser = Parser::new();
    let mut statements = Vec::with_capacity(lines.len());

    for line in lines {
        let instruction = parser.parse(line)?;
        // The ROM counter is the number of real instructions seen so far.
        let rom = statements.len();

        if let Instruction::Label(name) = &instruction {
            bind_label(&mut symbols, name, rom, line.number)?;
            continue;
        }
        statements.push(Statement { line: line.number, instruction });
    }

    debug!("first pass: {} real instruction(s)", statements.len());
    Ok((symbols, statements))
}

fn bind_label(symbols: &mut SymbolTable, name: &str, rom: usize, line: usize) -> Result<()> {
    if SymbolTable::is_reserved(name) {
        warn!(
            "line {}: label `{}` shadows a platform symbol; references keep the reserved value",
            line, name
        );
        return Ok(());
    }
    if rom > MAX_ADDRESS as usize {
        return Err(Error::misuse(
            line,
            format!("label `{}` points past the end of ROM", name),
        ));
    }
    symbols.bind(name, rom as u16).map_err(|existing| {
        Error::misuse(
            line,
            format!("label `{}` is already bound to ROM address {}", name, existing),
        )
    })
}

/// Encoding. Variables are allocated here, in the order they are first
/// referenced.
pub fn second_pass(
    statements: &[Statement],
    mut symbols: SymbolTable,
) -> Result<(SymbolTable, Vec<u16>)> {
    let mut words = Vec::with_capacity(statements.len());

    for statement in statements {
        let word = match &statement.instruction {
            Instruction::Address(Operand::Literal(value)) => encoder::encode_address(*value),
            Instruction::Address(Operand::Symbol(name)) => {
                let address = symbols.resolve_or_allocate(name).ok_or_else(|| {
                    Error::misuse(
                        statement.line,
                        format!("no RAM left to allocate variable `{}`", name),
                    )
                })?;
                encoder::encode_address(address)
            }
            Instruction::Compute { dest, comp, jump } => {
                encoder::encode_compute(*dest, *comp, *jump)
            }
            // The first pass never hands labels over.
            Instruction::Label(_) => continue,
        };
        words.push(word);
    }

    Ok((symbols, words))
}
