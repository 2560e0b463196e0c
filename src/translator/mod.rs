//! The Translator module lowers one VM file into Hack assembly.
//!
//! Each cleaned line is parsed into a [`Command`](ast::Command) and handed
//! to the [`CodeGenerator`](codegen::CodeGenerator), which owns the label
//! counter and the enclosing-function scope for the whole file.

pub mod ast;
pub mod codegen;
pub mod parser;

use std::fmt;

use self::ast::Command;
use self::codegen::CodeGenerator;
use self::parser::Parser;
use crate::error::Result;
use crate::source::{self, SourceLine};

#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct Options {
    /// Prepend the SP setup and `call Sys.init 0`.
    pub bootstrap: bool,
    /// Precede each fragment with its VM command as a comment.
    pub annotate: bool,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Origin {
    Bootstrap,
    Command { line: usize, command: Command },
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Origin::Bootstrap => write!(f, "bootstrap"),
            Origin::Command { command, .. } => write!(f, "{}", command),
        }
    }
}

/// The assembly generated for one VM command.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Fragment {
    pub origin: Origin,
    pub asm: Vec<String>,
}

#[derive(Clone, Default, Debug)]
pub struct Translation {
    pub fragments: Vec<Fragment>,
}

impl Translation {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.fragments
            .iter()
            .flat_map(|fragment| fragment.asm.iter().map(String::as_str))
    }

    /// Renders the `.asm` text, one instruction per line.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for line in self.lines() {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

pub struct Translator {
    parser: Parser,
    generator: CodeGenerator,
    options: Options,
}

impl Translator {
    /// `file` is the stem of the source file, e.g. `Main` for `Main.vm`.
    /// A stem that is not a valid symbol is rewritten with
    /// [`source::to_symbol`] before it prefixes statics and labels.
    pub fn new<S: Into<String>>(file: S, options: Options) -> Self {
        let file = file.into();
        let prefix = source::to_symbol(&file);
        if prefix != file {
            warn!("file name `{}` is not a valid symbol, using `{}` to scope statics and labels", file, prefix);
        }
        Translator {
            parser: Parser::new(),
            generator: CodeGenerator::new(prefix),
            options,
        }
    }

    /// Translates a whole file. The first bad line aborts the translation
    /// and nothing is returned for the lines before it.
    pub fn translate(mut self, lines: &[SourceLine]) -> Result<Translation> {
        let mut fragments = Vec::with_capacity(lines.len() + 1);

        if self.options.bootstrap {
            let asm = self.generator.bootstrap();
            let asm = self.annotated("bootstrap", asm);
            fragments.push(Fragment { origin: Origin::Bootstrap, asm });
        }

        for line in lines {
            let command = self.parser.parse(line)?;
            let asm = self.generator.generate(line.number, &command)?;
            let asm = self.annotated(&command.to_string(), asm);
            fragments.push(Fragment {
                origin: Origin::Command { line: line.number, command },
                asm,
            });
        }

        info!(
            "translated {} command(s) into {} assembly line(s) using {} generated label(s)",
            lines.len(),
            fragments.iter().map(|f| f.asm.len()).sum::<usize>(),
            self.generator.label_count()
        );
        Ok(Translation { fragments })
    }

    fn annotated(&self, comment: &str, asm: Vec<String>) -> Vec<String> {
        if !self.options.annotate {
            return asm;
        }
        let mut out = Vec::with_capacity(asm.len() + 1);
        out.push(format!("// {}", comment));
        out.extend(asm);
        out
    }
}

/// Convenience wrapper for [`Translator::translate`].
pub fn translate(file: &str, lines: &[SourceLine], options: Options) -> Result<Translation> {
    Translator::new(file, options).translate(lines)
}
