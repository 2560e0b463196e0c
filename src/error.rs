use std::io;
use thiserror::Error;

/// Every way a translation can fail.
///
/// Line numbers are 1-based and refer to the original source file,
/// including blank and comment lines.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unable to read source: {0}")]
    Read(#[source] io::Error),

    #[error("unable to create output file `{0}`: {1}")]
    Create(String, #[source] io::Error),

    #[error("unable to write output file `{0}`: {1}")]
    Write(String, #[source] io::Error),

    #[error("syntax error on line {line}: {reason}")]
    Syntax { line: usize, reason: String },

    #[error("unknown {kind} `{token}` on line {line}")]
    UnknownMnemonic {
        line: usize,
        kind: &'static str,
        token: String,
    },

    #[error("invalid use of symbol on line {line}: {reason}")]
    SymbolMisuse { line: usize, reason: String },
}

impl Error {
    pub fn syntax<S: Into<String>>(line: usize, reason: S) -> Self {
        Error::Syntax { line, reason: reason.into() }
    }

    pub fn unknown<S: Into<String>>(line: usize, kind: &'static str, token: S) -> Self {
        Error::UnknownMnemonic { line, kind, token: token.into() }
    }

    pub fn misuse<S: Into<String>>(line: usize, reason: S) -> Self {
        Error::SymbolMisuse { line, reason: reason.into() }
    }

    /// The source line the error points at, if it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Syntax { line, .. }
            | Error::UnknownMnemonic { line, .. }
            | Error::SymbolMisuse { line, .. } => Some(*line),
            Error::Read(_) | Error::Create(..) | Error::Write(..) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
