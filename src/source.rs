//! Reads raw source text and yields the lines that carry instructions.
//!
//! Both the assembly and the VM language use `//` comments that run to the
//! end of the line. Comments and surrounding whitespace are stripped, and
//! lines left empty are dropped. Each surviving line keeps its original
//! line number so later stages can point at it.
use std::io::{BufRead, BufReader, Read};

use regex::Regex;

use crate::error::{Error, Result};

const SYMBOL_PATTERN: &str = r"^[A-Za-z_.$:][A-Za-z0-9_.$:]*$";

/// Matches the names both languages accept for labels, variables and
/// functions: letters, digits, `_`, `.`, `$` and `:`, not starting with a
/// digit.
#[derive(Clone, Debug)]
pub struct SymbolPattern {
    regex: Regex,
}

impl Default for SymbolPattern {
    fn default() -> Self {
        SymbolPattern::new()
    }
}

impl SymbolPattern {
    pub fn new() -> Self {
        SymbolPattern {
            regex: Regex::new(SYMBOL_PATTERN).expect("symbol pattern compiles"),
        }
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

/// Rewrites `text` into something [`SymbolPattern`] accepts. Disallowed
/// characters become `_`, and a leading digit or empty text gets a `_`
/// prefix: `my-prog` gives `my_prog`, `07test` gives `_07test`.
pub fn to_symbol(text: &str) -> String {
    let mut symbol: String = text
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || "_.$:".contains(c) { c } else { '_' })
        .collect();
    if symbol.chars().next().map_or(true, |c| c.is_ascii_digit()) {
        symbol.insert(0, '_');
    }
    symbol
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SourceLine {
    /// 1-based line number in the original file.
    pub number: usize,
    pub text: String,
}

impl SourceLine {
    pub fn new<S: Into<String>>(number: usize, text: S) -> Self {
        SourceLine { number, text: text.into() }
    }
}

/// Consumes the whole reader. Any I/O failure aborts the read and no
/// lines are returned.
pub fn read_lines<R: Read>(reader: R) -> Result<Vec<SourceLine>> {
    let mut lines = Vec::with_capacity(256);

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let raw = line.map_err(Error::Read)?;
        if let Some(text) = clean_line(&raw) {
            lines.push(SourceLine::new(index + 1, text));
        }
    }

    debug!("read {} instruction line(s)", lines.len());
    Ok(lines)
}

/// Splits in-memory text the same way [`read_lines`] does.
pub fn split_lines(text: &str) -> Vec<SourceLine> {
    text.lines()
        .enumerate()
        .filter_map(|(index, raw)| clean_line(raw).map(|text| SourceLine::new(index + 1, text)))
        .collect()
}

/// Strips a trailing `//` comment and surrounding whitespace.
/// Returns `None` when nothing is left.
pub fn clean_line(raw: &str) -> Option<&str> {
    let code = match raw.find("//") {
        Some(start) => &raw[..start],
        None => raw,
    };
    let code = code.trim();
    if code.is_empty() {
        None
    } else {
        Some(code)
    }
}
