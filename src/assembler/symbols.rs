//! Symbol table for a single assembly run.
//!
//! Labels are bound during the first pass to ROM addresses, variables are
//! allocated during the second pass to RAM addresses starting at 16.
//! A binding never changes once made.
use std::collections::HashMap;

use super::encoder::MAX_ADDRESS;

/// First RAM address handed out to variables.
pub const VARIABLE_BASE: u16 = 16;

const RESERVED: [(&str, u16); 23] = [
    ("SP", 0),
    ("LCL", 1),
    ("ARG", 2),
    ("THIS", 3),
    ("THAT", 4),
    ("R0", 0),
    ("R1", 1),
    ("R2", 2),
    ("R3", 3),
    ("R4", 4),
    ("R5", 5),
    ("R6", 6),
    ("R7", 7),
    ("R8", 8),
    ("R9", 9),
    ("R10", 10),
    ("R11", 11),
    ("R12", 12),
    ("R13", 13),
    ("R14", 14),
    ("R15", 15),
    ("SCREEN", 16384),
    ("KBD", 24576),
];

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SymbolTable {
    symbols: HashMap<String, u16>,
    next_variable: u16,
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}

impl SymbolTable {
    /// Creates a table holding only the platform symbols.
    pub fn new() -> Self {
        let symbols = RESERVED
            .iter()
            .map(|(name, address)| (name.to_string(), *address))
            .collect();
        SymbolTable { symbols, next_variable: VARIABLE_BASE }
    }

    pub fn is_reserved(name: &str) -> bool {
        RESERVED.iter().any(|(reserved, _)| *reserved == name)
    }

    pub fn lookup(&self, name: &str) -> Option<u16> {
        self.symbols.get(name).copied()
    }

    /// Binds `name` to `address`. Rebinding to the same address is a no-op;
    /// rebinding to a different one fails with the existing address.
    pub fn bind(&mut self, name: &str, address: u16) -> Result<(), u16> {
        match self.symbols.get(name) {
            Some(existing) if *existing == address => Ok(()),
            Some(existing) => Err(*existing),
            None => {
                self.symbols.insert(name.to_owned(), address);
                Ok(())
            }
        }
    }

    /// Returns the existing binding or allocates the next free variable
    /// address. Returns `None` once the address space is exhausted.
    pub fn resolve_or_allocate(&mut self, name: &str) -> Option<u16> {
        if let Some(address) = self.lookup(name) {
            return Some(address);
        }
        if self.next_variable > MAX_ADDRESS {
            return None;
        }
        let address = self.next_variable;
        self.next_variable += 1;
        self.symbols.insert(name.to_owned(), address);
        debug!("allocated variable `{}` at RAM[{}]", name, address);
        Some(address)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All bindings sorted by name.
    pub fn entries(&self) -> Vec<(&str, u16)> {
        let mut entries: Vec<(&str, u16)> = self
            .symbols
            .iter()
            .map(|(name, address)| (name.as_str(), *address))
            .collect();
        entries.sort();
        entries
    }
}
